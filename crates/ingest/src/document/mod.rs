pub mod chunker;
mod pdf;

use thiserror::Error;

pub use pdf::extract_pdf;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("PDF extraction failed: {0}")]
    Pdf(String),
}

/// A page of extracted text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageContent {
    /// 1-based page number.
    pub page_number: usize,
    /// The extracted text content. Empty when the page has no text layer.
    pub text: String,
}

/// Result of extracting text from a PDF.
#[derive(Debug, Clone)]
pub struct ExtractedDocument {
    /// Pages in document order.
    pub pages: Vec<PageContent>,
}

impl ExtractedDocument {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// All page texts in order, joined with a newline.
    pub fn full_text(&self) -> String {
        self.pages
            .iter()
            .map(|p| p.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Total character count across all pages.
    pub fn total_chars(&self) -> usize {
        self.pages.iter().map(|p| p.text.chars().count()).sum()
    }
}

/// True when `filename` carries a `.pdf` extension (case-insensitive).
pub fn is_pdf_filename(filename: &str) -> bool {
    match filename.rsplit_once('.') {
        Some((stem, ext)) => !stem.is_empty() && ext.eq_ignore_ascii_case("pdf"),
        None => false,
    }
}
