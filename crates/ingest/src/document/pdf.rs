use tracing::debug;

use super::{ExtractedDocument, ExtractionError, PageContent};

/// Extract per-page text from an in-memory PDF.
///
/// Every page of the document yields one `PageContent`, including pages with
/// no text layer (their text is empty), so `page_count()` is the real page
/// count. Any parse failure discards the whole document.
pub fn extract_pdf(bytes: &[u8]) -> Result<ExtractedDocument, ExtractionError> {
    let page_texts = pdf_extract::extract_text_from_mem_by_pages(bytes)
        .map_err(|e| ExtractionError::Pdf(e.to_string()))?;

    // pdf-extract pads each page with blank lines; the padding is not content.
    let pages: Vec<PageContent> = page_texts
        .into_iter()
        .enumerate()
        .map(|(i, text)| PageContent {
            page_number: i + 1,
            text: text.trim().to_string(),
        })
        .collect();

    debug!(
        pages = pages.len(),
        empty_pages = pages.iter().filter(|p| p.text.is_empty()).count(),
        "PDF text extracted"
    );

    Ok(ExtractedDocument { pages })
}
