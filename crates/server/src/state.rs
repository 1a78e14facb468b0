use pdfchat_ingest::document::chunker::ChunkConfig;
use pdfchat_ingest::document::{extract_pdf, ExtractedDocument, ExtractionError};
use pdfchat_llm::PdfChat;

use crate::store::DocumentStore;

/// Turns uploaded bytes into per-page text. Runs on a blocking thread.
pub type PdfExtractor = fn(&[u8]) -> Result<ExtractedDocument, ExtractionError>;

pub struct AppState {
    pub store: DocumentStore,
    /// `None` when no API key is configured; chat requests then fail with 500.
    pub chat: Option<PdfChat>,
    pub chunk_config: ChunkConfig,
    pub extractor: PdfExtractor,
}

impl AppState {
    pub fn new(chat: Option<PdfChat>) -> Self {
        Self {
            store: DocumentStore::new(),
            chat,
            chunk_config: ChunkConfig::default(),
            extractor: extract_pdf,
        }
    }

    pub fn with_extractor(mut self, extractor: PdfExtractor) -> Self {
        self.extractor = extractor;
        self
    }
}
