use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Length of a document identifier in hex characters.
pub const DOCUMENT_ID_LEN: usize = 8;

/// Short opaque identifier naming an uploaded document.
pub type DocumentId = String;

/// Generate a fresh identifier: the first 8 hex digits of a random v4 UUID.
///
/// Collisions are possible; callers that store records must check for them.
pub fn new_document_id() -> DocumentId {
    let mut id = Uuid::new_v4().simple().to_string();
    id.truncate(DOCUMENT_ID_LEN);
    id
}

/// Extracted metadata and chunked text for one uploaded PDF.
///
/// Immutable once created; the chunk sequence is never re-chunked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub id: DocumentId,
    pub filename: String,
    pub page_count: usize,
    pub chunks: Vec<String>,
}

impl DocumentRecord {
    pub fn new(id: DocumentId, filename: String, page_count: usize, chunks: Vec<String>) -> Self {
        Self {
            id,
            filename,
            page_count,
            chunks,
        }
    }

    /// True when extraction produced no usable context.
    pub fn has_content(&self) -> bool {
        !self.chunks.is_empty()
    }
}
