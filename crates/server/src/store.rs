//! [`DocumentStore`]: process-lifetime, in-memory map of uploaded documents.
//!
//! One coarse `RwLock` guards the whole map: chat lookups share the read
//! lock, uploads take the write lock for the insert only. Nothing is ever
//! evicted or persisted.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::warn;

use pdfchat_core::{new_document_id, DocumentId, DocumentRecord};

#[derive(Default)]
pub struct DocumentStore {
    documents: RwLock<HashMap<DocumentId, Arc<DocumentRecord>>>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the record under its own id. Returns the record
    /// previously stored under that id, if any.
    pub async fn put(&self, record: DocumentRecord) -> Option<Arc<DocumentRecord>> {
        let mut documents = self.documents.write().await;
        documents.insert(record.id.clone(), Arc::new(record))
    }

    pub async fn get(&self, id: &str) -> Option<Arc<DocumentRecord>> {
        self.documents.read().await.get(id).cloned()
    }

    /// Store a new record under a freshly generated id that is not in use.
    pub async fn insert_new(
        &self,
        filename: String,
        page_count: usize,
        chunks: Vec<String>,
    ) -> Arc<DocumentRecord> {
        let mut documents = self.documents.write().await;
        let mut id = new_document_id();
        while documents.contains_key(&id) {
            warn!("Document id collision on {id}, regenerating");
            id = new_document_id();
        }
        let record = Arc::new(DocumentRecord::new(id.clone(), filename, page_count, chunks));
        documents.insert(id, record.clone());
        record
    }

    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }
}
