use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::DocStoreError;
use crate::reference::DocumentRef;
use crate::traits::DocumentStore;

/// In-memory document store for tests and demos.
pub struct InMemoryDocumentStore {
    documents: RwLock<HashMap<DocumentRef, Vec<u8>>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self {
            documents: RwLock::new(HashMap::new()),
        }
    }

    /// Number of stored documents.
    pub fn len(&self) -> usize {
        self.documents.read().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryDocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentStore for InMemoryDocumentStore {
    fn put(&self, bytes: &[u8]) -> Result<DocumentRef, DocStoreError> {
        let reference = DocumentRef::for_bytes(bytes);
        let mut map = self
            .documents
            .write()
            .map_err(|_| DocStoreError::LockPoisoned)?;
        // Idempotent: the same bytes always map to the same reference.
        map.entry(reference.clone()).or_insert_with(|| bytes.to_vec());
        Ok(reference)
    }

    fn resolve(&self, reference: &DocumentRef) -> Result<Option<Vec<u8>>, DocStoreError> {
        let map = self
            .documents
            .read()
            .map_err(|_| DocStoreError::LockPoisoned)?;
        Ok(map.get(reference).cloned())
    }
}
