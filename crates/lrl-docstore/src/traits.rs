use crate::error::DocStoreError;
use crate::reference::DocumentRef;

/// Boundary to the external document/blob store.
///
/// Documents are immutable once written; content-addressing makes `put`
/// idempotent. `resolve` returns `Ok(None)` for an unknown reference.
pub trait DocumentStore: Send + Sync {
    /// Store a document and return its stable reference.
    fn put(&self, bytes: &[u8]) -> Result<DocumentRef, DocStoreError>;

    /// Fetch the bytes behind a reference, if present.
    fn resolve(&self, reference: &DocumentRef) -> Result<Option<Vec<u8>>, DocStoreError>;
}
