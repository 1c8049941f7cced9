//! Content-addressed document store boundary for the Land Registry
//! Ledger.
//!
//! Title documents live outside the ledger; the ledger stores only the
//! opaque reference returned by [`DocumentStore::put`]. References are
//! content-addressed (`doc:` + BLAKE3 hex), so the same bytes always
//! resolve to the same reference and writes are idempotent. The core
//! never interprets document content.

pub mod error;
pub mod memory;
pub mod reference;
pub mod traits;

pub use error::DocStoreError;
pub use memory::InMemoryDocumentStore;
pub use reference::DocumentRef;
pub use traits::DocumentStore;
