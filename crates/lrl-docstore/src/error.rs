use thiserror::Error;

/// Errors from document store operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocStoreError {
    #[error("malformed document reference: {0}")]
    MalformedRef(String),

    #[error("document store unavailable: {0}")]
    Unavailable(String),

    #[error("document store lock poisoned")]
    LockPoisoned,
}
