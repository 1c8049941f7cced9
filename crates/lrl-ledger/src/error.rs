use lrl_types::{Address, PropertyId};

/// Errors produced by ledger store operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    #[error("property {0} does not exist")]
    NotFound(PropertyId),

    #[error("property {0} is not verified")]
    NotVerified(PropertyId),

    #[error("stale owner for property {id}: expected {expected}, current {current}")]
    StaleOwner {
        id: PropertyId,
        expected: Address,
        current: Address,
    },

    #[error("journal holds conflicting record: {0}")]
    CorruptJournal(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("persistence failure: {0}")]
    Persistence(String),

    #[error("ledger lock poisoned")]
    LockPoisoned,
}
