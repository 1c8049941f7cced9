use lrl_ledger::LedgerError;
use lrl_types::{Address, PropertyId};

/// Errors surfaced by registry operations.
///
/// Each variant is a distinct, programmatically distinguishable outcome;
/// callers (notably the HTTP layer) must never collapse them into one
/// generic failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("invalid input: {field} must not be empty")]
    InvalidInput { field: &'static str },

    #[error("caller {caller} is not authorized: {reason}")]
    Unauthorized { caller: Address, reason: String },

    #[error("property {0} does not exist")]
    NotFound(PropertyId),

    #[error("property {0} is not verified; request verification before transferring")]
    NotVerified(PropertyId),

    #[error("invalid transfer target: {0}")]
    InvalidTarget(String),

    #[error("lost a concurrent update race on property {0}")]
    Conflict(PropertyId),

    #[error("transfer blocked by policy: {0}")]
    PolicyDenied(String),

    #[error("persistence failure: {0}")]
    Persistence(String),
}

impl From<LedgerError> for RegistryError {
    fn from(e: LedgerError) -> Self {
        match e {
            LedgerError::NotFound(id) => Self::NotFound(id),
            LedgerError::NotVerified(id) => Self::NotVerified(id),
            // The store's owner CAS failed after our precondition check
            // passed: the caller lost a race, not its authorization.
            LedgerError::StaleOwner { id, .. } => Self::Conflict(id),
            other => Self::Persistence(other.to_string()),
        }
    }
}
