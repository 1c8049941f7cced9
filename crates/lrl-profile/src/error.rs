use thiserror::Error;

/// Errors from profile store operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProfileError {
    /// The submitted profile failed field validation.
    #[error("invalid profile: {0}")]
    InvalidProfile(#[from] lrl_types::TypeError),

    #[error("profile store unavailable: {0}")]
    Unavailable(String),

    #[error("profile store lock poisoned")]
    LockPoisoned,
}
