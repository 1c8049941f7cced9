use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid hex string: {0}")]
    InvalidHex(String),

    #[error("invalid byte length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },

    #[error("{field} must be exactly {expected} digits")]
    InvalidDigits { field: &'static str, expected: usize },
}
