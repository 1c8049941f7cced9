use thiserror::Error;

/// Errors from history index verification.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IndexError {
    #[error("index has applied {applied} records but the log holds {log_len}")]
    LengthMismatch { applied: u64, log_len: u64 },

    #[error("index diverges from log replay: {0}")]
    Divergence(String),
}
