use thiserror::Error;

/// Errors from advisory summarization.
///
/// These never propagate into registry results; the advisory layer
/// swallows them (with a log line) and falls back.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdvisoryError {
    #[error("advisory service unavailable: {0}")]
    Unavailable(String),

    #[error("advisory service returned an unusable response: {0}")]
    BadResponse(String),
}
