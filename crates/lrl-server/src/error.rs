use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use lrl_docstore::DocStoreError;
use lrl_profile::ProfileError;
use lrl_registry::RegistryError;

/// Server lifecycle errors (startup, config, bind).
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("ledger error: {0}")]
    Ledger(#[from] lrl_ledger::LedgerError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServerResult<T> = Result<T, ServerError>;

/// A request failure rendered as the JSON error envelope
/// `{"error": {"code": ..., "message": ...}}`.
///
/// Each [`RegistryError`] variant keeps its own `code` so the UI can
/// branch on the outcome; nothing is collapsed into a generic failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }

    /// The `x-caller-address` header is absent or unparseable.
    pub fn invalid_caller(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "INVALID_CALLER", message)
    }

    pub fn not_found(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, code, message)
    }

    pub fn bad_request(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, code, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": {
                "code": self.code,
                "message": self.message,
            }
        }));
        (self.status, body).into_response()
    }
}

impl From<RegistryError> for ApiError {
    fn from(e: RegistryError) -> Self {
        let message = e.to_string();
        match e {
            RegistryError::InvalidInput { .. } => {
                Self::new(StatusCode::BAD_REQUEST, "INVALID_INPUT", message)
            }
            RegistryError::Unauthorized { .. } => {
                Self::new(StatusCode::FORBIDDEN, "UNAUTHORIZED", message)
            }
            RegistryError::NotFound(_) => {
                Self::new(StatusCode::NOT_FOUND, "NOT_FOUND", message)
            }
            RegistryError::NotVerified(_) => {
                Self::new(StatusCode::CONFLICT, "NOT_VERIFIED", message)
            }
            RegistryError::InvalidTarget(_) => {
                Self::new(StatusCode::BAD_REQUEST, "INVALID_TARGET", message)
            }
            RegistryError::Conflict(_) => {
                Self::new(StatusCode::CONFLICT, "CONFLICT", message)
            }
            RegistryError::PolicyDenied(_) => {
                Self::new(StatusCode::FORBIDDEN, "POLICY_DENIED", message)
            }
            RegistryError::Persistence(_) => {
                Self::new(StatusCode::SERVICE_UNAVAILABLE, "PERSISTENCE_FAILURE", message)
            }
        }
    }
}

impl From<ProfileError> for ApiError {
    fn from(e: ProfileError) -> Self {
        let message = e.to_string();
        match e {
            ProfileError::InvalidProfile(_) => {
                Self::new(StatusCode::BAD_REQUEST, "INVALID_PROFILE", message)
            }
            ProfileError::Unavailable(_) | ProfileError::LockPoisoned => Self::new(
                StatusCode::SERVICE_UNAVAILABLE,
                "PROFILE_STORE_UNAVAILABLE",
                message,
            ),
        }
    }
}

impl From<DocStoreError> for ApiError {
    fn from(e: DocStoreError) -> Self {
        let message = e.to_string();
        match e {
            DocStoreError::MalformedRef(_) => {
                Self::new(StatusCode::BAD_REQUEST, "MALFORMED_DOCUMENT_REF", message)
            }
            DocStoreError::Unavailable(_) | DocStoreError::LockPoisoned => Self::new(
                StatusCode::SERVICE_UNAVAILABLE,
                "DOCUMENT_STORE_UNAVAILABLE",
                message,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use lrl_types::PropertyId;

    use super::*;

    #[test]
    fn registry_errors_keep_distinct_codes() {
        let id = PropertyId::new(1);
        let cases: Vec<(RegistryError, &str, StatusCode)> = vec![
            (
                RegistryError::InvalidInput { field: "location" },
                "INVALID_INPUT",
                StatusCode::BAD_REQUEST,
            ),
            (
                RegistryError::NotFound(id),
                "NOT_FOUND",
                StatusCode::NOT_FOUND,
            ),
            (
                RegistryError::NotVerified(id),
                "NOT_VERIFIED",
                StatusCode::CONFLICT,
            ),
            (
                RegistryError::Conflict(id),
                "CONFLICT",
                StatusCode::CONFLICT,
            ),
            (
                RegistryError::InvalidTarget("zero".into()),
                "INVALID_TARGET",
                StatusCode::BAD_REQUEST,
            ),
            (
                RegistryError::PolicyDenied("no KYC".into()),
                "POLICY_DENIED",
                StatusCode::FORBIDDEN,
            ),
            (
                RegistryError::Persistence("disk".into()),
                "PERSISTENCE_FAILURE",
                StatusCode::SERVICE_UNAVAILABLE,
            ),
        ];

        for (error, code, status) in cases {
            let api: ApiError = error.into();
            assert_eq!(api.code, code);
            assert_eq!(api.status, status);
        }
    }
}
