use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DocStoreError;

const REF_PREFIX: &str = "doc:";

/// Stable reference to an externally stored document.
///
/// Derived from the document bytes with BLAKE3, rendered as
/// `doc:<64 hex chars>`. The ledger treats the rendered form as an
/// opaque string.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentRef(String);

impl DocumentRef {
    /// Derive the reference for a document's bytes.
    pub fn for_bytes(bytes: &[u8]) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(b"lrl-document-v1:");
        hasher.update(bytes);
        Self(format!("{REF_PREFIX}{}", hex::encode(hasher.finalize().as_bytes())))
    }

    /// Parse a rendered reference, checking shape only.
    pub fn parse(s: &str) -> Result<Self, DocStoreError> {
        let body = s
            .strip_prefix(REF_PREFIX)
            .ok_or_else(|| DocStoreError::MalformedRef(s.to_string()))?;
        if body.len() != 64 || !body.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(DocStoreError::MalformedRef(s.to_string()));
        }
        Ok(Self(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for DocumentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DocumentRef({}..)", &self.0[..REF_PREFIX.len() + 8])
    }
}

impl fmt::Display for DocumentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
