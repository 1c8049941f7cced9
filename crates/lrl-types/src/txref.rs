use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::address::Address;
use crate::error::TypeError;
use crate::property::PropertyId;

/// Opaque unique reference to a committed ownership transfer.
///
/// A `TxRef` is derived deterministically with BLAKE3 from the transfer's
/// content and its position in the log. The position is unique, so the
/// reference is unique; the derivation is stable, so replaying the log
/// reproduces the same references. Callers use it for explorer links and
/// to re-query a transfer whose outcome was ambiguous (timeout).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TxRef([u8; 32]);

impl TxRef {
    /// Derive the reference for a transfer committed at `position`.
    pub fn derive(
        property_id: PropertyId,
        sender: &Address,
        receiver: &Address,
        position: u64,
    ) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(b"lrl-txref-v1:");
        hasher.update(&property_id.value().to_le_bytes());
        hasher.update(sender.as_bytes());
        hasher.update(receiver.as_bytes());
        hasher.update(&position.to_le_bytes());
        Self(*hasher.finalize().as_bytes())
    }

    /// The raw 32 bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Full lowercase hex form with `0x` prefix.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    /// Short identifier (`0x` + first 10 hex characters) for display.
    pub fn short(&self) -> String {
        format!("0x{}", hex::encode(&self.0[..5]))
    }

    /// Parse from a hex string (64 hex characters, optional `0x` prefix).
    pub fn from_hex(s: &str) -> Result<Self, TypeError> {
        let s = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")).unwrap_or(s);
        let bytes = hex::decode(s).map_err(|e| TypeError::InvalidHex(e.to_string()))?;
        if bytes.len() != 32 {
            return Err(TypeError::InvalidLength {
                expected: 32,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }
}

impl fmt::Debug for TxRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TxRef({})", self.short())
    }
}

impl fmt::Display for TxRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl Serialize for TxRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for TxRef {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}
