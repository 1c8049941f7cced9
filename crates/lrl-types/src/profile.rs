use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Off-chain KYC profile, keyed externally by wallet [`Address`].
///
/// Field shape is validated at construction: the national id is exactly 12
/// digits, the phone number exactly 10. The profile store has upsert
/// semantics: re-submitting under the same address overwrites every field.
///
/// [`Address`]: crate::Address
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KycProfile {
    pub name: String,
    pub national_id: String,
    pub phone: String,
    pub postal_address: String,
}

impl KycProfile {
    pub fn new(
        name: impl Into<String>,
        national_id: impl Into<String>,
        phone: impl Into<String>,
        postal_address: impl Into<String>,
    ) -> Result<Self, TypeError> {
        let profile = Self {
            name: name.into(),
            national_id: national_id.into(),
            phone: phone.into(),
            postal_address: postal_address.into(),
        };
        profile.validate()?;
        Ok(profile)
    }

    /// Check field shape without constructing (used when deserialized).
    pub fn validate(&self) -> Result<(), TypeError> {
        if self.name.trim().is_empty() {
            return Err(TypeError::EmptyField { field: "name" });
        }
        if self.postal_address.trim().is_empty() {
            return Err(TypeError::EmptyField {
                field: "postal_address",
            });
        }
        if !is_digits(&self.national_id, 12) {
            return Err(TypeError::InvalidDigits {
                field: "national_id",
                expected: 12,
            });
        }
        if !is_digits(&self.phone, 10) {
            return Err(TypeError::InvalidDigits {
                field: "phone",
                expected: 10,
            });
        }
        Ok(())
    }
}

fn is_digits(s: &str, len: usize) -> bool {
    s.len() == len && s.bytes().all(|b| b.is_ascii_digit())
}
