use lrl_types::{Address, KycProfile};

use crate::error::ProfileError;

/// Key-value boundary to the off-chain KYC profile store.
///
/// Absence is explicit: `get` returns `Ok(None)` for an address with no
/// profile, never a zero-valued record.
pub trait ProfileStore: Send + Sync {
    /// Fetch the profile stored for an address, if any.
    fn get(&self, address: &Address) -> Result<Option<KycProfile>, ProfileError>;

    /// Create or overwrite the profile for an address.
    ///
    /// The profile is validated before it is stored; an existing profile
    /// is replaced wholesale.
    fn upsert(&self, address: &Address, profile: KycProfile) -> Result<(), ProfileError>;
}
