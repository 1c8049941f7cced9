use std::collections::HashMap;
use std::sync::RwLock;

use lrl_types::{Address, KycProfile};

use crate::error::ProfileError;
use crate::traits::ProfileStore;

/// In-memory, HashMap-based profile store for tests and embedding.
pub struct InMemoryProfileStore {
    profiles: RwLock<HashMap<Address, KycProfile>>,
}

impl InMemoryProfileStore {
    pub fn new() -> Self {
        Self {
            profiles: RwLock::new(HashMap::new()),
        }
    }

    /// Number of stored profiles.
    pub fn len(&self) -> usize {
        self.profiles.read().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryProfileStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ProfileStore for InMemoryProfileStore {
    fn get(&self, address: &Address) -> Result<Option<KycProfile>, ProfileError> {
        let map = self
            .profiles
            .read()
            .map_err(|_| ProfileError::LockPoisoned)?;
        Ok(map.get(address).cloned())
    }

    fn upsert(&self, address: &Address, profile: KycProfile) -> Result<(), ProfileError> {
        profile.validate()?;
        let mut map = self
            .profiles
            .write()
            .map_err(|_| ProfileError::LockPoisoned)?;
        let replaced = map.insert(*address, profile).is_some();
        tracing::debug!(address = %address, replaced, "profile stored");
        Ok(())
    }
}
