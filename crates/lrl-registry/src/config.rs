use lrl_types::Address;
use serde::{Deserialize, Serialize};

/// Deployment-time registry configuration.
///
/// The admin address is supplied at initialization and immutable for the
/// lifetime of the service. It is configuration, not code: rotating the
/// admin means constructing a new registry, never redeploying logic.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// The distinguished address allowed to verify properties.
    pub admin: Address,
}

impl RegistryConfig {
    pub fn new(admin: Address) -> Self {
        Self { admin }
    }
}
