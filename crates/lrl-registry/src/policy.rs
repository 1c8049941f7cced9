use std::sync::Arc;

use lrl_profile::ProfileStore;
use lrl_types::{Address, Property};

/// Outcome of a transfer policy review.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PolicyDecision {
    Allow,
    Deny { reason: String },
}

impl PolicyDecision {
    pub fn is_allow(&self) -> bool {
        matches!(self, Self::Allow)
    }
}

/// Application-level gate evaluated before a transfer reaches the ledger.
///
/// Policies sit *above* the ledger invariants: a policy can tighten the
/// rules (deny a transfer the ledger would accept) but never loosen them.
/// The ownership and verification checks run regardless. Identity/KYC
/// requirements belong here, not in the ledger.
pub trait TransferPolicy: Send + Sync {
    /// Human-readable policy name for logs.
    fn name(&self) -> &str;

    fn review(
        &self,
        sender: &Address,
        property: &Property,
        receiver: &Address,
    ) -> PolicyDecision;
}

/// Default policy: every transfer the ledger allows is allowed.
pub struct AllowAll;

impl TransferPolicy for AllowAll {
    fn name(&self) -> &str {
        "allow-all"
    }

    fn review(&self, _: &Address, _: &Property, _: &Address) -> PolicyDecision {
        PolicyDecision::Allow
    }
}

/// Requires the sending address to have completed KYC (a stored profile).
///
/// An unreachable profile store denies the transfer: a soft gate that
/// cannot be checked must not silently open.
pub struct ProfileKycPolicy {
    profiles: Arc<dyn ProfileStore>,
}

impl ProfileKycPolicy {
    pub fn new(profiles: Arc<dyn ProfileStore>) -> Self {
        Self { profiles }
    }
}

impl TransferPolicy for ProfileKycPolicy {
    fn name(&self) -> &str {
        "kyc-profile"
    }

    fn review(
        &self,
        sender: &Address,
        _property: &Property,
        _receiver: &Address,
    ) -> PolicyDecision {
        match self.profiles.get(sender) {
            Ok(Some(_)) => PolicyDecision::Allow,
            Ok(None) => PolicyDecision::Deny {
                reason: format!("sender {sender} has not completed KYC"),
            },
            Err(e) => {
                tracing::warn!(sender = %sender, error = %e, "profile store unreachable during policy review");
                PolicyDecision::Deny {
                    reason: format!("KYC status could not be checked: {e}"),
                }
            }
        }
    }
}
