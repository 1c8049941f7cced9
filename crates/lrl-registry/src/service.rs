use std::collections::HashSet;
use std::sync::Arc;

use lrl_ledger::LedgerStore;
use lrl_types::{Address, Property, PropertyId, TransactionRecord, TxRef};
use serde::{Deserialize, Serialize};

use crate::config::RegistryConfig;
use crate::error::RegistryError;
use crate::policy::{AllowAll, PolicyDecision, TransferPolicy};

/// Aggregate counts for dashboards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryStats {
    pub total_properties: u64,
    pub verified_properties: u64,
    pub distinct_owners: u64,
}

/// The registry service: the single mediator over the ledger store.
///
/// All caller identity arrives as an explicit [`Address`] parameter; the
/// service holds no ambient session state. Queries never mutate.
pub struct Registry {
    store: Arc<dyn LedgerStore>,
    config: RegistryConfig,
    policy: Arc<dyn TransferPolicy>,
}

impl Registry {
    /// Create a registry with the default (allow-all) transfer policy.
    pub fn new(store: Arc<dyn LedgerStore>, config: RegistryConfig) -> Self {
        Self::with_policy(store, config, Arc::new(AllowAll))
    }

    /// Create a registry with an application-supplied transfer policy.
    pub fn with_policy(
        store: Arc<dyn LedgerStore>,
        config: RegistryConfig,
        policy: Arc<dyn TransferPolicy>,
    ) -> Self {
        Self {
            store,
            config,
            policy,
        }
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    pub fn is_admin(&self, caller: &Address) -> bool {
        *caller == self.config.admin
    }

    // ---- state-changing operations ----

    /// Register a new property owned by the caller.
    ///
    /// Open to any address. Fields are trimmed and must be non-empty.
    /// Registration is not a transfer and does not touch the log.
    pub fn register_property(
        &self,
        caller: Address,
        property_number: &str,
        location: &str,
        document_ref: &str,
    ) -> Result<Property, RegistryError> {
        let property_number = non_empty(property_number, "property_number")?;
        let location = non_empty(location, "location")?;
        let document_ref = non_empty(document_ref, "document_ref")?;

        let property = self
            .store
            .register(property_number, caller, location, document_ref)?;
        tracing::info!(id = %property.id, owner = %caller, "property registered");
        Ok(property)
    }

    /// Set a property's verified flag. Admin only; idempotent.
    pub fn verify_property(
        &self,
        caller: Address,
        id: PropertyId,
    ) -> Result<Property, RegistryError> {
        if !self.is_admin(&caller) {
            return Err(RegistryError::Unauthorized {
                caller,
                reason: "only the admin may verify properties".into(),
            });
        }
        let property = self.store.mark_verified(id)?;
        tracing::info!(id = %id, admin = %caller, "property verified");
        Ok(property)
    }

    /// Transfer a verified property from the caller to `new_owner`.
    ///
    /// The ownership change and the audit record commit atomically; on
    /// any failure both are untouched. The store re-checks the caller as
    /// owner inside the commit critical section, so a lost race surfaces
    /// as [`RegistryError::Conflict`] rather than a silent double spend.
    pub fn transfer_ownership(
        &self,
        caller: Address,
        id: PropertyId,
        new_owner: Address,
    ) -> Result<TransactionRecord, RegistryError> {
        if new_owner.is_zero() {
            return Err(RegistryError::InvalidTarget(
                "the zero address cannot own property".into(),
            ));
        }
        if new_owner == caller {
            return Err(RegistryError::InvalidTarget(
                "property is already owned by this address".into(),
            ));
        }

        let property = self
            .store
            .property(id)?
            .ok_or(RegistryError::NotFound(id))?;
        if !property.verified {
            return Err(RegistryError::NotVerified(id));
        }
        if property.owner != caller {
            return Err(RegistryError::Unauthorized {
                caller,
                reason: format!("only the owner may transfer property {id}"),
            });
        }

        if let PolicyDecision::Deny { reason } =
            self.policy.review(&caller, &property, &new_owner)
        {
            tracing::warn!(
                id = %id,
                policy = self.policy.name(),
                reason = %reason,
                "transfer denied by policy"
            );
            return Err(RegistryError::PolicyDenied(reason));
        }

        let record = self.store.commit_transfer(id, caller, new_owner)?;
        tracing::info!(
            id = %id,
            from = %caller,
            to = %new_owner,
            tx_ref = %record.tx_ref,
            "ownership transferred"
        );
        Ok(record)
    }

    // ---- read-only queries ----

    pub fn property(&self, id: PropertyId) -> Result<Property, RegistryError> {
        self.store
            .property(id)?
            .ok_or(RegistryError::NotFound(id))
    }

    /// All properties, in creation order (stable for pagination).
    pub fn all_properties(&self) -> Result<Vec<Property>, RegistryError> {
        Ok(self.store.properties()?)
    }

    pub fn properties_owned_by(&self, owner: &Address) -> Result<Vec<Property>, RegistryError> {
        Ok(self.store.properties_owned_by(owner)?)
    }

    /// The full transfer log, in commit order.
    pub fn transaction_history(&self) -> Result<Vec<TransactionRecord>, RegistryError> {
        Ok(self.store.log()?)
    }

    /// One property's transfers, in commit order. Empty if it has never
    /// been transferred.
    pub fn transaction_history_for(
        &self,
        id: PropertyId,
    ) -> Result<Vec<TransactionRecord>, RegistryError> {
        Ok(self.store.history_for_property(id)?)
    }

    /// Transfers an address took part in, as sender or receiver.
    pub fn transactions_for_address(
        &self,
        address: &Address,
    ) -> Result<Vec<TransactionRecord>, RegistryError> {
        Ok(self.store.history_for_address(address)?)
    }

    /// Resolve one committed transfer by its reference. This is the
    /// re-query path for a caller whose transfer timed out ambiguously.
    pub fn transaction_by_ref(
        &self,
        tx_ref: &TxRef,
    ) -> Result<Option<TransactionRecord>, RegistryError> {
        Ok(self.store.transaction_by_ref(tx_ref)?)
    }

    pub fn stats(&self) -> Result<RegistryStats, RegistryError> {
        let properties = self.store.properties()?;
        let verified = properties.iter().filter(|p| p.verified).count() as u64;
        let owners: HashSet<Address> = properties.iter().map(|p| p.owner).collect();
        Ok(RegistryStats {
            total_properties: properties.len() as u64,
            verified_properties: verified,
            distinct_owners: owners.len() as u64,
        })
    }
}

fn non_empty<'a>(value: &'a str, field: &'static str) -> Result<&'a str, RegistryError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(RegistryError::InvalidInput { field });
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use lrl_ledger::InMemoryLedger;
    use lrl_profile::{InMemoryProfileStore, ProfileStore};
    use lrl_types::KycProfile;

    use crate::policy::ProfileKycPolicy;

    use super::*;

    fn addr(seed: u8) -> Address {
        Address::from_bytes([seed; 20])
    }

    fn admin() -> Address {
        addr(0xad)
    }

    fn registry() -> Registry {
        Registry::new(
            Arc::new(InMemoryLedger::new()),
            RegistryConfig::new(admin()),
        )
    }

    fn registered(registry: &Registry, owner: Address) -> Property {
        registry
            .register_property(owner, "PN-1", "12 Harbor Lane", "doc:abc")
            .unwrap()
    }

    #[test]
    fn register_assigns_distinct_ids_and_ownership() {
        let registry = registry();
        let a = registered(&registry, addr(1));
        let b = registered(&registry, addr(1));

        assert_ne!(a.id, b.id);
        assert_eq!(a.owner, addr(1));
        assert!(!a.verified);
    }

    #[test]
    fn register_trims_and_rejects_empty_fields() {
        let registry = registry();

        let p = registry
            .register_property(addr(1), "  PN-9  ", " somewhere ", " doc:x ")
            .unwrap();
        assert_eq!(p.property_number, "PN-9");
        assert_eq!(p.location, "somewhere");

        for (number, location, doc) in [
            ("", "loc", "doc:x"),
            ("PN-1", "   ", "doc:x"),
            ("PN-1", "loc", ""),
        ] {
            assert!(matches!(
                registry.register_property(addr(1), number, location, doc),
                Err(RegistryError::InvalidInput { .. })
            ));
        }
    }

    #[test]
    fn verify_requires_admin() {
        let registry = registry();
        let p = registered(&registry, addr(1));

        let err = registry.verify_property(addr(1), p.id).unwrap_err();
        assert!(matches!(err, RegistryError::Unauthorized { .. }));
        assert!(!registry.property(p.id).unwrap().verified);

        let verified = registry.verify_property(admin(), p.id).unwrap();
        assert!(verified.verified);
    }

    #[test]
    fn verify_is_idempotent() {
        let registry = registry();
        let p = registered(&registry, addr(1));

        registry.verify_property(admin(), p.id).unwrap();
        let again = registry.verify_property(admin(), p.id).unwrap();
        assert!(again.verified);
    }

    #[test]
    fn verify_unknown_property_is_not_found() {
        let registry = registry();
        assert_eq!(
            registry.verify_property(admin(), PropertyId::new(99)).unwrap_err(),
            RegistryError::NotFound(PropertyId::new(99))
        );
    }

    #[test]
    fn transfer_gates_fire_in_order() {
        let registry = registry();
        let p = registered(&registry, addr(1));

        // Bad targets are rejected before anything else is consulted.
        assert!(matches!(
            registry.transfer_ownership(addr(1), p.id, Address::ZERO),
            Err(RegistryError::InvalidTarget(_))
        ));
        assert!(matches!(
            registry.transfer_ownership(addr(1), p.id, addr(1)),
            Err(RegistryError::InvalidTarget(_))
        ));

        // Unverified property cannot move.
        assert_eq!(
            registry.transfer_ownership(addr(1), p.id, addr(2)).unwrap_err(),
            RegistryError::NotVerified(p.id)
        );

        registry.verify_property(admin(), p.id).unwrap();

        // Only the current owner may transfer.
        assert!(matches!(
            registry.transfer_ownership(addr(3), p.id, addr(2)),
            Err(RegistryError::Unauthorized { .. })
        ));

        // Missing property reports NotFound.
        assert_eq!(
            registry
                .transfer_ownership(addr(1), PropertyId::new(99), addr(2))
                .unwrap_err(),
            RegistryError::NotFound(PropertyId::new(99))
        );
    }

    #[test]
    fn failed_transfer_changes_nothing() {
        let registry = registry();
        let p = registered(&registry, addr(1));
        registry.verify_property(admin(), p.id).unwrap();

        let before_owner = registry.property(p.id).unwrap().owner;
        let before_history = registry.transaction_history_for(p.id).unwrap().len();

        let _ = registry.transfer_ownership(addr(3), p.id, addr(2)).unwrap_err();

        assert_eq!(registry.property(p.id).unwrap().owner, before_owner);
        assert_eq!(
            registry.transaction_history_for(p.id).unwrap().len(),
            before_history
        );
    }

    #[test]
    fn successful_transfer_commits_owner_and_record_together() {
        let registry = registry();
        let p = registered(&registry, addr(1));
        registry.verify_property(admin(), p.id).unwrap();

        let record = registry.transfer_ownership(addr(1), p.id, addr(2)).unwrap();

        assert_eq!(registry.property(p.id).unwrap().owner, addr(2));
        let history = registry.transaction_history_for(p.id).unwrap();
        assert_eq!(history, vec![record.clone()]);
        assert_eq!(record.sender, addr(1));
        assert_eq!(record.receiver, addr(2));

        // The reference resolves for later re-query.
        assert_eq!(
            registry.transaction_by_ref(&record.tx_ref).unwrap(),
            Some(record)
        );
    }

    #[test]
    fn register_verify_transfer_walkthrough() {
        let registry = registry();
        let a = addr(0xa1);
        let b = addr(0xb2);

        let p = registry
            .register_property(a, "PN-1", "X", "doc1")
            .unwrap();
        assert_eq!(p.owner, a);
        assert!(!p.verified);

        assert_eq!(
            registry.transfer_ownership(a, p.id, b).unwrap_err(),
            RegistryError::NotVerified(p.id)
        );

        assert!(registry.verify_property(admin(), p.id).unwrap().verified);

        registry.transfer_ownership(a, p.id, b).unwrap();
        assert_eq!(registry.property(p.id).unwrap().owner, b);
        assert_eq!(registry.transaction_history_for(p.id).unwrap().len(), 1);

        registry.transfer_ownership(b, p.id, a).unwrap();
        assert_eq!(registry.property(p.id).unwrap().owner, a);

        let history = registry.transaction_history_for(p.id).unwrap();
        let hops: Vec<(Address, Address)> =
            history.iter().map(|r| (r.sender, r.receiver)).collect();
        assert_eq!(hops, vec![(a, b), (b, a)]);
    }

    #[test]
    fn queries_filter_by_owner_and_address() {
        let registry = registry();
        let p = registered(&registry, addr(1));
        let q = registered(&registry, addr(2));
        registry.verify_property(admin(), p.id).unwrap();

        registry.transfer_ownership(addr(1), p.id, addr(2)).unwrap();

        let owned = registry.properties_owned_by(&addr(2)).unwrap();
        assert_eq!(owned.len(), 2);

        let involving = registry.transactions_for_address(&addr(2)).unwrap();
        assert_eq!(involving.len(), 1);
        assert!(registry
            .transactions_for_address(&addr(9))
            .unwrap()
            .is_empty());

        // q was never transferred: empty history, not an error.
        assert!(registry.transaction_history_for(q.id).unwrap().is_empty());
    }

    #[test]
    fn stats_count_verified_and_distinct_owners() {
        let registry = registry();
        let p = registered(&registry, addr(1));
        registered(&registry, addr(1));
        registered(&registry, addr(2));
        registry.verify_property(admin(), p.id).unwrap();

        let stats = registry.stats().unwrap();
        assert_eq!(
            stats,
            RegistryStats {
                total_properties: 3,
                verified_properties: 1,
                distinct_owners: 2,
            }
        );
    }

    #[test]
    fn kyc_policy_blocks_until_profile_exists() {
        let profiles = Arc::new(InMemoryProfileStore::new());
        let registry = Registry::with_policy(
            Arc::new(InMemoryLedger::new()),
            RegistryConfig::new(admin()),
            Arc::new(ProfileKycPolicy::new(
                Arc::clone(&profiles) as Arc<dyn ProfileStore>
            )),
        );

        let p = registered(&registry, addr(1));
        registry.verify_property(admin(), p.id).unwrap();

        let err = registry.transfer_ownership(addr(1), p.id, addr(2)).unwrap_err();
        assert!(matches!(err, RegistryError::PolicyDenied(_)));
        assert_eq!(registry.property(p.id).unwrap().owner, addr(1));

        profiles
            .upsert(
                &addr(1),
                KycProfile::new("Asha Rao", "123456789012", "9876543210", "4 Temple Rd")
                    .unwrap(),
            )
            .unwrap();
        registry.transfer_ownership(addr(1), p.id, addr(2)).unwrap();
        assert_eq!(registry.property(p.id).unwrap().owner, addr(2));
    }

    #[test]
    fn admin_address_from_config_not_hardcoded() {
        let other_admin = addr(0x77);
        let registry = Registry::new(
            Arc::new(InMemoryLedger::new()),
            RegistryConfig::new(other_admin),
        );
        let p = registered(&registry, addr(1));

        assert!(registry.verify_property(other_admin, p.id).is_ok());
        // The default test admin holds no power in this deployment.
        assert!(matches!(
            registry.verify_property(admin(), p.id),
            Err(RegistryError::Unauthorized { .. })
        ));
    }
}
