//! Shared ledger state machine used by every store implementation.
//!
//! State changes are split into two steps that both run under the owning
//! store's write lock: `stage_*` validates preconditions and builds the
//! [`LedgerEvent`] without mutating anything; `apply` performs the
//! mutation. A journaling store persists the event between the two steps,
//! which makes the journal append the commit point.

use std::collections::BTreeMap;

use lrl_index::HistoryIndex;
use lrl_types::{Address, Property, PropertyId, TransactionRecord, TxRef};

use crate::error::LedgerError;
use crate::event::LedgerEvent;

const FIRST_PROPERTY_ID: u64 = 1;

pub(crate) struct LedgerState {
    /// Property records keyed by id. Ids are strictly increasing, so map
    /// iteration order is creation order.
    properties: BTreeMap<PropertyId, Property>,
    /// The append-only transfer log.
    log: Vec<TransactionRecord>,
    /// Derived lookup buckets, updated with every log append.
    index: HistoryIndex,
    next_id: u64,
}

impl LedgerState {
    pub(crate) fn new() -> Self {
        Self {
            properties: BTreeMap::new(),
            log: Vec::new(),
            index: HistoryIndex::new(),
            next_id: FIRST_PROPERTY_ID,
        }
    }

    // ---- staging ----

    pub(crate) fn stage_register(
        &self,
        property_number: &str,
        owner: Address,
        location: &str,
        document_ref: &str,
    ) -> LedgerEvent {
        LedgerEvent::Registered(Property {
            id: PropertyId::new(self.next_id),
            property_number: property_number.to_string(),
            owner,
            location: location.to_string(),
            document_ref: document_ref.to_string(),
            verified: false,
        })
    }

    /// Returns `None` when the property is already verified (nothing to
    /// journal; verification is idempotent).
    pub(crate) fn stage_verify(
        &self,
        id: PropertyId,
    ) -> Result<Option<LedgerEvent>, LedgerError> {
        let property = self.properties.get(&id).ok_or(LedgerError::NotFound(id))?;
        if property.verified {
            return Ok(None);
        }
        Ok(Some(LedgerEvent::Verified(id)))
    }

    /// Re-checks existence, verification, and the expected owner. The
    /// owner check is a compare-and-swap: a mismatch means the caller
    /// lost a race since it last read the record.
    pub(crate) fn stage_transfer(
        &self,
        id: PropertyId,
        expected_owner: Address,
        new_owner: Address,
    ) -> Result<LedgerEvent, LedgerError> {
        let property = self.properties.get(&id).ok_or(LedgerError::NotFound(id))?;
        if !property.verified {
            return Err(LedgerError::NotVerified(id));
        }
        if property.owner != expected_owner {
            return Err(LedgerError::StaleOwner {
                id,
                expected: expected_owner,
                current: property.owner,
            });
        }

        let position = self.log.len() as u64;
        Ok(LedgerEvent::Transferred(TransactionRecord {
            property_id: id,
            sender: expected_owner,
            receiver: new_owner,
            tx_ref: TxRef::derive(id, &expected_owner, &new_owner, position),
        }))
    }

    // ---- application ----

    /// Apply a staged or recovered event. For staged events this cannot
    /// fail; the error paths exist so journal recovery rejects a journal
    /// that contradicts itself.
    pub(crate) fn apply(&mut self, event: &LedgerEvent) -> Result<(), LedgerError> {
        match event {
            LedgerEvent::Registered(property) => {
                if self.properties.contains_key(&property.id) {
                    return Err(LedgerError::CorruptJournal(format!(
                        "duplicate registration of property {}",
                        property.id
                    )));
                }
                self.next_id = property.id.value() + 1;
                self.properties.insert(property.id, property.clone());
            }
            LedgerEvent::Verified(id) => {
                let property = self
                    .properties
                    .get_mut(id)
                    .ok_or_else(|| {
                        LedgerError::CorruptJournal(format!(
                            "verification of unknown property {id}"
                        ))
                    })?;
                property.verified = true;
            }
            LedgerEvent::Transferred(record) => {
                let property = self
                    .properties
                    .get_mut(&record.property_id)
                    .ok_or_else(|| {
                        LedgerError::CorruptJournal(format!(
                            "transfer of unknown property {}",
                            record.property_id
                        ))
                    })?;
                property.owner = record.receiver;
                // Log append and index update happen together; readers
                // hold the same lock and can never see one without the
                // other.
                self.log.push(record.clone());
                self.index.apply(record);
            }
        }
        Ok(())
    }

    // ---- reads ----

    pub(crate) fn property(&self, id: PropertyId) -> Option<Property> {
        self.properties.get(&id).cloned()
    }

    pub(crate) fn properties(&self) -> Vec<Property> {
        self.properties.values().cloned().collect()
    }

    pub(crate) fn properties_owned_by(&self, owner: &Address) -> Vec<Property> {
        self.properties
            .values()
            .filter(|p| p.owner == *owner)
            .cloned()
            .collect()
    }

    pub(crate) fn log(&self) -> Vec<TransactionRecord> {
        self.log.clone()
    }

    pub(crate) fn log_len(&self) -> u64 {
        self.log.len() as u64
    }

    pub(crate) fn history_for_property(&self, id: PropertyId) -> Vec<TransactionRecord> {
        self.select(self.index.property_positions(id))
    }

    pub(crate) fn history_for_address(&self, address: &Address) -> Vec<TransactionRecord> {
        self.select(self.index.address_positions(address))
    }

    pub(crate) fn transaction_by_ref(&self, tx_ref: &TxRef) -> Option<TransactionRecord> {
        self.index
            .position_of(tx_ref)
            .and_then(|position| self.log.get(position as usize).cloned())
    }

    fn select(&self, positions: &[u64]) -> Vec<TransactionRecord> {
        positions
            .iter()
            .filter_map(|&position| self.log.get(position as usize).cloned())
            .collect()
    }
}
