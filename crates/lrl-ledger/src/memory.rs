use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use lrl_types::{Address, Property, PropertyId, TransactionRecord, TxRef};

use crate::error::LedgerError;
use crate::event::LedgerEvent;
use crate::state::LedgerState;
use crate::traits::{LedgerReader, LedgerWriter};

/// In-memory ledger store for tests, demos, and embedding.
///
/// All state lives behind one `RwLock`; every write operation stages and
/// applies inside a single write critical section, so concurrent
/// transfers on the same property serialize and exactly one wins.
pub struct InMemoryLedger {
    inner: RwLock<LedgerState>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(LedgerState::new()),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, LedgerState>, LedgerError> {
        self.inner.read().map_err(|_| LedgerError::LockPoisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, LedgerState>, LedgerError> {
        self.inner.write().map_err(|_| LedgerError::LockPoisoned)
    }
}

impl Default for InMemoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl LedgerWriter for InMemoryLedger {
    fn register(
        &self,
        property_number: &str,
        owner: Address,
        location: &str,
        document_ref: &str,
    ) -> Result<Property, LedgerError> {
        let mut state = self.write()?;
        let event = state.stage_register(property_number, owner, location, document_ref);
        state.apply(&event)?;
        match event {
            LedgerEvent::Registered(property) => {
                tracing::debug!(id = %property.id, owner = %owner, "property registered");
                Ok(property)
            }
            _ => unreachable!(),
        }
    }

    fn mark_verified(&self, id: PropertyId) -> Result<Property, LedgerError> {
        let mut state = self.write()?;
        if let Some(event) = state.stage_verify(id)? {
            state.apply(&event)?;
            tracing::debug!(id = %id, "property verified");
        }
        state.property(id).ok_or(LedgerError::NotFound(id))
    }

    fn commit_transfer(
        &self,
        id: PropertyId,
        expected_owner: Address,
        new_owner: Address,
    ) -> Result<TransactionRecord, LedgerError> {
        let mut state = self.write()?;
        let event = state.stage_transfer(id, expected_owner, new_owner)?;
        state.apply(&event)?;
        match event {
            LedgerEvent::Transferred(record) => {
                tracing::debug!(
                    id = %id,
                    from = %record.sender,
                    to = %record.receiver,
                    "ownership transferred"
                );
                Ok(record)
            }
            _ => unreachable!(),
        }
    }
}

impl LedgerReader for InMemoryLedger {
    fn property(&self, id: PropertyId) -> Result<Option<Property>, LedgerError> {
        Ok(self.read()?.property(id))
    }

    fn properties(&self) -> Result<Vec<Property>, LedgerError> {
        Ok(self.read()?.properties())
    }

    fn properties_owned_by(&self, owner: &Address) -> Result<Vec<Property>, LedgerError> {
        Ok(self.read()?.properties_owned_by(owner))
    }

    fn log(&self) -> Result<Vec<TransactionRecord>, LedgerError> {
        Ok(self.read()?.log())
    }

    fn log_len(&self) -> Result<u64, LedgerError> {
        Ok(self.read()?.log_len())
    }

    fn history_for_property(
        &self,
        id: PropertyId,
    ) -> Result<Vec<TransactionRecord>, LedgerError> {
        Ok(self.read()?.history_for_property(id))
    }

    fn history_for_address(
        &self,
        address: &Address,
    ) -> Result<Vec<TransactionRecord>, LedgerError> {
        Ok(self.read()?.history_for_address(address))
    }

    fn transaction_by_ref(
        &self,
        tx_ref: &TxRef,
    ) -> Result<Option<TransactionRecord>, LedgerError> {
        Ok(self.read()?.transaction_by_ref(tx_ref))
    }
}
