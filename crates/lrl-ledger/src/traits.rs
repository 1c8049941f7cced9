use lrl_types::{Address, Property, PropertyId, TransactionRecord, TxRef};

use crate::error::LedgerError;

/// Write boundary for ledger state changes.
///
/// Implementations must commit each operation atomically: a transfer that
/// changes ownership without appending the matching log record, or vice
/// versa, is a consistency violation. Input validation (empty fields,
/// target addresses, authorization) belongs to the registry service; the
/// store enforces only what it must to stay consistent under races.
pub trait LedgerWriter: Send + Sync {
    /// Allocate the next unique id and persist a new, unverified property
    /// record owned by `owner`. Registration does not touch the log.
    fn register(
        &self,
        property_number: &str,
        owner: Address,
        location: &str,
        document_ref: &str,
    ) -> Result<Property, LedgerError>;

    /// Set the verified flag. Idempotent: verifying an already-verified
    /// property succeeds and changes nothing.
    fn mark_verified(&self, id: PropertyId) -> Result<Property, LedgerError>;

    /// Atomically set the owner to `new_owner` and append the audit
    /// record. `expected_owner` is re-checked inside the commit critical
    /// section; a mismatch reports the race as [`LedgerError::StaleOwner`].
    fn commit_transfer(
        &self,
        id: PropertyId,
        expected_owner: Address,
        new_owner: Address,
    ) -> Result<TransactionRecord, LedgerError>;
}

/// Read boundary for ledger queries. Reads never mutate and observe a
/// consistent snapshot of state, log, and index.
pub trait LedgerReader: Send + Sync {
    fn property(&self, id: PropertyId) -> Result<Option<Property>, LedgerError>;

    /// All property records, in creation order.
    fn properties(&self) -> Result<Vec<Property>, LedgerError>;

    fn properties_owned_by(&self, owner: &Address) -> Result<Vec<Property>, LedgerError>;

    /// The full transfer log, in append order.
    fn log(&self) -> Result<Vec<TransactionRecord>, LedgerError>;

    fn log_len(&self) -> Result<u64, LedgerError>;

    /// Transfers of one property, in append order. Empty when the
    /// property has never been transferred (not an error).
    fn history_for_property(&self, id: PropertyId)
        -> Result<Vec<TransactionRecord>, LedgerError>;

    /// Transfers where the address is sender or receiver, in append order.
    fn history_for_address(
        &self,
        address: &Address,
    ) -> Result<Vec<TransactionRecord>, LedgerError>;

    /// Resolve a single committed transfer by its reference.
    fn transaction_by_ref(
        &self,
        tx_ref: &TxRef,
    ) -> Result<Option<TransactionRecord>, LedgerError>;
}

/// Combined store boundary the registry service operates on.
pub trait LedgerStore: LedgerReader + LedgerWriter {}

impl<T: LedgerReader + LedgerWriter> LedgerStore for T {}
