//! The in-memory history index over the transaction log.
//!
//! The index is purely derived state: it holds log *positions*, never
//! record contents, and can always be reconstructed by replaying the log
//! from empty. The owning store applies each record in the same critical
//! section as the log append, so readers never observe a log entry
//! without its index entries or vice versa.

use std::collections::HashMap;

use lrl_types::{Address, PropertyId, TransactionRecord, TxRef};

use crate::error::IndexError;

/// Derived lookup buckets for the transaction log.
///
/// Each bucket maps a key to the ordered sequence of log positions whose
/// record matches the key. Positions within a bucket are strictly
/// increasing because records are applied in append order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HistoryIndex {
    by_property: HashMap<PropertyId, Vec<u64>>,
    by_address: HashMap<Address, Vec<u64>>,
    by_ref: HashMap<TxRef, u64>,
    applied: u64,
}

impl HistoryIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of log records applied so far.
    pub fn applied(&self) -> u64 {
        self.applied
    }

    pub fn is_empty(&self) -> bool {
        self.applied == 0
    }

    /// Apply the next log record and return the position it was assigned.
    ///
    /// Must be called once per record, in append order; the position is
    /// the index's own applied count, which equals the record's position
    /// in the log.
    pub fn apply(&mut self, record: &TransactionRecord) -> u64 {
        let position = self.applied;
        self.by_property
            .entry(record.property_id)
            .or_default()
            .push(position);
        self.by_address
            .entry(record.sender)
            .or_default()
            .push(position);
        if record.receiver != record.sender {
            self.by_address
                .entry(record.receiver)
                .or_default()
                .push(position);
        }
        self.by_ref.insert(record.tx_ref, position);
        self.applied += 1;
        position
    }

    /// Rebuild an index from scratch by replaying a full log.
    ///
    /// The result is identical to an index maintained incrementally while
    /// the same log was appended.
    pub fn rebuild(log: &[TransactionRecord]) -> Self {
        let mut index = Self::new();
        for record in log {
            index.apply(record);
        }
        tracing::debug!(records = log.len(), "history index rebuilt");
        index
    }

    /// Ordered log positions of transfers of the given property.
    /// Empty if the property has never been transferred.
    pub fn property_positions(&self, id: PropertyId) -> &[u64] {
        self.by_property.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Ordered log positions of transfers where the address is sender or
    /// receiver. Empty if the address never appears in the log.
    pub fn address_positions(&self, address: &Address) -> &[u64] {
        self.by_address
            .get(address)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Log position of the record with the given reference, if committed.
    pub fn position_of(&self, tx_ref: &TxRef) -> Option<u64> {
        self.by_ref.get(tx_ref).copied()
    }

    /// Verify that this index matches a replay of the given log.
    pub fn verify_against(&self, log: &[TransactionRecord]) -> Result<(), IndexError> {
        if self.applied != log.len() as u64 {
            return Err(IndexError::LengthMismatch {
                applied: self.applied,
                log_len: log.len() as u64,
            });
        }
        let replayed = Self::rebuild(log);
        if *self != replayed {
            return Err(IndexError::Divergence(
                "bucket contents differ from replay".into(),
            ));
        }
        Ok(())
    }
}
