use std::fmt;

use serde::{Deserialize, Serialize};

use crate::address::Address;
use crate::txref::TxRef;

/// Monotonically assigned unique identifier for a property record.
///
/// Allocation starts at 1 and ids are never reused. 0 is never allocated,
/// so it is safe to use as a "no such property" value in tests.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PropertyId(u64);

impl PropertyId {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn value(&self) -> u64 {
        self.0
    }

    /// The id that follows this one in allocation order.
    pub const fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A registered land parcel and its current state.
///
/// Only two fields ever change after registration: `owner` (by a committed
/// transfer) and `verified` (set true by admin verification, never reverted).
/// Everything else is immutable for the lifetime of the record, and records
/// are never deleted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    pub id: PropertyId,
    /// Caller-supplied external reference (e.g. a cadastral number).
    pub property_number: String,
    pub owner: Address,
    pub location: String,
    /// Opaque reference to an externally stored title document.
    pub document_ref: String,
    pub verified: bool,
}

/// One committed ownership transfer, as recorded in the append-only log.
///
/// Append order is chronological order and is part of the observable
/// contract: history queries preserve it. Records are never modified or
/// removed once appended.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub property_id: PropertyId,
    /// Address the property was transferred from.
    pub sender: Address,
    /// Address the property was transferred to.
    pub receiver: Address,
    pub tx_ref: TxRef,
}

impl TransactionRecord {
    /// Returns `true` if the address is the sender or receiver.
    pub fn involves(&self, address: &Address) -> bool {
        self.sender == *address || self.receiver == *address
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(sender: u8, receiver: u8) -> TransactionRecord {
        let sender = Address::from_bytes([sender; 20]);
        let receiver = Address::from_bytes([receiver; 20]);
        TransactionRecord {
            property_id: PropertyId::new(1),
            sender,
            receiver,
            tx_ref: TxRef::derive(PropertyId::new(1), &sender, &receiver, 0),
        }
    }

    #[test]
    fn id_ordering_follows_allocation() {
        let first = PropertyId::new(1);
        assert!(first < first.next());
        assert_eq!(first.next().value(), 2);
    }

    #[test]
    fn involves_matches_both_sides() {
        let r = record(1, 2);
        assert!(r.involves(&Address::from_bytes([1; 20])));
        assert!(r.involves(&Address::from_bytes([2; 20])));
        assert!(!r.involves(&Address::from_bytes([3; 20])));
    }

    #[test]
    fn property_serde_roundtrip() {
        let p = Property {
            id: PropertyId::new(42),
            property_number: "PN-42".into(),
            owner: Address::from_bytes([9; 20]),
            location: "12 Harbor Lane".into(),
            document_ref: "doc:deadbeef".into(),
            verified: false,
        };
        let json = serde_json::to_string(&p).unwrap();
        let parsed: Property = serde_json::from_str(&json).unwrap();
        assert_eq!(p, parsed);
    }

    #[test]
    fn property_id_serializes_as_plain_number() {
        let json = serde_json::to_string(&PropertyId::new(7)).unwrap();
        assert_eq!(json, "7");
    }
}
