use serde::{Deserialize, Serialize};

use lrl_types::{Property, PropertyId, TransactionRecord};

/// One committed state change, the unit of journaling and replay.
///
/// A `Transferred` event carries both the ownership change (the record's
/// receiver becomes the owner) and the audit log entry in a single event,
/// so the two can never be persisted separately.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerEvent {
    /// A new property record was created.
    Registered(Property),
    /// A property's verified flag was set.
    Verified(PropertyId),
    /// Ownership changed and the matching log record was appended.
    Transferred(TransactionRecord),
}

impl LedgerEvent {
    /// The property this event concerns.
    pub fn property_id(&self) -> PropertyId {
        match self {
            Self::Registered(property) => property.id,
            Self::Verified(id) => *id,
            Self::Transferred(record) => record.property_id,
        }
    }
}
