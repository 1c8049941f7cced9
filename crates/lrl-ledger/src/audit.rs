use std::collections::{HashMap, HashSet};

use lrl_types::{PropertyId, TransactionRecord};

use crate::error::LedgerError;
use crate::traits::LedgerReader;

/// Result of a ledger audit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuditReport {
    pub properties: u64,
    pub records: u64,
    pub violations: Vec<Violation>,
}

impl AuditReport {
    /// Returns `true` if all checks passed.
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }
}

/// A specific inconsistency detected between state, log, and index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Violation {
    /// Log position the violation anchors to, when applicable.
    pub position: Option<u64>,
    pub kind: ViolationKind,
    pub description: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViolationKind {
    /// A log record references a property the state does not hold.
    DanglingRecord,
    /// Two log records share a transaction reference.
    DuplicateRef,
    /// A property's owner does not match the last receiver in its history.
    OwnerMismatch,
    /// A filtered history query disagrees with a scan of the full log.
    IndexDivergence,
}

/// Cross-checks current state against the transaction log and the
/// filtered history queries. Read-only; safe to run on a live store.
pub struct LedgerAuditor;

impl LedgerAuditor {
    pub fn audit<R: LedgerReader>(reader: &R) -> Result<AuditReport, LedgerError> {
        let properties = reader.properties()?;
        let log = reader.log()?;
        let mut violations = Vec::new();

        let known: HashSet<PropertyId> = properties.iter().map(|p| p.id).collect();
        let mut seen_refs = HashSet::new();
        let mut last_receiver: HashMap<PropertyId, &TransactionRecord> = HashMap::new();
        let mut by_property: HashMap<PropertyId, Vec<TransactionRecord>> = HashMap::new();

        for (position, record) in log.iter().enumerate() {
            let position = position as u64;

            if !known.contains(&record.property_id) {
                violations.push(Violation {
                    position: Some(position),
                    kind: ViolationKind::DanglingRecord,
                    description: format!(
                        "record references unknown property {}",
                        record.property_id
                    ),
                });
            }

            if !seen_refs.insert(record.tx_ref) {
                violations.push(Violation {
                    position: Some(position),
                    kind: ViolationKind::DuplicateRef,
                    description: format!("duplicate transaction reference {}", record.tx_ref),
                });
            }

            last_receiver.insert(record.property_id, record);
            by_property
                .entry(record.property_id)
                .or_default()
                .push(record.clone());
        }

        for property in &properties {
            if let Some(last) = last_receiver.get(&property.id) {
                if last.receiver != property.owner {
                    violations.push(Violation {
                        position: None,
                        kind: ViolationKind::OwnerMismatch,
                        description: format!(
                            "property {} owned by {} but last transferred to {}",
                            property.id, property.owner, last.receiver
                        ),
                    });
                }
            }

            let indexed = reader.history_for_property(property.id)?;
            let scanned = by_property.remove(&property.id).unwrap_or_default();
            if indexed != scanned {
                violations.push(Violation {
                    position: None,
                    kind: ViolationKind::IndexDivergence,
                    description: format!(
                        "indexed history for property {} differs from log scan",
                        property.id
                    ),
                });
            }
        }

        Ok(AuditReport {
            properties: properties.len() as u64,
            records: log.len() as u64,
            violations,
        })
    }
}

#[cfg(test)]
mod tests {
    use lrl_types::Address;

    use crate::memory::InMemoryLedger;
    use crate::traits::LedgerWriter;

    use super::*;

    fn addr(seed: u8) -> Address {
        Address::from_bytes([seed; 20])
    }

    #[test]
    fn clean_ledger_audits_clean() {
        let ledger = InMemoryLedger::new();
        let p = ledger.register("PN-1", addr(1), "loc", "doc:1").unwrap();
        ledger.mark_verified(p.id).unwrap();
        ledger.commit_transfer(p.id, addr(1), addr(2)).unwrap();
        ledger.commit_transfer(p.id, addr(2), addr(3)).unwrap();

        let report = LedgerAuditor::audit(&ledger).unwrap();
        assert!(report.is_valid(), "unexpected violations: {:?}", report.violations);
        assert_eq!(report.properties, 1);
        assert_eq!(report.records, 2);
    }

    #[test]
    fn empty_ledger_audits_clean() {
        let report = LedgerAuditor::audit(&InMemoryLedger::new()).unwrap();
        assert!(report.is_valid());
        assert_eq!(report.properties, 0);
        assert_eq!(report.records, 0);
    }
}
