use std::collections::HashMap;

use lrl_types::{Address, PropertyId, TransactionRecord};

use crate::error::AdvisoryError;
use crate::summarizer::HistorySummarizer;

/// Deterministic, always-available summarizer.
///
/// Flags the two patterns a reviewer most wants surfaced from raw
/// history: an immediate back-transfer (A→B directly followed by B→A)
/// and an address that acquires the same property more than once. No
/// external service involved; this is also the fallback behind
/// [`BestEffort`](crate::BestEffort).
pub struct HeuristicSummarizer;

#[async_trait::async_trait]
impl HistorySummarizer for HeuristicSummarizer {
    async fn summarize(
        &self,
        property_id: PropertyId,
        history: &[TransactionRecord],
    ) -> Result<String, AdvisoryError> {
        Ok(narrate(property_id, history))
    }
}

fn narrate(property_id: PropertyId, history: &[TransactionRecord]) -> String {
    if history.is_empty() {
        return format!(
            "Property {property_id} has no recorded transfers; nothing to flag."
        );
    }

    let mut flags = Vec::new();

    for pair in history.windows(2) {
        if pair[1].sender == pair[0].receiver && pair[1].receiver == pair[0].sender {
            flags.push(format!(
                "ownership bounced straight back between {} and {}",
                pair[0].sender, pair[0].receiver
            ));
            break;
        }
    }

    let mut acquisitions: HashMap<Address, u32> = HashMap::new();
    for record in history {
        *acquisitions.entry(record.receiver).or_default() += 1;
    }
    let mut repeat: Vec<&Address> = acquisitions
        .iter()
        .filter(|(_, n)| **n > 1)
        .map(|(a, _)| a)
        .collect();
    repeat.sort();
    if let Some(address) = repeat.first() {
        flags.push(format!("{address} acquired the property more than once"));
    }

    let count = history.len();
    if flags.is_empty() {
        format!(
            "Property {property_id} changed hands {count} time(s) with no \
             suspicious pattern detected."
        )
    } else {
        format!(
            "Property {property_id} changed hands {count} time(s). \
             Flagged for review: {}.",
            flags.join("; ")
        )
    }
}

#[cfg(test)]
mod tests {
    use lrl_types::TxRef;

    use super::*;

    fn addr(seed: u8) -> Address {
        Address::from_bytes([seed; 20])
    }

    fn record(sender: u8, receiver: u8, position: u64) -> TransactionRecord {
        let id = PropertyId::new(1);
        let sender = addr(sender);
        let receiver = addr(receiver);
        TransactionRecord {
            property_id: id,
            sender,
            receiver,
            tx_ref: TxRef::derive(id, &sender, &receiver, position),
        }
    }

    #[tokio::test]
    async fn empty_history_has_nothing_to_flag() {
        let narrative = HeuristicSummarizer
            .summarize(PropertyId::new(1), &[])
            .await
            .unwrap();
        assert!(narrative.contains("no recorded transfers"));
    }

    #[tokio::test]
    async fn clean_chain_is_not_flagged() {
        let history = vec![record(1, 2, 0), record(2, 3, 1), record(3, 4, 2)];
        let narrative = HeuristicSummarizer
            .summarize(PropertyId::new(1), &history)
            .await
            .unwrap();
        assert!(narrative.contains("3 time(s)"));
        assert!(narrative.contains("no suspicious pattern"));
    }

    #[tokio::test]
    async fn immediate_back_transfer_is_flagged() {
        let history = vec![record(1, 2, 0), record(2, 1, 1)];
        let narrative = HeuristicSummarizer
            .summarize(PropertyId::new(1), &history)
            .await
            .unwrap();
        assert!(narrative.contains("bounced straight back"));
    }

    #[tokio::test]
    async fn repeat_acquirer_is_flagged() {
        let history = vec![record(1, 2, 0), record(2, 3, 1), record(3, 2, 2)];
        let narrative = HeuristicSummarizer
            .summarize(PropertyId::new(1), &history)
            .await
            .unwrap();
        assert!(narrative.contains("more than once"));
    }
}
