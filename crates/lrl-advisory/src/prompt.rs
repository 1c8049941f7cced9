use std::fmt::Write;

use lrl_types::{PropertyId, TransactionRecord};

/// Render a property's transaction history into the analysis request sent
/// to an external text-completion service.
///
/// The history is listed record by record (reference, sender, receiver)
/// in commit order, followed by the reviewer's question. Nothing beyond
/// the three stable record fields is exposed.
pub fn build_analysis_prompt(property_id: PropertyId, history: &[TransactionRecord]) -> String {
    let mut details = String::new();
    for record in history {
        let _ = writeln!(
            details,
            "- Transaction Reference: {}\n  From: {}\n  To: {}",
            record.tx_ref, record.sender, record.receiver
        );
    }
    if details.is_empty() {
        details.push_str("(no transfers on record)\n");
    }

    format!(
        "Analyze the ownership history of property {property_id}.\n\
         The transaction history, in chronological order, is:\n\
         {details}\
         Based on this information, summarize whether there is any \
         suspicious activity in the ownership transfers."
    )
}
