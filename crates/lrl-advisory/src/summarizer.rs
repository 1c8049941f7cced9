use std::sync::Arc;

use lrl_types::{PropertyId, TransactionRecord};

use crate::error::AdvisoryError;
use crate::heuristic::HeuristicSummarizer;

/// Boundary to a service that turns a transfer history into a
/// human-readable fraud-signal narrative.
///
/// Implementations are advisory only: the registry never consults them
/// and their output never affects ledger state.
#[async_trait::async_trait]
pub trait HistorySummarizer: Send + Sync {
    async fn summarize(
        &self,
        property_id: PropertyId,
        history: &[TransactionRecord],
    ) -> Result<String, AdvisoryError>;
}

/// Wrap a primary summarizer (typically a remote text-completion client)
/// so that its failure can never surface: on error the deterministic
/// [`HeuristicSummarizer`] answers instead, and the failure is logged.
pub struct BestEffort {
    primary: Arc<dyn HistorySummarizer>,
    fallback: HeuristicSummarizer,
}

impl BestEffort {
    pub fn new(primary: Arc<dyn HistorySummarizer>) -> Self {
        Self {
            primary,
            fallback: HeuristicSummarizer,
        }
    }

    /// A best-effort stack with no remote primary at all.
    pub fn heuristic_only() -> Self {
        Self::new(Arc::new(HeuristicSummarizer))
    }
}

#[async_trait::async_trait]
impl HistorySummarizer for BestEffort {
    async fn summarize(
        &self,
        property_id: PropertyId,
        history: &[TransactionRecord],
    ) -> Result<String, AdvisoryError> {
        match self.primary.summarize(property_id, history).await {
            Ok(narrative) => Ok(narrative),
            Err(e) => {
                tracing::warn!(
                    property = %property_id,
                    error = %e,
                    "advisory summarizer failed; using heuristic fallback"
                );
                self.fallback.summarize(property_id, history).await
            }
        }
    }
}
