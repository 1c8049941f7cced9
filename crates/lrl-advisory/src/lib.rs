//! Fraud-signal advisory for the Land Registry Ledger (LRL).
//!
//! Given a property's transaction history, this crate produces a
//! natural-language flag for a human reviewer. It is strictly advisory:
//! nothing here can gate or block a registry operation, and an
//! unavailable summarizer never fails a read path: [`BestEffort`] falls
//! back to the deterministic [`HeuristicSummarizer`].
//!
//! The external text-completion service is represented only by the
//! [`HistorySummarizer`] boundary; [`build_analysis_prompt`] renders the
//! request such a service receives.

pub mod error;
pub mod heuristic;
pub mod prompt;
pub mod summarizer;

pub use error::AdvisoryError;
pub use heuristic::HeuristicSummarizer;
pub use prompt::build_analysis_prompt;
pub use summarizer::{BestEffort, HistorySummarizer};
