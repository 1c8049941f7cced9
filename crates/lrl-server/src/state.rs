use std::sync::Arc;

use lrl_advisory::HistorySummarizer;
use lrl_docstore::DocumentStore;
use lrl_profile::ProfileStore;
use lrl_registry::Registry;

/// Shared handler state: the registry plus its collaborator boundaries.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<Registry>,
    pub profiles: Arc<dyn ProfileStore>,
    pub documents: Arc<dyn DocumentStore>,
    pub advisory: Arc<dyn HistorySummarizer>,
}
