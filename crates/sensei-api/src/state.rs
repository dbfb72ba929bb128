use sensei_graph::Orchestrator;
use sensei_persist::HistoryStore;
use std::sync::Arc;

use crate::config::Config;

/// Shared application state passed to all handlers
///
/// The orchestrator is built once at startup; each `/ask` request spawns one
/// turn on it.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub orchestrator: Arc<Orchestrator>,
    pub store: Arc<dyn HistoryStore>,
    /// Name of the configured search backend
    pub search_backend: &'static str,
}

impl AppState {
    pub fn new(config: Config, orchestrator: Orchestrator, search_backend: &'static str) -> Self {
        let store = Arc::clone(orchestrator.store());
        Self {
            config: Arc::new(config),
            orchestrator: Arc::new(orchestrator),
            store,
            search_backend,
        }
    }
}
