use anyhow::{anyhow, Result};
use sensei_context::PageFetcher;
use sensei_llm::ChatClient;
use sensei_persist::HistoryStore;
use sensei_search::SearchClient;
use sensei_types::{ModelsConfig, TurnConfig};
use std::sync::Arc;

use crate::orchestrator::Orchestrator;

/// Builder for [`Orchestrator`]
pub struct OrchestratorBuilder {
    fast_client: Option<Arc<dyn ChatClient>>,
    capable_client: Option<Arc<dyn ChatClient>>,
    search: Option<Arc<dyn SearchClient>>,
    pages: Option<Arc<dyn PageFetcher>>,
    store: Option<Arc<dyn HistoryStore>>,
    models: ModelsConfig,
    config: TurnConfig,
}

impl OrchestratorBuilder {
    pub fn new() -> Self {
        Self {
            fast_client: None,
            capable_client: None,
            search: None,
            pages: None,
            store: None,
            models: ModelsConfig::default(),
            config: TurnConfig::default(),
        }
    }

    /// Client for rewrite, classification and related questions
    pub fn fast_client(mut self, client: Arc<dyn ChatClient>) -> Self {
        self.fast_client = Some(client);
        self
    }

    /// Client for the streamed answer
    pub fn capable_client(mut self, client: Arc<dyn ChatClient>) -> Self {
        self.capable_client = Some(client);
        self
    }

    /// Use one client for both tiers
    pub fn chat_client(self, client: Arc<dyn ChatClient>) -> Self {
        self.fast_client(Arc::clone(&client)).capable_client(client)
    }

    pub fn search_client(mut self, search: Arc<dyn SearchClient>) -> Self {
        self.search = Some(search);
        self
    }

    pub fn page_fetcher(mut self, pages: Arc<dyn PageFetcher>) -> Self {
        self.pages = Some(pages);
        self
    }

    pub fn history_store(mut self, store: Arc<dyn HistoryStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn models(mut self, models: ModelsConfig) -> Self {
        self.models = models;
        self
    }

    pub fn config(mut self, config: TurnConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> Result<Orchestrator> {
        let fast = self
            .fast_client
            .ok_or_else(|| anyhow!("Fast-tier chat client is required"))?;
        let capable = self
            .capable_client
            .ok_or_else(|| anyhow!("Capable-tier chat client is required"))?;
        let search = self
            .search
            .ok_or_else(|| anyhow!("Search client is required"))?;
        let pages = self
            .pages
            .ok_or_else(|| anyhow!("Page fetcher is required"))?;
        let store = self
            .store
            .ok_or_else(|| anyhow!("History store is required"))?;

        Ok(Orchestrator::new(
            fast,
            capable,
            search,
            pages,
            store,
            self.models,
            self.config,
        ))
    }
}

impl Default for OrchestratorBuilder {
    fn default() -> Self {
        Self::new()
    }
}
