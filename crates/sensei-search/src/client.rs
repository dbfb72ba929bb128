use async_trait::async_trait;
use std::sync::Arc;

use sensei_types::{Category, SearchConfig, SearchProvider, SearchResultSet};

use crate::bing::BingClient;
use crate::error::Result;
use crate::searxng::SearxngClient;

/// Search backend.
///
/// Implementations return at most `max_results` hits per requested category,
/// apply the image and video score floors and drop images whose source does
/// not answer a HEAD request. Categories not requested come back empty.
#[async_trait]
pub trait SearchClient: Send + Sync {
    async fn search(&self, query: &str, categories: &[Category]) -> Result<SearchResultSet>;

    /// Backend name for logs and health output
    fn name(&self) -> &'static str;
}

/// Pick the backend named by configuration. Called once at startup.
pub fn create_search_client(config: &SearchConfig) -> Result<Arc<dyn SearchClient>> {
    let client: Arc<dyn SearchClient> = match config.provider {
        SearchProvider::Searxng => Arc::new(SearxngClient::new(config.clone())?),
        SearchProvider::Bing => Arc::new(BingClient::new(config.clone())?),
    };

    tracing::info!(backend = client.name(), "Search backend selected");
    Ok(client)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SearchError;

    #[test]
    fn test_selects_by_provider() {
        let searxng = create_search_client(&SearchConfig::searxng("http://localhost:8888")).unwrap();
        assert_eq!(searxng.name(), "searxng");

        let bing = create_search_client(&SearchConfig::bing("key")).unwrap();
        assert_eq!(bing.name(), "bing");
    }

    #[test]
    fn test_bing_requires_key() {
        let config = SearchConfig {
            provider: SearchProvider::Bing,
            ..SearchConfig::default()
        };

        assert!(matches!(create_search_client(&config), Err(SearchError::Config(_))));
    }
}
