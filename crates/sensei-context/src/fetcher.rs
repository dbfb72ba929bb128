use async_trait::async_trait;

use sensei_types::SearchResult;

/// Fetches the pages behind search results and reduces each to readable text.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// One entry per input result, in input order. A page that cannot be
    /// fetched or read yields an empty string; the call itself never fails.
    async fn fetch_pages(&self, results: &[SearchResult]) -> Vec<String>;
}
