use async_trait::async_trait;
use futures::future::join_all;
use std::time::Duration;

use sensei_types::SearchResult;

use crate::extract::extract_main_text;
use crate::fetcher::PageFetcher;

const USER_AGENT: &str = "Mozilla/5.0 (compatible; SenseiSearch/0.1)";

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("timed out")]
    Timeout,

    #[error("network error: {0}")]
    Network(String),

    #[error("HTTP {0}")]
    Status(u16),
}

/// Fetches pages concurrently over HTTP.
///
/// Each request (connect, headers and body) is bounded by `timeout`, so one
/// slow site holds the batch up for at most that long.
pub struct HttpPageFetcher {
    http: reqwest::Client,
    timeout: Duration,
}

impl HttpPageFetcher {
    pub fn new(timeout: Duration) -> reqwest::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self { http, timeout })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn fetch_one(&self, url: &str) -> Result<String, FetchError> {
        let response = self.http.get(url).send().await.map_err(classify)?;

        if !response.status().is_success() {
            return Err(FetchError::Status(response.status().as_u16()));
        }

        let html = response.text().await.map_err(classify)?;
        Ok(extract_main_text(&html))
    }
}

fn classify(e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout
    } else {
        FetchError::Network(e.to_string())
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch_pages(&self, results: &[SearchResult]) -> Vec<String> {
        let fetches = results.iter().map(|result| async move {
            match self.fetch_one(&result.url).await {
                Ok(text) => text,
                Err(e) => {
                    tracing::warn!(url = %result.url, "Page fetch failed: {}", e);
                    String::new()
                }
            }
        });

        let pages = join_all(fetches).await;
        tracing::debug!(
            requested = results.len(),
            readable = pages.iter().filter(|p| !p.is_empty()).count(),
            "Fetched pages"
        );
        pages
    }
}
