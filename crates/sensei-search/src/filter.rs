//! Post-processing shared by every backend.

use futures::future::join_all;
use reqwest::StatusCode;

use sensei_types::{Category, SearchConfig, SearchResult, SearchResultSet};

/// First `max_results` hits of `category`, in backend order.
pub fn top_results<'a>(
    results: impl IntoIterator<Item = &'a SearchResult>,
    max_results: usize,
    category: Category,
) -> Vec<SearchResult> {
    results
        .into_iter()
        .filter(|r| r.category == category)
        .take(max_results)
        .cloned()
        .collect()
}

/// Drop low-score images and videos. General results are left alone.
pub fn filter_by_score(mut results: SearchResultSet, config: &SearchConfig) -> SearchResultSet {
    results.images.retain(|r| r.score >= config.image_min_score);
    results.videos.retain(|r| r.score >= config.video_min_score);
    results
}

/// Keep only images whose source answers HEAD with 200. Checks run
/// concurrently; a failed request counts as inaccessible.
pub async fn filter_accessible_images(
    http: &reqwest::Client,
    mut results: SearchResultSet,
) -> SearchResultSet {
    if results.images.is_empty() {
        return results;
    }

    let checks = results.images.iter().map(|image| async move {
        match image.thumbnail.as_deref() {
            Some(src) => is_url_accessible(http, src).await,
            None => false,
        }
    });
    let accessible = join_all(checks).await;

    let before = results.images.len();
    let mut flags = accessible.into_iter();
    results.images.retain(|_| flags.next().unwrap_or(false));

    tracing::debug!(before, after = results.images.len(), "Filtered images by accessibility");
    results
}

async fn is_url_accessible(http: &reqwest::Client, url: &str) -> bool {
    match http.head(url).send().await {
        Ok(response) => response.status() == StatusCode::OK,
        Err(e) => {
            tracing::debug!(url, "Image source unreachable: {}", e);
            false
        }
    }
}
