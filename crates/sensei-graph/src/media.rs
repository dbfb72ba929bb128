use sensei_llm::{ChatClient, Message};
use sensei_search::SearchClient;
use sensei_types::{Category, LLMConfig, QueryTags, SearchResultSet};

use crate::enrichment::classify_query;

/// Image and video search driven by the tags.
///
/// Without media tags the search client is not called. Search failures
/// degrade to an empty set.
pub async fn fetch_media(search: &dyn SearchClient, query: &str, tags: &QueryTags) -> SearchResultSet {
    let mut categories = Vec::with_capacity(2);
    if tags.needs_image {
        categories.push(Category::Images);
    }
    if tags.needs_video {
        categories.push(Category::Videos);
    }

    if categories.is_empty() {
        return SearchResultSet::empty();
    }

    match search.search(query, &categories).await {
        Ok(mut results) => {
            results.general.clear();
            tracing::debug!(
                images = results.images.len(),
                videos = results.videos.len(),
                "Media results"
            );
            results
        }
        Err(e) => {
            tracing::warn!("Media search failed: {}", e);
            SearchResultSet::empty()
        }
    }
}

/// Secondary classification for turns that were enriched without tags.
/// Any failure means no media.
pub async fn classify_media(
    client: &dyn ChatClient,
    config: &LLMConfig,
    messages: &[Message],
    query: &str,
) -> QueryTags {
    match classify_query(client, config, messages, query).await {
        Ok(tags) => tags,
        Err(e) => {
            tracing::warn!("Media classification failed: {}", e);
            QueryTags::default()
        }
    }
}
