use async_trait::async_trait;
use serde::Deserialize;

use sensei_types::{Category, SearchConfig, SearchResult, SearchResultSet};

use crate::client::SearchClient;
use crate::error::{Result, SearchError};
use crate::filter::{filter_accessible_images, filter_by_score, top_results};

/// SearxNG metasearch backend (`GET {base}/search?format=json`).
///
/// SearxNG already ranks by its composite score (engine weights, position,
/// frequency), so the top hits per category are taken in response order.
pub struct SearxngClient {
    http: reqwest::Client,
    base_url: String,
    config: SearchConfig,
}

impl SearxngClient {
    pub fn new(config: SearchConfig) -> Result<Self> {
        let base_url = config.searxng_url.trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(SearchError::Config("searxng_url must be set".to_string()));
        }

        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self { http, base_url, config })
    }

    fn normalize(raw: Vec<RawResult>) -> Vec<SearchResult> {
        raw.into_iter()
            .filter_map(|r| {
                let category = match r.category.as_deref() {
                    Some("general") => Category::General,
                    Some("images") => Category::Images,
                    Some("videos") => Category::Videos,
                    _ => return None,
                };
                let mut result = SearchResult::new(category, r.url)
                    .with_title(r.title.unwrap_or_default())
                    .with_content(r.content.unwrap_or_default())
                    .with_score(r.score.unwrap_or_default())
                    .with_engines(r.engines);
                if let Some(src) = r.img_src.filter(|s| !s.is_empty()) {
                    result = result.with_thumbnail(src);
                }
                Some(result)
            })
            .collect()
    }
}

#[async_trait]
impl SearchClient for SearxngClient {
    async fn search(&self, query: &str, categories: &[Category]) -> Result<SearchResultSet> {
        tracing::info!(query, ?categories, "Searching with SearxNG");

        let joined = categories
            .iter()
            .map(Category::as_str)
            .collect::<Vec<_>>()
            .join(",");
        let mut params = vec![("q", query), ("format", "json"), ("pageno", "1")];
        if !joined.is_empty() {
            params.push(("categories", joined.as_str()));
        }

        let response = self
            .http
            .get(format!("{}/search", self.base_url))
            .query(&params)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(SearchError::Status { status, body });
        }

        let body: RawResponse = response.json().await?;
        let results = Self::normalize(body.results);

        let mut final_results = SearchResultSet::empty();
        for &category in categories {
            *final_results.bucket_mut(category) =
                top_results(&results, self.config.max_results, category);
        }

        let final_results = filter_by_score(final_results, &self.config);
        let final_results = if self.config.check_image_access {
            filter_accessible_images(&self.http, final_results).await
        } else {
            final_results
        };

        tracing::debug!(
            general = final_results.general.len(),
            images = final_results.images.len(),
            videos = final_results.videos.len(),
            "SearxNG search complete"
        );
        Ok(final_results)
    }

    fn name(&self) -> &'static str {
        "searxng"
    }
}

#[derive(Debug, Deserialize)]
struct RawResponse {
    #[serde(default)]
    results: Vec<RawResult>,
}

#[derive(Debug, Deserialize)]
struct RawResult {
    url: String,
    title: Option<String>,
    content: Option<String>,
    #[serde(default)]
    engines: Vec<String>,
    score: Option<f64>,
    category: Option<String>,
    img_src: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_skips_unknown_categories() {
        let raw: RawResponse = serde_json::from_str(
            r#"{"results": [
                {"url": "https://a", "title": "A", "category": "general", "score": 1.5, "engines": ["google"]},
                {"url": "https://m", "category": "map"},
                {"url": "https://i", "category": "images", "img_src": "https://i/src.png", "score": null}
            ]}"#,
        )
        .unwrap();

        let results = SearxngClient::normalize(raw.results);

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].engines, vec!["google"]);
        assert_eq!(results[1].thumbnail.as_deref(), Some("https://i/src.png"));
        assert_eq!(results[1].score, 0.0);
    }

    #[test]
    fn test_requires_url() {
        assert!(SearxngClient::new(SearchConfig::searxng("")).is_err());
    }
}
