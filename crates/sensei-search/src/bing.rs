use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use serde::Deserialize;

use sensei_types::{Category, SearchConfig, SearchResult, SearchResultSet};

use crate::client::SearchClient;
use crate::error::{Result, SearchError};
use crate::filter::{filter_accessible_images, filter_by_score};

const SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";

/// Bing returns no relevance score; its results are already ranked, so every
/// hit gets a score that clears both media floors.
const RANKED_SCORE: f64 = 5.0;

/// Bing Web Search v7 backend. One request per requested category, issued
/// concurrently.
pub struct BingClient {
    http: reqwest::Client,
    endpoint: String,
    config: SearchConfig,
}

impl BingClient {
    pub fn new(config: SearchConfig) -> Result<Self> {
        let api_key = config
            .bing_api_key
            .clone()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| SearchError::Config("BING_API_KEY is required for the bing backend".to_string()))?;

        let mut headers = HeaderMap::new();
        headers.insert(
            SUBSCRIPTION_KEY_HEADER,
            HeaderValue::from_str(&api_key)
                .map_err(|_| SearchError::Config("Invalid Bing API key format".to_string()))?,
        );

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            http,
            endpoint: config.bing_endpoint.trim_end_matches('/').to_string(),
            config,
        })
    }

    async fn fetch(&self, categories: &[Category], category: Category, query: &str) -> Result<Vec<SearchResult>> {
        if !categories.contains(&category) {
            return Ok(Vec::new());
        }

        let path = match category {
            Category::General => "v7.0/search",
            Category::Images => "v7.0/images/search",
            Category::Videos => "v7.0/videos/search",
        };
        let count = self.config.max_results.to_string();

        let response = self
            .http
            .get(format!("{}/{}", self.endpoint, path))
            .query(&[("q", query), ("count", count.as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(SearchError::Status { status, body });
        }

        let body: BingResponse = response.json().await?;
        let mut results = match category {
            Category::General => parse_web_results(body),
            Category::Images => parse_image_results(body),
            Category::Videos => parse_video_results(body),
        };
        results.truncate(self.config.max_results);
        Ok(results)
    }
}

#[async_trait]
impl SearchClient for BingClient {
    async fn search(&self, query: &str, categories: &[Category]) -> Result<SearchResultSet> {
        tracing::info!(query, ?categories, "Searching with Bing");

        let (general, images, videos) = tokio::try_join!(
            self.fetch(categories, Category::General, query),
            self.fetch(categories, Category::Images, query),
            self.fetch(categories, Category::Videos, query),
        )?;

        let results = filter_by_score(SearchResultSet { general, images, videos }, &self.config);
        let results = if self.config.check_image_access {
            filter_accessible_images(&self.http, results).await
        } else {
            results
        };

        Ok(results)
    }

    fn name(&self) -> &'static str {
        "bing"
    }
}

fn bing_result(category: Category, url: String, title: String) -> SearchResult {
    SearchResult::new(category, url)
        .with_title(title)
        .with_score(RANKED_SCORE)
        .with_engines(vec!["bing".to_string()])
}

fn parse_web_results(body: BingResponse) -> Vec<SearchResult> {
    body.web_pages
        .map(|pages| pages.value)
        .unwrap_or_default()
        .into_iter()
        .map(|page| {
            bing_result(Category::General, page.url, page.name)
                .with_content(page.snippet.unwrap_or_default())
        })
        .collect()
}

fn parse_image_results(body: BingResponse) -> Vec<SearchResult> {
    body.value
        .into_iter()
        .filter_map(|item| {
            let url = item.content_url?;
            let mut result = bing_result(Category::Images, url, item.name.unwrap_or_default());
            if let Some(thumbnail) = item.thumbnail_url {
                result = result.with_thumbnail(thumbnail);
            }
            Some(result)
        })
        .collect()
}

fn parse_video_results(body: BingResponse) -> Vec<SearchResult> {
    body.value
        .into_iter()
        .filter_map(|item| {
            let url = item.content_url?;
            Some(bing_result(Category::Videos, url, item.name.unwrap_or_default()))
        })
        .collect()
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BingResponse {
    web_pages: Option<WebPages>,
    #[serde(default)]
    value: Vec<MediaItem>,
}

#[derive(Debug, Deserialize)]
struct WebPages {
    #[serde(default)]
    value: Vec<WebPage>,
}

#[derive(Debug, Deserialize)]
struct WebPage {
    url: String,
    name: String,
    snippet: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MediaItem {
    content_url: Option<String>,
    name: Option<String>,
    thumbnail_url: Option<String>,
}
