use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Per-turn tunables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnConfig {
    /// Prior turns loaded into the prompt
    pub history_window: usize,
    /// Include assistant answers from prior turns, not only user queries
    pub include_assistant_history: bool,
    /// Run the classification request alongside the rewrite
    pub classify_queries: bool,
    /// General results whose pages are fetched for context
    pub top_k_pages: usize,
    pub page_fetch_timeout: Duration,
    /// Characters of page text given to related-question generation
    pub related_context_chars: usize,
    pub max_related_questions: usize,
    /// Characters of the first query used as the thread name
    pub thread_name_chars: usize,
    /// Output channel capacity
    pub channel_capacity: usize,
}

impl Default for TurnConfig {
    fn default() -> Self {
        Self {
            history_window: 3,
            include_assistant_history: false,
            classify_queries: true,
            top_k_pages: 5,
            page_fetch_timeout: Duration::from_secs(3),
            related_context_chars: 5000,
            max_related_questions: 3,
            thread_name_chars: 50,
            channel_capacity: 1000,
        }
    }
}

impl TurnConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_history_window(mut self, turns: usize) -> Self {
        self.history_window = turns;
        self
    }

    pub fn with_assistant_history(mut self, enabled: bool) -> Self {
        self.include_assistant_history = enabled;
        self
    }

    pub fn with_classification(mut self, enabled: bool) -> Self {
        self.classify_queries = enabled;
        self
    }

    pub fn with_top_k_pages(mut self, k: usize) -> Self {
        self.top_k_pages = k;
        self
    }

    pub fn with_page_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.page_fetch_timeout = timeout;
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LLMConfig {
    pub model: String,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

impl LLMConfig {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            temperature: None,
            max_tokens: None,
        }
    }

    pub fn with_temperature(mut self, temp: f32) -> Self {
        self.temperature = Some(temp);
        self
    }

    pub fn with_max_tokens(mut self, tokens: u32) -> Self {
        self.max_tokens = Some(tokens);
        self
    }
}

/// The two completion tiers. `fast` serves rewrite, classification and
/// related questions; `capable` writes the answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelsConfig {
    pub fast: LLMConfig,
    pub capable: LLMConfig,
}

impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            fast: LLMConfig::new("gpt-4o-mini")
                .with_temperature(0.0)
                .with_max_tokens(500),
            capable: LLMConfig::new("gpt-4o")
                .with_temperature(0.0)
                .with_max_tokens(2500),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchProvider {
    Searxng,
    Bing,
}

impl Default for SearchProvider {
    fn default() -> Self {
        SearchProvider::Searxng
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    pub provider: SearchProvider,
    pub searxng_url: String,
    pub bing_endpoint: String,
    #[serde(default, skip_serializing)]
    pub bing_api_key: Option<String>,
    /// Cap per category
    pub max_results: usize,
    pub image_min_score: f64,
    pub video_min_score: f64,
    /// HEAD-check image sources before returning them
    pub check_image_access: bool,
    pub request_timeout: Duration,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            provider: SearchProvider::default(),
            searxng_url: "http://localhost:8888".to_string(),
            bing_endpoint: "https://api.bing.microsoft.com".to_string(),
            bing_api_key: None,
            max_results: 5,
            image_min_score: 1.0,
            video_min_score: 4.0,
            check_image_access: true,
            request_timeout: Duration::from_secs(10),
        }
    }
}

impl SearchConfig {
    pub fn searxng(url: impl Into<String>) -> Self {
        Self {
            provider: SearchProvider::Searxng,
            searxng_url: url.into(),
            ..Self::default()
        }
    }

    pub fn bing(api_key: impl Into<String>) -> Self {
        Self {
            provider: SearchProvider::Bing,
            bing_api_key: Some(api_key.into()),
            ..Self::default()
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        match self.provider {
            SearchProvider::Searxng => self.searxng_url = endpoint.into(),
            SearchProvider::Bing => self.bing_endpoint = endpoint.into(),
        }
        self
    }

    pub fn with_image_access_check(mut self, enabled: bool) -> Self {
        self.check_image_access = enabled;
        self
    }
}
