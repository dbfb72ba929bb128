use config::{Config as ConfigLoader, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use sensei_llm::ProviderConfig;
use sensei_types::{LLMConfig, ModelsConfig, SearchConfig, SearchProvider, TurnConfig};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub cors: CorsConfig,
    pub llm: LlmTiers,
    pub search: SearchSection,
    pub store: StoreConfig,
    pub mongodb: MongoDbConfig,
    #[serde(default)]
    pub turn: TurnSection,
    pub logging: LoggingConfig,

    // Secrets (from ENV only)
    #[serde(default)]
    pub mongodb_uri: String,
    #[serde(default)]
    pub fast_model_api_key: String,
    #[serde(default)]
    pub capable_model_api_key: String,
    #[serde(default)]
    pub bing_api_key: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_request_timeout() -> u64 {
    300
}

#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    pub enabled: bool,
    pub origins: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmTiers {
    pub fast: TierConfig,
    pub capable: TierConfig,
}

/// One completion tier. An empty `base_url` means the public OpenAI endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TierConfig {
    pub model: String,
    #[serde(default)]
    pub base_url: String,
    #[serde(default)]
    pub temperature: f32,
    pub max_tokens: u32,
}

impl TierConfig {
    pub fn provider(&self, api_key: &str) -> ProviderConfig {
        ProviderConfig::openai_compatible(api_key, self.base_url.as_str())
    }
}

impl From<&TierConfig> for LLMConfig {
    fn from(tier: &TierConfig) -> Self {
        LLMConfig::new(tier.model.clone())
            .with_temperature(tier.temperature)
            .with_max_tokens(tier.max_tokens)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchSection {
    pub provider: SearchProvider,
    #[serde(default)]
    pub searxng_url: Option<String>,
    #[serde(default)]
    pub bing_endpoint: Option<String>,
    #[serde(default = "default_true")]
    pub check_image_access: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Mongodb,
    Memory,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    pub backend: StoreBackend,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MongoDbConfig {
    pub database: String,
}

/// Overrides for the per-turn tunables; anything unset keeps its default.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TurnSection {
    pub history_window: Option<usize>,
    pub include_assistant_history: Option<bool>,
    pub classify_queries: Option<bool>,
    pub page_fetch_timeout_ms: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Config {
    /// Load configuration from TOML files and environment variables
    ///
    /// Hierarchy (weakest to strongest):
    /// 1. config/default.toml
    /// 2. config/{ENV}.toml (if ENV is set)
    /// 3. `SENSEI_`-prefixed environment variables, `__` between sections
    ///    (`SENSEI_SERVER__PORT=9000`)
    pub fn load() -> Result<Self, ConfigError> {
        let env = std::env::var("ENV").unwrap_or_else(|_| "dev".to_string());

        let builder = ConfigLoader::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(
                Environment::with_prefix("SENSEI")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        let mut cfg: Config = builder.build()?.try_deserialize()?;
        cfg.load_secrets()?;
        Ok(cfg)
    }

    /// Load config from a specific path (useful for testing)
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let builder = ConfigLoader::builder().add_source(File::from(path.as_ref()));
        builder.build()?.try_deserialize()
    }

    /// Read API keys and the database URI from the environment.
    ///
    /// Only the secrets the selected backends need are required. The capable
    /// tier reuses the fast tier's key when it has none of its own.
    fn load_secrets(&mut self) -> Result<(), ConfigError> {
        self.fast_model_api_key = required_env("FAST_MODEL_API_KEY")?;
        self.capable_model_api_key = std::env::var("CAPABLE_MODEL_API_KEY")
            .unwrap_or_else(|_| self.fast_model_api_key.clone());

        if self.store.backend == StoreBackend::Mongodb {
            self.mongodb_uri = required_env("MONGODB_URI")?;
        }

        if self.search.provider == SearchProvider::Bing {
            self.bing_api_key = Some(required_env("BING_API_KEY")?);
        }

        Ok(())
    }

    pub fn models(&self) -> ModelsConfig {
        ModelsConfig {
            fast: (&self.llm.fast).into(),
            capable: (&self.llm.capable).into(),
        }
    }

    pub fn search_config(&self) -> SearchConfig {
        let mut search = SearchConfig {
            provider: self.search.provider,
            bing_api_key: self.bing_api_key.clone(),
            check_image_access: self.search.check_image_access,
            ..SearchConfig::default()
        };
        if let Some(url) = &self.search.searxng_url {
            search.searxng_url = url.clone();
        }
        if let Some(endpoint) = &self.search.bing_endpoint {
            search.bing_endpoint = endpoint.clone();
        }
        search
    }

    pub fn turn_config(&self) -> TurnConfig {
        let mut turn = TurnConfig::default();
        if let Some(window) = self.turn.history_window {
            turn = turn.with_history_window(window);
        }
        if let Some(enabled) = self.turn.include_assistant_history {
            turn = turn.with_assistant_history(enabled);
        }
        if let Some(enabled) = self.turn.classify_queries {
            turn = turn.with_classification(enabled);
        }
        if let Some(ms) = self.turn.page_fetch_timeout_ms {
            turn = turn.with_page_fetch_timeout(Duration::from_millis(ms));
        }
        turn
    }
}

fn required_env(name: &str) -> Result<String, ConfigError> {
    std::env::var(name)
        .map_err(|_| ConfigError::Message(format!("{} environment variable is required", name)))
}
