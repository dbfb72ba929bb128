// Provider configuration and client factory

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::openai::OpenAIClient;
use crate::traits::ChatClient;

/// Configuration for an OpenAI-compatible provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAIConfig {
    pub api_key: String,
    /// Base URL (optional, defaults to https://api.openai.com/v1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl OpenAIConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: None,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }
}

/// Complete provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ProviderConfig {
    OpenAI(OpenAIConfig),
}

impl ProviderConfig {
    pub fn openai(api_key: impl Into<String>) -> Self {
        Self::OpenAI(OpenAIConfig::new(api_key))
    }

    /// OpenAI-compatible endpoint with an explicit base URL. An empty URL
    /// falls back to the public endpoint.
    pub fn openai_compatible(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        let config = OpenAIConfig::new(api_key);
        if base_url.trim().is_empty() {
            Self::OpenAI(config)
        } else {
            Self::OpenAI(config.with_base_url(base_url))
        }
    }
}

/// Factory for creating chat clients from configuration
pub struct ClientFactory;

impl ClientFactory {
    pub fn create_chat_client(config: ProviderConfig) -> Result<Arc<dyn ChatClient>> {
        match config {
            ProviderConfig::OpenAI(openai_config) => {
                let client = match openai_config.base_url {
                    Some(base_url) => OpenAIClient::with_base_url(openai_config.api_key, base_url)?,
                    None => OpenAIClient::new(openai_config.api_key)?,
                };
                Ok(Arc::new(client))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openai_compatible_empty_url() {
        let ProviderConfig::OpenAI(config) = ProviderConfig::openai_compatible("k", "  ");
        assert!(config.base_url.is_none());
    }

    #[test]
    fn test_serde_roundtrip() {
        let config = ProviderConfig::openai_compatible("test-key", "http://localhost:11434/v1");

        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains(r#""type":"openai""#));

        let ProviderConfig::OpenAI(back) = serde_json::from_str(&json).unwrap();
        assert_eq!(back.base_url.as_deref(), Some("http://localhost:11434/v1"));
    }

    #[test]
    fn test_factory_builds_client() {
        assert!(ClientFactory::create_chat_client(ProviderConfig::openai("k")).is_ok());
    }
}
