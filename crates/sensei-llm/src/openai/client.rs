// OpenAI-compatible chat completions client

use crate::streaming::parse_chat_sse_stream;
use crate::traits::{ChatClient, ChatOptions, ChatRequest, ChatResponse, EventStream, TokenUsage};
use crate::types::Message;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::{Deserialize, Serialize};

pub const OPENAI_API_BASE: &str = "https://api.openai.com/v1";

/// Chat completions client (HTTP direct, no SDK).
///
/// Works against any server exposing `POST {base_url}/chat/completions`,
/// which is how the fast and capable tiers can live on different providers.
pub struct OpenAIClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl OpenAIClient {
    /// Create new client against the public OpenAI endpoint
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_base_url(api_key, OPENAI_API_BASE)
    }

    /// Create new client against an OpenAI-compatible endpoint
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", api_key))
                .context("Invalid API key format")?,
        );

        let http_client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post_completion(&self, request: ChatRequest, stream: bool) -> Result<reqwest::Response> {
        let payload = CompletionPayload::new(&request.model, &request.messages, &request.options, stream);

        tracing::debug!(model = %request.model, stream, "Sending chat completion request");

        let response = self
            .http_client
            .post(format!("{}/chat/completions", self.base_url))
            .json(&payload)
            .send()
            .await
            .context("Failed to send request")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            anyhow::bail!("OpenAI API error ({}): {}", status, error_text);
        }

        Ok(response)
    }
}

#[async_trait]
impl ChatClient for OpenAIClient {
    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse> {
        let response = self.post_completion(request, false).await?;

        let raw: serde_json::Value = response
            .json()
            .await
            .context("Failed to parse response")?;
        let parsed: OpenAIChatResponse =
            serde_json::from_value(raw.clone()).context("Unexpected chat completion shape")?;

        let choice = parsed.choices.into_iter().next();
        Ok(ChatResponse {
            content: choice.as_ref().and_then(|c| c.message.content.clone()),
            usage: parsed.usage.map(|u| TokenUsage {
                input_tokens: u.prompt_tokens,
                output_tokens: u.completion_tokens,
                total_tokens: u.total_tokens,
            }),
            finish_reason: choice.and_then(|c| c.finish_reason),
            raw,
        })
    }

    async fn chat_stream(&self, request: ChatRequest) -> Result<EventStream> {
        let response = self.post_completion(request, true).await?;
        Ok(parse_chat_sse_stream(response))
    }
}

/// Request body. o1 and gpt-5 models reject `temperature` and take
/// `max_completion_tokens` instead of `max_tokens`.
#[derive(Debug, Serialize)]
struct CompletionPayload<'a> {
    model: &'a str,
    messages: &'a [Message],
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_completion_tokens: Option<u32>,
}

impl<'a> CompletionPayload<'a> {
    fn new(model: &'a str, messages: &'a [Message], options: &ChatOptions, stream: bool) -> Self {
        let is_reasoning_model = model.starts_with("o1") || model.starts_with("gpt-5");

        Self {
            model,
            messages,
            stream,
            temperature: options.temperature.filter(|_| !is_reasoning_model),
            max_tokens: options.max_tokens.filter(|_| !is_reasoning_model),
            max_completion_tokens: options.max_tokens.filter(|_| is_reasoning_model),
        }
    }
}

#[derive(Debug, Deserialize)]
struct OpenAIChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}
