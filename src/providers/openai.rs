use anyhow::Result;
use async_trait::async_trait;
use log::{debug, error};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

use crate::errors::ProviderError;
use crate::language_utils::Direction;
use crate::providers::ollama::parse_endpoint;
use crate::providers::{BackendSettings, RateLimiter, RetryPolicy, Translator};

/// Client for OpenAI-compatible chat-completions servers
#[derive(Debug)]
pub struct OpenAI {
    client: Client,
    api_key: String,
    /// Base URL including the version prefix, e.g. `https://api.openai.com/v1`
    endpoint: String,
    retry: RetryPolicy,
    rate_limiter: RateLimiter,
}

/// Chat message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAIMessage {
    pub role: String,
    pub content: String,
}

/// Chat completion request
#[derive(Debug, Serialize)]
pub struct OpenAIRequest {
    model: String,
    messages: Vec<OpenAIMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

impl OpenAIRequest {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            messages: Vec::new(),
            temperature: None,
            max_tokens: None,
        }
    }

    /// Add a message to the request
    pub fn add_message(mut self, role: impl Into<String>, content: impl Into<String>) -> Self {
        self.messages.push(OpenAIMessage {
            role: role.into(),
            content: content.into(),
        });
        self
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}

/// Token usage information
#[derive(Debug, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

#[derive(Debug, Deserialize)]
pub struct OpenAIChoice {
    pub message: OpenAIMessage,
}

/// Chat completion response
#[derive(Debug, Deserialize)]
pub struct OpenAIResponse {
    pub choices: Vec<OpenAIChoice>,
    #[serde(default)]
    pub usage: Option<TokenUsage>,
}

impl OpenAIResponse {
    /// Text of the first choice
    pub fn text(&self) -> Option<&str> {
        self.choices.first().map(|c| c.message.content.as_str())
    }
}

impl OpenAI {
    pub fn new_with_config(
        api_key: impl Into<String>,
        endpoint: &str,
        timeout: Duration,
        retry: RetryPolicy,
        rate_limit: Option<u32>,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .pool_idle_timeout(Duration::from_secs(90))
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            endpoint: parse_endpoint(endpoint, 80)?,
            retry,
            rate_limiter: RateLimiter::new(rate_limit),
        })
    }

    fn authorized(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if self.api_key.is_empty() {
            builder
        } else {
            builder.bearer_auth(&self.api_key)
        }
    }

    /// Complete a chat request with retry logic
    pub async fn complete(&self, request: &OpenAIRequest) -> Result<OpenAIResponse, ProviderError> {
        let url = format!("{}/chat/completions", self.endpoint);
        self.retry
            .run("OpenAI", || async {
                self.rate_limiter.acquire().await;

                let response = self.authorized(self.client.post(&url)).json(request).send().await?;
                let status = response.status();
                if !status.is_success() {
                    let body = response.text().await.unwrap_or_default();
                    error!("OpenAI API error ({}): {}", status, body);
                    return Err(ProviderError::from_status(status.as_u16(), body));
                }

                response
                    .json::<OpenAIResponse>()
                    .await
                    .map_err(|e| ProviderError::ParseError(e.to_string()))
            })
            .await
    }

    /// List the models served by the endpoint
    pub async fn list_models(&self) -> Result<Vec<String>, ProviderError> {
        let url = format!("{}/models", self.endpoint);
        let response = self.authorized(self.client.get(&url)).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::from_status(status.as_u16(), body));
        }

        let value: serde_json::Value = response.json().await?;
        Ok(value["data"]
            .as_array()
            .map(|models| {
                models
                    .iter()
                    .filter_map(|m| m["id"].as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default())
    }
}

/// One direction served by one chat model
#[derive(Debug)]
pub struct OpenAITranslator {
    client: Arc<OpenAI>,
    model: String,
    direction: Direction,
    settings: BackendSettings,
}

impl OpenAITranslator {
    pub fn new(client: Arc<OpenAI>, model: impl Into<String>, direction: Direction, settings: BackendSettings) -> Self {
        Self {
            client,
            model: model.into(),
            direction,
            settings,
        }
    }

    pub fn build_request(&self, text: &str) -> OpenAIRequest {
        OpenAIRequest::new(&self.model)
            .add_message("system", self.settings.system_prompt_for(self.direction))
            .add_message("user", text)
            .temperature(self.settings.temperature)
            .max_tokens(self.settings.max_output_tokens)
    }
}

#[async_trait]
impl Translator for OpenAITranslator {
    async fn translate(&self, text: &str, direction: Direction) -> Result<String, ProviderError> {
        if direction != self.direction {
            return Err(ProviderError::UnsupportedDirection(format!(
                "model {} only serves {}",
                self.model, self.direction
            )));
        }

        let response = self.client.complete(&self.build_request(text)).await?;
        if let Some(usage) = &response.usage {
            debug!(
                "OpenAI {} ({}): {} prompt / {} completion tokens",
                self.model, direction, usage.prompt_tokens, usage.completion_tokens
            );
        }

        response
            .text()
            .map(|t| t.trim().to_string())
            .ok_or_else(|| ProviderError::ParseError("Response contained no choices".to_string()))
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        self.client.list_models().await.map(|_| ())
    }

    fn max_input_chars(&self) -> Option<usize> {
        self.settings.max_input_chars
    }

    fn name(&self) -> &str {
        "openai"
    }
}
