use anyhow::{Result, anyhow};
use async_trait::async_trait;
use log::{debug, error};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

use crate::errors::ProviderError;
use crate::language_utils::Direction;
use crate::providers::{BackendSettings, RateLimiter, RetryPolicy, Translator};

/// Ollama client for interacting with Ollama API
#[derive(Debug)]
pub struct Ollama {
    /// Base URL of the Ollama API, without trailing slash
    base_url: String,
    /// HTTP client for making requests
    client: Client,
    retry: RetryPolicy,
    rate_limiter: RateLimiter,
}

/// Generate request for the Ollama API
#[derive(Debug, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Model name to use for generation
    model: String,
    /// Prompt to generate from
    prompt: String,
    /// System message to guide the model
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    /// Additional model parameters
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<GenerationOptions>,
    /// Whether to stream the response
    #[serde(skip_serializing_if = "Option::is_none")]
    stream: Option<bool>,
}

/// Generation options for the Ollama API
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct GenerationOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    /// Maximum number of tokens to generate
    #[serde(skip_serializing_if = "Option::is_none")]
    num_predict: Option<u32>,
}

/// Generation response from the Ollama API
#[derive(Debug, Serialize, Deserialize)]
pub struct GenerationResponse {
    pub model: String,
    /// Generated text
    pub response: String,
    pub done: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt_eval_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eval_count: Option<u64>,
}

impl GenerationRequest {
    /// Create a new non-streaming generation request
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            system: None,
            options: None,
            stream: Some(false),
        }
    }

    /// Set the system prompt
    pub fn system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    /// Set the temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.options.get_or_insert_with(GenerationOptions::default).temperature = Some(temperature);
        self
    }

    /// Cap the number of generated tokens
    pub fn num_predict(mut self, num_predict: u32) -> Self {
        self.options.get_or_insert_with(GenerationOptions::default).num_predict = Some(num_predict);
        self
    }
}

/// Normalize an endpoint, adding the default scheme and port when missing
pub fn parse_endpoint(endpoint: &str, default_port: u16) -> Result<String> {
    if endpoint.trim().is_empty() {
        return Err(anyhow!("Endpoint cannot be empty"));
    }

    let mut url = if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
        Url::parse(endpoint)?
    } else {
        Url::parse(&format!("http://{}", endpoint))?
    };

    if url.host_str().is_none() {
        return Err(anyhow!("Invalid host in endpoint: {}", endpoint));
    }
    if url.port().is_none() && url.scheme() == "http" {
        url.set_port(Some(default_port))
            .map_err(|_| anyhow!("Cannot set port on endpoint: {}", endpoint))?;
    }

    Ok(url.as_str().trim_end_matches('/').to_string())
}

/// Recover the generated text from a streamed (JSON lines) body
fn parse_streamed_response(body: &str) -> Option<GenerationResponse> {
    let mut text = String::new();
    let mut last: Option<serde_json::Value> = None;

    for line in body.lines().filter(|l| !l.trim().is_empty()) {
        let value: serde_json::Value = serde_json::from_str(line).ok()?;
        if let Some(part) = value.get("response").and_then(|v| v.as_str()) {
            text.push_str(part);
        }
        last = Some(value);
    }

    let last = last?;
    Some(GenerationResponse {
        model: last.get("model").and_then(|v| v.as_str()).unwrap_or("unknown").to_string(),
        response: text,
        done: last.get("done").and_then(|v| v.as_bool()).unwrap_or(true),
        prompt_eval_count: last.get("prompt_eval_count").and_then(|v| v.as_u64()),
        eval_count: last.get("eval_count").and_then(|v| v.as_u64()),
    })
}

impl Ollama {
    /// Create a new Ollama client
    ///
    /// Ollama speaks HTTP/1.1; connections are kept alive between chunks.
    pub fn new_with_config(
        endpoint: &str,
        timeout: Duration,
        retry: RetryPolicy,
        rate_limit: Option<u32>,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .http1_only()
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Duration::from_secs(60))
            .build()?;

        Ok(Self {
            base_url: parse_endpoint(endpoint, 11434)?,
            client,
            retry,
            rate_limiter: RateLimiter::new(rate_limit),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Generate text from the Ollama API with retry logic
    pub async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResponse, ProviderError> {
        let url = format!("{}/api/generate", self.base_url);
        self.retry
            .run("Ollama", || async {
                self.rate_limiter.acquire().await;
                self.generate_once(&url, request).await
            })
            .await
    }

    async fn generate_once(&self, url: &str, request: &GenerationRequest) -> Result<GenerationResponse, ProviderError> {
        let response = self.client.post(url).json(request).send().await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            error!("Ollama API error ({}): {}", status, body);
            return Err(ProviderError::from_status(status.as_u16(), body));
        }

        match serde_json::from_str::<GenerationResponse>(&body) {
            Ok(parsed) => Ok(parsed),
            Err(e) => parse_streamed_response(&body).ok_or_else(|| {
                let preview: String = body.chars().take(500).collect();
                error!("Failed to parse Ollama API response: {}. Raw response: {}", e, preview);
                ProviderError::ParseError(e.to_string())
            }),
        }
    }

    /// Get the Ollama API version
    pub async fn version(&self) -> Result<String, ProviderError> {
        let url = format!("{}/api/version", self.base_url);
        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::from_status(status.as_u16(), body));
        }

        let value: serde_json::Value = response.json().await?;
        value["version"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| ProviderError::ParseError("Invalid version format in response".to_string()))
    }
}

/// One direction served by one Ollama model
#[derive(Debug)]
pub struct OllamaTranslator {
    client: Arc<Ollama>,
    model: String,
    direction: Direction,
    settings: BackendSettings,
}

impl OllamaTranslator {
    pub fn new(client: Arc<Ollama>, model: impl Into<String>, direction: Direction, settings: BackendSettings) -> Self {
        Self {
            client,
            model: model.into(),
            direction,
            settings,
        }
    }

    /// Build the request sent for one chunk
    pub fn build_request(&self, text: &str) -> GenerationRequest {
        GenerationRequest::new(&self.model, text)
            .system(self.settings.system_prompt_for(self.direction))
            .temperature(self.settings.temperature)
            .num_predict(self.settings.max_output_tokens)
    }
}

#[async_trait]
impl Translator for OllamaTranslator {
    async fn translate(&self, text: &str, direction: Direction) -> Result<String, ProviderError> {
        if direction != self.direction {
            return Err(ProviderError::UnsupportedDirection(format!(
                "model {} only serves {}",
                self.model, self.direction
            )));
        }

        let response = self.client.generate(&self.build_request(text)).await?;
        debug!(
            "Ollama {} ({}): {} prompt / {} completion tokens",
            self.model,
            direction,
            response.prompt_eval_count.unwrap_or(0),
            response.eval_count.unwrap_or(0)
        );
        Ok(response.response.trim().to_string())
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        self.client.version().await.map(|_| ())
    }

    fn max_input_chars(&self) -> Option<usize> {
        self.settings.max_input_chars
    }

    fn name(&self) -> &str {
        "ollama"
    }
}
