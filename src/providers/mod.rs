/*!
 * Translation backends.
 *
 * Every backend implements the `Translator` trait so the orchestrator can use
 * them interchangeably:
 * - `ollama`: local Ollama server (`/api/generate`)
 * - `openai`: any OpenAI-compatible chat-completions server
 * - `router`: dispatches each direction to its own backend
 * - `mock`: scripted backend for tests
 */

use anyhow::Result;
use async_trait::async_trait;
use log::warn;
use std::fmt::Debug;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::app_config::{TranslationConfig, TranslationProvider};
use crate::errors::ProviderError;
use crate::language_utils::Direction;

pub mod mock;
pub mod ollama;
pub mod openai;
pub mod router;

pub use self::router::DirectionRouter;

/// Common trait for all translation backends
///
/// A backend turns one chunk of text into its translation for a given
/// direction, or fails with a `ProviderError`.
#[async_trait]
pub trait Translator: Send + Sync + Debug {
    /// Translate `text` in the given direction
    async fn translate(&self, text: &str, direction: Direction) -> Result<String, ProviderError>;

    /// Test the connection to the backend
    async fn test_connection(&self) -> Result<(), ProviderError>;

    /// Longest input, in characters, the backend accepts safely
    fn max_input_chars(&self) -> Option<usize> {
        None
    }

    /// Short name used in logs
    fn name(&self) -> &str;
}

/// Generation settings shared by the HTTP backends
#[derive(Debug, Clone)]
pub struct BackendSettings {
    /// Template with `{source_language}` and `{target_language}` placeholders
    pub system_prompt: String,
    pub temperature: f32,
    pub max_output_tokens: u32,
    pub max_input_chars: Option<usize>,
}

impl BackendSettings {
    pub fn from_config(config: &TranslationConfig) -> Self {
        Self {
            system_prompt: config.common.system_prompt.clone(),
            temperature: config.common.temperature,
            max_output_tokens: config.common.max_output_tokens,
            max_input_chars: Some(config.common.max_chunk_chars),
        }
    }

    /// Fill the system prompt template for a direction
    pub fn system_prompt_for(&self, direction: Direction) -> String {
        self.system_prompt
            .replace("{source_language}", direction.source().name())
            .replace("{target_language}", direction.target().name())
    }
}

/// Client-side pacing of requests to a requests-per-minute budget
#[derive(Debug)]
pub struct RateLimiter {
    interval: Option<Duration>,
    last_request: Mutex<Option<Instant>>,
}

impl RateLimiter {
    /// `None` or `Some(0)` disables pacing
    pub fn new(requests_per_minute: Option<u32>) -> Self {
        let interval = requests_per_minute
            .filter(|rpm| *rpm > 0)
            .map(|rpm| Duration::from_millis(60_000 / rpm as u64));
        Self {
            interval,
            last_request: Mutex::new(None),
        }
    }

    /// Wait until the next request is allowed
    pub async fn acquire(&self) {
        let Some(interval) = self.interval else {
            return;
        };
        let mut last = self.last_request.lock().await;
        if let Some(previous) = *last {
            let ready_at = previous + interval;
            if ready_at > Instant::now() {
                tokio::time::sleep_until(ready_at).await;
            }
        }
        *last = Some(Instant::now());
    }
}

/// Retry policy for HTTP backends
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub backoff_base_ms: u64,
}

impl RetryPolicy {
    /// Delay before retry number `attempt` (1-based), doubling each time and saturating
    pub fn backoff_ms(&self, attempt: u32) -> u64 {
        let factor = 1u64.checked_shl(attempt.saturating_sub(1)).unwrap_or(u64::MAX);
        self.backoff_base_ms.saturating_mul(factor)
    }

    /// Run `operation`, retrying retryable errors with exponential backoff
    pub async fn run<T, F, Fut>(&self, label: &str, mut operation: F) -> Result<T, ProviderError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, ProviderError>>,
    {
        let mut attempt = 0;
        loop {
            match operation().await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_retryable() && attempt < self.max_retries => {
                    attempt += 1;
                    let backoff_ms = self.backoff_ms(attempt);
                    warn!(
                        "{} request failed: {} - retrying in {}ms (attempt {}/{})",
                        label, e, backoff_ms, attempt + 1, self.max_retries.saturating_add(1)
                    );
                    tokio::time::sleep(Duration::from_millis(backoff_ms)).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

/// Build the configured backend, one model per direction behind a router
pub fn build_translator(config: &TranslationConfig) -> Result<Arc<dyn Translator>> {
    let settings = BackendSettings::from_config(config);
    let retry = RetryPolicy {
        max_retries: config.common.retry_count,
        backoff_base_ms: config.common.retry_backoff_ms,
    };
    let timeout = Duration::from_secs(config.get_timeout_secs());
    let rate_limit = config.get_rate_limit();

    let router = match config.provider {
        TranslationProvider::Ollama => {
            let client = Arc::new(ollama::Ollama::new_with_config(
                &config.get_endpoint(),
                timeout,
                retry,
                rate_limit,
            )?);
            let backend = |direction: Direction| -> Arc<dyn Translator> {
                Arc::new(ollama::OllamaTranslator::new(
                    Arc::clone(&client),
                    config.get_model(direction),
                    direction,
                    settings.clone(),
                ))
            };
            DirectionRouter::new(
                backend(Direction::ArabicToEnglish),
                backend(Direction::EnglishToArabic),
            )
        }
        TranslationProvider::OpenAI => {
            let client = Arc::new(openai::OpenAI::new_with_config(
                config.get_api_key(),
                &config.get_endpoint(),
                timeout,
                retry,
                rate_limit,
            )?);
            let backend = |direction: Direction| -> Arc<dyn Translator> {
                Arc::new(openai::OpenAITranslator::new(
                    Arc::clone(&client),
                    config.get_model(direction),
                    direction,
                    settings.clone(),
                ))
            };
            DirectionRouter::new(
                backend(Direction::ArabicToEnglish),
                backend(Direction::EnglishToArabic),
            )
        }
    };

    Ok(Arc::new(router))
}
