/*!
 * Mock translation backend for testing.
 *
 * This module provides a scripted backend that simulates different behaviors:
 * - `MockProvider::working()` - Always succeeds with tagged text
 * - `MockProvider::uppercase()` - Returns the input upper-cased
 * - `MockProvider::intermittent(n)` - Fails every n-th request
 * - `MockProvider::fail_on(n)` - Fails only the n-th request
 * - `MockProvider::failing()` - Always fails with an error
 */

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::errors::ProviderError;
use crate::language_utils::Direction;
use crate::providers::Translator;

/// Behavior mode for the mock provider
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds with `[TRANSLATED to <lang>] <text>`
    Working,
    /// Always succeeds with the input upper-cased
    Uppercase,
    /// Fails every Nth request
    Intermittent { fail_every: usize },
    /// Fails the Nth request only (1-based)
    FailOn { request: usize },
    /// Always fails with an error
    Failing,
    /// Simulates slow response
    Slow { delay_ms: u64 },
}

/// Mock provider for testing translation behavior
#[derive(Debug)]
pub struct MockProvider {
    behavior: MockBehavior,
    /// Request counter, shared between clones
    request_count: Arc<AtomicUsize>,
    /// Every request received, in order
    requests: Arc<Mutex<Vec<(String, Direction)>>>,
    custom_response: Option<fn(&str, Direction) -> String>,
    max_input_chars: Option<usize>,
}

impl MockProvider {
    /// Create a new mock provider with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            request_count: Arc::new(AtomicUsize::new(0)),
            requests: Arc::new(Mutex::new(Vec::new())),
            custom_response: None,
            max_input_chars: None,
        }
    }

    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    pub fn uppercase() -> Self {
        Self::new(MockBehavior::Uppercase)
    }

    pub fn intermittent(fail_every: usize) -> Self {
        Self::new(MockBehavior::Intermittent { fail_every })
    }

    pub fn fail_on(request: usize) -> Self {
        Self::new(MockBehavior::FailOn { request })
    }

    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Set a custom response generator for successful requests
    pub fn with_custom_response(mut self, generator: fn(&str, Direction) -> String) -> Self {
        self.custom_response = Some(generator);
        self
    }

    /// Declare an input limit
    pub fn with_max_input_chars(mut self, max_input_chars: usize) -> Self {
        self.max_input_chars = Some(max_input_chars);
        self
    }

    /// Number of requests received so far
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Texts and directions of all requests received so far
    pub fn requests(&self) -> Vec<(String, Direction)> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }

    fn respond(&self, text: &str, direction: Direction) -> String {
        if let Some(generator) = self.custom_response {
            return generator(text, direction);
        }
        match self.behavior {
            MockBehavior::Uppercase => text.to_uppercase(),
            _ => format!("[TRANSLATED to {}] {}", direction.target().code(), text),
        }
    }
}

impl Clone for MockProvider {
    fn clone(&self) -> Self {
        Self {
            behavior: self.behavior,
            request_count: Arc::clone(&self.request_count),
            requests: Arc::clone(&self.requests),
            custom_response: self.custom_response,
            max_input_chars: self.max_input_chars,
        }
    }
}

#[async_trait]
impl Translator for MockProvider {
    async fn translate(&self, text: &str, direction: Direction) -> Result<String, ProviderError> {
        let number = self.request_count.fetch_add(1, Ordering::SeqCst) + 1;
        if let Ok(mut requests) = self.requests.lock() {
            requests.push((text.to_string(), direction));
        }

        match self.behavior {
            MockBehavior::Intermittent { fail_every } if fail_every > 0 && number % fail_every == 0 => {
                Err(ProviderError::ApiError {
                    status_code: 503,
                    message: format!("Simulated intermittent failure (request #{})", number),
                })
            }
            MockBehavior::FailOn { request } if request == number => Err(ProviderError::ApiError {
                status_code: 500,
                message: format!("Simulated failure on request #{}", number),
            }),
            MockBehavior::Failing => Err(ProviderError::ApiError {
                status_code: 500,
                message: "Simulated provider failure".to_string(),
            }),
            MockBehavior::Slow { delay_ms } => {
                tokio::time::sleep(tokio::time::Duration::from_millis(delay_ms)).await;
                Ok(self.respond(text, direction))
            }
            _ => Ok(self.respond(text, direction)),
        }
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        match self.behavior {
            MockBehavior::Failing => Err(ProviderError::ConnectionError("Simulated connection failure".to_string())),
            _ => Ok(()),
        }
    }

    fn max_input_chars(&self) -> Option<usize> {
        self.max_input_chars
    }

    fn name(&self) -> &str {
        "mock"
    }
}
