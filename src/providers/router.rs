use async_trait::async_trait;
use std::sync::Arc;

use crate::errors::ProviderError;
use crate::language_utils::Direction;
use crate::providers::Translator;

/// Routes each translation direction to its own backend
///
/// Arabic to English and English to Arabic are served by separate models, so
/// the router owns one backend per direction and picks by the chunk's direction.
#[derive(Debug, Clone)]
pub struct DirectionRouter {
    arabic_to_english: Arc<dyn Translator>,
    english_to_arabic: Arc<dyn Translator>,
}

impl DirectionRouter {
    pub fn new(arabic_to_english: Arc<dyn Translator>, english_to_arabic: Arc<dyn Translator>) -> Self {
        Self {
            arabic_to_english,
            english_to_arabic,
        }
    }

    /// Use the same backend for both directions
    pub fn single(backend: Arc<dyn Translator>) -> Self {
        Self::new(Arc::clone(&backend), backend)
    }

    pub fn backend(&self, direction: Direction) -> &Arc<dyn Translator> {
        match direction {
            Direction::ArabicToEnglish => &self.arabic_to_english,
            Direction::EnglishToArabic => &self.english_to_arabic,
        }
    }
}

#[async_trait]
impl Translator for DirectionRouter {
    async fn translate(&self, text: &str, direction: Direction) -> Result<String, ProviderError> {
        self.backend(direction).translate(text, direction).await
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        for direction in Direction::ALL {
            self.backend(direction).test_connection().await?;
        }
        Ok(())
    }

    /// The tighter of the two backends' limits
    fn max_input_chars(&self) -> Option<usize> {
        let limits = Direction::ALL.map(|d| self.backend(d).max_input_chars());
        limits.into_iter().flatten().min()
    }

    fn name(&self) -> &str {
        self.arabic_to_english.name()
    }
}
