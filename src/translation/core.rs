/*!
 * Core translation service implementation.
 *
 * The orchestrator segments a document, sends each chunk to the translator in
 * order and records one outcome per chunk. A chunk that cannot be translated
 * becomes a marker in the output; it never aborts the rest of the document.
 */

use anyhow::Result;
use log::{debug, warn};
use std::sync::Arc;

use super::result::{ChunkOutcome, TranslationResult};
use super::segmenter::{Chunk, Segmenter};
use crate::app_config::TranslationConfig;
use crate::errors::ProviderError;
use crate::language_utils::{Language, LanguagePair};
use crate::providers::{self, Translator};

/// Translate one document with the given translator
///
/// Empty or whitespace-only text yields an empty result without calling the
/// translator.
pub async fn translate(
    text: &str,
    source: Language,
    target: Language,
    max_len: usize,
    translator: &dyn Translator,
) -> TranslationResult {
    if text.trim().is_empty() {
        return TranslationResult::empty();
    }
    let chunks = Segmenter::new(max_len).segment(text);
    translate_chunks(&chunks, LanguagePair::new(source, target), translator, |_, _| {}).await
}

/// Translate pre-segmented chunks strictly in order
///
/// `on_chunk` is called after each chunk with its outcome.
pub async fn translate_chunks<F>(
    chunks: &[Chunk],
    pair: LanguagePair,
    translator: &dyn Translator,
    mut on_chunk: F,
) -> TranslationResult
where
    F: FnMut(&Chunk, &ChunkOutcome),
{
    let direction = pair.direction();
    if direction.is_none() {
        warn!("Language pair {} is not supported; {} chunk(s) marked", pair, chunks.len());
    }

    let mut outcomes = Vec::with_capacity(chunks.len());
    for chunk in chunks {
        let outcome = match direction {
            None => ChunkOutcome::Unsupported,
            Some(direction) => {
                debug!("Translating chunk {}/{} ({} chars)", chunk.index, chunks.len(), chunk.char_len);
                match translator.translate(&chunk.text, direction).await {
                    Ok(translated) => ChunkOutcome::Translated(single_line(&translated)),
                    Err(e) => {
                        warn!("Chunk {} failed with {}: {}", chunk.index, translator.name(), e);
                        ChunkOutcome::Failed(single_line(&e.to_string()))
                    }
                }
            }
        };
        on_chunk(chunk, &outcome);
        outcomes.push(outcome);
    }

    TranslationResult::new(outcomes)
}

/// Flatten line breaks so each chunk renders as exactly one output line
fn single_line(text: &str) -> String {
    if text.contains(['\r', '\n']) {
        text.split(['\r', '\n'])
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    } else {
        text.to_string()
    }
}

/// Main translation service: a translator plus the segmenter sized for it
#[derive(Debug, Clone)]
pub struct TranslationService {
    translator: Arc<dyn Translator>,
    segmenter: Segmenter,
}

impl TranslationService {
    /// Create a service; the chunk limit is lowered to the translator's own limit if smaller
    pub fn new(translator: Arc<dyn Translator>, max_chunk_chars: usize) -> Self {
        let max_len = translator
            .max_input_chars()
            .map_or(max_chunk_chars, |limit| limit.min(max_chunk_chars));
        Self {
            translator,
            segmenter: Segmenter::new(max_len),
        }
    }

    /// Create a service backed by the configured provider
    pub fn from_config(config: &TranslationConfig) -> Result<Self> {
        let translator = providers::build_translator(config)?;
        Ok(Self::new(translator, config.common.max_chunk_chars))
    }

    pub fn segmenter(&self) -> &Segmenter {
        &self.segmenter
    }

    /// Split text into the chunks this service would translate
    pub fn segment(&self, text: &str) -> Vec<Chunk> {
        self.segmenter.segment(text)
    }

    /// Translate a document
    pub async fn translate(&self, text: &str, pair: LanguagePair) -> TranslationResult {
        self.translate_with_progress(text, pair, |_, _| {}).await
    }

    /// Translate a document, reporting each finished chunk
    pub async fn translate_with_progress<F>(&self, text: &str, pair: LanguagePair, on_chunk: F) -> TranslationResult
    where
        F: FnMut(&Chunk, &ChunkOutcome),
    {
        if text.trim().is_empty() {
            return TranslationResult::empty();
        }
        let chunks = self.segment(text);
        self.translate_segments(&chunks, pair, on_chunk).await
    }

    /// Translate chunks already produced by `segment`
    pub async fn translate_segments<F>(&self, chunks: &[Chunk], pair: LanguagePair, on_chunk: F) -> TranslationResult
    where
        F: FnMut(&Chunk, &ChunkOutcome),
    {
        translate_chunks(chunks, pair, self.translator.as_ref(), on_chunk).await
    }

    /// Test the connection to the backend
    pub async fn test_connection(&self) -> Result<(), ProviderError> {
        self.translator.test_connection().await
    }
}
