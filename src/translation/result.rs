/*!
 * Per-chunk outcomes and the assembled translation result.
 */

use std::fmt;

/// Placeholder emitted for a chunk whose language pair has no backend
pub const UNSUPPORTED_MARKER: &str = "[not supported]";

/// Result of translating one chunk
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChunkOutcome {
    /// Text returned by the backend
    Translated(String),
    /// The language pair has no translation direction
    Unsupported,
    /// The backend failed; holds the failure description
    Failed(String),
}

impl ChunkOutcome {
    pub fn is_translated(&self) -> bool {
        matches!(self, Self::Translated(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported)
    }
}

impl fmt::Display for ChunkOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Translated(text) => f.write_str(text),
            Self::Unsupported => f.write_str(UNSUPPORTED_MARKER),
            Self::Failed(description) => write!(f, "[error: {}]", description),
        }
    }
}

/// Ordered outcomes of one translation request, one per chunk
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationResult {
    outcomes: Vec<ChunkOutcome>,
}

impl TranslationResult {
    pub fn new(outcomes: Vec<ChunkOutcome>) -> Self {
        Self { outcomes }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn outcomes(&self) -> &[ChunkOutcome] {
        &self.outcomes
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn translated_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_translated()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_failed()).count()
    }

    pub fn unsupported_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_unsupported()).count()
    }

    /// True when every chunk was translated
    pub fn is_complete(&self) -> bool {
        self.outcomes.iter().all(ChunkOutcome::is_translated)
    }

    /// Newline-joined text of all outcomes, markers included
    pub fn text(&self) -> String {
        self.outcomes
            .iter()
            .map(|o| o.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// One-line summary for logging
    pub fn summary(&self) -> String {
        format!(
            "{} chunk(s): {} translated, {} failed, {} unsupported",
            self.len(),
            self.translated_count(),
            self.failed_count(),
            self.unsupported_count()
        )
    }
}

impl fmt::Display for TranslationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}

impl FromIterator<ChunkOutcome> for TranslationResult {
    fn from_iter<I: IntoIterator<Item = ChunkOutcome>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
