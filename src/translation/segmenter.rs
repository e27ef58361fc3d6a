/*!
 * Sentence-aware chunking of input text.
 *
 * Text is split on the period character and sentences are packed greedily into
 * chunks below a character limit, so that no request sent to a backend cuts a
 * sentence in half. A sentence longer than the limit becomes its own chunk.
 */

/// Suffix appended after every packed sentence
pub const SENTENCE_TERMINATOR: &str = ". ";

/// Default chunk limit, in characters
pub const DEFAULT_MAX_CHUNK_CHARS: usize = 400;

const TERMINATOR_LEN: usize = 2;

/// Split `text` into sentence-aligned chunks shorter than `max_len` characters
///
/// Line breaks are flattened to spaces first, so a sentence may span lines.
/// Lengths are counted in characters, not bytes.
pub fn split_text(text: &str, max_len: usize) -> Vec<String> {
    let normalized = text.replace(['\r', '\n'], " ");

    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for sentence in normalized.split('.').map(str::trim).filter(|s| !s.is_empty()) {
        let sentence_len = sentence.chars().count();

        if current_len + sentence_len + TERMINATOR_LEN < max_len {
            current.push_str(sentence);
            current.push_str(SENTENCE_TERMINATOR);
            current_len += sentence_len + TERMINATOR_LEN;
        } else {
            if !current.is_empty() {
                chunks.push(current.trim().to_string());
            }
            current = format!("{}{}", sentence, SENTENCE_TERMINATOR);
            current_len = sentence_len + TERMINATOR_LEN;
        }
    }

    if !current.is_empty() {
        chunks.push(current.trim().to_string());
    }

    chunks
}

/// A sentence-aligned slice of the input, the unit of translation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// 1-based position in the document
    pub index: usize,
    pub text: String,
    /// Length in characters
    pub char_len: usize,
}

/// Chunker configured with a maximum chunk length
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segmenter {
    max_len: usize,
}

impl Segmenter {
    pub fn new(max_len: usize) -> Self {
        Self { max_len }
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /// Segment a document into indexed chunks
    pub fn segment(&self, text: &str) -> Vec<Chunk> {
        split_text(text, self.max_len)
            .into_iter()
            .enumerate()
            .map(|(i, text)| Chunk {
                index: i + 1,
                char_len: text.chars().count(),
                text,
            })
            .collect()
    }
}

impl Default for Segmenter {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CHUNK_CHARS)
    }
}
