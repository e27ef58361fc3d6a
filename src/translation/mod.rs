/*!
 * Translation of documents through a pluggable backend.
 *
 * - `segmenter`: sentence-aware chunking under a character limit
 * - `core`: the orchestrator and `TranslationService`
 * - `result`: per-chunk outcomes and the joined result
 */

// Re-export main types for easier usage
pub use self::core::{TranslationService, translate, translate_chunks};
pub use self::result::{ChunkOutcome, TranslationResult, UNSUPPORTED_MARKER};
pub use self::segmenter::{Chunk, DEFAULT_MAX_CHUNK_CHARS, Segmenter, split_text};

// Submodules
pub mod core;
pub mod result;
pub mod segmenter;
