/*!
 * # tarjama - Arabic <-> English translator
 *
 * A Rust library and CLI that translates text and text files between Arabic
 * and English through a machine-translation backend.
 *
 * ## Features
 *
 * - Sentence-aware chunking that keeps every request under the model's input limit
 * - One backend model per direction, selected by the language pair
 * - Per-chunk failure isolation: a failed chunk becomes an `[error: ...]` marker
 * - File mode writing the translation to a fresh temporary file
 * - Backends:
 *   - Ollama (local LLM)
 *   - Any OpenAI-compatible chat-completions server
 *
 * ## Architecture
 *
 * - `app_config`: Configuration management
 * - `translation`: Segmenter, orchestrator and results:
 *   - `translation::segmenter`: Greedy sentence packing
 *   - `translation::core`: `TranslationService` and the orchestrator
 *   - `translation::result`: Per-chunk outcomes
 * - `providers`: The `Translator` trait and its backends
 * - `file_utils`: File system operations
 * - `app_controller`: Text and file workflows used by the CLI
 * - `language_utils`: Languages, pairs and directions
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod language_utils;
pub mod providers;
pub mod translation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{Controller, FileTranslation};
pub use errors::{AppError, ProviderError};
pub use language_utils::{Direction, Language, LanguagePair};
pub use providers::Translator;
pub use translation::{ChunkOutcome, TranslationResult, TranslationService, split_text};
