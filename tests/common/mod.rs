/*!
 * Common test utilities for the tarjama test suite
 */

use std::path::{Path, PathBuf};
use std::fs;
use std::sync::Arc;
use anyhow::Result;
use tempfile::TempDir;

use tarjama::app_config::Config;
use tarjama::providers::mock::MockProvider;
use tarjama::{Controller, TranslationService};

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Short Arabic text of three sentences
pub const ARABIC_SAMPLE: &str = "مرحبا بالعالم. كيف حالك اليوم. أتمنى لك يوما سعيدا.";

/// Short English text of three sentences
pub const ENGLISH_SAMPLE: &str = "Hello world. How are you today. I wish you a nice day.";

/// Creates a controller around the given mock, without a progress bar
pub fn mock_controller(mock: &MockProvider, max_chunk_chars: usize) -> Controller {
    let service = TranslationService::new(Arc::new(mock.clone()), max_chunk_chars);
    Controller::with_service(Config::default(), service).show_progress(false)
}
