use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::app_config::Config;
use crate::errors::AppError;
use crate::file_utils::FileManager;
use crate::language_utils::LanguagePair;
use crate::translation::{TranslationResult, TranslationService};

// @module: Application controller for text and file translation

/// A translation persisted to disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileTranslation {
    /// Where the translated text was written
    pub output_path: PathBuf,
    /// The same text, for display
    pub preview: String,
}

/// Main application controller
pub struct Controller {
    // @field: App configuration
    config: Config,
    service: TranslationService,
    show_progress: bool,
}

impl Controller {
    // @method: Create a new controller with the backend described by the configuration
    pub fn with_config(config: Config) -> Result<Self> {
        let service = TranslationService::from_config(&config.translation)
            .context("Failed to create translation backend")?;
        Ok(Self::with_service(config, service))
    }

    /// Create a controller around an already built service
    pub fn with_service(config: Config, service: TranslationService) -> Self {
        Self {
            config,
            service,
            show_progress: true,
        }
    }

    /// Enable or disable the progress bar
    pub fn show_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn service(&self) -> &TranslationService {
        &self.service
    }

    /// The language pair from the configuration
    pub fn language_pair(&self) -> Result<LanguagePair> {
        self.config.language_pair()
    }

    /// Translate text and return the newline-joined result
    pub async fn translate_text(&self, text: &str, pair: LanguagePair) -> String {
        self.run_translation(text, pair).await.text()
    }

    /// Translate text and persist the result
    ///
    /// Writes to `output` when given, otherwise to a fresh temporary file.
    /// Returns `None` for empty input, without writing anything.
    pub async fn translate_and_save(
        &self,
        text: &str,
        pair: LanguagePair,
        output: Option<&Path>,
    ) -> Result<Option<FileTranslation>> {
        if text.trim().is_empty() {
            return Ok(None);
        }

        let translated = self.run_translation(text, pair).await.text();
        let output_path = match output {
            Some(path) => {
                FileManager::write_to_file(path, &translated)?;
                path.to_path_buf()
            }
            None => FileManager::write_temp_file(&translated)?,
        };
        info!("Saved translation to {:?}", output_path);

        Ok(Some(FileTranslation {
            output_path,
            preview: translated,
        }))
    }

    /// Translate a UTF-8 text file
    ///
    /// No input selected yields `None`. A missing, unreadable or non-UTF-8 file is an error.
    pub async fn translate_file(
        &self,
        input: Option<&Path>,
        pair: LanguagePair,
        output: Option<&Path>,
    ) -> Result<Option<FileTranslation>> {
        let Some(input) = input else {
            warn!("No input file selected");
            return Ok(None);
        };

        let text = FileManager::read_text(input)?;
        info!("Translating {:?} ({} characters, {})", input, text.chars().count(), pair);
        self.translate_and_save(&text, pair, output).await
    }

    /// Check that both direction backends respond
    pub async fn check_connection(&self) -> Result<()> {
        self.service
            .test_connection()
            .await
            .map_err(AppError::from)
            .with_context(|| format!("Failed to reach {} backend", self.config.translation.provider.display_name()))
    }

    async fn run_translation(&self, text: &str, pair: LanguagePair) -> TranslationResult {
        let start_time = Instant::now();
        let chunks = self.service.segment(text);
        let chunk_count = chunks.len();

        let progress_bar = if self.show_progress && chunk_count > 1 {
            Self::create_progress_bar(chunk_count as u64)
        } else {
            ProgressBar::hidden()
        };

        let result = self
            .service
            .translate_segments(&chunks, pair, |_, outcome| {
                if outcome.is_failed() {
                    progress_bar.set_message("with errors");
                }
                progress_bar.inc(1);
            })
            .await;
        progress_bar.finish_and_clear();

        if !result.is_empty() {
            info!("{} in {:.1}s", result.summary(), start_time.elapsed().as_secs_f64());
        }
        if result.failed_count() > 0 {
            warn!("{} chunk(s) could not be translated and were marked in the output", result.failed_count());
        }

        result
    }

    fn create_progress_bar(total: u64) -> ProgressBar {
        let progress_bar = ProgressBar::new(total);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} chunks {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(style.progress_chars("█▓▒░"));
        progress_bar
    }
}
