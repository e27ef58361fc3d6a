use anyhow::{Context, Result};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::Builder;

use crate::errors::AppError;

// @module: File and directory utilities

/// Prefix of the temporary files translations are saved to
pub const TEMP_FILE_PREFIX: &str = "tarjama-";

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().is_file()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)?;
        }
        Ok(())
    }

    /// Read a whole UTF-8 text file
    ///
    /// Missing files, unreadable files and invalid UTF-8 all map to `AppError::File`.
    pub fn read_text<P: AsRef<Path>>(path: P) -> Result<String, AppError> {
        let path = path.as_ref();
        fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => AppError::File(format!("File not found: {:?}", path)),
            ErrorKind::InvalidData => AppError::File(format!("File is not valid UTF-8: {:?}", path)),
            _ => AppError::File(format!("Failed to read file {:?}: {}", path, e)),
        })
    }

    /// Write a string to a file
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                Self::ensure_dir(parent)?;
            }
        }

        fs::write(&path, content)
            .with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))
    }

    /// Write `content` to a new, uniquely named `.txt` file in the system temp directory
    ///
    /// The file is kept after the process exits.
    pub fn write_temp_file(content: &str) -> Result<PathBuf> {
        Self::write_temp_file_in(std::env::temp_dir(), content)
    }

    /// Same as `write_temp_file`, inside `dir`
    pub fn write_temp_file_in<P: AsRef<Path>>(dir: P, content: &str) -> Result<PathBuf> {
        let mut file = Builder::new()
            .prefix(TEMP_FILE_PREFIX)
            .suffix(".txt")
            .tempfile_in(dir.as_ref())
            .with_context(|| format!("Failed to create temporary file in {:?}", dir.as_ref()))?;

        file.write_all(content.as_bytes())
            .context("Failed to write translation to temporary file")?;
        file.flush()?;

        let (_, path) = file.keep().context("Failed to keep temporary file")?;
        Ok(path)
    }
}
