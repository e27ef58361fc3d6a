/*!
 * Tests for file utility functions
 */

use std::fs;
use anyhow::Result;
use tarjama::errors::AppError;
use tarjama::file_utils::{FileManager, TEMP_FILE_PREFIX};
use crate::common;

/// Test that file_exists returns true for existing files
#[test]
fn test_file_exists_withExistingFile_shouldReturnTrue() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let test_file = common::create_test_file(temp_dir.path(), "exists.txt", "content")?;

    assert!(FileManager::file_exists(&test_file));
    Ok(())
}

/// Test that file_exists returns false for non-existent files and directories
#[test]
fn test_file_exists_withMissingFileOrDirectory_shouldReturnFalse() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    assert!(!FileManager::file_exists(temp_dir.path().join("missing.txt")));
    assert!(!FileManager::file_exists(temp_dir.path()));
    Ok(())
}

#[test]
fn test_read_text_withArabicContent_shouldReturnItUnchanged() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "ar.txt", common::ARABIC_SAMPLE)?;

    let content = FileManager::read_text(&path)?;
    assert_eq!(content, common::ARABIC_SAMPLE);
    Ok(())
}

#[test]
fn test_read_text_withMissingFile_shouldReturnFileError() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let result = FileManager::read_text(temp_dir.path().join("nope.txt"));

    match result {
        Err(AppError::File(message)) => assert!(message.contains("not found")),
        other => panic!("expected a file error, got {:?}", other),
    }
    Ok(())
}

#[test]
fn test_read_text_withInvalidUtf8_shouldReturnFileError() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("binary.txt");
    fs::write(&path, [0xff, 0xfe, 0x00, 0xc3])?;

    match FileManager::read_text(&path) {
        Err(AppError::File(message)) => assert!(message.contains("UTF-8")),
        other => panic!("expected a file error, got {:?}", other),
    }
    Ok(())
}

#[test]
fn test_write_to_file_withNestedPath_shouldCreateParents() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("a").join("b").join("out.txt");

    FileManager::write_to_file(&path, "translated")?;
    assert_eq!(fs::read_to_string(&path)?, "translated");
    Ok(())
}

#[test]
fn test_write_temp_file_in_withContent_shouldKeepUniqueTxtFiles() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;

    let first = FileManager::write_temp_file_in(temp_dir.path(), "first")?;
    let second = FileManager::write_temp_file_in(temp_dir.path(), "second")?;

    assert_ne!(first, second);
    for (path, expected) in [(&first, "first"), (&second, "second")] {
        assert!(path.exists());
        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("txt"));
        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
        assert!(name.starts_with(TEMP_FILE_PREFIX));
        assert_eq!(fs::read_to_string(path)?, expected);
    }
    Ok(())
}

#[test]
fn test_write_temp_file_withUnicode_shouldRoundTripUtf8() -> Result<()> {
    let path = FileManager::write_temp_file(common::ARABIC_SAMPLE)?;
    let content = fs::read_to_string(&path)?;
    fs::remove_file(&path)?;

    assert_eq!(content, common::ARABIC_SAMPLE);
    Ok(())
}
