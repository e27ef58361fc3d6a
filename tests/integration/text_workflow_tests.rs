/*!
 * Integration tests for text translation through the controller
 */

use std::fs;
use anyhow::Result;

use tarjama::errors::AppError;
use tarjama::language_utils::{Direction, Language, LanguagePair};
use tarjama::providers::mock::MockProvider;
use tarjama::translation::UNSUPPORTED_MARKER;
use crate::common;

/// Every chunk goes out once and comes back in order, joined by newlines
#[tokio::test]
async fn test_translate_text_withLongArabicText_shouldTranslateEveryChunkInOrder() {
    let mock = MockProvider::uppercase();
    let controller = common::mock_controller(&mock, 40);
    let text = common::ARABIC_SAMPLE.repeat(4);

    let translated = controller
        .translate_text(&text, LanguagePair::new(Language::Arabic, Language::English))
        .await;

    let requests = mock.requests();
    assert!(requests.len() > 1);
    assert!(requests.iter().all(|(_, d)| *d == Direction::ArabicToEnglish));
    assert!(requests.iter().all(|(chunk, _)| chunk.chars().count() < 40));

    let expected: Vec<String> = requests.iter().map(|(chunk, _)| chunk.to_uppercase()).collect();
    assert_eq!(translated, expected.join("\n"));
}

#[tokio::test]
async fn test_translate_text_withIdenticalLanguages_shouldOnlyEmitMarkers() {
    let mock = MockProvider::working();
    let controller = common::mock_controller(&mock, 400);

    let translated = controller
        .translate_text(common::ARABIC_SAMPLE, LanguagePair::new(Language::Arabic, Language::Arabic))
        .await;

    assert_eq!(translated, UNSUPPORTED_MARKER);
    assert_eq!(mock.request_count(), 0);
}

#[tokio::test]
async fn test_translate_text_withFlakyBackend_shouldKeepLineCount() {
    let mock = MockProvider::intermittent(3);
    let controller = common::mock_controller(&mock, 20);
    let text = common::ENGLISH_SAMPLE.repeat(3);

    let translated = controller
        .translate_text(&text, LanguagePair::new(Language::English, Language::Arabic))
        .await;
    let lines: Vec<&str> = translated.lines().collect();

    assert_eq!(lines.len(), mock.request_count());
    for (i, line) in lines.iter().enumerate() {
        if (i + 1) % 3 == 0 {
            assert!(line.starts_with("[error: "), "line {} should be a marker: {}", i + 1, line);
        } else {
            assert!(line.starts_with("[TRANSLATED to ar] "), "line {} should be translated: {}", i + 1, line);
        }
    }
}

#[tokio::test]
async fn test_translate_and_save_withExplicitOutput_shouldWritePreview() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let output = temp_dir.path().join("out").join("translation.txt");
    let controller = common::mock_controller(&MockProvider::working(), 400);

    let saved = controller
        .translate_and_save("Hello.", LanguagePair::new(Language::English, Language::Arabic), Some(&output))
        .await?
        .expect("translation should be saved");

    assert_eq!(saved.output_path, output);
    assert_eq!(saved.preview, "[TRANSLATED to ar] Hello.");
    assert_eq!(fs::read_to_string(&output)?, saved.preview);
    Ok(())
}

#[tokio::test]
async fn test_translate_and_save_withBlankText_shouldWriteNothing() -> Result<()> {
    let mock = MockProvider::working();
    let controller = common::mock_controller(&mock, 400);

    let saved = controller
        .translate_and_save("  \n", LanguagePair::new(Language::Arabic, Language::English), None)
        .await?;

    assert!(saved.is_none());
    assert_eq!(mock.request_count(), 0);
    Ok(())
}

#[tokio::test]
async fn test_check_connection_withFailingBackend_shouldFail() {
    let ok = common::mock_controller(&MockProvider::working(), 400);
    let failing = common::mock_controller(&MockProvider::failing(), 400);

    assert!(ok.check_connection().await.is_ok());
    let error = failing.check_connection().await.expect_err("failing backend must fail");
    assert!(matches!(error.downcast_ref::<AppError>(), Some(AppError::Provider(_))));
}
