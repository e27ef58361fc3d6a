/*!
 * Tests for error types and conversions
 */

use tarjama::errors::{AppError, ProviderError};

#[test]
fn test_providerError_requestFailed_shouldDisplayCorrectly() {
    let error = ProviderError::RequestFailed("Connection reset".to_string());
    let display = format!("{}", error);
    assert!(display.contains("API request failed"));
    assert!(display.contains("Connection reset"));
}

#[test]
fn test_providerError_apiError_shouldDisplayStatusAndMessage() {
    let error = ProviderError::ApiError {
        status_code: 503,
        message: "Model is loading".to_string(),
    };
    let display = format!("{}", error);
    assert!(display.contains("503"));
    assert!(display.contains("Model is loading"));
}

#[test]
fn test_providerError_fromStatus_shouldMapKnownCodes() {
    assert!(matches!(
        ProviderError::from_status(401, "bad key".to_string()),
        ProviderError::AuthenticationError(_)
    ));
    assert!(matches!(
        ProviderError::from_status(403, "forbidden".to_string()),
        ProviderError::AuthenticationError(_)
    ));
    assert!(matches!(
        ProviderError::from_status(429, "slow down".to_string()),
        ProviderError::RateLimitExceeded(_)
    ));
    assert!(matches!(
        ProviderError::from_status(404, "no such model".to_string()),
        ProviderError::ApiError { status_code: 404, .. }
    ));
}

#[test]
fn test_providerError_isRetryable_shouldOnlyRetryTransientFailures() {
    assert!(ProviderError::ConnectionError("timeout".to_string()).is_retryable());
    assert!(ProviderError::RateLimitExceeded("429".to_string()).is_retryable());
    assert!(ProviderError::ApiError { status_code: 502, message: String::new() }.is_retryable());

    assert!(!ProviderError::ApiError { status_code: 400, message: String::new() }.is_retryable());
    assert!(!ProviderError::AuthenticationError("bad key".to_string()).is_retryable());
    assert!(!ProviderError::ParseError("not json".to_string()).is_retryable());
    assert!(!ProviderError::UnsupportedDirection("fr-en".to_string()).is_retryable());
}

#[test]
fn test_appError_fromProviderError_shouldWrapCorrectly() {
    let app_error: AppError = ProviderError::ConnectionError("refused".to_string()).into();
    assert!(matches!(app_error, AppError::Provider(_)));
    assert!(app_error.to_string().contains("refused"));
}

#[test]
fn test_appError_config_shouldDisplayCorrectly() {
    let error = AppError::Config("max_chunk_chars must be at least 3, got 1".to_string());
    let display = format!("{}", error);
    assert!(display.contains("Configuration error"));
    assert!(display.contains("max_chunk_chars"));
}
