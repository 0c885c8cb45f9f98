//! Error handling and custom error types
//!
//! Provides unified error handling across the relay using thiserror, and the
//! mapping from each failure kind to the status code and message a caller sees.

use crate::models::ValidationError;
use axum::http::StatusCode;
use thiserror::Error;

pub const UPSTREAM_FAILURE_MESSAGE: &str = "Failed to get a response from the AI model.";
pub const INVALID_BODY_MESSAGE: &str = "Invalid request body.";

#[derive(Error, Debug)]
pub enum Error {
    #[error("API key is not set.")]
    MissingApiKey,

    #[error("Invalid request body: {0}")]
    InvalidBody(#[source] serde_json::Error),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Gemini API error (status {status}): {body}")]
    Upstream { status: u16, body: String },

    #[error("Could not extract text from AI response.")]
    MissingText,

    #[error("{0}")]
    AiProvider(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Request body is too large (limit {limit} bytes).")]
    PayloadTooLarge { limit: usize },

    #[error("Failed to read request body: {0}")]
    BodyRead(String),
}

impl Error {
    /// Status code returned to the caller for this failure.
    ///
    /// Provider statuses are passed through as-is, whatever their class.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::InvalidBody(_) | Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            Error::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message placed in the outbound `error` field.
    ///
    /// Upstream bodies stay in the logs; the caller only gets the generic message.
    pub fn public_message(&self) -> String {
        match self {
            Error::InvalidBody(_) => INVALID_BODY_MESSAGE.to_string(),
            Error::Upstream { .. } => UPSTREAM_FAILURE_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }

    /// Whether the failure is the caller's fault rather than ours or the provider's.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidBody(_) | Error::Validation(_) | Error::PayloadTooLarge { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_api_key_maps_to_500() {
        let err = Error::MissingApiKey;
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.public_message(), "API key is not set.");
    }

    #[test]
    fn test_validation_maps_to_400_with_literal_message() {
        let err = Error::from(ValidationError::InvalidAction);
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.public_message(), "Invalid action.");
        assert!(err.is_client_error());
    }

    #[test]
    fn test_upstream_passes_status_and_hides_body() {
        let err = Error::Upstream {
            status: 429,
            body: "{\"error\":{\"message\":\"quota exceeded\"}}".to_string(),
        };
        assert_eq!(err.status_code(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(err.public_message(), UPSTREAM_FAILURE_MESSAGE);
        assert!(!err.public_message().contains("quota"));
    }

    #[test]
    fn test_invalid_upstream_status_falls_back_to_bad_gateway() {
        let err = Error::Upstream {
            status: 42,
            body: String::new(),
        };
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_unexpected_failure_uses_own_message() {
        let err = Error::AiProvider("Failed to parse Gemini response: eof".to_string());
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.public_message(), "Failed to parse Gemini response: eof");
        assert!(!err.is_client_error());
    }

    #[test]
    fn test_payload_too_large_maps_to_413() {
        let err = Error::PayloadTooLarge { limit: 1024 };
        assert_eq!(err.status_code(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(
            err.public_message(),
            "Request body is too large (limit 1024 bytes)."
        );
        assert!(err.is_client_error());
    }

    #[test]
    fn test_invalid_body_is_client_error() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err = Error::InvalidBody(parse_err);
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.public_message(), INVALID_BODY_MESSAGE);
    }
}
