//! Data models and structures
//!
//! Defines the inbound request shapes, the outbound relay response, and the
//! process configuration loaded from the environment.

use crate::{Error, Result};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::time::Duration;
use thiserror::Error;

/// Inbound JSON body reduced to the string fields the relay understands.
///
/// A field that is absent or not a JSON string is `None`, so a stray field the
/// chosen action never reads cannot reject the request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRequest {
    pub action: Option<String>,
    pub image_base64: Option<String>,
    pub product_details: Option<String>,
}

impl RawRequest {
    /// Parse a body that must be a JSON object.
    pub fn from_json(body: &[u8]) -> Result<Self> {
        let fields: Map<String, Value> =
            serde_json::from_slice(body).map_err(Error::InvalidBody)?;
        let text = |key: &str| {
            fields
                .get(key)
                .and_then(Value::as_str)
                .map(str::to_string)
        };

        Ok(Self {
            action: text("action"),
            image_base64: text("imageBase64"),
            product_details: text("productDetails"),
        })
    }
}

/// A validated request: exactly one action with its required field present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductRequest {
    Analyze { image_base64: String },
    Similar { product_details: String },
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Image data is required for analysis.")]
    MissingImage,

    #[error("Product details are required to find similar items.")]
    MissingProductDetails,

    #[error("Invalid action.")]
    InvalidAction,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl TryFrom<RawRequest> for ProductRequest {
    type Error = ValidationError;

    fn try_from(raw: RawRequest) -> std::result::Result<Self, Self::Error> {
        match raw.action.as_deref() {
            Some("analyze") => non_empty(raw.image_base64)
                .map(|image_base64| ProductRequest::Analyze { image_base64 })
                .ok_or(ValidationError::MissingImage),
            Some("similar") => non_empty(raw.product_details)
                .map(|product_details| ProductRequest::Similar { product_details })
                .ok_or(ValidationError::MissingProductDetails),
            _ => Err(ValidationError::InvalidAction),
        }
    }
}

impl ProductRequest {
    /// Parse and validate a raw request body.
    pub fn from_json(body: &[u8]) -> Result<Self> {
        Ok(Self::try_from(RawRequest::from_json(body)?)?)
    }

    pub fn action(&self) -> &'static str {
        match self {
            ProductRequest::Analyze { .. } => "analyze",
            ProductRequest::Similar { .. } => "similar",
        }
    }
}

/// Outbound JSON body: `{"text": ...}` on success, `{"error": ...}` otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RelayBody {
    Text { text: String },
    Error { error: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayResponse {
    pub status: StatusCode,
    pub body: RelayBody,
}

impl RelayResponse {
    pub fn text(text: String) -> Self {
        Self {
            status: StatusCode::OK,
            body: RelayBody::Text { text },
        }
    }

    pub fn error(status: StatusCode, error: String) -> Self {
        Self {
            status,
            body: RelayBody::Error { error },
        }
    }
}

impl From<&Error> for RelayResponse {
    fn from(err: &Error) -> Self {
        Self::error(err.status_code(), err.public_message())
    }
}

impl IntoResponse for RelayResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

// Configuration
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub request_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let request_timeout = match lookup("GEMINI_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse::<u64>().map(Duration::from_secs).map_err(|_| {
                Error::Config(format!(
                    "GEMINI_TIMEOUT_SECS must be a whole number of seconds, got '{}'",
                    raw
                ))
            })?,
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        Ok(Self {
            gemini_api_key: non_empty(lookup("GEMINI_API_KEY")),
            gemini_model: non_empty(lookup("GEMINI_MODEL"))
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            gemini_base_url: non_empty(lookup("GEMINI_BASE_URL"))
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            request_timeout,
        })
    }
}
