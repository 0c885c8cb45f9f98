//! Request routing and prompt building for the product lens relay.
//!
//! One invocation is a linear pipeline: credential gate, body parsing, action
//! dispatch, payload assembly, a single provider call, and response mapping.
//! Every step returns [`Result`]; `Relay::respond` is the only place a failure
//! turns into an outbound status and message.

use crate::ai::{ContentGenerator, GeminiHttpClient, GenerateContentRequest, Part};
use crate::models::{Config, ProductRequest, RelayResponse};
use crate::{prompts, Error, Result};
use axum::body::{Body, Bytes};
use http_body_util::LengthLimitError;
use std::sync::Arc;
use tracing::{error, info, warn};

pub const IMAGE_MIME_TYPE: &str = "image/jpeg";

/// Build the provider payload for a validated request.
///
/// Analyze sends the instruction first and the image second; the image data is
/// forwarded untouched.
pub fn build_payload(request: &ProductRequest) -> GenerateContentRequest {
    let parts = match request {
        ProductRequest::Analyze { image_base64 } => vec![
            Part::text(prompts::ANALYZE),
            Part::inline_data(IMAGE_MIME_TYPE, image_base64.as_str()),
        ],
        ProductRequest::Similar { product_details } => {
            vec![Part::text(prompts::similar(product_details))]
        }
    };
    GenerateContentRequest::user(parts)
}

pub struct Relay {
    api_key: Option<String>,
    generator: Arc<dyn ContentGenerator>,
}

impl Relay {
    pub fn new(api_key: Option<String>, generator: Arc<dyn ContentGenerator>) -> Self {
        Self { api_key, generator }
    }

    /// Build a relay backed by the Gemini REST API.
    pub fn from_config(config: &Config, client: reqwest::Client) -> Self {
        if config.gemini_api_key.is_none() {
            warn!("GEMINI_API_KEY is not set; every request will fail until it is configured");
        }
        info!("Gemini model: {}", config.gemini_model);

        Self::new(
            config.gemini_api_key.clone(),
            Arc::new(GeminiHttpClient::from_config(config, client)),
        )
    }

    /// Run one invocation against a raw request body. Never fails.
    pub async fn handle(&self, body: &[u8]) -> RelayResponse {
        let result = match self.api_key() {
            Ok(api_key) => self.dispatch(api_key, body).await,
            Err(e) => Err(e),
        };
        Self::respond(result)
    }

    /// Run one invocation against a streamed body of at most `limit` bytes.
    ///
    /// The body is only buffered once the credential gate has passed.
    pub async fn handle_body(&self, body: Body, limit: usize) -> RelayResponse {
        Self::respond(self.process_body(body, limit).await)
    }

    async fn process_body(&self, body: Body, limit: usize) -> Result<String> {
        let api_key = self.api_key()?;
        let bytes = read_body(body, limit).await?;
        self.dispatch(api_key, &bytes).await
    }

    fn api_key(&self) -> Result<&str> {
        self.api_key.as_deref().ok_or(Error::MissingApiKey)
    }

    async fn dispatch(&self, api_key: &str, body: &[u8]) -> Result<String> {
        let request = ProductRequest::from_json(body)?;
        info!("Handling '{}' request", request.action());

        let payload = build_payload(&request);
        let response = self.generator.generate_content(api_key, &payload).await?;

        response
            .first_text()
            .map(str::to_string)
            .ok_or(Error::MissingText)
    }

    fn respond(result: Result<String>) -> RelayResponse {
        match result {
            Ok(text) => RelayResponse::text(text),
            Err(e) => {
                match &e {
                    _ if e.is_client_error() => warn!("Rejected request: {}", e),
                    // The raw provider body was already logged by the client.
                    Error::Upstream { status, .. } => {
                        warn!("Gemini request failed with status {}", status)
                    }
                    _ => error!("Handler error: {}", e),
                }
                RelayResponse::from(&e)
            }
        }
    }
}

async fn read_body(body: Body, limit: usize) -> Result<Bytes> {
    axum::body::to_bytes(body, limit).await.map_err(|e| {
        let inner = e.into_inner();
        if inner.is::<LengthLimitError>() {
            Error::PayloadTooLarge { limit }
        } else {
            Error::BodyRead(inner.to_string())
        }
    })
}
