use super::types::{GenerateContentRequest, GenerateContentResponse};
use crate::ai::ContentGenerator;
use crate::models::{Config, DEFAULT_BASE_URL};
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Lightweight Gemini REST client.
///
/// The API key is supplied per call so the client itself carries no secret.
pub struct GeminiHttpClient {
    client: Client,
    model: String,
    base_url: String,
    timeout: Duration,
}

impl GeminiHttpClient {
    /// Construct a Gemini client.
    ///
    /// `model` should be the bare model ID (for example `gemini-2.0-flash`);
    /// a `models/`-prefixed value is accepted and stripped.
    pub fn new(model: String, timeout: Duration) -> Self {
        Self::new_with_client(model, timeout, Client::new())
    }

    pub fn new_with_client(model: String, timeout: Duration, client: Client) -> Self {
        let model = model.strip_prefix("models/").unwrap_or(&model).to_string();

        Self {
            client,
            model,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout,
        }
    }

    pub fn from_config(config: &Config, client: Client) -> Self {
        Self::new_with_client(config.gemini_model.clone(), config.request_timeout, client)
            .with_base_url(config.gemini_base_url.clone())
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    /// Returns the configured model ID without the `models/` prefix.
    pub fn model(&self) -> &str {
        &self.model
    }

    fn generate_content_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }
}

#[async_trait]
impl ContentGenerator for GeminiHttpClient {
    async fn generate_content(
        &self,
        api_key: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        tracing::debug!("Sending generateContent request to Gemini ({})", self.model);

        let response = self
            .client
            .post(self.generate_content_url())
            .timeout(self.timeout)
            .query(&[("key", api_key)])
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| {
                // reqwest errors include the URL, which carries the key.
                let e = e.without_url();
                tracing::error!("Failed to send request to Gemini: {}", e);
                e
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.map_err(|e| e.without_url())?;
            tracing::error!("Gemini API error (status {}): {}", status, error_text);
            return Err(Error::Upstream {
                status: status.as_u16(),
                body: error_text,
            });
        }

        let body = response.text().await.map_err(|e| e.without_url())?;
        serde_json::from_str(&body).map_err(|e| {
            tracing::error!("Failed to parse Gemini response: {}\nBody: {}", e, body);
            Error::AiProvider(format!("Failed to parse Gemini response: {}", e))
        })
    }
}
