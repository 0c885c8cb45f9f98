//! Generative AI provider integration
//!
//! Provides the seam between the relay and the model provider, with a Gemini
//! REST implementation and a scripted mock for tests.

pub mod gemini;
pub mod mock;

pub use gemini::{GeminiHttpClient, GenerateContentRequest, GenerateContentResponse, Part};
pub use mock::{MockContentGenerator, MockOutcome};

use crate::Result;
use async_trait::async_trait;

#[async_trait]
pub trait ContentGenerator: Send + Sync {
    /// Issue a single `generateContent` call authenticated with `api_key`.
    async fn generate_content(
        &self,
        api_key: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse>;
}
