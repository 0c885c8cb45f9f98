pub mod client;
pub mod types;

pub use client::GeminiHttpClient;
pub use types::{GenerateContentRequest, GenerateContentResponse, InlineData, Part};
