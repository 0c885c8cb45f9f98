//! Gemini `generateContent` payload types.

use serde::{Deserialize, Serialize};

/// Top-level `generateContent` request envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

impl GenerateContentRequest {
    /// Wrap parts into a single user-role message.
    pub fn user(parts: Vec<Part>) -> Self {
        Self {
            contents: vec![Content {
                role: "user".to_string(),
                parts,
            }],
        }
    }
}

/// Role-tagged content container sent to Gemini.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Content {
    pub role: String,
    pub parts: Vec<Part>,
}

/// Untagged union of text and inline media content parts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Part::Text { text: text.into() }
    }

    pub fn inline_data(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Part::InlineData {
            inline_data: InlineData {
                mime_type: mime_type.into(),
                data: data.into(),
            },
        }
    }
}

/// Base64 inline payload used for image/vision requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

/// `generateContent` response envelope.
///
/// Every level is optional so shape drift decodes cleanly and surfaces as
/// "no text" rather than a decode failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResponsePart {
    #[serde(default)]
    pub text: Option<String>,
}

impl GenerateContentResponse {
    /// Text of the first part of the first candidate, if present and non-empty.
    pub fn first_text(&self) -> Option<&str> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .first()?
            .text
            .as_deref()
            .filter(|text| !text.is_empty())
    }

    /// Convenience constructor for a single-text response.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            candidates: vec![Candidate {
                content: Some(CandidateContent {
                    parts: vec![ResponsePart {
                        text: Some(text.into()),
                    }],
                }),
            }],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn decode(value: serde_json::Value) -> GenerateContentResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_request_serializes_to_gemini_shape() {
        let request = GenerateContentRequest::user(vec![
            Part::text("describe"),
            Part::inline_data("image/jpeg", "/9j/4AAQ"),
        ]);

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "contents": [{
                    "role": "user",
                    "parts": [
                        { "text": "describe" },
                        { "inlineData": { "mimeType": "image/jpeg", "data": "/9j/4AAQ" } }
                    ]
                }]
            })
        );
    }

    #[test]
    fn test_first_text_reads_first_part() {
        let response = decode(json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [{ "text": "Product Name: Widget" }, { "text": "ignored" }]
                },
                "finishReason": "STOP"
            }],
            "usageMetadata": { "totalTokenCount": 12 }
        }));
        assert_eq!(response.first_text(), Some("Product Name: Widget"));
    }

    #[test]
    fn test_first_text_missing_levels() {
        for body in [
            json!({}),
            json!({ "candidates": [] }),
            json!({ "candidates": [{}] }),
            json!({ "candidates": [{ "content": {} }] }),
            json!({ "candidates": [{ "content": { "parts": [] } }] }),
            json!({ "candidates": [{ "content": { "parts": [{ "inlineData": {} }] } }] }),
            json!({ "candidates": [{ "content": { "parts": [{ "text": "" }] } }] }),
            json!({ "promptFeedback": { "blockReason": "SAFETY" } }),
        ] {
            assert_eq!(decode(body.clone()).first_text(), None, "{}", body);
        }
    }

    #[test]
    fn test_from_text_round_trips_through_first_text() {
        assert_eq!(
            GenerateContentResponse::from_text("hello").first_text(),
            Some("hello")
        );
    }
}
