use super::ContentGenerator;
use crate::ai::gemini::{GenerateContentRequest, GenerateContentResponse};
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// Scripted provider outcome.
#[derive(Debug, Clone)]
pub enum MockOutcome {
    /// 2xx response whose first part carries this text.
    Text(String),
    /// 2xx response decoded from this raw JSON.
    Body(serde_json::Value),
    /// Non-success provider status with a raw error body.
    Status(u16, String),
}

#[derive(Clone)]
pub struct MockContentGenerator {
    outcomes: Arc<Mutex<Vec<MockOutcome>>>,
    requests: Arc<Mutex<Vec<GenerateContentRequest>>>,
    api_keys: Arc<Mutex<Vec<String>>>,
}

impl MockContentGenerator {
    pub fn new() -> Self {
        Self {
            outcomes: Arc::new(Mutex::new(Vec::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
            api_keys: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_outcome(self, outcome: MockOutcome) -> Self {
        self.outcomes.lock().unwrap().push(outcome);
        self
    }

    pub fn with_text_response(self, text: impl Into<String>) -> Self {
        self.with_outcome(MockOutcome::Text(text.into()))
    }

    pub fn get_call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn get_requests(&self) -> Vec<GenerateContentRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn get_api_keys(&self) -> Vec<String> {
        self.api_keys.lock().unwrap().clone()
    }
}

impl Default for MockContentGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContentGenerator for MockContentGenerator {
    async fn generate_content(
        &self,
        api_key: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        let count = {
            let mut requests = self.requests.lock().unwrap();
            requests.push(request.clone());
            requests.len()
        };
        self.api_keys.lock().unwrap().push(api_key.to_string());

        let outcome = {
            let outcomes = self.outcomes.lock().unwrap();
            if outcomes.is_empty() {
                // Default mock response
                MockOutcome::Text("Mock product description".to_string())
            } else {
                outcomes[(count - 1) % outcomes.len()].clone()
            }
        };

        match outcome {
            MockOutcome::Text(text) => Ok(GenerateContentResponse::from_text(text)),
            MockOutcome::Body(body) => Ok(serde_json::from_value(body)?),
            MockOutcome::Status(status, body) => Err(Error::Upstream { status, body }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::gemini::Part;

    fn request() -> GenerateContentRequest {
        GenerateContentRequest::user(vec![Part::text("hello")])
    }

    #[tokio::test]
    async fn test_mock_default_response() {
        let mock = MockContentGenerator::new();
        let response = mock.generate_content("key", &request()).await.unwrap();
        assert_eq!(response.first_text(), Some("Mock product description"));
    }

    #[tokio::test]
    async fn test_mock_cycles_outcomes_and_records_calls() {
        let mock = MockContentGenerator::new()
            .with_text_response("first")
            .with_outcome(MockOutcome::Status(500, "boom".to_string()));

        let first = mock.generate_content("k1", &request()).await.unwrap();
        assert_eq!(first.first_text(), Some("first"));

        let second = mock.generate_content("k2", &request()).await.unwrap_err();
        assert!(matches!(second, Error::Upstream { status: 500, .. }));

        // Should cycle back
        let third = mock.generate_content("k3", &request()).await.unwrap();
        assert_eq!(third.first_text(), Some("first"));

        assert_eq!(mock.get_call_count(), 3);
        assert_eq!(mock.get_api_keys(), vec!["k1", "k2", "k3"]);
        assert_eq!(mock.get_requests()[0], request());
    }
}
