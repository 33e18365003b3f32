//! Gateway to the text-generation provider.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use log::debug;
use reqwest::Client as HttpClient;
use rig::{client::CompletionClient, completion::Prompt, providers::gemini};

use crate::error::AiError;
use crate::prompt::render_prompt;
use crate::tasks::{AnnotationRequest, AnnotationTask};

/// Default model for every task.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";

const PROVIDER_ID: &str = "gemini";

// ============================================================================
// Gateway Trait
// ============================================================================

/// Sends one request and returns the raw answer text.
#[async_trait]
pub trait AnnotationGatewayTrait: Send + Sync {
    async fn complete(&self, request: &AnnotationRequest) -> Result<String, AiError>;
}

// ============================================================================
// Gemini Implementation
// ============================================================================

pub struct GeminiGateway {
    api_key: Option<String>,
    model: String,
}

impl GeminiGateway {
    pub fn new(api_key: Option<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl AnnotationGatewayTrait for GeminiGateway {
    async fn complete(&self, request: &AnnotationRequest) -> Result<String, AiError> {
        let key = self
            .api_key
            .as_deref()
            .ok_or_else(|| AiError::MissingApiKey(PROVIDER_ID.to_string()))?;

        debug!(
            "Sending {} request to {} model {}",
            request.task.as_str(),
            PROVIDER_ID,
            self.model
        );

        let prompt = render_prompt(request);
        let client: gemini::Client<HttpClient> =
            gemini::Client::new(key).map_err(|e| AiError::Provider(e.to_string()))?;
        client
            .agent(&self.model)
            .build()
            .prompt(&prompt)
            .await
            .map_err(|e| AiError::Provider(e.to_string()))
    }
}

// ============================================================================
// Fake Gateway for Testing
// ============================================================================

/// A gateway that returns canned answers per task.
#[derive(Default)]
pub struct FakeGateway {
    responses: HashMap<AnnotationTask, String>,
    failure: Option<String>,
    requests: Mutex<Vec<AnnotationRequest>>,
}

impl FakeGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `task` with `response`.
    pub fn with_response(mut self, task: AnnotationTask, response: impl Into<String>) -> Self {
        self.responses.insert(task, response.into());
        self
    }

    /// Fail every request with a provider error.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::default()
        }
    }

    /// Requests received so far.
    pub fn requests(&self) -> Vec<AnnotationRequest> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl AnnotationGatewayTrait for FakeGateway {
    async fn complete(&self, request: &AnnotationRequest) -> Result<String, AiError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }
        if let Some(message) = &self.failure {
            return Err(AiError::provider(message.clone()));
        }
        Ok(self
            .responses
            .get(&request.task)
            .cloned()
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_gemini_without_key_fails_fast() {
        let gateway = GeminiGateway::new(Some("  ".to_string()), DEFAULT_GEMINI_MODEL);
        let request = AnnotationRequest::analyze_entry("hello").unwrap();
        let err = gateway.complete(&request).await.unwrap_err();
        assert_eq!(err.code(), "MISSING_API_KEY");
    }

    #[tokio::test]
    async fn test_fake_gateway_records_requests() {
        let gateway = FakeGateway::new().with_response(AnnotationTask::AnalyzeEntry, "{}");
        let request = AnnotationRequest::analyze_entry("hello").unwrap();

        assert_eq!(gateway.complete(&request).await.unwrap(), "{}");
        assert_eq!(gateway.requests(), vec![request]);
    }

    #[tokio::test]
    async fn test_fake_gateway_failure() {
        let gateway = FakeGateway::failing("quota exceeded");
        let request = AnnotationRequest::analyze_entry("hello").unwrap();
        let err = gateway.complete(&request).await.unwrap_err();
        assert_eq!(err.code(), "PROVIDER_ERROR");
    }
}
