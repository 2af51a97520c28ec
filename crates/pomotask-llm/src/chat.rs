//! Chat-completions provider
//!
//! Talks to any OpenAI-compatible `/chat/completions` endpoint. The default
//! target is the Hugging Face inference router.
//!
//! # Features
//!
//! - Role-structured prompts (system + user messages)
//! - Optional bearer token
//! - One request per call: no retries, no timeout beyond reqwest's defaults
//!
//! # Examples
//!
//! ```no_run
//! use pomotask_llm::ChatCompletionsProvider;
//!
//! let provider = ChatCompletionsProvider::new(
//!     "https://router.huggingface.co/v1/chat/completions",
//!     "deepseek-ai/DeepSeek-V3:novita",
//! )
//! .with_api_key("hf_xxx");
//! ```

use crate::LlmError;
use pomotask_domain::traits::LlmProvider as LlmProviderTrait;
use pomotask_domain::{ChatMessage, CompletionOptions, RawCompletion};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

/// Default chat-completions endpoint
pub const DEFAULT_ENDPOINT: &str = "https://router.huggingface.co/v1/chat/completions";

/// Default model
pub const DEFAULT_MODEL: &str = "deepseek-ai/DeepSeek-V3:novita";

/// Provider for OpenAI-compatible chat-completions APIs
#[derive(Debug, Clone)]
pub struct ChatCompletionsProvider {
    endpoint: String,
    model: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

/// Request body for the chat-completions API
#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    max_tokens: u32,
    temperature: f32,
}

/// Response from the chat-completions API.
///
/// Everything below `choices` is optional: a body without a usable message
/// is a `Missing` completion, not a decoding error.
#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    #[serde(default)]
    message: Option<ResponseMessage>,
}

#[derive(Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<Value>,
}

impl ChatResponse {
    fn into_completion(self) -> RawCompletion {
        let content = self
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content);

        match content {
            Some(Value::String(text)) => RawCompletion::Text(text),
            other => {
                warn!("Completion carried no text content: {:?}", other);
                RawCompletion::Missing
            }
        }
    }
}

impl ChatCompletionsProvider {
    /// Create a new provider
    ///
    /// # Parameters
    ///
    /// - `endpoint`: full URL of the chat-completions route
    /// - `model`: model identifier understood by the endpoint
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            model: model.into(),
            api_key: None,
            client: reqwest::Client::new(),
        }
    }

    /// Create a provider for the default endpoint and model
    pub fn default_endpoint() -> Self {
        Self::new(DEFAULT_ENDPOINT, DEFAULT_MODEL)
    }

    /// Authenticate requests with a bearer token
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Model identifier sent with each request
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send one chat-completions request
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The endpoint cannot be reached
    /// - The model is unknown to the endpoint
    /// - The endpoint answers with a non-success status
    /// - The body is not a chat-completions response
    pub async fn chat(
        &self,
        messages: &[ChatMessage],
        options: &CompletionOptions,
    ) -> Result<RawCompletion, LlmError> {
        let request_body = ChatRequest {
            model: &self.model,
            messages,
            max_tokens: options.max_tokens,
            temperature: options.temperature,
        };

        let mut request = self.client.post(&self.endpoint).json(&request_body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        debug!("Sending {} messages to {}", messages.len(), self.endpoint);

        let response = request
            .send()
            .await
            .map_err(|e| LlmError::Communication(format!("Request failed: {}", e)))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(LlmError::ModelNotAvailable(self.model.clone()));
        }
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(LlmError::RateLimitExceeded);
        }
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(LlmError::Communication(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let parsed = response
            .json::<ChatResponse>()
            .await
            .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        Ok(parsed.into_completion())
    }
}

impl LlmProviderTrait for ChatCompletionsProvider {
    type Error = LlmError;

    async fn complete(
        &self,
        messages: &[ChatMessage],
        options: &CompletionOptions,
    ) -> Result<RawCompletion, Self::Error> {
        self.chat(messages, options).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> RawCompletion {
        serde_json::from_str::<ChatResponse>(body)
            .unwrap()
            .into_completion()
    }

    #[test]
    fn test_provider_creation() {
        let provider = ChatCompletionsProvider::new("http://localhost:8000/v1/chat/completions", "tiny")
            .with_api_key("secret");
        assert_eq!(provider.endpoint, "http://localhost:8000/v1/chat/completions");
        assert_eq!(provider.model(), "tiny");
        assert_eq!(provider.api_key.as_deref(), Some("secret"));
    }

    #[test]
    fn test_provider_default_endpoint() {
        let provider = ChatCompletionsProvider::default_endpoint();
        assert_eq!(provider.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(provider.model(), DEFAULT_MODEL);
        assert!(provider.api_key.is_none());
    }

    #[test]
    fn test_request_body_shape() {
        let messages = vec![ChatMessage::system("sys"), ChatMessage::user("hi")];
        let body = ChatRequest {
            model: "m",
            messages: &messages,
            max_tokens: 100,
            temperature: 0.5,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "m");
        assert_eq!(json["max_tokens"], 100);
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "hi");
    }

    #[test]
    fn test_text_content_is_returned_verbatim() {
        let completion = parse(r#"{"choices":[{"message":{"role":"assistant","content":"  {\"tm\":\"5m\"} "}}]}"#);
        assert_eq!(completion.as_text(), Some(r#"  {"tm":"5m"} "#));
    }

    #[test]
    fn test_unusable_bodies_become_missing() {
        assert_eq!(parse(r#"{"choices":[]}"#), RawCompletion::Missing);
        assert_eq!(parse(r#"{}"#), RawCompletion::Missing);
        assert_eq!(parse(r#"{"choices":[{}]}"#), RawCompletion::Missing);
        assert_eq!(
            parse(r#"{"choices":[{"message":{"content":null}}]}"#),
            RawCompletion::Missing
        );
        assert_eq!(
            parse(r#"{"choices":[{"message":{"content":[{"type":"text"}]}}]}"#),
            RawCompletion::Missing
        );
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_communication_error() {
        let provider = ChatCompletionsProvider::new("http://127.0.0.1:9/v1/chat/completions", "m");
        let result = provider
            .chat(&[ChatMessage::user("test")], &CompletionOptions::default())
            .await;

        match result {
            Err(LlmError::Communication(_)) => {} // Expected
            other => panic!("Expected Communication error, got {:?}", other),
        }
    }
}
