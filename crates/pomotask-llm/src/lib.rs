//! PomoTask LLM Provider Layer
//!
//! Implementations of the `LlmProvider` trait from `pomotask-domain`.
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic mock for testing
//! - `ChatCompletionsProvider`: OpenAI-compatible chat-completions endpoint
//!   (the Hugging Face router by default)
//!
//! # Examples
//!
//! ```
//! use pomotask_domain::traits::LlmProvider;
//! use pomotask_domain::{ChatMessage, CompletionOptions};
//! use pomotask_llm::MockProvider;
//!
//! # async fn example() {
//! let provider = MockProvider::new(r#"{"tm":"1 hour","bt":"Morning"}"#);
//! let result = provider
//!     .complete(&[ChatMessage::user("Plan my day")], &CompletionOptions::default())
//!     .await
//!     .unwrap();
//! assert_eq!(result.as_text(), Some(r#"{"tm":"1 hour","bt":"Morning"}"#));
//! # }
//! ```

#![warn(missing_docs)]

pub mod chat;

use pomotask_domain::traits::LlmProvider as LlmProviderTrait;
use pomotask_domain::{ChatMessage, CompletionOptions, RawCompletion, Role};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;

pub use chat::ChatCompletionsProvider;

/// Errors that can occur during LLM operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Response body could not be decoded
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

/// What the mock answers for a given prompt
#[derive(Debug, Clone)]
enum MockReply {
    Completion(RawCompletion),
    Error,
}

/// Mock LLM provider for deterministic testing
///
/// Replies are keyed by the content of the last user message in the prompt.
/// Unknown prompts get the default response.
///
/// # Examples
///
/// ```
/// use pomotask_domain::traits::LlmProvider;
/// use pomotask_domain::{ChatMessage, CompletionOptions, RawCompletion};
/// use pomotask_llm::MockProvider;
///
/// # async fn example() {
/// let mut provider = MockProvider::default();
/// provider.add_response("prompt1", "response1");
/// provider.add_missing("prompt2");
///
/// let options = CompletionOptions::default();
/// let first = provider.complete(&[ChatMessage::user("prompt1")], &options).await.unwrap();
/// assert_eq!(first.as_text(), Some("response1"));
/// let second = provider.complete(&[ChatMessage::user("prompt2")], &options).await.unwrap();
/// assert_eq!(second, RawCompletion::Missing);
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: RawCompletion,
    responses: Arc<Mutex<HashMap<String, MockReply>>>,
    calls: Arc<Mutex<Vec<Vec<ChatMessage>>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockProvider {
    /// Create a new MockProvider with a fixed response for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self::with_default(RawCompletion::Text(response.into()))
    }

    /// Create a MockProvider that answers every prompt with no usable text
    pub fn missing() -> Self {
        Self::with_default(RawCompletion::Missing)
    }

    fn with_default(default_response: RawCompletion) -> Self {
        Self {
            default_response,
            responses: Arc::new(Mutex::new(HashMap::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Add a specific response for a given user prompt
    pub fn add_response(&mut self, prompt: impl Into<String>, response: impl Into<String>) {
        lock(&self.responses).insert(
            prompt.into(),
            MockReply::Completion(RawCompletion::Text(response.into())),
        );
    }

    /// Answer a given user prompt with no usable text
    pub fn add_missing(&mut self, prompt: impl Into<String>) {
        lock(&self.responses).insert(prompt.into(), MockReply::Completion(RawCompletion::Missing));
    }

    /// Configure to return a transport error for a specific prompt
    pub fn add_error(&mut self, prompt: impl Into<String>) {
        lock(&self.responses).insert(prompt.into(), MockReply::Error);
    }

    /// Get the number of times complete was called
    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    /// Messages of the most recent call
    pub fn last_messages(&self) -> Option<Vec<ChatMessage>> {
        lock(&self.calls).last().cloned()
    }

    /// Reset the call history
    pub fn reset_call_count(&self) {
        lock(&self.calls).clear();
    }

    fn reply_for(&self, messages: &[ChatMessage]) -> MockReply {
        let prompt = messages
            .iter()
            .rev()
            .find(|m| m.role == Role::User)
            .map(|m| m.content.as_str())
            .unwrap_or_default();

        lock(&self.responses)
            .get(prompt)
            .cloned()
            .unwrap_or_else(|| MockReply::Completion(self.default_response.clone()))
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

impl LlmProviderTrait for MockProvider {
    type Error = LlmError;

    async fn complete(
        &self,
        messages: &[ChatMessage],
        _options: &CompletionOptions,
    ) -> Result<RawCompletion, Self::Error> {
        lock(&self.calls).push(messages.to_vec());

        match self.reply_for(messages) {
            MockReply::Completion(completion) => Ok(completion),
            MockReply::Error => Err(LlmError::Other("Mock error".to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prompt(text: &str) -> Vec<ChatMessage> {
        vec![ChatMessage::system("Be brief."), ChatMessage::user(text)]
    }

    #[tokio::test]
    async fn test_mock_provider_default() {
        let provider = MockProvider::new("Test response");
        let result = provider
            .complete(&prompt("any prompt"), &CompletionOptions::default())
            .await;
        assert_eq!(result.unwrap().as_text(), Some("Test response"));
    }

    #[tokio::test]
    async fn test_mock_provider_specific_responses() {
        let mut provider = MockProvider::default();
        provider.add_response("hello", "world");
        provider.add_response("foo", "bar");
        let options = CompletionOptions::default();

        let reply = |p: &'static str| {
            let provider = provider.clone();
            async move { provider.complete(&prompt(p), &options).await.unwrap() }
        };

        assert_eq!(reply("hello").await.as_text(), Some("world"));
        assert_eq!(reply("foo").await.as_text(), Some("bar"));
        assert_eq!(reply("unknown").await.as_text(), Some("Default mock response"));
    }

    #[tokio::test]
    async fn test_mock_provider_missing() {
        let provider = MockProvider::missing();
        let result = provider
            .complete(&prompt("x"), &CompletionOptions::default())
            .await
            .unwrap();
        assert_eq!(result, RawCompletion::Missing);
    }

    #[tokio::test]
    async fn test_mock_provider_call_history() {
        let provider = MockProvider::new("test");
        let options = CompletionOptions::default();
        assert_eq!(provider.call_count(), 0);

        provider.complete(&prompt("prompt1"), &options).await.unwrap();
        provider.complete(&prompt("prompt2"), &options).await.unwrap();
        assert_eq!(provider.call_count(), 2);

        let last = provider.last_messages().unwrap();
        assert_eq!(last[1].content, "prompt2");

        provider.reset_call_count();
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_mock_provider_error() {
        let mut provider = MockProvider::default();
        provider.add_error("bad prompt");

        let result = provider
            .complete(&prompt("bad prompt"), &CompletionOptions::default())
            .await;
        assert!(matches!(result, Err(LlmError::Other(_))));
    }

    #[tokio::test]
    async fn test_mock_provider_clone_shares_history() {
        let provider1 = MockProvider::new("test");
        let provider2 = provider1.clone();

        provider1
            .complete(&prompt("test"), &CompletionOptions::default())
            .await
            .unwrap();

        assert_eq!(provider1.call_count(), 1);
        assert_eq!(provider2.call_count(), 1);
    }
}
