//! Completion module - what goes to and comes back from a language model

use serde::{Deserialize, Serialize};
use std::fmt;

/// Role of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Instructions that frame the conversation
    System,
    /// End-user input
    User,
    /// Model output
    Assistant,
}

/// A single role-tagged message of a prompt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Who is speaking
    pub role: Role,
    /// Message text
    pub content: String,
}

impl ChatMessage {
    /// Create a system message
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Sampling settings for one completion call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompletionOptions {
    /// Upper bound on generated tokens
    pub max_tokens: u32,
    /// Sampling temperature
    pub temperature: f32,
}

impl Default for CompletionOptions {
    fn default() -> Self {
        Self {
            max_tokens: 100,
            temperature: 0.3,
        }
    }
}

/// The model's answer to one request.
///
/// `Missing` is the sentinel for "the call succeeded but carried no usable
/// message body" (no choices, null or non-text content). It is distinct from
/// a transport failure, which is an error of the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawCompletion {
    /// Completion text, unmodified
    Text(String),
    /// No usable response
    Missing,
}

impl RawCompletion {
    /// The text, if any
    pub fn as_text(&self) -> Option<&str> {
        match self {
            RawCompletion::Text(text) => Some(text),
            RawCompletion::Missing => None,
        }
    }
}

impl From<Option<String>> for RawCompletion {
    fn from(content: Option<String>) -> Self {
        content.map_or(RawCompletion::Missing, RawCompletion::Text)
    }
}

impl From<String> for RawCompletion {
    fn from(text: String) -> Self {
        RawCompletion::Text(text)
    }
}

impl From<&str> for RawCompletion {
    fn from(text: &str) -> Self {
        RawCompletion::Text(text.to_string())
    }
}

/// What a request asks the model to produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExtractionKind {
    /// Scheduling metadata for a task
    Metadata,
    /// Category classification
    Category,
    /// A motivational quote (passthrough, no schema)
    Quote,
}

impl ExtractionKind {
    /// Name of the kind
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtractionKind::Metadata => "metadata",
            ExtractionKind::Category => "category",
            ExtractionKind::Quote => "quote",
        }
    }

    /// Parse a kind from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "metadata" => Some(ExtractionKind::Metadata),
            "category" => Some(ExtractionKind::Category),
            "quote" => Some(ExtractionKind::Quote),
            _ => None,
        }
    }
}

impl fmt::Display for ExtractionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ExtractionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid extraction kind: {}", s))
    }
}
