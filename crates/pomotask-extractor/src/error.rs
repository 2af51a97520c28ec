//! Error types for the Extractor

use thiserror::Error;

/// Errors that can occur during extraction.
///
/// Malformed or incomplete completions are not errors: they resolve to a
/// fallback record. Only bad input and transport failures surface here.
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// LLM provider error
    #[error("LLM error: {0}")]
    Llm(String),

    /// Task title is empty after trimming
    #[error("Task is required")]
    EmptyTitle,

    /// Task title exceeds the configured maximum
    #[error("Task title too long: {0} chars (max: {1})")]
    TitleTooLong(usize, usize),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ExtractorError {
    /// Whether the error was caused by the caller's input
    pub fn is_input_error(&self) -> bool {
        matches!(self, ExtractorError::EmptyTitle | ExtractorError::TitleTooLong(..))
    }
}
