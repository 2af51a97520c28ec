//! Trait definitions for external interactions
//!
//! These traits define the boundary between the pipeline and the network.
//! Implementations live in other crates.

use crate::{ChatMessage, CompletionOptions, RawCompletion};
use std::future::Future;

/// Trait for language-model providers
///
/// Implemented by the infrastructure layer (pomotask-llm). A provider makes
/// exactly one call per invocation: no retries, no extra timeout beyond the
/// transport's own.
pub trait LlmProvider: Send + Sync {
    /// Error type for transport failures
    type Error: std::fmt::Display + Send;

    /// Send a role-structured prompt and return the raw completion.
    ///
    /// `Ok(RawCompletion::Missing)` means the call went through but produced
    /// no usable text; `Err` means no response exists at all.
    fn complete(
        &self,
        messages: &[ChatMessage],
        options: &CompletionOptions,
    ) -> impl Future<Output = Result<RawCompletion, Self::Error>> + Send;
}
