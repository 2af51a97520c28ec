//! PomoTask Extractor
//!
//! Turns an untrusted, loosely formatted model completion into a validated
//! record, with a deterministic fallback whenever the completion is
//! malformed, incomplete or hostile.
//!
//! # Architecture
//!
//! ```text
//! title → PromptBuilder → LLM → RawCompletion → normalize → validate → record
//!                                                     └→ recover → merge (category)
//! ```
//!
//! Every stage after the model call is pure. Only transport failures and
//! bad titles surface as errors; everything else resolves to a fallback.
//!
//! # Example Usage
//!
//! ```no_run
//! use pomotask_extractor::{Extractor, ExtractorConfig};
//! use pomotask_llm::MockProvider;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let llm = MockProvider::new("```json\n{\"tm\":\"1 hour\",\"bt\":\"Morning\",\"foo\":\"x\"}\n```");
//! let extractor = Extractor::new(llm, ExtractorConfig::default());
//!
//! let result = extractor.clarify("Go to the gym").await?;
//! for (label, value) in result.task_context.labeled() {
//!     println!("{}: {}", label, value);
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod extractor;
mod fallback;
mod merge;
mod normalizer;
mod prompt;
mod recovery;
mod types;
mod validator;

#[cfg(test)]
mod tests;

pub use config::{ExtractorConfig, KindSettings};
pub use error::ExtractorError;
pub use extractor::Extractor;
pub use fallback::{quote_or_fallback, FALLBACK_METADATA_TEXT, FALLBACK_QUOTE};
pub use merge::{category_response, merge_category};
pub use normalizer::{normalize, strip_fences, NormalizedText, FENCE};
pub use prompt::PromptBuilder;
pub use recovery::extract_embedded_fragment;
pub use types::{CategorizeResult, ClarifyResult, Extraction};
pub use validator::{parse_metadata, validate_metadata, validate_value, MetadataOutcome, RejectReason};
