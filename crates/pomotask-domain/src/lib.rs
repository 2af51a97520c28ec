//! PomoTask Domain Layer
//!
//! Core types shared by every PomoTask crate: the records the extraction
//! pipeline produces, the ephemeral task board that stores them, and the
//! trait boundary towards language-model providers.
//!
//! ## Key Concepts
//!
//! - **MetadataRecord**: scheduling hints keyed by a closed set of short keys
//! - **CategoryRecord**: a category classification with optional detail
//! - **RawCompletion**: a model's text, or the sentinel for "no usable response"
//! - **Task / TaskBoard**: presentation-owned, in-memory task list
//!
//! ## Architecture
//!
//! This crate holds no I/O. Provider implementations live in `pomotask-llm`,
//! the pipeline in `pomotask-extractor`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod category;
pub mod completion;
pub mod metadata;
pub mod task;
pub mod traits;

// Re-exports for convenience
pub use category::{CategoryRecord, CategoryResponse};
pub use completion::{ChatMessage, CompletionOptions, ExtractionKind, RawCompletion, Role};
pub use metadata::{MetadataKey, MetadataRecord};
pub use task::{Task, TaskBoard, TaskError, TaskId, TaskStatus};
