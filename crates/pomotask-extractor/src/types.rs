//! Results returned by the Extractor

use crate::merge::merge_category;
use pomotask_domain::{CategoryRecord, CategoryResponse, ExtractionKind, MetadataRecord};
use serde::{Deserialize, Serialize};

/// Validated metadata for one task
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClarifyResult {
    /// Title exactly as the caller supplied it
    pub original_task: String,

    /// Filtered record, or the fallback record
    pub task_context: MetadataRecord,
}

/// Category classification for one task, in its transport shape
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorizeResult {
    /// Title exactly as the caller supplied it
    pub original_task: String,

    /// Top-level fields plus the narrative description
    #[serde(flatten)]
    pub response: CategoryResponse,
}

impl CategorizeResult {
    /// Merge the response into a record
    pub fn record(&self) -> CategoryRecord {
        merge_category(&self.response)
    }
}

/// Output of [`Extractor::extract`](crate::Extractor::extract)
#[derive(Debug, Clone, PartialEq)]
pub enum Extraction {
    /// Result of a metadata extraction
    Metadata(ClarifyResult),

    /// Result of a category extraction
    Category(CategorizeResult),

    /// A motivational quote
    Quote(String),
}

impl Extraction {
    /// Which kind produced this extraction
    pub fn kind(&self) -> ExtractionKind {
        match self {
            Extraction::Metadata(_) => ExtractionKind::Metadata,
            Extraction::Category(_) => ExtractionKind::Category,
            Extraction::Quote(_) => ExtractionKind::Quote,
        }
    }
}
