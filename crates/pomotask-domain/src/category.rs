//! Category module - task classification records

use serde::{Deserialize, Serialize};

/// Category used when no source supplies one
pub const DEFAULT_CATEGORY: &str = "Uncategorized";

/// Categories the classifier is asked to choose from, and the choices
/// offered when a user overrides a category by hand.
pub const CATEGORY_CHOICES: [&str; 7] = [
    "Work", "Personal", "Study", "Health", "Finance", "Leisure", "Other",
];

/// Primary response of the categorize endpoint
///
/// Any field may be missing. `description` is free text that may itself
/// bury a JSON fragment with the same fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryResponse {
    /// Category name
    #[serde(default)]
    pub category: Option<String>,

    /// Confidence as reported by the model
    #[serde(default)]
    pub confidence: Option<String>,

    /// Why the category was chosen
    #[serde(default)]
    pub rationale: Option<String>,

    /// Narrative text returned alongside (or instead of) the fields above
    #[serde(default)]
    pub description: Option<String>,
}

/// Merged category classification for a task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRecord {
    /// Category name, never empty
    pub category: String,

    /// Confidence, if any source reported one
    pub confidence: Option<String>,

    /// Rationale, if any source reported one
    pub rationale: Option<String>,

    /// Alternative categories
    #[serde(default)]
    pub alternatives: Vec<String>,
}

impl Default for CategoryRecord {
    fn default() -> Self {
        Self {
            category: DEFAULT_CATEGORY.to_string(),
            confidence: None,
            rationale: None,
            alternatives: Vec::new(),
        }
    }
}
