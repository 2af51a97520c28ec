//! Merge a primary category response with its recovered fragment

use crate::normalizer::normalize;
use crate::recovery::extract_embedded_fragment;
use pomotask_domain::category::DEFAULT_CATEGORY;
use pomotask_domain::{CategoryRecord, CategoryResponse, RawCompletion};
use serde_json::{Map, Value};

/// Primary response for a category completion.
///
/// Top-level fields are filled only when the normalized text is itself a
/// JSON object. The trimmed completion text always travels as
/// `description` so [`merge_category`] can recover a buried fragment.
pub fn category_response(raw: &RawCompletion) -> CategoryResponse {
    let Some(text) = raw.as_text().map(str::trim).filter(|t| !t.is_empty()) else {
        return CategoryResponse::default();
    };

    let object = match serde_json::from_str::<Value>(normalize(raw).as_str()) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    };

    CategoryResponse {
        category: text_field(&object, "category"),
        confidence: text_field(&object, "confidence"),
        rationale: text_field(&object, "rationale"),
        description: Some(text.to_string()),
    }
}

/// Build a category record from the categorize endpoint's response.
///
/// For each field the primary value wins, then the fragment recovered from
/// `description`, then the default. Empty strings count as absent.
/// `alternatives` only ever comes from the fragment.
///
/// # Examples
///
/// ```
/// use pomotask_domain::CategoryResponse;
/// use pomotask_extractor::merge_category;
///
/// let response = CategoryResponse {
///     category: Some("Work".to_string()),
///     ..Default::default()
/// };
/// let record = merge_category(&response);
/// assert_eq!(record.category, "Work");
/// assert!(record.alternatives.is_empty());
/// ```
pub fn merge_category(primary: &CategoryResponse) -> CategoryRecord {
    let fragment = extract_embedded_fragment(primary.description.as_deref()).unwrap_or_default();

    CategoryRecord {
        category: pick(primary.category.as_deref(), text_field(&fragment, "category"))
            .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
        confidence: pick(primary.confidence.as_deref(), text_field(&fragment, "confidence")),
        rationale: pick(primary.rationale.as_deref(), text_field(&fragment, "rationale")),
        alternatives: string_items(&fragment, "alternatives"),
    }
}

/// First non-empty of the two candidates
fn pick(primary: Option<&str>, fragment: Option<String>) -> Option<String> {
    primary
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .or_else(|| fragment.filter(|s| !s.is_empty()))
}

/// A fragment field as text. Numbers are rendered, other types ignored.
fn text_field(fragment: &Map<String, Value>, name: &str) -> Option<String> {
    match fragment.get(name)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn string_items(fragment: &Map<String, Value>, name: &str) -> Vec<String> {
    fragment
        .get(name)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
