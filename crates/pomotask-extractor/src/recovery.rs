//! Recover a JSON object buried in free text

use crate::normalizer::strip_fences;
use serde_json::{Map, Value};

/// Find the JSON object inside a narrative description.
///
/// Fences are stripped first. If the remainder is not an object by itself,
/// each balanced `{...}` span is tried in order of its opening brace until
/// one parses as an object. Returns `None` for absent
/// input and whenever no object can be parsed.
///
/// # Examples
///
/// ```
/// use pomotask_extractor::extract_embedded_fragment;
///
/// let text = "Here you go:\n```json\n{\"category\":\"Study\"}\n```";
/// let fragment = extract_embedded_fragment(Some(text)).unwrap();
/// assert_eq!(fragment["category"], "Study");
///
/// assert!(extract_embedded_fragment(None).is_none());
/// assert!(extract_embedded_fragment(Some("no json here")).is_none());
/// ```
pub fn extract_embedded_fragment(description: Option<&str>) -> Option<Map<String, Value>> {
    let stripped = strip_fences(description?);

    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(&stripped) {
        return Some(map);
    }

    let fragment = stripped
        .match_indices('{')
        .filter_map(|(start, _)| balanced_span(&stripped, start))
        .find_map(|span| match serde_json::from_str::<Value>(span) {
            Ok(Value::Object(map)) => Some(map),
            _ => None,
        });
    fragment
}

/// Slice of the brace-balanced span opening at byte `start` of `text`.
///
/// Braces inside string literals do not count. `None` if the span never
/// closes.
fn balanced_span(text: &str, start: usize) -> Option<&str> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + offset + 1]);
                }
            }
            _ => {}
        }
    }

    None
}
