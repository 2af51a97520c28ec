//! Schema validation for metadata completions
//!
//! Validation never fails outright. It produces a [`MetadataOutcome`] and
//! the fallback policy decides what a rejection turns into.

use pomotask_domain::metadata::MIN_METADATA_FIELDS;
use pomotask_domain::{MetadataKey, MetadataRecord};
use serde_json::Value;
use std::fmt;
use tracing::debug;

/// Why a completion was not accepted as metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    /// Text is not JSON
    Malformed(String),

    /// JSON, but not an object
    NotAnObject,

    /// Too few allowed keys survived filtering
    InsufficientFields {
        /// Allowed keys that were present
        found: usize,
    },
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::Malformed(msg) => write!(f, "malformed JSON: {}", msg),
            RejectReason::NotAnObject => write!(f, "top-level JSON value is not an object"),
            RejectReason::InsufficientFields { found } => write!(
                f,
                "insufficient context fields: {} (need {})",
                found, MIN_METADATA_FIELDS
            ),
        }
    }
}

/// Result of validating one completion
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetadataOutcome {
    /// Filtered record meeting the field floor
    Valid(MetadataRecord),

    /// Completion rejected
    Rejected(RejectReason),
}

impl MetadataOutcome {
    /// Whether the completion was accepted
    pub fn is_valid(&self) -> bool {
        matches!(self, MetadataOutcome::Valid(_))
    }

    /// The accepted record, if any
    pub fn record(&self) -> Option<&MetadataRecord> {
        match self {
            MetadataOutcome::Valid(record) => Some(record),
            MetadataOutcome::Rejected(_) => None,
        }
    }
}

/// Parse normalized text and validate it
///
/// # Examples
///
/// ```
/// use pomotask_extractor::{parse_metadata, MetadataOutcome, RejectReason};
///
/// let outcome = parse_metadata(r#"{"tm":"1 hour","foo":"x"}"#);
/// assert_eq!(
///     outcome,
///     MetadataOutcome::Rejected(RejectReason::InsufficientFields { found: 1 })
/// );
/// ```
pub fn parse_metadata(text: &str) -> MetadataOutcome {
    match serde_json::from_str::<Value>(text) {
        Ok(value) => validate_value(&value),
        Err(e) => MetadataOutcome::Rejected(RejectReason::Malformed(e.to_string())),
    }
}

/// Validate an already-parsed JSON value.
///
/// Keys outside [`MetadataKey::ALL`] are dropped. Non-string values are
/// kept as their compact JSON text.
pub fn validate_value(value: &Value) -> MetadataOutcome {
    let Some(object) = value.as_object() else {
        return MetadataOutcome::Rejected(RejectReason::NotAnObject);
    };

    let mut record = MetadataRecord::new();
    for (key, value) in object {
        match MetadataKey::parse(key) {
            Some(key) => record.insert(key, render_value(value)),
            None => debug!("Dropping disallowed metadata key '{}'", key),
        }
    }

    if !record.is_usable() {
        return MetadataOutcome::Rejected(RejectReason::InsufficientFields {
            found: record.len(),
        });
    }

    MetadataOutcome::Valid(record)
}

/// Validate normalized text, falling back on any rejection
pub fn validate_metadata(text: &str) -> MetadataRecord {
    parse_metadata(text).or_fallback()
}

fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::Map;

    fn allowed_key() -> impl Strategy<Value = MetadataKey> {
        prop::sample::select(MetadataKey::ALL.to_vec())
    }

    fn any_key() -> impl Strategy<Value = String> {
        prop_oneof![
            allowed_key().prop_map(|k| k.as_str().to_string()),
            "[a-zA-Z_]{1,8}",
        ]
    }

    fn object_text(pairs: &[(String, String)]) -> String {
        let mut map = Map::new();
        for (k, v) in pairs {
            map.insert(k.clone(), Value::String(v.clone()));
        }
        Value::Object(map).to_string()
    }

    proptest! {
        /// Property: an allowed-only object meeting the floor comes back unchanged
        #[test]
        fn test_allowed_records_round_trip(
            keys in prop::sample::subsequence(MetadataKey::ALL.to_vec(), 2..=7).prop_shuffle(),
            values in prop::collection::vec("[ -~]{0,20}", 7),
        ) {
            let pairs: Vec<(String, String)> = keys
                .iter()
                .zip(values)
                .map(|(k, v)| (k.as_str().to_string(), v))
                .collect();

            let record = validate_metadata(&object_text(&pairs));
            let got: Vec<(String, String)> = record
                .iter()
                .map(|(k, v)| (k.as_str().to_string(), v.to_string()))
                .collect();
            prop_assert_eq!(got, pairs);
        }

        /// Property: disallowed keys never survive validation
        #[test]
        fn test_output_keys_are_allowed(
            pairs in prop::collection::vec((any_key(), "[a-z ]{0,10}"), 0..10),
        ) {
            let record = validate_metadata(&object_text(&pairs));
            for key in record.keys() {
                prop_assert!(MetadataKey::ALL.contains(&key));
                prop_assert!(pairs.iter().any(|(k, _)| k == key.as_str()) || record == MetadataRecord::fallback());
            }
            prop_assert!(record.len() >= MIN_METADATA_FIELDS);
        }

        /// Property: fewer than two allowed keys yields exactly the fallback
        #[test]
        fn test_sparse_objects_fall_back(
            allowed in prop::option::of((allowed_key(), "[a-z]{0,8}")),
            junk in prop::collection::vec(("x[a-z]{0,6}", "[a-z]{0,8}"), 0..5),
        ) {
            let mut pairs: Vec<(String, String)> = junk;
            if let Some((key, value)) = allowed {
                pairs.push((key.as_str().to_string(), value));
            }
            prop_assert_eq!(validate_metadata(&object_text(&pairs)), MetadataRecord::fallback());
        }

        /// Property: text that is not JSON yields exactly the fallback
        #[test]
        fn test_unparseable_text_falls_back(text in "[a-zA-Z ,.!]{0,40}") {
            prop_assert_eq!(validate_metadata(&text), MetadataRecord::fallback());
        }
    }
}
