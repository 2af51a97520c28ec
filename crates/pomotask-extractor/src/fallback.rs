//! Deterministic defaults substituted when a completion is unusable
//!
//! Nothing here returns an error. A fallback is observable only through the
//! `warn!` event it emits.

use crate::validator::MetadataOutcome;
use pomotask_domain::{MetadataRecord, RawCompletion};
use tracing::warn;

/// Text standing in for a completion that carried no message at all
pub const FALLBACK_METADATA_TEXT: &str = r#"{"tm":"30 minutes","rem":"Check task details"}"#;

/// Quote used when the model produced nothing usable
pub const FALLBACK_QUOTE: &str = "Stay focused and keep pushing forward!";

impl MetadataOutcome {
    /// Resolve the outcome to a record, substituting the fallback record on
    /// rejection.
    pub fn or_fallback(self) -> MetadataRecord {
        match self {
            MetadataOutcome::Valid(record) => record,
            MetadataOutcome::Rejected(reason) => {
                warn!("Metadata rejected, using fallback: {}", reason);
                MetadataRecord::fallback()
            }
        }
    }
}

/// Trimmed quote text, or [`FALLBACK_QUOTE`] when there is none
pub fn quote_or_fallback(raw: &RawCompletion) -> String {
    match raw.as_text().map(str::trim) {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => {
            warn!("Quote completion unusable, using fallback");
            FALLBACK_QUOTE.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validator::RejectReason;
    use pomotask_domain::MetadataKey;

    #[test]
    fn test_fallback_text_matches_fallback_record() {
        let value: serde_json::Value = serde_json::from_str(FALLBACK_METADATA_TEXT).unwrap();
        assert_eq!(value, serde_json::to_value(MetadataRecord::fallback()).unwrap());
    }

    #[test]
    fn test_valid_outcome_passes_through() {
        let mut record = MetadataRecord::new();
        record.insert(MetadataKey::Loc, "Gym");
        record.insert(MetadataKey::Nrg, "High");

        let resolved = MetadataOutcome::Valid(record.clone()).or_fallback();
        assert_eq!(resolved, record);
    }

    #[test]
    fn test_rejections_resolve_to_fallback() {
        for reason in [
            RejectReason::Malformed("expected value".to_string()),
            RejectReason::NotAnObject,
            RejectReason::InsufficientFields { found: 1 },
        ] {
            let resolved = MetadataOutcome::Rejected(reason).or_fallback();
            assert_eq!(resolved, MetadataRecord::fallback());
        }
    }

    #[test]
    fn test_quote_fallback() {
        assert_eq!(quote_or_fallback(&RawCompletion::Missing), FALLBACK_QUOTE);
        assert_eq!(quote_or_fallback(&RawCompletion::from("   \n")), FALLBACK_QUOTE);
        assert_eq!(
            quote_or_fallback(&RawCompletion::from("  One pomodoro at a time. ")),
            "One pomodoro at a time."
        );
    }
}
