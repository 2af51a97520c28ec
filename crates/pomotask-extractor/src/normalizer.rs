//! Strip formatting artifacts from raw model output

use crate::fallback::FALLBACK_METADATA_TEXT;
use pomotask_domain::RawCompletion;
use std::fmt;

/// Markdown code-fence delimiter
pub const FENCE: &str = "```";

/// Language tag that may follow an opening fence
const JSON_TAG: &str = "json";

/// Completion text with every fence delimiter and surrounding whitespace removed.
///
/// Only [`normalize`] constructs this type, so a value never contains
/// [`FENCE`]. It may still be invalid JSON.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedText(String);

impl NormalizedText {
    /// Borrow the text
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Take the text
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl AsRef<str> for NormalizedText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NormalizedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Normalize a raw completion.
///
/// A `Missing` completion becomes the literal metadata fallback text, so the
/// caller always has something to parse.
///
/// # Examples
///
/// ```
/// use pomotask_domain::RawCompletion;
/// use pomotask_extractor::normalize;
///
/// let raw = RawCompletion::from("```json\n{\"tm\":\"5 minutes\"}\n```");
/// assert_eq!(normalize(&raw).as_str(), r#"{"tm":"5 minutes"}"#);
///
/// let missing = normalize(&RawCompletion::Missing);
/// assert_eq!(missing.as_str(), r#"{"tm":"30 minutes","rem":"Check task details"}"#);
/// ```
pub fn normalize(raw: &RawCompletion) -> NormalizedText {
    match raw {
        RawCompletion::Text(text) => NormalizedText(strip_fences(text)),
        RawCompletion::Missing => NormalizedText(FALLBACK_METADATA_TEXT.to_string()),
    }
}

/// Remove every fence delimiter from `text`, then trim.
///
/// Passes repeat until no delimiter is left.
pub fn strip_fences(text: &str) -> String {
    let mut current = remove_fences_once(text);
    while current.contains(FENCE) {
        current = remove_fences_once(&current);
    }
    current.trim().to_string()
}

/// One left-to-right pass removing each ```` ``` ````, an optional
/// case-insensitive `json` tag right after it, and one following line break.
fn remove_fences_once(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(pos) = rest.find(FENCE) {
        out.push_str(&rest[..pos]);
        rest = &rest[pos + FENCE.len()..];

        if rest
            .get(..JSON_TAG.len())
            .is_some_and(|tag| tag.eq_ignore_ascii_case(JSON_TAG))
        {
            rest = &rest[JSON_TAG.len()..];
        }

        rest = rest
            .strip_prefix("\r\n")
            .or_else(|| rest.strip_prefix('\n'))
            .unwrap_or(rest);
    }

    out.push_str(rest);
    out
}
