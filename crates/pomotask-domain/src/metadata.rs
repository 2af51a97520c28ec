//! Metadata module - scheduling hints attached to a task
//!
//! The set of accepted keys is declared once, in [`MetadataKey`]. Both the
//! validator's allow-list and the label table used for rendering derive from
//! it, so what is accepted and what is rendered cannot drift apart.

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;

/// Time value of the fallback record
pub const FALLBACK_TIME: &str = "30 minutes";

/// Reminder value of the fallback record
pub const FALLBACK_REMINDER: &str = "Check task details";

/// Minimum number of keys a record must carry to be usable
pub const MIN_METADATA_FIELDS: usize = 2;

/// Label used for a free-text description rendered next to metadata
pub const DESCRIPTION_LABEL: &str = "Description";

/// A key in the metadata allow-list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MetadataKey {
    /// Time needed
    Tm,
    /// Best time
    Bt,
    /// Prerequisites
    Pre,
    /// Energy level
    Nrg,
    /// Reminder
    Rem,
    /// Location
    Loc,
    /// Tools
    Tl,
}

impl MetadataKey {
    /// Every allowed key, in canonical order
    pub const ALL: [MetadataKey; 7] = [
        MetadataKey::Tm,
        MetadataKey::Bt,
        MetadataKey::Pre,
        MetadataKey::Nrg,
        MetadataKey::Rem,
        MetadataKey::Loc,
        MetadataKey::Tl,
    ];

    /// Wire name of the key
    pub fn as_str(&self) -> &'static str {
        match self {
            MetadataKey::Tm => "tm",
            MetadataKey::Bt => "bt",
            MetadataKey::Pre => "pre",
            MetadataKey::Nrg => "nrg",
            MetadataKey::Rem => "rem",
            MetadataKey::Loc => "loc",
            MetadataKey::Tl => "tl",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            MetadataKey::Tm => "Time needed",
            MetadataKey::Bt => "Best time",
            MetadataKey::Pre => "Prerequisites",
            MetadataKey::Nrg => "Energy level",
            MetadataKey::Rem => "Reminder",
            MetadataKey::Loc => "Location",
            MetadataKey::Tl => "Tools",
        }
    }

    /// Look up a key by its exact wire name
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == s)
    }
}

impl fmt::Display for MetadataKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for MetadataKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Unknown metadata key: {}", s))
    }
}

/// Render label for an arbitrary key.
///
/// Allowed keys map to their label, `description` maps to
/// [`DESCRIPTION_LABEL`], anything else is shown as-is.
pub fn label_for(key: &str) -> &str {
    if key == "description" {
        return DESCRIPTION_LABEL;
    }
    MetadataKey::parse(key).map(|k| k.label()).unwrap_or(key)
}

/// Scheduling hints for a task, keyed by [`MetadataKey`].
///
/// Entries keep insertion order, which for validated records is the order
/// the model emitted them in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataRecord {
    entries: Vec<(MetadataKey, String)>,
}

impl MetadataRecord {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// The fixed record substituted whenever extraction fails
    ///
    /// # Examples
    ///
    /// ```
    /// use pomotask_domain::{MetadataKey, MetadataRecord};
    ///
    /// let record = MetadataRecord::fallback();
    /// assert_eq!(record.get(MetadataKey::Tm), Some("30 minutes"));
    /// assert_eq!(record.get(MetadataKey::Rem), Some("Check task details"));
    /// assert_eq!(record.len(), 2);
    /// ```
    pub fn fallback() -> Self {
        let mut record = Self::new();
        record.insert(MetadataKey::Tm, FALLBACK_TIME);
        record.insert(MetadataKey::Rem, FALLBACK_REMINDER);
        record
    }

    /// Set a value. An existing key keeps its position.
    pub fn insert(&mut self, key: MetadataKey, value: impl Into<String>) {
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Get the value for a key
    pub fn get(&self, key: MetadataKey) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Whether the record carries a key
    pub fn contains(&self, key: MetadataKey) -> bool {
        self.get(key).is_some()
    }

    /// Number of keys present
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no keys are present
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether the record meets the minimum-field floor
    pub fn is_usable(&self) -> bool {
        self.len() >= MIN_METADATA_FIELDS
    }

    /// Keys in record order
    pub fn keys(&self) -> impl Iterator<Item = MetadataKey> + '_ {
        self.entries.iter().map(|(k, _)| *k)
    }

    /// Entries in record order
    pub fn iter(&self) -> impl Iterator<Item = (MetadataKey, &str)> {
        self.entries.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// Entries paired with their human-readable label
    pub fn labeled(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.iter().map(|(k, v)| (k.label(), v))
    }
}

impl Serialize for MetadataRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key.as_str(), value)?;
        }
        map.end()
    }
}
