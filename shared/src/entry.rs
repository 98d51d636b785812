//! Weight log entries and the entry classifier
//!
//! An entry is one logged data point: a weight reading, a set of progress
//! photos, or both. The classifier filters a mixed list down to the subset a
//! derivation cares about without mutating the input.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of data an entry carries. Wire tags are `weight`, `photo` and
/// `weightwithphoto`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    Weight,
    Photo,
    WeightWithPhoto,
}

impl EntryType {
    /// True when the entry holds a weight reading
    pub fn bears_weight(&self) -> bool {
        matches!(self, EntryType::Weight | EntryType::WeightWithPhoto)
    }

    /// True when the entry holds progress photos
    pub fn bears_photos(&self) -> bool {
        matches!(self, EntryType::Photo | EntryType::WeightWithPhoto)
    }

    /// Get the wire/storage tag
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryType::Weight => "weight",
            EntryType::Photo => "photo",
            EntryType::WeightWithPhoto => "weightwithphoto",
        }
    }
}

impl std::fmt::Display for EntryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for EntryType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "weight" => Ok(EntryType::Weight),
            "photo" => Ok(EntryType::Photo),
            "weightwithphoto" => Ok(EntryType::WeightWithPhoto),
            _ => Err(format!("Unknown entry type: {}", s)),
        }
    }
}

/// One photo attachment on an entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryPhoto {
    pub file_name: String,
    pub uri: String,
}

/// One logged data point in a user's weight log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightLogEntry {
    pub id: Uuid,
    pub entry_type: EntryType,
    /// Weight in kilograms; set when the entry type bears weight
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
    /// Calendar date the reading belongs to; time of day carries no meaning
    pub log_date: NaiveDate,
    /// Creation instant, used only to break ties between same-day entries
    pub created_at: DateTime<Utc>,
    /// Photo attachments in upload order, possibly empty
    #[serde(default)]
    pub photos: Vec<EntryPhoto>,
}

impl WeightLogEntry {
    /// Weight for derivations. Missing or non-finite readings coerce to 0.0
    /// so every derived output stays renderable.
    pub fn weight_or_zero(&self) -> f64 {
        match self.weight_kg {
            Some(w) if w.is_finite() => w,
            Some(w) => {
                tracing::warn!(entry_id = %self.id, weight = w, "non-finite weight coerced to 0");
                0.0
            }
            None => {
                if self.entry_type.bears_weight() {
                    tracing::warn!(entry_id = %self.id, "weight-bearing entry has no weight, coerced to 0");
                }
                0.0
            }
        }
    }
}

/// Which subset of a mixed entry list a derivation consumes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryClass {
    /// Entries carrying a weight reading (`weight`, `weightwithphoto`)
    Weight,
    /// Entries carrying photos (`photo`, `weightwithphoto`)
    Photo,
}

impl EntryClass {
    /// Whether an entry type belongs to this class
    pub fn matches(&self, entry_type: EntryType) -> bool {
        match self {
            EntryClass::Weight => entry_type.bears_weight(),
            EntryClass::Photo => entry_type.bears_photos(),
        }
    }
}

/// Filter a mixed entry list down to one class, preserving input order.
/// Pure: the input is only borrowed and never reordered. Empty input yields
/// an empty result.
pub fn classify(entries: &[WeightLogEntry], class: EntryClass) -> Vec<&WeightLogEntry> {
    entries
        .iter()
        .filter(|entry| class.matches(entry.entry_type))
        .collect()
}

/// Newest-first ordering used by the derivations: log date first, creation
/// instant as the tie-breaker. Server order is never trusted; with a stable
/// sort it survives only as the final tie-break.
pub fn newer_first(a: &WeightLogEntry, b: &WeightLogEntry) -> std::cmp::Ordering {
    b.log_date
        .cmp(&a.log_date)
        .then(b.created_at.cmp(&a.created_at))
}
