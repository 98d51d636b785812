//! Progress photo ranking
//!
//! Flattens photo attachments across the log into the carousel feed: newest
//! entries first, each entry's photos in upload order, capped at a limit.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::entry::{classify, newer_first, EntryClass, WeightLogEntry};

/// Default cap on the ranked photo feed
pub const DEFAULT_PHOTO_LIMIT: usize = 10;

/// One photo in the ranked feed, flattened out of its entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedPhoto {
    pub file_name: String,
    pub uri: String,
    /// Date of the entry the photo was logged under
    pub log_date: NaiveDate,
}

/// Rank the most recent photos across the whole log.
///
/// Photo-bearing entries are ordered newest-first by `(log_date,
/// created_at)`; within an entry the photos keep their upload order. At most
/// `limit` photos are returned.
pub fn recent_photos(entries: &[WeightLogEntry], limit: usize) -> Vec<RankedPhoto> {
    let mut bearing = classify(entries, EntryClass::Photo);
    bearing.sort_by(|a, b| newer_first(a, b));

    bearing
        .iter()
        .flat_map(|entry| {
            entry.photos.iter().map(|photo| RankedPhoto {
                file_name: photo.file_name.clone(),
                uri: photo.uri.clone(),
                log_date: entry.log_date,
            })
        })
        .take(limit)
        .collect()
}
