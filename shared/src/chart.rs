//! Weekly chart series derivation
//!
//! Turns the weight log into the fixed 7-point series the trend chart
//! renders. The series always has exactly [`CHART_SLOTS`] values, one per
//! day of the selected window, oldest to newest, with 0.0 standing in for
//! days without a reading.
//!
//! The window is an explicit policy. The default matches the product's
//! original behavior (the current Sunday-start calendar week); a rolling
//! trailing window is available where "last 7 days" is the intent.

use std::collections::HashMap;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::entry::{classify, EntryClass, WeightLogEntry};

/// Number of points in a chart series
pub const CHART_SLOTS: usize = 7;

/// Which 7 dates the chart covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ChartWindow {
    /// Sunday through Saturday of the week containing today
    #[default]
    CalendarWeek,
    /// The 7 days ending today
    TrailingWeek,
}

impl ChartWindow {
    /// The canonical dates of the window containing `today`, oldest first
    pub fn dates(&self, today: NaiveDate) -> [NaiveDate; CHART_SLOTS] {
        let start = match self {
            ChartWindow::CalendarWeek => {
                today - Duration::days(today.weekday().num_days_from_sunday() as i64)
            }
            ChartWindow::TrailingWeek => today - Duration::days(CHART_SLOTS as i64 - 1),
        };
        std::array::from_fn(|offset| start + Duration::days(offset as i64))
    }
}

/// Build the 7-point series for the window containing `today`.
///
/// Weight-bearing entries are grouped by `log_date` with same-day duplicates
/// collapsing last-write-wins on `created_at`. Each canonical window date is
/// then looked up in the grouped readings; dates without one yield 0.0, and
/// readings outside the window never appear no matter how recent. An empty
/// log short-circuits to an all-zero series.
pub fn build_chart_series(
    entries: &[WeightLogEntry],
    window: ChartWindow,
    today: NaiveDate,
) -> [f64; CHART_SLOTS] {
    let weights = classify(entries, EntryClass::Weight);
    if weights.is_empty() {
        return [0.0; CHART_SLOTS];
    }

    let mut by_date: HashMap<NaiveDate, &WeightLogEntry> = HashMap::new();
    for entry in weights {
        by_date
            .entry(entry.log_date)
            .and_modify(|kept| {
                if entry.created_at > kept.created_at {
                    *kept = entry;
                }
            })
            .or_insert(entry);
    }

    window
        .dates(today)
        .map(|date| by_date.get(&date).map_or(0.0, |e| e.weight_or_zero()))
}
