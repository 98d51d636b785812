//! Weight statistics aggregation
//!
//! Reduces a user's weight log plus an optional goal into the summary values
//! the progress screen renders: current weight, starting weight, total lost
//! and the trailing 30/90-day losses. Everything is recomputed from scratch
//! on every call; nothing here keeps state.
//!
//! Missing or malformed numeric inputs coerce to 0.0 and are logged, never
//! raised. The caller always gets a renderable result.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::entry::{classify, newer_first, EntryClass, WeightLogEntry};

/// Trailing windows surfaced in the statistics, in days
pub const STATS_WINDOWS: [i64; 2] = [30, 90];

/// User goal as it travels on the wire: a numeric-as-string field.
/// An absent or empty string means no goal is set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalWeight {
    pub goal_weight: String,
}

impl GoalWeight {
    pub fn new(goal_weight: impl Into<String>) -> Self {
        Self {
            goal_weight: goal_weight.into(),
        }
    }
}

/// Summary statistics derived from the weight log. All values are kilograms
/// with 0.0 standing in for "not derivable".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeightStatistics {
    pub current_weight: f64,
    pub starting_weight: f64,
    pub goal_weight: f64,
    /// Starting minus current; positive means loss
    pub weight_lost: f64,
    pub weight_lost_30_days: f64,
    pub weight_lost_90_days: f64,
}

/// Leniently parse the numeric-as-string goal. Unset or empty goals are the
/// normal "no goal" case and map silently to 0.0; anything non-numeric is
/// coerced to 0.0 with a warning.
pub fn parse_goal_weight(goal: Option<&GoalWeight>) -> f64 {
    let Some(goal) = goal else {
        return 0.0;
    };
    let raw = goal.goal_weight.trim();
    if raw.is_empty() {
        return 0.0;
    }
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => {
            tracing::warn!(goal_weight = raw, "unparseable goal weight coerced to 0");
            0.0
        }
    }
}

/// Compute summary statistics from the full entry list.
///
/// The weight-bearing subset is re-ordered newest-first by
/// `(log_date, created_at)` rather than trusting input position, so the
/// result is independent of how the caller fetched the entries. `today`
/// anchors the trailing windows and is injected for determinism.
pub fn compute_statistics(
    entries: &[WeightLogEntry],
    goal: Option<&GoalWeight>,
    today: NaiveDate,
) -> WeightStatistics {
    let mut weights = classify(entries, EntryClass::Weight);
    weights.sort_by(|a, b| newer_first(a, b));

    let current_weight = weights.first().map_or(0.0, |e| e.weight_or_zero());
    let starting_weight = weights.last().map_or(0.0, |e| e.weight_or_zero());
    let weight_lost = if weights.is_empty() {
        0.0
    } else {
        starting_weight - current_weight
    };

    WeightStatistics {
        current_weight,
        starting_weight,
        goal_weight: parse_goal_weight(goal),
        weight_lost,
        weight_lost_30_days: lost_in_window(&weights, current_weight, today, STATS_WINDOWS[0]),
        weight_lost_90_days: lost_in_window(&weights, current_weight, today, STATS_WINDOWS[1]),
    }
}

/// Loss within a trailing window: weight of the oldest in-window entry minus
/// the current weight. `weights` must already be newest-first. No entries in
/// the window means 0.0.
fn lost_in_window(
    weights: &[&WeightLogEntry],
    current_weight: f64,
    today: NaiveDate,
    days: i64,
) -> f64 {
    let cutoff = today - Duration::days(days);
    weights
        .iter()
        .filter(|e| e.log_date >= cutoff)
        .last()
        .map_or(0.0, |oldest| oldest.weight_or_zero() - current_weight)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::tests::{date, entry, instant};
    use crate::entry::EntryType;
    use proptest::prelude::*;

    fn weight_entry(weight: f64, log_date: NaiveDate, secs: i64) -> WeightLogEntry {
        entry(EntryType::Weight, Some(weight), log_date, instant(secs))
    }

    fn today() -> NaiveDate {
        date(2024, 6, 15)
    }

    #[test]
    fn empty_log_degrades_to_zero_statistics() {
        let stats = compute_statistics(&[], None, today());
        assert_eq!(stats, WeightStatistics::default());
    }

    #[test]
    fn loss_sign_convention_is_starting_minus_current() {
        // Newest-first input: 80 today, 85 last month, 90 at the start.
        let entries = vec![
            weight_entry(80.0, date(2024, 6, 10), 3),
            weight_entry(85.0, date(2024, 5, 10), 2),
            weight_entry(90.0, date(2024, 4, 10), 1),
        ];
        let stats = compute_statistics(&entries, None, today());
        assert_eq!(stats.current_weight, 80.0);
        assert_eq!(stats.starting_weight, 90.0);
        assert_eq!(stats.weight_lost, 10.0);
    }

    #[test]
    fn input_order_does_not_change_the_result() {
        let mut entries = vec![
            weight_entry(80.0, date(2024, 6, 10), 3),
            weight_entry(85.0, date(2024, 5, 10), 2),
            weight_entry(90.0, date(2024, 4, 10), 1),
        ];
        let newest_first = compute_statistics(&entries, None, today());
        entries.reverse();
        let oldest_first = compute_statistics(&entries, None, today());
        assert_eq!(newest_first, oldest_first);
    }

    #[test]
    fn trailing_windows_use_oldest_in_window() {
        let entries = vec![
            weight_entry(80.0, date(2024, 6, 10), 4),
            weight_entry(83.0, date(2024, 5, 25), 3),
            weight_entry(86.0, date(2024, 4, 1), 2),
            weight_entry(90.0, date(2024, 1, 1), 1),
        ];
        let stats = compute_statistics(&entries, None, today());
        // 30-day window reaches back to 2024-05-16: oldest inside is 83.
        assert_eq!(stats.weight_lost_30_days, 3.0);
        // 90-day window reaches back to 2024-03-17: oldest inside is 86.
        assert_eq!(stats.weight_lost_90_days, 6.0);
    }

    #[test]
    fn window_with_no_entries_is_zero() {
        let entries = vec![weight_entry(88.0, date(2023, 1, 1), 1)];
        let stats = compute_statistics(&entries, None, today());
        assert_eq!(stats.weight_lost_30_days, 0.0);
        assert_eq!(stats.weight_lost_90_days, 0.0);
        // Overall loss still derives from the full log.
        assert_eq!(stats.weight_lost, 0.0);
        assert_eq!(stats.current_weight, 88.0);
    }

    #[test]
    fn same_day_entries_break_ties_on_creation_instant() {
        let entries = vec![
            weight_entry(82.0, date(2024, 6, 10), 10),
            weight_entry(81.0, date(2024, 6, 10), 20),
        ];
        let stats = compute_statistics(&entries, None, today());
        // The later-created reading wins the "current" slot.
        assert_eq!(stats.current_weight, 81.0);
        assert_eq!(stats.starting_weight, 82.0);
    }

    #[test]
    fn photo_only_entries_are_ignored() {
        let entries = vec![
            entry(EntryType::Photo, None, date(2024, 6, 12), instant(5)),
            weight_entry(84.0, date(2024, 6, 10), 4),
        ];
        let stats = compute_statistics(&entries, None, today());
        assert_eq!(stats.current_weight, 84.0);
        assert_eq!(stats.starting_weight, 84.0);
    }

    #[test]
    fn goal_weight_parses_leniently() {
        let entries = vec![weight_entry(80.0, date(2024, 6, 10), 1)];

        let set = compute_statistics(&entries, Some(&GoalWeight::new("75.5")), today());
        assert_eq!(set.goal_weight, 75.5);

        let empty = compute_statistics(&entries, Some(&GoalWeight::new("")), today());
        assert_eq!(empty.goal_weight, 0.0);

        let junk = compute_statistics(&entries, Some(&GoalWeight::new("seventy")), today());
        assert_eq!(junk.goal_weight, 0.0);

        let absent = compute_statistics(&entries, None, today());
        assert_eq!(absent.goal_weight, 0.0);
    }

    #[test]
    fn parse_goal_weight_rejects_non_finite() {
        assert_eq!(parse_goal_weight(Some(&GoalWeight::new("inf"))), 0.0);
        assert_eq!(parse_goal_weight(Some(&GoalWeight::new("NaN"))), 0.0);
        assert_eq!(parse_goal_weight(Some(&GoalWeight::new(" 75.5 "))), 75.5);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: statistics never panic and never produce non-finite
        /// numbers, whatever the log looks like.
        #[test]
        fn prop_statistics_are_always_finite(
            weights in prop::collection::vec(20.0f64..500.0, 0..30),
            day_offsets in prop::collection::vec(0u32..365, 0..30),
        ) {
            let entries: Vec<WeightLogEntry> = weights
                .iter()
                .zip(day_offsets.iter())
                .enumerate()
                .map(|(i, (w, d))| {
                    weight_entry(*w, date(2024, 1, 1) + Duration::days(*d as i64), i as i64)
                })
                .collect();

            let stats = compute_statistics(&entries, Some(&GoalWeight::new("75")), date(2024, 12, 31));
            prop_assert!(stats.current_weight.is_finite());
            prop_assert!(stats.starting_weight.is_finite());
            prop_assert!(stats.weight_lost.is_finite());
            prop_assert!(stats.weight_lost_30_days.is_finite());
            prop_assert!(stats.weight_lost_90_days.is_finite());
        }

        /// Property: weight_lost is exactly starting minus current.
        #[test]
        fn prop_loss_is_starting_minus_current(
            weights in prop::collection::vec(20.0f64..500.0, 1..30),
        ) {
            let entries: Vec<WeightLogEntry> = weights
                .iter()
                .enumerate()
                .map(|(i, w)| {
                    weight_entry(*w, date(2024, 1, 1) + Duration::days(i as i64), i as i64)
                })
                .collect();

            let stats = compute_statistics(&entries, None, date(2024, 12, 31));
            prop_assert!((stats.weight_lost - (stats.starting_weight - stats.current_weight)).abs() < 1e-9);
        }
    }
}
