//! Weightline WASM Module
//!
//! This crate exposes the shared weight-log derivation pipeline to the
//! browser so the progress screen can recompute statistics, chart series,
//! and the photo feed without a round trip.
//!
//! Entries travel in as JSON; malformed input degrades to the empty-log
//! derivation instead of throwing, so the screen always has something to
//! render.

use chrono::NaiveDate;
use wasm_bindgen::prelude::*;

use weightline_shared::chart::{build_chart_series, ChartWindow};
use weightline_shared::entry::WeightLogEntry;
use weightline_shared::photos::recent_photos;
use weightline_shared::stats::{compute_statistics, GoalWeight};

/// Derive summary statistics from a JSON entry list.
///
/// `goal_weight` is the numeric-as-string goal ("" when unset) and `today`
/// is a `YYYY-MM-DD` date anchoring the trailing windows. Returns the
/// statistics as a JSON object.
#[wasm_bindgen]
pub fn derive_statistics(entries_json: &str, goal_weight: &str, today: &str) -> String {
    let entries = parse_entries(entries_json);
    let goal = GoalWeight::new(goal_weight);
    let stats = compute_statistics(&entries, Some(&goal), parse_day(today));

    to_json(&stats)
}

/// Build the 7-slot chart series for the window containing `today`.
///
/// `window` is `"calendar_week"` or `"trailing_week"`; anything else falls
/// back to the calendar week. Always returns exactly 7 values.
#[wasm_bindgen]
pub fn chart_series(entries_json: &str, window: &str, today: &str) -> Vec<f64> {
    let entries = parse_entries(entries_json);
    let series = build_chart_series(&entries, parse_window(window), parse_day(today));

    series.to_vec()
}

/// The 7 dates the chart window covers, oldest first, as a JSON array of
/// `YYYY-MM-DD` strings.
#[wasm_bindgen]
pub fn chart_dates(window: &str, today: &str) -> String {
    let dates = parse_window(window).dates(parse_day(today));
    let formatted: Vec<String> = dates.iter().map(|d| d.to_string()).collect();

    to_json(&formatted)
}

/// Rank the most recent photos across the log, newest first, capped at
/// `limit`. Returns a JSON array.
#[wasm_bindgen]
pub fn photo_feed(entries_json: &str, limit: usize) -> String {
    let entries = parse_entries(entries_json);
    let feed = recent_photos(&entries, limit);

    to_json(&feed)
}

/// Calculate BMI from weight (kg) and height (cm)
#[wasm_bindgen]
pub fn calculate_bmi(weight_kg: f64, height_cm: f64) -> f64 {
    if height_cm <= 0.0 {
        return 0.0;
    }
    weightline_shared::bmi::calculate_bmi(weight_kg, height_cm)
}

fn parse_entries(entries_json: &str) -> Vec<WeightLogEntry> {
    serde_json::from_str(entries_json).unwrap_or_default()
}

// NaiveDate::default() is the epoch; an unparseable date pushes every
// trailing window out of range rather than tearing the screen down
fn parse_day(value: &str) -> NaiveDate {
    value.parse().unwrap_or_default()
}

fn parse_window(value: &str) -> ChartWindow {
    match value {
        "trailing_week" => ChartWindow::TrailingWeek,
        _ => ChartWindow::CalendarWeek,
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "null".to_string())
}
