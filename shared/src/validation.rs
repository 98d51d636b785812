//! Input validation functions
//!
//! Strictness lives here, at the write boundary. The derivation pipeline
//! itself never rejects anything; requests that would store garbage do.

use chrono::NaiveDate;

/// Most photos accepted on a single entry
pub const MAX_PHOTOS_PER_ENTRY: usize = 10;

/// Accepted weight range in kg, inclusive
pub const WEIGHT_RANGE_KG: (f64, f64) = (20.0, 500.0);

/// Accepted height range in cm, inclusive
pub const HEIGHT_RANGE_CM: (f64, f64) = (50.0, 300.0);

fn check_range(value: f64, range: (f64, f64), what: &str, unit: &str) -> Result<(), String> {
    if !value.is_finite() {
        return Err(format!("{} must be a finite number", what));
    }
    if value < range.0 || value > range.1 {
        return Err(format!(
            "{} must be between {} and {} {}",
            what, range.0, range.1, unit
        ));
    }
    Ok(())
}

/// Validate a weight value in kg
pub fn validate_weight(weight_kg: f64) -> Result<(), String> {
    check_range(weight_kg, WEIGHT_RANGE_KG, "Weight", "kg")
}

/// Validate a height value in cm
pub fn validate_height_cm(height_cm: f64) -> Result<(), String> {
    check_range(height_cm, HEIGHT_RANGE_CM, "Height", "cm")
}

/// Validate one photo descriptor
pub fn validate_photo(file_name: &str, uri: &str) -> Result<(), String> {
    if file_name.trim().is_empty() {
        return Err("Photo file name cannot be empty".to_string());
    }
    if file_name.len() > 255 {
        return Err("Photo file name too long".to_string());
    }
    if uri.trim().is_empty() {
        return Err("Photo URI cannot be empty".to_string());
    }
    Ok(())
}

/// Validate the number of photos on one entry
pub fn validate_photo_count(count: usize) -> Result<(), String> {
    if count > MAX_PHOTOS_PER_ENTRY {
        return Err(format!(
            "At most {} photos per entry",
            MAX_PHOTOS_PER_ENTRY
        ));
    }
    Ok(())
}

/// Parse a log date leniently: plain `YYYY-MM-DD`, RFC 3339, or a bare
/// date-time with either a space or `T` separator. Only the date portion
/// survives; time of day carries no meaning downstream.
pub fn parse_log_date(raw: &str) -> Result<NaiveDate, String> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.date_naive());
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(raw, format) {
            return Ok(dt.date());
        }
    }
    Err(format!("Unparseable date: {}", raw))
}
