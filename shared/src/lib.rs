//! Weightline Shared Library
//!
//! This crate contains the weight-tracking derivation pipeline plus the
//! types and utilities shared between the backend and WASM modules.

pub mod bmi;
pub mod chart;
pub mod entry;
pub mod photos;
pub mod stats;
pub mod types;
pub mod units;
pub mod validation;

// Re-export commonly used items
pub use bmi::{bmi_report, BmiCategory, BmiReport};
pub use chart::{build_chart_series, ChartWindow, CHART_SLOTS};
pub use entry::{classify, EntryClass, EntryPhoto, EntryType, WeightLogEntry};
pub use photos::{recent_photos, RankedPhoto, DEFAULT_PHOTO_LIMIT};
pub use stats::{compute_statistics, parse_goal_weight, GoalWeight, WeightStatistics};
pub use types::*;

// Export units module items (canonical source for unit types)
pub use units::*;
