//! API request and response types
//!
//! Everything on the wire travels inside a `{ "success": ..., "data": ... }`
//! envelope; errors use `{ "success": false, "error": { code, message } }`.

use serde::{Deserialize, Serialize};

use crate::bmi::BmiReport;
use crate::chart::{ChartWindow, CHART_SLOTS};
use crate::entry::EntryPhoto;
use crate::stats::WeightStatistics;

/// Success envelope wrapping every data-bearing response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Error envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: ErrorDetail,
}

/// Error detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

/// Log entry request. At least one of `weight` and `photos` must be present;
/// the entry type is derived from which ones are.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogEntryRequest {
    /// Weight value in the specified unit (defaults to kg)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    /// Unit of the weight value (kg, lbs, stone)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    /// Date the entry belongs to; `YYYY-MM-DD` or a parseable date-time.
    /// Defaults to today.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_date: Option<String>,
    /// Progress photos in upload order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub photos: Vec<EntryPhoto>,
}

/// Goal update request. An absent or empty `goal_weight` clears the goal.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateGoalRequest {
    /// Target weight as a numeric string, kilograms
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal_weight: Option<String>,
    /// Height in cm, kept on the profile for the BMI block
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height_cm: Option<f64>,
}

/// Progress summary response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressSummaryResponse {
    #[serde(flatten)]
    pub statistics: WeightStatistics,
    /// Present only when height and a current weight are both known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bmi: Option<BmiReport>,
}

/// Chart response: the series plus the dates each slot covers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartResponse {
    pub window: ChartWindow,
    pub dates: [chrono::NaiveDate; CHART_SLOTS],
    pub series: [f64; CHART_SLOTS],
}

/// Chart query parameters
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChartQuery {
    /// Overrides the configured window policy for this request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window: Option<ChartWindow>,
}

/// Photo feed query parameters
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PhotoQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}
