//! Progress derivation service
//!
//! Assembles the progress screen from the weight log: summary statistics,
//! the 7-slot chart series and the recent photo feed. The derivation itself
//! is pure and lives in the shared crate; this service fetches the log,
//! anchors "today" and applies the configured policies.

use crate::config::TrackingConfig;
use crate::error::ApiError;
use crate::repositories::ProfileRepository;
use crate::services::entries::EntryService;
use chrono::Utc;
use metrics::counter;
use rust_decimal::prelude::ToPrimitive;
use sqlx::PgPool;
use uuid::Uuid;
use weightline_shared::bmi::bmi_report;
use weightline_shared::chart::{build_chart_series, ChartWindow};
use weightline_shared::photos::{recent_photos, RankedPhoto};
use weightline_shared::stats::{compute_statistics, GoalWeight};
use weightline_shared::types::{ChartResponse, ProgressSummaryResponse};

/// Progress service for derived read models
pub struct ProgressService;

impl ProgressService {
    /// Summary statistics plus the optional BMI block
    ///
    /// Always succeeds for an authenticated user: an empty log degrades to
    /// all-zero statistics and the BMI block is skipped when height or a
    /// current weight is missing.
    pub async fn summary(
        pool: &PgPool,
        user_id: Uuid,
    ) -> Result<ProgressSummaryResponse, ApiError> {
        let entries = EntryService::list_entries(pool, user_id).await?;
        let profile = ProfileRepository::get(pool, user_id)
            .await
            .map_err(ApiError::Internal)?;

        let goal = profile
            .as_ref()
            .and_then(|p| p.goal_weight_kg.as_ref())
            .map(|d| GoalWeight::new(d.normalize().to_string()));

        let today = Utc::now().date_naive();
        let statistics = compute_statistics(&entries, goal.as_ref(), today);

        let bmi = profile
            .as_ref()
            .and_then(|p| p.height_cm.as_ref())
            .and_then(|d| d.to_f64())
            .and_then(|height_cm| bmi_report(statistics.current_weight, height_cm));

        counter!("weightline_progress_summaries_total").increment(1);

        Ok(ProgressSummaryResponse { statistics, bmi })
    }

    /// The 7-slot chart series, with the dates each slot covers
    ///
    /// The window policy comes from configuration unless the request
    /// overrides it.
    pub async fn chart(
        pool: &PgPool,
        user_id: Uuid,
        tracking: &TrackingConfig,
        window_override: Option<ChartWindow>,
    ) -> Result<ChartResponse, ApiError> {
        let entries = EntryService::list_entries(pool, user_id).await?;
        let today = Utc::now().date_naive();
        let window = window_override.unwrap_or(tracking.chart_window);

        counter!("weightline_chart_builds_total").increment(1);

        Ok(ChartResponse {
            window,
            dates: window.dates(today),
            series: build_chart_series(&entries, window, today),
        })
    }

    /// The recent progress photo feed, newest first
    pub async fn photos(
        pool: &PgPool,
        user_id: Uuid,
        tracking: &TrackingConfig,
        limit: Option<usize>,
    ) -> Result<Vec<RankedPhoto>, ApiError> {
        let entries = EntryService::list_entries(pool, user_id).await?;
        let limit = effective_photo_limit(limit, tracking.photo_limit);

        Ok(recent_photos(&entries, limit))
    }
}

/// Clamp a requested photo count to the configured cap
fn effective_photo_limit(requested: Option<usize>, cap: usize) -> usize {
    requested.unwrap_or(cap).min(cap)
}
