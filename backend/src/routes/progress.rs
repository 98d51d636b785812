//! Progress derivation API routes

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::services::progress::ProgressService;
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use weightline_shared::photos::RankedPhoto;
use weightline_shared::types::{
    ApiResponse, ChartQuery, ChartResponse, PhotoQuery, ProgressSummaryResponse,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/summary", get(summary))
        .route("/chart", get(chart))
        .route("/photos", get(photos))
}

/// GET /api/v1/progress/summary - Summary statistics with the optional BMI block
async fn summary(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<ProgressSummaryResponse>>, ApiError> {
    let summary = ProgressService::summary(state.db(), auth.user_id).await?;

    Ok(Json(ApiResponse::success(summary)))
}

/// GET /api/v1/progress/chart - The 7-slot weekly series
///
/// `?window=calendar_week|trailing_week` overrides the configured policy.
async fn chart(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ChartQuery>,
) -> Result<Json<ApiResponse<ChartResponse>>, ApiError> {
    let chart = ProgressService::chart(
        state.db(),
        auth.user_id,
        &state.config().tracking,
        query.window,
    )
    .await?;

    Ok(Json(ApiResponse::success(chart)))
}

/// GET /api/v1/progress/photos - Recent progress photos, newest first
async fn photos(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<PhotoQuery>,
) -> Result<Json<ApiResponse<Vec<RankedPhoto>>>, ApiError> {
    let photos = ProgressService::photos(
        state.db(),
        auth.user_id,
        &state.config().tracking,
        query.limit,
    )
    .await?;

    Ok(Json(ApiResponse::success(photos)))
}
