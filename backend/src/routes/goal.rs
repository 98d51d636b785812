//! Goal weight API routes

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::services::profile::ProfileService;
use crate::state::AppState;
use axum::{extract::State, routing::get, Json, Router};
use weightline_shared::stats::GoalWeight;
use weightline_shared::types::{ApiResponse, UpdateGoalRequest};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(get_goal).put(update_goal))
}

/// GET /api/v1/goal - The stored goal weight
///
/// Always serializes as a numeric string; an unset goal is the empty string.
async fn get_goal(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<GoalWeight>>, ApiError> {
    let goal = ProfileService::get_goal(state.db(), auth.user_id).await?;

    Ok(Json(ApiResponse::success(goal)))
}

/// PUT /api/v1/goal - Update the goal weight and optionally height
async fn update_goal(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<UpdateGoalRequest>,
) -> Result<Json<ApiResponse<GoalWeight>>, ApiError> {
    let goal = ProfileService::update_goal(state.db(), auth.user_id, req).await?;

    Ok(Json(ApiResponse::success(goal)))
}
