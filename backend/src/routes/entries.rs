//! Weight entry API routes

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::services::entries::{EntryService, LogEntryInput};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::IntoResponse,
    routing::{delete, get, post},
    Json, Router,
};
use uuid::Uuid;
use weightline_shared::entry::WeightLogEntry;
use weightline_shared::types::{ApiResponse, LogEntryRequest};
use weightline_shared::units::WeightUnit;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(log_entry).get(list_entries))
        .route("/export", get(export_csv))
        .route("/:id", delete(delete_entry))
}

/// Parse weight unit from string, defaulting to kg
fn parse_weight_unit(unit_str: Option<&str>) -> WeightUnit {
    unit_str
        .and_then(|s| s.parse::<WeightUnit>().ok())
        .unwrap_or(WeightUnit::Kg)
}

/// POST /api/v1/entries - Log a weight entry, progress photos, or both
///
/// Accepts weight in any unit (kg, lbs, stone); defaults to kg and stores
/// in kg. The entry type is derived from the payload.
async fn log_entry(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<LogEntryRequest>,
) -> Result<(StatusCode, Json<ApiResponse<WeightLogEntry>>), ApiError> {
    let input = LogEntryInput {
        weight: req.weight,
        unit: parse_weight_unit(req.unit.as_deref()),
        log_date: req.log_date,
        photos: req.photos,
    };

    let entry = EntryService::log_entry(state.db(), auth.user_id, input).await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::success(entry))))
}

/// GET /api/v1/entries - The full weight log, newest first
async fn list_entries(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<WeightLogEntry>>>, ApiError> {
    let entries = EntryService::list_entries(state.db(), auth.user_id).await?;

    Ok(Json(ApiResponse::success(entries)))
}

/// DELETE /api/v1/entries/:id - Delete an entry and its photos
async fn delete_entry(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    EntryService::delete_entry(state.db(), auth.user_id, id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/entries/export - Export the weight log as CSV
async fn export_csv(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<impl IntoResponse, ApiError> {
    let csv = EntryService::export_csv(state.db(), auth.user_id).await?;

    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("text/csv"));
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_static("attachment; filename=\"weight-log.csv\""),
    );

    Ok((headers, csv))
}
