//! Profile service - business logic for the goal weight and height settings

use crate::error::ApiError;
use crate::repositories::{ProfileRecord, ProfileRepository};
use rust_decimal::prelude::ToPrimitive;
use sqlx::PgPool;
use uuid::Uuid;
use weightline_shared::stats::GoalWeight;
use weightline_shared::types::UpdateGoalRequest;
use weightline_shared::validation::{validate_height_cm, validate_weight};

/// Profile service for goal and height operations
pub struct ProfileService;

impl ProfileService {
    /// Get the user's goal weight in its wire form
    ///
    /// No stored goal serializes as an empty string; the statistics
    /// pipeline renders that as 0.0.
    pub async fn get_goal(pool: &PgPool, user_id: Uuid) -> Result<GoalWeight, ApiError> {
        let profile = ProfileRepository::get(pool, user_id)
            .await
            .map_err(ApiError::Internal)?;

        Ok(goal_of(profile.as_ref()))
    }

    /// Update goal weight and height
    ///
    /// Fields absent from the request keep their stored values. An empty
    /// goal string clears the goal.
    pub async fn update_goal(
        pool: &PgPool,
        user_id: Uuid,
        req: UpdateGoalRequest,
    ) -> Result<GoalWeight, ApiError> {
        let existing = ProfileRepository::get(pool, user_id)
            .await
            .map_err(ApiError::Internal)?;

        let goal_weight_kg = match req.goal_weight.as_deref() {
            Some(raw) => parse_goal_update(raw)?,
            None => existing
                .as_ref()
                .and_then(|p| p.goal_weight_kg.as_ref())
                .and_then(|d| d.to_f64()),
        };

        let height_cm = match req.height_cm {
            Some(height) => {
                validate_height_cm(height).map_err(ApiError::Validation)?;
                Some(height)
            }
            None => existing
                .as_ref()
                .and_then(|p| p.height_cm.as_ref())
                .and_then(|d| d.to_f64()),
        };

        let record = ProfileRepository::upsert(pool, user_id, goal_weight_kg, height_cm)
            .await
            .map_err(ApiError::Internal)?;

        Ok(goal_of(Some(&record)))
    }
}

/// Strictly parse a goal update from the wire
///
/// Reads stay lenient so the screen always renders, but writes reject junk
/// up front. An empty string clears the goal.
fn parse_goal_update(raw: &str) -> Result<Option<f64>, ApiError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let value: f64 = trimmed
        .parse()
        .map_err(|_| ApiError::Validation(format!("Goal weight is not a number: {raw}")))?;
    validate_weight(value).map_err(ApiError::Validation)?;

    Ok(Some(value))
}

/// Wire form of the stored goal, trailing zeros stripped
fn goal_of(profile: Option<&ProfileRecord>) -> GoalWeight {
    GoalWeight::new(
        profile
            .and_then(|p| p.goal_weight_kg.as_ref())
            .map(|d| d.normalize().to_string())
            .unwrap_or_default(),
    )
}
