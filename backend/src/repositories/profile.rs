//! User profile repository for goal weight and height

use anyhow::Result;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

/// Profile record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProfileRecord {
    pub user_id: Uuid,
    pub goal_weight_kg: Option<Decimal>,
    pub height_cm: Option<Decimal>,
    pub updated_at: DateTime<Utc>,
}

/// Profile repository for database operations
pub struct ProfileRepository;

impl ProfileRepository {
    /// Get a user's profile, if one exists
    pub async fn get(pool: &PgPool, user_id: Uuid) -> Result<Option<ProfileRecord>> {
        let record = sqlx::query_as::<_, ProfileRecord>(
            r#"
            SELECT user_id, goal_weight_kg, height_cm, updated_at
            FROM user_profiles
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    /// Insert or overwrite a user's profile
    ///
    /// Callers merge unchanged fields from the current record first; this
    /// write replaces both columns.
    pub async fn upsert(
        pool: &PgPool,
        user_id: Uuid,
        goal_weight_kg: Option<f64>,
        height_cm: Option<f64>,
    ) -> Result<ProfileRecord> {
        let record = sqlx::query_as::<_, ProfileRecord>(
            r#"
            INSERT INTO user_profiles (user_id, goal_weight_kg, height_cm)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id) DO UPDATE
            SET goal_weight_kg = EXCLUDED.goal_weight_kg,
                height_cm = EXCLUDED.height_cm,
                updated_at = now()
            RETURNING user_id, goal_weight_kg, height_cm, updated_at
            "#,
        )
        .bind(user_id)
        .bind(goal_weight_kg)
        .bind(height_cm)
        .fetch_one(pool)
        .await?;

        Ok(record)
    }
}
