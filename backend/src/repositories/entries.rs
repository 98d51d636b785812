//! Weight entry repository for database operations

use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

/// Weight entry record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct EntryRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub entry_type: String,
    pub weight_kg: Option<Decimal>,
    pub log_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

/// Progress photo record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PhotoRecord {
    pub id: Uuid,
    pub entry_id: Uuid,
    pub file_name: String,
    pub uri: String,
    pub position: i32,
}

/// Photo attached to an entry being created
#[derive(Debug, Clone)]
pub struct NewPhoto {
    pub file_name: String,
    pub uri: String,
}

/// Input for creating a weight entry
#[derive(Debug, Clone)]
pub struct CreateEntry {
    pub user_id: Uuid,
    pub entry_type: String,
    pub weight_kg: Option<f64>,
    pub log_date: NaiveDate,
    pub photos: Vec<NewPhoto>,
}

/// Weight entry repository for database operations
pub struct EntryRepository;

impl EntryRepository {
    /// Create a new weight entry together with its photos
    ///
    /// The entry and its photos are written in one transaction so a failed
    /// photo insert never leaves a partial entry behind.
    pub async fn create(pool: &PgPool, input: CreateEntry) -> Result<(EntryRecord, Vec<PhotoRecord>)> {
        let mut tx = pool.begin().await?;

        let record = sqlx::query_as::<_, EntryRecord>(
            r#"
            INSERT INTO weight_entries (user_id, entry_type, weight_kg, log_date)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, entry_type, weight_kg, log_date, created_at
            "#,
        )
        .bind(input.user_id)
        .bind(&input.entry_type)
        .bind(input.weight_kg)
        .bind(input.log_date)
        .fetch_one(&mut *tx)
        .await?;

        let mut photos = Vec::with_capacity(input.photos.len());
        for (position, photo) in input.photos.iter().enumerate() {
            let saved = sqlx::query_as::<_, PhotoRecord>(
                r#"
                INSERT INTO entry_photos (entry_id, file_name, uri, position)
                VALUES ($1, $2, $3, $4)
                RETURNING id, entry_id, file_name, uri, position
                "#,
            )
            .bind(record.id)
            .bind(&photo.file_name)
            .bind(&photo.uri)
            .bind(position as i32)
            .fetch_one(&mut *tx)
            .await?;
            photos.push(saved);
        }

        tx.commit().await?;

        Ok((record, photos))
    }

    /// Get all weight entries for a user, newest first
    pub async fn list_for_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<EntryRecord>> {
        let records = sqlx::query_as::<_, EntryRecord>(
            r#"
            SELECT id, user_id, entry_type, weight_kg, log_date, created_at
            FROM weight_entries
            WHERE user_id = $1
            ORDER BY log_date DESC, created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(records)
    }

    /// Get the photos for a set of entries, in upload order per entry
    pub async fn photos_for_entries(pool: &PgPool, entry_ids: &[Uuid]) -> Result<Vec<PhotoRecord>> {
        if entry_ids.is_empty() {
            return Ok(Vec::new());
        }

        let records = sqlx::query_as::<_, PhotoRecord>(
            r#"
            SELECT id, entry_id, file_name, uri, position
            FROM entry_photos
            WHERE entry_id = ANY($1)
            ORDER BY entry_id, position
            "#,
        )
        .bind(entry_ids)
        .fetch_all(pool)
        .await?;

        Ok(records)
    }

    /// Delete a weight entry
    ///
    /// Photos go with it via the foreign key cascade.
    pub async fn delete(pool: &PgPool, id: Uuid, user_id: Uuid) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM weight_entries
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
