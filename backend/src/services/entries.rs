//! Weight entry service
//!
//! Provides business logic for the weight log including:
//! - Entry creation with type derivation and unit conversion
//! - Listing and deletion scoped to the owning user
//! - CSV export of the full log

use crate::error::ApiError;
use crate::repositories::{CreateEntry, EntryRecord, EntryRepository, NewPhoto, PhotoRecord};
use chrono::Utc;
use metrics::counter;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::PgPool;
use std::collections::HashMap;
use tracing::warn;
use uuid::Uuid;
use weightline_shared::entry::{EntryPhoto, EntryType, WeightLogEntry};
use weightline_shared::units::WeightUnit;
use weightline_shared::validation::{
    parse_log_date, validate_photo, validate_photo_count, validate_weight,
};

/// Weight entry input, already normalized by the route layer
#[derive(Debug, Clone)]
pub struct LogEntryInput {
    pub weight: Option<f64>,
    pub unit: WeightUnit,
    pub log_date: Option<String>,
    pub photos: Vec<EntryPhoto>,
}

/// CSV export row for the weight log
#[derive(Debug, Clone, Serialize)]
pub struct EntryCsvRow {
    pub log_date: String,
    pub entry_type: String,
    pub weight_kg: Option<f64>,
    pub photo_count: usize,
}

/// Weight entry service for business logic
pub struct EntryService;

impl EntryService {
    /// Log a weight entry, progress photos, or both
    ///
    /// The entry type is derived from what the request carries rather than
    /// trusted from the client: a weight alone is a `weight` entry, photos
    /// alone a `photo` entry, and both together a `weightwithphoto` entry.
    pub async fn log_entry(
        pool: &PgPool,
        user_id: Uuid,
        input: LogEntryInput,
    ) -> Result<WeightLogEntry, ApiError> {
        let entry_type = derive_entry_type(input.weight, input.photos.len())?;

        let weight_kg = match input.weight {
            Some(value) => {
                let kg = input.unit.to_kg(value);
                validate_weight(kg).map_err(ApiError::Validation)?;
                Some(kg)
            }
            None => None,
        };

        validate_photo_count(input.photos.len()).map_err(ApiError::Validation)?;
        for photo in &input.photos {
            validate_photo(&photo.file_name, &photo.uri).map_err(ApiError::Validation)?;
        }

        let log_date = match input.log_date.as_deref() {
            Some(raw) => parse_log_date(raw).map_err(ApiError::Validation)?,
            None => Utc::now().date_naive(),
        };

        let create_input = CreateEntry {
            user_id,
            entry_type: entry_type.as_str().to_string(),
            weight_kg,
            log_date,
            photos: input
                .photos
                .into_iter()
                .map(|p| NewPhoto {
                    file_name: p.file_name,
                    uri: p.uri,
                })
                .collect(),
        };

        let (record, photos) = EntryRepository::create(pool, create_input)
            .await
            .map_err(ApiError::Internal)?;

        counter!("weightline_entries_created_total").increment(1);

        entry_from_record(record, photos).ok_or_else(|| {
            ApiError::Internal(anyhow::anyhow!("Created entry came back with unknown type"))
        })
    }

    /// Get all entries for a user with their photos attached
    pub async fn list_entries(pool: &PgPool, user_id: Uuid) -> Result<Vec<WeightLogEntry>, ApiError> {
        let records = EntryRepository::list_for_user(pool, user_id)
            .await
            .map_err(ApiError::Internal)?;

        let entry_ids: Vec<Uuid> = records.iter().map(|r| r.id).collect();
        let photos = EntryRepository::photos_for_entries(pool, &entry_ids)
            .await
            .map_err(ApiError::Internal)?;

        let mut by_entry: HashMap<Uuid, Vec<PhotoRecord>> = HashMap::new();
        for photo in photos {
            by_entry.entry(photo.entry_id).or_default().push(photo);
        }

        Ok(records
            .into_iter()
            .filter_map(|record| {
                let photos = by_entry.remove(&record.id).unwrap_or_default();
                entry_from_record(record, photos)
            })
            .collect())
    }

    /// Delete an entry owned by the user
    pub async fn delete_entry(pool: &PgPool, user_id: Uuid, id: Uuid) -> Result<(), ApiError> {
        let deleted = EntryRepository::delete(pool, id, user_id)
            .await
            .map_err(ApiError::Internal)?;

        if !deleted {
            return Err(ApiError::NotFound("Entry not found".to_string()));
        }

        counter!("weightline_entries_deleted_total").increment(1);

        Ok(())
    }

    /// Export the full weight log as CSV
    pub async fn export_csv(pool: &PgPool, user_id: Uuid) -> Result<String, ApiError> {
        let entries = Self::list_entries(pool, user_id).await?;

        let rows: Vec<EntryCsvRow> = entries
            .iter()
            .map(|e| EntryCsvRow {
                log_date: e.log_date.to_string(),
                entry_type: e.entry_type.to_string(),
                weight_kg: e.weight_kg,
                photo_count: e.photos.len(),
            })
            .collect();

        to_csv(&rows)
    }
}

/// Convert data to CSV string
fn to_csv<T: Serialize>(data: &[T]) -> Result<String, ApiError> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    for record in data {
        wtr.serialize(record)
            .map_err(|e| ApiError::Internal(anyhow::anyhow!("CSV serialization error: {}", e)))?;
    }
    let bytes = wtr
        .into_inner()
        .map_err(|e| ApiError::Internal(anyhow::anyhow!("CSV flush error: {}", e)))?;
    String::from_utf8(bytes)
        .map_err(|e| ApiError::Internal(anyhow::anyhow!("CSV encoding error: {}", e)))
}

/// Derive the entry type from what the request carries
fn derive_entry_type(weight: Option<f64>, photo_count: usize) -> Result<EntryType, ApiError> {
    match (weight.is_some(), photo_count > 0) {
        (true, true) => Ok(EntryType::WeightWithPhoto),
        (true, false) => Ok(EntryType::Weight),
        (false, true) => Ok(EntryType::Photo),
        (false, false) => Err(ApiError::Validation(
            "Entry must include a weight or at least one photo".to_string(),
        )),
    }
}

/// Convert a database record and its photos to the shared entry model
///
/// Rows with an unrecognized type are skipped with a warning instead of
/// failing the whole request.
fn entry_from_record(record: EntryRecord, photos: Vec<PhotoRecord>) -> Option<WeightLogEntry> {
    let entry_type = match record.entry_type.parse::<EntryType>() {
        Ok(entry_type) => entry_type,
        Err(_) => {
            warn!(
                entry_id = %record.id,
                entry_type = %record.entry_type,
                "Skipping entry with unknown type"
            );
            return None;
        }
    };

    Some(WeightLogEntry {
        id: record.id,
        entry_type,
        weight_kg: record.weight_kg.as_ref().map(decimal_to_f64),
        log_date: record.log_date,
        created_at: record.created_at,
        photos: photos
            .into_iter()
            .map(|p| EntryPhoto {
                file_name: p.file_name,
                uri: p.uri,
            })
            .collect(),
    })
}

/// Convert Decimal to f64
fn decimal_to_f64(d: &Decimal) -> f64 {
    d.to_f64().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};
    use rstest::rstest;

    fn sample_entry(
        entry_type: EntryType,
        weight_kg: Option<f64>,
        photo_count: usize,
    ) -> WeightLogEntry {
        WeightLogEntry {
            id: Uuid::new_v4(),
            entry_type,
            weight_kg,
            log_date: NaiveDate::from_ymd_opt(2024, 6, 12).unwrap(),
            created_at: Utc.with_ymd_and_hms(2024, 6, 12, 8, 0, 0).unwrap(),
            photos: (0..photo_count)
                .map(|i| EntryPhoto {
                    file_name: format!("photo-{i}.jpg"),
                    uri: format!("https://cdn.example.com/photo-{i}.jpg"),
                })
                .collect(),
        }
    }

    #[rstest]
    #[case(Some(80.0), 0, EntryType::Weight)]
    #[case(None, 2, EntryType::Photo)]
    #[case(Some(80.0), 1, EntryType::WeightWithPhoto)]
    #[case(Some(80.0), 10, EntryType::WeightWithPhoto)]
    fn test_entry_type_derived_from_payload(
        #[case] weight: Option<f64>,
        #[case] photo_count: usize,
        #[case] expected: EntryType,
    ) {
        assert_eq!(derive_entry_type(weight, photo_count).unwrap(), expected);
    }

    #[test]
    fn test_empty_entry_rejected() {
        let result = derive_entry_type(None, 0);
        assert!(matches!(result, Err(ApiError::Validation(_))));
    }

    #[test]
    fn test_record_with_unknown_type_is_skipped() {
        let record = EntryRecord {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            entry_type: "meal".to_string(),
            weight_kg: None,
            log_date: NaiveDate::from_ymd_opt(2024, 6, 12).unwrap(),
            created_at: Utc::now(),
        };
        assert!(entry_from_record(record, Vec::new()).is_none());
    }

    #[test]
    fn test_record_round_trips_weight() {
        let record = EntryRecord {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            entry_type: "weight".to_string(),
            weight_kg: Some(Decimal::new(805, 1)), // 80.5
            log_date: NaiveDate::from_ymd_opt(2024, 6, 12).unwrap(),
            created_at: Utc::now(),
        };
        let entry = entry_from_record(record, Vec::new()).unwrap();
        assert_eq!(entry.entry_type, EntryType::Weight);
        assert_eq!(entry.weight_kg, Some(80.5));
    }

    fn csv_rows(entries: &[WeightLogEntry]) -> Vec<EntryCsvRow> {
        entries
            .iter()
            .map(|e| EntryCsvRow {
                log_date: e.log_date.to_string(),
                entry_type: e.entry_type.to_string(),
                weight_kg: e.weight_kg,
                photo_count: e.photos.len(),
            })
            .collect()
    }

    #[test]
    fn test_csv_has_header_and_one_row_per_entry() {
        let entries = vec![
            sample_entry(EntryType::Weight, Some(80.5), 0),
            sample_entry(EntryType::Photo, None, 2),
        ];
        let text = to_csv(&csv_rows(&entries)).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "log_date,entry_type,weight_kg,photo_count");
        assert_eq!(lines[1], "2024-06-12,weight,80.5,0");
        assert_eq!(lines[2], "2024-06-12,photo,,2");
    }

    #[test]
    fn test_csv_of_empty_log_is_empty() {
        let text = to_csv::<EntryCsvRow>(&[]).unwrap();
        assert!(text.is_empty());
    }
}
