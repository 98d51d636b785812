//! Database repositories
//!
//! Provides data access layer for database operations.

pub mod entries;
pub mod profile;

pub use entries::{CreateEntry, EntryRecord, EntryRepository, NewPhoto, PhotoRecord};
pub use profile::{ProfileRecord, ProfileRepository};
