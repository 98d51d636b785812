//! Business logic services
//!
//! Services encapsulate business logic and coordinate between
//! repositories and the shared derivation pipeline.

pub mod entries;
pub mod profile;
pub mod progress;

pub use entries::{EntryService, LogEntryInput};
pub use profile::ProfileService;
pub use progress::ProgressService;
