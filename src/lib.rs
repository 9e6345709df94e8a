//! # Kennel - a minimal entity mapper for dog records
//!
//! Kennel maps a single `Dog` record type onto a SQLite `dogs` table.
//!
//! Kennel provides:
//! - Schema lifecycle (create/drop of the `dogs` table)
//! - Positional hydration of rows into `Dog` values
//! - Insert/update persistence dispatched by `save`
//! - Lookups by id, by name, find-or-create, and full scans

pub mod dog;
pub mod storage;
pub mod output;
pub mod config;
pub mod ui;


// Re-exports for convenient access
pub use dog::{Dog, RecordState};
pub use storage::{DogStore, Field, SchemaVariant};

/// Result type alias for Kennel operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Kennel operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid row: expected {expected} columns, found {found}")]
    InvalidRow { expected: usize, found: usize },

    #[error("Invalid value in column `{column}`: {reason}")]
    InvalidColumn { column: &'static str, reason: String },

    #[error("Update target missing: no dog with id {0}")]
    UpdateTargetMissing(i64),

    #[error("Dog is already persisted with id {0}")]
    AlreadyPersisted(i64),

    #[error("Dog has not been persisted yet")]
    NotPersisted,

    #[error("Invalid schema variant: {0}")]
    InvalidSchema(String),

    #[error("Storage error: {0}")]
    StoreUnavailable(#[from] rusqlite::Error),
}
