//! Storage Layer - SQLite-backed persistence
//!
//! System of record is SQLite with a single table:
//! - dogs(id, name, color, breed, instagram)
//!
//! The basic schema variant drops `color` and `instagram`.

pub mod schema;
pub mod sqlite;

pub use schema::{Field, SchemaVariant};
pub use sqlite::{DogStore, DbStats};
