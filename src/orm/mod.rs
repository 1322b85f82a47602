//! Mapping layer between typed entities and the storage engine.
//!
//! Every write goes through the same pipeline: validate the record against its
//! schema, check its foreign keys, and only then touch storage. Deletes are
//! planned in full (cascades followed, no-action rules checked) before any row
//! is removed, so a rejected operation never leaves a partial write behind.

pub mod context;
mod enforce;
pub mod query;
mod validate;

pub use context::{RelationStatus, SchoolContext};
pub use query::{Group, Query};

use thiserror::Error;

use crate::db::DbError;

#[derive(Error, Debug)]
pub enum OrmError {
    #[error("Validation failed for {relation}.{field}: {message}")]
    Validation {
        relation: &'static str,
        field: &'static str,
        message: String,
    },

    #[error("Foreign key violation ({constraint}): {message}")]
    ForeignKeyViolation {
        constraint: &'static str,
        message: String,
    },

    #[error("Duplicate key {key} in {relation}")]
    DuplicateKey { relation: &'static str, key: String },

    #[error("No {relation} row with key {key}")]
    NotFound { relation: &'static str, key: String },

    #[error("Storage error: {0}")]
    Storage(#[from] DbError),
}
