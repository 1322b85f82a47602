//! Storage collaborator for the mapping layer.
//!
//! This module wraps the embedded CozoDB engine that persists the school schema:
//! - Connection management (SQLite-backed on disk, or in-memory for tests)
//! - Configuration resolution (CLI argument, config file, environment)
//! - Schema definitions and the relationship table (`schema`)
//! - Script execution with parameter binding and row extraction helpers
//!
//! # Architecture
//!
//! CozoDB is a Datalog database. Every record kind is a stored relation whose
//! DDL and row statements are compiled from the static schema in
//! `schema::relations`, so the mapping layer never hand-writes CozoScript.
//!
//! # Type Decisions
//!
//! **Why integer minor units for decimals?**
//! CozoDB has no fixed-point type. Currency columns are stored as `Int` scaled
//! by `10^scale`, which keeps arithmetic exact and ordering correct.
//!
//! **Why ISO-8601 strings for timestamps?**
//! Lexicographic order of the stored string matches chronological order, and
//! the value stays readable when inspecting the database by hand.

mod backend;
mod config;
mod connection;
mod extraction;
mod query;
pub mod schema;

pub use backend::{DatabaseBackend, Params, QueryResult};
pub use config::{Authentication, ConnectionSettings, DatabaseConfig};
pub use connection::{CozoBackend, open_db, open_mem_db};
pub use extraction::{expect_i64, expect_string, extract_i64, extract_string, optional_i64, optional_string};
pub use query::{run_query, run_query_no_params, try_create_relation};

use thiserror::Error;

/// Database error types
#[derive(Error, Debug)]
pub enum DbError {
    #[error("Failed to open database '{path}': {message}")]
    OpenFailed { path: String, message: String },

    #[error("Query failed: {message}")]
    QueryFailed { message: String },

    #[error("Missing column '{name}' in query result")]
    MissingColumn { name: String },

    #[error("Column '{column}' expected {expected}, found {found}")]
    UnexpectedValue {
        column: String,
        expected: &'static str,
        found: String,
    },
}
