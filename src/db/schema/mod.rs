//! Storage-agnostic schema definitions.
//!
//! The schema system consists of three components:
//!
//! 1. **Core Types** (`definition.rs`):
//!    - `DataType` - column types (String, Int, Decimal, DateTime)
//!    - `SchemaField` - a column with its validation constraints
//!    - `SchemaRelation` - a complete relation with key and value fields
//!
//! 2. **Relation Definitions** (`relations.rs`):
//!    - `STUDENTS`, `INSTRUCTORS`, `COURSES`, `DEPARTMENTS`, `TOPICS`,
//!      `ENROLLMENTS`, `ASSIGNMENTS` and the internal `SEQUENCES`
//!    - `ALL_RELATIONS` - slice in creation order
//!
//! 3. **Relationship Map** (`foreign_keys.rs`):
//!    - `FOREIGN_KEYS` - child column, parent relation and delete rule
//!
//! # Type Mapping
//!
//! | Rust Type | Cozo Type | Relational Type |
//! |-----------|-----------|-----------------|
//! | String | String | nvarchar |
//! | Int | Int | int |
//! | Decimal | Int (minor units) | decimal(p,s) |
//! | DateTime | String (ISO-8601) | datetime2 |

pub mod compilers;
mod definition;
mod foreign_keys;
mod relations;

pub use compilers::CozoCompiler;

pub use definition::{DataType, SchemaField, SchemaRelation};
pub use foreign_keys::{DeleteRule, FOREIGN_KEYS, ForeignKey, foreign_keys_of, references_to};
pub use relations::{
    ALL_RELATIONS, ASSIGNMENTS, COURSES, DEPARTMENTS, ENROLLMENTS, INSTRUCTORS, SEQUENCES, STUDENTS,
    TOPICS,
};
