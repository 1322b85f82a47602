//! Typed records of the school schema.
//!
//! Each entity knows its relation, its key, how to list its column values for
//! validation, and how to rebuild itself from a stored row. The mapping layer
//! is generic over `Entity`, so adding a record kind means adding a relation
//! definition and one impl here.

mod assignment;
mod course;
mod department;
mod enrollment;
mod instructor;
mod student;
mod topic;
mod value;

pub use assignment::{Assignment, AssignmentKey};
pub use course::Course;
pub use department::Department;
pub use enrollment::{Enrollment, EnrollmentKey};
pub use instructor::Instructor;
pub use student::Student;
pub use topic::Topic;
pub use value::{DATETIME_FORMAT, FieldValue, RowReader, encode_row, round_to_scale};

use std::fmt;

use cozo::DataValue;

use crate::db::DbError;
use crate::db::schema::SchemaRelation;

/// Primary key of a record. All keys in the schema are integer tuples.
pub trait RecordKey: Copy + Eq + fmt::Debug + fmt::Display {
    /// Key column values in schema key order.
    fn ids(&self) -> Vec<i64>;
}

impl RecordKey for i64 {
    fn ids(&self) -> Vec<i64> {
        vec![*self]
    }
}

/// A record kind persisted in one relation.
pub trait Entity: Clone + fmt::Debug {
    type Key: RecordKey;

    /// Relation this record kind is stored in.
    const RELATION: &'static SchemaRelation;

    fn key(&self) -> Self::Key;

    /// Column values in schema order (key fields first).
    fn values(&self) -> Vec<FieldValue>;

    fn from_row(row: &[DataValue]) -> Result<Self, DbError>;

    /// Called on insert for identity relations with the assigned id.
    fn set_identity(&mut self, _id: i64) {}
}
