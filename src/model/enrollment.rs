use std::fmt;

use cozo::DataValue;
use serde::{Deserialize, Serialize};

use super::{Entity, FieldValue, RecordKey, RowReader};
use crate::db::DbError;
use crate::db::schema::{ENROLLMENTS, SchemaRelation};

/// Composite key of an enrollment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EnrollmentKey {
    pub student_id: i64,
    pub course_id: i64,
}

impl RecordKey for EnrollmentKey {
    fn ids(&self) -> Vec<i64> {
        vec![self.student_id, self.course_id]
    }
}

impl fmt::Display for EnrollmentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(student {}, course {})", self.student_id, self.course_id)
    }
}

/// Junction record: a student taking a course, with the grade earned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enrollment {
    pub student_id: i64,
    pub course_id: i64,
    pub grade: i32,
}

impl Enrollment {
    pub fn new(student_id: i64, course_id: i64, grade: i32) -> Self {
        Self {
            student_id,
            course_id,
            grade,
        }
    }
}

impl Entity for Enrollment {
    type Key = EnrollmentKey;
    const RELATION: &'static SchemaRelation = &ENROLLMENTS;

    fn key(&self) -> EnrollmentKey {
        EnrollmentKey {
            student_id: self.student_id,
            course_id: self.course_id,
        }
    }

    fn values(&self) -> Vec<FieldValue> {
        vec![self.student_id.into(), self.course_id.into(), self.grade.into()]
    }

    fn from_row(row: &[DataValue]) -> Result<Self, DbError> {
        let r = RowReader::new(Self::RELATION, row)?;
        Ok(Self {
            student_id: r.int("student_id")?,
            course_id: r.int("course_id")?,
            grade: r.int32("grade")?,
        })
    }
}
