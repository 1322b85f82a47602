use std::fmt;

use cozo::DataValue;
use serde::{Deserialize, Serialize};

use super::{Entity, FieldValue, RecordKey, RowReader};
use crate::db::DbError;
use crate::db::schema::{ASSIGNMENTS, SchemaRelation};

/// Composite key of an assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssignmentKey {
    pub instructor_id: i64,
    pub course_id: i64,
}

impl RecordKey for AssignmentKey {
    fn ids(&self) -> Vec<i64> {
        vec![self.instructor_id, self.course_id]
    }
}

impl fmt::Display for AssignmentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(instructor {}, course {})", self.instructor_id, self.course_id)
    }
}

/// Junction record: an instructor teaching a course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub instructor_id: i64,
    pub course_id: i64,
    pub evaluation: Option<String>,
}

impl Assignment {
    pub fn new(instructor_id: i64, course_id: i64) -> Self {
        Self {
            instructor_id,
            course_id,
            evaluation: None,
        }
    }

    pub fn with_evaluation(mut self, evaluation: impl Into<String>) -> Self {
        self.evaluation = Some(evaluation.into());
        self
    }
}

impl Entity for Assignment {
    type Key = AssignmentKey;
    const RELATION: &'static SchemaRelation = &ASSIGNMENTS;

    fn key(&self) -> AssignmentKey {
        AssignmentKey {
            instructor_id: self.instructor_id,
            course_id: self.course_id,
        }
    }

    fn values(&self) -> Vec<FieldValue> {
        vec![
            self.instructor_id.into(),
            self.course_id.into(),
            self.evaluation.clone().into(),
        ]
    }

    fn from_row(row: &[DataValue]) -> Result<Self, DbError> {
        let r = RowReader::new(Self::RELATION, row)?;
        Ok(Self {
            instructor_id: r.int("instructor_id")?,
            course_id: r.int("course_id")?,
            evaluation: r.opt_text("evaluation")?,
        })
    }
}
