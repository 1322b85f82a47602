use chrono::NaiveDateTime;
use cozo::DataValue;
use serde::{Deserialize, Serialize};

use super::{Entity, FieldValue, RowReader};
use crate::db::DbError;
use crate::db::schema::{DEPARTMENTS, SchemaRelation};

/// An academic department, optionally headed by one of its instructors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    pub id: i64,
    pub name: String,
    pub head_instructor_id: Option<i64>,
    pub hiring_date: NaiveDateTime,
}

impl Department {
    pub fn new(name: impl Into<String>, hiring_date: NaiveDateTime) -> Self {
        Self {
            id: 0,
            name: name.into(),
            head_instructor_id: None,
            hiring_date,
        }
    }

    pub fn with_head(mut self, instructor_id: i64) -> Self {
        self.head_instructor_id = Some(instructor_id);
        self
    }
}

impl Entity for Department {
    type Key = i64;
    const RELATION: &'static SchemaRelation = &DEPARTMENTS;

    fn key(&self) -> i64 {
        self.id
    }

    fn values(&self) -> Vec<FieldValue> {
        vec![
            self.id.into(),
            self.name.clone().into(),
            self.head_instructor_id.into(),
            self.hiring_date.into(),
        ]
    }

    fn from_row(row: &[DataValue]) -> Result<Self, DbError> {
        let r = RowReader::new(Self::RELATION, row)?;
        Ok(Self {
            id: r.int("id")?,
            name: r.text("name")?,
            head_instructor_id: r.opt_int("head_instructor_id")?,
            hiring_date: r.datetime("hiring_date")?,
        })
    }

    fn set_identity(&mut self, id: i64) {
        self.id = id;
    }
}
