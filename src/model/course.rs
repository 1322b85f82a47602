use cozo::DataValue;
use serde::{Deserialize, Serialize};

use super::{Entity, FieldValue, RowReader};
use crate::db::DbError;
use crate::db::schema::{COURSES, SchemaRelation};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub id: i64,
    /// Length in hours
    pub duration: i32,
    pub name: String,
    pub description: String,
    pub topic_id: i64,
}

impl Course {
    pub fn new(name: impl Into<String>, duration: i32, topic_id: i64) -> Self {
        Self {
            id: 0,
            duration,
            name: name.into(),
            description: String::new(),
            topic_id,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

impl Entity for Course {
    type Key = i64;
    const RELATION: &'static SchemaRelation = &COURSES;

    fn key(&self) -> i64 {
        self.id
    }

    fn values(&self) -> Vec<FieldValue> {
        vec![
            self.id.into(),
            self.duration.into(),
            self.name.clone().into(),
            self.description.clone().into(),
            self.topic_id.into(),
        ]
    }

    fn from_row(row: &[DataValue]) -> Result<Self, DbError> {
        let r = RowReader::new(Self::RELATION, row)?;
        Ok(Self {
            id: r.int("id")?,
            duration: r.int32("duration")?,
            name: r.text("name")?,
            description: r.text("description")?,
            topic_id: r.int("topic_id")?,
        })
    }

    fn set_identity(&mut self, id: i64) {
        self.id = id;
    }
}
