use cozo::DataValue;
use serde::{Deserialize, Serialize};

use super::{Entity, FieldValue, RowReader};
use crate::db::DbError;
use crate::db::schema::{SchemaRelation, TOPICS};

/// A subject area grouping courses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub id: i64,
    pub name: String,
}

impl Topic {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
        }
    }
}

impl Entity for Topic {
    type Key = i64;
    const RELATION: &'static SchemaRelation = &TOPICS;

    fn key(&self) -> i64 {
        self.id
    }

    fn values(&self) -> Vec<FieldValue> {
        vec![self.id.into(), self.name.clone().into()]
    }

    fn from_row(row: &[DataValue]) -> Result<Self, DbError> {
        let r = RowReader::new(Self::RELATION, row)?;
        Ok(Self {
            id: r.int("id")?,
            name: r.text("name")?,
        })
    }

    fn set_identity(&mut self, id: i64) {
        self.id = id;
    }
}
