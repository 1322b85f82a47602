use cozo::DataValue;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Entity, FieldValue, RowReader};
use crate::db::DbError;
use crate::db::schema::{INSTRUCTORS, SchemaRelation};

/// A teaching staff member. Money columns are fixed-point with two decimals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instructor {
    pub id: i64,
    pub name: String,
    pub bonus: Decimal,
    pub salary: Decimal,
    pub address: String,
    pub hourly_rate: Decimal,
    pub department_id: i64,
}

impl Instructor {
    pub fn new(name: impl Into<String>, salary: Decimal, department_id: i64) -> Self {
        Self {
            id: 0,
            name: name.into(),
            bonus: Decimal::ZERO,
            salary,
            address: String::new(),
            hourly_rate: Decimal::ZERO,
            department_id,
        }
    }

    pub fn with_bonus(mut self, bonus: Decimal) -> Self {
        self.bonus = bonus;
        self
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    pub fn with_hourly_rate(mut self, hourly_rate: Decimal) -> Self {
        self.hourly_rate = hourly_rate;
        self
    }
}

impl Entity for Instructor {
    type Key = i64;
    const RELATION: &'static SchemaRelation = &INSTRUCTORS;

    fn key(&self) -> i64 {
        self.id
    }

    fn values(&self) -> Vec<FieldValue> {
        vec![
            self.id.into(),
            self.name.clone().into(),
            self.bonus.into(),
            self.salary.into(),
            self.address.clone().into(),
            self.hourly_rate.into(),
            self.department_id.into(),
        ]
    }

    fn from_row(row: &[DataValue]) -> Result<Self, DbError> {
        let r = RowReader::new(Self::RELATION, row)?;
        Ok(Self {
            id: r.int("id")?,
            name: r.text("name")?,
            bonus: r.decimal("bonus")?,
            salary: r.decimal("salary")?,
            address: r.text("address")?,
            hourly_rate: r.decimal("hourly_rate")?,
            department_id: r.int("department_id")?,
        })
    }

    fn set_identity(&mut self, id: i64) {
        self.id = id;
    }
}
