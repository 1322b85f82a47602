use cozo::DataValue;
use serde::{Deserialize, Serialize};

use super::{Entity, FieldValue, RowReader};
use crate::db::DbError;
use crate::db::schema::{STUDENTS, SchemaRelation};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub age: i32,
    pub department_id: i64,
}

impl Student {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>, department_id: i64) -> Self {
        Self {
            id: 0,
            first_name: first_name.into(),
            last_name: last_name.into(),
            address: String::new(),
            age: 0,
            department_id,
        }
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    pub fn with_age(mut self, age: i32) -> Self {
        self.age = age;
        self
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl Entity for Student {
    type Key = i64;
    const RELATION: &'static SchemaRelation = &STUDENTS;

    fn key(&self) -> i64 {
        self.id
    }

    fn values(&self) -> Vec<FieldValue> {
        vec![
            self.id.into(),
            self.first_name.clone().into(),
            self.last_name.clone().into(),
            self.address.clone().into(),
            self.age.into(),
            self.department_id.into(),
        ]
    }

    fn from_row(row: &[DataValue]) -> Result<Self, DbError> {
        let r = RowReader::new(Self::RELATION, row)?;
        Ok(Self {
            id: r.int("id")?,
            first_name: r.text("first_name")?,
            last_name: r.text("last_name")?,
            address: r.text("address")?,
            age: r.int32("age")?,
            department_id: r.int("department_id")?,
        })
    }

    fn set_identity(&mut self, id: i64) {
        self.id = id;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cozo::Num;

    #[test]
    fn test_values_follow_schema_order() {
        let student = Student::new("Ali", "Hassan", 1).with_address("Cairo").with_age(22);
        let values = student.values();
        let names: Vec<_> = STUDENTS.all_fields().map(|f| f.name).collect();

        assert_eq!(values.len(), names.len());
        assert_eq!(values[1], FieldValue::Text("Ali".into()));
        assert_eq!(values[4], FieldValue::Int(22));
        assert_eq!(values[5], FieldValue::Int(1));
    }

    #[test]
    fn test_from_row() {
        let row = vec![
            DataValue::Num(Num::Int(5)),
            DataValue::Str("Ali".into()),
            DataValue::Str("Hassan".into()),
            DataValue::Str("Cairo".into()),
            DataValue::Num(Num::Int(22)),
            DataValue::Num(Num::Int(1)),
        ];
        let student = Student::from_row(&row).unwrap();
        assert_eq!(student.id, 5);
        assert_eq!(student.full_name(), "Ali Hassan");
        assert_eq!(student.age, 22);
    }

    #[test]
    fn test_from_row_age_out_of_range() {
        let row = vec![
            DataValue::Num(Num::Int(5)),
            DataValue::Str("Ali".into()),
            DataValue::Str("Hassan".into()),
            DataValue::Str("".into()),
            DataValue::Num(Num::Int(i64::MAX)),
            DataValue::Num(Num::Int(1)),
        ];
        assert!(Student::from_row(&row).is_err());
    }
}
