//! Field values and row codecs.
//!
//! `FieldValue` is the typed, in-memory form of a column that the validator
//! inspects. It is converted to a Cozo `DataValue` only after validation, and
//! `RowReader` performs the reverse when rows come back from storage.

use chrono::NaiveDateTime;
use cozo::{DataValue, Num};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::db::schema::{DataType, SchemaField, SchemaRelation};
use crate::db::{DbError, expect_i64, expect_string, optional_i64, optional_string};

/// Storage format for timestamps.
pub const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// A typed column value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    Int(i64),
    Text(String),
    Decimal(Decimal),
    DateTime(NaiveDateTime),
}

impl FieldValue {
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FieldValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Encode for storage according to the column's declared type.
    pub fn to_data_value(&self, field: &SchemaField) -> Result<DataValue, DbError> {
        let mismatch = || DbError::UnexpectedValue {
            column: field.name.to_string(),
            expected: match field.data_type {
                DataType::String => "text",
                DataType::Int => "int",
                DataType::Decimal { .. } => "decimal",
                DataType::DateTime => "timestamp",
            },
            found: format!("{:?}", self),
        };

        match (self, field.data_type) {
            (FieldValue::Null, _) if field.nullable => Ok(DataValue::Null),
            (FieldValue::Int(i), DataType::Int) => Ok(DataValue::Num(Num::Int(*i))),
            (FieldValue::Text(s), DataType::String) => Ok(DataValue::Str(s.as_str().into())),
            (FieldValue::Decimal(d), DataType::Decimal { scale, .. }) => {
                minor_units(*d, scale).map(|units| DataValue::Num(Num::Int(units))).ok_or_else(mismatch)
            }
            (FieldValue::DateTime(dt), DataType::DateTime) => {
                Ok(DataValue::Str(dt.format(DATETIME_FORMAT).to_string().into()))
            }
            _ => Err(mismatch()),
        }
    }
}

/// Round half away from zero to `scale` places, the way a relational engine
/// assigns into a `decimal(p, s)` column.
pub fn round_to_scale(value: Decimal, scale: u32) -> Decimal {
    value.round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero)
}

fn minor_units(value: Decimal, scale: u32) -> Option<i64> {
    let factor = Decimal::from(10_i64.checked_pow(scale)?);
    round_to_scale(value, scale).checked_mul(factor)?.trunc().to_i64()
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Int(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Int(i64::from(value))
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<Decimal> for FieldValue {
    fn from(value: Decimal) -> Self {
        FieldValue::Decimal(value)
    }
}

impl From<NaiveDateTime> for FieldValue {
    fn from(value: NaiveDateTime) -> Self {
        FieldValue::DateTime(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(FieldValue::Null, Into::into)
    }
}

/// Typed, name-based access to a stored row.
pub struct RowReader<'a> {
    relation: &'static SchemaRelation,
    row: &'a [DataValue],
}

impl<'a> RowReader<'a> {
    pub fn new(relation: &'static SchemaRelation, row: &'a [DataValue]) -> Result<Self, DbError> {
        if row.len() < relation.field_count() {
            let missing = relation
                .all_fields()
                .nth(row.len())
                .map(|f| f.name)
                .unwrap_or(relation.name);
            return Err(DbError::MissingColumn {
                name: missing.to_string(),
            });
        }
        Ok(Self { relation, row })
    }

    fn cell(&self, column: &str) -> Result<&'a DataValue, DbError> {
        self.relation
            .column_index(column)
            .and_then(|idx| self.row.get(idx))
            .ok_or_else(|| DbError::MissingColumn {
                name: column.to_string(),
            })
    }

    pub fn int(&self, column: &str) -> Result<i64, DbError> {
        expect_i64(self.cell(column)?, column)
    }

    pub fn int32(&self, column: &str) -> Result<i32, DbError> {
        let value = self.int(column)?;
        i32::try_from(value).map_err(|_| DbError::UnexpectedValue {
            column: column.to_string(),
            expected: "32-bit int",
            found: value.to_string(),
        })
    }

    pub fn opt_int(&self, column: &str) -> Result<Option<i64>, DbError> {
        optional_i64(self.cell(column)?, column)
    }

    pub fn text(&self, column: &str) -> Result<String, DbError> {
        expect_string(self.cell(column)?, column)
    }

    pub fn opt_text(&self, column: &str) -> Result<Option<String>, DbError> {
        optional_string(self.cell(column)?, column)
    }

    /// Decode a decimal stored as minor units, using the column's declared scale.
    pub fn decimal(&self, column: &str) -> Result<Decimal, DbError> {
        let scale = match self.relation.field(column).map(|f| f.data_type) {
            Some(DataType::Decimal { scale, .. }) => scale,
            _ => {
                return Err(DbError::UnexpectedValue {
                    column: column.to_string(),
                    expected: "decimal column",
                    found: "non-decimal schema type".to_string(),
                });
            }
        };
        Ok(Decimal::new(self.int(column)?, scale))
    }

    pub fn datetime(&self, column: &str) -> Result<NaiveDateTime, DbError> {
        let raw = self.text(column)?;
        NaiveDateTime::parse_from_str(&raw, DATETIME_FORMAT).map_err(|_| DbError::UnexpectedValue {
            column: column.to_string(),
            expected: "ISO-8601 timestamp",
            found: raw,
        })
    }
}

/// Encode validated values into a storage row, in schema column order.
pub fn encode_row(relation: &SchemaRelation, values: &[FieldValue]) -> Result<Vec<DataValue>, DbError> {
    if values.len() != relation.field_count() {
        return Err(DbError::MissingColumn {
            name: format!(
                "{} (expected {} values, got {})",
                relation.name,
                relation.field_count(),
                values.len()
            ),
        });
    }
    relation
        .all_fields()
        .zip(values)
        .map(|(field, value)| value.to_data_value(field))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::schema::{DEPARTMENTS, INSTRUCTORS, TOPICS};
    use chrono::NaiveDate;
    use rstest::rstest;

    fn salary_field() -> SchemaField {
        *INSTRUCTORS.field("salary").unwrap()
    }

    #[rstest]
    #[case(Decimal::new(500000, 2), 500000)]
    #[case(Decimal::from(6000), 600000)]
    #[case(Decimal::new(12345, 3), 1235)]
    #[case(Decimal::new(-12345, 3), -1235)]
    fn test_decimal_encodes_as_minor_units(#[case] value: Decimal, #[case] expected: i64) {
        let encoded = FieldValue::Decimal(value).to_data_value(&salary_field()).unwrap();
        assert_eq!(encoded, DataValue::Num(Num::Int(expected)));
    }

    #[rstest]
    fn test_null_only_for_nullable_columns() {
        let head = DEPARTMENTS.field("head_instructor_id").unwrap();
        assert_eq!(FieldValue::Null.to_data_value(head).unwrap(), DataValue::Null);

        let name = TOPICS.field("name").unwrap();
        assert!(FieldValue::Null.to_data_value(name).is_err());
    }

    #[rstest]
    fn test_type_mismatch_rejected() {
        let name = TOPICS.field("name").unwrap();
        let err = FieldValue::Int(3).to_data_value(name).unwrap_err();
        assert!(matches!(err, DbError::UnexpectedValue { .. }));
    }

    #[rstest]
    fn test_option_conversion() {
        assert_eq!(FieldValue::from(None::<i64>), FieldValue::Null);
        assert_eq!(FieldValue::from(Some(4_i64)), FieldValue::Int(4));
        assert_eq!(FieldValue::from(Some("x".to_string())), FieldValue::Text("x".into()));
    }

    #[rstest]
    fn test_row_reader_reads_department() {
        let row = vec![
            DataValue::Num(Num::Int(1)),
            DataValue::Str("CS".into()),
            DataValue::Null,
            DataValue::Str("2020-09-01T08:30:00".into()),
        ];
        let reader = RowReader::new(&DEPARTMENTS, &row).unwrap();

        assert_eq!(reader.int("id").unwrap(), 1);
        assert_eq!(reader.text("name").unwrap(), "CS");
        assert_eq!(reader.opt_int("head_instructor_id").unwrap(), None);
        assert_eq!(
            reader.datetime("hiring_date").unwrap(),
            NaiveDate::from_ymd_opt(2020, 9, 1).unwrap().and_hms_opt(8, 30, 0).unwrap()
        );
    }

    #[rstest]
    fn test_row_reader_short_row() {
        let row = vec![DataValue::Num(Num::Int(1))];
        let err = RowReader::new(&TOPICS, &row).err().unwrap();
        assert!(matches!(err, DbError::MissingColumn { name } if name == "name"));
    }

    #[rstest]
    fn test_row_reader_decimal_scale() {
        let row = vec![
            DataValue::Num(Num::Int(7)),
            DataValue::Str("Mona".into()),
            DataValue::Num(Num::Int(0)),
            DataValue::Num(Num::Int(600050)),
            DataValue::Str("".into()),
            DataValue::Num(Num::Int(12500)),
            DataValue::Num(Num::Int(1)),
        ];
        let reader = RowReader::new(&INSTRUCTORS, &row).unwrap();
        assert_eq!(reader.decimal("salary").unwrap(), Decimal::new(600050, 2));
        assert_eq!(reader.decimal("hourly_rate").unwrap(), Decimal::new(125, 0));
        assert!(reader.decimal("name").is_err());
    }

    #[rstest]
    fn test_datetime_round_trip_through_storage_format() {
        let dt = NaiveDate::from_ymd_opt(2021, 2, 3)
            .unwrap()
            .and_hms_milli_opt(4, 5, 6, 789)
            .unwrap();
        let field = DEPARTMENTS.field("hiring_date").unwrap();
        let encoded = FieldValue::DateTime(dt).to_data_value(field).unwrap();
        assert_eq!(encoded, DataValue::Str("2021-02-03T04:05:06.789".into()));
    }

    #[rstest]
    fn test_encode_row_length_checked() {
        assert!(encode_row(&TOPICS, &[FieldValue::Int(1)]).is_err());
        let row = encode_row(&TOPICS, &[FieldValue::Int(1), FieldValue::from("Databases")]).unwrap();
        assert_eq!(row.len(), 2);
    }
}
