//! Field constraint validation driven by `SchemaField` metadata.

use rust_decimal::Decimal;

use super::OrmError;
use crate::db::schema::{DataType, SchemaField, SchemaRelation};
use crate::model::{FieldValue, round_to_scale};

/// Validate a record's values and return them normalized for storage.
///
/// Decimals come back rounded to their column scale. Fields are checked in
/// column order and the first violation is returned.
pub(crate) fn validate_record(
    relation: &'static SchemaRelation,
    values: Vec<FieldValue>,
) -> Result<Vec<FieldValue>, OrmError> {
    relation
        .all_fields()
        .zip(values)
        .map(|(field, value)| {
            check_field(field, value).map_err(|message| OrmError::Validation {
                relation: relation.name,
                field: field.name,
                message,
            })
        })
        .collect()
}

fn check_field(field: &SchemaField, value: FieldValue) -> Result<FieldValue, String> {
    match (&field.data_type, value) {
        (_, FieldValue::Null) if field.nullable => Ok(FieldValue::Null),
        (_, FieldValue::Null) => Err("value is required".to_string()),
        (DataType::String, FieldValue::Text(text)) => {
            if field.required && text.trim().is_empty() {
                return Err("value is required".to_string());
            }
            if let Some(max) = field.max_length {
                let len = text.chars().count();
                if len > max {
                    return Err(format!("length {} exceeds maximum of {}", len, max));
                }
            }
            Ok(FieldValue::Text(text))
        }
        (DataType::Decimal { precision, scale }, FieldValue::Decimal(d)) => {
            let rounded = round_to_scale(d, *scale);
            if !fits_precision(rounded, *precision, *scale) {
                return Err(format!(
                    "{} does not fit decimal({},{})",
                    d, precision, scale
                ));
            }
            Ok(FieldValue::Decimal(rounded))
        }
        (DataType::Int, value @ FieldValue::Int(_)) => Ok(value),
        (DataType::DateTime, value @ FieldValue::DateTime(_)) => Ok(value),
        (data_type, value) => Err(format!(
            "expected {}, found {:?}",
            data_type.sql_type(),
            value
        )),
    }
}

/// Integer digits must not exceed `precision - scale`.
fn fits_precision(value: Decimal, precision: u32, scale: u32) -> bool {
    let integer_digits = precision.saturating_sub(scale);
    match 10_i64.checked_pow(integer_digits) {
        Some(limit) => value.abs() < Decimal::from(limit),
        None => true,
    }
}
