//! Helpers for pulling typed values out of CozoDB result cells.
//!
//! The lenient `extract_*` helpers mirror how ad-hoc queries read cells; the
//! strict `expect_*`/`optional_*` helpers are used when decoding stored rows,
//! where a type mismatch means the schema and the data disagree.

use cozo::{DataValue, Num};

use super::DbError;

/// Extract a String from a DataValue, returning None if not a string
pub fn extract_string(value: &DataValue) -> Option<String> {
    match value {
        DataValue::Str(s) => Some(s.to_string()),
        _ => None,
    }
}

/// Extract an i64 from a DataValue, returning None if not an integer
pub fn extract_i64(value: &DataValue) -> Option<i64> {
    match value {
        DataValue::Num(Num::Int(i)) => Some(*i),
        _ => None,
    }
}

fn describe(value: &DataValue) -> String {
    match value {
        DataValue::Null => "null".to_string(),
        DataValue::Bool(b) => format!("bool {}", b),
        DataValue::Num(Num::Int(i)) => format!("int {}", i),
        DataValue::Num(Num::Float(f)) => format!("float {}", f),
        DataValue::Str(s) => format!("string {:?}", s.as_str()),
        other => format!("{:?}", other),
    }
}

fn unexpected(column: &str, expected: &'static str, value: &DataValue) -> DbError {
    DbError::UnexpectedValue {
        column: column.to_string(),
        expected,
        found: describe(value),
    }
}

/// Read a non-null integer cell.
pub fn expect_i64(value: &DataValue, column: &str) -> Result<i64, DbError> {
    extract_i64(value).ok_or_else(|| unexpected(column, "int", value))
}

/// Read a non-null string cell.
pub fn expect_string(value: &DataValue, column: &str) -> Result<String, DbError> {
    extract_string(value).ok_or_else(|| unexpected(column, "string", value))
}

/// Read a nullable integer cell.
pub fn optional_i64(value: &DataValue, column: &str) -> Result<Option<i64>, DbError> {
    match value {
        DataValue::Null => Ok(None),
        other => expect_i64(other, column).map(Some),
    }
}

/// Read a nullable string cell.
pub fn optional_string(value: &DataValue, column: &str) -> Result<Option<String>, DbError> {
    match value {
        DataValue::Null => Ok(None),
        other => expect_string(other, column).map(Some),
    }
}
