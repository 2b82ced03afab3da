//! Serialization utilities
//!
//! This module converts column values to and from plain JSON, the format
//! models are rendered in and the format callers usually hold raw data in.

use crate::types::{ColumnValue, DataType};
use chrono::{DateTime, NaiveDate, Utc};
use serde_json::Value;
use std::fmt;
use uuid::Uuid;

/// A JSON value that cannot be read as the requested column type
#[derive(Debug, Clone, PartialEq)]
pub struct JsonConversionError {
    pub expected: DataType,
    pub found: String,
}

impl fmt::Display for JsonConversionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cannot read {} as a {} value", self.found, self.expected)
    }
}

impl std::error::Error for JsonConversionError {}

impl ColumnValue {
    /// Plain JSON projection: dates and timestamps become ISO-8601 strings
    pub fn to_json(&self) -> Value {
        match self {
            ColumnValue::Text(s) => Value::String(s.clone()),
            ColumnValue::Integer(i) => Value::from(*i),
            ColumnValue::Boolean(b) => Value::Bool(*b),
            ColumnValue::Uuid(u) => Value::String(u.to_string()),
            ColumnValue::Date(d) => Value::String(d.format("%Y-%m-%d").to_string()),
            ColumnValue::Timestamp(ts) => Value::String(ts.to_rfc3339()),
            ColumnValue::Null | ColumnValue::TypedNull(_) => Value::Null,
        }
    }

    /// Read a JSON value as a column of `data_type`. JSON null is always accepted.
    pub fn from_json(value: &Value, data_type: DataType) -> Result<Self, JsonConversionError> {
        if value.is_null() {
            return Ok(ColumnValue::Null);
        }

        let converted = match (data_type, value) {
            (DataType::Text, Value::String(s)) => Some(ColumnValue::Text(s.clone())),
            (DataType::Integer, Value::Number(n)) => n.as_i64().map(ColumnValue::Integer),
            (DataType::Boolean, Value::Bool(b)) => Some(ColumnValue::Boolean(*b)),
            (DataType::Uuid, Value::String(s)) => Uuid::parse_str(s).ok().map(ColumnValue::Uuid),
            (DataType::Date, Value::String(s)) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .map(ColumnValue::Date),
            (DataType::Timestamp, Value::String(s)) => DateTime::parse_from_rfc3339(s)
                .ok()
                .map(|dt| ColumnValue::Timestamp(dt.with_timezone(&Utc))),
            _ => None,
        };

        converted.ok_or_else(|| JsonConversionError {
            expected: data_type,
            found: value.to_string(),
        })
    }
}
