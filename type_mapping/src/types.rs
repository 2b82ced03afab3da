//! Column data types and runtime values
//!
//! This module defines the closed set of column types a model can declare
//! and the scalar value exchanged between models and the store.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Data types a column can be declared with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    Text,
    Uuid,
    Integer,
    Boolean,
    Date,
    Timestamp,
}

impl DataType {
    /// All supported types, in declaration order
    pub const ALL: [DataType; 6] = [
        DataType::Text,
        DataType::Uuid,
        DataType::Integer,
        DataType::Boolean,
        DataType::Date,
        DataType::Timestamp,
    ];

    /// Canonical lowercase name used in model definitions
    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::Text => "text",
            DataType::Uuid => "uuid",
            DataType::Integer => "integer",
            DataType::Boolean => "boolean",
            DataType::Date => "date",
            DataType::Timestamp => "timestamp",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single scalar value held by a model column or bound as a statement parameter
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub enum ColumnValue {
    Text(String),
    Integer(i64),
    Boolean(bool),
    Uuid(Uuid),
    Date(NaiveDate),
    Timestamp(DateTime<Utc>),
    #[default]
    Null,
    /// NULL that remembers the column type it is bound for.
    /// Only produced for statement parameters, never stored in a model.
    TypedNull(DataType),
}

impl ColumnValue {
    pub fn is_null(&self) -> bool {
        matches!(self, ColumnValue::Null | ColumnValue::TypedNull(_))
    }

    /// The data type carried by this value, if any
    pub fn data_type(&self) -> Option<DataType> {
        match self {
            ColumnValue::Text(_) => Some(DataType::Text),
            ColumnValue::Integer(_) => Some(DataType::Integer),
            ColumnValue::Boolean(_) => Some(DataType::Boolean),
            ColumnValue::Uuid(_) => Some(DataType::Uuid),
            ColumnValue::Date(_) => Some(DataType::Date),
            ColumnValue::Timestamp(_) => Some(DataType::Timestamp),
            ColumnValue::TypedNull(data_type) => Some(*data_type),
            ColumnValue::Null => None,
        }
    }

    /// Prepare a value to be bound against a column of `data_type`.
    /// Untyped NULLs pick up the column type; everything else is unchanged.
    pub fn for_column(self, data_type: DataType) -> Self {
        match self {
            ColumnValue::Null => ColumnValue::TypedNull(data_type),
            other => other,
        }
    }

    /// Strip parameter-only typing so the value can live in a model
    pub fn into_stored(self) -> Self {
        match self {
            ColumnValue::TypedNull(_) => ColumnValue::Null,
            other => other,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ColumnValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ColumnValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ColumnValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_uuid(&self) -> Option<Uuid> {
        match self {
            ColumnValue::Uuid(u) => Some(*u),
            _ => None,
        }
    }
}

impl fmt::Display for ColumnValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnValue::Text(s) => write!(f, "{}", s),
            ColumnValue::Integer(i) => write!(f, "{}", i),
            ColumnValue::Boolean(b) => write!(f, "{}", b),
            ColumnValue::Uuid(u) => write!(f, "{}", u),
            ColumnValue::Date(d) => write!(f, "{}", d),
            ColumnValue::Timestamp(ts) => write!(f, "{}", ts.to_rfc3339()),
            ColumnValue::Null | ColumnValue::TypedNull(_) => f.write_str("null"),
        }
    }
}

impl From<String> for ColumnValue {
    fn from(val: String) -> Self {
        ColumnValue::Text(val)
    }
}

impl From<&str> for ColumnValue {
    fn from(val: &str) -> Self {
        ColumnValue::Text(val.to_string())
    }
}

impl From<i16> for ColumnValue {
    fn from(val: i16) -> Self {
        ColumnValue::Integer(val as i64)
    }
}

impl From<i32> for ColumnValue {
    fn from(val: i32) -> Self {
        ColumnValue::Integer(val as i64)
    }
}

impl From<i64> for ColumnValue {
    fn from(val: i64) -> Self {
        ColumnValue::Integer(val)
    }
}

impl From<bool> for ColumnValue {
    fn from(val: bool) -> Self {
        ColumnValue::Boolean(val)
    }
}

impl From<Uuid> for ColumnValue {
    fn from(val: Uuid) -> Self {
        ColumnValue::Uuid(val)
    }
}

impl From<NaiveDate> for ColumnValue {
    fn from(val: NaiveDate) -> Self {
        ColumnValue::Date(val)
    }
}

impl From<DateTime<Utc>> for ColumnValue {
    fn from(val: DateTime<Utc>) -> Self {
        ColumnValue::Timestamp(val)
    }
}

impl<T> From<Option<T>> for ColumnValue
where
    T: Into<ColumnValue>,
{
    fn from(val: Option<T>) -> Self {
        match val {
            Some(v) => v.into(),
            None => ColumnValue::Null,
        }
    }
}
