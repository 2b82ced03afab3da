//! SQL type conversion utilities
//!
//! This module maps declared column type names and PostgreSQL type names
//! onto `DataType`.

use crate::types::DataType;

/// Parse a column type name from a model definition.
/// Matching is case-insensitive and surrounding whitespace is ignored.
pub fn parse_data_type(name: &str) -> Option<DataType> {
    // Collapse inner whitespace so "timestamp  with time zone" still matches
    let normalized = name
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_ascii_lowercase();
    match normalized.as_str() {
        "text" => Some(DataType::Text),
        "uuid" => Some(DataType::Uuid),
        "integer" => Some(DataType::Integer),
        "boolean" => Some(DataType::Boolean),
        "date" => Some(DataType::Date),
        "timestamp" | "timestamptz" | "timestamp with time zone" => Some(DataType::Timestamp),
        _ => None,
    }
}

/// PostgreSQL type used to store a column of the given type
pub fn data_type_to_pg_type(data_type: DataType) -> &'static str {
    match data_type {
        DataType::Text => "TEXT",
        DataType::Uuid => "UUID",
        DataType::Integer => "INTEGER",
        DataType::Boolean => "BOOLEAN",
        DataType::Date => "DATE",
        DataType::Timestamp => "TIMESTAMP WITH TIME ZONE",
    }
}

/// Map a PostgreSQL type name, as reported by the driver for a result
/// column, back onto a `DataType`
pub fn pg_type_to_data_type(pg_type: &str) -> Option<DataType> {
    match pg_type.to_ascii_uppercase().as_str() {
        "TEXT" | "VARCHAR" | "BPCHAR" | "NAME" => Some(DataType::Text),
        "INT2" | "INT4" | "INT8" | "SMALLINT" | "INTEGER" | "BIGINT" => Some(DataType::Integer),
        "BOOL" | "BOOLEAN" => Some(DataType::Boolean),
        "UUID" => Some(DataType::Uuid),
        "DATE" => Some(DataType::Date),
        "TIMESTAMP" | "TIMESTAMPTZ" => Some(DataType::Timestamp),
        _ => None,
    }
}

impl DataType {
    /// Parse a declared column type name, see [`parse_data_type`]
    pub fn parse(name: &str) -> Option<Self> {
        parse_data_type(name)
    }

    /// PostgreSQL type name for this column type
    pub fn pg_type(&self) -> &'static str {
        data_type_to_pg_type(*self)
    }
}
