//! Unified type mapping between model columns and PostgreSQL
//! This crate provides the column types and scalar values used across the modelhaus ecosystem

pub mod serialize;
pub mod sql;
pub mod types;

pub use serialize::JsonConversionError;
pub use sql::{data_type_to_pg_type, parse_data_type, pg_type_to_data_type};
pub use types::{ColumnValue, DataType};
