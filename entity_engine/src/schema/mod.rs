//! Schema model
//!
//! Turns a [`ModelDefinition`] into a [`SchemaModel`]: column types are
//! normalized, identifiers are validated and exactly one primary key is
//! resolved. A `SchemaModel` never exists in an invalid state.

pub mod definition;
pub mod model;


pub use definition::{ColumnSpec, ModelDefinition};
pub use model::{normalize, resolve_primary_key, ColumnDescriptor, SchemaModel};
