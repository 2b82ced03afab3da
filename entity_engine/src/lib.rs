//! Entity Engine - model layer for ModelHaus
//!
//! This crate turns declarative model definitions into entity types backed by
//! a store adapter: schema normalization, parameterized statement building,
//! and the persistence lifecycle of entity instances.

pub mod entity;
pub mod errors;
pub mod prelude;
pub mod query_builder;
pub mod schema;
pub mod store;
pub mod validation;

pub use entity::{
    DeleteQuery, EntityInstance, EntityType, PersistenceState, SelectQuery, UpdateQuery,
};
pub use errors::{EngineError, QueryError, SchemaError, StoreError};
pub use query_builder::{
    DeleteRequest, InsertRequest, Returning, SelectRequest, SortOrder, SqlBuilder, Statement,
    UpdateRequest, ValueMap,
};
pub use schema::{ColumnDescriptor, ColumnSpec, ModelDefinition, SchemaModel};
pub use store::{PgStore, Row, StoreAdapter};
pub use validation::{ValidatedFieldName, ValidatedTableName, ValidationError};

pub use type_mapping::{ColumnValue, DataType};

use sqlx::PgPool;

pub type DbPool = PgPool;
