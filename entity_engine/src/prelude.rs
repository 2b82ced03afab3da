//! Convenience re-exports for common entity-engine usage

// Models
pub use crate::entity::{
    DeleteQuery, EntityInstance, EntityType, PersistenceState, SelectQuery, UpdateQuery,
};
pub use crate::schema::{ColumnSpec, ModelDefinition, SchemaModel};

// Error types
pub use crate::errors::{EngineError, QueryError, SchemaError, StoreError};

// Statement building
pub use crate::query_builder::{Returning, SortOrder, ValueMap};

// Store adapters
pub use crate::store::{PgStore, Row, StoreAdapter};

// Values
pub use type_mapping::{ColumnValue, DataType};

// Common external dependencies that are frequently used
pub use async_trait::async_trait;
pub use uuid::Uuid;
