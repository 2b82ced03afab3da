//! Error types for schema definition, statement generation and entity operations

use crate::entity::PersistenceState;
use crate::validation::ValidationError;
use thiserror::Error;

/// Raised while defining a model; an entity type is never built from a schema that fails here
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchemaError {
    #[error("Model {entity} does not declare a primary key column")]
    MissingPrimaryKey { entity: String },

    #[error("Model {entity} declares more than one primary key column: {}", .columns.join(", "))]
    AmbiguousPrimaryKey { entity: String, columns: Vec<String> },

    #[error("Column '{column}' has unsupported type '{type_name}'")]
    InvalidColumnType { column: String, type_name: String },

    #[error("Invalid identifier in model {entity}: {source}")]
    InvalidIdentifier {
        entity: String,
        #[source]
        source: ValidationError,
    },

    #[error("Column '{column}' is declared more than once")]
    DuplicateColumn { column: String },
}

/// Raised by the query builder before any statement text is produced
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QueryError {
    #[error("{statement} on {table} requires a WHERE clause")]
    MissingWhereClause {
        statement: &'static str,
        table: String,
    },

    #[error("UPDATE on {table} has nothing to SET")]
    EmptySet { table: String },
}

/// Failures reported by a store adapter. The engine never reinterprets them.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Column '{column}' has unsupported database type '{type_name}'")]
    UnsupportedType { column: String, type_name: String },

    #[error("Parameter ${position} is an untyped NULL; give it a column type with ColumnValue::for_column")]
    UntypedNull { position: usize },

    #[error("Store error: {0}")]
    Backend(String),
}

/// Errors surfaced by entity types and instances
#[derive(Error, Debug)]
pub enum EngineError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Query(#[from] QueryError),

    #[error("{entity}: {key} is not a valid identifier")]
    InvalidIdentifier { entity: String, key: String },

    #[error("{entity} with {column}={key} does not exist")]
    NotFound {
        entity: String,
        column: String,
        key: String,
    },

    #[error("Cannot {operation} this {entity} instance while it is {state}{}", save_hint(.state))]
    NotPersisted {
        entity: String,
        operation: &'static str,
        state: PersistenceState,
    },

    #[error("{entity} has no column named '{column}'")]
    UnknownColumn { entity: String, column: String },

    #[error("Column '{column}' of {entity} is the primary key and cannot be assigned")]
    ReadOnlyColumn { entity: String, column: String },

    #[error("Inserting {entity} did not return a value for primary key '{column}'")]
    MissingGeneratedKey { entity: String, column: String },

    #[error(transparent)]
    Store(#[from] StoreError),
}

fn save_hint(state: &PersistenceState) -> &'static str {
    match state {
        PersistenceState::Transient => ", did you call save() first?",
        _ => "",
    }
}

impl EngineError {
    pub(crate) fn unknown_column(entity: &str, column: &str) -> Self {
        EngineError::UnknownColumn {
            entity: entity.to_string(),
            column: column.to_string(),
        }
    }
}
