//! Error types for the ModelHaus crate
//!
//! This module contains all error types that can be returned by ModelHaus operations.

use config::ConfigError;
use entity_engine::{EngineError, SchemaError, StoreError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelHausError {
    #[error("Database connection error: {0}")]
    DatabaseConnection(#[from] sqlx::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Model not defined: {0}")]
    ModelNotFound(String),

    #[error("Model already defined: {0}")]
    ModelAlreadyDefined(String),
}

impl From<SchemaError> for ModelHausError {
    fn from(error: SchemaError) -> Self {
        ModelHausError::Engine(error.into())
    }
}
