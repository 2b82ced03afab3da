//! Convenience re-exports for common ModelHaus usage
//!
//! This prelude module re-exports the most commonly used items from the ModelHaus ecosystem,
//! making it easier to import everything you need with a single use statement.
//!
//! # Example
//!
//! ```rust
//! use modelhaus::prelude::*;
//!
//! let definition = ModelDefinition::new("users")
//!     .column("id", ColumnSpec::primary_key("integer"))
//!     .column("first_name", "text");
//! assert_eq!(definition.columns.len(), 2);
//! ```

// Core ModelHaus components
pub use crate::core::ModelHaus;
pub use crate::errors::ModelHausError;

// Re-export centralized config
pub use config::{AppConfig, DatabaseConfig};

// Re-export commonly used entity-engine types for convenience
pub use entity_engine::prelude::*;

// Common external dependencies
pub use anyhow;
pub use async_trait;
pub use sqlx;
pub use tokio;

// Commonly used sqlx types
pub use sqlx::PgPool;
