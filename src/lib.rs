//! # ModelHaus
//!
//! A minimal model engine for PostgreSQL. Models are declared at runtime as
//! plain data, validated once, and used through entity types whose instances
//! move strictly from Transient to Persisted to Deleted.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use modelhaus::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig::new(
//!         "localhost".to_string(), 5432, "modelhaus".to_string(),
//!         "postgres".to_string(), "password".to_string(),
//!         1, 5, 30, 600, 3600,
//!     );
//!
//!     let mut modelhaus = ModelHaus::new(config).await?;
//!
//!     let user = modelhaus.define_model(
//!         "User",
//!         ModelDefinition::new("users")
//!             .column("id", ColumnSpec::primary_key("integer"))
//!             .column("first_name", "text")
//!             .column("last_name", "text"),
//!     )?;
//!
//!     let mut ada = user
//!         .create(ValueMap::from([
//!             ("first_name".to_string(), ColumnValue::from("Ada")),
//!             ("last_name".to_string(), ColumnValue::from("L")),
//!         ]))
//!         .await?;
//!
//!     let found = user.find_by_primary_key(ada.primary_key().clone(), None).await?;
//!     println!("Found user: {}", found.to_json());
//!
//!     ada.delete().await?;
//!     Ok(())
//! }
//! ```

/// Conditional debug logging macros
/// These macros only compile in code when the `debug-logging` feature is enabled
#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        tracing::debug!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {
        tracing::trace!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {};
}

pub mod core;
pub mod errors;
pub mod prelude;

// Re-export the main public types for convenience
pub use core::ModelHaus;
pub use errors::ModelHausError;

// Re-export centralized config
pub use config::{AppConfig, DatabaseConfig};

// Re-export internal crates used by the public API
pub use entity_engine;
pub use type_mapping;

// Re-export external dependencies used in public API
pub use async_trait;
pub use sqlx;
