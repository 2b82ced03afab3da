//! Core ModelHaus functionality
//!
//! This module contains the main ModelHaus struct: it owns the store handle
//! and the registry of defined entity types.

use entity_engine::{EntityType, ModelDefinition, PgStore, StoreAdapter};
use sqlx::PgPool;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use crate::errors::ModelHausError;
use config::DatabaseConfig;

/// Main ModelHaus coordinator that manages the store handle and defined models
pub struct ModelHaus {
    pool: Option<PgPool>,
    store: Arc<dyn StoreAdapter>,
    models: HashMap<String, EntityType>,
}

impl ModelHaus {
    /// Create new ModelHaus with a PostgreSQL connection pool
    pub async fn new(config: DatabaseConfig) -> Result<Self, ModelHausError> {
        config.validate()?;
        let connection_string = config.connection_string();

        let mut pool_options = sqlx::postgres::PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout_seconds))
            .idle_timeout(Duration::from_secs(config.idle_timeout_seconds));

        // Set max lifetime if specified
        if config.max_lifetime_seconds > 0 {
            pool_options =
                pool_options.max_lifetime(Duration::from_secs(config.max_lifetime_seconds));
        }

        let pool = pool_options.connect(&connection_string).await?;
        crate::debug_log!(
            "Connected to {}:{}/{}",
            config.host,
            config.port,
            config.database
        );

        let mut modelhaus = Self::with_store(Arc::new(PgStore::new(pool.clone())));
        modelhaus.pool = Some(pool);
        Ok(modelhaus)
    }

    /// Create ModelHaus on top of any store adapter
    pub fn with_store(store: Arc<dyn StoreAdapter>) -> Self {
        Self {
            pool: None,
            store,
            models: HashMap::new(),
        }
    }

    /// Database pool, when connected through [`ModelHaus::new`]
    pub fn pool(&self) -> Option<&PgPool> {
        self.pool.as_ref()
    }

    /// Shared store handle passed to every defined model
    pub fn store(&self) -> Arc<dyn StoreAdapter> {
        Arc::clone(&self.store)
    }

    /// Validate a model definition and register the resulting entity type
    pub fn define_model(
        &mut self,
        name: &str,
        definition: ModelDefinition,
    ) -> Result<EntityType, ModelHausError> {
        if self.models.contains_key(name) {
            return Err(ModelHausError::ModelAlreadyDefined(name.to_string()));
        }

        let model = EntityType::define(name, definition, self.store())?;
        crate::debug_log!(
            "Defined model {} on table {} ({} columns)",
            name,
            model.table_name(),
            model.column_names().len()
        );

        self.models.insert(name.to_string(), model.clone());
        Ok(model)
    }

    /// Get a defined model by name
    pub fn model(&self, name: &str) -> Result<&EntityType, ModelHausError> {
        self.models
            .get(name)
            .ok_or_else(|| ModelHausError::ModelNotFound(name.to_string()))
    }

    /// List all defined model names
    pub fn list_models(&self) -> Vec<&String> {
        self.models.keys().collect()
    }

    /// Forget a model. Clones already handed out keep working.
    pub fn remove_model(&mut self, name: &str) -> Result<EntityType, ModelHausError> {
        self.models
            .remove(name)
            .ok_or_else(|| ModelHausError::ModelNotFound(name.to_string()))
    }

    /// Check that the store answers a trivial statement
    pub async fn health_check(&self) -> Result<(), ModelHausError> {
        self.store.execute("SELECT 1", &[]).await?;
        crate::trace_log!("Health check passed");
        Ok(())
    }
}
