//! # Basic Usage Example
//!
//! This example walks through the lifecycle of one model:
//! - Defining a model from plain data
//! - Creating, finding, updating and deleting a row
//! - Seeing the persistence state change at each step
//!
//! It expects a PostgreSQL database described by `modelhaus.toml` (or the
//! file named by `MODELHAUS_CONFIG`).

use modelhaus::prelude::*;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("ModelHaus Basic Usage Example");
    println!("=============================");

    // 1. Connect
    let config = AppConfig::load()?;
    let mut modelhaus = ModelHaus::new(config.database).await?;
    modelhaus.health_check().await?;

    // Tables are managed outside the model engine
    if let Some(pool) = modelhaus.pool() {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS users (id SERIAL PRIMARY KEY, first_name TEXT, last_name TEXT)",
        )
        .execute(pool)
        .await?;
    }

    // 2. Define the model
    let definition: ModelDefinition = serde_json::from_str(
        r#"{
            "table_name": "users",
            "columns": {
                "id": { "type": "integer", "primary_key": true },
                "first_name": "text",
                "last_name": "text"
            }
        }"#,
    )?;
    let user = modelhaus.define_model("User", definition)?;
    println!("Defined {} with columns {:?}", user.entity_name(), user.column_names());

    // 3. Create
    let mut ada = user
        .create(ValueMap::from([
            ("first_name".to_string(), ColumnValue::from("Ada")),
            ("last_name".to_string(), ColumnValue::from("L")),
        ]))
        .await?;
    println!("Created {} ({})", ada.to_json(), ada.state());

    // 4. Find
    let id = ada.primary_key().clone();
    let found = user.find_by_primary_key(id.clone(), None).await?;
    println!("Found {}", found.to_json());

    // 5. Update
    ada.update(ValueMap::from([(
        "first_name".to_string(),
        ColumnValue::from("Changed"),
    )]))
    .await?;
    println!("Updated {}", ada.to_json());

    // 6. Delete
    ada.delete().await?;
    println!("Instance is now {}", ada.state());

    match user.find_by_primary_key(id, None).await {
        Err(EngineError::NotFound { .. }) => println!("Row is gone"),
        other => println!("Unexpected result: {:?}", other.map(|u| u.to_json())),
    }

    // The store handle can be shared with other tools
    let _store: Arc<dyn StoreAdapter> = modelhaus.store();

    Ok(())
}
