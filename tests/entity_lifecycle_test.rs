//! Integration tests for the entity lifecycle against PostgreSQL
//!
//! Requires `DATABASE_URL`; every test returns early when it is not set.

use modelhaus::prelude::*;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

async fn setup(table: &str) -> anyhow::Result<Option<(PgPool, ModelHaus)>> {
    init_tracing();

    let Ok(database_url) = std::env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL not set, skipping");
        return Ok(None);
    };

    let pool = PgPool::connect(&database_url).await?;
    sqlx::query(&format!("DROP TABLE IF EXISTS {}", table))
        .execute(&pool)
        .await?;
    sqlx::query(&format!(
        "CREATE TABLE {} (id SERIAL PRIMARY KEY, first_name TEXT, last_name TEXT, born_on DATE, active BOOLEAN NOT NULL DEFAULT TRUE)",
        table
    ))
    .execute(&pool)
    .await?;

    let modelhaus = ModelHaus::with_store(std::sync::Arc::new(PgStore::new(pool.clone())));
    Ok(Some((pool, modelhaus)))
}

fn definition(table: &str) -> ModelDefinition {
    ModelDefinition::new(table)
        .column("id", ColumnSpec::primary_key("integer"))
        .column("first_name", "text")
        .column("last_name", "text")
        .column("born_on", "date")
        .column("active", ColumnSpec::not_null("boolean"))
}

fn values<const N: usize>(pairs: [(&str, ColumnValue); N]) -> ValueMap {
    pairs
        .into_iter()
        .map(|(column, value)| (column.to_string(), value))
        .collect()
}

async fn teardown(pool: &PgPool, table: &str) -> anyhow::Result<()> {
    sqlx::query(&format!("DROP TABLE IF EXISTS {}", table))
        .execute(pool)
        .await?;
    Ok(())
}

#[tokio::test]
async fn test_create_find_update_delete() -> anyhow::Result<()> {
    let table = "lifecycle_users";
    let Some((pool, mut modelhaus)) = setup(table).await? else {
        return Ok(());
    };
    let user = modelhaus.define_model("User", definition(table))?;

    let born_on = chrono::NaiveDate::from_ymd_opt(1815, 12, 10).unwrap();
    let mut ada = user
        .create(values([
            ("first_name", "Ada".into()),
            ("last_name", "L".into()),
            ("born_on", born_on.into()),
        ]))
        .await?;
    assert!(ada.is_persisted());
    assert!(!ada.primary_key().is_null());

    let id = ada.primary_key().clone();
    let found = user.find_by_primary_key(id.clone(), None).await?;
    assert_eq!(found.get("first_name"), Some(&ColumnValue::from("Ada")));
    assert_eq!(found.get("last_name"), Some(&ColumnValue::from("L")));
    assert_eq!(found.get("born_on"), Some(&ColumnValue::Date(born_on)));
    assert_eq!(found.get("active"), Some(&ColumnValue::Boolean(true)));

    ada.update(values([("first_name", "Changed".into())])).await?;
    assert_eq!(ada.get("first_name"), Some(&ColumnValue::from("Changed")));
    assert_eq!(ada.get("active"), Some(&ColumnValue::Boolean(true)));

    ada.delete().await?;
    assert_eq!(ada.state(), PersistenceState::Deleted);
    assert!(matches!(
        user.find_by_primary_key(id, None).await,
        Err(EngineError::NotFound { .. })
    ));

    teardown(&pool, table).await
}

#[tokio::test]
async fn test_partial_hydration_and_resave() -> anyhow::Result<()> {
    let table = "hydration_users";
    let Some((pool, mut modelhaus)) = setup(table).await? else {
        return Ok(());
    };
    let user = modelhaus.define_model("User", definition(table))?;

    let created = user
        .create(values([("first_name", "Grace".into()), ("last_name", "H".into())]))
        .await?;

    let mut partial = user
        .find_by_primary_key(created.primary_key().clone(), Some(&["first_name"]))
        .await?;
    assert_eq!(partial.get("first_name"), Some(&ColumnValue::from("Grace")));
    assert_eq!(partial.get("last_name"), Some(&ColumnValue::Null));

    // Columns that were not loaded are left alone by save
    partial.set("first_name", "Admiral")?;
    partial.save().await?;
    partial.reload().await?;
    assert_eq!(partial.get("first_name"), Some(&ColumnValue::from("Admiral")));
    assert_eq!(partial.get("last_name"), Some(&ColumnValue::from("H")));

    teardown(&pool, table).await
}

#[tokio::test]
async fn test_table_level_operations() -> anyhow::Result<()> {
    let table = "bulk_users";
    let Some((pool, mut modelhaus)) = setup(table).await? else {
        return Ok(());
    };
    let user = modelhaus.define_model("User", definition(table))?;

    for first_name in ["Ada", "Alan", "Grace"] {
        user.create(values([("first_name", first_name.into()), ("last_name", "X".into())]))
            .await?;
    }

    let updated = user
        .update(
            UpdateQuery::new()
                .set_value("active", false)
                .where_eq("last_name", "X")
                .returning("id"),
        )
        .await?;
    assert_eq!(updated.len(), 3);

    let inactive = user
        .select(
            Some(&["first_name"]),
            SelectQuery::new()
                .where_eq("active", false)
                .order_by("first_name", SortOrder::Desc)
                .limit(2),
        )
        .await?;
    let names: Vec<_> = inactive
        .iter()
        .filter_map(|u| u.get("first_name").and_then(ColumnValue::as_str))
        .collect();
    assert_eq!(names, vec!["Grace", "Alan"]);

    let deleted = user
        .delete(DeleteQuery::new().where_eq("first_name", "Ada").returning("id"))
        .await?;
    assert_eq!(deleted.len(), 1);

    modelhaus.health_check().await?;
    teardown(&pool, table).await
}

#[tokio::test]
async fn test_bigint_keys_reuse_cached_statements() -> anyhow::Result<()> {
    init_tracing();
    let Ok(database_url) = std::env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL not set, skipping");
        return Ok(());
    };

    // One connection, so both lookups share its prepared statement cache
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(1)
        .connect(&database_url)
        .await?;
    let table = "bigint_keys";
    sqlx::query(&format!("DROP TABLE IF EXISTS {}", table))
        .execute(&pool)
        .await?;
    sqlx::query(&format!(
        "CREATE TABLE {} (id BIGSERIAL PRIMARY KEY, label TEXT)",
        table
    ))
    .execute(&pool)
    .await?;
    sqlx::query(&format!(
        "INSERT INTO {} (id, label) VALUES (1, 'small'), (5000000000, 'large')",
        table
    ))
    .execute(&pool)
    .await?;

    let mut modelhaus = ModelHaus::with_store(std::sync::Arc::new(PgStore::new(pool.clone())));
    let item = modelhaus.define_model(
        "Item",
        ModelDefinition::new(table)
            .column("id", ColumnSpec::primary_key("integer"))
            .column("label", "text"),
    )?;

    let small = item.find_by_primary_key(1, None).await?;
    assert_eq!(small.get("label"), Some(&ColumnValue::from("small")));

    let mut large = item.find_by_primary_key(5_000_000_000_i64, None).await?;
    assert_eq!(large.primary_key(), &ColumnValue::Integer(5_000_000_000));
    assert_eq!(large.get("label"), Some(&ColumnValue::from("large")));

    large.update(values([("label", ColumnValue::Null)])).await?;
    assert_eq!(large.get("label"), Some(&ColumnValue::Null));

    teardown(&pool, table).await
}
