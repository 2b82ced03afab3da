//! Store adapter contract
//!
//! The engine only needs something that can execute one parameterized
//! statement and hand back rows. [`PgStore`] implements it over a sqlx pool.

pub mod postgres;

#[cfg(test)]
pub(crate) mod mock;

use crate::errors::StoreError;
use crate::query_builder::ValueMap;
use async_trait::async_trait;
use type_mapping::ColumnValue;

pub use postgres::PgStore;

/// One result row, keyed by column name
pub type Row = ValueMap;

/// Executes a statement with `$n` placeholders and returns every row it produced.
/// Statements without a result set return an empty list.
#[async_trait]
pub trait StoreAdapter: Send + Sync {
    async fn execute(&self, sql: &str, params: &[ColumnValue]) -> Result<Vec<Row>, StoreError>;
}
