//! PostgreSQL store adapter

use crate::errors::StoreError;
use crate::store::{Row, StoreAdapter};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::Query;
use sqlx::{Column, PgPool, Postgres, Row as _, TypeInfo};
use type_mapping::{pg_type_to_data_type, ColumnValue, DataType};
use uuid::Uuid;

/// Store adapter backed by a sqlx connection pool
#[derive(Debug, Clone)]
pub struct PgStore {
    db_pool: PgPool,
}

impl PgStore {
    pub fn new(db_pool: PgPool) -> Self {
        Self { db_pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.db_pool
    }
}

#[async_trait]
impl StoreAdapter for PgStore {
    async fn execute(&self, sql: &str, params: &[ColumnValue]) -> Result<Vec<Row>, StoreError> {
        check_params(params)?;

        let mut query = sqlx::query(sql);
        for param in params {
            query = bind_param(query, param);
        }

        let rows = query.fetch_all(&self.db_pool).await.map_err(|e| {
            tracing::error!("Statement failed: {} ({})", sql, e);
            StoreError::Database(e)
        })?;

        rows.iter().map(decode_row).collect()
    }
}

/// Every NULL must carry its column type. PostgreSQL infers a text parameter
/// for an untyped NULL, which fails against any other column type.
fn check_params(params: &[ColumnValue]) -> Result<(), StoreError> {
    match params.iter().position(|p| matches!(p, ColumnValue::Null)) {
        Some(index) => Err(StoreError::UntypedNull {
            position: index + 1,
        }),
        None => Ok(()),
    }
}

// Integers always travel as INT8. Prepared statements are cached by SQL text,
// so one statement must keep the same parameter types across executions.
fn bind_param<'q>(
    query: Query<'q, Postgres, PgArguments>,
    param: &ColumnValue,
) -> Query<'q, Postgres, PgArguments> {
    match param {
        ColumnValue::Text(s) => query.bind(s.clone()),
        ColumnValue::Integer(i) => query.bind(*i),
        ColumnValue::Boolean(b) => query.bind(*b),
        ColumnValue::Uuid(u) => query.bind(*u),
        ColumnValue::Date(d) => query.bind(*d),
        ColumnValue::Timestamp(ts) => query.bind(*ts),
        ColumnValue::TypedNull(data_type) => match data_type {
            DataType::Text => query.bind(Option::<String>::None),
            DataType::Integer => query.bind(Option::<i64>::None),
            DataType::Boolean => query.bind(Option::<bool>::None),
            DataType::Uuid => query.bind(Option::<Uuid>::None),
            DataType::Date => query.bind(Option::<NaiveDate>::None),
            DataType::Timestamp => query.bind(Option::<DateTime<Utc>>::None),
        },
        // Rejected by check_params before binding
        ColumnValue::Null => query.bind(Option::<String>::None),
    }
}

fn decode_row(row: &PgRow) -> Result<Row, StoreError> {
    let mut decoded = Row::new();

    for column in row.columns() {
        let index = column.ordinal();
        let type_name = column.type_info().name();
        let unsupported = || StoreError::UnsupportedType {
            column: column.name().to_string(),
            type_name: type_name.to_string(),
        };

        let value: ColumnValue = match type_name {
            "INT2" => row.try_get::<Option<i16>, _>(index)?.into(),
            "INT4" => row.try_get::<Option<i32>, _>(index)?.into(),
            "TIMESTAMP" => row
                .try_get::<Option<NaiveDateTime>, _>(index)?
                .map(|ts| ts.and_utc())
                .into(),
            _ => match pg_type_to_data_type(type_name).ok_or_else(unsupported)? {
                DataType::Text => row.try_get::<Option<String>, _>(index)?.into(),
                DataType::Integer => row.try_get::<Option<i64>, _>(index)?.into(),
                DataType::Boolean => row.try_get::<Option<bool>, _>(index)?.into(),
                DataType::Uuid => row.try_get::<Option<Uuid>, _>(index)?.into(),
                DataType::Date => row.try_get::<Option<NaiveDate>, _>(index)?.into(),
                DataType::Timestamp => row.try_get::<Option<DateTime<Utc>>, _>(index)?.into(),
            },
        };

        decoded.insert(column.name().to_string(), value);
    }

    Ok(decoded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_nulls_pass_the_parameter_check() {
        let params = [
            ColumnValue::Integer(5_000_000_000),
            ColumnValue::TypedNull(DataType::Date),
            ColumnValue::from("Ada"),
        ];
        assert!(check_params(&params).is_ok());
        assert!(check_params(&[]).is_ok());
    }

    #[test]
    fn test_untyped_null_is_rejected_before_binding() {
        let params = [ColumnValue::from("Ada"), ColumnValue::Null];
        match check_params(&params) {
            Err(StoreError::UntypedNull { position }) => assert_eq!(position, 2),
            other => panic!("Expected UntypedNull error, got {:?}", other),
        }
    }
}
