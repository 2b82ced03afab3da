//! Table-level operations of one model

use crate::entity::instance::EntityInstance;
use crate::entity::{DeleteQuery, SelectQuery, UpdateQuery};
use crate::errors::{EngineError, SchemaError};
use crate::query_builder::{
    DeleteRequest, Pagination, Returning, SelectRequest, SqlBuilder, Statement, UpdateRequest,
    ValueMap,
};
use crate::schema::{ModelDefinition, SchemaModel};
use crate::store::{Row, StoreAdapter};
use std::fmt;
use std::sync::Arc;
use type_mapping::ColumnValue;

/// A model bound to a store. Cloning shares the schema and the store handle.
#[derive(Clone)]
pub struct EntityType {
    schema: Arc<SchemaModel>,
    store: Arc<dyn StoreAdapter>,
}

impl fmt::Debug for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityType")
            .field("entity_name", &self.schema.entity_name())
            .field("table_name", &self.schema.table_name())
            .field("columns", &self.schema.column_names())
            .finish()
    }
}

impl EntityType {
    pub fn new(schema: SchemaModel, store: Arc<dyn StoreAdapter>) -> Self {
        Self {
            schema: Arc::new(schema),
            store,
        }
    }

    /// Validate `definition` and bind it to `store`
    pub fn define(
        entity_name: &str,
        definition: ModelDefinition,
        store: Arc<dyn StoreAdapter>,
    ) -> Result<Self, SchemaError> {
        Ok(Self::new(SchemaModel::new(entity_name, definition)?, store))
    }

    pub fn schema(&self) -> &SchemaModel {
        &self.schema
    }

    pub fn entity_name(&self) -> &str {
        self.schema.entity_name()
    }

    pub fn table_name(&self) -> &str {
        self.schema.table_name()
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.schema.column_names()
    }

    pub fn primary_key_column(&self) -> &str {
        self.schema.primary_key()
    }

    /// New Transient instance. Unknown keys and any primary key value are dropped.
    pub fn build(&self, values: ValueMap) -> EntityInstance {
        EntityInstance::transient(self.clone(), values)
    }

    /// `build` followed by `save`
    pub async fn create(&self, values: ValueMap) -> Result<EntityInstance, EngineError> {
        let mut instance = self.build(values);
        instance.save().await?;
        Ok(instance)
    }

    /// Fetch one row by primary key.
    ///
    /// With `columns`, only those columns (plus the primary key) are loaded;
    /// every other column of the returned instance stays null.
    pub async fn find_by_primary_key(
        &self,
        primary_key: impl Into<ColumnValue>,
        columns: Option<&[&str]>,
    ) -> Result<EntityInstance, EngineError> {
        let primary_key = primary_key.into();
        if primary_key.is_null() {
            return Err(EngineError::InvalidIdentifier {
                entity: self.entity_name().to_string(),
                key: primary_key.to_string(),
            });
        }

        let row = self.fetch_row(&primary_key, columns).await?;
        Ok(EntityInstance::from_row(self.clone(), row))
    }

    /// Fetch every row matching `query` as Persisted instances
    pub async fn select(
        &self,
        columns: Option<&[&str]>,
        query: SelectQuery,
    ) -> Result<Vec<EntityInstance>, EngineError> {
        for (column, _) in &query.order_by {
            self.check_column(column)?;
        }

        let request = SelectRequest {
            columns: self.projection(columns)?,
            from: self.table_name().to_string(),
            filter: query.filter.map(|f| self.prepare_values(f)).transpose()?,
            order_by: query.order_by,
            pagination: Pagination {
                limit: query.limit,
                offset: query.offset,
            },
        };

        let rows = self.execute("SELECT", request.build()?).await?;
        Ok(rows
            .into_iter()
            .map(|row| EntityInstance::from_row(self.clone(), row))
            .collect())
    }

    /// Table-level UPDATE. Does not touch any in-memory instance.
    pub async fn update(&self, query: UpdateQuery) -> Result<Vec<Row>, EngineError> {
        self.check_returning(query.returning.as_ref())?;

        let request = UpdateRequest {
            table: self.table_name().to_string(),
            set: self.prepare_values(query.set)?,
            filter: query.filter.map(|f| self.prepare_values(f)).transpose()?,
            returning: query.returning,
        };

        self.execute("UPDATE_WHERE", request.build()?).await
    }

    /// Table-level DELETE. Does not touch any in-memory instance.
    pub async fn delete(&self, query: DeleteQuery) -> Result<Vec<Row>, EngineError> {
        self.check_returning(query.returning.as_ref())?;

        let request = DeleteRequest {
            from: self.table_name().to_string(),
            filter: query.filter.map(|f| self.prepare_values(f)).transpose()?,
            returning: query.returning,
        };

        self.execute("DELETE_WHERE", request.build()?).await
    }

    /// Load one row by primary key, `NotFound` when it does not exist
    pub(crate) async fn fetch_row(
        &self,
        primary_key: &ColumnValue,
        columns: Option<&[&str]>,
    ) -> Result<Row, EngineError> {
        let request = SelectRequest::new(self.table_name())
            .columns(self.projection(columns)?)
            .filter(self.primary_key_filter(primary_key))
            .limit(1);

        self.execute("FIND", request.build()?)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| self.not_found(primary_key))
    }

    pub(crate) async fn execute(
        &self,
        operation: &str,
        statement: Statement,
    ) -> Result<Vec<Row>, EngineError> {
        tracing::debug!("[{}] SQL: {}", operation, statement.sql);
        #[cfg(feature = "debug-logging")]
        tracing::trace!("[{}] params: {:?}", operation, statement.params);

        let rows = self
            .store
            .execute(&statement.sql, &statement.params)
            .await?;

        tracing::debug!("[{}] {} row(s) returned", operation, rows.len());
        Ok(rows)
    }

    pub(crate) fn primary_key_filter(&self, primary_key: &ColumnValue) -> ValueMap {
        let column = self.schema.primary_key_column();
        ValueMap::from([(
            column.name.clone(),
            primary_key.clone().for_column(column.data_type),
        )])
    }

    pub(crate) fn not_found(&self, primary_key: &ColumnValue) -> EngineError {
        EngineError::NotFound {
            entity: self.entity_name().to_string(),
            column: self.primary_key_column().to_string(),
            key: primary_key.to_string(),
        }
    }

    /// Index of a declared column, `UnknownColumn` otherwise
    pub(crate) fn check_column(&self, column: &str) -> Result<usize, EngineError> {
        self.schema
            .column_index(column)
            .ok_or_else(|| EngineError::unknown_column(self.entity_name(), column))
    }

    /// Check every key against the schema and give NULLs the column type
    pub(crate) fn prepare_values(&self, values: ValueMap) -> Result<ValueMap, EngineError> {
        values
            .into_iter()
            .map(|(column, value)| {
                let index = self.check_column(&column)?;
                let data_type = self.schema.columns()[index].data_type;
                Ok((column, value.for_column(data_type)))
            })
            .collect()
    }

    /// Projection for a finder: all columns by default, and always the primary key
    fn projection(&self, columns: Option<&[&str]>) -> Result<Vec<String>, EngineError> {
        let Some(columns) = columns else {
            return Ok(self
                .column_names()
                .into_iter()
                .map(str::to_string)
                .collect());
        };

        let primary_key = self.primary_key_column();
        let mut projection = vec![primary_key.to_string()];
        for column in columns {
            self.check_column(column)?;
            if !projection.iter().any(|c| c == column) {
                projection.push(column.to_string());
            }
        }
        Ok(projection)
    }

    fn check_returning(&self, returning: Option<&Returning>) -> Result<(), EngineError> {
        if let Some(returning) = returning {
            for column in returning.columns() {
                self.check_column(column)?;
            }
        }
        Ok(())
    }
}
