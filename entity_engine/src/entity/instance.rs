//! Entity instances and their lifecycle

use crate::entity::entity_type::EntityType;
use crate::entity::PersistenceState;
use crate::errors::EngineError;
use crate::query_builder::{DeleteRequest, InsertRequest, SqlBuilder, UpdateRequest, ValueMap};
use crate::store::Row;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::fmt;
use type_mapping::ColumnValue;

/// One in-memory record of an entity type.
///
/// Holds a value for every declared column, in declaration order. Each column
/// is also marked as known or not: a column is known once it was supplied to
/// `build`, assigned, or loaded from the store. Saving a Persisted instance
/// writes back only known columns, so a partially loaded instance never nulls
/// out columns it did not load.
#[derive(Clone)]
pub struct EntityInstance {
    model: EntityType,
    values: Vec<ColumnValue>,
    known: Vec<bool>,
    state: PersistenceState,
}

impl EntityInstance {
    pub(crate) fn transient(model: EntityType, values: ValueMap) -> Self {
        let width = model.schema().columns().len();
        let mut instance = Self {
            model,
            values: vec![ColumnValue::Null; width],
            known: vec![false; width],
            state: PersistenceState::Transient,
        };
        instance.assign(values);
        instance
    }

    pub(crate) fn from_row(model: EntityType, row: Row) -> Self {
        let mut instance = Self::transient(model, ValueMap::new());
        instance.merge_row(row);
        instance.state = PersistenceState::Persisted;
        instance
    }

    pub fn entity_type(&self) -> &EntityType {
        &self.model
    }

    pub fn state(&self) -> PersistenceState {
        self.state
    }

    pub fn is_persisted(&self) -> bool {
        self.state == PersistenceState::Persisted
    }

    pub fn primary_key_column(&self) -> &str {
        self.model.primary_key_column()
    }

    /// Primary key value; null until the instance is saved
    pub fn primary_key(&self) -> &ColumnValue {
        &self.values[self.model.schema().primary_key_index()]
    }

    /// Current value of a declared column
    pub fn get(&self, column: &str) -> Option<&ColumnValue> {
        self.model
            .schema()
            .column_index(column)
            .map(|index| &self.values[index])
    }

    /// Set one column in memory. The primary key cannot be assigned.
    pub fn set(
        &mut self,
        column: &str,
        value: impl Into<ColumnValue>,
    ) -> Result<&mut Self, EngineError> {
        let index = self.model.check_column(column)?;
        if index == self.model.schema().primary_key_index() {
            return Err(EngineError::ReadOnlyColumn {
                entity: self.model.entity_name().to_string(),
                column: column.to_string(),
            });
        }

        self.values[index] = value.into().into_stored();
        self.known[index] = true;
        Ok(self)
    }

    /// Merge values in memory. Unknown columns and the primary key are ignored.
    pub fn assign(&mut self, values: ValueMap) -> &mut Self {
        let primary_key_index = self.model.schema().primary_key_index();
        for (column, value) in values {
            match self.model.schema().column_index(&column) {
                Some(index) if index != primary_key_index => {
                    self.values[index] = value.into_stored();
                    self.known[index] = true;
                }
                _ => {}
            }
        }
        self
    }

    /// Every declared column with its current value
    pub fn values(&self) -> ValueMap {
        self.model
            .schema()
            .columns()
            .iter()
            .zip(&self.values)
            .map(|(column, value)| (column.name.clone(), value.clone()))
            .collect()
    }

    pub fn to_json(&self) -> serde_json::Value {
        let object = self
            .model
            .schema()
            .columns()
            .iter()
            .zip(&self.values)
            .map(|(column, value)| (column.name.clone(), value.to_json()))
            .collect();
        serde_json::Value::Object(object)
    }

    /// Insert a Transient instance, or write back the known columns of a Persisted one
    pub async fn save(&mut self) -> Result<&mut Self, EngineError> {
        match self.state {
            PersistenceState::Transient => self.insert().await?,
            PersistenceState::Persisted => self.write_back().await?,
            PersistenceState::Deleted => return Err(self.not_persisted("save")),
        }
        Ok(self)
    }

    /// Merge `values` and write them to the stored row.
    ///
    /// The primary key and unknown columns are ignored. An empty change set
    /// succeeds without a round trip.
    pub async fn update(&mut self, values: ValueMap) -> Result<&mut Self, EngineError> {
        self.require_persisted("update")?;

        let schema = self.model.schema();
        let changes: ValueMap = values
            .into_iter()
            .filter_map(|(column, value)| match schema.column(&column) {
                Some(descriptor) if !descriptor.is_primary_key => {
                    Some((column, value.for_column(descriptor.data_type)))
                }
                _ => None,
            })
            .collect();

        if changes.is_empty() {
            return Ok(self);
        }

        let request = UpdateRequest::new(schema.table_name())
            .set(changes)
            .filter(self.model.primary_key_filter(self.primary_key()))
            .returning(schema.column_names());

        let row = self
            .model
            .execute("UPDATE", request.build()?)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| self.model.not_found(self.primary_key()))?;

        self.merge_row(row);
        Ok(self)
    }

    /// Re-read every column from the store
    pub async fn reload(&mut self) -> Result<&mut Self, EngineError> {
        self.require_persisted("reload")?;

        let row = self.model.fetch_row(self.primary_key(), None).await?;
        self.merge_row(row);
        Ok(self)
    }

    /// Delete the stored row. Values stay readable; the instance becomes Deleted.
    pub async fn delete(&mut self) -> Result<&mut Self, EngineError> {
        self.require_persisted("delete")?;

        let primary_key_column = self.primary_key_column().to_string();
        let request = DeleteRequest::new(self.model.table_name())
            .filter(self.model.primary_key_filter(self.primary_key()))
            .returning(primary_key_column);

        let rows = self.model.execute("DELETE", request.build()?).await?;
        if rows.is_empty() {
            return Err(self.model.not_found(self.primary_key()));
        }

        self.state = PersistenceState::Deleted;
        Ok(self)
    }

    async fn insert(&mut self) -> Result<(), EngineError> {
        let schema = self.model.schema();
        let primary_key_index = schema.primary_key_index();
        let primary_key_column = schema.primary_key().to_string();

        let values: ValueMap = schema
            .columns()
            .iter()
            .zip(&self.values)
            .enumerate()
            .filter(|(index, (_, value))| *index != primary_key_index && !value.is_null())
            .map(|(_, (column, value))| (column.name.clone(), value.clone()))
            .collect();

        let request = InsertRequest::new(schema.table_name())
            .values(values)
            .returning(primary_key_column.as_str());

        let generated = self
            .model
            .execute("INSERT", request.build()?)
            .await?
            .into_iter()
            .next()
            .and_then(|mut row| row.remove(&primary_key_column))
            .filter(|value| !value.is_null())
            .ok_or_else(|| EngineError::MissingGeneratedKey {
                entity: self.model.entity_name().to_string(),
                column: primary_key_column.clone(),
            })?;

        self.values[primary_key_index] = generated;
        self.known[primary_key_index] = true;
        self.state = PersistenceState::Persisted;
        Ok(())
    }

    async fn write_back(&mut self) -> Result<(), EngineError> {
        let schema = self.model.schema();
        let primary_key_index = schema.primary_key_index();

        let set: ValueMap = schema
            .columns()
            .iter()
            .zip(self.values.iter().zip(&self.known))
            .enumerate()
            .filter(|(index, (_, (_, known)))| *index != primary_key_index && **known)
            .map(|(_, (column, (value, _)))| {
                (column.name.clone(), value.clone().for_column(column.data_type))
            })
            .collect();

        if set.is_empty() {
            return Ok(());
        }

        let request = UpdateRequest::new(schema.table_name())
            .set(set)
            .filter(self.model.primary_key_filter(self.primary_key()))
            .returning(schema.primary_key());

        let rows = self.model.execute("SAVE", request.build()?).await?;
        if rows.is_empty() {
            return Err(self.model.not_found(self.primary_key()));
        }
        Ok(())
    }

    fn merge_row(&mut self, row: Row) {
        for (column, value) in row {
            if let Some(index) = self.model.schema().column_index(&column) {
                self.values[index] = value.into_stored();
                self.known[index] = true;
            }
        }
    }

    fn require_persisted(&self, operation: &'static str) -> Result<(), EngineError> {
        if self.is_persisted() {
            Ok(())
        } else {
            Err(self.not_persisted(operation))
        }
    }

    fn not_persisted(&self, operation: &'static str) -> EngineError {
        EngineError::NotPersisted {
            entity: self.model.entity_name().to_string(),
            operation,
            state: self.state,
        }
    }
}

impl fmt::Debug for EntityInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(self.model.entity_name())
            .field("state", &self.state)
            .field("values", &self.values())
            .finish()
    }
}

impl Serialize for EntityInstance {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let columns = self.model.schema().columns();
        let mut map = serializer.serialize_map(Some(columns.len()))?;
        for (column, value) in columns.iter().zip(&self.values) {
            map.serialize_entry(&column.name, &value.to_json())?;
        }
        map.end()
    }
}
