//! Normalized schema model

use crate::errors::SchemaError;
use crate::schema::definition::{ColumnSpec, ModelDefinition};
use crate::validation::{ValidatedFieldName, ValidatedTableName};
use serde::Serialize;
use std::collections::HashSet;
use type_mapping::DataType;

/// Canonical description of one declared column
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnDescriptor {
    pub name: String,
    pub data_type: DataType,
    pub not_null: bool,
    pub is_primary_key: bool,
}

/// Expand raw column entries into descriptors, in declaration order
pub fn normalize(columns: &[(String, ColumnSpec)]) -> Result<Vec<ColumnDescriptor>, SchemaError> {
    columns
        .iter()
        .map(|(name, spec)| {
            let data_type =
                DataType::parse(spec.type_name()).ok_or_else(|| SchemaError::InvalidColumnType {
                    column: name.clone(),
                    type_name: spec.type_name().to_string(),
                })?;

            Ok(ColumnDescriptor {
                name: name.clone(),
                data_type,
                not_null: spec.is_not_null(),
                is_primary_key: spec.is_primary_key(),
            })
        })
        .collect()
}

/// Name of the single primary key column
pub fn resolve_primary_key(
    entity_name: &str,
    columns: &[ColumnDescriptor],
) -> Result<String, SchemaError> {
    let keys: Vec<&ColumnDescriptor> = columns.iter().filter(|c| c.is_primary_key).collect();

    match keys.as_slice() {
        [] => Err(SchemaError::MissingPrimaryKey {
            entity: entity_name.to_string(),
        }),
        [key] => Ok(key.name.clone()),
        _ => Err(SchemaError::AmbiguousPrimaryKey {
            entity: entity_name.to_string(),
            columns: keys.iter().map(|c| c.name.clone()).collect(),
        }),
    }
}

/// Immutable, validated description of one entity's table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemaModel {
    entity_name: String,
    table_name: String,
    columns: Vec<ColumnDescriptor>,
    primary_key_index: usize,
}

impl SchemaModel {
    /// Normalize and validate a definition. Every schema error surfaces here.
    pub fn new(entity_name: &str, definition: ModelDefinition) -> Result<Self, SchemaError> {
        let columns = normalize(&definition.columns)?;

        let invalid = |source| SchemaError::InvalidIdentifier {
            entity: entity_name.to_string(),
            source,
        };
        let table_name = ValidatedTableName::new(&definition.table_name)
            .map_err(invalid)?
            .into_string();

        let mut seen = HashSet::with_capacity(columns.len());
        for column in &columns {
            ValidatedFieldName::new(&column.name).map_err(invalid)?;
            if !seen.insert(column.name.as_str()) {
                return Err(SchemaError::DuplicateColumn {
                    column: column.name.clone(),
                });
            }
        }

        let primary_key = resolve_primary_key(entity_name, &columns)?;
        let primary_key_index = columns
            .iter()
            .position(|c| c.name == primary_key)
            .unwrap_or_default();

        Ok(Self {
            entity_name: entity_name.to_string(),
            table_name,
            columns,
            primary_key_index,
        })
    }

    pub fn entity_name(&self) -> &str {
        &self.entity_name
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    pub fn columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    /// Declared column names in declaration order
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn column(&self, name: &str) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    pub fn primary_key(&self) -> &str {
        &self.columns[self.primary_key_index].name
    }

    pub fn primary_key_index(&self) -> usize {
        self.primary_key_index
    }

    pub fn primary_key_column(&self) -> &ColumnDescriptor {
        &self.columns[self.primary_key_index]
    }
}
