//! Entity engine
//!
//! An [`EntityType`] is built from one [`SchemaModel`](crate::schema::SchemaModel)
//! and one store handle. It exposes the table-level operations and produces
//! [`EntityInstance`]s, which carry their own persistence state:
//!
//! ```text
//! build ──> Transient ──save──> Persisted ──delete──> Deleted
//!                                 │    ▲
//!                                 └────┘ save / update / reload
//! ```
//!
//! Any operation that needs a stored row fails with
//! [`EngineError::NotPersisted`](crate::errors::EngineError::NotPersisted) on a
//! Transient or Deleted instance and leaves it untouched.

pub mod entity_type;
pub mod instance;


use crate::query_builder::{Returning, SortOrder, ValueMap};
use serde::{Deserialize, Serialize};
use std::fmt;
use type_mapping::ColumnValue;

pub use entity_type::EntityType;
pub use instance::EntityInstance;

/// Lifecycle state of an entity instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PersistenceState {
    /// Built in memory; no key assigned yet
    Transient,
    /// Backed by a stored row with a known key
    Persisted,
    /// The stored row was deleted. Terminal.
    Deleted,
}

impl fmt::Display for PersistenceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PersistenceState::Transient => "transient",
            PersistenceState::Persisted => "persisted",
            PersistenceState::Deleted => "deleted",
        })
    }
}

/// Filter, ordering and pagination for [`EntityType::select`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectQuery {
    pub filter: Option<ValueMap>,
    pub order_by: Vec<(String, SortOrder)>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

impl SelectQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn where_eq(mut self, column: &str, value: impl Into<ColumnValue>) -> Self {
        self.filter
            .get_or_insert_with(ValueMap::new)
            .insert(column.to_string(), value.into());
        self
    }

    pub fn order_by(mut self, column: &str, order: SortOrder) -> Self {
        self.order_by.push((column.to_string(), order));
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }
}

/// Table-level UPDATE for [`EntityType::update`]. `filter` is mandatory.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateQuery {
    pub set: ValueMap,
    pub filter: Option<ValueMap>,
    pub returning: Option<Returning>,
}

impl UpdateQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_value(mut self, column: &str, value: impl Into<ColumnValue>) -> Self {
        self.set.insert(column.to_string(), value.into());
        self
    }

    pub fn where_eq(mut self, column: &str, value: impl Into<ColumnValue>) -> Self {
        self.filter
            .get_or_insert_with(ValueMap::new)
            .insert(column.to_string(), value.into());
        self
    }

    pub fn returning(mut self, returning: impl Into<Returning>) -> Self {
        self.returning = Some(returning.into());
        self
    }
}

/// Table-level DELETE for [`EntityType::delete`]. `filter` is mandatory.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeleteQuery {
    pub filter: Option<ValueMap>,
    pub returning: Option<Returning>,
}

impl DeleteQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn where_eq(mut self, column: &str, value: impl Into<ColumnValue>) -> Self {
        self.filter
            .get_or_insert_with(ValueMap::new)
            .insert(column.to_string(), value.into());
        self
    }

    pub fn returning(mut self, returning: impl Into<Returning>) -> Self {
        self.returning = Some(returning.into());
        self
    }
}
