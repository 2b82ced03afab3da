//! Declarative model definitions
//!
//! A `ModelDefinition` is the plain-data form a caller hands to the engine.
//! It can be built in code or deserialized from JSON/TOML, where each column
//! is either a bare type name or a detailed descriptor:
//!
//! ```
//! use entity_engine::schema::ModelDefinition;
//!
//! let definition: ModelDefinition = serde_json::from_str(
//!     r#"{
//!         "table_name": "users",
//!         "columns": {
//!             "id": { "type": "integer", "primary_key": true },
//!             "first_name": "text",
//!             "last_name": "text"
//!         }
//!     }"#,
//! )
//! .unwrap();
//!
//! assert_eq!(definition.columns[0].0, "id");
//! ```

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// One column entry of a model definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColumnSpec {
    /// Just a type name; the column is nullable and not a key
    Shorthand(String),
    Detailed {
        #[serde(rename = "type")]
        type_name: String,
        #[serde(default, alias = "notNull")]
        not_null: bool,
        #[serde(default, alias = "primaryKey")]
        primary_key: bool,
    },
}

impl ColumnSpec {
    pub fn new(type_name: &str) -> Self {
        ColumnSpec::Shorthand(type_name.to_string())
    }

    /// Detailed spec for a primary key column of the given type
    pub fn primary_key(type_name: &str) -> Self {
        ColumnSpec::Detailed {
            type_name: type_name.to_string(),
            not_null: true,
            primary_key: true,
        }
    }

    /// Detailed spec for a NOT NULL column of the given type
    pub fn not_null(type_name: &str) -> Self {
        ColumnSpec::Detailed {
            type_name: type_name.to_string(),
            not_null: true,
            primary_key: false,
        }
    }

    pub fn type_name(&self) -> &str {
        match self {
            ColumnSpec::Shorthand(type_name) => type_name,
            ColumnSpec::Detailed { type_name, .. } => type_name,
        }
    }

    pub fn is_not_null(&self) -> bool {
        matches!(self, ColumnSpec::Detailed { not_null: true, .. })
    }

    pub fn is_primary_key(&self) -> bool {
        matches!(
            self,
            ColumnSpec::Detailed {
                primary_key: true,
                ..
            }
        )
    }
}

impl From<&str> for ColumnSpec {
    fn from(type_name: &str) -> Self {
        ColumnSpec::new(type_name)
    }
}

/// Table name plus the ordered column declarations of one model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelDefinition {
    #[serde(alias = "tableName")]
    pub table_name: String,
    #[serde(
        serialize_with = "serialize_columns",
        deserialize_with = "deserialize_columns"
    )]
    pub columns: Vec<(String, ColumnSpec)>,
}

impl ModelDefinition {
    pub fn new(table_name: &str) -> Self {
        Self {
            table_name: table_name.to_string(),
            columns: Vec::new(),
        }
    }

    /// Append a column declaration
    pub fn column(mut self, name: &str, spec: impl Into<ColumnSpec>) -> Self {
        self.columns.push((name.to_string(), spec.into()));
        self
    }
}

fn serialize_columns<S>(columns: &[(String, ColumnSpec)], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut map = serializer.serialize_map(Some(columns.len()))?;
    for (name, spec) in columns {
        map.serialize_entry(name, spec)?;
    }
    map.end()
}

// Column order is significant, so the map is read entry by entry instead of
// into a HashMap. Duplicate keys are kept and rejected later by the schema.
fn deserialize_columns<'de, D>(deserializer: D) -> Result<Vec<(String, ColumnSpec)>, D::Error>
where
    D: Deserializer<'de>,
{
    struct ColumnsVisitor;

    impl<'de> Visitor<'de> for ColumnsVisitor {
        type Value = Vec<(String, ColumnSpec)>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a map of column names to column types or descriptors")
        }

        fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut columns = Vec::with_capacity(access.size_hint().unwrap_or(0));
            while let Some((name, spec)) = access.next_entry::<String, ColumnSpec>()? {
                columns.push((name, spec));
            }
            Ok(columns)
        }
    }

    deserializer.deserialize_map(ColumnsVisitor)
}
