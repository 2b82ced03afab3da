//! Statement requests
//!
//! Plain descriptors of a SELECT, INSERT, UPDATE or DELETE. They know nothing
//! about models: identifiers are taken as given and only values become
//! positional parameters.

use crate::errors::QueryError;
use crate::query_builder::ordering::SortOrder;
use crate::query_builder::pagination::Pagination;
use crate::query_builder::sql_generation::SqlGenerator;
use std::collections::BTreeMap;
use type_mapping::ColumnValue;

/// Column name to value mapping used for WHERE, SET and VALUES.
/// Keys iterate in sorted order, which fixes the placeholder order.
pub type ValueMap = BTreeMap<String, ColumnValue>;

/// Columns a statement should hand back
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Returning {
    Column(String),
    Columns(Vec<String>),
}

impl Returning {
    pub fn columns(&self) -> Vec<&str> {
        match self {
            Returning::Column(column) => vec![column.as_str()],
            Returning::Columns(columns) => columns.iter().map(String::as_str).collect(),
        }
    }
}

impl From<&str> for Returning {
    fn from(column: &str) -> Self {
        Returning::Column(column.to_string())
    }
}

impl From<String> for Returning {
    fn from(column: String) -> Self {
        Returning::Column(column)
    }
}

impl From<Vec<String>> for Returning {
    fn from(columns: Vec<String>) -> Self {
        Returning::Columns(columns)
    }
}

impl From<Vec<&str>> for Returning {
    fn from(columns: Vec<&str>) -> Self {
        Returning::Columns(columns.into_iter().map(str::to_string).collect())
    }
}

/// SQL text plus its positional parameters, in placeholder order
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub sql: String,
    pub params: Vec<ColumnValue>,
}

/// Render a request into a parameterized statement
pub trait SqlBuilder {
    fn build(&self) -> Result<Statement, QueryError>;
}

fn has_conditions(filter: Option<&ValueMap>) -> bool {
    filter.is_some_and(|filter| !filter.is_empty())
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectRequest {
    pub columns: Vec<String>,
    pub from: String,
    pub filter: Option<ValueMap>,
    pub order_by: Vec<(String, SortOrder)>,
    pub pagination: Pagination,
}

impl SelectRequest {
    pub fn new(from: &str) -> Self {
        Self {
            from: from.to_string(),
            ..Default::default()
        }
    }

    pub fn columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    pub fn filter(mut self, filter: ValueMap) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Add one `column = value` condition
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
        self.pagination = self.pagination.with_limit(limit);
        self
    }

    pub fn offset(mut self, offset: u64) -> Self {
        self.pagination = self.pagination.with_offset(offset);
        self
    }
}

impl SqlBuilder for SelectRequest {
    fn build(&self) -> Result<Statement, QueryError> {
        let mut params = Vec::new();
        let where_clause = SqlGenerator::build_where_clause(self.filter.as_ref(), &mut params);

        let sql = SqlGenerator::join_clauses([
            format!(
                "SELECT {} FROM {}",
                SqlGenerator::build_select_clause(&self.columns),
                self.from
            ),
            where_clause,
            SqlGenerator::build_order_clause(&self.order_by),
            self.pagination.to_sql(),
        ]);

        Ok(Statement { sql, params })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct InsertRequest {
    pub into: String,
    pub values: ValueMap,
    pub returning: Option<Returning>,
}

impl InsertRequest {
    pub fn new(into: &str) -> Self {
        Self {
            into: into.to_string(),
            ..Default::default()
        }
    }

    pub fn values(mut self, values: ValueMap) -> Self {
        self.values = values;
        self
    }

    pub fn value(mut self, column: &str, value: impl Into<ColumnValue>) -> Self {
        self.values.insert(column.to_string(), value.into());
        self
    }

    pub fn returning(mut self, returning: impl Into<Returning>) -> Self {
        self.returning = Some(returning.into());
        self
    }
}

impl SqlBuilder for InsertRequest {
    fn build(&self) -> Result<Statement, QueryError> {
        let mut params = Vec::new();
        let values_clause = SqlGenerator::build_values_clause(&self.values, &mut params);

        let sql = SqlGenerator::join_clauses([
            format!("INSERT INTO {}", self.into),
            values_clause,
            SqlGenerator::build_returning_clause(self.returning.as_ref()),
        ]);

        Ok(Statement { sql, params })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateRequest {
    pub table: String,
    pub set: ValueMap,
    pub filter: Option<ValueMap>,
    pub returning: Option<Returning>,
}

impl UpdateRequest {
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            ..Default::default()
        }
    }

    pub fn set(mut self, set: ValueMap) -> Self {
        self.set = set;
        self
    }

    pub fn set_value(mut self, column: &str, value: impl Into<ColumnValue>) -> Self {
        self.set.insert(column.to_string(), value.into());
        self
    }

    pub fn filter(mut self, filter: ValueMap) -> Self {
        self.filter = Some(filter);
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

impl SqlBuilder for UpdateRequest {
    fn build(&self) -> Result<Statement, QueryError> {
        if !has_conditions(self.filter.as_ref()) {
            return Err(QueryError::MissingWhereClause {
                statement: "UPDATE",
                table: self.table.clone(),
            });
        }
        if self.set.is_empty() {
            return Err(QueryError::EmptySet {
                table: self.table.clone(),
            });
        }

        // WHERE takes $1..$k, SET continues from $k+1
        let mut params = Vec::new();
        let where_clause = SqlGenerator::build_where_clause(self.filter.as_ref(), &mut params);
        let set_clause = SqlGenerator::build_set_clause(&self.set, &mut params);

        let sql = SqlGenerator::join_clauses([
            format!("UPDATE {}", self.table),
            set_clause,
            where_clause,
            SqlGenerator::build_returning_clause(self.returning.as_ref()),
        ]);

        Ok(Statement { sql, params })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeleteRequest {
    pub from: String,
    pub filter: Option<ValueMap>,
    pub returning: Option<Returning>,
}

impl DeleteRequest {
    pub fn new(from: &str) -> Self {
        Self {
            from: from.to_string(),
            ..Default::default()
        }
    }

    pub fn filter(mut self, filter: ValueMap) -> Self {
        self.filter = Some(filter);
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

impl SqlBuilder for DeleteRequest {
    fn build(&self) -> Result<Statement, QueryError> {
        if !has_conditions(self.filter.as_ref()) {
            return Err(QueryError::MissingWhereClause {
                statement: "DELETE",
                table: self.from.clone(),
            });
        }

        let mut params = Vec::new();
        let where_clause = SqlGenerator::build_where_clause(self.filter.as_ref(), &mut params);

        let sql = SqlGenerator::join_clauses([
            format!("DELETE FROM {}", self.from),
            where_clause,
            SqlGenerator::build_returning_clause(self.returning.as_ref()),
        ]);

        Ok(Statement { sql, params })
    }
}
