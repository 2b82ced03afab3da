//! Clause rendering shared by the statement builders
//!
//! Every function that emits a placeholder pushes the matching value onto
//! `params` and numbers the placeholder `params.len()`, so clauses rendered
//! one after another against the same list never reuse an index.

use crate::query_builder::ordering::SortOrder;
use crate::query_builder::request::{Returning, ValueMap};
use type_mapping::ColumnValue;

pub struct SqlGenerator;

impl SqlGenerator {
    fn push_param(value: &ColumnValue, params: &mut Vec<ColumnValue>) -> String {
        params.push(value.clone());
        format!("${}", params.len())
    }

    /// Build WHERE clause; an absent or empty map renders nothing
    pub fn build_where_clause(filter: Option<&ValueMap>, params: &mut Vec<ColumnValue>) -> String {
        let filter = match filter {
            Some(filter) if !filter.is_empty() => filter,
            _ => return String::new(),
        };

        let conditions_sql = filter
            .iter()
            .map(|(column, value)| format!("{} = {}", column, Self::push_param(value, params)))
            .collect::<Vec<_>>()
            .join(" AND ");

        format!("WHERE {}", conditions_sql)
    }

    /// Build SET clause from column assignments
    pub fn build_set_clause(set: &ValueMap, params: &mut Vec<ColumnValue>) -> String {
        let assignments = set
            .iter()
            .map(|(column, value)| format!("{} = {}", column, Self::push_param(value, params)))
            .collect::<Vec<_>>()
            .join(", ");

        format!("SET {}", assignments)
    }

    /// Build the column list and VALUES placeholders of an INSERT from one
    /// pass over the map, so names and positions stay aligned
    pub fn build_values_clause(values: &ValueMap, params: &mut Vec<ColumnValue>) -> String {
        if values.is_empty() {
            return "DEFAULT VALUES".to_string();
        }

        let (columns, placeholders): (Vec<&str>, Vec<String>) = values
            .iter()
            .map(|(column, value)| (column.as_str(), Self::push_param(value, params)))
            .unzip();

        format!(
            "({}) VALUES ({})",
            columns.join(", "),
            placeholders.join(", ")
        )
    }

    /// Build SELECT projection; no columns means every column
    pub fn build_select_clause(columns: &[String]) -> String {
        if columns.is_empty() {
            return "*".to_string();
        }

        columns.join(", ")
    }

    /// Build ORDER BY clause
    pub fn build_order_clause(order_by: &[(String, SortOrder)]) -> String {
        if order_by.is_empty() {
            return String::new();
        }

        let order_items: Vec<String> = order_by
            .iter()
            .map(|(field, order)| format!("{} {}", field, order.to_sql()))
            .collect();

        format!("ORDER BY {}", order_items.join(", "))
    }

    /// Build RETURNING clause
    pub fn build_returning_clause(returning: Option<&Returning>) -> String {
        match returning.map(Returning::columns) {
            Some(columns) if !columns.is_empty() => format!("RETURNING {}", columns.join(", ")),
            _ => String::new(),
        }
    }

    /// Join rendered clauses with single spaces, skipping empty ones
    pub fn join_clauses<I, S>(clauses: I) -> String
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        clauses
            .into_iter()
            .filter(|clause| !clause.as_ref().is_empty())
            .map(|clause| clause.as_ref().to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }
}
