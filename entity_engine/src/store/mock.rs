//! Recording store used by the engine's unit tests

use crate::errors::StoreError;
use crate::store::{Row, StoreAdapter};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use type_mapping::ColumnValue;

/// Logs every executed statement and answers with scripted rows, in order.
/// Once the script runs out every statement returns no rows.
#[derive(Debug, Default)]
pub(crate) struct RecordingStore {
    executed: Mutex<Vec<(String, Vec<ColumnValue>)>>,
    responses: Mutex<VecDeque<Result<Vec<Row>, String>>>,
}

impl RecordingStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Queue the rows returned by the next unanswered statement
    pub(crate) fn respond(&self, rows: Vec<Row>) -> &Self {
        self.responses.lock().unwrap().push_back(Ok(rows));
        self
    }

    /// Queue a backend failure for the next unanswered statement
    pub(crate) fn fail(&self, message: &str) -> &Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(message.to_string()));
        self
    }

    pub(crate) fn executed(&self) -> Vec<(String, Vec<ColumnValue>)> {
        self.executed.lock().unwrap().clone()
    }

    pub(crate) fn statements(&self) -> Vec<String> {
        self.executed().into_iter().map(|(sql, _)| sql).collect()
    }
}

#[async_trait]
impl StoreAdapter for RecordingStore {
    async fn execute(&self, sql: &str, params: &[ColumnValue]) -> Result<Vec<Row>, StoreError> {
        self.executed
            .lock()
            .unwrap()
            .push((sql.to_string(), params.to_vec()));

        match self.responses.lock().unwrap().pop_front() {
            Some(Ok(rows)) => Ok(rows),
            Some(Err(message)) => Err(StoreError::Backend(message)),
            None => Ok(Vec::new()),
        }
    }
}

/// Build a row from `(column, value)` pairs
pub(crate) fn row<const N: usize>(pairs: [(&str, ColumnValue); N]) -> Row {
    pairs
        .into_iter()
        .map(|(column, value)| (column.to_string(), value))
        .collect()
}
