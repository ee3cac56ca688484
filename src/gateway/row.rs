//! Row model exchanged with the data backend.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// A single record exchanged with the data backend, keyed by column name.
///
/// Rows are schemaless JSON objects; each bounded context maps them to and
/// from its domain types through its `schema` module.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row(Map<String, Value>);

impl Row {
    /// Creates an empty row.
    #[must_use]
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Adds a column value, consuming and returning the row.
    #[must_use]
    pub fn with(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(column.into(), value.into());
        self
    }

    /// Sets a column value in place.
    pub fn set(&mut self, column: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(column.into(), value.into());
    }

    /// Returns the raw value of a column, if present.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.0.get(column)
    }

    /// Returns `true` when the row carries the given column.
    #[must_use]
    pub fn contains(&self, column: &str) -> bool {
        self.0.contains_key(column)
    }

    /// Returns the number of columns in the row.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when the row has no columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the columns of the row in name order.
    pub fn columns(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(column, value)| (column.as_str(), value))
    }

    /// Reads a required integer column.
    ///
    /// # Errors
    ///
    /// Returns [`RowDecodeError`] when the column is missing or is not an
    /// integer.
    pub fn read_i64(&self, column: &str) -> Result<i64, RowDecodeError> {
        self.required(column)?
            .as_i64()
            .ok_or_else(|| RowDecodeError::unexpected(column, "an integer"))
    }

    /// Reads a required string column.
    ///
    /// # Errors
    ///
    /// Returns [`RowDecodeError`] when the column is missing or is not a
    /// string.
    pub fn read_str(&self, column: &str) -> Result<&str, RowDecodeError> {
        self.required(column)?
            .as_str()
            .ok_or_else(|| RowDecodeError::unexpected(column, "a string"))
    }

    /// Reads an optional string column.
    ///
    /// An absent column and an explicit JSON `null` both decode to `None`.
    ///
    /// # Errors
    ///
    /// Returns [`RowDecodeError`] when the column is present but is neither
    /// a string nor `null`.
    pub fn read_opt_str(&self, column: &str) -> Result<Option<&str>, RowDecodeError> {
        match self.0.get(column) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(text)) => Ok(Some(text)),
            Some(_) => Err(RowDecodeError::unexpected(column, "a string or null")),
        }
    }

    fn required(&self, column: &str) -> Result<&Value, RowDecodeError> {
        self.0
            .get(column)
            .ok_or_else(|| RowDecodeError::MissingColumn(column.to_owned()))
    }
}

impl From<Map<String, Value>> for Row {
    fn from(columns: Map<String, Value>) -> Self {
        Self(columns)
    }
}

impl FromIterator<(String, Value)> for Row {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Errors raised while reading a fetched row into a domain type.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RowDecodeError {
    /// A required column was absent.
    #[error("column '{0}' is missing")]
    MissingColumn(String),

    /// A column was present but did not hold the expected shape of value.
    #[error("column '{column}' could not be read as {expected}")]
    UnexpectedValue {
        /// The offending column name.
        column: String,
        /// Description of the expected value shape.
        expected: &'static str,
    },
}

impl RowDecodeError {
    /// Creates an unexpected-value error for the given column.
    #[must_use]
    pub fn unexpected(column: &str, expected: &'static str) -> Self {
        Self::UnexpectedValue {
            column: column.to_owned(),
            expected,
        }
    }
}
