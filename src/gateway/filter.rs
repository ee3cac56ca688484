//! Filter model for gateway queries.

use super::row::Row;
use serde_json::Value;

/// Condition applied to a single column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    /// The column equals the given value.
    Eq(Value),
    /// The column value is one of the given values.
    In(Vec<Value>),
    /// Case-insensitive substring match; the pattern carries `%` affixes.
    Ilike(String),
}

impl Condition {
    /// Returns `true` when the given column value satisfies this condition.
    #[must_use]
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            Self::Eq(expected) => value == expected,
            Self::In(candidates) => candidates.contains(value),
            Self::Ilike(pattern) => value.as_str().is_some_and(|text| {
                let needle = pattern.trim_matches('%').to_lowercase();
                text.to_lowercase().contains(&needle)
            }),
        }
    }
}

/// Conjunction of column conditions for a gateway query.
///
/// Only the three shapes the application actually issues are modelled:
/// equality, membership, and case-insensitive substring search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    conditions: Vec<(String, Condition)>,
}

impl Filter {
    /// Creates a filter with no conditions, matching every row.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            conditions: Vec::new(),
        }
    }

    /// Requires the column to equal the given value.
    #[must_use]
    pub fn eq(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.conditions.push((column.into(), Condition::Eq(value.into())));
        self
    }

    /// Requires the column value to be one of the given values.
    ///
    /// An empty candidate list matches no rows, mirroring the backend's
    /// behaviour for an empty `in` clause.
    #[must_use]
    pub fn one_of(
        mut self,
        column: impl Into<String>,
        values: impl IntoIterator<Item = impl Into<Value>>,
    ) -> Self {
        let candidates = values.into_iter().map(Into::into).collect();
        self.conditions
            .push((column.into(), Condition::In(candidates)));
        self
    }

    /// Requires the column to match the pattern case-insensitively.
    ///
    /// The pattern uses the backend's `%` affixes, e.g. `%fragment%`.
    #[must_use]
    pub fn ilike(mut self, column: impl Into<String>, pattern: impl Into<String>) -> Self {
        self.conditions
            .push((column.into(), Condition::Ilike(pattern.into())));
        self
    }

    /// Returns the column conditions in insertion order.
    #[must_use]
    pub fn conditions(&self) -> &[(String, Condition)] {
        &self.conditions
    }

    /// Returns `true` when the filter carries no conditions.
    #[must_use]
    pub fn is_unconstrained(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Returns `true` when every condition holds for the given row.
    ///
    /// A condition on an absent column rejects the row.
    #[must_use]
    pub fn matches(&self, row: &Row) -> bool {
        self.conditions.iter().all(|(column, condition)| {
            row.get(column).is_some_and(|value| condition.accepts(value))
        })
    }
}
