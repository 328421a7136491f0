use std::collections::BTreeMap;

use crate::{common::error::RowError, core::types::Value};

/// A row of data keyed by column name.
///
/// Rows come from a tabular source and are projected into positional
/// statement arguments by an [`InsertStatement`](crate::InsertStatement).
/// A row is valid against a schema only when its column names are exactly
/// the schema's column names.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    values: BTreeMap<String, Value>,
}

impl Row {
    /// Creates an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value of a column, returning the previous value if any.
    pub fn insert(&mut self, column: &str, value: impl Into<Value>) -> Option<Value> {
        self.values.insert(column.to_owned(), value.into())
    }

    /// Builder-style [`Row::insert`].
    pub fn with(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.insert(column, value);
        self
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.values.get(column)
    }

    /// Gets the value of a column, failing with [`RowError::MissingColumn`].
    pub fn get_required(&self, column: &str) -> Result<&Value, RowError> {
        self.get(column)
            .ok_or_else(|| RowError::MissingColumn(column.to_owned()))
    }

    pub fn contains(&self, column: &str) -> bool {
        self.values.contains_key(column)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Checks that this row has a value for exactly the given columns.
    ///
    /// Reports the first missing column before any unexpected one.
    pub fn check_columns<'a>(
        &self,
        expected: impl IntoIterator<Item = &'a str> + Clone,
    ) -> Result<(), RowError> {
        if let Some(missing) = expected.clone().into_iter().find(|name| !self.contains(name)) {
            return Err(RowError::MissingColumn(missing.to_owned()));
        }

        if let Some(unexpected) = self
            .column_names()
            .find(|name| !expected.clone().into_iter().any(|e| e == *name))
        {
            return Err(RowError::UnexpectedColumn(unexpected.to_owned()));
        }

        Ok(())
    }
}

impl<K: AsRef<str>, V: Into<Value>> FromIterator<(K, V)> for Row {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.as_ref().to_owned(), v.into()))
                .collect(),
        }
    }
}
