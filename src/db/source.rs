use crate::{
    common::error::RowError,
    core::types::Value,
    db::table::Row,
};

/// A column reported by a tabular source: its name and the source's own
/// type tag for it (e.g. `"int64"`, `"object"`, `"datetime64[ns]"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceColumn {
    pub name: String,
    pub native_type: String,
}

impl SourceColumn {
    pub fn new(name: &str, native_type: &str) -> Self {
        Self {
            name: name.to_owned(),
            native_type: native_type.to_owned(),
        }
    }
}

/// Tabular data that can be described and loaded.
///
/// `columns` is ordered. `rows` is single-pass and consumes the source;
/// rows are produced lazily and are not retained by the loader.
pub trait TabularSource {
    type Rows: Iterator<Item = Row>;

    /// The source's columns in order.
    fn columns(&self) -> &[SourceColumn];

    /// Consumes the source, yielding its rows in order.
    fn rows(self) -> Self::Rows;
}

/// An in-memory table with typed columns.
///
/// ```
/// use pandra::{Frame, TabularSource, Value};
///
/// let mut frame = Frame::new([("id", "int64"), ("name", "object")]);
/// frame.push_values(vec![Value::Integer(1), "Alice".into()]).unwrap();
///
/// assert_eq!(frame.columns().len(), 2);
/// assert_eq!(frame.rows().count(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    columns: Vec<SourceColumn>,
    rows: Vec<Row>,
}

impl Frame {
    /// Creates an empty frame from `(name, native_type)` pairs.
    pub fn new<'a>(columns: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            columns: columns
                .into_iter()
                .map(|(name, native_type)| SourceColumn::new(name, native_type))
                .collect(),
            rows: Vec::new(),
        }
    }

    /// Appends a row given positionally, one value per column.
    pub fn push_values(&mut self, values: Vec<Value>) -> Result<(), RowError> {
        if let Some(column) = self.columns.get(values.len()) {
            return Err(RowError::MissingColumn(column.name.clone()));
        }
        if values.len() > self.columns.len() {
            return Err(RowError::UnexpectedColumn(format!(
                "#{}",
                self.columns.len()
            )));
        }

        let row = self
            .columns
            .iter()
            .map(|col| col.name.as_str())
            .zip(values)
            .collect();
        self.rows.push(row);
        Ok(())
    }

    /// Appends a row keyed by column name. The row is not checked here; the
    /// loader reports rows that do not match its schema.
    pub fn push_row(&mut self, row: Row) {
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl TabularSource for Frame {
    type Rows = std::vec::IntoIter<Row>;

    fn columns(&self) -> &[SourceColumn] {
        &self.columns
    }

    fn rows(self) -> Self::Rows {
        self.rows.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_values_keys_by_column() {
        let mut frame = Frame::new([("id", "int64"), ("name", "object")]);
        frame
            .push_values(vec![Value::Integer(7), "Bob".into()])
            .unwrap();

        let row = frame.rows().next().unwrap();
        assert_eq!(row.get("id"), Some(&Value::Integer(7)));
        assert_eq!(row.get("name"), Some(&Value::Text("Bob".to_string())));
    }

    #[test]
    fn test_push_values_wrong_width() {
        let mut frame = Frame::new([("id", "int64"), ("name", "object")]);
        assert_eq!(
            frame.push_values(vec![Value::Integer(7)]),
            Err(RowError::MissingColumn("name".to_string()))
        );
        assert!(matches!(
            frame.push_values(vec![Value::Integer(7), Value::Null, Value::Null]),
            Err(RowError::UnexpectedColumn(_))
        ));
        assert!(frame.is_empty());
    }
}
