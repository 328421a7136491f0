use crate::core::types::ColumnType;

/// Definition of a single column in a table schema.
///
/// `name` is the database column name. It is kept separate from any Rust
/// binding so tables can use names that are not valid identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDefinition {
    /// The column name.
    pub name: String,

    /// The column type rendered into `CREATE TABLE`.
    pub kind: ColumnType,

    /// Whether this column is part of the primary key.
    pub primary_key: bool,
}

impl ColumnDefinition {
    /// Creates a new column definition.
    pub fn new(name: &str, kind: ColumnType, primary_key: bool) -> Self {
        Self {
            name: name.to_owned(),
            kind,
            primary_key,
        }
    }

    /// Creates a primary-key column.
    pub fn primary(name: &str, kind: ColumnType) -> Self {
        Self::new(name, kind, true)
    }

    /// Creates a regular (non-key) column.
    pub fn regular(name: &str, kind: ColumnType) -> Self {
        Self::new(name, kind, false)
    }

    pub fn text(name: &str) -> Self {
        Self::regular(name, ColumnType::Text)
    }

    pub fn integer(name: &str) -> Self {
        Self::regular(name, ColumnType::Integer)
    }

    pub fn float(name: &str) -> Self {
        Self::regular(name, ColumnType::Float)
    }

    /// Marks this column as part of the primary key.
    pub fn with_primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    /// Renders this column's `CREATE TABLE` fragment, e.g. `"id int"`.
    pub fn render(&self) -> String {
        self.kind.render(&self.name)
    }
}
