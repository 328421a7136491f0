use std::collections::HashSet;

use super::{column_def::ColumnDefinition, row::Row};
use crate::{
    common::error::{RowError, SchemaError},
    core::types::ColumnType,
};

/// A validated table definition.
///
/// A schema is a table name, an optional keyspace and an ordered list of
/// column definitions. Declaration order is authoritative: every statement
/// rendered from the schema lists columns, and primary key columns, in the
/// order they were declared.
///
/// Schemas are immutable once built. The primary key is resolved at
/// construction so repeated lookups always agree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    table_name: String,
    keyspace: Option<String>,
    columns: Vec<ColumnDefinition>,

    /// Indices into `columns` of the primary key columns, in declaration order.
    primary_keys: Vec<usize>,
}

impl TableSchema {
    /// Validates and builds a schema.
    ///
    /// Checks run in order: duplicate column names, no columns, no primary key.
    pub fn new(
        table_name: &str,
        keyspace: Option<&str>,
        columns: Vec<ColumnDefinition>,
    ) -> Result<Self, SchemaError> {
        let mut seen = HashSet::with_capacity(columns.len());
        for column in &columns {
            if !seen.insert(column.name.as_str()) {
                return Err(SchemaError::DuplicateColumnName(column.name.clone()));
            }
        }

        if columns.is_empty() {
            return Err(SchemaError::EmptySchema);
        }

        let primary_keys: Vec<usize> = columns
            .iter()
            .enumerate()
            .filter(|(_, col)| col.primary_key)
            .map(|(idx, _)| idx)
            .collect();

        if primary_keys.is_empty() {
            return Err(SchemaError::NoPrimaryKey);
        }

        Ok(Self {
            table_name: table_name.to_owned(),
            keyspace: keyspace.map(str::to_owned),
            columns,
            primary_keys,
        })
    }

    /// Starts a [`TableSchemaBuilder`] for the given table.
    pub fn builder(table_name: &str) -> TableSchemaBuilder {
        TableSchemaBuilder::new(table_name)
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    pub fn keyspace(&self) -> Option<&str> {
        self.keyspace.as_deref()
    }

    /// Returns `keyspace.table`, or just `table` without a keyspace.
    pub fn qualified_name(&self) -> String {
        match &self.keyspace {
            Some(keyspace) => format!("{keyspace}.{}", self.table_name),
            None => self.table_name.clone(),
        }
    }

    /// The columns in declaration order.
    pub fn columns(&self) -> &[ColumnDefinition] {
        &self.columns
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> + Clone {
        self.columns.iter().map(|col| col.name.as_str())
    }

    /// The primary key columns in declaration order.
    pub fn primary_keys(&self) -> impl Iterator<Item = &ColumnDefinition> {
        self.primary_keys.iter().map(|&idx| &self.columns[idx])
    }

    /// Finds the index of a column by name.
    pub fn get_column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|col| col.name == name)
    }

    pub fn get_column(&self, name: &str) -> Option<&ColumnDefinition> {
        self.columns.iter().find(|col| col.name == name)
    }

    /// Checks that a set of column names equals this schema's column set.
    pub fn check_columns<'a>(
        &self,
        names: impl IntoIterator<Item = &'a str> + Clone,
    ) -> Result<(), SchemaError> {
        match SchemaError::mismatch(self.column_names(), names) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Checks that a row provides exactly this schema's columns.
    pub fn validate_row(&self, row: &Row) -> Result<(), RowError> {
        row.check_columns(self.column_names())
    }
}

/// Builds a [`TableSchema`] one column at a time.
///
/// ```
/// use pandra::{ColumnType, TableSchema};
///
/// let schema = TableSchema::builder("User")
///     .keyspace("myKeySpace")
///     .primary_key("id", ColumnType::Integer)
///     .column("email", ColumnType::Text)
///     .build()
///     .unwrap();
///
/// assert_eq!(schema.qualified_name(), "myKeySpace.User");
/// ```
#[derive(Debug, Clone)]
pub struct TableSchemaBuilder {
    table_name: String,
    keyspace: Option<String>,
    columns: Vec<ColumnDefinition>,
}

impl TableSchemaBuilder {
    pub fn new(table_name: &str) -> Self {
        Self {
            table_name: table_name.to_owned(),
            keyspace: None,
            columns: Vec::new(),
        }
    }

    pub fn keyspace(mut self, keyspace: &str) -> Self {
        self.keyspace = Some(keyspace.to_owned());
        self
    }

    /// Appends a non-key column.
    pub fn column(self, name: &str, kind: ColumnType) -> Self {
        self.definition(ColumnDefinition::regular(name, kind))
    }

    /// Appends a primary key column.
    pub fn primary_key(self, name: &str, kind: ColumnType) -> Self {
        self.definition(ColumnDefinition::primary(name, kind))
    }

    pub fn definition(mut self, column: ColumnDefinition) -> Self {
        self.columns.push(column);
        self
    }

    pub fn build(self) -> Result<TableSchema, SchemaError> {
        TableSchema::new(&self.table_name, self.keyspace.as_deref(), self.columns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_columns() -> Vec<ColumnDefinition> {
        vec![
            ColumnDefinition::integer("id").with_primary_key(),
            ColumnDefinition::text("username").with_primary_key(),
            ColumnDefinition::text("email"),
            ColumnDefinition::text("password"),
        ]
    }

    #[test]
    fn test_primary_keys_keep_declaration_order() {
        let schema = TableSchema::new("User", Some("myKeySpace"), user_columns()).unwrap();
        let keys: Vec<&str> = schema.primary_keys().map(|c| c.name.as_str()).collect();
        assert_eq!(keys, vec!["id", "username"]);
    }

    #[test]
    fn test_primary_keys_not_sorted() {
        let schema = TableSchema::builder("events")
            .column("payload", ColumnType::Text)
            .primary_key("zone", ColumnType::Text)
            .primary_key("at", ColumnType::Integer)
            .build()
            .unwrap();
        let keys: Vec<&str> = schema.primary_keys().map(|c| c.name.as_str()).collect();
        assert_eq!(keys, vec!["zone", "at"]);
    }

    #[test]
    fn test_no_primary_key() {
        let result = TableSchema::new(
            "User",
            None,
            vec![ColumnDefinition::text("email"), ColumnDefinition::text("name")],
        );
        assert_eq!(result, Err(SchemaError::NoPrimaryKey));
    }

    #[test]
    fn test_empty_schema() {
        assert_eq!(
            TableSchema::new("User", None, Vec::new()),
            Err(SchemaError::EmptySchema)
        );
    }

    #[test]
    fn test_duplicate_column_checked_first() {
        let result = TableSchema::new(
            "User",
            None,
            vec![ColumnDefinition::text("email"), ColumnDefinition::integer("email")],
        );
        assert_eq!(
            result,
            Err(SchemaError::DuplicateColumnName("email".to_string()))
        );
    }

    #[test]
    fn test_qualified_name() {
        let schema = TableSchema::new("User", None, user_columns()).unwrap();
        assert_eq!(schema.qualified_name(), "User");
        assert_eq!(schema.keyspace(), None);

        let schema = TableSchema::new("User", Some("ks"), user_columns()).unwrap();
        assert_eq!(schema.qualified_name(), "ks.User");
    }

    #[test]
    fn test_check_columns() {
        let schema = TableSchema::new("User", None, user_columns()).unwrap();
        assert!(
            schema
                .check_columns(["password", "email", "username", "id"])
                .is_ok()
        );
        assert!(matches!(
            schema.check_columns(["id", "username", "email"]),
            Err(SchemaError::ColumnMismatch { .. })
        ));
    }

    #[test]
    fn test_get_column_index() {
        let schema = TableSchema::new("User", None, user_columns()).unwrap();
        assert_eq!(schema.get_column_index("email"), Some(2));
        assert_eq!(schema.get_column_index("missing"), None);
        assert_eq!(
            schema.get_column("id").map(|c| &c.kind),
            Some(&ColumnType::Integer)
        );
    }
}
