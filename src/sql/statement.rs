//! CQL statement text for a [`TableSchema`].
//!
//! Output is a pure function of the schema: the same schema always yields
//! byte-identical text, so sessions can cache and prepare it.

use crate::{
    common::error::RowError,
    core::types::Value,
    db::table::{Row, TableSchema},
};

/// Renders the `CREATE TABLE` statement for a schema.
///
/// Columns appear in declaration order, followed by the primary key columns
/// in declaration order:
///
/// ```
/// use pandra::{ColumnType, TableSchema, create_table};
///
/// let schema = TableSchema::builder("User")
///     .keyspace("ks")
///     .primary_key("id", ColumnType::Integer)
///     .column("email", ColumnType::Text)
///     .build()
///     .unwrap();
///
/// assert_eq!(
///     create_table(&schema),
///     "CREATE TABLE ks.User ( id int, email text, PRIMARY KEY ( id ) );"
/// );
/// ```
pub fn create_table(schema: &TableSchema) -> String {
    let columns: Vec<String> = schema.columns().iter().map(|col| col.render()).collect();
    let keys: Vec<&str> = schema.primary_keys().map(|col| col.name.as_str()).collect();

    format!(
        "CREATE TABLE {} ( {}, PRIMARY KEY ( {} ) );",
        schema.qualified_name(),
        columns.join(", "),
        keys.join(", ")
    )
}

/// A rendered `INSERT` statement and the column order its placeholders bind to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertStatement {
    text: String,
    columns: Vec<String>,
}

impl InsertStatement {
    /// The statement text, one `?` placeholder per column.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Column names in placeholder order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Projects a row into positional arguments.
    ///
    /// A column the row does not provide binds as [`Value::Null`].
    pub fn bind(&self, row: &Row) -> Vec<Value> {
        self.columns
            .iter()
            .map(|name| row.get(name).cloned().unwrap_or(Value::Null))
            .collect()
    }

    /// Like [`InsertStatement::bind`] but fails on a missing column.
    pub fn bind_strict(&self, row: &Row) -> Result<Vec<Value>, RowError> {
        self.columns
            .iter()
            .map(|name| row.get_required(name).cloned())
            .collect()
    }
}

/// Renders the `INSERT` statement for a schema.
///
/// The table name is not keyspace-qualified; the statement runs against the
/// session's current keyspace.
pub fn insert_statement(schema: &TableSchema) -> InsertStatement {
    let columns: Vec<String> = schema.column_names().map(str::to_owned).collect();
    let placeholders = vec!["?"; columns.len()].join(", ");

    InsertStatement {
        text: format!(
            "INSERT INTO {} ({}) VALUES ({})",
            schema.table_name(),
            columns.join(", "),
            placeholders
        ),
        columns,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ColumnDefinition, ColumnType};

    fn user_schema(keyspace: Option<&str>) -> TableSchema {
        TableSchema::new(
            "User",
            keyspace,
            vec![
                ColumnDefinition::integer("id").with_primary_key(),
                ColumnDefinition::text("username").with_primary_key(),
                ColumnDefinition::text("email"),
                ColumnDefinition::text("password"),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_create_table_with_keyspace() {
        assert_eq!(
            create_table(&user_schema(Some("myKeySpace"))),
            "CREATE TABLE myKeySpace.User ( id int, username text, email text, password text, PRIMARY KEY ( id, username ) );"
        );
    }

    #[test]
    fn test_create_table_without_keyspace() {
        assert_eq!(
            create_table(&user_schema(None)),
            "CREATE TABLE User ( id int, username text, email text, password text, PRIMARY KEY ( id, username ) );"
        );
    }

    #[test]
    fn test_create_table_custom_type() {
        let schema = TableSchema::builder("User")
            .keyspace("myKeySpace")
            .primary_key("id", ColumnType::Integer)
            .primary_key("username", ColumnType::Text)
            .column("mydatatype", ColumnType::Custom("cassandra_data_type".into()))
            .build()
            .unwrap();

        assert_eq!(
            create_table(&schema),
            "CREATE TABLE myKeySpace.User ( id int, username text, mydatatype cassandra_data_type, PRIMARY KEY ( id, username ) );"
        );
    }

    #[test]
    fn test_create_table_counts() {
        let schema = TableSchema::builder("wide")
            .column("a", ColumnType::Text)
            .primary_key("b", ColumnType::Uuid)
            .column("c", ColumnType::Map)
            .primary_key("d", ColumnType::Inet)
            .column("e", ColumnType::Set)
            .build()
            .unwrap();

        let text = create_table(&schema);
        let (columns, keys) = text.split_once(", PRIMARY KEY ( ").unwrap();
        assert_eq!(columns.matches(", ").count() + 1, schema.columns().len());
        assert_eq!(keys, "b, d ) );");
    }

    #[test]
    fn test_insert_statement() {
        let insert = insert_statement(&user_schema(Some("myKeySpace")));
        assert_eq!(
            insert.text(),
            "INSERT INTO User (id, username, email, password) VALUES (?, ?, ?, ?)"
        );
        assert_eq!(insert.columns(), ["id", "username", "email", "password"]);
    }

    #[test]
    fn test_bind_row_in_column_order() {
        let insert = insert_statement(&user_schema(None));
        let row = Row::new()
            .with("password", "pw")
            .with("email", "a@b.org")
            .with("username", "Michael")
            .with("id", 123456);

        assert_eq!(
            insert.bind(&row),
            vec![
                Value::Integer(123456),
                Value::Text("Michael".to_string()),
                Value::Text("a@b.org".to_string()),
                Value::Text("pw".to_string()),
            ]
        );
    }

    #[test]
    fn test_bind_missing_column() {
        let insert = insert_statement(&user_schema(None));
        let row = Row::new().with("id", 1).with("username", "x");

        assert_eq!(
            insert.bind(&row),
            vec![
                Value::Integer(1),
                Value::Text("x".to_string()),
                Value::Null,
                Value::Null
            ]
        );
        assert_eq!(
            insert.bind_strict(&row),
            Err(RowError::MissingColumn("email".to_string()))
        );
    }

    #[test]
    fn test_statements_are_deterministic() {
        let a = user_schema(Some("ks"));
        let b = user_schema(Some("ks"));
        assert_eq!(create_table(&a), create_table(&b));
        assert_eq!(insert_statement(&a), insert_statement(&b));
        assert_eq!(create_table(&a), create_table(&a));
    }
}
