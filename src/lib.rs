//! Declare tabular data against a wide-column database and load it.
//!
//! A [`TableSchema`] is built explicitly or inferred from a
//! [`TabularSource`]. [`create_table`] and [`insert_statement`] render it to
//! CQL, and [`load`] drives a [`Session`] with the rendered statements, one
//! row at a time.
//!
//! ```
//! use pandra::{ColumnType, Frame, MemorySession, TableSchema, Value, load};
//!
//! let schema = TableSchema::builder("users")
//!     .keyspace("app")
//!     .primary_key("id", ColumnType::Integer)
//!     .column("name", ColumnType::Text)
//!     .build()
//!     .unwrap();
//!
//! let mut frame = Frame::new([("id", "int64"), ("name", "object")]);
//! frame.push_values(vec![Value::Integer(1), "Alice".into()]).unwrap();
//!
//! let mut session = MemorySession::new();
//! let report = load(&schema, frame, &mut session, true, false).unwrap();
//!
//! assert_eq!(report.succeeded, 1);
//! assert_eq!(session.executed().len(), 2);
//! ```

pub(crate) mod common;
pub(crate) mod core;
pub(crate) mod db;
pub(crate) mod loader;
pub(crate) mod sql;

pub use common::error::{
    ExecutionError, InferenceError, LoadError, RowError, RowFailureCause, SchemaError,
    TypeMappingError,
};
pub use crate::core::types::{ColumnType, Value};
pub use db::{
    session::{ExecutedStatement, MemorySession, Session},
    source::{Frame, SourceColumn, TabularSource},
    table::{ColumnDefinition, Row, TableSchema, TableSchemaBuilder},
};
pub use loader::{
    BulkLoader, LoadObserver, LoadOptions, LoadReport, RowFailure, TracingObserver, load,
    load_with_options,
};
pub use sql::{
    infer_type::{NativeType, infer_columns, infer_schema, map_native_type},
    statement::{InsertStatement, create_table, insert_statement},
};

/// Validates and builds a schema from an ordered list of columns.
pub fn define_schema(
    table_name: &str,
    keyspace: Option<&str>,
    columns: Vec<ColumnDefinition>,
) -> Result<TableSchema, SchemaError> {
    TableSchema::new(table_name, keyspace, columns)
}
