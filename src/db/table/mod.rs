pub mod column_def;
pub mod row;
pub mod schema;

pub use column_def::ColumnDefinition;
pub use row::Row;
pub use schema::{TableSchema, TableSchemaBuilder};
