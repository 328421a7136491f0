use miette::Diagnostic;
use thiserror::Error;

/// Errors raised while building or validating a [`TableSchema`](crate::TableSchema).
///
/// All of these are raised before any statement reaches a session, so a
/// failure never leaves a partial schema or a partially created table behind.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum SchemaError {
    #[error("Schema has no columns")]
    #[diagnostic(code(pandra::schema::empty))]
    EmptySchema,

    #[error("Schema has no primary key column")]
    #[diagnostic(
        code(pandra::schema::no_primary_key),
        help("mark at least one column as part of the primary key")
    )]
    NoPrimaryKey,

    #[error("Column '{0}' is declared more than once")]
    #[diagnostic(code(pandra::schema::duplicate_column))]
    DuplicateColumnName(String),

    #[error("Source columns do not match schema (missing: {missing:?}, unexpected: {unexpected:?})")]
    #[diagnostic(code(pandra::schema::column_mismatch))]
    ColumnMismatch {
        /// Schema columns the source does not provide.
        missing: Vec<String>,
        /// Source columns the schema does not declare.
        unexpected: Vec<String>,
    },
}

impl SchemaError {
    /// Builds a [`SchemaError::ColumnMismatch`] from the two name sets, or
    /// `None` when they are equal. Names are reported in the order given.
    pub(crate) fn mismatch<'a, 'b>(
        expected: impl IntoIterator<Item = &'a str> + Clone,
        found: impl IntoIterator<Item = &'b str> + Clone,
    ) -> Option<Self> {
        let missing: Vec<String> = expected
            .clone()
            .into_iter()
            .filter(|name| !found.clone().into_iter().any(|f| f == *name))
            .map(str::to_owned)
            .collect();
        let unexpected: Vec<String> = found
            .into_iter()
            .filter(|name| !expected.clone().into_iter().any(|e| e == *name))
            .map(str::to_owned)
            .collect();

        if missing.is_empty() && unexpected.is_empty() {
            None
        } else {
            Some(Self::ColumnMismatch {
                missing,
                unexpected,
            })
        }
    }
}

/// A native type tag with no column type mapping.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum TypeMappingError {
    #[error("Unsupported native type: {0}")]
    #[diagnostic(
        code(pandra::infer::unsupported_type),
        help("declare the schema explicitly for columns of this type")
    )]
    UnsupportedNativeType(String),
}

/// Failure reported by a [`Session`](crate::Session) when executing a statement.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum ExecutionError {
    #[error("Table {0} already exists")]
    #[diagnostic(code(pandra::execute::already_exists))]
    AlreadyExists(String),

    #[error("Execution failed: {0}")]
    #[diagnostic(code(pandra::execute::failed))]
    Other(String),
}

/// Errors from looking up or validating the values of a [`Row`](crate::Row).
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum RowError {
    #[error("Row has no value for column '{0}'")]
    #[diagnostic(code(pandra::row::missing_column))]
    MissingColumn(String),

    #[error("Row has a value for unknown column '{0}'")]
    #[diagnostic(code(pandra::row::unexpected_column))]
    UnexpectedColumn(String),
}

/// Errors from [`infer_schema`](crate::infer_schema).
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum InferenceError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    TypeMapping(#[from] TypeMappingError),
}

/// Fatal errors that abort a whole load.
///
/// Per-row failures are never fatal; they are collected in the
/// [`LoadReport`](crate::LoadReport) instead.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum LoadError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Schema(#[from] SchemaError),

    #[error("Failed to create table {table}")]
    #[diagnostic(code(pandra::load::create_failed))]
    Create {
        table: String,
        #[source]
        source: ExecutionError,
    },
}

/// Why a single row was not inserted.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum RowFailureCause {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Row(#[from] RowError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Execution(#[from] ExecutionError),
}
