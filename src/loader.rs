//! Bulk loading of a tabular source into a table.
//!
//! A load runs in four steps, synchronously and in source order:
//!
//! 1. **Validate** the source's column names against the schema.
//! 2. **Create** the table if asked. An existing table is not an error; any
//!    other failure aborts the load before a row is touched.
//! 3. **Insert** every row. A failing row is recorded and skipped.
//! 4. **Report** the counts and per-row failures.
//!
//! In debug mode every statement goes to [`LoadObserver::dry_run`] instead
//! of the session. Everything else, including counting, runs unchanged.

use tracing::{debug, info, warn};

use crate::{
    common::error::{ExecutionError, LoadError, RowFailureCause},
    core::types::Value,
    db::{
        session::Session,
        source::TabularSource,
        table::TableSchema,
    },
    sql::statement::{create_table, insert_statement},
};

/// Settings for a single load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadOptions {
    /// Issue `CREATE TABLE` before inserting.
    pub create_if_missing: bool,

    /// Emit statements to the observer instead of executing them.
    pub debug: bool,
}

impl LoadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_if_missing(mut self, create_if_missing: bool) -> Self {
        self.create_if_missing = create_if_missing;
        self
    }

    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}

/// A row that was not inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct RowFailure {
    /// 0-based position of the row in the source.
    pub index: usize,
    pub cause: RowFailureCause,
}

/// Outcome of a load.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    /// Rows read from the source.
    pub attempted: usize,
    pub succeeded: usize,
    pub failed: usize,
    /// Failures in source order.
    pub errors: Vec<RowFailure>,
}

impl LoadReport {
    fn record_failure(&mut self, index: usize, cause: RowFailureCause) {
        self.failed += 1;
        self.errors.push(RowFailure { index, cause });
    }

    pub fn is_complete(&self) -> bool {
        self.failed == 0
    }
}

/// Receives progress events from a load.
///
/// All methods default to doing nothing.
pub trait LoadObserver {
    /// `CREATE TABLE` went through (or was emitted, in debug mode).
    fn table_created(&mut self, _schema: &TableSchema) {}

    /// The session reported the table as already existing.
    fn table_exists(&mut self, _schema: &TableSchema) {}

    /// Debug mode: a statement that would have been executed.
    fn dry_run(&mut self, _statement: &str, _args: &[Value]) {}

    fn row_failed(&mut self, _index: usize, _cause: &RowFailureCause) {}

    fn finished(&mut self, _schema: &TableSchema, _report: &LoadReport) {}
}

/// Logs load events through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl LoadObserver for TracingObserver {
    fn table_created(&mut self, schema: &TableSchema) {
        info!(table = %schema.qualified_name(), "created table");
    }

    fn table_exists(&mut self, schema: &TableSchema) {
        warn!(table = %schema.qualified_name(), "table already exists");
    }

    fn dry_run(&mut self, statement: &str, args: &[Value]) {
        let args: Vec<String> = args.iter().map(Value::to_string).collect();
        info!(statement, args = %args.join(", "), "dry run");
    }

    fn row_failed(&mut self, index: usize, cause: &RowFailureCause) {
        warn!(row = index, %cause, "row not inserted");
    }

    fn finished(&mut self, schema: &TableSchema, report: &LoadReport) {
        info!(
            table = %schema.qualified_name(),
            attempted = report.attempted,
            succeeded = report.succeeded,
            failed = report.failed,
            "load finished"
        );
    }
}

/// Drives loads against one session.
pub struct BulkLoader<'a, S: Session + ?Sized> {
    session: &'a mut S,
    observer: &'a mut dyn LoadObserver,
    options: LoadOptions,
}

impl<'a, S: Session + ?Sized> BulkLoader<'a, S> {
    pub fn new(session: &'a mut S, observer: &'a mut dyn LoadObserver) -> Self {
        Self {
            session,
            observer,
            options: LoadOptions::default(),
        }
    }

    pub fn with_options(mut self, options: LoadOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &LoadOptions {
        &self.options
    }

    /// Loads every row of `source` into the table described by `schema`.
    pub fn load<T: TabularSource>(
        &mut self,
        schema: &TableSchema,
        source: T,
    ) -> Result<LoadReport, LoadError> {
        schema.check_columns(source.columns().iter().map(|col| col.name.as_str()))?;

        if self.options.create_if_missing {
            self.create(schema)?;
        }

        let insert = insert_statement(schema);
        let mut report = LoadReport::default();

        for (index, row) in source.rows().enumerate() {
            report.attempted += 1;

            let result = match schema.validate_row(&row) {
                Ok(()) => self
                    .dispatch(insert.text(), &insert.bind(&row))
                    .map_err(RowFailureCause::from),
                Err(err) => Err(err.into()),
            };

            if let Err(cause) = result {
                self.observer.row_failed(index, &cause);
                report.record_failure(index, cause);
            }
        }

        report.succeeded = report.attempted - report.failed;
        self.observer.finished(schema, &report);
        Ok(report)
    }

    fn create(&mut self, schema: &TableSchema) -> Result<(), LoadError> {
        match self.dispatch(&create_table(schema), &[]) {
            Ok(()) => self.observer.table_created(schema),
            Err(ExecutionError::AlreadyExists(_)) => self.observer.table_exists(schema),
            Err(source) => {
                return Err(LoadError::Create {
                    table: schema.qualified_name(),
                    source,
                });
            }
        }
        Ok(())
    }

    /// Executes a statement, or hands it to the observer in debug mode.
    fn dispatch(&mut self, statement: &str, args: &[Value]) -> Result<(), ExecutionError> {
        if self.options.debug {
            self.observer.dry_run(statement, args);
            return Ok(());
        }

        debug!(statement, "execute");
        self.session.execute(statement, args)
    }
}

/// Loads `source` with explicit options and observer.
pub fn load_with_options<T, S>(
    schema: &TableSchema,
    source: T,
    session: &mut S,
    options: &LoadOptions,
    observer: &mut dyn LoadObserver,
) -> Result<LoadReport, LoadError>
where
    T: TabularSource,
    S: Session + ?Sized,
{
    BulkLoader::new(session, observer)
        .with_options(*options)
        .load(schema, source)
}

/// Loads `source`, logging through [`TracingObserver`].
pub fn load<T, S>(
    schema: &TableSchema,
    source: T,
    session: &mut S,
    create_if_missing: bool,
    debug: bool,
) -> Result<LoadReport, LoadError>
where
    T: TabularSource,
    S: Session + ?Sized,
{
    let options = LoadOptions::new()
        .create_if_missing(create_if_missing)
        .debug(debug);
    load_with_options(schema, source, session, &options, &mut TracingObserver)
}
