use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use crate::{common::error::ExecutionError, core::types::Value};

/// A connection that executes statement text.
///
/// Implementations own connection handling, retries and timeouts. They must
/// report an existing table as [`ExecutionError::AlreadyExists`] so a load
/// can continue past it.
pub trait Session {
    /// Executes `statement` with `args` bound to its placeholders in order.
    fn execute(&mut self, statement: &str, args: &[Value]) -> Result<(), ExecutionError>;
}

impl<S: Session + ?Sized> Session for &mut S {
    fn execute(&mut self, statement: &str, args: &[Value]) -> Result<(), ExecutionError> {
        (**self).execute(statement, args)
    }
}

/// A statement executed by a [`MemorySession`].
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutedStatement {
    pub statement: String,
    pub args: Vec<Value>,
}

/// An in-process session that records everything it executes.
///
/// Tracks created tables so a repeated `CREATE TABLE` reports
/// [`ExecutionError::AlreadyExists`], and can be told to fail chosen calls.
/// Useful for dry runs and tests.
#[derive(Debug, Default)]
pub struct MemorySession {
    /// Qualified names of tables created through this session.
    tables: BTreeSet<String>,

    /// Every successful call, in order.
    executed: Vec<ExecutedStatement>,

    /// Failures to return, keyed by the 0-based ordinal of the `execute` call.
    failures: BTreeMap<usize, ExecutionError>,

    calls: usize,
}

impl MemorySession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a table as already present.
    pub fn with_table(mut self, qualified_name: &str) -> Self {
        self.tables.insert(qualified_name.to_owned());
        self
    }

    /// Makes the `call`-th `execute` (0-based, counting every call) fail.
    pub fn fail_on_call(mut self, call: usize, error: ExecutionError) -> Self {
        self.failures.insert(call, error);
        self
    }

    pub fn executed(&self) -> &[ExecutedStatement] {
        &self.executed
    }

    /// Number of `execute` calls, including failed ones.
    pub fn calls(&self) -> usize {
        self.calls
    }

    pub fn has_table(&self, qualified_name: &str) -> bool {
        self.tables.contains(qualified_name)
    }
}

impl Session for MemorySession {
    fn execute(&mut self, statement: &str, args: &[Value]) -> Result<(), ExecutionError> {
        let call = self.calls;
        self.calls += 1;

        if let Some(err) = self.failures.remove(&call) {
            debug!(call, %err, "injected failure");
            return Err(err);
        }

        if let Some(table) = created_table(statement) {
            if !self.tables.insert(table.to_owned()) {
                return Err(ExecutionError::AlreadyExists(table.to_owned()));
            }
        }

        self.executed.push(ExecutedStatement {
            statement: statement.to_owned(),
            args: args.to_vec(),
        });
        Ok(())
    }
}

/// Extracts the table name from a `CREATE TABLE` statement.
fn created_table(statement: &str) -> Option<&str> {
    statement
        .strip_prefix("CREATE TABLE ")?
        .split_whitespace()
        .next()
}
