//! Multi-row INSERT / UPSERT.

use crate::dialect::Dialect;
use crate::error::{QueryError, QueryResult};
use crate::trace::{self, StatementKind};
use crate::value::Value;

/// Bulk statement flavour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BulkMode {
    Insert,
    Upsert,
}

/// Collects rows for a single `INSERT ... VALUES (...), (...)` statement.
///
/// Every row must carry exactly one value per column; row `i`, column `j`
/// binds placeholder index `i * columns.len() + j`.
///
/// # Example
/// ```
/// use querykit::{Builder, Dialect};
///
/// let mut bulk = Builder::new(Dialect::Postgres).bulk_insert("t", ["a", "b"]);
/// bulk.add_row([1, 2]).unwrap();
/// bulk.add_row([3, 4]).unwrap();
/// assert!(bulk.add_row([5]).is_err());
///
/// let (sql, args) = bulk.to_sql();
/// assert_eq!(sql, "INSERT INTO t (a, b) VALUES ($1, $2), ($3, $4)");
/// assert_eq!(args.len(), 4);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct BulkInsert {
    mode: BulkMode,
    dialect: Dialect,
    table: String,
    columns: Vec<String>,
    conflict_columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl BulkInsert {
    /// Plain multi-row insert.
    pub fn insert<S: Into<String>>(
        dialect: Dialect,
        table: impl Into<String>,
        columns: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            mode: BulkMode::Insert,
            dialect,
            table: table.into(),
            columns: columns.into_iter().map(Into::into).collect(),
            conflict_columns: Vec::new(),
            rows: Vec::new(),
        }
    }

    /// Multi-row upsert keyed on `conflict_columns`.
    pub fn upsert<S: Into<String>, C: Into<String>>(
        dialect: Dialect,
        table: impl Into<String>,
        columns: impl IntoIterator<Item = S>,
        conflict_columns: impl IntoIterator<Item = C>,
    ) -> Self {
        let mut bulk = Self::insert(dialect, table, columns);
        bulk.mode = BulkMode::Upsert;
        bulk.conflict_columns = conflict_columns.into_iter().map(Into::into).collect();
        bulk
    }

    pub fn mode(&self) -> BulkMode {
        self.mode
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Append one row.
    ///
    /// Fails with [`QueryError::ArityMismatch`] when the row length differs
    /// from the column count; the row is discarded and the statement is
    /// otherwise unchanged.
    pub fn add_row<T: Into<Value>>(&mut self, values: impl IntoIterator<Item = T>) -> QueryResult<()> {
        let row: Vec<Value> = values.into_iter().map(Into::into).collect();
        if row.len() != self.columns.len() {
            return Err(QueryError::arity(self.columns.len(), row.len()));
        }
        self.rows.push(row);
        Ok(())
    }

    /// Number of rows added so far.
    pub fn count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn to_sql(&self) -> (String, Vec<Value>) {
        let (sql, kind) = match self.mode {
            BulkMode::Insert => {
                let rows = self
                    .dialect
                    .value_rows(0, self.columns.len(), self.rows.len());
                (
                    format!(
                        "INSERT INTO {} ({}) VALUES {rows}",
                        self.table,
                        self.columns.join(", ")
                    ),
                    StatementKind::BulkInsert,
                )
            }
            BulkMode::Upsert => (
                self.dialect.compile_upsert(
                    &self.table,
                    self.conflict_columns.as_slice(),
                    self.columns.as_slice(),
                    self.rows.len(),
                ),
                StatementKind::BulkUpsert,
            ),
        };

        let args: Vec<Value> = self.rows.iter().flatten().cloned().collect();
        trace::compiled(kind, self.dialect, &sql, args.len());
        (sql, args)
    }
}
