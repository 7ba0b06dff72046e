//! SQL debug events.
//!
//! Every top-level `to_sql()` reports the compiled statement on the
//! `querykit.sql` target at DEBUG level. With the `tracing` feature disabled
//! this compiles to nothing.

use crate::dialect::Dialect;

/// Statement family, reported as the `statement` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StatementKind {
    Select,
    Insert,
    Update,
    Upsert,
    BulkInsert,
    BulkUpsert,
    Delete,
}

#[cfg(feature = "tracing")]
pub(crate) fn compiled(statement: StatementKind, dialect: Dialect, sql: &str, param_count: usize) {
    tracing::debug!(
        target: "querykit.sql",
        statement = ?statement,
        dialect = dialect.name(),
        param_count,
        sql = %sql,
    );
}

#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) fn compiled(_statement: StatementKind, _dialect: Dialect, _sql: &str, _param_count: usize) {}
