//! Dialect-bound statement factory.

use crate::dialect::Dialect;
use crate::error::QueryResult;
use crate::qb::{BulkInsert, Delete, Expr, InsertUpdate, Select};
use crate::value::Value;

/// Creates statements that all target one [`Dialect`].
///
/// The builder holds no other state, so it is `Copy` and can be shared freely.
///
/// # Example
/// ```
/// use querykit::{Builder, Expr};
///
/// let b = Builder::from_name("mysql").unwrap();
/// let (sql, args) = b.delete("customer", Expr::id_equals(4)).to_sql();
/// assert_eq!(sql, "DELETE FROM customer WHERE id=?");
/// assert_eq!(args.len(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Builder {
    dialect: Dialect,
}

impl Builder {
    pub fn new(dialect: Dialect) -> Self {
        Self { dialect }
    }

    /// Look up the dialect by configuration name (`mysql`, `postgres`, `sqlite3`).
    pub fn from_name(name: &str) -> QueryResult<Self> {
        Ok(Self::new(name.parse()?))
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// `SELECT fields FROM table`
    pub fn select(&self, fields: impl Into<String>, table: impl Into<String>) -> Select {
        Select::new(self.dialect, fields, table)
    }

    /// Like [`Builder::select`], with literal arguments for placeholders
    /// already present in `fields` or `table`.
    pub fn select_with_args<T: Into<Value>>(
        &self,
        fields: impl Into<String>,
        table: impl Into<String>,
        args: impl IntoIterator<Item = T>,
    ) -> Select {
        self.select(fields, table).args(args)
    }

    pub fn insert(&self, table: impl Into<String>) -> InsertUpdate {
        InsertUpdate::insert(self.dialect, table)
    }

    /// Takes the predicate up front; pass [`Expr::all()`] to update every row.
    pub fn update(&self, table: impl Into<String>, filter: Expr) -> InsertUpdate {
        InsertUpdate::update(self.dialect, table, filter)
    }

    pub fn upsert<S: Into<String>>(
        &self,
        table: impl Into<String>,
        conflict_columns: impl IntoIterator<Item = S>,
    ) -> InsertUpdate {
        InsertUpdate::upsert(self.dialect, table, conflict_columns)
    }

    /// Takes the predicate up front; pass [`Expr::all()`] to empty the table.
    pub fn delete(&self, table: impl Into<String>, filter: Expr) -> Delete {
        Delete::new(self.dialect, table, filter)
    }

    pub fn bulk_insert<S: Into<String>>(
        &self,
        table: impl Into<String>,
        columns: impl IntoIterator<Item = S>,
    ) -> BulkInsert {
        BulkInsert::insert(self.dialect, table, columns)
    }

    pub fn bulk_upsert<S: Into<String>, C: Into<String>>(
        &self,
        table: impl Into<String>,
        columns: impl IntoIterator<Item = S>,
        conflict_columns: impl IntoIterator<Item = C>,
    ) -> BulkInsert {
        BulkInsert::upsert(self.dialect, table, columns, conflict_columns)
    }

    /// The database's current timestamp, usable as any bound value.
    pub fn now(&self) -> Value {
        Value::Now
    }
}
