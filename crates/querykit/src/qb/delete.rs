//! DELETE statement compiler.

use crate::dialect::Dialect;
use crate::qb::expr::Expr;
use crate::qb::param::ParamList;
use crate::qb::select::push_predicate;
use crate::trace::{self, StatementKind};
use crate::value::Value;

/// `DELETE FROM table [WHERE ...]`
///
/// Always constructed with a predicate; use [`Expr::all()`] to make a
/// full-table delete explicit.
#[derive(Clone, Debug, PartialEq)]
pub struct Delete {
    dialect: Dialect,
    table: String,
    filter: Expr,
}

impl Delete {
    pub fn new(dialect: Dialect, table: impl Into<String>, filter: Expr) -> Self {
        Self {
            dialect,
            table: table.into(),
            filter: Expr::Empty,
        }
        .filter(filter)
    }

    /// Switch the target dialect.
    pub fn set_dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }

    /// AND another condition into the WHERE clause.
    pub fn filter(mut self, expr: Expr) -> Self {
        self.filter.chain(expr, "filter");
        self
    }

    pub fn to_sql(&self) -> (String, Vec<Value>) {
        let mut params = ParamList::new();
        let mut sql = format!("DELETE FROM {}", self.table);
        push_predicate(&mut sql, " WHERE ", &self.filter, &mut params, self.dialect);

        let args = params.into_values();
        trace::compiled(StatementKind::Delete, self.dialect, &sql, args.len());
        (sql, args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delete_all() {
        let (sql, args) = Delete::new(Dialect::Postgres, "customer", Expr::all()).to_sql();
        assert_eq!(sql, "DELETE FROM customer");
        assert!(args.is_empty());
    }

    #[test]
    fn test_set_dialect() {
        let (sql, _) = Delete::new(Dialect::MySql, "customer", Expr::id_equals(1))
            .set_dialect(Dialect::Sqlite)
            .to_sql();
        assert_eq!(sql, "DELETE FROM customer WHERE id=$1");
    }
}
