//! SELECT statement compiler.
//!
//! A [`Select`] is also the unit of nesting: subqueries, CTE bodies and UNION
//! branches are all owned `Select` values compiled at the enclosing
//! statement's running placeholder offset.

use crate::dialect::Dialect;
use crate::qb::expr::Expr;
use crate::qb::options::QueryOptions;
use crate::qb::order::Order;
use crate::qb::param::ParamList;
use crate::trace::{self, StatementKind};
use crate::value::Value;

/// JOIN flavour.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JoinKind {
    Inner,
    Left,
}

impl JoinKind {
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Inner => "INNER",
            Self::Left => "LEFT",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
struct Join {
    kind: JoinKind,
    table: String,
    on: Expr,
}

/// A named common table expression.
#[derive(Clone, Debug, PartialEq)]
struct Cte {
    name: String,
    query: Select,
}

/// SELECT query builder.
///
/// Configuration methods consume and return the builder; compiling borrows it,
/// so the same statement can be compiled any number of times.
///
/// # Example
/// ```
/// use querykit::{Builder, Dialect, Expr};
///
/// let b = Builder::new(Dialect::Postgres);
/// let (sql, args) = b
///     .select("*", "contacts")
///     .filter(Expr::id_equals(123))
///     .order_by_desc("name")
///     .limit(10)
///     .to_sql();
/// assert_eq!(sql, "SELECT * FROM contacts WHERE id=$1 ORDER BY name DESC LIMIT 10");
/// assert_eq!(args.len(), 1);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Select {
    dialect: Dialect,
    fields: String,
    table: String,
    /// Literal arguments for placeholders embedded in `fields`/`table`.
    args: Vec<Value>,
    joins: Vec<Join>,
    filter: Expr,
    having: Expr,
    group_by: Option<String>,
    order_by: Vec<Order>,
    limit: Option<u64>,
    offset: Option<u64>,
    unions: Vec<Select>,
    ctes: Vec<Cte>,
}

impl Select {
    /// Create `SELECT fields FROM table`.
    pub fn new(dialect: Dialect, fields: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            dialect,
            fields: fields.into(),
            table: table.into(),
            args: Vec::new(),
            joins: Vec::new(),
            filter: Expr::Empty,
            having: Expr::Empty,
            group_by: None,
            order_by: Vec::new(),
            limit: None,
            offset: None,
            unions: Vec::new(),
            ctes: Vec::new(),
        }
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Append literal arguments.
    ///
    /// These are emitted after any CTE arguments and before everything else,
    /// matching placeholders written directly into the field or table text
    /// (for example a derived table built from another statement's SQL).
    pub fn args<T: Into<Value>>(mut self, args: impl IntoIterator<Item = T>) -> Self {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    // ==================== WHERE / HAVING ====================

    /// AND a condition into the WHERE clause.
    ///
    /// Chained calls build a flat `a AND b AND c` without outer parentheses.
    ///
    /// # Panics
    ///
    /// Panics if a non-AND predicate was assigned with [`Select::set_filter`].
    pub fn filter(mut self, expr: Expr) -> Self {
        self.filter.chain(expr, "filter");
        self
    }

    /// Replace the WHERE clause.
    pub fn set_filter(mut self, expr: Expr) -> Self {
        self.filter = expr;
        self
    }

    /// AND a condition into the HAVING clause.
    ///
    /// # Panics
    ///
    /// Panics if a non-AND predicate was assigned with [`Select::set_having`].
    pub fn having(mut self, expr: Expr) -> Self {
        self.having.chain(expr, "having");
        self
    }

    /// Replace the HAVING clause.
    pub fn set_having(mut self, expr: Expr) -> Self {
        self.having = expr;
        self
    }

    // ==================== JOIN / UNION / CTE ====================

    /// Add `INNER JOIN table ON on`.
    pub fn join(mut self, table: impl Into<String>, on: Expr) -> Self {
        self.joins.push(Join {
            kind: JoinKind::Inner,
            table: table.into(),
            on,
        });
        self
    }

    /// Add `LEFT JOIN table ON on`.
    pub fn left_join(mut self, table: impl Into<String>, on: Expr) -> Self {
        self.joins.push(Join {
            kind: JoinKind::Left,
            table: table.into(),
            on,
        });
        self
    }

    /// Append a `UNION` branch.
    pub fn union(mut self, other: Select) -> Self {
        self.unions.push(other);
        self
    }

    /// Add a named CTE: `WITH name AS (query)`.
    pub fn with_cte(mut self, name: impl Into<String>, query: Select) -> Self {
        self.ctes.push(Cte {
            name: name.into(),
            query,
        });
        self
    }

    // ==================== Ordering & Grouping ====================

    pub fn group_by(mut self, clause: impl Into<String>) -> Self {
        self.group_by = Some(clause.into());
        self
    }

    /// Add an ascending ORDER BY term.
    pub fn order_by(self, field: impl Into<String>) -> Self {
        self.order(Order::asc(field))
    }

    /// Add a descending ORDER BY term.
    pub fn order_by_desc(self, field: impl Into<String>) -> Self {
        self.order(Order::desc(field))
    }

    pub fn order_by_dir(self, field: impl Into<String>, desc: bool) -> Self {
        self.order(Order::new(field, desc))
    }

    /// Add an ORDER BY term; empty orders are ignored.
    pub fn order(mut self, order: Order) -> Self {
        if !order.is_empty() {
            self.order_by.push(order);
        }
        self
    }

    // ==================== Pagination ====================

    pub fn limit(mut self, n: u64) -> Self {
        self.limit = Some(n);
        self
    }

    pub fn offset(mut self, n: u64) -> Self {
        self.offset = Some(n);
        self
    }

    /// Apply reusable options: the filter is ANDed in, the rest overwrite.
    ///
    /// Zero limits/offsets and empty orders are treated as unset.
    pub fn apply_options(mut self, options: QueryOptions) -> Self {
        if !options.filter.is_empty() {
            self = self.filter(options.filter);
        }
        if let Some(limit) = options.limit.filter(|n| *n > 0) {
            self.limit = Some(limit);
        }
        if let Some(offset) = options.offset.filter(|n| *n > 0) {
            self.offset = Some(offset);
        }
        self.order(options.order_by)
    }

    // ==================== Build ====================

    /// Compile as a standalone statement.
    pub fn to_sql(&self) -> (String, Vec<Value>) {
        let (sql, args) = self.to_sql_at(0);
        trace::compiled(StatementKind::Select, self.dialect, &sql, args.len());
        (sql, args)
    }

    /// Compile for embedding after `offset` placeholders already in use.
    pub fn to_sql_at(&self, offset: usize) -> (String, Vec<Value>) {
        let mut params = ParamList::starting_at(offset);
        let sql = self.build(&mut params);
        (sql, params.into_values())
    }

    /// Compile after `existing` arguments and return them followed by this
    /// statement's own.
    pub fn to_sql_with_args(&self, existing: Vec<Value>) -> (String, Vec<Value>) {
        let mut params = ParamList::new();
        params.extend(existing);
        let sql = self.build(&mut params);
        let args = params.into_values();
        trace::compiled(StatementKind::Select, self.dialect, &sql, args.len());
        (sql, args)
    }

    pub(crate) fn build(&self, params: &mut ParamList) -> String {
        let dialect = self.dialect;
        let mut sql = String::new();

        if !self.ctes.is_empty() {
            let ctes: Vec<String> = self
                .ctes
                .iter()
                .map(|cte| format!("    {} AS ({})", cte.name, cte.query.build(params)))
                .collect();
            sql.push_str("WITH\n");
            sql.push_str(&ctes.join(",\n"));
            sql.push('\n');
        }

        params.extend(self.args.iter().cloned());
        sql.push_str(&format!("SELECT {} FROM {}", self.fields, self.table));

        for join in &self.joins {
            let on = join.on.build(params, dialect);
            sql.push_str(&format!(" {} JOIN {} ON {on}", join.kind.keyword(), join.table));
        }

        push_predicate(&mut sql, " WHERE ", &self.filter, params, dialect);

        if let Some(group_by) = &self.group_by {
            sql.push_str(" GROUP BY ");
            sql.push_str(group_by);
        }

        push_predicate(&mut sql, " HAVING ", &self.having, params, dialect);

        for union in &self.unions {
            let branch = union.build(params);
            sql.push_str(" UNION ");
            sql.push_str(&branch);
        }

        if !self.order_by.is_empty() {
            let terms: Vec<String> = self.order_by.iter().map(Order::to_string).collect();
            sql.push_str(" ORDER BY ");
            sql.push_str(&terms.join(", "));
        }

        if let Some(limit) = self.limit {
            sql.push_str(&format!(" LIMIT {limit}"));
        }
        if let Some(offset) = self.offset {
            sql.push_str(&format!(" OFFSET {offset}"));
        }

        sql
    }
}

/// Append `keyword predicate` when the predicate produces any text.
pub(crate) fn push_predicate(
    sql: &mut String,
    keyword: &str,
    predicate: &Expr,
    params: &mut ParamList,
    dialect: Dialect,
) {
    if predicate.is_empty() {
        return;
    }
    let text = predicate.build(params, dialect);
    if !text.is_empty() {
        sql.push_str(keyword);
        sql.push_str(&text);
    }
}
