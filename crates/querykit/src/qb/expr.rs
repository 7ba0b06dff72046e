//! Predicate trees for WHERE/HAVING/JOIN ... ON conditions.
//!
//! [`Expr`] is a closed set of condition shapes that compiles to a SQL
//! fragment plus its arguments. Compilation starts at a caller-supplied
//! placeholder offset so a fragment can be spliced anywhere inside a larger
//! statement.
//!
//! Groups collapse aggressively:
//! - a group whose children are all empty contributes nothing;
//! - a group with one surviving child emits that child verbatim;
//! - two or more surviving children are joined and parenthesized, except for
//!   the implicit top-level AND built by chained `filter()` calls.

use crate::dialect::Dialect;
use crate::qb::param::ParamList;
use crate::qb::select::Select;
use crate::value::Value;

/// Keyword placed before a nested SELECT.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubqueryOp {
    /// `EXISTS (...)`
    Exists,
    /// `ANY (...)`
    Any,
    /// `column IN (...)`
    In,
    /// `column && (...)` (array overlap)
    Overlaps,
}

impl SubqueryOp {
    /// SQL keyword for this operator.
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Exists => "EXISTS",
            Self::Any => "ANY",
            Self::In => "IN",
            Self::Overlaps => "&&",
        }
    }
}

/// Expression node for building WHERE/HAVING clauses.
///
/// Nodes are plain values: cloning an `Expr` clones the whole subtree,
/// including any nested [`Select`].
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Expr {
    /// No condition at all.
    #[default]
    Empty,

    /// Simple comparison: `column op placeholder`
    Compare {
        column: String,
        op: String,
        value: Value,
    },

    /// Substring match: `column LIKE placeholder`, bound as `%value%`
    Like {
        column: String,
        value: Value,
        case_insensitive: bool,
    },

    /// IN list: `column IN (p1, p2, ...)` or `column NOT IN (...)`
    InList {
        column: String,
        values: Vec<Value>,
        negated: bool,
    },

    /// NULL check: `column IS NULL` or `column IS NOT NULL`
    NullCheck { column: String, is_null: bool },

    /// Raw SQL with `?` markers replaced by dialect placeholders.
    /// `??` produces a literal question mark.
    Template { sql: String, params: Vec<Value> },

    /// `[column ]KEYWORD (SELECT ...)`
    Subquery {
        column: Option<String>,
        op: SubqueryOp,
        query: Box<Select>,
    },

    /// AND group. `top_level` suppresses the surrounding parentheses.
    And { exprs: Vec<Expr>, top_level: bool },

    /// OR group.
    Or(Vec<Expr>),
}

impl Expr {
    /// Matches every row; compiles to nothing.
    ///
    /// Passing this to a DELETE or UPDATE makes "all rows" explicit.
    pub fn all() -> Self {
        Expr::Empty
    }

    /// Create an AND expression.
    pub fn and(exprs: impl IntoIterator<Item = Expr>) -> Self {
        Expr::And {
            exprs: exprs.into_iter().collect(),
            top_level: false,
        }
    }

    /// Create an OR expression.
    pub fn or(exprs: impl IntoIterator<Item = Expr>) -> Self {
        Expr::Or(exprs.into_iter().collect())
    }

    /// Comparison with an arbitrary operator: `column op value`
    pub fn op(column: impl Into<String>, op: impl Into<String>, value: impl Into<Value>) -> Self {
        Expr::Compare {
            column: column.into(),
            op: op.into(),
            value: value.into(),
        }
    }

    /// `id = value`
    pub fn id_equals(value: impl Into<Value>) -> Self {
        Self::eq("id", value)
    }

    /// `column = value`
    pub fn eq(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::op(column, "=", value)
    }

    /// `column != value`
    pub fn ne(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::op(column, "!=", value)
    }

    /// `column < value`
    pub fn lt(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::op(column, "<", value)
    }

    /// `column <= value`
    pub fn lte(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::op(column, "<=", value)
    }

    /// `column > value`
    pub fn gt(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::op(column, ">", value)
    }

    /// `column >= value`
    pub fn gte(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::op(column, ">=", value)
    }

    /// `column LIKE %value%`
    pub fn like(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Expr::Like {
            column: column.into(),
            value: value.into(),
            case_insensitive: false,
        }
    }

    /// `column ILIKE %value%`
    pub fn ilike(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Expr::Like {
            column: column.into(),
            value: value.into(),
            case_insensitive: true,
        }
    }

    /// `column IN (values...)`
    ///
    /// An empty list is replaced by `[0]` so the generated SQL stays valid.
    pub fn in_list<T: Into<Value>>(
        column: impl Into<String>,
        values: impl IntoIterator<Item = T>,
    ) -> Self {
        Expr::InList {
            column: column.into(),
            values: non_empty_values(values),
            negated: false,
        }
    }

    /// `column NOT IN (values...)`
    ///
    /// An empty list is replaced by `[0]`, like [`Expr::in_list`].
    pub fn not_in<T: Into<Value>>(
        column: impl Into<String>,
        values: impl IntoIterator<Item = T>,
    ) -> Self {
        Expr::InList {
            column: column.into(),
            values: non_empty_values(values),
            negated: true,
        }
    }

    /// `id IN (values...)`
    pub fn id_in<T: Into<Value>>(values: impl IntoIterator<Item = T>) -> Self {
        Self::in_list("id", values)
    }

    /// `column IS NULL`
    pub fn is_null(column: impl Into<String>) -> Self {
        Expr::NullCheck {
            column: column.into(),
            is_null: true,
        }
    }

    /// `column IS NOT NULL`
    pub fn is_not_null(column: impl Into<String>) -> Self {
        Expr::NullCheck {
            column: column.into(),
            is_null: false,
        }
    }

    /// Raw SQL with `?` placeholders, one value per `?`.
    ///
    /// # Example
    /// ```
    /// use querykit::{Dialect, Expr};
    ///
    /// let expr = Expr::template("a = ? OR b = ?", [1, 2]);
    /// let (sql, args) = expr.generate(0, Dialect::Postgres);
    /// assert_eq!(sql, "a = $1 OR b = $2");
    /// assert_eq!(args.len(), 2);
    /// ```
    pub fn template<T: Into<Value>>(
        sql: impl Into<String>,
        params: impl IntoIterator<Item = T>,
    ) -> Self {
        Expr::Template {
            sql: sql.into(),
            params: params.into_iter().map(Into::into).collect(),
        }
    }

    /// Template without arguments.
    pub fn raw(sql: impl Into<String>) -> Self {
        Expr::Template {
            sql: sql.into(),
            params: Vec::new(),
        }
    }

    /// `EXISTS (subquery)`
    pub fn exists(query: Select) -> Self {
        Self::subquery(None, SubqueryOp::Exists, query)
    }

    /// `ANY (subquery)`
    pub fn any(query: Select) -> Self {
        Self::subquery(None, SubqueryOp::Any, query)
    }

    /// `column IN (subquery)`
    pub fn in_subquery(column: impl Into<String>, query: Select) -> Self {
        Self::subquery(Some(column.into()), SubqueryOp::In, query)
    }

    /// `column && (subquery)`
    pub fn array_overlaps(column: impl Into<String>, query: Select) -> Self {
        Self::subquery(Some(column.into()), SubqueryOp::Overlaps, query)
    }

    fn subquery(column: Option<String>, op: SubqueryOp, query: Select) -> Self {
        Expr::Subquery {
            column,
            op,
            query: Box::new(query),
        }
    }

    /// Check if this expression is vacuous (contributes no SQL and no args).
    pub fn is_empty(&self) -> bool {
        match self {
            Expr::Empty => true,
            Expr::And { exprs, .. } | Expr::Or(exprs) => exprs.iter().all(Expr::is_empty),
            _ => false,
        }
    }

    /// Compile starting at placeholder index `offset`.
    ///
    /// Returns the fragment and its arguments; `args.len()` is the number of
    /// placeholders consumed.
    pub fn generate(&self, offset: usize, dialect: Dialect) -> (String, Vec<Value>) {
        let mut params = ParamList::starting_at(offset);
        let sql = self.build(&mut params, dialect);
        (sql, params.into_values())
    }

    /// Compile into an existing parameter list.
    pub fn build(&self, params: &mut ParamList, dialect: Dialect) -> String {
        match self {
            Expr::Empty => String::new(),
            Expr::Compare { column, op, value } => {
                let ph = params.bind(value.clone(), dialect);
                format!("{column}{op}{ph}")
            }
            Expr::Like {
                column,
                value,
                case_insensitive,
            } => {
                let ph = params.bind(Value::String(format!("%{value}%")), dialect);
                let op = if *case_insensitive { "ILIKE" } else { "LIKE" };
                format!("{column} {op} {ph}")
            }
            Expr::InList {
                column,
                values,
                negated,
            } => {
                let placeholders: Vec<String> = values
                    .iter()
                    .map(|v| params.bind(v.clone(), dialect))
                    .collect();
                let op = if *negated { "NOT IN" } else { "IN" };
                format!("{column} {op} ({})", placeholders.join(", "))
            }
            Expr::NullCheck { column, is_null } => {
                if *is_null {
                    format!("{column} IS NULL")
                } else {
                    format!("{column} IS NOT NULL")
                }
            }
            Expr::Template {
                sql,
                params: template_params,
            } => {
                let expanded = expand_template(sql, params.next_index(), dialect);
                params.extend(template_params.iter().cloned());
                expanded
            }
            Expr::Subquery { column, op, query } => {
                let sub_sql = query.build(params);
                match column {
                    Some(column) => format!("{column} {} ({sub_sql})", op.keyword()),
                    None => format!("{} ({sub_sql})", op.keyword()),
                }
            }
            Expr::And { exprs, top_level } => build_group(exprs, " AND ", *top_level, params, dialect),
            Expr::Or(exprs) => build_group(exprs, " OR ", false, params, dialect),
        }
    }

    /// Append `expr` to the implicit top-level AND used by chained builder calls.
    ///
    /// # Panics
    ///
    /// Panics if a non-AND predicate was assigned manually; the two styles
    /// cannot be combined.
    pub(crate) fn chain(&mut self, expr: Expr, method: &str) {
        if self.is_empty() {
            *self = Expr::And {
                exprs: Vec::new(),
                top_level: true,
            };
        }
        match self {
            Expr::And { exprs, .. } => exprs.push(expr),
            _ => panic!("cannot chain {method}() after a manual non-AND clause was set"),
        }
    }
}

fn non_empty_values<T: Into<Value>>(values: impl IntoIterator<Item = T>) -> Vec<Value> {
    let mut values: Vec<Value> = values.into_iter().map(Into::into).collect();
    if values.is_empty() {
        values.push(Value::Int(0));
    }
    values
}

fn build_group(
    exprs: &[Expr],
    verb: &str,
    top_level: bool,
    params: &mut ParamList,
    dialect: Dialect,
) -> String {
    // Vacuous children bind nothing, so skipping them keeps numbering intact.
    let parts: Vec<String> = exprs
        .iter()
        .filter(|e| !e.is_empty())
        .map(|e| e.build(params, dialect))
        .collect();

    match parts.as_slice() {
        [] => String::new(),
        [single] => single.clone(),
        _ if top_level => parts.join(verb),
        _ => format!("({})", parts.join(verb)),
    }
}

/// Replace `?` markers with placeholders numbered from `start`.
///
/// Runs of `?` are read in pairs: each `??` becomes a literal `?`, and a
/// leftover single `?` becomes the next placeholder.
fn expand_template(sql: &str, start: usize, dialect: Dialect) -> String {
    let mut result = String::with_capacity(sql.len());
    let mut next = start;
    let mut chars = sql.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '?' {
            result.push(ch);
            continue;
        }
        if chars.peek() == Some(&'?') {
            chars.next();
            result.push('?');
        } else {
            result.push_str(&dialect.placeholder(next));
            next += 1;
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placeholder_count(sql: &str) -> usize {
        sql.matches('?').count()
    }

    #[test]
    fn test_simple_eq() {
        let (sql, args) = Expr::id_equals(3).generate(0, Dialect::MySql);
        assert_eq!(sql, "id=?");
        assert_eq!(args, vec![Value::Int(3)]);
    }

    #[test]
    fn test_numbered() {
        let (sql, args) = Expr::id_equals(3).generate(0, Dialect::Postgres);
        assert_eq!(sql, "id=$1");
        assert_eq!(args, vec![Value::Int(3)]);
    }

    #[test]
    fn test_numbered_offset() {
        let (sql, args) = Expr::id_equals(3).generate(4, Dialect::Postgres);
        assert_eq!(sql, "id=$5");
        assert_eq!(args, vec![Value::Int(3)]);
    }

    #[test]
    fn test_group_offset_propagation() {
        let expr = Expr::and([Expr::eq("a", 1), Expr::eq("b", 2)]);
        let (sql, args) = expr.generate(4, Dialect::Postgres);
        assert_eq!(sql, "(a=$5 AND b=$6)");
        assert_eq!(args.len(), 2);
    }

    #[test]
    fn test_in_list() {
        let (sql, args) = Expr::in_list("id", [4, 5, 6]).generate(0, Dialect::MySql);
        assert_eq!(sql, "id IN (?, ?, ?)");
        assert_eq!(args, vec![Value::Int(4), Value::Int(5), Value::Int(6)]);

        let (sql, _) = Expr::in_list("id", [4, 5, 6]).generate(0, Dialect::Postgres);
        assert_eq!(sql, "id IN ($1, $2, $3)");
    }

    #[test]
    fn test_not_in_list() {
        let (sql, args) = Expr::not_in("id", ["a", "b"]).generate(2, Dialect::Sqlite);
        assert_eq!(sql, "id NOT IN ($3, $4)");
        assert_eq!(args.len(), 2);
    }

    #[test]
    fn test_empty_in_list_is_zero() {
        let empty = Expr::in_list("id", Vec::<i64>::new()).generate(0, Dialect::Postgres);
        let zero = Expr::in_list("id", [0]).generate(0, Dialect::Postgres);
        assert_eq!(empty, zero);
        assert_eq!(empty.0, "id IN ($1)");

        let (sql, args) = Expr::not_in("id", Vec::<i64>::new()).generate(0, Dialect::MySql);
        assert_eq!(sql, "id NOT IN (?)");
        assert_eq!(args, vec![Value::Int(0)]);
    }

    #[test]
    fn test_like_wraps_value() {
        let (sql, args) = Expr::like("lower(name)", "angels").generate(0, Dialect::MySql);
        assert_eq!(sql, "lower(name) LIKE ?");
        assert_eq!(args, vec![Value::String("%angels%".into())]);

        let (sql, _) = Expr::ilike("name", "x").generate(1, Dialect::Postgres);
        assert_eq!(sql, "name ILIKE $2");
    }

    #[test]
    fn test_null_checks() {
        let (sql, args) = Expr::is_null("deleted_at").generate(3, Dialect::Postgres);
        assert_eq!(sql, "deleted_at IS NULL");
        assert!(args.is_empty());

        let (sql, _) = Expr::is_not_null("deleted_at").generate(0, Dialect::Postgres);
        assert_eq!(sql, "deleted_at IS NOT NULL");
    }

    #[test]
    fn test_template_escape() {
        let (sql, args) = Expr::template("a ?? b ?", ["v"]).generate(0, Dialect::MySql);
        assert_eq!(sql, "a ? b ?");
        assert_eq!(args, vec![Value::from("v")]);

        let (sql, _) = Expr::template("a ?? b ?", ["v"]).generate(0, Dialect::Postgres);
        assert_eq!(sql, "a ? b $1");
    }

    #[test]
    fn test_template_odd_run() {
        let (sql, args) = Expr::template("x ??? y", [1]).generate(2, Dialect::Postgres);
        assert_eq!(sql, "x ?$3 y");
        assert_eq!(args.len(), 1);
    }

    #[test]
    fn test_template_numbering() {
        let (sql, args) = Expr::template("id=? OR parent=?", [7, 8]).generate(1, Dialect::Postgres);
        assert_eq!(sql, "id=$2 OR parent=$3");
        assert_eq!(args, vec![Value::Int(7), Value::Int(8)]);
    }

    #[test]
    fn test_all_is_empty() {
        let (sql, args) = Expr::all().generate(0, Dialect::MySql);
        assert_eq!(sql, "");
        assert!(args.is_empty());
    }

    #[test]
    fn test_empty_groups() {
        for expr in [Expr::and([]), Expr::or([])] {
            assert!(expr.is_empty());
            let (sql, args) = expr.generate(0, Dialect::MySql);
            assert_eq!(sql, "");
            assert!(args.is_empty());
        }
    }

    #[test]
    fn test_empty_group_absorbed() {
        let expr = Expr::and([Expr::eq("id", 123), Expr::and([])]);
        let (sql, args) = expr.generate(0, Dialect::MySql);
        assert_eq!(sql, "id=?");
        assert_eq!(args, vec![Value::Int(123)]);
    }

    #[test]
    fn test_all_absorbed() {
        let (sql, args) = Expr::and([Expr::eq("id", 2), Expr::all()]).generate(0, Dialect::MySql);
        assert_eq!(sql, "id=?");
        assert_eq!(args.len(), 1);

        let (sql, args) = Expr::and([Expr::all(), Expr::all()]).generate(0, Dialect::MySql);
        assert_eq!(sql, "");
        assert!(args.is_empty());

        let (sql, _) = Expr::and([Expr::all()]).generate(0, Dialect::MySql);
        assert_eq!(sql, "");
    }

    #[test]
    fn test_deeply_vacuous() {
        let expr = Expr::or([Expr::and([Expr::or([]), Expr::all()]), Expr::and([])]);
        assert!(expr.is_empty());
        assert_eq!(expr.generate(0, Dialect::Postgres).0, "");
    }

    #[test]
    fn test_single_survivor_surfaces() {
        let expr = Expr::or([
            Expr::and([Expr::and([]), Expr::and([Expr::eq("x", 1)])]),
            Expr::all(),
        ]);
        let (sql, _) = expr.generate(0, Dialect::Postgres);
        assert_eq!(sql, "x=$1");
    }

    #[test]
    fn test_nested_groups_parenthesized() {
        let expr = Expr::and([
            Expr::eq("isdeleted", false),
            Expr::or([Expr::eq("firstname", "Jack"), Expr::eq("lastname", "Ryan")]),
            Expr::eq("status", 1),
        ]);
        let (sql, args) = expr.generate(0, Dialect::Postgres);
        assert_eq!(
            sql,
            "(isdeleted=$1 AND (firstname=$2 OR lastname=$3) AND status=$4)"
        );
        assert_eq!(args.len(), 4);
    }

    #[test]
    fn test_vacuous_children_do_not_shift_numbering() {
        let expr = Expr::and([
            Expr::all(),
            Expr::eq("a", 1),
            Expr::or([]),
            Expr::eq("b", 2),
        ]);
        let (sql, _) = expr.generate(0, Dialect::Postgres);
        assert_eq!(sql, "(a=$1 AND b=$2)");
    }

    #[test]
    fn test_chain_builds_top_level_and() {
        let mut root = Expr::Empty;
        root.chain(Expr::eq("a", 1), "filter");
        root.chain(Expr::eq("b", 2), "filter");
        root.chain(Expr::and([Expr::eq("c", 3), Expr::eq("d", 4)]), "filter");
        let (sql, _) = root.generate(0, Dialect::Postgres);
        assert_eq!(sql, "a=$1 AND b=$2 AND (c=$3 AND d=$4)");
    }

    #[test]
    fn test_chain_onto_manual_and_keeps_parentheses() {
        let mut root = Expr::and([Expr::eq("a", 1), Expr::eq("b", 2)]);
        root.chain(Expr::eq("c", 3), "filter");
        assert_eq!(root.generate(0, Dialect::MySql).0, "(a=? AND b=? AND c=?)");
    }

    #[test]
    #[should_panic(expected = "cannot chain filter()")]
    fn test_chain_onto_manual_or_panics() {
        let mut root = Expr::or([Expr::eq("a", 1), Expr::eq("b", 2)]);
        root.chain(Expr::eq("c", 3), "filter");
    }

    #[test]
    fn test_placeholder_count_matches_args() {
        let expr = Expr::or([
            Expr::and([
                Expr::in_list("id", [1, 2, 3]),
                Expr::like("name", "x"),
                Expr::is_null("deleted_at"),
            ]),
            Expr::template("score > ? AND score < ?", [10, 20]),
            Expr::and([Expr::all(), Expr::not_in("kind", Vec::<i32>::new())]),
            Expr::op("age", "<>", 3),
        ]);
        let (sql, args) = expr.generate(0, Dialect::MySql);
        assert_eq!(placeholder_count(&sql), args.len());
        assert_eq!(
            args,
            vec![
                Value::Int(1),
                Value::Int(2),
                Value::Int(3),
                Value::String("%x%".into()),
                Value::Int(10),
                Value::Int(20),
                Value::Int(0),
                Value::Int(3),
            ]
        );

        let (sql, _) = expr.generate(0, Dialect::Postgres);
        assert!(sql.contains("$8"));
        assert!(!sql.contains("$9"));
    }
}
