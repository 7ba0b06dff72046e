//! INSERT / UPDATE / UPSERT statement compiler.

use crate::dialect::Dialect;
use crate::qb::expr::Expr;
use crate::qb::param::ParamList;
use crate::qb::select::{push_predicate, Select};
use crate::record::{Record, RecordContext, RecordOptions};
use crate::trace::{self, StatementKind};
use crate::value::Value;

/// Which statement an [`InsertUpdate`] compiles to. Fixed at construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WriteMode {
    Insert,
    Update,
    Upsert,
}

/// Right-hand side of a field assignment.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
    /// Bound as a single placeholder.
    Literal(Value),
    /// Inlined as `(SELECT ...)`.
    Subquery(Box<Select>),
}

#[derive(Clone, Debug, PartialEq)]
struct Field {
    column: String,
    value: FieldValue,
}

/// Single-row INSERT, UPDATE or UPSERT.
///
/// Fields keep the order they were added in; that order drives the column
/// list, the SET list and the argument order.
///
/// # Example
/// ```
/// use querykit::{Builder, Dialect, Expr};
///
/// let b = Builder::new(Dialect::Postgres);
/// let (sql, args) = b
///     .update("customer", Expr::id_equals(4))
///     .add("firstname", "Jack")
///     .add("age", 23)
///     .to_sql();
/// assert_eq!(sql, "UPDATE customer SET firstname=$1, age=$2 WHERE id=$3");
/// assert_eq!(args.len(), 3);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct InsertUpdate {
    mode: WriteMode,
    dialect: Dialect,
    table: String,
    fields: Vec<Field>,
    filter: Expr,
    source: Option<Box<Select>>,
    conflict_columns: Vec<String>,
    returning: Option<String>,
}

impl InsertUpdate {
    fn new(mode: WriteMode, dialect: Dialect, table: String) -> Self {
        Self {
            mode,
            dialect,
            table,
            fields: Vec::new(),
            filter: Expr::Empty,
            source: None,
            conflict_columns: Vec::new(),
            returning: None,
        }
    }

    /// `INSERT INTO table ...`
    pub fn insert(dialect: Dialect, table: impl Into<String>) -> Self {
        Self::new(WriteMode::Insert, dialect, table.into())
    }

    /// `UPDATE table SET ... WHERE filter`
    ///
    /// Pass [`Expr::all()`] to update every row.
    pub fn update(dialect: Dialect, table: impl Into<String>, filter: Expr) -> Self {
        let mut stmt = Self::new(WriteMode::Update, dialect, table.into());
        stmt.filter = filter;
        stmt
    }

    /// Insert-or-update keyed on `conflict_columns`.
    ///
    /// With no conflict columns, conflicting rows are left untouched.
    pub fn upsert<S: Into<String>>(
        dialect: Dialect,
        table: impl Into<String>,
        conflict_columns: impl IntoIterator<Item = S>,
    ) -> Self {
        let mut stmt = Self::new(WriteMode::Upsert, dialect, table.into());
        stmt.conflict_columns = conflict_columns.into_iter().map(Into::into).collect();
        stmt
    }

    pub fn mode(&self) -> WriteMode {
        self.mode
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    /// Set `column` to a bound value.
    pub fn add(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.push(Field {
            column: column.into(),
            value: FieldValue::Literal(value.into()),
        });
        self
    }

    /// Set `column` to the result of a subquery.
    pub fn add_select(mut self, column: impl Into<String>, query: Select) -> Self {
        self.fields.push(Field {
            column: column.into(),
            value: FieldValue::Subquery(Box::new(query)),
        });
        self
    }

    /// Insert the rows produced by `source` (`INSERT INTO table SELECT ...`).
    ///
    /// Only used in [`WriteMode::Insert`]; any added fields are ignored then.
    pub fn select(mut self, source: Select) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Append `RETURNING column`.
    pub fn returning(mut self, column: impl Into<String>) -> Self {
        self.returning = Some(column.into());
        self
    }

    /// Add every field of `record` with default options.
    pub fn with_record<R: Record + ?Sized>(self, record: &R) -> Self {
        self.with_record_options(record, RecordOptions::default())
    }

    /// Add the fields of `record`, honoring auto-increment and read-only
    /// markers according to `options`.
    pub fn with_record_options<R: Record + ?Sized>(
        mut self,
        record: &R,
        options: RecordOptions,
    ) -> Self {
        let ctx = RecordContext::new(self.mode, options);
        for (column, value) in record.fields(&ctx) {
            self.fields.push(Field {
                column,
                value: FieldValue::Literal(value),
            });
        }
        self
    }

    /// Whether any field was added.
    pub fn has_clauses(&self) -> bool {
        !self.fields.is_empty()
    }

    /// Column/value pairs of the literal fields, in insertion order.
    pub fn clauses(&self) -> Vec<(&str, &Value)> {
        self.fields
            .iter()
            .filter_map(|f| match &f.value {
                FieldValue::Literal(v) => Some((f.column.as_str(), v)),
                FieldValue::Subquery(_) => None,
            })
            .collect()
    }

    /// Compile the statement.
    pub fn to_sql(&self) -> (String, Vec<Value>) {
        let mut params = ParamList::new();
        let mut sql = match self.mode {
            WriteMode::Insert => self.build_insert(&mut params),
            WriteMode::Update => self.build_update(&mut params),
            WriteMode::Upsert => self.build_upsert(&mut params),
        };

        if let Some(returning) = &self.returning {
            sql.push_str(" RETURNING ");
            sql.push_str(returning);
        }

        let args = params.into_values();
        trace::compiled(self.statement_kind(), self.dialect, &sql, args.len());
        (sql, args)
    }

    fn statement_kind(&self) -> StatementKind {
        match self.mode {
            WriteMode::Insert => StatementKind::Insert,
            WriteMode::Update => StatementKind::Update,
            WriteMode::Upsert => StatementKind::Upsert,
        }
    }

    fn columns(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.column.as_str()).collect()
    }

    /// Render each field's value expression in order, binding as we go.
    fn value_exprs(&self, params: &mut ParamList) -> Vec<String> {
        self.fields
            .iter()
            .map(|f| match &f.value {
                FieldValue::Literal(v) => params.bind(v.clone(), self.dialect),
                FieldValue::Subquery(q) => format!("({})", q.build(params)),
            })
            .collect()
    }

    fn build_insert(&self, params: &mut ParamList) -> String {
        if let Some(source) = &self.source {
            return format!("INSERT INTO {} {}", self.table, source.build(params));
        }
        let values = self.value_exprs(params);
        format!(
            "INSERT INTO {} ({}) VALUES ({})",
            self.table,
            self.columns().join(", "),
            values.join(", ")
        )
    }

    fn build_update(&self, params: &mut ParamList) -> String {
        let values = self.value_exprs(params);
        let sets: Vec<String> = self
            .fields
            .iter()
            .zip(values)
            .map(|(f, v)| format!("{}={v}", f.column))
            .collect();

        let mut sql = format!("UPDATE {} SET {}", self.table, sets.join(", "));
        push_predicate(&mut sql, " WHERE ", &self.filter, params, self.dialect);
        sql
    }

    fn build_upsert(&self, params: &mut ParamList) -> String {
        let row = format!("({})", self.value_exprs(params).join(", "));
        self.dialect
            .upsert_with_rows(
                &self.table,
                self.conflict_columns.as_slice(),
                self.columns().as_slice(),
                &row,
            )
    }
}
