//! SQL dialects: placeholder syntax and upsert strategy.
//!
//! [`Dialect`] is a closed set. Each variant decides how placeholder index `n`
//! is spelled and how an upsert is phrased; nothing else about SQL generation
//! differs between databases.

use crate::error::{QueryError, QueryResult};
use std::fmt;
use std::str::FromStr;

/// Target database family.
///
/// Parses from (and serializes to) `"mysql"`, `"postgres"` and `"sqlite3"`,
/// so it can be read straight out of application configuration.
///
/// # Example
/// ```
/// use querykit::Dialect;
///
/// let d: Dialect = "postgres".parse().unwrap();
/// assert_eq!(d.placeholder(0), "$1");
/// assert_eq!(Dialect::MySql.placeholder(7), "?");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Dialect {
    /// `?` placeholders, `REPLACE INTO` upserts.
    #[serde(rename = "mysql")]
    MySql,
    /// `$n` placeholders, `ON CONFLICT` upserts.
    #[serde(rename = "postgres", alias = "postgresql")]
    Postgres,
    /// `$n` placeholders, `ON CONFLICT` upserts.
    #[serde(rename = "sqlite3", alias = "sqlite")]
    Sqlite,
}

impl Dialect {
    /// Canonical configuration name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::MySql => "mysql",
            Self::Postgres => "postgres",
            Self::Sqlite => "sqlite3",
        }
    }

    /// Placeholder text for the 0-based argument `index`.
    pub fn placeholder(self, index: usize) -> String {
        match self {
            Self::MySql => "?".to_string(),
            Self::Postgres | Self::Sqlite => format!("${}", index + 1),
        }
    }

    /// Whether inserted ids are read back through the driver's last-insert-id
    /// rather than a `RETURNING` clause.
    pub const fn uses_auto_generated_id(self) -> bool {
        match self {
            Self::MySql | Self::Sqlite => true,
            Self::Postgres => false,
        }
    }

    /// SQL spelling of the current timestamp.
    pub const fn current_timestamp(self) -> &'static str {
        match self {
            Self::Postgres => "NOW()",
            Self::MySql | Self::Sqlite => "CURRENT_TIMESTAMP",
        }
    }

    /// Build the upsert statement for `row_count` rows of `columns`.
    ///
    /// Placeholders start at index 0; row `i`, column `j` gets index
    /// `i * columns.len() + j`. MySQL ignores `conflict_columns` and replaces
    /// the whole row.
    pub fn compile_upsert<C, F>(
        self,
        table: &str,
        conflict_columns: &[C],
        columns: &[F],
        row_count: usize,
    ) -> String
    where
        C: AsRef<str>,
        F: AsRef<str>,
    {
        let rows = self.value_rows(0, columns.len(), row_count);
        self.upsert_with_rows(table, conflict_columns, columns, &rows)
    }

    /// Upsert around pre-rendered `VALUES` rows.
    pub(crate) fn upsert_with_rows<C, F>(
        self,
        table: &str,
        conflict_columns: &[C],
        columns: &[F],
        rows: &str,
    ) -> String
    where
        C: AsRef<str>,
        F: AsRef<str>,
    {
        let names = join(columns, ", ");

        match self {
            Self::MySql => format!("REPLACE INTO {table} ({names}) VALUES {rows}"),
            Self::Postgres | Self::Sqlite => {
                let mut sql = format!("INSERT INTO {table} ({names}) VALUES {rows}");
                if conflict_columns.is_empty() {
                    sql.push_str(" ON CONFLICT DO NOTHING");
                } else {
                    let updates: Vec<String> = columns
                        .iter()
                        .map(|c| {
                            let c = c.as_ref();
                            format!("{c}=EXCLUDED.{c}")
                        })
                        .collect();
                    sql.push_str(&format!(
                        " ON CONFLICT ({}) DO UPDATE SET {}",
                        join(conflict_columns, ", "),
                        updates.join(", ")
                    ));
                }
                sql
            }
        }
    }

    /// `(p, p), (p, p)` for `rows` rows of `width` placeholders starting at `start`.
    pub(crate) fn value_rows(self, start: usize, width: usize, rows: usize) -> String {
        (0..rows)
            .map(|row| {
                let base = start + row * width;
                let placeholders: Vec<String> =
                    (0..width).map(|col| self.placeholder(base + col)).collect();
                format!("({})", placeholders.join(", "))
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Dialect {
    type Err = QueryError;

    fn from_str(s: &str) -> QueryResult<Self> {
        match s {
            "mysql" => Ok(Self::MySql),
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "sqlite3" | "sqlite" => Ok(Self::Sqlite),
            other => Err(QueryError::UnknownDialect(other.to_string())),
        }
    }
}

fn join<S: AsRef<str>>(items: &[S], sep: &str) -> String {
    items
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(sep)
}

#[cfg(test)]
mod tests {
    use super::*;

    const NO_CONFLICT: &[&str] = &[];

    #[test]
    fn test_placeholders() {
        assert_eq!(Dialect::MySql.placeholder(0), "?");
        assert_eq!(Dialect::MySql.placeholder(12), "?");
        assert_eq!(Dialect::Postgres.placeholder(0), "$1");
        assert_eq!(Dialect::Postgres.placeholder(4), "$5");
        assert_eq!(Dialect::Sqlite.placeholder(9), "$10");
    }

    #[test]
    fn test_auto_generated_id() {
        assert!(Dialect::MySql.uses_auto_generated_id());
        assert!(Dialect::Sqlite.uses_auto_generated_id());
        assert!(!Dialect::Postgres.uses_auto_generated_id());
    }

    #[test]
    fn test_upsert_postgres() {
        let sql = Dialect::Postgres.compile_upsert("customer", &["id"], &["firstname", "age"], 1);
        assert_eq!(
            sql,
            "INSERT INTO customer (firstname, age) VALUES ($1, $2) ON CONFLICT (id) DO UPDATE SET firstname=EXCLUDED.firstname, age=EXCLUDED.age"
        );
    }

    #[test]
    fn test_upsert_no_conflict_columns() {
        let sql = Dialect::Sqlite.compile_upsert("customer", NO_CONFLICT, &["firstname", "age"], 1);
        assert_eq!(
            sql,
            "INSERT INTO customer (firstname, age) VALUES ($1, $2) ON CONFLICT DO NOTHING"
        );
    }

    #[test]
    fn test_upsert_multi_row_numbering() {
        let sql = Dialect::Postgres.compile_upsert("t", &["a", "b"], &["a", "b", "c"], 2);
        assert_eq!(
            sql,
            "INSERT INTO t (a, b, c) VALUES ($1, $2, $3), ($4, $5, $6) ON CONFLICT (a, b) DO UPDATE SET a=EXCLUDED.a, b=EXCLUDED.b, c=EXCLUDED.c"
        );
    }

    #[test]
    fn test_upsert_mysql_replace() {
        let sql = Dialect::MySql.compile_upsert("customer", &["id"], &["id", "firstname"], 2);
        assert_eq!(sql, "REPLACE INTO customer (id, firstname) VALUES (?, ?), (?, ?)");
    }

    #[test]
    fn test_from_str() {
        assert_eq!("mysql".parse::<Dialect>(), Ok(Dialect::MySql));
        assert_eq!("postgres".parse::<Dialect>(), Ok(Dialect::Postgres));
        assert_eq!("sqlite3".parse::<Dialect>(), Ok(Dialect::Sqlite));
        assert_eq!(
            "oracle".parse::<Dialect>(),
            Err(QueryError::UnknownDialect("oracle".to_string()))
        );
    }

    #[test]
    fn test_deserialize_from_config() {
        #[derive(serde::Deserialize)]
        struct Config {
            dialect: Dialect,
        }

        let cfg: Config = serde_json::from_str(r#"{"dialect":"sqlite3"}"#).unwrap();
        assert_eq!(cfg.dialect, Dialect::Sqlite);
        let cfg: Config = serde_json::from_str(r#"{"dialect":"postgresql"}"#).unwrap();
        assert_eq!(cfg.dialect, Dialect::Postgres);
        assert_eq!(serde_json::to_string(&Dialect::MySql).unwrap(), r#""mysql""#);
    }

    #[test]
    fn test_current_timestamp() {
        assert_eq!(Dialect::Postgres.current_timestamp(), "NOW()");
        assert_eq!(Dialect::MySql.current_timestamp(), "CURRENT_TIMESTAMP");
    }
}
