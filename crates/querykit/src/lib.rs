//! # querykit
//!
//! A dialect-aware SQL statement compiler.
//!
//! Statements are built in memory and compiled to parameterized SQL plus an
//! ordered argument list. Nothing here talks to a database; hand the output
//! to whichever driver you use.
//!
//! ## Features
//!
//! - **One placeholder counter**: numbering runs across subqueries, joins, CTEs
//!   and UNION branches, so `$n` always matches the n-th argument
//! - **Vacuous clauses vanish**: empty AND/OR groups contribute nothing, and a
//!   group with a single member is emitted without parentheses
//! - **Three dialects**: MySQL (`?`, `REPLACE INTO`), PostgreSQL and SQLite
//!   (`$n`, `ON CONFLICT`)
//! - **Struct extraction**: `#[derive(Record)]` turns a struct into insert or
//!   update fields
//!
//! ## Example
//!
//! ```
//! use querykit::{Builder, Dialect, Expr};
//!
//! let b = Builder::new(Dialect::Postgres);
//!
//! let (sql, args) = b
//!     .select("c.*", "contacts c")
//!     .left_join("addresses a", Expr::raw("a.contact=c.id"))
//!     .filter(Expr::eq("c.activated", true))
//!     .filter(Expr::or([Expr::like("c.name", "jack"), Expr::is_null("c.name")]))
//!     .limit(10)
//!     .to_sql();
//!
//! assert_eq!(
//!     sql,
//!     "SELECT c.* FROM contacts c LEFT JOIN addresses a ON a.contact=c.id \
//!      WHERE c.activated=$1 AND (c.name LIKE $2 OR c.name IS NULL) LIMIT 10"
//! );
//! assert_eq!(args.len(), 2);
//! ```
//!
//! ## Cargo features
//!
//! - `derive` (default): `#[derive(Record)]`
//! - `tracing` (default): DEBUG events on the `querykit.sql` target for every
//!   compiled statement
//! - `postgres`: `tokio_postgres::types::ToSql` for [`Value`]

pub mod builder;
pub mod dialect;
pub mod error;
pub mod qb;
pub mod record;
pub mod value;

mod trace;

#[cfg(feature = "postgres")]
pub mod pg;

pub use builder::Builder;
pub use dialect::Dialect;
pub use error::{QueryError, QueryResult};
pub use qb::{
    BulkInsert, BulkMode, Delete, Expr, FieldValue, InsertUpdate, JoinKind, Order, ParamList,
    QueryOptions, Select, SubqueryOp, WriteMode,
};
pub use record::{Record, RecordContext, RecordOptions};
pub use value::Value;

#[cfg(feature = "derive")]
pub use querykit_derive::Record;
