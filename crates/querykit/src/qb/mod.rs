//! Statement compilers.
//!
//! Every statement compiles to `(sql, args)` where `args` lines up one-to-one
//! with the placeholders in `sql`. Placeholder numbering is global to the
//! outermost statement: nested subqueries, joins, CTEs and UNION branches
//! continue the count instead of restarting it.
//!
//! # Usage
//!
//! ```
//! use querykit::{Builder, Dialect, Expr};
//!
//! let b = Builder::new(Dialect::Postgres);
//!
//! // SELECT with a subquery; the inner statement numbers from $1
//! let (sql, args) = b
//!     .select("*", "test")
//!     .filter(Expr::in_subquery("team", b.select("id", "teams").filter(Expr::id_equals(3))))
//!     .filter(Expr::id_equals(2))
//!     .to_sql();
//! assert_eq!(
//!     sql,
//!     "SELECT * FROM test WHERE team IN (SELECT id FROM teams WHERE id=$1) AND id=$2"
//! );
//! assert_eq!(args.len(), 2);
//!
//! // UPSERT
//! let (sql, _) = b.upsert("customer", ["id"]).add("id", 1).add("name", "Jack").to_sql();
//! assert_eq!(
//!     sql,
//!     "INSERT INTO customer (id, name) VALUES ($1, $2) ON CONFLICT (id) DO UPDATE SET id=EXCLUDED.id, name=EXCLUDED.name"
//! );
//! ```

mod bulk;
mod delete;
mod expr;
pub(crate) mod insert;
mod options;
mod order;
mod param;
mod select;

pub use bulk::{BulkInsert, BulkMode};
pub use delete::Delete;
pub use expr::{Expr, SubqueryOp};
pub use insert::{FieldValue, InsertUpdate, WriteMode};
pub use options::QueryOptions;
pub use order::Order;
pub use param::ParamList;
pub use select::{JoinKind, Select};
