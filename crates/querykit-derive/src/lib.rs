//! Derive macros for querykit
//!
//! Provides `#[derive(Record)]`.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod record;

/// Derive `Record` for a struct with named fields.
///
/// # Example
///
/// ```ignore
/// use querykit::Record;
///
/// #[derive(Record)]
/// struct Company {
///     #[db(autoincrement)]
///     id: i64,
///     name: String,
///     #[db(column = "vat_nr")]
///     vat: Option<String>,
///     #[db(flatten)]
///     address: Address,
///     #[db(skip)]
///     cached_score: f64,
/// }
/// ```
///
/// # Attributes
///
/// - `#[db(column = "name")]` - Map field to a different column name
/// - `#[db(skip)]` - Never write this field
/// - `#[db(autoincrement)]` - Database-assigned id; written on insert only
///   when non-zero, or always with `RecordOptions::with_auto_increment()`
/// - `#[db(readonly)]` - Written only with `RecordOptions::with_read_only()`
/// - `#[db(flatten)]` - Splice in the fields of a nested `Record`
///
/// Every other field must be `Clone + Into<querykit::Value>`.
#[proc_macro_derive(Record, attributes(db))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    record::expand(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
