//! Struct-to-field extraction for INSERT/UPDATE/UPSERT.
//!
//! Implement [`Record`] (usually with `#[derive(Record)]`) to feed a struct's
//! fields into [`InsertUpdate::with_record`](crate::InsertUpdate::with_record).

use crate::qb::insert::WriteMode;
use crate::value::Value;

/// Options controlling which marked fields a record contributes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RecordOptions {
    /// Always copy `#[db(autoincrement)]` fields.
    pub copy_auto_increment: bool,
    /// Copy `#[db(readonly)]` fields.
    pub copy_read_only: bool,
}

impl RecordOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_auto_increment(mut self) -> Self {
        self.copy_auto_increment = true;
        self
    }

    pub fn with_read_only(mut self) -> Self {
        self.copy_read_only = true;
        self
    }
}

/// The statement a record is being extracted for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RecordContext {
    mode: WriteMode,
    options: RecordOptions,
}

impl RecordContext {
    pub fn new(mode: WriteMode, options: RecordOptions) -> Self {
        Self { mode, options }
    }

    pub fn mode(&self) -> WriteMode {
        self.mode
    }

    pub fn options(&self) -> RecordOptions {
        self.options
    }

    /// Whether an auto-increment field holding `value` is written.
    ///
    /// Inserts keep explicitly assigned (non-zero) ids; updates and upserts
    /// never touch the id unless `copy_auto_increment` is set.
    pub fn include_auto_increment(&self, value: &Value) -> bool {
        self.options.copy_auto_increment || (self.mode == WriteMode::Insert && !value.is_zero())
    }

    pub fn include_read_only(&self) -> bool {
        self.options.copy_read_only
    }
}

/// A struct whose fields map onto table columns.
///
/// # Example
///
/// ```ignore
/// use querykit::Record;
///
/// #[derive(Record)]
/// struct Customer {
///     #[db(autoincrement)]
///     id: i64,
///     #[db(column = "firstname")]
///     first_name: String,
///     #[db(skip)]
///     cache: Vec<u8>,
/// }
/// ```
pub trait Record {
    /// Push `(column, value)` pairs in declaration order.
    fn append_fields(&self, ctx: &RecordContext, out: &mut Vec<(String, Value)>);

    fn fields(&self, ctx: &RecordContext) -> Vec<(String, Value)> {
        let mut out = Vec::new();
        self.append_fields(ctx, &mut out);
        out
    }
}

impl<T: Record + ?Sized> Record for &T {
    fn append_fields(&self, ctx: &RecordContext, out: &mut Vec<(String, Value)>) {
        (**self).append_fields(ctx, out);
    }
}
