//! Running argument list for a statement being compiled.

use crate::dialect::Dialect;
use crate::value::Value;

/// Arguments collected so far, plus the number of placeholders the enclosing
/// statement consumed before this list started.
///
/// The next placeholder index is always `base + len()`, which is what keeps the
/// emitted placeholder numbers and the argument order in lock-step across
/// nested subqueries, joins and CTEs.
#[derive(Clone, Debug, Default)]
pub struct ParamList {
    base: usize,
    values: Vec<Value>,
}

impl ParamList {
    /// Create a new empty parameter list starting at index 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty list whose first placeholder is `base`.
    pub fn starting_at(base: usize) -> Self {
        Self {
            base,
            values: Vec::new(),
        }
    }

    /// Index the next bound value will receive.
    pub fn next_index(&self) -> usize {
        self.base + self.values.len()
    }

    /// Bind a value and return its placeholder text.
    pub fn bind(&mut self, value: Value, dialect: Dialect) -> String {
        let placeholder = dialect.placeholder(self.next_index());
        self.values.push(value);
        placeholder
    }

    /// Append values that were already numbered by a nested compile.
    pub fn extend(&mut self, values: impl IntoIterator<Item = Value>) {
        self.values.extend(values);
    }

    /// Get the current parameter count.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Take the collected values.
    pub fn into_values(self) -> Vec<Value> {
        self.values
    }
}
