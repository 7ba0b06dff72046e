//! ORDER BY terms.

use std::fmt;

/// One ORDER BY term: `field` or `field DESC`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Order {
    field: String,
    desc: bool,
}

impl Order {
    /// Order by `field` in the given direction.
    pub fn new(field: impl Into<String>, desc: bool) -> Self {
        Self {
            field: field.into(),
            desc,
        }
    }

    /// Ascending order.
    pub fn asc(field: impl Into<String>) -> Self {
        Self::new(field, false)
    }

    /// Descending order.
    pub fn desc(field: impl Into<String>) -> Self {
        Self::new(field, true)
    }

    /// The ordered field or expression.
    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn is_desc(&self) -> bool {
        self.desc
    }

    /// An order without a field renders nothing and is skipped by SELECT.
    pub fn is_empty(&self) -> bool {
        self.field.is_empty()
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.desc {
            write!(f, "{} DESC", self.field)
        } else {
            f.write_str(&self.field)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render() {
        assert_eq!(Order::asc("name").to_string(), "name");
        assert_eq!(Order::desc("created_at").to_string(), "created_at DESC");
        assert_eq!(Order::new("id", true).to_string(), "id DESC");
    }

    #[test]
    fn test_empty() {
        assert!(Order::default().is_empty());
        assert!(!Order::asc("id").is_empty());
    }
}
