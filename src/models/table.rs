//! Table model.
//!
//! A table is a reusable, exclusively-assignable slot: in any one week it
//! hosts at most one fixture. Tables are created once from the division
//! configuration and keep a stable identity for the whole run.

use serde::{Deserialize, Serialize};

/// A table that fixtures can be assigned to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    /// Unique table identifier.
    pub id: String,
    /// Display value printed in reports (e.g. "1-2" for a table pair).
    pub label: String,
}

impl Table {
    /// Creates a table whose label equals its id.
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            label: id.clone(),
            id,
        }
    }

    /// Sets the display label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_label_defaults_to_id() {
        let t = Table::new("3");
        assert_eq!(t.id, "3");
        assert_eq!(t.label, "3");
    }

    #[test]
    fn test_table_with_label() {
        let t = Table::new("1").with_label("1-2");
        assert_eq!(t.id, "1");
        assert_eq!(t.label, "1-2");
    }
}
