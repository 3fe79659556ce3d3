//! Team model.

use serde::{Deserialize, Serialize};

/// A team whose table usage is tracked.
///
/// The bye team is a sentinel: it never receives a table and is left out
/// of every balance calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    /// Unique team identifier (as it appears in schedule fixtures).
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Whether this team is the bye placeholder.
    pub is_bye: bool,
}

impl Team {
    /// Creates a regular team. The name defaults to the id.
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            is_bye: false,
        }
    }

    /// Creates the bye placeholder team.
    pub fn bye(id: impl Into<String>) -> Self {
        Self::new(id).with_name("Bye").as_bye()
    }

    /// Sets the team name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Marks this team as the bye placeholder.
    pub fn as_bye(mut self) -> Self {
        self.is_bye = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_builder() {
        let t = Team::new("4").with_name("Cue Balls");
        assert_eq!(t.id, "4");
        assert_eq!(t.name, "Cue Balls");
        assert!(!t.is_bye);
    }

    #[test]
    fn test_bye_team() {
        let b = Team::bye("6");
        assert!(b.is_bye);
        assert_eq!(b.name, "Bye");
    }
}
