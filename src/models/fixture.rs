//! Fixture (match) model.
//!
//! A fixture pairs two distinct teams within one week. Home/away labels
//! are kept for display only; constraint logic treats the pair as unordered.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A pairing of two teams that needs exactly one table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fixture {
    /// Home team id.
    pub home: String,
    /// Away team id.
    pub away: String,
}

impl Fixture {
    /// Creates a fixture.
    pub fn new(home: impl Into<String>, away: impl Into<String>) -> Self {
        Self {
            home: home.into(),
            away: away.into(),
        }
    }

    /// Parses the `home-away` notation used in schedule files.
    ///
    /// Returns `None` when the text is not two non-empty ids around a dash.
    pub fn parse(text: &str) -> Option<Self> {
        let (home, away) = text.trim().split_once('-')?;
        let (home, away) = (home.trim(), away.trim());
        if home.is_empty() || away.is_empty() || away.contains('-') {
            return None;
        }
        Some(Self::new(home, away))
    }

    /// Both team ids, home first.
    pub fn teams(&self) -> [&str; 2] {
        [self.home.as_str(), self.away.as_str()]
    }

    /// Whether the given team plays in this fixture.
    pub fn involves(&self, team_id: &str) -> bool {
        self.home == team_id || self.away == team_id
    }

    /// Whether either side is the bye team.
    pub fn has_bye(&self, bye_team: Option<&str>) -> bool {
        bye_team.is_some_and(|bye| self.involves(bye))
    }
}

impl fmt::Display for Fixture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.home, self.away)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fixture() {
        let f = Fixture::parse(" 3-4 ").unwrap();
        assert_eq!(f.home, "3");
        assert_eq!(f.away, "4");
        assert_eq!(f.to_string(), "3-4");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(Fixture::parse("34").is_none());
        assert!(Fixture::parse("3-").is_none());
        assert!(Fixture::parse("-4").is_none());
        assert!(Fixture::parse("1-2-3").is_none());
    }

    #[test]
    fn test_involves_and_bye() {
        let f = Fixture::new("1", "6");
        assert!(f.involves("1"));
        assert!(f.involves("6"));
        assert!(!f.involves("2"));
        assert!(f.has_bye(Some("6")));
        assert!(!f.has_bye(Some("5")));
        assert!(!f.has_bye(None));
    }
}
