//! Week and timeline models.
//!
//! A week is an ordered batch of fixtures that is resolved as a unit.
//! The timeline is the chronological sequence of weeks; its order is fixed
//! once loaded and drives the commit order of the ledger.

use serde::{Deserialize, Serialize};

use super::Fixture;

/// One scheduled week of play.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Week {
    /// Ordinal week number from the schedule.
    pub number: u32,
    /// Display label (usually the match date).
    pub label: String,
    /// Fixtures in schedule order.
    pub fixtures: Vec<Fixture>,
}

impl Week {
    /// Creates an empty week.
    pub fn new(number: u32, label: impl Into<String>) -> Self {
        Self {
            number,
            label: label.into(),
            fixtures: Vec::new(),
        }
    }

    /// Adds a fixture.
    pub fn with_fixture(mut self, fixture: Fixture) -> Self {
        self.fixtures.push(fixture);
        self
    }

    /// Adds a fixture from `home`/`away` ids.
    pub fn with_pair(self, home: impl Into<String>, away: impl Into<String>) -> Self {
        self.with_fixture(Fixture::new(home, away))
    }

    /// Fixtures that need a table (neither side is the bye team).
    pub fn playable_fixtures<'a>(
        &'a self,
        bye_team: Option<&'a str>,
    ) -> impl Iterator<Item = &'a Fixture> + 'a {
        self.fixtures.iter().filter(move |f| !f.has_bye(bye_team))
    }

    /// Number of fixtures that need a table.
    pub fn playable_count(&self, bye_team: Option<&str>) -> usize {
        self.playable_fixtures(bye_team).count()
    }
}

/// The ordered sequence of weeks to assign.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeline {
    /// Weeks in chronological order.
    pub weeks: Vec<Week>,
}

impl Timeline {
    /// Creates an empty timeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a week.
    pub fn with_week(mut self, week: Week) -> Self {
        self.weeks.push(week);
        self
    }

    /// Appends a week in place.
    pub fn push(&mut self, week: Week) {
        self.weeks.push(week);
    }

    /// Number of weeks.
    pub fn total_weeks(&self) -> usize {
        self.weeks.len()
    }

    /// Target number of times any team should use any one table over the
    /// whole timeline: `ceil(total_weeks / total_tables)`.
    ///
    /// Returns 0 for an empty table pool.
    pub fn ideal_usage(&self, total_tables: usize) -> u32 {
        if total_tables == 0 {
            return 0;
        }
        self.total_weeks().div_ceil(total_tables) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_playable_fixtures_skip_bye() {
        let week = Week::new(1, "2025-01-07")
            .with_pair("1", "2")
            .with_pair("3", "6")
            .with_pair("4", "5");

        assert_eq!(week.playable_count(Some("6")), 2);
        assert_eq!(week.playable_count(None), 3);
        let ids: Vec<String> = week
            .playable_fixtures(Some("6"))
            .map(|f| f.to_string())
            .collect();
        assert_eq!(ids, vec!["1-2", "4-5"]);
    }

    #[test]
    fn test_ideal_usage_rounds_up() {
        let mut timeline = Timeline::new();
        for n in 1..=10 {
            timeline.push(Week::new(n, ""));
        }
        assert_eq!(timeline.total_weeks(), 10);
        assert_eq!(timeline.ideal_usage(4), 3);
        assert_eq!(timeline.ideal_usage(5), 2);
        assert_eq!(timeline.ideal_usage(0), 0);
    }
}
