//! Assignment (solution) model.
//!
//! The engine's output: per week, a table (or explicit "unassigned" for bye
//! fixtures) for every fixture, the cumulative usage table at the end of the
//! run, and, if the run stopped early, the week that could not be resolved.

use serde::{Deserialize, Serialize};

use super::Fixture;
use crate::error::AssignError;

/// A fixture together with the table it received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixtureSlot {
    /// The fixture.
    pub fixture: Fixture,
    /// Assigned table id. `None` for fixtures involving the bye team.
    pub table: Option<String>,
}

impl FixtureSlot {
    /// Creates a slot with an assigned table.
    pub fn assigned(fixture: Fixture, table: impl Into<String>) -> Self {
        Self {
            fixture,
            table: Some(table.into()),
        }
    }

    /// Creates an unassigned slot (bye fixture).
    pub fn unassigned(fixture: Fixture) -> Self {
        Self {
            fixture,
            table: None,
        }
    }
}

/// The resolved table assignment for one week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekAssignment {
    /// Week number.
    pub week: u32,
    /// Week display label.
    pub label: String,
    /// One slot per fixture, in schedule order.
    pub slots: Vec<FixtureSlot>,
    /// Whether the no-repeat rule was relaxed to resolve this week.
    pub relaxed: bool,
}

impl WeekAssignment {
    /// Table assigned to the given team this week, if it played.
    pub fn table_for(&self, team_id: &str) -> Option<&str> {
        self.slots
            .iter()
            .find(|s| s.fixture.involves(team_id))
            .and_then(|s| s.table.as_deref())
    }

    /// Slots that received a table.
    pub fn assigned_slots(&self) -> impl Iterator<Item = (&Fixture, &str)> {
        self.slots
            .iter()
            .filter_map(|s| s.table.as_deref().map(|t| (&s.fixture, t)))
    }

    /// Number of fixtures that received a table.
    pub fn assigned_count(&self) -> usize {
        self.assigned_slots().count()
    }
}

/// A week for which no candidate satisfied the hard constraints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfeasibleWeek {
    /// Week number.
    pub week: u32,
    /// Week display label.
    pub label: String,
    /// Fixtures that could not be assigned.
    pub fixtures: Vec<Fixture>,
    /// Table pool at the time of the failure.
    pub tables: Vec<String>,
}

/// Cumulative per-team, per-table usage counts.
///
/// Rows follow directory team order; columns follow canonical table order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageTable {
    /// Table ids (column order).
    pub tables: Vec<String>,
    /// One row per non-bye team.
    pub rows: Vec<UsageRow>,
}

/// Usage counts of one team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageRow {
    /// Team id.
    pub team: String,
    /// Count per table, aligned with [`UsageTable::tables`].
    pub counts: Vec<u32>,
}

impl UsageTable {
    /// Usage of `table` by `team` (0 when either is unknown).
    pub fn get(&self, team: &str, table: &str) -> u32 {
        let Some(col) = self.tables.iter().position(|t| t == table) else {
            return 0;
        };
        self.rows
            .iter()
            .find(|r| r.team == team)
            .and_then(|r| r.counts.get(col).copied())
            .unwrap_or(0)
    }

    /// Total games played by `team`.
    pub fn total_for(&self, team: &str) -> u32 {
        self.rows
            .iter()
            .find(|r| r.team == team)
            .map(|r| r.counts.iter().sum())
            .unwrap_or(0)
    }
}

/// Result of running the engine over a timeline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineAssignment {
    /// Resolved weeks, in timeline order.
    pub weeks: Vec<WeekAssignment>,
    /// Usage counts after the last resolved week.
    pub usage: UsageTable,
    /// The week that stopped the run, if any.
    pub failure: Option<InfeasibleWeek>,
}

impl TimelineAssignment {
    /// Whether every week was resolved.
    pub fn is_complete(&self) -> bool {
        self.failure.is_none()
    }

    /// Finds the assignment for a week number.
    pub fn week(&self, number: u32) -> Option<&WeekAssignment> {
        self.weeks.iter().find(|w| w.week == number)
    }

    /// Total fixtures that received a table.
    pub fn assigned_count(&self) -> usize {
        self.weeks.iter().map(|w| w.assigned_count()).sum()
    }

    /// Converts a recorded failure into an error, keeping `self` intact.
    pub fn check(&self) -> Result<(), AssignError> {
        match &self.failure {
            None => Ok(()),
            Some(failure) => Err(AssignError::infeasible(failure)),
        }
    }
}
