//! Hard constraints.
//!
//! A candidate maps a week's playable fixtures to tables. It is feasible when
//! 1. no two fixtures share a table (exclusivity), and
//! 2. no team gets a table it used in its last `repeat_window` plays
//!    (no-immediate-repeat when the window is 1).
//!
//! The bye team is never tracked by the ledger and therefore always passes
//! the repeat check, as does a team with no history yet. Infeasible
//! candidates are rejected outright and never scored.

use std::collections::HashSet;

use crate::ledger::ResourceLedger;
use crate::models::FixtureSlot;

/// Stateless hard-constraint checker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConstraintEvaluator {
    repeat_window: usize,
    enforce_repeat: bool,
}

impl ConstraintEvaluator {
    /// Enforces exclusivity and the no-repeat rule over `repeat_window` plays.
    pub fn new(repeat_window: usize) -> Self {
        Self {
            repeat_window: repeat_window.max(1),
            enforce_repeat: true,
        }
    }

    /// Enforces exclusivity only. Used by the relax-on-infeasible policy.
    pub fn exclusivity_only() -> Self {
        Self {
            repeat_window: 1,
            enforce_repeat: false,
        }
    }

    /// Whether the no-repeat rule is enforced.
    pub fn enforces_repeat(&self) -> bool {
        self.enforce_repeat
    }

    /// Checks a full candidate for one week against the ledger.
    ///
    /// Slots without a table (bye fixtures) are ignored.
    pub fn is_feasible(&self, slots: &[FixtureSlot], ledger: &ResourceLedger) -> bool {
        let mut used: HashSet<&str> = HashSet::new();
        for slot in slots {
            let Some(table) = slot.table.as_deref() else {
                continue;
            };
            if !used.insert(table) {
                return false;
            }
            if self.enforce_repeat
                && slot.fixture.teams().iter().any(|team| {
                    ledger
                        .recent_tables_of(team, self.repeat_window)
                        .contains(&table)
                })
            {
                return false;
            }
        }
        true
    }

    /// Whether `table` may host a fixture between the given tracked teams.
    ///
    /// Exclusivity is the caller's concern; this only applies the repeat rule.
    pub(crate) fn allows(
        &self,
        ledger: &ResourceLedger,
        teams: &[Option<usize>; 2],
        table: usize,
    ) -> bool {
        if !self.enforce_repeat {
            return true;
        }
        teams
            .iter()
            .flatten()
            .all(|&p| !ledger.recent_indices(p, self.repeat_window).contains(&table))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Directory, Fixture, Team, WeekAssignment};

    fn ledger_after_week_one() -> ResourceLedger {
        let directory = Directory::new()
            .with_tables(["A", "B", "C"])
            .with_teams(["1", "2", "3", "4"])
            .with_team(Team::bye("5"))
            .with_teams(["6"]);
        let mut ledger = ResourceLedger::new(&directory);
        ledger.commit(&WeekAssignment {
            week: 1,
            label: "w1".into(),
            slots: vec![
                FixtureSlot::assigned(Fixture::new("1", "2"), "A"),
                FixtureSlot::assigned(Fixture::new("3", "4"), "B"),
                FixtureSlot::unassigned(Fixture::new("5", "6")),
            ],
            relaxed: false,
        });
        ledger
    }

    #[test]
    fn test_exclusivity() {
        let ledger = ledger_after_week_one();
        let eval = ConstraintEvaluator::new(1);
        let slots = vec![
            FixtureSlot::assigned(Fixture::new("1", "3"), "C"),
            FixtureSlot::assigned(Fixture::new("2", "4"), "C"),
        ];
        assert!(!eval.is_feasible(&slots, &ledger));
        assert!(!ConstraintEvaluator::exclusivity_only().is_feasible(&slots, &ledger));
    }

    #[test]
    fn test_no_immediate_repeat() {
        let ledger = ledger_after_week_one();
        let eval = ConstraintEvaluator::new(1);

        let repeat = vec![
            FixtureSlot::assigned(Fixture::new("1", "3"), "A"),
            FixtureSlot::assigned(Fixture::new("2", "4"), "C"),
        ];
        assert!(!eval.is_feasible(&repeat, &ledger));
        assert!(ConstraintEvaluator::exclusivity_only().is_feasible(&repeat, &ledger));

        let fresh = vec![
            FixtureSlot::assigned(Fixture::new("1", "3"), "C"),
            FixtureSlot::assigned(Fixture::new("2", "4"), "A"),
        ];
        // team 2 used A last week
        assert!(!eval.is_feasible(&fresh, &ledger));

        let ok = vec![
            FixtureSlot::assigned(Fixture::new("1", "4"), "C"),
            FixtureSlot::assigned(Fixture::new("2", "3"), "B"),
        ];
        // team 3 used B last week
        assert!(!eval.is_feasible(&ok, &ledger));

        let ok = vec![
            FixtureSlot::assigned(Fixture::new("1", "4"), "C"),
            FixtureSlot::assigned(Fixture::new("2", "6"), "B"),
        ];
        assert!(eval.is_feasible(&ok, &ledger));
    }

    #[test]
    fn test_bye_and_new_teams_pass() {
        let ledger = ledger_after_week_one();
        let eval = ConstraintEvaluator::new(1);
        let slots = vec![
            FixtureSlot::assigned(Fixture::new("6", "5"), "A"),
            FixtureSlot::unassigned(Fixture::new("1", "5")),
        ];
        assert!(eval.is_feasible(&slots, &ledger));
    }

    #[test]
    fn test_index_level_allows() {
        let ledger = ledger_after_week_one();
        let eval = ConstraintEvaluator::new(1);
        let teams = [ledger.team_idx("1"), ledger.team_idx("6")];
        assert!(!eval.allows(&ledger, &teams, 0));
        assert!(eval.allows(&ledger, &teams, 1));
        assert!(eval.allows(&ledger, &teams, 2));
        assert!(ConstraintEvaluator::exclusivity_only().allows(&ledger, &teams, 0));
    }
}
