//! Fairness scoring.
//!
//! Every fixture-to-table pairing of a candidate earns a [`ScoreKey`]; the
//! candidate's key is the component-wise sum over its fixtures. Lower is
//! better and keys compare lexicographically: penalty, then spread, then
//! usage.
//!
//! # Penalty terms
//!
//! | Term | Applies when | Amount |
//! |------|--------------|--------|
//! | Least-used | table is not among a team's least-used tables | `least_used` per team |
//! | Spread | max - min usage on the table (after the fixture) > `spread_bound` | `spread × weight` |
//! | Deviation | a team's usage of the table (after the fixture) strays from the ideal by > `deviation_bound` | `deviation × weight` per team |
//!
//! Spread and deviation are taken over every non-bye team of the directory
//! and measured as if only this fixture were added to the ledger. They never
//! see other fixtures of the same candidate, so each term depends only on
//! `(fixture, table)`.
//!
//! # Reference
//! Usage-balancing round-robin venue assignment; cf. de Werra (1988),
//! "Some models of graphs for scheduling sports competitions".

use std::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};

use crate::config::{AssignerConfig, ScoreWeights};
use crate::ledger::ResourceLedger;
use crate::models::{Fixture, FixtureSlot};

/// Ranking key of a candidate or of one fixture within it.
///
/// Field order is the comparison order. Addition saturates, so oversized
/// weights rank as "worst" instead of wrapping.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct ScoreKey {
    /// Weighted fairness penalty.
    pub penalty: u64,
    /// Hypothetical table spread.
    pub spread: u64,
    /// Hypothetical total usage of the table.
    pub usage: u64,
}

impl Add for ScoreKey {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            penalty: self.penalty.saturating_add(rhs.penalty),
            spread: self.spread.saturating_add(rhs.spread),
            usage: self.usage.saturating_add(rhs.usage),
        }
    }
}

impl AddAssign for ScoreKey {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

/// Scores candidates against the ledger.
#[derive(Debug, Clone, Copy)]
pub struct FairnessScorer {
    weights: ScoreWeights,
    spread_bound: u32,
    deviation_bound: u32,
    ideal_usage: u32,
}

impl FairnessScorer {
    /// Creates a scorer for a run whose ideal per-table usage is `ideal_usage`.
    pub fn new(config: &AssignerConfig, ideal_usage: u32) -> Self {
        Self {
            weights: config.weights,
            spread_bound: config.spread_bound,
            deviation_bound: config.deviation_bound,
            ideal_usage,
        }
    }

    /// The ideal usage deviation is measured against.
    pub fn ideal_usage(&self) -> u32 {
        self.ideal_usage
    }

    /// Scores a full candidate. Slots without a table contribute nothing.
    pub fn score(&self, slots: &[FixtureSlot], ledger: &ResourceLedger) -> ScoreKey {
        slots
            .iter()
            .filter_map(|s| {
                s.table
                    .as_deref()
                    .map(|t| self.score_fixture(ledger, &s.fixture, t))
            })
            .fold(ScoreKey::default(), Add::add)
    }

    /// Scores placing one fixture on `table`. An unknown table scores zero.
    pub fn score_fixture(
        &self,
        ledger: &ResourceLedger,
        fixture: &Fixture,
        table: &str,
    ) -> ScoreKey {
        let Some(r) = ledger.tables().iter().position(|t| t == table) else {
            return ScoreKey::default();
        };
        let teams = fixture.teams().map(|t| ledger.team_idx(t));
        self.score_at(ledger, &teams, r)
    }

    pub(crate) fn score_at(
        &self,
        ledger: &ResourceLedger,
        teams: &[Option<usize>; 2],
        table: usize,
    ) -> ScoreKey {
        let mut penalty = 0u64;

        for &p in teams.iter().flatten() {
            if ledger.usage_at(p, table) != ledger.min_usage(p) {
                penalty = penalty.saturating_add(self.weights.least_used);
            }
        }

        let mut bounds: Option<(u32, u32)> = None;
        let mut usage = 0u64;
        for (p, u) in ledger.table_column(table).enumerate() {
            let after = if teams.contains(&Some(p)) { u + 1 } else { u };
            usage += u64::from(after);
            bounds = Some(match bounds {
                Some((lo, hi)) => (lo.min(after), hi.max(after)),
                None => (after, after),
            });

            let deviation = after.abs_diff(self.ideal_usage);
            if deviation > self.deviation_bound {
                penalty = penalty
                    .saturating_add(u64::from(deviation).saturating_mul(self.weights.deviation));
            }
        }

        let spread = bounds.map_or(0, |(lo, hi)| hi - lo);
        if spread > self.spread_bound {
            penalty = penalty.saturating_add(u64::from(spread).saturating_mul(self.weights.spread));
        }

        ScoreKey {
            penalty,
            spread: u64::from(spread),
            usage,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Directory, Team, WeekAssignment};

    fn directory() -> Directory {
        Directory::new()
            .with_tables(["A", "B"])
            .with_teams(["1", "2", "3", "4"])
    }

    fn score_key(penalty: u64, spread: u64, usage: u64) -> ScoreKey {
        ScoreKey {
            penalty,
            spread,
            usage,
        }
    }

    fn commit(ledger: &mut ResourceLedger, week: u32, slots: &[(&str, &str, &str)]) {
        ledger.commit(&WeekAssignment {
            week,
            label: String::new(),
            slots: slots
                .iter()
                .map(|(h, a, t)| FixtureSlot::assigned(Fixture::new(*h, *a), *t))
                .collect(),
            relaxed: false,
        });
    }

    #[test]
    fn test_key_ordering() {
        let a = score_key(0, 9, 9);
        let b = score_key(1, 0, 0);
        let c = score_key(0, 9, 10);
        assert!(a < b);
        assert!(a < c);
        assert_eq!(a + b, score_key(1, 9, 9));
    }

    #[test]
    fn test_fresh_ledger_scores() {
        let ledger = ResourceLedger::new(&directory());
        let scorer = FairnessScorer::new(&AssignerConfig::default(), 1);
        let key = scorer.score_fixture(&ledger, &Fixture::new("1", "2"), "A");
        // column after: [1, 1, 0, 0]
        assert_eq!(key, score_key(0, 1, 2));
    }

    #[test]
    fn test_least_used_penalty_dominates() {
        let mut ledger = ResourceLedger::new(&directory());
        commit(&mut ledger, 1, &[("1", "2", "A"), ("3", "4", "B")]);
        let config = AssignerConfig::default();
        let scorer = FairnessScorer::new(&config, 1);
        let one_team_off = config.weights.least_used + 2 * config.weights.spread;

        // team 1 already used A, team 3 has not
        let repeat_a = scorer.score_fixture(&ledger, &Fixture::new("1", "3"), "A");
        assert_eq!(repeat_a.penalty, one_team_off);
        assert_eq!(repeat_a.spread, 2);

        // team 3 already used B, team 1 has not
        let repeat_b = scorer.score_fixture(&ledger, &Fixture::new("1", "3"), "B");
        assert_eq!(repeat_b.penalty, one_team_off);

        let ideal = scorer.score_fixture(&ledger, &Fixture::new("3", "4"), "A");
        assert_eq!(ideal, score_key(0, 0, 4));
        assert!(ideal < repeat_a);
    }

    #[test]
    fn test_spread_and_deviation_terms() {
        let mut ledger = ResourceLedger::new(&directory());
        commit(&mut ledger, 1, &[("1", "2", "A")]);
        commit(&mut ledger, 2, &[("1", "3", "A")]);
        let config = AssignerConfig::default();
        let scorer = FairnessScorer::new(&config, 1);

        // column A after: [3, 1, 1, 1] -> spread 2, team 1 deviates by 2
        let key = scorer.score_fixture(&ledger, &Fixture::new("1", "4"), "A");
        let expected = config.weights.least_used
            + 2 * config.weights.spread
            + 2 * config.weights.deviation;
        assert_eq!(key.penalty, expected);
        assert_eq!(key.spread, 2);
        assert_eq!(key.usage, 6);
    }

    #[test]
    fn test_bye_team_ignored() {
        let directory = Directory::new()
            .with_tables(["A", "B"])
            .with_teams(["1", "2", "3"])
            .with_team(Team::bye("4"));
        let ledger = ResourceLedger::new(&directory);
        let scorer = FairnessScorer::new(&AssignerConfig::default(), 1);
        let key = scorer.score_fixture(&ledger, &Fixture::new("1", "4"), "A");
        assert_eq!(key, score_key(0, 1, 1));
    }

    #[test]
    fn test_candidate_score_sums_fixtures() {
        let ledger = ResourceLedger::new(&directory());
        let scorer = FairnessScorer::new(&AssignerConfig::default(), 1);
        let slots = vec![
            FixtureSlot::assigned(Fixture::new("1", "2"), "A"),
            FixtureSlot::assigned(Fixture::new("3", "4"), "B"),
            FixtureSlot::unassigned(Fixture::new("5", "6")),
        ];
        assert_eq!(scorer.score(&slots, &ledger), score_key(0, 2, 4));
    }

    #[test]
    fn test_oversized_weights_saturate() {
        let mut ledger = ResourceLedger::new(&directory());
        commit(&mut ledger, 1, &[("1", "2", "A"), ("3", "4", "B")]);
        let weights = ScoreWeights {
            least_used: u64::MAX / 2 + 1,
            spread: u64::MAX,
            deviation: u64::MAX,
        };
        let config = AssignerConfig::default().with_weights(weights);
        let scorer = FairnessScorer::new(&config, 1);

        // both teams are off their least-used table: two halves overflow
        let both_off = scorer.score_fixture(&ledger, &Fixture::new("1", "2"), "A");
        assert_eq!(both_off.penalty, u64::MAX);

        let fine = scorer.score_fixture(&ledger, &Fixture::new("1", "2"), "B");
        assert!(fine < both_off);
        assert_eq!((both_off + both_off).penalty, u64::MAX);
    }
}
