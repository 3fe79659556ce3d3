//! Engine configuration.
//!
//! All knobs of the assignment engine live in [`AssignerConfig`]. Every field
//! has a default, so a partial JSON object (or none at all) is a valid
//! configuration.

use serde::{Deserialize, Serialize};

/// Weights of the fairness penalty terms.
///
/// `least_used` must dominate the other two so that a team's least-used
/// tables are exhausted before any table is reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    /// Added per team when the candidate table is not among its least-used tables.
    pub least_used: u64,
    /// Multiplier for a table's usage spread above the spread bound.
    pub spread: u64,
    /// Multiplier for a team's deviation from ideal usage above the deviation bound.
    pub deviation: u64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            least_used: 1_000,
            spread: 10,
            deviation: 5,
        }
    }
}

/// How candidate assignments for a week are searched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStrategy {
    /// Every feasible table permutation is scored.
    Exhaustive,
    /// Fixtures pick their best remaining table one at a time.
    ///
    /// Bounded running time, but may report a week infeasible that an
    /// exhaustive search would resolve.
    Greedy,
    /// Branch and bound limited to `max_nodes` search nodes per week.
    ///
    /// A search that hits the limit keeps the best candidate found so far.
    /// If it found none, the week falls back to greedy.
    Auto { max_nodes: u64 },
}

impl Default for SearchStrategy {
    fn default() -> Self {
        Self::Auto {
            max_nodes: 2_000_000,
        }
    }
}

/// How exact score ties between candidates are broken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// Canonical directory table order: the first fixture gets the earliest table.
    #[default]
    TableOrder,
    /// Table order is shuffled per week by a generator seeded from
    /// `(seed, week number)`. Same seed, same result.
    Seeded(u64),
}

/// What to do when a week has no candidate satisfying the hard constraints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InfeasiblePolicy {
    /// Stop and return the weeks resolved so far together with the failure.
    #[default]
    Abort,
    /// Re-search the week with only table exclusivity enforced, log a
    /// warning, and flag the week as relaxed.
    RelaxRepeat,
}

/// Configuration of the assignment engine.
///
/// # Example
///
/// ```
/// use table_rotation::config::{AssignerConfig, SearchStrategy, TieBreak};
///
/// let config = AssignerConfig::new()
///     .with_strategy(SearchStrategy::Exhaustive)
///     .with_tie_break(TieBreak::Seeded(7))
///     .with_repeat_window(2);
/// assert_eq!(config.repeat_window, 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssignerConfig {
    /// Penalty weights.
    pub weights: ScoreWeights,
    /// Table spread above this bound is penalized.
    pub spread_bound: u32,
    /// Deviation from ideal usage above this bound is penalized.
    pub deviation_bound: u32,
    /// How many of a team's most recent plays bar their tables.
    /// 1 forbids only an immediate repeat.
    pub repeat_window: usize,
    /// Candidate search strategy.
    pub strategy: SearchStrategy,
    /// Tie-break rule.
    pub tie_break: TieBreak,
    /// Infeasibility policy.
    pub on_infeasible: InfeasiblePolicy,
}

impl Default for AssignerConfig {
    fn default() -> Self {
        Self {
            weights: ScoreWeights::default(),
            spread_bound: 1,
            deviation_bound: 1,
            repeat_window: 1,
            strategy: SearchStrategy::default(),
            tie_break: TieBreak::default(),
            on_infeasible: InfeasiblePolicy::default(),
        }
    }
}

impl AssignerConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the penalty weights.
    pub fn with_weights(mut self, weights: ScoreWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Sets the spread bound.
    pub fn with_spread_bound(mut self, bound: u32) -> Self {
        self.spread_bound = bound;
        self
    }

    /// Sets the deviation bound.
    pub fn with_deviation_bound(mut self, bound: u32) -> Self {
        self.deviation_bound = bound;
        self
    }

    /// Sets the no-repeat window (clamped to at least 1).
    pub fn with_repeat_window(mut self, window: usize) -> Self {
        self.repeat_window = window.max(1);
        self
    }

    /// Sets the search strategy.
    pub fn with_strategy(mut self, strategy: SearchStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Sets the tie-break rule.
    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    /// Sets the infeasibility policy.
    pub fn with_infeasible_policy(mut self, policy: InfeasiblePolicy) -> Self {
        self.on_infeasible = policy;
        self
    }
}
