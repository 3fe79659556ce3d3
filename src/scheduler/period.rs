//! Per-week table assignment.
//!
//! Resolves one week as a unit. A week moves through
//! `Pending -> Searching -> Resolved | Infeasible`:
//!
//! 1. Bye fixtures are set aside; they never receive a table.
//! 2. Each remaining fixture/table pairing is checked against the hard
//!    constraints and scored once, against the ledger as it stood before
//!    the week.
//! 3. Candidates (injective fixture → table maps) are searched and the one
//!    with the smallest [`ScoreKey`] wins. Ties go to the candidate found
//!    first in table enumeration order.
//!
//! # Search
//!
//! - **Exhaustive**: depth-first over table permutations in enumeration
//!   order. A branch is cut as soon as its partial key reaches the best
//!   complete key, since every term is non-negative.
//! - **Greedy**: fixtures in schedule order each take their best remaining
//!   feasible table. No backtracking.
//! - **Auto**: exhaustive search capped at a node budget. Hitting the cap
//!   keeps the best candidate found so far, or falls back to greedy when
//!   there is none yet.
//!
//! # Reference
//! Horowitz & Sahni (1978), "Fundamentals of Computer Algorithms", Ch. 7:
//! Branch-and-Bound

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::{debug, info, warn};

use super::constraint::ConstraintEvaluator;
use super::scoring::{FairnessScorer, ScoreKey};
use crate::config::{AssignerConfig, InfeasiblePolicy, SearchStrategy, TieBreak};
use crate::ledger::ResourceLedger;
use crate::models::{FixtureSlot, InfeasibleWeek, Week, WeekAssignment};

/// State of a week within a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeekState {
    /// Not yet reached.
    Pending,
    /// Candidates are being enumerated.
    Searching,
    /// A candidate was selected and committed.
    Resolved,
    /// No candidate satisfied the hard constraints.
    Infeasible,
}

/// Terminal result of resolving a week.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WeekOutcome {
    /// The chosen assignment.
    Resolved(WeekAssignment),
    /// The week that could not be resolved.
    Infeasible(InfeasibleWeek),
}

impl WeekOutcome {
    /// The terminal state this outcome represents.
    pub fn state(&self) -> WeekState {
        match self {
            Self::Resolved(_) => WeekState::Resolved,
            Self::Infeasible(_) => WeekState::Infeasible,
        }
    }
}

/// Search strategy actually run for a week after resolving `Auto`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Exhaustive,
    Greedy,
    Bounded(u64),
}

/// Precomputed per-week search input.
struct WeekProblem {
    /// `keys[fixture][table]`.
    keys: Vec<Vec<ScoreKey>>,
    /// Table indices in enumeration order.
    order: Vec<usize>,
}

#[derive(Debug, Default)]
struct SearchStats {
    limit: Option<u64>,
    nodes: u64,
    pruned: u64,
    improvements: u64,
    exhausted: bool,
}

/// Resolves single weeks against a ledger.
#[derive(Debug, Clone)]
pub struct PeriodAssigner {
    config: AssignerConfig,
    evaluator: ConstraintEvaluator,
    scorer: FairnessScorer,
}

impl PeriodAssigner {
    /// Creates an assigner for a run whose ideal per-table usage is `ideal_usage`.
    pub fn new(config: &AssignerConfig, ideal_usage: u32) -> Self {
        Self {
            config: config.clone(),
            evaluator: ConstraintEvaluator::new(config.repeat_window),
            scorer: FairnessScorer::new(config, ideal_usage),
        }
    }

    /// The scorer used to rank candidates.
    pub fn scorer(&self) -> &FairnessScorer {
        &self.scorer
    }

    /// Resolves `week` and commits the result to `ledger`.
    ///
    /// The ledger is left untouched when the week is infeasible.
    pub fn resolve(
        &self,
        week: &Week,
        ledger: &mut ResourceLedger,
        bye_team: Option<&str>,
    ) -> WeekOutcome {
        let outcome = self.search(week, ledger, bye_team);
        if let WeekOutcome::Resolved(assignment) = &outcome {
            ledger.commit(assignment);
        }
        outcome
    }

    /// Finds the best assignment for `week` without modifying the ledger.
    pub fn search(
        &self,
        week: &Week,
        ledger: &ResourceLedger,
        bye_team: Option<&str>,
    ) -> WeekOutcome {
        let playable: Vec<usize> = week
            .fixtures
            .iter()
            .enumerate()
            .filter(|(_, f)| !f.has_bye(bye_team))
            .map(|(i, _)| i)
            .collect();
        let teams: Vec<[Option<usize>; 2]> = playable
            .iter()
            .map(|&i| week.fixtures[i].teams().map(|t| ledger.team_idx(t)))
            .collect();

        let problem = WeekProblem {
            keys: teams
                .iter()
                .map(|t| {
                    (0..ledger.table_count())
                        .map(|r| self.scorer.score_at(ledger, t, r))
                        .collect()
                })
                .collect(),
            order: self.table_order(week.number, ledger.table_count()),
        };
        let mode = self.mode();

        debug!(
            week = week.number,
            fixtures = playable.len(),
            tables = ledger.table_count(),
            ?mode,
            state = ?WeekState::Searching,
            "searching"
        );

        let mut relaxed = false;
        let mut choice = self.run(&problem, &self.allowed(ledger, &teams, &self.evaluator), mode);

        if choice.is_none() && self.config.on_infeasible == InfeasiblePolicy::RelaxRepeat {
            warn!(
                week = week.number,
                label = %week.label,
                "no assignment avoids a repeat; relaxing the no-repeat rule"
            );
            let exclusive = ConstraintEvaluator::exclusivity_only();
            choice = self.run(&problem, &self.allowed(ledger, &teams, &exclusive), mode);
            relaxed = true;
        }

        let Some((key, tables)) = choice else {
            info!(week = week.number, label = %week.label, "week is infeasible");
            return WeekOutcome::Infeasible(InfeasibleWeek {
                week: week.number,
                label: week.label.clone(),
                fixtures: playable.iter().map(|&i| week.fixtures[i].clone()).collect(),
                tables: ledger.tables().to_vec(),
            });
        };

        let mut slots: Vec<FixtureSlot> = week
            .fixtures
            .iter()
            .cloned()
            .map(FixtureSlot::unassigned)
            .collect();
        for (&i, &r) in playable.iter().zip(&tables) {
            slots[i].table = Some(ledger.tables()[r].clone());
        }

        info!(week = week.number, label = %week.label, ?key, relaxed, "resolved");
        WeekOutcome::Resolved(WeekAssignment {
            week: week.number,
            label: week.label.clone(),
            slots,
            relaxed,
        })
    }

    fn mode(&self) -> Mode {
        match self.config.strategy {
            SearchStrategy::Exhaustive => Mode::Exhaustive,
            SearchStrategy::Greedy => Mode::Greedy,
            SearchStrategy::Auto { max_nodes } => Mode::Bounded(max_nodes),
        }
    }

    fn table_order(&self, week: u32, tables: usize) -> Vec<usize> {
        let mut order: Vec<usize> = (0..tables).collect();
        if let TieBreak::Seeded(seed) = self.config.tie_break {
            let mut rng = StdRng::seed_from_u64(seed ^ u64::from(week));
            order.shuffle(&mut rng);
        }
        order
    }

    fn allowed(
        &self,
        ledger: &ResourceLedger,
        teams: &[[Option<usize>; 2]],
        evaluator: &ConstraintEvaluator,
    ) -> Vec<Vec<bool>> {
        teams
            .iter()
            .map(|t| {
                (0..ledger.table_count())
                    .map(|r| evaluator.allows(ledger, t, r))
                    .collect()
            })
            .collect()
    }

    fn run(
        &self,
        problem: &WeekProblem,
        allowed: &[Vec<bool>],
        mode: Mode,
    ) -> Option<(ScoreKey, Vec<usize>)> {
        let limit = match mode {
            Mode::Greedy => return greedy(problem, allowed),
            Mode::Exhaustive => None,
            Mode::Bounded(max_nodes) => Some(max_nodes),
        };

        let mut stats = SearchStats {
            limit,
            ..SearchStats::default()
        };
        let mut best = None;
        let mut used = vec![false; problem.order.len()];
        let mut current = Vec::with_capacity(problem.keys.len());
        branch(
            problem,
            allowed,
            &mut used,
            &mut current,
            ScoreKey::default(),
            &mut best,
            &mut stats,
        );
        debug!(
            nodes = stats.nodes,
            pruned = stats.pruned,
            improvements = stats.improvements,
            exhausted = stats.exhausted,
            "branch and bound finished"
        );

        if stats.exhausted && best.is_none() {
            warn!(nodes = stats.nodes, "node budget spent without a candidate; trying greedy");
            return greedy(problem, allowed);
        }
        best
    }
}

/// Depth-first branch and bound over injective fixture → table maps.
fn branch(
    problem: &WeekProblem,
    allowed: &[Vec<bool>],
    used: &mut [bool],
    current: &mut Vec<usize>,
    partial: ScoreKey,
    best: &mut Option<(ScoreKey, Vec<usize>)>,
    stats: &mut SearchStats,
) {
    if stats.limit.is_some_and(|limit| stats.nodes >= limit) {
        stats.exhausted = true;
        return;
    }
    stats.nodes += 1;
    if let Some((bound, _)) = best {
        if partial >= *bound {
            stats.pruned += 1;
            return;
        }
    }

    let e = current.len();
    if e == problem.keys.len() {
        stats.improvements += 1;
        *best = Some((partial, current.clone()));
        return;
    }

    for &r in &problem.order {
        if used[r] || !allowed[e][r] {
            continue;
        }
        used[r] = true;
        current.push(r);
        branch(
            problem,
            allowed,
            used,
            current,
            partial + problem.keys[e][r],
            best,
            stats,
        );
        current.pop();
        used[r] = false;
    }
}

fn greedy(problem: &WeekProblem, allowed: &[Vec<bool>]) -> Option<(ScoreKey, Vec<usize>)> {
    let mut used = vec![false; problem.order.len()];
    let mut total = ScoreKey::default();
    let mut tables = Vec::with_capacity(problem.keys.len());

    for (e, keys) in problem.keys.iter().enumerate() {
        // min_by_key keeps the first minimum, so enumeration order breaks ties
        let r = problem
            .order
            .iter()
            .copied()
            .filter(|&r| !used[r] && allowed[e][r])
            .min_by_key(|&r| keys[r])?;
        used[r] = true;
        total += keys[r];
        tables.push(r);
    }
    Some((total, tables))
}
