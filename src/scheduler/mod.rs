//! Table assignment engine and KPI evaluation.
//!
//! Assigns a table to every fixture of every week so that no table hosts two
//! fixtures in one week, no team returns to the table it just played on, and
//! each team's table usage stays as even as possible over the season.
//!
//! # Algorithm
//!
//! `TimelineAssigner` walks the weeks in order. For each week,
//! `PeriodAssigner` filters candidates through `ConstraintEvaluator`, ranks
//! the survivors with `FairnessScorer`, and commits the best one to the
//! `ResourceLedger`. Weeks are never revisited: the result is greedy across
//! weeks and optimal (or heuristic, for large weeks) within each week.
//!
//! # KPI
//!
//! `RotationKpi` computes per-table spread, deviation from ideal usage, and
//! repeat counts for a finished run.
//!
//! # References
//!
//! - de Werra (1988), "Some models of graphs for scheduling sports competitions"
//! - Horowitz & Sahni (1978), "Fundamentals of Computer Algorithms", Ch. 7

mod constraint;
mod kpi;
mod period;
mod scoring;
mod timeline;

pub use constraint::ConstraintEvaluator;
pub use kpi::RotationKpi;
pub use period::{PeriodAssigner, WeekOutcome, WeekState};
pub use scoring::{FairnessScorer, ScoreKey};
pub use timeline::TimelineAssigner;
