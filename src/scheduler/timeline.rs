//! Whole-timeline assignment.
//!
//! Validates the directory and timeline, then resolves weeks strictly in
//! timeline order. Each resolved week is committed to the ledger before the
//! next one is searched, so week `n` always sees the history of weeks
//! `1..n`. The first infeasible week ends the run; every week before it is
//! returned as the partial result.

use tracing::{info, warn};

use super::period::{PeriodAssigner, WeekOutcome};
use crate::config::AssignerConfig;
use crate::error::{AssignError, AssignResult};
use crate::ledger::ResourceLedger;
use crate::models::{Directory, Timeline, TimelineAssignment};
use crate::validation::{
    validate_directory, validate_timeline, ValidationError, ValidationErrorKind,
};

/// Assigns tables to every fixture of a timeline.
///
/// # Example
///
/// ```
/// use table_rotation::config::AssignerConfig;
/// use table_rotation::models::{Directory, Timeline, Week};
/// use table_rotation::scheduler::TimelineAssigner;
///
/// let directory = Directory::new()
///     .with_tables(["A", "B"])
///     .with_teams(["1", "2", "3", "4"]);
/// let timeline = Timeline::new()
///     .with_week(Week::new(1, "Jan 7").with_pair("1", "2").with_pair("3", "4"))
///     .with_week(Week::new(2, "Jan 14").with_pair("1", "2").with_pair("3", "4"));
///
/// let result = TimelineAssigner::new(AssignerConfig::default())
///     .assign(&directory, &timeline)
///     .unwrap();
/// assert!(result.is_complete());
/// assert_eq!(result.weeks[1].table_for("1"), Some("B"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct TimelineAssigner {
    config: AssignerConfig,
}

impl TimelineAssigner {
    /// Creates an assigner with the given configuration.
    pub fn new(config: AssignerConfig) -> Self {
        Self { config }
    }

    /// The engine configuration.
    pub fn config(&self) -> &AssignerConfig {
        &self.config
    }

    /// Assigns the timeline starting from an empty ledger.
    pub fn assign(
        &self,
        directory: &Directory,
        timeline: &Timeline,
    ) -> AssignResult<TimelineAssignment> {
        let mut ledger = ResourceLedger::new(directory);
        self.assign_with(directory, timeline, &mut ledger)
    }

    /// Assigns the timeline on top of an existing ledger.
    ///
    /// Useful for continuing a season: the ledger carries the usage and
    /// history of earlier weeks. Ideal usage counts the ledger's committed
    /// weeks together with the new ones.
    ///
    /// # Errors
    ///
    /// - [`AssignError::UnknownParticipant`] if a fixture names a team
    ///   missing from the directory.
    /// - [`AssignError::Configuration`] for every other validation failure,
    ///   including a ledger whose tables differ from the directory's.
    ///
    /// An infeasible week is not an error here; it is reported in
    /// [`TimelineAssignment::failure`] next to the partial result.
    pub fn assign_with(
        &self,
        directory: &Directory,
        timeline: &Timeline,
        ledger: &mut ResourceLedger,
    ) -> AssignResult<TimelineAssignment> {
        if let Err(errors) = validate_timeline(directory, timeline) {
            let (unknown, other): (Vec<_>, Vec<_>) = errors
                .into_iter()
                .partition(|e| e.kind == ValidationErrorKind::UnknownTeam);
            return Err(if unknown.is_empty() {
                AssignError::Configuration(other)
            } else {
                AssignError::UnknownParticipant(unknown)
            });
        }
        validate_directory(directory, timeline).map_err(AssignError::Configuration)?;

        let table_ids = directory.table_ids();
        if !ledger.tables().iter().map(String::as_str).eq(table_ids.iter().copied()) {
            return Err(AssignError::Configuration(vec![ValidationError::new(
                ValidationErrorKind::LedgerMismatch,
                format!(
                    "ledger tables [{}] do not match directory tables [{}]",
                    ledger.tables().join(", "),
                    table_ids.join(", ")
                ),
            )]));
        }

        let total_weeks = ledger.committed_weeks() + timeline.total_weeks();
        let ideal = total_weeks.div_ceil(table_ids.len()) as u32;
        let assigner = PeriodAssigner::new(&self.config, ideal);
        let bye = directory.bye_team();

        info!(
            weeks = timeline.total_weeks(),
            committed = ledger.committed_weeks(),
            tables = directory.tables.len(),
            teams = directory.teams.len(),
            ideal_usage = ideal,
            "assigning tables"
        );

        let mut weeks = Vec::with_capacity(timeline.weeks.len());
        let mut failure = None;

        for week in &timeline.weeks {
            match assigner.resolve(week, ledger, bye) {
                WeekOutcome::Resolved(assignment) => weeks.push(assignment),
                WeekOutcome::Infeasible(infeasible) => {
                    warn!(
                        week = infeasible.week,
                        label = %infeasible.label,
                        resolved = weeks.len(),
                        "stopping at infeasible week"
                    );
                    failure = Some(infeasible);
                    break;
                }
            }
        }

        Ok(TimelineAssignment {
            weeks,
            usage: ledger.usage_table(),
            failure,
        })
    }
}
