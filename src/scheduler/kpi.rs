//! Rotation quality metrics (KPIs).
//!
//! Computes fairness indicators from a finished (or partial) timeline
//! assignment.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Spread (per table) | max - min usage of the table across non-bye teams |
//! | Max deviation | Largest \|usage - ideal\| over all team/table pairs |
//! | Repeats | Consecutive plays by one team on the same table |
//! | Relaxed weeks | Weeks resolved with the no-repeat rule lifted |
//!
//! # Reference
//! Pinedo (2016), "Scheduling", Ch. 1.2: Performance Measures

use crate::models::{Directory, Timeline, TimelineAssignment};

/// Rotation performance indicators.
#[derive(Debug, Clone, PartialEq)]
pub struct RotationKpi {
    /// Weeks resolved.
    pub weeks_resolved: usize,
    /// Fixtures that received a table.
    pub assigned_fixtures: usize,
    /// Fixtures skipped because they involve the bye team.
    pub bye_fixtures: usize,
    /// `ceil(total weeks / total tables)` for the full timeline.
    pub ideal_usage: u32,
    /// Usage spread per table, in canonical table order.
    pub spread_by_table: Vec<(String, u32)>,
    /// Largest per-table spread.
    pub max_spread: u32,
    /// Mean per-table spread.
    pub avg_spread: f64,
    /// Largest deviation of any team's table usage from the ideal.
    pub max_deviation: u32,
    /// Times a team played on the same table in two consecutive plays.
    pub repeat_count: usize,
    /// Weeks resolved under the relaxed policy.
    pub relaxed_weeks: usize,
}

impl RotationKpi {
    /// Computes KPIs for `result`.
    ///
    /// # Arguments
    /// * `result` - The engine output.
    /// * `directory` - Teams and tables the run used.
    /// * `timeline` - The full input timeline (for ideal usage).
    pub fn calculate(
        result: &TimelineAssignment,
        directory: &Directory,
        timeline: &Timeline,
    ) -> Self {
        let ideal_usage = timeline.ideal_usage(directory.tables.len());
        let usage = &result.usage;

        let spread_by_table: Vec<(String, u32)> = usage
            .tables
            .iter()
            .enumerate()
            .map(|(col, table)| {
                let column = usage.rows.iter().map(|r| r.counts[col]);
                let spread = match (column.clone().min(), column.max()) {
                    (Some(lo), Some(hi)) => hi - lo,
                    _ => 0,
                };
                (table.clone(), spread)
            })
            .collect();

        let max_spread = spread_by_table.iter().map(|(_, s)| *s).max().unwrap_or(0);
        let avg_spread = if spread_by_table.is_empty() {
            0.0
        } else {
            let sum: u32 = spread_by_table.iter().map(|(_, s)| s).sum();
            sum as f64 / spread_by_table.len() as f64
        };

        let max_deviation = usage
            .rows
            .iter()
            .flat_map(|r| r.counts.iter())
            .map(|&u| u.abs_diff(ideal_usage))
            .max()
            .unwrap_or(0);

        let mut repeat_count = 0;
        for team in directory.non_bye_teams() {
            let mut previous: Option<&str> = None;
            for week in &result.weeks {
                if let Some(table) = week.table_for(&team.id) {
                    if previous == Some(table) {
                        repeat_count += 1;
                    }
                    previous = Some(table);
                }
            }
        }

        let assigned_fixtures = result.assigned_count();
        let total_fixtures: usize = result.weeks.iter().map(|w| w.slots.len()).sum();

        Self {
            weeks_resolved: result.weeks.len(),
            assigned_fixtures,
            bye_fixtures: total_fixtures - assigned_fixtures,
            ideal_usage,
            spread_by_table,
            max_spread,
            avg_spread,
            max_deviation,
            repeat_count,
            relaxed_weeks: result.weeks.iter().filter(|w| w.relaxed).count(),
        }
    }

    /// Whether every table's spread stays within `bound`.
    pub fn meets_spread_bound(&self, bound: u32) -> bool {
        self.max_spread <= bound
    }
}
