//! Table usage ledger.
//!
//! Tracks, for every non-bye team, how often it has played on each table and
//! the chronological list of tables it was assigned. The ledger is the only
//! mutable state of a run: it has a single owner (the timeline run), is read
//! through shared borrows during a week's search, and changes only through
//! [`ResourceLedger::commit`] once per resolved week. History is never removed.
//!
//! Teams and tables are interned to dense indices so that usage lookups are
//! plain array reads.

use std::collections::HashMap;

use tracing::warn;

use crate::models::{Directory, UsageRow, UsageTable, WeekAssignment};

/// Per-team, per-table usage counts and per-team table history.
#[derive(Debug, Clone)]
pub struct ResourceLedger {
    tables: Vec<String>,
    table_index: HashMap<String, usize>,
    teams: Vec<String>,
    team_index: HashMap<String, usize>,
    /// `usage[team][table]`, monotonic.
    usage: Vec<Vec<u32>>,
    /// `history[team]` in commit order.
    history: Vec<Vec<usize>>,
    committed_weeks: usize,
}

impl ResourceLedger {
    /// Creates an empty ledger for the directory's tables and non-bye teams.
    pub fn new(directory: &Directory) -> Self {
        let tables: Vec<String> = directory.tables.iter().map(|t| t.id.clone()).collect();
        let teams: Vec<String> = directory.non_bye_teams().map(|t| t.id.clone()).collect();
        let table_index = tables
            .iter()
            .enumerate()
            .map(|(i, id)| (id.clone(), i))
            .collect();
        let team_index = teams
            .iter()
            .enumerate()
            .map(|(i, id)| (id.clone(), i))
            .collect();
        Self {
            usage: vec![vec![0; tables.len()]; teams.len()],
            history: vec![Vec::new(); teams.len()],
            tables,
            table_index,
            teams,
            team_index,
            committed_weeks: 0,
        }
    }

    /// Table ids in canonical order.
    pub fn tables(&self) -> &[String] {
        &self.tables
    }

    /// Tracked (non-bye) team ids in directory order.
    pub fn teams(&self) -> &[String] {
        &self.teams
    }

    /// Number of weeks committed so far.
    pub fn committed_weeks(&self) -> usize {
        self.committed_weeks
    }

    /// Times `team` has played on `table`. Unknown or bye teams report 0.
    pub fn usage_of(&self, team: &str, table: &str) -> u32 {
        match (self.team_index.get(team), self.table_index.get(table)) {
            (Some(&p), Some(&r)) => self.usage[p][r],
            _ => 0,
        }
    }

    /// Most recent table `team` was assigned, across all weeks so far.
    pub fn recent_table_of(&self, team: &str) -> Option<&str> {
        let p = *self.team_index.get(team)?;
        self.history[p].last().map(|&r| self.tables[r].as_str())
    }

    /// Tables of the team's last `window` plays, most recent last.
    pub fn recent_tables_of(&self, team: &str, window: usize) -> Vec<&str> {
        match self.team_index.get(team) {
            Some(&p) => self
                .recent_indices(p, window)
                .iter()
                .map(|&r| self.tables[r].as_str())
                .collect(),
            None => Vec::new(),
        }
    }

    /// Full chronological table history of `team`.
    pub fn history_of(&self, team: &str) -> Vec<&str> {
        match self.team_index.get(team) {
            Some(&p) => self.history[p]
                .iter()
                .map(|&r| self.tables[r].as_str())
                .collect(),
            None => Vec::new(),
        }
    }

    /// Tables `team` has used the least (all ties included), in canonical order.
    pub fn least_used_tables(&self, team: &str) -> Vec<&str> {
        let Some(&p) = self.team_index.get(team) else {
            return Vec::new();
        };
        let min = self.min_usage(p);
        self.usage[p]
            .iter()
            .enumerate()
            .filter(|&(_, &u)| u == min)
            .map(|(r, _)| self.tables[r].as_str())
            .collect()
    }

    /// Records a resolved week.
    ///
    /// For every slot with a table, both teams' usage on that table is
    /// incremented and the table is appended to their history. Bye slots are
    /// skipped.
    pub fn commit(&mut self, week: &WeekAssignment) {
        for (fixture, table) in week.assigned_slots() {
            let Some(&r) = self.table_index.get(table) else {
                warn!(week = week.week, table, "ignoring commit to unknown table");
                continue;
            };
            for team in fixture.teams() {
                if let Some(&p) = self.team_index.get(team) {
                    self.usage[p][r] += 1;
                    self.history[p].push(r);
                }
            }
        }
        self.committed_weeks += 1;
    }

    /// Snapshot of all usage counts.
    pub fn usage_table(&self) -> UsageTable {
        UsageTable {
            tables: self.tables.clone(),
            rows: self
                .teams
                .iter()
                .zip(&self.usage)
                .map(|(team, counts)| UsageRow {
                    team: team.clone(),
                    counts: counts.clone(),
                })
                .collect(),
        }
    }

    // Index-level accessors for the scheduler.

    pub(crate) fn table_count(&self) -> usize {
        self.tables.len()
    }

    pub(crate) fn team_idx(&self, team: &str) -> Option<usize> {
        self.team_index.get(team).copied()
    }

    pub(crate) fn usage_at(&self, team: usize, table: usize) -> u32 {
        self.usage[team][table]
    }

    pub(crate) fn min_usage(&self, team: usize) -> u32 {
        self.usage[team].iter().copied().min().unwrap_or(0)
    }

    /// Usage counts of every tracked team on one table.
    pub(crate) fn table_column(&self, table: usize) -> impl Iterator<Item = u32> + '_ {
        self.usage.iter().map(move |row| row[table])
    }

    pub(crate) fn recent_indices(&self, team: usize, window: usize) -> &[usize] {
        let h = &self.history[team];
        &h[h.len().saturating_sub(window)..]
    }
}
