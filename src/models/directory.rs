//! Table and team directory.
//!
//! The directory is the typed, validated form of a division's configuration.
//! It is resolved once at load time; the engine only reads it through the
//! accessors below and never touches raw configuration.

use serde::{Deserialize, Serialize};

use super::{Table, Team};

/// Tables and teams for one division, in configuration order.
///
/// Table order is the canonical tie-break order used by the engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Directory {
    /// Table pool in canonical order.
    pub tables: Vec<Table>,
    /// Teams, including the bye placeholder if one exists.
    pub teams: Vec<Team>,
}

impl Directory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a table.
    pub fn with_table(mut self, table: Table) -> Self {
        self.tables.push(table);
        self
    }

    /// Adds tables by id.
    pub fn with_tables<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tables.extend(ids.into_iter().map(Table::new));
        self
    }

    /// Adds a team.
    pub fn with_team(mut self, team: Team) -> Self {
        self.teams.push(team);
        self
    }

    /// Adds regular teams by id.
    pub fn with_teams<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.teams.extend(ids.into_iter().map(Team::new));
        self
    }

    /// Id of the bye team, if one is configured.
    pub fn bye_team(&self) -> Option<&str> {
        self.teams.iter().find(|t| t.is_bye).map(|t| t.id.as_str())
    }

    /// Teams that take part in balance accounting.
    pub fn non_bye_teams(&self) -> impl Iterator<Item = &Team> {
        self.teams.iter().filter(|t| !t.is_bye)
    }

    /// Looks up a team by id.
    pub fn team(&self, id: &str) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == id)
    }

    /// Whether a team id is known.
    pub fn has_team(&self, id: &str) -> bool {
        self.team(id).is_some()
    }

    /// Display name for a team, falling back to the id.
    pub fn team_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.team(id).map(|t| t.name.as_str()).unwrap_or(id)
    }

    /// Display label for a table, falling back to the id.
    pub fn table_label<'a>(&'a self, id: &'a str) -> &'a str {
        self.tables
            .iter()
            .find(|t| t.id == id)
            .map(|t| t.label.as_str())
            .unwrap_or(id)
    }

    /// Table ids in canonical order.
    pub fn table_ids(&self) -> Vec<&str> {
        self.tables.iter().map(|t| t.id.as_str()).collect()
    }
}
