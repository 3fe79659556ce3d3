//! League configuration file.
//!
//! JSON keyed by league id, then division id:
//!
//! ```json
//! {
//!   "787": {
//!     "705": {
//!       "table_ids": [1, 2, 3],
//!       "table_values": ["1-2", "3-4", "5-6"],
//!       "team_ids": [1, 2, 3, 4, 5, 6],
//!       "team_values": ["Aces", "Breakers", "Cues", "Dragons", "Eights", "Bye"],
//!       "bye_team_id": 6,
//!       "engine": { "repeat_window": 1 }
//!     }
//!   }
//! }
//! ```
//!
//! Ids may be numbers or strings. `*_values` are optional display names and,
//! when present, must pair one-to-one with the ids. Without `bye_team_id`, a
//! team named "bye" (any case) is the bye.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::AssignerConfig;
use crate::error::{InputError, InputResult};
use crate::models::{Directory, Table, Team};

/// A team or table id as written in the config.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawId", into = "String")]
pub struct ConfigId(pub String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(u64),
    Text(String),
}

impl From<RawId> for ConfigId {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Number(n) => Self(n.to_string()),
            RawId::Text(s) => Self(s),
        }
    }
}

impl From<ConfigId> for String {
    fn from(id: ConfigId) -> Self {
        id.0
    }
}

/// Tables, teams and engine settings of one division.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DivisionConfig {
    pub table_ids: Vec<ConfigId>,
    #[serde(default)]
    pub table_values: Vec<String>,
    pub team_ids: Vec<ConfigId>,
    #[serde(default)]
    pub team_values: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bye_team_id: Option<ConfigId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engine: Option<AssignerConfig>,
}

impl DivisionConfig {
    /// Resolves the division into a typed directory.
    pub fn directory(&self) -> InputResult<Directory> {
        let table_labels = labels("table", &self.table_ids, &self.table_values)?;
        let team_names = labels("team", &self.team_ids, &self.team_values)?;

        let bye = match &self.bye_team_id {
            Some(id) => {
                if !self.team_ids.contains(id) {
                    return Err(InputError::MismatchedConfig(format!(
                        "bye_team_id {} is not listed in team_ids",
                        id.0
                    )));
                }
                Some(id.0.as_str())
            }
            None => self
                .team_ids
                .iter()
                .zip(&team_names)
                .find(|(_, name)| name.eq_ignore_ascii_case("bye"))
                .map(|(id, _)| id.0.as_str()),
        };

        let tables = self
            .table_ids
            .iter()
            .zip(table_labels)
            .map(|(id, label)| Table::new(id.0.as_str()).with_label(label))
            .collect();
        let teams = self
            .team_ids
            .iter()
            .zip(team_names)
            .map(|(id, name)| {
                let team = Team::new(id.0.as_str()).with_name(name);
                if bye == Some(id.0.as_str()) {
                    team.as_bye()
                } else {
                    team
                }
            })
            .collect();

        Ok(Directory { tables, teams })
    }

    /// Engine settings, defaulted when the division has none.
    pub fn engine_config(&self) -> AssignerConfig {
        self.engine.clone().unwrap_or_default()
    }
}

fn labels(kind: &str, ids: &[ConfigId], values: &[String]) -> InputResult<Vec<String>> {
    if values.is_empty() {
        return Ok(ids.iter().map(|id| id.0.clone()).collect());
    }
    if values.len() != ids.len() {
        return Err(InputError::MismatchedConfig(format!(
            "{} {kind}_ids but {} {kind}_values",
            ids.len(),
            values.len()
        )));
    }
    Ok(values.to_vec())
}

/// All leagues and divisions of a config file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LeagueConfig {
    leagues: BTreeMap<String, BTreeMap<String, DivisionConfig>>,
}

impl LeagueConfig {
    /// Loads a config file.
    pub fn from_file(path: &Path) -> InputResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| InputError::io(path, e))?;
        Self::from_json(&content)
    }

    /// Parses config JSON.
    pub fn from_json(content: &str) -> InputResult<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Looks up one division.
    pub fn division(&self, league: &str, division: &str) -> InputResult<&DivisionConfig> {
        let divisions = self
            .leagues
            .get(league)
            .ok_or_else(|| InputError::MissingLeague(league.to_string()))?;
        divisions
            .get(division)
            .ok_or_else(|| InputError::MissingDivision {
                league: league.to_string(),
                division: division.to_string(),
            })
    }
}
