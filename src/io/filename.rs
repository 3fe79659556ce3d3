//! Schedule file naming.
//!
//! League schedules are named `<league>-<year>-<session>-<division>-<location>-Schedule.csv`,
//! all numeric, e.g. `787-2025-01-705-02-Schedule.csv`. Reports are written
//! next to the schedule under the same prefix.

use std::fmt;
use std::path::Path;

use regex::Regex;

use crate::error::{InputError, InputResult};

const SCHEDULE_PATTERN: &str = r"^(\d+)-(\d+)-(\d+)-(\d+)-(\d+)-Schedule\.csv$";

/// Components of a schedule file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleFileName {
    pub league: String,
    pub year: String,
    pub session: String,
    pub division: String,
    pub location: String,
}

impl ScheduleFileName {
    /// Parses a bare file name.
    pub fn parse(name: &str) -> InputResult<Self> {
        let re = Regex::new(SCHEDULE_PATTERN)?;
        let caps = re
            .captures(name)
            .ok_or_else(|| InputError::InvalidFileName(name.to_string()))?;
        Ok(Self {
            league: caps[1].to_string(),
            year: caps[2].to_string(),
            session: caps[3].to_string(),
            division: caps[4].to_string(),
            location: caps[5].to_string(),
        })
    }

    /// Parses the final component of `path`.
    pub fn from_path(path: &Path) -> InputResult<Self> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| InputError::InvalidFileName(path.display().to_string()))?;
        Self::parse(name)
    }

    /// Shared prefix of the schedule and its reports.
    pub fn prefix(&self) -> String {
        format!(
            "{}-{}-{}-{}-{}",
            self.league, self.year, self.session, self.division, self.location
        )
    }

    /// `...-TableAssignments.csv`
    pub fn assignments_name(&self) -> String {
        format!("{}-TableAssignments.csv", self.prefix())
    }

    /// `...-TableStats.csv`
    pub fn stats_name(&self) -> String {
        format!("{}-TableStats.csv", self.prefix())
    }
}

impl fmt::Display for ScheduleFileName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-Schedule.csv", self.prefix())
    }
}
