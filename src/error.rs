//! Engine and input error types.

use std::path::PathBuf;

use thiserror::Error;

use crate::models::{Fixture, InfeasibleWeek};
use crate::validation::ValidationError;

/// Errors that stop or prevent an assignment run.
#[derive(Debug, Error)]
pub enum AssignError {
    /// The table pool or team directory cannot support the timeline.
    #[error("configuration error: {}", join(.0))]
    Configuration(Vec<ValidationError>),

    /// A fixture references a team that is not in the directory.
    #[error("unknown participant: {}", join(.0))]
    UnknownParticipant(Vec<ValidationError>),

    /// No candidate for this week satisfies the hard constraints.
    #[error(
        "week {week} ({label}): no feasible table assignment for {} fixture(s) \
         with {} table(s) under the current constraints",
        .fixtures.len(),
        .tables.len()
    )]
    Infeasible {
        week: u32,
        label: String,
        fixtures: Vec<Fixture>,
        tables: Vec<String>,
    },
}

impl AssignError {
    /// Builds an [`AssignError::Infeasible`] from a recorded failure.
    pub fn infeasible(failure: &InfeasibleWeek) -> Self {
        Self::Infeasible {
            week: failure.week,
            label: failure.label.clone(),
            fixtures: failure.fixtures.clone(),
            tables: failure.tables.clone(),
        }
    }
}

pub type AssignResult<T> = Result<T, AssignError>;

/// Errors raised while reading or writing league files.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid league config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid pattern: {0}")]
    Regex(#[from] regex::Error),

    #[error(
        "file name '{0}' does not match <league>-<year>-<session>-<division>-<location>-Schedule.csv"
    )]
    InvalidFileName(String),

    #[error("line {line}: {message}")]
    InvalidRow { line: u64, message: String },

    #[error("no configuration for league {0}")]
    MissingLeague(String),

    #[error("no configuration for division {division} of league {league}")]
    MissingDivision { league: String, division: String },

    #[error("mismatched config: {0}")]
    MismatchedConfig(String),
}

impl InputError {
    /// Wraps an I/O error with the path it concerns.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type InputResult<T> = Result<T, InputError>;

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationErrorKind;

    #[test]
    fn test_configuration_message_lists_all_problems() {
        let err = AssignError::Configuration(vec![
            ValidationError::new(ValidationErrorKind::OddTeamCount, "5 teams"),
            ValidationError::new(ValidationErrorKind::EmptyTablePool, "no tables"),
        ]);
        assert_eq!(err.to_string(), "configuration error: 5 teams; no tables");
    }

    #[test]
    fn test_infeasible_message() {
        let failure = InfeasibleWeek {
            week: 3,
            label: "2025-01-21".into(),
            fixtures: vec![Fixture::new("1", "2"), Fixture::new("3", "4")],
            tables: vec!["A".into(), "B".into()],
        };
        let msg = AssignError::infeasible(&failure).to_string();
        assert!(msg.starts_with("week 3 (2025-01-21)"));
        assert!(msg.contains("2 fixture(s) with 2 table(s)"));
    }

    #[test]
    fn test_input_error_messages() {
        let err = InputError::MissingDivision {
            league: "787".into(),
            division: "705".into(),
        };
        assert_eq!(err.to_string(), "no configuration for division 705 of league 787");

        let err = InputError::io(
            "missing.csv",
            std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        );
        assert_eq!(err.to_string(), "missing.csv: not found");
    }
}
