//! Input validation for table assignment.
//!
//! Checks structural integrity of the directory and timeline before any
//! week is processed. Detects:
//! - Duplicate table or team IDs
//! - Fixtures referencing unknown teams
//! - Teams paired with themselves or booked twice in one week
//! - An odd pairing population or a table pool too small for a week
//!
//! Every check runs; all problems are reported together.

use crate::models::{Directory, Timeline};
use std::collections::HashSet;
use std::fmt;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two tables or two teams share the same ID.
    DuplicateId,
    /// A fixture references a team that is not in the directory.
    UnknownTeam,
    /// A fixture pairs a team with itself.
    SelfPairing,
    /// A team appears in more than one fixture of the same week.
    DoubleBooked,
    /// The directory has no tables.
    EmptyTablePool,
    /// More than one team is flagged as the bye.
    MultipleByeTeams,
    /// The pairing population (teams plus bye) is odd.
    OddTeamCount,
    /// A week has more playable fixtures than there are tables.
    InsufficientTables,
    /// Week numbers are not strictly increasing.
    WeekOrder,
    /// A continuation ledger was built over a different table pool.
    LedgerMismatch,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Validates the fixtures of a timeline against the directory.
///
/// Checks:
/// 1. Every fixture references known teams
/// 2. No fixture pairs a team with itself
/// 3. No team plays twice in the same week
/// 4. Week numbers strictly increase
pub fn validate_timeline(directory: &Directory, timeline: &Timeline) -> ValidationResult {
    let mut errors = Vec::new();

    for pair in timeline.weeks.windows(2) {
        if pair[1].number <= pair[0].number {
            errors.push(ValidationError::new(
                ValidationErrorKind::WeekOrder,
                format!("Week {} follows week {}", pair[1].number, pair[0].number),
            ));
        }
    }

    for week in &timeline.weeks {
        let mut seen: HashSet<&str> = HashSet::new();
        for fixture in &week.fixtures {
            for team in fixture.teams() {
                if !directory.has_team(team) {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::UnknownTeam,
                        format!(
                            "Week {} fixture '{}' references unknown team '{}'",
                            week.number, fixture, team
                        ),
                    ));
                }
            }

            if fixture.home == fixture.away {
                errors.push(ValidationError::new(
                    ValidationErrorKind::SelfPairing,
                    format!("Week {} pairs team '{}' with itself", week.number, fixture.home),
                ));
                continue;
            }

            for team in fixture.teams() {
                if !seen.insert(team) {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::DoubleBooked,
                        format!("Week {} books team '{}' more than once", week.number, team),
                    ));
                }
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates that the directory can support the timeline.
///
/// Checks:
/// 1. No duplicate table IDs
/// 2. No duplicate team IDs
/// 3. At least one table
/// 4. At most one bye team
/// 5. Even pairing population (a configured bye fills the odd seat)
/// 6. No week needs more tables than the pool holds
pub fn validate_directory(directory: &Directory, timeline: &Timeline) -> ValidationResult {
    let mut errors = Vec::new();

    let mut table_ids = HashSet::new();
    for t in &directory.tables {
        if !table_ids.insert(t.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate table ID: {}", t.id),
            ));
        }
    }

    let mut team_ids = HashSet::new();
    for t in &directory.teams {
        if !team_ids.insert(t.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate team ID: {}", t.id),
            ));
        }
    }

    if directory.tables.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyTablePool,
            "No tables configured",
        ));
    }

    let bye_count = directory.teams.iter().filter(|t| t.is_bye).count();
    if bye_count > 1 {
        errors.push(ValidationError::new(
            ValidationErrorKind::MultipleByeTeams,
            format!("{bye_count} teams are flagged as bye; at most one is allowed"),
        ));
    }

    if directory.teams.len() % 2 != 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::OddTeamCount,
            format!(
                "Number of teams must be even, found {} (is a bye team missing?)",
                directory.teams.len()
            ),
        ));
    }

    let bye = directory.bye_team();
    for week in &timeline.weeks {
        let needed = week.playable_count(bye);
        if needed > directory.tables.len() {
            errors.push(ValidationError::new(
                ValidationErrorKind::InsufficientTables,
                format!(
                    "Week {} needs {} tables but only {} are configured",
                    week.number,
                    needed,
                    directory.tables.len()
                ),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Team, Week};

    fn sample_directory() -> Directory {
        Directory::new()
            .with_tables(["A", "B"])
            .with_teams(["1", "2", "3", "4"])
    }

    fn sample_timeline() -> Timeline {
        Timeline::new()
            .with_week(Week::new(1, "d1").with_pair("1", "2").with_pair("3", "4"))
            .with_week(Week::new(2, "d2").with_pair("1", "3").with_pair("2", "4"))
    }

    #[test]
    fn test_valid_input() {
        let d = sample_directory();
        let t = sample_timeline();
        assert!(validate_timeline(&d, &t).is_ok());
        assert!(validate_directory(&d, &t).is_ok());
    }

    #[test]
    fn test_unknown_team() {
        let d = sample_directory();
        let t = Timeline::new().with_week(Week::new(1, "d1").with_pair("1", "9"));

        let errors = validate_timeline(&d, &t).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::UnknownTeam);
        assert!(errors[0].message.contains("'9'"));
    }

    #[test]
    fn test_self_pairing_and_double_booking() {
        let d = sample_directory();
        let t = Timeline::new().with_week(
            Week::new(1, "d1")
                .with_pair("1", "1")
                .with_pair("2", "3")
                .with_pair("3", "4"),
        );

        let errors = validate_timeline(&d, &t).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::SelfPairing));
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DoubleBooked && e.message.contains("'3'")));
    }

    #[test]
    fn test_week_order() {
        let d = sample_directory();
        let t = Timeline::new()
            .with_week(Week::new(2, "d2").with_pair("1", "2"))
            .with_week(Week::new(2, "d2b").with_pair("3", "4"));
        let errors = validate_timeline(&d, &t).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::WeekOrder);
    }

    #[test]
    fn test_duplicate_ids() {
        let d = Directory::new()
            .with_tables(["A", "A"])
            .with_teams(["1", "1"]);
        let errors = validate_directory(&d, &Timeline::new()).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId && e.message.contains("table")));
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId && e.message.contains("team")));
    }

    #[test]
    fn test_odd_team_count() {
        let d = Directory::new().with_tables(["A"]).with_teams(["1", "2", "3"]);
        let errors = validate_directory(&d, &Timeline::new()).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::OddTeamCount));
    }

    #[test]
    fn test_bye_fills_odd_seat() {
        let d = Directory::new()
            .with_tables(["A"])
            .with_teams(["1", "2", "3"])
            .with_team(Team::bye("4"));
        let t = Timeline::new()
            .with_week(Week::new(1, "d1").with_pair("1", "2").with_pair("3", "4"));
        assert!(validate_directory(&d, &t).is_ok());
    }

    #[test]
    fn test_insufficient_tables() {
        let d = Directory::new().with_tables(["A"]).with_teams(["1", "2", "3", "4"]);
        let errors = validate_directory(&d, &sample_timeline()).unwrap_err();
        assert_eq!(
            errors
                .iter()
                .filter(|e| e.kind == ValidationErrorKind::InsufficientTables)
                .count(),
            2
        );
    }

    #[test]
    fn test_empty_pool_and_multiple_byes() {
        let d = Directory::new()
            .with_teams(["1", "2"])
            .with_team(Team::bye("3"))
            .with_team(Team::bye("4"));
        let errors = validate_directory(&d, &Timeline::new()).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::EmptyTablePool));
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::MultipleByeTeams));
    }
}
