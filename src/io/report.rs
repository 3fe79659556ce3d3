//! Assignment reports.
//!
//! Two CSV files are written next to a schedule:
//!
//! - `TableAssignments.csv`: `Week,MatchDate,Assignments`, one row per week,
//!   assignments as `home-away: table` joined by `"; "`.
//! - `TableStats.csv`: one column per non-bye team, one row per week, each
//!   cell the table label the team played on (blank when it did not play).

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use csv::Writer;
use tracing::info;

use super::filename::ScheduleFileName;
use crate::error::{InputError, InputResult};
use crate::models::{Directory, TimelineAssignment, WeekAssignment};

/// Cell text for fixtures that received no table.
pub const BYE_MARKER: &str = "bye";

/// Files written by [`write_reports`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPaths {
    pub assignments: PathBuf,
    pub stats: PathBuf,
}

/// Writes the `Week,MatchDate,Assignments` report.
pub fn write_assignments<W: Write>(
    writer: W,
    result: &TimelineAssignment,
    directory: &Directory,
) -> InputResult<()> {
    let mut wtr = Writer::from_writer(writer);
    wtr.write_record(["Week", "MatchDate", "Assignments"])?;
    for week in &result.weeks {
        wtr.write_record([
            week.week.to_string(),
            week.label.clone(),
            assignment_cell(week, directory),
        ])?;
    }
    wtr.flush().map_err(|e| InputError::io("<assignments>", e))?;
    Ok(())
}

fn assignment_cell(week: &WeekAssignment, directory: &Directory) -> String {
    week.slots
        .iter()
        .map(|slot| {
            let table = slot
                .table
                .as_deref()
                .map_or(BYE_MARKER, |t| directory.table_label(t));
            format!("{}: {}", slot.fixture, table)
        })
        .collect::<Vec<_>>()
        .join("; ")
}

/// Writes the per-team table grid.
pub fn write_table_stats<W: Write>(
    writer: W,
    result: &TimelineAssignment,
    directory: &Directory,
) -> InputResult<()> {
    let teams: Vec<_> = directory.non_bye_teams().collect();
    let mut wtr = Writer::from_writer(writer);

    let mut header = vec![String::new(), String::new()];
    header.extend(teams.iter().map(|t| t.name.clone()));
    wtr.write_record(&header)?;

    for week in &result.weeks {
        let mut row = vec![week.week.to_string(), week.label.clone()];
        row.extend(teams.iter().map(|team| {
            week.table_for(&team.id)
                .map(|t| directory.table_label(t).to_string())
                .unwrap_or_default()
        }));
        wtr.write_record(&row)?;
    }
    wtr.flush().map_err(|e| InputError::io("<table stats>", e))?;
    Ok(())
}

/// Writes both reports into `dir` under the schedule's prefix.
pub fn write_reports(
    dir: &Path,
    name: &ScheduleFileName,
    result: &TimelineAssignment,
    directory: &Directory,
) -> InputResult<ReportPaths> {
    let paths = ReportPaths {
        assignments: dir.join(name.assignments_name()),
        stats: dir.join(name.stats_name()),
    };

    let file = File::create(&paths.assignments).map_err(|e| InputError::io(&paths.assignments, e))?;
    write_assignments(file, result, directory)?;
    let file = File::create(&paths.stats).map_err(|e| InputError::io(&paths.stats, e))?;
    write_table_stats(file, result, directory)?;

    info!(
        assignments = %paths.assignments.display(),
        stats = %paths.stats.display(),
        weeks = result.weeks.len(),
        "reports written"
    );
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Fixture, FixtureSlot, Table, Team};

    fn directory() -> Directory {
        Directory::new()
            .with_table(Table::new("1").with_label("1-2"))
            .with_table(Table::new("2").with_label("3-4"))
            .with_team(Team::new("1").with_name("Aces"))
            .with_team(Team::new("2").with_name("Breakers"))
            .with_team(Team::new("3").with_name("Cues"))
            .with_team(Team::bye("4"))
    }

    fn result() -> TimelineAssignment {
        TimelineAssignment {
            weeks: vec![WeekAssignment {
                week: 1,
                label: "1/7/2025".into(),
                slots: vec![
                    FixtureSlot::assigned(Fixture::new("1", "2"), "2"),
                    FixtureSlot::unassigned(Fixture::new("3", "4")),
                ],
                relaxed: false,
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_write_assignments() {
        let mut out = Vec::new();
        write_assignments(&mut out, &result(), &directory()).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "Week,MatchDate,Assignments\n1,1/7/2025,1-2: 3-4; 3-4: bye\n"
        );
    }

    #[test]
    fn test_write_table_stats() {
        let mut out = Vec::new();
        write_table_stats(&mut out, &result(), &directory()).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, ",,Aces,Breakers,Cues\n1,1/7/2025,3-4,3-4,\n");
    }

    #[test]
    fn test_write_reports() {
        let dir = tempfile::tempdir().unwrap();
        let name = ScheduleFileName::parse("787-2025-01-705-02-Schedule.csv").unwrap();
        let paths = write_reports(dir.path(), &name, &result(), &directory()).unwrap();

        assert!(paths.assignments.ends_with("787-2025-01-705-02-TableAssignments.csv"));
        let stats = std::fs::read_to_string(&paths.stats).unwrap();
        assert!(stats.starts_with(",,Aces"));
    }
}
