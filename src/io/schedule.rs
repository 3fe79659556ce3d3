//! Schedule CSV reader.
//!
//! Headerless rows of `week, date, home-away, home-away, ...`. Rows with
//! fewer than two cells, and weeks marked "No Play" or "Playoff Week" in the
//! date cell, carry no fixtures and are skipped. Blank fixture cells are
//! ignored.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use tracing::debug;

use crate::error::{InputError, InputResult};
use crate::models::{Fixture, Timeline, Week};

/// Date-cell markers of weeks without league play.
pub const SKIPPED_WEEKS: [&str; 2] = ["No Play", "Playoff Week"];

/// Reads a schedule file into a timeline.
pub fn read_schedule(path: &Path) -> InputResult<Timeline> {
    let file = File::open(path).map_err(|e| InputError::io(path, e))?;
    parse_schedule(file)
}

/// Reads schedule rows from any reader.
pub fn parse_schedule<R: Read>(reader: R) -> InputResult<Timeline> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut timeline = Timeline::new();
    for record in rdr.records() {
        let record = record?;
        let line = record.position().map_or(0, |p| p.line());

        if record.len() < 2 {
            continue;
        }
        let date = &record[1];
        if SKIPPED_WEEKS.contains(&date) {
            debug!(line, date, "skipping week without play");
            continue;
        }

        let number: u32 = record[0].parse().map_err(|_| InputError::InvalidRow {
            line,
            message: format!("week number '{}' is not a positive integer", &record[0]),
        })?;

        let mut week = Week::new(number, date);
        for cell in record.iter().skip(2).filter(|c| !c.is_empty()) {
            let fixture = Fixture::parse(cell).ok_or_else(|| InputError::InvalidRow {
                line,
                message: format!("fixture '{cell}' is not of the form home-away"),
            })?;
            week.fixtures.push(fixture);
        }
        timeline.push(week);
    }

    debug!(weeks = timeline.total_weeks(), "schedule loaded");
    Ok(timeline)
}
