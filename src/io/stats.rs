//! Table stats analyzer.
//!
//! Reads a `TableStats.csv` grid back and summarizes how often every team
//! played on every table, with per-table min/max/average across teams.

use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, Trim};

use crate::error::{InputError, InputResult};

/// Per-team table counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamTableCounts {
    pub team: String,
    /// Aligned with [`TableStatsReport::tables`].
    pub counts: Vec<u32>,
}

impl TeamTableCounts {
    /// Games played on any table.
    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }
}

/// Distribution of one table's usage across teams.
#[derive(Debug, Clone, PartialEq)]
pub struct TableSummary {
    pub table: String,
    pub min: u32,
    pub max: u32,
    pub average: f64,
}

/// Result of analyzing a table stats grid.
#[derive(Debug, Clone, PartialEq)]
pub struct TableStatsReport {
    /// Table labels seen in the grid, sorted.
    pub tables: Vec<String>,
    /// Teams in grid column order.
    pub teams: Vec<TeamTableCounts>,
}

impl TableStatsReport {
    /// Min/max/average per table.
    pub fn summaries(&self) -> Vec<TableSummary> {
        self.tables
            .iter()
            .enumerate()
            .map(|(col, table)| {
                let column: Vec<u32> = self.teams.iter().map(|t| t.counts[col]).collect();
                let sum: u32 = column.iter().sum();
                TableSummary {
                    table: table.clone(),
                    min: column.iter().copied().min().unwrap_or(0),
                    max: column.iter().copied().max().unwrap_or(0),
                    average: if column.is_empty() {
                        0.0
                    } else {
                        sum as f64 / column.len() as f64
                    },
                }
            })
            .collect()
    }
}

impl fmt::Display for TableStatsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Table Assignment Statistics:")?;
        writeln!(f, "===========================")?;

        let width = self.teams.iter().map(|t| t.team.len()).max().unwrap_or(0).max(4);
        write!(f, "{:<width$}", "Team")?;
        for table in &self.tables {
            write!(f, "  Table {table}")?;
        }
        writeln!(f, "  Total Games")?;

        for team in &self.teams {
            write!(f, "{:<width$}", team.team)?;
            for (table, count) in self.tables.iter().zip(&team.counts) {
                let w = "Table ".len() + table.len();
                write!(f, "  {count:>w$}")?;
            }
            writeln!(f, "  {:>11}", team.total())?;
        }

        writeln!(f)?;
        writeln!(f, "Summary Statistics:")?;
        writeln!(f, "=================")?;
        for s in self.summaries() {
            writeln!(f)?;
            writeln!(f, "Table {}:", s.table)?;
            writeln!(f, "  Min: {} games", s.min)?;
            writeln!(f, "  Max: {} games", s.max)?;
            writeln!(f, "  Average: {:.2} games", s.average)?;
        }
        Ok(())
    }
}

/// Analyzes a table stats file.
pub fn analyze_table_stats(path: &Path) -> InputResult<TableStatsReport> {
    let file = File::open(path).map_err(|e| InputError::io(path, e))?;
    analyze_table_stats_from(file)
}

/// Analyzes a table stats grid from any reader.
pub fn analyze_table_stats_from<R: Read>(reader: R) -> InputResult<TableStatsReport> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let teams: Vec<String> = rdr.headers()?.iter().skip(2).map(str::to_string).collect();
    let mut cells: Vec<Vec<String>> = vec![Vec::new(); teams.len()];

    for record in rdr.records() {
        let record = record?;
        for (i, cell) in record.iter().skip(2).enumerate().take(teams.len()) {
            if !cell.is_empty() {
                cells[i].push(cell.to_string());
            }
        }
    }

    let mut tables: Vec<String> = cells.iter().flatten().cloned().collect();
    tables.sort();
    tables.dedup();

    let teams = teams
        .into_iter()
        .zip(cells)
        .map(|(team, played)| {
            let mut counts = vec![0; tables.len()];
            for table in played {
                if let Ok(col) = tables.binary_search(&table) {
                    counts[col] += 1;
                }
            }
            TeamTableCounts { team, counts }
        })
        .collect();

    Ok(TableStatsReport { tables, teams })
}

#[cfg(test)]
mod tests {
    use super::*;

    const GRID: &str = "\
,,Aces,Breakers,Cues,Dragons
1,1/7/2025,1-2,1-2,3-4,3-4
2,1/14/2025,3-4,,,1-2
3,1/21/2025,1-2,3-4,1-2,
";

    #[test]
    fn test_analyze_grid() {
        let report = analyze_table_stats_from(GRID.as_bytes()).unwrap();
        assert_eq!(report.tables, vec!["1-2", "3-4"]);
        assert_eq!(report.teams.len(), 4);

        let aces = &report.teams[0];
        assert_eq!(aces.team, "Aces");
        assert_eq!(aces.counts, vec![2, 1]);
        assert_eq!(aces.total(), 3);

        let cues = &report.teams[2];
        assert_eq!(cues.counts, vec![1, 1]);

        let summaries = report.summaries();
        assert_eq!(summaries[0].min, 1);
        assert_eq!(summaries[0].max, 2);
        assert!((summaries[0].average - 1.25).abs() < 1e-10);
    }

    #[test]
    fn test_display_report() {
        let report = analyze_table_stats_from(GRID.as_bytes()).unwrap();
        let text = report.to_string();
        assert!(text.contains("Table 1-2:"));
        assert!(text.contains("  Average: 1.25 games"));
        assert!(text.contains("Total Games"));
    }

    #[test]
    fn test_empty_grid() {
        let report = analyze_table_stats_from(",,Aces\n".as_bytes()).unwrap();
        assert!(report.tables.is_empty());
        assert_eq!(report.teams[0].total(), 0);
        assert!(report.summaries().is_empty());
    }

    #[test]
    fn test_reads_written_report() {
        use crate::io::write_table_stats;
        use crate::models::{Directory, Fixture, FixtureSlot, TimelineAssignment, WeekAssignment};

        let directory = Directory::new().with_tables(["A", "B"]).with_teams(["1", "2"]);
        let result = TimelineAssignment {
            weeks: vec![WeekAssignment {
                week: 1,
                label: "d1".into(),
                slots: vec![FixtureSlot::assigned(Fixture::new("1", "2"), "B")],
                relaxed: false,
            }],
            ..Default::default()
        };
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("x-TableStats.csv");
        write_table_stats(File::create(&path).unwrap(), &result, &directory).unwrap();

        let report = analyze_table_stats(&path).unwrap();
        assert_eq!(report.tables, vec!["B"]);
        assert_eq!(report.teams[1].counts, vec![1]);
    }
}
