//! League file formats.
//!
//! Everything that touches the filesystem lives here; the engine itself only
//! sees typed [`Directory`](crate::models::Directory) and
//! [`Timeline`](crate::models::Timeline) values.
//!
//! | File | Direction | Module |
//! |------|-----------|--------|
//! | `L-Y-S-D-Loc-Schedule.csv` | in | `filename`, `schedule` |
//! | `table_configs.json` | in | `league` |
//! | `...-TableAssignments.csv` | out | `report` |
//! | `...-TableStats.csv` | out, in | `report`, `stats` |

mod filename;
mod league;
mod report;
mod schedule;
mod stats;

pub use filename::ScheduleFileName;
pub use league::{ConfigId, DivisionConfig, LeagueConfig};
pub use report::{write_assignments, write_reports, write_table_stats, ReportPaths, BYE_MARKER};
pub use schedule::{parse_schedule, read_schedule, SKIPPED_WEEKS};
pub use stats::{
    analyze_table_stats, analyze_table_stats_from, TableStatsReport, TableSummary, TeamTableCounts,
};
