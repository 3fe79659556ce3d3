//! Fair table rotation for league schedules.
//!
//! Given a season of weekly fixtures and a pool of tables, assigns a table to
//! every fixture so that no table hosts two fixtures in the same week, no team
//! plays on the table it just used, and each team's table usage stays as even
//! as possible. Fixtures involving the bye team get no table.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Table`, `Team`, `Fixture`, `Week`, `Timeline`,
//!   `Directory`, and the `TimelineAssignment` output
//! - **`validation`**: Input integrity checks (duplicate IDs, unknown teams,
//!   odd team counts, undersized table pools)
//! - **`ledger`**: Per-team table usage and history
//! - **`scheduler`**: Constraint evaluation, fairness scoring, week and
//!   timeline assignment, KPIs
//! - **`config`**: Engine settings
//! - **`io`**: Schedule CSV, league JSON config, and report files
//!
//! # Example
//!
//! ```
//! use table_rotation::models::{Directory, Team, Timeline, Week};
//! use table_rotation::scheduler::TimelineAssigner;
//!
//! let directory = Directory::new()
//!     .with_tables(["A", "B", "C"])
//!     .with_teams(["1", "2", "3", "4", "5"])
//!     .with_team(Team::bye("6"));
//! let timeline = Timeline::new().with_week(
//!     Week::new(1, "Jan 7")
//!         .with_pair("1", "2")
//!         .with_pair("3", "4")
//!         .with_pair("5", "6"),
//! );
//!
//! let result = TimelineAssigner::default().assign(&directory, &timeline)?;
//! assert_eq!(result.weeks[0].table_for("1"), Some("A"));
//! assert_eq!(result.weeks[0].table_for("5"), None);
//! # Ok::<(), table_rotation::error::AssignError>(())
//! ```
//!
//! # References
//!
//! - de Werra (1988), "Some models of graphs for scheduling sports competitions"
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"

pub mod config;
pub mod error;
pub mod io;
pub mod ledger;
pub mod models;
pub mod scheduler;
pub mod validation;

pub use config::AssignerConfig;
pub use error::{AssignError, AssignResult, InputError, InputResult};
pub use ledger::ResourceLedger;
pub use scheduler::{RotationKpi, TimelineAssigner};
