//! Table rotation domain models.
//!
//! Provides the core data types for describing a league's weekly fixtures,
//! its table pool, and the resulting table assignment.
//!
//! # Domain Mappings
//!
//! | table-rotation | League | Generic |
//! |----------------|--------|---------|
//! | Table | Pool table / table pair | Resource |
//! | Team | Team | Participant |
//! | Fixture | Match | Event |
//! | Week | Match night | Period |
//! | Timeline | Season schedule | Ordered periods |

mod assignment;
mod directory;
mod fixture;
mod table;
mod team;
mod week;

pub use assignment::{
    FixtureSlot, InfeasibleWeek, TimelineAssignment, UsageRow, UsageTable, WeekAssignment,
};
pub use directory::Directory;
pub use fixture::Fixture;
pub use table::Table;
pub use team::Team;
pub use week::{Timeline, Week};
