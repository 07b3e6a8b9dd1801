//! Referee scheduling for a single venue.
//!
//! Allocates referee crews to football matches under rest-period and
//! crew-composition rules, and searches a calendar horizon for the next
//! slot where a full crew and the venue are both free.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Resource`, `RefereeRole`, `Match`,
//!   `TimeWindow`, `Registry`
//! - **`constraints`**: Stateless rules as plain functions (venue rest,
//!   referee rest, crew quota)
//! - **`validation`**: `Validator` aggregating every rule, structural
//!   integrity checks, team-name screening
//! - **`scheduler`**: `Planner` engine, next-slot search, statistics
//! - **`persistence`**: JSON load/save, file info, backups
//! - **`dates`**: Kickoff parsing and date formatting
//! - **`config`**: `PlannerConfig`, crew quota, date bounds, rosters
//!
//! # Rules
//!
//! | Rule | Default |
//! |------|---------|
//! | Crew | exactly 1 principal, 2 line referees, 1 fourth official |
//! | Referee rest | 7 calendar days between kickoff dates |
//! | Venue | no overlap, 2 calendar days between matches |
//!
//! All day gaps are calendar-day differences; time of day is ignored.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use referee_scheduler::config::{PlannerConfig, Roster};
//! use referee_scheduler::scheduler::Planner;
//!
//! let planner = Planner::new(PlannerConfig::default()).with_roster(&Roster::english_panel());
//! let from = NaiveDate::from_ymd_opt(2031, 3, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
//! let now = NaiveDate::from_ymd_opt(2031, 2, 1).unwrap().and_hms_opt(9, 0, 0).unwrap();
//!
//! let slot = planner.find_next_slot_at(from, now).unwrap();
//! assert_eq!(slot.start.format("%d/%m/%Y %H:%M").to_string(), "01/03/2031 12:00");
//! ```

pub mod config;
pub mod constraints;
pub mod dates;
pub mod error;
pub mod logging;
pub mod models;
pub mod persistence;
pub mod scheduler;
pub mod validation;

pub use error::{SchedulerError, SchedulerResult};
