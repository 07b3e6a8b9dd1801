//! Scheduling engine, slot search, and statistics.
//!
//! `Planner` is the single owner of scheduling state. Create and modify
//! are validate-then-commit; delete is unconditional; resource removal is
//! guarded by upcoming assignments.
//!
//! # Search
//!
//! `Planner::find_next_slot` is a greedy first-fit scan over days and
//! canonical kickoff hours. It returns the first slot where the venue is
//! free and every referee role can be staffed, without comparing it to
//! later candidates.
//!
//! # Statistics
//!
//! `PlannerStats` gives registry-wide counts and per-referee load;
//! `RefereeAgenda` lists one referee's matches around a point in time.

mod planner;
mod search;
mod stats;

pub use planner::Planner;
pub use search::{CrewSuggestion, SlotProposal, SlotSearch};
pub use stats::{PlannerStats, RefereeAgenda};
