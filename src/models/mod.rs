//! Scheduling domain models.
//!
//! Provides the data types the engine reasons about: referees and other
//! resources, matches, half-open time windows, and the id-keyed registry
//! that stores them.
//!
//! # Domain Mappings
//!
//! | referee-scheduler | Generic scheduling |
//! |-------------------|--------------------|
//! | Match | Event / Task |
//! | Resource (referee) | Resource / Worker |
//! | Venue | Shared single-capacity resource |
//! | RefereeRole | Resource category |

mod calendar;
mod fixture;
mod registry;
mod resource;

pub use calendar::{add_hours, at_hour, day_gap, signed_day_gap, week_range, TimeWindow};
pub use fixture::{Match, MatchChanges};
pub use registry::{Keyed, Registry};
pub use resource::{RefereeRole, Resource, ResourceKind};
