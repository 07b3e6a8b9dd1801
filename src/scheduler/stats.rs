//! Planner statistics and referee agendas.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Total matches | Every stored match |
//! | Upcoming | Kickoff strictly after `now` |
//! | Past | Kickoff at or before `now` |
//! | Referees per role | Registered resources with that role |
//! | Next match | Earliest upcoming kickoff |
//! | Load per referee | Matches each referee is assigned to |

use chrono::NaiveDateTime;
use std::collections::BTreeMap;

use super::planner::{local_now, Planner};
use crate::error::{SchedulerError, SchedulerResult};
use crate::models::{Match, RefereeRole, Resource};

/// Registry-wide counts.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannerStats {
    pub total_matches: usize,
    pub upcoming_matches: usize,
    pub past_matches: usize,
    pub total_resources: usize,
    /// Registered referees per role.
    pub referees_by_role: BTreeMap<RefereeRole, usize>,
    /// Matches per resource id, for every registered resource.
    pub load_by_resource: BTreeMap<String, usize>,
    /// Earliest upcoming match.
    pub next_match: Option<Match>,
}

impl PlannerStats {
    /// Mean number of matches per registered resource.
    pub fn avg_load(&self) -> f64 {
        if self.load_by_resource.is_empty() {
            0.0
        } else {
            let sum: usize = self.load_by_resource.values().sum();
            sum as f64 / self.load_by_resource.len() as f64
        }
    }
}

/// One referee's matches split around `now`.
#[derive(Debug, Clone, PartialEq)]
pub struct RefereeAgenda {
    pub resource: Resource,
    /// Soonest first.
    pub upcoming: Vec<Match>,
    /// Most recent first.
    pub past: Vec<Match>,
}

impl RefereeAgenda {
    /// Every match on the agenda.
    pub fn total(&self) -> usize {
        self.upcoming.len() + self.past.len()
    }

    /// The next assignment, if any.
    pub fn next_match(&self) -> Option<&Match> {
        self.upcoming.first()
    }
}

impl Planner {
    /// Statistics as of the local clock.
    pub fn stats(&self) -> PlannerStats {
        self.stats_at(local_now())
    }

    /// Statistics as of `now`.
    pub fn stats_at(&self, now: NaiveDateTime) -> PlannerStats {
        let upcoming = self.upcoming_matches_at(now);
        let referees_by_role = RefereeRole::ALL
            .into_iter()
            .map(|role| (role, self.referees_by_role(role).len()))
            .collect();
        let load_by_resource = self
            .resources()
            .map(|r| (r.id.clone(), self.matches_for_resource(&r.id).len()))
            .collect();

        PlannerStats {
            total_matches: self.match_count(),
            upcoming_matches: upcoming.len(),
            past_matches: self.match_count() - upcoming.len(),
            total_resources: self.resource_count(),
            referees_by_role,
            load_by_resource,
            next_match: upcoming.first().map(|m| (*m).clone()),
        }
    }

    /// A referee's agenda as of the local clock.
    pub fn agenda(&self, resource_id: &str) -> SchedulerResult<RefereeAgenda> {
        self.agenda_at(resource_id, local_now())
    }

    /// A referee's agenda as of `now`.
    pub fn agenda_at(&self, resource_id: &str, now: NaiveDateTime) -> SchedulerResult<RefereeAgenda> {
        let resource = self
            .resource(resource_id)
            .ok_or_else(|| SchedulerError::ResourceNotFound(resource_id.to_string()))?
            .clone();
        let (mut past, upcoming): (Vec<Match>, Vec<Match>) = self
            .matches_for_resource(resource_id)
            .into_iter()
            .cloned()
            .partition(|m| m.start <= now);
        past.reverse();

        Ok(RefereeAgenda {
            resource,
            upcoming,
            past,
        })
    }
}
