//! Next-open-slot search and crew suggestion.
//!
//! # Algorithm
//!
//! 1. Walk days forward from the start date, one at a time, for
//!    `horizon_days` days.
//! 2. On each day try the canonical kickoff hours in order.
//! 3. Skip kickoffs that are not strictly after `now`.
//! 4. Check the venue (overlap and rest days) first.
//! 5. Only then list free referees per role; accept the slot when every
//!    role meets its quota.
//!
//! The first accepted `(day, hour)` wins. An exhausted horizon yields
//! `None`, which is a normal answer rather than an error.
//!
//! # Complexity
//! O(d * h * (m + r * m)) where d=days, h=kickoff hours, m=matches, r=referees.

use chrono::{Days, NaiveDate, NaiveDateTime};
use std::collections::BTreeMap;
use tracing::{debug, info};

use super::planner::{local_now, Planner};
use crate::config::PlannerConfig;
use crate::models::{at_hour, RefereeRole, Resource, TimeWindow};

/// Parameters of a slot search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotSearch {
    /// First day examined.
    pub from: NaiveDate,
    /// Match length.
    pub duration_hours: i64,
    /// Number of days examined.
    pub horizon_days: i64,
    /// Kickoff hours tried per day, in order.
    pub kickoff_hours: Vec<u32>,
}

impl SlotSearch {
    /// A search from `from` using the configured length, horizon and hours.
    pub fn from_config(from: NaiveDate, config: &PlannerConfig) -> Self {
        Self {
            from,
            duration_hours: config.match_duration_hours,
            horizon_days: config.search_horizon_days,
            kickoff_hours: config.kickoff_hours.clone(),
        }
    }

    /// Sets the match length.
    pub fn with_duration_hours(mut self, hours: i64) -> Self {
        self.duration_hours = hours;
        self
    }

    /// Sets the horizon.
    pub fn with_horizon_days(mut self, days: i64) -> Self {
        self.horizon_days = days;
        self
    }

    /// Every candidate kickoff, in search order.
    pub fn kickoffs(&self) -> impl Iterator<Item = NaiveDateTime> + '_ {
        (0..self.horizon_days.max(0))
            .map_while(move |offset| {
                u64::try_from(offset)
                    .ok()
                    .and_then(|days| self.from.checked_add_days(Days::new(days)))
            })
            .flat_map(move |day| {
                self.kickoff_hours
                    .iter()
                    .filter_map(move |&hour| at_hour(day, hour))
            })
    }
}

/// An open slot and everyone free to referee it.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotProposal {
    /// Kickoff.
    pub start: NaiveDateTime,
    /// Final whistle.
    pub end: NaiveDateTime,
    /// Free referees per role, in registration order.
    pub available: BTreeMap<RefereeRole, Vec<Resource>>,
}

impl SlotProposal {
    /// Free referees of one role.
    pub fn available(&self, role: RefereeRole) -> &[Resource] {
        self.available.get(&role).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// A complete crew picked from the free referees, sized by the quota.
#[derive(Debug, Clone, PartialEq)]
pub struct CrewSuggestion {
    pub principals: Vec<Resource>,
    pub lines: Vec<Resource>,
    pub fourths: Vec<Resource>,
}

impl CrewSuggestion {
    /// Resource ids, principals first.
    pub fn ids(&self) -> Vec<String> {
        self.members().map(|r| r.id.clone()).collect()
    }

    /// Every crew member, principals first.
    pub fn members(&self) -> impl Iterator<Item = &Resource> + '_ {
        self.principals
            .iter()
            .chain(self.lines.iter())
            .chain(self.fourths.iter())
    }
}

impl Planner {
    /// Finds the next open slot from `from`'s date, with the configured
    /// length, horizon and kickoff hours, as of the local clock.
    pub fn find_next_slot(&self, from: NaiveDateTime) -> Option<SlotProposal> {
        self.find_next_slot_at(from, local_now())
    }

    /// Finds the next open slot from `from`'s date, skipping kickoffs at
    /// or before `now`.
    pub fn find_next_slot_at(&self, from: NaiveDateTime, now: NaiveDateTime) -> Option<SlotProposal> {
        self.search(&SlotSearch::from_config(from.date(), self.config()), now)
    }

    /// Runs a slot search. Deterministic for a given state and `now`.
    pub fn search(&self, query: &SlotSearch, now: NaiveDateTime) -> Option<SlotProposal> {
        let existing = self.others(None);
        let quota = self.config().quota;

        for start in query.kickoffs() {
            if start <= now {
                continue;
            }
            let window = TimeWindow::starting_at(start, query.duration_hours);

            if self.validator().check_venue(&window, &existing).is_err() {
                debug!(%start, "venue unavailable");
                continue;
            }

            let available = self.available_by_role(start);
            let short = RefereeRole::ALL
                .into_iter()
                .find(|role| available.get(role).map_or(0, Vec::len) < quota.required(*role));
            if let Some(role) = short {
                debug!(%start, %role, "not enough free referees");
                continue;
            }

            info!(%start, "open slot found");
            return Some(SlotProposal {
                start,
                end: window.end,
                available,
            });
        }

        info!(from = %query.from, days = query.horizon_days, "no open slot in horizon");
        None
    }

    /// Picks the first free referees of each role, as many as the quota
    /// requires, for a kickoff. `None` if any role falls short.
    pub fn suggest_crew(&self, start: NaiveDateTime) -> Option<CrewSuggestion> {
        let quota = self.config().quota;
        let mut available = self.available_by_role(start);
        let mut take = |role: RefereeRole| -> Option<Vec<Resource>> {
            let list = available.remove(&role).unwrap_or_default();
            let needed = quota.required(role);
            (list.len() >= needed).then(|| list.into_iter().take(needed).collect())
        };

        Some(CrewSuggestion {
            principals: take(RefereeRole::Principal)?,
            lines: take(RefereeRole::Line)?,
            fourths: take(RefereeRole::Fourth)?,
        })
    }

    fn available_by_role(&self, start: NaiveDateTime) -> BTreeMap<RefereeRole, Vec<Resource>> {
        RefereeRole::ALL
            .into_iter()
            .map(|role| {
                let free = self
                    .available_referees(role, start, &[])
                    .into_iter()
                    .cloned()
                    .collect();
                (role, free)
            })
            .collect()
    }
}
