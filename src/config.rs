//! Planner configuration.
//!
//! Every tunable the engine reads lives here: rest thresholds, match
//! length, search horizon, canonical kickoff hours, crew quota, and the
//! bounds the date parser enforces. Missing JSON fields fall back to the
//! defaults, so a config file only needs to name what it overrides.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::models::RefereeRole;
use crate::persistence::PersistenceError;

/// Exact per-role crew size a match requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoleQuota {
    pub principal: usize,
    pub line: usize,
    pub fourth: usize,
}

impl Default for RoleQuota {
    fn default() -> Self {
        Self {
            principal: 1,
            line: 2,
            fourth: 1,
        }
    }
}

impl RoleQuota {
    /// Required count for a role.
    pub fn required(&self, role: RefereeRole) -> usize {
        match role {
            RefereeRole::Principal => self.principal,
            RefereeRole::Line => self.line,
            RefereeRole::Fourth => self.fourth,
        }
    }

    /// Total crew size.
    pub fn total(&self) -> usize {
        self.principal + self.line + self.fourth
    }
}

/// Longest accepted rest threshold, in days.
pub const MAX_REST_DAYS: i64 = 366;
/// Longest accepted match length, in hours.
pub const MAX_MATCH_HOURS: i64 = 72;
/// Longest accepted search horizon, in days.
pub const MAX_HORIZON_DAYS: i64 = 3660;

/// A configuration value outside its accepted range.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{field} must be between {min} and {max} (got {value})")]
    OutOfRange {
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },

    #[error("kickoff hour {0} is not a clock hour")]
    KickoffHour(u32),

    #[error("at least one kickoff hour is required")]
    NoKickoffHours,

    #[error("the crew quota requires at least one referee")]
    EmptyQuota,

    #[error("date rules are inconsistent: {0}")]
    DateRules(String),
}

fn bounded(field: &'static str, value: i64, min: i64, max: i64) -> Result<(), ConfigError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}

/// Bounds applied when parsing a kickoff typed by a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DateRules {
    /// Earliest kickoff hour, inclusive.
    pub min_hour: u32,
    /// Latest kickoff hour, inclusive.
    pub max_hour: u32,
    /// Earliest year, inclusive.
    pub min_year: i32,
    /// Latest year, inclusive.
    pub max_year: i32,
}

impl Default for DateRules {
    fn default() -> Self {
        Self {
            min_hour: 10,
            max_hour: 22,
            min_year: 2020,
            max_year: 2100,
        }
    }
}

/// Engine configuration.
///
/// # Example
///
/// ```
/// use referee_scheduler::config::PlannerConfig;
///
/// let config = PlannerConfig::from_json_str(r#"{ "referee_rest_days": 5 }"#).unwrap();
/// assert_eq!(config.referee_rest_days, 5);
/// assert_eq!(config.venue_rest_days, 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Minimum calendar days between two matches sharing a referee.
    pub referee_rest_days: i64,
    /// Minimum calendar days between consecutive matches at the venue.
    pub venue_rest_days: i64,
    /// Match length used by search and by `Planner::new_match`.
    pub match_duration_hours: i64,
    /// Days examined by the next-slot search.
    pub search_horizon_days: i64,
    /// Kickoff hours tried per day, in order.
    pub kickoff_hours: Vec<u32>,
    /// Crew quota.
    pub quota: RoleQuota,
    /// Date parser bounds.
    pub date_rules: DateRules,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            referee_rest_days: 7,
            venue_rest_days: 2,
            match_duration_hours: 2,
            search_horizon_days: 60,
            kickoff_hours: vec![12, 15, 17, 20],
            quota: RoleQuota::default(),
            date_rules: DateRules::default(),
        }
    }
}

impl PlannerConfig {
    /// Parses a (possibly partial) JSON configuration and checks its ranges.
    pub fn from_json_str(raw: &str) -> Result<Self, PersistenceError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks every value against its accepted range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        bounded("referee_rest_days", self.referee_rest_days, 0, MAX_REST_DAYS)?;
        bounded("venue_rest_days", self.venue_rest_days, 0, MAX_REST_DAYS)?;
        bounded("match_duration_hours", self.match_duration_hours, 1, MAX_MATCH_HOURS)?;
        bounded("search_horizon_days", self.search_horizon_days, 1, MAX_HORIZON_DAYS)?;

        if self.kickoff_hours.is_empty() {
            return Err(ConfigError::NoKickoffHours);
        }
        if let Some(&hour) = self.kickoff_hours.iter().find(|&&h| h > 23) {
            return Err(ConfigError::KickoffHour(hour));
        }
        if self.quota.total() == 0 {
            return Err(ConfigError::EmptyQuota);
        }

        let rules = &self.date_rules;
        if rules.max_hour > 23 || rules.min_hour > rules.max_hour {
            return Err(ConfigError::DateRules(format!(
                "kickoff hours {}..={} are not a clock range",
                rules.min_hour, rules.max_hour
            )));
        }
        if rules.min_year > rules.max_year {
            return Err(ConfigError::DateRules(format!(
                "year range {}..={} is empty",
                rules.min_year, rules.max_year
            )));
        }
        Ok(())
    }

    /// Reads a (possibly partial) JSON configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, PersistenceError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(PersistenceError::FileNotFound(path.display().to_string()));
        }
        let raw = std::fs::read_to_string(path).map_err(|source| PersistenceError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    /// Sets the referee rest threshold.
    pub fn with_referee_rest_days(mut self, days: i64) -> Self {
        self.referee_rest_days = days;
        self
    }

    /// Sets the venue rest threshold.
    pub fn with_venue_rest_days(mut self, days: i64) -> Self {
        self.venue_rest_days = days;
        self
    }

    /// Sets the search horizon.
    pub fn with_search_horizon_days(mut self, days: i64) -> Self {
        self.search_horizon_days = days;
        self
    }

    /// Sets the kickoff hours tried by the search.
    pub fn with_kickoff_hours(mut self, hours: Vec<u32>) -> Self {
        self.kickoff_hours = hours;
        self
    }
}

/// Referee names to register at start-up, grouped by role.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Roster {
    pub principals: Vec<String>,
    pub lines: Vec<String>,
    pub fourths: Vec<String>,
}

impl Roster {
    /// The stock panel: six principals, ten line referees, six fourth officials.
    pub fn english_panel() -> Self {
        fn names(list: &[&str]) -> Vec<String> {
            list.iter().map(|s| s.to_string()).collect()
        }
        Self {
            principals: names(&[
                "Michael Oliver",
                "Anthony Taylor",
                "Martin Atkinson",
                "Paul Tierney",
                "Craig Pawson",
                "David Coote",
            ]),
            lines: names(&[
                "Gary Beswick",
                "Adam Nunn",
                "Scott Ledger",
                "Constantine Hatzidakis",
                "Nick Hopton",
                "Ian Hussin",
                "Simon Long",
                "Derek Eaton",
                "Marc Perry",
                "James Mainwaring",
            ]),
            fourths: names(&[
                "Robert Jones",
                "Andy Madley",
                "Peter Bankes",
                "John Brooks",
                "Graham Scott",
                "Darren Bond",
            ]),
        }
    }

    /// `(name, role)` pairs in registration order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, RefereeRole)> + '_ {
        fn tag(
            names: &[String],
            role: RefereeRole,
        ) -> impl Iterator<Item = (&str, RefereeRole)> + '_ {
            names.iter().map(move |n| (n.as_str(), role))
        }
        tag(&self.principals, RefereeRole::Principal)
            .chain(tag(&self.lines, RefereeRole::Line))
            .chain(tag(&self.fourths, RefereeRole::Fourth))
    }

    /// Number of names.
    pub fn len(&self) -> usize {
        self.principals.len() + self.lines.len() + self.fourths.len()
    }

    /// Whether the roster is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
