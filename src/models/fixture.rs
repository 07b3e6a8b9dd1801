//! Match model.
//!
//! A match occupies the venue for a half-open interval and holds an
//! ordered set of referee ids. Membership is unique by id; the order
//! carries no meaning.

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{add_hours, TimeWindow};

/// A scheduled (or candidate) football match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    /// Unique match identifier.
    pub id: String,
    /// Home team.
    pub home_team: String,
    /// Away team.
    pub away_team: String,
    /// Kickoff.
    pub start: NaiveDateTime,
    /// Final whistle. Always after `start` once stored.
    pub end: NaiveDateTime,
    /// Assigned resource ids, unique.
    pub resource_ids: Vec<String>,
}

/// Proposed changes to a stored match. `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchChanges {
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
    pub resource_ids: Option<Vec<String>>,
}

impl Match {
    /// Standard match length in hours.
    pub const STANDARD_DURATION_HOURS: i64 = 2;

    /// Creates a match of standard length with a fresh id.
    pub fn new(
        home_team: impl Into<String>,
        away_team: impl Into<String>,
        start: NaiveDateTime,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            home_team: home_team.into(),
            away_team: away_team.into(),
            start,
            end: start + Duration::hours(Self::STANDARD_DURATION_HOURS),
            resource_ids: Vec::new(),
        }
    }

    /// Overrides the generated id.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Sets the end time.
    pub fn with_end(mut self, end: NaiveDateTime) -> Self {
        self.end = end;
        self
    }

    /// Sets the duration in hours from the current start.
    pub fn with_duration_hours(mut self, hours: i64) -> Self {
        self.end = add_hours(self.start, hours);
        self
    }

    /// Adds a resource; duplicates are ignored.
    pub fn with_resource(mut self, id: impl Into<String>) -> Self {
        self.add_resource(id);
        self
    }

    /// Adds several resources; duplicates are ignored.
    pub fn with_resources<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for id in ids {
            self.add_resource(id);
        }
        self
    }

    /// Display name, `"Home vs Away"`.
    pub fn name(&self) -> String {
        format!("{} vs {}", self.home_team, self.away_team)
    }

    /// The occupied interval.
    pub fn window(&self) -> TimeWindow {
        TimeWindow::new(self.start, self.end)
    }

    /// Whether this match overlaps `[start, end)`.
    pub fn overlaps(&self, window: &TimeWindow) -> bool {
        self.window().overlaps(window)
    }

    /// Whether a resource is assigned.
    pub fn has_resource(&self, id: &str) -> bool {
        self.resource_ids.iter().any(|r| r == id)
    }

    /// Adds a resource. Returns `false` if it was already assigned.
    pub fn add_resource(&mut self, id: impl Into<String>) -> bool {
        let id = id.into();
        if self.has_resource(&id) {
            return false;
        }
        self.resource_ids.push(id);
        true
    }

    /// Removes a resource. Returns `false` if it was not assigned.
    pub fn remove_resource(&mut self, id: &str) -> bool {
        let before = self.resource_ids.len();
        self.resource_ids.retain(|r| r != id);
        self.resource_ids.len() != before
    }

    /// Applies changes on top of this match, returning the candidate.
    pub fn with_changes(&self, changes: &MatchChanges) -> Self {
        let mut candidate = self.clone();
        if let Some(start) = changes.start {
            candidate.start = start;
        }
        if let Some(end) = changes.end {
            candidate.end = end;
        }
        if let Some(ids) = &changes.resource_ids {
            candidate.resource_ids.clear();
            for id in ids {
                candidate.add_resource(id.clone());
            }
        }
        candidate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn kickoff() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2031, 12, 25)
            .unwrap()
            .and_hms_opt(15, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_match_builder() {
        let m = Match::new("Manchester City", "Arsenal", kickoff())
            .with_id("M1")
            .with_resources(["R1", "L1", "L2", "F1"]);

        assert_eq!(m.id, "M1");
        assert_eq!(m.name(), "Manchester City vs Arsenal");
        assert_eq!(m.end - m.start, Duration::hours(2));
        assert_eq!(m.resource_ids.len(), 4);
        assert!(m.has_resource("L2"));
    }

    #[test]
    fn test_resource_membership_is_unique() {
        let mut m = Match::new("A", "B", kickoff()).with_resources(["R1", "R1"]);
        assert_eq!(m.resource_ids, vec!["R1".to_string()]);
        assert!(!m.add_resource("R1"));
        assert!(m.remove_resource("R1"));
        assert!(!m.remove_resource("R1"));
    }

    #[test]
    fn test_with_changes_keeps_unspecified_fields() {
        let m = Match::new("A", "B", kickoff()).with_resources(["R1", "L1"]);
        let later = kickoff() + Duration::days(3);

        let c = m.with_changes(&MatchChanges {
            start: Some(later),
            ..Default::default()
        });
        assert_eq!(c.id, m.id);
        assert_eq!(c.start, later);
        assert_eq!(c.end, m.end);
        assert_eq!(c.resource_ids, m.resource_ids);

        let c2 = m.with_changes(&MatchChanges {
            resource_ids: Some(vec!["X".into(), "X".into(), "Y".into()]),
            ..Default::default()
        });
        assert_eq!(c2.resource_ids, vec!["X".to_string(), "Y".to_string()]);
        assert_eq!(c2.start, m.start);
    }

    #[test]
    fn test_overlaps_half_open() {
        let m = Match::new("A", "B", kickoff());
        let touching = TimeWindow::starting_at(m.end, 2);
        assert!(!m.overlaps(&touching));
        let inside = TimeWindow::starting_at(kickoff() + Duration::hours(1), 2);
        assert!(m.overlaps(&inside));
    }
}
