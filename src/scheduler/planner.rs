//! The scheduling engine.
//!
//! [`Planner`] owns the resource and match registries and is the only
//! place they are mutated. Every create and modify runs the full
//! [`Validator`] before touching state, so a rejected operation leaves
//! the registries exactly as they were.
//!
//! Availability is never stored: a referee is free for a kickoff when no
//! booked match containing them falls inside the rest window, so deleting
//! a match releases its crew with no extra bookkeeping.

use chrono::NaiveDateTime;
use tracing::{debug, info, instrument};

use crate::config::{PlannerConfig, Roster};
use crate::constraints::{Candidate, RulePolicy};
use crate::error::{SchedulerError, SchedulerResult};
use crate::models::{week_range, Match, MatchChanges, RefereeRole, Registry, Resource, TimeWindow};
use crate::validation::{validate_state, validate_team_name, ValidationReport, ValidationResult, Validator};

/// Current local wall-clock time.
pub(crate) fn local_now() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}

/// Match and referee registry with constraint-checked mutations.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use referee_scheduler::config::{PlannerConfig, Roster};
/// use referee_scheduler::scheduler::Planner;
///
/// let mut planner = Planner::new(PlannerConfig::default()).with_roster(&Roster::english_panel());
/// let kickoff = NaiveDate::from_ymd_opt(2031, 12, 25).unwrap().and_hms_opt(15, 0, 0).unwrap();
///
/// let crew = planner.suggest_crew(kickoff).unwrap();
/// let fixture = planner
///     .new_match("Arsenal", "Chelsea", kickoff)
///     .unwrap()
///     .with_resources(crew.ids());
/// planner.schedule_match(fixture).unwrap();
///
/// // The venue needs two rest days, so the next day is refused.
/// let next_day = kickoff + chrono::Duration::days(1);
/// let crew = planner.suggest_crew(next_day);
/// assert!(crew.is_some());
/// let clash = planner
///     .new_match("Leeds", "Fulham", next_day)
///     .unwrap()
///     .with_resources(crew.unwrap().ids());
/// assert!(planner.schedule_match(clash).is_err());
/// assert_eq!(planner.match_count(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Planner {
    config: PlannerConfig,
    validator: Validator,
    resources: Registry<Resource>,
    matches: Registry<Match>,
}

impl Planner {
    /// Creates an empty planner.
    pub fn new(config: PlannerConfig) -> Self {
        let validator = Validator::new(RulePolicy::from(&config));
        Self {
            config,
            validator,
            resources: Registry::new(),
            matches: Registry::new(),
        }
    }

    /// Registers every referee in the roster. Names already registered
    /// under the same role are skipped.
    pub fn with_roster(mut self, roster: &Roster) -> Self {
        for (name, role) in roster.entries() {
            let known = self
                .resources
                .iter()
                .any(|r| r.name == name && r.has_role(role));
            if known {
                continue;
            }
            if let Err(e) = self.add_resource(Resource::referee(name, role)) {
                debug!(name, %role, error = %e, "roster entry not registered");
            }
        }
        info!(referees = self.resources.len(), "roster registered");
        self
    }

    /// Rebuilds a planner from records already checked by the loader.
    pub(crate) fn from_parts(config: PlannerConfig, resources: Registry<Resource>, matches: Registry<Match>) -> Self {
        let validator = Validator::new(RulePolicy::from(&config));
        Self {
            config,
            validator,
            resources,
            matches,
        }
    }

    /// Active configuration.
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// The validator used for create and modify.
    pub fn validator(&self) -> &Validator {
        &self.validator
    }

    /// Mutable access to register or remove extra constraints.
    pub fn validator_mut(&mut self) -> &mut Validator {
        &mut self.validator
    }

    // ======================== Resources ========================

    /// Registers a resource.
    pub fn add_resource(&mut self, resource: Resource) -> SchedulerResult<&Resource> {
        let id = resource.id.clone();
        if !self.resources.insert(resource) {
            return Err(SchedulerError::DuplicateResource(id));
        }
        debug!(resource = %id, "resource registered");
        self.resources
            .get(&id)
            .ok_or(SchedulerError::ResourceNotFound(id))
    }

    /// Registers a referee under a fresh id and returns the id.
    pub fn register_referee(&mut self, name: &str, role: RefereeRole) -> SchedulerResult<String> {
        Ok(self.add_resource(Resource::referee(name, role))?.id.clone())
    }

    /// Looks up a resource.
    pub fn resource(&self, id: &str) -> Option<&Resource> {
        self.resources.get(id)
    }

    /// All resources in registration order.
    pub fn resources(&self) -> impl Iterator<Item = &Resource> + '_ {
        self.resources.iter()
    }

    /// Number of registered resources.
    pub fn resource_count(&self) -> usize {
        self.resources.len()
    }

    /// Referees of one role, in registration order.
    pub fn referees_by_role(&self, role: RefereeRole) -> Vec<&Resource> {
        self.resources.iter().filter(|r| r.has_role(role)).collect()
    }

    /// Removes a resource unless it is assigned to an upcoming match.
    pub fn remove_resource(&mut self, id: &str) -> SchedulerResult<Resource> {
        self.remove_resource_at(id, local_now())
    }

    /// Removes a resource, judging "upcoming" against `now`.
    ///
    /// Matches starting strictly after `now` block the removal. Past
    /// matches do not; the id is stripped from them so every stored
    /// reference stays resolvable.
    #[instrument(skip(self))]
    pub fn remove_resource_at(&mut self, id: &str, now: NaiveDateTime) -> SchedulerResult<Resource> {
        if !self.resources.contains(id) {
            return Err(SchedulerError::ResourceNotFound(id.to_string()));
        }

        let upcoming: Vec<String> = self
            .matches_for_resource(id)
            .into_iter()
            .filter(|m| m.start > now)
            .map(Match::name)
            .collect();
        if !upcoming.is_empty() {
            debug!(count = upcoming.len(), "resource still assigned to upcoming matches");
            return Err(SchedulerError::ResourceInUse {
                id: id.to_string(),
                upcoming,
            });
        }

        for m in self.matches.values_mut() {
            m.remove_resource(id);
        }
        let removed = self
            .resources
            .remove(id)
            .ok_or_else(|| SchedulerError::ResourceNotFound(id.to_string()))?;
        info!(resource = %removed, "resource removed");
        Ok(removed)
    }

    // ======================== Matches ========================

    /// Builds an unscheduled match of the configured length after
    /// checking both team names.
    pub fn new_match(&self, home: &str, away: &str, start: NaiveDateTime) -> SchedulerResult<Match> {
        let home = validate_team_name(home)?;
        let away = validate_team_name(away)?;
        Ok(Match::new(home, away, start).with_duration_hours(self.config.match_duration_hours))
    }

    /// Looks up a match.
    pub fn get_match(&self, id: &str) -> Option<&Match> {
        self.matches.get(id)
    }

    /// All matches in scheduling order.
    pub fn matches(&self) -> impl Iterator<Item = &Match> + '_ {
        self.matches.iter()
    }

    /// Number of scheduled matches.
    pub fn match_count(&self) -> usize {
        self.matches.len()
    }

    /// All matches sorted by kickoff.
    pub fn matches_sorted(&self) -> Vec<&Match> {
        let mut list: Vec<&Match> = self.matches.iter().collect();
        list.sort_by_key(|m| m.start);
        list
    }

    /// Matches kicking off strictly after `now`, soonest first.
    pub fn upcoming_matches_at(&self, now: NaiveDateTime) -> Vec<&Match> {
        self.matches_sorted()
            .into_iter()
            .filter(|m| m.start > now)
            .collect()
    }

    /// Matches kicking off at or before `now`, most recent first.
    pub fn past_matches_at(&self, now: NaiveDateTime) -> Vec<&Match> {
        let mut list: Vec<&Match> = self
            .matches_sorted()
            .into_iter()
            .filter(|m| m.start <= now)
            .collect();
        list.reverse();
        list
    }

    /// Upcoming matches as of the local clock.
    pub fn upcoming_matches(&self) -> Vec<&Match> {
        self.upcoming_matches_at(local_now())
    }

    /// Past matches as of the local clock.
    pub fn past_matches(&self) -> Vec<&Match> {
        self.past_matches_at(local_now())
    }

    /// Matches a resource is assigned to, sorted by kickoff.
    pub fn matches_for_resource(&self, id: &str) -> Vec<&Match> {
        self.matches_sorted()
            .into_iter()
            .filter(|m| m.has_resource(id))
            .collect()
    }

    /// Matches overlapping a window, sorted by kickoff.
    pub fn matches_in_range(&self, window: &TimeWindow) -> Vec<&Match> {
        self.matches_sorted()
            .into_iter()
            .filter(|m| m.overlaps(window))
            .collect()
    }

    /// Matches in the Monday-to-Sunday week containing `at`.
    pub fn matches_in_week(&self, at: NaiveDateTime) -> Vec<&Match> {
        let (monday, sunday) = week_range(at);
        self.matches_in_range(&TimeWindow::new(monday, sunday))
    }

    /// Validates a match against every other stored match without
    /// changing state. A stored match with the same id is left out, so
    /// this also previews a modification.
    pub fn validate_match(&self, candidate: &Match) -> SchedulerResult<ValidationReport> {
        check_interval(candidate)?;
        let crew = self.resolve(&candidate.resource_ids)?;
        let existing = self.others(Some(&candidate.id));
        let report = self
            .validator
            .validate(&Candidate::from_match(candidate, crew), &existing);
        Ok(report)
    }

    /// Validates and stores a new match. Nothing changes on rejection.
    #[instrument(skip(self, fixture), fields(name = %fixture.name(), start = %fixture.start))]
    pub fn schedule_match(&mut self, fixture: Match) -> SchedulerResult<&Match> {
        if self.matches.contains(&fixture.id) {
            return Err(SchedulerError::DuplicateMatch(fixture.id));
        }
        self.accept(&fixture)?;

        let id = fixture.id.clone();
        info!(id = %id, referees = fixture.resource_ids.len(), "match scheduled");
        self.matches.insert(fixture);
        self.matches
            .get(&id)
            .ok_or(SchedulerError::MatchNotFound(id))
    }

    /// Applies changes to a stored match after validating the result
    /// against every other match. Unset fields keep their values.
    #[instrument(skip(self, changes))]
    pub fn modify_match(&mut self, id: &str, changes: &MatchChanges) -> SchedulerResult<&Match> {
        let candidate = self
            .matches
            .get(id)
            .ok_or_else(|| SchedulerError::MatchNotFound(id.to_string()))?
            .with_changes(changes);
        self.accept(&candidate)?;

        let slot = self
            .matches
            .get_mut(id)
            .ok_or_else(|| SchedulerError::MatchNotFound(id.to_string()))?;
        slot.start = candidate.start;
        slot.end = candidate.end;
        slot.resource_ids = candidate.resource_ids;
        info!(id, start = %slot.start, "match modified");
        Ok(&*slot)
    }

    /// Removes a match, releasing its crew.
    #[instrument(skip(self))]
    pub fn remove_match(&mut self, id: &str) -> SchedulerResult<Match> {
        let removed = self
            .matches
            .remove(id)
            .ok_or_else(|| SchedulerError::MatchNotFound(id.to_string()))?;
        info!(fixture = %removed.name(), "match removed");
        Ok(removed)
    }

    // ======================== Availability ========================

    /// Whether a referee may be assigned to a match kicking off at
    /// `start`. Only the rest window counts; a match being modified is
    /// not excluded.
    pub fn is_available(&self, referee: &Resource, start: NaiveDateTime) -> bool {
        self.validator
            .check_referee(referee, start, &self.others(None))
            .is_ok()
    }

    /// Free referees of one role for a kickoff, in registration order,
    /// skipping ids in `exclude`.
    pub fn available_referees(
        &self,
        role: RefereeRole,
        start: NaiveDateTime,
        exclude: &[&str],
    ) -> Vec<&Resource> {
        let existing = self.others(None);
        self.resources
            .iter()
            .filter(|r| r.has_role(role) && !exclude.contains(&r.id.as_str()))
            .filter(|r| {
                self.validator
                    .check_referee(r, start, &existing)
                    .is_ok()
            })
            .collect()
    }

    /// Checks the registries' structural integrity.
    pub fn check_integrity(&self) -> ValidationResult {
        let resources: Vec<&Resource> = self.resources.iter().collect();
        let matches: Vec<&Match> = self.matches.iter().collect();
        validate_state(&resources, &matches)
    }

    pub(crate) fn others(&self, exclude: Option<&str>) -> Vec<&Match> {
        self.matches
            .iter()
            .filter(|m| Some(m.id.as_str()) != exclude)
            .collect()
    }

    fn resolve(&self, ids: &[String]) -> SchedulerResult<Vec<&Resource>> {
        ids.iter()
            .map(|id| {
                self.resources
                    .get(id)
                    .ok_or_else(|| SchedulerError::ResourceNotFound(id.clone()))
            })
            .collect()
    }

    fn accept(&self, candidate: &Match) -> SchedulerResult<()> {
        let report = self.validate_match(candidate)?;
        if !report.is_valid() {
            debug!(
                fixture = %candidate.name(),
                reasons = ?report.reasons(),
                "candidate rejected"
            );
            return Err(SchedulerError::Rejected {
                reasons: report.into_reasons(),
            });
        }
        Ok(())
    }
}

fn check_interval(m: &Match) -> SchedulerResult<()> {
    if m.end <= m.start {
        return Err(SchedulerError::InvalidInterval {
            start: m.start,
            end: m.end,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn dt(m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2031, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    /// Two full crews: P1 L1 L2 F1 and P2 L3 L4 F2.
    fn planner() -> Planner {
        let mut p = Planner::new(PlannerConfig::default());
        for (id, name, role) in [
            ("P1", "Michael Oliver", RefereeRole::Principal),
            ("P2", "Anthony Taylor", RefereeRole::Principal),
            ("L1", "Gary Beswick", RefereeRole::Line),
            ("L2", "Adam Nunn", RefereeRole::Line),
            ("L3", "Scott Ledger", RefereeRole::Line),
            ("L4", "Nick Hopton", RefereeRole::Line),
            ("F1", "Robert Jones", RefereeRole::Fourth),
            ("F2", "Andy Madley", RefereeRole::Fourth),
        ] {
            p.add_resource(Resource::referee(name, role).with_id(id)).unwrap();
        }
        p
    }

    fn fixture(id: &str, start: NaiveDateTime, crew: [&str; 4]) -> Match {
        Match::new("Arsenal", "Chelsea", start)
            .with_id(id)
            .with_resources(crew)
    }

    const CREW_A: [&str; 4] = ["P1", "L1", "L2", "F1"];
    const CREW_B: [&str; 4] = ["P2", "L3", "L4", "F2"];

    #[test]
    fn test_schedule_valid_match() {
        let mut p = planner();
        let m = p.schedule_match(fixture("M1", dt(3, 1, 15), CREW_A)).unwrap();
        assert_eq!(m.id, "M1");
        assert_eq!(p.match_count(), 1);
        assert!(p.check_integrity().is_ok());
    }

    #[test]
    fn test_rejection_leaves_state_untouched() {
        let mut p = planner();
        p.schedule_match(fixture("M1", dt(3, 1, 15), CREW_A)).unwrap();

        let err = p
            .schedule_match(fixture("M2", dt(3, 4, 15), CREW_A))
            .unwrap_err();
        match err {
            SchedulerError::Rejected { reasons } => {
                assert_eq!(reasons.len(), 4);
                assert!(reasons[0].starts_with("Michael Oliver"));
            }
            _ => panic!("wrong variant"),
        }
        assert_eq!(p.match_count(), 1);
        assert!(p.get_match("M2").is_none());
    }

    #[test]
    fn test_incomplete_crew_rejected() {
        let mut p = planner();
        let m = Match::new("Arsenal", "Chelsea", dt(3, 1, 15)).with_resources(["P1", "L1", "F1"]);
        let err = p.schedule_match(m).unwrap_err();
        assert_eq!(err.reasons(), &["Requires 2 line referees (has 1)".to_string()]);
    }

    #[test]
    fn test_unknown_referee_is_not_found() {
        let mut p = planner();
        let m = fixture("M1", dt(3, 1, 15), ["P1", "L1", "L2", "GHOST"]);
        assert_eq!(
            p.schedule_match(m),
            Err(SchedulerError::ResourceNotFound("GHOST".into()))
        );
    }

    #[test]
    fn test_duplicate_match_id() {
        let mut p = planner();
        p.schedule_match(fixture("M1", dt(3, 1, 15), CREW_A)).unwrap();
        let err = p
            .schedule_match(fixture("M1", dt(5, 1, 15), CREW_B))
            .unwrap_err();
        assert_eq!(err, SchedulerError::DuplicateMatch("M1".into()));
    }

    #[test]
    fn test_invalid_interval() {
        let mut p = planner();
        let m = fixture("M1", dt(3, 1, 15), CREW_A).with_end(dt(3, 1, 15));
        assert!(matches!(
            p.schedule_match(m),
            Err(SchedulerError::InvalidInterval { .. })
        ));
    }

    #[test]
    fn test_modify_validates_against_others_only() {
        let mut p = planner();
        p.schedule_match(fixture("M1", dt(3, 1, 15), CREW_A)).unwrap();

        // moving by one day would clash with itself if it were not excluded
        let changes = MatchChanges {
            start: Some(dt(3, 2, 15)),
            end: Some(dt(3, 2, 17)),
            ..Default::default()
        };
        let m = p.modify_match("M1", &changes).unwrap();
        assert_eq!(m.start, dt(3, 2, 15));
        assert_eq!(m.resource_ids.len(), 4);
    }

    #[test]
    fn test_modify_rejected_keeps_original() {
        let mut p = planner();
        p.schedule_match(fixture("M1", dt(3, 1, 15), CREW_A)).unwrap();
        p.schedule_match(fixture("M2", dt(3, 10, 15), CREW_B)).unwrap();

        let changes = MatchChanges {
            start: Some(dt(3, 9, 15)),
            end: Some(dt(3, 9, 17)),
            ..Default::default()
        };
        assert!(p.modify_match("M1", &changes).is_err());
        assert_eq!(p.get_match("M1").unwrap().start, dt(3, 1, 15));
    }

    #[test]
    fn test_modify_swaps_crew() {
        let mut p = planner();
        p.schedule_match(fixture("M1", dt(3, 1, 15), CREW_A)).unwrap();
        let changes = MatchChanges {
            resource_ids: Some(CREW_B.iter().map(|s| s.to_string()).collect()),
            ..Default::default()
        };
        let m = p.modify_match("M1", &changes).unwrap();
        assert!(m.has_resource("P2"));
        assert!(!m.has_resource("P1"));
        assert!(p.matches_for_resource("P1").is_empty());
    }

    #[test]
    fn test_modify_missing_and_bad_interval() {
        let mut p = planner();
        assert_eq!(
            p.modify_match("nope", &MatchChanges::default()).unwrap_err(),
            SchedulerError::MatchNotFound("nope".into())
        );

        p.schedule_match(fixture("M1", dt(3, 1, 15), CREW_A)).unwrap();
        let changes = MatchChanges {
            start: Some(dt(3, 1, 18)),
            ..Default::default()
        };
        assert!(matches!(
            p.modify_match("M1", &changes),
            Err(SchedulerError::InvalidInterval { .. })
        ));
    }

    #[test]
    fn test_delete_then_recreate() {
        let mut p = planner();
        p.schedule_match(fixture("M1", dt(3, 1, 15), CREW_A)).unwrap();
        p.schedule_match(fixture("M2", dt(3, 20, 15), CREW_B)).unwrap();
        assert!(p.schedule_match(fixture("M3", dt(3, 5, 15), CREW_A)).is_err());

        p.remove_match("M1").unwrap();
        // same crew as the deleted match
        p.schedule_match(fixture("M3", dt(3, 5, 15), CREW_A)).unwrap();
        assert_eq!(p.match_count(), 2);
        assert!(matches!(
            p.remove_match("M1"),
            Err(SchedulerError::MatchNotFound(_))
        ));
    }

    #[test]
    fn test_resource_deletion_guard() {
        let mut p = planner();
        p.schedule_match(fixture("M1", dt(3, 10, 15), CREW_A)).unwrap();

        let before = dt(3, 1, 12);
        let err = p.remove_resource_at("P1", before).unwrap_err();
        assert!(matches!(err, SchedulerError::ResourceInUse { ref upcoming, .. } if upcoming.len() == 1));

        // once the match is in the past the referee can go
        let after = dt(3, 10, 15);
        let removed = p.remove_resource_at("P1", after).unwrap();
        assert_eq!(removed.id, "P1");
        assert!(!p.get_match("M1").unwrap().has_resource("P1"));
        assert!(p.check_integrity().is_ok());
    }

    #[test]
    fn test_resource_deletion_after_match_removed() {
        let mut p = planner();
        p.schedule_match(fixture("M1", dt(3, 10, 15), CREW_A)).unwrap();
        p.remove_match("M1").unwrap();
        assert!(p.remove_resource_at("L1", dt(3, 1, 12)).is_ok());
        assert_eq!(
            p.remove_resource_at("L1", dt(3, 1, 12)),
            Err(SchedulerError::ResourceNotFound("L1".into()))
        );
    }

    #[test]
    fn test_duplicate_resource() {
        let mut p = planner();
        let err = p
            .add_resource(Resource::referee("Someone", RefereeRole::Line).with_id("L1"))
            .unwrap_err();
        assert_eq!(err, SchedulerError::DuplicateResource("L1".into()));
    }

    #[test]
    fn test_available_referees() {
        let mut p = planner();
        p.schedule_match(fixture("M1", dt(3, 1, 15), CREW_A)).unwrap();

        let lines = p.available_referees(RefereeRole::Line, dt(3, 5, 15), &[]);
        let ids: Vec<&str> = lines.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["L3", "L4"]);

        let lines = p.available_referees(RefereeRole::Line, dt(3, 5, 15), &["L3"]);
        assert_eq!(lines.len(), 1);

        // exactly seven days later everyone is free again
        assert_eq!(p.available_referees(RefereeRole::Line, dt(3, 8, 10), &[]).len(), 4);
        let p1 = p.resource("P1").unwrap();
        assert!(!p.is_available(p1, dt(2, 23, 20)));
        assert!(p.is_available(p1, dt(2, 22, 20)));
    }

    #[test]
    fn test_queries() {
        let mut p = planner();
        p.schedule_match(fixture("M2", dt(4, 1, 15), CREW_B)).unwrap();
        p.schedule_match(fixture("M1", dt(3, 1, 15), CREW_A)).unwrap();

        let sorted: Vec<&str> = p.matches_sorted().iter().map(|m| m.id.as_str()).collect();
        assert_eq!(sorted, vec!["M1", "M2"]);

        let now = dt(3, 15, 0);
        assert_eq!(p.upcoming_matches_at(now)[0].id, "M2");
        assert_eq!(p.past_matches_at(now)[0].id, "M1");
        assert_eq!(p.matches_for_resource("P2")[0].id, "M2");

        let march = TimeWindow::new(dt(3, 1, 0), dt(3, 31, 0));
        assert_eq!(p.matches_in_range(&march).len(), 1);
        // 2031-04-01 is a Tuesday
        assert_eq!(p.matches_in_week(dt(4, 6, 9))[0].id, "M2");
        assert!(p.matches_in_week(dt(4, 8, 9)).is_empty());
        assert_eq!(p.referees_by_role(RefereeRole::Line).len(), 4);
    }

    #[test]
    fn test_new_match_checks_team_names() {
        let p = planner();
        let m = p.new_match(" Arsenal ", "Chelsea", dt(3, 1, 15)).unwrap();
        assert_eq!(m.name(), "Arsenal vs Chelsea");
        assert_eq!(m.end - m.start, Duration::hours(2));
        assert!(matches!(
            p.new_match("A", "Chelsea", dt(3, 1, 15)),
            Err(SchedulerError::InvalidTeamName(_))
        ));
    }

    #[test]
    fn test_with_roster_is_idempotent() {
        let roster = Roster::english_panel();
        let p = Planner::default().with_roster(&roster).with_roster(&roster);
        assert_eq!(p.resource_count(), 22);
        assert_eq!(p.referees_by_role(RefereeRole::Principal).len(), 6);
    }

    #[test]
    fn test_same_day_double_booking_blocked_by_rest() {
        let mut p = planner();
        p.schedule_match(fixture("M1", dt(3, 1, 12), CREW_A)).unwrap();
        let err = p
            .schedule_match(fixture("M2", dt(3, 1, 20), CREW_A))
            .unwrap_err();
        assert!(err.reasons().iter().any(|r| r.contains("0 day(s) apart")));
    }
}
