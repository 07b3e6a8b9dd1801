//! Built-in constraint rules.
//!
//! Each rule has a [`Constraint`](super::Constraint)-shaped entry point
//! plus a narrower helper the availability queries reuse.

use chrono::NaiveDateTime;

use super::{Candidate, RulePolicy, Verdict};
use crate::config::RoleQuota;
use crate::dates::{format_date, format_datetime};
use crate::models::{day_gap, signed_day_gap, Match, RefereeRole, Resource, TimeWindow};

/// Venue rule: no overlap, and at least `venue_rest_days` between bookings.
pub fn venue_rest(candidate: &Candidate<'_>, existing: &[&Match], policy: &RulePolicy) -> Verdict {
    venue_conflicts(&candidate.window, existing, policy.venue_rest_days)
}

/// Referee rule: every rest-constrained resource in the crew has rested.
pub fn referee_rest(candidate: &Candidate<'_>, existing: &[&Match], policy: &RulePolicy) -> Verdict {
    let mut reasons = Vec::new();
    for resource in candidate.resources.iter().filter(|r| r.is_rest_constrained()) {
        if let Err(mut found) = referee_conflicts(
            resource,
            candidate.window.start,
            existing,
            policy.referee_rest_days,
        ) {
            reasons.append(&mut found);
        }
    }
    into_verdict(reasons)
}

/// Crew rule: exact per-role counts.
pub fn crew_quota(candidate: &Candidate<'_>, _existing: &[&Match], policy: &RulePolicy) -> Verdict {
    crew_composition(&candidate.resources, &policy.quota)
}

/// Checks a venue window against every booked match.
///
/// An overlap is reported as a conflict and ends the check against that
/// match only. Otherwise the gap is measured in calendar days in both
/// directions: from the booked match's end to the window's start, and from
/// the window's end to the booked match's start. A gap in
/// `[0, rest_days)` fails; exactly `rest_days` passes.
pub fn venue_conflicts(window: &TimeWindow, existing: &[&Match], rest_days: i64) -> Verdict {
    let mut reasons = Vec::new();
    let too_close = |gap: i64| (0..rest_days).contains(&gap);

    for booked in existing {
        if booked.overlaps(window) {
            reasons.push(format!(
                "Schedule conflict: '{}' already holds the venue from {} to {}",
                booked.name(),
                format_datetime(booked.start),
                format_datetime(booked.end),
            ));
            continue;
        }

        let after_booked = signed_day_gap(booked.end, window.start);
        let before_booked = signed_day_gap(window.end, booked.start);
        let gap = if too_close(after_booked) {
            Some(after_booked)
        } else if too_close(before_booked) {
            Some(before_booked)
        } else {
            None
        };

        if let Some(gap) = gap {
            reasons.push(format!(
                "The venue needs {} rest days between matches; '{}' is on {} (only {} day(s) apart)",
                rest_days,
                booked.name(),
                format_date(booked.start),
                gap,
            ));
        }
    }

    into_verdict(reasons)
}

/// Checks one referee against every booked match that includes them.
///
/// Only kickoff dates matter: the gap is the absolute calendar-day
/// difference between the two starts, past or future alike.
pub fn referee_conflicts(
    referee: &Resource,
    start: NaiveDateTime,
    existing: &[&Match],
    rest_days: i64,
) -> Verdict {
    let reasons: Vec<String> = existing
        .iter()
        .filter(|m| m.has_resource(&referee.id))
        .filter_map(|m| {
            let gap = day_gap(start, m.start);
            (gap < rest_days).then(|| {
                format!(
                    "{} needs {} rest days; already assigned to '{}' on {} ({} day(s) apart)",
                    referee.name,
                    rest_days,
                    m.name(),
                    format_date(m.start),
                    gap,
                )
            })
        })
        .collect();
    into_verdict(reasons)
}

/// Checks a crew against the quota. Every role is checked; too few and
/// too many are distinct reasons.
pub fn crew_composition(resources: &[&Resource], quota: &RoleQuota) -> Verdict {
    let mut reasons = Vec::new();
    for role in RefereeRole::ALL {
        let required = quota.required(role);
        let count = resources.iter().filter(|r| r.has_role(role)).count();
        if count < required {
            reasons.push(format!(
                "Requires {} (has {})",
                counted(required, role),
                count
            ));
        } else if count > required {
            reasons.push(format!(
                "Only {} allowed (has {})",
                counted(required, role),
                count
            ));
        }
    }
    into_verdict(reasons)
}

fn counted(n: usize, role: RefereeRole) -> String {
    let plural = if n == 1 { "" } else { "s" };
    format!("{} {}{}", n, role.label(), plural)
}

fn into_verdict(reasons: Vec<String>) -> Verdict {
    if reasons.is_empty() {
        Ok(())
    } else {
        Err(reasons)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn dt(m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2031, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn crew() -> Vec<Resource> {
        vec![
            Resource::referee("Principal One", RefereeRole::Principal).with_id("P1"),
            Resource::referee("Line One", RefereeRole::Line).with_id("L1"),
            Resource::referee("Line Two", RefereeRole::Line).with_id("L2"),
            Resource::referee("Fourth One", RefereeRole::Fourth).with_id("F1"),
        ]
    }

    fn booked(id: &str, start: NaiveDateTime, refs: &[&str]) -> Match {
        Match::new("Manchester City", id, start)
            .with_id(id)
            .with_resources(refs.iter().copied())
    }

    #[test]
    fn test_crew_quota_exact_passes() {
        let crew = crew();
        let refs: Vec<&Resource> = crew.iter().collect();
        assert!(crew_composition(&refs, &RoleQuota::default()).is_ok());
    }

    #[test]
    fn test_crew_quota_missing_line() {
        let crew = crew();
        let refs: Vec<&Resource> = crew.iter().filter(|r| r.id != "L2").collect();
        let reasons = crew_composition(&refs, &RoleQuota::default()).unwrap_err();
        assert_eq!(reasons, vec!["Requires 2 line referees (has 1)".to_string()]);
    }

    #[test]
    fn test_crew_quota_reports_every_role() {
        let extra = Resource::referee("Principal Two", RefereeRole::Principal);
        let crew = crew();
        // two principals, no lines, no fourth
        let refs: Vec<&Resource> = vec![&crew[0], &extra];
        let reasons = crew_composition(&refs, &RoleQuota::default()).unwrap_err();
        assert_eq!(reasons.len(), 3);
        assert_eq!(reasons[0], "Only 1 principal referee allowed (has 2)");
        assert_eq!(reasons[1], "Requires 2 line referees (has 0)");
        assert_eq!(reasons[2], "Requires 1 fourth official (has 0)");
    }

    #[test]
    fn test_crew_quota_ignores_generic_resources() {
        let crew = crew();
        let booth = Resource::generic("VAR booth");
        let mut refs: Vec<&Resource> = crew.iter().collect();
        refs.push(&booth);
        assert!(crew_composition(&refs, &RoleQuota::default()).is_ok());
    }

    #[test]
    fn test_venue_overlap_fails() {
        let a = booked("A", dt(12, 25, 15), &[]);
        let b = TimeWindow::starting_at(dt(12, 25, 16), 2);
        let reasons = venue_conflicts(&b, &[&a], 2).unwrap_err();
        assert_eq!(reasons.len(), 1);
        assert!(reasons[0].starts_with("Schedule conflict"));
    }

    #[test]
    fn test_venue_gap_at_threshold_passes() {
        let a = booked("A", dt(12, 25, 15), &[]);
        let c = TimeWindow::starting_at(dt(12, 27, 15), 2);
        assert!(venue_conflicts(&c, &[&a], 2).is_ok());
    }

    #[test]
    fn test_venue_gap_below_threshold_fails() {
        let a = booked("A", dt(12, 25, 15), &[]);
        let d = TimeWindow::starting_at(dt(12, 26, 15), 2);
        let reasons = venue_conflicts(&d, &[&a], 2).unwrap_err();
        assert!(reasons[0].contains("only 1 day(s) apart"));

        // candidate before the booked match
        let e = TimeWindow::starting_at(dt(12, 24, 15), 2);
        assert!(venue_conflicts(&e, &[&a], 2).is_err());
        let f = TimeWindow::starting_at(dt(12, 23, 15), 2);
        assert!(venue_conflicts(&f, &[&a], 2).is_ok());
    }

    #[test]
    fn test_venue_back_to_back_is_not_overlap() {
        let a = booked("A", dt(12, 25, 15), &[]);
        let w = TimeWindow::starting_at(dt(12, 25, 17), 2);
        let reasons = venue_conflicts(&w, &[&a], 2).unwrap_err();
        assert_eq!(reasons.len(), 1);
        assert!(reasons[0].contains("rest days"));
    }

    #[test]
    fn test_venue_checks_every_booked_match() {
        let a = booked("A", dt(12, 25, 15), &[]);
        let b = booked("B", dt(12, 26, 20), &[]);
        let w = TimeWindow::starting_at(dt(12, 25, 16), 2);
        let reasons = venue_conflicts(&w, &[&a, &b], 2).unwrap_err();
        assert_eq!(reasons.len(), 2);
        assert!(reasons[0].starts_with("Schedule conflict"));
        assert!(reasons[1].contains("rest days"));
    }

    #[test]
    fn test_referee_rest_boundaries() {
        let crew = crew();
        let m = booked("A", dt(3, 1, 20), &["P1"]);

        let six = referee_conflicts(&crew[0], dt(3, 7, 12), &[&m], 7).unwrap_err();
        assert!(six[0].contains("Principal One"));
        assert!(six[0].contains("6 day(s) apart"));

        assert!(referee_conflicts(&crew[0], dt(3, 8, 12), &[&m], 7).is_ok());
        // symmetric: a candidate before the booked match
        assert!(referee_conflicts(&crew[0], dt(2, 23, 12), &[&m], 7).is_err());
        assert!(referee_conflicts(&crew[0], dt(2, 22, 12), &[&m], 7).is_ok());
        // not assigned to the booked match
        assert!(referee_conflicts(&crew[1], dt(3, 1, 12), &[&m], 7).is_ok());
    }

    #[test]
    fn test_referee_rest_accumulates_all_conflicts() {
        let crew = crew();
        let m1 = booked("A", dt(3, 1, 20), &["P1", "L1"]);
        let m2 = booked("B", dt(3, 10, 20), &["P1"]);
        let refs: Vec<&Resource> = crew.iter().collect();
        let candidate = Candidate::new("X vs Y", refs, TimeWindow::starting_at(dt(3, 5, 15), 2));
        let reasons = referee_rest(&candidate, &[&m1, &m2], &RulePolicy::default()).unwrap_err();
        // P1 twice, L1 once
        assert_eq!(reasons.len(), 3);
    }

    #[test]
    fn test_constraint_signatures() {
        let rules: [super::super::Constraint; 3] = [venue_rest, referee_rest, crew_quota];
        assert_eq!(rules.len(), 3);
    }
}
