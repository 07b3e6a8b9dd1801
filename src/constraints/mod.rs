//! Constraint rules for candidate matches.
//!
//! A constraint is a plain function over a candidate crew and window plus
//! the matches already on the books. It returns `Ok(())` or the list of
//! human-readable reasons it failed. Rules are stateless, independent of
//! each other, and may be evaluated in any order; the [`Validator`]
//! fixes the order used for full match validation.
//!
//! # Built-in rules
//!
//! | Rule | Checks |
//! |------|--------|
//! | [`rules::venue_rest`] | no overlap at the venue, minimum rest days between matches |
//! | [`rules::referee_rest`] | every referee rests the minimum days between assignments |
//! | [`rules::crew_quota`] | exactly 1 principal, 2 line referees, 1 fourth official |
//!
//! [`Validator`]: crate::validation::Validator

pub mod rules;

use crate::config::{PlannerConfig, RoleQuota};
use crate::models::{Match, Resource, TimeWindow};

/// Outcome of a constraint: pass, or every reason it failed.
pub type Verdict = Result<(), Vec<String>>;

/// A stateless constraint rule.
pub type Constraint = fn(&Candidate<'_>, &[&Match], &RulePolicy) -> Verdict;

/// A constraint with a stable name, used to register and remove it.
#[derive(Debug, Clone, Copy)]
pub struct NamedConstraint {
    pub name: &'static str,
    pub check: Constraint,
}

impl NamedConstraint {
    /// Wraps a rule function.
    pub const fn new(name: &'static str, check: Constraint) -> Self {
        Self { name, check }
    }

    /// Runs the rule.
    pub fn evaluate(&self, candidate: &Candidate<'_>, existing: &[&Match], policy: &RulePolicy) -> Verdict {
        (self.check)(candidate, existing, policy)
    }
}

/// Thresholds shared by the rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RulePolicy {
    /// Minimum calendar days between two matches sharing a referee.
    pub referee_rest_days: i64,
    /// Minimum calendar days between consecutive venue bookings.
    pub venue_rest_days: i64,
    /// Exact crew composition.
    pub quota: RoleQuota,
}

impl Default for RulePolicy {
    fn default() -> Self {
        Self::from(&PlannerConfig::default())
    }
}

impl From<&PlannerConfig> for RulePolicy {
    fn from(config: &PlannerConfig) -> Self {
        Self {
            referee_rest_days: config.referee_rest_days,
            venue_rest_days: config.venue_rest_days,
            quota: config.quota,
        }
    }
}

/// A proposed match, resolved against the resource registry.
#[derive(Debug, Clone)]
pub struct Candidate<'a> {
    /// Display name used in messages.
    pub name: String,
    /// Resolved crew.
    pub resources: Vec<&'a Resource>,
    /// Occupied interval.
    pub window: TimeWindow,
}

impl<'a> Candidate<'a> {
    /// Creates a candidate.
    pub fn new(name: impl Into<String>, resources: Vec<&'a Resource>, window: TimeWindow) -> Self {
        Self {
            name: name.into(),
            resources,
            window,
        }
    }

    /// Builds a candidate from a match whose resources are already resolved.
    pub fn from_match(m: &Match, resources: Vec<&'a Resource>) -> Self {
        Self::new(m.name(), resources, m.window())
    }
}
