//! Match validation.
//!
//! [`Validator`] runs the built-in rules and any extra registered
//! constraints against a candidate match, collecting every failure
//! instead of stopping at the first. [`validate_state`] checks the
//! structural integrity of a whole registry (ids, references, intervals),
//! and [`validate_team_name`] screens operator-typed team names.
//!
//! # Evaluation order
//!
//! 1. Venue: overlap and rest days against every booked match
//! 2. Referee rest, for each rest-constrained resource in the crew
//! 3. Crew quota
//! 4. Extra constraints, in registration order
//!
//! Reasons are deduplicated on exact text, keeping the first occurrence.

use chrono::NaiveDateTime;
use std::collections::HashSet;
use thiserror::Error;

use crate::constraints::rules::{crew_composition, referee_conflicts, venue_conflicts};
use crate::constraints::{Candidate, NamedConstraint, RulePolicy, Verdict};
use crate::models::{Match, Resource, TimeWindow};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A structural validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of structural validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities share the same ID.
    DuplicateId,
    /// A match references a resource that doesn't exist.
    InvalidResourceReference,
    /// A match does not end after it starts.
    InvalidInterval,
    /// A match lists the same resource more than once.
    DuplicateMembership,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Outcome of a full match validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    reasons: Vec<String>,
}

impl ValidationReport {
    /// Whether every rule passed.
    pub fn is_valid(&self) -> bool {
        self.reasons.is_empty()
    }

    /// Failure reasons in evaluation order.
    pub fn reasons(&self) -> &[String] {
        &self.reasons
    }

    /// Consumes the report into its reasons.
    pub fn into_reasons(self) -> Vec<String> {
        self.reasons
    }

    /// Converts to a [`Verdict`].
    pub fn into_verdict(self) -> Verdict {
        if self.reasons.is_empty() {
            Ok(())
        } else {
            Err(self.reasons)
        }
    }

    fn absorb(&mut self, verdict: Verdict) {
        if let Err(found) = verdict {
            for reason in found {
                if !self.reasons.contains(&reason) {
                    self.reasons.push(reason);
                }
            }
        }
    }
}

/// Runs the rule set against candidate matches.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use referee_scheduler::constraints::Candidate;
/// use referee_scheduler::models::{RefereeRole, Resource, TimeWindow};
/// use referee_scheduler::validation::Validator;
///
/// let principal = Resource::referee("Michael Oliver", RefereeRole::Principal);
/// let start = NaiveDate::from_ymd_opt(2031, 12, 25).unwrap().and_hms_opt(15, 0, 0).unwrap();
/// let candidate = Candidate::new("Arsenal vs Chelsea", vec![&principal], TimeWindow::starting_at(start, 2));
///
/// let report = Validator::default().validate(&candidate, &[]);
/// assert!(!report.is_valid());
/// assert_eq!(report.reasons()[0], "Requires 2 line referees (has 0)");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Validator {
    policy: RulePolicy,
    extra: Vec<NamedConstraint>,
}

impl Validator {
    /// Names of the built-in rules, in evaluation order.
    pub const BUILT_IN: [&'static str; 3] = ["venue_rest", "referee_rest", "crew_quota"];

    /// Creates a validator with the given thresholds.
    pub fn new(policy: RulePolicy) -> Self {
        Self {
            policy,
            extra: Vec::new(),
        }
    }

    /// Current thresholds.
    pub fn policy(&self) -> &RulePolicy {
        &self.policy
    }

    /// Registers an extra constraint, evaluated after the built-ins.
    ///
    /// Returns `false` if a constraint with the same name is already present.
    pub fn add_constraint(&mut self, constraint: NamedConstraint) -> bool {
        if self.has_constraint(constraint.name) {
            return false;
        }
        self.extra.push(constraint);
        true
    }

    /// Removes an extra constraint by name. Built-ins cannot be removed.
    pub fn remove_constraint(&mut self, name: &str) -> bool {
        let before = self.extra.len();
        self.extra.retain(|c| c.name != name);
        self.extra.len() != before
    }

    /// Whether a built-in or extra constraint has this name.
    pub fn has_constraint(&self, name: &str) -> bool {
        Self::BUILT_IN.contains(&name) || self.extra.iter().any(|c| c.name == name)
    }

    /// All constraint names in evaluation order.
    pub fn constraint_names(&self) -> Vec<&'static str> {
        Self::BUILT_IN
            .iter()
            .copied()
            .chain(self.extra.iter().map(|c| c.name))
            .collect()
    }

    /// Full validation of a candidate against the booked matches.
    ///
    /// `existing` must not include the match being modified.
    pub fn validate(&self, candidate: &Candidate<'_>, existing: &[&Match]) -> ValidationReport {
        let mut report = ValidationReport::default();

        report.absorb(self.check_venue(&candidate.window, existing));
        for referee in candidate.resources.iter().filter(|r| r.is_rest_constrained()) {
            report.absorb(self.check_referee(referee, candidate.window.start, existing));
        }
        report.absorb(crew_composition(&candidate.resources, &self.policy.quota));
        for constraint in &self.extra {
            report.absorb(constraint.evaluate(candidate, existing, &self.policy));
        }

        report
    }

    /// Venue overlap and rest check alone.
    pub fn check_venue(&self, window: &TimeWindow, existing: &[&Match]) -> Verdict {
        venue_conflicts(window, existing, self.policy.venue_rest_days)
    }

    /// Rest check for one referee alone.
    pub fn check_referee(
        &self,
        referee: &Resource,
        start: NaiveDateTime,
        existing: &[&Match],
    ) -> Verdict {
        referee_conflicts(referee, start, existing, self.policy.referee_rest_days)
    }
}

/// Checks the structural integrity of a registry snapshot.
///
/// Checks:
/// 1. No duplicate resource IDs
/// 2. No duplicate match IDs
/// 3. Every match ends after it starts
/// 4. Every resource a match references exists
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_state(resources: &[&Resource], matches: &[&Match]) -> ValidationResult {
    let mut errors = Vec::new();

    let mut resource_ids = HashSet::new();
    for r in resources {
        if !resource_ids.insert(r.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate resource ID: {}", r.id),
            ));
        }
    }

    let mut match_ids = HashSet::new();
    for m in matches {
        if !match_ids.insert(m.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate match ID: {}", m.id),
            ));
        }

        if m.end <= m.start {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidInterval,
                format!("Match '{}' does not end after it starts", m.id),
            ));
        }

        let mut members = HashSet::new();
        for rid in &m.resource_ids {
            if !members.insert(rid.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::DuplicateMembership,
                    format!("Match '{}' lists resource '{}' more than once", m.id, rid),
                ));
            }
            if !resource_ids.contains(rid.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidResourceReference,
                    format!("Match '{}' references unknown resource '{}'", m.id, rid),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Why a team name was refused.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TeamNameError {
    #[error("the team name cannot be empty")]
    Empty,

    #[error("the team name must have at least {0} characters")]
    TooShort(usize),

    #[error("the team name cannot have more than {0} characters")]
    TooLong(usize),

    #[error("the team name contains an invalid character: '{0}'")]
    InvalidCharacter(char),
}

/// Shortest accepted team name, in characters.
pub const TEAM_NAME_MIN: usize = 2;
/// Longest accepted team name, in characters.
pub const TEAM_NAME_MAX: usize = 50;

/// Validates a team name and returns it trimmed.
///
/// Letters (accented included), digits, spaces, `.`, `-` and `'` are
/// allowed.
pub fn validate_team_name(name: &str) -> Result<String, TeamNameError> {
    let trimmed = name.trim();
    let length = trimmed.chars().count();
    if length == 0 {
        return Err(TeamNameError::Empty);
    }
    if length < TEAM_NAME_MIN {
        return Err(TeamNameError::TooShort(TEAM_NAME_MIN));
    }
    if length > TEAM_NAME_MAX {
        return Err(TeamNameError::TooLong(TEAM_NAME_MAX));
    }
    if let Some(bad) = trimmed
        .chars()
        .find(|c| !(c.is_alphanumeric() || matches!(c, ' ' | '.' | '-' | '\'')))
    {
        return Err(TeamNameError::InvalidCharacter(bad));
    }
    Ok(trimmed.to_string())
}
