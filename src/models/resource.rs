//! Resource model.
//!
//! Resources are the people and assets a match consumes. Referees are
//! the only rest-constrained kind; every referee carries exactly one role
//! from a closed set. Other resources are tracked but never counted
//! toward a crew.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Officiating role of a referee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefereeRole {
    /// Centre referee.
    Principal,
    /// Assistant referee on the touchline.
    Line,
    /// Fourth official.
    Fourth,
}

impl RefereeRole {
    /// All roles in crew order.
    pub const ALL: [RefereeRole; 3] = [Self::Principal, Self::Line, Self::Fourth];

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Principal => "principal referee",
            Self::Line => "line referee",
            Self::Fourth => "fourth official",
        }
    }
}

impl fmt::Display for RefereeRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Kind-specific resource data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResourceKind {
    /// A match official.
    Referee {
        role: RefereeRole,
        nationality: String,
        years_experience: u32,
    },
    /// Anything else a match may reference.
    Generic,
}

/// A schedulable resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    /// Unique resource identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
    /// Kind-specific data.
    #[serde(flatten)]
    pub kind: ResourceKind,
}

impl Resource {
    /// Default nationality for newly registered referees.
    pub const DEFAULT_NATIONALITY: &'static str = "England";

    /// Creates a referee with a fresh id.
    pub fn referee(name: impl Into<String>, role: RefereeRole) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            description: String::new(),
            kind: ResourceKind::Referee {
                role,
                nationality: Self::DEFAULT_NATIONALITY.to_string(),
                years_experience: 0,
            },
        }
    }

    /// Creates a generic resource with a fresh id.
    pub fn generic(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            description: String::new(),
            kind: ResourceKind::Generic,
        }
    }

    /// Overrides the generated id.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the nationality. No effect on non-referees.
    pub fn with_nationality(mut self, value: impl Into<String>) -> Self {
        if let ResourceKind::Referee { nationality, .. } = &mut self.kind {
            *nationality = value.into();
        }
        self
    }

    /// Sets the years of experience. No effect on non-referees.
    pub fn with_experience(mut self, years: u32) -> Self {
        if let ResourceKind::Referee {
            years_experience, ..
        } = &mut self.kind
        {
            *years_experience = years;
        }
        self
    }

    /// Referee role, or `None` for other resources.
    pub fn role(&self) -> Option<RefereeRole> {
        match &self.kind {
            ResourceKind::Referee { role, .. } => Some(*role),
            ResourceKind::Generic => None,
        }
    }

    /// Whether this resource is a referee of the given role.
    pub fn has_role(&self, role: RefereeRole) -> bool {
        self.role() == Some(role)
    }

    /// Whether the referee rest period applies to this resource.
    pub fn is_rest_constrained(&self) -> bool {
        matches!(self.kind, ResourceKind::Referee { .. })
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.role() {
            Some(role) => write!(f, "{} ({})", self.name, role),
            None => f.write_str(&self.name),
        }
    }
}
