//! Section model - a priority-ranked grouping of tasks and linked plans.

use serde::{Deserialize, Serialize};
use crate::id::{PlanId, SectionId};
use crate::Time;

/// A named section of the site, ranked against its siblings.
///
/// `priority` is a dense rank maintained by the store: the live set always
/// holds exactly `1..=N`, 1 being the highest priority. It is never edited
/// through a [`SectionPatch`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    /// Unique identifier
    pub id: SectionId,

    /// Section name
    pub name: String,

    /// Optional description
    pub description: Option<String>,

    /// Dense 1-based rank (1 = highest priority)
    pub priority: u32,

    /// Section status, independent of contained tasks
    pub status: SectionStatus,

    /// Headcount assigned to this section
    pub assigned_operators: u32,

    /// Opaque ids of linked plan documents
    pub linked_plans: Vec<PlanId>,

    /// Who created the section
    pub created_by: SectionOrigin,

    /// Creation timestamp
    pub created_at: Time,
}

impl Section {
    /// Apply a partial update. `id`, `priority`, and `created_at` are owned
    /// by the store and cannot be patched.
    pub fn apply(&mut self, patch: SectionPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(assigned_operators) = patch.assigned_operators {
            self.assigned_operators = assigned_operators;
        }
    }
}

/// Section status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SectionStatus {
    /// Not yet started
    Pending,
    /// Work underway
    InProgress,
    /// Finished
    Completed,
}

/// Role that created a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionOrigin {
    /// Site engineer
    Engineer,
    /// Project manager
    Manager,
}

/// Parameters for creating a section. The store assigns id, rank, and
/// `created_at`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionSpec {
    /// Section name
    pub name: String,
    /// Optional description
    pub description: Option<String>,
    /// Initial status
    pub status: SectionStatus,
    /// Initial headcount
    pub assigned_operators: u32,
    /// Initially linked plan documents
    pub linked_plans: Vec<PlanId>,
    /// Creating role
    pub created_by: SectionOrigin,
}

impl SectionSpec {
    /// A pending, engineer-created spec with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            status: SectionStatus::Pending,
            assigned_operators: 0,
            linked_plans: Vec::new(),
            created_by: SectionOrigin::Engineer,
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the creating role.
    pub fn created_by(mut self, origin: SectionOrigin) -> Self {
        self.created_by = origin;
        self
    }
}

/// Partial update for a section. Rank changes go through the ordering
/// operations, never through a patch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SectionPatch {
    /// New name
    pub name: Option<String>,
    /// Set or clear the description
    pub description: Option<Option<String>>,
    /// New status
    pub status: Option<SectionStatus>,
    /// New headcount
    pub assigned_operators: Option<u32>,
}
