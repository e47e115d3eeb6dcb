//! Task model - the unit of field work on a site.

use serde::{Deserialize, Serialize};
use crate::id::{SectionId, TaskId};

/// A task is a single piece of field work at a location on the site.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier
    pub id: TaskId,

    /// Task title
    pub title: String,

    /// Where on the site the work happens
    pub location: String,

    /// Indoor/outdoor classification, fixed at creation
    pub kind: TaskKind,

    /// Current status
    pub status: TaskStatus,

    /// Current priority
    pub priority: TaskPriority,

    /// Percentage complete (0-100)
    pub progress: u8,

    /// Assigned worker, if any
    pub assignee: Option<String>,

    /// Owning section, if any (weak reference)
    pub section_id: Option<SectionId>,
}

impl Task {
    /// Create a task from a spec, assigning a fresh id and clamping progress.
    pub fn new(spec: TaskSpec) -> Self {
        Self {
            id: TaskId::new(),
            title: spec.title,
            location: spec.location,
            kind: spec.kind,
            status: spec.status,
            priority: spec.priority,
            progress: clamp_progress(spec.progress),
            assignee: spec.assignee,
            section_id: spec.section_id,
        }
    }

    /// Apply a partial update. `id` and `kind` are immutable and cannot be
    /// patched; `progress` is clamped on the way in.
    pub fn apply(&mut self, patch: TaskPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(location) = patch.location {
            self.location = location;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(progress) = patch.progress {
            self.progress = clamp_progress(progress);
        }
        if let Some(assignee) = patch.assignee {
            self.assignee = assignee;
        }
        if let Some(section_id) = patch.section_id {
            self.section_id = section_id;
        }
    }
}

/// Clamp a raw progress value into the 0-100 range.
pub fn clamp_progress(raw: u8) -> u8 {
    raw.min(100)
}

/// Whether a task is exposed to the weather.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskKind {
    /// Work inside a structure, insensitive to weather
    Indoor,
    /// Work in the open, suspended in bad weather
    Outdoor,
}

/// Task status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    /// Not yet started
    Pending,
    /// Currently being worked
    InProgress,
    /// Finished; never touched by the engine again
    Completed,
    /// Suspended by weather
    Blocked,
    /// Pushed back by staffing shortage
    Delayed,
}

/// Task priority, totally ordered (`Critical` highest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    /// Lowest priority
    Low,
    /// Routine work
    Medium,
    /// Should be scheduled ahead of routine work
    High,
    /// Critical path; exempt from staffing delays
    Critical,
}

impl TaskPriority {
    /// Fixed sort weight used by the scheduling engine.
    pub fn weight(self) -> u8 {
        match self {
            Self::Critical => 4,
            Self::High => 3,
            Self::Medium => 2,
            Self::Low => 1,
        }
    }
}

impl std::fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        };
        f.write_str(s)
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
            Self::Blocked => "blocked",
            Self::Delayed => "delayed",
        };
        f.write_str(s)
    }
}

/// Parameters for creating a task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskSpec {
    /// Task title
    pub title: String,
    /// Site location
    pub location: String,
    /// Indoor/outdoor classification
    pub kind: TaskKind,
    /// Initial status
    pub status: TaskStatus,
    /// Initial priority
    pub priority: TaskPriority,
    /// Initial progress (clamped to 0-100)
    pub progress: u8,
    /// Assigned worker
    pub assignee: Option<String>,
    /// Owning section
    pub section_id: Option<SectionId>,
}

impl TaskSpec {
    /// A pending, medium-priority spec with the given title/location/kind.
    pub fn new(title: impl Into<String>, location: impl Into<String>, kind: TaskKind) -> Self {
        Self {
            title: title.into(),
            location: location.into(),
            kind,
            status: TaskStatus::Pending,
            priority: TaskPriority::Medium,
            progress: 0,
            assignee: None,
            section_id: None,
        }
    }

    /// Set the initial status.
    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    /// Set the initial priority.
    pub fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }

    /// Attach the task to a section.
    pub fn in_section(mut self, section_id: SectionId) -> Self {
        self.section_id = Some(section_id);
        self
    }
}

/// Partial update for a task. `None` fields are left untouched; the outer
/// `Option` on `assignee`/`section_id` distinguishes "no change" from
/// "clear the field".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskPatch {
    /// New title
    pub title: Option<String>,
    /// New location
    pub location: Option<String>,
    /// New status
    pub status: Option<TaskStatus>,
    /// New priority
    pub priority: Option<TaskPriority>,
    /// New progress (clamped)
    pub progress: Option<u8>,
    /// Set or clear the assignee
    pub assignee: Option<Option<String>>,
    /// Set or clear the owning section
    pub section_id: Option<Option<SectionId>>,
}
