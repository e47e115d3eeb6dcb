//! FieldPlan core data models.
//!
//! This crate defines the data structures behind the adaptive scheduling
//! core: tasks, priority-ranked sections, environmental signals, and the
//! activity feed.

#![warn(missing_docs)]

// Core identities
mod id;

// Site entities
mod task;
mod section;

// Signals and narration
mod signal;
mod activity;
mod funds;

// Re-exports
pub use id::*;

pub use task::{clamp_progress, Task, TaskKind, TaskPatch, TaskPriority, TaskSpec, TaskStatus};
pub use section::{Section, SectionOrigin, SectionPatch, SectionSpec, SectionStatus};
pub use signal::{EnvSignals, Weather, STAFFING_THRESHOLD};
pub use activity::{ActivityEntry, EntryKind};
pub use funds::Funds;

/// Timestamp type
pub type Time = chrono::DateTime<chrono::Utc>;
