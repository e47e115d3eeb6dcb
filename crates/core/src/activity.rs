//! Activity feed entries - atoms of the site narration timeline.

use crate::id::EntryId;
use serde::{Deserialize, Serialize};

/// One entry in the activity feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityEntry {
    /// Unique identifier
    pub id: EntryId,

    /// Formatted local clock time when the entry was recorded
    pub time: String,

    /// Human-readable message
    pub message: String,

    /// Entry kind
    pub kind: EntryKind,
}

impl ActivityEntry {
    /// Create a new entry stamped with the current local time.
    pub fn new(message: impl Into<String>, kind: EntryKind) -> Self {
        Self {
            id: EntryId::new(),
            time: chrono::Local::now().format("%H:%M").to_string(),
            message: message.into(),
            kind,
        }
    }
}

/// Kinds of activity feed entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntryKind {
    /// Engine-generated alert (climate or staffing)
    AiAlert,
    /// General status update
    Update,
    /// Transcribed voice note from the field
    VoiceLog,
}
