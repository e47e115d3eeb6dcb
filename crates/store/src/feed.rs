//! Activity feed - newest-first narration of what the system did.

use fieldplan_core::{ActivityEntry, EntryKind};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Maximum entries retained; the oldest are evicted past this point.
pub const FEED_CAP: usize = 512;

/// Newest-first feed of activity entries.
///
/// Append-only from the caller's view: existing entries are never edited or
/// reordered. The backing buffer is capped at [`FEED_CAP`], so only the
/// oldest entries are ever dropped.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActivityFeed {
    entries: VecDeque<ActivityEntry>,
}

impl ActivityFeed {
    /// Create an empty feed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new entry, stamped with the current local time, at the
    /// front of the feed.
    pub fn record(&mut self, message: impl Into<String>, kind: EntryKind) -> &ActivityEntry {
        self.entries.push_front(ActivityEntry::new(message, kind));
        self.entries.truncate(FEED_CAP);
        &self.entries[0]
    }

    /// Iterate entries, newest first.
    pub fn entries(&self) -> impl Iterator<Item = &ActivityEntry> {
        self.entries.iter()
    }

    /// Number of retained entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the feed is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
