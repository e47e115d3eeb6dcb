//! Section ordering - the dense 1-based rank over live sections.
//!
//! The invariant: after every create, delete, or reorder, the live ranks
//! are exactly `1..=N` with no duplicates, and the section vector is kept
//! in ascending rank order.

use fieldplan_core::SectionId;
use std::collections::HashSet;
use tracing::debug;

use crate::{ProjectStore, Result, StoreError};

impl ProjectStore {
    /// Reorder sections under a full-replacement contract.
    ///
    /// Ids in `ordered` take ranks `1..=k` in the given order. Live
    /// sections not listed keep their prior relative order and are appended
    /// at ranks `k+1..=N`. An unknown or duplicated id rejects the whole
    /// call and leaves every rank untouched.
    pub fn reorder_sections(&mut self, ordered: &[SectionId]) -> Result<()> {
        let mut seen = HashSet::with_capacity(ordered.len());
        for &id in ordered {
            if self.section(id).is_none() {
                return Err(StoreError::SectionNotFound(id));
            }
            if !seen.insert(id) {
                return Err(StoreError::DuplicateReorderId(id));
            }
        }

        let mut remaining = std::mem::take(&mut self.sections);
        let mut reordered = Vec::with_capacity(remaining.len());
        for &id in ordered {
            if let Some(pos) = remaining.iter().position(|s| s.id == id) {
                reordered.push(remaining.remove(pos));
            }
        }
        // Unlisted sections follow in their prior relative order.
        reordered.append(&mut remaining);

        self.sections = reordered;
        self.renumber_sections();
        debug!(listed = ordered.len(), total = self.sections.len(), "sections reordered");
        Ok(())
    }

    /// Reassign ranks 1..=N in current vector order.
    pub(crate) fn renumber_sections(&mut self) {
        for (index, section) in self.sections.iter_mut().enumerate() {
            section.priority = index as u32 + 1;
        }
    }
}
