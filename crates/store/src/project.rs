//! The project store - the single canonical aggregate of site state.

use fieldplan_core::{
    ActivityEntry, EntryKind, EnvSignals, Funds, PlanId, Section, SectionId, SectionPatch,
    SectionSpec, Task, TaskId, TaskPatch, TaskSpec, Weather,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::feed::ActivityFeed;
use crate::{Result, StoreError};

/// Canonical in-memory state for one project: tasks, ranked sections,
/// environmental signals, funds, and the activity feed.
///
/// One explicitly constructed instance per project; callers are expected to
/// serialize access to it (single-writer model). All mutations are
/// synchronous and run to completion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectStore {
    pub(crate) tasks: Vec<Task>,
    /// Kept sorted ascending by rank; the vector order is the display order.
    pub(crate) sections: Vec<Section>,
    pub(crate) weather: Weather,
    pub(crate) personnel_count: u32,
    pub(crate) funds: Funds,
    pub(crate) feed: ActivityFeed,
}

impl ProjectStore {
    /// Create an empty store: sunny, no workforce reported yet.
    pub fn new() -> Self {
        Self {
            tasks: Vec::new(),
            sections: Vec::new(),
            weather: Weather::Sunny,
            personnel_count: 0,
            funds: Funds::default(),
            feed: ActivityFeed::new(),
        }
    }

    // === Task operations ===

    /// Create a task. Fails if the spec references a dead section.
    pub fn create_task(&mut self, spec: TaskSpec) -> Result<&Task> {
        if let Some(section_id) = spec.section_id {
            self.require_section(section_id)?;
        }
        let task = Task::new(spec);
        debug!(task_id = %task.id, title = %task.title, "task created");
        self.tasks.push(task);
        Ok(self.tasks.last().unwrap())
    }

    /// Apply a partial update to a task. Tasks are never deleted.
    pub fn update_task(&mut self, id: TaskId, patch: TaskPatch) -> Result<()> {
        if let Some(Some(section_id)) = patch.section_id {
            self.require_section(section_id)?;
        }
        let task = self
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(StoreError::TaskNotFound(id))?;
        task.apply(patch);
        Ok(())
    }

    /// Look up a task by id.
    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// All tasks in canonical order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Mutable view of all tasks, for the scheduling engine. The slice can
    /// be edited and re-sorted but not grown or shrunk.
    pub fn tasks_mut(&mut self) -> &mut [Task] {
        &mut self.tasks
    }

    // === Section operations ===

    /// Create a section, ranked last among the live set.
    pub fn create_section(&mut self, spec: SectionSpec) -> &Section {
        let section = Section {
            id: SectionId::new(),
            name: spec.name,
            description: spec.description,
            priority: self.sections.len() as u32 + 1,
            status: spec.status,
            assigned_operators: spec.assigned_operators,
            linked_plans: spec.linked_plans,
            created_by: spec.created_by,
            created_at: chrono::Utc::now(),
        };
        debug!(section_id = %section.id, name = %section.name, rank = section.priority, "section created");
        self.sections.push(section);
        self.sections.last().unwrap()
    }

    /// Apply a partial update to a section.
    pub fn update_section(&mut self, id: SectionId, patch: SectionPatch) -> Result<()> {
        let section = self
            .sections
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(StoreError::SectionNotFound(id))?;
        section.apply(patch);
        Ok(())
    }

    /// Delete a section: tasks referencing it survive with their reference
    /// cleared, and the remaining sections are renumbered densely.
    pub fn delete_section(&mut self, id: SectionId) -> Result<()> {
        let pos = self
            .sections
            .iter()
            .position(|s| s.id == id)
            .ok_or(StoreError::SectionNotFound(id))?;
        let section = self.sections.remove(pos);

        let mut cleared = 0usize;
        for task in self.tasks.iter_mut().filter(|t| t.section_id == Some(id)) {
            task.section_id = None;
            cleared += 1;
        }
        self.renumber_sections();
        info!(section_id = %id, name = %section.name, cleared, "section deleted");
        Ok(())
    }

    /// Set the headcount assigned to a section.
    pub fn assign_operators(&mut self, id: SectionId, count: u32) -> Result<()> {
        self.require_section_mut(id)?.assigned_operators = count;
        Ok(())
    }

    /// Link a plan document to a section. Already-linked plans are ignored.
    pub fn link_plan(&mut self, id: SectionId, plan: PlanId) -> Result<()> {
        let section = self.require_section_mut(id)?;
        if !section.linked_plans.contains(&plan) {
            section.linked_plans.push(plan);
        }
        Ok(())
    }

    /// Unlink a plan document from a section.
    pub fn unlink_plan(&mut self, id: SectionId, plan: &PlanId) -> Result<()> {
        let section = self.require_section_mut(id)?;
        section.linked_plans.retain(|p| p != plan);
        Ok(())
    }

    /// Look up a live section by id.
    pub fn section(&self, id: SectionId) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    /// All live sections, ascending by rank.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    // === Environmental signals ===

    /// Replace the current weather. Always succeeds.
    pub fn set_weather(&mut self, weather: Weather) {
        debug!(%weather, "weather signal set");
        self.weather = weather;
    }

    /// Replace the current available headcount. Always succeeds.
    pub fn set_personnel_count(&mut self, count: u32) {
        debug!(count, "personnel signal set");
        self.personnel_count = count;
    }

    /// Current weather.
    pub fn weather(&self) -> Weather {
        self.weather
    }

    /// Current available headcount.
    pub fn personnel_count(&self) -> u32 {
        self.personnel_count
    }

    /// Snapshot of both signals.
    pub fn signals(&self) -> EnvSignals {
        EnvSignals {
            weather: self.weather,
            personnel_count: self.personnel_count,
        }
    }

    // === Funds ===

    /// Replace the stored budget figures.
    pub fn set_funds(&mut self, funds: Funds) {
        self.funds = funds;
    }

    /// Current budget figures.
    pub fn funds(&self) -> Funds {
        self.funds
    }

    // === Activity feed ===

    /// Append an entry to the activity feed.
    pub fn record(&mut self, message: impl Into<String>, kind: EntryKind) -> &ActivityEntry {
        self.feed.record(message, kind)
    }

    /// The activity feed, newest first.
    pub fn feed(&self) -> &ActivityFeed {
        &self.feed
    }

    // === Internal helpers ===

    fn require_section(&self, id: SectionId) -> Result<&Section> {
        self.section(id).ok_or(StoreError::SectionNotFound(id))
    }

    fn require_section_mut(&mut self, id: SectionId) -> Result<&mut Section> {
        self.sections
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(StoreError::SectionNotFound(id))
    }
}

impl Default for ProjectStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldplan_core::{SectionStatus, TaskKind, TaskStatus};

    #[test]
    fn test_create_task_rejects_dead_section() {
        let mut store = ProjectStore::new();
        let spec =
            TaskSpec::new("Foundation", "North sector", TaskKind::Outdoor).in_section(SectionId::new());
        assert!(matches!(
            store.create_task(spec),
            Err(StoreError::SectionNotFound(_))
        ));
        assert!(store.tasks().is_empty());
    }

    #[test]
    fn test_update_task_not_found() {
        let mut store = ProjectStore::new();
        let err = store.update_task(TaskId::new(), TaskPatch::default());
        assert!(matches!(err, Err(StoreError::TaskNotFound(_))));
    }

    #[test]
    fn test_update_section_not_found() {
        let mut store = ProjectStore::new();
        let err = store.update_section(SectionId::new(), SectionPatch::default());
        assert!(matches!(err, Err(StoreError::SectionNotFound(_))));
    }

    #[test]
    fn test_delete_section_clears_task_refs_but_keeps_tasks() {
        let mut store = ProjectStore::new();
        let kept = store.create_section(SectionSpec::new("Electrical")).id;
        let doomed = store.create_section(SectionSpec::new("Foundations")).id;

        let in_doomed = store
            .create_task(
                TaskSpec::new("Pour slab", "South sector", TaskKind::Outdoor).in_section(doomed),
            )
            .unwrap()
            .id;
        let in_kept = store
            .create_task(TaskSpec::new("Wiring P1", "Tower B", TaskKind::Indoor).in_section(kept))
            .unwrap()
            .id;

        store.delete_section(doomed).unwrap();

        assert_eq!(store.tasks().len(), 2);
        assert_eq!(store.task(in_doomed).unwrap().section_id, None);
        assert_eq!(store.task(in_kept).unwrap().section_id, Some(kept));
        assert!(store.section(doomed).is_none());
    }

    #[test]
    fn test_update_section_patch_fields() {
        let mut store = ProjectStore::new();
        let id = store.create_section(SectionSpec::new("Finishes")).id;

        store
            .update_section(
                id,
                SectionPatch {
                    status: Some(SectionStatus::InProgress),
                    assigned_operators: Some(8),
                    ..Default::default()
                },
            )
            .unwrap();

        let section = store.section(id).unwrap();
        assert_eq!(section.status, SectionStatus::InProgress);
        assert_eq!(section.assigned_operators, 8);
        assert_eq!(section.name, "Finishes");
    }

    #[test]
    fn test_link_plan_is_idempotent() {
        let mut store = ProjectStore::new();
        let id = store.create_section(SectionSpec::new("Foundations")).id;

        store.link_plan(id, PlanId::from("plan-7")).unwrap();
        store.link_plan(id, PlanId::from("plan-7")).unwrap();
        assert_eq!(store.section(id).unwrap().linked_plans.len(), 1);

        store.unlink_plan(id, &PlanId::from("plan-7")).unwrap();
        assert!(store.section(id).unwrap().linked_plans.is_empty());
    }

    #[test]
    fn test_signal_setters_always_succeed() {
        let mut store = ProjectStore::new();
        store.set_weather(Weather::Storm);
        store.set_personnel_count(12);
        assert_eq!(store.weather(), Weather::Storm);
        assert_eq!(store.personnel_count(), 12);
        assert!(store.signals().understaffed());
    }

    #[test]
    fn test_reattach_task_to_dead_section_rejected() {
        let mut store = ProjectStore::new();
        let id = store
            .create_task(TaskSpec::new("Excavation", "Perimeter", TaskKind::Outdoor))
            .unwrap()
            .id;

        let patch = TaskPatch {
            section_id: Some(Some(SectionId::new())),
            ..Default::default()
        };
        assert!(matches!(
            store.update_task(id, patch),
            Err(StoreError::SectionNotFound(_))
        ));
        // Unrelated fields from the failed patch must not have leaked in.
        assert_eq!(store.task(id).unwrap().status, TaskStatus::Pending);
    }
}
