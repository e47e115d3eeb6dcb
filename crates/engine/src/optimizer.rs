//! The re-prioritization algorithm.
//!
//! One synchronous run over the whole task set:
//!
//! ```text
//! Weather pass → Staffing pass → Stable re-sort → Feed summary
//! ```
//!
//! The passes are independent and order-dependent: weather acts on task
//! kind, staffing acts on the already-weather-adjusted priority. Only
//! `Critical` tasks are exempt from the staffing pass, and `Completed`
//! tasks are never touched by either pass.

use std::cmp::Reverse;

use fieldplan_core::{EntryKind, TaskKind, TaskPriority, TaskStatus, Weather};
use fieldplan_store::ProjectStore;
use tracing::{debug, info};

/// Which passes fired during one optimization run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptimizeOutcome {
    /// Outdoor work was suspended for weather
    pub climate_pass: bool,
    /// Non-critical work was delayed for understaffing
    pub staffing_pass: bool,
}

/// Recompute task status and priority from the current signals, then
/// re-sort the canonical task order.
///
/// Total: never fails for any well-formed store. Idempotent under
/// unchanged signals — a second run leaves task state and order identical
/// and only appends to the feed.
pub fn optimize_schedule(store: &mut ProjectStore) -> OptimizeOutcome {
    let signals = store.signals();
    info!(
        weather = %signals.weather,
        personnel = signals.personnel_count,
        tasks = store.tasks().len(),
        "optimizing schedule"
    );

    let climate_pass = weather_pass(store, signals.weather);
    if climate_pass {
        store.record(
            "CLIMATE ALERT: reorganizing schedule for bad weather.",
            EntryKind::AiAlert,
        );
    }

    let staffing_pass = staffing_pass(store, signals.understaffed());
    if staffing_pass {
        store.record(
            "RESOURCES: insufficient staffing detected. Prioritizing critical paths.",
            EntryKind::AiAlert,
        );
    }

    // Stable: equal weights keep their prior relative order.
    store
        .tasks_mut()
        .sort_by_key(|t| Reverse(t.priority.weight()));

    let mut summary = String::from("Optimization complete:");
    if climate_pass {
        summary.push_str(" outdoor work suspended for weather.");
    }
    if staffing_pass {
        summary.push_str(" critical tasks prioritized over understaffed work.");
    }
    store.record(summary, EntryKind::Update);

    OptimizeOutcome {
        climate_pass,
        staffing_pass,
    }
}

/// Weather pass. Returns whether the suspension branch fired; the sunny
/// reset branch is silent.
fn weather_pass(store: &mut ProjectStore, weather: Weather) -> bool {
    if weather.suspends_outdoor_work() {
        let mut suspended = 0usize;
        for task in store.tasks_mut() {
            match (task.kind, task.status) {
                (TaskKind::Outdoor, status) if status != TaskStatus::Completed => {
                    task.status = TaskStatus::Blocked;
                    task.priority = TaskPriority::Low;
                    suspended += 1;
                }
                (TaskKind::Indoor, TaskStatus::Pending) => {
                    task.priority = TaskPriority::High;
                }
                _ => {}
            }
        }
        debug!(suspended, "outdoor work suspended");
        true
    } else {
        for task in store.tasks_mut() {
            if task.kind == TaskKind::Outdoor && task.status == TaskStatus::Blocked {
                task.status = TaskStatus::Pending;
                task.priority = TaskPriority::High;
            }
        }
        false
    }
}

/// Staffing pass. Delays every non-critical, non-completed task when the
/// headcount is below the shortage threshold.
fn staffing_pass(store: &mut ProjectStore, understaffed: bool) -> bool {
    if !understaffed {
        return false;
    }
    let mut delayed = 0usize;
    for task in store.tasks_mut() {
        if task.priority != TaskPriority::Critical && task.status != TaskStatus::Completed {
            task.status = TaskStatus::Delayed;
            delayed += 1;
        }
    }
    debug!(delayed, "non-critical work delayed");
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldplan_core::{TaskId, TaskSpec};

    fn add_task(
        store: &mut ProjectStore,
        title: &str,
        kind: TaskKind,
        status: TaskStatus,
        priority: TaskPriority,
    ) -> TaskId {
        store
            .create_task(
                TaskSpec::new(title, "site", kind)
                    .with_status(status)
                    .with_priority(priority),
            )
            .unwrap()
            .id
    }

    fn staffed_store(weather: Weather) -> ProjectStore {
        let mut store = ProjectStore::new();
        store.set_weather(weather);
        store.set_personnel_count(45);
        store
    }

    #[test]
    fn test_storm_blocks_all_non_completed_outdoor_work() {
        let mut store = staffed_store(Weather::Storm);
        let pending = add_task(&mut store, "dig", TaskKind::Outdoor, TaskStatus::Pending, TaskPriority::Medium);
        let active = add_task(&mut store, "pour", TaskKind::Outdoor, TaskStatus::InProgress, TaskPriority::Critical);
        let done = add_task(&mut store, "fence", TaskKind::Outdoor, TaskStatus::Completed, TaskPriority::High);

        let outcome = optimize_schedule(&mut store);
        assert!(outcome.climate_pass);
        assert!(!outcome.staffing_pass);

        for id in [pending, active] {
            let task = store.task(id).unwrap();
            assert_eq!(task.status, TaskStatus::Blocked);
            assert_eq!(task.priority, TaskPriority::Low);
        }
        // Completed work is never engine-mutated.
        let task = store.task(done).unwrap();
        assert_eq!(task.status, TaskStatus::Completed);
        assert_eq!(task.priority, TaskPriority::High);
    }

    #[test]
    fn test_rain_promotes_pending_indoor_work() {
        let mut store = staffed_store(Weather::Rain);
        let pending = add_task(&mut store, "wiring", TaskKind::Indoor, TaskStatus::Pending, TaskPriority::Medium);
        let active = add_task(&mut store, "paint", TaskKind::Indoor, TaskStatus::InProgress, TaskPriority::Low);

        optimize_schedule(&mut store);

        let task = store.task(pending).unwrap();
        assert_eq!(task.priority, TaskPriority::High);
        assert_eq!(task.status, TaskStatus::Pending);
        // Only pending indoor work is promoted.
        assert_eq!(store.task(active).unwrap().priority, TaskPriority::Low);
    }

    #[test]
    fn test_sunny_resets_blocked_outdoor_work_silently() {
        let mut store = staffed_store(Weather::Sunny);
        let blocked = add_task(&mut store, "dig", TaskKind::Outdoor, TaskStatus::Blocked, TaskPriority::Low);
        let delayed = add_task(&mut store, "pour", TaskKind::Outdoor, TaskStatus::Delayed, TaskPriority::Medium);

        let outcome = optimize_schedule(&mut store);
        assert!(!outcome.climate_pass);

        let task = store.task(blocked).unwrap();
        assert_eq!(task.status, TaskStatus::Pending);
        assert_eq!(task.priority, TaskPriority::High);
        // Only blocked outdoor work is reset.
        assert_eq!(store.task(delayed).unwrap().status, TaskStatus::Delayed);
        // Silent branch: only the final summary entry was recorded.
        assert_eq!(store.feed().len(), 1);
    }

    #[test]
    fn test_staffing_shortage_delays_all_but_critical() {
        let mut store = ProjectStore::new();
        store.set_weather(Weather::Sunny);
        store.set_personnel_count(20);
        let routine = add_task(&mut store, "paint", TaskKind::Indoor, TaskStatus::InProgress, TaskPriority::Medium);
        let critical = add_task(&mut store, "slab", TaskKind::Outdoor, TaskStatus::Pending, TaskPriority::Critical);
        let done = add_task(&mut store, "fence", TaskKind::Outdoor, TaskStatus::Completed, TaskPriority::Low);

        let outcome = optimize_schedule(&mut store);
        assert!(outcome.staffing_pass);

        assert_eq!(store.task(routine).unwrap().status, TaskStatus::Delayed);
        assert_eq!(store.task(critical).unwrap().status, TaskStatus::Pending);
        assert_eq!(store.task(done).unwrap().status, TaskStatus::Completed);
    }

    #[test]
    fn test_weather_promotion_does_not_escape_staffing_pass() {
        // Rain promotes pending indoor work to High, but High is still
        // caught by the staffing pass; only Critical escapes.
        let mut store = ProjectStore::new();
        store.set_weather(Weather::Rain);
        store.set_personnel_count(10);
        let indoor = add_task(&mut store, "wiring", TaskKind::Indoor, TaskStatus::Pending, TaskPriority::Medium);

        optimize_schedule(&mut store);

        let task = store.task(indoor).unwrap();
        assert_eq!(task.priority, TaskPriority::High);
        assert_eq!(task.status, TaskStatus::Delayed);
    }

    #[test]
    fn test_final_order_is_stable_by_descending_weight() {
        let mut store = staffed_store(Weather::Sunny);
        let low_a = add_task(&mut store, "low a", TaskKind::Indoor, TaskStatus::InProgress, TaskPriority::Low);
        let high = add_task(&mut store, "high", TaskKind::Indoor, TaskStatus::InProgress, TaskPriority::High);
        let low_b = add_task(&mut store, "low b", TaskKind::Indoor, TaskStatus::InProgress, TaskPriority::Low);
        let critical = add_task(&mut store, "critical", TaskKind::Indoor, TaskStatus::InProgress, TaskPriority::Critical);

        optimize_schedule(&mut store);

        let order: Vec<_> = store.tasks().iter().map(|t| t.id).collect();
        assert_eq!(order, vec![critical, high, low_a, low_b]);
    }

    #[test]
    fn test_idempotent_under_unchanged_signals() {
        let mut store = ProjectStore::new();
        store.set_weather(Weather::Storm);
        store.set_personnel_count(20);
        add_task(&mut store, "dig", TaskKind::Outdoor, TaskStatus::Pending, TaskPriority::High);
        add_task(&mut store, "wiring", TaskKind::Indoor, TaskStatus::Pending, TaskPriority::Medium);
        add_task(&mut store, "slab", TaskKind::Outdoor, TaskStatus::InProgress, TaskPriority::Critical);

        let first = optimize_schedule(&mut store);
        let state_after_first: Vec<_> = store
            .tasks()
            .iter()
            .map(|t| (t.id, t.status, t.priority))
            .collect();
        let feed_len = store.feed().len();

        let second = optimize_schedule(&mut store);
        let state_after_second: Vec<_> = store
            .tasks()
            .iter()
            .map(|t| (t.id, t.status, t.priority))
            .collect();

        assert_eq!(first, second);
        assert_eq!(state_after_first, state_after_second);
        // Only the feed grows: same entry count again on the second run.
        assert_eq!(store.feed().len(), feed_len * 2);
    }

    #[test]
    fn test_quiet_run_records_one_summary_entry() {
        let mut store = staffed_store(Weather::Sunny);
        add_task(&mut store, "paint", TaskKind::Indoor, TaskStatus::InProgress, TaskPriority::Low);

        let outcome = optimize_schedule(&mut store);
        assert_eq!(outcome, OptimizeOutcome { climate_pass: false, staffing_pass: false });
        assert_eq!(store.feed().len(), 1);
        assert_eq!(store.feed().entries().next().unwrap().kind, EntryKind::Update);
    }

    #[test]
    fn test_storm_and_shortage_record_two_alerts_and_a_summary() {
        let mut store = ProjectStore::new();
        store.set_weather(Weather::Storm);
        store.set_personnel_count(5);
        add_task(&mut store, "dig", TaskKind::Outdoor, TaskStatus::Pending, TaskPriority::Medium);

        optimize_schedule(&mut store);

        let kinds: Vec<_> = store.feed().entries().map(|e| e.kind).collect();
        // Newest first: summary, staffing alert, climate alert.
        assert_eq!(kinds, vec![EntryKind::Update, EntryKind::AiAlert, EntryKind::AiAlert]);
    }

    #[test]
    fn test_example_scenario() {
        // Three tasks, sunny -> storm with full staffing.
        let mut store = staffed_store(Weather::Sunny);
        let t1 = add_task(&mut store, "t1", TaskKind::Outdoor, TaskStatus::Pending, TaskPriority::High);
        let t2 = add_task(&mut store, "t2", TaskKind::Indoor, TaskStatus::Pending, TaskPriority::Medium);
        let t3 = add_task(&mut store, "t3", TaskKind::Outdoor, TaskStatus::InProgress, TaskPriority::Critical);

        store.set_weather(Weather::Storm);
        optimize_schedule(&mut store);

        let task1 = store.task(t1).unwrap();
        assert_eq!((task1.status, task1.priority), (TaskStatus::Blocked, TaskPriority::Low));
        let task2 = store.task(t2).unwrap();
        assert_eq!((task2.status, task2.priority), (TaskStatus::Pending, TaskPriority::High));
        // Weather suspension applies regardless of prior priority.
        let task3 = store.task(t3).unwrap();
        assert_eq!((task3.status, task3.priority), (TaskStatus::Blocked, TaskPriority::Low));

        let order: Vec<_> = store.tasks().iter().map(|t| t.id).collect();
        assert_eq!(order, vec![t2, t1, t3]);
    }
}
