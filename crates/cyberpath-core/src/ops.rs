use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::datastore::DataStore;
use crate::messages;
use crate::prefs::Preferences;
use crate::task::{Category, Task, next_task_id, seed_tasks};

/// The whole application state: both preference scalars and the task list.
/// Operations mutate it in memory and report a [`Notice`]; the command layer
/// persists after a `Success` and re-renders from the state.
#[derive(Debug)]
pub struct AppState {
    pub prefs: Preferences,
    pub tasks: Vec<Task>,
}

impl AppState {
    /// Loads preferences and the task list. A never-persisted list gets the
    /// three sample tasks, written back immediately.
    #[tracing::instrument(skip(store, now))]
    pub fn load(store: &DataStore, now: DateTime<Utc>) -> anyhow::Result<Self> {
        let prefs = Preferences::load(store)?;
        let tasks = match store.load_tasks()? {
            Some(tasks) => tasks,
            None => {
                let seeded = seed_tasks(now);
                info!(count = seeded.len(), "first run; installing sample tasks");
                store.save_tasks(&seeded)?;
                seeded
            }
        };
        Ok(Self { prefs, tasks })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// State changed; the caller persists the list.
    Success,
    /// Nothing changed, informational only.
    Info,
    /// Input rejected, nothing changed.
    Error,
}

/// Transient user-facing feedback, already localized for the active language.
#[derive(Debug, Clone)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            text: text.into(),
        }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            text: text.into(),
        }
    }

    #[must_use]
    pub fn changed_state(&self) -> bool {
        self.kind == NoticeKind::Success
    }
}

/// Blank text (after trimming) is rejected with no state change. Otherwise
/// the task is prepended, newest first.
#[tracing::instrument(skip(state, now))]
pub fn add_task(state: &mut AppState, text: &str, category: Category, now: DateTime<Utc>) -> Notice {
    let language = state.prefs.language;
    let text = text.trim();
    if text.is_empty() {
        return Notice::error(messages::empty_task_text(language));
    }

    let id = next_task_id(now, &state.tasks);
    state
        .tasks
        .insert(0, Task::new(text.to_string(), category, now, id));

    debug!(id, count = state.tasks.len(), "task added");
    Notice::success(messages::task_added(language))
}

#[tracing::instrument(skip(state))]
pub fn toggle_task(state: &mut AppState, id: u64) -> Notice {
    let language = state.prefs.language;
    match state.tasks.iter_mut().find(|task| task.id == id) {
        Some(task) => {
            task.completed = !task.completed;
            if task.completed {
                Notice::success(messages::task_completed(language))
            } else {
                Notice::success(messages::task_reactivated(language))
            }
        }
        None => Notice::info(messages::no_such_task(language, id)),
    }
}

#[tracing::instrument(skip(state))]
pub fn delete_task(state: &mut AppState, id: u64) -> Notice {
    let language = state.prefs.language;
    let before = state.tasks.len();
    state.tasks.retain(|task| task.id != id);

    if state.tasks.len() == before {
        Notice::info(messages::no_such_task(language, id))
    } else {
        Notice::success(messages::task_deleted(language))
    }
}

/// Replacement text must be non-empty after trimming; `created_at` is never
/// touched.
#[tracing::instrument(skip(state, new_text))]
pub fn edit_task(state: &mut AppState, id: u64, new_text: &str) -> Notice {
    let language = state.prefs.language;
    let new_text = new_text.trim();
    if new_text.is_empty() {
        return Notice::error(messages::empty_task_text(language));
    }

    match state.tasks.iter_mut().find(|task| task.id == id) {
        Some(task) => {
            task.text = new_text.to_string();
            Notice::success(messages::task_updated(language))
        }
        None => Notice::info(messages::no_such_task(language, id)),
    }
}

#[must_use]
pub fn completed_count(state: &AppState) -> usize {
    state.tasks.iter().filter(|task| task.completed).count()
}

#[tracing::instrument(skip(state))]
pub fn clear_completed(state: &mut AppState) -> Notice {
    let language = state.prefs.language;
    let before = state.tasks.len();
    state.tasks.retain(|task| !task.completed);
    let removed = before - state.tasks.len();

    if removed == 0 {
        Notice::info(messages::nothing_to_clear(language))
    } else {
        info!(removed, "cleared completed tasks");
        Notice::success(messages::cleared_completed(language, removed))
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};

    use super::{
        AppState, NoticeKind, add_task, clear_completed, completed_count, delete_task, edit_task,
        toggle_task,
    };
    use crate::prefs::Preferences;
    use crate::task::{Category, Task};

    fn fixed_now() -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 10, 12, 0, 0)
            .single()
            .expect("valid now")
    }

    fn state_with(tasks: Vec<Task>) -> AppState {
        AppState {
            prefs: Preferences::default(),
            tasks,
        }
    }

    #[test]
    fn blank_add_is_rejected_without_mutation() {
        let mut state = state_with(vec![]);
        let notice = add_task(&mut state, "   \t ", Category::Pentest, fixed_now());
        assert_eq!(notice.kind, NoticeKind::Error);
        assert!(state.tasks.is_empty());
    }

    #[test]
    fn add_prepends_a_fresh_active_task() {
        let now = fixed_now();
        let mut state = state_with(vec![Task::new(
            "older".to_string(),
            Category::Cloud,
            now - Duration::days(1),
            1,
        )]);

        let notice = add_task(&mut state, "Learn TCP handshake", Category::Pentest, now);
        assert!(notice.changed_state());
        assert_eq!(state.tasks.len(), 2);
        assert_eq!(state.tasks[0].text, "Learn TCP handshake");
        assert_eq!(state.tasks[0].category, Category::Pentest);
        assert!(!state.tasks[0].completed);
        assert_eq!(state.tasks[1].text, "older");
    }

    #[test]
    fn double_toggle_restores_original_state() {
        let now = fixed_now();
        let mut state = state_with(vec![Task::new("t".to_string(), Category::Iot, now, 7)]);

        assert!(toggle_task(&mut state, 7).changed_state());
        assert!(state.tasks[0].completed);
        assert!(toggle_task(&mut state, 7).changed_state());
        assert!(!state.tasks[0].completed);
    }

    #[test]
    fn toggle_of_unknown_id_is_a_noop() {
        let now = fixed_now();
        let mut state = state_with(vec![Task::new("t".to_string(), Category::Iot, now, 7)]);
        let notice = toggle_task(&mut state, 99);
        assert_eq!(notice.kind, NoticeKind::Info);
        assert!(!state.tasks[0].completed);
    }

    #[test]
    fn delete_removes_exactly_one_task() {
        let now = fixed_now();
        let mut state = state_with(vec![
            Task::new("a".to_string(), Category::Pentest, now, 1),
            Task::new("b".to_string(), Category::Analysis, now, 2),
            Task::new("c".to_string(), Category::Malware, now, 3),
        ]);

        assert!(delete_task(&mut state, 2).changed_state());
        let remaining: Vec<&str> = state.tasks.iter().map(|task| task.text.as_str()).collect();
        assert_eq!(remaining, vec!["a", "c"]);

        let notice = delete_task(&mut state, 2);
        assert_eq!(notice.kind, NoticeKind::Info);
        assert_eq!(state.tasks.len(), 2);
    }

    #[test]
    fn edit_rejects_blank_and_keeps_created_at() {
        let now = fixed_now();
        let created = now - Duration::days(3);
        let mut state = state_with(vec![Task::new(
            "original".to_string(),
            Category::Governance,
            created,
            5,
        )]);

        let rejected = edit_task(&mut state, 5, "  ");
        assert_eq!(rejected.kind, NoticeKind::Error);
        assert_eq!(state.tasks[0].text, "original");

        let applied = edit_task(&mut state, 5, "  rewritten  ");
        assert!(applied.changed_state());
        assert_eq!(state.tasks[0].text, "rewritten");
        assert_eq!(state.tasks[0].created_at, created);
    }

    #[test]
    fn clear_completed_keeps_active_tasks() {
        let now = fixed_now();
        let mut a = Task::new("A".to_string(), Category::Pentest, now, 1);
        let mut b = Task::new("B".to_string(), Category::Analysis, now, 2);
        let mut c = Task::new("C".to_string(), Category::Cloud, now, 3);
        a.completed = false;
        b.completed = true;
        c.completed = true;
        let mut state = state_with(vec![a, b, c]);

        assert_eq!(completed_count(&state), 2);
        let notice = clear_completed(&mut state);
        assert!(notice.changed_state());
        assert_eq!(state.tasks.len(), 1);
        assert_eq!(state.tasks[0].text, "A");

        let nothing = clear_completed(&mut state);
        assert_eq!(nothing.kind, NoticeKind::Info);
        assert_eq!(state.tasks.len(), 1);
    }
}
