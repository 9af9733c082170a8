use chrono::{TimeZone, Utc};
use cyberpath_core::datastore::DataStore;
use cyberpath_core::filter::Filter;
use cyberpath_core::ops::{self, AppState};
use cyberpath_core::prefs::{Language, Preferences, Theme};
use cyberpath_core::task::Category;
use tempfile::tempdir;

fn fixed_now() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 10, 12, 0, 0)
        .single()
        .expect("valid now")
}

#[test]
fn first_run_seeds_and_persists_sample_tasks() {
    let temp = tempdir().expect("tempdir");
    let store = DataStore::open(temp.path()).expect("open datastore");

    let state = AppState::load(&store, fixed_now()).expect("load state");
    assert_eq!(state.tasks.len(), 3);

    // Seeding happens once; the seeded list is already on disk.
    let persisted = store
        .load_tasks()
        .expect("load tasks")
        .expect("tasks file exists after seeding");
    assert_eq!(persisted.len(), 3);
}

#[test]
fn mutations_survive_a_reload_verbatim() {
    let temp = tempdir().expect("tempdir");
    let store = DataStore::open(temp.path()).expect("open datastore");
    let now = fixed_now();

    let mut state = AppState::load(&store, now).expect("load state");
    let notice = ops::add_task(&mut state, "Learn TCP handshake", Category::Pentest, now);
    assert!(notice.changed_state());
    store.save_tasks(&state.tasks).expect("save tasks");

    let head_id = state.tasks[0].id;
    assert!(ops::toggle_task(&mut state, head_id).changed_state());
    store.save_tasks(&state.tasks).expect("save tasks");

    let reloaded = AppState::load(&store, now).expect("reload state");
    assert_eq!(reloaded.tasks.len(), state.tasks.len());
    for (before, after) in state.tasks.iter().zip(&reloaded.tasks) {
        assert_eq!(before.id, after.id);
        assert_eq!(before.text, after.text);
        assert_eq!(before.category, after.category);
        assert_eq!(before.completed, after.completed);
        assert_eq!(before.created_at, after.created_at);
    }
    assert_eq!(reloaded.tasks[0].text, "Learn TCP handshake");
    assert!(reloaded.tasks[0].completed);
}

#[test]
fn preferences_round_trip_with_silent_defaults() {
    let temp = tempdir().expect("tempdir");
    let store = DataStore::open(temp.path()).expect("open datastore");

    // Nothing persisted yet: defaults apply.
    let prefs = Preferences::load(&store).expect("load prefs");
    assert_eq!(prefs.language, Language::En);
    assert_eq!(prefs.theme, Theme::Light);

    let mut prefs = prefs;
    prefs.toggle_language(&store).expect("toggle language");
    prefs.toggle_theme(&store).expect("toggle theme");

    let reloaded = Preferences::load(&store).expect("reload prefs");
    assert_eq!(reloaded.language, Language::Ar);
    assert_eq!(reloaded.theme, Theme::Dark);
}

#[test]
fn filtered_listing_matches_category_and_status() {
    let temp = tempdir().expect("tempdir");
    let store = DataStore::open(temp.path()).expect("open datastore");
    let now = fixed_now();

    let mut state = AppState::load(&store, now).expect("load state");
    ops::add_task(&mut state, "Capture a PCAP of the handshake", Category::Pentest, now);
    ops::add_task(&mut state, "Build a Splunk dashboard", Category::Analysis, now);
    store.save_tasks(&state.tasks).expect("save tasks");

    // One seed task is also in the analysis category; newest first.
    let filter = Filter::parse(&["analysis".to_string()]).expect("parse filter");
    let matched: Vec<&str> = state
        .tasks
        .iter()
        .filter(|task| filter.matches(task))
        .map(|task| task.text.as_str())
        .collect();
    assert_eq!(
        matched,
        vec!["Build a Splunk dashboard", "Set up a SIEM home lab with two VMs"]
    );

    let regex = Filter::parse(&["/pcap/".to_string()]).expect("parse regex filter");
    let matched: Vec<&str> = state
        .tasks
        .iter()
        .filter(|task| regex.matches(task))
        .map(|task| task.text.as_str())
        .collect();
    assert_eq!(matched, vec!["Capture a PCAP of the handshake"]);
}
