//! Tasks survive restarts, and broken stored data never prevents the dashboard from starting

use chrono::NaiveDate;

use taskdeck::clock::FixedClock;
use taskdeck::reconciler::notification::RecordingNotifier;
use taskdeck::storage::{FileStorage, Storage};
use taskdeck::task_store::TaskStore;
use taskdeck::{ItemId, Reconciler, TaskFilter};


#[test]
fn tasks_are_reloaded_from_files() {
    let _ = env_logger::builder().is_test(true).try_init();
    let dir = tempfile::tempdir().unwrap();
    let today = NaiveDate::from_ymd_opt(2025, 6, 4).unwrap();
    let clock = FixedClock::new(today.and_hms_opt(8, 0, 0).unwrap());

    let mirrored_ids = {
        let tasks = TaskStore::load(FileStorage::new(dir.path()));
        assert!(tasks.is_empty());
        let events = taskdeck::samples::sample_event_store(today);
        let mut reconciler = Reconciler::new(events, tasks, RecordingNotifier::new(), clock);
        assert_eq!(reconciler.mirror_events(), 8);
        let simple = reconciler.add_task("Water the plants".to_string());
        reconciler.toggle_complete(simple.id());

        reconciler.tasks().list().iter().map(|t| t.id().clone()).collect::<Vec<ItemId>>()
    };

    // Next start
    let tasks = TaskStore::load(FileStorage::new(dir.path()));
    assert_eq!(tasks.len(), 9);
    let reloaded_ids: Vec<ItemId> = tasks.list().iter().map(|t| t.id().clone()).collect();
    assert_eq!(reloaded_ids, mirrored_ids);
    assert_eq!(tasks.filter(TaskFilter::Completed).len(), 1);

    // The sample events have stable IDs, so they are not mirrored again
    let events = taskdeck::samples::sample_event_store(today);
    let mut reconciler = Reconciler::new(events, tasks, RecordingNotifier::new(), clock);
    assert_eq!(reconciler.mirror_events(), 0);
}

#[test]
fn persisted_json_shape() {
    let dir = tempfile::tempdir().unwrap();
    let mut tasks = TaskStore::load_from_key(FileStorage::new(dir.path()), "my tasks");
    let task = tasks.add_simple("Call mom".to_string());

    let content = std::fs::read_to_string(dir.path().join("my tasks.json")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&content).unwrap();
    let stored = &json.as_array().unwrap()[0];
    assert_eq!(stored["id"], task.id().as_str());
    assert_eq!(stored["title"], "Call mom");
    assert_eq!(stored["completed"], false);
    assert_eq!(stored["priority"], "medium");
    assert!(stored.get("dueDate").is_none());
    assert!(stored.get("eventId").is_none());
}

#[test]
fn corrupt_files_fall_back_to_an_empty_list() {
    let _ = env_logger::builder().is_test(true).try_init();
    let dir = tempfile::tempdir().unwrap();
    let mut storage = FileStorage::new(dir.path());
    storage.set_item("tasks", "[{\"id\": \"t1\", \"title\": ").unwrap();

    let mut tasks = TaskStore::load_from_key(storage, "tasks");
    assert!(tasks.is_empty());

    // The store is usable, and overwrites the broken data
    tasks.add_simple("Fresh start".to_string());
    let reloaded = TaskStore::load_from_key(FileStorage::new(dir.path()), "tasks");
    assert_eq!(reloaded.len(), 1);
}
