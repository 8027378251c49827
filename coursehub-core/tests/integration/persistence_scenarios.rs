//! Catalog persistence scenarios

use super::{draft, open_file_hub, write_catalog};
use coursehub_core::{
    ActingIdentity, CourseBackend, CourseHub, CourseHubError, JsonFileBackend, MemoryBackend,
    PersistOutcome, Role,
};
use std::sync::Arc;
use tempfile::TempDir;

#[tokio::test]
async fn test_reload_reproduces_catalog() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("courses.json");
    write_catalog(&path, &[]);

    let hub = open_file_hub(&path);
    for (i, owner) in ["user01", "user02", "admin01", "subadmin01"].iter().enumerate() {
        hub.add_course(draft(&format!("Course {}", i), owner, owner))
            .unwrap();
    }
    let admin = ActingIdentity::new("admin01", Role::Admin);
    let second = hub.list_courses()[1].id;
    hub.delete_course(second, &admin).unwrap();
    hub.flush().await;

    let expected = hub.list_courses();
    drop(hub);

    let reopened = open_file_hub(&path);
    assert_eq!(reopened.list_courses(), expected);
}

#[tokio::test]
async fn test_loaded_ids_are_never_reused() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("courses.json");

    let far_future = draft("Seed", "user01", "ChungHo")
        .into_course(4_102_444_800_000)
        .unwrap();
    write_catalog(&path, &[far_future.clone()]);

    let hub = open_file_hub(&path);
    let added = hub.add_course(draft("New", "user02", "User2")).unwrap();
    assert!(added.id > far_future.id);
}

#[tokio::test]
async fn test_unreadable_catalog_fails_to_open() {
    let dir = TempDir::new().unwrap();

    let missing = CourseHub::open(Arc::new(JsonFileBackend::new(dir.path().join("nope.json"))));
    assert!(matches!(missing, Err(CourseHubError::Storage(_))));

    let path = dir.path().join("broken.json");
    std::fs::write(&path, "[{\"id\": \"not a number\"}]").unwrap();
    let broken = CourseHub::open(Arc::new(JsonFileBackend::new(&path)));
    assert!(matches!(broken, Err(CourseHubError::Serialization(_))));
}

#[tokio::test]
async fn test_write_failure_keeps_memory_state() {
    let backend = Arc::new(MemoryBackend::new());
    let hub = CourseHub::open(backend.clone()).unwrap();
    let mut events = hub.subscribe_persist_events();

    hub.add_course(draft("Kept", "user01", "ChungHo")).unwrap();
    let first = events.recv().await.unwrap();
    assert_eq!(first.outcome, PersistOutcome::Written);

    backend.fail_writes(true);
    let lost = hub.add_course(draft("Only in memory", "user01", "ChungHo")).unwrap();
    let second = events.recv().await.unwrap();
    assert!(second.is_failure());
    assert_eq!(second.location, "memory");

    assert!(hub.list_courses().contains(&lost));
    assert_eq!(backend.snapshot().len(), 1);

    // The next successful write catches storage up.
    backend.fail_writes(false);
    hub.add_course(draft("Recovery", "user02", "User2")).unwrap();
    hub.flush().await;
    assert_eq!(backend.snapshot(), hub.list_courses());
}

#[tokio::test]
async fn test_catalog_written_through_backend_trait() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("courses.json");
    let backend = JsonFileBackend::new(&path).create_if_missing(true);

    let hub = CourseHub::open(Arc::new(backend.clone())).unwrap();
    assert!(hub.list_courses().is_empty());

    let course = hub.add_course(draft("Fresh", "user01", "ChungHo")).unwrap();
    hub.flush().await;

    assert_eq!(backend.load().unwrap(), vec![course]);
}

#[tokio::test]
async fn test_unknown_catalog_keys_survive_rewrite() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("courses.json");
    std::fs::write(
        &path,
        r#"[{"id": 1, "ownerId": "user01", "title": "Legacy", "category": "misc",
             "link": "https://example.com/legacy", "rating": 5, "tags": ["old"]}]"#,
    )
    .unwrap();

    let hub = open_file_hub(&path);
    hub.add_course(draft("New", "user02", "User2")).unwrap();
    hub.flush().await;

    let written: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    let legacy = &written[0];
    assert_eq!(legacy["title"], "Legacy");
    assert_eq!(legacy["rating"], 5);
    assert_eq!(legacy["tags"], serde_json::json!(["old"]));
    assert!(written[1].get("rating").is_none());
}
