//! Integration test modules for CourseHub
//!
//! - Persistence round-trips and write failure reporting
//! - Authorization scenarios across roles and promotion
//! - Span and event output of instrumented operations

pub mod authorization_scenarios;
pub mod instrumentation;
pub mod persistence_scenarios;

use coursehub_core::{Course, CourseDraft, CourseHub, JsonFileBackend};
use std::path::Path;
use std::sync::Arc;

/// Draft with every required field filled
pub fn draft(title: &str, owner_id: &str, owner_username: &str) -> CourseDraft {
    CourseDraft {
        title: Some(title.to_string()),
        link: Some(format!("https://courses.example.com/{}", title.replace(' ', "-"))),
        category: Some("general".to_string()),
        owner_id: Some(owner_id.to_string()),
        owner_username: Some(owner_username.to_string()),
    }
}

/// Route test logs through the libtest capture, once per binary
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("coursehub_core=debug")
        .with_test_writer()
        .try_init();
}

/// Hub over a catalog file at `path`
pub fn open_file_hub(path: &Path) -> CourseHub {
    init_test_tracing();
    CourseHub::open(Arc::new(JsonFileBackend::new(path))).expect("Failed to open catalog")
}

/// Write `courses` to `path` as the catalog file
pub fn write_catalog(path: &Path, courses: &[Course]) {
    std::fs::write(path, serde_json::to_string_pretty(courses).unwrap()).unwrap();
}
