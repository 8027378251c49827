//! Integration tests for CourseHub core
//!
//! Exercises the full cycle: load catalog → authorize → mutate → persist → reload

mod integration;

use coursehub_core::{ActingIdentity, CourseHub, CourseHubConfig, CourseHubError, Role};
use integration::{draft, write_catalog};
use tempfile::TempDir;

#[tokio::test]
async fn test_end_to_end_from_config() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("courses.json");
    write_catalog(&path, &[]);

    let config = CourseHubConfig {
        courses_file: path.clone(),
        ..CourseHubConfig::default()
    };
    let hub = CourseHub::from_config(&config).unwrap();

    // Member shares two courses
    let user = hub.login("chung@coursehub.com").unwrap();
    let first = hub.add_course(draft("Intro to Rust", &user.id, &user.username)).unwrap();
    let second = hub.add_course(draft("Async Rust", &user.id, &user.username)).unwrap();
    assert_ne!(first.id, second.id);

    // Another member cannot remove them
    let other = hub.login("user2@coursehub.com").unwrap();
    let other_actor = ActingIdentity::new(other.id.clone(), other.role);
    assert!(matches!(
        hub.delete_course(first.id, &other_actor),
        Err(CourseHubError::Forbidden(_))
    ));

    // Admin promotes the other member, who can now moderate
    let admin = hub.login("admin@coursehub.com").unwrap();
    let admin_actor = ActingIdentity::new(admin.id, admin.role);
    let promoted = hub.promote_user(&other.id, &admin_actor).unwrap();
    assert_eq!(promoted.role, Role::SubAdmin);

    let moderator = ActingIdentity::new(other.id, promoted.role);
    hub.delete_course(first.id, &moderator).unwrap();
    hub.flush().await;

    // The file reflects the final state
    drop(hub);
    let reopened = CourseHub::from_config(&config).unwrap();
    assert_eq!(reopened.list_courses(), vec![second]);
}

#[tokio::test]
async fn test_config_user_seeds_replace_defaults() {
    let dir = TempDir::new().unwrap();
    let config = CourseHubConfig::from_toml_str(&format!(
        r#"
courses_file = "{}"
create_if_missing = true

[[users]]
email = "owner@example.com"
id = "owner"
username = "Owner"
role = "ADMIN"
"#,
        dir.path().join("catalog.json").display()
    ))
    .unwrap();

    let hub = CourseHub::from_config(&config).unwrap();
    assert_eq!(hub.stats().users, 1);
    assert!(hub.login("admin@coursehub.com").is_err());
    assert_eq!(hub.login("owner@example.com").unwrap().role, Role::Admin);
}
