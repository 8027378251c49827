//! Authorization scenarios across the seeded accounts

use super::draft;
use coursehub_core::{
    can_delete_course, ActingIdentity, CourseHub, CourseHubError, MemoryBackend, Role,
};
use std::sync::Arc;

fn hub() -> CourseHub {
    CourseHub::open(Arc::new(MemoryBackend::new())).unwrap()
}

#[tokio::test]
async fn test_moderation_hierarchy() {
    let hub = hub();
    let by_admin = hub.add_course(draft("Admin post", "admin01", "Admin")).unwrap();
    let by_sub = hub.add_course(draft("Sub post", "subadmin01", "Phó Admin")).unwrap();
    let by_member = hub.add_course(draft("Member post", "user01", "ChungHo")).unwrap();

    let sub = ActingIdentity::new("subadmin01", Role::SubAdmin);
    let member = ActingIdentity::new("user02", Role::Member);

    assert!(matches!(
        hub.delete_course(by_admin.id, &sub),
        Err(CourseHubError::Forbidden(_))
    ));
    assert!(matches!(
        hub.delete_course(by_member.id, &member),
        Err(CourseHubError::Forbidden(_))
    ));

    assert!(hub.delete_course(by_member.id, &sub).is_ok());
    assert!(hub.delete_course(by_sub.id, &sub).is_ok());

    let admin = ActingIdentity::new("admin01", Role::Admin);
    assert!(hub.delete_course(by_admin.id, &admin).is_ok());
    assert!(hub.list_courses().is_empty());
}

#[tokio::test]
async fn test_promoted_sub_admin_course_is_moderatable() {
    let hub = hub();
    let course = hub.add_course(draft("Member post", "user01", "ChungHo")).unwrap();

    let admin = ActingIdentity::new("admin01", Role::Admin);
    hub.promote_user("user01", &admin).unwrap();

    // Owner is now a sub-admin, another sub-admin may still delete.
    let owner_role = hub.directory().role_of("user01");
    assert_eq!(owner_role, Role::SubAdmin);
    let other_sub = ActingIdentity::new("subadmin01", Role::SubAdmin);
    assert!(can_delete_course(&other_sub, &course, owner_role));
}

#[tokio::test]
async fn test_claimed_role_is_trusted() {
    // No session exists, so whatever role the caller claims is used.
    let hub = hub();
    let course = hub.add_course(draft("Admin post", "admin01", "Admin")).unwrap();

    let impostor = ActingIdentity::from_claims(Some("user02".to_string()), Some("ADMIN"));
    assert!(hub.delete_course(course.id, &impostor).is_ok());
}

#[tokio::test]
async fn test_login_returns_directory_record() {
    let hub = hub();
    for user in hub.list_users() {
        let (email, _) = hub.directory().find_by_id(&user.id).unwrap();
        assert_eq!(hub.login(&email).unwrap(), user);
    }
}
