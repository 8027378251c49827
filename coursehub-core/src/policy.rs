//! Delete and promote authorization rules
//!
//! Every function here is pure: callers resolve roles through the
//! [`UserDirectory`](crate::directory::UserDirectory) and pass them in.

use crate::types::{ActingIdentity, Course, Role};

/// Decide whether `actor` may delete `course`.
///
/// `owner_role` is the role of the course owner, `Role::Member` when the
/// owner does not resolve to a known user.
pub fn can_delete_course(actor: &ActingIdentity, course: &Course, owner_role: Role) -> bool {
    match actor.role {
        Role::Admin => true,
        Role::SubAdmin if owner_role != Role::Admin => true,
        _ => actor.owns(course),
    }
}

/// Only admins may promote
pub fn can_promote(actor: &ActingIdentity) -> bool {
    actor.role == Role::Admin
}

/// Role a user holds after promotion. Never lowers privilege.
pub fn promoted_role(current: Role) -> Role {
    current.max(Role::SubAdmin)
}
