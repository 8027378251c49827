//! User directory
//!
//! Users are keyed by email and seeded once at startup. The only runtime
//! mutation is promotion.

use crate::config::UserSeed;
use crate::error::{CourseHubError, Result};
use crate::policy;
use crate::types::{ActingIdentity, Role, User};
use parking_lot::RwLock;
use tracing::{info, instrument, warn};

/// Email-keyed user table, seed order preserved
#[derive(Debug)]
pub struct UserDirectory {
    entries: RwLock<Vec<(String, User)>>,
}

impl UserDirectory {
    /// Directory with the built-in demo accounts
    pub fn seeded() -> Self {
        Self::from_entries(default_entries())
    }

    /// Directory from explicit `(email, user)` pairs
    pub fn from_entries(entries: Vec<(String, User)>) -> Self {
        UserDirectory {
            entries: RwLock::new(entries),
        }
    }

    /// Directory from configuration seeds, falling back to the built-in
    /// accounts when none are configured
    pub fn from_seeds(seeds: &[UserSeed]) -> Self {
        if seeds.is_empty() {
            return Self::seeded();
        }
        Self::from_entries(
            seeds
                .iter()
                .map(|seed| {
                    (
                        seed.email.clone(),
                        User::new(seed.id.clone(), seed.username.clone(), seed.role),
                    )
                })
                .collect(),
        )
    }

    /// All users in seed order
    pub fn list(&self) -> Vec<User> {
        self.entries.read().iter().map(|(_, u)| u.clone()).collect()
    }

    /// Number of users
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Whether the directory has no users
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Look up a user by email
    pub fn find_by_email(&self, email: &str) -> Option<User> {
        self.entries
            .read()
            .iter()
            .find(|(e, _)| e == email)
            .map(|(_, u)| u.clone())
    }

    /// Look up a user by id, returning the email it is keyed under
    pub fn find_by_id(&self, id: &str) -> Option<(String, User)> {
        self.entries.read().iter().find(|(_, u)| u.id == id).cloned()
    }

    /// Role of `user_id`, `Role::Member` if the id is unknown
    pub fn role_of(&self, user_id: &str) -> Role {
        self.find_by_id(user_id)
            .map(|(_, u)| u.role)
            .unwrap_or(Role::Member)
    }

    /// Promote `target_id` to sub-admin on behalf of `actor`.
    ///
    /// The actor check happens before the target is resolved, so a
    /// non-admin gets `Forbidden` even for unknown targets. Admin targets
    /// keep their role.
    #[instrument(skip(self, actor), fields(actor_role = %actor.role))]
    pub fn promote(&self, target_id: &str, actor: &ActingIdentity) -> Result<User> {
        if !policy::can_promote(actor) {
            warn!("Promotion of {} refused for role {}", target_id, actor.role);
            return Err(CourseHubError::Forbidden(
                "Only admins may promote users".to_string(),
            ));
        }

        let mut entries = self.entries.write();
        let (_, user) = entries
            .iter_mut()
            .find(|(_, u)| u.id == target_id)
            .ok_or_else(|| CourseHubError::NotFound(format!("User {} not found", target_id)))?;

        let previous = user.role;
        user.role = policy::promoted_role(previous);
        info!("Promoted {} from {} to {}", user.username, previous, user.role);

        Ok(user.clone())
    }
}

impl Default for UserDirectory {
    fn default() -> Self {
        Self::seeded()
    }
}

fn default_entries() -> Vec<(String, User)> {
    vec![
        (
            "admin@coursehub.com".to_string(),
            User::new("admin01", "Admin", Role::Admin),
        ),
        (
            "subadmin@coursehub.com".to_string(),
            User::new("subadmin01", "Phó Admin", Role::SubAdmin),
        ),
        (
            "chung@coursehub.com".to_string(),
            User::new("user01", "ChungHo", Role::Member),
        ),
        (
            "user2@coursehub.com".to_string(),
            User::new("user02", "User2", Role::Member),
        ),
    ]
}
