//! CourseHub service facade
//!
//! Composes the course store, the user directory and the policy into the
//! operations the HTTP layer exposes. One instance is built at startup and
//! shared by handle.

use crate::backend::{CourseBackend, JsonFileBackend};
use crate::config::CourseHubConfig;
use crate::directory::UserDirectory;
use crate::error::{CourseHubError, Result};
use crate::policy;
use crate::store::{CourseStore, PersistEvent};
use crate::types::{ActingIdentity, Course, CourseDraft, User};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

/// Counts reported by health endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HubStats {
    /// Courses in the catalog
    pub courses: usize,
    /// Users in the directory
    pub users: usize,
}

/// The course-sharing service
pub struct CourseHub {
    store: CourseStore,
    directory: UserDirectory,
}

impl CourseHub {
    /// Build a hub from an already loaded store and a directory
    pub fn new(store: CourseStore, directory: UserDirectory) -> Self {
        CourseHub { store, directory }
    }

    /// Load the catalog from `backend` and seed the built-in users.
    ///
    /// Must be called from within a Tokio runtime; the store starts its
    /// background writer here.
    pub fn open(backend: Arc<dyn CourseBackend>) -> Result<Self> {
        Ok(Self::new(CourseStore::load(backend)?, UserDirectory::seeded()))
    }

    /// Build a hub from configuration (catalog file plus user seeds).
    ///
    /// Must be called from within a Tokio runtime.
    pub fn from_config(config: &CourseHubConfig) -> Result<Self> {
        let backend = JsonFileBackend::new(&config.courses_file)
            .create_if_missing(config.create_if_missing);
        let store = CourseStore::load(Arc::new(backend))?;
        let directory = UserDirectory::from_seeds(&config.users);
        info!(
            "CourseHub ready: {} courses, {} users",
            store.len(),
            directory.len()
        );
        Ok(Self::new(store, directory))
    }

    /// The course store
    pub fn store(&self) -> &CourseStore {
        &self.store
    }

    /// The user directory
    pub fn directory(&self) -> &UserDirectory {
        &self.directory
    }

    /// All users
    pub fn list_users(&self) -> Vec<User> {
        self.directory.list()
    }

    /// All courses
    pub fn list_courses(&self) -> Vec<Course> {
        self.store.list()
    }

    /// Share a new course
    pub fn add_course(&self, draft: CourseDraft) -> Result<Course> {
        self.store.add(draft)
    }

    /// Delete a course on behalf of `actor`.
    ///
    /// An unknown id is reported before any permission check.
    #[instrument(skip(self, actor), fields(actor_id = ?actor.user_id, actor_role = %actor.role))]
    pub fn delete_course(&self, id: i64, actor: &ActingIdentity) -> Result<Course> {
        let course = self
            .store
            .get(id)
            .ok_or_else(|| CourseHubError::NotFound(format!("Course {} not found", id)))?;

        let owner_role = self.directory.role_of(&course.owner_id);
        if !policy::can_delete_course(actor, &course, owner_role) {
            warn!(
                "Delete of course {} refused (owner {} is {})",
                id, course.owner_id, owner_role
            );
            return Err(CourseHubError::Forbidden(
                "You do not have permission to delete this course".to_string(),
            ));
        }

        debug!("Delete of course {} permitted", id);
        self.store.remove(id)
    }

    /// Promote a user to sub-admin on behalf of `actor`
    pub fn promote_user(&self, target_id: &str, actor: &ActingIdentity) -> Result<User> {
        self.directory.promote(target_id, actor)
    }

    /// Resolve a login email to its user
    pub fn login(&self, email: &str) -> Result<User> {
        match self.directory.find_by_email(email) {
            Some(user) => {
                info!("Login: {} ({})", user.username, user.role);
                Ok(user)
            }
            None => {
                debug!("Login with unknown email");
                Err(CourseHubError::Unauthorized("Email does not exist".to_string()))
            }
        }
    }

    /// Current counts
    pub fn stats(&self) -> HubStats {
        HubStats {
            courses: self.store.len(),
            users: self.directory.len(),
        }
    }

    /// Wait for queued catalog writes
    pub async fn flush(&self) {
        self.store.flush().await
    }

    /// Subscribe to catalog write outcomes
    pub fn subscribe_persist_events(&self) -> mpsc::UnboundedReceiver<PersistEvent> {
        self.store.subscribe()
    }
}
