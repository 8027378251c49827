//! CourseHub Core - catalog storage and role-based authorization
//!
//! This crate provides the course catalog store, the user directory, the
//! delete/promote authorization policy, and the [`CourseHub`] facade that
//! composes them for the HTTP server and the CLI.

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod backend;
pub mod config;
pub mod directory;
pub mod error;
pub mod hub;
pub mod ids;
pub mod policy;
pub mod store;
pub mod types;

pub use backend::{CourseBackend, JsonFileBackend, MemoryBackend};
pub use config::{CourseHubConfig, UserSeed};
pub use directory::UserDirectory;
pub use error::{CourseHubError, Result};
pub use hub::{CourseHub, HubStats};
pub use ids::IdGenerator;
pub use policy::{can_delete_course, can_promote, promoted_role};
pub use store::{CourseStore, PersistEvent, PersistOutcome};
pub use types::{ActingIdentity, Course, CourseDraft, Role, User, DEFAULT_ICON};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
