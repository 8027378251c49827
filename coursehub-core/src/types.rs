//! Domain types for CourseHub

use crate::error::CourseHubError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Icon assigned to every newly added course
pub const DEFAULT_ICON: &str = "fas fa-book";

/// User role, ordered by privilege (`Member < SubAdmin < Admin`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Regular member
    Member,
    /// Sub-admin, may moderate courses not owned by an admin
    SubAdmin,
    /// Administrator
    Admin,
}

impl Role {
    /// Wire name of the role
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Member => "MEMBER",
            Role::SubAdmin => "SUB_ADMIN",
            Role::Admin => "ADMIN",
        }
    }

    /// Interpret a role claimed by a client.
    ///
    /// Anything that is not exactly one of the role names, including a
    /// missing claim, grants the least privilege.
    pub fn from_claim(claim: Option<&str>) -> Role {
        claim
            .and_then(|s| s.parse().ok())
            .unwrap_or(Role::Member)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = CourseHubError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MEMBER" => Ok(Role::Member),
            "SUB_ADMIN" => Ok(Role::SubAdmin),
            "ADMIN" => Ok(Role::Admin),
            other => Err(CourseHubError::Validation(format!("unknown role: {}", other))),
        }
    }
}

/// A user as exposed by the directory and the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Stable user id (e.g. "admin01")
    pub id: String,
    /// Display name
    pub username: String,
    /// Current role
    pub role: Role,
}

impl User {
    /// Create a new user
    pub fn new(id: impl Into<String>, username: impl Into<String>, role: Role) -> Self {
        User {
            id: id.into(),
            username: username.into(),
            role,
        }
    }
}

/// A course record, as stored in the catalog file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    /// Unique id, assigned at creation
    pub id: i64,
    /// Id of the user who shared the course
    #[serde(default)]
    pub owner_id: String,
    /// Username of the owner at creation time
    #[serde(default)]
    pub owner_username: String,
    /// Course title
    pub title: String,
    /// Author, defaults to the owner's username
    #[serde(default)]
    pub author: String,
    /// View counter (never incremented by the backend)
    #[serde(default)]
    pub views: u64,
    /// Category label
    pub category: String,
    /// Icon CSS class
    #[serde(default = "default_icon")]
    pub icon: String,
    /// External link to the course
    pub link: String,
    /// Keys this backend does not model, written back unchanged
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

fn default_icon() -> String {
    DEFAULT_ICON.to_string()
}

/// Candidate course submitted by a client
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseDraft {
    /// Course title
    #[serde(default)]
    pub title: Option<String>,
    /// External link
    #[serde(default)]
    pub link: Option<String>,
    /// Category label
    #[serde(default)]
    pub category: Option<String>,
    /// Owner user id
    #[serde(default)]
    pub owner_id: Option<String>,
    /// Owner username
    #[serde(default)]
    pub owner_username: Option<String>,
}

impl CourseDraft {
    /// Names of required fields that are absent or empty, in wire order
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let fields = [
            ("title", &self.title),
            ("link", &self.link),
            ("category", &self.category),
            ("ownerId", &self.owner_id),
            ("ownerUsername", &self.owner_username),
        ];

        fields
            .iter()
            .filter(|(_, value)| value.as_deref().map_or(true, str::is_empty))
            .map(|(name, _)| *name)
            .collect()
    }

    /// Turn a complete draft into a course with the given id.
    ///
    /// Returns a validation error listing every missing field.
    pub fn into_course(self, id: i64) -> crate::Result<Course> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(CourseHubError::Validation(format!(
                "Missing required fields: {}",
                missing.join(", ")
            )));
        }

        let owner_username = self.owner_username.unwrap_or_default();
        Ok(Course {
            id,
            owner_id: self.owner_id.unwrap_or_default(),
            author: owner_username.clone(),
            owner_username,
            title: self.title.unwrap_or_default(),
            views: 0,
            category: self.category.unwrap_or_default(),
            icon: default_icon(),
            link: self.link.unwrap_or_default(),
            extra: serde_json::Map::new(),
        })
    }
}

/// The identity a caller claims for a privileged operation.
///
/// Today this is built straight from the request body; an authentication
/// layer can produce it instead without changing the policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActingIdentity {
    /// Claimed user id, if any
    pub user_id: Option<String>,
    /// Claimed role
    pub role: Role,
}

impl ActingIdentity {
    /// Create an identity from a known id and role
    pub fn new(user_id: impl Into<String>, role: Role) -> Self {
        ActingIdentity {
            user_id: Some(user_id.into()),
            role,
        }
    }

    /// Build an identity from untrusted client claims
    pub fn from_claims(user_id: Option<String>, role: Option<&str>) -> Self {
        ActingIdentity {
            user_id: user_id.filter(|id| !id.is_empty()),
            role: Role::from_claim(role),
        }
    }

    /// Identity with no user id and member privileges
    pub fn anonymous() -> Self {
        ActingIdentity {
            user_id: None,
            role: Role::Member,
        }
    }

    /// Whether this identity owns the course
    pub fn owns(&self, course: &Course) -> bool {
        self.user_id.as_deref() == Some(course.owner_id.as_str())
    }
}
