//! API request and response types

use coursehub_core::{ActingIdentity, User};
use serde::{Deserialize, Serialize};

/// Body of `DELETE /api/courses/:id`
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteCourseRequest {
    /// Id of the user performing the delete
    #[serde(default)]
    pub user_id: Option<String>,

    /// Role the user claims
    #[serde(default)]
    pub user_role: Option<String>,
}

impl DeleteCourseRequest {
    /// Identity claimed by the caller
    pub fn actor(&self) -> ActingIdentity {
        ActingIdentity::from_claims(self.user_id.clone(), self.user_role.as_deref())
    }
}

/// Body of `PUT /api/users/:id/promote`
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PromoteRequest {
    /// Id of the admin performing the promotion
    #[serde(default)]
    pub admin_id: Option<String>,

    /// Role the admin claims
    #[serde(default)]
    pub admin_role: Option<String>,
}

impl PromoteRequest {
    /// Identity claimed by the caller
    pub fn actor(&self) -> ActingIdentity {
        ActingIdentity::from_claims(self.admin_id.clone(), self.admin_role.as_deref())
    }
}

/// Body of `POST /api/login`
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LoginRequest {
    /// Login email
    #[serde(default)]
    pub email: Option<String>,
}

/// Login result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Whether the email matched a user
    pub success: bool,

    /// The matched user
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,

    /// Failure reason
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl LoginResponse {
    /// Successful login
    pub fn success(user: User) -> Self {
        LoginResponse {
            success: true,
            user: Some(user),
            message: None,
        }
    }

    /// Failed login
    pub fn failure(message: impl Into<String>) -> Self {
        LoginResponse {
            success: false,
            user: None,
            message: Some(message.into()),
        }
    }
}

/// Plain confirmation message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Human readable message
    pub message: String,
}

impl MessageResponse {
    /// Create a message response
    pub fn new(message: impl Into<String>) -> Self {
        MessageResponse {
            message: message.into(),
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// Service status
    pub status: HealthStatus,

    /// Service version
    pub version: String,

    /// Uptime in seconds
    pub uptime_seconds: u64,

    /// Courses in the catalog
    pub courses: usize,

    /// Users in the directory
    pub users: usize,

    /// Catalog storage location
    pub storage: String,
}

/// Health status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// Service is healthy
    Healthy,
    /// Last catalog write failed; the file on disk is stale
    Degraded,
}
