//! CourseHub HTTP Server - JSON API for the course-sharing platform
//!
//! This crate exposes the [`coursehub_core::CourseHub`] operations over
//! HTTP: course listing, sharing and deletion, user promotion and login.

pub mod api;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod metrics;
pub mod routes;
pub mod state;

pub use api::{HealthResponse, LoginResponse, MessageResponse};
pub use error::{ApiError, ApiResult};
pub use routes::router;
pub use state::AppState;
