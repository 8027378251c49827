//! HTTP route definitions

use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Build the full application router
pub fn router(state: AppState) -> Router {
    Router::new()
        // Users
        .route("/api/users", get(handlers::list_users))
        .route("/api/users/:id/promote", put(handlers::promote_user))
        .route("/api/login", post(handlers::login))
        // Courses
        .route(
            "/api/courses",
            get(handlers::list_courses).post(handlers::add_course),
        )
        .route("/api/courses/:id", delete(handlers::delete_course))
        // Health checks
        .route("/health/live", get(handlers::health_live))
        .route("/health/ready", get(handlers::health_ready))
        // Metrics
        .route("/metrics", get(handlers::metrics))
        .with_state(state)
        .layer(CompressionLayer::new())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}
