//! HTTP request handlers

use crate::api::{
    DeleteCourseRequest, HealthResponse, HealthStatus, LoginRequest, LoginResponse,
    MessageResponse, PromoteRequest,
};
use crate::error::{ApiError, ApiResult};
use crate::metrics::{self, LatencyTimer};
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use coursehub_core::{Course, CourseDraft, Role, User};
use tracing::{debug, info};

/// `GET /api/users`
pub async fn list_users(State(state): State<AppState>) -> Json<Vec<User>> {
    let timer = LatencyTimer::new("list_users");
    let users = state.hub.list_users();
    timer.record("ok");
    Json(users)
}

/// `GET /api/courses`
pub async fn list_courses(State(state): State<AppState>) -> Json<Vec<Course>> {
    let timer = LatencyTimer::new("list_courses");
    let courses = state.hub.list_courses();
    timer.record("ok");
    Json(courses)
}

/// `POST /api/courses`
///
/// A request without a JSON content type supplies no fields and is
/// answered with the missing-fields error. Unparseable JSON is a 400.
pub async fn add_course(
    State(state): State<AppState>,
    body: Result<Json<CourseDraft>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Course>)> {
    let timer = LatencyTimer::new("add_course");

    let draft = match body {
        Ok(Json(draft)) => Ok(draft),
        Err(JsonRejection::MissingJsonContentType(_)) => Ok(CourseDraft::default()),
        Err(rejection) => Err(ApiError::from(rejection)),
    };
    debug!("Add course request: {:?}", draft);

    let result = draft.and_then(|draft| state.hub.add_course(draft).map_err(ApiError::from));
    timer.record_result(&result);
    let course = result?;

    metrics::update_hub_metrics(state.hub.stats());
    Ok((StatusCode::CREATED, Json(course)))
}

/// `DELETE /api/courses/:id`
///
/// A missing or unreadable body is an anonymous member claim.
pub async fn delete_course(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Option<Json<DeleteCourseRequest>>,
) -> ApiResult<Json<MessageResponse>> {
    let timer = LatencyTimer::new("delete_course");
    let req = body.map(|Json(req)| req).unwrap_or_default();

    let result = parse_course_id(&id).and_then(|id| {
        state
            .hub
            .delete_course(id, &req.actor())
            .map_err(ApiError::from)
    });
    timer.record_result(&result);
    let removed = result?;

    info!("Course {} deleted by {:?}", removed.id, req.user_id);
    metrics::update_hub_metrics(state.hub.stats());
    Ok(Json(MessageResponse::new("Course deleted successfully")))
}

/// `PUT /api/users/:id/promote`
pub async fn promote_user(
    State(state): State<AppState>,
    Path(target_id): Path<String>,
    body: Option<Json<PromoteRequest>>,
) -> ApiResult<Json<MessageResponse>> {
    let timer = LatencyTimer::new("promote_user");
    let req = body.map(|Json(req)| req).unwrap_or_default();

    let result = state.hub.promote_user(&target_id, &req.actor());
    timer.record_result(&result);
    let user = result?;

    let message = match user.role {
        Role::Admin => format!("{} is already an Admin", user.username),
        _ => format!("Promoted {} to Sub-Admin", user.username),
    };
    Ok(Json(MessageResponse::new(message)))
}

/// `POST /api/login`
pub async fn login(
    State(state): State<AppState>,
    body: Option<Json<LoginRequest>>,
) -> (StatusCode, Json<LoginResponse>) {
    let timer = LatencyTimer::new("login");
    let req = body.map(|Json(req)| req).unwrap_or_default();
    let email = req.email.unwrap_or_default();

    match state.hub.login(&email) {
        Ok(user) => {
            timer.record("ok");
            (StatusCode::OK, Json(LoginResponse::success(user)))
        }
        Err(err) => {
            timer.record("error");
            let err = ApiError::from(err);
            metrics::record_error(err.code());
            (err.status(), Json(LoginResponse::failure(err.into_message())))
        }
    }
}

/// Health check - liveness probe
pub async fn health_live(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(health(&state, HealthStatus::Healthy))
}

/// Health check - readiness probe, degraded while catalog writes fail
pub async fn health_ready(State(state): State<AppState>) -> Json<HealthResponse> {
    let status = if state.is_degraded() {
        HealthStatus::Degraded
    } else {
        HealthStatus::Healthy
    };
    Json(health(&state, status))
}

/// Prometheus metrics endpoint
pub async fn metrics() -> String {
    metrics::get_prometheus_metrics()
}

fn health(state: &AppState, status: HealthStatus) -> HealthResponse {
    let stats = state.hub.stats();
    HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.uptime_seconds(),
        courses: stats.courses,
        users: stats.users,
        storage: state.hub.store().location().to_string(),
    }
}

/// Course ids in paths must be integers; anything else names no course
fn parse_course_id(raw: &str) -> ApiResult<i64> {
    raw.trim()
        .parse()
        .map_err(|_| ApiError::NotFound(format!("Course {} not found", raw)))
}
