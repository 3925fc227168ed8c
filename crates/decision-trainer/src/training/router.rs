use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::TrainingError;
use super::repository::{RepositoryError, SessionId, SessionRepository};
use super::service::{SessionServiceError, TrainingSessionService};

#[derive(Debug, Deserialize)]
pub struct PlacementRequest {
    pub item: String,
    pub category: String,
}

#[derive(Debug, Deserialize)]
pub struct TickRequest {
    pub delta_seconds: f32,
}

#[derive(Debug, Deserialize)]
pub struct SelectRequest {
    pub option: String,
}

/// Router builder exposing the session engine over HTTP.
pub fn session_router<R>(service: Arc<TrainingSessionService<R>>) -> Router
where
    R: SessionRepository + 'static,
{
    Router::new()
        .route("/api/v1/sessions", post(start_handler::<R>))
        .route("/api/v1/sessions/:session_id", get(status_handler::<R>))
        .route(
            "/api/v1/sessions/:session_id/exercises/:exercise/placements",
            post(placement_handler::<R>),
        )
        .route(
            "/api/v1/sessions/:session_id/exercises/:exercise/tick",
            post(tick_handler::<R>),
        )
        .route(
            "/api/v1/sessions/:session_id/decisions/:decision/select",
            post(select_handler::<R>),
        )
        .route(
            "/api/v1/sessions/:session_id/decisions/:decision/accept",
            post(accept_handler::<R>),
        )
        .route("/api/v1/sessions/:session_id/reset", post(reset_handler::<R>))
        .route(
            "/api/v1/sessions/:session_id/report",
            get(report_handler::<R>),
        )
        .with_state(service)
}

pub(crate) async fn start_handler<R>(
    State(service): State<Arc<TrainingSessionService<R>>>,
) -> Response
where
    R: SessionRepository + 'static,
{
    match service.start() {
        Ok(record) => (StatusCode::CREATED, Json(record.view())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn status_handler<R>(
    State(service): State<Arc<TrainingSessionService<R>>>,
    Path(session_id): Path<String>,
) -> Response
where
    R: SessionRepository + 'static,
{
    match service.get(&SessionId(session_id)) {
        Ok(record) => (StatusCode::OK, Json(record.view())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn placement_handler<R>(
    State(service): State<Arc<TrainingSessionService<R>>>,
    Path((session_id, exercise)): Path<(String, String)>,
    Json(request): Json<PlacementRequest>,
) -> Response
where
    R: SessionRepository + 'static,
{
    let id = SessionId(session_id);
    match service.place(&id, &exercise, &request.item, &request.category) {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn tick_handler<R>(
    State(service): State<Arc<TrainingSessionService<R>>>,
    Path((session_id, exercise)): Path<(String, String)>,
    Json(request): Json<TickRequest>,
) -> Response
where
    R: SessionRepository + 'static,
{
    let id = SessionId(session_id);
    match service.tick(&id, &exercise, request.delta_seconds) {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn select_handler<R>(
    State(service): State<Arc<TrainingSessionService<R>>>,
    Path((session_id, decision)): Path<(String, String)>,
    Json(request): Json<SelectRequest>,
) -> Response
where
    R: SessionRepository + 'static,
{
    let id = SessionId(session_id);
    match service.select(&id, &decision, &request.option) {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn accept_handler<R>(
    State(service): State<Arc<TrainingSessionService<R>>>,
    Path((session_id, decision)): Path<(String, String)>,
) -> Response
where
    R: SessionRepository + 'static,
{
    let id = SessionId(session_id);
    match service.accept(&id, &decision) {
        Ok(accepted) => (StatusCode::OK, Json(accepted)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn reset_handler<R>(
    State(service): State<Arc<TrainingSessionService<R>>>,
    Path(session_id): Path<String>,
) -> Response
where
    R: SessionRepository + 'static,
{
    match service.reset(&SessionId(session_id)) {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn report_handler<R>(
    State(service): State<Arc<TrainingSessionService<R>>>,
    Path(session_id): Path<String>,
) -> Response
where
    R: SessionRepository + 'static,
{
    match service.report(&SessionId(session_id)) {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) fn error_status(error: &SessionServiceError) -> StatusCode {
    match error {
        SessionServiceError::Training(TrainingError::Configuration(_)) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        SessionServiceError::Training(TrainingError::InvalidState(_)) => StatusCode::CONFLICT,
        SessionServiceError::Training(TrainingError::NotFound { .. })
        | SessionServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        SessionServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        SessionServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn error_response(error: SessionServiceError) -> Response {
    let status = error_status(&error);
    let payload = json!({
        "error": error.to_string(),
    });
    (status, Json(payload)).into_response()
}
