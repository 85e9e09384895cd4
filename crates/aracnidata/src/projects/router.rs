use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tracing::warn;

use super::domain::{ProjectDescription, ProjectId};
use super::evaluator::ProjectEvaluator;
use super::repository::ProjectRepository;
use super::service::{ProjectService, ProjectServiceError};
use super::submission::QUIZ_SUBMIT_PATH;
use crate::assessment::StoreError;

/// Router for quiz submission intake and the evaluation proxy.
pub fn project_router<R, E>(service: Arc<ProjectService<R, E>>) -> Router
where
    R: ProjectRepository + 'static,
    E: ProjectEvaluator + 'static,
{
    Router::new()
        .route(QUIZ_SUBMIT_PATH, post(quiz_submit_handler::<R, E>))
        .route("/api/v1/projects/evaluate", post(evaluate_handler::<R, E>))
        .route("/api/v1/projects/:project_id", get(project_handler::<R, E>))
        .with_state(service)
}

pub(crate) async fn quiz_submit_handler<R, E>(
    State(service): State<Arc<ProjectService<R, E>>>,
    Json(submission): Json<ProjectDescription>,
) -> Response
where
    R: ProjectRepository + 'static,
    E: ProjectEvaluator + 'static,
{
    match service.receive_submission(submission) {
        Ok(record) => {
            let payload = json!({
                "id": record.project_id,
                "status": "received",
            });
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(err) => {
            warn!(error = %err, "quiz submission not stored");
            let payload = json!({ "error": err.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}

pub(crate) async fn evaluate_handler<R, E>(
    State(service): State<Arc<ProjectService<R, E>>>,
    Json(request): Json<ProjectDescription>,
) -> Response
where
    R: ProjectRepository + 'static,
    E: ProjectEvaluator + 'static,
{
    let answer = service.evaluate(request).await;
    (StatusCode::OK, Json(answer)).into_response()
}

pub(crate) async fn project_handler<R, E>(
    State(service): State<Arc<ProjectService<R, E>>>,
    Path(project_id): Path<String>,
) -> Response
where
    R: ProjectRepository + 'static,
    E: ProjectEvaluator + 'static,
{
    let id = ProjectId(project_id);
    match service.get(&id) {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(ProjectServiceError::Store(StoreError::NotFound)) => {
            let payload = json!({
                "error": "project not found",
                "project_id": id.0,
            });
            (StatusCode::NOT_FOUND, Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}
