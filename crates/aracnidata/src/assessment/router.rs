use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::json;
use tracing::warn;

use super::domain::{AssessmentId, QuizAnswers};
use super::questionnaire::Questionnaire;
use super::report::AssessmentReport;
use super::repository::{AssessmentStore, StoreError};
use super::service::{AssessmentService, AssessmentServiceError};

/// Path the results view sends users to when no answers are on record.
pub const QUESTIONNAIRE_PATH: &str = "/quiz";

#[derive(Debug, Serialize)]
pub struct AssessmentCreated {
    pub assessment_id: AssessmentId,
    pub report: AssessmentReport,
}

/// Router exposing the questionnaire schema and the assessment session store.
pub fn assessment_router<S>(service: Arc<AssessmentService<S>>) -> Router
where
    S: AssessmentStore + 'static,
{
    Router::new()
        .route("/api/v1/questionnaire", get(questionnaire_handler))
        .route("/api/v1/assessments", post(submit_handler::<S>))
        .route("/api/v1/assessments/preview", post(preview_handler))
        .route(
            "/api/v1/assessments/:assessment_id",
            get(report_handler::<S>),
        )
        .with_state(service)
}

pub(crate) async fn questionnaire_handler() -> Json<Questionnaire> {
    Json(Questionnaire::standard())
}

pub(crate) async fn preview_handler(Json(answers): Json<QuizAnswers>) -> Json<AssessmentReport> {
    Json(AssessmentReport::build(&answers))
}

pub(crate) async fn submit_handler<S>(
    State(service): State<Arc<AssessmentService<S>>>,
    Json(answers): Json<QuizAnswers>,
) -> Response
where
    S: AssessmentStore + 'static,
{
    match service.submit(answers) {
        Ok(record) => {
            let payload = AssessmentCreated {
                report: AssessmentReport::build(&record.answers),
                assessment_id: record.assessment_id,
            };
            (StatusCode::CREATED, Json(payload)).into_response()
        }
        Err(AssessmentServiceError::Store(StoreError::Conflict)) => {
            let payload = json!({ "error": "assessment already exists" });
            (StatusCode::CONFLICT, Json(payload)).into_response()
        }
        Err(other) => {
            warn!(error = %other, "assessment submission failed");
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}

pub(crate) async fn report_handler<S>(
    State(service): State<Arc<AssessmentService<S>>>,
    Path(assessment_id): Path<String>,
) -> Response
where
    S: AssessmentStore + 'static,
{
    let id = AssessmentId(assessment_id);
    match service.report(&id) {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(AssessmentServiceError::Store(StoreError::NotFound)) => {
            let payload = json!({
                "assessment_id": id.0,
                "status": "no_answers",
                "redirect": QUESTIONNAIRE_PATH,
            });
            (StatusCode::NOT_FOUND, Json(payload)).into_response()
        }
        Err(other) => {
            warn!(error = %other, assessment_id = %id, "assessment lookup failed");
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}
