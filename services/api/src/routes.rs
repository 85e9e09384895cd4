use crate::infra::AppState;
use aracnidata::assessment::{assessment_router, AssessmentService, AssessmentStore};
use aracnidata::consultation::{consultation_router, Consultant};
use aracnidata::projects::{project_router, ProjectEvaluator, ProjectRepository, ProjectService};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_application_routes<S, R, E>(
    assessments: Arc<AssessmentService<S>>,
    projects: Arc<ProjectService<R, E>>,
    consultant: Arc<Consultant>,
) -> axum::Router
where
    S: AssessmentStore + 'static,
    R: ProjectRepository + 'static,
    E: ProjectEvaluator + 'static,
{
    assessment_router(assessments)
        .merge(project_router(projects))
        .merge(consultation_router(consultant))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
