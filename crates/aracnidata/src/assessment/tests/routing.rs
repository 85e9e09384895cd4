use super::common::*;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt;

use crate::assessment::router::{report_handler, submit_handler};
use crate::assessment::AssessmentService;

#[tokio::test]
async fn submit_route_returns_created_with_report() {
    let (service, _) = build_service();
    let router = router_with_service(service);

    let response = router
        .oneshot(
            axum::http::Request::post("/api/v1/assessments")
                .header(axum::http::header::CONTENT_TYPE, "application/json")
                .body(axum::body::Body::from(
                    serde_json::to_vec(&weak_answers()).unwrap(),
                ))
                .unwrap(),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::CREATED);
    let payload = read_json_body(response).await;
    assert!(payload.get("assessment_id").is_some());
    assert_eq!(payload["report"]["score"]["percentage"], json!(22));
    assert_eq!(payload["report"]["score"]["risk_label"], json!("Alto"));
}

#[tokio::test]
async fn submit_route_rejects_incomplete_answers() {
    let (service, _) = build_service();
    let router = router_with_service(service);

    let response = router
        .oneshot(
            axum::http::Request::post("/api/v1/assessments")
                .header(axum::http::header::CONTENT_TYPE, "application/json")
                .body(axum::body::Body::from(
                    json!({ "dataType": "basic", "encryption": "none" }).to_string(),
                ))
                .unwrap(),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn submit_handler_returns_conflict_on_duplicate() {
    let service = Arc::new(AssessmentService::new(Arc::new(ConflictStore)));

    let response =
        submit_handler::<ConflictStore>(State(service), axum::Json(weak_answers())).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn submit_handler_returns_internal_error_on_store_failure() {
    let service = Arc::new(AssessmentService::new(Arc::new(UnavailableStore)));

    let response =
        submit_handler::<UnavailableStore>(State(service), axum::Json(weak_answers())).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn report_handler_recomputes_stored_assessment() {
    let (service, _) = build_service();
    let service = Arc::new(service);
    let record = service.submit(weak_answers()).expect("submission succeeds");

    let response = report_handler::<MemoryStore>(
        State(service),
        Path(record.assessment_id.0.clone()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["answers"]["dataType"], json!("sensitive"));
    assert_eq!(payload["counts"]["critical"], json!(3));
    assert_eq!(
        payload["recommendations"].as_array().map(Vec::len),
        Some(5)
    );
}

#[tokio::test]
async fn report_handler_redirects_unknown_sessions_to_questionnaire() {
    let (service, _) = build_service();

    let response =
        report_handler::<MemoryStore>(State(Arc::new(service)), Path("quiz-404".to_string()))
            .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let payload = read_json_body(response).await;
    assert_eq!(payload["redirect"], json!("/quiz"));
    assert_eq!(payload["status"], json!("no_answers"));
}

#[tokio::test]
async fn questionnaire_route_lists_questions() {
    let (service, _) = build_service();
    let router = router_with_service(service);

    let response = router
        .oneshot(
            axum::http::Request::get("/api/v1/questionnaire")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    let questions = payload["questions"].as_array().expect("questions array");
    assert_eq!(questions.len(), 6);
    assert_eq!(questions[3]["field"], json!("twoFA"));
    assert_eq!(questions[0]["options"][2]["value"], json!("biometric"));
}

#[tokio::test]
async fn preview_route_scores_without_storing() {
    let (service, store) = build_service();
    let router = router_with_service(service);

    let response = router
        .oneshot(
            axum::http::Request::post("/api/v1/assessments/preview")
                .header(axum::http::header::CONTENT_TYPE, "application/json")
                .body(axum::body::Body::from(
                    serde_json::to_vec(&unanswered()).unwrap(),
                ))
                .unwrap(),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["score"]["percentage"], json!(0));
    assert!(store.records.lock().unwrap().is_empty());
}
