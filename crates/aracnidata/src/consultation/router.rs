use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::session::{ChatMessage, Consultant, QUICK_QUESTIONS};

#[derive(Debug, Deserialize)]
pub(crate) struct ConsultationRequest {
    pub(crate) message: String,
}

pub fn consultation_router(consultant: Arc<Consultant>) -> Router {
    Router::new()
        .route("/api/v1/consultation", get(overview_handler))
        .route("/api/v1/consultation/messages", post(message_handler))
        .with_state(consultant)
}

pub(crate) async fn overview_handler() -> Response {
    let payload = json!({
        "welcome": ChatMessage::welcome(),
        "quick_questions": QUICK_QUESTIONS,
    });
    (StatusCode::OK, Json(payload)).into_response()
}

pub(crate) async fn message_handler(
    State(consultant): State<Arc<Consultant>>,
    Json(request): Json<ConsultationRequest>,
) -> Response {
    match consultant.exchange(&request.message).await {
        Some(exchange) => {
            let payload = json!({ "messages": [exchange.user, exchange.assistant] });
            (StatusCode::OK, Json(payload)).into_response()
        }
        None => {
            let payload = json!({ "error": "message must not be blank" });
            (StatusCode::BAD_REQUEST, Json(payload)).into_response()
        }
    }
}
