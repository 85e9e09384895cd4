use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::debug;

use super::domain::{EvaluationAnswer, ProjectDescription};

pub const DEFAULT_EVALUATOR_URL: &str = "http://localhost:8000/evaluate";

/// Text shown instead of an evaluation whenever the backend call fails.
pub const EVALUATION_FALLBACK: &str = "Ocurrió un error al evaluar el proyecto.";

/// Outbound boundary to the project evaluation backend.
#[async_trait]
pub trait ProjectEvaluator: Send + Sync {
    async fn evaluate(&self, request: &ProjectDescription) -> Result<String, EvaluatorError>;
}

#[derive(Debug, thiserror::Error)]
pub enum EvaluatorError {
    #[error("evaluation request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("evaluation backend responded with HTTP {0}")]
    Status(u16),
    #[error("evaluation response could not be decoded: {0}")]
    Decode(#[source] reqwest::Error),
}

/// JSON-over-HTTP evaluator. No retries and no request timeout: a hung backend
/// keeps the caller pending.
#[derive(Debug, Clone)]
pub struct HttpProjectEvaluator {
    client: Client,
    endpoint: Url,
}

impl HttpProjectEvaluator {
    pub fn new(endpoint: Url) -> Self {
        Self::with_client(Client::new(), endpoint)
    }

    pub fn with_client(client: Client, endpoint: Url) -> Self {
        Self { client, endpoint }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl ProjectEvaluator for HttpProjectEvaluator {
    async fn evaluate(&self, request: &ProjectDescription) -> Result<String, EvaluatorError> {
        debug!(endpoint = %self.endpoint, project_id = %request.id, "requesting project evaluation");

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(request)
            .send()
            .await
            .map_err(EvaluatorError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(EvaluatorError::Status(status.as_u16()));
        }

        let body: EvaluationAnswer = response.json().await.map_err(EvaluatorError::Decode)?;
        Ok(body.answer)
    }
}
