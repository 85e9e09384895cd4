use reqwest::{Client, Url};
use tracing::{error, info};

use super::domain::{ProjectDescription, ProjectId};
use crate::assessment::QuizAnswers;

pub const QUIZ_SUBMIT_PATH: &str = "/api/quiz-submit";

/// Client side of quiz submission: posts the semicolon-joined answer labels.
#[derive(Debug, Clone)]
pub struct QuizSubmissionClient {
    client: Client,
    endpoint: Url,
}

impl QuizSubmissionClient {
    /// Resolve the intake path under `api_base`, keeping any path prefix
    /// (`http://host/app` posts to `http://host/app/api/quiz-submit`).
    pub fn new(api_base: &Url) -> Result<Self, SubmissionError> {
        let endpoint = submit_endpoint(api_base)?;
        Ok(Self {
            client: Client::new(),
            endpoint,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub async fn submit(
        &self,
        project_id: &ProjectId,
        answers: &QuizAnswers,
    ) -> Result<(), SubmissionError> {
        let payload = ProjectDescription {
            id: project_id.clone(),
            description: answers.summary(),
        };

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&payload)
            .send()
            .await
            .map_err(|err| {
                error!(error = %err, "network error while submitting quiz answers");
                SubmissionError::Transport(err)
            })?;

        let status = response.status();
        if !status.is_success() {
            error!(status = status.as_u16(), "quiz submission rejected");
            return Err(SubmissionError::Status(status.as_u16()));
        }

        info!(project_id = %project_id, "quiz answers submitted");
        Ok(())
    }
}

fn submit_endpoint(api_base: &Url) -> Result<Url, SubmissionError> {
    if api_base.cannot_be_a_base() {
        return Err(SubmissionError::InvalidEndpoint(api_base.to_string()));
    }
    let mut base = api_base.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join(QUIZ_SUBMIT_PATH.trim_start_matches('/'))
        .map_err(|err| SubmissionError::InvalidEndpoint(err.to_string()))
}

#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error("invalid submission endpoint: {0}")]
    InvalidEndpoint(String),
    #[error("quiz submission failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("quiz submission rejected with HTTP {0}")]
    Status(u16),
}
