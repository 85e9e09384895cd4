use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use super::domain::{EvaluationAnswer, ProjectDescription, ProjectId, ProjectRecord};
use super::evaluator::{ProjectEvaluator, EVALUATION_FALLBACK};
use super::repository::ProjectRepository;
use crate::assessment::StoreError;

/// Service composing the project repository with the remote evaluator.
pub struct ProjectService<R, E> {
    repository: Arc<R>,
    evaluator: Arc<E>,
}

impl<R, E> ProjectService<R, E>
where
    R: ProjectRepository + 'static,
    E: ProjectEvaluator + 'static,
{
    pub fn new(repository: Arc<R>, evaluator: Arc<E>) -> Self {
        Self {
            repository,
            evaluator,
        }
    }

    /// Record the questionnaire summary sent on quiz submission. A new
    /// description supersedes any earlier evaluation.
    pub fn receive_submission(
        &self,
        submission: ProjectDescription,
    ) -> Result<ProjectRecord, ProjectServiceError> {
        let record = ProjectRecord {
            project_id: submission.id,
            description: submission.description,
            evaluation: None,
            updated_at: Utc::now(),
        };
        self.repository.upsert(record.clone())?;
        info!(project_id = %record.project_id, "quiz submission received");
        Ok(record)
    }

    /// Forward a description to the evaluator. Every failure collapses into
    /// [`EVALUATION_FALLBACK`]; successful answers are remembered on the project.
    pub async fn evaluate(&self, request: ProjectDescription) -> EvaluationAnswer {
        let answer = match self.evaluator.evaluate(&request).await {
            Ok(answer) => answer,
            Err(err) => {
                warn!(project_id = %request.id, error = %err, "project evaluation failed");
                return EvaluationAnswer {
                    answer: EVALUATION_FALLBACK.to_string(),
                };
            }
        };

        let record = ProjectRecord {
            project_id: request.id,
            description: request.description,
            evaluation: Some(answer.clone()),
            updated_at: Utc::now(),
        };
        let project_id = record.project_id.clone();
        if let Err(err) = self.repository.upsert(record) {
            warn!(project_id = %project_id, error = %err, "evaluation not retained");
        }

        EvaluationAnswer { answer }
    }

    pub fn get(&self, id: &ProjectId) -> Result<ProjectRecord, ProjectServiceError> {
        let record = self.repository.fetch(id)?.ok_or(StoreError::NotFound)?;
        Ok(record)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ProjectServiceError {
    #[error(transparent)]
    Store(#[from] StoreError),
}
