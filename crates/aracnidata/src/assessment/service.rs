use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use super::domain::{AssessmentId, AssessmentRecord, QuizAnswers};
use super::report::AssessmentReport;
use super::repository::{AssessmentStore, StoreError};

/// Service composing the session store with the scoring engine.
pub struct AssessmentService<S> {
    store: Arc<S>,
}

/// Random so one session cannot guess another's id.
fn next_assessment_id() -> AssessmentId {
    AssessmentId(format!("quiz-{}", Uuid::new_v4().simple()))
}

impl<S> AssessmentService<S>
where
    S: AssessmentStore + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Persist a completed answer set under a freshly generated identifier.
    pub fn submit(&self, answers: QuizAnswers) -> Result<AssessmentRecord, AssessmentServiceError> {
        let record = AssessmentRecord {
            assessment_id: next_assessment_id(),
            answers,
            submitted_at: Utc::now(),
        };

        let stored = self.store.insert(record)?;
        info!(assessment_id = %stored.assessment_id, "assessment stored");
        Ok(stored)
    }

    /// Reload stored answers and recompute the report.
    pub fn report(&self, id: &AssessmentId) -> Result<AssessmentReport, AssessmentServiceError> {
        let record = self.get(id)?;
        let report = AssessmentReport::build(&record.answers);
        debug!(
            assessment_id = %id,
            percentage = report.score.percentage,
            pending = report.pending().count(),
            "assessment report rebuilt"
        );
        Ok(report)
    }

    pub fn get(&self, id: &AssessmentId) -> Result<AssessmentRecord, AssessmentServiceError> {
        let record = self.store.fetch(id)?.ok_or(StoreError::NotFound)?;
        Ok(record)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AssessmentServiceError {
    #[error(transparent)]
    Store(#[from] StoreError),
}
