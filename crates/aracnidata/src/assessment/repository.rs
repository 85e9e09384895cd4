use super::domain::{AssessmentId, AssessmentRecord};

/// Session store handing answers from quiz completion to the results view.
pub trait AssessmentStore: Send + Sync {
    fn insert(&self, record: AssessmentRecord) -> Result<AssessmentRecord, StoreError>;
    fn fetch(&self, id: &AssessmentId) -> Result<Option<AssessmentRecord>, StoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("store unavailable: {0}")]
    Unavailable(String),
}
