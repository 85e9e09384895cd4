use super::domain::{ProjectId, ProjectRecord};
use crate::assessment::StoreError;

/// Per-project memory of the latest description and evaluation.
pub trait ProjectRepository: Send + Sync {
    fn upsert(&self, record: ProjectRecord) -> Result<(), StoreError>;
    fn fetch(&self, id: &ProjectId) -> Result<Option<ProjectRecord>, StoreError>;
}
