use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::response::Response;
use serde_json::Value;

use crate::assessment::StoreError;
use crate::projects::domain::{ProjectDescription, ProjectId, ProjectRecord};
use crate::projects::evaluator::{EvaluatorError, ProjectEvaluator};
use crate::projects::repository::ProjectRepository;
use crate::projects::service::ProjectService;

pub(super) fn description(id: &str, text: &str) -> ProjectDescription {
    ProjectDescription {
        id: ProjectId(id.to_string()),
        description: text.to_string(),
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryProjects {
    pub(super) records: Arc<Mutex<HashMap<ProjectId, ProjectRecord>>>,
}

impl ProjectRepository for MemoryProjects {
    fn upsert(&self, record: ProjectRecord) -> Result<(), StoreError> {
        self.records
            .lock()
            .expect("repository mutex poisoned")
            .insert(record.project_id.clone(), record);
        Ok(())
    }

    fn fetch(&self, id: &ProjectId) -> Result<Option<ProjectRecord>, StoreError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }
}

pub(super) struct OfflineProjects;

impl ProjectRepository for OfflineProjects {
    fn upsert(&self, _record: ProjectRecord) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("project store offline".to_string()))
    }

    fn fetch(&self, _id: &ProjectId) -> Result<Option<ProjectRecord>, StoreError> {
        Err(StoreError::Unavailable("project store offline".to_string()))
    }
}

/// Evaluator double that echoes the description and remembers each request.
#[derive(Default, Clone)]
pub(super) struct EchoEvaluator {
    pub(super) requests: Arc<Mutex<Vec<ProjectDescription>>>,
}

#[async_trait]
impl ProjectEvaluator for EchoEvaluator {
    async fn evaluate(&self, request: &ProjectDescription) -> Result<String, EvaluatorError> {
        self.requests
            .lock()
            .expect("evaluator mutex poisoned")
            .push(request.clone());
        Ok(format!("✅ Evaluado: {}", request.description))
    }
}

pub(super) struct FailingEvaluator;

#[async_trait]
impl ProjectEvaluator for FailingEvaluator {
    async fn evaluate(&self, _request: &ProjectDescription) -> Result<String, EvaluatorError> {
        Err(EvaluatorError::Status(503))
    }
}

pub(super) fn echo_service() -> (
    ProjectService<MemoryProjects, EchoEvaluator>,
    Arc<MemoryProjects>,
    Arc<EchoEvaluator>,
) {
    let repository = Arc::new(MemoryProjects::default());
    let evaluator = Arc::new(EchoEvaluator::default());
    let service = ProjectService::new(repository.clone(), evaluator.clone());
    (service, repository, evaluator)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
