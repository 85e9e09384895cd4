use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::assessment::domain::{
    AssessmentId, AssessmentRecord, Audits, DataType, Encryption, IncidentPlan, Policies,
    QuizAnswers, TwoFactor,
};
use crate::assessment::repository::{AssessmentStore, StoreError};
use crate::assessment::{assessment_router, AssessmentService};

/// The worked example from the product brief: score 22, high risk.
pub(super) fn weak_answers() -> QuizAnswers {
    QuizAnswers {
        data_type: DataType::Sensitive,
        encryption: Encryption::NotImplemented,
        policies: Policies::Outdated,
        two_factor: TwoFactor::NotImplemented,
        audits: Audits::NotImplemented,
        incident_plan: IncidentPlan::Basic,
    }
}

pub(super) fn optimal_answers(data_type: DataType) -> QuizAnswers {
    QuizAnswers {
        data_type,
        encryption: Encryption::Advanced,
        policies: Policies::Updated,
        two_factor: TwoFactor::Mandatory,
        audits: Audits::Regular,
        incident_plan: IncidentPlan::Comprehensive,
    }
}

pub(super) fn unanswered() -> QuizAnswers {
    QuizAnswers {
        data_type: DataType::NoPersonalData,
        encryption: Encryption::NotImplemented,
        policies: Policies::NotImplemented,
        two_factor: TwoFactor::NotImplemented,
        audits: Audits::NotImplemented,
        incident_plan: IncidentPlan::NotImplemented,
    }
}

pub(super) fn build_service() -> (AssessmentService<MemoryStore>, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::default());
    let service = AssessmentService::new(store.clone());
    (service, store)
}

pub(super) fn router_with_service(service: AssessmentService<MemoryStore>) -> axum::Router {
    assessment_router(Arc::new(service))
}

#[derive(Default, Clone)]
pub(super) struct MemoryStore {
    pub(super) records: Arc<Mutex<HashMap<AssessmentId, AssessmentRecord>>>,
}

impl AssessmentStore for MemoryStore {
    fn insert(&self, record: AssessmentRecord) -> Result<AssessmentRecord, StoreError> {
        let mut guard = self.records.lock().expect("store mutex poisoned");
        if guard.contains_key(&record.assessment_id) {
            return Err(StoreError::Conflict);
        }
        guard.insert(record.assessment_id.clone(), record.clone());
        Ok(record)
    }

    fn fetch(&self, id: &AssessmentId) -> Result<Option<AssessmentRecord>, StoreError> {
        let guard = self.records.lock().expect("store mutex poisoned");
        Ok(guard.get(id).cloned())
    }
}

pub(super) struct ConflictStore;

impl AssessmentStore for ConflictStore {
    fn insert(&self, _record: AssessmentRecord) -> Result<AssessmentRecord, StoreError> {
        Err(StoreError::Conflict)
    }

    fn fetch(&self, _id: &AssessmentId) -> Result<Option<AssessmentRecord>, StoreError> {
        Ok(None)
    }
}

pub(super) struct UnavailableStore;

impl AssessmentStore for UnavailableStore {
    fn insert(&self, _record: AssessmentRecord) -> Result<AssessmentRecord, StoreError> {
        Err(StoreError::Unavailable("session store offline".to_string()))
    }

    fn fetch(&self, _id: &AssessmentId) -> Result<Option<AssessmentRecord>, StoreError> {
        Err(StoreError::Unavailable("session store offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
