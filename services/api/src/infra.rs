use aracnidata::assessment::{
    AssessmentId, AssessmentRecord, AssessmentStore, QuizAnswers, StoreError,
};
use aracnidata::config::DEFAULT_STORE_CAPACITY;
use aracnidata::projects::{ProjectId, ProjectRecord, ProjectRepository};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::{HashMap, VecDeque};
use std::hash::Hash;
use std::io::ErrorKind;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Keeps at most `capacity` entries; inserting a new key past the cap drops
/// the oldest one.
struct BoundedRecords<K, V> {
    capacity: usize,
    order: VecDeque<K>,
    records: HashMap<K, V>,
}

impl<K, V> BoundedRecords<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            order: VecDeque::new(),
            records: HashMap::new(),
        }
    }

    fn contains_key(&self, key: &K) -> bool {
        self.records.contains_key(key)
    }

    fn get(&self, key: &K) -> Option<V> {
        self.records.get(key).cloned()
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.records.len()
    }

    fn insert(&mut self, key: K, value: V) {
        if self.records.insert(key.clone(), value).is_some() {
            return;
        }
        self.order.push_back(key);
        while self.order.len() > self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.records.remove(&oldest);
            }
        }
    }
}

#[derive(Clone)]
pub(crate) struct InMemoryAssessmentStore {
    records: Arc<Mutex<BoundedRecords<AssessmentId, AssessmentRecord>>>,
}

impl InMemoryAssessmentStore {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Arc::new(Mutex::new(BoundedRecords::new(capacity))),
        }
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.records.lock().expect("assessment mutex poisoned").len()
    }
}

impl Default for InMemoryAssessmentStore {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_STORE_CAPACITY)
    }
}

impl AssessmentStore for InMemoryAssessmentStore {
    fn insert(&self, record: AssessmentRecord) -> Result<AssessmentRecord, StoreError> {
        let mut guard = self.records.lock().expect("assessment mutex poisoned");
        if guard.contains_key(&record.assessment_id) {
            return Err(StoreError::Conflict);
        }
        guard.insert(record.assessment_id.clone(), record.clone());
        Ok(record)
    }

    fn fetch(&self, id: &AssessmentId) -> Result<Option<AssessmentRecord>, StoreError> {
        let guard = self.records.lock().expect("assessment mutex poisoned");
        Ok(guard.get(id))
    }
}

#[derive(Clone)]
pub(crate) struct InMemoryProjectRepository {
    records: Arc<Mutex<BoundedRecords<ProjectId, ProjectRecord>>>,
}

impl InMemoryProjectRepository {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Arc::new(Mutex::new(BoundedRecords::new(capacity))),
        }
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.records.lock().expect("project mutex poisoned").len()
    }
}

impl Default for InMemoryProjectRepository {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_STORE_CAPACITY)
    }
}

impl ProjectRepository for InMemoryProjectRepository {
    fn upsert(&self, record: ProjectRecord) -> Result<(), StoreError> {
        let mut guard = self.records.lock().expect("project mutex poisoned");
        guard.insert(record.project_id.clone(), record);
        Ok(())
    }

    fn fetch(&self, id: &ProjectId) -> Result<Option<ProjectRecord>, StoreError> {
        let guard = self.records.lock().expect("project mutex poisoned");
        Ok(guard.get(id))
    }
}

/// Load answers saved by `quiz --save`. A missing file reads as "no answers yet".
pub(crate) fn read_answers_file(path: &Path) -> Result<Option<QuizAnswers>, std::io::Error> {
    match std::fs::read_to_string(path) {
        Ok(raw) => Ok(QuizAnswers::from_slot(Some(&raw))),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err),
    }
}

pub(crate) fn write_answers_file(path: &Path, answers: &QuizAnswers) -> Result<(), std::io::Error> {
    std::fs::write(path, answers.to_slot())
}
