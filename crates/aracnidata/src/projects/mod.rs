//! Project intake and the remote evaluation boundary.
//!
//! The questionnaire summary and free-text project descriptions land here. The
//! evaluation backend is opaque: it receives `{id, description}` and answers with
//! free text, which is passed through untouched.

pub mod domain;
pub mod evaluator;
pub mod repository;
pub mod router;
pub mod service;
pub mod submission;

#[cfg(test)]
mod tests;

pub use domain::{EvaluationAnswer, ProjectDescription, ProjectId, ProjectRecord};
pub use evaluator::{
    EvaluatorError, HttpProjectEvaluator, ProjectEvaluator, DEFAULT_EVALUATOR_URL,
    EVALUATION_FALLBACK,
};
pub use repository::ProjectRepository;
pub use router::project_router;
pub use service::{ProjectService, ProjectServiceError};
pub use submission::{QuizSubmissionClient, SubmissionError, QUIZ_SUBMIT_PATH};
