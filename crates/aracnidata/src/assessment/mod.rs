//! Ley 21.719 self-assessment: the fixed questionnaire, the step walker, and the
//! scoring and recommendation engine that derives the results view.
//!
//! Everything downstream of [`QuizAnswers`] is a pure function of the six
//! answers and is recomputed on every read.

pub mod domain;
pub mod questionnaire;
pub mod recommendations;
pub mod report;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;
pub mod walker;

#[cfg(test)]
mod tests;

pub use domain::{
    AnswerError, AnswerOption, AnswerSheet, AssessmentId, AssessmentRecord, Audits,
    ComplianceClass, DataType, Encryption, IncidentPlan, Policies, QuizAnswers, QuizField,
    SelectedAnswer, TwoFactor, MAX_POINTS_PER_FIELD,
};
pub use questionnaire::{QuestionOption, QuestionSpec, Questionnaire};
pub use recommendations::{recommendations, Priority, RecommendationEntry, RecommendationStatus};
pub use report::{aggregate_counts, AggregateCounts, AssessmentReport, REEVALUATION_STEP};
pub use repository::{AssessmentStore, StoreError};
pub use router::{assessment_router, QUESTIONNAIRE_PATH};
pub use scoring::{compliance_score, ComplianceScore, RiskTier};
pub use service::{AssessmentService, AssessmentServiceError};
pub use walker::QuestionnaireWalker;
