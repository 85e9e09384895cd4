use super::domain::{ComplianceClass, QuizAnswers};
use super::recommendations::{recommendations, RecommendationEntry};
use super::scoring::{compliance_score, ComplianceScore};
use serde::Serialize;

pub const REEVALUATION_STEP: &str = "Realizar nueva evaluación en 30 días";

/// Unweighted membership counts over the six answers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AggregateCounts {
    pub completed: usize,
    pub needs_improvement: usize,
    pub critical: usize,
}

impl AggregateCounts {
    pub fn total(&self) -> usize {
        self.completed + self.needs_improvement + self.critical
    }
}

pub fn aggregate_counts(answers: &QuizAnswers) -> AggregateCounts {
    answers
        .selections()
        .iter()
        .filter_map(|selection| selection.classification())
        .fold(AggregateCounts::default(), |mut counts, class| {
            match class {
                ComplianceClass::Completed => counts.completed += 1,
                ComplianceClass::NeedsImprovement => counts.needs_improvement += 1,
                ComplianceClass::Critical => counts.critical += 1,
            }
            counts
        })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssessmentReport {
    pub answers: QuizAnswers,
    pub score: ComplianceScore,
    pub counts: AggregateCounts,
    pub recommendations: Vec<RecommendationEntry>,
    pub next_steps: Vec<String>,
}

impl AssessmentReport {
    /// Derive everything the results view shows. Nothing is cached; callers
    /// rebuild the report on every read.
    pub fn build(answers: &QuizAnswers) -> Self {
        let score = compliance_score(answers);
        let counts = aggregate_counts(answers);
        let recommendations = recommendations(answers);

        let mut next_steps: Vec<String> = recommendations
            .iter()
            .filter(|entry| entry.is_pending())
            .map(|entry| entry.title.to_string())
            .collect();
        next_steps.push(REEVALUATION_STEP.to_string());

        Self {
            answers: *answers,
            score,
            counts,
            recommendations,
            next_steps,
        }
    }

    pub fn pending(&self) -> impl Iterator<Item = &RecommendationEntry> {
        self.recommendations.iter().filter(|entry| entry.is_pending())
    }

    pub fn completed(&self) -> impl Iterator<Item = &RecommendationEntry> {
        self.recommendations.iter().filter(|entry| !entry.is_pending())
    }
}
