use super::domain::{AnswerError, AnswerSheet, QuizAnswers, QuizField};
use super::questionnaire::{QuestionSpec, Questionnaire};

/// Step-by-step navigation over the questionnaire.
///
/// The step pointer is 1-based and always stays within `[1, len]`. Moving the
/// pointer never depends on whether the current question has been answered;
/// callers gate the "next" action with [`QuestionnaireWalker::can_proceed`].
#[derive(Debug, Clone)]
pub struct QuestionnaireWalker {
    questionnaire: Questionnaire,
    step: usize,
    answers: AnswerSheet,
}

impl QuestionnaireWalker {
    pub fn new(questionnaire: Questionnaire) -> Self {
        Self {
            questionnaire,
            step: 1,
            answers: AnswerSheet::default(),
        }
    }

    pub fn standard() -> Self {
        Self::new(Questionnaire::standard())
    }

    pub fn questionnaire(&self) -> &Questionnaire {
        &self.questionnaire
    }

    pub fn current_step(&self) -> usize {
        self.step
    }

    pub fn total_steps(&self) -> usize {
        self.questionnaire.len()
    }

    pub fn active_question(&self) -> &QuestionSpec {
        self.questionnaire
            .step(self.step)
            .unwrap_or(&self.questionnaire.questions()[0])
    }

    pub fn answers(&self) -> &AnswerSheet {
        &self.answers
    }

    /// Move forward one step. Returns `false` at the last step.
    pub fn advance(&mut self) -> bool {
        if self.step < self.total_steps() {
            self.step += 1;
            true
        } else {
            false
        }
    }

    /// Move back one step. Returns `false` at the first step.
    pub fn retreat(&mut self) -> bool {
        if self.step > 1 {
            self.step -= 1;
            true
        } else {
            false
        }
    }

    pub fn record_answer(&mut self, field: QuizField, value: &str) -> Result<(), AnswerError> {
        self.answers.record(field, value)
    }

    pub fn is_step_complete(&self, step: usize) -> bool {
        QuizField::from_step(step).is_some_and(|field| self.answers.is_answered(field))
    }

    pub fn can_proceed(&self) -> bool {
        self.is_step_complete(self.step)
    }

    pub fn all_complete(&self) -> bool {
        self.answers.is_complete()
    }

    pub fn is_last_step(&self) -> bool {
        self.step == self.total_steps()
    }

    pub fn progress_percent(&self) -> u8 {
        let total = self.total_steps().max(1) as f32;
        ((self.step as f32 / total) * 100.0).round() as u8
    }

    pub fn finalize(&self) -> Result<QuizAnswers, AnswerError> {
        self.answers.finalize()
    }
}

impl Default for QuestionnaireWalker {
    fn default() -> Self {
        Self::standard()
    }
}
