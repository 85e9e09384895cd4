use super::domain::{
    AnswerOption, Audits, DataType, Encryption, IncidentPlan, Policies, QuizField, TwoFactor,
};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct QuestionOption {
    pub value: &'static str,
    pub label: &'static str,
    pub points: u8,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuestionSpec {
    pub id: usize,
    pub title: &'static str,
    pub prompt: &'static str,
    pub field: QuizField,
    pub options: Vec<QuestionOption>,
}

impl QuestionSpec {
    pub fn option(&self, value: &str) -> Option<&QuestionOption> {
        self.options.iter().find(|option| option.value == value)
    }

    pub fn max_points(&self) -> u8 {
        self.options
            .iter()
            .map(|option| option.points)
            .max()
            .unwrap_or(0)
    }
}

/// The fixed Ley 21.719 self-assessment.
#[derive(Debug, Clone, Serialize)]
pub struct Questionnaire {
    questions: Vec<QuestionSpec>,
}

impl Questionnaire {
    pub fn standard() -> Self {
        Self {
            questions: vec![
                question::<DataType>(
                    "Tipo de Datos",
                    "¿Qué tipo de datos personales maneja tu aplicación?",
                ),
                question::<Encryption>(
                    "Encriptación",
                    "¿Tienes implementado un sistema de encriptación para los datos?",
                ),
                question::<Policies>(
                    "Políticas",
                    "¿Cuentas con políticas de privacidad y términos de uso actualizados?",
                ),
                question::<TwoFactor>(
                    "Autenticación 2FA",
                    "¿Implementas autenticación de dos factores (2FA)?",
                ),
                question::<Audits>(
                    "Auditorías",
                    "¿Realizas auditorías de seguridad periódicas?",
                ),
                question::<IncidentPlan>(
                    "Plan de Incidentes",
                    "¿Tienes un plan de respuesta ante incidentes de ciberseguridad?",
                ),
            ],
        }
    }

    pub fn questions(&self) -> &[QuestionSpec] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Question shown at a 1-based step.
    pub fn step(&self, step: usize) -> Option<&QuestionSpec> {
        step.checked_sub(1)
            .and_then(|index| self.questions.get(index))
    }

    pub fn for_field(&self, field: QuizField) -> Option<&QuestionSpec> {
        self.questions.iter().find(|question| question.field == field)
    }
}

impl Default for Questionnaire {
    fn default() -> Self {
        Self::standard()
    }
}

fn question<T: AnswerOption>(title: &'static str, prompt: &'static str) -> QuestionSpec {
    QuestionSpec {
        id: T::FIELD.step(),
        title,
        prompt,
        field: T::FIELD,
        options: T::options()
            .iter()
            .map(|option| QuestionOption {
                value: option.token(),
                label: option.label(),
                points: option.points(),
            })
            .collect(),
    }
}
