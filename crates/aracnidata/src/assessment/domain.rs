use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Highest weight any single answer can carry. Every question counts equally
/// toward the maximum regardless of how many options it offers.
pub const MAX_POINTS_PER_FIELD: u8 = 3;

/// The six questionnaire fields, in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum QuizField {
    #[serde(rename = "dataType")]
    DataType,
    #[serde(rename = "encryption")]
    Encryption,
    #[serde(rename = "policies")]
    Policies,
    #[serde(rename = "twoFA")]
    TwoFactor,
    #[serde(rename = "audits")]
    Audits,
    #[serde(rename = "incidentPlan")]
    IncidentPlan,
}

impl QuizField {
    pub const fn ordered() -> [Self; 6] {
        [
            Self::DataType,
            Self::Encryption,
            Self::Policies,
            Self::TwoFactor,
            Self::Audits,
            Self::IncidentPlan,
        ]
    }

    /// JSON key used by the web front end and the legacy `quizAnswers` slot.
    pub const fn key(self) -> &'static str {
        match self {
            Self::DataType => "dataType",
            Self::Encryption => "encryption",
            Self::Policies => "policies",
            Self::TwoFactor => "twoFA",
            Self::Audits => "audits",
            Self::IncidentPlan => "incidentPlan",
        }
    }

    /// 1-based questionnaire step bound to this field.
    pub const fn step(self) -> usize {
        match self {
            Self::DataType => 1,
            Self::Encryption => 2,
            Self::Policies => 3,
            Self::TwoFactor => 4,
            Self::Audits => 5,
            Self::IncidentPlan => 6,
        }
    }

    pub fn from_step(step: usize) -> Option<Self> {
        step.checked_sub(1)
            .and_then(|index| Self::ordered().get(index).copied())
    }
}

impl fmt::Display for QuizField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Classification used by the aggregate counters on the results view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceClass {
    Completed,
    NeedsImprovement,
    Critical,
}

impl ComplianceClass {
    /// Membership test over answer tokens; tokens outside the three sets are
    /// left unclassified (e.g. `sensitive`, `biometric`).
    pub fn of_token(token: &str) -> Option<Self> {
        match token {
            "advanced" | "updated" | "mandatory" | "regular" | "comprehensive" => {
                Some(Self::Completed)
            }
            "basic" | "outdated" | "optional" | "annual" => Some(Self::NeedsImprovement),
            "none" => Some(Self::Critical),
            _ => None,
        }
    }
}

/// Shared behavior of the per-field answer enums.
pub trait AnswerOption: Copy + Sized + 'static {
    const FIELD: QuizField;

    /// All options in display order.
    fn options() -> &'static [Self];

    /// Wire token (`"basic"`, `"none"`, ...).
    fn token(self) -> &'static str;

    /// Human-readable option label shown in the questionnaire.
    fn label(self) -> &'static str;

    /// Weight contributed to the compliance score.
    fn points(self) -> u8;

    fn parse(token: &str) -> Option<Self> {
        Self::options()
            .iter()
            .copied()
            .find(|option| option.token() == token)
    }

    fn classification(self) -> Option<ComplianceClass> {
        ComplianceClass::of_token(self.token())
    }
}

macro_rules! answer_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $field:expr, {
            $($variant:ident => ($token:literal, $label:literal, $points:literal)),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $token)]
                $variant,
            )+
        }

        impl AnswerOption for $name {
            const FIELD: QuizField = $field;

            fn options() -> &'static [Self] {
                &[$(Self::$variant),+]
            }

            fn token(self) -> &'static str {
                match self {
                    $(Self::$variant => $token,)+
                }
            }

            fn label(self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)+
                }
            }

            fn points(self) -> u8 {
                match self {
                    $(Self::$variant => $points,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.token())
            }
        }
    };
}

answer_enum!(
    /// Kind of personal data the application handles.
    DataType, QuizField::DataType, {
        Basic => ("basic", "Datos básicos (nombre, email, teléfono)", 1),
        Sensitive => ("sensitive", "Datos sensibles (financieros, médicos)", 2),
        Biometric => ("biometric", "Datos biométricos (huellas, reconocimiento facial)", 3),
        NoPersonalData => ("none", "No manejo datos personales", 0),
    }
);

answer_enum!(
    Encryption, QuizField::Encryption, {
        Advanced => ("advanced", "Sí, encriptación avanzada (AES-256 o superior)", 3),
        Basic => ("basic", "Sí, encriptación básica", 2),
        NotImplemented => ("none", "No tengo encriptación implementada", 0),
    }
);

answer_enum!(
    /// Privacy policy and terms-of-use status.
    Policies, QuizField::Policies, {
        Updated => ("updated", "Sí, actualizadas según la nueva ley", 3),
        Outdated => ("outdated", "Sí, pero necesitan actualización", 1),
        NotImplemented => ("none", "No tengo políticas implementadas", 0),
    }
);

answer_enum!(
    TwoFactor, QuizField::TwoFactor, {
        Mandatory => ("mandatory", "Sí, obligatorio para todos los usuarios", 3),
        Optional => ("optional", "Sí, opcional para los usuarios", 2),
        NotImplemented => ("none", "No implemento 2FA", 0),
    }
);

answer_enum!(
    /// Cadence of security audits.
    Audits, QuizField::Audits, {
        Regular => ("regular", "Sí, cada 3-6 meses", 3),
        Annual => ("annual", "Sí, anualmente", 2),
        NotImplemented => ("none", "No realizo auditorías", 0),
    }
);

answer_enum!(
    IncidentPlan, QuizField::IncidentPlan, {
        Comprehensive => ("comprehensive", "Sí, plan completo y probado", 3),
        Basic => ("basic", "Sí, plan básico", 1),
        NotImplemented => ("none", "No tengo plan de respuesta", 0),
    }
);

impl DataType {
    /// Sensitive and biometric data raise the urgency of access controls.
    pub const fn is_high_risk(self) -> bool {
        matches!(self, Self::Sensitive | Self::Biometric)
    }
}

/// A fully populated answer set, ready for scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizAnswers {
    #[serde(rename = "dataType")]
    pub data_type: DataType,
    pub encryption: Encryption,
    pub policies: Policies,
    #[serde(rename = "twoFA")]
    pub two_factor: TwoFactor,
    pub audits: Audits,
    #[serde(rename = "incidentPlan")]
    pub incident_plan: IncidentPlan,
}

/// Token, label, points and classification of one selected answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectedAnswer {
    pub field: QuizField,
    pub token: &'static str,
    pub label: &'static str,
    pub points: u8,
}

impl SelectedAnswer {
    fn of<T: AnswerOption>(value: T) -> Self {
        Self {
            field: T::FIELD,
            token: value.token(),
            label: value.label(),
            points: value.points(),
        }
    }

    pub fn classification(&self) -> Option<ComplianceClass> {
        ComplianceClass::of_token(self.token)
    }
}

impl QuizAnswers {
    /// Selected answers in field declaration order.
    pub fn selections(&self) -> [SelectedAnswer; 6] {
        [
            SelectedAnswer::of(self.data_type),
            SelectedAnswer::of(self.encryption),
            SelectedAnswer::of(self.policies),
            SelectedAnswer::of(self.two_factor),
            SelectedAnswer::of(self.audits),
            SelectedAnswer::of(self.incident_plan),
        ]
    }

    /// Human-readable summary forwarded on quiz submission.
    pub fn summary(&self) -> String {
        self.selections()
            .iter()
            .map(|selection| selection.label)
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// Decode the JSON stored under the legacy `quizAnswers` slot. Missing or
    /// malformed content means "no answers yet".
    pub fn from_slot(raw: Option<&str>) -> Option<Self> {
        let raw = raw?.trim();
        if raw.is_empty() {
            return None;
        }
        serde_json::from_str(raw).ok()
    }

    pub fn to_slot(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// Answer sheet filled in step by step; every field starts empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerSheet {
    #[serde(rename = "dataType", default)]
    pub data_type: Option<DataType>,
    #[serde(default)]
    pub encryption: Option<Encryption>,
    #[serde(default)]
    pub policies: Option<Policies>,
    #[serde(rename = "twoFA", default)]
    pub two_factor: Option<TwoFactor>,
    #[serde(default)]
    pub audits: Option<Audits>,
    #[serde(rename = "incidentPlan", default)]
    pub incident_plan: Option<IncidentPlan>,
}

impl AnswerSheet {
    /// Set exactly one field from its wire token, replacing any prior value.
    pub fn record(&mut self, field: QuizField, token: &str) -> Result<(), AnswerError> {
        fn parse<T: AnswerOption>(token: &str) -> Result<T, AnswerError> {
            T::parse(token).ok_or_else(|| AnswerError::UnknownOption {
                field: T::FIELD,
                value: token.to_string(),
            })
        }

        match field {
            QuizField::DataType => self.data_type = Some(parse(token)?),
            QuizField::Encryption => self.encryption = Some(parse(token)?),
            QuizField::Policies => self.policies = Some(parse(token)?),
            QuizField::TwoFactor => self.two_factor = Some(parse(token)?),
            QuizField::Audits => self.audits = Some(parse(token)?),
            QuizField::IncidentPlan => self.incident_plan = Some(parse(token)?),
        }
        Ok(())
    }

    /// Wire token currently selected for `field`, if any.
    pub fn selected(&self, field: QuizField) -> Option<&'static str> {
        match field {
            QuizField::DataType => self.data_type.map(AnswerOption::token),
            QuizField::Encryption => self.encryption.map(AnswerOption::token),
            QuizField::Policies => self.policies.map(AnswerOption::token),
            QuizField::TwoFactor => self.two_factor.map(AnswerOption::token),
            QuizField::Audits => self.audits.map(AnswerOption::token),
            QuizField::IncidentPlan => self.incident_plan.map(AnswerOption::token),
        }
    }

    pub fn is_answered(&self, field: QuizField) -> bool {
        self.selected(field).is_some()
    }

    pub fn missing(&self) -> Vec<QuizField> {
        QuizField::ordered()
            .into_iter()
            .filter(|field| !self.is_answered(*field))
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing().is_empty()
    }

    pub fn finalize(&self) -> Result<QuizAnswers, AnswerError> {
        match (
            self.data_type,
            self.encryption,
            self.policies,
            self.two_factor,
            self.audits,
            self.incident_plan,
        ) {
            (
                Some(data_type),
                Some(encryption),
                Some(policies),
                Some(two_factor),
                Some(audits),
                Some(incident_plan),
            ) => Ok(QuizAnswers {
                data_type,
                encryption,
                policies,
                two_factor,
                audits,
                incident_plan,
            }),
            _ => Err(AnswerError::Incomplete {
                missing: self.missing(),
            }),
        }
    }
}

impl From<QuizAnswers> for AnswerSheet {
    fn from(answers: QuizAnswers) -> Self {
        Self {
            data_type: Some(answers.data_type),
            encryption: Some(answers.encryption),
            policies: Some(answers.policies),
            two_factor: Some(answers.two_factor),
            audits: Some(answers.audits),
            incident_plan: Some(answers.incident_plan),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnswerError {
    #[error("'{value}' is not an option for {field}")]
    UnknownOption { field: QuizField, value: String },
    #[error("questionnaire incomplete, missing: {}", join_fields(.missing))]
    Incomplete { missing: Vec<QuizField> },
}

fn join_fields(fields: &[QuizField]) -> String {
    fields
        .iter()
        .map(|field| field.key())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Identifier of a stored assessment session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssessmentId(pub String);

impl fmt::Display for AssessmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Stored answers handed from quiz completion to the results view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentRecord {
    pub assessment_id: AssessmentId,
    pub answers: QuizAnswers,
    pub submitted_at: DateTime<Utc>,
}
