use super::domain::{
    Audits, Encryption, IncidentPlan, Policies, QuizAnswers, QuizField, TwoFactor,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
    Low,
    Done,
}

impl Priority {
    pub const fn label(self) -> &'static str {
        match self {
            Self::High => "Alta",
            Self::Medium => "Media",
            Self::Low => "Baja",
            Self::Done => "Completado",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationStatus {
    Pending,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecommendationEntry {
    pub field: QuizField,
    pub priority: Priority,
    pub priority_label: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub status: RecommendationStatus,
}

impl RecommendationEntry {
    fn pending(
        field: QuizField,
        priority: Priority,
        title: &'static str,
        description: &'static str,
    ) -> Self {
        Self {
            field,
            priority,
            priority_label: priority.label(),
            title,
            description,
            status: RecommendationStatus::Pending,
        }
    }

    fn done(field: QuizField, title: &'static str, description: &'static str) -> Self {
        Self {
            field,
            priority: Priority::Done,
            priority_label: Priority::Done.label(),
            title,
            description,
            status: RecommendationStatus::Completed,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == RecommendationStatus::Pending
    }
}

/// Rule table applied per field in declaration order. The data type never
/// yields an entry of its own; it only raises the 2FA priority.
pub fn recommendations(answers: &QuizAnswers) -> Vec<RecommendationEntry> {
    let mut entries = Vec::new();

    match answers.encryption {
        Encryption::NotImplemented => entries.push(RecommendationEntry::pending(
            QuizField::Encryption,
            Priority::High,
            "Implementar Encriptación Avanzada",
            "Tu sistema no cuenta con encriptación. Implementa AES-256 o superior para proteger los datos personales según la Ley 21.719",
        )),
        Encryption::Basic => entries.push(RecommendationEntry::pending(
            QuizField::Encryption,
            Priority::High,
            "Implementar Encriptación Avanzada",
            "Tu sistema necesita encriptación AES-256 para cumplir con los estándares de la Ley 21.719",
        )),
        Encryption::Advanced => entries.push(RecommendationEntry::done(
            QuizField::Encryption,
            "Encriptación Avanzada",
            "Tus datos están protegidos con encriptación AES-256 o superior",
        )),
    }

    match answers.policies {
        Policies::NotImplemented => entries.push(RecommendationEntry::pending(
            QuizField::Policies,
            Priority::High,
            "Actualizar Políticas de Privacidad",
            "Debes redactar políticas de privacidad y términos de uso que incluyan las disposiciones de la Ley 21.719",
        )),
        Policies::Outdated => entries.push(RecommendationEntry::pending(
            QuizField::Policies,
            Priority::High,
            "Actualizar Políticas de Privacidad",
            "Las políticas deben incluir las nuevas disposiciones de la ley de ciberseguridad",
        )),
        Policies::Updated => entries.push(RecommendationEntry::done(
            QuizField::Policies,
            "Políticas de Privacidad Actualizadas",
            "Tus políticas de privacidad y términos de uso reflejan la nueva ley",
        )),
    }

    let two_factor_priority = if answers.data_type.is_high_risk() {
        Priority::High
    } else {
        Priority::Medium
    };
    match answers.two_factor {
        TwoFactor::NotImplemented => entries.push(RecommendationEntry::pending(
            QuizField::TwoFactor,
            two_factor_priority,
            "Implementar Autenticación 2FA",
            "Añadir autenticación de dos factores para mejorar la seguridad de acceso",
        )),
        TwoFactor::Optional => entries.push(RecommendationEntry::pending(
            QuizField::TwoFactor,
            two_factor_priority,
            "Implementar Autenticación 2FA",
            "Haz obligatoria la autenticación de dos factores para todos los usuarios",
        )),
        TwoFactor::Mandatory => {}
    }

    if answers.audits == Audits::NotImplemented {
        entries.push(RecommendationEntry::pending(
            QuizField::Audits,
            Priority::Medium,
            "Programar Auditorías de Seguridad",
            "Realiza auditorías de seguridad periódicas, idealmente cada 3 a 6 meses",
        ));
    }

    match answers.incident_plan {
        IncidentPlan::NotImplemented => entries.push(RecommendationEntry::pending(
            QuizField::IncidentPlan,
            Priority::High,
            "Plan de Respuesta a Incidentes",
            "Desarrollar un protocolo completo para manejo de incidentes de seguridad",
        )),
        IncidentPlan::Basic => entries.push(RecommendationEntry::pending(
            QuizField::IncidentPlan,
            Priority::Low,
            "Plan de Respuesta a Incidentes",
            "Completa y pon a prueba tu plan básico de respuesta ante incidentes",
        )),
        IncidentPlan::Comprehensive => {}
    }

    entries
}
