use super::domain::{QuizAnswers, MAX_POINTS_PER_FIELD};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

impl RiskTier {
    pub const fn from_percentage(percentage: u8) -> Self {
        if percentage >= 80 {
            Self::Low
        } else if percentage >= 60 {
            Self::Medium
        } else {
            Self::High
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Bajo",
            Self::Medium => "Medio",
            Self::High => "Alto",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ComplianceScore {
    pub percentage: u8,
    pub risk_tier: RiskTier,
    pub risk_label: &'static str,
    pub earned_points: u8,
    pub max_points: u8,
}

/// Weighted compliance percentage over the six answers.
pub fn compliance_score(answers: &QuizAnswers) -> ComplianceScore {
    let selections = answers.selections();
    let earned_points: u8 = selections.iter().map(|selection| selection.points).sum();
    let max_points = MAX_POINTS_PER_FIELD * selections.len() as u8;

    let percentage = ((earned_points as f32 / max_points as f32) * 100.0)
        .round()
        .clamp(0.0, 100.0) as u8;
    let risk_tier = RiskTier::from_percentage(percentage);

    ComplianceScore {
        percentage,
        risk_tier,
        risk_label: risk_tier.label(),
        earned_points,
        max_points,
    }
}
