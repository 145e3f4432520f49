//! Evaluation request input and the final aggregate result.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{
    BearAnalysis, BullAnalysis, GroundingSummary, JudgeResult, TrustMetrics, VerificationReport,
};

/// Project domain, used for rubric calibration notes and anchor lookup.
/// Adding a domain is a data change (new anchor row), not control flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectDomain {
    Defi,
    Memecoin,
    Ai,
    Infrastructure,
    Gaming,
    Other,
}

impl ProjectDomain {
    /// Human label used inside the rubric's calibration note.
    pub fn label(&self) -> &'static str {
        match self {
            ProjectDomain::Defi => "DeFi",
            ProjectDomain::Memecoin => "Memecoin",
            ProjectDomain::Ai => "AI",
            ProjectDomain::Infrastructure => "Infrastructure",
            ProjectDomain::Gaming => "Gaming",
            ProjectDomain::Other => "General",
        }
    }
}

/// A submitted project idea.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationInput {
    pub name: String,
    pub description: String,
    pub domain: ProjectDomain,
    #[serde(default)]
    pub token_symbol: Option<String>,
    #[serde(default)]
    pub chain: Option<String>,
    #[serde(default)]
    pub links: Vec<String>,
}

/// The investor-grade report: calibrated judge output, both adversarial
/// analyses, trust metrics, and the grounding/verification records.
///
/// Every `EvaluationResult` that reaches a caller passed verification;
/// fatal paths surface as errors instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub evaluation_id: Uuid,
    pub input_name: String,
    pub domain: ProjectDomain,
    pub judge: JudgeResult,
    pub bear: BearAnalysis,
    pub bull: BullAnalysis,
    pub trust: TrustMetrics,
    pub grounding: GroundingSummary,
    pub verification: VerificationReport,
}
