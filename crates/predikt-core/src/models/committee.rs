//! Committee stage payloads: Bear, Bull, and Judge outputs, plus claims.

use serde::{Deserialize, Serialize};

/// The three debate stages, in dependency order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Bear,
    Bull,
    Judge,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Bear => write!(f, "bear"),
            Stage::Bull => write!(f, "bull"),
            Stage::Judge => write!(f, "judge"),
        }
    }
}

/// Whether a claim asserts an external fact or an internal inference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimType {
    Fact,
    Inference,
}

/// Whether a claim is backed by evidence from the grounding pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimSupport {
    Corroborated,
    Uncorroborated,
}

/// A single claim extracted from the judge's analysis.
///
/// A `Fact` claim with empty `evidence_ids` is implicitly
/// `Uncorroborated`; `normalize` enforces that at decode time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claim {
    pub text: String,
    pub claim_type: ClaimType,
    #[serde(default)]
    pub evidence_ids: Vec<String>,
    pub support: ClaimSupport,
}

impl Claim {
    /// Enforce the implicit-uncorroborated rule for evidence-free facts.
    pub fn normalize(mut self) -> Self {
        if self.claim_type == ClaimType::Fact && self.evidence_ids.is_empty() {
            self.support = ClaimSupport::Uncorroborated;
        }
        self
    }
}

/// Bear (pessimistic critic) verdicts, harshest last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BearVerdict {
    Proceed,
    Caution,
    Avoid,
    Kill,
}

/// Bull (optimistic advocate) verdicts, most bullish last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BullVerdict {
    Skip,
    Neutral,
    Long,
    #[serde(alias = "ALL IN")]
    AllIn,
}

/// Output of the pessimistic critic stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BearAnalysis {
    pub fatal_flaws: Vec<String>,
    /// 0..100, higher = riskier.
    pub risk_score: f64,
    pub verdict: BearVerdict,
    pub roast: String,
}

/// Output of the optimistic advocate stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BullAnalysis {
    pub alpha_signals: Vec<String>,
    /// 0..100, higher = more upside.
    pub upside_score: f64,
    pub verdict: BullVerdict,
    pub pitch: String,
}

/// One rubric category: a sub-score plus the judge's narrative for it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryAssessment {
    /// 0..100.
    pub score: f64,
    pub notes: String,
}

/// Output of the synthesizing judge stage.
///
/// `structured_analysis` must contain the `## EVIDENCE` and `## OVERALL`
/// sections; the verifier checks for them mechanically.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JudgeResult {
    /// 0..100.
    pub overall_score: f64,
    pub reasoning_steps: Vec<String>,
    pub summary: String,
    pub technical: CategoryAssessment,
    pub tokenomics: CategoryAssessment,
    pub market: CategoryAssessment,
    pub execution: CategoryAssessment,
    pub recommendations: Vec<String>,
    pub structured_analysis: String,
    #[serde(default)]
    pub claims: Vec<Claim>,
}

impl JudgeResult {
    /// Rubric-weighted mean of the category sub-scores. Weights:
    /// market 0.30, technical 0.25, tokenomics 0.25, execution 0.20.
    pub fn weighted_category_mean(&self) -> f64 {
        0.30 * self.market.score
            + 0.25 * self.technical.score
            + 0.25 * self.tokenomics.score
            + 0.20 * self.execution.score
    }

    /// Normalize all claims (evidence-free facts become uncorroborated).
    pub fn normalize_claims(mut self) -> Self {
        self.claims = self.claims.into_iter().map(Claim::normalize).collect();
        self
    }
}
