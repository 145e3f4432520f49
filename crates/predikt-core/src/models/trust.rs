//! Trust metrics: evidence coverage, confidence, disagreement.

use serde::{Deserialize, Serialize};

use super::VerifierStatus;

/// Threshold band for a confidence score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceLevel {
    Low,
    Medium,
    High,
}

/// A 0..1 confidence score with its threshold band.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Confidence {
    pub score: f64,
    pub level: ConfidenceLevel,
}

/// Inputs to `derive_confidence`.
///
/// Degrading any signal (losing external data, using a fallback,
/// accumulating agent failures, stale or unavailable sources) must
/// never raise the derived score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfidenceSignals {
    /// 0..1, from `compute_evidence_coverage`.
    pub evidence_coverage: f64,
    pub verifier_status: VerifierStatus,
    pub fallback_used: bool,
    /// At least one grounding source was fetched.
    pub external_data_available: bool,
    pub tavily_available: bool,
    pub defillama_required: bool,
    pub defillama_available: bool,
    pub agent_failures: u32,
    pub stale_source_count: u32,
    pub unavailable_source_count: u32,
}

/// Epistemic trust metrics for one evaluation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrustMetrics {
    /// 0..1 fraction of factual claims backed by evidence.
    pub evidence_coverage: f64,
    pub confidence: Confidence,
    /// 0..100 divergence between Bear and Bull framings.
    pub debate_disagreement_index: f64,
}
