//! Deterministic local repairs for failing checks.
//!
//! Repairs never invent scores: numeric patches are derived from the
//! draft's own sub-scores (clamping, recomputing the overall from the
//! weighted category mean). Text patches are explicit placeholders,
//! never synthesized content.

use predikt_core::models::{Claim, ClaimSupport, ClaimType, EvidencePool, JudgeResult};

use crate::checks::{EVIDENCE_MARKER, OVERALL_MARKER};

/// Apply one deterministic repair pass covering every patchable check.
pub fn repair_pass(mut judge: JudgeResult, pool: &EvidencePool, envelope: f64) -> JudgeResult {
    // Bounds first: the envelope recomputation below reads sub-scores.
    judge.technical.score = clamp_score(judge.technical.score);
    judge.tokenomics.score = clamp_score(judge.tokenomics.score);
    judge.market.score = clamp_score(judge.market.score);
    judge.execution.score = clamp_score(judge.execution.score);
    judge.overall_score = clamp_score(judge.overall_score);

    let mean = judge.weighted_category_mean();
    if (judge.overall_score - mean).abs() > envelope {
        judge.overall_score = clamp_score(mean);
    }

    if judge.summary.trim().is_empty() {
        judge.summary = "Summary unavailable; see structured analysis.".to_string();
    }
    if judge.reasoning_steps.is_empty() {
        judge
            .reasoning_steps
            .push("Overall score derived from weighted rubric categories.".to_string());
    }
    if !judge.structured_analysis.contains(EVIDENCE_MARKER) {
        judge
            .structured_analysis
            .push_str("\n## EVIDENCE\n(no evidence section produced)\n");
    }
    if !judge.structured_analysis.contains(OVERALL_MARKER) {
        judge
            .structured_analysis
            .push_str("\n## OVERALL\n(see overall_score)\n");
    }

    judge.claims = judge
        .claims
        .into_iter()
        .map(|c| strip_unknown_evidence(c, pool))
        .collect();

    judge
}

fn clamp_score(score: f64) -> f64 {
    if score.is_finite() {
        score.clamp(0.0, 100.0)
    } else {
        0.0
    }
}

/// Drop evidence ids not present in the pool; a fact claim left with
/// no evidence becomes uncorroborated.
fn strip_unknown_evidence(mut claim: Claim, pool: &EvidencePool) -> Claim {
    claim.evidence_ids.retain(|id| pool.contains(id));
    if claim.claim_type == ClaimType::Fact && claim.evidence_ids.is_empty() {
        claim.support = ClaimSupport::Uncorroborated;
    }
    claim
}
