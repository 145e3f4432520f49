//! The fixed check battery run against a decoded judge draft.
//!
//! Each check is a pure function returning `None` on pass or a
//! human-readable issue on failure. The decode check itself lives in
//! the verifier loop, since it gates whether a draft exists at all.

use predikt_core::models::{ClaimType, EvidencePool, JudgeResult};

/// Required section markers in `structured_analysis`.
pub const EVIDENCE_MARKER: &str = "## EVIDENCE";
pub const OVERALL_MARKER: &str = "## OVERALL";

/// Number of checks run against a decoded draft (decode check excluded).
pub const BATTERY_SIZE: u32 = 4;

/// Schema completeness: required narrative fields and section markers.
pub fn schema_completeness(judge: &JudgeResult) -> Option<String> {
    let mut missing = Vec::new();
    if judge.summary.trim().is_empty() {
        missing.push("summary");
    }
    if judge.reasoning_steps.is_empty() {
        missing.push("reasoning_steps");
    }
    if !judge.structured_analysis.contains(EVIDENCE_MARKER) {
        missing.push("structured_analysis.## EVIDENCE");
    }
    if !judge.structured_analysis.contains(OVERALL_MARKER) {
        missing.push("structured_analysis.## OVERALL");
    }
    (!missing.is_empty()).then(|| format!("schema incomplete: {}", missing.join(", ")))
}

/// All scores finite and inside 0..=100.
pub fn score_bounds(judge: &JudgeResult) -> Option<String> {
    let scores = [
        ("overall_score", judge.overall_score),
        ("technical", judge.technical.score),
        ("tokenomics", judge.tokenomics.score),
        ("market", judge.market.score),
        ("execution", judge.execution.score),
    ];
    let out_of_bounds: Vec<&str> = scores
        .iter()
        .filter(|(_, s)| !s.is_finite() || *s < 0.0 || *s > 100.0)
        .map(|(name, _)| *name)
        .collect();
    (!out_of_bounds.is_empty())
        .then(|| format!("scores out of bounds: {}", out_of_bounds.join(", ")))
}

/// Overall score must sit within the envelope around the
/// rubric-weighted category mean.
pub fn score_envelope(judge: &JudgeResult, envelope: f64) -> Option<String> {
    let mean = judge.weighted_category_mean();
    let delta = (judge.overall_score - mean).abs();
    (!(delta.is_finite() && delta <= envelope)).then(|| {
        format!(
            "overall_score {} deviates {:.1} from weighted category mean {:.1} (envelope {})",
            judge.overall_score, delta, mean, envelope
        )
    })
}

/// Every fact claim's evidence ids must reference the evidence pool.
pub fn evidence_integrity(judge: &JudgeResult, pool: &EvidencePool) -> Option<String> {
    let mut unknown = Vec::new();
    for claim in &judge.claims {
        if claim.claim_type != ClaimType::Fact {
            continue;
        }
        for id in &claim.evidence_ids {
            if !pool.contains(id) {
                unknown.push(id.clone());
            }
        }
    }
    (!unknown.is_empty()).then(|| format!("unknown evidence ids: {}", unknown.join(", ")))
}

/// Run the full battery, collecting issues in check order.
pub fn run_battery(judge: &JudgeResult, pool: &EvidencePool, envelope: f64) -> Vec<String> {
    [
        schema_completeness(judge),
        score_bounds(judge),
        score_envelope(judge, envelope),
        evidence_integrity(judge, pool),
    ]
    .into_iter()
    .flatten()
    .collect()
}
