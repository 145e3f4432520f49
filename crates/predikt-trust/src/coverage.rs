//! Evidence coverage: fraction of factual claims backed by evidence.

use predikt_core::models::{Claim, ClaimType};

/// Fraction of `Fact` claims carrying at least one evidence reference.
///
/// `Inference` claims are excluded from both numerator and denominator.
/// With no fact claims at all, coverage is vacuously `1.0`: no
/// unsupported factual claim exists.
pub fn compute_evidence_coverage(claims: &[Claim]) -> f64 {
    let facts: Vec<&Claim> = claims
        .iter()
        .filter(|c| c.claim_type == ClaimType::Fact)
        .collect();
    if facts.is_empty() {
        return 1.0;
    }
    let supported = facts.iter().filter(|c| !c.evidence_ids.is_empty()).count();
    supported as f64 / facts.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use predikt_core::models::ClaimSupport;

    fn claim(claim_type: ClaimType, evidence_ids: &[&str]) -> Claim {
        Claim {
            text: "c".to_string(),
            claim_type,
            evidence_ids: evidence_ids.iter().map(|s| s.to_string()).collect(),
            support: ClaimSupport::Uncorroborated,
        }
    }

    #[test]
    fn half_supported_facts_yield_half() {
        let claims = vec![
            claim(ClaimType::Fact, &["market_snapshot"]),
            claim(ClaimType::Fact, &[]),
            claim(ClaimType::Inference, &[]),
        ];
        assert_eq!(compute_evidence_coverage(&claims), 0.5);
    }

    #[test]
    fn no_fact_claims_is_vacuously_full() {
        assert_eq!(compute_evidence_coverage(&[]), 1.0);
        let only_inference = vec![claim(ClaimType::Inference, &[])];
        assert_eq!(compute_evidence_coverage(&only_inference), 1.0);
    }
}
