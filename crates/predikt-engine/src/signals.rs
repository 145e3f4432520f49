//! Confidence-signal assembly from pipeline state.

use predikt_core::models::{
    ConfidenceSignals, GroundingBundle, ProjectDomain, VerifierResult,
};

/// Fold grounding and verification state into the trust signals.
///
/// `defillama_required` tracks the market source: DeFi projects are
/// not scoreable without market data, so its absence weighs extra.
pub fn assemble(
    grounding: &GroundingBundle,
    verification: &VerifierResult,
    domain: ProjectDomain,
    evidence_coverage: f64,
) -> ConfidenceSignals {
    ConfidenceSignals {
        evidence_coverage,
        verifier_status: verification.status,
        fallback_used: false,
        external_data_available: grounding.available_count() > 0,
        tavily_available: grounding.competitive.is_some(),
        defillama_required: domain == ProjectDomain::Defi,
        defillama_available: grounding.market.is_some(),
        agent_failures: 0,
        stale_source_count: grounding.stale_count() as u32,
        unavailable_source_count: grounding.unavailable_sources.len() as u32,
    }
}
