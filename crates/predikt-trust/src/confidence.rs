//! Confidence derivation from pipeline health signals.

use predikt_core::models::{Confidence, ConfidenceLevel, ConfidenceSignals, VerifierStatus};

const BASE: f64 = 0.35;
const COVERAGE_WEIGHT: f64 = 0.30;
const VERIFIER_PASS_BONUS: f64 = 0.12;
const VERIFIER_REPAIRED_BONUS: f64 = 0.06;
const EXTERNAL_DATA_BONUS: f64 = 0.12;
const TAVILY_BONUS: f64 = 0.04;
const FALLBACK_PENALTY: f64 = 0.10;
const AGENT_FAILURE_PENALTY: f64 = 0.06;
const STALE_SOURCE_PENALTY: f64 = 0.05;
const UNAVAILABLE_SOURCE_PENALTY: f64 = 0.05;
const DEFILLAMA_MISSING_PENALTY: f64 = 0.08;

/// Without any external data the score is capped below the High band.
const NO_EXTERNAL_DATA_CAP: f64 = 0.70;
/// Stale or partially-missing grounding also caps below High.
const DEGRADED_GROUNDING_CAP: f64 = 0.72;

const HIGH_THRESHOLD: f64 = 0.75;
const MEDIUM_THRESHOLD: f64 = 0.50;

/// Derive a 0..1 confidence score and threshold band from the signals.
///
/// Monotonic by construction: every signal contributes a single
/// same-signed term, and the caps only apply in degraded
/// configurations, so improving any one signal (all else equal) never
/// lowers the score.
pub fn derive_confidence(signals: &ConfidenceSignals) -> Confidence {
    let mut score = BASE + COVERAGE_WEIGHT * signals.evidence_coverage.clamp(0.0, 1.0);

    score += match signals.verifier_status {
        VerifierStatus::Pass => VERIFIER_PASS_BONUS,
        VerifierStatus::Repaired => VERIFIER_REPAIRED_BONUS,
        VerifierStatus::Fail => 0.0,
    };

    if signals.external_data_available {
        score += EXTERNAL_DATA_BONUS;
    }
    if signals.tavily_available {
        score += TAVILY_BONUS;
    }
    if signals.fallback_used {
        score -= FALLBACK_PENALTY;
    }
    score -= AGENT_FAILURE_PENALTY * signals.agent_failures.min(3) as f64;
    score -= STALE_SOURCE_PENALTY * signals.stale_source_count.min(2) as f64;
    score -= UNAVAILABLE_SOURCE_PENALTY * signals.unavailable_source_count.min(2) as f64;
    if signals.defillama_required && !signals.defillama_available {
        score -= DEFILLAMA_MISSING_PENALTY;
    }

    if !signals.external_data_available {
        score = score.min(NO_EXTERNAL_DATA_CAP);
    }
    if signals.stale_source_count > 0 || signals.unavailable_source_count > 0 {
        score = score.min(DEGRADED_GROUNDING_CAP);
    }

    let score = score.clamp(0.0, 1.0);
    Confidence {
        score,
        level: level_for(score),
    }
}

fn level_for(score: f64) -> ConfidenceLevel {
    if score >= HIGH_THRESHOLD {
        ConfidenceLevel::High
    } else if score >= MEDIUM_THRESHOLD {
        ConfidenceLevel::Medium
    } else {
        ConfidenceLevel::Low
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_signals() -> ConfidenceSignals {
        ConfidenceSignals {
            evidence_coverage: 0.5,
            verifier_status: VerifierStatus::Pass,
            fallback_used: false,
            external_data_available: true,
            tavily_available: false,
            defillama_required: false,
            defillama_available: true,
            agent_failures: 0,
            stale_source_count: 0,
            unavailable_source_count: 0,
        }
    }

    #[test]
    fn losing_external_data_strictly_lowers_score() {
        let with = derive_confidence(&base_signals());
        let without = derive_confidence(&ConfidenceSignals {
            external_data_available: false,
            ..base_signals()
        });
        assert!(without.score < with.score);
        assert_ne!(without.level, ConfidenceLevel::High);
    }

    #[test]
    fn stale_grounding_never_reaches_high() {
        let c = derive_confidence(&ConfidenceSignals {
            evidence_coverage: 1.0,
            tavily_available: true,
            stale_source_count: 1,
            ..base_signals()
        });
        assert!(c.score <= DEGRADED_GROUNDING_CAP);
        assert_ne!(c.level, ConfidenceLevel::High);
    }

    #[test]
    fn clean_full_coverage_run_is_high() {
        let c = derive_confidence(&ConfidenceSignals {
            evidence_coverage: 1.0,
            tavily_available: true,
            ..base_signals()
        });
        assert_eq!(c.level, ConfidenceLevel::High);
    }
}
