//! Domain-anchor calibration of verified judge scores.
//!
//! Committee output skews optimistic and compresses toward the middle
//! of the scale; calibration remaps raw scores against per-domain
//! reference anchors. Pure and shape-preserving: only numeric fields
//! change.

use predikt_core::models::{JudgeResult, ProjectDomain};

/// Reference distribution for a domain's historical scores.
#[derive(Debug, Clone, Copy)]
pub struct DomainAnchors {
    pub mean: f64,
    pub spread: f64,
}

/// Observed center/spread of raw committee output, the distribution
/// scores are remapped from.
const RAW_MEAN: f64 = 62.0;
const RAW_SPREAD: f64 = 18.0;

const DEFAULT_ANCHORS: DomainAnchors = DomainAnchors {
    mean: 50.0,
    spread: 20.0,
};

/// Anchor lookup is a data table over the domain enum; unlisted domains
/// take the default anchors.
fn anchors_for(domain: ProjectDomain) -> DomainAnchors {
    match domain {
        ProjectDomain::Defi => DomainAnchors {
            mean: 54.0,
            spread: 20.0,
        },
        ProjectDomain::Memecoin => DomainAnchors {
            mean: 38.0,
            spread: 24.0,
        },
        ProjectDomain::Ai => DomainAnchors {
            mean: 57.0,
            spread: 19.0,
        },
        _ => DEFAULT_ANCHORS,
    }
}

/// Remap one raw score through the domain anchors, clamped to 0..100.
fn remap(raw: f64, anchors: DomainAnchors) -> f64 {
    let z = (raw - RAW_MEAN) / RAW_SPREAD;
    (anchors.mean + z * anchors.spread).clamp(0.0, 100.0)
}

/// Calibrate all numeric fields of a verified judge result.
pub fn calibrate(mut judge: JudgeResult, domain: ProjectDomain) -> JudgeResult {
    let anchors = anchors_for(domain);
    judge.overall_score = remap(judge.overall_score, anchors);
    judge.technical.score = remap(judge.technical.score, anchors);
    judge.tokenomics.score = remap(judge.tokenomics.score, anchors);
    judge.market.score = remap(judge.market.score, anchors);
    judge.execution.score = remap(judge.execution.score, anchors);
    judge
}

#[cfg(test)]
mod tests {
    use super::*;
    use predikt_core::models::CategoryAssessment;

    fn judge(overall: f64) -> JudgeResult {
        let cat = |score: f64| CategoryAssessment {
            score,
            notes: "n".to_string(),
        };
        JudgeResult {
            overall_score: overall,
            reasoning_steps: vec!["step".to_string()],
            summary: "s".to_string(),
            technical: cat(overall),
            tokenomics: cat(overall),
            market: cat(overall),
            execution: cat(overall),
            recommendations: vec![],
            structured_analysis: "## EVIDENCE\n## OVERALL".to_string(),
            claims: vec![],
        }
    }

    #[test]
    fn calibration_is_deterministic_and_shape_preserving() {
        let a = calibrate(judge(64.0), ProjectDomain::Defi);
        let b = calibrate(judge(64.0), ProjectDomain::Defi);
        assert_eq!(a.overall_score, b.overall_score);
        assert_eq!(a.summary, "s");
        assert_eq!(a.claims.len(), 0);
    }

    #[test]
    fn memecoin_anchors_pull_scores_down_harder_than_defi() {
        let defi = calibrate(judge(64.0), ProjectDomain::Defi);
        let meme = calibrate(judge(64.0), ProjectDomain::Memecoin);
        assert!(meme.overall_score < defi.overall_score);
    }

    #[test]
    fn unknown_domain_uses_default_anchors() {
        let gaming = calibrate(judge(62.0), ProjectDomain::Gaming);
        // raw mean maps exactly onto the default anchor mean
        assert!((gaming.overall_score - 50.0).abs() < 1e-9);
    }

    #[test]
    fn calibrated_scores_stay_in_bounds() {
        let low = calibrate(judge(0.0), ProjectDomain::Memecoin);
        let high = calibrate(judge(100.0), ProjectDomain::Ai);
        assert!(low.overall_score >= 0.0);
        assert!(high.overall_score <= 100.0);
    }
}
