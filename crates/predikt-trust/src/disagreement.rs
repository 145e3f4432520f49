//! Debate disagreement index: how far Bear and Bull diverge.

use predikt_core::models::{BearAnalysis, BearVerdict, BullAnalysis, BullVerdict};

const GAP_WEIGHT: f64 = 0.85;
const OPPOSITE_EXTREME_BONUS: f64 = 15.0;

/// 0..100 divergence between the Bear's risk framing and the Bull's
/// upside framing.
///
/// Base term is the distance between `risk_score` and the Bull's
/// implied risk (`100 - upside_score`); a bonus applies when the
/// verdicts are opposite and extreme (Bear AVOID/KILL vs Bull
/// LONG/ALL_IN).
pub fn compute_debate_disagreement_index(bear: &BearAnalysis, bull: &BullAnalysis) -> f64 {
    let implied_bull_risk = 100.0 - bull.upside_score.clamp(0.0, 100.0);
    let gap = (bear.risk_score.clamp(0.0, 100.0) - implied_bull_risk).abs();

    let bear_extreme = matches!(bear.verdict, BearVerdict::Avoid | BearVerdict::Kill);
    let bull_extreme = matches!(bull.verdict, BullVerdict::Long | BullVerdict::AllIn);
    let bonus = if bear_extreme && bull_extreme {
        OPPOSITE_EXTREME_BONUS
    } else {
        0.0
    };

    (GAP_WEIGHT * gap + bonus).min(100.0)
}
