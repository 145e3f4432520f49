//! The judge's scoring rubric block.

use predikt_core::models::ProjectDomain;

/// Per-domain calibration note embedded in the rubric. Adding a domain
/// is a new match arm over data, with a mandatory default.
fn calibration_note(domain: ProjectDomain) -> &'static str {
    match domain {
        ProjectDomain::Defi => {
            "Score against established DeFi protocols; TVL traction and audit posture \
             weigh heavily. Unaudited forks of blue-chip protocols rarely merit above 55."
        }
        ProjectDomain::Memecoin => {
            "Memecoins are narrative instruments: distribution fairness and community \
             velocity dominate; technical depth is near-irrelevant. Score execution risk harshly."
        }
        ProjectDomain::Ai => {
            "AI-crypto hybrids routinely overstate model moats; discount any claim of \
             proprietary models without verifiable artifacts."
        }
        _ => "Apply general venture calibration; be skeptical of claims without evidence.",
    }
}

/// Build the literal `SCORING RUBRIC` block for the judge user prompt.
pub fn rubric_block(domain: ProjectDomain) -> String {
    format!(
        "SCORING RUBRIC\n\
         - Market Opportunity (weight 0.30): addressable demand, timing, competitive density\n\
         - Technical Feasibility (weight 0.25): architecture credibility, audit surface, novelty\n\
         - Tokenomics (weight 0.25): supply schedule, value accrual, holder incentives\n\
         - Execution Risk (weight 0.20): team capacity, regulatory surface, go-to-market\n\
         Overall score must stay consistent with the weighted category sub-scores.\n\
         Domain calibration ({}): {}\n",
        domain.label(),
        calibration_note(domain)
    )
}
