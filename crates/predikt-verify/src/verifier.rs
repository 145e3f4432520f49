//! The verification state machine: check battery + bounded repair.

use tracing::{debug, warn};

use predikt_committee::decode;
use predikt_committee::DraftJudge;
use predikt_core::config::VerifierConfig;
use predikt_core::models::{EvidencePool, JudgeResult, VerifierResult, VerifierStatus};

use crate::checks;
use crate::repair;

/// Verifies a draft judge result, repairing deterministically up to the
/// configured budget.
///
/// Guarantees: `status == Pass` implies `checks_failed == 0`; a result
/// that still fails checks after the budget carries
/// `fatal_failure = true` and never a substituted score.
pub struct Verifier {
    config: VerifierConfig,
}

impl Verifier {
    pub fn new(config: VerifierConfig) -> Self {
        Self { config }
    }

    pub fn verify(&self, draft: &DraftJudge, pool: &EvidencePool) -> VerifierResult {
        let mut issues: Vec<String> = Vec::new();
        let mut checks_run: u32 = 1; // decode check always runs
        let mut repairs_used: u32 = 0;

        // Decode check. The repair for an undecodable draft is one
        // lenient re-decode of the raw text; it either produces a draft
        // or the failure is terminal (repeating it cannot progress).
        let mut current: JudgeResult = match &draft.decoded {
            Ok(judge) => judge.clone(),
            Err(e) => {
                issues.push(format!("decode failed: {}", e.reason));
                repairs_used += 1;
                match decode::lenient_decode::<JudgeResult>(&draft.raw) {
                    Ok(judge) => judge.normalize_claims(),
                    Err(e) => {
                        warn!(reason = %e.reason, "judge draft unrecoverable");
                        return VerifierResult {
                            status: VerifierStatus::Fail,
                            issues,
                            repaired: false,
                            result: None,
                            checks_run,
                            checks_failed: 1,
                            repairs_used,
                            fatal_failure: true,
                        };
                    }
                }
            }
        };

        loop {
            let failures = checks::run_battery(&current, pool, self.config.score_envelope);
            checks_run += checks::BATTERY_SIZE;

            if failures.is_empty() {
                let repaired = repairs_used > 0;
                debug!(checks_run, repairs_used, "verification complete");
                return VerifierResult {
                    status: if repaired {
                        VerifierStatus::Repaired
                    } else {
                        VerifierStatus::Pass
                    },
                    issues,
                    repaired,
                    result: Some(current),
                    checks_run,
                    checks_failed: 0,
                    repairs_used,
                    fatal_failure: false,
                };
            }

            issues.extend(failures.iter().cloned());

            if repairs_used >= self.config.repair_budget {
                warn!(
                    failing = failures.len(),
                    repairs_used, "repair budget exhausted"
                );
                return VerifierResult {
                    status: VerifierStatus::Fail,
                    issues,
                    repaired: repairs_used > 0,
                    result: Some(current),
                    checks_run,
                    checks_failed: failures.len() as u32,
                    repairs_used,
                    fatal_failure: true,
                };
            }

            current = repair::repair_pass(current, pool, self.config.score_envelope);
            repairs_used += 1;
        }
    }
}
