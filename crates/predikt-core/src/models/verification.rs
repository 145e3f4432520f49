//! Verifier outcome types.

use serde::{Deserialize, Serialize};

use super::JudgeResult;

/// Terminal status of a verification run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerifierStatus {
    /// All checks passed on the first pass.
    Pass,
    /// Checks passed after at least one repair.
    Repaired,
    /// Repair budget exhausted with checks still failing.
    Fail,
}

/// Result of the deterministic check battery plus bounded repair.
///
/// Invariant: `status == Pass` implies `checks_failed == 0`.
/// `result` is `None` only on the fatal path where even lenient
/// re-decode could not produce a draft to check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifierResult {
    pub status: VerifierStatus,
    pub issues: Vec<String>,
    pub repaired: bool,
    pub result: Option<JudgeResult>,
    pub checks_run: u32,
    pub checks_failed: u32,
    pub repairs_used: u32,
    pub fatal_failure: bool,
}

/// Compact verification record carried on the final evaluation result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationReport {
    pub status: VerifierStatus,
    pub issues: Vec<String>,
    pub checks_run: u32,
    pub checks_failed: u32,
    pub repairs_used: u32,
}

impl From<&VerifierResult> for VerificationReport {
    fn from(v: &VerifierResult) -> Self {
        Self {
            status: v.status,
            issues: v.issues.clone(),
            checks_run: v.checks_run,
            checks_failed: v.checks_failed,
            repairs_used: v.repairs_used,
        }
    }
}
