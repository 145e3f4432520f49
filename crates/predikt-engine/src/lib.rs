//! # predikt-engine
//!
//! The evaluation pipeline facade. One `Evaluator` call runs:
//! grounding collection → Bear ∥ Bull → Judge → verification (with
//! bounded repair) → domain calibration → trust scoring, all under a
//! request-level timeout. Every returned `EvaluationResult` passed
//! verification; fatal paths surface as errors, never as fabricated
//! scores.

mod evaluator;
mod signals;

pub use evaluator::{EvaluationContext, Evaluator};

// The trust functions are part of the public surface for direct
// testing and observability.
pub use predikt_trust::{
    compute_debate_disagreement_index, compute_evidence_coverage, derive_confidence,
};
