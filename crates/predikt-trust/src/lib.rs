//! # predikt-trust
//!
//! Epistemic trust scoring for committee evaluations. Three pure
//! functions, each independently testable and exported individually:
//! evidence coverage, confidence derivation, and the debate
//! disagreement index.

pub mod confidence;
pub mod coverage;
pub mod disagreement;

pub use confidence::derive_confidence;
pub use coverage::compute_evidence_coverage;
pub use disagreement::compute_debate_disagreement_index;
