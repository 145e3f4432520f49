//! Value-object models for the evaluation pipeline.
//!
//! All entities here are created fresh per `evaluate` call and are
//! immutable once built; nothing outlives a single evaluation.

mod committee;
mod evaluation;
mod grounding;
mod trust;
mod verification;

pub use committee::{
    BearAnalysis, BearVerdict, BullAnalysis, BullVerdict, CategoryAssessment, Claim, ClaimSupport,
    ClaimType, JudgeResult, Stage,
};
pub use evaluation::{EvaluationInput, EvaluationResult, ProjectDomain};
pub use grounding::{
    CompetitiveMemo, EvidencePool, GroundingBundle, GroundingEnvelope, GroundingSummary,
    MarketSnapshot, TokenSecurityReport, SOURCE_COMPETITIVE_MEMO, SOURCE_MARKET_SNAPSHOT,
    SOURCE_TOKEN_SECURITY,
};
pub use trust::{Confidence, ConfidenceLevel, ConfidenceSignals, TrustMetrics};
pub use verification::{VerificationReport, VerifierResult, VerifierStatus};
