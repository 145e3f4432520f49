use crate::models::Stage;

/// A failure to decode completion-service output into a typed payload.
///
/// Carried as data rather than raised: for the judge stage the verifier
/// treats a decode failure as its first failing check and attempts a
/// lenient re-decode inside the normal repair budget.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("decode error: {reason}")]
pub struct DecodeError {
    pub reason: String,
}

impl DecodeError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Top-level error type for the Predikt evaluation engine.
///
/// Grounding failures are absorbed into `unavailable_sources` and never
/// appear here; everything below is a pipeline-level error.
#[derive(Debug, thiserror::Error)]
pub enum EvalError {
    #[error("stage call failed in {stage}: {reason}")]
    StageCallFailure { stage: Stage, reason: String },

    #[error("completion service error: {0}")]
    CompletionError(String),

    #[error("repair budget exhausted: {checks_failed} checks still failing after {repairs_used} repairs")]
    FatalRepairExhausted {
        checks_failed: u32,
        repairs_used: u32,
    },

    #[error("evaluation timed out after {seconds}s")]
    Timeout { seconds: u64 },

    #[error("grounding source error: {0}")]
    GroundingError(String),

    #[error("persistence error: {0}")]
    StoreError(String),

    #[error("config error: {0}")]
    ConfigError(String),

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Convenience type alias.
pub type EvalResult<T> = Result<T, EvalError>;
