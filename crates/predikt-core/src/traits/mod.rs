//! Collaborator seams.
//!
//! The completion service, the three grounding sources, and the
//! write-only persistence layer are external collaborators; the engine
//! holds them as `Arc<dyn …>` so tests swap in mocks.

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::EvalResult;
use crate::models::{
    CompetitiveMemo, EvaluationInput, EvaluationResult, MarketSnapshot, TokenSecurityReport,
};

/// Text-in/text-out completion service; one call per committee stage.
/// The engine is responsible only for decoding the returned string.
#[async_trait]
pub trait CompletionService: Send + Sync {
    async fn complete(&self, system: &str, user: &str) -> EvalResult<String>;
}

/// Market-data grounding source (price/TVL aggregator).
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    async fn fetch_market_snapshot(&self, input: &EvaluationInput) -> EvalResult<MarketSnapshot>;
}

/// Token-security verification source.
#[async_trait]
pub trait TokenSecuritySource: Send + Sync {
    async fn fetch_security_report(
        &self,
        input: &EvaluationInput,
    ) -> EvalResult<TokenSecurityReport>;
}

/// Competitive-landscape research source.
#[async_trait]
pub trait CompetitiveMemoSource: Send + Sync {
    async fn fetch_competitive_memo(&self, input: &EvaluationInput)
        -> EvalResult<CompetitiveMemo>;
}

/// Write-only persistence for finished evaluations.
#[async_trait]
pub trait EvaluationStore: Send + Sync {
    async fn save(&self, evaluation_id: Uuid, result: &EvaluationResult) -> EvalResult<()>;
}
