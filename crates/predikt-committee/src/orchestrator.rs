//! CommitteeOrchestrator — START → BEAR ∥ BULL → JUDGE → DONE.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::{debug, info};

use predikt_core::breaker::{self, CallOutcome, SharedBreaker};
use predikt_core::config::CommitteeConfig;
use predikt_core::errors::DecodeError;
use predikt_core::models::{
    BearAnalysis, BullAnalysis, EvaluationInput, GroundingBundle, JudgeResult, Stage,
};
use predikt_core::traits::CompletionService;
use predikt_core::{EvalError, EvalResult};

use crate::decode;
use crate::prompt::{compose_stage_prompt, PriorStages, StagePrompt};

/// The judge's raw text plus its tagged decode outcome. The verifier
/// consumes both: the raw text feeds the lenient re-decode repair.
#[derive(Debug, Clone)]
pub struct DraftJudge {
    pub decoded: Result<JudgeResult, DecodeError>,
    pub raw: String,
}

/// Successful committee run, handed to the verifier.
#[derive(Debug, Clone)]
pub struct CommitteeOutput {
    pub bear: BearAnalysis,
    pub bull: BullAnalysis,
    pub draft: DraftJudge,
}

/// Runs the three-stage debate against a completion service.
///
/// Bear and Bull have no data dependency and are dispatched
/// concurrently; the Judge strictly requires both. Each stage is one
/// completion call under the stage timeout.
pub struct CommitteeOrchestrator<C: CompletionService> {
    completion: Arc<C>,
    config: CommitteeConfig,
    breaker: Option<SharedBreaker>,
}

impl<C: CompletionService> CommitteeOrchestrator<C> {
    pub fn new(completion: Arc<C>, config: CommitteeConfig) -> Self {
        Self {
            completion,
            config,
            breaker: None,
        }
    }

    /// Attach an explicitly-shared breaker registry for the
    /// completion service.
    pub fn with_breaker(mut self, breaker: SharedBreaker) -> Self {
        self.breaker = Some(breaker);
        self
    }

    /// Run the full debate. A stage whose output cannot be decoded is a
    /// `StageCallFailure` and aborts the pipeline; the judge's decode
    /// outcome is deferred to the verifier.
    pub async fn run(
        &self,
        input: &EvaluationInput,
        grounding: &GroundingBundle,
    ) -> EvalResult<CommitteeOutput> {
        let bear_prompt = compose_stage_prompt(Stage::Bear, input, None, grounding);
        let bull_prompt = compose_stage_prompt(Stage::Bull, input, None, grounding);

        // Fan-out: the only true parallelism in the pipeline.
        let (bear_raw, bull_raw) = tokio::try_join!(
            self.call_stage(Stage::Bear, &bear_prompt),
            self.call_stage(Stage::Bull, &bull_prompt),
        )?;

        let bear: BearAnalysis =
            decode::decode_stage(&bear_raw).map_err(|e| EvalError::StageCallFailure {
                stage: Stage::Bear,
                reason: e.reason,
            })?;
        let bull: BullAnalysis =
            decode::decode_stage(&bull_raw).map_err(|e| EvalError::StageCallFailure {
                stage: Stage::Bull,
                reason: e.reason,
            })?;
        debug!(
            risk = bear.risk_score,
            upside = bull.upside_score,
            "bear and bull stages complete"
        );

        // Fan-in: judge sees both analyses plus the grounding brief.
        let prior = PriorStages {
            bear: &bear,
            bull: &bull,
        };
        let judge_prompt = compose_stage_prompt(Stage::Judge, input, Some(prior), grounding);
        let judge_raw = self.call_stage(Stage::Judge, &judge_prompt).await?;

        let decoded = decode::decode_stage::<JudgeResult>(&judge_raw)
            .map(JudgeResult::normalize_claims);
        info!(
            judge_decoded = decoded.is_ok(),
            "committee debate complete"
        );

        Ok(CommitteeOutput {
            bear,
            bull,
            draft: DraftJudge {
                decoded,
                raw: judge_raw,
            },
        })
    }

    /// One completion call under the stage timeout and the breaker.
    async fn call_stage(&self, stage: Stage, prompt: &StagePrompt) -> EvalResult<String> {
        if !self.breaker_allows() {
            return Err(EvalError::StageCallFailure {
                stage,
                reason: "completion circuit open".to_string(),
            });
        }

        let timeout = Duration::from_secs(self.config.stage_timeout_secs);
        let call = self.completion.complete(&prompt.system, &prompt.user);
        let outcome = match tokio::time::timeout(timeout, call).await {
            Err(_) => Err(EvalError::StageCallFailure {
                stage,
                reason: format!("timed out after {}s", timeout.as_secs()),
            }),
            Ok(Err(e)) => Err(EvalError::StageCallFailure {
                stage,
                reason: e.to_string(),
            }),
            Ok(Ok(text)) => Ok(text),
        };

        self.record_outcome(outcome.is_ok());
        outcome
    }

    fn breaker_allows(&self) -> bool {
        match &self.breaker {
            Some(b) => b
                .lock()
                .map(|reg| reg.allows_call(Utc::now()))
                .unwrap_or(true),
            None => true,
        }
    }

    fn record_outcome(&self, success: bool) {
        if let Some(b) = &self.breaker {
            if let Ok(mut reg) = b.lock() {
                let outcome = if success {
                    CallOutcome::Success
                } else {
                    CallOutcome::Failure
                };
                *reg = breaker::transition(&reg, outcome, Utc::now());
            }
        }
    }
}
