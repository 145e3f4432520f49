//! Evaluator — the one-call pipeline facade.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};
use uuid::Uuid;

use predikt_committee::CommitteeOrchestrator;
use predikt_core::config::EngineConfig;
use predikt_core::models::{
    EvaluationInput, EvaluationResult, GroundingBundle, GroundingSummary, TrustMetrics,
    VerificationReport,
};
use predikt_core::traits::{CompletionService, EvaluationStore};
use predikt_core::{EvalError, EvalResult};
use predikt_grounding::GroundingCollector;
use predikt_trust::{
    compute_debate_disagreement_index, compute_evidence_coverage, derive_confidence,
};
use predikt_verify::{calibrate, Verifier};

use crate::signals;

/// Optional per-call context: a precomputed grounding bundle skips
/// collection entirely.
#[derive(Default)]
pub struct EvaluationContext {
    pub grounding: Option<GroundingBundle>,
}

/// Stateless evaluation pipeline. Each `evaluate` call is an
/// independent run; the only shared state is whatever breaker registry
/// the collector/orchestrator were explicitly constructed with.
pub struct Evaluator<C: CompletionService> {
    collector: GroundingCollector,
    committee: CommitteeOrchestrator<C>,
    verifier: Verifier,
    config: EngineConfig,
    store: Option<Arc<dyn EvaluationStore>>,
}

impl<C: CompletionService> Evaluator<C> {
    pub fn new(completion: Arc<C>, config: EngineConfig) -> Self {
        Self {
            collector: GroundingCollector::new(config.grounding.clone()),
            committee: CommitteeOrchestrator::new(completion, config.committee.clone()),
            verifier: Verifier::new(config.verifier.clone()),
            config,
            store: None,
        }
    }

    /// Replace the default (sourceless) collector with a configured one.
    pub fn with_collector(mut self, collector: GroundingCollector) -> Self {
        self.collector = collector;
        self
    }

    /// Attach a write-only store for finished evaluations.
    pub fn with_store(mut self, store: Arc<dyn EvaluationStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Run the full pipeline under the request-level timeout.
    ///
    /// Timeout cancels all outstanding stage calls and surfaces
    /// `EvalError::Timeout`; no partially-populated result can escape
    /// because the result is only assembled after trust scoring.
    pub async fn evaluate(
        &self,
        input: &EvaluationInput,
        context: EvaluationContext,
    ) -> EvalResult<EvaluationResult> {
        let overall = Duration::from_secs(self.config.overall_timeout_secs);
        match tokio::time::timeout(overall, self.run_pipeline(input, context)).await {
            Ok(result) => result,
            Err(_) => Err(EvalError::Timeout {
                seconds: self.config.overall_timeout_secs,
            }),
        }
    }

    async fn run_pipeline(
        &self,
        input: &EvaluationInput,
        context: EvaluationContext,
    ) -> EvalResult<EvaluationResult> {
        let grounding = match context.grounding {
            Some(bundle) => bundle,
            None => self.collector.collect(input).await,
        };
        let pool = grounding.evidence_pool();

        let committee = self.committee.run(input, &grounding).await?;

        let verification = self.verifier.verify(&committee.draft, &pool);
        if verification.fatal_failure {
            return Err(EvalError::FatalRepairExhausted {
                checks_failed: verification.checks_failed,
                repairs_used: verification.repairs_used,
            });
        }
        // Non-fatal verification always carries a result.
        let verified = verification
            .result
            .clone()
            .ok_or_else(|| EvalError::FatalRepairExhausted {
                checks_failed: verification.checks_failed,
                repairs_used: verification.repairs_used,
            })?;

        let judge = calibrate(verified, input.domain);

        let evidence_coverage = compute_evidence_coverage(&judge.claims);
        let confidence = derive_confidence(&signals::assemble(
            &grounding,
            &verification,
            input.domain,
            evidence_coverage,
        ));
        let disagreement = compute_debate_disagreement_index(&committee.bear, &committee.bull);

        let result = EvaluationResult {
            evaluation_id: Uuid::new_v4(),
            input_name: input.name.clone(),
            domain: input.domain,
            trust: TrustMetrics {
                evidence_coverage,
                confidence,
                debate_disagreement_index: disagreement,
            },
            grounding: GroundingSummary::from(&grounding),
            verification: VerificationReport::from(&verification),
            judge,
            bear: committee.bear,
            bull: committee.bull,
        };

        info!(
            evaluation_id = %result.evaluation_id,
            overall = result.judge.overall_score,
            confidence = result.trust.confidence.score,
            disagreement = result.trust.debate_disagreement_index,
            "evaluation complete"
        );

        // Persistence is a collaborator, not part of the verification
        // guarantee: a store failure is logged and the result returned.
        if let Some(store) = &self.store {
            if let Err(e) = store.save(result.evaluation_id, &result).await {
                let e = EvalError::StoreError(e.to_string());
                warn!(error = %e, "failed to persist evaluation");
            }
        }

        Ok(result)
    }
}
