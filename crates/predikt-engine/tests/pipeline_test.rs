//! End-to-end pipeline tests with a scripted committee and
//! precomputed grounding.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use predikt_core::config::EngineConfig;
use predikt_core::models::{
    BearVerdict, BullVerdict, CompetitiveMemo, ConfidenceLevel, EvaluationInput, EvaluationResult,
    GroundingBundle, GroundingEnvelope, MarketSnapshot, ProjectDomain, TokenSecurityReport,
    VerifierStatus,
};
use predikt_core::config::GroundingConfig;
use predikt_core::traits::{
    CompletionService, EvaluationStore, MarketDataSource, TokenSecuritySource,
};
use predikt_core::{EvalError, EvalResult};
use predikt_engine::{EvaluationContext, Evaluator};
use predikt_grounding::GroundingCollector;

const BEAR_JSON: &str = r#"{"fatal_flaws":["bad debt spiral risk"],"risk_score":82,"verdict":"AVOID","roast":"celsius with fewer steps"}"#;
const BULL_JSON: &str = r#"{"alpha_signals":["on-chain credit demand"],"upside_score":73,"verdict":"LONG","pitch":"early to a real market"}"#;
const JUDGE_JSON: &str = r###"{
  "overall_score": 64,
  "reasoning_steps": ["bear overweights solvency risk", "bull underweights regulation"],
  "summary": "credible lending design with unproven risk engine",
  "technical": {"score": 60, "notes": "standard pool architecture"},
  "tokenomics": {"score": 58, "notes": "emissions-funded yield"},
  "market": {"score": 72, "notes": "demand is real"},
  "execution": {"score": 62, "notes": "team unproven"},
  "recommendations": ["third-party audit", "cap TVL at launch"],
  "structured_analysis": "## EVIDENCE\nmarket_snapshot, token_security\n## OVERALL\nconditional interest at 64",
  "claims": [
    {"text":"TVL of comparable lenders is 4.5M","claim_type":"fact","evidence_ids":["market_snapshot"],"support":"corroborated"},
    {"text":"token contract is not a honeypot","claim_type":"fact","evidence_ids":["token_security"],"support":"corroborated"},
    {"text":"the team can likely ship","claim_type":"inference","evidence_ids":[],"support":"uncorroborated"}
  ]
}"###;

struct ScriptedCompletion;

#[async_trait]
impl CompletionService for ScriptedCompletion {
    async fn complete(&self, system: &str, _user: &str) -> EvalResult<String> {
        if system.contains("BEAR") {
            Ok(BEAR_JSON.to_string())
        } else if system.contains("BULL") {
            Ok(BULL_JSON.to_string())
        } else {
            Ok(JUDGE_JSON.to_string())
        }
    }
}

struct JudgeRefuses;

#[async_trait]
impl CompletionService for JudgeRefuses {
    async fn complete(&self, system: &str, _user: &str) -> EvalResult<String> {
        if system.contains("BEAR") {
            Ok(BEAR_JSON.to_string())
        } else if system.contains("BULL") {
            Ok(BULL_JSON.to_string())
        } else {
            Ok("as a large language model I cannot".to_string())
        }
    }
}

struct SlowCompletion;

#[async_trait]
impl CompletionService for SlowCompletion {
    async fn complete(&self, _system: &str, _user: &str) -> EvalResult<String> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok(String::new())
    }
}

#[derive(Default)]
struct RecordingStore {
    saved: Mutex<Vec<(Uuid, EvaluationResult)>>,
}

#[async_trait]
impl EvaluationStore for RecordingStore {
    async fn save(&self, evaluation_id: Uuid, result: &EvaluationResult) -> EvalResult<()> {
        self.saved
            .lock()
            .unwrap()
            .push((evaluation_id, result.clone()));
        Ok(())
    }
}

struct FailingStore;

#[async_trait]
impl EvaluationStore for FailingStore {
    async fn save(&self, _evaluation_id: Uuid, _result: &EvaluationResult) -> EvalResult<()> {
        Err(EvalError::StoreError("disk full".to_string()))
    }
}

struct StaticMarket;

#[async_trait]
impl MarketDataSource for StaticMarket {
    async fn fetch_market_snapshot(&self, _input: &EvaluationInput) -> EvalResult<MarketSnapshot> {
        Ok(MarketSnapshot {
            price_usd: Some(1.25),
            market_cap_usd: Some(12_000_000.0),
            tvl_usd: Some(4_500_000.0),
            volume_24h_usd: Some(800_000.0),
            change_24h_pct: Some(-2.1),
        })
    }
}

struct SecurityScanDown;

#[async_trait]
impl TokenSecuritySource for SecurityScanDown {
    async fn fetch_security_report(
        &self,
        _input: &EvaluationInput,
    ) -> EvalResult<TokenSecurityReport> {
        Err(EvalError::GroundingError("scan backend 503".to_string()))
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn input() -> EvaluationInput {
    EvaluationInput {
        name: "LendFi".to_string(),
        description: "Peer-to-pool DeFi lending with undercollateralized tranches.".to_string(),
        domain: ProjectDomain::Defi,
        token_symbol: Some("LFI".to_string()),
        chain: Some("ethereum".to_string()),
        links: vec![],
    }
}

/// Market fresh, token security 2h old against a 1h TTL, no memo.
fn stale_partial_grounding() -> GroundingBundle {
    let now = Utc::now();
    GroundingBundle {
        market: Some(GroundingEnvelope::fresh(
            MarketSnapshot {
                price_usd: Some(1.25),
                market_cap_usd: Some(12_000_000.0),
                tvl_usd: Some(4_500_000.0),
                volume_24h_usd: Some(800_000.0),
                change_24h_pct: Some(-2.1),
            },
            "market_snapshot",
            1.0,
            now,
        )),
        token_security: Some(GroundingEnvelope::new(
            TokenSecurityReport {
                is_honeypot: false,
                ownership_renounced: true,
                mintable: false,
                top_holder_pct: Some(11.0),
                flags: vec![],
            },
            "token_security",
            now - chrono::Duration::hours(2),
            1.0,
            now,
        )),
        competitive: None,
        unavailable_sources: vec!["competitive_memo: search quota exhausted".to_string()],
    }
}

fn competitive_envelope() -> GroundingEnvelope<CompetitiveMemo> {
    GroundingEnvelope::fresh(
        CompetitiveMemo {
            query: "LendFi competitors".to_string(),
            findings: vec!["Aave dominates".to_string()],
            memo: "crowded".to_string(),
        },
        "competitive_memo",
        24.0,
        Utc::now(),
    )
}

#[tokio::test]
async fn defi_lending_scenario_caps_confidence_below_high() {
    init_tracing();
    let bundle = stale_partial_grounding();
    assert!(bundle.token_security.as_ref().unwrap().is_stale);

    let evaluator = Evaluator::new(Arc::new(ScriptedCompletion), EngineConfig::default());
    let result = evaluator
        .evaluate(
            &input(),
            EvaluationContext {
                grounding: Some(bundle),
            },
        )
        .await
        .unwrap();

    assert_eq!(result.bear.verdict, BearVerdict::Avoid);
    assert_eq!(result.bear.risk_score, 82.0);
    assert_eq!(result.bull.verdict, BullVerdict::Long);
    assert_eq!(result.verification.status, VerifierStatus::Pass);
    assert_eq!(result.verification.checks_failed, 0);

    // Two supported facts, one inference: full factual coverage.
    assert_eq!(result.trust.evidence_coverage, 1.0);
    // Stale token security + missing memo cap confidence below High.
    assert_ne!(result.trust.confidence.level, ConfidenceLevel::High);
    assert_eq!(result.grounding.stale_sources, 1);
    assert!(result.trust.debate_disagreement_index > 0.0);

    // Calibrated DeFi score, not the raw 64.
    assert!((result.judge.overall_score - 56.2).abs() < 0.5);
}

#[tokio::test]
async fn full_fresh_grounding_reaches_high_confidence() {
    let mut bundle = stale_partial_grounding();
    bundle.token_security = Some(GroundingEnvelope::fresh(
        TokenSecurityReport {
            is_honeypot: false,
            ownership_renounced: true,
            mintable: false,
            top_holder_pct: Some(11.0),
            flags: vec![],
        },
        "token_security",
        1.0,
        Utc::now(),
    ));
    bundle.competitive = Some(competitive_envelope());
    bundle.unavailable_sources.clear();

    let evaluator = Evaluator::new(Arc::new(ScriptedCompletion), EngineConfig::default());
    let result = evaluator
        .evaluate(
            &input(),
            EvaluationContext {
                grounding: Some(bundle),
            },
        )
        .await
        .unwrap();

    assert_eq!(result.trust.confidence.level, ConfidenceLevel::High);
}

#[tokio::test]
async fn unrecoverable_judge_surfaces_fatal_error_not_a_default_score() {
    let evaluator = Evaluator::new(Arc::new(JudgeRefuses), EngineConfig::default());
    let err = evaluator
        .evaluate(
            &input(),
            EvaluationContext {
                grounding: Some(stale_partial_grounding()),
            },
        )
        .await
        .unwrap_err();

    match err {
        EvalError::FatalRepairExhausted { checks_failed, .. } => assert!(checks_failed > 0),
        other => panic!("expected FatalRepairExhausted, got {other}"),
    }
}

#[tokio::test]
async fn request_level_timeout_cancels_outstanding_stages() {
    let config = EngineConfig {
        overall_timeout_secs: 1,
        ..EngineConfig::default()
    };
    let evaluator = Evaluator::new(Arc::new(SlowCompletion), config);
    let err = evaluator
        .evaluate(&input(), EvaluationContext::default())
        .await
        .unwrap_err();
    assert!(matches!(err, EvalError::Timeout { seconds: 1 }));
}

#[tokio::test]
async fn collector_backed_run_reports_live_and_unavailable_sources() {
    init_tracing();
    let collector = GroundingCollector::new(GroundingConfig::default())
        .with_market(Arc::new(StaticMarket))
        .with_token_security(Arc::new(SecurityScanDown));
    let evaluator = Evaluator::new(Arc::new(ScriptedCompletion), EngineConfig::default())
        .with_collector(collector);

    let result = evaluator
        .evaluate(&input(), EvaluationContext::default())
        .await
        .unwrap();

    assert_eq!(
        result.grounding.sources_used,
        vec!["market_snapshot".to_string()]
    );
    assert_eq!(result.grounding.unavailable_sources.len(), 2);
    assert!(result
        .grounding
        .unavailable_sources
        .iter()
        .any(|s| s.contains("token_security")));

    // The judge cited token_security; with that source down the citation
    // is stripped and the claim downgraded, so the run lands on Repaired.
    assert_eq!(result.verification.status, VerifierStatus::Repaired);
    assert_eq!(result.trust.evidence_coverage, 0.5);
    assert_ne!(result.trust.confidence.level, ConfidenceLevel::High);
}

#[tokio::test]
async fn store_failure_is_logged_not_propagated() {
    init_tracing();
    let evaluator = Evaluator::new(Arc::new(ScriptedCompletion), EngineConfig::default())
        .with_store(Arc::new(FailingStore));

    let result = evaluator
        .evaluate(
            &input(),
            EvaluationContext {
                grounding: Some(stale_partial_grounding()),
            },
        )
        .await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn finished_evaluations_are_persisted_write_only() {
    let store = Arc::new(RecordingStore::default());
    let evaluator = Evaluator::new(Arc::new(ScriptedCompletion), EngineConfig::default())
        .with_store(store.clone());

    let result = evaluator
        .evaluate(
            &input(),
            EvaluationContext {
                grounding: Some(stale_partial_grounding()),
            },
        )
        .await
        .unwrap();

    let saved = store.saved.lock().unwrap();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].0, result.evaluation_id);
}
