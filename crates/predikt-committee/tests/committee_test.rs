//! Orchestrator tests against a scripted completion service.

use std::sync::Arc;

use async_trait::async_trait;

use predikt_committee::CommitteeOrchestrator;
use predikt_core::config::CommitteeConfig;
use predikt_core::models::{
    BearVerdict, BullVerdict, EvaluationInput, GroundingBundle, ProjectDomain, Stage,
};
use predikt_core::traits::CompletionService;
use predikt_core::{EvalError, EvalResult};

const BEAR_JSON: &str = r#"{"fatal_flaws":["no audit"],"risk_score":82,"verdict":"AVOID","roast":"a lending fork"}"#;
const BULL_JSON: &str = r#"{"alpha_signals":["real credit demand"],"upside_score":73,"verdict":"LONG","pitch":"early"}"#;
const JUDGE_JSON: &str = r###"{
  "overall_score": 64,
  "reasoning_steps": ["weighed bear debt risk against bull demand thesis"],
  "summary": "credible but unproven",
  "technical": {"score": 60, "notes": "standard stack"},
  "tokenomics": {"score": 58, "notes": "emissions-heavy"},
  "market": {"score": 72, "notes": "real demand"},
  "execution": {"score": 62, "notes": "unproven team"},
  "recommendations": ["ship audit before mainnet"],
  "structured_analysis": "## EVIDENCE\nmarket_snapshot\n## OVERALL\nconditional interest",
  "claims": [{"text":"TVL is 4.5M","claim_type":"fact","evidence_ids":["market_snapshot"],"support":"corroborated"}]
}"###;

/// Routes on the stage persona in the system prompt.
struct ScriptedCompletion {
    judge_garbled: bool,
}

#[async_trait]
impl CompletionService for ScriptedCompletion {
    async fn complete(&self, system: &str, _user: &str) -> EvalResult<String> {
        if system.contains("BEAR") {
            Ok(BEAR_JSON.to_string())
        } else if system.contains("BULL") {
            Ok(BULL_JSON.to_string())
        } else if self.judge_garbled {
            Ok("I cannot produce JSON today.".to_string())
        } else {
            Ok(format!("```json\n{JUDGE_JSON}\n```"))
        }
    }
}

struct BearRefuses;

#[async_trait]
impl CompletionService for BearRefuses {
    async fn complete(&self, system: &str, _user: &str) -> EvalResult<String> {
        if system.contains("BEAR") {
            Ok("no.".to_string())
        } else {
            Ok(BULL_JSON.to_string())
        }
    }
}

fn input() -> EvaluationInput {
    EvaluationInput {
        name: "LendFi".to_string(),
        description: "p2p lending".to_string(),
        domain: ProjectDomain::Defi,
        token_symbol: None,
        chain: None,
        links: vec![],
    }
}

#[tokio::test]
async fn full_run_decodes_all_three_stages() {
    let orchestrator = CommitteeOrchestrator::new(
        Arc::new(ScriptedCompletion {
            judge_garbled: false,
        }),
        CommitteeConfig::default(),
    );
    let output = orchestrator
        .run(&input(), &GroundingBundle::default())
        .await
        .unwrap();

    assert_eq!(output.bear.verdict, BearVerdict::Avoid);
    assert_eq!(output.bull.verdict, BullVerdict::Long);
    let judge = output.draft.decoded.unwrap();
    assert_eq!(judge.overall_score, 64.0);
    assert!(judge.structured_analysis.contains("## EVIDENCE"));
}

#[tokio::test]
async fn undecodable_bear_aborts_the_pipeline() {
    let orchestrator =
        CommitteeOrchestrator::new(Arc::new(BearRefuses), CommitteeConfig::default());
    let err = orchestrator
        .run(&input(), &GroundingBundle::default())
        .await
        .unwrap_err();
    match err {
        EvalError::StageCallFailure { stage, .. } => assert_eq!(stage, Stage::Bear),
        other => panic!("expected StageCallFailure, got {other}"),
    }
}

#[tokio::test]
async fn garbled_judge_is_deferred_to_the_verifier_not_an_abort() {
    let orchestrator = CommitteeOrchestrator::new(
        Arc::new(ScriptedCompletion {
            judge_garbled: true,
        }),
        CommitteeConfig::default(),
    );
    let output = orchestrator
        .run(&input(), &GroundingBundle::default())
        .await
        .unwrap();
    assert!(output.draft.decoded.is_err());
    assert!(!output.draft.raw.is_empty());
}
