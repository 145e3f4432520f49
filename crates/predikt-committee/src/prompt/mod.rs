//! Deterministic stage prompts.
//!
//! `compose_stage_prompt` is a pure function: identical inputs produce
//! byte-identical prompts, so prompt shape is covered by golden tests.

mod brief;
mod rubric;

use predikt_core::models::{
    BearAnalysis, BullAnalysis, EvaluationInput, GroundingBundle, Stage,
};

pub use brief::grounding_brief;
pub use rubric::rubric_block;

/// System + user prompt pair for one stage call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagePrompt {
    pub system: String,
    pub user: String,
}

/// Bear and Bull outputs handed to the Judge stage.
#[derive(Debug, Clone, Copy)]
pub struct PriorStages<'a> {
    pub bear: &'a BearAnalysis,
    pub bull: &'a BullAnalysis,
}

/// Section-header chain-of-thought mandate, identical for every stage
/// so output shape is mechanically verifiable.
const COT_FORMAT: &str = "\
For every rubric dimension, argue it as evidence -> reasoning -> uncertainty -> sub-score.\n\
Your structured_analysis field MUST contain a `## EVIDENCE` section listing the \
evidence ids you relied on, and a `## OVERALL` section stating your final position.";

const JSON_ONLY: &str =
    "Respond with a single JSON object and nothing else. No prose outside the JSON.";

const BEAR_SYSTEM: &str = "\
You are the BEAR: a ruthless, pessimistic crypto venture critic. Your job is to find \
every fatal flaw, rug vector, and structural weakness in the submitted project idea. \
Assume the founders are overselling.";

const BULL_SYSTEM: &str = "\
You are the BULL: a conviction-driven crypto venture advocate. Your job is to find \
every alpha signal, asymmetric upside, and narrative tailwind in the submitted \
project idea. Steelman the founders.";

const JUDGE_SYSTEM: &str = "\
You are the JUDGE: a dispassionate investment-committee chair. You weigh the Bear's \
attack and the Bull's case against the grounding evidence and the scoring rubric, \
then issue a calibrated verdict. Cite evidence ids from the grounding brief in your \
claims; mark claims without evidence as uncorroborated facts or inferences.";

const BEAR_SCHEMA: &str = r#"Output JSON shape:
{"fatal_flaws": [string], "risk_score": number 0-100, "verdict": "PROCEED"|"CAUTION"|"AVOID"|"KILL", "roast": string, "structured_analysis": string}"#;

const BULL_SCHEMA: &str = r#"Output JSON shape:
{"alpha_signals": [string], "upside_score": number 0-100, "verdict": "SKIP"|"NEUTRAL"|"LONG"|"ALL_IN", "pitch": string, "structured_analysis": string}"#;

const JUDGE_SCHEMA: &str = r#"Output JSON shape:
{"overall_score": number 0-100, "reasoning_steps": [string], "summary": string,
 "technical": {"score": number, "notes": string}, "tokenomics": {"score": number, "notes": string},
 "market": {"score": number, "notes": string}, "execution": {"score": number, "notes": string},
 "recommendations": [string], "structured_analysis": string,
 "claims": [{"text": string, "claim_type": "fact"|"inference", "evidence_ids": [string], "support": "corroborated"|"uncorroborated"}]}"#;

/// Build the system + user prompt for one committee stage.
pub fn compose_stage_prompt(
    stage: Stage,
    input: &EvaluationInput,
    prior: Option<PriorStages<'_>>,
    grounding: &GroundingBundle,
) -> StagePrompt {
    let system = match stage {
        Stage::Bear => format!("{BEAR_SYSTEM}\n\n{COT_FORMAT}\n\n{BEAR_SCHEMA}\n{JSON_ONLY}"),
        Stage::Bull => format!("{BULL_SYSTEM}\n\n{COT_FORMAT}\n\n{BULL_SCHEMA}\n{JSON_ONLY}"),
        Stage::Judge => format!("{JUDGE_SYSTEM}\n\n{COT_FORMAT}\n\n{JUDGE_SCHEMA}\n{JSON_ONLY}"),
    };

    let mut user = project_block(input);
    user.push('\n');
    user.push_str(&brief::grounding_brief(grounding));

    if stage == Stage::Judge {
        user.push('\n');
        user.push_str(&rubric::rubric_block(input.domain));
        if let Some(prior) = prior {
            user.push('\n');
            user.push_str(&prior_block(prior));
        }
    }

    StagePrompt { system, user }
}

fn project_block(input: &EvaluationInput) -> String {
    let mut block = String::new();
    block.push_str("PROJECT SUBMISSION\n");
    block.push_str(&format!("Name: {}\n", input.name));
    block.push_str(&format!("Domain: {}\n", input.domain.label()));
    if let Some(symbol) = &input.token_symbol {
        block.push_str(&format!("Token: {symbol}\n"));
    }
    if let Some(chain) = &input.chain {
        block.push_str(&format!("Chain: {chain}\n"));
    }
    for link in &input.links {
        block.push_str(&format!("Link: {link}\n"));
    }
    block.push_str(&format!("Description:\n{}\n", input.description));
    block
}

fn prior_block(prior: PriorStages<'_>) -> String {
    // serde_json is deterministic for struct field order, which keeps
    // the judge prompt byte-stable for identical prior outputs.
    let bear = serde_json::to_string_pretty(prior.bear).unwrap_or_default();
    let bull = serde_json::to_string_pretty(prior.bull).unwrap_or_default();
    format!("COMMITTEE DEBATE SO FAR\nBEAR ANALYSIS:\n{bear}\n\nBULL ANALYSIS:\n{bull}\n")
}
