//! # predikt-committee
//!
//! The three-stage adversarial committee: deterministic prompt
//! composition, tagged decoding of completion output, and the
//! Bear ∥ Bull → Judge orchestration.

pub mod completion;
pub mod decode;
pub mod orchestrator;
pub mod prompt;

pub use orchestrator::{CommitteeOrchestrator, CommitteeOutput, DraftJudge};
pub use prompt::{compose_stage_prompt, PriorStages, StagePrompt};
