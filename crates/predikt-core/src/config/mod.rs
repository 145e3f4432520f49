//! Engine configuration.

use serde::{Deserialize, Serialize};

use crate::errors::{EvalError, EvalResult};

/// Completion-service settings shared by all three stages.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CommitteeConfig {
    pub model: String,
    pub temperature: f64,
    pub stage_timeout_secs: u64,
}

impl Default for CommitteeConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            temperature: 0.2,
            stage_timeout_secs: 45,
        }
    }
}

/// Grounding fetch settings: one timeout for all sources, one TTL each.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GroundingConfig {
    pub source_timeout_secs: u64,
    pub market_ttl_hours: f64,
    pub token_security_ttl_hours: f64,
    pub competitive_ttl_hours: f64,
}

impl Default for GroundingConfig {
    fn default() -> Self {
        Self {
            source_timeout_secs: 8,
            market_ttl_hours: 1.0,
            token_security_ttl_hours: 1.0,
            competitive_ttl_hours: 24.0,
        }
    }
}

/// Verifier settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VerifierConfig {
    /// Maximum repair passes before `fatal_failure`.
    pub repair_budget: u32,
    /// Half-width of the allowed overall-vs-weighted-mean envelope.
    pub score_envelope: f64,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            repair_budget: 3,
            score_envelope: 12.0,
        }
    }
}

/// Top-level engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub committee: CommitteeConfig,
    pub grounding: GroundingConfig,
    pub verifier: VerifierConfig,
    pub overall_timeout_secs: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            committee: CommitteeConfig::default(),
            grounding: GroundingConfig::default(),
            verifier: VerifierConfig::default(),
            overall_timeout_secs: 180,
        }
    }
}

impl EngineConfig {
    /// Parse from TOML, e.g. a `predikt.toml` next to the deployment.
    pub fn from_toml_str(raw: &str) -> EvalResult<Self> {
        toml::from_str(raw).map_err(|e| EvalError::ConfigError(e.to_string()))
    }
}
