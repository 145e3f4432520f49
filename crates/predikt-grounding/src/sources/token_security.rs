//! Token-security report client (GoPlus-style scanner API).

use async_trait::async_trait;
use serde::Deserialize;

use predikt_core::models::{EvaluationInput, TokenSecurityReport};
use predikt_core::traits::TokenSecuritySource;
use predikt_core::{EvalError, EvalResult};

/// Token-security scanner client.
pub struct TokenSecurityClient {
    http: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct ScanResponse {
    #[serde(default)]
    is_honeypot: bool,
    #[serde(default)]
    ownership_renounced: bool,
    #[serde(default)]
    mintable: bool,
    #[serde(default)]
    top_holder_pct: Option<f64>,
    #[serde(default)]
    flags: Vec<String>,
}

impl TokenSecurityClient {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl TokenSecuritySource for TokenSecurityClient {
    async fn fetch_security_report(
        &self,
        input: &EvaluationInput,
    ) -> EvalResult<TokenSecurityReport> {
        let symbol = input.token_symbol.as_deref().ok_or_else(|| {
            EvalError::GroundingError("no token symbol on input".to_string())
        })?;
        let chain = input.chain.as_deref().unwrap_or("ethereum");
        let url = format!("{}/scan/{}/{}", self.base_url, chain, symbol);

        let body: ScanResponse = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| EvalError::GroundingError(e.to_string()))?
            .error_for_status()
            .map_err(|e| EvalError::GroundingError(e.to_string()))?
            .json()
            .await
            .map_err(|e| EvalError::GroundingError(e.to_string()))?;

        Ok(TokenSecurityReport {
            is_honeypot: body.is_honeypot,
            ownership_renounced: body.ownership_renounced,
            mintable: body.mintable,
            top_holder_pct: body.top_holder_pct,
            flags: body.flags,
        })
    }
}
