//! DeFiLlama-style market snapshot client.

use async_trait::async_trait;
use serde::Deserialize;

use predikt_core::models::{EvaluationInput, MarketSnapshot};
use predikt_core::traits::MarketDataSource;
use predikt_core::{EvalError, EvalResult};

const DEFAULT_BASE_URL: &str = "https://api.llama.fi";

/// Market-data client against the DeFiLlama protocol endpoint.
pub struct DefiLlamaClient {
    http: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct ProtocolResponse {
    #[serde(default)]
    tvl: Option<f64>,
    #[serde(default)]
    mcap: Option<f64>,
    #[serde(rename = "volume24h", default)]
    volume_24h: Option<f64>,
    #[serde(rename = "change_1d", default)]
    change_1d: Option<f64>,
    #[serde(rename = "price", default)]
    price: Option<f64>,
}

impl DefiLlamaClient {
    pub fn new(http: reqwest::Client) -> Self {
        Self {
            http,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn slug(input: &EvaluationInput) -> String {
        input.name.trim().to_lowercase().replace(' ', "-")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use predikt_core::models::ProjectDomain;

    #[test]
    fn slug_normalizes_project_names() {
        let input = EvaluationInput {
            name: "  Lend Fi Protocol ".to_string(),
            description: String::new(),
            domain: ProjectDomain::Defi,
            token_symbol: None,
            chain: None,
            links: vec![],
        };
        assert_eq!(DefiLlamaClient::slug(&input), "lend-fi-protocol");
    }
}

#[async_trait]
impl MarketDataSource for DefiLlamaClient {
    async fn fetch_market_snapshot(&self, input: &EvaluationInput) -> EvalResult<MarketSnapshot> {
        let url = format!("{}/protocol/{}", self.base_url, Self::slug(input));
        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| EvalError::GroundingError(e.to_string()))?
            .error_for_status()
            .map_err(|e| EvalError::GroundingError(e.to_string()))?;
        let body: ProtocolResponse = resp
            .json()
            .await
            .map_err(|e| EvalError::GroundingError(e.to_string()))?;

        Ok(MarketSnapshot {
            price_usd: body.price,
            market_cap_usd: body.mcap,
            tvl_usd: body.tvl,
            volume_24h_usd: body.volume_24h,
            change_24h_pct: body.change_1d,
        })
    }
}
