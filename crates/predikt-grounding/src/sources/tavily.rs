//! Tavily-style competitive-landscape research client.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use predikt_core::models::{CompetitiveMemo, EvaluationInput};
use predikt_core::traits::CompetitiveMemoSource;
use predikt_core::{EvalError, EvalResult};

const DEFAULT_BASE_URL: &str = "https://api.tavily.com";
const MAX_FINDINGS: usize = 5;

/// Search-backed competitive memo client.
pub struct TavilyClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    api_key: &'a str,
    query: &'a str,
    max_results: usize,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    answer: Option<String>,
    #[serde(default)]
    results: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    title: String,
    #[serde(default)]
    content: String,
}

impl TavilyClient {
    pub fn new(http: reqwest::Client, api_key: impl Into<String>) -> Self {
        Self {
            http,
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl CompetitiveMemoSource for TavilyClient {
    async fn fetch_competitive_memo(
        &self,
        input: &EvaluationInput,
    ) -> EvalResult<CompetitiveMemo> {
        let query = format!(
            "{} {} competitors and alternatives",
            input.name,
            input.domain.label()
        );
        let request = SearchRequest {
            api_key: &self.api_key,
            query: &query,
            max_results: MAX_FINDINGS,
        };

        let body: SearchResponse = self
            .http
            .post(format!("{}/search", self.base_url))
            .json(&request)
            .send()
            .await
            .map_err(|e| EvalError::GroundingError(e.to_string()))?
            .error_for_status()
            .map_err(|e| EvalError::GroundingError(e.to_string()))?
            .json()
            .await
            .map_err(|e| EvalError::GroundingError(e.to_string()))?;

        let findings = body
            .results
            .into_iter()
            .take(MAX_FINDINGS)
            .map(|hit| format!("{}: {}", hit.title, hit.content))
            .collect();

        Ok(CompetitiveMemo {
            query,
            findings,
            memo: body.answer.unwrap_or_default(),
        })
    }
}
