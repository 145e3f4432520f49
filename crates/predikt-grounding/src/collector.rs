//! GroundingCollector — concurrent, failure-isolated evidence fetches.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::{debug, warn};

use predikt_core::breaker::{self, CallOutcome, SharedBreaker};
use predikt_core::config::GroundingConfig;
use predikt_core::models::{
    EvaluationInput, GroundingBundle, GroundingEnvelope, SOURCE_COMPETITIVE_MEMO,
    SOURCE_MARKET_SNAPSHOT, SOURCE_TOKEN_SECURITY,
};
use predikt_core::traits::{CompetitiveMemoSource, MarketDataSource, TokenSecuritySource};
use predikt_core::EvalResult;

/// Fetches external evidence for one evaluation request.
///
/// Every source is optional: a collector with no sources configured
/// simply reports all of them unavailable. An open circuit breaker
/// short-circuits a source without an outbound call.
pub struct GroundingCollector {
    market: Option<Arc<dyn MarketDataSource>>,
    token_security: Option<Arc<dyn TokenSecuritySource>>,
    competitive: Option<Arc<dyn CompetitiveMemoSource>>,
    config: GroundingConfig,
    breaker: Option<SharedBreaker>,
}

impl GroundingCollector {
    pub fn new(config: GroundingConfig) -> Self {
        Self {
            market: None,
            token_security: None,
            competitive: None,
            config,
            breaker: None,
        }
    }

    pub fn with_market(mut self, source: Arc<dyn MarketDataSource>) -> Self {
        self.market = Some(source);
        self
    }

    pub fn with_token_security(mut self, source: Arc<dyn TokenSecuritySource>) -> Self {
        self.token_security = Some(source);
        self
    }

    pub fn with_competitive(mut self, source: Arc<dyn CompetitiveMemoSource>) -> Self {
        self.competitive = Some(source);
        self
    }

    /// Attach an explicitly-shared breaker registry for the grounding
    /// sources.
    pub fn with_breaker(mut self, breaker: SharedBreaker) -> Self {
        self.breaker = Some(breaker);
        self
    }

    /// Fetch all configured sources concurrently and assemble the bundle.
    ///
    /// Never fails: each source error, timeout, or open breaker becomes
    /// an entry in `unavailable_sources`.
    pub async fn collect(&self, input: &EvaluationInput) -> GroundingBundle {
        let timeout = Duration::from_secs(self.config.source_timeout_secs);
        let mut bundle = GroundingBundle::default();

        let (market, token_security, competitive) = tokio::join!(
            self.fetch_source(SOURCE_MARKET_SNAPSHOT, timeout, async {
                match &self.market {
                    Some(s) => Some(s.fetch_market_snapshot(input).await),
                    None => None,
                }
            }),
            self.fetch_source(SOURCE_TOKEN_SECURITY, timeout, async {
                match &self.token_security {
                    Some(s) => Some(s.fetch_security_report(input).await),
                    None => None,
                }
            }),
            self.fetch_source(SOURCE_COMPETITIVE_MEMO, timeout, async {
                match &self.competitive {
                    Some(s) => Some(s.fetch_competitive_memo(input).await),
                    None => None,
                }
            }),
        );

        let now = Utc::now();
        match market {
            Ok(data) => {
                bundle.market = Some(GroundingEnvelope::fresh(
                    data,
                    SOURCE_MARKET_SNAPSHOT,
                    self.config.market_ttl_hours,
                    now,
                ));
            }
            Err(reason) => bundle
                .unavailable_sources
                .push(format!("{SOURCE_MARKET_SNAPSHOT}: {reason}")),
        }
        match token_security {
            Ok(data) => {
                bundle.token_security = Some(GroundingEnvelope::fresh(
                    data,
                    SOURCE_TOKEN_SECURITY,
                    self.config.token_security_ttl_hours,
                    now,
                ));
            }
            Err(reason) => bundle
                .unavailable_sources
                .push(format!("{SOURCE_TOKEN_SECURITY}: {reason}")),
        }
        match competitive {
            Ok(data) => {
                bundle.competitive = Some(GroundingEnvelope::fresh(
                    data,
                    SOURCE_COMPETITIVE_MEMO,
                    self.config.competitive_ttl_hours,
                    now,
                ));
            }
            Err(reason) => bundle
                .unavailable_sources
                .push(format!("{SOURCE_COMPETITIVE_MEMO}: {reason}")),
        }

        debug!(
            available = bundle.available_count(),
            unavailable = bundle.unavailable_sources.len(),
            stale = bundle.stale_count(),
            "grounding collected"
        );
        bundle
    }

    /// Run one source fetch under the breaker and its own timeout,
    /// flattening every failure mode into a reason string.
    async fn fetch_source<T, F>(
        &self,
        source: &str,
        timeout: Duration,
        fetch: F,
    ) -> Result<T, String>
    where
        F: std::future::Future<Output = Option<EvalResult<T>>>,
    {
        if !self.breaker_allows() {
            warn!(source, "grounding source skipped: circuit open");
            return Err("circuit open".to_string());
        }

        let outcome = match tokio::time::timeout(timeout, fetch).await {
            Err(_) => Err(format!("timed out after {}s", timeout.as_secs())),
            Ok(None) => Err("source not configured".to_string()),
            Ok(Some(Err(e))) => Err(e.to_string()),
            Ok(Some(Ok(data))) => Ok(data),
        };

        // "not configured" is a static condition, not a service failure.
        if !matches!(outcome, Err(ref r) if r == "source not configured") {
            self.record_outcome(outcome.is_ok());
        }
        if let Err(ref reason) = outcome {
            warn!(source, reason, "grounding source unavailable");
        }
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
