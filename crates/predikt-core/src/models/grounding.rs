//! Grounding envelopes and the evidence bundle handed to the committee.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Canonical evidence id for the market snapshot source.
pub const SOURCE_MARKET_SNAPSHOT: &str = "market_snapshot";
/// Canonical evidence id for the token security source.
pub const SOURCE_TOKEN_SECURITY: &str = "token_security";
/// Canonical evidence id for the competitive memo source.
pub const SOURCE_COMPETITIVE_MEMO: &str = "competitive_memo";

/// Wrapper around externally-fetched evidence carrying provenance,
/// fetch time, TTL, and a derived staleness flag.
///
/// Never mutated after creation. Invariant:
/// `is_stale == staleness_hours > ttl_hours`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroundingEnvelope<T> {
    pub data: T,
    pub source: String,
    pub fetched_at: DateTime<Utc>,
    pub ttl_hours: f64,
    pub staleness_hours: f64,
    pub is_stale: bool,
}

impl<T> GroundingEnvelope<T> {
    /// Wrap `data`, deriving staleness from `now - fetched_at`.
    pub fn new(
        data: T,
        source: impl Into<String>,
        fetched_at: DateTime<Utc>,
        ttl_hours: f64,
        now: DateTime<Utc>,
    ) -> Self {
        let staleness_hours = (now - fetched_at).num_seconds() as f64 / 3600.0;
        Self {
            data,
            source: source.into(),
            fetched_at,
            ttl_hours,
            staleness_hours,
            is_stale: staleness_hours > ttl_hours,
        }
    }

    /// Wrap data fetched just now (staleness zero).
    pub fn fresh(data: T, source: impl Into<String>, ttl_hours: f64, now: DateTime<Utc>) -> Self {
        Self::new(data, source, now, ttl_hours, now)
    }
}

/// Market snapshot from the price/TVL aggregator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketSnapshot {
    pub price_usd: Option<f64>,
    pub market_cap_usd: Option<f64>,
    pub tvl_usd: Option<f64>,
    pub volume_24h_usd: Option<f64>,
    pub change_24h_pct: Option<f64>,
}

/// Token-security verification report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenSecurityReport {
    pub is_honeypot: bool,
    pub ownership_renounced: bool,
    pub mintable: bool,
    pub top_holder_pct: Option<f64>,
    pub flags: Vec<String>,
}

/// Competitive-landscape memo from the research source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompetitiveMemo {
    pub query: String,
    pub findings: Vec<String>,
    pub memo: String,
}

/// Everything the collector could (and could not) fetch for one request.
///
/// Partial grounding is a valid outcome: a missing source appears in
/// `unavailable_sources` with a reason, never as an abort.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GroundingBundle {
    pub market: Option<GroundingEnvelope<MarketSnapshot>>,
    pub token_security: Option<GroundingEnvelope<TokenSecurityReport>>,
    pub competitive: Option<GroundingEnvelope<CompetitiveMemo>>,
    pub unavailable_sources: Vec<String>,
}

impl GroundingBundle {
    /// Ids of sources that were successfully fetched.
    pub fn evidence_ids(&self) -> Vec<String> {
        let mut ids = Vec::new();
        if self.market.is_some() {
            ids.push(SOURCE_MARKET_SNAPSHOT.to_string());
        }
        if self.token_security.is_some() {
            ids.push(SOURCE_TOKEN_SECURITY.to_string());
        }
        if self.competitive.is_some() {
            ids.push(SOURCE_COMPETITIVE_MEMO.to_string());
        }
        ids
    }

    pub fn available_count(&self) -> usize {
        self.evidence_ids().len()
    }

    /// Number of fetched sources whose envelope is past its TTL.
    pub fn stale_count(&self) -> usize {
        let mut n = 0;
        if self.market.as_ref().is_some_and(|e| e.is_stale) {
            n += 1;
        }
        if self.token_security.as_ref().is_some_and(|e| e.is_stale) {
            n += 1;
        }
        if self.competitive.as_ref().is_some_and(|e| e.is_stale) {
            n += 1;
        }
        n
    }

    pub fn evidence_pool(&self) -> EvidencePool {
        EvidencePool::from_ids(self.evidence_ids())
    }
}

/// The set of evidence ids a claim may legally reference.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EvidencePool {
    ids: BTreeSet<String>,
}

impl EvidencePool {
    pub fn from_ids(ids: impl IntoIterator<Item = String>) -> Self {
        Self {
            ids: ids.into_iter().collect(),
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }
}

/// Compact grounding record attached to the final evaluation result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroundingSummary {
    pub sources_used: Vec<String>,
    pub unavailable_sources: Vec<String>,
    pub stale_sources: u32,
}

impl From<&GroundingBundle> for GroundingSummary {
    fn from(bundle: &GroundingBundle) -> Self {
        Self {
            sources_used: bundle.evidence_ids(),
            unavailable_sources: bundle.unavailable_sources.clone(),
            stale_sources: bundle.stale_count() as u32,
        }
    }
}
