//! Circuit-breaker state for outbound calls.
//!
//! Breaker state is an explicit value passed into the pipeline, never a
//! module-level singleton, so runs stay independently testable and
//! replayable. Transitions are a pure function of
//! `(prior state, call outcome, now)`.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// EMA smoothing factor for the failure rate.
const FAILURE_EMA_ALPHA: f64 = 0.3;
/// Failure EMA above which the breaker opens.
const OPEN_THRESHOLD: f64 = 0.5;
/// Minimum observed calls before the breaker may open.
const MIN_WINDOW: u32 = 5;
/// How long an open breaker waits before probing half-open.
const COOLDOWN_SECS: i64 = 60;

/// A breaker registry shared across one pipeline's outbound calls.
/// Always passed explicitly; never stored in a process-wide global.
pub type SharedBreaker = std::sync::Arc<std::sync::Mutex<BreakerRegistry>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreakerState {
    Closed,
    Open,
    HalfOpen,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallOutcome {
    Success,
    Failure,
}

/// Breaker registry for one outbound service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakerRegistry {
    pub state: BreakerState,
    pub failure_ema: f64,
    pub window_count: u32,
    pub opened_at: Option<DateTime<Utc>>,
}

impl Default for BreakerRegistry {
    fn default() -> Self {
        Self {
            state: BreakerState::Closed,
            failure_ema: 0.0,
            window_count: 0,
            opened_at: None,
        }
    }
}

impl BreakerRegistry {
    /// Whether a call should be attempted given the current state.
    ///
    /// An open breaker allows one probe after the cooldown elapses.
    pub fn allows_call(&self, now: DateTime<Utc>) -> bool {
        match self.state {
            BreakerState::Closed | BreakerState::HalfOpen => true,
            BreakerState::Open => self
                .opened_at
                .map(|t| now - t >= Duration::seconds(COOLDOWN_SECS))
                .unwrap_or(true),
        }
    }
}

/// Pure state transition: fold one call outcome into the registry.
pub fn transition(
    prior: &BreakerRegistry,
    outcome: CallOutcome,
    now: DateTime<Utc>,
) -> BreakerRegistry {
    let sample = match outcome {
        CallOutcome::Success => 0.0,
        CallOutcome::Failure => 1.0,
    };
    let failure_ema = if prior.window_count == 0 {
        sample
    } else {
        FAILURE_EMA_ALPHA * sample + (1.0 - FAILURE_EMA_ALPHA) * prior.failure_ema
    };
    let window_count = prior.window_count.saturating_add(1);

    let state = match (prior.state, outcome) {
        // A probe success closes the breaker; a probe failure re-opens it.
        (BreakerState::HalfOpen, CallOutcome::Success) => BreakerState::Closed,
        (BreakerState::HalfOpen, CallOutcome::Failure) => BreakerState::Open,
        (BreakerState::Open, CallOutcome::Success) => BreakerState::HalfOpen,
        (BreakerState::Open, CallOutcome::Failure) => BreakerState::Open,
        (BreakerState::Closed, _) => {
            if failure_ema > OPEN_THRESHOLD && window_count >= MIN_WINDOW {
                BreakerState::Open
            } else {
                BreakerState::Closed
            }
        }
    };

    let opened_at = match state {
        BreakerState::Open if prior.state != BreakerState::Open => Some(now),
        BreakerState::Open => prior.opened_at,
        _ => None,
    };

    BreakerRegistry {
        state,
        failure_ema,
        window_count,
        opened_at,
    }
}
