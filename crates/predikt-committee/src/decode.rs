//! Tagged decoding of completion-service text into typed payloads.
//!
//! Decode failure is a value (`DecodeError`), not a panic path: the
//! orchestrator aborts on Bear/Bull decode failures, while the verifier
//! treats a Judge decode failure as its first failing check and retries
//! with `lenient_decode` inside the repair budget.

use std::sync::LazyLock;

use regex::Regex;
use serde::de::DeserializeOwned;

use predikt_core::errors::DecodeError;

static JSON_FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```(?:json)?\s*(\{.*?\})\s*```").expect("fence regex is valid")
});

static TRAILING_COMMA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",\s*([}\]])").expect("trailing-comma regex is valid"));

/// Decode model output into `T`: whole string first, then a fenced
/// block, then the outermost brace span.
pub fn decode_stage<T: DeserializeOwned>(raw: &str) -> Result<T, DecodeError> {
    let trimmed = raw.trim();
    if let Ok(value) = serde_json::from_str::<T>(trimmed) {
        return Ok(value);
    }
    if let Some(caps) = JSON_FENCE.captures(trimmed) {
        if let Ok(value) = serde_json::from_str::<T>(&caps[1]) {
            return Ok(value);
        }
    }
    if let Some(span) = brace_span(trimmed) {
        if let Ok(value) = serde_json::from_str::<T>(span) {
            return Ok(value);
        }
    }
    Err(DecodeError::new(first_parse_error::<T>(trimmed)))
}

/// Repair-path decode: everything `decode_stage` tries, plus
/// trailing-comma stripping on the candidate spans.
pub fn lenient_decode<T: DeserializeOwned>(raw: &str) -> Result<T, DecodeError> {
    if let Ok(value) = decode_stage::<T>(raw) {
        return Ok(value);
    }
    let trimmed = raw.trim();
    let candidates = [
        JSON_FENCE
            .captures(trimmed)
            .map(|caps| caps[1].to_string()),
        brace_span(trimmed).map(str::to_string),
        Some(trimmed.to_string()),
    ];
    for candidate in candidates.into_iter().flatten() {
        let cleaned = TRAILING_COMMA.replace_all(&candidate, "$1");
        if let Ok(value) = serde_json::from_str::<T>(&cleaned) {
            return Ok(value);
        }
    }
    Err(DecodeError::new(first_parse_error::<T>(trimmed)))
}

/// Outermost `{` .. `}` span, if any.
fn brace_span(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    (end > start).then(|| &raw[start..=end])
}

fn first_parse_error<T: DeserializeOwned>(raw: &str) -> String {
    match serde_json::from_str::<T>(raw) {
        Err(e) => e.to_string(),
        Ok(_) => "unreachable: raw parsed on retry".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use predikt_core::models::{BearAnalysis, BearVerdict};

    const BEAR_JSON: &str = r#"{"fatal_flaws":["vc unlock cliff"],"risk_score":82,"verdict":"AVOID","roast":"a fork with extra steps"}"#;

    #[test]
    fn decodes_bare_json() {
        let bear: BearAnalysis = decode_stage(BEAR_JSON).unwrap();
        assert_eq!(bear.verdict, BearVerdict::Avoid);
        assert_eq!(bear.risk_score, 82.0);
    }

    #[test]
    fn decodes_fenced_json_with_prose() {
        let raw = format!("Here is my analysis:\n```json\n{BEAR_JSON}\n```\nStay safe.");
        let bear: BearAnalysis = decode_stage(&raw).unwrap();
        assert_eq!(bear.verdict, BearVerdict::Avoid);
    }

    #[test]
    fn decodes_embedded_braces_without_fence() {
        let raw = format!("analysis follows {BEAR_JSON} end");
        let bear: BearAnalysis = decode_stage(&raw).unwrap();
        assert_eq!(bear.fatal_flaws.len(), 1);
    }

    #[test]
    fn strict_rejects_trailing_comma_but_lenient_recovers() {
        let raw = r#"{"fatal_flaws":["x"],"risk_score":50,"verdict":"CAUTION","roast":"meh",}"#;
        assert!(decode_stage::<BearAnalysis>(raw).is_err());
        let bear: BearAnalysis = lenient_decode(raw).unwrap();
        assert_eq!(bear.verdict, BearVerdict::Caution);
    }

    #[test]
    fn garbage_yields_tagged_error() {
        let err = decode_stage::<BearAnalysis>("I refuse to answer.").unwrap_err();
        assert!(!err.reason.is_empty());
    }
}
