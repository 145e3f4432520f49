//! The structured grounding brief.
//!
//! One bracketed tag per evidence source, emitted even when the source
//! is unavailable, so the prompt shape is stable across upstream
//! failures.

use predikt_core::models::{
    GroundingBundle, GroundingEnvelope, SOURCE_COMPETITIVE_MEMO, SOURCE_MARKET_SNAPSHOT,
    SOURCE_TOKEN_SECURITY,
};

/// Build the literal `STRUCTURED GROUNDING BRIEF` block.
pub fn grounding_brief(grounding: &GroundingBundle) -> String {
    let mut brief = String::from(
        "STRUCTURED GROUNDING BRIEF\n\
         Cite these evidence ids in your claims. Treat stale entries with suspicion.\n",
    );

    brief.push_str("[MARKET_SNAPSHOT]\n");
    match &grounding.market {
        Some(env) => {
            brief.push_str(&envelope_line(env, SOURCE_MARKET_SNAPSHOT));
            brief.push_str(&format!(
                "price_usd={} market_cap_usd={} tvl_usd={} volume_24h_usd={} change_24h_pct={}\n",
                fmt_opt(env.data.price_usd),
                fmt_opt(env.data.market_cap_usd),
                fmt_opt(env.data.tvl_usd),
                fmt_opt(env.data.volume_24h_usd),
                fmt_opt(env.data.change_24h_pct),
            ));
        }
        None => brief.push_str(&unavailable_line(grounding, SOURCE_MARKET_SNAPSHOT)),
    }

    brief.push_str("[TOKEN_SECURITY]\n");
    match &grounding.token_security {
        Some(env) => {
            brief.push_str(&envelope_line(env, SOURCE_TOKEN_SECURITY));
            brief.push_str(&format!(
                "honeypot={} ownership_renounced={} mintable={} top_holder_pct={} flags=[{}]\n",
                env.data.is_honeypot,
                env.data.ownership_renounced,
                env.data.mintable,
                fmt_opt(env.data.top_holder_pct),
                env.data.flags.join(", "),
            ));
        }
        None => brief.push_str(&unavailable_line(grounding, SOURCE_TOKEN_SECURITY)),
    }

    brief.push_str("[COMPETITIVE_MEMO]\n");
    match &grounding.competitive {
        Some(env) => {
            brief.push_str(&envelope_line(env, SOURCE_COMPETITIVE_MEMO));
            for finding in &env.data.findings {
                brief.push_str(&format!("- {finding}\n"));
            }
            if !env.data.memo.is_empty() {
                brief.push_str(&format!("memo: {}\n", env.data.memo));
            }
        }
        None => brief.push_str(&unavailable_line(grounding, SOURCE_COMPETITIVE_MEMO)),
    }

    brief
}

fn envelope_line<T>(env: &GroundingEnvelope<T>, id: &str) -> String {
    format!(
        "evidence_id={id} source={} fetched_at={} stale={}\n",
        env.source,
        env.fetched_at.to_rfc3339(),
        env.is_stale,
    )
}

fn unavailable_line(grounding: &GroundingBundle, id: &str) -> String {
    let reason = grounding
        .unavailable_sources
        .iter()
        .find(|s| s.starts_with(id))
        .cloned()
        .unwrap_or_else(|| format!("{id}: source unavailable"));
    format!("unavailable ({reason})\n")
}

fn fmt_opt(v: Option<f64>) -> String {
    match v {
        Some(v) => format!("{v:.2}"),
        None => "n/a".to_string(),
    }
}
