//! HTTP clients for the three grounding sources.

mod defillama;
mod tavily;
mod token_security;

pub use defillama::DefiLlamaClient;
pub use tavily::TavilyClient;
pub use token_security::TokenSecurityClient;
