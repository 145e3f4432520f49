//! # predikt-grounding
//!
//! Staleness-aware evidence collection. The collector fans out to the
//! configured sources concurrently, each under its own timeout, wraps
//! every success in a `GroundingEnvelope`, and absorbs every failure
//! into `unavailable_sources` — partial grounding is a valid outcome.

pub mod collector;
pub mod sources;

pub use collector::GroundingCollector;
