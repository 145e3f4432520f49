//! # predikt-core
//!
//! Shared foundation for the Predikt evaluation committee engine.
//! Value-object models, the error taxonomy, engine configuration,
//! collaborator traits, and circuit-breaker state.

pub mod breaker;
pub mod config;
pub mod errors;
pub mod models;
pub mod traits;

pub use errors::{EvalError, EvalResult};
