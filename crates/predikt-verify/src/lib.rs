//! # predikt-verify
//!
//! Deterministic verification of draft judge output — a fixed check
//! battery with a bounded local repair loop — plus domain-anchor
//! calibration of the verified scores.

pub mod calibrate;
pub mod checks;
pub mod repair;
pub mod verifier;

pub use calibrate::calibrate;
pub use verifier::Verifier;
