//! Error taxonomy for the evaluation pipeline.

mod eval_error;

pub use eval_error::{DecodeError, EvalError, EvalResult};
