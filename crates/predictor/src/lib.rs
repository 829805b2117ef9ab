//! Trace-driven branch direction predictor models.
//!
//! This crate implements the prediction and training state machines for:
//! 1. **Static:** Always predicts taken.
//! 2. **GShare:** Global history XOR program counter into 2-bit counters.
//! 3. **Tournament:** Global and per-address local predictors with a choice table.
//! 4. **Custom:** A perceptron predictor over global history.
//!
//! A trace-replay loop builds a [`Dispatcher`] from a validated
//! [`PredictorConfig`] and calls `predict` then `train` once per branch.

/// Branch predictors (history registers, counter tables, models, dispatcher).
pub mod bp;
/// Shared types (configuration errors).
pub mod common;
/// Predictor configuration (defaults, types, validation).
pub mod config;

/// Predict-then-train driver; construct with `Dispatcher::new`.
pub use crate::bp::{Dispatcher, replay};
/// Configuration error type.
pub use crate::common::ConfigError;
/// Predictor configuration and mode selection.
pub use crate::config::{BpType, PredictorConfig};
