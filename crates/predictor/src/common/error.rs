//! Configuration error definitions.
//!
//! The predictor models themselves have no error surface: every table index
//! is masked to the configured width before use. The only fallible step is
//! loading and validating a [`PredictorConfig`](crate::config::PredictorConfig)
//! before the models are built.

use thiserror::Error;

/// Errors raised while loading or validating a predictor configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A bit-width is zero or exceeds the 32-bit register capacity.
    #[error("{field} must be between 1 and 32 bits, got {value}")]
    WidthOutOfRange {
        /// Name of the offending configuration field.
        field: &'static str,
        /// The rejected width.
        value: u32,
    },

    /// The configuration document could not be deserialized.
    #[error("failed to parse predictor configuration: {0}")]
    Parse(#[from] serde_json::Error),
}
