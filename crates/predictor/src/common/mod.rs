//! Shared types used across the predictor core.

/// Configuration error reporting.
pub mod error;

pub use self::error::ConfigError;
