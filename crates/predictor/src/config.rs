//! Configuration for the branch predictor core.
//!
//! This module defines the configuration structures used to size the predictor
//! tables. It provides:
//! 1. **Defaults:** Baseline history and index widths for each model.
//! 2. **Structures:** The top-level predictor config and the perceptron sub-config.
//! 3. **Loading:** JSON deserialization plus width validation.
//!
//! Validation happens here, once, before any model is built. The models
//! themselves assume every width they receive is already in `1..=32`.

use std::fmt;

use serde::Deserialize;

use crate::common::ConfigError;

/// Default configuration constants for the predictor core.
mod defaults {
    /// Default global history width (16K-entry global tables).
    pub const GHISTORY_BITS: u32 = 14;

    /// Default local history width (1K-entry local counter table).
    pub const LHISTORY_BITS: u32 = 10;

    /// Default program-counter index width (1K-entry local history table).
    pub const PC_INDEX_BITS: u32 = 10;

    /// Default perceptron global history length (15 weights per perceptron).
    pub const PERCEPTRON_HISTORY: u32 = 15;

    /// Default perceptron table size (log2, 128 perceptrons).
    pub const PERCEPTRON_TABLE_BITS: u32 = 7;
}

/// Widest history or index a 32-bit register can hold.
pub const MAX_WIDTH: u32 = 32;

const THETA_COEFF: f64 = 1.93;
const THETA_BIAS: f64 = 7.0;

/// Branch prediction algorithm types.
///
/// Any name that does not match a known predictor deserializes to
/// [`BpType::Unrecognized`], which predicts not-taken and never trains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "String")]
pub enum BpType {
    /// Always predicts taken; performs no training.
    #[default]
    Static,
    /// Global history XOR program counter into one counter table.
    GShare,
    /// Global and per-address local predictors with a meta selector.
    Tournament,
    /// Perceptron predictor over global history.
    Custom,
    /// Fallback for unknown mode names.
    Unrecognized,
}

impl BpType {
    /// Maps a mode name to a predictor type, ignoring case.
    ///
    /// Unknown names yield [`BpType::Unrecognized`] rather than an error.
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "static" => BpType::Static,
            "gshare" => BpType::GShare,
            "tournament" => BpType::Tournament,
            "custom" | "perceptron" => BpType::Custom,
            _ => BpType::Unrecognized,
        }
    }

    /// Display name used in output routines.
    pub fn name(&self) -> &'static str {
        match self {
            BpType::Static => "Static",
            BpType::GShare => "Gshare",
            BpType::Tournament => "Tournament",
            BpType::Custom => "Custom",
            BpType::Unrecognized => "Unrecognized",
        }
    }
}

impl From<String> for BpType {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl fmt::Display for BpType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Root predictor configuration.
///
/// Supplied once before the predictor is built and immutable afterwards.
///
/// # Examples
///
/// ```
/// use bpsim::config::{BpType, PredictorConfig};
///
/// let json = r#"{
///     "bp_type": "Tournament",
///     "ghistory_bits": 9,
///     "lhistory_bits": 10,
///     "pc_index_bits": 10
/// }"#;
///
/// let config = PredictorConfig::from_json(json).unwrap();
/// assert_eq!(config.bp_type, BpType::Tournament);
/// assert_eq!(config.ghistory_bits, 9);
/// assert_eq!(config.perceptron.history_length, 15);
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PredictorConfig {
    /// Active predictor.
    #[serde(default)]
    pub bp_type: BpType,

    /// Global history width; also sizes the gshare, tournament global and meta tables.
    #[serde(default = "PredictorConfig::default_ghistory_bits")]
    pub ghistory_bits: u32,

    /// Local history width; sizes the tournament local counter table.
    #[serde(default = "PredictorConfig::default_lhistory_bits")]
    pub lhistory_bits: u32,

    /// Program-counter index width; sizes the tournament local history table.
    #[serde(default = "PredictorConfig::default_pc_index_bits")]
    pub pc_index_bits: u32,

    /// Perceptron predictor configuration.
    #[serde(default)]
    pub perceptron: PerceptronConfig,
}

impl PredictorConfig {
    /// Creates a default configuration for the given predictor type.
    pub fn with_type(bp_type: BpType) -> Self {
        Self {
            bp_type,
            ..Self::default()
        }
    }

    /// Deserializes a configuration from JSON and validates it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every width used by the active predictor fits a 32-bit register.
    ///
    /// Widths belonging to inactive predictors are not checked.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.bp_type {
            BpType::Static | BpType::Unrecognized => Ok(()),
            BpType::GShare => check_width("ghistory_bits", self.ghistory_bits),
            BpType::Tournament => {
                check_width("ghistory_bits", self.ghistory_bits)?;
                check_width("lhistory_bits", self.lhistory_bits)?;
                check_width("pc_index_bits", self.pc_index_bits)
            }
            BpType::Custom => {
                check_width("perceptron.history_length", self.perceptron.history_length)?;
                check_width("perceptron.table_bits", self.perceptron.table_bits)
            }
        }
    }

    fn default_ghistory_bits() -> u32 {
        defaults::GHISTORY_BITS
    }

    fn default_lhistory_bits() -> u32 {
        defaults::LHISTORY_BITS
    }

    fn default_pc_index_bits() -> u32 {
        defaults::PC_INDEX_BITS
    }
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            bp_type: BpType::default(),
            ghistory_bits: defaults::GHISTORY_BITS,
            lhistory_bits: defaults::LHISTORY_BITS,
            pc_index_bits: defaults::PC_INDEX_BITS,
            perceptron: PerceptronConfig::default(),
        }
    }
}

/// Perceptron branch predictor configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PerceptronConfig {
    /// Global history length (number of weights per perceptron).
    #[serde(default = "PerceptronConfig::default_history")]
    pub history_length: u32,

    /// Log2 of perceptron table size.
    #[serde(default = "PerceptronConfig::default_table_bits")]
    pub table_bits: u32,
}

impl PerceptronConfig {
    /// Training threshold derived from the history length.
    ///
    /// `floor(1.93 * history_length + 7)`, the empirically best threshold
    /// for histories longer than 12 bits.
    pub fn threshold(&self) -> i32 {
        (THETA_COEFF * self.history_length as f64 + THETA_BIAS) as i32
    }

    fn default_history() -> u32 {
        defaults::PERCEPTRON_HISTORY
    }

    fn default_table_bits() -> u32 {
        defaults::PERCEPTRON_TABLE_BITS
    }
}

impl Default for PerceptronConfig {
    fn default() -> Self {
        Self {
            history_length: defaults::PERCEPTRON_HISTORY,
            table_bits: defaults::PERCEPTRON_TABLE_BITS,
        }
    }
}

fn check_width(field: &'static str, value: u32) -> Result<(), ConfigError> {
    if (1..=MAX_WIDTH).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::WidthOutOfRange { field, value })
    }
}
