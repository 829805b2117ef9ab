//! # Configuration Tests
//!
//! Defaults, JSON deserialization, mode-name mapping and width validation.

use bpsim::ConfigError;
use bpsim::config::*;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[test]
fn test_config_default() {
    let config = PredictorConfig::default();
    assert_eq!(config.bp_type, BpType::Static);
    assert_eq!(config.ghistory_bits, 14);
    assert_eq!(config.lhistory_bits, 10);
    assert_eq!(config.pc_index_bits, 10);
    assert_eq!(config.perceptron, PerceptronConfig::default());
}

#[test]
fn test_perceptron_defaults() {
    let perceptron = PerceptronConfig::default();
    assert_eq!(perceptron.history_length, 15);
    assert_eq!(perceptron.table_bits, 7);
}

#[rstest]
#[case(15, 35)]
#[case(12, 30)]
#[case(1, 8)]
#[case(32, 68)]
fn test_perceptron_threshold(#[case] history_length: u32, #[case] theta: i32) {
    let config = PerceptronConfig {
        history_length,
        table_bits: 7,
    };
    assert_eq!(config.threshold(), theta);
}

#[rstest]
#[case("static", BpType::Static)]
#[case("GShare", BpType::GShare)]
#[case("gshare", BpType::GShare)]
#[case("Tournament", BpType::Tournament)]
#[case("custom", BpType::Custom)]
#[case("Perceptron", BpType::Custom)]
#[case("tage", BpType::Unrecognized)]
#[case("", BpType::Unrecognized)]
fn test_bp_type_from_name(#[case] name: &str, #[case] expected: BpType) {
    assert_eq!(BpType::from_name(name), expected);
}

#[test]
fn test_bp_type_display_names() {
    assert_eq!(BpType::Static.to_string(), "Static");
    assert_eq!(BpType::GShare.to_string(), "Gshare");
    assert_eq!(BpType::Tournament.to_string(), "Tournament");
    assert_eq!(BpType::Custom.to_string(), "Custom");
}

#[test]
fn test_from_json_full() {
    let json = r#"{
        "bp_type": "Custom",
        "ghistory_bits": 13,
        "lhistory_bits": 11,
        "pc_index_bits": 9,
        "perceptron": { "history_length": 20, "table_bits": 8 }
    }"#;
    let config = PredictorConfig::from_json(json).unwrap();
    assert_eq!(
        config,
        PredictorConfig {
            bp_type: BpType::Custom,
            ghistory_bits: 13,
            lhistory_bits: 11,
            pc_index_bits: 9,
            perceptron: PerceptronConfig {
                history_length: 20,
                table_bits: 8,
            },
        }
    );
}

#[test]
fn test_from_json_applies_defaults() {
    let config = PredictorConfig::from_json(r#"{ "bp_type": "GShare" }"#).unwrap();
    assert_eq!(config, PredictorConfig::with_type(BpType::GShare));
}

#[test]
fn test_from_json_unknown_mode_falls_back() {
    let config = PredictorConfig::from_json(r#"{ "bp_type": "Bimodal" }"#).unwrap();
    assert_eq!(config.bp_type, BpType::Unrecognized);
}

#[test]
fn test_from_json_rejects_bad_syntax() {
    let err = PredictorConfig::from_json("{ bp_type: ").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn test_from_json_rejects_bad_width() {
    let err = PredictorConfig::from_json(r#"{ "bp_type": "GShare", "ghistory_bits": 33 }"#)
        .unwrap_err();
    assert!(matches!(
        err,
        ConfigError::WidthOutOfRange {
            field: "ghistory_bits",
            value: 33
        }
    ));
}

#[rstest]
#[case(BpType::GShare, 1)]
#[case(BpType::GShare, 32)]
#[case(BpType::Tournament, 16)]
#[case(BpType::Custom, 0)]
fn test_validate_accepts(#[case] bp_type: BpType, #[case] ghistory_bits: u32) {
    // The perceptron sizes itself from its own sub-config.
    let config = PredictorConfig {
        ghistory_bits,
        ..PredictorConfig::with_type(bp_type)
    };
    assert!(config.validate().is_ok());
}

#[test]
fn test_validate_rejects_zero_width() {
    let config = PredictorConfig {
        lhistory_bits: 0,
        ..PredictorConfig::with_type(BpType::Tournament)
    };
    let err = config.validate().unwrap_err();
    assert!(matches!(
        err,
        ConfigError::WidthOutOfRange {
            field: "lhistory_bits",
            value: 0
        }
    ));
}

#[test]
fn test_validate_checks_perceptron_widths() {
    let mut config = PredictorConfig::with_type(BpType::Custom);
    config.perceptron.history_length = 40;
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_ignores_inactive_widths() {
    let config = PredictorConfig {
        ghistory_bits: 0,
        lhistory_bits: 99,
        pc_index_bits: 0,
        ..PredictorConfig::with_type(BpType::Static)
    };
    assert!(config.validate().is_ok());
}

#[test]
fn test_width_error_message() {
    let err = ConfigError::WidthOutOfRange {
        field: "pc_index_bits",
        value: 0,
    };
    assert_eq!(
        err.to_string(),
        "pc_index_bits must be between 1 and 32 bits, got 0"
    );
}
