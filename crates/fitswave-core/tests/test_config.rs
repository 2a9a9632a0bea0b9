use std::path::PathBuf;

use fitswave_core::error::FitswaveError;
use fitswave_core::pipeline::config::{BatchConfig, ExecutionConfig};
use fitswave_core::wavelet::WaveletKind;

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

#[test]
fn test_default_config() {
    let config = BatchConfig::default();
    assert_eq!(config.paths.input_folder, PathBuf::from("DATA"));
    assert_eq!(config.paths.output_folder, PathBuf::from("PROCESSED"));
    assert_eq!(config.parameters.wavelet_type, WaveletKind::Bior3_3);
    assert_eq!(config.parameters.decomposition_level, 4);
    assert!(!config.execution.parallel);
    assert!(config.validate().is_ok());
}

#[test]
fn test_new_uses_sequential_execution() {
    let config = BatchConfig::new("in".into(), "out".into(), WaveletKind::Db4, 2);
    assert_eq!(config.execution, ExecutionConfig::default());
    assert_eq!(config.parameters.wavelet_type, WaveletKind::Db4);
}

#[test]
fn test_validate_rejects_level_zero() {
    let config = BatchConfig::new("in".into(), "out".into(), WaveletKind::Haar, 0);
    let err = config.validate().unwrap_err();
    assert!(matches!(err, FitswaveError::Config(_)));
    assert!(err.to_string().contains("decomposition_level"));
}

// ---------------------------------------------------------------------------
// TOML
// ---------------------------------------------------------------------------

#[test]
fn test_parse_full_toml() {
    let text = r#"
        [paths]
        input_folder = "/data/hubble"
        output_folder = "/data/out"

        [parameters]
        wavelet_type = "db2"
        decomposition_level = 3

        [execution]
        parallel = true
    "#;
    let config: BatchConfig = toml::from_str(text).unwrap();
    assert_eq!(config.paths.input_folder, PathBuf::from("/data/hubble"));
    assert_eq!(config.parameters.wavelet_type, WaveletKind::Db2);
    assert_eq!(config.parameters.decomposition_level, 3);
    assert!(config.execution.parallel);
}

#[test]
fn test_execution_section_optional() {
    let text = r#"
        [paths]
        input_folder = "DATA"
        output_folder = "PROCESSED"

        [parameters]
        wavelet_type = "bior3.3"
        decomposition_level = 4
    "#;
    let config: BatchConfig = toml::from_str(text).unwrap();
    assert_eq!(config, BatchConfig::default());
}

#[test]
fn test_unknown_wavelet_rejected_at_load() {
    let text = r#"
        [paths]
        input_folder = "DATA"
        output_folder = "PROCESSED"

        [parameters]
        wavelet_type = "coif5"
        decomposition_level = 4
    "#;
    let err = toml::from_str::<BatchConfig>(text).unwrap_err();
    assert!(err.to_string().contains("coif5"), "{err}");
}

#[test]
fn test_negative_level_rejected_at_load() {
    let text = r#"
        [paths]
        input_folder = "DATA"
        output_folder = "PROCESSED"

        [parameters]
        wavelet_type = "haar"
        decomposition_level = -1
    "#;
    assert!(toml::from_str::<BatchConfig>(text).is_err());
}

#[test]
fn test_toml_roundtrip() {
    let mut config = BatchConfig::new("a/b".into(), "c".into(), WaveletKind::Bior2_2, 5);
    config.execution.parallel = true;

    let text = toml::to_string_pretty(&config).unwrap();
    assert!(text.contains("wavelet_type = \"bior2.2\""), "{text}");

    let restored: BatchConfig = toml::from_str(&text).unwrap();
    assert_eq!(restored, config);
}

#[test]
fn test_json_roundtrip() {
    let config = BatchConfig::default();
    let json = serde_json::to_string(&config).unwrap();
    let restored: BatchConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, config);
}
