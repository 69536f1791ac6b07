// SPDX-License-Identifier: GPL-3.0-only

//! Integration tests for configuration module

use scanprep::{BarcodeFormat, OutputFormat, ScanConfig};
use std::collections::BTreeSet;

#[test]
fn test_config_default() {
    let config = ScanConfig::default();

    assert!(
        config.formats.is_empty(),
        "Empty format set means all formats enabled"
    );
    assert!(!config.try_harder);
    assert!(!config.try_rotate);
    assert_eq!(config.output_format, OutputFormat::SingleChannel);
    assert!(!config.invert);
}

#[test]
fn test_config_json_round_trip() {
    let config = ScanConfig {
        formats: BTreeSet::from([BarcodeFormat::QrCode, BarcodeFormat::Ean13]),
        try_harder: true,
        try_rotate: false,
        output_format: OutputFormat::FullColor,
        invert: true,
    };

    let json = serde_json::to_string(&config).unwrap();
    let restored: ScanConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, config);
}

#[test]
fn test_config_formats_use_wire_names() {
    let config = ScanConfig {
        formats: BTreeSet::from([BarcodeFormat::QrCode]),
        ..ScanConfig::default()
    };
    let json = serde_json::to_string(&config).unwrap();
    assert!(
        json.contains("\"QR_CODE\""),
        "serialized names must equal wire names, got {}",
        json
    );
}

#[test]
fn test_config_accepts_partial_file() {
    // Missing fields fall back to their defaults
    let config: ScanConfig = serde_json::from_str(r#"{"try_harder": true}"#).unwrap();
    assert!(config.try_harder);
    assert!(config.formats.is_empty());
    assert_eq!(config.output_format, OutputFormat::SingleChannel);
}

#[test]
fn test_config_options_mapping() {
    let config = ScanConfig {
        formats: BTreeSet::from([BarcodeFormat::Aztec]),
        try_harder: true,
        try_rotate: true,
        ..ScanConfig::default()
    };
    let options = config.options();
    assert_eq!(options.formats, config.formats);
    assert!(options.try_harder);
    assert!(options.try_rotate);
}
