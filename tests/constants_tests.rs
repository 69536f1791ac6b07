// SPDX-License-Identifier: GPL-3.0-only

//! Compatibility tests for the decode boundary contract
//!
//! The symbology list and the threshold constants are part of the
//! string protocol shared with the decode engine. Any change here must
//! be deliberate and coordinated; these tests pin the current version.

use scanprep::BarcodeFormat;
use scanprep::constants::{BACKGROUND, BINARY_THRESHOLD, INK, NOT_FOUND_TOKEN};

#[test]
fn test_format_list_is_pinned() {
    // Ordinal order must match the engine's own enumeration exactly
    let expected = [
        "NONE",
        "AZTEC",
        "CODABAR",
        "CODE_39",
        "CODE_93",
        "CODE_128",
        "DATA_BAR",
        "DATA_BAR_EXPANDED",
        "DATA_MATRIX",
        "EAN_8",
        "EAN_13",
        "ITF",
        "MAXICODE",
        "PDF_417",
        "QR_CODE",
        "UPC_A",
        "UPC_E",
    ];

    assert_eq!(BarcodeFormat::ALL.len(), expected.len());
    for (format, name) in BarcodeFormat::ALL.iter().zip(expected) {
        assert_eq!(format.name(), name);
    }
}

#[test]
fn test_ordinal_order_is_pinned() {
    // BTreeSet iteration (allow-list order) follows this ordering
    let mut sorted = BarcodeFormat::ALL;
    sorted.sort();
    assert_eq!(sorted, BarcodeFormat::ALL);
}

#[test]
fn test_sentinel_is_not_a_format_name() {
    assert_eq!(NOT_FOUND_TOKEN, "NotFound");
    assert!(BarcodeFormat::from_name(NOT_FOUND_TOKEN).is_none());
}

#[test]
fn test_threshold_constants() {
    assert_eq!(BINARY_THRESHOLD, 130);
    assert_eq!(INK, 0);
    assert_eq!(BACKGROUND, 255);
}
