// SPDX-License-Identifier: GPL-3.0-only

//! End-to-end pipeline tests against a scripted decode engine

use scanprep::{
    BarcodeFormat, BarcodeReader, CapturedFrame, CropRect, DecodeEngine, DecodeRequest,
    Options, ScanError, SensorRotation, Symbol,
};
use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};

/// What the engine observed at the decode boundary
#[derive(Debug, Clone, Default)]
struct BoundaryCall {
    left: u32,
    top: u32,
    width: u32,
    height: u32,
    rotation_degrees: u32,
    formats: String,
    try_harder: bool,
    try_rotate: bool,
}

struct ScriptedEngine {
    token: &'static str,
    text: Option<&'static str>,
    calls: Arc<Mutex<Vec<BoundaryCall>>>,
}

impl ScriptedEngine {
    fn new(token: &'static str) -> (Self, Arc<Mutex<Vec<BoundaryCall>>>) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                token,
                text: None,
                calls: Arc::clone(&calls),
            },
            calls,
        )
    }

    fn with_text(mut self, text: &'static str) -> Self {
        self.text = Some(text);
        self
    }
}

impl DecodeEngine for ScriptedEngine {
    fn decode(&self, request: &DecodeRequest<'_>, result: &mut Symbol) -> Option<String> {
        self.calls.lock().unwrap().push(BoundaryCall {
            left: request.crop.left,
            top: request.crop.top,
            width: request.crop.width,
            height: request.crop.height,
            rotation_degrees: request.rotation.degrees(),
            formats: request.formats.clone(),
            try_harder: request.try_harder,
            try_rotate: request.try_rotate,
        });
        if let Some(text) = self.text {
            result.text = Some(text.to_string());
            result.time = Some("2 ms".to_string());
        }
        Some(self.token.to_string())
    }
}

fn synthetic_frame(width: u32, height: u32) -> CapturedFrame {
    // Checkered luma content; the scripted engine ignores pixels anyway
    let luma = (0..width * height)
        .map(|i| if i % 2 == 0 { 40 } else { 210 })
        .collect();
    CapturedFrame::from_luma(width, height, luma)
}

#[test]
fn test_full_frame_boundary_call() {
    let (engine, calls) = ScriptedEngine::new("NotFound");
    let mut reader = BarcodeReader::with_engine(Box::new(engine));

    let frame = synthetic_frame(100, 100).with_rotation(SensorRotation::Rotate90);
    let outcome = reader.read(frame).unwrap();
    assert!(outcome.is_none());

    let calls = calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    let call = &calls[0];
    assert_eq!(call.left, 0);
    assert_eq!(call.top, 0);
    assert_eq!(call.width, 100);
    assert_eq!(call.height, 100);
    assert_eq!(call.rotation_degrees, 90);
}

#[test]
fn test_custom_crop_passes_through_unchanged() {
    let (engine, calls) = ScriptedEngine::new("NotFound");
    let mut reader = BarcodeReader::with_engine(Box::new(engine));

    let frame = synthetic_frame(640, 480).with_crop(CropRect::new(120, 80, 400, 300));
    reader.read(frame).unwrap();

    let calls = calls.lock().unwrap();
    assert_eq!(calls[0].left, 120);
    assert_eq!(calls[0].top, 80);
    assert_eq!(calls[0].width, 400);
    assert_eq!(calls[0].height, 300);
}

#[test]
fn test_success_populates_symbol() {
    let (engine, _) = ScriptedEngine::new("QR_CODE");
    let engine = engine.with_text("https://example.com");
    let mut reader = BarcodeReader::with_engine(Box::new(engine));

    let symbol = reader
        .read(synthetic_frame(64, 64))
        .unwrap()
        .expect("a symbol");
    assert_eq!(symbol.format, BarcodeFormat::QrCode);
    assert_eq!(symbol.text.as_deref(), Some("https://example.com"));
    assert_eq!(symbol.time.as_deref(), Some("2 ms"));
}

#[test]
fn test_options_reach_the_boundary() {
    let (engine, calls) = ScriptedEngine::new("NotFound");
    let mut reader = BarcodeReader::with_engine(Box::new(engine)).with_options(Options {
        formats: BTreeSet::from([BarcodeFormat::QrCode, BarcodeFormat::DataMatrix]),
        try_harder: true,
        try_rotate: true,
    });
    reader.read(synthetic_frame(32, 32)).unwrap();

    let calls = calls.lock().unwrap();
    assert_eq!(calls[0].formats, "DATA_MATRIX,QR_CODE");
    assert!(calls[0].try_harder);
    assert!(calls[0].try_rotate);
}

#[test]
fn test_empty_format_set_means_all_enabled() {
    let (engine, calls) = ScriptedEngine::new("NotFound");
    let mut reader = BarcodeReader::with_engine(Box::new(engine));
    reader.read(synthetic_frame(32, 32)).unwrap();
    assert_eq!(calls.lock().unwrap()[0].formats, "");
}

#[test]
fn test_protocol_mismatch_is_loud() {
    let (engine, _) = ScriptedEngine::new("SIGSEGV in native code");
    let mut reader = BarcodeReader::with_engine(Box::new(engine));
    let err = reader.read(synthetic_frame(32, 32)).unwrap_err();
    let message = err.to_string();
    assert!(
        message.contains("SIGSEGV in native code"),
        "diagnostic payload must survive: {}",
        message
    );
    assert!(matches!(err, ScanError::Decode(_)));
}

#[test]
fn test_frame_level_retry_reuses_buffer() {
    // A caller retrying at the frame level keeps the same working buffer
    let (engine, calls) = ScriptedEngine::new("NotFound");
    let mut reader = BarcodeReader::with_engine(Box::new(engine));

    for _ in 0..10 {
        let outcome = reader.read(synthetic_frame(64, 64)).unwrap();
        assert!(outcome.is_none());
    }
    assert_eq!(calls.lock().unwrap().len(), 10, "one decode call per frame");
    assert_eq!(reader.reallocations(), 1);
}

#[test]
fn test_bundled_engine_not_found_on_synthetic_frame() {
    // The real rqrr engine, no QR present in a flat frame
    let mut reader = BarcodeReader::new();
    let outcome = reader
        .read(CapturedFrame::from_luma(64, 64, vec![255; 64 * 64]))
        .unwrap();
    assert!(outcome.is_none());
}
