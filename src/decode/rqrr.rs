// SPDX-License-Identifier: GPL-3.0-only

//! Bundled QR engine over the `rqrr` crate
//!
//! A real [`DecodeEngine`] so the crate is usable without an external
//! native engine. QR_CODE only: any allow-list that excludes it decodes
//! to "NotFound". `try_harder` and `try_rotate` are accepted as hints;
//! rqrr's grid detection is orientation-independent and already
//! exhaustive, and the boundary contract forbids internal retry, so
//! neither adds attempts.

use crate::constants::NOT_FOUND_TOKEN;
use crate::decode::{BarcodeFormat, DecodeEngine, DecodeRequest, Symbol};
use crate::frame::{CropRect, SensorRotation};
use rqrr::PreparedImage;
use std::time::Instant;
use tracing::debug;

/// Pure-Rust QR detector/decoder behind the decode boundary
#[derive(Debug, Default)]
pub struct RqrrEngine;

impl RqrrEngine {
    pub fn new() -> Self {
        Self
    }
}

impl DecodeEngine for RqrrEngine {
    fn decode(&self, request: &DecodeRequest<'_>, result: &mut Symbol) -> Option<String> {
        if !allows_qr(&request.formats) {
            return Some(NOT_FOUND_TOKEN.to_string());
        }

        let start = Instant::now();
        let (gray, width, height) = extract_region(request.buffer, request.crop);
        if width == 0 || height == 0 {
            return Some(NOT_FOUND_TOKEN.to_string());
        }
        let (gray, width, height) = rotate_gray(gray, width, height, request.rotation);

        let mut image =
            PreparedImage::prepare_from_greyscale(width, height, |x, y| gray[y * width + x]);
        let grids = image.detect_grids();
        let decoded = grids.first().and_then(|grid| grid.decode().ok());

        match decoded {
            Some((_meta, content)) => {
                let elapsed = start.elapsed();
                debug!(
                    width,
                    height,
                    elapsed_ms = elapsed.as_millis(),
                    "decoded QR symbol"
                );
                result.format = BarcodeFormat::QrCode;
                result.text = Some(content);
                result.time = Some(format!("{} ms", elapsed.as_millis()));
                Some(BarcodeFormat::QrCode.name().to_string())
            }
            None => Some(NOT_FOUND_TOKEN.to_string()),
        }
    }
}

/// Check whether the allow-list enables QR_CODE
///
/// An empty list means all formats enabled. Entries are trimmed, so a
/// ", "-joined list is also accepted.
fn allows_qr(formats_csv: &str) -> bool {
    if formats_csv.is_empty() {
        return true;
    }
    formats_csv
        .split(',')
        .any(|entry| entry.trim() == BarcodeFormat::QrCode.name())
}

/// Extract the cropped intensity plane from the working buffer
///
/// Out-of-range crops are clamped to the buffer bounds; a crop entirely
/// outside yields an empty region (decoded as "NotFound", not a panic).
fn extract_region(
    buffer: &crate::buffer::PixelBuffer,
    crop: CropRect,
) -> (Vec<u8>, usize, usize) {
    let luma = buffer.luma();
    let buf_width = buffer.width as usize;
    let buf_height = buffer.height as usize;

    let left = (crop.left as usize).min(buf_width);
    let top = (crop.top as usize).min(buf_height);
    let width = (crop.width as usize).min(buf_width - left);
    let height = (crop.height as usize).min(buf_height - top);

    if left == 0 && top == 0 && width == buf_width && height == buf_height {
        return (luma, width, height);
    }

    let mut region = Vec::with_capacity(width * height);
    for row in top..top + height {
        let start = row * buf_width + left;
        region.extend_from_slice(&luma[start..start + width]);
    }
    (region, width, height)
}

/// Rotate an intensity plane clockwise by the sensor rotation
fn rotate_gray(
    gray: Vec<u8>,
    width: usize,
    height: usize,
    rotation: SensorRotation,
) -> (Vec<u8>, usize, usize) {
    match rotation {
        SensorRotation::None => (gray, width, height),
        SensorRotation::Rotate90 => {
            let mut out = vec![0u8; gray.len()];
            for y in 0..height {
                for x in 0..width {
                    // (x, y) → (height - 1 - y, x) in the rotated image
                    out[x * height + (height - 1 - y)] = gray[y * width + x];
                }
            }
            (out, height, width)
        }
        SensorRotation::Rotate180 => {
            let mut out = gray;
            out.reverse();
            (out, width, height)
        }
        SensorRotation::Rotate270 => {
            let mut out = vec![0u8; gray.len()];
            for y in 0..height {
                for x in 0..width {
                    // (x, y) → (y, width - 1 - x) in the rotated image
                    out[(width - 1 - x) * height + y] = gray[y * width + x];
                }
            }
            (out, height, width)
        }
    }
}
