// SPDX-License-Identifier: GPL-3.0-only

//! The decode boundary
//!
//! The decoding engine is an external capability consumed through one
//! synchronous call. Everything in this module is the contract around
//! that call: the per-read options, the result carrier, the request
//! record, and the status-token interpretation.

pub mod format;
pub mod mapper;
pub mod rqrr;

pub use self::format::BarcodeFormat;
pub use self::rqrr::RqrrEngine;

use crate::buffer::PixelBuffer;
use crate::frame::{CropRect, SensorRotation};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Per-read decode options
///
/// An immutable value: supplied per read or set once on the reader.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Options {
    /// Symbologies to look for; an empty set means all enabled
    #[serde(default)]
    pub formats: BTreeSet<BarcodeFormat>,
    /// Spend more time per frame for damaged or low-contrast symbols
    #[serde(default)]
    pub try_harder: bool,
    /// Also try rotated orientations of the symbol
    #[serde(default)]
    pub try_rotate: bool,
}

impl Options {
    /// Comma-joined wire names for the decode boundary
    ///
    /// The empty set serializes to the empty string, which the engine
    /// reads as "all formats enabled".
    pub fn formats_csv(&self) -> String {
        self.formats
            .iter()
            .map(|f| f.name())
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Decoded symbol carrier
///
/// Created empty before each decode call, populated by the engine as an
/// out-parameter, finalized by [`mapper::interpret`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Symbol {
    /// Symbology of the decoded symbol; `None` variant until populated
    pub format: BarcodeFormat,
    /// Decoded payload text
    pub text: Option<String>,
    /// Decode duration diagnostic (development/debug purposes only)
    pub time: Option<String>,
}

/// One prepared decode call
///
/// Crop coordinates are source pixel coordinates; the engine clamps
/// reads to the buffer bounds.
#[derive(Debug)]
pub struct DecodeRequest<'a> {
    /// The prepared (grayscaled, binarized) working buffer
    pub buffer: &'a PixelBuffer,
    pub crop: CropRect,
    pub rotation: SensorRotation,
    /// Comma-joined format allow-list; empty means all enabled
    pub formats: String,
    pub try_harder: bool,
    pub try_rotate: bool,
}

/// The external decoding capability
///
/// One synchronous, blocking call per frame; a single opaque unit of
/// work with no internal retry. On success the engine fills `result`
/// and returns its format's wire name as the status token; otherwise it
/// returns the "NotFound" sentinel or an arbitrary diagnostic string.
/// Callers needing retry re-invoke at the frame level.
pub trait DecodeEngine {
    fn decode(&self, request: &DecodeRequest<'_>, result: &mut Symbol) -> Option<String>;
}
