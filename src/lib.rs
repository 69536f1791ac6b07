// SPDX-License-Identifier: GPL-3.0-only

//! scanprep - frame preparation pipeline for barcode scanning
//!
//! This library prepares live camera frames for a barcode-decoding
//! engine and maps the engine's outcome back into a typed result. The
//! decoding algorithm itself is an external capability behind the
//! [`decode::DecodeEngine`] trait; a bundled pure-Rust QR engine is
//! provided.
//!
//! # Architecture
//!
//! - [`frame`]: source frame types and the capture-side seam
//! - [`buffer`]: the reusable working buffer and its cache
//! - [`transform`]: grayscale, binarization, and inversion stages
//! - [`decode`]: the decode boundary (options, result, status mapping)
//! - [`reader`]: the per-frame facade wiring the stages together
//! - [`config`]: on-disk defaults for the CLI
//!
//! # Example
//!
//! ```no_run
//! use scanprep::{BarcodeReader, CapturedFrame};
//!
//! let mut reader = BarcodeReader::new();
//! let frame = CapturedFrame::from_luma(640, 480, vec![255; 640 * 480]);
//! match reader.read(frame) {
//!     Ok(Some(symbol)) => println!("{}: {:?}", symbol.format, symbol.text),
//!     Ok(None) => {} // no symbol in this frame, keep scanning
//!     Err(err) => eprintln!("{err}"),
//! }
//! ```

pub mod buffer;
pub mod config;
pub mod constants;
pub mod decode;
pub mod errors;
pub mod frame;
pub mod reader;
pub mod transform;

// Re-export commonly used types
pub use buffer::{FrameBufferCache, PixelBuffer};
pub use config::ScanConfig;
pub use decode::{BarcodeFormat, DecodeEngine, DecodeRequest, Options, RqrrEngine, Symbol};
pub use errors::{DecodeError, FrameError, ScanError, ScanResult};
pub use frame::{CapturedFrame, CropRect, OutputFormat, PixelFormat, SensorRotation, SourceFrame};
pub use reader::BarcodeReader;
