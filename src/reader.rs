// SPDX-License-Identifier: GPL-3.0-only

//! Per-frame reading facade
//!
//! One reader instance owns one buffer cache, one options value, and
//! one injected decode engine. `read` takes `&mut self`, so the borrow
//! checker enforces the single-writer discipline against the cached
//! buffer; concurrent readers must be independent instances.

use crate::buffer::FrameBufferCache;
use crate::decode::{DecodeEngine, DecodeRequest, Options, RqrrEngine, Symbol, mapper};
use crate::errors::ScanResult;
use crate::frame::{OutputFormat, SourceFrame};
use crate::transform;
use tracing::{debug, warn};

/// Prepares frames and drives the decode boundary
pub struct BarcodeReader {
    cache: FrameBufferCache,
    engine: Box<dyn DecodeEngine>,
    /// Decode options, applied to every read
    pub options: Options,
    output_format: OutputFormat,
}

impl Default for BarcodeReader {
    fn default() -> Self {
        Self::new()
    }
}

impl BarcodeReader {
    /// Reader with the bundled QR engine
    pub fn new() -> Self {
        Self::with_engine(Box::new(RqrrEngine::new()))
    }

    /// Reader with an injected decode engine
    pub fn with_engine(engine: Box<dyn DecodeEngine>) -> Self {
        Self {
            cache: FrameBufferCache::new(),
            engine,
            options: Options::default(),
            output_format: OutputFormat::default(),
        }
    }

    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    /// Select the working-buffer format for the transform stages
    pub fn with_output_format(mut self, output_format: OutputFormat) -> Self {
        self.output_format = output_format;
        self
    }

    /// Number of buffer allocations performed so far
    pub fn reallocations(&self) -> u64 {
        self.cache.reallocations()
    }

    /// Read one frame: prepare, decode, map
    ///
    /// Returns the decoded symbol, or `None` when no symbol is present
    /// (the steady state of a live session). The frame's backing
    /// storage is released before any transform or decode work, on both
    /// the success and the failure path.
    pub fn read<F: SourceFrame>(&mut self, frame: F) -> ScanResult<Option<Symbol>> {
        self.run(frame, false)
    }

    /// Read one frame with the inversion stage enabled
    ///
    /// For light-on-dark symbols (inverted print, backlit displays).
    pub fn read_inverted<F: SourceFrame>(&mut self, frame: F) -> ScanResult<Option<Symbol>> {
        self.run(frame, true)
    }

    fn run<F: SourceFrame>(&mut self, frame: F, invert: bool) -> ScanResult<Option<Symbol>> {
        let width = frame.width();
        let height = frame.height();
        let source_format = frame.pixel_format();
        let crop = frame.crop();
        let rotation = frame.rotation();

        let buffer = match self
            .cache
            .ensure(width, height, source_format, self.output_format)
        {
            Ok(buffer) => buffer,
            Err(err) => {
                // The frame is still released; the format error wins.
                if let Err(close_err) = frame.close() {
                    warn!(error = %close_err, "frame release failed after pipeline error");
                }
                return Err(err.into());
            }
        };

        let copied = buffer.load_luma(frame.luma_plane());
        // Release the source frame as soon as the pixels are copied out,
        // before any transform or decode work.
        let released = frame.close();
        if let Err(err) = copied {
            if let Err(close_err) = released {
                warn!(error = %close_err, "frame release failed after pipeline error");
            }
            return Err(err.into());
        }
        released?;

        transform::grayscale(buffer);
        transform::binarize(buffer);
        if invert {
            transform::invert(buffer);
        }

        let request = DecodeRequest {
            buffer,
            crop,
            rotation,
            formats: self.options.formats_csv(),
            try_harder: self.options.try_harder,
            try_rotate: self.options.try_rotate,
        };
        let mut symbol = Symbol::default();
        let status = self.engine.decode(&request, &mut symbol);

        let outcome = mapper::interpret(status, symbol)?;
        if let Some(symbol) = &outcome {
            debug!(format = %symbol.format, "decoded symbol");
        }
        Ok(outcome)
    }
}
