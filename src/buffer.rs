// SPDX-License-Identifier: GPL-3.0-only

//! Reusable pixel buffer and its cache
//!
//! One working buffer per reader instance, reallocated only when the
//! incoming frame's dimensions or the selected output format change.
//! There is no process-wide scratch state; independent readers own
//! independent buffers.

use crate::errors::FrameError;
use crate::frame::{OutputFormat, PixelFormat};
use tracing::debug;

/// Owned working buffer for the transform stages
///
/// Its dimensions and format always equal those of the frame most
/// recently processed. Exclusively owned by [`FrameBufferCache`] and
/// mutated in place; never shared across concurrent calls.
#[derive(Debug, Clone)]
pub struct PixelBuffer {
    pub width: u32,
    pub height: u32,
    pub format: PixelFormat,
    data: Vec<u8>,
}

impl PixelBuffer {
    fn new(width: u32, height: u32, format: PixelFormat) -> Self {
        let len = width as usize * height as usize * format.bytes_per_pixel() as usize;
        Self {
            width,
            height,
            format,
            data: vec![0; len],
        }
    }

    fn matches(&self, width: u32, height: u32, format: PixelFormat) -> bool {
        self.width == width && self.height == height && self.format == format
    }

    /// Number of pixels in the buffer
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// View the buffer as RGBA pixels
    ///
    /// Panics if the buffer is not in RGBA format; transform stages match
    /// on `format` before calling this.
    pub fn rgba_pixels(&self) -> &[[u8; 4]] {
        bytemuck::cast_slice(&self.data)
    }

    /// Mutable RGBA pixel view, see [`Self::rgba_pixels`]
    pub fn rgba_pixels_mut(&mut self) -> &mut [[u8; 4]] {
        bytemuck::cast_slice_mut(&mut self.data)
    }

    /// Stable address of the backing storage, for reuse verification
    pub fn data_ptr(&self) -> *const u8 {
        self.data.as_ptr()
    }

    /// Copy a source luma plane into the buffer
    ///
    /// Gray8 buffers receive the plane verbatim; RGBA buffers replicate
    /// the intensity into R/G/B with alpha 255. Fails if the plane is
    /// shorter than the buffer's dimensions require.
    pub fn load_luma(&mut self, plane: &[u8]) -> Result<(), FrameError> {
        let expected = self.pixel_count();
        if plane.len() < expected {
            return Err(FrameError::PlaneTooSmall {
                expected,
                actual: plane.len(),
            });
        }
        match self.format {
            PixelFormat::Gray8 => {
                self.data.copy_from_slice(&plane[..expected]);
            }
            PixelFormat::RGBA => {
                for (px, &luma) in self.rgba_pixels_mut().iter_mut().zip(plane) {
                    *px = [luma, luma, luma, 255];
                }
            }
            // The cache never allocates a planar buffer
            PixelFormat::Yuv420 => {
                return Err(FrameError::UnsupportedFormat(self.format));
            }
        }
        Ok(())
    }

    /// Per-pixel intensity, regardless of buffer layout
    ///
    /// For RGBA content this is the weighted channel mix the grayscale
    /// stage uses; after that stage has run it equals the red channel.
    pub fn luma(&self) -> Vec<u8> {
        match self.format {
            PixelFormat::Gray8 => self.data.clone(),
            _ => self
                .rgba_pixels()
                .iter()
                .map(|px| crate::transform::luma_of(px[0], px[1], px[2]))
                .collect(),
        }
    }
}

/// Cache holding the one reusable working buffer
///
/// `ensure` is the only way in: it validates the source format, then
/// either hands back the cached buffer (dimensions and format match) or
/// replaces it wholesale. Capacity never changes in place.
#[derive(Debug, Default)]
pub struct FrameBufferCache {
    buffer: Option<PixelBuffer>,
    reallocations: u64,
}

impl FrameBufferCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a buffer sized for the given frame
    ///
    /// Fails with [`FrameError::UnsupportedFormat`] if the source frame
    /// is not in the expected planar luma format; this check runs before
    /// any buffer work.
    pub fn ensure(
        &mut self,
        width: u32,
        height: u32,
        source_format: PixelFormat,
        output_format: OutputFormat,
    ) -> Result<&mut PixelBuffer, FrameError> {
        if !source_format.is_planar_luma() {
            return Err(FrameError::UnsupportedFormat(source_format));
        }

        let buffer_format = output_format.buffer_format();
        match self.buffer.take() {
            Some(buffer) if buffer.matches(width, height, buffer_format) => {
                Ok(self.buffer.insert(buffer))
            }
            _ => {
                debug!(width, height, format = %buffer_format, "allocating frame buffer");
                self.reallocations += 1;
                Ok(self
                    .buffer
                    .insert(PixelBuffer::new(width, height, buffer_format)))
            }
        }
    }

    /// Number of allocations performed so far
    pub fn reallocations(&self) -> u64 {
        self.reallocations
    }
}
