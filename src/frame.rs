// SPDX-License-Identifier: GPL-3.0-only

//! Source frame types and the capture-side seam
//!
//! Frames arrive from an upstream capture pipeline once per cycle. The
//! pipeline only reads their luma plane; everything else (chroma planes,
//! exposure metadata, timestamps) belongs to the capture layer and never
//! crosses this boundary.

use crate::errors::FrameError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Pixel format of a frame or buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PixelFormat {
    /// RGBA - 32-bit with alpha (4 bytes per pixel)
    RGBA,
    /// Gray8 - 8-bit grayscale (single channel)
    Gray8,
    /// Planar 4:2:0 YUV (full-resolution luma plane + subsampled chroma)
    ///
    /// The single source format the pipeline accepts; only the luma plane
    /// is ever read.
    Yuv420,
}

impl PixelFormat {
    /// Average bytes per pixel (accounting for chroma subsampling)
    pub fn bytes_per_pixel(&self) -> f32 {
        match self {
            Self::RGBA => 4.0,
            Self::Gray8 => 1.0,
            Self::Yuv420 => 1.5, // 4:2:0 subsampling
        }
    }

    /// Check if this is the planar luma source format the pipeline expects
    pub fn is_planar_luma(&self) -> bool {
        matches!(self, Self::Yuv420)
    }
}

impl std::fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PixelFormat::RGBA => write!(f, "RGBA"),
            PixelFormat::Gray8 => write!(f, "GRAY8"),
            PixelFormat::Yuv420 => write!(f, "YUV420"),
        }
    }
}

/// Working-buffer format for the transform stages
///
/// Both formats produce the same binarization decision per pixel; the
/// single-channel layout quarters the memory footprint, the full-color
/// layout keeps an alpha channel for consumers that want to display the
/// prepared image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OutputFormat {
    /// One 8-bit intensity channel per pixel (memory-efficient)
    #[default]
    SingleChannel,
    /// Full RGBA color, alpha preserved through every stage
    FullColor,
}

impl OutputFormat {
    /// Pixel format of the working buffer this output format selects
    pub fn buffer_format(&self) -> PixelFormat {
        match self {
            OutputFormat::SingleChannel => PixelFormat::Gray8,
            OutputFormat::FullColor => PixelFormat::RGBA,
        }
    }
}

/// Sensor rotation in degrees (clockwise)
///
/// Camera sensors may be physically mounted at various angles relative to
/// the device. This is common on mobile devices where sensors are rotated
/// 90° or 270° relative to the display orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SensorRotation {
    /// No rotation (sensor is oriented correctly)
    #[default]
    None,
    /// 90 degrees clockwise
    Rotate90,
    /// 180 degrees (upside down)
    Rotate180,
    /// 270 degrees clockwise (90 degrees counter-clockwise)
    Rotate270,
}

impl SensorRotation {
    /// Create rotation from an integer degree value (normalised to 0-360)
    pub fn from_degrees_int(degrees: i32) -> Self {
        match degrees.rem_euclid(360) {
            90 => SensorRotation::Rotate90,
            180 => SensorRotation::Rotate180,
            270 => SensorRotation::Rotate270,
            _ => SensorRotation::None,
        }
    }

    /// Parse rotation from a string value (degrees)
    pub fn from_degrees(degrees: &str) -> Self {
        match degrees.trim() {
            "90" => SensorRotation::Rotate90,
            "180" => SensorRotation::Rotate180,
            "270" => SensorRotation::Rotate270,
            "0" | "" => SensorRotation::None,
            other => {
                if let Ok(deg) = other.parse::<i32>() {
                    Self::from_degrees_int(deg)
                } else {
                    SensorRotation::None
                }
            }
        }
    }

    /// Get the rotation in degrees
    pub fn degrees(&self) -> u32 {
        match self {
            SensorRotation::None => 0,
            SensorRotation::Rotate90 => 90,
            SensorRotation::Rotate180 => 180,
            SensorRotation::Rotate270 => 270,
        }
    }

    /// Check if rotation swaps width and height
    pub fn swaps_dimensions(&self) -> bool {
        matches!(self, SensorRotation::Rotate90 | SensorRotation::Rotate270)
    }
}

impl std::fmt::Display for SensorRotation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}°", self.degrees())
    }
}

/// Sub-region of a frame, in source pixel coordinates
///
/// Passed through to the decode boundary unchanged; the engine clamps
/// reads to the buffer bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CropRect {
    pub left: u32,
    pub top: u32,
    pub width: u32,
    pub height: u32,
}

impl CropRect {
    pub fn new(left: u32, top: u32, width: u32, height: u32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// A crop covering the whole frame
    pub fn full_frame(width: u32, height: u32) -> Self {
        Self {
            left: 0,
            top: 0,
            width,
            height,
        }
    }
}

impl std::fmt::Display for CropRect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}x{}+{}+{}",
            self.width, self.height, self.left, self.top
        )
    }
}

/// A single frame handed over by the capture pipeline
///
/// Frames are scoped resources: the reader copies the luma plane out and
/// calls [`SourceFrame::close`] immediately afterwards, on both the
/// success and the failure path, so the upstream frame pool is never
/// starved.
pub trait SourceFrame {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    fn pixel_format(&self) -> PixelFormat;

    /// Sensor rotation to report at the decode boundary
    fn rotation(&self) -> SensorRotation;

    /// Crop rectangle in source pixel coordinates
    fn crop(&self) -> CropRect;

    /// The full-resolution luma plane (`width * height` bytes)
    fn luma_plane(&self) -> &[u8];

    /// Release the frame's backing storage
    ///
    /// Consumes the frame; a failure here is a resource lifecycle error
    /// and is escalated by the reader when the pixel copy succeeded.
    fn close(self) -> Result<(), FrameError>
    where
        Self: Sized;
}

/// An owned frame with pre-copied pixel data
///
/// The concrete frame type used by the CLI and tests. Capture backends
/// with richer lifecycles (mapped buffers, frame pools) implement
/// [`SourceFrame`] themselves.
#[derive(Debug, Clone)]
pub struct CapturedFrame {
    width: u32,
    height: u32,
    format: PixelFormat,
    rotation: SensorRotation,
    crop: CropRect,
    data: Arc<[u8]>,
}

impl CapturedFrame {
    /// Create a planar-luma frame from a grayscale plane
    ///
    /// The crop defaults to the full frame.
    pub fn from_luma(width: u32, height: u32, luma: Vec<u8>) -> Self {
        Self {
            width,
            height,
            format: PixelFormat::Yuv420,
            rotation: SensorRotation::None,
            crop: CropRect::full_frame(width, height),
            data: Arc::from(luma),
        }
    }

    /// Create a frame in an arbitrary source format (for format checks)
    pub fn with_format(
        width: u32,
        height: u32,
        format: PixelFormat,
        data: Vec<u8>,
    ) -> Self {
        Self {
            width,
            height,
            format,
            rotation: SensorRotation::None,
            crop: CropRect::full_frame(width, height),
            data: Arc::from(data),
        }
    }

    pub fn with_rotation(mut self, rotation: SensorRotation) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_crop(mut self, crop: CropRect) -> Self {
        self.crop = crop;
        self
    }
}

impl SourceFrame for CapturedFrame {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn pixel_format(&self) -> PixelFormat {
        self.format
    }

    fn rotation(&self) -> SensorRotation {
        self.rotation
    }

    fn crop(&self) -> CropRect {
        self.crop
    }

    fn luma_plane(&self) -> &[u8] {
        // For planar YUV the luma plane is the leading width*height bytes;
        // for Gray8 the whole buffer is the plane.
        let plane_len = (self.width as usize * self.height as usize).min(self.data.len());
        &self.data[..plane_len]
    }

    fn close(self) -> Result<(), FrameError> {
        // Owned data, dropped here; nothing can fail.
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_from_degrees() {
        assert_eq!(SensorRotation::from_degrees("90"), SensorRotation::Rotate90);
        assert_eq!(
            SensorRotation::from_degrees("270"),
            SensorRotation::Rotate270
        );
        assert_eq!(SensorRotation::from_degrees("0"), SensorRotation::None);
        assert_eq!(SensorRotation::from_degrees(""), SensorRotation::None);
        assert_eq!(SensorRotation::from_degrees("garbage"), SensorRotation::None);
        // Normalisation of out-of-range values
        assert_eq!(SensorRotation::from_degrees("450"), SensorRotation::Rotate90);
        assert_eq!(
            SensorRotation::from_degrees_int(-90),
            SensorRotation::Rotate270
        );
    }

    #[test]
    fn test_rotation_swaps_dimensions() {
        assert!(SensorRotation::Rotate90.swaps_dimensions());
        assert!(SensorRotation::Rotate270.swaps_dimensions());
        assert!(!SensorRotation::None.swaps_dimensions());
        assert!(!SensorRotation::Rotate180.swaps_dimensions());
    }

    #[test]
    fn test_output_format_buffer_format() {
        assert_eq!(
            OutputFormat::SingleChannel.buffer_format(),
            PixelFormat::Gray8
        );
        assert_eq!(OutputFormat::FullColor.buffer_format(), PixelFormat::RGBA);
    }

    #[test]
    fn test_captured_frame_luma_plane() {
        let frame = CapturedFrame::from_luma(2, 2, vec![10, 20, 30, 40]);
        assert_eq!(frame.pixel_format(), PixelFormat::Yuv420);
        assert_eq!(frame.luma_plane(), &[10, 20, 30, 40]);
        assert_eq!(frame.crop(), CropRect::full_frame(2, 2));
    }

    #[test]
    fn test_captured_frame_luma_plane_ignores_chroma() {
        // 2x2 planar 4:2:0: 4 luma bytes followed by 2 chroma bytes
        let frame = CapturedFrame::from_luma(2, 2, vec![10, 20, 30, 40, 128, 128]);
        assert_eq!(frame.luma_plane(), &[10, 20, 30, 40]);
    }
}
