// SPDX-License-Identifier: GPL-3.0-only

//! Color transform stages
//!
//! Three in-place stages over the working buffer: grayscale extraction,
//! fixed-threshold binarization, and an optional linear inversion. All
//! three preserve the alpha channel on full-color buffers and leave
//! single-channel buffers single-channel.

use crate::buffer::PixelBuffer;
use crate::constants::{BACKGROUND, BINARY_THRESHOLD, INK, luma};
use crate::frame::PixelFormat;

/// Weighted intensity of an RGB pixel, clamped to [0, 255]
#[inline]
pub fn luma_of(r: u8, g: u8, b: u8) -> u8 {
    let gray =
        luma::R_WEIGHT * r as f32 + luma::G_WEIGHT * g as f32 + luma::B_WEIGHT * b as f32;
    gray.clamp(0.0, 255.0).round() as u8
}

/// Classify an intensity against the global threshold
///
/// Pinned polarity: values strictly below [`BINARY_THRESHOLD`] are ink,
/// values at or above it are background. The threshold value itself is
/// background.
#[inline]
pub fn classify(intensity: u8) -> u8 {
    if intensity < BINARY_THRESHOLD {
        INK
    } else {
        BACKGROUND
    }
}

/// Grayscale extraction stage
///
/// Replaces each pixel's color with its weighted intensity, alpha
/// unchanged. Single-channel buffers already hold intensities, so this
/// is a no-op for them.
pub fn grayscale(buffer: &mut PixelBuffer) {
    match buffer.format {
        PixelFormat::Gray8 => {}
        _ => {
            for px in buffer.rgba_pixels_mut() {
                let gray = luma_of(px[0], px[1], px[2]);
                px[0] = gray;
                px[1] = gray;
                px[2] = gray;
            }
        }
    }
}

/// Binarization stage
///
/// Maps every pixel to one of the two output classes via [`classify`],
/// alpha unchanged. Idempotent: a binary image classifies to itself.
pub fn binarize(buffer: &mut PixelBuffer) {
    match buffer.format {
        PixelFormat::Gray8 => {
            for v in buffer.as_mut_slice() {
                *v = classify(*v);
            }
        }
        _ => {
            for px in buffer.rgba_pixels_mut() {
                let class = classify(luma_of(px[0], px[1], px[2]));
                px[0] = class;
                px[1] = class;
                px[2] = class;
            }
        }
    }
}

/// Inversion stage
///
/// Applies the composed desaturate-and-negate [`ColorMatrix`]. On the
/// already-desaturated content this pipeline produces, applying it twice
/// restores the original pixel values.
pub fn invert(buffer: &mut PixelBuffer) {
    let matrix = ColorMatrix::inversion();
    match buffer.format {
        PixelFormat::Gray8 => {
            for v in buffer.as_mut_slice() {
                let [r, _, _, _] = matrix.apply([*v, *v, *v, 255]);
                *v = r;
            }
        }
        _ => {
            for px in buffer.rgba_pixels_mut() {
                *px = matrix.apply(*px);
            }
        }
    }
}

/// Branch-free arithmetic inversion
///
/// Per-pixel fallback for the matrix stage: output intensity is
/// `255 − luma`. Numerically equivalent to [`invert`]; the matrix path
/// stands in for a hardware color-transform primitive where one exists.
pub fn invert_fast(buffer: &mut PixelBuffer) {
    match buffer.format {
        PixelFormat::Gray8 => {
            for v in buffer.as_mut_slice() {
                *v = u8::MAX - *v;
            }
        }
        _ => {
            for px in buffer.rgba_pixels_mut() {
                let gray =
                    (255.0 - luma_f32(px[0], px[1], px[2])).clamp(0.0, 255.0).round() as u8;
                px[0] = gray;
                px[1] = gray;
                px[2] = gray;
            }
        }
    }
}

#[inline]
fn luma_f32(r: u8, g: u8, b: u8) -> f32 {
    luma::R_WEIGHT * r as f32 + luma::G_WEIGHT * g as f32 + luma::B_WEIGHT * b as f32
}

/// A 4×5 linear color transform, row-major
///
/// Each output channel is an affine combination of the input channels:
/// `out = M · [R, G, B, A, 1]ᵗ`. Rows map to output R, G, B, A; the
/// fifth column is the constant offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorMatrix {
    m: [[f32; 5]; 4],
}

impl ColorMatrix {
    pub fn identity() -> Self {
        Self {
            m: [
                [1.0, 0.0, 0.0, 0.0, 0.0],
                [0.0, 1.0, 0.0, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0, 0.0],
                [0.0, 0.0, 0.0, 1.0, 0.0],
            ],
        }
    }

    /// Zero-saturation matrix: every color channel becomes the weighted
    /// intensity, alpha unchanged
    pub fn desaturation() -> Self {
        let row = [luma::R_WEIGHT, luma::G_WEIGHT, luma::B_WEIGHT, 0.0, 0.0];
        Self {
            m: [row, row, row, [0.0, 0.0, 0.0, 1.0, 0.0]],
        }
    }

    /// Channel negation with a 255 offset, alpha unchanged
    pub fn negation() -> Self {
        Self {
            m: [
                [-1.0, 0.0, 0.0, 0.0, 255.0],
                [0.0, -1.0, 0.0, 0.0, 255.0],
                [0.0, 0.0, -1.0, 0.0, 255.0],
                [0.0, 0.0, 0.0, 1.0, 0.0],
            ],
        }
    }

    /// The inversion transform: desaturate, then negate
    pub fn inversion() -> Self {
        Self::negation().concat(&Self::desaturation())
    }

    /// Compose `self ∘ other`: the returned matrix applies `other`
    /// first, then `self`
    pub fn concat(&self, other: &Self) -> Self {
        // Multiply as 5×5 matrices with an implicit [0,0,0,0,1] last row.
        let mut out = [[0.0f32; 5]; 4];
        for (row, out_row) in out.iter_mut().enumerate() {
            for col in 0..5 {
                let mut sum = 0.0;
                for k in 0..4 {
                    sum += self.m[row][k] * other.m[k][col];
                }
                if col == 4 {
                    sum += self.m[row][4];
                }
                out_row[col] = sum;
            }
        }
        Self { m: out }
    }

    /// Apply the transform to one pixel
    pub fn apply(&self, px: [u8; 4]) -> [u8; 4] {
        let input = [px[0] as f32, px[1] as f32, px[2] as f32, px[3] as f32];
        let mut out = [0u8; 4];
        for (channel, row) in self.m.iter().enumerate() {
            let mut sum = row[4];
            for (k, &weight) in row[..4].iter().enumerate() {
                sum += weight * input[k];
            }
            out[channel] = sum.clamp(0.0, 255.0).round() as u8;
        }
        out
    }
}

impl std::ops::Mul for ColorMatrix {
    type Output = ColorMatrix;

    fn mul(self, rhs: ColorMatrix) -> ColorMatrix {
        self.concat(&rhs)
    }
}
