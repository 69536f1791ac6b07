// SPDX-License-Identifier: GPL-3.0-only

//! Pipeline-wide constants

/// Global binarization threshold.
///
/// Intensities strictly below this value classify as ink, values at or
/// above it as background. One deterministic cutoff for the whole frame;
/// there is no adaptive or per-region thresholding.
pub const BINARY_THRESHOLD: u8 = 130;

/// Output class for dark (ink) pixels.
pub const INK: u8 = 0;

/// Output class for light (background) pixels.
pub const BACKGROUND: u8 = 255;

/// Status token the decode engine returns when no symbol was found.
///
/// This is the expected steady state of a live scanning session, never an
/// error.
pub const NOT_FOUND_TOKEN: &str = "NotFound";

/// Grayscale extraction weights
///
/// Weighted channel mix used by the preparation pipeline. These are the
/// reader's historical weights and are pinned by tests; they differ slightly
/// from BT.601.
pub mod luma {
    /// Red channel weight
    pub const R_WEIGHT: f32 = 0.3;

    /// Green channel weight
    pub const G_WEIGHT: f32 = 0.59;

    /// Blue channel weight
    pub const B_WEIGHT: f32 = 0.11;
}

/// Application information utilities
pub mod app_info {
    /// Get the application version from build-time environment
    pub fn version() -> &'static str {
        env!("GIT_VERSION")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_luma_weights_sum_to_one() {
        let sum = luma::R_WEIGHT + luma::G_WEIGHT + luma::B_WEIGHT;
        assert!((sum - 1.0).abs() < 1e-6, "weights must sum to 1.0, got {}", sum);
    }

    #[test]
    fn test_pixel_classes_are_extremes() {
        assert_eq!(INK, 0);
        assert_eq!(BACKGROUND, 255);
        assert!(INK < BINARY_THRESHOLD && BINARY_THRESHOLD as u16 <= BACKGROUND as u16);
    }
}
