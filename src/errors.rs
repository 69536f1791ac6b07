// SPDX-License-Identifier: GPL-3.0-only

//! Error types for the scanning pipeline

use crate::frame::PixelFormat;
use std::fmt;

/// Result type alias using ScanError
pub type ScanResult<T> = Result<T, ScanError>;

/// Main pipeline error type
#[derive(Debug, Clone)]
pub enum ScanError {
    /// Frame preparation errors (format check, buffer copy, release)
    Frame(FrameError),
    /// Decode boundary errors (engine protocol violations)
    Decode(DecodeError),
    /// Configuration errors
    Config(String),
    /// Generic error with message
    Other(String),
}

/// Frame preparation errors
#[derive(Debug, Clone)]
pub enum FrameError {
    /// Source frame is not in the expected planar luma format
    UnsupportedFormat(PixelFormat),
    /// Source luma plane is shorter than the frame dimensions require
    PlaneTooSmall { expected: usize, actual: usize },
    /// Releasing the source frame's backing storage failed
    ReleaseFailed(String),
}

/// Decode boundary errors
///
/// Absence of a barcode is not an error; these variants only cover
/// protocol mismatches between the pipeline and the decode engine.
#[derive(Debug, Clone)]
pub enum DecodeError {
    /// Engine returned a token that is neither a format name nor the
    /// "NotFound" sentinel; carries the token as diagnostic payload
    EngineFailure(String),
    /// Engine returned no status token at all
    MissingStatus,
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanError::Frame(e) => write!(f, "Frame error: {}", e),
            ScanError::Decode(e) => write!(f, "Decode error: {}", e),
            ScanError::Config(msg) => write!(f, "Configuration error: {}", msg),
            ScanError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameError::UnsupportedFormat(format) => {
                write!(f, "Unsupported source pixel format: {}", format)
            }
            FrameError::PlaneTooSmall { expected, actual } => {
                write!(
                    f,
                    "Luma plane too small: expected {} bytes, got {}",
                    expected, actual
                )
            }
            FrameError::ReleaseFailed(msg) => write!(f, "Failed to release frame: {}", msg),
        }
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::EngineFailure(token) => {
                write!(f, "Decode engine failure: {}", token)
            }
            DecodeError::MissingStatus => write!(f, "Decode engine returned no status token"),
        }
    }
}

impl std::error::Error for ScanError {}
impl std::error::Error for FrameError {}
impl std::error::Error for DecodeError {}

// Conversions from sub-errors to ScanError
impl From<FrameError> for ScanError {
    fn from(err: FrameError) -> Self {
        ScanError::Frame(err)
    }
}

impl From<DecodeError> for ScanError {
    fn from(err: DecodeError) -> Self {
        ScanError::Decode(err)
    }
}

impl From<String> for ScanError {
    fn from(msg: String) -> Self {
        ScanError::Other(msg)
    }
}

impl From<&str> for ScanError {
    fn from(msg: &str) -> Self {
        ScanError::Other(msg.to_string())
    }
}

// I/O errors only arise from config file handling
impl From<std::io::Error> for ScanError {
    fn from(err: std::io::Error) -> Self {
        ScanError::Config(err.to_string())
    }
}
