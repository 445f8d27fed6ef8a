//! Error types for despeckling and pixel-buffer loading.

use thiserror::Error;

/// Errors produced by the despeckle filters and the PNM loader.
///
/// The computation itself is deterministic and pure: invalid input is
/// rejected before any processing begins, so no partial output ever exists.
#[derive(Error, Debug)]
pub enum DespeckleError {
    #[error("image dimensions must be positive, got {width}x{height}")]
    EmptyDimensions { width: usize, height: usize },

    #[error("pixel buffer length {len} does not match dimensions {width}x{height}")]
    DimensionMismatch {
        len: usize,
        width: usize,
        height: usize,
    },

    #[error("cannot take the median of an empty sequence")]
    EmptySequence,

    #[error("failed to read pixel data: {0}")]
    Io(#[from] std::io::Error),

    #[error("missing image header (expected width, height and max value)")]
    MissingHeader,

    #[error("invalid token in pixel stream: '{0}'")]
    InvalidToken(String),

    #[error("unsupported max sample value {0} (expected 1-255)")]
    UnsupportedMaxValue(u32),

    #[error("sample count {found} matches neither one channel ({expected}) nor three")]
    ChannelCount { found: usize, expected: usize },
}
