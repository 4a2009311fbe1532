//! Error types for surface construction and compositing

use thiserror::Error;

use crate::format::PixelFormat;
use crate::geometry::Rect;

/// Errors reported by surface constructors and format-checked operators.
///
/// Format errors are raised before any pixel is written, so a failed
/// operator leaves the destination untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BlitError {
    /// A two-surface operator was called with a source/destination pair it
    /// does not implement.
    #[error("incompatible formats in {op} (dst: {dst}, src: {src})")]
    IncompatibleFormats {
        op: &'static str,
        dst: PixelFormat,
        src: PixelFormat,
    },

    /// A single-surface operator does not support the surface's format.
    #[error("{op} does not support {format} surfaces")]
    UnsupportedFormat {
        op: &'static str,
        format: PixelFormat,
    },

    #[error("buffer too small: need {needed} bytes, got {actual}")]
    BufferTooSmall { needed: usize, actual: usize },

    #[error("invalid stride: {stride} is less than the minimum of {min}")]
    InvalidStride { stride: usize, min: usize },

    /// A rectangle whose far edge does not fit in `usize`.
    #[error("{op}: rectangle {rect:?} overflows the coordinate space")]
    InvalidRect { op: &'static str, rect: Rect },

    #[error("invalid rotation {0} (expected 0..=3)")]
    InvalidRotation(u8),
}
