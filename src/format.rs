//! Pixel format tags
//!
//! The five storage layouts a [`BlitBuffer`](crate::BlitBuffer) can carry.
//! The set is closed: operators dispatch on the tag and run a monomorphized
//! loop over the matching [`Pixel`](crate::color::Pixel) type.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Storage layout of a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PixelFormat {
    /// 8-bit luminance
    Gray8,
    /// 8-bit luminance followed by 8-bit alpha
    Gray8A,
    /// 16-bit packed 5/6/5 red/green/blue, native endian
    Rgb565,
    /// 8-bit red, green, blue
    Rgb24,
    /// 8-bit red, green, blue, alpha
    Rgb32,
}

impl PixelFormat {
    /// Every format, in tag order
    pub const ALL: [PixelFormat; 5] = [
        PixelFormat::Gray8,
        PixelFormat::Gray8A,
        PixelFormat::Rgb565,
        PixelFormat::Rgb24,
        PixelFormat::Rgb32,
    ];

    /// Size of one pixel in bytes
    #[inline]
    pub const fn bytes_per_pixel(self) -> usize {
        match self {
            PixelFormat::Gray8 => 1,
            PixelFormat::Gray8A | PixelFormat::Rgb565 => 2,
            PixelFormat::Rgb24 => 3,
            PixelFormat::Rgb32 => 4,
        }
    }

    /// Whether the format stores an alpha channel
    #[inline]
    pub const fn has_alpha(self) -> bool {
        matches!(self, PixelFormat::Gray8A | PixelFormat::Rgb32)
    }

    /// Whether the format stores luminance only (the dithering targets)
    #[inline]
    pub const fn is_gray(self) -> bool {
        matches!(self, PixelFormat::Gray8 | PixelFormat::Gray8A)
    }

    /// Short lowercase name, as used in scene files
    pub const fn name(self) -> &'static str {
        match self {
            PixelFormat::Gray8 => "gray8",
            PixelFormat::Gray8A => "gray8a",
            PixelFormat::Rgb565 => "rgb565",
            PixelFormat::Rgb24 => "rgb24",
            PixelFormat::Rgb32 => "rgb32",
        }
    }

    /// Parse a format from its short name (case-insensitive)
    pub fn from_name(name: &str) -> Option<Self> {
        PixelFormat::ALL
            .into_iter()
            .find(|f| f.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
