//! Pixel values and the per-format pixel accessors
//!
//! Every operator in this crate is written once against the [`Pixel`] trait
//! and monomorphized per storage format. Format-specific knowledge (byte
//! layout, channel packing, what "invert" means for a packed word) lives in
//! the five implementations at the bottom of this file.
//!
//! All arithmetic is fixed-point; no operator touches floating point.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::dither::dither_o8x8;
use crate::format::PixelFormat;

// ============================================================================
// Fixed-point helpers
// ============================================================================

/// Rounded division by 255, exact for any product of two 8-bit values.
#[inline(always)]
pub const fn div_255(v: u32) -> u32 {
    let v = v + 128;
    ((v >> 8) + v) >> 8
}

/// Luma from RGB: `(4898·R + 9618·G + 1869·B) >> 14`.
///
/// The weights sum to 16385, so equal channels map back to themselves.
#[inline(always)]
pub const fn rgb_to_gray(r: u8, g: u8, b: u8) -> u8 {
    ((4898 * r as u32 + 9618 * g as u32 + 1869 * b as u32) >> 14) as u8
}

/// Pack 8-bit channels into RGB565.
#[inline(always)]
pub const fn rgb_to_rgb16(r: u8, g: u8, b: u8) -> u16 {
    (((r as u16) & 0xF8) << 8) | (((g as u16) & 0xFC) << 3) | ((b as u16) >> 3)
}

/// Widen a 5-bit channel to 8 bits by replicating its top bits.
#[inline(always)]
pub const fn expand5(v: u8) -> u8 {
    (v << 3) | (v >> 2)
}

/// Widen a 6-bit channel to 8 bits by replicating its top bits.
#[inline(always)]
pub const fn expand6(v: u8) -> u8 {
    (v << 2) | (v >> 4)
}

/// Red channel of an RGB565 word, widened to 8 bits
#[inline(always)]
pub const fn rgb16_red(v: u16) -> u8 {
    expand5((v >> 11) as u8 & 0x1F)
}

/// Green channel of an RGB565 word, widened to 8 bits
#[inline(always)]
pub const fn rgb16_green(v: u16) -> u8 {
    expand6((v >> 5) as u8 & 0x3F)
}

/// Blue channel of an RGB565 word, widened to 8 bits
#[inline(always)]
pub const fn rgb16_blue(v: u16) -> u8 {
    expand5(v as u8 & 0x1F)
}

/// `dst·(255 − alpha) + src·alpha`, rounded back to 8 bits
#[inline(always)]
fn mix(dst: u8, src: u8, alpha: u8) -> u8 {
    div_255(dst as u32 * (0xFF - alpha) as u32 + src as u32 * alpha as u32) as u8
}

/// Premultiplied source over destination: only the destination is
/// attenuated.
#[inline(always)]
fn mix_premultiplied(dst: u8, src: u8, alpha: u8) -> u8 {
    div_255(dst as u32 * (0xFF - alpha) as u32 + src as u32 * 0xFF).min(0xFF) as u8
}

#[inline(always)]
fn mul(dst: u8, src: u8) -> u8 {
    div_255(dst as u32 * src as u32) as u8
}

const fn opaque() -> u8 {
    0xFF
}

// ============================================================================
// Color values
// ============================================================================

/// 8-bit luminance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color8(pub u8);

/// 8-bit luminance with alpha.
///
/// Also the format-agnostic composite argument: operators that take a single
/// blend color regardless of destination format accept a `Color8A`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Color8A {
    pub v: u8,
    #[serde(default = "opaque")]
    pub alpha: u8,
}

/// Packed RGB565.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ColorRgb16(pub u16);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ColorRgb24 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ColorRgb32 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    #[serde(default = "opaque")]
    pub alpha: u8,
}

impl Color8A {
    #[inline]
    pub const fn new(v: u8, alpha: u8) -> Self {
        Self { v, alpha }
    }

    #[inline]
    pub const fn to_rgb32(self) -> ColorRgb32 {
        ColorRgb32::new(self.v, self.v, self.v, self.alpha)
    }
}

impl ColorRgb16 {
    #[inline]
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self(rgb_to_rgb16(r, g, b))
    }
}

impl ColorRgb24 {
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    #[inline]
    pub const fn to_rgb32(self) -> ColorRgb32 {
        ColorRgb32::rgb(self.r, self.g, self.b)
    }
}

impl ColorRgb32 {
    pub const BLACK: ColorRgb32 = ColorRgb32::rgb(0, 0, 0);
    pub const WHITE: ColorRgb32 = ColorRgb32::rgb(0xFF, 0xFF, 0xFF);

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, alpha: u8) -> Self {
        Self { r, g, b, alpha }
    }

    /// Opaque color
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 0xFF)
    }

    /// Opaque gray
    #[inline]
    pub const fn gray(v: u8) -> Self {
        Self::new(v, v, v, 0xFF)
    }

    #[inline]
    pub const fn luminance(self) -> u8 {
        rgb_to_gray(self.r, self.g, self.b)
    }

    #[inline]
    pub const fn with_alpha(self, alpha: u8) -> Self {
        Self::new(self.r, self.g, self.b, alpha)
    }

    #[inline]
    pub const fn to_rgb24(self) -> ColorRgb24 {
        ColorRgb24::new(self.r, self.g, self.b)
    }
}

impl fmt::Display for ColorRgb32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{:02X}{:02X}{:02X}{:02X}",
            self.r, self.g, self.b, self.alpha
        )
    }
}

// ============================================================================
// Pixel accessor trait
// ============================================================================

/// Per-format pixel accessor.
///
/// `read`/`write` move one pixel between a byte slice (at least
/// `FORMAT.bytes_per_pixel()` long) and its value type. The remaining methods
/// are the per-pixel transforms the compositing operators are built from.
/// Color arguments arrive as [`ColorRgb32`]; gray formats reduce them to
/// luminance.
pub trait Pixel: Copy + PartialEq + fmt::Debug {
    const FORMAT: PixelFormat;

    fn read(bytes: &[u8]) -> Self;

    fn write(self, bytes: &mut [u8]);

    fn to_rgb32(self) -> ColorRgb32;

    /// Convert from RGBA following the crate's conversion rules (alpha kept
    /// where the format stores it, luminance for gray formats).
    fn from_rgb32(color: ColorRgb32) -> Self;

    /// Opaque pixel of the given luminance
    #[inline]
    fn from_gray(v: u8) -> Self {
        Self::from_rgb32(ColorRgb32::gray(v))
    }

    #[inline]
    fn luminance(self) -> u8 {
        self.to_rgb32().luminance()
    }

    /// Stored alpha; opaque for formats without an alpha channel
    #[inline]
    fn alpha(self) -> u8 {
        0xFF
    }

    /// Coverage when the pixel is used as a mask: its alpha channel if the
    /// format has one, its luminance otherwise.
    #[inline]
    fn coverage(self) -> u8 {
        if Self::FORMAT.has_alpha() {
            self.alpha()
        } else {
            self.luminance()
        }
    }

    /// Replace the color channels, keeping the stored alpha.
    fn recolor(self, color: ColorRgb32) -> Self;

    /// XOR every color channel with its maximum; alpha untouched.
    fn inverted(self) -> Self;

    /// `self·(255 − alpha) + color·alpha` per color channel; alpha untouched.
    fn blend(self, color: ColorRgb32, alpha: u8) -> Self;

    /// Like [`blend`](Pixel::blend) with `color` treated as premultiplied.
    fn blend_premultiplied(self, color: ColorRgb32, alpha: u8) -> Self;

    /// `self·color / 255` per color channel; alpha untouched.
    fn multiply(self, color: ColorRgb32) -> Self;

    /// Ordered-dither the luminance at source position (x, y). Identity for
    /// color formats.
    #[inline]
    fn dithered(self, _x: usize, _y: usize) -> Self {
        self
    }

    /// Convert to another format.
    #[inline]
    fn convert<D: Pixel>(self) -> D {
        D::from_rgb32(self.to_rgb32())
    }
}

// ============================================================================
// Gray8
// ============================================================================

impl Pixel for Color8 {
    const FORMAT: PixelFormat = PixelFormat::Gray8;

    #[inline(always)]
    fn read(bytes: &[u8]) -> Self {
        Color8(bytes[0])
    }

    #[inline(always)]
    fn write(self, bytes: &mut [u8]) {
        bytes[0] = self.0;
    }

    #[inline]
    fn to_rgb32(self) -> ColorRgb32 {
        ColorRgb32::gray(self.0)
    }

    #[inline]
    fn from_rgb32(color: ColorRgb32) -> Self {
        Color8(color.luminance())
    }

    #[inline]
    fn from_gray(v: u8) -> Self {
        Color8(v)
    }

    #[inline]
    fn luminance(self) -> u8 {
        self.0
    }

    #[inline]
    fn recolor(self, color: ColorRgb32) -> Self {
        Color8(color.luminance())
    }

    #[inline]
    fn inverted(self) -> Self {
        Color8(self.0 ^ 0xFF)
    }

    #[inline]
    fn blend(self, color: ColorRgb32, alpha: u8) -> Self {
        Color8(mix(self.0, color.luminance(), alpha))
    }

    #[inline]
    fn blend_premultiplied(self, color: ColorRgb32, alpha: u8) -> Self {
        Color8(mix_premultiplied(self.0, color.luminance(), alpha))
    }

    #[inline]
    fn multiply(self, color: ColorRgb32) -> Self {
        Color8(mul(self.0, color.luminance()))
    }

    #[inline]
    fn dithered(self, x: usize, y: usize) -> Self {
        Color8(dither_o8x8(x, y, self.0))
    }
}

// ============================================================================
// Gray8A
// ============================================================================

impl Pixel for Color8A {
    const FORMAT: PixelFormat = PixelFormat::Gray8A;

    #[inline(always)]
    fn read(bytes: &[u8]) -> Self {
        Color8A::new(bytes[0], bytes[1])
    }

    #[inline(always)]
    fn write(self, bytes: &mut [u8]) {
        bytes[0] = self.v;
        bytes[1] = self.alpha;
    }

    #[inline]
    fn to_rgb32(self) -> ColorRgb32 {
        Color8A::to_rgb32(self)
    }

    #[inline]
    fn from_rgb32(color: ColorRgb32) -> Self {
        Color8A::new(color.luminance(), color.alpha)
    }

    #[inline]
    fn from_gray(v: u8) -> Self {
        Color8A::new(v, 0xFF)
    }

    #[inline]
    fn luminance(self) -> u8 {
        self.v
    }

    #[inline]
    fn alpha(self) -> u8 {
        self.alpha
    }

    #[inline]
    fn recolor(self, color: ColorRgb32) -> Self {
        Color8A::new(color.luminance(), self.alpha)
    }

    #[inline]
    fn inverted(self) -> Self {
        Color8A::new(self.v ^ 0xFF, self.alpha)
    }

    #[inline]
    fn blend(self, color: ColorRgb32, alpha: u8) -> Self {
        Color8A::new(mix(self.v, color.luminance(), alpha), self.alpha)
    }

    #[inline]
    fn blend_premultiplied(self, color: ColorRgb32, alpha: u8) -> Self {
        Color8A::new(
            mix_premultiplied(self.v, color.luminance(), alpha),
            self.alpha,
        )
    }

    #[inline]
    fn multiply(self, color: ColorRgb32) -> Self {
        Color8A::new(mul(self.v, color.luminance()), self.alpha)
    }

    #[inline]
    fn dithered(self, x: usize, y: usize) -> Self {
        Color8A::new(dither_o8x8(x, y, self.v), self.alpha)
    }
}

// ============================================================================
// RGB565
// ============================================================================

impl ColorRgb16 {
    #[inline(always)]
    fn channels(self) -> (u8, u8, u8) {
        (rgb16_red(self.0), rgb16_green(self.0), rgb16_blue(self.0))
    }
}

impl Pixel for ColorRgb16 {
    const FORMAT: PixelFormat = PixelFormat::Rgb565;

    #[inline(always)]
    fn read(bytes: &[u8]) -> Self {
        ColorRgb16(u16::from_ne_bytes([bytes[0], bytes[1]]))
    }

    #[inline(always)]
    fn write(self, bytes: &mut [u8]) {
        bytes[..2].copy_from_slice(&self.0.to_ne_bytes());
    }

    #[inline]
    fn to_rgb32(self) -> ColorRgb32 {
        let (r, g, b) = self.channels();
        ColorRgb32::rgb(r, g, b)
    }

    #[inline]
    fn from_rgb32(color: ColorRgb32) -> Self {
        ColorRgb16::from_rgb(color.r, color.g, color.b)
    }

    #[inline]
    fn recolor(self, color: ColorRgb32) -> Self {
        Self::from_rgb32(color)
    }

    /// XORs the packed word. Not an exact per-channel inversion once the
    /// channels are widened, but bit-compatible with existing output.
    #[inline]
    fn inverted(self) -> Self {
        ColorRgb16(self.0 ^ 0xFFFF)
    }

    #[inline]
    fn blend(self, color: ColorRgb32, alpha: u8) -> Self {
        let (r, g, b) = self.channels();
        ColorRgb16::from_rgb(
            mix(r, color.r, alpha),
            mix(g, color.g, alpha),
            mix(b, color.b, alpha),
        )
    }

    #[inline]
    fn blend_premultiplied(self, color: ColorRgb32, alpha: u8) -> Self {
        let (r, g, b) = self.channels();
        ColorRgb16::from_rgb(
            mix_premultiplied(r, color.r, alpha),
            mix_premultiplied(g, color.g, alpha),
            mix_premultiplied(b, color.b, alpha),
        )
    }

    #[inline]
    fn multiply(self, color: ColorRgb32) -> Self {
        let (r, g, b) = self.channels();
        ColorRgb16::from_rgb(mul(r, color.r), mul(g, color.g), mul(b, color.b))
    }
}

// ============================================================================
// RGB24
// ============================================================================

impl Pixel for ColorRgb24 {
    const FORMAT: PixelFormat = PixelFormat::Rgb24;

    #[inline(always)]
    fn read(bytes: &[u8]) -> Self {
        ColorRgb24::new(bytes[0], bytes[1], bytes[2])
    }

    #[inline(always)]
    fn write(self, bytes: &mut [u8]) {
        bytes[0] = self.r;
        bytes[1] = self.g;
        bytes[2] = self.b;
    }

    #[inline]
    fn to_rgb32(self) -> ColorRgb32 {
        ColorRgb24::to_rgb32(self)
    }

    #[inline]
    fn from_rgb32(color: ColorRgb32) -> Self {
        color.to_rgb24()
    }

    #[inline]
    fn luminance(self) -> u8 {
        rgb_to_gray(self.r, self.g, self.b)
    }

    #[inline]
    fn recolor(self, color: ColorRgb32) -> Self {
        color.to_rgb24()
    }

    #[inline]
    fn inverted(self) -> Self {
        ColorRgb24::new(self.r ^ 0xFF, self.g ^ 0xFF, self.b ^ 0xFF)
    }

    #[inline]
    fn blend(self, color: ColorRgb32, alpha: u8) -> Self {
        ColorRgb24::new(
            mix(self.r, color.r, alpha),
            mix(self.g, color.g, alpha),
            mix(self.b, color.b, alpha),
        )
    }

    #[inline]
    fn blend_premultiplied(self, color: ColorRgb32, alpha: u8) -> Self {
        ColorRgb24::new(
            mix_premultiplied(self.r, color.r, alpha),
            mix_premultiplied(self.g, color.g, alpha),
            mix_premultiplied(self.b, color.b, alpha),
        )
    }

    #[inline]
    fn multiply(self, color: ColorRgb32) -> Self {
        ColorRgb24::new(
            mul(self.r, color.r),
            mul(self.g, color.g),
            mul(self.b, color.b),
        )
    }
}

// ============================================================================
// RGB32
// ============================================================================

impl Pixel for ColorRgb32 {
    const FORMAT: PixelFormat = PixelFormat::Rgb32;

    #[inline(always)]
    fn read(bytes: &[u8]) -> Self {
        ColorRgb32::new(bytes[0], bytes[1], bytes[2], bytes[3])
    }

    #[inline(always)]
    fn write(self, bytes: &mut [u8]) {
        bytes[0] = self.r;
        bytes[1] = self.g;
        bytes[2] = self.b;
        bytes[3] = self.alpha;
    }

    #[inline]
    fn to_rgb32(self) -> ColorRgb32 {
        self
    }

    #[inline]
    fn from_rgb32(color: ColorRgb32) -> Self {
        color
    }

    #[inline]
    fn luminance(self) -> u8 {
        ColorRgb32::luminance(self)
    }

    #[inline]
    fn alpha(self) -> u8 {
        self.alpha
    }

    #[inline]
    fn recolor(self, color: ColorRgb32) -> Self {
        color.with_alpha(self.alpha)
    }

    #[inline]
    fn inverted(self) -> Self {
        ColorRgb32::new(self.r ^ 0xFF, self.g ^ 0xFF, self.b ^ 0xFF, self.alpha)
    }

    #[inline]
    fn blend(self, color: ColorRgb32, alpha: u8) -> Self {
        ColorRgb32::new(
            mix(self.r, color.r, alpha),
            mix(self.g, color.g, alpha),
            mix(self.b, color.b, alpha),
            self.alpha,
        )
    }

    #[inline]
    fn blend_premultiplied(self, color: ColorRgb32, alpha: u8) -> Self {
        ColorRgb32::new(
            mix_premultiplied(self.r, color.r, alpha),
            mix_premultiplied(self.g, color.g, alpha),
            mix_premultiplied(self.b, color.b, alpha),
            self.alpha,
        )
    }

    #[inline]
    fn multiply(self, color: ColorRgb32) -> Self {
        ColorRgb32::new(
            mul(self.r, color.r),
            mul(self.g, color.g),
            mul(self.b, color.b),
            self.alpha,
        )
    }
}
