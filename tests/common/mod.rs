//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use blitbuffer::{BlitBuffer, ColorRgb32, PixelFormat, Rect, Rotation};

/// Owned surface whose *logical* size is `width × height` under `rotation`
pub fn surface(
    width: usize,
    height: usize,
    format: PixelFormat,
    rotation: Rotation,
) -> BlitBuffer<Vec<u8>> {
    let (nw, nh) = rotation.logical_size(width, height);
    BlitBuffer::alloc(nw, nh, format).with_rotation(rotation)
}

/// Surface filled with a gray ramp where every pixel of an 8-bit format is
/// distinct (for surfaces up to 256 pixels).
pub fn ramp(width: usize, height: usize, format: PixelFormat) -> BlitBuffer<Vec<u8>> {
    let mut bb = BlitBuffer::alloc(width, height, format);
    for y in 0..height {
        for x in 0..width {
            bb.set_pixel(x, y, ColorRgb32::gray(((y * width + x) % 256) as u8));
        }
    }
    bb
}

/// Surface with a distinct color per pixel, alpha varying too
pub fn colorful(width: usize, height: usize, format: PixelFormat) -> BlitBuffer<Vec<u8>> {
    let mut bb = BlitBuffer::alloc(width, height, format);
    for y in 0..height {
        for x in 0..width {
            let c = ColorRgb32::new(
                (x * 37 + y * 11) as u8,
                (x * 5 + y * 71) as u8,
                (x * 97 + y * 3) as u8,
                (x * 23 + y * 41) as u8,
            );
            bb.set_pixel(x, y, c);
        }
    }
    bb
}

/// Every pixel in logical order
pub fn snapshot<B: AsRef<[u8]>>(bb: &BlitBuffer<B>) -> Vec<ColorRgb32> {
    let mut out = Vec::with_capacity(bb.width() * bb.height());
    for y in 0..bb.height() {
        for x in 0..bb.width() {
            out.push(bb.get_pixel(x, y));
        }
    }
    out
}

/// Assert that every pixel outside `rect` matches `before`
pub fn assert_outside_unchanged<B: AsRef<[u8]>>(
    bb: &BlitBuffer<B>,
    before: &[ColorRgb32],
    rect: Rect,
) {
    for y in 0..bb.height() {
        for x in 0..bb.width() {
            if rect.contains(x, y) {
                continue;
            }
            assert_eq!(
                bb.get_pixel(x, y),
                before[y * bb.width() + x],
                "pixel ({}, {}) outside {:?} changed ({}, rotation {:?})",
                x,
                y,
                rect,
                bb.format(),
                bb.rotation()
            );
        }
    }
}

/// Every (format, rotation) combination
pub fn all_layouts() -> impl Iterator<Item = (PixelFormat, Rotation)> {
    PixelFormat::ALL
        .into_iter()
        .flat_map(|f| Rotation::ALL.into_iter().map(move |r| (f, r)))
}

/// Every ordered (destination, source) format pair
pub fn all_pairs() -> impl Iterator<Item = (PixelFormat, PixelFormat)> {
    PixelFormat::ALL
        .into_iter()
        .flat_map(|d| PixelFormat::ALL.into_iter().map(move |s| (d, s)))
}
