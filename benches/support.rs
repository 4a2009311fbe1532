//! Shared helpers for benchmarks

use blitbuffer::{BlitBuffer, ColorRgb32, PixelFormat, Rotation};

/// Kobo-class e-ink panel, portrait
pub const SCREEN: (usize, usize) = (1072, 1448);

/// A screen-sized surface with the given layout
#[allow(dead_code)]
pub fn screen(format: PixelFormat, rotation: Rotation) -> BlitBuffer<Vec<u8>> {
    BlitBuffer::alloc(SCREEN.0, SCREEN.1, format).with_rotation(rotation)
}

/// A `size`×`size` layer with varying color and alpha
#[allow(dead_code)]
pub fn layer(size: usize, format: PixelFormat) -> BlitBuffer<Vec<u8>> {
    let mut bb = BlitBuffer::alloc(size, size, format);
    for y in 0..size {
        for x in 0..size {
            let v = ((x * 7 + y * 3) & 0xFF) as u8;
            bb.set_pixel(x, y, ColorRgb32::new(v, v ^ 0x55, 0xFF - v, v | 0x0F));
        }
    }
    bb
}
