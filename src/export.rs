//! Conversion of surfaces to RGBA8 images

use image::RgbaImage;

use crate::buffer::BlitBuffer;

/// Read a surface in logical orientation into tightly packed RGBA8.
///
/// Gray formats are replicated into the color channels; formats without
/// alpha come out opaque.
pub fn to_rgba8<B: AsRef<[u8]>>(surface: &BlitBuffer<B>) -> Vec<u8> {
    let (w, h) = (surface.width(), surface.height());
    let mut rgba = Vec::with_capacity(w * h * 4);
    for y in 0..h {
        for x in 0..w {
            let c = surface.get_pixel(x, y);
            rgba.extend_from_slice(&[c.r, c.g, c.b, c.alpha]);
        }
    }
    rgba
}

/// Wrap [`to_rgba8`] output in an [`RgbaImage`].
///
/// `None` only if the surface is too large for the image crate's `u32`
/// dimensions.
pub fn to_image<B: AsRef<[u8]>>(surface: &BlitBuffer<B>) -> Option<RgbaImage> {
    let width = u32::try_from(surface.width()).ok()?;
    let height = u32::try_from(surface.height()).ok()?;
    RgbaImage::from_raw(width, height, to_rgba8(surface))
}
