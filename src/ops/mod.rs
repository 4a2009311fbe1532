//! Compositing operators
//!
//! Operators are inherent methods on [`BlitBuffer`], grouped by file:
//!
//! - `fill`: single-surface rectangle operators (fill, blend, multiply,
//!   invert, hatch)
//! - `corner`: rounded-corner annulus painting
//! - `blit`: straight and dithered copies, add-blend and invert blits
//! - `alpha`: alpha, premultiplied-alpha and color-mask blits
//!
//! Every operator takes a logical rectangle in destination space. Two-surface
//! operators also take the source-space origin `(sx, sy)` of the region read.
//! Geometry is trusted: callers clip before calling.

mod alpha;
mod blit;
mod corner;
mod fill;

use std::panic::Location;

use crate::buffer::BlitBuffer;
use crate::color::Pixel;
use crate::error::BlitError;
use crate::format::PixelFormat;
use crate::geometry::Rect;

/// Walk `rect` of `dst` and the same-sized region of `src` at `(sx, sy)` in
/// lock step, row by row.
///
/// `f` receives the destination pixel, the source pixel and the source
/// coordinates, and returns the value to store (or `None` to leave the
/// destination pixel alone).
pub(crate) fn zip_pixels<D, S, DP, SP>(
    dst: &mut BlitBuffer<D>,
    src: &BlitBuffer<S>,
    rect: Rect,
    sx: usize,
    sy: usize,
    mut f: impl FnMut(DP, SP, usize, usize) -> Option<DP>,
) where
    D: AsRef<[u8]> + AsMut<[u8]>,
    S: AsRef<[u8]>,
    DP: Pixel,
    SP: Pixel,
{
    debug_assert_eq!(DP::FORMAT, dst.format());
    debug_assert_eq!(SP::FORMAT, src.format());
    dst.debug_check_rect(rect, "destination");
    src.debug_check_rect(Rect::new(sx, sy, rect.w, rect.h), "source");

    let dmap = dst.address_map();
    let smap = src.address_map();
    let dbpp = DP::FORMAT.bytes_per_pixel();
    let sbpp = SP::FORMAT.bytes_per_pixel();
    let sdata = src.data();
    let ddata = dst.data_mut();

    for j in 0..rect.h {
        let (dy, src_y) = (rect.y + j, sy + j);
        for i in 0..rect.w {
            let src_x = sx + i;
            let doff = dmap.offset(rect.x + i, dy);
            let soff = smap.offset(src_x, src_y);
            let d = DP::read(&ddata[doff..doff + dbpp]);
            let s = SP::read(&sdata[soff..soff + sbpp]);
            if let Some(out) = f(d, s, src_x, src_y) {
                out.write(&mut ddata[doff..doff + dbpp]);
            }
        }
    }
}

/// Build an [`BlitError::IncompatibleFormats`] and log it with the location
/// of the public operator's caller.
#[track_caller]
pub(crate) fn incompatible(op: &'static str, dst: PixelFormat, src: PixelFormat) -> BlitError {
    let caller = Location::caller();
    tracing::error!(op, %dst, %src, %caller, "incompatible formats");
    BlitError::IncompatibleFormats { op, dst, src }
}

#[track_caller]
pub(crate) fn unsupported(op: &'static str, format: PixelFormat) -> BlitError {
    let caller = Location::caller();
    tracing::error!(op, %format, %caller, "unsupported format");
    BlitError::UnsupportedFormat { op, format }
}

/// Source formats each destination accepts in the alpha-aware blits
pub(crate) fn alpha_blit_supported(dst: PixelFormat, src: PixelFormat) -> bool {
    use PixelFormat::*;
    matches!(
        (dst, src),
        (Gray8, _)
            | (Gray8A, Gray8A | Rgb565 | Rgb24 | Rgb32)
            | (Rgb565, Gray8 | Gray8A | Rgb565 | Rgb32)
            | (Rgb24, Rgb24)
            | (Rgb32, Gray8 | Gray8A | Rgb24 | Rgb32)
    )
}
