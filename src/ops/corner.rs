//! Rounded-corner painting
//!
//! Paints the quarter-annulus between radius `r` and `r − bw` into each of
//! the four corners of a box. Both circles are traced with the integer
//! midpoint algorithm in lock step over one octant; each column of the
//! annulus is then mirrored into the other octant and into all four corners.
//!
//! The anti-aliased variant instead samples every pixel of one quadrant on a
//! 4×4 grid against the circles of radius `r + ½` and `r − bw + ½` and blends
//! the color in by the covered fraction.

use crate::buffer::BlitBuffer;
use crate::color::{ColorRgb32, Pixel};
use crate::geometry::Rect;

/// Sub-samples per axis for anti-aliased coverage
const SUBSAMPLES: isize = 4;

/// Midpoint circle state for one radius, walking the octant `x ≤ y`.
struct Octant {
    y: isize,
    d: isize,
}

impl Octant {
    fn new(radius: isize) -> Self {
        Self {
            y: radius,
            d: 1 - radius,
        }
    }

    /// Move to column `x + 1`.
    fn advance(&mut self, x: isize) {
        if self.d < 0 {
            self.d += 2 * x + 3;
        } else {
            self.d += 2 * (x - self.y) + 5;
            self.y -= 1;
        }
    }
}

impl<B: AsRef<[u8]> + AsMut<[u8]>> BlitBuffer<B> {
    /// Paint rounded corners of radius `r` and border width `bw` with gray
    /// `c` inside `rect`.
    ///
    /// A no-op when `r` is zero or the radius does not fit (`2r > w` or
    /// `2r > h`). `bw` is clamped to `r`; `bw == r` fills the quarter discs.
    /// Pixels that land outside the surface are skipped.
    pub fn paint_rounded_corner(&mut self, rect: Rect, bw: usize, r: usize, c: u8) {
        tracing::trace!(?rect, bw, r, c, "paint_rounded_corner");
        let Some(bw) = corner_border(rect, bw, r) else {
            return;
        };

        with_pixel!(self.format(), |P| self.rounded_corner::<P>(
            rect,
            bw,
            r,
            P::from_gray(c)
        ))
    }

    /// Like [`paint_rounded_corner`](Self::paint_rounded_corner), with the
    /// edge pixels of both arcs blended in by their fractional coverage.
    pub fn paint_rounded_corner_antialiased(&mut self, rect: Rect, bw: usize, r: usize, c: u8) {
        tracing::trace!(?rect, bw, r, c, "paint_rounded_corner_antialiased");
        let Some(bw) = corner_border(rect, bw, r) else {
            return;
        };

        let color = ColorRgb32::gray(c);
        with_pixel!(self.format(), |P| self.rounded_corner_aa::<P>(rect, bw, r, color))
    }

    fn rounded_corner_aa<P: Pixel>(&mut self, rect: Rect, bw: usize, r: usize, color: ColorRgb32) {
        let r = r as isize;
        let inner_r = r - bw as isize;
        let has_inner = inner_r > 0;

        let left = (rect.x as isize) + r;
        let top = (rect.y as isize) + r;
        let right = (rect.x + rect.w) as isize - r - 1;
        let bottom = (rect.y + rect.h) as isize - r - 1;

        // Squared radii in units of 1/(2·SUBSAMPLES) pixel
        let outer_lim = (SUBSAMPLES * (2 * r + 1)).pow(2);
        let inner_lim = (SUBSAMPLES * (2 * inner_r + 1)).pow(2);
        let full = (SUBSAMPLES * SUBSAMPLES) as u32;
        let solid = P::from_rgb32(color);

        for dy in 0..=r {
            for dx in 0..=r {
                let mut covered = 0u32;
                for j in 0..SUBSAMPLES {
                    let sy = 2 * SUBSAMPLES * dy + 2 * j + 1 - SUBSAMPLES;
                    for i in 0..SUBSAMPLES {
                        let sx = 2 * SUBSAMPLES * dx + 2 * i + 1 - SUBSAMPLES;
                        let d = sx * sx + sy * sy;
                        if d <= outer_lim && (!has_inner || d > inner_lim) {
                            covered += 1;
                        }
                    }
                }
                if covered == 0 {
                    continue;
                }

                let points = [
                    (left - dx, top - dy),
                    (right + dx, top - dy),
                    (left - dx, bottom + dy),
                    (right + dx, bottom + dy),
                ];
                if covered == full {
                    for (x, y) in points {
                        self.put_clamped(x, y, solid);
                    }
                } else {
                    let alpha = (covered * 0xFF / full) as u8;
                    for (x, y) in points {
                        self.blend_clamped::<P>(x, y, color, alpha);
                    }
                }
            }
        }
    }

    fn rounded_corner<P: Pixel>(&mut self, rect: Rect, bw: usize, r: usize, pixel: P) {
        let r = r as isize;
        let inner_r = r - bw as isize;
        let has_inner = inner_r > 0;

        let left = (rect.x as isize) + r;
        let top = (rect.y as isize) + r;
        let right = (rect.x + rect.w) as isize - r - 1;
        let bottom = (rect.y + rect.h) as isize - r - 1;

        let mut plot = |dx: isize, dy: isize| {
            self.put_clamped(left - dx, top - dy, pixel);
            self.put_clamped(right + dx, top - dy, pixel);
            self.put_clamped(left - dx, bottom + dy, pixel);
            self.put_clamped(right + dx, bottom + dy, pixel);
        };

        let mut outer = Octant::new(r);
        let mut inner = Octant::new(inner_r);
        let mut x = 0;
        while x <= outer.y {
            let lo = if has_inner && x <= inner.y {
                inner.y + 1
            } else {
                x
            };
            for t in lo..=outer.y {
                plot(x, t);
                plot(t, x);
            }

            outer.advance(x);
            if has_inner {
                inner.advance(x);
            }
            x += 1;
        }
    }
}

/// Effective border width, or `None` when nothing would be painted.
///
/// The radius must fit twice into both sides; the border is clamped to it.
fn corner_border(rect: Rect, bw: usize, r: usize) -> Option<usize> {
    if r == 0 || r > rect.w / 2 || r > rect.h / 2 {
        return None;
    }
    match bw.min(r) {
        0 => None,
        bw => Some(bw),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::PixelFormat;

    fn painted(bb: &BlitBuffer<Vec<u8>>) -> usize {
        bb.data().iter().filter(|&&b| b != 0).count()
    }

    #[test]
    fn test_corner_points() {
        let mut bb = BlitBuffer::alloc(40, 30, PixelFormat::Gray8);
        bb.paint_rounded_corner(Rect::sized(40, 30), 3, 10, 0xFF);

        for (x, y) in [(0, 10), (10, 0), (39, 19), (29, 29), (0, 19)] {
            assert_eq!(bb.luminance(x, y), 0xFF, "({}, {}) should be painted", x, y);
        }
        for (x, y) in [(0, 0), (10, 10), (20, 15), (39, 0), (39, 29)] {
            assert_eq!(bb.luminance(x, y), 0, "({}, {}) should be clear", x, y);
        }
    }

    #[test]
    fn test_corners_are_symmetric() {
        let mut bb = BlitBuffer::alloc(24, 24, PixelFormat::Gray8);
        bb.paint_rounded_corner(Rect::sized(24, 24), 2, 8, 0xFF);
        for y in 0..24 {
            for x in 0..24 {
                let v = bb.luminance(x, y);
                assert_eq!(v, bb.luminance(23 - x, y), "mirror x at ({}, {})", x, y);
                assert_eq!(v, bb.luminance(x, 23 - y), "mirror y at ({}, {})", x, y);
                assert_eq!(v, bb.luminance(y, x), "transpose at ({}, {})", x, y);
            }
        }
    }

    #[test]
    fn test_radius_too_large_is_noop() {
        let mut bb = BlitBuffer::alloc(10, 10, PixelFormat::Gray8);
        bb.paint_rounded_corner(Rect::sized(10, 10), 2, 6, 0xFF);
        bb.paint_rounded_corner(Rect::sized(10, 10), 2, 0, 0xFF);
        assert_eq!(painted(&bb), 0);
    }

    #[test]
    fn test_full_border_width_fills_quarter_discs() {
        let mut bb = BlitBuffer::alloc(10, 10, PixelFormat::Gray8);
        bb.paint_rounded_corner(Rect::sized(10, 10), 99, 5, 0xFF);
        // Disc centres are painted when bw is clamped to r
        assert_eq!(bb.luminance(5, 5), 0xFF);
        assert_eq!(bb.luminance(4, 4), 0xFF);
        assert_eq!(bb.luminance(0, 0), 0);
    }

    #[test]
    fn test_rect_near_edge_is_clamped() {
        let mut bb = BlitBuffer::alloc(12, 12, PixelFormat::Rgb24);
        // Right half of the box hangs off the surface
        bb.paint_rounded_corner(Rect::new(6, 0, 12, 12), 2, 5, 0x80);
        assert!(painted(&bb) > 0);
    }

    #[test]
    fn test_antialiased_edges_are_partial() {
        let mut bb = BlitBuffer::alloc(40, 30, PixelFormat::Gray8);
        bb.paint_rounded_corner_antialiased(Rect::sized(40, 30), 3, 10, 0xFF);

        // Middle of the band is solid, far corner and box centre untouched
        assert_eq!(bb.luminance(10, 1), 0xFF);
        assert_eq!(bb.luminance(0, 0), 0);
        assert_eq!(bb.luminance(20, 15), 0);
        // (7, 8) from the top-left centre straddles the outer circle
        let edge = bb.luminance(10 - 7, 10 - 8);
        assert!(edge > 0 && edge < 0xFF, "edge pixel gave {}", edge);

        let partial = bb.data().iter().filter(|&&b| b != 0 && b != 0xFF).count();
        assert!(partial > 0);
    }

    #[test]
    fn test_antialiased_radius_too_large_is_noop() {
        let mut bb = BlitBuffer::alloc(10, 10, PixelFormat::Gray8);
        bb.paint_rounded_corner_antialiased(Rect::sized(10, 10), 2, 6, 0xFF);
        bb.paint_rounded_corner_antialiased(Rect::sized(10, 10), 0, 3, 0xFF);
        assert_eq!(painted(&bb), 0);
    }

    #[test]
    fn test_huge_radius_does_not_overflow() {
        let mut bb = BlitBuffer::alloc(10, 10, PixelFormat::Gray8);
        bb.paint_rounded_corner(Rect::sized(10, 10), 2, usize::MAX, 0xFF);
        bb.paint_rounded_corner_antialiased(Rect::sized(10, 10), 2, usize::MAX, 0xFF);
        assert_eq!(painted(&bb), 0);
    }
}
