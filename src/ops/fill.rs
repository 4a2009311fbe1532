//! Single-surface rectangle operators

use crate::buffer::BlitBuffer;
use crate::color::{Color8, Color8A, ColorRgb24, ColorRgb32, Pixel};
use crate::error::BlitError;
use crate::format::PixelFormat;
use crate::geometry::Rect;

use super::unsupported;

impl<B: AsRef<[u8]> + AsMut<[u8]>> BlitBuffer<B> {
    /// Fill the whole surface with gray `v`.
    pub fn fill(&mut self, v: u8) {
        self.fill_rect(self.bounds(), v);
    }

    /// Fill `rect` with gray `v`. Stored alpha is preserved.
    pub fn fill_rect(&mut self, rect: Rect, v: u8) {
        tracing::trace!(?rect, v, format = %self.format(), "fill_rect");
        if rect.is_empty() {
            return;
        }
        self.debug_check_rect(rect, "fill_rect");

        match self.format() {
            // Every byte of the pixel holds the value
            PixelFormat::Gray8 | PixelFormat::Rgb24 => self.fill_bytes(rect, v),
            format => with_pixel!(format, |P| {
                let color = ColorRgb32::gray(v);
                self.map_physical::<P>(rect, |p| p.recolor(color))
            }),
        }
    }

    /// Overwrite `rect` with `color`, alpha included.
    ///
    /// Gray surfaces have no RGB storage and are rejected.
    #[track_caller]
    pub fn fill_rect_rgb32(&mut self, rect: Rect, color: ColorRgb32) -> Result<(), BlitError> {
        tracing::trace!(?rect, %color, format = %self.format(), "fill_rect_rgb32");
        if self.format().is_gray() {
            return Err(unsupported("fill_rect_rgb32", self.format()));
        }
        if rect.is_empty() {
            return Ok(());
        }
        self.debug_check_rect(rect, "fill_rect_rgb32");

        with_pixel!(self.format(), |P| {
            let pixel = P::from_rgb32(color);
            self.map_physical::<P>(rect, |_| pixel)
        });
        Ok(())
    }

    /// Blend a gray value over `rect` with `color.alpha`.
    pub fn blend_rect(&mut self, rect: Rect, color: Color8A) {
        self.blend_rect_rgb32(rect, color.to_rgb32());
    }

    /// Blend `color` over `rect` with `color.alpha`; destination alpha kept.
    pub fn blend_rect_rgb32(&mut self, rect: Rect, color: ColorRgb32) {
        tracing::trace!(?rect, %color, format = %self.format(), "blend_rect");
        if rect.is_empty() || color.alpha == 0 {
            return;
        }
        self.debug_check_rect(rect, "blend_rect");

        let alpha = color.alpha;
        with_pixel!(self.format(), |P| {
            if alpha == 0xFF {
                self.map_physical::<P>(rect, |p| p.recolor(color))
            } else {
                self.map_physical::<P>(rect, |p| p.blend(color, alpha))
            }
        })
    }

    /// Multiply every channel in `rect` by `color`.
    ///
    /// Gray surfaces multiply by the color's luminance.
    pub fn multiply_rect_rgb(&mut self, rect: Rect, color: ColorRgb24) {
        tracing::trace!(?rect, ?color, format = %self.format(), "multiply_rect_rgb");
        if rect.is_empty() {
            return;
        }
        self.debug_check_rect(rect, "multiply_rect_rgb");

        let color = color.to_rgb32();
        with_pixel!(self.format(), |P| self
            .map_physical::<P>(rect, |p| p.multiply(color)))
    }

    /// Multiply `rect` by `color`, then blend the product over the original
    /// pixels with `color.alpha`.
    pub fn multiply_rect_rgb32(&mut self, rect: Rect, color: ColorRgb32) {
        tracing::trace!(?rect, %color, format = %self.format(), "multiply_rect_rgb32");
        if rect.is_empty() || color.alpha == 0 {
            return;
        }
        self.debug_check_rect(rect, "multiply_rect_rgb32");

        let alpha = color.alpha;
        with_pixel!(self.format(), |P| {
            if alpha == 0xFF {
                self.map_physical::<P>(rect, |p| p.multiply(color))
            } else {
                self.map_physical::<P>(rect, |p| p.blend(p.multiply(color).to_rgb32(), alpha))
            }
        })
    }

    /// Invert the color channels in `rect`.
    pub fn invert_rect(&mut self, rect: Rect) {
        tracing::trace!(?rect, format = %self.format(), "invert_rect");
        if rect.is_empty() {
            return;
        }
        self.debug_check_rect(rect, "invert_rect");

        with_pixel!(self.format(), |P| self.map_physical::<P>(rect, P::inverted))
    }

    /// Paint diagonal stripes `stripe_width` pixels wide over `rect`.
    ///
    /// A pixel at local position (i, j) is painted when
    /// `(i + j) mod (2·stripe_width) < stripe_width`, so the pattern is
    /// anchored to the rectangle, not the surface.
    pub fn hatch_rect(&mut self, rect: Rect, stripe_width: usize, color: Color8, alpha: u8) {
        tracing::trace!(?rect, stripe_width, ?color, alpha, "hatch_rect");
        if rect.is_empty() || stripe_width == 0 || alpha == 0 {
            return;
        }
        self.debug_check_rect(rect, "hatch_rect");

        let color = ColorRgb32::gray(color.0);
        with_pixel!(self.format(), |P| self.hatch::<P>(rect, stripe_width, color, alpha))
    }

    fn hatch<P: Pixel>(&mut self, rect: Rect, stripe_width: usize, color: ColorRgb32, alpha: u8) {
        let period = 2 * stripe_width;
        for j in 0..rect.h {
            for i in 0..rect.w {
                if (i + j) % period >= stripe_width {
                    continue;
                }
                let (x, y) = (rect.x + i, rect.y + j);
                let p: P = self.read_at(x, y);
                let out = if alpha == 0xFF {
                    p.recolor(color)
                } else {
                    p.blend(color, alpha)
                };
                self.write_at(x, y, out);
            }
        }
    }
}
