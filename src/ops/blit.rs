//! Copying blits: straight, dithered, add-blended and inverted

use crate::buffer::BlitBuffer;
use crate::color::Pixel;
use crate::error::BlitError;
use crate::geometry::Rect;

use super::{incompatible, zip_pixels};

impl<B: AsRef<[u8]>> BlitBuffer<B> {
    /// Copy the region at `(sx, sy)` of this surface into `rect` of `dst`,
    /// converting pixel formats as needed.
    ///
    /// Surfaces that share format and rotation are copied scanline by
    /// scanline, in a single copy when both regions are contiguous.
    pub fn blit_to<D>(&self, dst: &mut BlitBuffer<D>, rect: Rect, sx: usize, sy: usize)
    where
        D: AsRef<[u8]> + AsMut<[u8]>,
    {
        tracing::trace!(?rect, sx, sy, dst = %dst.format(), src = %self.format(), "blit_to");
        if rect.is_empty() {
            return;
        }

        if self.format() == dst.format() && self.rotation() == dst.rotation() {
            self.copy_rows(dst, rect, sx, sy);
            return;
        }

        with_pixel!(dst.format(), |DP| with_pixel!(self.format(), |SP| {
            zip_pixels::<_, _, DP, SP>(dst, self, rect, sx, sy, |_, s, _, _| Some(s.convert()))
        }))
    }

    /// Like [`blit_to`](Self::blit_to), but luminance destinations receive
    /// the source ordered-dithered to the 16-level palette. The dither
    /// pattern is anchored to source coordinates.
    pub fn dither_blit_to<D>(&self, dst: &mut BlitBuffer<D>, rect: Rect, sx: usize, sy: usize)
    where
        D: AsRef<[u8]> + AsMut<[u8]>,
    {
        if !dst.format().is_gray() {
            self.blit_to(dst, rect, sx, sy);
            return;
        }
        tracing::trace!(?rect, sx, sy, dst = %dst.format(), src = %self.format(), "dither_blit_to");
        if rect.is_empty() {
            return;
        }

        with_pixel!(dst.format(), |DP| with_pixel!(self.format(), |SP| {
            zip_pixels::<_, _, DP, SP>(dst, self, rect, sx, sy, |_, s, x, y| {
                Some(s.convert::<DP>().dithered(x, y))
            })
        }))
    }

    /// Same-format, same-rotation copy through the native rectangles.
    fn copy_rows<D>(&self, dst: &mut BlitBuffer<D>, rect: Rect, sx: usize, sy: usize)
    where
        D: AsRef<[u8]> + AsMut<[u8]>,
    {
        let src_rect = Rect::new(sx, sy, rect.w, rect.h);
        self.debug_check_rect(src_rect, "blit source");
        dst.debug_check_rect(rect, "blit destination");

        let bpp = self.format().bytes_per_pixel();
        let sphys = self.physical_rect(src_rect);
        let dphys = dst.physical_rect(rect);
        let (sstride, dstride) = (self.stride(), dst.stride());
        let row_len = sphys.w * bpp;
        let sdata = self.data();
        let ddata = dst.data_mut();

        let contiguous = sstride == dstride
            && row_len == sstride
            && sphys.x == 0
            && dphys.x == 0;
        if contiguous {
            tracing::debug!(rows = sphys.h, "contiguous blit");
            let len = sphys.h * sstride;
            let (s, d) = (sphys.y * sstride, dphys.y * dstride);
            ddata[d..d + len].copy_from_slice(&sdata[s..s + len]);
            return;
        }

        for row in 0..sphys.h {
            let s = (sphys.y + row) * sstride + sphys.x * bpp;
            let d = (dphys.y + row) * dstride + dphys.x * bpp;
            ddata[d..d + row_len].copy_from_slice(&sdata[s..s + row_len]);
        }
    }
}

impl<B: AsRef<[u8]> + AsMut<[u8]>> BlitBuffer<B> {
    /// Blend the region at `(sx, sy)` of `src` over `rect` with a uniform
    /// `alpha`. Both surfaces must share a format.
    #[track_caller]
    pub fn add_blit_from<S>(
        &mut self,
        src: &BlitBuffer<S>,
        rect: Rect,
        sx: usize,
        sy: usize,
        alpha: u8,
    ) -> Result<(), BlitError>
    where
        S: AsRef<[u8]>,
    {
        tracing::trace!(?rect, sx, sy, alpha, dst = %self.format(), src = %src.format(), "add_blit_from");
        if self.format() != src.format() {
            return Err(incompatible("add_blit_from", self.format(), src.format()));
        }
        match alpha {
            0 => {}
            0xFF => src.blit_to(self, rect, sx, sy),
            _ => with_pixel!(self.format(), |P| {
                zip_pixels::<_, _, P, P>(self, src, rect, sx, sy, |d, s, _, _| {
                    Some(d.blend(s.to_rgb32(), alpha))
                })
            }),
        }
        Ok(())
    }

    /// Copy the region at `(sx, sy)` of `src` into `rect` with every color
    /// channel inverted. Both surfaces must share a format.
    #[track_caller]
    pub fn invert_blit_from<S>(
        &mut self,
        src: &BlitBuffer<S>,
        rect: Rect,
        sx: usize,
        sy: usize,
    ) -> Result<(), BlitError>
    where
        S: AsRef<[u8]>,
    {
        tracing::trace!(?rect, sx, sy, dst = %self.format(), src = %src.format(), "invert_blit_from");
        if self.format() != src.format() {
            return Err(incompatible("invert_blit_from", self.format(), src.format()));
        }
        with_pixel!(self.format(), |P| {
            zip_pixels::<_, _, P, P>(self, src, rect, sx, sy, |_, s, _, _| Some(s.inverted()))
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{Color8, ColorRgb24, ColorRgb32};
    use crate::format::PixelFormat;
    use crate::rotation::Rotation;

    fn ramp(w: usize, h: usize, format: PixelFormat) -> BlitBuffer<Vec<u8>> {
        let mut bb = BlitBuffer::alloc(w, h, format);
        for y in 0..h {
            for x in 0..w {
                bb.set_pixel(x, y, ColorRgb32::gray((x * 16 + y * 3) as u8));
            }
        }
        bb
    }

    #[test]
    fn test_same_format_copy_matches_per_pixel() {
        let src = ramp(8, 6, PixelFormat::Gray8);
        let mut dst = BlitBuffer::alloc(10, 10, PixelFormat::Gray8);
        src.blit_to(&mut dst, Rect::new(1, 2, 5, 3), 2, 1);
        for j in 0..3 {
            for i in 0..5 {
                assert_eq!(dst.luminance(1 + i, 2 + j), src.luminance(2 + i, 1 + j));
            }
        }
        assert_eq!(dst.luminance(0, 0), 0);
        assert_eq!(dst.luminance(6, 2), 0);
    }

    #[test]
    fn test_contiguous_copy() {
        let src = ramp(4, 4, PixelFormat::Rgb24);
        let mut dst = BlitBuffer::alloc(4, 4, PixelFormat::Rgb24);
        src.blit_to(&mut dst, Rect::sized(4, 4), 0, 0);
        assert_eq!(dst.data(), src.data());
    }

    #[test]
    fn test_rotated_destination_converts() {
        let src = ramp(3, 2, PixelFormat::Gray8);
        let mut dst = BlitBuffer::alloc(2, 3, PixelFormat::Rgb24).with_rotation(Rotation::Clockwise);
        assert_eq!((dst.width(), dst.height()), (3, 2));
        src.blit_to(&mut dst, Rect::sized(3, 2), 0, 0);
        for y in 0..2 {
            for x in 0..3 {
                let v = src.luminance(x, y);
                assert_eq!(dst.pixel::<ColorRgb24>(x, y), Some(ColorRgb24::new(v, v, v)));
            }
        }
    }

    #[test]
    fn test_same_rotation_fast_path_matches_slow_path() {
        for rotation in Rotation::ALL {
            let src = ramp(6, 6, PixelFormat::Gray8).with_rotation(rotation);
            let mut fast = BlitBuffer::alloc(6, 6, PixelFormat::Gray8).with_rotation(rotation);
            src.blit_to(&mut fast, Rect::new(1, 0, 3, 4), 2, 1);

            let mut slow = BlitBuffer::alloc(6, 6, PixelFormat::Gray8).with_rotation(rotation);
            with_pixel!(PixelFormat::Gray8, |P| zip_pixels::<_, _, P, P>(
                &mut slow,
                &src,
                Rect::new(1, 0, 3, 4),
                2,
                1,
                |_, s, _, _| Some(s)
            ));
            assert_eq!(fast.data(), slow.data(), "rotation {:?}", rotation);
        }
    }

    #[test]
    fn test_dither_blit_lands_on_palette() {
        let src = ramp(8, 8, PixelFormat::Rgb32);
        let mut dst = BlitBuffer::alloc(8, 8, PixelFormat::Gray8);
        src.dither_blit_to(&mut dst, Rect::sized(8, 8), 0, 0);
        assert!(dst.data().iter().all(|&b| b % 17 == 0));
    }

    #[test]
    fn test_add_blit_rejects_mixed_formats() {
        let src = BlitBuffer::alloc(2, 2, PixelFormat::Rgb24);
        let mut dst = BlitBuffer::alloc(2, 2, PixelFormat::Gray8);
        let err = dst
            .add_blit_from(&src, Rect::sized(2, 2), 0, 0, 0x80)
            .unwrap_err();
        assert!(matches!(err, BlitError::IncompatibleFormats { .. }));
    }

    #[test]
    fn test_add_blit_opaque_uses_source_offset() {
        let src = ramp(4, 4, PixelFormat::Gray8);
        let mut dst = BlitBuffer::alloc(4, 4, PixelFormat::Gray8);
        dst.add_blit_from(&src, Rect::sized(2, 2), 2, 1, 0xFF).unwrap();
        assert_eq!(dst.pixel::<Color8>(0, 0), Some(Color8(src.luminance(2, 1))));
        assert_eq!(dst.pixel::<Color8>(1, 1), Some(Color8(src.luminance(3, 2))));
    }

    #[test]
    fn test_invert_blit() {
        let src = ramp(2, 2, PixelFormat::Gray8);
        let mut dst = BlitBuffer::alloc(2, 2, PixelFormat::Gray8);
        dst.invert_blit_from(&src, Rect::sized(2, 2), 0, 0).unwrap();
        for (d, s) in dst.data().iter().zip(src.data()) {
            assert_eq!(*d, s ^ 0xFF);
        }
    }
}
