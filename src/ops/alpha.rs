//! Alpha-aware blits
//!
//! The source's own alpha channel drives the blend. Sources without one are
//! treated as opaque, so blitting them degrades to a converting copy. The
//! color blits instead use the source purely as a coverage mask for a
//! constant color.

use crate::buffer::BlitBuffer;
use crate::color::{div_255, Color8A, ColorRgb32, Pixel};
use crate::error::BlitError;
use crate::geometry::Rect;

use super::{alpha_blit_supported, incompatible, zip_pixels};

/// How a partially transparent source pixel is combined with the destination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AlphaMode {
    /// `dst·(255 − a) + src·a`
    Straight,
    /// `dst·(255 − a) + src·255`, source already multiplied by its alpha
    Premultiplied,
}

impl<B: AsRef<[u8]> + AsMut<[u8]>> BlitBuffer<B> {
    /// Composite the region at `(sx, sy)` of `src` over `rect`, weighting
    /// each pixel by the source's alpha.
    ///
    /// Only a fixed set of format pairs is implemented; others return
    /// [`BlitError::IncompatibleFormats`] without touching the destination.
    #[track_caller]
    pub fn alpha_blit_from<S: AsRef<[u8]>>(
        &mut self,
        src: &BlitBuffer<S>,
        rect: Rect,
        sx: usize,
        sy: usize,
    ) -> Result<(), BlitError> {
        self.alpha_composite("alpha_blit_from", src, rect, sx, sy, AlphaMode::Straight, false)
    }

    /// [`alpha_blit_from`](Self::alpha_blit_from), dithering luminance
    /// destinations at source coordinates.
    #[track_caller]
    pub fn dither_alpha_blit_from<S: AsRef<[u8]>>(
        &mut self,
        src: &BlitBuffer<S>,
        rect: Rect,
        sx: usize,
        sy: usize,
    ) -> Result<(), BlitError> {
        self.alpha_composite(
            "dither_alpha_blit_from",
            src,
            rect,
            sx,
            sy,
            AlphaMode::Straight,
            true,
        )
    }

    /// Composite a premultiplied-alpha source: only the destination is
    /// attenuated by the source alpha.
    #[track_caller]
    pub fn pmulalpha_blit_from<S: AsRef<[u8]>>(
        &mut self,
        src: &BlitBuffer<S>,
        rect: Rect,
        sx: usize,
        sy: usize,
    ) -> Result<(), BlitError> {
        self.alpha_composite(
            "pmulalpha_blit_from",
            src,
            rect,
            sx,
            sy,
            AlphaMode::Premultiplied,
            false,
        )
    }

    #[track_caller]
    pub fn dither_pmulalpha_blit_from<S: AsRef<[u8]>>(
        &mut self,
        src: &BlitBuffer<S>,
        rect: Rect,
        sx: usize,
        sy: usize,
    ) -> Result<(), BlitError> {
        self.alpha_composite(
            "dither_pmulalpha_blit_from",
            src,
            rect,
            sx,
            sy,
            AlphaMode::Premultiplied,
            true,
        )
    }

    /// Paint gray `color` through `src` used as a coverage mask.
    pub fn color_blit_from<S: AsRef<[u8]>>(
        &mut self,
        src: &BlitBuffer<S>,
        rect: Rect,
        sx: usize,
        sy: usize,
        color: Color8A,
    ) {
        self.color_blit_from_rgb32(src, rect, sx, sy, color.to_rgb32());
    }

    /// Paint `color` through `src` used as a coverage mask.
    ///
    /// Coverage is the source's alpha channel, or its luminance for formats
    /// without one, scaled by `color.alpha`. Any format pair is accepted.
    pub fn color_blit_from_rgb32<S: AsRef<[u8]>>(
        &mut self,
        src: &BlitBuffer<S>,
        rect: Rect,
        sx: usize,
        sy: usize,
        color: ColorRgb32,
    ) {
        tracing::trace!(?rect, sx, sy, %color, dst = %self.format(), src = %src.format(), "color_blit_from");
        if rect.is_empty() || color.alpha == 0 {
            return;
        }

        let scale = color.alpha as u32;
        with_pixel!(self.format(), |DP| with_pixel!(src.format(), |SP| {
            zip_pixels::<_, _, DP, SP>(self, src, rect, sx, sy, |d, s, _, _| {
                match div_255(s.coverage() as u32 * scale) as u8 {
                    0 => None,
                    0xFF => Some(d.recolor(color)),
                    a => Some(d.blend(color, a)),
                }
            })
        }))
    }

    #[track_caller]
    #[allow(clippy::too_many_arguments)]
    fn alpha_composite<S: AsRef<[u8]>>(
        &mut self,
        op: &'static str,
        src: &BlitBuffer<S>,
        rect: Rect,
        sx: usize,
        sy: usize,
        mode: AlphaMode,
        dither: bool,
    ) -> Result<(), BlitError> {
        tracing::trace!(op, ?rect, sx, sy, dst = %self.format(), src = %src.format(), "alpha blit");
        if !alpha_blit_supported(self.format(), src.format()) {
            return Err(incompatible(op, self.format(), src.format()));
        }
        if rect.is_empty() {
            return Ok(());
        }

        with_pixel!(self.format(), |DP| with_pixel!(src.format(), |SP| {
            zip_pixels::<_, _, DP, SP>(self, src, rect, sx, sy, |d, s, x, y| {
                let out = match s.alpha() {
                    0 => return None,
                    0xFF => s.convert::<DP>(),
                    a => match mode {
                        AlphaMode::Straight => d.blend(s.to_rgb32(), a),
                        AlphaMode::Premultiplied => d.blend_premultiplied(s.to_rgb32(), a),
                    },
                };
                Some(if dither { out.dithered(x, y) } else { out })
            })
        }));
        Ok(())
    }
}
