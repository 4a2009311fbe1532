//! The surface descriptor
//!
//! A [`BlitBuffer`] describes a rectangular pixel buffer over storage it
//! borrows or owns: dimensions, strides, format tag and rotation. It never
//! reallocates its storage; operators only read and write through it for
//! the duration of one call.

use std::fmt;

use crate::color::{ColorRgb32, Pixel};
use crate::error::BlitError;
use crate::format::PixelFormat;
use crate::geometry::Rect;
use crate::rotation::{AddressMap, Rotation};

/// A pixel surface over caller-supplied storage.
///
/// `B` is anything that derefs to bytes: `&mut [u8]` for a framebuffer the
/// caller owns, `&[u8]` for a read-only blit source, `Vec<u8>` for an owned
/// scratch surface. Mutating operators require `B: AsMut<[u8]>`.
///
/// Width and height passed to constructors are the *native* (unrotated)
/// dimensions. [`width`](Self::width) and [`height`](Self::height) report the
/// logical dimensions, which swap for odd rotations.
pub struct BlitBuffer<B> {
    data: B,
    width: usize,
    height: usize,
    pixel_stride: usize,
    stride: usize,
    format: PixelFormat,
    rotation: Rotation,
}

impl<B: AsRef<[u8]>> BlitBuffer<B> {
    /// Surface with tightly packed scanlines.
    pub fn new(
        data: B,
        width: usize,
        height: usize,
        format: PixelFormat,
    ) -> Result<Self, BlitError> {
        Self::with_pixel_stride(data, width, height, width, format)
    }

    /// Surface whose scanlines are `pixel_stride` pixels apart.
    pub fn with_pixel_stride(
        data: B,
        width: usize,
        height: usize,
        pixel_stride: usize,
        format: PixelFormat,
    ) -> Result<Self, BlitError> {
        let stride = pixel_stride * format.bytes_per_pixel();
        Self::from_parts(data, width, height, pixel_stride, stride, format)
    }

    /// Surface from a full descriptor.
    ///
    /// Checks `stride >= pixel_stride·bpp >= width·bpp` and that `data`
    /// covers every addressable pixel.
    pub fn from_parts(
        data: B,
        width: usize,
        height: usize,
        pixel_stride: usize,
        stride: usize,
        format: PixelFormat,
    ) -> Result<Self, BlitError> {
        let bpp = format.bytes_per_pixel();
        if pixel_stride < width {
            return Err(BlitError::InvalidStride {
                stride: pixel_stride * bpp,
                min: width * bpp,
            });
        }
        if stride < pixel_stride * bpp {
            return Err(BlitError::InvalidStride {
                stride,
                min: pixel_stride * bpp,
            });
        }

        let needed = if height == 0 || width == 0 {
            0
        } else {
            stride * (height - 1) + width * bpp
        };
        let actual = data.as_ref().len();
        if actual < needed {
            return Err(BlitError::BufferTooSmall { needed, actual });
        }

        Ok(Self {
            data,
            width,
            height,
            pixel_stride,
            stride,
            format,
            rotation: Rotation::Upright,
        })
    }

    /// Builder-style rotation setter
    pub fn with_rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn set_rotation(&mut self, rotation: Rotation) {
        self.rotation = rotation;
    }

    #[inline]
    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    #[inline]
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Logical width (native height when the rotation is odd)
    #[inline]
    pub fn width(&self) -> usize {
        self.rotation.logical_size(self.width, self.height).0
    }

    /// Logical height (native width when the rotation is odd)
    #[inline]
    pub fn height(&self) -> usize {
        self.rotation.logical_size(self.width, self.height).1
    }

    #[inline]
    pub fn native_width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn native_height(&self) -> usize {
        self.height
    }

    /// Pixels from the start of one scanline to the next
    #[inline]
    pub fn pixel_stride(&self) -> usize {
        self.pixel_stride
    }

    /// Bytes from the start of one scanline to the next
    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// The whole surface as a logical rectangle
    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::sized(self.width(), self.height())
    }

    #[inline]
    pub fn data(&self) -> &[u8] {
        self.data.as_ref()
    }

    /// Release the storage
    pub fn into_inner(self) -> B {
        self.data
    }

    /// Read-only view sharing this surface's storage and rotation
    pub fn view(&self) -> BlitBuffer<&[u8]> {
        BlitBuffer {
            data: self.data.as_ref(),
            width: self.width,
            height: self.height,
            pixel_stride: self.pixel_stride,
            stride: self.stride,
            format: self.format,
            rotation: self.rotation,
        }
    }

    /// Logical-to-byte-offset mapping for the current rotation
    #[inline]
    pub fn address_map(&self) -> AddressMap {
        AddressMap::new(
            self.rotation,
            self.width,
            self.height,
            self.stride,
            self.format.bytes_per_pixel(),
        )
    }

    /// Byte offset of logical (x, y)
    #[inline]
    pub fn pixel_offset(&self, x: usize, y: usize) -> usize {
        self.address_map().offset(x, y)
    }

    /// Native rectangle covering the logical `rect`
    #[inline]
    pub fn physical_rect(&self, rect: Rect) -> Rect {
        self.rotation.map_rect(rect, self.width, self.height)
    }

    /// Typed read; `None` if `P` is not this surface's format.
    pub fn pixel<P: Pixel>(&self, x: usize, y: usize) -> Option<P> {
        (P::FORMAT == self.format).then(|| self.read_at::<P>(x, y))
    }

    /// Read any pixel as RGBA, converted per the crate's conversion rules.
    pub fn get_pixel(&self, x: usize, y: usize) -> ColorRgb32 {
        with_pixel!(self.format, |P| self.read_at::<P>(x, y).to_rgb32())
    }

    /// Luminance of the pixel at logical (x, y)
    pub fn luminance(&self, x: usize, y: usize) -> u8 {
        with_pixel!(self.format, |P| self.read_at::<P>(x, y).luminance())
    }

    #[inline(always)]
    pub(crate) fn read_at<P: Pixel>(&self, x: usize, y: usize) -> P {
        debug_assert_eq!(P::FORMAT, self.format);
        debug_assert!(
            x < self.width() && y < self.height(),
            "({}, {}) outside {}x{}",
            x,
            y,
            self.width(),
            self.height()
        );
        let offset = self.pixel_offset(x, y);
        P::read(&self.data.as_ref()[offset..offset + P::FORMAT.bytes_per_pixel()])
    }

    /// Debug-build check that an operator's rectangle lies inside the surface
    #[inline]
    pub(crate) fn debug_check_rect(&self, rect: Rect, op: &str) {
        debug_assert!(
            rect.is_empty() || self.bounds().contains_rect(&rect),
            "{}: {:?} outside {}x{} surface",
            op,
            rect,
            self.width(),
            self.height()
        );
    }
}

impl<B: AsRef<[u8]> + AsMut<[u8]>> BlitBuffer<B> {
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        self.data.as_mut()
    }

    /// Write any pixel from RGBA, converted to the surface format.
    pub fn set_pixel(&mut self, x: usize, y: usize, color: ColorRgb32) {
        with_pixel!(self.format, |P| self.write_at::<P>(x, y, P::from_rgb32(color)))
    }

    /// Like [`set_pixel`](Self::set_pixel), but a silent no-op outside the
    /// logical bounds. Accepts signed coordinates so callers can compute
    /// positions that fall off the surface.
    pub fn set_pixel_clamped(&mut self, x: isize, y: isize, color: ColorRgb32) {
        with_pixel!(self.format, |P| self.put_clamped::<P>(x, y, P::from_rgb32(color)))
    }

    #[inline(always)]
    pub(crate) fn write_at<P: Pixel>(&mut self, x: usize, y: usize, pixel: P) {
        debug_assert_eq!(P::FORMAT, self.format);
        debug_assert!(
            x < self.width() && y < self.height(),
            "({}, {}) outside {}x{}",
            x,
            y,
            self.width(),
            self.height()
        );
        let offset = self.pixel_offset(x, y);
        pixel.write(&mut self.data.as_mut()[offset..offset + P::FORMAT.bytes_per_pixel()]);
    }

    #[inline]
    pub(crate) fn put_clamped<P: Pixel>(&mut self, x: isize, y: isize, pixel: P) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        if x < self.width() && y < self.height() {
            self.write_at(x, y, pixel);
        }
    }

    /// Clamped counterpart of a read-blend-write at signed coordinates
    #[inline]
    pub(crate) fn blend_clamped<P: Pixel>(
        &mut self,
        x: isize,
        y: isize,
        color: ColorRgb32,
        alpha: u8,
    ) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        if x < self.width() && y < self.height() {
            let p: P = self.read_at(x, y);
            self.write_at(x, y, p.blend(color, alpha));
        }
    }

    /// Rewrite every pixel of a logical rectangle in storage order.
    ///
    /// Only valid for transforms that do not depend on pixel position: the
    /// rectangle is walked as its native counterpart, scanline by scanline.
    pub(crate) fn map_physical<P: Pixel>(&mut self, rect: Rect, mut f: impl FnMut(P) -> P) {
        debug_assert_eq!(P::FORMAT, self.format);
        let phys = self.physical_rect(rect);
        let bpp = P::FORMAT.bytes_per_pixel();
        let stride = self.stride;
        let data = self.data.as_mut();

        for row in phys.y..phys.bottom() {
            let start = row * stride + phys.x * bpp;
            let line = &mut data[start..start + phys.w * bpp];
            for px in line.chunks_exact_mut(bpp) {
                f(P::read(px)).write(px);
            }
        }
    }

    /// Set every byte of a logical rectangle to `byte`.
    ///
    /// One bulk fill when the rectangle spans whole, unpadded scanlines;
    /// one fill per scanline otherwise.
    pub(crate) fn fill_bytes(&mut self, rect: Rect, byte: u8) {
        let phys = self.physical_rect(rect);
        let bpp = self.format.bytes_per_pixel();
        let stride = self.stride;
        let row_len = phys.w * bpp;
        let data = self.data.as_mut();

        if phys.x == 0 && row_len == stride {
            tracing::trace!(rows = phys.h, "contiguous fill");
            data[phys.y * stride..phys.bottom() * stride].fill(byte);
            return;
        }

        for row in phys.y..phys.bottom() {
            let start = row * stride + phys.x * bpp;
            data[start..start + row_len].fill(byte);
        }
    }
}

impl BlitBuffer<Vec<u8>> {
    /// Owned, zero-filled surface with tightly packed scanlines
    pub fn alloc(width: usize, height: usize, format: PixelFormat) -> Self {
        let stride = width * format.bytes_per_pixel();
        Self {
            data: vec![0; stride * height],
            width,
            height,
            pixel_stride: width,
            stride,
            format,
            rotation: Rotation::Upright,
        }
    }
}

impl<B> fmt::Debug for BlitBuffer<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlitBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("pixel_stride", &self.pixel_stride)
            .field("stride", &self.stride)
            .field("format", &self.format)
            .field("rotation", &self.rotation)
            .finish_non_exhaustive()
    }
}
