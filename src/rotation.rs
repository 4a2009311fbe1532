//! Rotation-aware pixel addressing
//!
//! Rotation is a view transform: the bytes of a surface never move, but every
//! logical (x, y) passed to an operator is mapped through one of four
//! quarter-turn transforms before it touches memory.
//!
//! For a surface with native width `W`, height `H`, byte stride `S` and `p`
//! bytes per pixel:
//!
//! | rotation | byte offset of logical (x, y)        |
//! |----------|--------------------------------------|
//! | 0        | `y·S + x·p`                          |
//! | 1        | `x·S + (W − y − 1)·p`                |
//! | 2        | `(H − y − 1)·S + (W − x − 1)·p`      |
//! | 3        | `(H − x − 1)·S + y·p`                |
//!
//! Each row of the table is affine in x and y, so [`AddressMap`] precomputes
//! an origin and two signed steps and the per-pixel cost is two multiply-adds.

use serde::{Deserialize, Serialize};

use crate::error::BlitError;
use crate::geometry::Rect;

/// Quarter-turn rotation of a surface's logical view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum Rotation {
    /// Identity
    #[default]
    Upright = 0,
    /// 90° clockwise view
    Clockwise = 1,
    /// 180°
    UpsideDown = 2,
    /// 270° clockwise (90° counter-clockwise)
    CounterClockwise = 3,
}

impl Rotation {
    pub const ALL: [Rotation; 4] = [
        Rotation::Upright,
        Rotation::Clockwise,
        Rotation::UpsideDown,
        Rotation::CounterClockwise,
    ];

    /// Rotation from a quarter-turn count; only the low two bits are used.
    #[inline]
    pub const fn from_quarter_turns(turns: u8) -> Self {
        match turns & 3 {
            0 => Rotation::Upright,
            1 => Rotation::Clockwise,
            2 => Rotation::UpsideDown,
            _ => Rotation::CounterClockwise,
        }
    }

    #[inline]
    pub const fn quarter_turns(self) -> u8 {
        self as u8
    }

    /// Odd rotations swap the logical width and height.
    #[inline]
    pub const fn swaps_axes(self) -> bool {
        self.quarter_turns() & 1 == 1
    }

    /// The rotation that undoes this one: `(4 - r) mod 4`.
    #[inline]
    pub const fn inverse(self) -> Self {
        Rotation::from_quarter_turns(4 - self.quarter_turns())
    }

    /// Logical (width, height) of a view over a native `w × h` buffer.
    #[inline]
    pub const fn logical_size(self, native_w: usize, native_h: usize) -> (usize, usize) {
        if self.swaps_axes() {
            (native_h, native_w)
        } else {
            (native_w, native_h)
        }
    }

    /// Map a logical point to native (column, row) coordinates.
    ///
    /// `native_w` and `native_h` are the dimensions of the unrotated buffer.
    #[inline]
    pub const fn map_point(
        self,
        x: usize,
        y: usize,
        native_w: usize,
        native_h: usize,
    ) -> (usize, usize) {
        match self {
            Rotation::Upright => (x, y),
            Rotation::Clockwise => (native_w - y - 1, x),
            Rotation::UpsideDown => (native_w - x - 1, native_h - y - 1),
            Rotation::CounterClockwise => (y, native_h - x - 1),
        }
    }

    /// Map a logical rectangle to the native rectangle covering the same
    /// pixels. A quarter-turn maps rectangles onto rectangles.
    pub const fn map_rect(self, rect: Rect, native_w: usize, native_h: usize) -> Rect {
        match self {
            Rotation::Upright => rect,
            Rotation::Clockwise => Rect::new(native_w - rect.y - rect.h, rect.x, rect.h, rect.w),
            Rotation::UpsideDown => Rect::new(
                native_w - rect.x - rect.w,
                native_h - rect.y - rect.h,
                rect.w,
                rect.h,
            ),
            Rotation::CounterClockwise => {
                Rect::new(rect.y, native_h - rect.x - rect.w, rect.h, rect.w)
            }
        }
    }
}

impl TryFrom<u8> for Rotation {
    type Error = BlitError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value > 3 {
            return Err(BlitError::InvalidRotation(value));
        }
        Ok(Rotation::from_quarter_turns(value))
    }
}

impl From<Rotation> for u8 {
    fn from(rotation: Rotation) -> Self {
        rotation.quarter_turns()
    }
}

/// Precomputed logical-to-byte-offset mapping for one surface.
///
/// `offset(x, y) = origin + x·step_x + y·step_y`, with the signed steps chosen
/// per rotation so that walking a logical row never re-evaluates the rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressMap {
    origin: isize,
    step_x: isize,
    step_y: isize,
}

impl AddressMap {
    pub fn new(
        rotation: Rotation,
        native_w: usize,
        native_h: usize,
        stride: usize,
        bpp: usize,
    ) -> Self {
        let stride = stride as isize;
        let bpp = bpp as isize;
        let last_col = (native_w as isize - 1).max(0);
        let last_row = (native_h as isize - 1).max(0);

        let (origin, step_x, step_y) = match rotation {
            Rotation::Upright => (0, bpp, stride),
            Rotation::Clockwise => (last_col * bpp, stride, -bpp),
            Rotation::UpsideDown => (last_row * stride + last_col * bpp, -bpp, -stride),
            Rotation::CounterClockwise => (last_row * stride, -stride, bpp),
        };

        Self {
            origin,
            step_x,
            step_y,
        }
    }

    /// Byte offset of logical (x, y).
    #[inline(always)]
    pub fn offset(&self, x: usize, y: usize) -> usize {
        (self.origin + x as isize * self.step_x + y as isize * self.step_y) as usize
    }
}
