//! Rectangles in surface coordinates

use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in pixels.
///
/// Expressed in the logical (rotated) coordinate space of whichever surface
/// it is passed to. Serialized as `[x, y, w, h]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "[usize; 4]", into = "[usize; 4]")]
pub struct Rect {
    pub x: usize,
    pub y: usize,
    pub w: usize,
    pub h: usize,
}

impl Rect {
    #[inline]
    pub const fn new(x: usize, y: usize, w: usize, h: usize) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle anchored at the origin
    #[inline]
    pub const fn sized(w: usize, h: usize) -> Self {
        Self { x: 0, y: 0, w, h }
    }

    /// Exclusive right edge
    #[inline]
    pub const fn right(&self) -> usize {
        self.x + self.w
    }

    /// Exclusive bottom edge
    #[inline]
    pub const fn bottom(&self) -> usize {
        self.y + self.h
    }

    /// Whether both far edges are representable
    #[inline]
    pub const fn is_addressable(&self) -> bool {
        self.x.checked_add(self.w).is_some() && self.y.checked_add(self.h).is_some()
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }

    /// Whether the point lies inside (inclusive start, exclusive end)
    #[inline]
    pub const fn contains(&self, x: usize, y: usize) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Whether `other` lies entirely within this rectangle
    #[inline]
    pub const fn contains_rect(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Intersection of two rectangles, `None` if they do not overlap
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let x0 = self.x.max(other.x);
        let y0 = self.y.max(other.y);
        let x1 = self.right().min(other.right());
        let y1 = self.bottom().min(other.bottom());
        if x1 > x0 && y1 > y0 {
            Some(Rect::new(x0, y0, x1 - x0, y1 - y0))
        } else {
            None
        }
    }
}

impl From<[usize; 4]> for Rect {
    fn from([x, y, w, h]: [usize; 4]) -> Self {
        Rect::new(x, y, w, h)
    }
}

impl From<Rect> for [usize; 4] {
    fn from(r: Rect) -> Self {
        [r.x, r.y, r.w, r.h]
    }
}
