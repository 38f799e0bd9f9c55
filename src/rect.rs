//! Integer rectangle primitive
//!
//! All layout geometry is built from axis-aligned rectangles on the map grid.
//! A `Rect` is immutable; its derived bounds and center are computed on demand
//! from the stored origin and size.

use glam::{IVec2, Vec2};

/// An axis-aligned rectangle with integer origin and size
///
/// The boundary tests are half-open: a rectangle occupies the cells
/// `[x, x + width)` × `[y, y + height)`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    /// Create a new rectangle
    ///
    /// # Panics
    ///
    /// Panics if `width` or `height` is not strictly positive. Zero-sized
    /// rectangles are a construction error everywhere in this crate.
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        assert!(
            width > 0 && height > 0,
            "rect size must be positive (got {}x{})",
            width,
            height
        );
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Minimum corner (inclusive)
    #[inline]
    pub fn min(&self) -> IVec2 {
        IVec2::new(self.x, self.y)
    }

    /// Maximum corner (exclusive)
    #[inline]
    pub fn max(&self) -> IVec2 {
        IVec2::new(self.x + self.width, self.y + self.height)
    }

    /// Fractional center of the rectangle
    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(
            self.x as f32 + self.width as f32 / 2.0,
            self.y as f32 + self.height as f32 / 2.0,
        )
    }

    /// Exclusive right edge (`x + width`)
    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    /// Exclusive top edge (`y + height`)
    #[inline]
    pub fn top(&self) -> i32 {
        self.y + self.height
    }

    /// Cell count
    #[inline]
    pub fn area(&self) -> i64 {
        self.width as i64 * self.height as i64
    }

    /// Does the column `x` fall inside this rectangle's horizontal span?
    #[inline]
    pub fn in_boundary_x(&self, x: i32) -> bool {
        x >= self.x && x < self.x + self.width
    }

    /// Does the row `y` fall inside this rectangle's vertical span?
    #[inline]
    pub fn in_boundary_y(&self, y: i32) -> bool {
        y >= self.y && y < self.y + self.height
    }

    /// Do two rectangles share at least one cell?
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.top()
            && other.y < self.top()
    }

    /// Smallest rectangle covering both inputs
    pub fn union(&self, other: &Rect) -> Rect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let top = self.top().max(other.top());
        Rect::new(x, y, right - x, top - y)
    }
}
