//! Corridor segments
//!
//! A corridor is a one-cell-wide, axis-aligned segment connecting two pieces
//! of dungeon geometry. BSP corridors are built from an integer span along a
//! grid row or column; scatter-variant roads are built from two points whose
//! orientation is inferred from which coordinate they share.

use glam::Vec2;

/// A straight, axis-aligned corridor segment
///
/// The segment runs along its centerline: span-built corridors place the
/// fixed coordinate at the middle of its grid cell (`+ 0.5`). `min_border`
/// and `max_border` are the sorted extents along the long axis.
#[derive(Debug, Clone, PartialEq)]
pub struct Corridor {
    start: Vec2,
    end: Vec2,
    is_vertical: bool,
    min_border: f32,
    max_border: f32,
}

impl Corridor {
    /// Build a corridor from a grid span
    ///
    /// For a vertical corridor, `fixed` is the column and the segment runs
    /// from row `range_start` over `range_len` cells; horizontal corridors
    /// swap the roles. A zero-length span is allowed: it marks a doorway
    /// between two rooms that already touch, carrying position and
    /// orientation but no floor of its own.
    pub fn from_span(fixed: i32, range_start: i32, range_len: i32, is_vertical: bool) -> Self {
        debug_assert!(range_len >= 0);
        let (start, end) = if is_vertical {
            let start = Vec2::new(fixed as f32 + 0.5, range_start as f32);
            (start, start + Vec2::new(0.0, range_len as f32))
        } else {
            let start = Vec2::new(range_start as f32, fixed as f32 + 0.5);
            (start, start + Vec2::new(range_len as f32, 0.0))
        };
        Self::with_orientation(start, end, is_vertical)
    }

    /// Build a corridor between two points sharing an x or y coordinate
    ///
    /// The segment is vertical when the x coordinates are equal.
    pub fn new(start: Vec2, end: Vec2) -> Self {
        Self::with_orientation(start, end, start.x == end.x)
    }

    fn with_orientation(start: Vec2, end: Vec2, is_vertical: bool) -> Self {
        let (a, b) = if is_vertical {
            (start.y, end.y)
        } else {
            (start.x, end.x)
        };
        let (min_border, max_border) = if b < a { (b, a) } else { (a, b) };
        Self {
            start,
            end,
            is_vertical,
            min_border,
            max_border,
        }
    }

    #[inline]
    pub fn start(&self) -> Vec2 {
        self.start
    }

    #[inline]
    pub fn end(&self) -> Vec2 {
        self.end
    }

    #[inline]
    pub fn is_vertical(&self) -> bool {
        self.is_vertical
    }

    /// Smallest coordinate along the long axis
    #[inline]
    pub fn min_border(&self) -> f32 {
        self.min_border
    }

    /// Largest coordinate along the long axis
    #[inline]
    pub fn max_border(&self) -> f32 {
        self.max_border
    }

    /// Length along the long axis
    #[inline]
    pub fn length(&self) -> f32 {
        self.max_border - self.min_border
    }
}
