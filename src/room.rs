//! Room geometry
//!
//! A room is an axis-aligned box described by its fractional center and size.
//! Both generation strategies produce rooms through this type: the BSP
//! variant carves one from each leaf rectangle, the scatter variant samples
//! them directly in continuous map coordinates.

use glam::Vec2;
use rand::Rng;

use crate::corridor::Corridor;
use crate::rect::Rect;
use crate::tiles::Wall;

/// A single room of the dungeon
///
/// Rooms record which of their boundary wall cells are punctured by a
/// connecting corridor ("culling walls"); wall derivation later skips those
/// positions to leave a doorway.
#[derive(Debug, Clone)]
pub struct Room {
    center: Vec2,
    center_bias: Vec2,
    size: Vec2,
    min_border: Vec2,
    max_border: Vec2,
    priority: i32,
    culling_walls: Vec<Wall>,
}

impl Room {
    /// Create a room from its center and size
    ///
    /// Draws the center bias for every axis whose center coordinate lands on
    /// a grid line, so corridors aimed at this room never run exactly along
    /// a cell boundary.
    pub fn new<R: Rng>(center: Vec2, size: Vec2, rng: &mut R) -> Self {
        let center_bias = Vec2::new(
            Self::axis_bias(center.x, rng),
            Self::axis_bias(center.y, rng),
        );
        let half = size / 2.0;
        Self {
            center,
            center_bias,
            size,
            min_border: center - half,
            max_border: center + half,
            priority: (size.x * size.y) as i32,
            culling_walls: Vec::new(),
        }
    }

    /// Create a room covering an integer rectangle
    pub fn from_rect<R: Rng>(rect: Rect, rng: &mut R) -> Self {
        Self::new(
            rect.center(),
            Vec2::new(rect.width as f32, rect.height as f32),
            rng,
        )
    }

    fn axis_bias<R: Rng>(coordinate: f32, rng: &mut R) -> f32 {
        if coordinate.fract() == 0.0 {
            if rng.gen_range(0..2) == 0 {
                0.5
            } else {
                -0.5
            }
        } else {
            0.0
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.center
    }

    /// Half-cell offset applied when routing corridors toward this room
    #[inline]
    pub fn center_bias(&self) -> Vec2 {
        self.center_bias
    }

    /// Center with the routing bias applied
    #[inline]
    pub fn biased_center(&self) -> Vec2 {
        self.center + self.center_bias
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.size
    }

    #[inline]
    pub fn min_border(&self) -> Vec2 {
        self.min_border
    }

    #[inline]
    pub fn max_border(&self) -> Vec2 {
        self.max_border
    }

    /// Area-based ranking used to pick main rooms
    #[inline]
    pub fn priority(&self) -> i32 {
        self.priority
    }

    /// Closed-boundary containment test (room edges included)
    pub fn in_boundary(&self, point: Vec2) -> bool {
        point.x >= self.min_border.x
            && point.x <= self.max_border.x
            && point.y >= self.min_border.y
            && point.y <= self.max_border.y
    }

    /// Register a corridor connected to this room
    ///
    /// Each corridor endpoint that lands inside the room boundary marks one
    /// wall cell for removal, oriented perpendicular to the corridor so the
    /// opening faces along the corridor's direction of travel.
    pub fn add_connected_road(&mut self, road: &Corridor) {
        for point in [road.start(), road.end()] {
            if !self.in_boundary(point) {
                continue;
            }
            let wall = Wall::new(point.x as i32, point.y as i32, !road.is_vertical());
            if !self.culling_walls.contains(&wall) {
                self.culling_walls.push(wall);
            }
        }
    }

    /// Is this wall cell suppressed by a connected corridor?
    pub fn is_culling_wall(&self, wall: &Wall) -> bool {
        self.culling_walls.contains(wall)
    }

    /// Registered doorway positions
    pub fn culling_walls(&self) -> &[Wall] {
        &self.culling_walls
    }
}
