//! Generation configuration and builders
//!
//! Both strategies are driven by a small, copyable configuration struct.
//! The same configuration always produces the identical layout; the seed is
//! the only source of randomness and is threaded through every stage.

use glam::{IVec2, Vec2};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{DungeonError, Result};
use crate::graph::SpanningTreeStrategy;

/// Configuration for the recursive-subdivision (BSP) strategy
///
/// # Example
///
/// ```rust
/// use rust_dungeon_layout::*;
///
/// let config = BspConfigBuilder::new()
///     .seed(42)
///     .map_size(20, 20).unwrap()
///     .split_iterations(3)
///     .build().unwrap();
///
/// let layout = generate_bsp(&config).unwrap();
/// assert!(!layout.rooms().is_empty());
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BspConfig {
    /// Random seed for deterministic generation
    pub seed: u64,
    /// Map extent in grid cells
    pub map_size: IVec2,
    /// Number of whole-tree split passes; each pass deepens every
    /// still-splittable leaf by one level
    pub split_iterations: usize,
    /// Minimum side lengths a partition cell may have
    pub min_node_size: IVec2,
    /// Smallest room size as a fraction of its leaf, per axis (0, 1]
    pub min_room_ratio: Vec2,
    /// How many split offsets to draw before giving up on a node and
    /// leaving it a permanent leaf
    pub split_retry_limit: usize,
}

impl BspConfig {
    /// Check the cross-field invariants
    ///
    /// Builders enforce these already; this re-checks configurations built
    /// from struct literals before generation runs.
    pub fn validate(&self) -> Result<()> {
        if self.map_size.x <= 0 || self.map_size.y <= 0 {
            return Err(DungeonError::InvalidConfig(format!(
                "map size must be positive (got {}x{})",
                self.map_size.x, self.map_size.y
            )));
        }
        if self.min_node_size.x <= 0 || self.min_node_size.y <= 0 {
            return Err(DungeonError::InvalidConfig(
                "minimum node size must be positive".into(),
            ));
        }
        if !(0.0 < self.min_room_ratio.x && self.min_room_ratio.x <= 1.0)
            || !(0.0 < self.min_room_ratio.y && self.min_room_ratio.y <= 1.0)
        {
            return Err(DungeonError::InvalidConfig(
                "minimum room ratio must be in (0, 1] per axis".into(),
            ));
        }
        if self.split_retry_limit == 0 {
            return Err(DungeonError::InvalidConfig(
                "split retry limit must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

impl Default for BspConfig {
    fn default() -> Self {
        BspConfigBuilder::new().build().unwrap()
    }
}

/// Builder for [`BspConfig`] with validation
///
/// Defaults: 10×10 map, 1 split iteration, minimum node 3×3, minimum room
/// ratio (0.45, 0.45), 16 split retries, random seed.
#[derive(Debug, Clone)]
pub struct BspConfigBuilder {
    seed: Option<u64>,
    map_size: IVec2,
    split_iterations: usize,
    min_node_size: IVec2,
    min_room_ratio: Vec2,
    split_retry_limit: usize,
}

impl BspConfigBuilder {
    pub fn new() -> Self {
        Self {
            seed: None,
            map_size: IVec2::new(10, 10),
            split_iterations: 1,
            min_node_size: IVec2::new(3, 3),
            min_room_ratio: Vec2::new(0.45, 0.45),
            split_retry_limit: 16,
        }
    }

    /// Set the random seed; the same seed always yields the same layout
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the map extent in grid cells
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if either dimension is not positive.
    pub fn map_size(mut self, width: i32, height: i32) -> Result<Self> {
        if width <= 0 || height <= 0 {
            return Err(DungeonError::InvalidConfig(format!(
                "map size must be positive (got {}x{})",
                width, height
            )));
        }
        self.map_size = IVec2::new(width, height);
        Ok(self)
    }

    /// Set the number of split passes
    ///
    /// Passes beyond the point where the minimum node size stops all
    /// splitting are no-ops, so any value is accepted.
    pub fn split_iterations(mut self, iterations: usize) -> Self {
        self.split_iterations = iterations;
        self
    }

    /// Set the minimum partition cell size
    pub fn min_node_size(mut self, width: i32, height: i32) -> Result<Self> {
        if width <= 0 || height <= 0 {
            return Err(DungeonError::InvalidConfig(
                "minimum node size must be positive".into(),
            ));
        }
        self.min_node_size = IVec2::new(width, height);
        Ok(self)
    }

    /// Set the minimum room size as a fraction of the owning leaf, per axis
    pub fn min_room_ratio(mut self, x: f32, y: f32) -> Result<Self> {
        if !(0.0 < x && x <= 1.0) || !(0.0 < y && y <= 1.0) {
            return Err(DungeonError::InvalidConfig(format!(
                "minimum room ratio must be in (0, 1] per axis (got {}, {})",
                x, y
            )));
        }
        self.min_room_ratio = Vec2::new(x, y);
        Ok(self)
    }

    /// Set the split-offset retry budget
    pub fn split_retry_limit(mut self, limit: usize) -> Result<Self> {
        if limit == 0 {
            return Err(DungeonError::InvalidConfig(
                "split retry limit must be at least 1".into(),
            ));
        }
        self.split_retry_limit = limit;
        Ok(self)
    }

    /// Build the configuration, drawing a random seed if none was set
    pub fn build(self) -> Result<BspConfig> {
        let config = BspConfig {
            seed: self.seed.unwrap_or_else(rand::random),
            map_size: self.map_size,
            split_iterations: self.split_iterations,
            min_node_size: self.min_node_size,
            min_room_ratio: self.min_room_ratio,
            split_retry_limit: self.split_retry_limit,
        };
        config.validate()?;
        Ok(config)
    }
}

impl Default for BspConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Configuration for the room-scatter strategy
///
/// Rooms are rejection-sampled, ranked by area, and the largest
/// `main_room_count` of them are routed together through a spanning tree
/// over their Delaunay proximity graph.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScatterConfig {
    /// Random seed for deterministic generation
    pub seed: u64,
    /// Map extent in grid cells
    pub map_size: IVec2,
    /// How many rooms placement tries to accept (attempt budget is the
    /// square of this count; fewer may fit)
    pub total_room_count: usize,
    /// How many of the largest rooms join the corridor network
    pub main_room_count: usize,
    /// Smallest candidate room size, per axis
    pub min_room_size: IVec2,
    /// Largest candidate room size, per axis (inclusive)
    pub max_room_size: IVec2,
    /// Scale applied to the sum of room extents in the separation test.
    /// Values above 0.5 leave a gap between accepted rooms; the original
    /// design ships 0.7.
    pub separation_factor: f32,
    /// Which spanning-tree reduction shapes the corridor network
    pub spanning_tree: SpanningTreeStrategy,
}

impl ScatterConfig {
    /// Check the cross-field invariants
    pub fn validate(&self) -> Result<()> {
        // Centers are sampled from [1, map_size), which needs two cells.
        if self.map_size.x < 2 || self.map_size.y < 2 {
            return Err(DungeonError::InvalidConfig(format!(
                "map size must be at least 2x2 (got {}x{})",
                self.map_size.x, self.map_size.y
            )));
        }
        if self.total_room_count == 0 {
            return Err(DungeonError::InvalidConfig(
                "total room count must be at least 1".into(),
            ));
        }
        if self.main_room_count == 0 || self.main_room_count > self.total_room_count {
            return Err(DungeonError::InvalidConfig(format!(
                "main room count must be in 1..={} (got {})",
                self.total_room_count, self.main_room_count
            )));
        }
        if self.min_room_size.x <= 0 || self.min_room_size.y <= 0 {
            return Err(DungeonError::InvalidConfig(
                "minimum room size must be positive".into(),
            ));
        }
        if self.max_room_size.x < self.min_room_size.x
            || self.max_room_size.y < self.min_room_size.y
        {
            return Err(DungeonError::InvalidConfig(
                "maximum room size must not be below the minimum".into(),
            ));
        }
        if self.max_room_size.x > self.map_size.x || self.max_room_size.y > self.map_size.y {
            return Err(DungeonError::InvalidConfig(
                "maximum room size must fit the map".into(),
            ));
        }
        if self.separation_factor <= 0.0 {
            return Err(DungeonError::InvalidConfig(format!(
                "separation factor must be positive (got {})",
                self.separation_factor
            )));
        }
        Ok(())
    }
}

impl Default for ScatterConfig {
    fn default() -> Self {
        ScatterConfigBuilder::new().build().unwrap()
    }
}

/// Builder for [`ScatterConfig`] with validation
///
/// Defaults: 40×40 map, 30 candidate rooms, 8 main rooms, room sizes 4×4
/// through 10×10, separation factor 0.7, minimum spanning tree, random seed.
#[derive(Debug, Clone)]
pub struct ScatterConfigBuilder {
    seed: Option<u64>,
    map_size: IVec2,
    total_room_count: usize,
    main_room_count: usize,
    min_room_size: IVec2,
    max_room_size: IVec2,
    separation_factor: f32,
    spanning_tree: SpanningTreeStrategy,
}

impl ScatterConfigBuilder {
    pub fn new() -> Self {
        Self {
            seed: None,
            map_size: IVec2::new(40, 40),
            total_room_count: 30,
            main_room_count: 8,
            min_room_size: IVec2::new(4, 4),
            max_room_size: IVec2::new(10, 10),
            separation_factor: 0.7,
            spanning_tree: SpanningTreeStrategy::Minimum,
        }
    }

    /// Set the random seed; the same seed always yields the same layout
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the map extent in grid cells
    pub fn map_size(mut self, width: i32, height: i32) -> Result<Self> {
        if width <= 0 || height <= 0 {
            return Err(DungeonError::InvalidConfig(format!(
                "map size must be positive (got {}x{})",
                width, height
            )));
        }
        self.map_size = IVec2::new(width, height);
        Ok(self)
    }

    /// Set how many rooms to place and how many to route together
    pub fn room_counts(mut self, total: usize, main: usize) -> Result<Self> {
        if total == 0 || main == 0 || main > total {
            return Err(DungeonError::InvalidConfig(format!(
                "room counts must satisfy 1 <= main <= total (got {} of {})",
                main, total
            )));
        }
        self.total_room_count = total;
        self.main_room_count = main;
        Ok(self)
    }

    /// Set the candidate room size range (inclusive on both ends)
    pub fn room_size_range(mut self, min: IVec2, max: IVec2) -> Result<Self> {
        if min.x <= 0 || min.y <= 0 || max.x < min.x || max.y < min.y {
            return Err(DungeonError::InvalidConfig(
                "room size range must be positive and ordered".into(),
            ));
        }
        self.min_room_size = min;
        self.max_room_size = max;
        Ok(self)
    }

    /// Set the room separation factor
    ///
    /// The placement test rejects a candidate when its center distance to an
    /// accepted room is below `(size_a + size_b) * factor` on both axes.
    pub fn separation_factor(mut self, factor: f32) -> Result<Self> {
        if factor <= 0.0 {
            return Err(DungeonError::InvalidConfig(format!(
                "separation factor must be positive (got {})",
                factor
            )));
        }
        self.separation_factor = factor;
        Ok(self)
    }

    /// Choose the spanning-tree reduction strategy
    pub fn spanning_tree(mut self, strategy: SpanningTreeStrategy) -> Self {
        self.spanning_tree = strategy;
        self
    }

    /// Build the configuration, drawing a random seed if none was set
    pub fn build(self) -> Result<ScatterConfig> {
        let config = ScatterConfig {
            seed: self.seed.unwrap_or_else(rand::random),
            map_size: self.map_size,
            total_room_count: self.total_room_count,
            main_room_count: self.main_room_count,
            min_room_size: self.min_room_size,
            max_room_size: self.max_room_size,
            separation_factor: self.separation_factor,
            spanning_tree: self.spanning_tree,
        };
        config.validate()?;
        Ok(config)
    }
}

impl Default for ScatterConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
