//! Spatial indexing for fast position-to-room lookups
//!
//! This module is only available with the `spatial-index` feature.

#[cfg(feature = "spatial-index")]
use glam::Vec2;
#[cfg(feature = "spatial-index")]
use kiddo::immutable::float::kdtree::ImmutableKdTree;
#[cfg(feature = "spatial-index")]
use kiddo::SquaredEuclidean;

/// Wrapper around a KD-tree for spatial queries
///
/// Provides O(log n) nearest-neighbor lookups to convert 2D map positions
/// into room indices, for spawn placement and cursor picking.
#[cfg(feature = "spatial-index")]
#[derive(Clone)]
pub struct SpatialIndex {
    tree: ImmutableKdTree<f32, usize, 2, 32>,
}

#[cfg(feature = "spatial-index")]
impl SpatialIndex {
    /// Build a spatial index from room centers
    ///
    /// # Example
    ///
    /// ```
    /// use rust_dungeon_layout::*;
    /// use glam::Vec2;
    ///
    /// # #[cfg(feature = "spatial-index")]
    /// # {
    /// let centers = vec![
    ///     Vec2::new(5.0, 5.0),
    ///     Vec2::new(20.0, 8.0),
    /// ];
    ///
    /// let index = SpatialIndex::new(&centers);
    /// assert_eq!(index.find_nearest(Vec2::new(6.0, 4.0)), 0);
    /// # }
    /// ```
    pub fn new(centers: &[Vec2]) -> Self {
        // Convert Vec2 to [f32; 2] array format for kiddo
        let points: Vec<[f32; 2]> = centers.iter().map(|c| [c.x, c.y]).collect();

        Self {
            tree: ImmutableKdTree::new_from_slice(&points),
        }
    }

    /// Find the room whose center is nearest to a position
    pub fn find_nearest(&self, position: Vec2) -> usize {
        let query = [position.x, position.y];
        let result = self.tree.nearest_one::<SquaredEuclidean>(&query);
        result.item
    }
}

#[cfg(test)]
#[cfg(feature = "spatial-index")]
mod tests {
    use super::*;

    #[test]
    fn test_spatial_index_basic() {
        let centers = vec![
            Vec2::new(5.0, 5.0),
            Vec2::new(30.0, 5.0),
            Vec2::new(5.0, 30.0),
            Vec2::new(30.0, 30.0),
        ];

        let index = SpatialIndex::new(&centers);

        assert_eq!(index.find_nearest(Vec2::new(7.0, 6.0)), 0);
        assert_eq!(index.find_nearest(Vec2::new(28.0, 4.0)), 1);
        assert_eq!(index.find_nearest(Vec2::new(2.0, 29.0)), 2);
        assert_eq!(index.find_nearest(Vec2::new(31.0, 31.0)), 3);
    }

    #[test]
    fn test_spatial_index_exact_match() {
        let centers = vec![Vec2::new(10.0, 2.0), Vec2::new(2.0, 10.0)];
        let index = SpatialIndex::new(&centers);

        assert_eq!(index.find_nearest(centers[0]), 0);
        assert_eq!(index.find_nearest(centers[1]), 1);
    }
}
