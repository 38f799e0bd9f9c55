//! Recursive-subdivision dungeon generation
//!
//! Splits the map into a binary tree of cells, carves one room per leaf, and
//! connects sibling subtrees bottom-up with one corridor per split, so the
//! whole layout forms a single connected component whenever every split
//! found a straight connection.

mod tree;

pub use tree::BspTree;

use log::warn;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::config::BspConfig;
use crate::error::{DungeonError, Result};
use crate::layout::DungeonLayout;
use crate::rect::Rect;
use crate::tiles;

/// Generate a dungeon layout by binary space partitioning
///
/// # Errors
///
/// Returns `InvalidConfig` when the configuration fails validation and
/// `GenerationFailed` when partitioning produces no rooms.
pub fn generate_bsp(config: &BspConfig) -> Result<DungeonLayout> {
    config.validate()?;
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);

    let bounds = Rect::new(0, 0, config.map_size.x, config.map_size.y);
    let mut tree = BspTree::new(
        bounds,
        config.min_node_size,
        config.min_room_ratio,
        config.split_retry_limit,
    );
    for _ in 0..config.split_iterations {
        tree.split(&mut rng);
    }

    tree.generate_rooms(&mut rng);
    tree.generate_corridors(&mut rng);

    let mut rooms = tree.rooms();
    let corridors = tree.corridors();
    if rooms.is_empty() {
        return Err(DungeonError::GenerationFailed(
            "partitioning produced no rooms".into(),
        ));
    }
    let skipped = tree.skipped_corridors();
    if skipped > 0 {
        warn!(
            "skipped {} of {} corridors with no straight connection; layout is disconnected",
            skipped,
            rooms.len() - 1
        );
    }

    tiles::register_connected_roads(&mut rooms, &corridors);
    let (mut grounds, mut walls) = tiles::room_tiles(&rooms);
    let (road_grounds, road_walls) = tiles::road_tiles(&corridors);
    grounds.extend(road_grounds);
    walls.extend(road_walls);
    let pillars = tiles::derive_pillars(config.map_size, &walls);

    let room_count = rooms.len();
    Ok(DungeonLayout::new(
        rooms,
        corridors,
        walls,
        grounds,
        pillars,
        config.map_size,
        room_count,
        room_count,
        skipped,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BspConfigBuilder;
    use crate::tiles::Ground;
    use std::collections::{BTreeSet, VecDeque};

    fn config(seed: u64, size: i32, iterations: usize) -> BspConfig {
        BspConfigBuilder::new()
            .seed(seed)
            .map_size(size, size)
            .unwrap()
            .split_iterations(iterations)
            .build()
            .unwrap()
    }

    fn flood_fill_components(grounds: &BTreeSet<Ground>) -> usize {
        let mut unvisited = grounds.clone();
        let mut components = 0;
        while let Some(&start) = unvisited.iter().next() {
            components += 1;
            let mut queue = VecDeque::from([start]);
            unvisited.remove(&start);
            while let Some(cell) = queue.pop_front() {
                for (dx, dy) in [(1, 0), (-1, 0), (0, 1), (0, -1)] {
                    let next = Ground::new(cell.x + dx, cell.y + dy);
                    if unvisited.remove(&next) {
                        queue.push_back(next);
                    }
                }
            }
        }
        components
    }

    #[test]
    fn test_default_config_generates() {
        let layout = generate_bsp(&BspConfig::default()).unwrap();
        assert!(!layout.rooms().is_empty());
        assert!(!layout.grounds().is_empty());
        assert!(!layout.walls().is_empty());
    }

    #[test]
    fn test_rooms_inside_map() {
        for seed in 0..10 {
            let layout = generate_bsp(&config(seed, 50, 4)).unwrap();
            for room in layout.rooms() {
                assert!(room.min_border().x >= 0.0 && room.min_border().y >= 0.0);
                assert!(room.max_border().x <= 50.0 && room.max_border().y <= 50.0);
            }
        }
    }

    #[test]
    fn test_layout_is_connected_or_skips_reported() {
        // Corridors and reported skips together account for every partition
        // node, so a layout claiming zero skips must rasterize to a single
        // floor component.
        for iterations in 1..=5 {
            for seed in 0..10 {
                let layout = generate_bsp(&config(seed, 60, iterations)).unwrap();
                assert_eq!(
                    layout.corridors().len() + layout.skipped_corridors(),
                    layout.rooms().len() - 1,
                    "seed {} iterations {}",
                    seed,
                    iterations
                );
                if layout.skipped_corridors() > 0 {
                    continue;
                }
                let grounds: BTreeSet<Ground> = layout.grounds().iter().copied().collect();
                assert_eq!(
                    flood_fill_components(&grounds),
                    1,
                    "seed {} iterations {}",
                    seed,
                    iterations
                );
            }
        }
    }

    #[test]
    fn test_same_seed_same_layout() {
        let a = generate_bsp(&config(77, 40, 3)).unwrap();
        let b = generate_bsp(&config(77, 40, 3)).unwrap();

        assert_eq!(a.walls(), b.walls());
        assert_eq!(a.grounds(), b.grounds());
        assert_eq!(a.pillars(), b.pillars());
        assert_eq!(a.rooms().len(), b.rooms().len());
        for (x, y) in a.rooms().iter().zip(b.rooms()) {
            assert_eq!(x.min_border(), y.min_border());
            assert_eq!(x.max_border(), y.max_border());
        }
    }

    #[test]
    fn test_small_map_two_iterations() {
        // On a 10x10 map with minimum node 2x2, the root and both of its
        // children are always split-eligible: the first split leaves parts
        // 3 to 7 cells wide, and the other axis still measures 10. Two
        // iterations therefore always yield exactly 4 leaves.
        for seed in 0..20 {
            let config = BspConfigBuilder::new()
                .seed(seed)
                .map_size(10, 10)
                .unwrap()
                .split_iterations(2)
                .min_node_size(2, 2)
                .unwrap()
                .min_room_ratio(0.5, 0.5)
                .unwrap()
                .build()
                .unwrap();
            let layout = generate_bsp(&config).unwrap();

            assert_eq!(layout.rooms().len(), 4, "seed {}", seed);
            // One corridor per internal node; a sibling pair whose valid
            // ranges do not overlap is reported as a skip instead.
            assert_eq!(
                layout.corridors().len() + layout.skipped_corridors(),
                3,
                "seed {}",
                seed
            );
            for room in layout.rooms() {
                assert!(room.max_border().x <= 10.0 && room.max_border().y <= 10.0);
            }
        }
    }

    #[test]
    fn test_tiny_map_single_room() {
        let layout = generate_bsp(&config(3, 5, 3)).unwrap();
        assert_eq!(layout.rooms().len(), 1);
        assert!(layout.corridors().is_empty());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut bad = BspConfig::default();
        bad.map_size.x = 0;
        assert!(generate_bsp(&bad).is_err());
    }
}
