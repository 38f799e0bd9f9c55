//! Room-scatter dungeon generation
//!
//! Scatters candidate rooms across the map, keeps the largest ones, and
//! routes corridors along a spanning tree of their Delaunay proximity graph.
//! Produces the organic, cavern-like layouts the subdivision strategy
//! cannot.

mod roads;
mod rooms;

pub use roads::{emit_roads, road_center, room_by_point, split_crossed_roads};
pub use rooms::{place_rooms, select_main_rooms};

use glam::Vec2;
use log::warn;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::ScatterConfig;
use crate::corridor::Corridor;
use crate::error::{DungeonError, Result};
use crate::graph::{proximity_edges, SpanningTree};
use crate::layout::DungeonLayout;
use crate::room::Room;
use crate::tiles;

/// Generate a dungeon layout by room scattering
///
/// Placement under-filling the requested room count is tolerated (with a
/// warning); the layout is then built from the rooms that fit.
///
/// # Errors
///
/// Returns `InvalidConfig` when the configuration fails validation and
/// `GenerationFailed` when no room could be placed or the corridor network
/// cannot span the main rooms.
pub fn generate_scatter(config: &ScatterConfig) -> Result<DungeonLayout> {
    config.validate()?;
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);

    let placed = place_rooms(config, &mut rng);
    if placed.is_empty() {
        return Err(DungeonError::GenerationFailed(
            "no candidate room could be placed".into(),
        ));
    }
    if placed.len() < config.total_room_count {
        warn!(
            "placed {} of {} requested rooms",
            placed.len(),
            config.total_room_count
        );
    }

    let mut main_rooms = select_main_rooms(&placed, config.main_room_count);
    let corridors = connect_main_rooms(&main_rooms, config, &mut rng)?;

    tiles::register_connected_roads(&mut main_rooms, &corridors);
    let (mut grounds, mut walls) = tiles::room_tiles(&main_rooms);
    let (road_grounds, road_walls) = tiles::road_tiles(&corridors);
    grounds.extend(road_grounds);
    walls.extend(road_walls);
    let pillars = tiles::derive_pillars(config.map_size, &walls);

    Ok(DungeonLayout::new(
        main_rooms,
        corridors,
        walls,
        grounds,
        pillars,
        config.map_size,
        config.total_room_count,
        placed.len(),
        0,
    ))
}

fn connect_main_rooms<R: Rng>(
    main_rooms: &[Room],
    config: &ScatterConfig,
    rng: &mut R,
) -> Result<Vec<Corridor>> {
    // A single main room needs no corridors.
    if main_rooms.len() < 2 {
        return Ok(Vec::new());
    }

    let sites: Vec<Vec2> = main_rooms.iter().map(|r| r.biased_center()).collect();
    let edges = proximity_edges(&sites);
    let tree = SpanningTree::build(&edges, config.spanning_tree)?;
    let roads = emit_roads(tree.segments(), main_rooms, rng);
    Ok(split_crossed_roads(roads, main_rooms))
}
