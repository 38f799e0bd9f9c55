//! Wall, ground, and pillar derivation
//!
//! The final stage of the pipeline: turns finalized rooms and corridors into
//! unit wall segments, floor tiles, and pillar positions. Walls and grounds
//! are value types with structural equality, collected into ordered sets so
//! that derivation is deduplicated and deterministic; re-running any function
//! here on the same input yields an identical result.

use std::collections::BTreeSet;

use glam::IVec2;

use crate::corridor::Corridor;
use crate::room::Room;

/// A unit wall segment on the grid
///
/// A horizontal wall at `(x, y)` spans the edge from `(x, y)` to `(x+1, y)`;
/// a vertical wall spans from `(x, y)` to `(x, y+1)`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Wall {
    pub x: i32,
    pub y: i32,
    pub is_vertical: bool,
}

impl Wall {
    pub fn new(x: i32, y: i32, is_vertical: bool) -> Self {
        Self { x, y, is_vertical }
    }
}

/// A unit floor tile at integer grid coordinates
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ground {
    pub x: i32,
    pub y: i32,
}

impl Ground {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Register every corridor against every room
///
/// Rooms whose boundary contains a corridor endpoint record a culling wall
/// there; wall derivation skips those cells to carve the doorway.
pub fn register_connected_roads(rooms: &mut [Room], roads: &[Corridor]) {
    for road in roads {
        for room in rooms.iter_mut() {
            room.add_connected_road(road);
        }
    }
}

/// Derive floor tiles and boundary walls for a set of rooms
///
/// One ground tile per interior cell, one wall per boundary cell on all four
/// edges, minus the culling walls registered by connected corridors.
pub fn room_tiles(rooms: &[Room]) -> (BTreeSet<Ground>, BTreeSet<Wall>) {
    let mut grounds = BTreeSet::new();
    let mut walls = BTreeSet::new();

    for room in rooms {
        let min_x = room.min_border().x as i32;
        let max_x = room.max_border().x as i32;
        let min_y = room.min_border().y as i32;
        let max_y = room.max_border().y as i32;

        for x in min_x..max_x {
            for y in min_y..max_y {
                grounds.insert(Ground::new(x, y));
            }
        }

        for x in min_x..max_x {
            for wall in [Wall::new(x, min_y, false), Wall::new(x, max_y, false)] {
                if !room.is_culling_wall(&wall) {
                    walls.insert(wall);
                }
            }
        }

        for y in min_y..max_y {
            for wall in [Wall::new(min_x, y, true), Wall::new(max_x, y, true)] {
                if !room.is_culling_wall(&wall) {
                    walls.insert(wall);
                }
            }
        }
    }

    (grounds, walls)
}

/// Derive floor tiles and side walls for a set of corridors
///
/// Each corridor lays ground along its centerline cells and a wall run on
/// both flanking grid lines. Side walls covered by a perpendicular corridor
/// are removed afterwards so junctions stay open.
pub fn road_tiles(roads: &[Corridor]) -> (BTreeSet<Ground>, BTreeSet<Wall>) {
    let mut grounds = BTreeSet::new();
    let mut walls = BTreeSet::new();

    for road in roads {
        let column = road.start().x as i32;
        let row = road.start().y as i32;
        let min = road.min_border() as i32;
        let mut max = road.max_border() as i32;
        if max as f32 != road.max_border() {
            max += 1;
        }

        if road.is_vertical() {
            for y in min..max {
                grounds.insert(Ground::new(column, y));
                walls.insert(Wall::new(column, y, true));
                walls.insert(Wall::new(column + 1, y, true));
            }
        } else {
            for x in min..max {
                grounds.insert(Ground::new(x, row));
                walls.insert(Wall::new(x, row, false));
                walls.insert(Wall::new(x, row + 1, false));
            }
        }
    }

    remove_crossed_walls(&mut walls, roads);

    (grounds, walls)
}

/// Remove corridor side walls that would cut across a perpendicular corridor
fn remove_crossed_walls(walls: &mut BTreeSet<Wall>, roads: &[Corridor]) {
    let crossed: Vec<Wall> = walls
        .iter()
        .filter(|wall| {
            roads.iter().any(|road| {
                if road.is_vertical() == wall.is_vertical {
                    return false;
                }
                if wall.is_vertical {
                    // Vertical wall crossed by a horizontal corridor in its row.
                    (wall.x as f32) >= road.min_border()
                        && (wall.x as f32) <= road.max_border()
                        && road.start().y as i32 == wall.y
                } else {
                    (wall.y as f32) >= road.min_border()
                        && (wall.y as f32) <= road.max_border()
                        && road.start().x as i32 == wall.x
                }
            })
        })
        .copied()
        .collect();

    for wall in crossed {
        walls.remove(&wall);
    }
}

/// Find every grid corner where the wall configuration changes
///
/// Scans the map row-major over horizontal walls, then column-major over
/// vertical walls; each transition from wall to no-wall (or back) marks a
/// corner or a wall-run terminus and gets a pillar. Unbroken wall runs get
/// none in their middle.
pub fn derive_pillars(map_size: IVec2, walls: &BTreeSet<Wall>) -> Vec<IVec2> {
    let mut positions = BTreeSet::new();

    let mut previous = false;
    for y in 0..=map_size.y {
        for x in 0..=map_size.x {
            let current = walls.contains(&Wall::new(x, y, false));
            if current != previous {
                previous = current;
                positions.insert((x, y));
            }
        }
    }

    let mut previous = false;
    for x in 0..=map_size.x {
        for y in 0..=map_size.y {
            let current = walls.contains(&Wall::new(x, y, true));
            if current != previous {
                previous = current;
                positions.insert((x, y));
            }
        }
    }

    positions
        .into_iter()
        .map(|(x, y)| IVec2::new(x, y))
        .collect()
}
