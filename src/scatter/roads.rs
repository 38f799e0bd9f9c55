//! Corridor routing between scattered rooms
//!
//! Turns spanning-tree segments between room centers into axis-aligned road
//! segments. Each segment gets a road center (midpoint or dogleg corner),
//! then one straight road per endpoint room toward that center; roads that
//! would run through a room are split around it afterwards.

use glam::Vec2;
use rand::Rng;

use crate::corridor::Corridor;
use crate::graph::STEdge;
use crate::room::Room;

/// The room whose boundary contains `point`, if any
///
/// Rooms placed by the scatter stage never overlap, so at most one matches.
pub fn room_by_point(rooms: &[Room], point: Vec2) -> Option<&Room> {
    rooms.iter().find(|room| room.in_boundary(point))
}

/// The meeting point of the roads connecting two rooms
///
/// Rooms aligned on an axis meet at the midpoint of their biased centers.
/// Otherwise a dogleg corner is chosen on a random axis. A corner landing
/// inside either room is pushed out to that room's border facing the other
/// room, which puts it on the boundary and suppresses that room's segment.
pub fn road_center<R: Rng>(room_a: &Room, room_b: &Room, rng: &mut R) -> Vec2 {
    let a = room_a.biased_center();
    let b = room_b.biased_center();

    let mut center = if a.x == b.x {
        Vec2::new(a.x, (a.y + b.y) / 2.0)
    } else if a.y == b.y {
        Vec2::new((a.x + b.x) / 2.0, a.y)
    } else if rng.gen_range(0..2) == 0 {
        Vec2::new(b.x, a.y)
    } else {
        Vec2::new(a.x, b.y)
    };

    if room_a.in_boundary(center) {
        clamp_to_border(&mut center, room_a, b);
    } else if room_b.in_boundary(center) {
        clamp_to_border(&mut center, room_b, a);
    }

    center
}

/// Push a road center out of `room` to the border facing `toward`
fn clamp_to_border(center: &mut Vec2, room: &Room, toward: Vec2) {
    let biased = room.biased_center();
    if biased.x == center.x {
        if biased.x > toward.x {
            center.x = room.min_border().x;
        } else if biased.x < toward.x {
            center.x = room.max_border().x;
        }
    } else if biased.y == center.y {
        if biased.y > toward.y {
            center.y = room.min_border().y;
        } else if biased.y < toward.y {
            center.y = room.max_border().y;
        }
    }
}

/// Emit straight road segments for every spanning-tree edge
///
/// Each endpoint room whose boundary does not already contain the road
/// center contributes one road from its border (at the biased center line)
/// to the center.
pub fn emit_roads<R: Rng>(segments: &[STEdge], rooms: &[Room], rng: &mut R) -> Vec<Corridor> {
    let mut roads = Vec::new();

    for segment in segments {
        let (room_a, room_b) = match (
            room_by_point(rooms, segment.a),
            room_by_point(rooms, segment.b),
        ) {
            (Some(a), Some(b)) => (a, b),
            _ => continue,
        };

        let center = road_center(room_a, room_b, rng);
        for room in [room_a, room_b] {
            if room.in_boundary(center) {
                continue;
            }
            if let Some(start) = border_start(room, center) {
                roads.push(Corridor::new(start, center));
            }
        }
    }

    roads
}

/// The point on `room`'s border where its road toward `center` begins
fn border_start(room: &Room, center: Vec2) -> Option<Vec2> {
    let biased = room.biased_center();
    if biased.x == center.x {
        let y = if center.y > biased.y {
            room.max_border().y
        } else {
            room.min_border().y
        };
        Some(Vec2::new(biased.x, y))
    } else if biased.y == center.y {
        let x = if center.x > biased.x {
            room.max_border().x
        } else {
            room.min_border().x
        };
        Some(Vec2::new(x, biased.y))
    } else {
        None
    }
}

/// Split roads that run through rooms into stubs and gap segments
///
/// A road crosses a room when its centerline is strictly inside the room's
/// span on the fixed axis and their extents overlap on the long axis. Each
/// crossed road is replaced by its pieces outside the crossed rooms; the
/// rooms' own floors bridge the removed stretches.
pub fn split_crossed_roads(roads: Vec<Corridor>, rooms: &[Room]) -> Vec<Corridor> {
    let mut result = Vec::new();

    for road in roads {
        let mut crossed = crossed_rooms(&road, rooms);
        if crossed.is_empty() {
            result.push(road);
            continue;
        }

        if road.is_vertical() {
            crossed.sort_by(|a, b| a.center().y.total_cmp(&b.center().y));
            let x = road.start().x;
            let first = crossed[0];
            let last = crossed[crossed.len() - 1];

            if road.min_border() < first.min_border().y {
                result.push(Corridor::new(
                    Vec2::new(x, road.min_border()),
                    Vec2::new(x, first.min_border().y),
                ));
            }
            if road.max_border() > last.max_border().y {
                result.push(Corridor::new(
                    Vec2::new(x, last.max_border().y),
                    Vec2::new(x, road.max_border()),
                ));
            }
            for pair in crossed.windows(2) {
                result.push(Corridor::new(
                    Vec2::new(x, pair[0].max_border().y),
                    Vec2::new(x, pair[1].min_border().y),
                ));
            }
        } else {
            crossed.sort_by(|a, b| a.center().x.total_cmp(&b.center().x));
            let y = road.start().y;
            let first = crossed[0];
            let last = crossed[crossed.len() - 1];

            if road.min_border() < first.min_border().x {
                result.push(Corridor::new(
                    Vec2::new(road.min_border(), y),
                    Vec2::new(first.min_border().x, y),
                ));
            }
            if road.max_border() > last.max_border().x {
                result.push(Corridor::new(
                    Vec2::new(last.max_border().x, y),
                    Vec2::new(road.max_border(), y),
                ));
            }
            for pair in crossed.windows(2) {
                result.push(Corridor::new(
                    Vec2::new(pair[0].max_border().x, y),
                    Vec2::new(pair[1].min_border().x, y),
                ));
            }
        }
    }

    result
}

fn crossed_rooms<'a>(road: &Corridor, rooms: &'a [Room]) -> Vec<&'a Room> {
    rooms
        .iter()
        .filter(|room| {
            if road.is_vertical() {
                road.start().x > room.min_border().x
                    && road.start().x < room.max_border().x
                    && road.min_border() < room.max_border().y
                    && road.max_border() > room.min_border().y
            } else {
                road.start().y > room.min_border().y
                    && road.start().y < room.max_border().y
                    && road.min_border() < room.max_border().x
                    && road.max_border() > room.min_border().x
            }
        })
        .collect()
}
