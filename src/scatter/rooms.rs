//! Rejection-sampled room placement and main-room selection

use glam::Vec2;
use rand::Rng;

use crate::config::ScatterConfig;
use crate::room::Room;

/// Scatter candidate rooms across the map
///
/// Draws up to `total_room_count²` candidates and keeps those that fit the
/// map and keep their distance from every accepted room. Stops early once
/// the requested count is reached; a crowded configuration may accept fewer.
pub fn place_rooms<R: Rng>(config: &ScatterConfig, rng: &mut R) -> Vec<Room> {
    let mut rooms: Vec<Room> = Vec::with_capacity(config.total_room_count);
    let attempts = config.total_room_count * config.total_room_count;

    for _ in 0..attempts {
        let size = Vec2::new(
            rng.gen_range(config.min_room_size.x..=config.max_room_size.x) as f32,
            rng.gen_range(config.min_room_size.y..=config.max_room_size.y) as f32,
        );
        let mut center = Vec2::new(
            rng.gen_range(1..config.map_size.x) as f32,
            rng.gen_range(1..config.map_size.y) as f32,
        );
        // An odd extent gets a half-cell center so the borders stay on grid
        // lines.
        if size.x as i32 % 2 == 1 {
            center.x += 0.5;
        }
        if size.y as i32 % 2 == 1 {
            center.y += 0.5;
        }

        if !placement_valid(center, size, config, &rooms) {
            continue;
        }

        rooms.push(Room::new(center, size, rng));
        if rooms.len() == config.total_room_count {
            break;
        }
    }

    rooms
}

fn placement_valid(center: Vec2, size: Vec2, config: &ScatterConfig, rooms: &[Room]) -> bool {
    let half = size / 2.0;
    if center.x - half.x < 0.0
        || center.x + half.x > config.map_size.x as f32
        || center.y - half.y < 0.0
        || center.y + half.y > config.map_size.y as f32
    {
        return false;
    }

    rooms.iter().all(|room| {
        (room.center().x - center.x).abs() >= (room.size().x + size.x) * config.separation_factor
            || (room.center().y - center.y).abs()
                >= (room.size().y + size.y) * config.separation_factor
    })
}

/// The largest `main_count` rooms by priority, largest first
///
/// The sort is stable, so equal-priority rooms keep their placement order
/// and selection stays deterministic.
pub fn select_main_rooms(rooms: &[Room], main_count: usize) -> Vec<Room> {
    let mut ranked = rooms.to_vec();
    ranked.sort_by(|a, b| b.priority().cmp(&a.priority()));
    ranked.truncate(main_count);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScatterConfigBuilder;
    use glam::IVec2;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn config(seed: u64) -> ScatterConfig {
        ScatterConfigBuilder::new().seed(seed).build().unwrap()
    }

    #[test]
    fn test_rooms_fit_the_map() {
        for seed in 0..10 {
            let config = config(seed);
            let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
            for room in place_rooms(&config, &mut rng) {
                assert!(room.min_border().x >= 0.0 && room.min_border().y >= 0.0);
                assert!(room.max_border().x <= 40.0 && room.max_border().y <= 40.0);
                // Integral borders, whatever the parity of the size.
                assert_eq!(room.min_border().x.fract(), 0.0);
                assert_eq!(room.min_border().y.fract(), 0.0);
            }
        }
    }

    #[test]
    fn test_rooms_keep_their_distance() {
        for seed in 0..10 {
            let config = config(seed);
            let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
            let rooms = place_rooms(&config, &mut rng);
            assert!(rooms.len() >= 2, "seed {}", seed);

            for (i, a) in rooms.iter().enumerate() {
                for b in &rooms[i + 1..] {
                    let apart_x = (a.center().x - b.center().x).abs()
                        >= (a.size().x + b.size().x) * config.separation_factor;
                    let apart_y = (a.center().y - b.center().y).abs()
                        >= (a.size().y + b.size().y) * config.separation_factor;
                    assert!(apart_x || apart_y, "seed {}", seed);
                }
            }
        }
    }

    #[test]
    fn test_crowded_map_under_fills() {
        let config = ScatterConfigBuilder::new()
            .seed(0)
            .map_size(12, 12)
            .unwrap()
            .room_counts(50, 1)
            .unwrap()
            .room_size_range(IVec2::new(6, 6), IVec2::new(8, 8))
            .unwrap()
            .build()
            .unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let rooms = place_rooms(&config, &mut rng);
        assert!(!rooms.is_empty());
        assert!(rooms.len() < 50);
    }

    #[test]
    fn test_main_rooms_are_the_largest() {
        let config = config(5);
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let rooms = place_rooms(&config, &mut rng);
        let main = select_main_rooms(&rooms, 4);

        assert_eq!(main.len(), 4);
        let mut expected: Vec<i32> = rooms.iter().map(|r| r.priority()).collect();
        expected.sort_unstable_by(|a, b| b.cmp(a));
        let selected: Vec<i32> = main.iter().map(|r| r.priority()).collect();
        assert_eq!(selected, expected[..4]);
    }

    #[test]
    fn test_selection_caps_at_available() {
        let config = config(9);
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let rooms = place_rooms(&config, &mut rng);
        let main = select_main_rooms(&rooms, rooms.len() + 10);
        assert_eq!(main.len(), rooms.len());
    }
}
