//! Finalized dungeon layout
//!
//! The immutable result both generation strategies produce. Geometry is
//! exported as sorted lists; regenerating from the same configuration yields
//! a structurally identical layout.

use std::collections::BTreeSet;

use glam::{IVec2, Vec2};
use rand::Rng;

use crate::corridor::Corridor;
use crate::room::Room;
use crate::tiles::{Ground, Wall};

#[cfg(feature = "spatial-index")]
use crate::spatial::SpatialIndex;

/// A generated dungeon layout
///
/// Owns the finalized rooms, corridors, and the derived wall, ground, and
/// pillar geometry. Wall and ground lists are sorted and free of duplicates.
#[derive(Clone)]
pub struct DungeonLayout {
    rooms: Vec<Room>,
    corridors: Vec<Corridor>,
    walls: Vec<Wall>,
    grounds: Vec<Ground>,
    pillars: Vec<IVec2>,
    map_size: IVec2,
    requested_rooms: usize,
    accepted_rooms: usize,
    skipped_corridors: usize,
    #[cfg(feature = "spatial-index")]
    spatial_index: Option<SpatialIndex>,
}

impl DungeonLayout {
    /// Assemble a layout from finalized geometry
    ///
    /// Called by the generation pipelines once every derivation stage has
    /// run; `rooms` must not be empty.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        rooms: Vec<Room>,
        corridors: Vec<Corridor>,
        walls: BTreeSet<Wall>,
        grounds: BTreeSet<Ground>,
        pillars: Vec<IVec2>,
        map_size: IVec2,
        requested_rooms: usize,
        accepted_rooms: usize,
        skipped_corridors: usize,
    ) -> Self {
        #[cfg(feature = "spatial-index")]
        let spatial_index = if rooms.is_empty() {
            None
        } else {
            let centers: Vec<Vec2> = rooms.iter().map(|r| r.center()).collect();
            Some(SpatialIndex::new(&centers))
        };

        Self {
            rooms,
            corridors,
            walls: walls.into_iter().collect(),
            grounds: grounds.into_iter().collect(),
            pillars,
            map_size,
            requested_rooms,
            accepted_rooms,
            skipped_corridors,
            #[cfg(feature = "spatial-index")]
            spatial_index,
        }
    }

    /// The rooms contributing geometry to this layout
    ///
    /// For the scatter strategy these are the main rooms; candidates that
    /// placed but did not rank are only reflected in
    /// [`accepted_rooms`](Self::accepted_rooms).
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn corridors(&self) -> &[Corridor] {
        &self.corridors
    }

    /// Wall segments, sorted and deduplicated
    pub fn walls(&self) -> &[Wall] {
        &self.walls
    }

    /// Floor tiles, sorted and deduplicated
    pub fn grounds(&self) -> &[Ground] {
        &self.grounds
    }

    /// Pillar positions at wall corners and run ends, sorted
    pub fn pillars(&self) -> &[IVec2] {
        &self.pillars
    }

    pub fn map_size(&self) -> IVec2 {
        self.map_size
    }

    /// How many rooms the configuration asked for
    ///
    /// The scatter strategy may accept fewer when placement cannot fit them
    /// all; compare with [`accepted_rooms`](Self::accepted_rooms).
    pub fn requested_rooms(&self) -> usize {
        self.requested_rooms
    }

    /// How many rooms placement actually accepted
    pub fn accepted_rooms(&self) -> usize {
        self.accepted_rooms
    }

    /// How many corridors the BSP strategy had to skip
    ///
    /// A partition node whose subtrees offer no straight connection emits no
    /// corridor, leaving the layout with more than one connected region.
    /// Zero means every region is reachable; callers wanting a fully
    /// connected dungeon should regenerate with another seed otherwise.
    /// Always zero for the scatter strategy, whose spanning tree either
    /// connects every main room or fails generation outright.
    pub fn skipped_corridors(&self) -> usize {
        self.skipped_corridors
    }

    /// The center of a randomly chosen room
    ///
    /// Suitable as a spawn point; the returned position is always inside a
    /// room.
    pub fn get_random_position<R: Rng>(&self, rng: &mut R) -> Vec2 {
        self.rooms[rng.gen_range(0..self.rooms.len())].center()
    }

    /// Index of the room whose center is nearest to `position`
    #[cfg(feature = "spatial-index")]
    pub fn find_room_at(&self, position: Vec2) -> Option<usize> {
        self.spatial_index
            .as_ref()
            .map(|index| index.find_nearest(position))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rect::Rect;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn layout() -> DungeonLayout {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let rooms = vec![
            Room::from_rect(Rect::new(0, 0, 4, 4), &mut rng),
            Room::from_rect(Rect::new(10, 10, 6, 6), &mut rng),
        ];
        DungeonLayout::new(
            rooms,
            Vec::new(),
            BTreeSet::new(),
            BTreeSet::new(),
            Vec::new(),
            IVec2::new(20, 20),
            5,
            3,
            1,
        )
    }

    #[test]
    fn test_room_counters() {
        let layout = layout();
        assert_eq!(layout.requested_rooms(), 5);
        assert_eq!(layout.accepted_rooms(), 3);
        assert_eq!(layout.skipped_corridors(), 1);
    }

    #[test]
    fn test_random_position_inside_a_room() {
        let layout = layout();
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        for _ in 0..20 {
            let position = layout.get_random_position(&mut rng);
            assert!(layout.rooms().iter().any(|r| r.in_boundary(position)));
        }
    }

    #[cfg(feature = "spatial-index")]
    #[test]
    fn test_find_room_at() {
        let layout = layout();
        assert_eq!(layout.find_room_at(Vec2::new(1.0, 1.0)), Some(0));
        assert_eq!(layout.find_room_at(Vec2::new(14.0, 12.0)), Some(1));
    }
}
