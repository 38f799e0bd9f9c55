//! Arena-based binary space partitioning tree
//!
//! Nodes live in a flat `Vec` and refer to each other by index, so the tree
//! is a single allocation and traversals are plain loops over indices.
//! Children are stored first/second in split order: left before right for a
//! vertical split, bottom before top for a horizontal one.

use glam::{IVec2, Vec2};
use rand::Rng;

use crate::corridor::Corridor;
use crate::rect::Rect;
use crate::room::Room;

/// A node may split along an axis only when its extent on that axis is at
/// least this fraction of the other extent. Keeps cells from degenerating
/// into slivers.
const MIN_SPLIT_RATIO: f32 = 0.45;

struct Node {
    level: usize,
    rect: Rect,
    children: Option<(usize, usize)>,
    split_vertical: bool,
    room: Option<Room>,
    room_rect: Option<Rect>,
    corridor: Option<Corridor>,
    corridor_rect: Option<Rect>,
    valid_rect: Option<Rect>,
    split_exhausted: bool,
}

impl Node {
    fn new(level: usize, rect: Rect) -> Self {
        Self {
            level,
            rect,
            children: None,
            split_vertical: false,
            room: None,
            room_rect: None,
            corridor: None,
            corridor_rect: None,
            valid_rect: None,
            split_exhausted: false,
        }
    }

    fn is_leaf(&self) -> bool {
        self.children.is_none()
    }
}

pub struct BspTree {
    nodes: Vec<Node>,
    min_node_size: IVec2,
    min_room_ratio: Vec2,
    split_retry_limit: usize,
    skipped_corridors: usize,
}

impl BspTree {
    pub fn new(
        bounds: Rect,
        min_node_size: IVec2,
        min_room_ratio: Vec2,
        split_retry_limit: usize,
    ) -> Self {
        Self {
            nodes: vec![Node::new(0, bounds)],
            min_node_size,
            min_room_ratio,
            split_retry_limit,
            skipped_corridors: 0,
        }
    }

    /// Deepen every splittable leaf by one level
    pub fn split<R: Rng>(&mut self, rng: &mut R) {
        let leaves: Vec<usize> = (0..self.nodes.len())
            .filter(|&i| self.nodes[i].is_leaf() && !self.nodes[i].split_exhausted)
            .collect();
        for index in leaves {
            self.split_node(index, rng);
        }
    }

    fn split_node<R: Rng>(&mut self, index: usize, rng: &mut R) {
        let rect = self.nodes[index].rect;
        let can_vertical = rect.width >= self.min_node_size.x * 2
            && rect.width as f32 / rect.height as f32 >= MIN_SPLIT_RATIO;
        let can_horizontal = rect.height >= self.min_node_size.y * 2
            && rect.height as f32 / rect.width as f32 >= MIN_SPLIT_RATIO;
        if !can_vertical && !can_horizontal {
            self.nodes[index].split_exhausted = true;
            return;
        }

        // Axis and offset are re-rolled together; an unlucky run of offsets
        // leaves the node a permanent leaf instead of looping forever.
        for _ in 0..self.split_retry_limit {
            let vertical = if can_vertical && can_horizontal {
                rng.gen_range(0..2) == 0
            } else {
                can_vertical
            };

            let (extent, minimum) = if vertical {
                (rect.width, self.min_node_size.x)
            } else {
                (rect.height, self.min_node_size.y)
            };
            let offset = rng.gen_range(extent as f32 * 0.3..extent as f32 * 0.7) as i32;
            if offset < minimum || extent - offset < minimum {
                continue;
            }

            let (first, second) = if vertical {
                (
                    Rect::new(rect.x, rect.y, offset, rect.height),
                    Rect::new(rect.x + offset, rect.y, rect.width - offset, rect.height),
                )
            } else {
                (
                    Rect::new(rect.x, rect.y, rect.width, offset),
                    Rect::new(rect.x, rect.y + offset, rect.width, rect.height - offset),
                )
            };

            let level = self.nodes[index].level + 1;
            let first_index = self.nodes.len();
            self.nodes.push(Node::new(level, first));
            self.nodes.push(Node::new(level, second));
            self.nodes[index].children = Some((first_index, first_index + 1));
            self.nodes[index].split_vertical = vertical;
            return;
        }

        self.nodes[index].split_exhausted = true;
    }

    /// Carve one room into every leaf cell
    pub fn generate_rooms<R: Rng>(&mut self, rng: &mut R) {
        for index in self.leaf_indices() {
            let rect = self.nodes[index].rect;
            let width = carve_extent(rect.width, self.min_room_ratio.x, rng);
            let height = carve_extent(rect.height, self.min_room_ratio.y, rng);
            let offset_x = carve_offset(rect.width - width, rng);
            let offset_y = carve_offset(rect.height - height, rng);

            let room_rect = Rect::new(rect.x + offset_x, rect.y + offset_y, width, height);
            self.nodes[index].room = Some(Room::from_rect(room_rect, rng));
            self.nodes[index].room_rect = Some(room_rect);
            self.nodes[index].valid_rect = Some(room_rect);
        }
    }

    /// Connect the children of every internal node, deepest level first
    ///
    /// Processing bottom-up means each node's two subtrees are already
    /// internally connected, so one corridor per node connects everything.
    pub fn generate_corridors<R: Rng>(&mut self, rng: &mut R) {
        let deepest = self.nodes.iter().map(|n| n.level).max().unwrap_or(0);
        for level in (0..deepest).rev() {
            let internal: Vec<usize> = (0..self.nodes.len())
                .filter(|&i| self.nodes[i].level == level && !self.nodes[i].is_leaf())
                .collect();
            for index in internal {
                self.connect_children(index, rng);
            }
        }
    }

    fn connect_children<R: Rng>(&mut self, index: usize, rng: &mut R) {
        let (near, far) = match self.nodes[index].children {
            Some(children) => children,
            None => return,
        };
        let (near_valid, far_valid) = match (self.nodes[near].valid_rect, self.nodes[far].valid_rect)
        {
            (Some(a), Some(b)) => (a, b),
            _ => {
                self.skipped_corridors += 1;
                return;
            }
        };
        // The corridor never counts toward the region future corridors may
        // target, so the valid rect is the plain bounding union.
        self.nodes[index].valid_rect = Some(near_valid.union(&far_valid));

        let vertical_split = self.nodes[index].split_vertical;

        // A corridor perpendicular to the split can land anywhere both
        // children's valid rects cover; an empty intersection means the two
        // subtrees offer no straight connection at this node.
        let (low, high) = if vertical_split {
            (
                near_valid.y.max(far_valid.y),
                near_valid.top().min(far_valid.top()),
            )
        } else {
            (
                near_valid.x.max(far_valid.x),
                near_valid.right().min(far_valid.right()),
            )
        };
        if low >= high {
            self.skipped_corridors += 1;
            return;
        }
        let coordinate = rng.gen_range(low..high);

        // Anchor on the rect each subtree exposes closest to the divider.
        let near_anchor = self.anchor_rect(near, coordinate, vertical_split, true);
        let far_anchor = self.anchor_rect(far, coordinate, vertical_split, false);
        let (near_anchor, far_anchor) = match (near_anchor, far_anchor) {
            (Some(a), Some(b)) => (a, b),
            _ => {
                self.skipped_corridors += 1;
                return;
            }
        };

        let (start, length) = if vertical_split {
            (near_anchor.right(), far_anchor.x - near_anchor.right())
        } else {
            (near_anchor.top(), far_anchor.y - near_anchor.top())
        };
        debug_assert!(length >= 0);

        // Corridors are horizontal across a vertical split and vice versa.
        let corridor_vertical = !vertical_split;
        self.nodes[index].corridor =
            Some(Corridor::from_span(coordinate, start, length, corridor_vertical));
        if length > 0 {
            self.nodes[index].corridor_rect = Some(if corridor_vertical {
                Rect::new(coordinate, start, 1, length)
            } else {
                Rect::new(start, coordinate, length, 1)
            });
        }
    }

    /// Pick the room or corridor rect in `root`'s subtree that the corridor
    /// line crosses: the one reaching furthest toward the divider on the near
    /// side, the one reaching least far past it on the far side
    fn anchor_rect(
        &self,
        root: usize,
        coordinate: i32,
        vertical_split: bool,
        near_side: bool,
    ) -> Option<Rect> {
        let mut crossed = Vec::new();
        self.collect_crossed(root, coordinate, vertical_split, &mut crossed);

        let far_edge = |rect: &Rect| {
            if vertical_split {
                rect.right()
            } else {
                rect.top()
            }
        };
        if near_side {
            crossed.into_iter().max_by_key(|r| far_edge(r))
        } else {
            crossed.into_iter().min_by_key(|r| far_edge(r))
        }
    }

    fn collect_crossed(&self, index: usize, coordinate: i32, vertical_split: bool, out: &mut Vec<Rect>) {
        let node = &self.nodes[index];
        let crosses = |rect: &Rect| {
            if vertical_split {
                rect.in_boundary_y(coordinate)
            } else {
                rect.in_boundary_x(coordinate)
            }
        };
        if let Some(rect) = node.room_rect {
            if crosses(&rect) {
                out.push(rect);
            }
        }
        if let Some(rect) = node.corridor_rect {
            if crosses(&rect) {
                out.push(rect);
            }
        }
        if let Some((first, second)) = node.children {
            self.collect_crossed(first, coordinate, vertical_split, out);
            self.collect_crossed(second, coordinate, vertical_split, out);
        }
    }

    fn leaf_indices(&self) -> Vec<usize> {
        let mut leaves = Vec::new();
        self.visit_leaves(0, &mut leaves);
        leaves
    }

    fn visit_leaves(&self, index: usize, out: &mut Vec<usize>) {
        match self.nodes[index].children {
            Some((first, second)) => {
                self.visit_leaves(first, out);
                self.visit_leaves(second, out);
            }
            None => out.push(index),
        }
    }

    /// Leaf cell rectangles in depth-first order
    pub fn leaf_rects(&self) -> Vec<Rect> {
        self.leaf_indices()
            .into_iter()
            .map(|i| self.nodes[i].rect)
            .collect()
    }

    /// Carved rooms in depth-first leaf order
    pub fn rooms(&self) -> Vec<Room> {
        self.leaf_indices()
            .into_iter()
            .filter_map(|i| self.nodes[i].room.clone())
            .collect()
    }

    /// How many internal nodes could not be connected
    ///
    /// Every internal node either emits a corridor or counts here, so
    /// `corridors().len() + skipped_corridors()` equals the internal node
    /// count. A nonzero value means the layout has disconnected regions.
    pub fn skipped_corridors(&self) -> usize {
        self.skipped_corridors
    }

    /// Generated corridors, one per connected internal node
    pub fn corridors(&self) -> Vec<Corridor> {
        let mut corridors = Vec::new();
        self.visit_corridors(0, &mut corridors);
        corridors
    }

    fn visit_corridors(&self, index: usize, out: &mut Vec<Corridor>) {
        if let Some(corridor) = &self.nodes[index].corridor {
            out.push(corridor.clone());
        }
        if let Some((first, second)) = self.nodes[index].children {
            self.visit_corridors(first, out);
            self.visit_corridors(second, out);
        }
    }
}

/// Room extent along one axis: uniform in `[ratio * extent, extent)`,
/// truncated to the grid and never below one cell
fn carve_extent<R: Rng>(extent: i32, ratio: f32, rng: &mut R) -> i32 {
    let low = ratio * extent as f32;
    let high = extent as f32;
    let carved = if low < high {
        rng.gen_range(low..high) as i32
    } else {
        extent
    };
    carved.max(1)
}

fn carve_offset<R: Rng>(slack: i32, rng: &mut R) -> i32 {
    if slack > 0 {
        rng.gen_range(0..slack)
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn tree(width: i32, height: i32) -> BspTree {
        tree_with_ratio(width, height, 0.45)
    }

    fn tree_with_ratio(width: i32, height: i32, ratio: f32) -> BspTree {
        BspTree::new(
            Rect::new(0, 0, width, height),
            IVec2::new(3, 3),
            Vec2::new(ratio, ratio),
            16,
        )
    }

    #[test]
    fn test_split_tiles_the_map() {
        for seed in 0..20 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let mut tree = tree(40, 30);
            for _ in 0..4 {
                tree.split(&mut rng);
            }

            let leaves = tree.leaf_rects();
            let total: i64 = leaves.iter().map(|r| r.area()).sum();
            assert_eq!(total, 40 * 30, "seed {}", seed);
            for (i, a) in leaves.iter().enumerate() {
                for b in &leaves[i + 1..] {
                    assert!(!a.overlaps(b), "seed {}: {:?} overlaps {:?}", seed, a, b);
                }
            }
        }
    }

    #[test]
    fn test_split_respects_min_node_size() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut tree = tree(50, 50);
        for _ in 0..6 {
            tree.split(&mut rng);
        }
        for rect in tree.leaf_rects() {
            assert!(rect.width >= 3 && rect.height >= 3, "{:?}", rect);
        }
    }

    #[test]
    fn test_too_small_node_stays_leaf() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut tree = tree(5, 5);
        tree.split(&mut rng);
        assert_eq!(tree.leaf_rects(), vec![Rect::new(0, 0, 5, 5)]);
    }

    #[test]
    fn test_rooms_fit_their_leaves() {
        for seed in 0..20 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let mut tree = tree(40, 40);
            for _ in 0..3 {
                tree.split(&mut rng);
            }
            tree.generate_rooms(&mut rng);

            let leaves = tree.leaf_rects();
            let rooms = tree.rooms();
            assert_eq!(rooms.len(), leaves.len());
            for (room, leaf) in rooms.iter().zip(&leaves) {
                assert!(room.min_border().x >= leaf.x as f32);
                assert!(room.min_border().y >= leaf.y as f32);
                assert!(room.max_border().x <= leaf.right() as f32);
                assert!(room.max_border().y <= leaf.top() as f32);
            }
        }
    }

    #[test]
    fn test_one_corridor_per_connected_split() {
        // Ratio 1.0 makes rooms fill their leaves, so the valid ranges of
        // sibling subtrees always intersect and a corridor is guaranteed.
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut tree = tree_with_ratio(40, 40, 1.0);
        tree.split(&mut rng);
        tree.generate_rooms(&mut rng);
        tree.generate_corridors(&mut rng);

        assert_eq!(tree.rooms().len(), 2);
        assert_eq!(tree.corridors().len(), 1);
    }

    #[test]
    fn test_corridor_spans_the_gap_between_rooms() {
        for seed in 0..20 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            // Rooms cover at least 90% of each leaf, so the sibling rooms'
            // spans always overlap and a corridor is always emitted.
            let mut tree = tree_with_ratio(40, 40, 0.9);
            tree.split(&mut rng);
            tree.generate_rooms(&mut rng);
            tree.generate_corridors(&mut rng);

            let rooms = tree.rooms();
            let corridors = tree.corridors();
            assert_eq!(corridors.len(), 1, "seed {}", seed);

            // Each endpoint lies on a room boundary.
            for point in [corridors[0].start(), corridors[0].end()] {
                assert!(
                    rooms.iter().any(|r| r.in_boundary(point)),
                    "seed {}: endpoint {:?} touches no room",
                    seed,
                    point
                );
            }
        }
    }

    #[test]
    fn test_every_internal_node_connects_or_counts() {
        // Corridors and skips together must account for every internal node
        // (one less than the leaf count), so disconnection is always visible.
        for seed in 0..20 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let mut tree = tree(60, 60);
            for _ in 0..4 {
                tree.split(&mut rng);
            }
            tree.generate_rooms(&mut rng);
            tree.generate_corridors(&mut rng);

            let internal = tree.leaf_rects().len() - 1;
            assert_eq!(
                tree.corridors().len() + tree.skipped_corridors(),
                internal,
                "seed {}",
                seed
            );
        }
    }

    #[test]
    fn test_carve_extent_never_zero() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        for _ in 0..100 {
            assert!(carve_extent(2, 0.45, &mut rng) >= 1);
        }
        assert_eq!(carve_extent(6, 1.0, &mut rng), 6);
    }
}
