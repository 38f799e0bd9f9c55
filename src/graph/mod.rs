//! Proximity graph and spanning-tree corridor routing support
//!
//! The scatter strategy routes corridors along a spanning tree of the
//! Delaunay proximity graph over the main rooms' centers. This module owns
//! both halves: candidate-edge construction and tree reduction.

mod delaunay;
mod spanning_tree;

pub use delaunay::proximity_edges;
pub use spanning_tree::{STEdge, SpanningTree, SpanningTreeStrategy};
