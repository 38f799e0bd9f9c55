//! Spanning-tree reduction over candidate corridor edges
//!
//! Reduces the proximity graph to a tree touching every room exactly once.
//! Three interchangeable strategies are offered; they differ in shape, not
//! in the connectivity guarantee.

use std::collections::{HashMap, VecDeque};

use glam::Vec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{DungeonError, Result};

/// A candidate connection between two room centers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct STEdge {
    pub a: Vec2,
    pub b: Vec2,
}

impl STEdge {
    pub fn new(a: Vec2, b: Vec2) -> Self {
        Self { a, b }
    }

    /// Euclidean distance between the endpoints
    #[inline]
    pub fn weight(&self) -> f32 {
        self.a.distance(self.b)
    }
}

/// How to reduce the candidate edge set to a tree
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanningTreeStrategy {
    /// Kruskal's algorithm: minimum total corridor length
    Minimum,
    /// Depth-first traversal: long winding chains
    DepthFirst,
    /// Breadth-first traversal: star-like hubs around the first room
    BreadthFirst,
}

/// A spanning tree over the input point set
///
/// Holds exactly `n - 1` segments for `n` distinct endpoints, each segment
/// being one of the input edges.
#[derive(Debug, Clone)]
pub struct SpanningTree {
    segments: Vec<STEdge>,
}

impl SpanningTree {
    /// Reduce `edges` to a spanning tree using the given strategy
    ///
    /// # Errors
    ///
    /// Returns `GenerationFailed` when the edge set is empty or does not
    /// connect all of its endpoints.
    pub fn build(edges: &[STEdge], strategy: SpanningTreeStrategy) -> Result<Self> {
        if edges.is_empty() {
            return Err(DungeonError::GenerationFailed(
                "cannot build a spanning tree from an empty edge set".into(),
            ));
        }

        let index = PointIndex::new(edges);
        let segments = match strategy {
            SpanningTreeStrategy::Minimum => kruskal(edges, &index),
            SpanningTreeStrategy::DepthFirst => depth_first(edges, &index),
            SpanningTreeStrategy::BreadthFirst => breadth_first(edges, &index),
        };

        if segments.len() + 1 != index.len() {
            return Err(DungeonError::GenerationFailed(format!(
                "edge set does not connect all {} points ({} tree edges)",
                index.len(),
                segments.len()
            )));
        }

        Ok(Self { segments })
    }

    /// The tree edges, a subset of the input edge set
    pub fn segments(&self) -> &[STEdge] {
        &self.segments
    }
}

/// Maps exact point coordinates to dense indices
struct PointIndex {
    indices: HashMap<(u32, u32), usize>,
}

impl PointIndex {
    fn new(edges: &[STEdge]) -> Self {
        let mut indices = HashMap::new();
        for edge in edges {
            for point in [edge.a, edge.b] {
                let next = indices.len();
                indices.entry(Self::key(point)).or_insert(next);
            }
        }
        Self { indices }
    }

    fn key(point: Vec2) -> (u32, u32) {
        (point.x.to_bits(), point.y.to_bits())
    }

    fn get(&self, point: Vec2) -> usize {
        self.indices[&Self::key(point)]
    }

    fn len(&self) -> usize {
        self.indices.len()
    }
}

/// Union-find with union by rank and path halving
struct DisjointSet {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl DisjointSet {
    fn new(len: usize) -> Self {
        Self {
            parent: (0..len).collect(),
            rank: vec![0; len],
        }
    }

    fn find(&mut self, mut node: usize) -> usize {
        while self.parent[node] != node {
            self.parent[node] = self.parent[self.parent[node]];
            node = self.parent[node];
        }
        node
    }

    /// Merge the two sets; returns false when already joined
    fn union(&mut self, a: usize, b: usize) -> bool {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra == rb {
            return false;
        }
        match self.rank[ra].cmp(&self.rank[rb]) {
            std::cmp::Ordering::Less => self.parent[ra] = rb,
            std::cmp::Ordering::Greater => self.parent[rb] = ra,
            std::cmp::Ordering::Equal => {
                self.parent[rb] = ra;
                self.rank[ra] += 1;
            }
        }
        true
    }
}

fn kruskal(edges: &[STEdge], index: &PointIndex) -> Vec<STEdge> {
    let mut order: Vec<usize> = (0..edges.len()).collect();
    // Ties broken by input order for determinism.
    order.sort_by(|&i, &j| {
        edges[i]
            .weight()
            .partial_cmp(&edges[j].weight())
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(i.cmp(&j))
    });

    let mut set = DisjointSet::new(index.len());
    let mut segments = Vec::with_capacity(index.len().saturating_sub(1));
    for i in order {
        let edge = edges[i];
        if set.union(index.get(edge.a), index.get(edge.b)) {
            segments.push(edge);
            if segments.len() + 1 == index.len() {
                break;
            }
        }
    }
    segments
}

fn adjacency(edges: &[STEdge], index: &PointIndex) -> Vec<Vec<(usize, usize)>> {
    let mut adjacency = vec![Vec::new(); index.len()];
    for (i, edge) in edges.iter().enumerate() {
        let (a, b) = (index.get(edge.a), index.get(edge.b));
        adjacency[a].push((b, i));
        adjacency[b].push((a, i));
    }
    adjacency
}

fn depth_first(edges: &[STEdge], index: &PointIndex) -> Vec<STEdge> {
    let adjacency = adjacency(edges, index);
    let mut visited = vec![false; index.len()];
    let mut segments = Vec::new();
    let mut stack = vec![0];
    visited[0] = true;

    while let Some(node) = stack.pop() {
        for &(neighbor, edge) in &adjacency[node] {
            if !visited[neighbor] {
                visited[neighbor] = true;
                segments.push(edges[edge]);
                stack.push(neighbor);
            }
        }
    }
    segments
}

fn breadth_first(edges: &[STEdge], index: &PointIndex) -> Vec<STEdge> {
    let adjacency = adjacency(edges, index);
    let mut visited = vec![false; index.len()];
    let mut segments = Vec::new();
    let mut queue = VecDeque::from([0]);
    visited[0] = true;

    while let Some(node) = queue.pop_front() {
        for &(neighbor, edge) in &adjacency[node] {
            if !visited[neighbor] {
                visited[neighbor] = true;
                segments.push(edges[edge]);
                queue.push_back(neighbor);
            }
        }
    }
    segments
}
