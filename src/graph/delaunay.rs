//! Delaunay proximity graph over room centers
//!
//! The 2D Delaunay triangulation is recovered from a 3D convex hull: lifting
//! every site onto the paraboloid z = x² + y² makes the hull's downward-facing
//! triangles exactly the Delaunay triangles of the planar sites. parry3d's
//! hull routine does the heavy lifting.
//!
//! Degenerate inputs (fewer than three sites, or all sites collinear, where
//! the lifted points are coplanar and the hull fails) fall back to the
//! complete graph; the spanning-tree reduction downstream restores minimality.

use std::collections::{BTreeSet, HashMap};

use glam::Vec2;
use parry3d::math::Point;
use parry3d::transformation;

use super::spanning_tree::STEdge;

/// Build the candidate corridor edges for a set of room centers
///
/// Each returned edge joins two sites that are Delaunay neighbors. The edge
/// set is deduplicated and deterministically ordered.
pub fn proximity_edges(sites: &[Vec2]) -> Vec<STEdge> {
    match sites.len() {
        0 | 1 => Vec::new(),
        2 => vec![STEdge::new(sites[0], sites[1])],
        _ => delaunay_edges(sites).unwrap_or_else(|| complete_graph(sites)),
    }
}

fn delaunay_edges(sites: &[Vec2]) -> Option<Vec<STEdge>> {
    let lifted: Vec<Point<f32>> = sites
        .iter()
        .map(|p| Point::new(p.x, p.y, p.x * p.x + p.y * p.y))
        .collect();

    let (vertices, triangles) = transformation::try_convex_hull(&lifted).ok()?;

    // The hull reorders its vertices; map them back to site indices by
    // exact coordinate match (hull vertices are copies of input points).
    let mut site_index: HashMap<(u32, u32), usize> = HashMap::with_capacity(sites.len());
    for (i, site) in sites.iter().enumerate() {
        site_index.insert((site.x.to_bits(), site.y.to_bits()), i);
    }
    let site_of: Vec<usize> = vertices
        .iter()
        .map(|v| site_index.get(&(v.x.to_bits(), v.y.to_bits())).copied())
        .collect::<Option<_>>()?;

    let mut pairs: BTreeSet<(usize, usize)> = BTreeSet::new();
    for triangle in &triangles {
        let [a, b, c] = [
            triangle[0] as usize,
            triangle[1] as usize,
            triangle[2] as usize,
        ];
        // Only the lower hull projects to the Delaunay triangulation.
        let edge1 = vertices[b] - vertices[a];
        let edge2 = vertices[c] - vertices[a];
        if edge1.cross(&edge2).z >= 0.0 {
            continue;
        }
        for (i, j) in [(a, b), (b, c), (c, a)] {
            let (s, t) = (site_of[i], site_of[j]);
            pairs.insert((s.min(t), s.max(t)));
        }
    }

    if pairs.is_empty() {
        return None;
    }
    Some(
        pairs
            .into_iter()
            .map(|(i, j)| STEdge::new(sites[i], sites[j]))
            .collect(),
    )
}

fn complete_graph(sites: &[Vec2]) -> Vec<STEdge> {
    let mut edges = Vec::with_capacity(sites.len() * (sites.len() - 1) / 2);
    for i in 0..sites.len() {
        for j in (i + 1)..sites.len() {
            edges.push(STEdge::new(sites[i], sites[j]));
        }
    }
    edges
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{SpanningTree, SpanningTreeStrategy};

    fn has_edge(edges: &[STEdge], a: Vec2, b: Vec2) -> bool {
        edges
            .iter()
            .any(|e| (e.a == a && e.b == b) || (e.a == b && e.b == a))
    }

    #[test]
    fn test_few_sites() {
        assert!(proximity_edges(&[]).is_empty());
        assert!(proximity_edges(&[Vec2::new(1.0, 1.0)]).is_empty());

        let pair = [Vec2::new(0.0, 0.0), Vec2::new(3.0, 4.0)];
        let edges = proximity_edges(&pair);
        assert_eq!(edges.len(), 1);
        assert!((edges[0].weight() - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_quad_triangulation() {
        // A convex quad that is not cocircular (a perfect square would lift
        // onto a plane and degenerate the hull). The short diagonal here is
        // the Delaunay one.
        let sites = [
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(11.0, 11.0),
            Vec2::new(0.0, 10.0),
        ];
        let edges = proximity_edges(&sites);

        // Four boundary edges plus one diagonal.
        assert_eq!(edges.len(), 5);
        for i in 0..4 {
            assert!(has_edge(&edges, sites[i], sites[(i + 1) % 4]));
        }
        assert!(has_edge(&edges, sites[1], sites[3]));
        assert!(!has_edge(&edges, sites[0], sites[2]));
    }

    #[test]
    fn test_far_sites_not_neighbors() {
        // A point well inside a ring should not connect across the ring.
        let sites = [
            Vec2::new(0.0, 0.0),
            Vec2::new(20.0, 0.0),
            Vec2::new(40.0, 0.0),
            Vec2::new(20.0, 20.0),
            Vec2::new(20.0, -20.0),
        ];
        let edges = proximity_edges(&sites);
        // The two extreme x sites are separated by the middle column.
        assert!(!has_edge(&edges, sites[0], sites[2]));
    }

    #[test]
    fn test_collinear_sites_fall_back() {
        let sites = [
            Vec2::new(0.0, 0.0),
            Vec2::new(5.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(15.0, 0.0),
        ];
        let edges = proximity_edges(&sites);
        // Complete-graph fallback still yields a connected candidate set.
        assert_eq!(edges.len(), 6);
        assert!(SpanningTree::build(&edges, SpanningTreeStrategy::Minimum).is_ok());
    }

    #[test]
    fn test_edges_span_all_sites() {
        let sites = [
            Vec2::new(3.5, 2.5),
            Vec2::new(12.5, 4.5),
            Vec2::new(7.5, 11.5),
            Vec2::new(18.5, 10.5),
            Vec2::new(2.5, 16.5),
            Vec2::new(14.5, 17.5),
        ];
        let edges = proximity_edges(&sites);
        let tree = SpanningTree::build(&edges, SpanningTreeStrategy::Minimum).unwrap();
        assert_eq!(tree.segments().len(), sites.len() - 1);
    }
}
