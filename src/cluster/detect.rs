//! Connected components of the thresholded similarity graph.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::geometry::{centroid, Point};
use crate::similarity::SimilarityEdge;

/// Padding applied to the farthest member distance.
pub const RADIUS_PADDING: f64 = 1.3;

/// A group of at least two mutually reachable subjects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cluster {
    /// Subject indices in ascending order.
    pub members: Vec<usize>,
    pub center: Point,
    pub radius: f64,
}

/// Components of the subgraph of edges with `similarity >= threshold`,
/// singletons dropped.
///
/// Subjects are visited in index order and neighbors in ascending index
/// order, so identical input always yields identical components.
pub fn components(n: usize, edges: &[SimilarityEdge], threshold: f64) -> Vec<Vec<usize>> {
    let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); n];
    for edge in edges {
        if edge.similarity < threshold || edge.source >= n || edge.target >= n {
            continue;
        }
        if edge.source == edge.target {
            continue;
        }
        adjacency[edge.source].push(edge.target);
        adjacency[edge.target].push(edge.source);
    }
    for neighbors in &mut adjacency {
        neighbors.sort_unstable();
        neighbors.dedup();
    }

    let mut visited = vec![false; n];
    let mut result = Vec::new();
    let mut dropped = 0usize;

    for start in 0..n {
        if visited[start] {
            continue;
        }
        visited[start] = true;
        let mut component = vec![start];
        let mut queue = VecDeque::from([start]);

        while let Some(node) = queue.pop_front() {
            for &next in &adjacency[node] {
                if !visited[next] {
                    visited[next] = true;
                    component.push(next);
                    queue.push_back(next);
                }
            }
        }

        if component.len() >= 2 {
            component.sort_unstable();
            result.push(component);
        } else {
            dropped += 1;
        }
    }

    tracing::debug!(
        clusters = result.len(),
        singletons = dropped,
        threshold,
        "Detected clusters"
    );
    result
}

/// Centroid of the members and 1.3 × the farthest member distance.
pub fn bounds(members: &[usize], positions: &[Point]) -> (Point, f64) {
    let points: Vec<Point> = members
        .iter()
        .filter_map(|&i| positions.get(i).copied())
        .collect();
    let center = centroid(&points);
    let farthest = points
        .iter()
        .map(|p| p.distance(&center))
        .fold(0.0, f64::max);
    (center, farthest * RADIUS_PADDING)
}

/// Clusters with bounds computed from the current positions.
pub fn detect(positions: &[Point], edges: &[SimilarityEdge], threshold: f64) -> Vec<Cluster> {
    components(positions.len(), edges, threshold)
        .into_iter()
        .map(|members| {
            let (center, radius) = bounds(&members, positions);
            Cluster {
                members,
                center,
                radius,
            }
        })
        .collect()
}

// ============================================================================
// Tests
// ============================================================================
