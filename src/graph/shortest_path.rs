use ndarray::prelude::*;
use serde::Serialize;
use tracing::{debug, trace};

use crate::{
    error::Result,
    model::{Distance, Graph},
};

/// Distance and route between two vertices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShortestPath {
    pub distance: Distance,
    /// 1-based ids from source to target, empty when the target is unreachable.
    pub path: Vec<usize>,
}

/// [Dijkstra's algorithm](https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm) between two 1-based vertices.
///
/// The next vertex is found with a linear scan instead of a priority queue,
/// O(v^2) overall, which suits dense matrices. Ties go to the lower vertex id.
pub fn shortest_path(graph: &Graph, source: usize, target: usize) -> Result<ShortestPath> {
    let (source, target) = (graph.index_of(source)?, graph.index_of(target)?);
    debug!(source = source + 1, target = target + 1, "Shortest path");

    let vertex_count = graph.vertex_count();
    let mut dist = vec![Distance::Unreachable; vertex_count];
    let mut parent: Vec<Option<usize>> = vec![None; vertex_count];
    let mut visited = vec![false; vertex_count];
    dist[source] = Distance::ZERO;

    loop {
        // Unvisited vertex closest to the source, None once the rest are unreachable
        let closest = (0..vertex_count)
            .filter(|v| !visited[*v] && dist[*v].is_finite())
            .min_by_key(|v| dist[*v]);
        let Some(closest) = closest else {
            break;
        };
        visited[closest] = true;
        trace!(vertex = closest + 1, distance = %dist[closest], "Settled");

        for (neighbor, weight) in graph.neighbors(closest) {
            if visited[neighbor] {
                continue;
            }
            let candidate = dist[closest] + Distance::from(weight);
            if candidate < dist[neighbor] {
                dist[neighbor] = candidate;
                parent[neighbor] = Some(closest);
            }
        }
    }

    let path = if dist[target].is_finite() {
        let mut path = vec![target + 1];
        let mut current = target;
        while let Some(previous) = parent[current] {
            path.push(previous + 1);
            current = previous;
        }
        path.reverse();
        path
    } else {
        vec![]
    };

    Ok(ShortestPath {
        distance: dist[target],
        path,
    })
}

/// [Floyd-Warshall](https://en.wikipedia.org/wiki/Floyd%E2%80%93Warshall_algorithm) distances between every pair of vertices.
///
/// Entry `[i, j]` is the distance from vertex `i + 1` to vertex `j + 1`.
/// The diagonal is always zero, self-loops notwithstanding.
pub fn all_shortest_paths(graph: &Graph) -> Array2<Distance> {
    let vertex_count = graph.vertex_count();
    debug!(vertex_count, "All pairs shortest paths");

    let mut dist = Array2::from_shape_fn((vertex_count, vertex_count), |(i, j)| {
        let weight = graph.weights()[[i, j]];
        if i == j {
            Distance::ZERO
        } else if weight > 0 {
            Distance::from(weight)
        } else {
            Distance::Unreachable
        }
    });

    for k in 0..vertex_count {
        for i in 0..vertex_count {
            if !dist[[i, k]].is_finite() {
                continue;
            }
            for j in 0..vertex_count {
                let through_k = dist[[i, k]] + dist[[k, j]];
                if through_k < dist[[i, j]] {
                    dist[[i, j]] = through_k;
                }
            }
        }
    }
    dist
}
