use ndarray::prelude::*;
use serde::Serialize;
use tracing::{debug, warn};

use crate::{
    error::{GraphError, Result},
    model::{Edge, Graph, Weight},
};

/// A spanning tree as both an adjacency matrix and its edge list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpanningTree {
    /// Symmetric, zero except for the chosen edges.
    pub matrix: Array2<Weight>,
    /// Chosen edges in the order they joined the tree, `from` being the side already in it.
    pub edges: Vec<Edge>,
}

impl SpanningTree {
    pub fn total_weight(&self) -> u64 {
        self.edges.iter().map(|edge| edge.weight as u64).sum()
    }
}

/// Find the MST with [Prim's algorithm](https://en.wikipedia.org/wiki/Prim%27s_algorithm), growing from vertex 1.
///
/// Each step scans every edge leaving the tree in row-major order and keeps
/// the first strictly lightest one, O(v^3) overall.
///
/// Fails with [GraphError::Disconnected] if some vertex cannot be reached.
pub fn minimum_spanning_tree(graph: &Graph) -> Result<SpanningTree> {
    let vertex_count = graph.vertex_count();
    debug!(vertex_count, "Minimum spanning tree");
    let weights = graph.weights();

    let mut in_mst = vec![false; vertex_count];
    let mut matrix = Array2::zeros((vertex_count, vertex_count));
    let mut edges = Vec::with_capacity(vertex_count.saturating_sub(1));

    // Kickstart MST with 1 vertex
    if let Some(first) = in_mst.first_mut() {
        *first = true;
    }

    while edges.len() < vertex_count.saturating_sub(1) {
        let mut lightest: Option<(usize, usize, Weight)> = None;
        for i in (0..vertex_count).filter(|i| in_mst[*i]) {
            for j in (0..vertex_count).filter(|j| !in_mst[*j]) {
                let weight = weights[[i, j]];
                if weight > 0 && lightest.map_or(true, |(.., lightest)| weight < lightest) {
                    lightest = Some((i, j, weight));
                }
            }
        }

        let Some((from, to, weight)) = lightest else {
            warn!(
                reached = edges.len() + 1,
                vertex_count, "No edge leaves the tree, graph is disconnected"
            );
            return Err(GraphError::Disconnected {
                reached: edges.len() + 1,
                vertex_count,
            });
        };
        in_mst[to] = true;
        matrix[[from, to]] = weight;
        matrix[[to, from]] = weight;
        edges.push(Edge {
            from: from + 1,
            to: to + 1,
            weight,
        });
    }

    Ok(SpanningTree { matrix, edges })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::model::test::square;
    use ndarray::array;
    use pretty_assertions::assert_eq;

    #[test]
    fn mst_is_correct_for_square() {
        let tree = minimum_spanning_tree(&square()).unwrap();
        assert_eq!(
            tree.edges,
            vec![
                Edge { from: 1, to: 2, weight: 1 },
                Edge { from: 1, to: 4, weight: 2 },
                Edge { from: 2, to: 3, weight: 2 },
            ]
        );
        assert_eq!(tree.total_weight(), 5);
        assert_eq!(
            tree.matrix,
            array![[0u32, 1, 0, 2], [1, 0, 2, 0], [0, 2, 0, 0], [2, 0, 0, 0]]
        );
    }

    #[test]
    fn mst_is_correct_for_trivial_case() {
        let single = minimum_spanning_tree(&Graph::new(1)).unwrap();
        assert_eq!(single.matrix, array![[0u32]]);
        assert!(single.edges.is_empty());

        let empty = minimum_spanning_tree(&Graph::new(0)).unwrap();
        assert_eq!(empty.matrix.dim(), (0, 0));
        assert_eq!(empty.total_weight(), 0);
    }

    #[test]
    fn mst_fails_on_disconnected_graph() {
        let graph = Graph::from_rows([[0, 1, 0], [1, 0, 0], [0, 0, 0]]).unwrap();
        assert!(matches!(
            minimum_spanning_tree(&graph),
            Err(GraphError::Disconnected {
                reached: 2,
                vertex_count: 3
            })
        ));
    }

    /// Sum of the cheapest spanning tree found by trying every `v - 1` edge subset.
    fn brute_force_mst_weight(graph: &Graph) -> u64 {
        let candidates = graph.edges();
        let needed = graph.vertex_count() - 1;
        let mut best = u64::MAX;
        for mask in 0u32..(1 << candidates.len()) {
            if mask.count_ones() as usize != needed {
                continue;
            }
            // Union-find over the chosen edges, a cycle means this subset is not a tree
            let mut root: Vec<usize> = (0..graph.vertex_count()).collect();
            fn find(root: &mut [usize], v: usize) -> usize {
                if root[v] != v {
                    root[v] = find(root, root[v]);
                }
                root[v]
            }
            let mut is_tree = true;
            let mut total = 0;
            for (k, edge) in candidates.iter().enumerate() {
                if mask & (1 << k) == 0 {
                    continue;
                }
                let (a, b) = (find(&mut root, edge.from - 1), find(&mut root, edge.to - 1));
                if a == b {
                    is_tree = false;
                    break;
                }
                root[a] = b;
                total += edge.weight as u64;
            }
            if is_tree {
                best = best.min(total);
            }
        }
        best
    }

    #[test]
    fn mst_is_minimal_against_brute_force() {
        let graphs = [
            Graph::from_rows([
                [0, 4, 0, 0, 0, 0, 0, 8, 0],
                [4, 0, 8, 0, 0, 0, 0, 11, 0],
                [0, 8, 0, 7, 0, 4, 0, 0, 2],
                [0, 0, 7, 0, 9, 14, 0, 0, 0],
                [0, 0, 0, 9, 0, 10, 0, 0, 0],
                [0, 0, 4, 14, 10, 0, 2, 0, 0],
                [0, 0, 0, 0, 0, 2, 0, 1, 6],
                [8, 11, 0, 0, 0, 0, 1, 0, 7],
                [0, 0, 2, 0, 0, 0, 6, 7, 0],
            ])
            .unwrap(),
            Graph::from_rows([
                [0, 3, 3, 3, 3],
                [3, 0, 1, 5, 3],
                [3, 1, 0, 1, 9],
                [3, 5, 1, 0, 2],
                [3, 3, 9, 2, 0],
            ])
            .unwrap(),
        ];
        for graph in &graphs {
            let tree = minimum_spanning_tree(graph).unwrap();
            assert_eq!(tree.edges.len(), graph.vertex_count() - 1);
            assert_eq!(tree.matrix, tree.matrix.t());
            assert_eq!(
                tree.matrix.iter().filter(|weight| **weight > 0).count(),
                2 * (graph.vertex_count() - 1)
            );
            assert_eq!(tree.total_weight(), brute_force_mst_weight(graph));
        }
    }
}
