//! Graph algorithms over a dense, weighted adjacency matrix.
//!
//! Load a [Graph] once, then run any engine on it: traversals, shortest
//! paths, a minimum spanning tree, or an ant colony approximation of the
//! traveling salesman problem. Engines never modify the graph.
//!
//! ```
//! use densegraph::{shortest_path, Distance, Graph};
//!
//! let graph: Graph = "0 1 0 2\n1 0 2 0\n0 2 0 3\n2 0 3 0".parse()?;
//! let path = shortest_path(&graph, 1, 3)?;
//! assert_eq!(path.distance, Distance::Finite(3));
//! assert_eq!(path.path, vec![1, 2, 3]);
//! # Ok::<(), densegraph::GraphError>(())
//! ```

pub mod error;
pub mod graph;
mod io;
pub mod model;

pub use error::{GraphError, Malformed, Result};
pub use graph::{
    mst::{minimum_spanning_tree, SpanningTree},
    shortest_path::{all_shortest_paths, shortest_path, ShortestPath},
    tsp::{solve_tsp, AntColony, AntColonyConfig, Tour},
    traversal::{breadth_first, depth_first},
};
pub use model::{Distance, Edge, Graph, Weight};

#[cfg(test)]
pub(crate) fn init_test_tracing() {
    // Several tests race to install the subscriber, only the first wins
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;
    use rand::{rngs::StdRng, SeedableRng};

    /// Every engine on the same four-vertex cycle, as a caller would use them.
    #[test]
    fn test_square_scenario() {
        init_test_tracing();
        let graph: Graph = "0 1 0 2\n1 0 2 0\n0 2 0 3\n2 0 3 0\n".parse().unwrap();

        assert_eq!(depth_first(&graph, 1).unwrap(), vec![1, 2, 3, 4]);
        assert_eq!(breadth_first(&graph, 1).unwrap(), vec![1, 2, 4, 3]);
        assert_eq!(
            shortest_path(&graph, 1, 4).unwrap(),
            ShortestPath {
                distance: Distance::Finite(2),
                path: vec![1, 4]
            }
        );
        assert_eq!(
            all_shortest_paths(&graph).map(|d| d.finite().unwrap()),
            ndarray::array![[0u64, 1, 3, 2], [1, 0, 2, 3], [3, 2, 0, 3], [2, 3, 3, 0]]
        );
        let tree = minimum_spanning_tree(&graph).unwrap();
        assert_eq!(tree.total_weight(), 5);
        assert_eq!(tree.edges.len(), 3);
        assert_eq!(
            solve_tsp(&graph, &mut StdRng::seed_from_u64(1)).unwrap().distance,
            8
        );

        // Engines leave the graph as they found it
        assert_eq!(graph, "0 1 0 2\n1 0 2 0\n0 2 0 3\n2 0 3 0".parse::<Graph>().unwrap());
    }
}
