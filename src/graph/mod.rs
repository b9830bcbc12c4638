/// Depth-first and breadth-first orderings
pub mod traversal;
/// Single pair and all pairs [shortest paths](https://en.wikipedia.org/wiki/Shortest_path_problem)
pub mod shortest_path;
/// Find the [Minimum Spanning Tree (MST)](https://en.wikipedia.org/wiki/Minimum_spanning_tree)
pub mod mst;
/// Solve the [Traveling Salesman Problem (TSP)](https://en.wikipedia.org/wiki/Travelling_salesman_problem)
pub mod tsp;
