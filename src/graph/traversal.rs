use std::collections::VecDeque;

use tracing::debug;

use crate::{error::Result, model::Graph};

/// Pending vertices of a traversal. The pop order decides the traversal kind.
trait Frontier: Default {
    fn push(&mut self, index: usize);
    fn pop(&mut self) -> Option<usize>;
}

/// Last in, first out
impl Frontier for Vec<usize> {
    fn push(&mut self, index: usize) {
        Vec::push(self, index)
    }
    fn pop(&mut self) -> Option<usize> {
        Vec::pop(self)
    }
}

/// First in, first out
impl Frontier for VecDeque<usize> {
    fn push(&mut self, index: usize) {
        self.push_back(index)
    }
    fn pop(&mut self) -> Option<usize> {
        self.pop_front()
    }
}

/// Visit every vertex reachable from `start` once, in the order the frontier yields them.
///
/// `descending` controls the order neighbors are pushed in.
fn traverse<F: Frontier>(graph: &Graph, start: usize, descending: bool) -> Result<Vec<usize>> {
    let start = graph.index_of(start)?;
    let mut visited = vec![false; graph.vertex_count()];
    let mut order = Vec::with_capacity(graph.vertex_count());
    let mut frontier = F::default();
    frontier.push(start);

    while let Some(head) = frontier.pop() {
        if visited[head] {
            continue;
        }
        visited[head] = true;
        order.push(head + 1);

        let unvisited = graph
            .neighbors(head)
            .map(|(neighbor, _)| neighbor)
            .filter(|neighbor| !visited[*neighbor]);
        if descending {
            unvisited.rev().for_each(|neighbor| frontier.push(neighbor));
        } else {
            unvisited.for_each(|neighbor| frontier.push(neighbor));
        }
    }
    Ok(order)
}

/// Depth-first order from the 1-based `start`, lowest neighbor first.
///
/// Uses an explicit stack and pushes neighbors in descending order, so the
/// result matches a recursive search that walks neighbors in ascending order.
pub fn depth_first(graph: &Graph, start: usize) -> Result<Vec<usize>> {
    debug!(start, "Depth-first traversal");
    traverse::<Vec<usize>>(graph, start, true)
}

/// Breadth-first order from the 1-based `start`: by hop count, then by vertex id.
pub fn breadth_first(graph: &Graph, start: usize) -> Result<Vec<usize>> {
    debug!(start, "Breadth-first traversal");
    traverse::<VecDeque<usize>>(graph, start, false)
}
