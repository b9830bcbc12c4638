use std::num::ParseIntError;

use rand::distributions::WeightedError;
use thiserror::Error;

/// Why a set of rows could not become an adjacency matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Malformed {
    #[error("row {row} has {len} entries, expected {expected}")]
    NotSquare {
        row: usize,
        len: usize,
        expected: usize,
    },
    #[error("negative weight at row {row}, column {column}")]
    NegativeWeight { row: usize, column: usize },
    #[error("weight at row {row}, column {column} does not fit in 32 bits")]
    WeightOverflow { row: usize, column: usize },
}

#[derive(Debug, Error)]
pub enum GraphError {
    /// A 1-based vertex id outside `[1, vertex_count]`.
    #[error("vertex {vertex} is out of range for a graph with {vertex_count} vertices")]
    InvalidVertex { vertex: usize, vertex_count: usize },
    #[error("malformed graph: {0}")]
    MalformedGraph(#[from] Malformed),
    #[error("line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: ParseIntError,
    },
    /// No tour exists on a graph with at most one vertex.
    #[error("a tour needs more than one vertex, graph has {vertex_count}")]
    Infeasible { vertex_count: usize },
    #[error("graph is disconnected: only {reached} of {vertex_count} vertices reachable from vertex 1")]
    Disconnected { reached: usize, vertex_count: usize },
    /// Every cycle the colony built crossed a missing edge.
    #[error("no closed tour over existing edges was found")]
    NoTour,
    #[error("search was cancelled before any tour was found")]
    Cancelled,
    /// The colony could not draw its next vertex.
    #[error("ant colony sampling failed: {0}")]
    Sampling(#[from] WeightedError),
    #[error("invalid ant colony configuration: {0}")]
    InvalidConfig(&'static str),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = GraphError> = std::result::Result<T, E>;
