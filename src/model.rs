use std::{fmt, ops::Add};

use ndarray::prelude::*;
use num_traits::PrimInt;
use serde::{Deserialize, Serialize};

use crate::error::{GraphError, Malformed, Result};

/// Edge weight as stored in the adjacency matrix. Zero means "no edge".
pub type Weight = u32;

/// Length of a path: either a finite sum of weights or no path at all.
///
/// Ordering puts every finite distance before [Distance::Unreachable].
/// Serializes as a number, or `null` when unreachable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Distance {
    Finite(u64),
    Unreachable,
}

impl Distance {
    pub const ZERO: Self = Self::Finite(0);

    pub fn is_finite(self) -> bool {
        matches!(self, Self::Finite(_))
    }

    pub fn finite(self) -> Option<u64> {
        match self {
            Self::Finite(d) => Some(d),
            Self::Unreachable => None,
        }
    }
}

/// Unreachable if either side is.
impl Add for Distance {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        match (self, other) {
            (Self::Finite(a), Self::Finite(b)) => Self::Finite(a.saturating_add(b)),
            _ => Self::Unreachable,
        }
    }
}

impl From<Weight> for Distance {
    fn from(weight: Weight) -> Self {
        Self::Finite(weight as u64)
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Finite(d) => write!(f, "{d}"),
            Self::Unreachable => f.write_str("unreachable"),
        }
    }
}

/// A weighted edge between two 1-based vertex ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub from: usize,
    pub to: usize,
    pub weight: Weight,
}

/// Weighted graph over a dense `n x n` adjacency matrix.
///
/// Vertices are addressed as `1..=n` from the outside and stored 0-based.
/// [Graph::add_edge] writes both directions, but rows loaded from elsewhere
/// may describe a directed graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<i64>>", into = "Vec<Vec<Weight>>")]
pub struct Graph {
    weights: Array2<Weight>,
}

impl Graph {
    /// A graph with `vertex_count` vertices and no edges.
    pub fn new(vertex_count: usize) -> Self {
        Self {
            weights: Array2::zeros((vertex_count, vertex_count)),
        }
    }

    /// Build a graph from one row per vertex.
    ///
    /// Row and column numbers reported in [Malformed] are 1-based.
    pub fn from_rows<R, T>(rows: impl IntoIterator<Item = R>) -> Result<Self>
    where
        R: AsRef<[T]>,
        T: PrimInt,
    {
        let rows = rows.into_iter().collect::<Vec<_>>();
        let vertex_count = rows.len();
        let mut weights = Array2::zeros((vertex_count, vertex_count));
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != vertex_count {
                return Err(Malformed::NotSquare {
                    row: i + 1,
                    len: row.len(),
                    expected: vertex_count,
                }
                .into());
            }
            for (j, value) in row.iter().enumerate() {
                if *value < T::zero() {
                    return Err(Malformed::NegativeWeight {
                        row: i + 1,
                        column: j + 1,
                    }
                    .into());
                }
                weights[[i, j]] = value.to_u32().ok_or(Malformed::WeightOverflow {
                    row: i + 1,
                    column: j + 1,
                })?;
            }
        }
        Ok(Self { weights })
    }

    /// Replace the whole matrix. On error the graph is left untouched.
    pub fn load_from_rows<R, T>(&mut self, rows: impl IntoIterator<Item = R>) -> Result<()>
    where
        R: AsRef<[T]>,
        T: PrimInt,
    {
        *self = Self::from_rows(rows)?;
        Ok(())
    }

    pub fn vertex_count(&self) -> usize {
        self.weights.nrows()
    }

    /// Set the weight of `u -- v` in both directions. A weight of zero removes the edge.
    pub fn add_edge(&mut self, u: usize, v: usize, weight: Weight) -> Result<()> {
        let (u, v) = (self.index_of(u)?, self.index_of(v)?);
        self.weights[[u, v]] = weight;
        self.weights[[v, u]] = weight;
        Ok(())
    }

    pub fn weight(&self, u: usize, v: usize) -> Result<Weight> {
        Ok(self.weights[[self.index_of(u)?, self.index_of(v)?]])
    }

    pub fn weights(&self) -> ArrayView2<'_, Weight> {
        self.weights.view()
    }

    /// Snapshot of the matrix as plain rows.
    pub fn to_rows(&self) -> Vec<Vec<Weight>> {
        self.weights.outer_iter().map(|row| row.to_vec()).collect()
    }

    /// Edges `i -- j` with `i < j` and a positive weight, in row-major order.
    pub fn edges(&self) -> Vec<Edge> {
        self.weights
            .indexed_iter()
            .filter(|((i, j), weight)| i < j && **weight > 0)
            .map(|((i, j), weight)| Edge {
                from: i + 1,
                to: j + 1,
                weight: *weight,
            })
            .collect()
    }

    /// Translate a 1-based vertex id into a matrix index.
    pub(crate) fn index_of(&self, vertex: usize) -> Result<usize> {
        if (1..=self.vertex_count()).contains(&vertex) {
            Ok(vertex - 1)
        } else {
            Err(GraphError::InvalidVertex {
                vertex,
                vertex_count: self.vertex_count(),
            })
        }
    }

    /// Matrix indices adjacent to `index` by a positive weight, ascending.
    pub(crate) fn neighbors(&self, index: usize) -> impl DoubleEndedIterator<Item = (usize, Weight)> + '_ {
        self.weights
            .row(index)
            .into_iter()
            .copied()
            .enumerate()
            .filter(|(_, weight)| *weight > 0)
    }
}

impl TryFrom<Vec<Vec<i64>>> for Graph {
    type Error = GraphError;

    fn try_from(rows: Vec<Vec<i64>>) -> Result<Self> {
        Self::from_rows(rows)
    }
}

impl From<Graph> for Vec<Vec<Weight>> {
    fn from(graph: Graph) -> Self {
        graph.to_rows()
    }
}
