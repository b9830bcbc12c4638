//! Plain-text adjacency matrices in, [DOT](https://graphviz.org/doc/info/lang.html) out.

use std::{fmt, io::Write, str::FromStr};

use tracing::debug;

use crate::{
    error::{GraphError, Result},
    model::Graph,
};

/// One line per vertex, whitespace-separated integers. Blank lines are skipped.
impl FromStr for Graph {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self> {
        let rows = s
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(i, line)| {
                line.split_whitespace()
                    .map(str::parse::<i64>)
                    .collect::<Result<Vec<_>, _>>()
                    .map_err(|source| GraphError::Parse {
                        line: i + 1,
                        source,
                    })
            })
            .collect::<Result<Vec<_>>>()?;
        debug!("Parsed {} rows", rows.len());
        Self::from_rows(rows)
    }
}

/// Displays a graph as an undirected DOT `graph G { ... }` block.
struct Dot<'a>(&'a Graph);

impl fmt::Display for Dot<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "graph G {{")?;
        for edge in self.0.edges() {
            writeln!(f, "  {} -- {};", edge.from, edge.to)?;
        }
        writeln!(f, "}}")
    }
}

impl Graph {
    /// Write an undirected `graph G { ... }` listing every positive `i -- j` with `i < j`.
    pub fn write_dot<W: Write>(&self, mut out: W) -> Result<()> {
        write!(out, "{}", Dot(self))?;
        Ok(())
    }

    pub fn to_dot(&self) -> String {
        Dot(self).to_string()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{error::Malformed, model::test::square};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse() {
        let graph: Graph = "0 1 0 2\n1 0 2 0\n0 2 0 3\n2 0 3 0\n".parse().unwrap();
        assert_eq!(graph, square());
    }

    #[test]
    fn test_parse_tolerates_blank_lines_and_spacing() {
        let graph: Graph = "\n  0\t5 \n\n5   0\n\n".parse().unwrap();
        assert_eq!(graph.to_rows(), vec![vec![0, 5], vec![5, 0]]);
        assert_eq!("".parse::<Graph>().unwrap().vertex_count(), 0);
    }

    #[test]
    fn test_parse_reports_line() {
        let err = "0 1\n1 x\n".parse::<Graph>().unwrap_err();
        assert!(matches!(err, GraphError::Parse { line: 2, .. }));
        let err = "0 1\n1 -1\n".parse::<Graph>().unwrap_err();
        assert!(matches!(
            err,
            GraphError::MalformedGraph(Malformed::NegativeWeight { row: 2, column: 2 })
        ));
        let err = "0 1 0\n1 0 0\n".parse::<Graph>().unwrap_err();
        assert!(matches!(
            err,
            GraphError::MalformedGraph(Malformed::NotSquare { row: 1, len: 3, expected: 2 })
        ));
    }

    #[test]
    fn test_dot_export() {
        assert_eq!(
            square().to_dot(),
            "graph G {\n  1 -- 2;\n  1 -- 4;\n  2 -- 3;\n  3 -- 4;\n}\n"
        );
        assert_eq!(Graph::new(2).to_dot(), "graph G {\n}\n");
    }

    #[test]
    fn test_write_dot_matches_to_dot() {
        let mut buf = vec![];
        square().write_dot(&mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), square().to_dot());
    }
}
