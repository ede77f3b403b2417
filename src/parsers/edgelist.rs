//Cascadeip
//Copyright (C) 2022-2023 A. Dubray
//
//This program is free software: you can redistribute it and/or modify
//it under the terms of the GNU Affero General Public License as published by
//the Free Software Foundation, either version 3 of the License, or
//(at your option) any later version.
//
//This program is distributed in the hope that it will be useful,
//but WITHOUT ANY WARRANTY; without even the implied warranty of
//MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
//GNU Affero General Public License for more details.
//
//You should have received a copy of the GNU Affero General Public License
//along with this program.  If not, see <http://www.gnu.org/licenses/>.

//! This module provides a parser for friendship graphs given as edge lists. An example of valid
//! file is given next
//!
//! # This line is a comment, as are the lines starting with c
//! # The optional first line gives the number of nodes
//! 5
//! 0 1
//! 1 2
//! 3 1
//!
//! Each other line is an undirected edge, given by the ids of its two endpoints. The ids must be
//! integers in `[0, n)`. Without the header line, n is the number of distinct ids appearing in the
//! file, and these ids must be exactly `0, ..., n - 1`. With the header, nodes that appear in no
//! edge are isolated nodes.

use rustc_hash::FxHashSet;
use std::fs::File;
use std::io::{BufRead, BufWriter, Write};
use std::path::Path;
use tracing::debug;

use super::{open, parse_error};
use crate::core::graph::Graph;
use crate::error::{Error, Result};

/// Largest number of nodes a header may declare. The adjacency is allocated up front from it.
pub const MAX_NODES: usize = 1 << 24;

fn parse_id(token: &str, index: usize) -> Result<usize> {
    token.parse::<usize>().map_err(|_| parse_error(index, format!("'{}' is not a node id", token)))
}

/// Reads a graph from any buffered reader
pub fn graph_from_reader<R: BufRead>(reader: R) -> Result<Graph> {
    let mut declared_nodes: Option<usize> = None;
    let mut edges: Vec<(usize, usize)> = vec![];
    let mut ids: FxHashSet<usize> = FxHashSet::default();
    let mut seen_data = false;
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with('c') {
            continue;
        }
        let tokens = line.split_whitespace().collect::<Vec<&str>>();
        match tokens.len() {
            1 if !seen_data => {
                let n = parse_id(tokens[0], index)?;
                if n > MAX_NODES {
                    return Err(Error::InvalidGraph(format!("header declares {} nodes, the limit is {}", n, MAX_NODES)));
                }
                declared_nodes = Some(n);
            },
            2 => {
                let u = parse_id(tokens[0], index)?;
                let v = parse_id(tokens[1], index)?;
                if u == v {
                    return Err(Error::InvalidGraph(format!("self-loop on node {} at line {}", u, index + 1)));
                }
                ids.insert(u);
                ids.insert(v);
                edges.push((u, v));
            },
            _ => return Err(parse_error(index, format!("expected an edge 'i j', got '{}'", line))),
        }
        seen_data = true;
    }
    let n = match declared_nodes {
        Some(n) => n,
        None => ids.len(),
    };
    if let Some(largest) = ids.iter().copied().max() {
        if largest >= n {
            return Err(Error::InvalidGraph(match declared_nodes {
                Some(_) => format!("node {} is out of the declared range [0, {})", largest, n),
                None => format!("node ids are not contiguous: {} distinct ids but largest id is {}", n, largest),
            }));
        }
    }
    debug!(nodes = n, edges = edges.len(), "edge list read");
    Graph::from_edges(n, &edges)
}

/// Reads a graph from an edge-list file
pub fn graph_from_file(path: &Path) -> Result<Graph> {
    graph_from_reader(open(path)?)
}

/// Writes the graph as an edge list, with the number of nodes as header
pub fn write_graph<W: Write>(graph: &Graph, writer: &mut W) -> Result<()> {
    writeln!(writer, "{}", graph.number_nodes())?;
    for (u, v) in graph.edges() {
        writeln!(writer, "{} {}", u, v)?;
    }
    Ok(())
}

pub fn write_graph_file(graph: &Graph, path: &Path) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_graph(graph, &mut writer)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod test_edgelist {
    use super::*;
    use crate::core::graph::NodeIndex;
    use std::io::Cursor;

    #[test]
    pub fn without_header() {
        let g = graph_from_reader(Cursor::new("0 1\n1 2\n\n# comment\n2 3\n")).unwrap();
        assert_eq!(4, g.number_nodes());
        assert_eq!(3, g.number_edges());
        assert!(g.are_friends(NodeIndex(3), NodeIndex(2)));
    }

    #[test]
    pub fn with_header_and_isolated_nodes() {
        let g = graph_from_reader(Cursor::new("6\n0 1\n4 1\n")).unwrap();
        assert_eq!(6, g.number_nodes());
        assert_eq!(0, g.degree(NodeIndex(5)));
        assert_eq!(2, g.degree(NodeIndex(1)));
    }

    #[test]
    pub fn node_count_is_not_edge_count() {
        // 4 edges over 3 distinct nodes
        let g = graph_from_reader(Cursor::new("0 1\n1 2\n2 0\n1 0\n")).unwrap();
        assert_eq!(3, g.number_nodes());
        assert_eq!(3, g.number_edges());
    }

    #[test]
    pub fn holes_in_ids_are_rejected() {
        let g = graph_from_reader(Cursor::new("0 1\n1 5\n"));
        assert!(matches!(g, Err(Error::InvalidGraph(_))));
    }

    #[test]
    pub fn ids_above_header_are_rejected() {
        let g = graph_from_reader(Cursor::new("3\n0 1\n1 3\n"));
        assert!(matches!(g, Err(Error::InvalidGraph(_))));
    }

    #[test]
    pub fn huge_header_is_rejected() {
        let g = graph_from_reader(Cursor::new("18446744073709551615\n0 1\n"));
        assert!(matches!(g, Err(Error::InvalidGraph(_))));
        let g = graph_from_reader(Cursor::new("1000000000000\n0 1\n"));
        assert!(matches!(g, Err(Error::InvalidGraph(_))));
        let g = graph_from_reader(Cursor::new(format!("{}\n0 1\n", MAX_NODES + 1)));
        assert!(matches!(g, Err(Error::InvalidGraph(_))));
    }

    #[test]
    pub fn self_loops_are_rejected() {
        assert!(matches!(graph_from_reader(Cursor::new("0 1\n1 1\n")), Err(Error::InvalidGraph(_))));
    }

    #[test]
    pub fn malformed_lines() {
        assert!(matches!(graph_from_reader(Cursor::new("0 1\n1 x\n")), Err(Error::Parse { line: 2, .. })));
        assert!(matches!(graph_from_reader(Cursor::new("0 1 2\n")), Err(Error::Parse { line: 1, .. })));
        assert!(matches!(graph_from_reader(Cursor::new("0 1\n4\n")), Err(Error::Parse { line: 2, .. })));
    }

    #[test]
    pub fn write_then_read() {
        let g = Graph::from_edges(5, &[(3, 0), (1, 2)]).unwrap();
        let mut out: Vec<u8> = vec![];
        write_graph(&g, &mut out).unwrap();
        assert_eq!("5\n0 3\n1 2\n", String::from_utf8(out.clone()).unwrap());
        let read = graph_from_reader(Cursor::new(out)).unwrap();
        assert_eq!(g.edges(), read.edges());
        assert_eq!(5, read.number_nodes());
    }
}
