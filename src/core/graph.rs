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

//! This module contains the friendship graph on which the cascades are simulated.
//! The graph is undirected and its nodes are identified by a dense range of ids `[0, n)`. Each
//! node stores the set of its friends, and the structure maintains the following invariants
//!     1. No node is its own friend (no self-loops)
//!     2. The adjacency is symmetric: `j` is a friend of `i` if, and only if, `i` is a friend of `j`
//!
//! The graph is built once per instance (usually by the edge-list parser) and is never modified
//! afterwards.

use rustc_hash::FxHashSet;
use std::fmt;
use std::ops::Index;

use crate::error::{Error, Result};

/// Abstraction used as a typesafe way of retrieving a node in the `Graph` structure
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct NodeIndex(pub usize);

impl fmt::Display for NodeIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Data structure representing the friendship graph.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    /// For each node, the set of its friends
    adjacency: Vec<FxHashSet<NodeIndex>>,
    /// Number of (undirected) edges in the graph
    number_edges: usize,
}

impl Graph {

    // --- GRAPH CREATION --- //

    /// Creates a graph with `n` nodes and no friendship
    pub fn new(n: usize) -> Self {
        Self {
            adjacency: (0..n).map(|_| FxHashSet::default()).collect(),
            number_edges: 0,
        }
    }

    /// Creates a graph with `n` nodes from a list of undirected edges. Duplicated edges are
    /// merged; self-loops and out-of-range nodes are rejected.
    pub fn from_edges(n: usize, edges: &[(usize, usize)]) -> Result<Self> {
        let mut graph = Self::new(n);
        for (u, v) in edges.iter().copied() {
            graph.add_edge(NodeIndex(u), NodeIndex(v))?;
        }
        Ok(graph)
    }

    /// Adds the friendship `u -- v` to the graph. Returns true if the edge was not already in the
    /// graph.
    pub fn add_edge(&mut self, u: NodeIndex, v: NodeIndex) -> Result<bool> {
        let n = self.number_nodes();
        if u.0 >= n || v.0 >= n {
            return Err(Error::InvalidGraph(format!("edge {} -- {} references a node outside [0, {})", u, v, n)));
        }
        if u == v {
            return Err(Error::InvalidGraph(format!("self-loop on node {}", u)));
        }
        let inserted = self.adjacency[u.0].insert(v);
        self.adjacency[v.0].insert(u);
        if inserted {
            self.number_edges += 1;
        }
        Ok(inserted)
    }

    // --- GETTERS --- //

    pub fn number_nodes(&self) -> usize {
        self.adjacency.len()
    }

    pub fn number_edges(&self) -> usize {
        self.number_edges
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// Returns the number of friends of the node
    pub fn degree(&self, node: NodeIndex) -> usize {
        self.adjacency[node.0].len()
    }

    /// Returns the degree sequence of the graph, indexed by node id
    pub fn degrees(&self) -> Vec<usize> {
        self.adjacency.iter().map(|friends| friends.len()).collect()
    }

    /// Returns true if `u` and `v` are friends
    pub fn are_friends(&self, u: NodeIndex, v: NodeIndex) -> bool {
        self.adjacency[u.0].contains(&v)
    }

    // --- ITERATORS --- //

    pub fn nodes_iter(&self) -> impl Iterator<Item = NodeIndex> {
        (0..self.number_nodes()).map(NodeIndex)
    }

    pub fn neighbors_iter(&self, node: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        self.adjacency[node.0].iter().copied()
    }

    /// Returns the edges `(u, v)` of the graph with `u < v`, in lexicographic order
    pub fn edges(&self) -> Vec<(NodeIndex, NodeIndex)> {
        let mut edges = Vec::with_capacity(self.number_edges);
        for u in self.nodes_iter() {
            for v in self.neighbors_iter(u).filter(|v| u < *v) {
                edges.push((u, v));
            }
        }
        edges.sort_unstable();
        edges
    }
}

impl Index<NodeIndex> for Graph {
    type Output = FxHashSet<NodeIndex>;

    fn index(&self, index: NodeIndex) -> &Self::Output {
        &self.adjacency[index.0]
    }
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Graph ({} nodes, {} edges):", self.number_nodes(), self.number_edges)?;
        for (u, v) in self.edges() {
            writeln!(f, "  {} -- {}", u, v)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test_graph {
    use super::*;

    fn path_4() -> Graph {
        Graph::from_edges(4, &[(0, 1), (1, 2), (2, 3)]).unwrap()
    }

    #[test]
    pub fn adjacency_is_symmetric() {
        let g = path_4();
        for u in g.nodes_iter() {
            for v in g.neighbors_iter(u) {
                assert!(g.are_friends(v, u));
            }
        }
        assert_eq!(3, g.number_edges());
        assert_eq!(vec![1, 2, 2, 1], g.degrees());
    }

    #[test]
    pub fn duplicated_edges_are_merged() {
        let g = Graph::from_edges(3, &[(0, 1), (1, 0), (0, 1), (1, 2)]).unwrap();
        assert_eq!(2, g.number_edges());
        assert_eq!(2, g.degree(NodeIndex(1)));
    }

    #[test]
    pub fn self_loops_are_rejected() {
        let g = Graph::from_edges(3, &[(0, 1), (2, 2)]);
        assert!(matches!(g, Err(Error::InvalidGraph(_))));
    }

    #[test]
    pub fn out_of_range_nodes_are_rejected() {
        let mut g = Graph::new(2);
        assert!(g.add_edge(NodeIndex(0), NodeIndex(2)).is_err());
        assert_eq!(0, g.number_edges());
    }

    #[test]
    pub fn edges_are_sorted_and_unique() {
        let g = Graph::from_edges(4, &[(3, 2), (1, 0), (2, 1)]).unwrap();
        let edges = g.edges().into_iter().map(|(u, v)| (u.0, v.0)).collect::<Vec<_>>();
        assert_eq!(vec![(0, 1), (1, 2), (2, 3)], edges);
    }

    #[test]
    pub fn isolated_nodes() {
        let g = Graph::new(5);
        assert_eq!(5, g.number_nodes());
        assert!(g.nodes_iter().all(|node| g.degree(node) == 0));
        assert!(!g.is_empty());
        assert!(Graph::new(0).is_empty());
    }
}
