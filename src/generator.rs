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

//! Random friendship graphs. A graph with n nodes has a number of edges drawn uniformly in
//! [N / 4, N / 3], where N = n(n - 1) / 2 is the number of possible edges, and the edges are then
//! drawn uniformly (without repetition) among the node pairs.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rustc_hash::FxHashSet;
use tracing::debug;

use crate::core::graph::{Graph, NodeIndex};
use crate::error::{Error, Result};

/// Returns the bounds (inclusive) on the number of edges of a random graph with n nodes
pub fn edge_count_bounds(n: usize) -> (usize, usize) {
    let possible = n * n.saturating_sub(1) / 2;
    (possible / 4, possible / 3)
}

/// Generates a random graph with `n >= 2` nodes. The same seed always gives the same graph.
pub fn random_graph(n: usize, seed: u64) -> Result<Graph> {
    if n < 2 {
        return Err(Error::InvalidGraph(format!("a random graph needs at least 2 nodes, got {}", n)));
    }
    let mut rng = StdRng::seed_from_u64(seed);
    let (low, high) = edge_count_bounds(n);
    let number_edges = rng.gen_range(low..=high);
    let mut edges = FxHashSet::<(usize, usize)>::default();
    while edges.len() < number_edges {
        let u = rng.gen_range(0..n);
        let v = rng.gen_range(0..n);
        if u != v {
            edges.insert((u.min(v), u.max(v)));
        }
    }
    let mut graph = Graph::new(n);
    // Insertion order must not depend on the hash set iteration order
    let mut edges = edges.into_iter().collect::<Vec<(usize, usize)>>();
    edges.sort_unstable();
    for (u, v) in edges {
        graph.add_edge(NodeIndex(u), NodeIndex(v))?;
    }
    debug!(nodes = n, edges = graph.number_edges(), seed, "random graph generated");
    Ok(graph)
}

#[cfg(test)]
mod test_generator {
    use super::*;

    #[test]
    pub fn bounds() {
        assert_eq!((0, 0), edge_count_bounds(2));
        assert_eq!((11, 15), edge_count_bounds(10));
    }

    #[test]
    pub fn edge_count_in_bounds() {
        for n in 2..30 {
            for seed in 0..5 {
                let graph = random_graph(n, seed).unwrap();
                let (low, high) = edge_count_bounds(n);
                assert_eq!(n, graph.number_nodes());
                assert!(low <= graph.number_edges() && graph.number_edges() <= high);
            }
        }
    }

    #[test]
    pub fn same_seed_same_graph() {
        let g1 = random_graph(25, 42).unwrap();
        let g2 = random_graph(25, 42).unwrap();
        assert_eq!(g1.edges(), g2.edges());
    }

    #[test]
    pub fn too_small() {
        assert!(matches!(random_graph(1, 0), Err(Error::InvalidGraph(_))));
        assert!(matches!(random_graph(0, 0), Err(Error::InvalidGraph(_))));
    }
}
