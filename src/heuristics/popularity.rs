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

//! This module provides the popularity ranking used by the greedy constructor. The nodes are
//! ranked by degree (number of friends) and proposed from the most to the least popular one.
//! Nodes with the same degree are proposed by increasing id, so that the seeding is
//! deterministic.

use crate::core::graph::{Graph, NodeIndex};
use crate::core::seeds::SeedVector;
use crate::heuristics::SeedSelection;

/// The ranking is stored sorted by increasing degree (and decreasing id among ties), and is
/// consumed from its end.
#[derive(Default)]
pub struct PopularityRanking {
    ranking: Vec<NodeIndex>,
}

impl PopularityRanking {

    pub fn new(g: &Graph) -> Self {
        let mut ranking = Self::default();
        ranking.init(g);
        ranking
    }

    /// Number of nodes not yet proposed
    pub fn remaining(&self) -> usize {
        self.ranking.len()
    }

    /// Returns the remaining nodes, from the least to the most popular
    pub fn as_slice(&self) -> &[NodeIndex] {
        &self.ranking
    }
}

impl SeedSelection for PopularityRanking {

    fn init(&mut self, g: &Graph) {
        let degrees = g.degrees();
        self.ranking = g.nodes_iter().collect();
        self.ranking.sort_unstable_by(|a, b| degrees[a.0].cmp(&degrees[b.0]).then(b.cmp(a)));
    }

    fn next_seed(&mut self, _g: &Graph, seeds: &SeedVector) -> Option<NodeIndex> {
        // Nodes that are already seeds are skipped
        while let Some(node) = self.ranking.pop() {
            if !seeds[node] {
                return Some(node);
            }
        }
        None
    }
}

#[cfg(test)]
mod test_popularity {
    use super::*;

    #[test]
    pub fn most_popular_first() {
        // Star centered on 3, plus the edge 0 -- 1
        let g = Graph::from_edges(5, &[(3, 0), (3, 1), (3, 2), (3, 4), (0, 1)]).unwrap();
        let mut ranking = PopularityRanking::new(&g);
        let seeds = SeedVector::empty(5);
        assert_eq!(Some(NodeIndex(3)), ranking.next_seed(&g, &seeds));
        assert_eq!(Some(NodeIndex(0)), ranking.next_seed(&g, &seeds));
        assert_eq!(Some(NodeIndex(1)), ranking.next_seed(&g, &seeds));
        assert_eq!(Some(NodeIndex(2)), ranking.next_seed(&g, &seeds));
        assert_eq!(Some(NodeIndex(4)), ranking.next_seed(&g, &seeds));
        assert_eq!(None, ranking.next_seed(&g, &seeds));
    }

    #[test]
    pub fn ties_are_broken_by_lowest_id() {
        let g = Graph::new(4);
        let ranking = PopularityRanking::new(&g);
        let order = ranking.as_slice().iter().rev().map(|n| n.0).collect::<Vec<usize>>();
        assert_eq!(vec![0, 1, 2, 3], order);
    }

    #[test]
    pub fn seeded_nodes_are_skipped() {
        let g = Graph::from_edges(3, &[(0, 1), (1, 2)]).unwrap();
        let mut ranking = PopularityRanking::new(&g);
        let seeds = SeedVector::from_nodes(3, &[1]).unwrap();
        assert_eq!(Some(NodeIndex(0)), ranking.next_seed(&g, &seeds));
        assert_eq!(1, ranking.remaining());
        assert_eq!(Some(NodeIndex(2)), ranking.next_seed(&g, &seeds));
        assert_eq!(None, ranking.next_seed(&g, &seeds));
    }
}
