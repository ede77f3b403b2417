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

use std::fmt;
use std::ops::Index;

use super::graph::{Graph, NodeIndex};
use crate::error::{Error, Result};

/// A seed vector: one binary entry per node of the graph, `true` meaning that the node is
/// infected at time 0.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct SeedVector {
    seeds: Vec<bool>,
}

impl SeedVector {

    /// Creates a seed vector with no seeded node
    pub fn empty(n: usize) -> Self {
        Self { seeds: vec![false; n] }
    }

    /// Creates a seed vector in which every node is seeded
    pub fn full(n: usize) -> Self {
        Self { seeds: vec![true; n] }
    }

    /// Creates a seed vector of size `n` from the given seeded nodes
    pub fn from_nodes(n: usize, nodes: &[usize]) -> Result<Self> {
        let mut seeds = Self::empty(n);
        for node in nodes.iter().copied() {
            if node >= n {
                return Err(Error::InvalidSeed { seed: node, nodes: n });
            }
            seeds.seed(NodeIndex(node));
        }
        Ok(seeds)
    }

    /// Returns an error if the vector does not have one entry per node of the graph
    pub fn check_shape(&self, graph: &Graph) -> Result<()> {
        if self.len() != graph.number_nodes() {
            Err(Error::ShapeMismatch { expected: graph.number_nodes(), actual: self.len() })
        } else {
            Ok(())
        }
    }

    /// Marks the node as seeded. Returns true if it was not seeded before.
    pub fn seed(&mut self, node: NodeIndex) -> bool {
        let was_seeded = self.seeds[node.0];
        self.seeds[node.0] = true;
        !was_seeded
    }

    pub fn unseed(&mut self, node: NodeIndex) {
        self.seeds[node.0] = false;
    }

    pub fn is_seeded(&self, node: NodeIndex) -> bool {
        self.seeds[node.0]
    }

    pub fn len(&self) -> usize {
        self.seeds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seeds.is_empty()
    }

    /// Number of seeded nodes
    pub fn number_seeds(&self) -> usize {
        self.seeds.iter().filter(|s| **s).count()
    }

    /// Returns true if every seed of `self` is also a seed of `other`
    pub fn is_subset_of(&self, other: &SeedVector) -> bool {
        self.len() == other.len() && self.seeds.iter().zip(other.seeds.iter()).all(|(a, b)| !*a || *b)
    }

    pub fn seeds_iter(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.seeds.iter().enumerate().filter(|(_, s)| **s).map(|(i, _)| NodeIndex(i))
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.seeds
    }
}

impl From<Vec<bool>> for SeedVector {
    fn from(seeds: Vec<bool>) -> Self {
        Self { seeds }
    }
}

impl Index<NodeIndex> for SeedVector {
    type Output = bool;

    fn index(&self, index: NodeIndex) -> &Self::Output {
        &self.seeds[index.0]
    }
}

/// Displays the seeded node ids, separated by spaces
impl fmt::Display for SeedVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ids = self.seeds_iter().map(|n| format!("{}", n)).collect::<Vec<String>>();
        write!(f, "{}", ids.join(" "))
    }
}
