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

use clap::ValueEnum;

use crate::core::graph::Graph;
use crate::core::seeds::SeedVector;
use crate::error::{Error, Result};
use crate::propagator::{check_threshold, simulate};

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum SolverKind {
    /// Enumerates the seed sets by increasing size (small graphs only)
    Exhaustive,
    /// Runs an external integer programming solver on the exported model
    Command,
}

impl std::fmt::Display for SolverKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolverKind::Exhaustive => write!(f, "exhaustive"),
            SolverKind::Command => write!(f, "command"),
        }
    }
}

/// Rejects targets outside `[1, n]`
pub fn check_target(graph: &Graph, target: usize) -> Result<()> {
    if target < 1 || target > graph.number_nodes() {
        Err(Error::InfeasibleTarget { target, nodes: graph.number_nodes() })
    } else {
        Ok(())
    }
}

/// A seeding problem: a friendship graph, the number of infected friends needed to convert a node
/// (m) and the minimum number of nodes that must be infected at the end (M).
#[derive(Debug, Clone)]
pub struct Instance {
    graph: Graph,
    threshold: usize,
    target: usize,
}

impl Instance {

    pub fn new(graph: Graph, threshold: usize, target: usize) -> Result<Self> {
        check_threshold(threshold)?;
        check_target(&graph, target)?;
        Ok(Self { graph, threshold, target })
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn threshold(&self) -> usize {
        self.threshold
    }

    pub fn target(&self) -> usize {
        self.target
    }

    pub fn number_nodes(&self) -> usize {
        self.graph.number_nodes()
    }

    /// Cost of a seed, `1 + n - M`. It is larger than the maximum deviation `n - M`, so that a
    /// smaller seed set is always preferred to a larger cascade.
    pub fn seed_weight(&self) -> usize {
        1 + self.number_nodes() - self.target
    }

    /// Cost of each node that is not infected at the end
    pub fn deviation_weight(&self) -> usize {
        1
    }

    /// Returns the cost of the seed set, or None if its cascade does not reach the target
    pub fn cost(&self, seeds: &SeedVector) -> Result<Option<usize>> {
        let infected = simulate(&self.graph, seeds, self.threshold)?;
        if infected < self.target {
            return Ok(None);
        }
        Ok(Some(self.seed_weight() * seeds.number_seeds() + self.deviation_weight() * (self.number_nodes() - infected)))
    }
}
