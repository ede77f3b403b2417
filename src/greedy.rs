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

//! This module provides the greedy seed constructor. Starting from an empty seed set, it
//! repeatedly asks the seed selection heuristic for a node, seeds it, and simulates the cascade
//! with the new seed set. It stops as soon as the cascade infects at least M nodes.
//!
//! The returned seed set is feasible but not necessarily of minimum size. Its purpose is to be
//! handed as a warm start to an exact solver. Moreover, removing the last node added to the set
//! always gives a seed set that misses the target (otherwise the construction would have stopped
//! one iteration earlier).

use tracing::debug;

use crate::common::{check_target, Instance};
use crate::core::graph::{Graph, NodeIndex};
use crate::core::seeds::SeedVector;
use crate::error::{Error, Result};
use crate::heuristics::SeedSelection;
use crate::heuristics::popularity::PopularityRanking;
use crate::propagator::{check_threshold, CascadePropagator, CascadeTrace};
use crate::statistics::Statistics;

pub struct GreedySeeder<'g, H, const S: bool>
where
    H: SeedSelection,
{
    /// Graph on which the cascades are simulated
    graph: &'g Graph,
    /// Heuristic choosing the next seed
    selection: H,
    /// Propagator used to simulate the cascade after each new seed
    propagator: CascadePropagator,
    /// Nodes in the order in which they have been seeded
    seeding_order: Vec<NodeIndex>,
    statistics: Statistics<S>,
}

impl<'g, H, const S: bool> GreedySeeder<'g, H, S>
where
    H: SeedSelection,
{
    pub fn new(graph: &'g Graph, selection: H) -> Self {
        Self {
            graph,
            selection,
            propagator: CascadePropagator::new(),
            seeding_order: vec![],
            statistics: Statistics::default(),
        }
    }

    /// Builds a seed vector whose cascade infects at least `target` nodes with the given threshold
    pub fn seed(&mut self, threshold: usize, target: usize) -> Result<SeedVector> {
        check_threshold(threshold)?;
        check_target(self.graph, target)?;
        self.statistics.start();
        self.selection.init(self.graph);
        self.seeding_order.clear();
        let mut seeds = SeedVector::empty(self.graph.number_nodes());
        let mut infected = 0;
        while let Some(node) = self.selection.next_seed(self.graph, &seeds) {
            seeds.seed(node);
            self.seeding_order.push(node);
            self.statistics.seed();
            infected = self.propagator.propagate(self.graph, &seeds, threshold)?;
            self.statistics.simulation(self.propagator.number_rounds(), infected);
            debug!(seed = node.0, seeds = self.seeding_order.len(), infected, required = target, "greedy iteration");
            if infected >= target {
                self.statistics.finish();
                return Ok(seeds);
            }
        }
        self.statistics.finish();
        Err(Error::UnreachableTarget { target, reached: infected })
    }

    /// Nodes in the order in which they have been seeded by the last call to `seed`
    pub fn seeding_order(&self) -> &[NodeIndex] {
        &self.seeding_order
    }

    /// History of the cascade started by the last seed set built
    pub fn trace(&self) -> CascadeTrace {
        self.propagator.trace()
    }

    pub fn statistics(&self) -> &Statistics<S> {
        &self.statistics
    }
}

pub type StatGreedySeeder<'g> = GreedySeeder<'g, PopularityRanking, true>;
pub type QuietGreedySeeder<'g> = GreedySeeder<'g, PopularityRanking, false>;

/// Builds a greedy seed vector by seeding the most popular nodes first, until the cascade infects
/// at least `target` nodes.
pub fn build_greedy_seed(graph: &Graph, threshold: usize, target: usize) -> Result<SeedVector> {
    let mut seeder = QuietGreedySeeder::new(graph, PopularityRanking::default());
    seeder.seed(threshold, target)
}

/// Same as `build_greedy_seed`, for an instance
pub fn greedy_for_instance(instance: &Instance) -> Result<SeedVector> {
    build_greedy_seed(instance.graph(), instance.threshold(), instance.target())
}
