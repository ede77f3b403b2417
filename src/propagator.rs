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

//! This module gives the implementation of the cascade propagator. Given a friendship graph, a
//! seed vector and a threshold m, it simulates the discrete-time spread of the infection.
//! The propagation works as follows:
//!     - The infected nodes are initialised with the seeds (round 0)
//!     - At each round, for every node, count the number of its friends that are infected at
//!       the start of the round
//!     - Every node with at least m infected friends becomes infected. All conversions are
//!       applied at the end of the round, so that a node infected during round r only influences
//!       its friends from round r + 1 on
//!     - An infected node stays infected forever
//!
//! The propagation always runs exactly n rounds (n being the number of nodes in the graph), even if
//! a fix point is reached earlier. Since at least one node is converted at every round before the
//! fix point, n rounds are always enough to reach it.
//!
//! The propagator keeps its buffers between calls, so that the greedy constructor can run many
//! simulations on the same graph without re-allocating them.

use crate::core::graph::{Graph, NodeIndex};
use crate::core::seeds::SeedVector;
use crate::error::{Error, Result};

/// Rejects thresholds for which every node would be converted at the first round
pub fn check_threshold(threshold: usize) -> Result<()> {
    if threshold < 1 {
        Err(Error::InvalidThreshold(threshold))
    } else {
        Ok(())
    }
}

#[derive(Default)]
pub struct CascadePropagator {
    /// Infection state at the start of the current round
    infected: Vec<bool>,
    /// Number of infected friends of each node at the start of the current round
    infected_friends: Vec<usize>,
    /// For each node, the round at which it has been infected (0 for the seeds)
    infection_round: Vec<Option<usize>>,
    /// Number of infected nodes after each round, starting with round 0
    infected_per_round: Vec<usize>,
}

impl CascadePropagator {

    pub fn new() -> Self {
        Self::default()
    }

    /// Simulates the cascade started by the seeds and returns the number of infected nodes after
    /// the last round. The seed vector is left untouched.
    pub fn propagate(&mut self, graph: &Graph, seeds: &SeedVector, threshold: usize) -> Result<usize> {
        seeds.check_shape(graph)?;
        check_threshold(threshold)?;
        let n = graph.number_nodes();
        self.infected.clear();
        self.infected.extend_from_slice(seeds.as_slice());
        self.infected_friends.clear();
        self.infected_friends.resize(n, 0);
        self.infection_round.clear();
        self.infection_round.extend(self.infected.iter().map(|s| if *s { Some(0) } else { None }));
        self.infected_per_round.clear();
        let mut count = seeds.number_seeds();
        self.infected_per_round.push(count);

        for round in 1..=n {
            // The counts are computed from the start-of-round state before any conversion
            for node in graph.nodes_iter() {
                self.infected_friends[node.0] = graph.neighbors_iter(node).filter(|f| self.infected[f.0]).count();
            }
            for node in 0..n {
                if !self.infected[node] && self.infected_friends[node] >= threshold {
                    self.infected[node] = true;
                    self.infection_round[node] = Some(round);
                    count += 1;
                }
            }
            self.infected_per_round.push(count);
        }
        Ok(count)
    }

    /// Returns the number of rounds simulated by the last call to `propagate`
    pub fn number_rounds(&self) -> usize {
        self.infected_per_round.len().saturating_sub(1)
    }

    /// Returns the round at which the node was infected during the last propagation, if any
    pub fn infection_round(&self, node: NodeIndex) -> Option<usize> {
        self.infection_round[node.0]
    }

    /// Returns the number of infected nodes after each round of the last propagation
    pub fn infected_per_round(&self) -> &[usize] {
        &self.infected_per_round
    }

    /// Returns a copy of the last propagation
    pub fn trace(&self) -> CascadeTrace {
        CascadeTrace {
            infection_round: self.infection_round.clone(),
            infected_per_round: self.infected_per_round.clone(),
        }
    }
}

/// The full history of a cascade: when each node has been infected, and how many nodes were
/// infected after each round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CascadeTrace {
    infection_round: Vec<Option<usize>>,
    infected_per_round: Vec<usize>,
}

impl CascadeTrace {

    pub fn number_nodes(&self) -> usize {
        self.infection_round.len()
    }

    pub fn number_rounds(&self) -> usize {
        self.infected_per_round.len().saturating_sub(1)
    }

    /// Number of infected nodes after the last round
    pub fn infected_count(&self) -> usize {
        self.infected_per_round.last().copied().unwrap_or(0)
    }

    pub fn infection_round(&self, node: NodeIndex) -> Option<usize> {
        self.infection_round[node.0]
    }

    /// Returns true if the node is infected at the end of the given round
    pub fn is_infected_at(&self, node: NodeIndex, round: usize) -> bool {
        self.infection_round[node.0].is_some_and(|r| r <= round)
    }

    pub fn infected_per_round(&self) -> &[usize] {
        &self.infected_per_round
    }

    /// First round after which no more node is converted
    pub fn stable_from(&self) -> usize {
        let last = self.infected_count();
        self.infected_per_round.iter().position(|c| *c == last).unwrap_or(0)
    }

    /// Final infection state, one entry per node
    pub fn final_state(&self) -> Vec<bool> {
        self.infection_round.iter().map(|r| r.is_some()).collect()
    }
}

/// Simulates the cascade started by the seeds on the graph and returns the final number of
/// infected nodes.
pub fn simulate(graph: &Graph, seeds: &SeedVector, threshold: usize) -> Result<usize> {
    CascadePropagator::new().propagate(graph, seeds, threshold)
}

/// Simulates the cascade and returns its full history
pub fn simulate_trace(graph: &Graph, seeds: &SeedVector, threshold: usize) -> Result<CascadeTrace> {
    let mut propagator = CascadePropagator::new();
    propagator.propagate(graph, seeds, threshold)?;
    Ok(propagator.trace())
}

#[cfg(test)]
mod test_propagator {
    use super::*;

    fn path_4() -> Graph {
        Graph::from_edges(4, &[(0, 1), (1, 2), (2, 3)]).unwrap()
    }

    #[test]
    pub fn single_seed_infects_path_with_threshold_one() {
        let g = path_4();
        let seeds = SeedVector::from_nodes(4, &[1]).unwrap();
        assert_eq!(4, simulate(&g, &seeds, 1).unwrap());
        let trace = simulate_trace(&g, &seeds, 1).unwrap();
        assert_eq!(Some(0), trace.infection_round(NodeIndex(1)));
        assert_eq!(Some(1), trace.infection_round(NodeIndex(0)));
        assert_eq!(Some(1), trace.infection_round(NodeIndex(2)));
        assert_eq!(Some(2), trace.infection_round(NodeIndex(3)));
        assert_eq!(&[1, 3, 4, 4, 4], trace.infected_per_round());
        assert_eq!(2, trace.stable_from());
    }

    #[test]
    pub fn single_seed_is_stuck_with_threshold_two() {
        let g = path_4();
        let seeds = SeedVector::from_nodes(4, &[1]).unwrap();
        let trace = simulate_trace(&g, &seeds, 2).unwrap();
        assert_eq!(1, trace.infected_count());
        assert_eq!(4, trace.number_rounds());
        assert!(trace.infected_per_round().iter().all(|c| *c == 1));
        assert_eq!(0, trace.stable_from());
    }

    #[test]
    pub fn updates_are_synchronous() {
        // With a synchronous update, node 2 can not be converted in the same round as node 1
        let g = path_4();
        let seeds = SeedVector::from_nodes(4, &[0]).unwrap();
        let mut propagator = CascadePropagator::new();
        propagator.propagate(&g, &seeds, 1).unwrap();
        assert_eq!(Some(1), propagator.infection_round(NodeIndex(1)));
        assert_eq!(Some(2), propagator.infection_round(NodeIndex(2)));
        assert_eq!(Some(3), propagator.infection_round(NodeIndex(3)));
        assert_eq!(4, propagator.number_rounds());
    }

    #[test]
    pub fn empty_and_full_seed_vectors() {
        let g = Graph::from_edges(5, &[(0, 1), (1, 2), (2, 3), (3, 4), (4, 0)]).unwrap();
        assert_eq!(0, simulate(&g, &SeedVector::empty(5), 1).unwrap());
        assert_eq!(5, simulate(&g, &SeedVector::full(5), 3).unwrap());
    }

    #[test]
    pub fn seeds_are_not_modified() {
        let g = path_4();
        let seeds = SeedVector::from_nodes(4, &[2]).unwrap();
        let copy = seeds.clone();
        simulate(&g, &seeds, 1).unwrap();
        assert_eq!(copy, seeds);
    }

    #[test]
    pub fn propagator_is_reusable() {
        let g = path_4();
        let mut propagator = CascadePropagator::new();
        assert_eq!(4, propagator.propagate(&g, &SeedVector::from_nodes(4, &[1]).unwrap(), 1).unwrap());
        assert_eq!(2, propagator.propagate(&g, &SeedVector::from_nodes(4, &[0, 3]).unwrap(), 2).unwrap());
        assert_eq!(None, propagator.infection_round(NodeIndex(1)));
    }

    #[test]
    pub fn shape_mismatch() {
        let g = path_4();
        assert!(matches!(simulate(&g, &SeedVector::empty(3), 1), Err(Error::ShapeMismatch { expected: 4, actual: 3 })));
    }

    #[test]
    pub fn zero_threshold_is_rejected() {
        let g = path_4();
        assert!(matches!(simulate(&g, &SeedVector::empty(4), 0), Err(Error::InvalidThreshold(0))));
    }

    #[test]
    pub fn empty_graph() {
        let g = Graph::new(0);
        assert_eq!(0, simulate(&g, &SeedVector::empty(0), 1).unwrap());
    }
}
