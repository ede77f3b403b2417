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

//! Reference exact solver for small instances. Since a seed costs more than the largest possible
//! deviation, every seed set of size k is cheaper than any seed set of size k + 1. The solver thus
//! enumerates the seed sets by increasing size, and stops as soon as no seed set of the current size
//! can improve on the best one found. A warm start gives an initial incumbent.

use std::time::Instant;
use tracing::debug;

use super::{validate_warm_start, ExactSolver, SolverOutcome, SolverStatistics};
use crate::common::Instance;
use crate::core::graph::NodeIndex;
use crate::core::seeds::SeedVector;
use crate::error::{Error, Result};
use crate::propagator::CascadePropagator;

pub const DEFAULT_NODE_LIMIT: usize = 20;

pub struct ExhaustiveSolver {
    /// Largest number of nodes accepted
    node_limit: usize,
}

impl Default for ExhaustiveSolver {
    fn default() -> Self {
        Self { node_limit: DEFAULT_NODE_LIMIT }
    }
}

impl ExhaustiveSolver {

    pub fn new(node_limit: usize) -> Self {
        Self { node_limit }
    }
}

/// Moves `combination` to the next k-combination of [0, n) in lexicographic order. Returns false
/// when the last combination has been reached.
fn next_combination(combination: &mut [usize], n: usize) -> bool {
    let k = combination.len();
    let mut i = k;
    while i > 0 {
        i -= 1;
        if combination[i] < n - k + i {
            combination[i] += 1;
            for j in (i + 1)..k {
                combination[j] = combination[j - 1] + 1;
            }
            return true;
        }
    }
    false
}

impl ExactSolver for ExhaustiveSolver {

    fn name(&self) -> &str {
        "exhaustive"
    }

    fn solve(&self, instance: &Instance, warm_start: Option<&SeedVector>) -> Result<SolverOutcome> {
        let n = instance.number_nodes();
        if n > self.node_limit {
            return Err(Error::TooLarge { nodes: n, limit: self.node_limit });
        }
        let start = Instant::now();
        let mut best: Option<(usize, SeedVector)> = None;
        if let Some(hint) = warm_start {
            if let Some(cost) = validate_warm_start(instance, hint)? {
                best = Some((cost, hint.clone()));
            }
        }
        let mut propagator = CascadePropagator::new();
        let mut explored_nodes = 0u64;
        let mut steps = 0;
        for k in 1..=n {
            if let Some((cost, _)) = &best {
                if instance.seed_weight() * k >= *cost {
                    break;
                }
            }
            steps += 1;
            let mut combination = (0..k).collect::<Vec<usize>>();
            loop {
                let mut seeds = SeedVector::empty(n);
                for node in combination.iter().copied() {
                    seeds.seed(NodeIndex(node));
                }
                explored_nodes += 1;
                let infected = propagator.propagate(instance.graph(), &seeds, instance.threshold())?;
                if infected >= instance.target() {
                    let cost = instance.seed_weight() * k + instance.deviation_weight() * (n - infected);
                    if best.as_ref().is_none_or(|(c, _)| cost < *c) {
                        best = Some((cost, seeds));
                    }
                }
                if !next_combination(&mut combination, n) {
                    break;
                }
            }
            debug!(size = k, explored_nodes, "seed sets enumerated");
        }
        let statistics = Some(SolverStatistics { time: start.elapsed().as_secs_f64(), explored_nodes, steps });
        Ok(match best {
            Some((cost, seeds)) => SolverOutcome::Optimal { seeds, objective: cost as f64, statistics },
            None => SolverOutcome::Infeasible { statistics },
        })
    }
}

#[cfg(test)]
mod test_exhaustive {
    use super::*;
    use crate::core::graph::Graph;
    use crate::greedy::build_greedy_seed;

    fn path_instance(threshold: usize, target: usize) -> Instance {
        let g = Graph::from_edges(4, &[(0, 1), (1, 2), (2, 3)]).unwrap();
        Instance::new(g, threshold, target).unwrap()
    }

    #[test]
    pub fn combinations_are_enumerated_in_order() {
        let mut combination = vec![0, 1];
        let mut all = vec![combination.clone()];
        while next_combination(&mut combination, 4) {
            all.push(combination.clone());
        }
        assert_eq!(vec![vec![0, 1], vec![0, 2], vec![0, 3], vec![1, 2], vec![1, 3], vec![2, 3]], all);
    }

    #[test]
    pub fn single_seed_on_path() {
        let outcome = ExhaustiveSolver::default().solve(&path_instance(1, 4), None).unwrap();
        // Seeding 0 infects the whole path as well, and comes first
        assert_eq!(Some(1.0), outcome.objective());
        assert_eq!(1, outcome.seeds().unwrap().number_seeds());
    }

    #[test]
    pub fn optimum_is_not_worse_than_greedy() {
        // Greedy seeds the whole path with m = 2, while {0, 2, 3} (or {0, 1, 3}) is enough
        let instance = path_instance(2, 4);
        let greedy = build_greedy_seed(instance.graph(), 2, 4).unwrap();
        let greedy_cost = instance.cost(&greedy).unwrap().unwrap();
        let outcome = ExhaustiveSolver::default().solve(&instance, Some(&greedy)).unwrap();
        let objective = outcome.objective().unwrap();
        assert!(objective <= greedy_cost as f64);
        assert_eq!(Some(objective as usize), instance.cost(outcome.seeds().unwrap()).unwrap());
        assert_eq!(3, outcome.seeds().unwrap().number_seeds());
    }

    #[test]
    pub fn perfect_warm_start_prunes_its_size() {
        let instance = path_instance(1, 4);
        let hint = SeedVector::from_nodes(4, &[1]).unwrap();
        let outcome = ExhaustiveSolver::default().solve(&instance, Some(&hint)).unwrap();
        assert_eq!(Some(&hint), outcome.seeds());
        assert_eq!(0, outcome.statistics().unwrap().explored_nodes);
    }

    #[test]
    pub fn warm_start_with_wrong_shape() {
        let result = ExhaustiveSolver::default().solve(&path_instance(1, 4), Some(&SeedVector::empty(3)));
        assert!(matches!(result, Err(Error::ShapeMismatch { .. })));
    }

    #[test]
    pub fn large_instances_are_refused() {
        let instance = Instance::new(Graph::new(5), 1, 5).unwrap();
        assert!(matches!(ExhaustiveSolver::new(4).solve(&instance, None), Err(Error::TooLarge { nodes: 5, limit: 4 })));
    }
}
