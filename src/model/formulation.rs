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

//! Integer programming formulation of the seeding problem. For an instance with n nodes, the
//! cascade is unrolled over n periods `t = 0, ..., n - 1` with the following variables
//!     - x_i_t (binary): node i is infected at period t. The seeds are the nodes with x_i_0 = 1
//!     - y_i_t (binary, t >= 1): node i has at least m infected friends at period t - 1
//!     - d (continuous, in [0, n - M]): number of nodes that are not infected at the last period
//!
//! and constraints
//!     - RequiredNumberOfPeople: sum_i x_i_{n-1} >= M
//!     - InfectAsManyPeopleAsPossible: d + sum_i x_i_{n-1} = n
//!     - Persistence: x_i_{t-1} <= x_i_t
//!     - PeerPressure: x_i_t <= x_i_{t-1} + y_i_t
//!     - LinkLower: sum_{k friend of i} x_k_{t-1} >= m * y_i_t
//!     - LinkUpper: sum_{k friend of i} x_k_{t-1} <= m - 1 + (n - m + 1) * y_i_t
//!
//! The objective minimizes (1 + n - M) * sum_i x_i_0 + d.

use super::{Model, Sense, VariableIndex, VariableKind};
use crate::common::Instance;
use crate::core::graph::NodeIndex;
use crate::core::seeds::SeedVector;
use crate::error::Result;
use crate::propagator::{simulate_trace, CascadeTrace};

pub struct Formulation {
    model: Model,
    number_nodes: usize,
    /// x_i_t is stored at index i * n + t
    x: Vec<VariableIndex>,
    /// y_i_t is stored at index i * (n - 1) + t - 1
    y: Vec<VariableIndex>,
    d: VariableIndex,
}

impl Formulation {

    pub fn new(instance: &Instance) -> Self {
        let n = instance.number_nodes();
        let m = instance.threshold() as i64;
        let graph = instance.graph();
        let mut model = Model::new("SocialNetworkCascade");

        let mut x = Vec::with_capacity(n * n);
        for i in 0..n {
            for t in 0..n {
                x.push(model.add_variable(format!("x_{}_{}", i, t), VariableKind::Binary, 0, 1));
            }
        }
        let mut y = Vec::with_capacity(n * n.saturating_sub(1));
        for i in 0..n {
            for t in 1..n {
                y.push(model.add_variable(format!("y_{}_{}", i, t), VariableKind::Binary, 0, 1));
            }
        }
        let d = model.add_variable("d".to_string(), VariableKind::Continuous, 0, (n - instance.target()) as i64);

        let mut formulation = Self { model: Model::default(), number_nodes: n, x, y, d };
        let last = n - 1;

        let at_end = (0..n).map(|i| (1, formulation.x(NodeIndex(i), last))).collect::<Vec<(i64, VariableIndex)>>();
        model.add_constraint("RequiredNumberOfPeople".to_string(), at_end.clone(), Sense::GreaterEqual, instance.target() as i64);
        let mut with_deviation = vec![(1, d)];
        with_deviation.extend(at_end);
        model.add_constraint("InfectAsManyPeopleAsPossible".to_string(), with_deviation, Sense::Equal, n as i64);

        for node in graph.nodes_iter() {
            let mut friends = graph.neighbors_iter(node).collect::<Vec<NodeIndex>>();
            friends.sort_unstable();
            for t in 1..n {
                let now = formulation.x(node, t);
                let before = formulation.x(node, t - 1);
                let pressure = formulation.y(node, t);
                model.add_constraint(format!("Persistence_{}_{}", node, t), vec![(1, before), (-1, now)], Sense::LessEqual, 0);
                model.add_constraint(format!("PeerPressure_{}_{}", node, t), vec![(1, now), (-1, before), (-1, pressure)], Sense::LessEqual, 0);

                let infected_friends = friends.iter().map(|f| (1, formulation.x(*f, t - 1))).collect::<Vec<(i64, VariableIndex)>>();
                let mut lower = infected_friends.clone();
                lower.push((-m, pressure));
                model.add_constraint(format!("LinkLower_{}_{}", node, t), lower, Sense::GreaterEqual, 0);
                let mut upper = infected_friends;
                let big_m = n as i64 - m + 1;
                if big_m != 0 {
                    upper.push((-big_m, pressure));
                }
                model.add_constraint(format!("LinkUpper_{}_{}", node, t), upper, Sense::LessEqual, m - 1);
            }
        }

        let seed_weight = instance.seed_weight() as i64;
        let mut objective = (0..n).map(|i| (seed_weight, formulation.x(NodeIndex(i), 0))).collect::<Vec<(i64, VariableIndex)>>();
        objective.push((instance.deviation_weight() as i64, d));
        model.set_objective(objective);

        formulation.model = model;
        formulation
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn number_periods(&self) -> usize {
        self.number_nodes
    }

    /// Variable stating that the node is infected at the given period
    pub fn x(&self, node: NodeIndex, period: usize) -> VariableIndex {
        self.x[node.0 * self.number_nodes + period]
    }

    /// Variable stating that the node has enough infected friends at `period - 1`. Only defined for
    /// `period >= 1`.
    pub fn y(&self, node: NodeIndex, period: usize) -> VariableIndex {
        self.y[node.0 * (self.number_nodes - 1) + period - 1]
    }

    pub fn d(&self) -> VariableIndex {
        self.d
    }

    /// Builds a full assignment of the model variables from a cascade trace. If the cascade reaches
    /// the target, the assignment is feasible and its objective is the cost of the seed set.
    pub fn assignment_from_trace(&self, instance: &Instance, trace: &CascadeTrace) -> Vec<f64> {
        let n = self.number_nodes;
        let graph = instance.graph();
        let mut assignment = vec![0.0; self.model.number_variables()];
        for node in graph.nodes_iter() {
            for t in 0..n {
                if trace.is_infected_at(node, t) {
                    assignment[self.x(node, t).0] = 1.0;
                }
            }
            for t in 1..n {
                let infected_friends = graph.neighbors_iter(node).filter(|f| trace.is_infected_at(*f, t - 1)).count();
                if infected_friends >= instance.threshold() {
                    assignment[self.y(node, t).0] = 1.0;
                }
            }
        }
        if n > 0 {
            let infected = graph.nodes_iter().filter(|node| trace.is_infected_at(*node, n - 1)).count();
            assignment[self.d.0] = (n - infected) as f64;
        }
        assignment
    }

    /// Simulates the cascade of the seeds and builds the corresponding assignment
    pub fn assignment_from_seeds(&self, instance: &Instance, seeds: &SeedVector) -> Result<Vec<f64>> {
        let trace = simulate_trace(instance.graph(), seeds, instance.threshold())?;
        Ok(self.assignment_from_trace(instance, &trace))
    }

    /// Reads the seeds (x_i_0) from an assignment of the model variables
    pub fn seeds_from_assignment(&self, assignment: &[f64]) -> SeedVector {
        (0..self.number_nodes).map(|i| assignment[self.x(NodeIndex(i), 0).0] > 0.5).collect::<Vec<bool>>().into()
    }
}

#[cfg(test)]
mod test_formulation {
    use super::*;
    use crate::core::graph::Graph;
    use crate::greedy::build_greedy_seed;

    fn path_instance(threshold: usize, target: usize) -> Instance {
        let g = Graph::from_edges(4, &[(0, 1), (1, 2), (2, 3)]).unwrap();
        Instance::new(g, threshold, target).unwrap()
    }

    #[test]
    pub fn model_size() {
        let formulation = Formulation::new(&path_instance(1, 4));
        // 16 x, 12 y and d
        assert_eq!(29, formulation.model().number_variables());
        // 2 global constraints and 4 constraints per node and period t >= 1
        assert_eq!(2 + 4 * 4 * 3, formulation.model().number_constraints());
        assert_eq!("x_2_3", formulation.model()[formulation.x(NodeIndex(2), 3)].name());
        assert_eq!("y_3_1", formulation.model()[formulation.y(NodeIndex(3), 1)].name());
        assert_eq!((0, 0), formulation.model()[formulation.d()].bounds());
    }

    #[test]
    pub fn greedy_warm_start_is_feasible() {
        for (threshold, target) in [(1, 4), (2, 4), (2, 2), (1, 1)] {
            let instance = path_instance(threshold, target);
            let formulation = Formulation::new(&instance);
            let seeds = build_greedy_seed(instance.graph(), threshold, target).unwrap();
            let assignment = formulation.assignment_from_seeds(&instance, &seeds).unwrap();
            assert!(formulation.model().violations(&assignment).is_empty());
            let cost = instance.cost(&seeds).unwrap().unwrap();
            assert_eq!(cost as f64, formulation.model().objective_value(&assignment));
            assert_eq!(seeds, formulation.seeds_from_assignment(&assignment));
        }
    }

    #[test]
    pub fn seeds_missing_the_target_are_infeasible() {
        let instance = path_instance(2, 4);
        let formulation = Formulation::new(&instance);
        let seeds = SeedVector::from_nodes(4, &[1]).unwrap();
        let assignment = formulation.assignment_from_seeds(&instance, &seeds).unwrap();
        let violations = formulation.model().violations(&assignment);
        assert!(violations.contains(&"RequiredNumberOfPeople".to_string()));
    }

    #[test]
    pub fn single_node() {
        let instance = Instance::new(Graph::new(1), 1, 1).unwrap();
        let formulation = Formulation::new(&instance);
        assert_eq!(2, formulation.model().number_variables());
        assert_eq!(2, formulation.model().number_constraints());
        let assignment = formulation.assignment_from_seeds(&instance, &SeedVector::full(1)).unwrap();
        assert!(formulation.model().violations(&assignment).is_empty());
        assert_eq!(1.0, formulation.model().objective_value(&assignment));
    }
}
