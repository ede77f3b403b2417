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

//! Exact solvers for the seeding problem. The greedy constructor only gives a feasible seed set;
//! an exact solver returns a seed set of minimum cost. The solvers are collaborators behind the
//! `ExactSolver` trait: they receive an instance and, optionally, a warm start (usually the greedy
//! seed set), and report either an optimal seed set or the infeasibility of the instance.

pub mod command;
pub mod exhaustive;

use std::fmt;
use tracing::warn;

use crate::common::Instance;
use crate::core::seeds::SeedVector;
use crate::error::Result;

pub use command::CommandSolver;
pub use exhaustive::ExhaustiveSolver;

/// Statistics reported by an exact solver about its search
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SolverStatistics {
    /// Solving time, in seconds
    pub time: f64,
    /// Number of nodes (or seed sets) explored
    pub explored_nodes: u64,
    /// Number of progress steps (rows of the node table, or seed set sizes enumerated)
    pub steps: usize,
}

impl fmt::Display for SolverStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.time, self.explored_nodes, self.steps)
    }
}

#[derive(Debug, Clone)]
pub enum SolverOutcome {
    Optimal {
        seeds: SeedVector,
        objective: f64,
        statistics: Option<SolverStatistics>,
    },
    Infeasible {
        statistics: Option<SolverStatistics>,
    },
}

impl SolverOutcome {

    pub fn seeds(&self) -> Option<&SeedVector> {
        match self {
            SolverOutcome::Optimal { seeds, .. } => Some(seeds),
            SolverOutcome::Infeasible { .. } => None,
        }
    }

    pub fn objective(&self) -> Option<f64> {
        match self {
            SolverOutcome::Optimal { objective, .. } => Some(*objective),
            SolverOutcome::Infeasible { .. } => None,
        }
    }

    pub fn statistics(&self) -> Option<&SolverStatistics> {
        match self {
            SolverOutcome::Optimal { statistics, .. } => statistics.as_ref(),
            SolverOutcome::Infeasible { statistics } => statistics.as_ref(),
        }
    }
}

impl fmt::Display for SolverOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolverOutcome::Optimal { seeds, objective, .. } => write!(f, "Optimal seed set [{}] ({} seeds) with objective {}", seeds, seeds.number_seeds(), objective),
            SolverOutcome::Infeasible { .. } => write!(f, "Infeasible"),
        }
    }
}

/// Trait that defines what an exact solver must implement. The solvers are shared between the
/// workers of a batch, hence they must be `Sync`.
pub trait ExactSolver: Send + Sync {
    fn name(&self) -> &str;

    /// Solves the instance. The warm start, if any, must have one entry per node.
    fn solve(&self, instance: &Instance, warm_start: Option<&SeedVector>) -> Result<SolverOutcome>;
}

/// Checks the shape of the warm start and returns its cost. A warm start whose cascade misses the
/// target is rejected (None is returned) and should not be handed to the solver.
pub fn validate_warm_start(instance: &Instance, warm_start: &SeedVector) -> Result<Option<usize>> {
    warm_start.check_shape(instance.graph())?;
    let cost = instance.cost(warm_start)?;
    if cost.is_none() {
        warn!(seeds = warm_start.number_seeds(), "warm start misses the target, it is ignored");
    }
    Ok(cost)
}
