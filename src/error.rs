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

//! Error types shared by the graph loader, the cascade simulator, the greedy constructor and
//! the exact-solver collaborators.

use thiserror::Error;

/// Errors that can occur while loading an instance, simulating a cascade or seeding it.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The seed vector does not have one entry per node of the graph.
    #[error("Seed vector has {actual} entries but the graph has {expected} nodes")]
    ShapeMismatch {
        /// Number of nodes in the graph.
        expected: usize,
        /// Length of the seed vector received.
        actual: usize,
    },

    /// The conversion threshold must be at least one infected friend.
    #[error("Invalid threshold m = {0}, it must be at least 1")]
    InvalidThreshold(usize),

    /// The infection target is outside `[1, n]`.
    #[error("Invalid target M = {target} for a graph with {nodes} nodes")]
    InfeasibleTarget {
        /// Requested number of infected nodes.
        target: usize,
        /// Number of nodes in the graph.
        nodes: usize,
    },

    /// Every node has been seeded but the cascade still misses the target.
    #[error("Target M = {target} not reached after seeding every node ({reached} infected)")]
    UnreachableTarget {
        /// Requested number of infected nodes.
        target: usize,
        /// Infected count with the full ranking seeded.
        reached: usize,
    },

    /// The graph violates a structural invariant (self-loop, id out of range, holes in the id space).
    #[error("Invalid graph: {0}")]
    InvalidGraph(String),

    /// A seed id given by the user is not a node of the graph.
    #[error("Seed {seed} is not a node of a graph with {nodes} nodes")]
    InvalidSeed {
        /// The rejected seed id.
        seed: usize,
        /// Number of nodes in the graph.
        nodes: usize,
    },

    /// A line of an input file could not be understood.
    #[error("Parse error at line {line}: {reason}")]
    Parse {
        /// One-based line number.
        line: usize,
        /// What went wrong.
        reason: String,
    },

    /// The instance is too large for the exhaustive solver.
    #[error("Instance with {nodes} nodes exceeds the exhaustive solver limit of {limit}")]
    TooLarge {
        /// Number of nodes in the graph.
        nodes: usize,
        /// Configured limit.
        limit: usize,
    },

    /// The external solver failed to run or produced an unusable answer.
    #[error("Solver failure: {0}")]
    Solver(String),

    /// The rayon worker pool of the batch driver could not be built.
    #[error("Can not build the worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// Reading or writing a file failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
