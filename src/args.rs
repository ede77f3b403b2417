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

use clap::{Parser, Subcommand};

use std::path::PathBuf;
use crate::common::SolverKind;
use crate::solvers::command::DEFAULT_PROGRAM;
use crate::solvers::exhaustive::DEFAULT_NODE_LIMIT;

#[derive(Debug, Parser)]
#[clap(name="Cascadeip", version, author, about)]
pub struct Args {
    #[clap(subcommand)]
    pub command: Command,
    /// Collect and print statistics about the seeding
    #[clap(long, global=true, action)]
    pub statistics: bool,
    /// Log the progress of every step (same as RUST_LOG=debug)
    #[clap(short, long, global=true, action)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Simulates the cascade started by a seed set and prints the number of infected nodes
    Simulate {
        /// The edge list of the friendship graph
        #[clap(short, long, value_parser)]
        input: PathBuf,
        /// Number of infected friends needed to convert a node
        #[clap(short, long)]
        m: usize,
        /// The seeds, as a list of node ids separated by spaces
        #[clap(short, long, value_delimiter=' ', num_args=0..)]
        seeds: Vec<usize>,
        /// If present, print the number of infected nodes after every round
        #[clap(long, action)]
        trace: bool,
    },
    /// Builds a seed set by seeding the most popular nodes first
    Greedy {
        /// The edge list of the friendship graph
        #[clap(short, long, value_parser)]
        input: PathBuf,
        /// Number of infected friends needed to convert a node
        #[clap(short, long)]
        m: usize,
        /// Minimum number of infected nodes at the end of the cascade
        #[clap(short, long)]
        target: usize,
        /// If present, write the seeds in this file (one id per line)
        #[clap(short, long)]
        output: Option<PathBuf>,
    },
    /// Writes the integer programming model of an instance in the LP format
    Model {
        #[clap(short, long, value_parser)]
        input: PathBuf,
        #[clap(short, long)]
        m: usize,
        #[clap(short, long)]
        target: usize,
        /// The LP file
        #[clap(short, long)]
        output: PathBuf,
        /// If present, write the greedy seed set as a MIP start in this file
        #[clap(long)]
        warm_start: Option<PathBuf>,
    },
    /// Solves an instance to optimality
    Solve {
        #[clap(short, long, value_parser)]
        input: PathBuf,
        #[clap(short, long)]
        m: usize,
        #[clap(short, long)]
        target: usize,
        /// If present, the greedy seed set is given to the solver as a warm start
        #[clap(long, action)]
        greedy: bool,
        #[clap(long, value_enum, default_value_t=SolverKind::Exhaustive)]
        solver: SolverKind,
        /// Program run by the command solver
        #[clap(long, default_value=DEFAULT_PROGRAM)]
        program: String,
        /// Largest graph accepted by the exhaustive solver
        #[clap(long, default_value_t=DEFAULT_NODE_LIMIT)]
        limit: usize,
        /// If present, write the optimal seeds in this file
        #[clap(short, long)]
        output: Option<PathBuf>,
    },
    /// Generates a random friendship graph
    Generate {
        /// Number of nodes (at least 2)
        #[clap(short)]
        n: usize,
        #[clap(short, long, default_value="output.txt")]
        output: PathBuf,
        /// Seed of the random generator
        #[clap(long, default_value_t=0)]
        seed: u64,
    },
    /// Runs the greedy constructor and the exact solver on batches of random graphs
    Batch {
        /// Number of graphs for each number of nodes and threshold
        iterations: usize,
        /// Smallest number of nodes
        n: usize,
        /// Number of distinct node counts (n, n + 1, ..., n + d - 1)
        d: usize,
        /// Smallest threshold
        m: usize,
        /// Number of distinct thresholds
        d_m: usize,
        /// Proportion of the nodes that must be infected
        proportion: f64,
        /// Offset of the graph indexes
        offset: usize,
        /// Output folder
        folder: PathBuf,
        /// If present, the exact solver to compare with and without warm start
        #[clap(long, value_enum)]
        solver: Option<SolverKind>,
        #[clap(long, default_value=DEFAULT_PROGRAM)]
        program: String,
        #[clap(long, default_value_t=DEFAULT_NODE_LIMIT)]
        limit: usize,
        #[clap(long, default_value_t=0)]
        seed: u64,
        /// Number of threads used to process the graphs
        #[clap(long, short, default_value_t=1)]
        jobs: usize,
    },
    /// Reads the node table of a Gurobi log and prints time, explored nodes and steps
    ParseLog {
        file: PathBuf,
    },
}
