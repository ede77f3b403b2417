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

//! Batch experiments comparing the exact solvers with and without the greedy warm start.
//!
//! For every number of nodes n in [n, n + d) and every threshold m in [m, m + d_m), a sub-folder
//! `n{n}m{m}` is created in the output folder, in which I random graphs are generated and written.
//! The target of every instance is M = max(1, floor(P * n)). On every instance, the greedy
//! constructor is run and, if an exact solver is given, the solver is run twice: once with the
//! greedy seed set as warm start and once without. The instances of a sub-folder are processed in
//! parallel, and the results are written (in the order of the instances) in three CSV files
//!     - `heuristic_stats.csv`: the greedy seed set of each instance
//!     - `greedy_stats.csv`: the solver statistics when warm-started with the greedy seed set
//!     - `not_greedy_stats.csv`: the solver statistics without warm start

use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::common::Instance;
use crate::core::seeds::SeedVector;
use crate::error::{Error, Result};
use crate::generator::random_graph;
use crate::greedy::StatGreedySeeder;
use crate::heuristics::popularity::PopularityRanking;
use crate::logger::Logger;
use crate::parsers::write_graph_file;
use crate::solvers::{ExactSolver, SolverOutcome};

pub const HEURISTIC_STATS: &str = "heuristic_stats.csv";
pub const GREEDY_STATS: &str = "greedy_stats.csv";
pub const NOT_GREEDY_STATS: &str = "not_greedy_stats.csv";

#[derive(Debug, Clone)]
pub struct BatchParameters {
    /// Number of graphs generated for each (n, m) pair
    pub iterations: usize,
    /// Smallest number of nodes
    pub nodes: usize,
    /// Number of distinct node counts
    pub node_range: usize,
    /// Smallest threshold
    pub threshold: usize,
    /// Number of distinct thresholds
    pub threshold_range: usize,
    /// Proportion of the nodes that must be infected
    pub proportion: f64,
    /// Offset added to the index of the graphs (in their file name and in their seed)
    pub offset: usize,
    /// Folder in which the sub-folders are created
    pub folder: PathBuf,
    /// Base seed of the random generator
    pub seed: u64,
    /// Number of worker threads
    pub jobs: usize,
}

impl BatchParameters {

    /// Target of the instances with n nodes
    pub fn target(&self, n: usize) -> usize {
        ((self.proportion * n as f64).floor() as usize).max(1)
    }

    pub fn node_counts(&self) -> impl Iterator<Item = usize> {
        self.nodes..(self.nodes + self.node_range)
    }

    pub fn thresholds(&self) -> impl Iterator<Item = usize> {
        self.threshold..(self.threshold + self.threshold_range)
    }

    /// Rejects the parameters leading to at least one invalid instance
    pub fn check(&self) -> Result<()> {
        for n in self.node_counts() {
            if n < 2 {
                return Err(Error::InvalidGraph(format!("a random graph needs at least 2 nodes, got {}", n)));
            }
            let target = self.target(n);
            if target > n {
                return Err(Error::InfeasibleTarget { target, nodes: n });
            }
        }
        if self.threshold_range > 0 && self.threshold == 0 {
            return Err(Error::InvalidThreshold(0));
        }
        Ok(())
    }
}

/// Result of the greedy constructor and of the exact solver on one instance
#[derive(Debug)]
pub struct InstanceReport {
    pub graph: String,
    pub nodes: usize,
    pub edges: usize,
    pub threshold: usize,
    pub target: usize,
    pub greedy: SeedVector,
    pub greedy_infected: usize,
    pub greedy_cost: usize,
    pub simulations: usize,
    /// Outcome of the solver with the greedy warm start (or the error message)
    pub with_warm_start: Option<std::result::Result<SolverOutcome, String>>,
    /// Outcome of the solver without warm start (or the error message)
    pub without_warm_start: Option<std::result::Result<SolverOutcome, String>>,
}

fn solver_row(graph: &str, outcome: &std::result::Result<SolverOutcome, String>) -> String {
    match outcome {
        Ok(SolverOutcome::Infeasible { .. }) => format!("{},Infeasible,,", graph),
        Ok(outcome) => match outcome.statistics() {
            Some(statistics) => format!("{},{}", graph, statistics),
            None => format!("{},,,", graph),
        },
        Err(_) => format!("{},Failed,,", graph),
    }
}

fn run_solver(solver: &dyn ExactSolver, instance: &Instance, warm_start: Option<&SeedVector>, graph: &str) -> std::result::Result<SolverOutcome, String> {
    solver.solve(instance, warm_start).map_err(|e| {
        warn!(graph, solver = solver.name(), warm_start = warm_start.is_some(), error = %e, "solver failure");
        e.to_string()
    })
}

fn run_instance(parameters: &BatchParameters, folder: &Path, n: usize, m: usize, index: usize, solver: Option<&dyn ExactSolver>) -> Result<InstanceReport> {
    let graph_name = format!("random_graph_{}.txt", index + parameters.offset);
    let graph = random_graph(n, parameters.seed.wrapping_add((index + parameters.offset) as u64))?;
    write_graph_file(&graph, &folder.join(&graph_name))?;
    let instance = Instance::new(graph, m, parameters.target(n))?;

    let mut seeder = StatGreedySeeder::new(instance.graph(), PopularityRanking::default());
    let greedy = seeder.seed(instance.threshold(), instance.target())?;
    let greedy_infected = seeder.trace().infected_count();
    let simulations = seeder.statistics().number_simulations();
    let greedy_cost = instance.seed_weight() * greedy.number_seeds() + instance.deviation_weight() * (n - greedy_infected);

    let (with_warm_start, without_warm_start) = match solver {
        Some(solver) => (
            Some(run_solver(solver, &instance, Some(&greedy), &graph_name)),
            Some(run_solver(solver, &instance, None, &graph_name)),
        ),
        None => (None, None),
    };
    Ok(InstanceReport {
        graph: graph_name,
        nodes: n,
        edges: instance.graph().number_edges(),
        threshold: m,
        target: instance.target(),
        greedy,
        greedy_infected,
        greedy_cost,
        simulations,
        with_warm_start,
        without_warm_start,
    })
}

fn write_reports(folder: &Path, reports: &[InstanceReport], with_solver: bool) -> Result<()> {
    let mut heuristic = Logger::<true>::new(&folder.join(HEURISTIC_STATS), "graph,nodes,edges,threshold,target,seeds,infected,cost,simulations")?;
    for report in reports.iter() {
        heuristic.log(&format!("{},{},{},{},{},{},{},{},{}", report.graph, report.nodes, report.edges, report.threshold, report.target,
                               report.greedy.number_seeds(), report.greedy_infected, report.greedy_cost, report.simulations))?;
    }
    heuristic.flush()?;
    if with_solver {
        let mut greedy = Logger::<true>::new(&folder.join(GREEDY_STATS), "graph,time,explored_nodes,steps")?;
        let mut not_greedy = Logger::<true>::new(&folder.join(NOT_GREEDY_STATS), "graph,time,explored_nodes,steps")?;
        for report in reports.iter() {
            if let Some(outcome) = &report.with_warm_start {
                greedy.log(&solver_row(&report.graph, outcome))?;
            }
            if let Some(outcome) = &report.without_warm_start {
                not_greedy.log(&solver_row(&report.graph, outcome))?;
            }
        }
        greedy.flush()?;
        not_greedy.flush()?;
    }
    Ok(())
}

/// Runs the batch experiments and returns the reports of every instance, sub-folder by sub-folder
pub fn run_batch(parameters: &BatchParameters, solver: Option<&dyn ExactSolver>) -> Result<Vec<InstanceReport>> {
    parameters.check()?;
    let pool = rayon::ThreadPoolBuilder::new().num_threads(parameters.jobs).build()?;
    let mut all_reports = vec![];
    for n in parameters.node_counts() {
        for m in parameters.thresholds() {
            let folder = parameters.folder.join(format!("n{}m{}", n, m));
            fs::create_dir_all(&folder)?;
            info!(nodes = n, threshold = m, required = parameters.target(n), iterations = parameters.iterations, "starting batch");
            let reports = pool.install(|| {
                (0..parameters.iterations).into_par_iter()
                    .map(|index| run_instance(parameters, &folder, n, m, index, solver))
                    .collect::<Result<Vec<InstanceReport>>>()
            })?;
            write_reports(&folder, &reports, solver.is_some())?;
            let seeds = reports.iter().map(|r| r.greedy.number_seeds()).sum::<usize>();
            info!(nodes = n, threshold = m, graphs = reports.len(), greedy_seeds = seeds, "batch done");
            all_reports.extend(reports);
        }
    }
    Ok(all_reports)
}
