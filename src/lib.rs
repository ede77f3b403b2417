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

// Re-export the modules
mod statistics;
mod logger;
pub mod common;
pub mod core;
pub mod error;
pub mod heuristics;
pub mod parsers;
pub mod propagator;
pub mod greedy;
pub mod generator;
pub mod model;
pub mod solvers;
pub mod batch;
pub mod args;

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

use args::*;
use batch::BatchParameters;
use heuristics::popularity::PopularityRanking;
use model::formulation::Formulation;
use model::warm_start::MipStart;
use solvers::{CommandSolver, ExactSolver, ExhaustiveSolver, SolverOutcome};

pub use common::*;
pub use crate::core::graph::{Graph, NodeIndex};
pub use crate::core::seeds::SeedVector;
pub use error::{Error, Result};
pub use greedy::{build_greedy_seed, greedy_for_instance, GreedySeeder};
pub use propagator::{simulate, simulate_trace, CascadePropagator, CascadeTrace};

use peak_alloc::PeakAlloc;
#[global_allocator]
pub static PEAK_ALLOC: PeakAlloc = PeakAlloc;

fn load_instance(input: &Path, threshold: usize, target: usize) -> Result<Instance> {
    let graph = parsers::graph_from_file(input)?;
    info!(input = %input.display(), nodes = graph.number_nodes(), edges = graph.number_edges(), "graph loaded");
    Instance::new(graph, threshold, target)
}

fn write_seeds(seeds: &SeedVector, output: &Path) -> Result<()> {
    let mut out = BufWriter::new(File::create(output)?);
    for node in seeds.seeds_iter() {
        writeln!(out, "{}", node)?;
    }
    out.flush()?;
    Ok(())
}

fn exact_solver(kind: SolverKind, program: String, limit: usize) -> Box<dyn ExactSolver> {
    match kind {
        SolverKind::Exhaustive => Box::new(ExhaustiveSolver::new(limit)),
        SolverKind::Command => {
            let arguments = solvers::command::DEFAULT_ARGUMENTS.iter().map(|a| a.to_string()).collect();
            Box::new(CommandSolver::new(program, arguments))
        },
    }
}

/// Simulates the cascade of the seeds and returns the number of infected nodes
pub fn run_simulate(input: &Path, threshold: usize, seeds: &[usize], trace: bool) -> Result<usize> {
    let graph = parsers::graph_from_file(input)?;
    let seeds = SeedVector::from_nodes(graph.number_nodes(), seeds)?;
    let trace_of_cascade = simulate_trace(&graph, &seeds, threshold)?;
    if trace {
        for (round, infected) in trace_of_cascade.infected_per_round().iter().enumerate() {
            println!("round {} | infected {}", round, infected);
        }
    }
    let infected = trace_of_cascade.infected_count();
    println!("{}", infected);
    Ok(infected)
}

/// Builds the greedy seed set of an instance, prints it and, optionally, writes it
pub fn run_greedy(input: &Path, threshold: usize, target: usize, output: Option<PathBuf>, statistics: bool) -> Result<SeedVector> {
    let graph = parsers::graph_from_file(input)?;
    let seeds = if statistics {
        let mut seeder = greedy::StatGreedySeeder::new(&graph, PopularityRanking::default());
        let seeds = seeder.seed(threshold, target)?;
        seeder.statistics().print();
        seeds
    } else {
        let mut seeder = greedy::QuietGreedySeeder::new(&graph, PopularityRanking::default());
        seeder.seed(threshold, target)?
    };
    println!("{} seeds: {}", seeds.number_seeds(), seeds);
    if let Some(f) = output {
        write_seeds(&seeds, &f)?;
    }
    Ok(seeds)
}

/// Writes the LP model of an instance and, optionally, the greedy seed set as MIP start
pub fn run_model(input: &Path, threshold: usize, target: usize, output: &Path, warm_start: Option<PathBuf>) -> Result<()> {
    let instance = load_instance(input, threshold, target)?;
    let formulation = Formulation::new(&instance);
    fs::write(output, formulation.model().to_string())?;
    info!(variables = formulation.model().number_variables(), constraints = formulation.model().number_constraints(), "model written");
    if let Some(f) = warm_start {
        let seeds = greedy_for_instance(&instance)?;
        let start = MipStart::from_seeds(&formulation, &instance, &seeds)?;
        fs::write(f, start.to_string())?;
    }
    Ok(())
}

pub fn run_solve(input: &Path, threshold: usize, target: usize, greedy: bool, solver: Box<dyn ExactSolver>, output: Option<PathBuf>, statistics: bool) -> Result<SolverOutcome> {
    let instance = load_instance(input, threshold, target)?;
    let warm_start = if greedy {
        let seeds = greedy_for_instance(&instance)?;
        info!(seeds = seeds.number_seeds(), "greedy warm start built");
        Some(seeds)
    } else {
        None
    };
    let outcome = solver.solve(&instance, warm_start.as_ref())?;
    println!("{}", outcome);
    if statistics {
        if let Some(s) = outcome.statistics() {
            println!("time {} s | explored nodes {} | steps {}", s.time, s.explored_nodes, s.steps);
        }
    }
    if let (Some(f), Some(seeds)) = (output, outcome.seeds()) {
        write_seeds(seeds, &f)?;
    }
    Ok(outcome)
}

pub fn run_generate(n: usize, output: &Path, seed: u64) -> Result<Graph> {
    let graph = generator::random_graph(n, seed)?;
    parsers::write_graph_file(&graph, output)?;
    info!(nodes = n, edges = graph.number_edges(), output = %output.display(), "graph generated");
    Ok(graph)
}

pub fn run_parse_log(file: &Path) -> Result<()> {
    match parsers::log_from_file(file)? {
        Some(statistics) => println!("time {} | explored nodes {} | steps {}", statistics.time, statistics.explored_nodes, statistics.steps),
        None => println!("No node table in {}", file.display()),
    }
    Ok(())
}

/// Dispatches the command line to the corresponding command
pub fn run(args: Args) -> Result<()> {
    match args.command {
        Command::Simulate { input, m, seeds, trace } => {
            run_simulate(&input, m, &seeds, trace)?;
        },
        Command::Greedy { input, m, target, output } => {
            run_greedy(&input, m, target, output, args.statistics)?;
        },
        Command::Model { input, m, target, output, warm_start } => {
            run_model(&input, m, target, &output, warm_start)?;
        },
        Command::Solve { input, m, target, greedy, solver, program, limit, output } => {
            run_solve(&input, m, target, greedy, exact_solver(solver, program, limit), output, args.statistics)?;
        },
        Command::Generate { n, output, seed } => {
            run_generate(n, &output, seed)?;
        },
        Command::Batch { iterations, n, d, m, d_m, proportion, offset, folder, solver, program, limit, seed, jobs } => {
            let parameters = BatchParameters {
                iterations,
                nodes: n,
                node_range: d,
                threshold: m,
                threshold_range: d_m,
                proportion,
                offset,
                folder,
                seed,
                jobs,
            };
            let solver = solver.map(|kind| exact_solver(kind, program, limit));
            let reports = batch::run_batch(&parameters, solver.as_deref())?;
            println!("{} instances processed", reports.len());
        },
        Command::ParseLog { file } => {
            run_parse_log(&file)?;
        },
    }
    Ok(())
}
