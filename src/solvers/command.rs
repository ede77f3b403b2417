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

//! Exact solver delegating the search to an external integer programming solver. The model is
//! written in the LP format in a temporary directory, together with the warm start (if any), and
//! the solver program is run on it. The arguments of the program are templates in which the
//! following placeholders are replaced by paths in the temporary directory
//!     - `{model}`: the LP file of the model
//!     - `{solution}`: the file in which the solver must write its solution (`.sol` format)
//!     - `{log}`: the file in which the solver writes its log
//!     - `{start}`: the MIP start. Arguments referring to it are dropped if there is no warm start
//!
//! The default program is `gurobi_cl`.

use std::fs;
use std::path::Path;
use std::process::Command;
use tracing::{debug, warn};

use super::{validate_warm_start, ExactSolver, SolverOutcome};
use crate::common::Instance;
use crate::core::graph::NodeIndex;
use crate::core::seeds::SeedVector;
use crate::error::{Error, Result};
use crate::model::formulation::Formulation;
use crate::model::warm_start::MipStart;
use crate::parsers::{log_from_file, solution_from_file};

pub const DEFAULT_PROGRAM: &str = "gurobi_cl";
pub const DEFAULT_ARGUMENTS: [&str; 4] = ["ResultFile={solution}", "LogFile={log}", "InputFile={start}", "{model}"];

const MODEL_FILE: &str = "model.lp";
const SOLUTION_FILE: &str = "model.sol";
const LOG_FILE: &str = "gurobi.log";
const START_FILE: &str = "start.mst";

#[derive(Debug, Clone)]
pub struct CommandSolver {
    program: String,
    arguments: Vec<String>,
}

impl Default for CommandSolver {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRAM.to_string(), DEFAULT_ARGUMENTS.iter().map(|a| a.to_string()).collect())
    }
}

impl CommandSolver {

    pub fn new(program: String, arguments: Vec<String>) -> Self {
        Self { program, arguments }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Returns the arguments of the program, with the placeholders replaced by the files of the
    /// given directory
    fn arguments_for(&self, directory: &Path, with_start: bool) -> Vec<String> {
        let path = |file: &str| directory.join(file).to_string_lossy().into_owned();
        self.arguments.iter()
            .filter(|argument| with_start || !argument.contains("{start}"))
            .map(|argument| {
                argument.replace("{model}", &path(MODEL_FILE))
                    .replace("{solution}", &path(SOLUTION_FILE))
                    .replace("{log}", &path(LOG_FILE))
                    .replace("{start}", &path(START_FILE))
            }).collect()
    }
}

impl ExactSolver for CommandSolver {

    fn name(&self) -> &str {
        &self.program
    }

    fn solve(&self, instance: &Instance, warm_start: Option<&SeedVector>) -> Result<SolverOutcome> {
        let formulation = Formulation::new(instance);
        let directory = tempfile::tempdir()?;
        fs::write(directory.path().join(MODEL_FILE), formulation.model().to_string())?;

        let mut with_start = false;
        if let Some(hint) = warm_start {
            if validate_warm_start(instance, hint)?.is_some() {
                let start = MipStart::from_seeds(&formulation, instance, hint)?;
                fs::write(directory.path().join(START_FILE), start.to_string())?;
                with_start = true;
            }
        }

        let arguments = self.arguments_for(directory.path(), with_start);
        debug!(program = self.program, ?arguments, "running the solver");
        let output = Command::new(&self.program).args(&arguments).output()
            .map_err(|e| Error::Solver(format!("can not run {}: {}", self.program, e)))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::Solver(format!("{} exited with {}: {}", self.program, output.status, stderr.trim())));
        }

        let log_path = directory.path().join(LOG_FILE);
        let statistics = if log_path.exists() {
            match log_from_file(&log_path) {
                Ok(statistics) => statistics,
                Err(e) => {
                    warn!(error = %e, "can not read the solver log");
                    None
                },
            }
        } else {
            None
        };

        let solution_path = directory.path().join(SOLUTION_FILE);
        if !solution_path.exists() {
            return Ok(SolverOutcome::Infeasible { statistics });
        }
        let solution = solution_from_file(&solution_path)?;
        if solution.is_empty() {
            return Ok(SolverOutcome::Infeasible { statistics });
        }
        let seeds: SeedVector = (0..instance.number_nodes())
            .map(|i| solution.value(formulation.model()[formulation.x(NodeIndex(i), 0)].name()).is_some_and(|v| v > 0.5))
            .collect::<Vec<bool>>()
            .into();
        let objective = match solution.objective() {
            Some(objective) => objective,
            None => match instance.cost(&seeds)? {
                Some(cost) => cost as f64,
                None => return Err(Error::Solver(format!("the seeds returned by {} miss the target", self.program))),
            },
        };
        Ok(SolverOutcome::Optimal { seeds, objective, statistics })
    }
}
