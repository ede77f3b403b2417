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

//! This module reads solution files (`.sol`) written by integer programming solvers. Such a file
//! looks like
//!
//! # Solution for model SocialNetworkCascade
//! # Objective value = 7
//! x_0_0 0
//! x_0_1 1
//! ...
//!
//! A file without any variable value means that no solution has been found.

use rustc_hash::FxHashMap;
use std::io::BufRead;
use std::path::Path;

use super::{open, parse_error};
use crate::error::Result;

#[derive(Debug, Clone, Default)]
pub struct SolutionFile {
    /// Objective value, if reported in the file
    objective: Option<f64>,
    /// Values of the variables, by name
    values: FxHashMap<String, f64>,
}

impl SolutionFile {

    pub fn objective(&self) -> Option<f64> {
        self.objective
    }

    pub fn value(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut solution = Self::default();
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if let Some(comment) = line.strip_prefix('#') {
                if let Some((_, value)) = comment.split_once("Objective value =") {
                    let objective = value.trim().parse::<f64>().map_err(|_| parse_error(index, format!("invalid objective '{}'", value.trim())))?;
                    solution.objective = Some(objective);
                }
                continue;
            }
            let tokens = line.split_whitespace().collect::<Vec<&str>>();
            if tokens.len() != 2 {
                return Err(parse_error(index, format!("expected 'name value', got '{}'", line)));
            }
            let value = tokens[1].parse::<f64>().map_err(|_| parse_error(index, format!("invalid value '{}'", tokens[1])))?;
            solution.values.insert(tokens[0].to_string(), value);
        }
        Ok(solution)
    }
}

pub fn solution_from_file(path: &Path) -> Result<SolutionFile> {
    SolutionFile::from_reader(open(path)?)
}
