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

//! Readers and writers for the files exchanged with the outside world: friendship graphs given as
//! edge lists, solution files and logs written by the external integer programming solver.

pub mod edgelist;
pub mod gurobi_log;
pub mod solution;

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::{Error, Result};

/// Opens a file for buffered reading
pub(crate) fn open(path: &Path) -> Result<BufReader<File>> {
    let file = File::open(path)?;
    Ok(BufReader::new(file))
}

/// Builds a parse error for the given (zero-based) line index
pub(crate) fn parse_error(index: usize, reason: String) -> Error {
    Error::Parse { line: index + 1, reason }
}

pub use edgelist::{graph_from_file, graph_from_reader, write_graph, write_graph_file};
pub use gurobi_log::{log_from_file, parse_log};
pub use solution::{solution_from_file, SolutionFile};
