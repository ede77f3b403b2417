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

//! This module reads the statistics of a branch-and-bound run from a Gurobi log. The interesting
//! part of the log is the node table, which looks like
//!
//! ```text
//!     Expl Unexpl |  Obj  Depth IntInf | Incumbent    BestBd   Gap | It/Node Time
//!
//!          0     0   12.00000    0   40   20.00000   12.00000  40.0%     -    0s
//!     H    0     0                      14.0000000   12.00000  14.3%     -    0s
//!        211    17   13.00000   12   30   14.00000   13.00000  7.14%  25.1    1s
//! ```
//!
//! The number of rows of the table gives the number of steps. The last row gives the number of
//! explored nodes (first column, possibly preceded by a marker such as H or *) and the time.

use std::io::BufRead;
use std::path::Path;

use super::{open, parse_error};
use crate::error::Result;
use crate::solvers::SolverStatistics;

const TABLE_HEADER: &str = "Expl Unexpl |  Obj  Depth IntInf | Incumbent    BestBd   Gap | It/Node Time";

/// Parses the node table of a Gurobi log. Returns None if the log has no node table (e.g. the model
/// was solved at the root or found infeasible).
pub fn parse_log<R: BufRead>(reader: R) -> Result<Option<SolverStatistics>> {
    let mut lines = reader.lines().enumerate();
    let mut found = false;
    for (_, line) in lines.by_ref() {
        if line?.trim().starts_with(TABLE_HEADER) {
            found = true;
            break;
        }
    }
    if !found {
        return Ok(None);
    }
    let mut steps = 0;
    let mut last: Option<(usize, String)> = None;
    for (index, line) in lines {
        let line = line?;
        if line.trim().is_empty() {
            if steps == 0 {
                continue;
            }
            break;
        }
        steps += 1;
        last = Some((index, line));
    }
    let (index, row) = match last {
        Some(l) => l,
        None => return Ok(None),
    };
    let tokens = row.split_whitespace().collect::<Vec<&str>>();
    let explored_nodes = match tokens.first().and_then(|t| t.parse::<u64>().ok()) {
        Some(e) => e,
        None => tokens.get(1).and_then(|t| t.parse::<u64>().ok())
            .ok_or_else(|| parse_error(index, format!("no explored node count in '{}'", row.trim())))?,
    };
    let time = tokens.last()
        .and_then(|t| t.strip_suffix('s'))
        .and_then(|t| t.parse::<f64>().ok())
        .ok_or_else(|| parse_error(index, format!("no time in '{}'", row.trim())))?;
    Ok(Some(SolverStatistics { time, explored_nodes, steps }))
}

pub fn log_from_file(path: &Path) -> Result<Option<SolverStatistics>> {
    parse_log(open(path)?)
}

#[cfg(test)]
mod test_gurobi_log {
    use super::*;
    use crate::error::Error;
    use std::io::Cursor;

    const LOG: &str = "Optimize a model with 50 rows, 29 columns and 120 nonzeros
Variable types: 1 continuous, 28 integer (28 binary)

    Nodes    |    Current Node    |     Objective Bounds      |     Work
 Expl Unexpl |  Obj  Depth IntInf | Incumbent    BestBd   Gap | It/Node Time

     0     0   12.00000    0   40   20.00000   12.00000  40.0%     -    0s
H    0     0                      14.0000000   12.00000  14.3%     -    0s
   211    17   13.00000   12   30   14.00000   13.00000  7.14%  25.1    3s

Explored 230 nodes (5100 simplex iterations) in 3.20 seconds
";

    #[test]
    pub fn node_table() {
        let stats = parse_log(Cursor::new(LOG)).unwrap().unwrap();
        assert_eq!(3, stats.steps);
        assert_eq!(211, stats.explored_nodes);
        assert_eq!(3.0, stats.time);
    }

    #[test]
    pub fn marker_on_last_row() {
        let log = " Expl Unexpl |  Obj  Depth IntInf | Incumbent    BestBd   Gap | It/Node Time\n\n*   12     0               0   10.00000   10.00000  0.00%  3.1    1s\n";
        let stats = parse_log(Cursor::new(log)).unwrap().unwrap();
        assert_eq!(1, stats.steps);
        assert_eq!(12, stats.explored_nodes);
        assert_eq!(1.0, stats.time);
    }

    #[test]
    pub fn no_table() {
        assert!(parse_log(Cursor::new("Model is infeasible\n")).unwrap().is_none());
        assert!(parse_log(Cursor::new(format!(" {}\n\n", TABLE_HEADER))).unwrap().is_none());
    }

    #[test]
    pub fn malformed_row() {
        let log = format!(" {}\n\n  a b c\n", TABLE_HEADER);
        assert!(matches!(parse_log(Cursor::new(log)), Err(Error::Parse { line: 3, .. })));
    }
}
