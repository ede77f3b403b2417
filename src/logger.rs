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

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::Result;

/// Writes the rows of a CSV file, each row being prefixed by the time at which it was logged.
/// When disabled, nothing is created nor written.
pub struct Logger<const B: bool> {
    global_timestamp: chrono::DateTime<chrono::Local>,
    outfile: Option<BufWriter<File>>,
}

impl<const B: bool> Default for Logger<B> {
    fn default() -> Self {
        Self {
            global_timestamp: chrono::Local::now(),
            outfile: None,
        }
    }
}

impl<const B: bool> Logger<B> {

    /// Creates (or truncates) the file and writes the header
    pub fn new(path: &Path, header: &str) -> Result<Self> {
        let mut logger = Self::default();
        if B {
            let mut out = BufWriter::new(File::create(path)?);
            writeln!(out, "timestamp,elapsed_ms,{}", header)?;
            logger.outfile = Some(out);
        }
        Ok(logger)
    }

    pub fn start(&mut self) {
        if B {
            self.global_timestamp = chrono::Local::now();
        }
    }

    pub fn log(&mut self, row: &str) -> Result<()> {
        if B {
            if let Some(out) = self.outfile.as_mut() {
                let now = chrono::Local::now();
                writeln!(out, "{},{},{}", now.format("%Y%m%d-%H%M%S"), (now - self.global_timestamp).num_milliseconds(), row)?;
            }
        }
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        if let Some(out) = self.outfile.as_mut() {
            out.flush()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test_logger {
    use super::*;

    #[test]
    pub fn rows_are_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stats.csv");
        let mut logger = Logger::<true>::new(&path, "a,b").unwrap();
        logger.start();
        logger.log("1,2").unwrap();
        logger.log("Infeasible").unwrap();
        logger.flush().unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        let lines = content.lines().collect::<Vec<&str>>();
        assert_eq!(3, lines.len());
        assert_eq!("timestamp,elapsed_ms,a,b", lines[0]);
        assert!(lines[1].ends_with(",1,2"));
        assert!(lines[2].ends_with(",Infeasible"));
    }

    #[test]
    pub fn disabled_logger_creates_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stats.csv");
        let mut logger = Logger::<false>::new(&path, "a").unwrap();
        logger.log("1").unwrap();
        assert!(!path.exists());
    }
}
