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

use std::fmt;

use crate::PEAK_ALLOC;

/// Implements a bunch of statistics that are collected during the seeding
pub struct Statistics<const B: bool> {
    number_simulations: usize,
    number_rounds: usize,
    number_seeds: usize,
    last_infected: usize,
    peak_memory: f32,
    start: chrono::DateTime<chrono::Local>,
    end: Option<chrono::DateTime<chrono::Local>>,
}

impl<const B: bool> Default for Statistics<B> {
    fn default() -> Self {
        Self {
            number_simulations: 0,
            number_rounds: 0,
            number_seeds: 0,
            last_infected: 0,
            peak_memory: 0.0,
            start: chrono::Local::now(),
            end: None,
        }
    }
}

impl<const B: bool> Statistics<B> {
    pub fn start(&mut self) {
        if B {
            self.start = chrono::Local::now();
            self.end = None;
        }
    }

    pub fn simulation(&mut self, rounds: usize, infected: usize) {
        if B {
            self.number_simulations += 1;
            self.number_rounds += rounds;
            self.last_infected = infected;
        }
    }

    pub fn seed(&mut self) {
        if B {
            self.number_seeds += 1;
        }
    }

    pub fn finish(&mut self) {
        if B {
            self.end = Some(chrono::Local::now());
            self.peak_memory = PEAK_ALLOC.peak_usage_as_mb();
        }
    }

    pub fn number_simulations(&self) -> usize {
        self.number_simulations
    }

    pub fn number_rounds(&self) -> usize {
        self.number_rounds
    }

    pub fn number_seeds(&self) -> usize {
        self.number_seeds
    }

    /// Elapsed time, in milliseconds, between `start` and `finish` (or now if not finished)
    pub fn elapsed_ms(&self) -> i64 {
        let end = self.end.unwrap_or_else(chrono::Local::now);
        (end - self.start).num_milliseconds()
    }

    pub fn print(&self) {
        if B {
            println!("{}", self);
        }
    }
}

impl<const B: bool> fmt::Display for Statistics<B> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if B {
            let avg_rounds = if self.number_simulations > 0 {
                self.number_rounds as f64 / self.number_simulations as f64
            } else {
                0.0
            };
            write!(f,
                "seeds {} | simulations {} | avg rounds {:.1} | infected {} | time {} ms | peak memory {:.3} MB",
                self.number_seeds,
                self.number_simulations,
                avg_rounds,
                self.last_infected,
                self.elapsed_ms(),
                self.peak_memory)
        } else {
            write!(f, "")
        }
    }
}
