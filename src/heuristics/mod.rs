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

use crate::core::graph::{Graph, NodeIndex};
use crate::core::seeds::SeedVector;

/// Trait that defines the methods that a seed selection structure must implement.
pub trait SeedSelection {
    /// Initialize, if necessary, the data structures used by the selection heuristic
    fn init(&mut self, g: &Graph);

    /// Chooses the next node to add to the seed set. Returns None when every node has already
    /// been proposed.
    fn next_seed(&mut self, g: &Graph, seeds: &SeedVector) -> Option<NodeIndex>;
}

pub mod popularity;
