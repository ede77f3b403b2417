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

//! MIP starts, i.e. (partial) assignments handed to an integer programming solver before it
//! starts its search. They are written in the `.mst` format: one `name value` pair per line, lines
//! starting with `#` being comments.

use std::fmt;

use super::formulation::Formulation;
use crate::common::Instance;
use crate::core::seeds::SeedVector;
use crate::error::Result;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MipStart {
    values: Vec<(String, f64)>,
}

impl MipStart {

    /// Builds a MIP start giving a value to every variable of the model
    pub fn from_assignment(formulation: &Formulation, assignment: &[f64]) -> Self {
        let model = formulation.model();
        let values = model.variables_iter().map(|v| (model[v].name().to_string(), assignment[v.0])).collect();
        Self { values }
    }

    /// Builds the complete MIP start corresponding to the cascade of the seeds
    pub fn from_seeds(formulation: &Formulation, instance: &Instance, seeds: &SeedVector) -> Result<Self> {
        seeds.check_shape(instance.graph())?;
        let assignment = formulation.assignment_from_seeds(instance, seeds)?;
        Ok(Self::from_assignment(formulation, &assignment))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn value(&self, name: &str) -> Option<f64> {
        self.values.iter().find(|(n, _)| n == name).map(|(_, v)| *v)
    }
}

impl fmt::Display for MipStart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# MIP start")?;
        for (name, value) in self.values.iter() {
            writeln!(f, "{} {}", name, value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test_warm_start {
    use super::*;
    use crate::core::graph::Graph;

    #[test]
    pub fn start_from_seeds() {
        let g = Graph::from_edges(3, &[(0, 1), (1, 2)]).unwrap();
        let instance = Instance::new(g, 1, 3).unwrap();
        let formulation = Formulation::new(&instance);
        let start = MipStart::from_seeds(&formulation, &instance, &SeedVector::from_nodes(3, &[1]).unwrap()).unwrap();
        assert_eq!(formulation.model().number_variables(), start.len());
        assert_eq!(Some(1.0), start.value("x_1_0"));
        assert_eq!(Some(0.0), start.value("x_0_0"));
        assert_eq!(Some(1.0), start.value("x_0_1"));
        assert_eq!(Some(1.0), start.value("y_2_1"));
        assert_eq!(Some(0.0), start.value("d"));
        let text = format!("{}", start);
        assert!(text.starts_with("# MIP start\nx_0_0 0\nx_0_1 1\n"));
    }

    #[test]
    pub fn start_with_wrong_shape() {
        let instance = Instance::new(Graph::new(3), 1, 3).unwrap();
        let formulation = Formulation::new(&instance);
        assert!(MipStart::from_seeds(&formulation, &instance, &SeedVector::empty(2)).is_err());
    }
}
