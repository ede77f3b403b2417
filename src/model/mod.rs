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

//! A small representation of (mixed) integer linear programs, sufficient to describe the cascade
//! formulation and hand it to an external solver. All coefficients are integers.
//! The model can be written in the CPLEX LP text format, and any assignment of its variables can
//! be checked against its constraints.

pub mod formulation;
pub mod warm_start;

use std::fmt;
use std::ops::Index;

/// Abstraction used as a typesafe way of retrieving a `Variable` in the `Model` structure
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct VariableIndex(pub usize);

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum VariableKind {
    Binary,
    Continuous,
}

#[derive(Debug, Clone)]
pub struct Variable {
    name: String,
    kind: VariableKind,
    lower_bound: i64,
    upper_bound: i64,
}

impl Variable {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> VariableKind {
        self.kind
    }

    pub fn bounds(&self) -> (i64, i64) {
        (self.lower_bound, self.upper_bound)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Sense {
    LessEqual,
    GreaterEqual,
    Equal,
}

impl Sense {
    fn holds(&self, lhs: f64, rhs: f64) -> bool {
        const EPS: f64 = 1e-6;
        match self {
            Sense::LessEqual => lhs <= rhs + EPS,
            Sense::GreaterEqual => lhs + EPS >= rhs,
            Sense::Equal => (lhs - rhs).abs() <= EPS,
        }
    }
}

impl fmt::Display for Sense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sense::LessEqual => write!(f, "<="),
            Sense::GreaterEqual => write!(f, ">="),
            Sense::Equal => write!(f, "="),
        }
    }
}

/// A linear constraint `sum(coefficient * variable) sense rhs`
#[derive(Debug, Clone)]
pub struct Constraint {
    name: String,
    terms: Vec<(i64, VariableIndex)>,
    sense: Sense,
    rhs: i64,
}

impl Constraint {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn terms(&self) -> &[(i64, VariableIndex)] {
        &self.terms
    }

    pub fn sense(&self) -> Sense {
        self.sense
    }

    pub fn rhs(&self) -> i64 {
        self.rhs
    }
}

/// A minimization problem over integer-bounded variables
#[derive(Debug, Clone, Default)]
pub struct Model {
    name: String,
    variables: Vec<Variable>,
    constraints: Vec<Constraint>,
    objective: Vec<(i64, VariableIndex)>,
}

impl Model {

    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    pub fn add_variable(&mut self, name: String, kind: VariableKind, lower_bound: i64, upper_bound: i64) -> VariableIndex {
        let id = VariableIndex(self.variables.len());
        self.variables.push(Variable { name, kind, lower_bound, upper_bound });
        id
    }

    pub fn add_constraint(&mut self, name: String, terms: Vec<(i64, VariableIndex)>, sense: Sense, rhs: i64) {
        self.constraints.push(Constraint { name, terms, sense, rhs });
    }

    pub fn set_objective(&mut self, terms: Vec<(i64, VariableIndex)>) {
        self.objective = terms;
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn number_variables(&self) -> usize {
        self.variables.len()
    }

    pub fn number_constraints(&self) -> usize {
        self.constraints.len()
    }

    pub fn variables_iter(&self) -> impl Iterator<Item = VariableIndex> {
        (0..self.variables.len()).map(VariableIndex)
    }

    pub fn constraints_iter(&self) -> impl Iterator<Item = &Constraint> {
        self.constraints.iter()
    }

    /// Returns the value of the objective for the given assignment (one value per variable)
    pub fn objective_value(&self, assignment: &[f64]) -> f64 {
        self.objective.iter().map(|(c, v)| *c as f64 * assignment[v.0]).sum()
    }

    /// Returns the names of the constraints (and bounds) violated by the assignment. An empty
    /// vector means that the assignment is feasible.
    pub fn violations(&self, assignment: &[f64]) -> Vec<String> {
        let mut violated = vec![];
        for v in self.variables_iter() {
            let variable = &self[v];
            let value = assignment[v.0];
            if value < variable.lower_bound as f64 - 1e-6 || value > variable.upper_bound as f64 + 1e-6 {
                violated.push(format!("bounds of {}", variable.name));
            }
            if variable.kind == VariableKind::Binary && value != 0.0 && value != 1.0 {
                violated.push(format!("integrality of {}", variable.name));
            }
        }
        for constraint in self.constraints.iter() {
            let lhs: f64 = constraint.terms.iter().map(|(c, v)| *c as f64 * assignment[v.0]).sum();
            if !constraint.sense.holds(lhs, constraint.rhs as f64) {
                violated.push(constraint.name.clone());
            }
        }
        violated
    }

    /// Returns the index of the variable with the given name, if any
    pub fn variable_by_name(&self, name: &str) -> Option<VariableIndex> {
        self.variables.iter().position(|v| v.name == name).map(VariableIndex)
    }

    fn write_terms(&self, f: &mut fmt::Formatter<'_>, terms: &[(i64, VariableIndex)]) -> fmt::Result {
        if terms.is_empty() {
            // LP files do not accept empty expressions
            return write!(f, " 0 {}", self.variables.first().map(|v| v.name.as_str()).unwrap_or("d"));
        }
        for (i, (coefficient, variable)) in terms.iter().enumerate() {
            let sign = if *coefficient < 0 { " -" } else if i > 0 { " +" } else { "" };
            let magnitude = coefficient.unsigned_abs();
            if magnitude == 1 {
                write!(f, "{} {}", sign, self[*variable].name)?;
            } else {
                write!(f, "{} {} {}", sign, magnitude, self[*variable].name)?;
            }
        }
        Ok(())
    }
}

impl Index<VariableIndex> for Model {
    type Output = Variable;

    fn index(&self, index: VariableIndex) -> &Self::Output {
        &self.variables[index.0]
    }
}

/// Writes the model in the CPLEX LP format
impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\\ Problem name: {}", self.name)?;
        writeln!(f, "Minimize")?;
        write!(f, " obj:")?;
        self.write_terms(f, &self.objective)?;
        writeln!(f)?;
        writeln!(f, "Subject To")?;
        for constraint in self.constraints.iter() {
            write!(f, " {}:", constraint.name)?;
            self.write_terms(f, &constraint.terms)?;
            writeln!(f, " {} {}", constraint.sense, constraint.rhs)?;
        }
        writeln!(f, "Bounds")?;
        for variable in self.variables.iter().filter(|v| v.kind == VariableKind::Continuous) {
            writeln!(f, " {} <= {} <= {}", variable.lower_bound, variable.name, variable.upper_bound)?;
        }
        writeln!(f, "Binaries")?;
        for variable in self.variables.iter().filter(|v| v.kind == VariableKind::Binary) {
            writeln!(f, " {}", variable.name)?;
        }
        writeln!(f, "End")
    }
}

#[cfg(test)]
mod test_model {
    use super::*;

    fn knapsack() -> Model {
        let mut model = Model::new("knapsack");
        let a = model.add_variable("a".to_string(), VariableKind::Binary, 0, 1);
        let b = model.add_variable("b".to_string(), VariableKind::Binary, 0, 1);
        let s = model.add_variable("s".to_string(), VariableKind::Continuous, 0, 3);
        model.add_constraint("cover".to_string(), vec![(2, a), (1, b)], Sense::GreaterEqual, 2);
        model.add_constraint("slack".to_string(), vec![(1, s), (-1, b)], Sense::Equal, 0);
        model.set_objective(vec![(3, a), (1, b), (1, s)]);
        model
    }

    #[test]
    pub fn lp_format() {
        let lp = format!("{}", knapsack());
        let expected = "\\ Problem name: knapsack\n\
            Minimize\n obj: 3 a + b + s\n\
            Subject To\n cover: 2 a + b >= 2\n slack: s - b = 0\n\
            Bounds\n 0 <= s <= 3\n\
            Binaries\n a\n b\n\
            End\n";
        assert_eq!(expected, lp);
    }

    #[test]
    pub fn feasibility_and_objective() {
        let model = knapsack();
        assert!(model.violations(&[1.0, 0.0, 0.0]).is_empty());
        assert_eq!(3.0, model.objective_value(&[1.0, 0.0, 0.0]));
        assert_eq!(vec!["cover".to_string()], model.violations(&[0.0, 1.0, 1.0]));
        assert_eq!(vec!["integrality of a".to_string()], model.violations(&[0.5, 1.0, 1.0]));
        assert_eq!(vec!["bounds of s".to_string(), "slack".to_string()], model.violations(&[1.0, 1.0, 4.0]));
    }

    #[test]
    pub fn lookup_by_name() {
        let model = knapsack();
        assert_eq!(Some(VariableIndex(1)), model.variable_by_name("b"));
        assert_eq!(None, model.variable_by_name("c"));
        assert_eq!(3, model.number_variables());
        assert_eq!(2, model.number_constraints());
    }
}
