mod header;

pub use header::Header;

use crate::VariableMap;
use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};

pub type Variable = usize;
pub type Literal = isize;
pub type Clause = Vec<Literal>;

#[derive(Debug, Default, Clone, Eq, PartialEq)]
pub struct Cnf {
    pub num_variables: usize,
    pub clauses: Vec<Clause>,
    /// Names of the variables, if the source provided any.
    pub variable_map: VariableMap,
}

impl Cnf {
    /// Creates a CNF without clauses over the variables `1..=num_variables`.
    pub fn with_variables(num_variables: usize) -> Self {
        Self {
            num_variables,
            ..Default::default()
        }
    }

    /// Creates a new CNF without any solution.
    pub fn unsatisfiable() -> Self {
        Self {
            num_variables: 1,
            clauses: vec![vec![1], vec![-1]],
            ..Default::default()
        }
    }

    /// The header describing this CNF.
    pub fn header(&self) -> Header {
        Header {
            num_variables: self.num_variables,
            num_clauses: self.clauses.len(),
        }
    }

    /// All variables of the universe in ascending order.
    pub fn variables(&self) -> impl Iterator<Item = Variable> {
        1..=self.num_variables
    }

    /// Appends a clause to the end of the clause list.
    pub fn push(&mut self, clause: Clause) {
        self.clauses.push(clause);
    }

    /// Removes the most recently appended clause.
    pub fn pop(&mut self) -> Option<Clause> {
        self.clauses.pop()
    }

    /// Whether every clause is satisfied by the given literals.
    ///
    /// Variables absent from `literals` satisfy nothing.
    pub fn is_satisfied_by(&self, literals: &[Literal]) -> bool {
        self.clauses
            .iter()
            .all(|clause| clause.iter().any(|literal| literals.contains(literal)))
    }
}

impl Display for Cnf {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (variable, name) in self.variable_map.iter() {
            writeln!(f, "c {variable} {name}")?;
        }

        writeln!(f, "{}", self.header())?;

        self.clauses.iter().try_for_each(|clause| {
            clause
                .iter()
                .try_for_each(|literal| write!(f, "{literal} "))?;

            writeln!(f, "0")
        })
    }
}

impl FromIterator<Clause> for Cnf {
    fn from_iter<T: IntoIterator<Item = Clause>>(iter: T) -> Self {
        let clauses: Vec<Clause> = iter.into_iter().collect();
        let num_variables = clauses
            .iter()
            .flat_map(|clause| clause.iter())
            .map(|literal| literal.unsigned_abs())
            .collect::<BTreeSet<Variable>>()
            .last()
            .copied()
            .unwrap_or(0);

        Cnf {
            num_variables,
            clauses,
            ..Default::default()
        }
    }
}

impl From<Vec<Vec<Literal>>> for Cnf {
    fn from(value: Vec<Vec<Literal>>) -> Self {
        value.into_iter().collect()
    }
}
