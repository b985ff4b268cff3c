use crate::{Literal, Variable};
use bimap::BiBTreeMap;

/// Bidirectional mapping between variable indices and their names.
///
/// Only named variables are stored. Unnamed ones are referred to by their index.
#[derive(Debug, Default, Clone, Eq, PartialEq)]
pub struct VariableMap {
    names: BiBTreeMap<Variable, String>,
}

impl VariableMap {
    /// Names a variable, replacing any earlier name of that variable or index of that name.
    pub fn insert(&mut self, variable: Variable, name: impl Into<String>) {
        self.names.insert(variable, name.into());
    }

    pub fn name(&self, variable: Variable) -> Option<&str> {
        self.names.get_by_left(&variable).map(String::as_str)
    }

    pub fn variable(&self, name: &str) -> Option<Variable> {
        self.names.get_by_right(name).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Named variables in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = (Variable, &str)> {
        self.names
            .iter()
            .map(|(variable, name)| (*variable, name.as_str()))
    }

    /// The name of a variable, or its index if it has none.
    pub fn display_variable(&self, variable: Variable) -> String {
        self.name(variable)
            .map(str::to_owned)
            .unwrap_or_else(|| variable.to_string())
    }

    /// Renders a literal by name, prefixing negative literals with `-`.
    pub fn display_literal(&self, literal: Literal) -> String {
        let variable = self.display_variable(literal.unsigned_abs());

        if literal.is_negative() {
            format!("-{variable}")
        } else {
            variable
        }
    }

    /// Resolves a variable given either by index or by name.
    pub fn resolve(&self, token: &str) -> Option<Variable> {
        self.variable(token).or_else(|| token.parse().ok())
    }
}
