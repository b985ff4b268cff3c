use crate::{Assignment, Literal, VariableMap};

pub fn format_vec_separated_by<T: ToString>(
    vals: impl Iterator<Item = T>,
    separator: &str,
) -> String {
    vals.map(|v| v.to_string())
        .collect::<Vec<String>>()
        .join(separator)
}

pub fn format_vec<T: ToString>(vals: impl Iterator<Item = T>) -> String {
    format_vec_separated_by(vals, " ")
}

/// Renders the literals of an assignment by variable name, separated by whitespace.
pub fn format_assignment(assignment: &Assignment, variable_map: &VariableMap) -> String {
    format_literals(assignment.literals(), variable_map)
}

pub fn format_literals(literals: &[Literal], variable_map: &VariableMap) -> String {
    format_vec(
        literals
            .iter()
            .map(|&literal| variable_map.display_literal(literal)),
    )
}
