pub mod dimacs_lexer;

use crate::AnalysisError;
use cadife_cnf::{Cnf, Header, VariableMap};
use dimacs_lexer::{lex_line, DimacsToken};
use log::{debug, warn};
use nom::Finish;
use std::{fs, mem, path::Path};

/// Reads the DIMACS CNF file at `path`.
///
/// # Examples
///
/// ```no_run
/// use cadife::parser;
/// use std::path::Path;
///
/// let cnf = parser::build_cnf(Path::new("./tests/data/model.dimacs")).unwrap();
/// assert_eq!(cnf.num_variables, 8);
/// ```
pub fn build_cnf(path: &Path) -> Result<Cnf, AnalysisError> {
    let content = fs::read_to_string(path)?;
    debug!("read {} bytes from {}", content.len(), path.display());
    parse_dimacs(&content)
}

/// Parses a formula in DIMACS CNF.
///
/// Variable names are taken from comments of the form `c INDEX NAME`.
pub fn parse_dimacs(input: &str) -> Result<Cnf, AnalysisError> {
    let mut header: Option<Header> = None;
    let mut names = Vec::new();
    let mut clauses = Vec::new();
    let mut clause = Vec::new();

    for (index, line) in input.lines().enumerate() {
        let line_number = index + 1;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let token = match lex_line(line).finish() {
            Ok(("", token)) => token,
            Ok((remaining, _)) => {
                return Err(invalid(line_number, format!("unexpected '{remaining}'")))
            }
            Err(_) => return Err(invalid(line_number, format!("unrecognized line '{line}'"))),
        };

        match token {
            DimacsToken::Comment => (),
            DimacsToken::VariableName { variable, name } => names.push((variable, name)),
            DimacsToken::Problem(problem) => {
                if header.is_some() {
                    return Err(invalid(line_number, "duplicate problem line"));
                }
                header = Some(problem);
            }
            DimacsToken::Literals(literals) => {
                let Some(header) = header else {
                    return Err(invalid(line_number, "clause before the problem line"));
                };

                for literal in literals {
                    if literal == 0 {
                        clauses.push(mem::take(&mut clause));
                    } else if literal.unsigned_abs() > header.num_variables {
                        return Err(invalid(
                            line_number,
                            format!(
                                "literal {literal} exceeds the {} declared variables",
                                header.num_variables
                            ),
                        ));
                    } else {
                        clause.push(literal);
                    }
                }
            }
            DimacsToken::End => break,
        }
    }

    let Some(header) = header else {
        return Err(invalid(input.lines().count(), "missing problem line"));
    };

    if !clause.is_empty() {
        warn!("The last clause is not terminated by 0. We accept it nonetheless.");
        clauses.push(clause);
    }

    if clauses.len() != header.num_clauses {
        warn!(
            "The problem line declares {} clauses, but the formula contains {}.",
            header.num_clauses,
            clauses.len()
        );
    }

    let mut variable_map = VariableMap::default();
    for (variable, name) in names {
        if variable == 0 || variable > header.num_variables {
            warn!("Ignoring the name '{name}' of the undeclared variable {variable}.");
            continue;
        }
        variable_map.insert(variable, name);
    }

    Ok(Cnf {
        num_variables: header.num_variables,
        clauses,
        variable_map,
    })
}

fn invalid(line: usize, reason: impl Into<String>) -> AnalysisError {
    AnalysisError::InvalidDimacs {
        line,
        reason: reason.into(),
    }
}
