use crate::Variable;
use std::io;
use thiserror::Error;

/// Everything that can go wrong while loading a formula or querying the oracle.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The oracle could not be invoked at all.
    #[error("the SAT oracle could not be invoked: {0}")]
    OracleUnavailable(String),
    /// The oracle answered with output matching no known result grammar.
    #[error("could not parse the oracle output ({reason}):\n{output}")]
    MalformedOracleOutput { reason: String, output: String },
    /// The oracle ran, but could not decide within its time budget.
    #[error("the oracle could not decide the formula within the timeout")]
    Indeterminate,
    /// The formula has no solution, hence no core.
    #[error("the formula is unsatisfiable")]
    Unsatisfiable,
    /// A retraction without a matching append.
    #[error("retracted more clauses than were appended")]
    Underflow,
    /// A variable that is not part of the formula's universe.
    #[error("the variable {0} is not part of the formula")]
    UnknownVariable(String),
    /// The DIMACS input could not be parsed.
    #[error("invalid DIMACS in line {line}: {reason}")]
    InvalidDimacs { line: usize, reason: String },
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl AnalysisError {
    pub(crate) fn malformed(reason: impl Into<String>, lines: &[String]) -> Self {
        AnalysisError::MalformedOracleOutput {
            reason: reason.into(),
            output: lines.join("\n"),
        }
    }

    pub(crate) fn unknown_variable(variable: Variable) -> Self {
        AnalysisError::UnknownVariable(variable.to_string())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn messages_and_sources() {
        assert_eq!(
            AnalysisError::unknown_variable(9).to_string(),
            "the variable 9 is not part of the formula"
        );
        assert_eq!(
            AnalysisError::malformed("no status", &[String::from("b 1")]).to_string(),
            "could not parse the oracle output (no status):\nb 1"
        );

        let error = AnalysisError::from(io::Error::new(io::ErrorKind::NotFound, "gone"));
        assert_eq!(error.to_string(), "gone");
        assert!(AnalysisError::Underflow.source().is_none());
    }
}
