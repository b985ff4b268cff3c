use super::{SatOracle, Solution};
use crate::AnalysisError;
use cadife_cnf::{Assignment, Cnf, Literal};
use log::{debug, trace};
use std::ffi::OsString;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;

const SATISFIABLE: &str = "s SATISFIABLE";
const UNSATISFIABLE: &str = "s UNSATISFIABLE";
const UNKNOWN: &str = "c UNKNOWN";

/// Answers queries by running the cadical solver and the cadiback backbone extractor
/// as external processes on a temporary DIMACS file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CadicalOracle {
    solver: PathBuf,
    backbone: PathBuf,
}

impl Default for CadicalOracle {
    /// Looks up `cadical` and `cadiback` on the PATH.
    fn default() -> Self {
        Self::new("cadical", "cadiback")
    }
}

impl CadicalOracle {
    pub fn new(solver: impl Into<PathBuf>, backbone: impl Into<PathBuf>) -> Self {
        Self {
            solver: solver.into(),
            backbone: backbone.into(),
        }
    }

    /// Writes `cnf` to a temporary file, appends its path to `args` and returns the lines
    /// `binary` printed to stdout.
    fn run(
        &self,
        binary: &Path,
        mut args: Vec<OsString>,
        cnf: &Cnf,
    ) -> Result<Vec<String>, AnalysisError> {
        let mut input = tempfile::Builder::new()
            .prefix("cadifeInput")
            .suffix(".dimacs")
            .tempfile()?;
        write!(input, "{cnf}")?;
        input.flush()?;
        args.push(input.path().as_os_str().to_owned());

        debug!(
            "running {} on {} variables and {} clauses",
            binary.display(),
            cnf.num_variables,
            cnf.clauses.len()
        );

        let output = Command::new(binary).args(&args).output().map_err(|error| {
            AnalysisError::OracleUnavailable(format!("{}: {error}", binary.display()))
        })?;

        let lines: Vec<String> = String::from_utf8_lossy(&output.stdout)
            .lines()
            .map(str::to_owned)
            .collect();
        trace!(
            "{} exited with {}:\n{}",
            binary.display(),
            output.status,
            lines.join("\n")
        );

        if lines.is_empty() && !output.stderr.is_empty() {
            return Err(AnalysisError::OracleUnavailable(format!(
                "{}: {}",
                binary.display(),
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        Ok(lines)
    }
}

impl SatOracle for CadicalOracle {
    fn solve(&self, cnf: &Cnf, timeout: Duration) -> Result<Solution, AnalysisError> {
        parse_solution(&self.run(&self.solver, solver_args(timeout), cnf)?)
    }

    fn extract_core(&self, cnf: &Cnf, timeout: Duration) -> Result<Assignment, AnalysisError> {
        // cadiback has no time limit option
        if !timeout.is_zero() {
            debug!("ignoring the timeout of {timeout:?} for the core extraction");
        }

        parse_core(&self.run(&self.backbone, vec!["-q".into()], cnf)?)
    }
}

/// The cadical arguments for `timeout`, which is rounded down to whole seconds but at least one.
/// A zero timeout omits the time limit.
fn solver_args(timeout: Duration) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec!["--sat".into(), "-q".into()];
    if !timeout.is_zero() {
        args.push("-t".into());
        args.push(timeout.as_secs().max(1).to_string().into());
    }
    args
}

/// Parses the output of `cadical --sat -q`: a status line,
/// followed by `v` lines holding the solution if there is one.
pub(crate) fn parse_solution(lines: &[String]) -> Result<Solution, AnalysisError> {
    let Some(status) = lines.first() else {
        return Err(AnalysisError::malformed("no output from solver", lines));
    };

    match status.as_str() {
        SATISFIABLE => {
            if lines.len() < 2 {
                return Err(AnalysisError::malformed(
                    "solver did not provide a solution",
                    lines,
                ));
            }

            let literals = lines
                .iter()
                .skip(1)
                .flat_map(|line| line.split_whitespace().skip(1))
                .map(|token| {
                    token.parse::<Literal>().map_err(|_| {
                        AnalysisError::malformed(format!("'{token}' is not a literal"), lines)
                    })
                })
                .filter(|literal| !matches!(literal, Ok(0)))
                .collect::<Result<Vec<Literal>, AnalysisError>>()?;

            Ok(Solution::Satisfiable(literals.into()))
        }
        UNSATISFIABLE => Ok(Solution::Unsatisfiable),
        UNKNOWN => Ok(Solution::Indeterminate),
        _ => Err(AnalysisError::malformed("unknown status line", lines)),
    }
}

/// Parses the output of `cadiback -q`: one `b LITERAL` line per core literal,
/// followed by the two trailer lines `b 0` and the status line.
pub(crate) fn parse_core(lines: &[String]) -> Result<Assignment, AnalysisError> {
    if lines.is_empty() {
        return Err(AnalysisError::malformed("no output from solver", lines));
    }
    if lines.iter().any(|line| line == UNSATISFIABLE) {
        return Err(AnalysisError::Unsatisfiable);
    }
    if lines.iter().any(|line| line == UNKNOWN) {
        return Err(AnalysisError::Indeterminate);
    }
    let [literals @ .., terminator, status] = lines else {
        return Err(AnalysisError::malformed("missing trailer lines", lines));
    };
    if terminator.trim() != "b 0" || !status.starts_with("s ") {
        return Err(AnalysisError::malformed(
            "core is not terminated by 'b 0' and a status line",
            lines,
        ));
    }

    literals
        .iter()
        .map(|line| {
            line.strip_prefix("b ")
                .and_then(|literal| literal.trim().parse::<Literal>().ok())
                .filter(|&literal| literal != 0)
                .ok_or_else(|| {
                    AnalysisError::malformed(format!("'{line}' is not a core literal"), lines)
                })
        })
        .collect()
}
