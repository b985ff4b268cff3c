//! The SAT oracle every analysis is built upon.
//!
//! An oracle answers two kinds of questions about a clause list: whether it has a solution,
//! and which literals hold in all of its solutions (the core, also known as backbone).
//! Every call is a fresh problem instance. Oracles keep no state between calls.

mod cadical;
mod enumeration;

pub use cadical::CadicalOracle;
pub use enumeration::EnumerationOracle;

use crate::AnalysisError;
use cadife_cnf::{Assignment, Cnf};
use std::time::Duration;

/// The outcome of a satisfiability query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Solution {
    Satisfiable(Assignment),
    Unsatisfiable,
    /// The oracle hit its timeout before deciding.
    Indeterminate,
}

pub trait SatOracle {
    /// Decides whether `cnf` has a solution and returns one if so.
    ///
    /// A zero `timeout` means no timeout.
    fn solve(&self, cnf: &Cnf, timeout: Duration) -> Result<Solution, AnalysisError>;

    /// Computes the literals that hold in every solution of `cnf`.
    ///
    /// Fails with [AnalysisError::Unsatisfiable] if there is no solution at all
    /// and with [AnalysisError::Indeterminate] if the oracle gave up.
    /// Oracles may ignore the `timeout`.
    fn extract_core(&self, cnf: &Cnf, timeout: Duration) -> Result<Assignment, AnalysisError>;
}

impl<O: SatOracle + ?Sized> SatOracle for Box<O> {
    fn solve(&self, cnf: &Cnf, timeout: Duration) -> Result<Solution, AnalysisError> {
        (**self).solve(cnf, timeout)
    }

    fn extract_core(&self, cnf: &Cnf, timeout: Duration) -> Result<Assignment, AnalysisError> {
        (**self).extract_core(cnf, timeout)
    }
}
