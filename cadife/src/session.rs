use crate::oracle::{SatOracle, Solution};
use crate::AnalysisError;
use cadife_cnf::{Assignment, Clause, Cnf, Literal};
use log::trace;
use std::ops::Deref;
use std::time::Duration;

/// A clause list that can be temporarily extended by unit assumptions,
/// together with the oracle answering queries about it.
///
/// The clauses the session was created with can never be retracted.
/// Prefer [SolverSession::assume] over pairing [SolverSession::append] and
/// [SolverSession::retract] by hand: the returned guard retracts on every exit path.
pub struct SolverSession<'o, O: SatOracle + ?Sized> {
    cnf: Cnf,
    base_clauses: usize,
    oracle: &'o O,
    timeout: Duration,
}

impl<'o, O: SatOracle + ?Sized> SolverSession<'o, O> {
    pub fn new(cnf: Cnf, oracle: &'o O, timeout: Duration) -> Self {
        Self {
            base_clauses: cnf.clauses.len(),
            cnf,
            oracle,
            timeout,
        }
    }

    /// The current clause list, including all appended assumptions.
    pub fn cnf(&self) -> &Cnf {
        &self.cnf
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// The number of assumptions currently appended.
    pub fn depth(&self) -> usize {
        self.cnf.clauses.len() - self.base_clauses
    }

    /// Adds the unit clause `assumption` to the end of the clause list.
    pub fn append(&mut self, assumption: Literal) {
        trace!("assuming {assumption} at depth {}", self.depth());
        self.cnf.push(vec![assumption]);
    }

    /// Removes the most recently appended clause.
    pub fn retract(&mut self) -> Result<Clause, AnalysisError> {
        if self.depth() == 0 {
            return Err(AnalysisError::Underflow);
        }
        self.cnf.pop().ok_or(AnalysisError::Underflow)
    }

    /// Appends all `assumptions`, which stay in place until the returned guard is dropped.
    pub fn assume_all(&mut self, assumptions: &[Literal]) -> Assumption<'_, 'o, O> {
        for &assumption in assumptions {
            self.append(assumption);
        }

        Assumption {
            session: self,
            count: assumptions.len(),
        }
    }

    /// Appends `assumption`, which stays in place until the returned guard is dropped.
    ///
    /// ```
    /// use cadife::{Cnf, EnumerationOracle, SolverSession};
    /// use std::time::Duration;
    ///
    /// let oracle = EnumerationOracle::default();
    /// let mut session = SolverSession::new(Cnf::from(vec![vec![-1, 2]]), &oracle, Duration::ZERO);
    ///
    /// let core = session.assume(1).query_core().unwrap();
    /// assert_eq!(core.literals(), &[1, 2]);
    /// assert_eq!(session.depth(), 0);
    /// ```
    pub fn assume(&mut self, assumption: Literal) -> Assumption<'_, 'o, O> {
        self.assume_all(&[assumption])
    }

    /// The core of the current clause list.
    pub fn query_core(&self) -> Result<Assignment, AnalysisError> {
        self.oracle.extract_core(&self.cnf, self.timeout)
    }

    pub fn solve(&self) -> Result<Solution, AnalysisError> {
        self.oracle.solve(&self.cnf, self.timeout)
    }

    pub fn into_cnf(self) -> Cnf {
        self.cnf
    }
}

/// Keeps assumptions appended to a [SolverSession] and retracts them when dropped.
pub struct Assumption<'s, 'o, O: SatOracle + ?Sized> {
    session: &'s mut SolverSession<'o, O>,
    count: usize,
}

impl<'o, O: SatOracle + ?Sized> Deref for Assumption<'_, 'o, O> {
    type Target = SolverSession<'o, O>;

    fn deref(&self) -> &Self::Target {
        self.session
    }
}

impl<O: SatOracle + ?Sized> Drop for Assumption<'_, '_, O> {
    fn drop(&mut self) {
        for _ in 0..self.count {
            let retracted = self.session.retract();
            debug_assert!(retracted.is_ok(), "assumption was already retracted");
        }
    }
}
