use super::{SatOracle, Solution};
use crate::AnalysisError;
use cadife_cnf::{Assignment, Cnf, Literal};
use log::debug;
use std::time::{Duration, Instant};

/// How many candidate assignments we check between two looks at the clock.
const TIMEOUT_CHECK_INTERVAL: u64 = 1 << 10;

/// An in-process oracle that enumerates every assignment of the formula's variables.
///
/// Only suitable for small formulas, but exact and free of external dependencies.
/// Formulas with more than `max_variables` variables are refused.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct EnumerationOracle {
    max_variables: usize,
}

impl Default for EnumerationOracle {
    fn default() -> Self {
        Self { max_variables: 24 }
    }
}

enum Search {
    Finished,
    TimedOut,
}

impl EnumerationOracle {
    pub fn new(max_variables: usize) -> Self {
        Self {
            max_variables: max_variables.min(63),
        }
    }

    /// Calls `on_solution` with each solution of `cnf`, as a bit mask over the variables,
    /// until it returns `false`, all assignments are checked or the timeout elapses.
    fn for_each_solution(
        &self,
        cnf: &Cnf,
        timeout: Duration,
        mut on_solution: impl FnMut(u64) -> bool,
    ) -> Result<Search, AnalysisError> {
        if cnf.num_variables > self.max_variables {
            return Err(AnalysisError::OracleUnavailable(format!(
                "enumeration is limited to {} variables, the formula has {}",
                self.max_variables, cnf.num_variables
            )));
        }

        let start = Instant::now();
        for mask in 0..1_u64 << cnf.num_variables {
            if !timeout.is_zero()
                && mask % TIMEOUT_CHECK_INTERVAL == 0
                && start.elapsed() > timeout
            {
                debug!("enumeration timed out after {mask} assignments");
                return Ok(Search::TimedOut);
            }

            if satisfies(cnf, mask) && !on_solution(mask) {
                break;
            }
        }

        Ok(Search::Finished)
    }
}

impl SatOracle for EnumerationOracle {
    fn solve(&self, cnf: &Cnf, timeout: Duration) -> Result<Solution, AnalysisError> {
        let mut found = None;
        let search = self.for_each_solution(cnf, timeout, |mask| {
            found = Some(mask);
            false
        })?;

        Ok(match (found, search) {
            (Some(mask), _) => Solution::Satisfiable(to_literals(cnf, mask).into()),
            (None, Search::TimedOut) => Solution::Indeterminate,
            (None, Search::Finished) => Solution::Unsatisfiable,
        })
    }

    fn extract_core(&self, cnf: &Cnf, timeout: Duration) -> Result<Assignment, AnalysisError> {
        let mut core: Option<Vec<Literal>> = None;
        let search = self.for_each_solution(cnf, timeout, |mask| {
            let solution = to_literals(cnf, mask);
            match core {
                Some(ref mut common) => common.retain(|literal| solution.contains(literal)),
                None => core = Some(solution),
            }
            // once the core is empty, further solutions can not change it
            core.as_ref().is_some_and(|core| !core.is_empty())
        })?;

        match (core, search) {
            (Some(core), _) if core.is_empty() => Ok(Assignment::default()),
            (_, Search::TimedOut) => Err(AnalysisError::Indeterminate),
            (Some(core), Search::Finished) => Ok(core.into()),
            (None, Search::Finished) => Err(AnalysisError::Unsatisfiable),
        }
    }
}

fn value(mask: u64, literal: Literal) -> bool {
    let bit = mask >> (literal.unsigned_abs() - 1) & 1 == 1;
    bit == literal.is_positive()
}

fn satisfies(cnf: &Cnf, mask: u64) -> bool {
    cnf.clauses
        .iter()
        .all(|clause| clause.iter().any(|&literal| value(mask, literal)))
}

fn to_literals(cnf: &Cnf, mask: u64) -> Vec<Literal> {
    cnf.variables()
        .map(|variable| {
            let literal = variable as Literal;
            if value(mask, literal) {
                literal
            } else {
                -literal
            }
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn solves_small_formulas() {
        let oracle = EnumerationOracle::default();

        let cnf = Cnf::from(vec![vec![1, 2], vec![-1], vec![-2, 3]]);
        match oracle.solve(&cnf, Duration::ZERO).unwrap() {
            Solution::Satisfiable(solution) => {
                assert!(cnf.is_satisfied_by(solution.literals()))
            }
            other => panic!("unexpected {other:?}"),
        }

        assert_eq!(
            oracle.solve(&Cnf::unsatisfiable(), Duration::ZERO).unwrap(),
            Solution::Unsatisfiable
        );
    }

    #[test]
    fn core_is_the_backbone() {
        let oracle = EnumerationOracle::default();

        // 1 is forced, 2 is dead, 3 and 4 are free
        let cnf = Cnf::from(vec![vec![1], vec![-2, -1], vec![3, 4, -1]]);
        assert_eq!(
            oracle.extract_core(&cnf, Duration::ZERO).unwrap(),
            Assignment::from(vec![1, -2])
        );

        assert!(oracle
            .extract_core(&Cnf::with_variables(3), Duration::ZERO)
            .unwrap()
            .is_empty());
        assert!(oracle
            .extract_core(&Cnf::with_variables(0), Duration::ZERO)
            .unwrap()
            .is_empty());
        assert!(matches!(
            oracle.extract_core(&Cnf::unsatisfiable(), Duration::ZERO),
            Err(AnalysisError::Unsatisfiable)
        ));
    }

    #[test]
    fn refuses_large_formulas() {
        let oracle = EnumerationOracle::new(2);

        assert!(matches!(
            oracle.extract_core(&Cnf::with_variables(3), Duration::ZERO),
            Err(AnalysisError::OracleUnavailable(_))
        ));
    }
}
