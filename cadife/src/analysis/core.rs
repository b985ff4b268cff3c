use crate::oracle::SatOracle;
use crate::session::SolverSession;
use crate::AnalysisError;
use cadife_cnf::{Assignment, Cnf, Literal};
use log::debug;
use std::time::Duration;

/// Computes all core and dead variables.
///
/// A variable is core iff it is true in every solution, and dead iff it is false in every solution.
/// Core variables occur positively in the result, dead ones negatively.
pub fn compute_core<O: SatOracle + ?Sized>(
    oracle: &O,
    cnf: &Cnf,
    timeout: Duration,
) -> Result<Assignment, AnalysisError> {
    core_dead_with_assumptions(oracle, cnf, &[], timeout)
}

/// Calculates the core and dead variables of all solutions that satisfy the `assumptions`.
///
/// The assumptions themselves are part of the result.
pub fn core_dead_with_assumptions<O: SatOracle + ?Sized>(
    oracle: &O,
    cnf: &Cnf,
    assumptions: &[Literal],
    timeout: Duration,
) -> Result<Assignment, AnalysisError> {
    debug!(
        "computing the core of {} variables and {} clauses under {} assumptions",
        cnf.num_variables,
        cnf.clauses.len(),
        assumptions.len()
    );

    for &assumption in assumptions {
        if assumption == 0 || assumption.unsigned_abs() > cnf.num_variables {
            return Err(AnalysisError::UnknownVariable(assumption.to_string()));
        }
    }

    let mut session = SolverSession::new(cnf.clone(), oracle, timeout);
    let core = session.assume_all(assumptions).query_core()?;

    debug!(
        "found {} core and {} dead variables",
        core.positive().len(),
        core.negative().len()
    );
    Ok(core)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::EnumerationOracle;

    fn model() -> Cnf {
        // 1 is core, 2 is dead, 3 implies 4
        Cnf::from(vec![vec![1], vec![-2], vec![-3, 4]])
    }

    #[test]
    fn core_and_dead() {
        let core = compute_core(&EnumerationOracle::default(), &model(), Duration::ZERO).unwrap();

        assert_eq!(core.positive(), Assignment::from(vec![1]));
        assert_eq!(core.negative(), Assignment::from(vec![-2]));
    }

    #[test]
    fn core_under_assumptions() {
        let oracle = EnumerationOracle::default();

        assert_eq!(
            core_dead_with_assumptions(&oracle, &model(), &[3], Duration::ZERO).unwrap(),
            Assignment::from(vec![1, -2, 3, 4])
        );
        assert_eq!(
            core_dead_with_assumptions(&oracle, &model(), &[-4], Duration::ZERO).unwrap(),
            Assignment::from(vec![1, -2, -3, -4])
        );
        assert!(matches!(
            core_dead_with_assumptions(&oracle, &model(), &[-1], Duration::ZERO),
            Err(AnalysisError::Unsatisfiable)
        ));
        assert!(matches!(
            core_dead_with_assumptions(&oracle, &model(), &[5], Duration::ZERO),
            Err(AnalysisError::UnknownVariable(_))
        ));
    }
}
