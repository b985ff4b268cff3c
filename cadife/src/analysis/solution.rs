use crate::oracle::{SatOracle, Solution};
use crate::AnalysisError;
use cadife_cnf::{Assignment, Cnf};
use log::debug;
use std::time::Duration;

/// Checks whether the formula has any solution.
///
/// An undecided query is an error, not a negative answer.
pub fn has_solution<O: SatOracle + ?Sized>(
    oracle: &O,
    cnf: &Cnf,
    timeout: Duration,
) -> Result<bool, AnalysisError> {
    get_solution(oracle, cnf, timeout).map(|solution| solution.is_some())
}

/// Computes one solution of the formula, `None` if there is none.
pub fn get_solution<O: SatOracle + ?Sized>(
    oracle: &O,
    cnf: &Cnf,
    timeout: Duration,
) -> Result<Option<Assignment>, AnalysisError> {
    debug!("solving with a timeout of {timeout:?}");

    match oracle.solve(cnf, timeout)? {
        Solution::Satisfiable(solution) => Ok(Some(solution)),
        Solution::Unsatisfiable => Ok(None),
        Solution::Indeterminate => Err(AnalysisError::Indeterminate),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::EnumerationOracle;

    #[test]
    fn solution_satisfies_formula() {
        let oracle = EnumerationOracle::default();
        let cnf = Cnf::from(vec![vec![1, 2], vec![-1, -2], vec![2, 3], vec![-3]]);

        let solution = get_solution(&oracle, &cnf, Duration::ZERO).unwrap().unwrap();
        assert!(cnf.is_satisfied_by(solution.literals()));
        assert!(has_solution(&oracle, &cnf, Duration::ZERO).unwrap());
    }

    #[test]
    fn contradiction_has_no_solution() {
        let oracle = EnumerationOracle::default();

        assert_eq!(get_solution(&oracle, &Cnf::unsatisfiable(), Duration::ZERO).unwrap(), None);
        assert!(!has_solution(&oracle, &Cnf::unsatisfiable(), Duration::ZERO).unwrap());
    }
}
