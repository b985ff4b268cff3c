use crate::oracle::SatOracle;
use crate::result::AtomicSets;
use crate::session::SolverSession;
use crate::AnalysisError;
use bitvec::prelude::*;
use cadife_cnf::{Assignment, Cnf, Literal, Variable};
use log::{debug, trace, warn};
use std::time::Duration;

/// Marks the variables that already belong to some emitted set.
struct ComputedVariables(BitVec);

impl ComputedVariables {
    fn new(num_variables: usize) -> Self {
        Self(bitvec![0; num_variables + 1])
    }

    fn contains(&self, variable: Variable) -> bool {
        self.0.get(variable).is_some_and(|bit| *bit)
    }

    fn mark(&mut self, variables: impl IntoIterator<Item = Variable>) {
        for variable in variables {
            if variable < self.0.len() {
                self.0.set(variable, true);
            }
        }
    }
}

/// Computes the core and the atomic sets of a formula.
///
/// A group of literals forms an atomic set iff in every solution either all of them hold
/// or none of them does. The core, i.e. all core and dead variables, comes first,
/// followed by the atomic sets in the order of the variables of interest.
///
/// Instead of enumerating solutions, we fix each variable `v` in turn and ask the oracle for
/// the core under `+v`. If that core grows by more than `v` itself, other literals depend on `v`,
/// and the core under `-v` tells which of them flip together with `v`.
///
/// ```
/// use cadife::{AtomicSetComputation, Cnf, EnumerationOracle};
///
/// // 1 <-> 2, 3 is free
/// let cnf = Cnf::from(vec![vec![-1, 2], vec![1, -2], vec![3, -3]]);
/// let atomic_sets = AtomicSetComputation::new()
///     .omit_core(true)
///     .compute(&EnumerationOracle::default(), &cnf)
///     .unwrap();
///
/// assert_eq!(atomic_sets.to_vec(), vec![vec![1, 2], vec![3]]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AtomicSetComputation {
    variables_of_interest: Vec<Variable>,
    omit_core: bool,
    omit_single_sets: bool,
    timeout: Duration,
}

impl AtomicSetComputation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts the computation to these variables, in this order.
    /// No variables means all variables of the formula.
    pub fn variables_of_interest(mut self, variables: Vec<Variable>) -> Self {
        self.variables_of_interest = variables;
        self
    }

    /// Whether to leave out the set holding the core and dead variables.
    pub fn omit_core(mut self, omit_core: bool) -> Self {
        self.omit_core = omit_core;
        self
    }

    /// Whether to leave out atomic sets with a single literal.
    /// The core is not affected by this.
    pub fn omit_single_sets(mut self, omit_single_sets: bool) -> Self {
        self.omit_single_sets = omit_single_sets;
        self
    }

    /// The time limit of each oracle query. Zero means none.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Runs the computation.
    ///
    /// The first failing oracle query aborts everything. There are no partial results.
    pub fn compute<O: SatOracle + ?Sized>(
        &self,
        oracle: &O,
        cnf: &Cnf,
    ) -> Result<AtomicSets, AnalysisError> {
        let variables = self.resolve_variables(cnf)?;
        debug!(
            "computing atomic sets for {} of {} variables",
            variables.len(),
            cnf.num_variables
        );

        let mut session = SolverSession::new(cnf.clone(), oracle, self.timeout);
        let mut computed = ComputedVariables::new(cnf.num_variables);
        let mut atomic_sets = Vec::new();

        let core = session.query_core()?;
        computed.mark(core.variables());
        debug!("the core contains {} literals", core.len());

        let core_size = core.len();
        if !self.omit_core {
            atomic_sets.push(core);
        }

        for variable in variables {
            if computed.contains(variable) {
                continue;
            }

            let literal = variable as Literal;
            let positive_core = session.assume(literal).query_core()?;

            if positive_core.len() > core_size + 1 {
                let negative_core = session.assume(-literal).query_core()?;

                let atomic_set: Assignment = positive_core
                    .retain_all_negated(&negative_core)
                    .literals()
                    .iter()
                    .copied()
                    .filter(|literal| !computed.contains(literal.unsigned_abs()))
                    .collect();
                trace!("{variable} is atomic with {atomic_set}");

                computed.mark(atomic_set.variables());
                computed.mark([variable]);

                if atomic_set.is_empty() {
                    warn!("The cores under {literal} and {} share no flipped literal.", -literal);
                }
                if !self.omit_single_sets || atomic_set.len() != 1 {
                    atomic_sets.push(atomic_set);
                }
            } else {
                computed.mark([variable]);

                if !self.omit_single_sets {
                    atomic_sets.push(Assignment::from(vec![literal]));
                }
            }
        }

        debug_assert_eq!(session.depth(), 0);
        Ok(AtomicSets::new(atomic_sets, cnf))
    }

    /// The variables to iterate over, all variables of the formula if none are given.
    fn resolve_variables(&self, cnf: &Cnf) -> Result<Vec<Variable>, AnalysisError> {
        if self.variables_of_interest.is_empty() {
            return Ok(cnf.variables().collect());
        }

        match self
            .variables_of_interest
            .iter()
            .find(|&&variable| variable == 0 || variable > cnf.num_variables)
        {
            Some(&variable) => Err(AnalysisError::unknown_variable(variable)),
            None => Ok(self.variables_of_interest.clone()),
        }
    }
}
