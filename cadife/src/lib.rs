//#![warn(missing_docs)]
#![warn(unused_qualifications)]
#![deny(deprecated)]
#![deny(missing_copy_implementations)]

pub mod analysis;
pub mod error;
pub mod oracle;
pub mod parser;
pub mod result;
pub mod session;
pub mod util;

pub use crate::analysis::atomic_sets::AtomicSetComputation;
pub use crate::error::AnalysisError;
pub use crate::oracle::{CadicalOracle, EnumerationOracle, SatOracle, Solution};
pub use crate::result::AtomicSets;
pub use crate::session::SolverSession;
pub use cadife_cnf::{Assignment, Clause, Cnf, Literal, Variable, VariableMap};
