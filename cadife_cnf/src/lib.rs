mod assignment;
mod cnf;
mod variable_map;

pub use assignment::Assignment;
pub use cnf::{Clause, Cnf, Header, Literal, Variable};
pub use variable_map::VariableMap;
