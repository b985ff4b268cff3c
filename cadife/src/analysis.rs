pub mod atomic_sets;
pub mod core;
pub mod solution;

pub use self::atomic_sets::AtomicSetComputation;
pub use self::core::{compute_core, core_dead_with_assumptions};
pub use self::solution::{get_solution, has_solution};
