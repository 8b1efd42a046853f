pub mod dynamics;
pub mod solver;

pub use dynamics::PendulumChain;
pub use solver::{display_limit, solve_chain, to_cartesian, SolveError};
