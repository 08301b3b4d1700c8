//! Satisfiability of CNF formulas by unit propagation and case splitting,
//! bounded by a wall-clock deadline.

pub mod catalog;
pub mod error;
pub mod generator;
pub mod io;
pub mod ladder;
pub mod solver;
pub mod types;

pub use error::{Error, Result};
pub use solver::{DeadlinePolicy, Outcome, SolveResult, Solver, SolverConfig};
pub use types::{Clause, Lit, Problem, Var};
