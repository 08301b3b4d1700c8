//! Solves benchmarks of growing size until one times out.

use tracing::info;

use crate::{
    error::Result,
    generator::ClauseSetCache,
    solver::{SolveResult, Solver, SolverConfig},
    types::Problem,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LadderEnd {
    /// The benchmark with this many variables timed out.
    TimedOut(usize),
    /// Every benchmark up to the ceiling was decided in time.
    Ceiling,
}

/// Runs the benchmarks `start..=ceiling` in order, handing every result to
/// `on_result`, and stops at the first timeout.
pub fn run_ladder(
    cache: &mut ClauseSetCache,
    start: usize,
    ceiling: usize,
    config: SolverConfig,
    mut on_result: impl FnMut(usize, &SolveResult),
) -> Result<LadderEnd> {
    for var_count in start..=ceiling {
        let clauses = cache.get(var_count)?.to_vec();
        let result = Solver::with_config(Problem::from_clauses(clauses), config)?.solve();
        info!(
            var_count,
            satisfiable = result.satisfiable,
            timed_out = result.timed_out,
            elapsed_ms = result.elapsed.as_millis() as u64,
            "benchmark solved"
        );
        on_result(var_count, &result);

        if result.timed_out {
            return Ok(LadderEnd::TimedOut(var_count));
        }
    }

    Ok(LadderEnd::Ceiling)
}
