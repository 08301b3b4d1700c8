//! Worst-case benchmark formulas.
//!
//! For `n` variables the benchmark holds one clause per row of the truth
//! table, each ruling that row out, so the full set is unsatisfiable and
//! every proper subset is satisfiable.

use std::collections::HashMap;

use tracing::debug;

use crate::{
    error::{Error, Result},
    types::{Clause, Lit},
};

pub const MIN_VARIABLES: usize = 1;

/// Largest supported benchmark (`2^24` clauses of 24 literals each).
pub const MAX_VARIABLES: usize = 24;

/// Clause `i` has literal `-(j + 1)` where bit `j` of `i` is set and
/// `j + 1` elsewhere, so clause 0 is all-positive and the last one
/// all-negative.
pub fn generate_clause_set(var_count: usize) -> Result<Vec<Clause>> {
    if !(MIN_VARIABLES..=MAX_VARIABLES).contains(&var_count) {
        return Err(Error::BenchmarkSize {
            requested: var_count,
            min: MIN_VARIABLES,
            max: MAX_VARIABLES,
        });
    }

    let clauses: Vec<Clause> = (0..1usize << var_count)
        .map(|row| {
            (0..var_count)
                .map(|j| {
                    let lit = (j + 1) as Lit;
                    if row >> j & 1 == 1 {
                        -lit
                    } else {
                        lit
                    }
                })
                .collect()
        })
        .collect();

    Ok(clauses)
}

/// Memoizes generated benchmarks by variable count.
#[derive(Default)]
pub struct ClauseSetCache {
    sets: HashMap<usize, Vec<Clause>>,
}

impl ClauseSetCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&mut self, var_count: usize) -> Result<&[Clause]> {
        if !self.sets.contains_key(&var_count) {
            let clauses = generate_clause_set(var_count)?;
            debug!(var_count, clauses = clauses.len(), "benchmark generated");
            self.sets.insert(var_count, clauses);
        }
        Ok(&self.sets[&var_count])
    }

    /// Generates every benchmark from 1 up to `ceiling` variables.
    pub fn preload(&mut self, ceiling: usize) -> Result<()> {
        for var_count in 1..=ceiling {
            self.get(var_count)?;
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}
