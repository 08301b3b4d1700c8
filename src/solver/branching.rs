use std::cmp::Reverse;

use crate::types::{to_var, Clause, Var};

/// Picks the variable occurring most often among the shortest clauses,
/// preferring the lowest id on ties.
///
/// Returns `None` if there is nothing to branch on.
pub fn select_variable(clauses: &[Clause], var_count: usize) -> Option<Var> {
    let shortest = clauses.iter().map(Vec::len).min()?;

    let mut tally: Vec<usize> = vec![0; var_count + 1];
    for &lit in clauses
        .iter()
        .filter(|clause| clause.len() == shortest)
        .flatten()
    {
        tally[to_var(lit)] += 1;
    }

    tally
        .iter()
        .enumerate()
        .skip(1)
        .filter(|(_, &count)| count > 0)
        .max_by_key(|&(var, &count)| (count, Reverse(var)))
        .map(|(var, _)| var)
}
