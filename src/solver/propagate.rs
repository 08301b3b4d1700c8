use crate::types::{Clause, Lit};

use super::assignment::Assignment;

/// Marker for a clause set that contains (or was reduced to) an empty clause.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Conflict;

/// Derives the clause set under `lit` being true: clauses containing `lit`
/// are dropped, occurrences of `-lit` are stripped from the rest.
///
/// Returns `Err(Conflict)` as soon as a clause loses its last literal.
pub fn reduce(clauses: &[Clause], lit: Lit) -> Result<Vec<Clause>, Conflict> {
    let mut reduced = Vec::with_capacity(clauses.len());

    for clause in clauses {
        if clause.contains(&lit) {
            continue;
        }

        let rest: Clause = clause.iter().copied().filter(|&l| l != -lit).collect();
        if rest.is_empty() {
            return Err(Conflict);
        }
        reduced.push(rest);
    }

    Ok(reduced)
}

/// Unit propagation to fixpoint.
///
/// Every forced literal is recorded in `assignment`. Unit clauses are taken
/// in the order they occur.
pub fn propagate(mut clauses: Vec<Clause>, assignment: &mut Assignment) -> Result<Vec<Clause>, Conflict> {
    if clauses.iter().any(|clause| clause.is_empty()) {
        return Err(Conflict);
    }

    while let Some(unit) = clauses.iter().find_map(|clause| match clause[..] {
        [lit] => Some(lit),
        _ => None,
    }) {
        assignment.set(unit);
        clauses = reduce(&clauses, unit)?;
    }

    Ok(clauses)
}
