//! Small fixed instances with known satisfiability.

use crate::types::{Clause, Problem};

pub struct Instance {
    pub name: &'static str,
    pub clauses: Vec<Clause>,
}

impl Instance {
    pub fn problem(&self) -> Problem {
        Problem::from_clauses(self.clauses.clone())
    }
}

fn instance(name: &'static str, clauses: &[&[i32]]) -> Instance {
    Instance {
        name,
        clauses: clauses.iter().map(|clause| clause.to_vec()).collect(),
    }
}

pub fn satisfiable() -> Vec<Instance> {
    vec![
        instance("single unit", &[&[1]]),
        instance("two units", &[&[1], &[2]]),
        instance("disjunction", &[&[1, 2]]),
        instance("implication pair", &[&[1, 2], &[-1, 2], &[1, -2]]),
        instance(
            "graph coloring",
            &[&[1, 2], &[-1, 3], &[-2, -3], &[1, -3], &[-1, 2, 3]],
        ),
    ]
}

pub fn unsatisfiable() -> Vec<Instance> {
    vec![
        instance("contradiction", &[&[1], &[-1]]),
        instance("propagation chain", &[&[1], &[-1, 2], &[-2]]),
        instance("all binary rows", &[&[1, 2], &[-1, 2], &[1, -2], &[-1, -2]]),
        pigeonhole(),
    ]
}

/// Three pigeons, two holes; variable `2p + h + 1` puts pigeon `p` in hole `h`.
pub fn pigeonhole() -> Instance {
    instance(
        "pigeonhole 3 into 2",
        &[
            &[1, 2],
            &[3, 4],
            &[5, 6],
            &[-1, -3],
            &[-1, -5],
            &[-3, -5],
            &[-2, -4],
            &[-2, -6],
            &[-4, -6],
        ],
    )
}
