pub type Lit = i32;

pub type Var = usize;

pub type Clause = Vec<Lit>;

pub fn to_var(lit: Lit) -> Var {
    debug_assert_ne!(lit, 0);
    lit.unsigned_abs() as Var
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Problem {
    pub var_count: usize,
    pub clauses: Vec<Clause>,
}

impl Problem {
    /// Builds a problem whose variable count is the largest literal magnitude.
    /// Literals are not validated here.
    pub fn from_clauses(clauses: Vec<Clause>) -> Self {
        let var_count = clauses.iter().flatten().map(|lit| lit.unsigned_abs() as Var).max();
        Self {
            var_count: var_count.unwrap_or(0),
            clauses,
        }
    }
}

/// Whether `model` (indexed by `var - 1`) makes every clause true.
/// Variables beyond the model's length count as false.
pub fn satisfies(clauses: &[Clause], model: &[bool]) -> bool {
    clauses.iter().all(|clause| {
        clause.iter().any(|&lit| {
            let value = model.get(to_var(lit) - 1).copied().unwrap_or(false);
            value == lit.is_positive()
        })
    })
}
