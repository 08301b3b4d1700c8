use crate::types::{to_var, Lit, Var};

/// Partial interpretation with a trail of assigned literals, split into
/// levels so that an abandoned branch can be rolled back.
pub struct Assignment {
    values: Vec<Option<bool>>,
    trail: Vec<Lit>,
    levels: Vec<usize>,
}

impl Assignment {
    pub fn new(var_count: usize) -> Self {
        Self {
            // 0 inserted for indexing by variables
            values: vec![None; var_count + 1],
            trail: vec![],
            levels: vec![],
        }
    }

    pub fn eval(&self, lit: Lit) -> Option<bool> {
        self.values[to_var(lit)].map(|value| value == lit.is_positive())
    }

    /// Records a forced literal at the current level.
    pub fn set(&mut self, lit: Lit) {
        debug_assert_eq!(self.eval(lit), None);
        self.trail.push(lit);
        self.values[to_var(lit)] = Some(lit.is_positive());
    }

    /// Opens a new level and assigns `lit` as its first literal.
    pub fn decide(&mut self, lit: Lit) {
        self.levels.push(self.trail.len());
        self.set(lit);
    }

    pub fn trail(&self) -> &[Lit] {
        &self.trail
    }

    pub fn last_level(&self) -> usize {
        self.levels.len()
    }

    /// Revert all changes at `level` (incl.) and above.
    pub fn backtrack(&mut self, level: usize) {
        if level == 0 || level > self.levels.len() {
            return;
        }
        let i = self.levels[level - 1];
        self.levels.truncate(level - 1);
        for lit in self.trail.drain(i..) {
            self.values[to_var(lit)] = None;
        }
    }

    /// Full interpretation indexed by `var - 1`; unassigned variables are false.
    pub fn model(&self) -> Vec<bool> {
        self.values[1..]
            .iter()
            .map(|value| value.unwrap_or(false))
            .collect()
    }

    pub fn value(&self, var: Var) -> Option<bool> {
        self.values[var]
    }
}
