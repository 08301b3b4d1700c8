//! Human-readable rendering of a [`SolveResult`].

use std::io::{self, BufWriter, Write};

use crate::{
    solver::SolveResult,
    types::{to_var, Clause, Lit, Var},
};

#[derive(Clone, Copy, Debug, Default)]
pub struct ReportOptions {
    /// List the value of every variable (SAT only).
    pub model: bool,
    /// Echo the input clause set.
    pub clauses: bool,
}

/// Variables 1 to 11 are shown as `p` to `z`, later ones as `x<id>`.
pub fn symbol(var: Var) -> String {
    const LETTERS: usize = (b'z' - b'p' + 1) as usize;
    if (1..=LETTERS).contains(&var) {
        char::from(b'p' + (var - 1) as u8).to_string()
    } else {
        format!("x{var}")
    }
}

fn literal(lit: Lit) -> String {
    let sign = if lit < 0 { "!" } else { "" };
    format!("{sign}{}", symbol(to_var(lit)))
}

fn clause_set(clauses: &[Clause]) -> String {
    let clauses: Vec<String> = clauses
        .iter()
        .map(|clause| {
            let lits: Vec<String> = clause.iter().map(|&lit| literal(lit)).collect();
            format!("{{{}}}", lits.join(", "))
        })
        .collect();
    format!("{{{}}}", clauses.join(", "))
}

pub fn write_report(writer: &mut impl Write, result: &SolveResult, options: ReportOptions) -> io::Result<()> {
    let mut writer = BufWriter::new(writer);

    if result.timed_out {
        writeln!(writer, "Solver timed out. ({}s)", result.timeout.as_secs_f64())?;
        return writer.flush();
    }

    writeln!(writer, "Number of variables: {}", result.variable_count)?;
    let satisfiable = if result.satisfiable { "yes" } else { "no" };
    writeln!(writer, "Satisfiable: {satisfiable}")?;
    writeln!(writer, "Time to solve (ms): {}", result.elapsed.as_millis())?;

    if options.model && result.satisfiable {
        writeln!(writer, "Model interpretation:")?;
        for (i, value) in result.interpretation.iter().enumerate() {
            writeln!(writer, "{} -> {value}", symbol(i + 1))?;
        }
    }

    if options.clauses {
        writeln!(writer, "Clause set:")?;
        writeln!(writer, "{}", clause_set(&result.clause_set))?;
    }

    writeln!(writer)?;
    writer.flush()
}
