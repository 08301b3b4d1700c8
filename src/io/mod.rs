pub mod report;

use std::io::{self as stdio, BufRead, BufReader, BufWriter, Read, Write};

use crate::{
    error::{Error, Result},
    solver::{Outcome, SolveResult},
    types::{Lit, Problem},
};

pub fn read_problem(reader: &mut impl Read) -> Result<Problem> {
    let mut lines = BufReader::new(reader).lines().enumerate();

    let (var_count, clause_count) = loop {
        let Some((_, line)) = lines.next() else {
            return Err(Error::MissingHeader);
        };
        let line = line?;

        if line.starts_with('c') || line.trim().is_empty() {
            // comment line
            continue;
        }

        // problem line
        let parts: Vec<&str> = line.split_whitespace().collect();
        match parts[..] {
            ["p", "cnf", vars, clauses] => match (vars.parse::<usize>(), clauses.parse::<usize>()) {
                (Ok(vars), Ok(clauses)) => break (vars, clauses),
                _ => return Err(Error::MalformedHeader(line.clone())),
            },
            _ => return Err(Error::MalformedHeader(line.clone())),
        }
    };

    let mut clauses = vec![];
    let mut clause = vec![];

    for (i_line, line) in lines {
        let line = line?;

        if line.starts_with('%') {
            break;
        }
        if line.starts_with('c') {
            continue;
        }

        for word in line.split_whitespace() {
            let lit = word.parse::<Lit>().map_err(|_| Error::MalformedLiteral {
                line: i_line + 1,
                token: word.to_string(),
            })?;
            match lit {
                0 => clauses.push(std::mem::take(&mut clause)),
                _ => {
                    if lit == Lit::MIN || lit.unsigned_abs() as usize > var_count {
                        return Err(Error::VariableOutOfRange { lit, var_count });
                    }
                    clause.push(lit);
                }
            }
        }
    }

    if !clause.is_empty() {
        return Err(Error::UnterminatedClause);
    }
    if clause_count != clauses.len() {
        return Err(Error::ClauseCountMismatch {
            declared: clause_count,
            found: clauses.len(),
        });
    }

    Ok(Problem { var_count, clauses })
}

pub fn write_solution(writer: &mut impl Write, result: &SolveResult) -> stdio::Result<()> {
    let mut writer = BufWriter::new(writer);
    writeln!(writer, "c Solved by dpll-cut in {} ms.", result.elapsed.as_millis())?;

    let outcome = result.outcome();
    let outcome_str = match outcome {
        Outcome::Sat { .. } => "SATISFIABLE",
        Outcome::Unsat => "UNSATISFIABLE",
        Outcome::TimedOut => "UNKNOWN",
    };
    writeln!(writer, "s {outcome_str}")?;

    if let Outcome::Sat { interpretation } = outcome {
        let model: Vec<Lit> = interpretation
            .iter()
            .enumerate()
            .map(|(i, &value)| {
                let lit = (i + 1) as Lit;
                if value {
                    lit
                } else {
                    -lit
                }
            })
            .collect();

        const PER_LINE: usize = 10;
        for chunk in model.chunks(PER_LINE) {
            let chunk_str = chunk
                .iter()
                .fold(String::new(), |str, lit| str + &lit.to_string() + " ");
            writeln!(writer, "v {chunk_str}")?;
        }
        writeln!(writer, "v 0")?;
    }

    writer.flush()
}

#[cfg(test)]
mod tests {
    use crate::{
        error::Error,
        solver::Solver,
        types::Problem,
    };

    use super::{read_problem, write_solution};

    #[test]
    fn basic() {
        let input = b"c whatever\np cnf 2 2\n1 2 0\n1 -2 0";
        let Problem { var_count, clauses } = read_problem(&mut input.as_slice()).unwrap();
        assert_eq!(var_count, 2);
        assert_eq!(clauses.len(), 2);
        assert_eq!(clauses[0], vec![1, 2]);
        assert_eq!(clauses[1], vec![1, -2]);
    }

    #[test]
    fn split() {
        let input = b"c whatever\np cnf 1 1\n1 1\n-1 -1 0";
        let Problem { clauses, .. } = read_problem(&mut input.as_slice()).unwrap();
        assert_eq!(clauses.len(), 1);
        assert_eq!(clauses[0], vec![1, 1, -1, -1]);
    }

    #[test]
    fn empty_clause_and_trailer() {
        let input = b"p cnf 2 2\n0\n2 -1 0\n%\n0\n";
        let Problem { clauses, .. } = read_problem(&mut input.as_slice()).unwrap();
        assert_eq!(clauses, vec![vec![], vec![2, -1]]);
    }

    #[test]
    fn malformed() {
        fn parse(input: &[u8]) -> Result<Problem, Error> {
            read_problem(&mut &input[..])
        }

        assert!(matches!(parse(b"c only comments\n"), Err(Error::MissingHeader)));
        assert!(matches!(parse(b"p dnf 1 1\n1 0\n"), Err(Error::MalformedHeader(_))));
        assert!(matches!(
            parse(b"p cnf 2 1\n1 x 0\n"),
            Err(Error::MalformedLiteral { line: 2, .. })
        ));
        assert!(matches!(
            parse(b"p cnf 2 2\n1 0\n"),
            Err(Error::ClauseCountMismatch { declared: 2, found: 1 })
        ));
        assert!(matches!(
            parse(b"p cnf 2 1\n1 -3 0\n"),
            Err(Error::VariableOutOfRange { lit: -3, var_count: 2 })
        ));
        assert!(matches!(parse(b"p cnf 2 1\n1 2\n"), Err(Error::UnterminatedClause)));
    }

    #[test]
    fn solution_output() {
        let problem = Problem::from_clauses(vec![vec![1], vec![-2]]);
        let result = Solver::new(problem).unwrap().solve();

        let mut buf: Vec<u8> = vec![];
        write_solution(&mut buf, &result).unwrap();
        let str = std::str::from_utf8(&buf).unwrap();
        let lines: Vec<&str> = str.lines().skip(1).collect();
        assert_eq!(lines, vec!["s SATISFIABLE", "v 1 -2 ", "v 0"]);

        let problem = Problem::from_clauses(vec![vec![1], vec![-1]]);
        let result = Solver::new(problem).unwrap().solve();
        let mut buf: Vec<u8> = vec![];
        write_solution(&mut buf, &result).unwrap();
        let str = std::str::from_utf8(&buf).unwrap();
        assert!(str.ends_with("s UNSATISFIABLE\n"));
    }
}
