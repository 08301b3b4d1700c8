mod assignment;
mod branching;
mod config;
mod deadline;
mod propagate;

use std::time::Duration;

use tracing::{debug, trace};

use crate::{
    error::{Error, Result},
    types::{satisfies, to_var, Clause, Lit, Problem, Var},
};

pub use self::{
    assignment::Assignment,
    branching::select_variable,
    config::{DeadlinePolicy, SolverConfig, DEFAULT_TIMEOUT},
    deadline::Deadline,
    propagate::{propagate, reduce, Conflict},
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Sat { interpretation: Vec<bool> },
    Unsat,
    TimedOut,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Case splits entered (after the deadline check).
    pub splits: usize,
    /// Literals forced by unit propagation.
    pub propagations: usize,
    /// Empty clauses hit while reducing or propagating.
    pub conflicts: usize,
}

/// Everything one `solve` call produces.
#[derive(Clone, Debug)]
pub struct SolveResult {
    pub satisfiable: bool,
    /// Implies `!satisfiable`.
    pub timed_out: bool,
    pub variable_count: usize,
    /// Indexed by `var - 1`; meaningful only if `satisfiable`.
    pub interpretation: Vec<bool>,
    pub elapsed: Duration,
    pub timeout: Duration,
    /// The input, untouched.
    pub clause_set: Vec<Clause>,
    pub stats: SearchStats,
}

impl SolveResult {
    pub fn outcome(&self) -> Outcome {
        if self.satisfiable {
            Outcome::Sat {
                interpretation: self.interpretation.clone(),
            }
        } else if self.timed_out {
            Outcome::TimedOut
        } else {
            Outcome::Unsat
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Verdict {
    Sat,
    Unsat,
    TimedOut,
}

pub struct Solver {
    clauses: Vec<Clause>,
    var_count: usize,
    config: SolverConfig,
}

impl Solver {
    pub fn new(problem: Problem) -> Result<Self> {
        Self::with_config(problem, SolverConfig::default())
    }

    /// Validates the clauses and fixes the variable count to the largest
    /// literal magnitude; the count declared in `problem` is not used.
    pub fn with_config(problem: Problem, config: SolverConfig) -> Result<Self> {
        let Problem { clauses, .. } = problem;

        for (i_clause, clause) in clauses.iter().enumerate() {
            for (position, &lit) in clause.iter().enumerate() {
                if lit == 0 || lit == Lit::MIN {
                    return Err(Error::InvalidLiteral {
                        lit,
                        clause: i_clause,
                        position,
                    });
                }
            }
        }

        let var_count = clauses.iter().flatten().map(|&lit| to_var(lit)).max().unwrap_or(0);

        Ok(Self {
            clauses,
            var_count,
            config,
        })
    }

    pub fn var_count(&self) -> usize {
        self.var_count
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    pub fn solve(&self) -> SolveResult {
        self.solve_within(Deadline::start(self.config.timeout))
    }

    /// Solves against an already running deadline; the configured timeout is
    /// not used, the deadline policy is.
    pub fn solve_within(&self, deadline: Deadline) -> SolveResult {
        let mut search = Search::new(self.var_count, deadline);

        debug!(
            vars = self.var_count,
            clauses = self.clauses.len(),
            "initial propagation"
        );
        let verdict = match search.propagate(self.clauses.clone()) {
            Err(Conflict) => None,
            Ok(rest) => Some(search.descend(rest)),
        };

        let elapsed = deadline.elapsed();
        let verdict = match verdict {
            None => {
                debug!("contradiction during initial propagation");
                Verdict::Unsat
            }
            Some(verdict)
                if self.config.deadline_policy == DeadlinePolicy::Strict
                    && elapsed > deadline.limit() =>
            {
                if verdict != Verdict::TimedOut {
                    debug!(?verdict, ?elapsed, "verdict discarded past the deadline");
                }
                Verdict::TimedOut
            }
            Some(verdict) => verdict,
        };

        debug!(?verdict, ?elapsed, stats = ?search.stats, "search finished");

        let satisfiable = verdict == Verdict::Sat;
        let interpretation = if satisfiable {
            search.assignment.model()
        } else {
            vec![false; self.var_count]
        };

        SolveResult {
            satisfiable,
            timed_out: verdict == Verdict::TimedOut,
            variable_count: self.var_count,
            interpretation,
            elapsed,
            timeout: deadline.limit(),
            clause_set: self.clauses.clone(),
            stats: search.stats,
        }
    }
}

/// State of one depth-first search; dropped when `solve` returns.
struct Search {
    var_count: usize,
    deadline: Deadline,
    assignment: Assignment,
    stats: SearchStats,
}

impl Search {
    fn new(var_count: usize, deadline: Deadline) -> Self {
        Self {
            var_count,
            deadline,
            assignment: Assignment::new(var_count),
            stats: SearchStats::default(),
        }
    }

    fn propagate(&mut self, clauses: Vec<Clause>) -> std::result::Result<Vec<Clause>, Conflict> {
        let before = self.assignment.trail().len();
        let propagated = propagate(clauses, &mut self.assignment);
        self.stats.propagations += self.assignment.trail().len() - before;
        if propagated.is_err() {
            self.stats.conflicts += 1;
        }
        propagated
    }

    /// Branches on the best variable of a propagated clause set, or reports
    /// SAT if nothing is left.
    fn descend(&mut self, clauses: Vec<Clause>) -> Verdict {
        match select_variable(&clauses, self.var_count) {
            Some(var) => self.atomic_cut(var, &clauses),
            None => {
                debug_assert!(clauses.is_empty());
                Verdict::Sat
            }
        }
    }

    fn settle(&mut self, clauses: Vec<Clause>) -> Verdict {
        match self.propagate(clauses) {
            Ok(rest) => self.descend(rest),
            Err(Conflict) => Verdict::Unsat,
        }
    }

    fn atomic_cut(&mut self, var: Var, clauses: &[Clause]) -> Verdict {
        if self.deadline.expired() {
            return Verdict::TimedOut;
        }
        self.stats.splits += 1;

        let lit = var as Lit;
        let level = self.assignment.last_level() + 1;
        trace!(var, level, clauses = clauses.len(), "case split");

        self.assignment.decide(lit);
        match reduce(clauses, lit) {
            Ok(reduced) => match self.settle(reduced) {
                Verdict::Unsat => (),
                verdict => return verdict,
            },
            // void branch, fall through to the negative side
            Err(Conflict) => self.stats.conflicts += 1,
        }
        self.assignment.backtrack(level);

        self.assignment.decide(-lit);
        match reduce(clauses, -lit) {
            Ok(reduced) => self.settle(reduced),
            Err(Conflict) => {
                self.stats.conflicts += 1;
                Verdict::Unsat
            }
        }
    }
}

/// Checks a result against the expected satisfiability of `clauses`.
/// A timeout never verifies.
pub fn verify(clauses: &[Clause], sat: bool, result: &SolveResult) -> bool {
    match result.outcome() {
        Outcome::Sat { interpretation } => sat && satisfies(clauses, &interpretation),
        Outcome::Unsat => !sat,
        Outcome::TimedOut => false,
    }
}

#[cfg(test)]
mod tests {
    use std::{thread, time::Duration};

    use crate::{
        error::Error,
        types::{Clause, Problem},
    };

    use super::{verify, Deadline, DeadlinePolicy, Outcome, SolveResult, Solver, SolverConfig};

    /// A deadline that has certainly passed.
    fn expired() -> Deadline {
        let deadline = Deadline::start(Duration::from_nanos(1));
        thread::sleep(Duration::from_millis(1));
        deadline
    }

    fn solve(clauses: Vec<Clause>) -> SolveResult {
        Solver::new(Problem::from_clauses(clauses)).unwrap().solve()
    }

    fn check(clauses: Vec<Clause>, sat: bool) {
        let result = solve(clauses.clone());
        assert!(verify(&clauses, sat, &result));
    }

    #[test]
    fn single_unit() {
        let result = solve(vec![vec![1]]);
        assert_eq!(result.outcome(), Outcome::Sat { interpretation: vec![true] });
        assert_eq!(result.variable_count, 1);
    }

    #[test]
    fn direct_contradiction() {
        let result = solve(vec![vec![1], vec![-1]]);
        assert_eq!(result.outcome(), Outcome::Unsat);
    }

    #[test]
    /// Formulas with non-trivial propagation before the first decision.
    fn kickstart() {
        let result = solve(vec![vec![1], vec![-1, 2], vec![-2]]);
        assert_eq!(result.outcome(), Outcome::Unsat);
        assert_eq!(result.stats.splits, 0);
    }

    #[test]
    fn first_branch_model() {
        let result = solve(vec![vec![1, 2], vec![-1, 2], vec![1, -2]]);
        assert_eq!(
            result.outcome(),
            Outcome::Sat { interpretation: vec![true, true] }
        );
        assert_eq!(result.stats.splits, 1);
    }

    #[test]
    fn empty_inputs() {
        let result = solve(vec![]);
        assert!(result.satisfiable);
        assert_eq!(result.variable_count, 0);

        assert!(!solve(vec![vec![]]).satisfiable);
        assert!(!solve(vec![vec![1, 2], vec![], vec![-1]]).satisfiable);
    }

    #[test]
    fn satisfied_by_one_polarity() {
        // every clause holds once 1 is true, none of them once it is false
        check(vec![vec![1, 2], vec![1, -2]], true);
        check(vec![vec![1, 2, 3], vec![1, -2, 3], vec![1, -3, 2], vec![1, -2, -3]], true);
    }

    #[test]
    /// Formulas from the lecture.
    fn basic_sat() {
        let clauses = vec![vec![1, 2], vec![-1, 2], vec![-1, -2, 3], vec![-1, -2, -3]];
        check(clauses, true);

        let clauses = vec![
            vec![-1, -2, 3],
            vec![2, -1, 3],
            vec![1, -2, 3],
            vec![-3, 4, 5],
            vec![-3, 4, -5],
            vec![-3, -4, 5],
            vec![-3, -4, -5],
        ];
        check(clauses, true);
    }

    #[test]
    fn basic_unsat() {
        let clauses = vec![
            vec![1, 2],
            vec![-2, 3],
            vec![-2, -3],
            vec![-1, -2, -4],
            vec![-1, 2, -4],
            vec![-1, 2, 4],
        ];

        check(clauses, false);
    }

    #[test]
    fn duplicate_literals() {
        check(vec![vec![1, 1], vec![-1, -1, 2], vec![-2, -2]], false);
        check(vec![vec![1, 1, -2], vec![-1, -1], vec![2, 3, 3]], true);
    }

    #[test]
    fn zero_literal_rejected() {
        let problem = Problem {
            var_count: 2,
            clauses: vec![vec![1, 2], vec![-1, 0, 2]],
        };
        match Solver::new(problem) {
            Err(Error::InvalidLiteral { lit, clause, position }) => {
                assert_eq!((lit, clause, position), (0, 1, 1));
            }
            _ => panic!("zero literal accepted"),
        }
    }

    #[test]
    fn zero_literal_in_derived_problem() {
        match Solver::new(Problem::from_clauses(vec![vec![1, 0]])) {
            Err(Error::InvalidLiteral { lit, clause, position }) => {
                assert_eq!((lit, clause, position), (0, 0, 1));
            }
            _ => panic!("zero literal accepted"),
        }
        assert!(matches!(
            Solver::new(Problem::from_clauses(vec![vec![2], vec![i32::MIN]])),
            Err(Error::InvalidLiteral { clause: 1, position: 0, .. })
        ));
    }

    #[test]
    fn var_count_ignores_declared() {
        let problem = Problem {
            var_count: 10,
            clauses: vec![vec![1, -3]],
        };
        let solver = Solver::new(problem).unwrap();
        assert_eq!(solver.var_count(), 3);
        assert_eq!(solver.solve().interpretation.len(), 3);
    }

    #[test]
    fn solve_twice() {
        let solver = Solver::new(Problem::from_clauses(vec![vec![1, 2], vec![-1], vec![-2, 3]])).unwrap();
        let first = solver.solve();
        let second = solver.solve();
        assert_eq!(first.outcome(), second.outcome());
        assert_eq!(first.stats, second.stats);
        assert_eq!(first.clause_set, vec![vec![1, 2], vec![-1], vec![-2, 3]]);
    }

    #[test]
    fn expired_before_first_split() {
        // needs at least one split, so the entry check fires
        let clauses = vec![vec![1, 2], vec![-1, 2], vec![1, -2], vec![-1, -2]];

        for policy in [DeadlinePolicy::Strict, DeadlinePolicy::KeepVerdict] {
            let config = SolverConfig::default().with_deadline_policy(policy);
            let solver = Solver::with_config(Problem::from_clauses(clauses.clone()), config).unwrap();
            let result = solver.solve_within(expired());
            assert!(result.timed_out);
            assert!(!result.satisfiable);
            assert_eq!(result.outcome(), Outcome::TimedOut);
            assert!(!verify(&clauses, false, &result));
        }
    }

    #[test]
    fn late_verdict_policy() {
        // solved by propagation alone, no split ever checks the deadline
        let clauses = vec![vec![1], vec![-1, 2]];
        let config = SolverConfig::default();

        let strict = Solver::with_config(Problem::from_clauses(clauses.clone()), config)
            .unwrap()
            .solve_within(expired());
        assert_eq!(strict.outcome(), Outcome::TimedOut);
        assert_eq!(strict.timeout, Duration::from_nanos(1));

        let keep = Solver::with_config(
            Problem::from_clauses(clauses),
            config.with_deadline_policy(DeadlinePolicy::KeepVerdict),
        )
        .unwrap()
        .solve_within(expired());
        assert_eq!(
            keep.outcome(),
            Outcome::Sat { interpretation: vec![true, true] }
        );
    }

    #[test]
    fn initial_contradiction_not_clamped() {
        let result = Solver::new(Problem::from_clauses(vec![vec![1], vec![-1]]))
            .unwrap()
            .solve_within(expired());
        assert_eq!(result.outcome(), Outcome::Unsat);
    }
}
