//! Error types for parsing, validation and benchmark generation.

use thiserror::Error;

use crate::types::Lit;

#[derive(Debug, Error)]
pub enum Error {
    /// A literal is zero (or has no representable negation).
    #[error("invalid literal {lit} at clause {clause}, position {position}")]
    InvalidLiteral {
        lit: Lit,
        clause: usize,
        position: usize,
    },

    #[error("missing `p cnf` problem line")]
    MissingHeader,

    #[error("malformed problem line: {0:?}")]
    MalformedHeader(String),

    #[error("malformed literal {token:?} on line {line}")]
    MalformedLiteral { line: usize, token: String },

    #[error("problem line declares {declared} clauses, found {found}")]
    ClauseCountMismatch { declared: usize, found: usize },

    #[error("literal {lit} is out of range for {var_count} variables")]
    VariableOutOfRange { lit: Lit, var_count: usize },

    #[error("last clause is not terminated by 0")]
    UnterminatedClause,

    #[error("benchmark of {requested} variables requested, supported sizes are {min} to {max}")]
    BenchmarkSize {
        requested: usize,
        min: usize,
        max: usize,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
