//! Error types for expression parsing and reduction.

use thiserror::Error;

/// The supplied expression is not well-formed.
///
/// Raised before any reduction step; the whole input is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// The expression contains nothing but whitespace.
    #[error("expression is empty")]
    Empty,

    /// Opening and closing parentheses do not pair up.
    #[error("unbalanced parentheses: {open} '(' vs {close} ')'")]
    UnbalancedParentheses { open: usize, close: usize },

    /// A character that is neither a letter, a parenthesis, whitespace nor part of an operator.
    #[error("invalid character {ch:?} at position {position}")]
    InvalidCharacter { ch: char, position: usize },

    /// A token that cannot appear at this place, e.g. the second operand in `a b`.
    #[error("unexpected '{token}' at position {position}")]
    UnexpectedToken { token: String, position: usize },

    /// More distinct variables than rows can be enumerated for.
    #[error("too many variables: {count} (at most {max})")]
    TooManyVariables { count: usize, max: usize },

    /// The expression stops where an operand is required, e.g. `a and`.
    #[error("unexpected end of expression")]
    UnexpectedEnd,
}

/// Errors that can occur while building a truth table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The expression was rejected before reduction.
    #[error("malformed expression: {0}")]
    Format(#[from] FormatError),

    /// A column key or reference does not resolve to exactly one column.
    #[error("column not found: {key}")]
    NotFound { key: String },

    /// A new column key is already present in the table.
    #[error("duplicate column key: {key}")]
    DuplicateKey { key: String },

    /// A reducer invariant was violated.
    #[error("internal error: {0}")]
    Internal(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
