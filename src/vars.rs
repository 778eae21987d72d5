//! Variable registry: the variables of an expression and all their assignments.

use std::collections::BTreeSet;

use crate::error::FormatError;
use crate::lexer::{tokenize, TokenKind};
use crate::types::Var;

/// Largest number of distinct variables a truth table is built for (`2^20` rows).
pub const MAX_VARIABLES: usize = 20;

/// Returns the distinct variables of `expression`, sorted by letter.
///
/// Operator keywords, parentheses and whitespace are skipped; anything else
/// that is not a letter is rejected, as are unbalanced parentheses and more
/// than [`MAX_VARIABLES`] distinct letters.
pub fn extract_variables(expression: &str) -> Result<Vec<Var>, FormatError> {
    let tokens = tokenize(expression)?;

    let open = tokens.iter().filter(|t| t.kind == TokenKind::LParen).count();
    let close = tokens.iter().filter(|t| t.kind == TokenKind::RParen).count();
    if open != close {
        return Err(FormatError::UnbalancedParentheses { open, close });
    }

    let vars: BTreeSet<Var> = tokens
        .iter()
        .filter_map(|t| match t.kind {
            TokenKind::Var(var) => Some(var),
            _ => None,
        })
        .collect();
    if vars.len() > MAX_VARIABLES {
        return Err(FormatError::TooManyVariables {
            count: vars.len(),
            max: MAX_VARIABLES,
        });
    }
    Ok(vars.into_iter().collect())
}

/// One row of the truth table: a value for every variable, in variable order.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Assignment(Vec<bool>);

impl Assignment {
    pub fn new(values: Vec<bool>) -> Self {
        Self(values)
    }

    /// Value of the `i`-th variable.
    pub fn get(&self, i: usize) -> bool {
        self.0[i]
    }

    pub fn values(&self) -> &[bool] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Enumerates all `2^n` assignments of `n` variables.
///
/// Rows are ordered as the outer product over positions `1..=n`, `0` before `1`
/// at each position; the last variable changes fastest:
///
/// ```text
/// n = 2:  00, 01, 10, 11
/// ```
pub fn enumerate_assignments(n: usize) -> Vec<Assignment> {
    assert!(n < usize::BITS as usize, "Too many variables: {}", n);
    (0..1usize << n)
        .map(|row| Assignment((0..n).map(|i| (row >> (n - 1 - i)) & 1 == 1).collect()))
        .collect()
}
