//! Type-safe wrappers for variables and derived columns.
//!
//! This module provides newtype wrappers that keep the two kinds of truth-table
//! columns apart: a [`Var`] names a column holding the values of an input
//! variable, while a [`ColumnId`] names a column computed during reduction.
use std::fmt;

/// A propositional variable: a single ASCII letter.
///
/// Variables order by their letter, so `A < B < a < b`.
///
/// # Invariants
///
/// - The wrapped character is always an ASCII letter.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Var(char);

impl Var {
    /// Creates a new variable with the given letter.
    ///
    /// # Panics
    ///
    /// Panics if `ch` is not an ASCII letter.
    pub fn new(ch: char) -> Self {
        assert!(ch.is_ascii_alphabetic(), "Variables must be ASCII letters, got {:?}", ch);
        Var(ch)
    }

    /// Creates a variable if `ch` is an ASCII letter.
    pub fn try_new(ch: char) -> Option<Self> {
        ch.is_ascii_alphabetic().then_some(Var(ch))
    }

    /// Returns the letter of the variable.
    pub fn letter(self) -> char {
        self.0
    }
}

impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Var> for char {
    fn from(var: Var) -> Self {
        var.0
    }
}

/// Identifier of a derived column (0-indexed).
///
/// Identifiers are handed out in creation order by the
/// [`ColumnTable`][crate::table::ColumnTable] and are never reused within one table.
/// Inside an expression buffer a derived column is referenced by this number alone.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct ColumnId(u32);

impl ColumnId {
    /// Creates a column identifier from its raw number.
    pub const fn new(id: u32) -> Self {
        ColumnId(id)
    }

    /// Returns the raw identifier.
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Returns the identifier following this one.
    pub const fn next(self) -> Self {
        ColumnId(self.0 + 1)
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<ColumnId> for u32 {
    fn from(id: ColumnId) -> Self {
        id.0
    }
}

/// An operand of an operator: either an input variable or a derived column.
///
/// This is what a single reference token in the expression buffer stands for.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Operand {
    Var(Var),
    Column(ColumnId),
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Var(var) => write!(f, "{}", var),
            Operand::Column(id) => write!(f, "{}", id),
        }
    }
}

impl From<Var> for Operand {
    fn from(var: Var) -> Self {
        Operand::Var(var)
    }
}

impl From<ColumnId> for Operand {
    fn from(id: ColumnId) -> Self {
        Operand::Column(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_var_letter() {
        let v = Var::new('q');
        assert_eq!(v.letter(), 'q');
        assert_eq!(v.to_string(), "q");
        assert_eq!(char::from(v), 'q');
    }

    #[test]
    #[should_panic(expected = "Variables must be ASCII letters")]
    fn test_var_rejects_digit() {
        Var::new('7');
    }

    #[test]
    fn test_var_try_new() {
        assert_eq!(Var::try_new('Z'), Some(Var::new('Z')));
        assert_eq!(Var::try_new('('), None);
        assert_eq!(Var::try_new('é'), None);
    }

    #[test]
    fn test_var_ordering() {
        let mut vars = vec![Var::new('b'), Var::new('B'), Var::new('a')];
        vars.sort();
        assert_eq!(vars, vec![Var::new('B'), Var::new('a'), Var::new('b')]);
    }

    #[test]
    fn test_column_id() {
        let id = ColumnId::new(3);
        assert_eq!(id.get(), 3);
        assert_eq!(id.next(), ColumnId::new(4));
        assert_eq!(id.to_string(), "3");
        assert_eq!(u32::from(id), 3);
    }

    #[test]
    fn test_operand_display() {
        assert_eq!(Operand::from(Var::new('x')).to_string(), "x");
        assert_eq!(Operand::from(ColumnId::new(12)).to_string(), "12");
    }
}
