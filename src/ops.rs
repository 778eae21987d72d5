//! Operator semantics and vocabulary.
//!
//! Every operator is a pure, total function over truth values. The order of
//! [`Op::ALL`] is the reduction priority: inside one scope, all negations are
//! resolved first, then conjunctions, disjunctions, implications and finally
//! equivalences.

use std::fmt::{self, Display, Formatter};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Op {
    Not,
    And,
    Or,
    Implies,
    Equiv,
}

impl Op {
    /// All operators, in priority order.
    pub const ALL: [Op; 5] = [Op::Not, Op::And, Op::Or, Op::Implies, Op::Equiv];

    /// Binary operators, in priority order.
    pub const BINARY: [Op; 4] = [Op::And, Op::Or, Op::Implies, Op::Equiv];

    /// The token used for the operator in expressions.
    pub const fn token(self) -> &'static str {
        match self {
            Op::Not => "not",
            Op::And => "and",
            Op::Or => "or",
            Op::Implies => "<=",
            Op::Equiv => "==",
        }
    }

    /// Human-readable name, used for the legend.
    pub const fn name(self) -> &'static str {
        match self {
            Op::Not => "negation",
            Op::And => "conjunction",
            Op::Or => "disjunction",
            Op::Implies => "implication",
            Op::Equiv => "equivalence",
        }
    }

    pub const fn arity(self) -> usize {
        match self {
            Op::Not => 1,
            _ => 2,
        }
    }

    /// Reduction priority, `0` being resolved first.
    pub const fn priority(self) -> usize {
        self as usize
    }

    /// Evaluates the operator on one row of operand values.
    ///
    /// Returns `None` when the number of values does not match [`Op::arity`].
    pub fn eval(self, args: &[bool]) -> Option<bool> {
        match (self, args) {
            (Op::Not, &[x]) => Some(!x),
            (Op::And, &[x, y]) => Some(x && y),
            (Op::Or, &[x, y]) => Some(x || y),
            (Op::Implies, &[x, y]) => Some(!x || y),
            (Op::Equiv, &[x, y]) => Some(x == y),
            _ => None,
        }
    }
}

impl Display for Op {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}

/// Negates a column row by row.
pub fn not(xs: &[bool]) -> Vec<bool> {
    xs.iter().map(|&x| !x).collect()
}

/// Combines two columns row by row.
///
/// Returns `None` for [`Op::Not`] or when the columns differ in length.
pub fn zip_with(op: Op, xs: &[bool], ys: &[bool]) -> Option<Vec<bool>> {
    if xs.len() != ys.len() {
        return None;
    }
    xs.iter().zip(ys).map(|(&x, &y)| op.eval(&[x, y])).collect()
}

/// Renders the operator legend, one `token - name` line per operator.
pub fn legend() -> String {
    Op::ALL
        .iter()
        .map(|op| format!("{} - {}\n", op.token(), op.name()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const X: [bool; 4] = [false, false, true, true];
    const Y: [bool; 4] = [false, true, false, true];

    #[test]
    fn test_not() {
        assert_eq!(not(&[false, false]), vec![true, true]);
        assert_eq!(not(&[true, true]), vec![false, false]);
        assert_eq!(not(&[false, true]), vec![true, false]);
    }

    #[test]
    fn test_and() {
        assert_eq!(zip_with(Op::And, &X, &Y).unwrap(), vec![false, false, false, true]);
    }

    #[test]
    fn test_or() {
        assert_eq!(zip_with(Op::Or, &X, &Y).unwrap(), vec![false, true, true, true]);
    }

    #[test]
    fn test_implies() {
        assert_eq!(zip_with(Op::Implies, &X, &Y).unwrap(), vec![true, true, false, true]);
    }

    #[test]
    fn test_equiv() {
        assert_eq!(zip_with(Op::Equiv, &X, &Y).unwrap(), vec![true, false, false, true]);
    }

    #[test]
    fn test_priority_order() {
        let priorities: Vec<usize> = Op::ALL.iter().map(|op| op.priority()).collect();
        assert_eq!(priorities, vec![0, 1, 2, 3, 4]);
        assert!(Op::BINARY.iter().all(|op| op.arity() == 2));
        assert_eq!(Op::Not.arity(), 1);
    }

    #[test]
    fn test_eval_wrong_arity() {
        assert_eq!(Op::Not.eval(&[true]), Some(false));
        assert_eq!(Op::Not.eval(&[true, false]), None);
        assert_eq!(Op::And.eval(&[true]), None);
        assert_eq!(Op::Equiv.eval(&[]), None);
        assert_eq!(zip_with(Op::Not, &X, &Y), None);
    }

    #[test]
    fn test_zip_with_length_mismatch() {
        assert_eq!(zip_with(Op::And, &[true], &[true, false]), None);
    }

    #[test]
    fn test_legend() {
        let legend = legend();
        let lines: Vec<&str> = legend.lines().collect();
        assert_eq!(
            lines,
            vec![
                "not - negation",
                "and - conjunction",
                "or - disjunction",
                "<= - implication",
                "== - equivalence",
            ]
        );
    }
}
