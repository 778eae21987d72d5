//! Step-wise expression reduction.
//!
//! The [`Reducer`] owns both the expression buffer (an [`ExprArena`]) and the
//! [`ColumnTable`]. Every [`Reducer::step`] evaluates exactly one operator:
//! it computes a new derived column from the operand columns, registers it in
//! the table, and replaces the operator's subtree by a reference to that column.
//!
//! # Reduction order
//!
//! The order is fixed by two rules:
//!
//! 1. **Scope.** The innermost parenthesized group that opens last in the text is
//!    reduced completely before anything else; the top level comes last.
//!    Equivalently, groups are reduced in decreasing order of the position of
//!    their `(`.
//! 2. **Operator.** Inside one scope, operators are taken by priority
//!    (`not`, `and`, `or`, `<=`, `==`). Negations are resolved right to left,
//!    binary operators left to right.
//!
//! For example, `(a and b) or (not a)` is reduced as:
//!
//! ```text
//! (a and b) or (not a)   -- not a (0)
//! (a and b) or 0         -- a and b (1)
//! 1 or 0                 -- 1 or 0 (2)
//! 2
//! ```
//!
//! The number of steps always equals the number of operators in the input.

use std::cmp::Reverse;
use std::collections::VecDeque;
use std::fmt::{self, Display, Formatter};

use log::debug;

use crate::ast::{ExprArena, Idx, Node};
use crate::error::{Error, Result};
use crate::ops::Op;
use crate::table::ColumnTable;
use crate::types::{ColumnId, Operand};

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ReducerState {
    Reducing,
    Done,
}

/// Record of one reduction step.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Step {
    pub op: Op,
    pub operands: Vec<Operand>,
    /// Offset of the `(` of the scope the step operated in, `None` at top level.
    pub scope: Option<usize>,
    /// The new derived column.
    pub column: ColumnId,
    /// Key of the new column at the time it was created.
    pub key: String,
    /// The expression buffer after the step.
    pub expression: String,
}

impl Display for Step {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} => {}", self.key, self.expression)
    }
}

/// Sort key of an operator node in the reduction schedule.
///
/// `Reverse(None)` sorts after every `Reverse(Some(_))`, so the top level comes last.
fn schedule_key(expr: &ExprArena, idx: Idx, op: Op) -> (Reverse<Option<usize>>, usize, isize) {
    let site = expr.site(idx);
    let position = site.position as isize;
    let order = if op == Op::Not { -position } else { position };
    (Reverse(site.scope), op.priority(), order)
}

fn schedule(expr: &ExprArena) -> VecDeque<Idx> {
    let mut ops: Vec<(Idx, Op)> = expr
        .iter()
        .filter_map(|(idx, node)| node.op().map(|op| (idx, op)))
        .collect();
    ops.sort_by_key(|&(idx, op)| schedule_key(expr, idx, op));
    ops.into_iter().map(|(idx, _)| idx).collect()
}

#[derive(Debug)]
pub struct Reducer {
    expr: ExprArena,
    table: ColumnTable,
    /// Operator nodes not evaluated yet, in reduction order.
    pending: VecDeque<Idx>,
}

impl Reducer {
    /// Creates a reducer for `expr`.
    ///
    /// The table must already hold a column for every variable of `expr`.
    pub fn new(expr: ExprArena, table: ColumnTable) -> Self {
        let pending = schedule(&expr);
        Self { expr, table, pending }
    }

    pub fn state(&self) -> ReducerState {
        if self.result().is_some() {
            ReducerState::Done
        } else {
            ReducerState::Reducing
        }
    }

    /// The current expression buffer.
    pub fn expression(&self) -> String {
        self.expr.to_string()
    }

    pub fn table(&self) -> &ColumnTable {
        &self.table
    }

    pub fn into_table(self) -> ColumnTable {
        self.table
    }

    /// Number of steps left until [`ReducerState::Done`].
    pub fn remaining(&self) -> usize {
        self.pending.len()
    }

    /// The single reference the expression has collapsed to, once done.
    pub fn result(&self) -> Option<Operand> {
        self.expr.operand(self.expr.root())
    }

    fn operand(&self, idx: Idx, op: Op) -> Result<Operand> {
        self.expr.operand(idx).ok_or_else(|| {
            Error::Internal(format!(
                "operand of `{}` at position {} is not reduced",
                op,
                self.expr.site(idx).position
            ))
        })
    }

    /// Performs one reduction step.
    ///
    /// Returns `None` when the expression is already reduced to a single reference.
    pub fn step(&mut self) -> Result<Option<Step>> {
        let idx = match self.pending.pop_front() {
            Some(idx) => idx,
            None if self.state() == ReducerState::Done => return Ok(None),
            None => {
                return Err(Error::Internal(format!(
                    "nothing left to reduce in `{}`",
                    self.expression()
                )))
            }
        };

        let (op, operands) = match *self.expr.get(idx) {
            Node::Not(a) => (Op::Not, vec![self.operand(a, Op::Not)?]),
            Node::Binary(op, a, b) => (op, vec![self.operand(a, op)?, self.operand(b, op)?]),
            other => {
                return Err(Error::Internal(format!(
                    "scheduled node is not an operator: {:?}",
                    other
                )))
            }
        };
        let scope = self.expr.site(idx).scope;

        let column = self.table.create_derived_column(op, &operands)?;
        self.expr.replace_with_column(idx, column);

        let key = self.table.get(column.into())?.key().to_string();
        let expression = self.expression();
        debug!("step(scope = {:?}, op = {}): {} => {}", scope, op, key, expression);

        Ok(Some(Step {
            op,
            operands,
            scope,
            column,
            key,
            expression,
        }))
    }

    /// Reduces the expression to completion.
    ///
    /// Returns the performed steps and the final reference.
    pub fn run(&mut self) -> Result<(Vec<Step>, Operand)> {
        let mut steps = Vec::with_capacity(self.remaining());
        while let Some(step) = self.step()? {
            steps.push(step);
        }
        let result = self.result().ok_or_else(|| {
            Error::Internal(format!("expression `{}` did not collapse", self.expression()))
        })?;
        Ok((steps, result))
    }
}
