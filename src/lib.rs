//! # booltable: truth tables for propositional logic
//!
//! **`booltable`** reads a propositional-logic expression over single-letter variables and
//! produces its full truth table: one row per assignment of the variables, one column per
//! sub-expression evaluated along the way, and a final column holding the value of the
//! whole expression.
//!
//! ## Expression language
//!
//! | Token | Operator    |
//! |-------|-------------|
//! | `not` | negation    |
//! | `and` | conjunction |
//! | `or`  | disjunction |
//! | `<=`  | implication |
//! | `==`  | equivalence |
//!
//! Variables are single ASCII letters. Parentheses group sub-expressions. Whitespace is
//! insignificant. Operators bind in the order listed above, `not` being the tightest.
//!
//! ## How it works
//!
//! The expression is reduced step by step. Each step picks the next sub-expression
//! (innermost parentheses first, then by operator priority), computes its column of
//! truth values against all assignments, and replaces it with a reference to that column.
//! Reduction stops when the expression has collapsed into a single reference.
//!
//! ## Basic Usage
//!
//! ```rust
//! use booltable::TruthTable;
//!
//! let tt = TruthTable::from_expression("(a and b) or (not a)").unwrap();
//!
//! // Rows are (a, b) = (0, 0), (0, 1), (1, 0), (1, 1).
//! assert_eq!(tt.assignments().len(), 4);
//! assert_eq!(tt.result().key(), "1 or 0 (2)");
//! assert_eq!(tt.result().values(), &[true, true, false, true]);
//!
//! println!("{}", tt);
//! ```
//!
//! ## Core Components
//!
//! - **[`vars`]**: variable extraction and assignment enumeration.
//! - **[`table`]**: the [`ColumnTable`][crate::table::ColumnTable], owner of all columns.
//! - **[`ops`]**: operator semantics and the operator legend.
//! - **[`reduce`]**: the step-wise [`Reducer`][crate::reduce::Reducer].
//! - **[`render`]**: terminal rendering of the table.

pub mod ast;
pub mod error;
pub mod lexer;
pub mod ops;
pub mod reduce;
pub mod render;
pub mod table;
pub mod truth_table;
pub mod types;
pub mod vars;

pub use error::{Error, FormatError, Result};
pub use truth_table::TruthTable;
