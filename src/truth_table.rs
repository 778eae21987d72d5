use std::fmt::{self, Display, Formatter};

use log::info;

use crate::ast::ExprArena;
use crate::error::Result;
use crate::reduce::{Reducer, Step};
use crate::render::{to_table, RenderConfig};
use crate::table::{Column, ColumnTable};
use crate::types::{Operand, Var};
use crate::vars::{enumerate_assignments, extract_variables, Assignment};

/// A fully reduced truth table.
#[derive(Debug, Clone)]
pub struct TruthTable {
    expression: String,
    variables: Vec<Var>,
    assignments: Vec<Assignment>,
    columns: ColumnTable,
    steps: Vec<Step>,
    result: Operand,
}

impl TruthTable {
    /// Builds the truth table of `input`.
    ///
    /// The expression is validated first; nothing is evaluated for malformed input.
    pub fn from_expression(input: &str) -> Result<Self> {
        let variables = extract_variables(input)?;
        let expr = ExprArena::parse(input)?;
        let expression = expr.to_string();

        let assignments = enumerate_assignments(variables.len());
        let mut columns = ColumnTable::new();
        columns.create_variable_columns(&variables, &assignments)?;
        info!(
            "Reducing `{}`: {} variable(s), {} row(s), {} operator(s)",
            expression,
            variables.len(),
            assignments.len(),
            expr.count_operators()
        );

        let mut reducer = Reducer::new(expr, columns);
        let (steps, result) = reducer.run()?;
        info!("Reduced `{}` in {} step(s) to {}", expression, steps.len(), result);

        Ok(Self {
            expression,
            variables,
            assignments,
            columns: reducer.into_table(),
            steps,
            result,
        })
    }

    /// The input expression with whitespace normalized.
    pub fn expression(&self) -> &str {
        &self.expression
    }
    pub fn variables(&self) -> &[Var] {
        &self.variables
    }
    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }
    pub fn columns(&self) -> &ColumnTable {
        &self.columns
    }
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// The column holding the value of the whole expression.
    pub fn result(&self) -> &Column {
        self.columns
            .get(self.result)
            .expect("result column is always registered")
    }

    /// Renames the result column, e.g. to `F`.
    pub fn rename_result(&mut self, name: impl Into<String>) -> Result<()> {
        let key = self.result().key().to_string();
        self.columns.rename(&key, name)
    }

    pub fn render(&self, config: &RenderConfig) -> comfy_table::Table {
        to_table(&self.columns, config)
    }
}

impl Display for TruthTable {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.columns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    use crate::error::{Error, FormatError};

    #[test]
    fn test_from_expression() {
        let tt = TruthTable::from_expression("a <= (b or c)").unwrap();
        assert_eq!(tt.expression(), "a <= (b or c)");
        assert_eq!(tt.variables().len(), 3);
        assert_eq!(tt.assignments().len(), 8);
        assert_eq!(tt.steps().len(), 2);
        assert_eq!(tt.result().key(), "a <= 0 (1)");
        assert_eq!(
            tt.result().values(),
            &[true, true, true, true, false, true, true, true]
        );
    }

    #[test]
    fn test_single_variable_result() {
        let tt = TruthTable::from_expression("(p)").unwrap();
        assert!(tt.steps().is_empty());
        assert_eq!(tt.result().key(), "p");
        assert_eq!(tt.result().values(), &[false, true]);
    }

    #[test]
    fn test_rename_result() {
        let mut tt = TruthTable::from_expression("a or b").unwrap();
        tt.rename_result("F").unwrap();
        assert_eq!(tt.result().key(), "F");
        assert_eq!(tt.columns().keys().collect::<Vec<_>>(), vec!["a", "b", "F"]);
        assert_eq!(tt.rename_result("a"), Err(Error::DuplicateKey { key: "a".to_string() }));
    }

    #[test]
    fn test_rejects_malformed() {
        assert_eq!(
            TruthTable::from_expression("(a or b").unwrap_err(),
            Error::Format(FormatError::UnbalancedParentheses { open: 1, close: 0 })
        );
        assert!(matches!(
            TruthTable::from_expression("a or 2"),
            Err(Error::Format(FormatError::InvalidCharacter { ch: '2', .. }))
        ));
        assert!(matches!(
            TruthTable::from_expression("a and b and c and d and e and f and g and h and i and j and k and l and m and n and o and p and q and r and s and t and u"),
            Err(Error::Format(FormatError::TooManyVariables { count: 21, .. }))
        ));
    }
}
