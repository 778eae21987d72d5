use std::collections::HashMap;
use std::fmt::{self, Display, Formatter};
use std::ops::Index;

use log::debug;

use crate::error::{Error, Result};
use crate::ops::{self, Op};
use crate::render::{to_table, RenderConfig};
use crate::types::{ColumnId, Operand, Var};
use crate::vars::Assignment;

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum ColumnKind {
    /// Values copied from the assignments.
    Variable(Var),
    /// Values computed by one operator from one or two existing columns.
    Derived { id: ColumnId, op: Op, operands: Vec<Operand> },
}

/// A named sequence of truth values, one per assignment row.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Column {
    key: String,
    kind: ColumnKind,
    values: Vec<bool>,
}

impl Column {
    /// Get the display key of the column.
    pub fn key(&self) -> &str {
        &self.key
    }
    /// Get the kind of the column.
    pub fn kind(&self) -> &ColumnKind {
        &self.kind
    }
    /// Get the values, in assignment order.
    pub fn values(&self) -> &[bool] {
        &self.values
    }

    /// Get the identifier of a derived column.
    pub fn id(&self) -> Option<ColumnId> {
        match self.kind {
            ColumnKind::Derived { id, .. } => Some(id),
            ColumnKind::Variable(_) => None,
        }
    }
}

impl Index<usize> for Column {
    type Output = bool;

    fn index(&self, row: usize) -> &Self::Output {
        &self.values[row]
    }
}

/// Renders the key of a derived column, e.g. `a and b (1)` or `not 0 (2)`.
pub fn derived_key(op: Op, operands: &[Operand], id: ColumnId) -> String {
    match operands {
        [x] => format!("{} {} ({})", op, x, id),
        [x, y] => format!("{} {} {} ({})", x, op, y, id),
        _ => format!("{} ({})", op, id),
    }
}

/// Insertion-ordered collection of truth-table columns.
///
/// Insertion order is display order: variable columns first, then derived
/// columns in creation order. Keys are unique at all times.
#[derive(Debug, Default, Clone)]
pub struct ColumnTable {
    columns: Vec<Column>,
    by_key: HashMap<String, usize>,
    by_var: HashMap<Var, usize>,
    by_id: HashMap<ColumnId, usize>,
    /// Next identifier to hand out to a derived column.
    next_id: ColumnId,
    rows: usize,
}

impl ColumnTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
    /// Number of assignment rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Column> {
        self.columns.iter()
    }
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.key())
    }
    /// The most recently created column.
    pub fn last(&self) -> Option<&Column> {
        self.columns.last()
    }

    fn insert(&mut self, column: Column) -> Result<usize> {
        if self.by_key.contains_key(&column.key) {
            return Err(Error::DuplicateKey { key: column.key });
        }
        let index = self.columns.len();
        self.by_key.insert(column.key.clone(), index);
        match column.kind {
            ColumnKind::Variable(var) => {
                self.by_var.insert(var, index);
            }
            ColumnKind::Derived { id, .. } => {
                self.by_id.insert(id, index);
            }
        }
        self.columns.push(column);
        Ok(index)
    }

    /// Create one column per variable, the `i`-th variable taking its values
    /// from position `i` of every assignment.
    pub fn create_variable_columns(&mut self, vars: &[Var], assignments: &[Assignment]) -> Result<()> {
        if !self.columns.is_empty() && self.rows != assignments.len() {
            return Err(Error::Internal(format!(
                "table has {} rows, got {} assignments",
                self.rows,
                assignments.len()
            )));
        }
        self.rows = assignments.len();

        for (i, &var) in vars.iter().enumerate() {
            let values = assignments.iter().map(|a| a.get(i)).collect();
            debug!("create_variable_column({})", var);
            self.insert(Column {
                key: var.to_string(),
                kind: ColumnKind::Variable(var),
                values,
            })?;
        }
        Ok(())
    }

    /// Create a derived column by applying `op` row by row to the operand columns.
    ///
    /// Returns the identifier of the new column.
    pub fn create_derived_column(&mut self, op: Op, operands: &[Operand]) -> Result<ColumnId> {
        if operands.len() != op.arity() {
            return Err(Error::Internal(format!(
                "`{}` expects {} operand(s), got {}",
                op,
                op.arity(),
                operands.len()
            )));
        }

        let values = match operands {
            [x] => Some(ops::not(self.get(*x)?.values())),
            [x, y] => ops::zip_with(op, self.get(*x)?.values(), self.get(*y)?.values()),
            _ => None,
        };
        let values = values.ok_or_else(|| {
            Error::Internal(format!("cannot apply `{}` to {:?}", op, operands))
        })?;

        let id = self.next_id;
        let key = derived_key(op, operands, id);
        debug!("create_derived_column: {}", key);
        self.insert(Column {
            key,
            kind: ColumnKind::Derived {
                id,
                op,
                operands: operands.to_vec(),
            },
            values,
        })?;
        self.next_id = id.next();
        Ok(id)
    }

    /// Get the column an operand refers to.
    pub fn get(&self, operand: Operand) -> Result<&Column> {
        let index = match operand {
            Operand::Var(var) => self.by_var.get(&var),
            Operand::Column(id) => self.by_id.get(&id),
        };
        index.map(|&i| &self.columns[i]).ok_or_else(|| Error::NotFound {
            key: operand.to_string(),
        })
    }

    /// Look up a column by its full key, or a derived column by its bare
    /// identifier (the form used inside an expression buffer).
    ///
    /// Fails when the key matches no column, or when it is both the key of one
    /// column and the identifier of another.
    pub fn lookup(&self, key: &str) -> Result<&Column> {
        let by_key = self.by_key.get(key).copied();
        let by_id = key
            .trim()
            .parse::<u32>()
            .ok()
            .and_then(|id| self.by_id.get(&ColumnId::new(id)).copied());
        match (by_key, by_id) {
            (Some(i), None) | (None, Some(i)) => Ok(&self.columns[i]),
            (Some(i), Some(j)) if i == j => Ok(&self.columns[i]),
            _ => Err(Error::NotFound { key: key.to_string() }),
        }
    }

    /// Rename the column currently known as `key`.
    pub fn rename(&mut self, key: &str, new_key: impl Into<String>) -> Result<()> {
        let new_key = new_key.into();
        let index = match self.by_key.get(key) {
            Some(&i) => i,
            None => return Err(Error::NotFound { key: key.to_string() }),
        };
        if new_key == key {
            return Ok(());
        }
        if self.by_key.contains_key(&new_key) {
            return Err(Error::DuplicateKey { key: new_key });
        }
        debug!("rename({} -> {})", key, new_key);
        self.by_key.remove(key);
        self.by_key.insert(new_key.clone(), index);
        self.columns[index].key = new_key;
        Ok(())
    }
}

impl<'a> IntoIterator for &'a ColumnTable {
    type Item = &'a Column;
    type IntoIter = std::slice::Iter<'a, Column>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Display for ColumnTable {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", to_table(self, &RenderConfig::default()))
    }
}
