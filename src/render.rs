//! Truth table rendering.
//!
//! The [`ColumnTable`] is rendered as a grid with one column per key, in
//! insertion order, and one row per assignment. Cells hold `0` or `1`.
//!
//! # Examples
//!
//! ```
//! use booltable::render::{to_table, RenderConfig, TablePreset};
//! use booltable::TruthTable;
//!
//! let tt = TruthTable::from_expression("a and b").unwrap();
//! let config = RenderConfig {
//!     preset: TablePreset::Markdown,
//!     result_only: false,
//! };
//! let grid = to_table(tt.columns(), &config).to_string();
//! assert!(grid.contains("a and b (0)"));
//! ```

use comfy_table::presets::{ASCII_FULL, ASCII_MARKDOWN, UTF8_FULL};
use comfy_table::{Attribute, Cell, CellAlignment, Table};

use crate::table::{Column, ColumnKind, ColumnTable};

/// Border style of the rendered table.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum TablePreset {
    #[default]
    Utf8,
    Ascii,
    Markdown,
}

impl TablePreset {
    fn as_str(self) -> &'static str {
        match self {
            TablePreset::Utf8 => UTF8_FULL,
            TablePreset::Ascii => ASCII_FULL,
            TablePreset::Markdown => ASCII_MARKDOWN,
        }
    }
}

/// Configuration options for table rendering.
///
/// Use `RenderConfig::default()` for a full UTF-8 table with every column.
#[derive(Debug, Clone, Default)]
pub struct RenderConfig {
    /// Border style (default: UTF-8 box drawing)
    pub preset: TablePreset,
    /// Show only the variable columns and the last column (default: false)
    pub result_only: bool,
}

fn selected_columns<'a>(table: &'a ColumnTable, config: &RenderConfig) -> Vec<&'a Column> {
    if !config.result_only {
        return table.iter().collect();
    }
    let mut columns: Vec<&Column> = table
        .iter()
        .filter(|c| matches!(c.kind(), ColumnKind::Variable(_)))
        .collect();
    if let Some(last) = table.last() {
        if last.id().is_some() {
            columns.push(last);
        }
    }
    columns
}

fn header_cell(text: &str) -> Cell {
    Cell::new(text).add_attribute(Attribute::Bold)
}

fn value_cell(value: bool) -> Cell {
    Cell::new(u8::from(value)).set_alignment(CellAlignment::Center)
}

pub fn to_table(table: &ColumnTable, config: &RenderConfig) -> Table {
    let columns = selected_columns(table, config);

    let mut grid = Table::new();
    grid.load_preset(config.preset.as_str());
    grid.set_header(columns.iter().map(|c| header_cell(c.key())).collect::<Vec<_>>());
    for row in 0..table.rows() {
        grid.add_row(columns.iter().map(|c| value_cell(c[row])).collect::<Vec<_>>());
    }
    grid
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::ops::Op;
    use crate::types::{Operand, Var};
    use crate::vars::enumerate_assignments;

    fn sample() -> ColumnTable {
        let mut table = ColumnTable::new();
        let (a, b) = (Var::new('a'), Var::new('b'));
        table.create_variable_columns(&[a, b], &enumerate_assignments(2)).unwrap();
        let c0 = table.create_derived_column(Op::Or, &[a.into(), b.into()]).unwrap();
        table.create_derived_column(Op::Not, &[Operand::Column(c0)]).unwrap();
        table
    }

    fn header(grid: &Table) -> Vec<String> {
        grid.header()
            .map(|row| row.cell_iter().map(|c| c.content()).collect())
            .unwrap_or_default()
    }

    #[test]
    fn test_full_table() {
        let grid = to_table(&sample(), &RenderConfig::default());
        assert_eq!(header(&grid), vec!["a", "b", "a or b (0)", "not 0 (1)"]);
        assert_eq!(grid.row_iter().count(), 4);
    }

    #[test]
    fn test_result_only() {
        let config = RenderConfig {
            result_only: true,
            ..RenderConfig::default()
        };
        let grid = to_table(&sample(), &config);
        assert_eq!(header(&grid), vec!["a", "b", "not 0 (1)"]);
    }

    #[test]
    fn test_cells_are_binary() {
        let config = RenderConfig {
            preset: TablePreset::Markdown,
            result_only: false,
        };
        let grid = to_table(&sample(), &config);
        let last_row: Vec<String> = grid
            .row_iter()
            .last()
            .map(|row| row.cell_iter().map(|c| c.content()).collect())
            .unwrap_or_default();
        assert_eq!(last_row, vec!["1", "1", "1", "0"]);
    }

    #[test]
    fn test_display_uses_default_config() {
        let table = sample();
        let rendered = table.to_string();
        assert!(rendered.contains("a or b (0)"));
        assert!(rendered.contains('│'));
    }
}
