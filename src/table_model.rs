//! Grid access over a bound [`StatTable`]
//!
//! Both the terminal table widget and the `stats` command read the table
//! through this type only, so they agree on labels and stringification.

use std::sync::Arc;

use crate::stats::{StatTable, COLUMNS};

#[derive(Debug, Clone, PartialEq)]
pub struct TableViewModel {
    table: Arc<StatTable>,
}

impl TableViewModel {
    pub fn new(table: StatTable) -> Self {
        Self { table: Arc::new(table) }
    }

    pub fn table(&self) -> &StatTable {
        &self.table
    }

    pub fn row_count(&self) -> usize {
        self.table.row_count()
    }

    pub fn column_count(&self) -> usize {
        COLUMNS.len()
    }

    /// Stringified value; `None` outside the grid
    pub fn cell(&self, row: usize, col: usize) -> Option<String> {
        self.table.get(row)?.value(col)
    }

    pub fn column_label(&self, col: usize) -> Option<&'static str> {
        COLUMNS.get(col).copied()
    }

    /// Row header: the team the table is indexed by
    pub fn row_label(&self, row: usize) -> Option<&str> {
        (row < self.row_count()).then(|| self.table.team())
    }

    /// All cells of one row, in column order
    pub fn row_cells(&self, row: usize) -> Option<Vec<String>> {
        let r = self.table.get(row)?;
        (0..self.column_count()).map(|c| r.value(c)).collect()
    }

    /// Widest value per column, header included
    pub fn column_widths(&self) -> Vec<usize> {
        use unicode_width::UnicodeWidthStr;

        (0..self.column_count())
            .map(|col| {
                let header = COLUMNS[col].width();
                (0..self.row_count())
                    .filter_map(|row| self.cell(row, col))
                    .map(|v| v.width())
                    .fold(header, usize::max)
            })
            .collect()
    }
}
