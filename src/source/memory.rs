//! In-memory [`RowSource`] over pre-built rows. Used by tests and as a
//! reference implementation for cursor adapters.

use eyre::{ensure, Result};

use crate::source::{ColumnMeta, RowSource, SourceValue};

/// A result set held entirely in memory.
///
/// Rows are `Option<SourceValue>` cells, `None` meaning SQL null. The
/// cursor starts before the first row, exactly like a driver cursor.
#[derive(Debug, Clone)]
pub struct MemorySource {
    columns: Vec<ColumnMeta>,
    rows: Vec<Vec<Option<SourceValue>>>,
    current: Option<usize>,
}

impl MemorySource {
    pub fn new(columns: Vec<ColumnMeta>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
            current: None,
        }
    }

    /// Appends one row. The cell count must match the column count.
    pub fn push_row(&mut self, row: Vec<Option<SourceValue>>) -> Result<()> {
        ensure!(
            row.len() == self.columns.len(),
            "row has {} cells, result set has {} columns",
            row.len(),
            self.columns.len()
        );
        self.rows.push(row);
        Ok(())
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn current_row(&self) -> Result<&Vec<Option<SourceValue>>> {
        let idx = self
            .current
            .ok_or_else(|| eyre::eyre!("cursor is not positioned on a row"))?;
        Ok(&self.rows[idx])
    }
}

impl RowSource for MemorySource {
    fn columns(&self) -> Result<Vec<ColumnMeta>> {
        Ok(self.columns.clone())
    }

    fn advance(&mut self) -> Result<bool> {
        let next = match self.current {
            None => 0,
            Some(idx) => idx + 1,
        };
        if next < self.rows.len() {
            self.current = Some(next);
            Ok(true)
        } else {
            self.current = None;
            Ok(false)
        }
    }

    fn is_null(&self, idx: usize) -> bool {
        self.current_row()
            .map(|row| row[idx].is_none())
            .unwrap_or(true)
    }

    fn value(&self, idx: usize) -> Result<SourceValue> {
        let row = self.current_row()?;
        row[idx]
            .clone()
            .ok_or_else(|| eyre::eyre!("column {} of current row is null", idx))
    }
}
