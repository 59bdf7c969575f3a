//! # Packed Row Batches
//!
//! One batch per result set: the shared descriptor plus every row of the
//! set, packed in cursor order. A batch is built in one pass over a
//! forward-only source; any descriptor, coercion, or cursor error aborts
//! the whole build and no partially built batch escapes.

use std::sync::Arc;

use crate::error::{Result, RowError};
use crate::packed::{PackedRow, RowDescriptor};
use crate::source::RowSource;

/// Ordered sequence of packed rows sharing one descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct PackedRowBatch {
    descriptor: Arc<RowDescriptor>,
    rows: Vec<PackedRow>,
}

impl PackedRowBatch {
    pub fn new(descriptor: Arc<RowDescriptor>) -> Self {
        Self {
            descriptor,
            rows: Vec::new(),
        }
    }

    /// Builds the descriptor from the source's column metadata, then packs
    /// every row of the result set in order. An empty result set yields an
    /// empty batch with a valid descriptor.
    pub fn from_source<S: RowSource + ?Sized>(source: &mut S) -> Result<Self> {
        let columns = source.columns()?;
        let descriptor = Arc::new(RowDescriptor::from_source_columns(&columns)?);
        let mut batch = Self::new(Arc::clone(&descriptor));

        while source.advance()? {
            let row = PackedRow::from_source_row(source, Arc::clone(&descriptor))?;
            tracing::trace!(
                "packed row {} ({} bytes)",
                batch.rows.len(),
                row.as_bytes().len()
            );
            batch.rows.push(row);
        }

        tracing::debug!(
            "packed result set: {} rows x {} columns",
            batch.rows.len(),
            descriptor.column_count()
        );
        Ok(batch)
    }

    /// Appends a separately encoded row. The row must share this batch's
    /// descriptor.
    pub fn push(&mut self, row: PackedRow) -> Result<()> {
        if !Arc::ptr_eq(&self.descriptor, row.descriptor())
            && *row.descriptor().as_ref() != *self.descriptor
        {
            return Err(RowError::mismatch(
                "row was encoded against a different descriptor".to_string(),
            ));
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn descriptor(&self) -> &Arc<RowDescriptor> {
        &self.descriptor
    }

    pub fn rows(&self) -> &[PackedRow] {
        &self.rows
    }

    pub fn get(&self, idx: usize) -> Option<&PackedRow> {
        self.rows.get(idx)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PackedRow> {
        self.rows.iter()
    }
}

impl IntoIterator for PackedRowBatch {
    type Item = PackedRow;
    type IntoIter = std::vec::IntoIter<PackedRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

impl<'a> IntoIterator for &'a PackedRowBatch {
    type Item = &'a PackedRow;
    type IntoIter = std::slice::Iter<'a, PackedRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
