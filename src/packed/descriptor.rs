//! # Row Descriptor
//!
//! This module provides the `RowDescriptor`: the ordered column schema built
//! once per result set and shared read-only by every row encoded or decoded
//! against it. The descriptor pre-computes the fixed/variable partition that
//! drives the codec.
//!
//! ## Descriptor Internals
//!
//! - `columns`: ordered column definitions, positional and never re-sorted
//! - `fixed_indices`: column positions of fixed-width columns (bitmask order)
//! - `var_indices`: column positions of variable-length columns (variable
//!   region order)
//! - `by_name`: name to first-position lookup

use std::sync::Arc;

use hashbrown::HashMap;

use crate::error::{Result, RowError};
use crate::source::ColumnMeta;
use crate::types::FieldType;

/// Name and wire type of one descriptor column.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDef {
    pub name: String,
    pub field_type: FieldType,
}

impl ColumnDef {
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
        }
    }
}

/// Ordered column schema for one result set.
///
/// Immutable after construction; share it across rows with [`Arc`].
#[derive(Debug, Clone, PartialEq)]
pub struct RowDescriptor {
    columns: Vec<ColumnDef>,
    fixed_indices: Vec<usize>,
    var_indices: Vec<usize>,
    by_name: HashMap<String, usize>,
}

impl RowDescriptor {
    pub fn new(columns: Vec<ColumnDef>) -> Self {
        let mut fixed_indices = Vec::new();
        let mut var_indices = Vec::new();
        let mut by_name = HashMap::with_capacity(columns.len());

        for (idx, col) in columns.iter().enumerate() {
            if col.field_type.is_variable() {
                var_indices.push(idx);
            } else {
                fixed_indices.push(idx);
            }
            by_name.entry(col.name.clone()).or_insert(idx);
        }

        Self {
            columns,
            fixed_indices,
            var_indices,
            by_name,
        }
    }

    /// Builds a descriptor from external column metadata, mapping each
    /// native type to exactly one wire type. A native type with no wire
    /// mapping fails the whole descriptor.
    pub fn from_source_columns(meta: &[ColumnMeta]) -> Result<Self> {
        let mut columns = Vec::with_capacity(meta.len());
        for col in meta {
            let field_type = col
                .source_type
                .field_type()
                .ok_or_else(|| RowError::unsupported(&col.name, col.source_type.name()))?;
            columns.push(ColumnDef::new(col.name.clone(), field_type));
        }
        Ok(Self::new(columns))
    }

    /// Convenience for building a shared descriptor in one step.
    pub fn shared(columns: Vec<ColumnDef>) -> Arc<Self> {
        Arc::new(Self::new(columns))
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[ColumnDef] {
        &self.columns
    }

    pub fn column(&self, idx: usize) -> Option<&ColumnDef> {
        self.columns.get(idx)
    }

    /// Returns the position of the first column with the given name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }

    /// Wire types of all columns, in descriptor order.
    pub fn field_types(&self) -> impl Iterator<Item = FieldType> + '_ {
        self.columns.iter().map(|col| col.field_type)
    }

    /// Column positions of fixed-width columns, in bitmask order.
    pub fn fixed_columns(&self) -> &[usize] {
        &self.fixed_indices
    }

    /// Column positions of variable-length columns, in variable region order.
    pub fn var_columns(&self) -> &[usize] {
        &self.var_indices
    }

    /// Bitmask size in bytes for the given fixed-width column count.
    pub fn bitmask_size(fixed_count: usize) -> usize {
        fixed_count.div_ceil(8)
    }

    /// Bitmask size in bytes for this descriptor.
    pub fn bitmask_len(&self) -> usize {
        Self::bitmask_size(self.fixed_indices.len())
    }
}
