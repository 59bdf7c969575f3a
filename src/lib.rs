//! # rowpack - Zero-Suppressed Packed Rows
//!
//! rowpack converts tabular result sets from an external relational source
//! into a compact, typed, self-describing binary row representation for a
//! higher-level dynamic object model. This implementation prioritizes:
//!
//! - **Compactness**: fixed-width columns equal to their type's zero are
//!   elided behind a one-bit-per-column bitmask
//! - **Zero-copy reads**: decoded text and byte values borrow directly from
//!   the row buffer
//! - **Shared schemas**: one immutable descriptor per result set, borrowed
//!   by every row operation
//!
//! ## Quick Start
//!
//! ```ignore
//! use rowpack::{PackedRowBatch, RowSource};
//!
//! let mut cursor = open_result_set()?; // any RowSource implementation
//! let batch = PackedRowBatch::from_source(&mut cursor)?;
//!
//! for row in &batch {
//!     let values = row.values()?;
//!     // hand values to the object model
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! result set (external cursor)
//!       │
//!       ▼
//! ┌─────────────────────────────────────┐
//! │  source: RowSource / coercion        │
//! ├─────────────────────────────────────┤
//! │  packed: RowDescriptor (built once)  │
//! │          PackedRow encode/decode     │
//! │          PackedRowBatch              │
//! ├─────────────────────────────────────┤
//! │  types: FieldType catalog, Value     │
//! └─────────────────────────────────────┘
//! ```
//!
//! ## Module Overview
//!
//! - [`types`]: wire type catalog and typed column values
//! - [`packed`]: descriptor, row codec, batch builder
//! - [`source`]: external cursor abstraction and value coercion
//! - [`error`]: the closed error taxonomy

pub mod error;
pub mod packed;
pub mod source;
pub mod types;

pub use error::{Result, RowError};
pub use packed::{ColumnDef, PackedRow, PackedRowBatch, RowDescriptor};
pub use source::{coerce, ColumnMeta, MemorySource, RowSource, SourceType, SourceValue};
pub use types::{FieldType, Value};
