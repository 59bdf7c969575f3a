//! # Packed Row Encoding with Zero-Suppression
//!
//! This module provides the packed-row wire format: a compact, typed,
//! self-describing binary encoding of one tabular row, driven by an
//! immutable per-result-set descriptor.
//!
//! ## Row Binary Layout
//!
//! ```text
//! +------------------+---------------------------+----------------------------+
//! | Bitmask          | Fixed Region              | Variable Region            |
//! | [u8; ceil(F/8)]  | present values, in order  | (u32 len + payload)*       |
//! +------------------+---------------------------+----------------------------+
//! ```
//!
//! | Component | Description |
//! |-----------|-------------|
//! | **Bitmask** | 1 bit per fixed-width column, descriptor order. `1` = present, `0` = suppressed (zero/false/null) |
//! | **Fixed Region** | Concatenated little-endian bytes of every present fixed-width column |
//! | **Variable Region** | For every variable-length column, in descriptor order, unconditionally: `u32` length prefix + payload |
//!
//! ## Wire Constants
//!
//! These are fixed by the format and must match between any two
//! implementations meant to interoperate:
//!
//! | Constant | Value |
//! |----------|-------|
//! | Fixed-width byte order | little-endian |
//! | Bitmask bit order | bit `i % 8` (LSB-first) of byte `i / 8` for fixed column `i` |
//! | Length prefix | `u32`, little-endian, byte count |
//! | `Text` encoding | UTF-8 |
//! | `WideText` encoding | UTF-16LE |
//!
//! `Bool` columns occupy a bitmask bit and nothing else: a set bit decodes
//! to true, a clear bit to false.
//!
//! ## Lossy Null Collapse
//!
//! A suppressed fixed-width column and a variable-length column written
//! from a null source both decode to the zero/empty value of their type. A
//! consumer cannot distinguish a source null from a genuine zero, false, or
//! empty string. Downstream models depend on this collapse; it is part of
//! the format contract.
//!
//! ## Module Structure
//!
//! - `descriptor`: `RowDescriptor` and `ColumnDef`
//! - `row`: `PackedRow` encode/decode
//! - `batch`: `PackedRowBatch` built from a row source

pub mod batch;
pub mod descriptor;
pub mod row;


pub use batch::PackedRowBatch;
pub use descriptor::{ColumnDef, RowDescriptor};
pub use row::PackedRow;
