//! # Typed Column Values
//!
//! This module provides `Value<'a>`, the typed representation of one decoded
//! or to-be-encoded column. Text and byte variants use `Cow` so that decoding
//! can borrow directly from a packed row's buffer while coercion from an
//! external source produces owned data.
//!
//! ## Variants
//!
//! | Variant | Rust Type | Declared types |
//! |---------|-----------|----------------|
//! | Int | i64 | Int8, Int4, Int2, Int1, Currency, Timestamp |
//! | UInt | u64 | UInt8, UInt4, UInt2, UInt1 |
//! | Float | f64 | Float8, Float4 |
//! | Bool | bool | Bool |
//! | Bytes | Cow<[u8]> | Bytes |
//! | Text | Cow<str> | Text, WideText |
//!
//! There is no null variant: a null source value is normalized to the zero
//! or empty value of its declared type before it reaches the codec, and a
//! decoded zero/empty is indistinguishable from a source null. This collapse
//! is an intentional, documented property of the format.

use std::borrow::Cow;

use crate::types::FieldType;

/// Typed value of one column.
#[derive(Debug, Clone, PartialEq)]
pub enum Value<'a> {
    Int(i64),
    UInt(u64),
    Float(f64),
    Bool(bool),
    Bytes(Cow<'a, [u8]>),
    Text(Cow<'a, str>),
}

impl<'a> Value<'a> {
    /// Returns the zero/empty value a null source collapses into for the
    /// given declared type.
    pub fn zero_of(field_type: FieldType) -> Value<'static> {
        match field_type {
            FieldType::Int8
            | FieldType::Int4
            | FieldType::Int2
            | FieldType::Int1
            | FieldType::Currency
            | FieldType::Timestamp => Value::Int(0),
            FieldType::UInt8 | FieldType::UInt4 | FieldType::UInt2 | FieldType::UInt1 => {
                Value::UInt(0)
            }
            FieldType::Float8 | FieldType::Float4 => Value::Float(0.0),
            FieldType::Bool => Value::Bool(false),
            FieldType::Bytes => Value::Bytes(Cow::Borrowed(&[])),
            FieldType::Text | FieldType::WideText => Value::Text(Cow::Borrowed("")),
        }
    }

    /// Returns true if this value is elided from the fixed region by
    /// zero-suppression. Floats are tested by bit pattern so that `-0.0`
    /// survives a round trip; variable-length values are never suppressed.
    pub fn is_suppressed(&self) -> bool {
        match self {
            Value::Int(i) => *i == 0,
            Value::UInt(u) => *u == 0,
            Value::Float(f) => f.to_bits() == 0,
            Value::Bool(b) => !*b,
            Value::Bytes(_) | Value::Text(_) => false,
        }
    }

    /// Returns the variant name, used in error reporting.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Int(_) => "Int",
            Value::UInt(_) => "UInt",
            Value::Float(_) => "Float",
            Value::Bool(_) => "Bool",
            Value::Bytes(_) => "Bytes",
            Value::Text(_) => "Text",
        }
    }

    /// Clones this value to a fully-owned static lifetime, detaching it from
    /// any packed-row buffer it borrows from.
    pub fn to_owned_static(&self) -> Value<'static> {
        match self {
            Value::Int(i) => Value::Int(*i),
            Value::UInt(u) => Value::UInt(*u),
            Value::Float(f) => Value::Float(*f),
            Value::Bool(b) => Value::Bool(*b),
            Value::Bytes(b) => Value::Bytes(Cow::Owned(b.to_vec())),
            Value::Text(s) => Value::Text(Cow::Owned(s.to_string())),
        }
    }
}
