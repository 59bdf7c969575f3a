//! # Value Coercion
//!
//! Maps one native column value onto the typed variant its declared wire
//! type demands. Null handling is deterministic: a null source always
//! becomes the zero/empty value of the declared type, so a null boolean and
//! a false boolean, or a null string and an empty string, are
//! indistinguishable downstream. That collapse is part of the format
//! contract, not a defect.
//!
//! Width adjustments follow two's-complement casts: a 64-bit source value
//! destined for an `Int1` column is narrowed through `i8`, an unsigned
//! source may feed a signed column and vice versa. `Currency` and
//! `Timestamp` accept integer sources as already-scaled fixed-point and
//! tick counts; no rescaling happens here.
//!
//! Any pairing outside the rules below is a hard `UnsupportedColumnType`
//! error. There is no best-effort default for a value the catalog cannot
//! represent.

use std::borrow::Cow;

use crate::error::{Result, RowError};
use crate::source::SourceValue;
use crate::types::{FieldType, Value};

/// Coerces one native column value (or null) to its declared wire type.
///
/// Pure transform, invoked once per (row, column). The column name is only
/// used to contextualize errors.
pub fn coerce(
    value: Option<&SourceValue>,
    declared: FieldType,
    column: &str,
) -> Result<Value<'static>> {
    let Some(value) = value else {
        return Ok(Value::zero_of(declared));
    };

    match declared {
        FieldType::Int8 => Ok(Value::Int(int_source(value, column)?)),
        FieldType::Int4 => Ok(Value::Int(int_source(value, column)? as i32 as i64)),
        FieldType::Int2 => Ok(Value::Int(int_source(value, column)? as i16 as i64)),
        FieldType::Int1 => Ok(Value::Int(int_source(value, column)? as i8 as i64)),
        FieldType::Currency | FieldType::Timestamp => Ok(Value::Int(int_source(value, column)?)),

        FieldType::UInt8 => Ok(Value::UInt(uint_source(value, column)?)),
        FieldType::UInt4 => Ok(Value::UInt(uint_source(value, column)? as u32 as u64)),
        FieldType::UInt2 => Ok(Value::UInt(uint_source(value, column)? as u16 as u64)),
        FieldType::UInt1 => Ok(Value::UInt(uint_source(value, column)? as u8 as u64)),

        FieldType::Float8 => Ok(Value::Float(float_source(value, column)?)),
        FieldType::Float4 => Ok(Value::Float(float_source(value, column)? as f32 as f64)),

        FieldType::Bool => match value {
            SourceValue::Bool(b) => Ok(Value::Bool(*b)),
            SourceValue::Int(i) => Ok(Value::Bool(*i != 0)),
            SourceValue::UInt(u) => Ok(Value::Bool(*u != 0)),
            other => Err(RowError::unsupported(column, other.kind())),
        },

        FieldType::Text | FieldType::WideText => match value {
            SourceValue::Text(s) => Ok(Value::Text(Cow::Owned(s.clone()))),
            other => Err(RowError::unsupported(column, other.kind())),
        },

        FieldType::Bytes => match value {
            SourceValue::Bytes(b) => Ok(Value::Bytes(Cow::Owned(b.clone()))),
            other => Err(RowError::unsupported(column, other.kind())),
        },
    }
}

fn int_source(value: &SourceValue, column: &str) -> Result<i64> {
    match value {
        SourceValue::Int(i) => Ok(*i),
        SourceValue::UInt(u) => Ok(*u as i64),
        other => Err(RowError::unsupported(column, other.kind())),
    }
}

fn uint_source(value: &SourceValue, column: &str) -> Result<u64> {
    match value {
        SourceValue::UInt(u) => Ok(*u),
        SourceValue::Int(i) => Ok(*i as u64),
        other => Err(RowError::unsupported(column, other.kind())),
    }
}

fn float_source(value: &SourceValue, column: &str) -> Result<f64> {
    match value {
        SourceValue::Float(f) => Ok(*f),
        SourceValue::Int(i) => Ok(*i as f64),
        SourceValue::UInt(u) => Ok(*u as f64),
        other => Err(RowError::unsupported(column, other.kind())),
    }
}
