//! # PackedRow Codec
//!
//! Encoding and decoding of one row against its descriptor. See the module
//! documentation of [`crate::packed`] for the byte layout and the published
//! wire constants.
//!
//! Encoding is zero-suppression, not general compression: a fixed-width
//! column whose value is the zero of its width (integer 0, float bit
//! pattern 0, false) is elided and its bitmask bit stays clear. `Bool`
//! columns live entirely in the bitmask and contribute no fixed-region
//! bytes. Variable-length columns are never suppressed; an empty payload is
//! still written as a zero length prefix.
//!
//! Decoding mirrors encoding exactly and is zero-copy where the payload
//! allows it: `Bytes` and `Text` values borrow from the row buffer,
//! `WideText` re-decodes UTF-16LE into an owned string.

use std::borrow::Cow;
use std::sync::Arc;

use smallvec::{smallvec, SmallVec};

use crate::error::{Result, RowError};
use crate::packed::RowDescriptor;
use crate::source::{coerce, RowSource};
use crate::types::{FieldType, Value};

/// One encoded row: a descriptor handle plus the wire buffer.
///
/// Immutable once built. Cheap to move, exclusively owned by its holder.
#[derive(Debug, Clone, PartialEq)]
pub struct PackedRow {
    descriptor: Arc<RowDescriptor>,
    data: Vec<u8>,
}

impl PackedRow {
    /// Encodes one row of coerced values against the descriptor.
    ///
    /// The value at each position must match the variant family its declared
    /// type demands; the count must match the descriptor's column count.
    pub fn encode(values: &[Value<'_>], descriptor: Arc<RowDescriptor>) -> Result<Self> {
        if values.len() != descriptor.column_count() {
            return Err(RowError::mismatch(format!(
                "row has {} values, descriptor has {} columns",
                values.len(),
                descriptor.column_count()
            )));
        }

        let mut mask = vec![0u8; descriptor.bitmask_len()];
        let mut fixed = Vec::new();

        for (bit, &col_idx) in descriptor.fixed_columns().iter().enumerate() {
            let col = &descriptor.columns()[col_idx];
            if write_fixed(&values[col_idx], col.field_type, &col.name, &mut fixed)? {
                mask[bit / 8] |= 1 << (bit % 8);
            }
        }

        let mut var = Vec::new();
        for &col_idx in descriptor.var_columns() {
            let col = &descriptor.columns()[col_idx];
            let payload = var_payload(&values[col_idx], col.field_type, &col.name)?;
            var.extend_from_slice(&(payload.len() as u32).to_le_bytes());
            var.extend_from_slice(&payload);
        }

        let mut data = Vec::with_capacity(mask.len() + fixed.len() + var.len());
        data.extend_from_slice(&mask);
        data.extend_from_slice(&fixed);
        data.extend_from_slice(&var);

        Ok(Self { descriptor, data })
    }

    /// Wraps a wire buffer, validating the full layout against the
    /// descriptor by length accounting.
    pub fn from_bytes(data: Vec<u8>, descriptor: Arc<RowDescriptor>) -> Result<Self> {
        decode_into(&data, &descriptor)?;
        Ok(Self { descriptor, data })
    }

    /// Coerces and encodes the current row of an external source.
    pub fn from_source_row<S: RowSource + ?Sized>(
        source: &S,
        descriptor: Arc<RowDescriptor>,
    ) -> Result<Self> {
        let mut cells: SmallVec<[Value<'static>; 16]> =
            SmallVec::with_capacity(descriptor.column_count());
        for (idx, col) in descriptor.columns().iter().enumerate() {
            let native = if source.is_null(idx) {
                None
            } else {
                Some(source.value(idx)?)
            };
            cells.push(coerce(native.as_ref(), col.field_type, &col.name)?);
        }
        Self::encode(&cells, descriptor)
    }

    /// Decodes this row back into one value per descriptor column.
    ///
    /// `Bytes` and `Text` values borrow from this row's buffer.
    pub fn values(&self) -> Result<SmallVec<[Value<'_>; 16]>> {
        decode_into(&self.data, &self.descriptor)
    }

    pub fn descriptor(&self) -> &Arc<RowDescriptor> {
        &self.descriptor
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }
}

/// Writes the fixed-width representation of one value, returning true if
/// the value is present (bitmask bit set). Suppression tests the value at
/// its declared width, so a wide value that narrows to zero is elided.
fn write_fixed(
    value: &Value<'_>,
    declared: FieldType,
    column: &str,
    out: &mut Vec<u8>,
) -> Result<bool> {
    match (declared, value) {
        (FieldType::Bool, Value::Bool(b)) => Ok(*b),

        (FieldType::Int8 | FieldType::Currency | FieldType::Timestamp, Value::Int(i)) => {
            if *i == 0 {
                return Ok(false);
            }
            out.extend_from_slice(&i.to_le_bytes());
            Ok(true)
        }
        (FieldType::Int4, Value::Int(i)) => {
            let v = *i as i32;
            if v == 0 {
                return Ok(false);
            }
            out.extend_from_slice(&v.to_le_bytes());
            Ok(true)
        }
        (FieldType::Int2, Value::Int(i)) => {
            let v = *i as i16;
            if v == 0 {
                return Ok(false);
            }
            out.extend_from_slice(&v.to_le_bytes());
            Ok(true)
        }
        (FieldType::Int1, Value::Int(i)) => {
            let v = *i as i8;
            if v == 0 {
                return Ok(false);
            }
            out.extend_from_slice(&v.to_le_bytes());
            Ok(true)
        }

        (FieldType::UInt8, Value::UInt(u)) => {
            if *u == 0 {
                return Ok(false);
            }
            out.extend_from_slice(&u.to_le_bytes());
            Ok(true)
        }
        (FieldType::UInt4, Value::UInt(u)) => {
            let v = *u as u32;
            if v == 0 {
                return Ok(false);
            }
            out.extend_from_slice(&v.to_le_bytes());
            Ok(true)
        }
        (FieldType::UInt2, Value::UInt(u)) => {
            let v = *u as u16;
            if v == 0 {
                return Ok(false);
            }
            out.extend_from_slice(&v.to_le_bytes());
            Ok(true)
        }
        (FieldType::UInt1, Value::UInt(u)) => {
            let v = *u as u8;
            if v == 0 {
                return Ok(false);
            }
            out.extend_from_slice(&v.to_le_bytes());
            Ok(true)
        }

        (FieldType::Float8, Value::Float(f)) => {
            if f.to_bits() == 0 {
                return Ok(false);
            }
            out.extend_from_slice(&f.to_le_bytes());
            Ok(true)
        }
        (FieldType::Float4, Value::Float(f)) => {
            let v = *f as f32;
            if v.to_bits() == 0 {
                return Ok(false);
            }
            out.extend_from_slice(&v.to_le_bytes());
            Ok(true)
        }

        (_, value) => Err(RowError::unsupported(column, value.kind())),
    }
}

/// Produces the variable-region payload bytes for one value.
fn var_payload<'a>(
    value: &'a Value<'_>,
    declared: FieldType,
    column: &str,
) -> Result<Cow<'a, [u8]>> {
    match (declared, value) {
        (FieldType::Bytes, Value::Bytes(b)) => Ok(Cow::Borrowed(b.as_ref())),
        (FieldType::Text, Value::Text(s)) => Ok(Cow::Borrowed(s.as_bytes())),
        (FieldType::WideText, Value::Text(s)) => Ok(Cow::Owned(
            s.encode_utf16().flat_map(|u| u.to_le_bytes()).collect(),
        )),
        (_, value) => Err(RowError::unsupported(column, value.kind())),
    }
}

/// Decodes a wire buffer into one value per descriptor column, verifying by
/// length accounting that the buffer is exactly the layout the descriptor
/// implies.
fn decode_into<'a>(
    data: &'a [u8],
    descriptor: &RowDescriptor,
) -> Result<SmallVec<[Value<'a>; 16]>> {
    let mask_len = descriptor.bitmask_len();
    if data.len() < mask_len {
        return Err(RowError::truncated("bitmask", mask_len, data.len()));
    }
    let mask = &data[..mask_len];
    let mut offset = mask_len;

    let mut out: SmallVec<[Value<'a>; 16]> = smallvec![Value::Int(0); descriptor.column_count()];

    for (bit, &col_idx) in descriptor.fixed_columns().iter().enumerate() {
        let field_type = descriptor.columns()[col_idx].field_type;
        let present = mask[bit / 8] & (1 << (bit % 8)) != 0;
        out[col_idx] = if present {
            read_fixed(data, &mut offset, field_type)?
        } else {
            Value::zero_of(field_type)
        };
    }

    for &col_idx in descriptor.var_columns() {
        let col = &descriptor.columns()[col_idx];
        let prefix = take(data, &mut offset, 4, "length prefix")?;
        let len = u32::from_le_bytes(prefix.try_into().unwrap()) as usize;
        let payload = take(data, &mut offset, len, "variable payload")?;
        out[col_idx] = match col.field_type {
            FieldType::Bytes => Value::Bytes(Cow::Borrowed(payload)),
            FieldType::Text => {
                let s = std::str::from_utf8(payload).map_err(|e| {
                    RowError::mismatch(format!("invalid UTF-8 in column `{}`: {}", col.name, e))
                })?;
                Value::Text(Cow::Borrowed(s))
            }
            FieldType::WideText => Value::Text(Cow::Owned(decode_utf16le(payload, &col.name)?)),
            _ => {
                return Err(RowError::mismatch(format!(
                    "column `{}` is not variable-length",
                    col.name
                )))
            }
        };
    }

    if offset != data.len() {
        return Err(RowError::mismatch(format!(
            "{} trailing bytes after variable region",
            data.len() - offset
        )));
    }

    Ok(out)
}

fn read_fixed<'a>(data: &[u8], offset: &mut usize, field_type: FieldType) -> Result<Value<'a>> {
    match field_type {
        FieldType::Bool => Ok(Value::Bool(true)),

        FieldType::Int8 | FieldType::Currency | FieldType::Timestamp => {
            let bytes = take(data, offset, 8, "fixed value")?;
            Ok(Value::Int(i64::from_le_bytes(bytes.try_into().unwrap())))
        }
        FieldType::Int4 => {
            let bytes = take(data, offset, 4, "fixed value")?;
            Ok(Value::Int(
                i32::from_le_bytes(bytes.try_into().unwrap()) as i64
            ))
        }
        FieldType::Int2 => {
            let bytes = take(data, offset, 2, "fixed value")?;
            Ok(Value::Int(
                i16::from_le_bytes(bytes.try_into().unwrap()) as i64
            ))
        }
        FieldType::Int1 => {
            let bytes = take(data, offset, 1, "fixed value")?;
            Ok(Value::Int(bytes[0] as i8 as i64))
        }

        FieldType::UInt8 => {
            let bytes = take(data, offset, 8, "fixed value")?;
            Ok(Value::UInt(u64::from_le_bytes(bytes.try_into().unwrap())))
        }
        FieldType::UInt4 => {
            let bytes = take(data, offset, 4, "fixed value")?;
            Ok(Value::UInt(
                u32::from_le_bytes(bytes.try_into().unwrap()) as u64
            ))
        }
        FieldType::UInt2 => {
            let bytes = take(data, offset, 2, "fixed value")?;
            Ok(Value::UInt(
                u16::from_le_bytes(bytes.try_into().unwrap()) as u64
            ))
        }
        FieldType::UInt1 => {
            let bytes = take(data, offset, 1, "fixed value")?;
            Ok(Value::UInt(bytes[0] as u64))
        }

        FieldType::Float8 => {
            let bytes = take(data, offset, 8, "fixed value")?;
            Ok(Value::Float(f64::from_le_bytes(bytes.try_into().unwrap())))
        }
        FieldType::Float4 => {
            let bytes = take(data, offset, 4, "fixed value")?;
            Ok(Value::Float(
                f32::from_le_bytes(bytes.try_into().unwrap()) as f64
            ))
        }

        FieldType::Bytes | FieldType::Text | FieldType::WideText => Err(RowError::mismatch(
            "variable-length type in fixed region".to_string(),
        )),
    }
}

fn take<'a>(data: &'a [u8], offset: &mut usize, n: usize, context: &'static str) -> Result<&'a [u8]> {
    let remaining = data.len() - *offset;
    if remaining < n {
        return Err(RowError::truncated(context, n, remaining));
    }
    let slice = &data[*offset..*offset + n];
    *offset += n;
    Ok(slice)
}

fn decode_utf16le(payload: &[u8], column: &str) -> Result<String> {
    if payload.len() % 2 != 0 {
        return Err(RowError::mismatch(format!(
            "odd UTF-16 payload length {} in column `{}`",
            payload.len(),
            column
        )));
    }
    let units: Vec<u16> = payload
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .collect();
    String::from_utf16(&units)
        .map_err(|e| RowError::mismatch(format!("invalid UTF-16 in column `{}`: {}", column, e)))
}
