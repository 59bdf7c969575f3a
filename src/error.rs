//! # Packed-Row Error Taxonomy
//!
//! Every failure the codec can produce is one of a small, closed set of
//! conditions. All of them indicate a schema/version mismatch, a coercion
//! rule gap, or corrupted data. None are transient: callers must not retry,
//! and no error is absorbed into a partial result.

use thiserror::Error;

/// Result type for packed-row operations.
pub type Result<T> = std::result::Result<T, RowError>;

/// Errors that can occur while building descriptors, coercing values, or
/// encoding/decoding packed rows.
#[derive(Debug, Error)]
pub enum RowError {
    /// A raw field-type tag outside the closed enumeration.
    #[error("invalid field type tag {tag:#04x}")]
    InvalidFieldType { tag: u8 },

    /// A source value or column type with no coercion rule for its declared
    /// wire type.
    #[error("unsupported column type {type_name} for column `{column}`")]
    UnsupportedColumnType {
        column: String,
        type_name: &'static str,
    },

    /// Decode ran out of bytes before the descriptor was satisfied.
    #[error("packed row truncated reading {context}: need {needed} bytes, {remaining} remain")]
    TruncatedBuffer {
        context: &'static str,
        needed: usize,
        remaining: usize,
    },

    /// Buffer length or shape inconsistent with the descriptor.
    #[error("descriptor mismatch: {reason}")]
    DescriptorMismatch { reason: String },

    /// Failure surfaced by the external row source.
    #[error(transparent)]
    Source(#[from] eyre::Report),
}

impl RowError {
    /// Creates an unsupported-column-type error.
    pub fn unsupported(column: impl Into<String>, type_name: &'static str) -> Self {
        Self::UnsupportedColumnType {
            column: column.into(),
            type_name,
        }
    }

    /// Creates a truncated-buffer error.
    pub fn truncated(context: &'static str, needed: usize, remaining: usize) -> Self {
        Self::TruncatedBuffer {
            context,
            needed,
            remaining,
        }
    }

    /// Creates a descriptor-mismatch error.
    pub fn mismatch(reason: impl Into<String>) -> Self {
        Self::DescriptorMismatch {
            reason: reason.into(),
        }
    }

    /// Returns true if this error indicates a corrupted or foreign buffer
    /// rather than a schema or source problem.
    pub fn is_corruption(&self) -> bool {
        matches!(
            self,
            Self::TruncatedBuffer { .. } | Self::DescriptorMismatch { .. }
        )
    }
}
