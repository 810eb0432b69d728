//! Error types for densela.

use thiserror::Error;

/// Errors that can occur in vector and matrix operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LinalgError {
    /// Element, row or column index outside the valid range.
    #[error("index out of range: index {index} is out of range for {axis} of length {len}")]
    IndexOutOfRange {
        index: usize,
        len: usize,
        axis: &'static str,
    },

    /// Operand shapes are incompatible for the requested operation.
    #[error("dimension mismatch in {op}: {lhs:?} vs {rhs:?}")]
    DimensionMismatch {
        op: &'static str,
        lhs: Vec<usize>,
        rhs: Vec<usize>,
    },

    /// Operation undefined for the current shape, or structurally disallowed.
    #[error("invalid operation: {message}")]
    InvalidOperation { message: String },

    /// Parameter outside its domain.
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    /// Operand type not supported by the coercion protocol.
    #[error("type error: {op} not supported between {lhs} and {rhs}")]
    TypeError {
        op: &'static str,
        lhs: &'static str,
        rhs: &'static str,
    },
}

impl LinalgError {
    pub(crate) fn dims(op: &'static str, lhs: &[usize], rhs: &[usize]) -> Self {
        LinalgError::DimensionMismatch {
            op,
            lhs: lhs.to_vec(),
            rhs: rhs.to_vec(),
        }
    }

    pub(crate) fn invalid_operation(message: impl Into<String>) -> Self {
        LinalgError::InvalidOperation {
            message: message.into(),
        }
    }

    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        LinalgError::InvalidArgument {
            message: message.into(),
        }
    }
}

/// Result type for vector and matrix operations.
pub type Result<T> = std::result::Result<T, LinalgError>;
