//! Error types for tensor construction and addressing
//!
//! Every fallible operation in tenflat-core returns [`TensorResult`]. All
//! validation happens before any state is touched, so a failed call leaves
//! the tensor exactly as it was.
//!
//! # Examples
//!
//! ```
//! use tenflat_core::{ElementKind, Tensor, TensorError};
//!
//! let err = Tensor::new(ElementKind::U8, &[]).unwrap_err();
//! assert!(matches!(err, TensorError::InvalidShape { .. }));
//! ```

use crate::types::ElementKind;
use thiserror::Error;

/// Errors raised by [`Tensor`](crate::Tensor) operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TensorError {
    /// Zero-rank shape, or a dimension that is not a natural integer
    #[error("Invalid shape {shape:?}: {reason}")]
    InvalidShape { shape: Vec<f64>, reason: String },

    /// Bulk replacement with a buffer of another element kind
    #[error("Element kind mismatch: tensor holds {expected}, buffer holds {actual}")]
    TypeMismatch {
        expected: ElementKind,
        actual: ElementKind,
    },

    /// Bulk replacement with a buffer of another length
    #[error("Buffer length mismatch: expected {expected} elements, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// Coordinate count is neither 1 nor the tensor rank
    #[error("Expected exactly {expected} coordinates, got {actual} coordinates instead")]
    CoordinateArityMismatch { expected: usize, actual: usize },

    /// Transpose axes that are not a permutation of `0..rank`
    #[error("Axes {axes:?} are not a permutation of 0..{rank}")]
    InvalidPermutation { axes: Vec<usize>, rank: usize },
}

/// Result type alias for tensor operations
pub type TensorResult<T> = Result<T, TensorError>;

impl TensorError {
    pub(crate) fn invalid_shape(shape: &[f64], reason: &str) -> Self {
        TensorError::InvalidShape {
            shape: shape.to_vec(),
            reason: reason.to_string(),
        }
    }
}
