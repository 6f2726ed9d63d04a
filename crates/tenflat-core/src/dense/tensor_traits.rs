//! # Tensor - Trait Implementations
//!
//! - `Display`

use super::types::Tensor;
use std::fmt;

impl fmt::Display for Tensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tensor<{}>{:?} {}", self.kind(), self.shape(), self.array())
    }
}
