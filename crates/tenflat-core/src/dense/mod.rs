//! Dense tensor implementation
//!
//! The [`Tensor`] type and its operations, split by concern:
//! construction and accessors, lazy fill, indexing, transpose, copy and the
//! nested projections.

// Core type definition
pub mod types;

// Operation modules
mod copy;
mod fill;
mod indexing;
mod nested;
mod shape_ops;

// Supporting modules
pub mod tensor_traits;

pub use nested::Nested;
pub use types::Tensor;
