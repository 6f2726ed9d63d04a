//! # tenflat-core
//!
//! Dense, strided, typed N-dimensional tensors over a lazily filled flat buffer.
//!
//! This crate is the addressing and storage engine of tenflat:
//!
//! - **Typed flat storage** ([`FlatBuffer`]) over a closed set of eight
//!   element kinds ([`ElementKind`])
//! - **Shape validation and row-major strides** computed once at construction
//! - **Coordinate ↔ flat index conversion** ([`Tensor::index`], [`Tensor::coordinates`])
//! - **Lazy materialization**: a fresh or scalar-filled tensor allocates nothing
//!   until its flat view is needed
//! - **Running bounds** ([`Tensor::min`], [`Tensor::max`]) maintained incrementally
//! - **Transpose** into new tensors and deep **copies**
//!
//! ## Quick Start
//!
//! ```
//! use tenflat_core::{ElementKind, Tensor};
//!
//! let mut tensor = Tensor::new(ElementKind::U8, &[5, 4, 3]).unwrap();
//! assert_eq!(tensor.strides(), &[12, 3, 1]);
//! assert!(!tensor.filled());
//!
//! // Eager fill from a generator, called once per element in flat order
//! let mut next = 0.0;
//! tensor.fill_with(|| {
//!     next += 1.0;
//!     next
//! });
//! assert_eq!((tensor.min(), tensor.max()), (1.0, 60.0));
//!
//! // Coordinates and flat indices address the same element
//! let index = tensor.index(&[1, 2, 0]).unwrap();
//! assert_eq!(tensor.coordinates(index), vec![1, 2, 0]);
//! assert_eq!(tensor.get(&[1, 2, 0]).unwrap(), tensor.get(&[index]).unwrap());
//!
//! // Transposing twice gives the original values back
//! assert_eq!(tensor.t().t().array(), tensor.array());
//! ```
//!
//! ## Lazy Fill
//!
//! ```
//! use tenflat_core::{ElementKind, FlatBuffer, Tensor};
//!
//! let mut tensor = Tensor::new(ElementKind::I16, &[2, 2]).unwrap();
//! tensor.fill(-7.0);
//! assert_eq!(tensor.filling(), Some(-7.0));
//! assert!(!tensor.filled());
//!
//! // The first flat read allocates the buffer
//! assert_eq!(tensor.flat(), &FlatBuffer::from(vec![-7i16; 4]));
//! assert!(tensor.filled());
//! ```
//!
//! ## Unchecked Addressing
//!
//! Coordinates are not validated against the shape and flat indices are not
//! validated against the length. Only the coordinate *count* is checked.
//! Reading or writing past the end of the buffer panics.
//!
//! ## Error Handling
//!
//! Operations return [`TensorResult`], whose error type [`TensorError`]
//! separates invalid shapes, kind and length mismatches on bulk replacement,
//! coordinate arity mismatches and invalid permutations.
//!
//! ## Features
//!
//! - `serde`: derive `Serialize`/`Deserialize` for [`ElementKind`],
//!   [`FlatBuffer`] and [`Nested`]

#![deny(warnings)]

pub mod buffer;
pub mod dense;
pub mod error;
pub mod types;


pub use buffer::{Element, FlatBuffer};
pub use dense::{Nested, Tensor};
pub use error::{TensorError, TensorResult};
pub use types::{Axis, ElementKind, Rank, Shape, Strides};
