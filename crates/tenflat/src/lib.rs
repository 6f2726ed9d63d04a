//! # tenflat
//!
//! Dense, strided, typed N-dimensional tensors over a lazily filled flat buffer.
//!
//! This is the **meta crate** that re-exports the tensor engine and adds
//! application-level logging setup.
//!
//! ## Quick Start
//!
//! ```
//! use tenflat::prelude::*;
//!
//! let mut tensor = Tensor::new(ElementKind::F32, &[10, 20, 30])?;
//! tensor.fill(0.5);
//! assert_eq!(tensor.strides(), &[600, 30, 1]);
//! assert_eq!(tensor.t().shape(), &[30, 20, 10]);
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Components
//!
//! ### Tensor Engine ([`core`])
//!
//! Typed flat buffers, shape validation, coordinate addressing, lazy fills,
//! running bounds, transpose and copies.
//!
//! ### Logging ([`tracing_support`])
//!
//! Subscriber setup for the `tracing` events emitted by the engine.
//!
//! ## Features
//!
//! - `tracing`: install a `tracing-subscriber` with [`tracing_support::init_tracing`]
//! - `serde`: serialization support for element kinds, buffers and nested views

#![deny(warnings)]

pub use tenflat_core as core;

pub mod tracing_support;

pub mod prelude {
    //! Prelude module for convenient imports
    //!
    //! # Example
    //!
    //! ```
    //! use tenflat::prelude::*;
    //!
    //! let tensor = Tensor::new(ElementKind::U8, &[2, 3]).unwrap();
    //! assert_eq!(tensor.array().depth(), 2);
    //! ```

    pub use crate::core::{ElementKind, FlatBuffer, Nested, Tensor, TensorError, TensorResult};
}
