//! Core type definitions for tenflat tensors.
//!
//! This module defines the fundamental types used throughout the crate:
//!
//! - Type aliases for tensor dimensions ([`Axis`], [`Rank`], [`Shape`], [`Strides`])
//! - The closed set of storage kinds ([`ElementKind`])
//!
//! # Examples
//!
//! ```
//! use tenflat_core::{ElementKind, Tensor};
//!
//! let tensor = Tensor::new(ElementKind::F32, &[2, 3]).unwrap();
//! assert_eq!(tensor.kind(), ElementKind::F32);
//! assert_eq!(tensor.kind().width(), 4);
//! ```

use smallvec::SmallVec;
use std::fmt;

/// Type alias for tensor axis index.
///
/// Zero-indexed (0 is the first axis).
pub type Axis = usize;

/// Type alias for tensor rank (number of dimensions).
///
/// # Examples
///
/// ```
/// use tenflat_core::{ElementKind, Rank, Tensor};
///
/// let tensor = Tensor::new(ElementKind::U8, &[5, 4, 3]).unwrap();
/// let rank: Rank = tensor.rank();
/// assert_eq!(rank, 3);
/// ```
pub type Rank = usize;

/// Shape type using SmallVec to avoid heap allocation for common cases.
///
/// Optimized for tensors with up to 6 dimensions. Higher ranks spill to
/// the heap transparently.
pub type Shape = SmallVec<[usize; 6]>;

/// Row-major stride table, one entry per axis.
///
/// `strides[i]` is the number of flat slots skipped when advancing one step
/// along axis `i`. The last axis always has stride 1.
pub type Strides = SmallVec<[usize; 6]>;

/// Storage kind of a tensor's flat buffer.
///
/// The set is closed: three unsigned and three signed integer widths plus
/// single and double precision floats. Bulk buffer replacement requires an
/// exact kind match.
///
/// # Examples
///
/// ```
/// use tenflat_core::ElementKind;
///
/// assert_eq!(ElementKind::I16.width(), 2);
/// assert!(ElementKind::I16.is_signed());
/// assert!(!ElementKind::U32.is_signed());
/// assert!(ElementKind::F64.is_float());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ElementKind {
    /// Unsigned 8-bit integer
    U8,
    /// Unsigned 16-bit integer
    U16,
    /// Unsigned 32-bit integer
    U32,
    /// Signed 8-bit integer
    I8,
    /// Signed 16-bit integer
    I16,
    /// Signed 32-bit integer
    I32,
    /// 32-bit IEEE float
    F32,
    /// 64-bit IEEE float
    F64,
}

impl ElementKind {
    /// Every kind, in declaration order
    pub const ALL: [ElementKind; 8] = [
        ElementKind::U8,
        ElementKind::U16,
        ElementKind::U32,
        ElementKind::I8,
        ElementKind::I16,
        ElementKind::I32,
        ElementKind::F32,
        ElementKind::F64,
    ];

    /// Storage width of one element in bytes
    pub const fn width(self) -> usize {
        match self {
            ElementKind::U8 | ElementKind::I8 => 1,
            ElementKind::U16 | ElementKind::I16 => 2,
            ElementKind::U32 | ElementKind::I32 | ElementKind::F32 => 4,
            ElementKind::F64 => 8,
        }
    }

    /// Whether the kind can hold negative values
    pub const fn is_signed(self) -> bool {
        !matches!(self, ElementKind::U8 | ElementKind::U16 | ElementKind::U32)
    }

    /// Whether the kind is a floating point format
    pub const fn is_float(self) -> bool {
        matches!(self, ElementKind::F32 | ElementKind::F64)
    }

    /// Short lowercase name, matching the Rust primitive
    pub const fn name(self) -> &'static str {
        match self {
            ElementKind::U8 => "u8",
            ElementKind::U16 => "u16",
            ElementKind::U32 => "u32",
            ElementKind::I8 => "i8",
            ElementKind::I16 => "i16",
            ElementKind::I32 => "i32",
            ElementKind::F32 => "f32",
            ElementKind::F64 => "f64",
        }
    }

    /// Convert an `f64` to the value this kind would actually store.
    ///
    /// Integer kinds drop NaN and infinities to zero, truncate toward zero and
    /// wrap modulo 2^bits (two's complement for the signed kinds). `F32`
    /// rounds to the nearest representable value.
    ///
    /// # Examples
    ///
    /// ```
    /// use tenflat_core::ElementKind;
    ///
    /// assert_eq!(ElementKind::U8.coerce(300.0), 44.0);
    /// assert_eq!(ElementKind::U8.coerce(-1.0), 255.0);
    /// assert_eq!(ElementKind::I8.coerce(200.0), -56.0);
    /// assert_eq!(ElementKind::I32.coerce(2.9), 2.0);
    /// assert_eq!(ElementKind::U16.coerce(f64::NAN), 0.0);
    /// ```
    pub fn coerce(self, value: f64) -> f64 {
        match self {
            ElementKind::U8 => wrap_integer(value, 8, false) as u8 as f64,
            ElementKind::U16 => wrap_integer(value, 16, false) as u16 as f64,
            ElementKind::U32 => wrap_integer(value, 32, false) as u32 as f64,
            ElementKind::I8 => wrap_integer(value, 8, true) as i8 as f64,
            ElementKind::I16 => wrap_integer(value, 16, true) as i16 as f64,
            ElementKind::I32 => wrap_integer(value, 32, true) as i32 as f64,
            ElementKind::F32 => value as f32 as f64,
            ElementKind::F64 => value,
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Typed-array integer conversion: truncate, then wrap into `bits` bits.
pub(crate) fn wrap_integer(value: f64, bits: u32, signed: bool) -> i64 {
    if !value.is_finite() {
        return 0;
    }
    let modulus = 2f64.powi(bits as i32);
    let mut wrapped = value.trunc().rem_euclid(modulus);
    if signed && wrapped >= modulus / 2.0 {
        wrapped -= modulus;
    }
    wrapped as i64
}
