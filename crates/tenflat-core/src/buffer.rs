//! Typed flat storage
//!
//! [`FlatBuffer`] is the contiguous row-major backing store of a tensor. It is
//! a closed sum over the eight supported primitives, so the element kind of a
//! buffer is always known at runtime and comparing kinds is an enum equality
//! check. The [`Element`] trait ties each primitive to its [`ElementKind`] and
//! gives typed access to the matching variant.
//!
//! All scalar traffic through the untyped API uses `f64`, which represents
//! every value of every supported kind exactly.

use crate::types::ElementKind;
use scirs2_core::numeric::{Num, NumCast};
use std::fmt;

mod sealed {
    pub trait Sealed {}
}

/// A primitive type that can back a [`FlatBuffer`].
///
/// Implemented for `u8`, `u16`, `u32`, `i8`, `i16`, `i32`, `f32` and `f64`.
/// The trait is sealed.
pub trait Element:
    sealed::Sealed + Num + NumCast + Copy + PartialOrd + Default + fmt::Debug + Send + Sync + 'static
{
    /// Kind tag of this primitive
    const KIND: ElementKind;

    /// Convert with typed-array semantics (see [`ElementKind::coerce`])
    fn from_f64(value: f64) -> Self;

    /// Widen to `f64` (exact for every supported primitive)
    fn to_f64(self) -> f64;

    #[doc(hidden)]
    fn slice(buffer: &FlatBuffer) -> Option<&[Self]>;

    #[doc(hidden)]
    fn slice_mut(buffer: &mut FlatBuffer) -> Option<&mut [Self]>;

    #[doc(hidden)]
    fn wrap(data: Vec<Self>) -> FlatBuffer;
}

/// Row-major flat storage of one element kind.
///
/// # Examples
///
/// ```
/// use tenflat_core::{ElementKind, FlatBuffer};
///
/// let mut buffer = FlatBuffer::new(ElementKind::I8, 3);
/// buffer.set(1, -4.0);
/// assert_eq!(buffer.kind(), ElementKind::I8);
/// assert_eq!(buffer.as_slice::<i8>(), Some(&[0, -4, 0][..]));
/// assert_eq!(buffer, FlatBuffer::from(vec![0i8, -4, 0]));
/// ```
#[derive(Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", content = "data", rename_all = "lowercase"))]
pub enum FlatBuffer {
    U8(Vec<u8>),
    U16(Vec<u16>),
    U32(Vec<u32>),
    I8(Vec<i8>),
    I16(Vec<i16>),
    I32(Vec<i32>),
    F32(Vec<f32>),
    F64(Vec<f64>),
}

macro_rules! impl_element {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl sealed::Sealed for $ty {}

            impl Element for $ty {
                const KIND: ElementKind = ElementKind::$variant;

                fn from_f64(value: f64) -> Self {
                    ElementKind::$variant.coerce(value) as $ty
                }

                fn to_f64(self) -> f64 {
                    self as f64
                }

                fn slice(buffer: &FlatBuffer) -> Option<&[Self]> {
                    match buffer {
                        FlatBuffer::$variant(data) => Some(data),
                        _ => None,
                    }
                }

                fn slice_mut(buffer: &mut FlatBuffer) -> Option<&mut [Self]> {
                    match buffer {
                        FlatBuffer::$variant(data) => Some(data),
                        _ => None,
                    }
                }

                fn wrap(data: Vec<Self>) -> FlatBuffer {
                    FlatBuffer::$variant(data)
                }
            }

            impl From<Vec<$ty>> for FlatBuffer {
                fn from(data: Vec<$ty>) -> Self {
                    FlatBuffer::$variant(data)
                }
            }
        )*
    };
}

impl_element! {
    u8 => U8,
    u16 => U16,
    u32 => U32,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    f32 => F32,
    f64 => F64,
}

/// Dispatch `$body` over the typed vector held by `$buffer`.
macro_rules! dispatch {
    ($buffer:expr, $data:ident => $body:expr) => {
        match $buffer {
            FlatBuffer::U8($data) => $body,
            FlatBuffer::U16($data) => $body,
            FlatBuffer::U32($data) => $body,
            FlatBuffer::I8($data) => $body,
            FlatBuffer::I16($data) => $body,
            FlatBuffer::I32($data) => $body,
            FlatBuffer::F32($data) => $body,
            FlatBuffer::F64($data) => $body,
        }
    };
}

fn zeroed<T: Element>(len: usize) -> Vec<T> {
    vec![T::zero(); len]
}

impl FlatBuffer {
    /// Allocate a zero-initialized buffer of `len` elements of `kind`
    pub fn new(kind: ElementKind, len: usize) -> Self {
        match kind {
            ElementKind::U8 => FlatBuffer::U8(zeroed(len)),
            ElementKind::U16 => FlatBuffer::U16(zeroed(len)),
            ElementKind::U32 => FlatBuffer::U32(zeroed(len)),
            ElementKind::I8 => FlatBuffer::I8(zeroed(len)),
            ElementKind::I16 => FlatBuffer::I16(zeroed(len)),
            ElementKind::I32 => FlatBuffer::I32(zeroed(len)),
            ElementKind::F32 => FlatBuffer::F32(zeroed(len)),
            ElementKind::F64 => FlatBuffer::F64(zeroed(len)),
        }
    }

    /// Allocate a buffer with every slot set to `value`
    ///
    /// # Examples
    ///
    /// ```
    /// use tenflat_core::{ElementKind, FlatBuffer};
    ///
    /// let buffer = FlatBuffer::from_elem(ElementKind::U8, 2, 1.0);
    /// assert_eq!(buffer, FlatBuffer::from(vec![1u8, 1]));
    /// ```
    pub fn from_elem(kind: ElementKind, len: usize, value: f64) -> Self {
        let mut buffer = Self::new(kind, len);
        buffer.fill(value);
        buffer
    }

    /// Build a buffer from a typed vector
    pub fn from_vec<T: Element>(data: Vec<T>) -> Self {
        T::wrap(data)
    }

    /// Element kind held by this buffer
    pub fn kind(&self) -> ElementKind {
        match self {
            FlatBuffer::U8(_) => ElementKind::U8,
            FlatBuffer::U16(_) => ElementKind::U16,
            FlatBuffer::U32(_) => ElementKind::U32,
            FlatBuffer::I8(_) => ElementKind::I8,
            FlatBuffer::I16(_) => ElementKind::I16,
            FlatBuffer::I32(_) => ElementKind::I32,
            FlatBuffer::F32(_) => ElementKind::F32,
            FlatBuffer::F64(_) => ElementKind::F64,
        }
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        dispatch!(self, data => data.len())
    }

    /// Whether the buffer holds no elements
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Read slot `index` as `f64`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    pub fn get(&self, index: usize) -> f64 {
        dispatch!(self, data => data[index].to_f64())
    }

    /// Store `value` at slot `index`, converting it to the buffer's kind.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    pub fn set(&mut self, index: usize, value: f64) {
        dispatch!(self, data => data[index] = Element::from_f64(value))
    }

    /// Overwrite every slot with `value`
    pub fn fill(&mut self, value: f64) {
        dispatch!(self, data => data.fill(Element::from_f64(value)))
    }

    /// Iterate over the values widened to `f64`
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.len()).map(move |i| self.get(i))
    }

    /// Collect the values widened to `f64`
    pub fn to_f64_vec(&self) -> Vec<f64> {
        dispatch!(self, data => data.iter().map(|v| v.to_f64()).collect())
    }

    /// Smallest and largest value, `None` for an empty buffer.
    ///
    /// Uses `f64::min`/`f64::max`, so NaN slots are skipped unless every slot
    /// is NaN.
    pub fn min_max(&self) -> Option<(f64, f64)> {
        self.iter().fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
    }

    /// Typed view of the data, `None` when `T` is not this buffer's kind
    pub fn as_slice<T: Element>(&self) -> Option<&[T]> {
        T::slice(self)
    }

    /// Typed mutable view of the data, `None` when `T` is not this buffer's kind
    pub fn as_mut_slice<T: Element>(&mut self) -> Option<&mut [T]> {
        T::slice_mut(self)
    }
}

impl fmt::Debug for FlatBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        dispatch!(self, data => f.debug_tuple(self.kind().name()).field(data).finish())
    }
}
