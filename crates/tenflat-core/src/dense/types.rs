//! Tensor type definition, construction and accessors
//!
//! This module defines the core [`Tensor`] type together with shape
//! validation and stride derivation. Fill, indexing, transpose and copy
//! operations live in sibling modules.

use crate::buffer::FlatBuffer;
use crate::error::{TensorError, TensorResult};
use crate::types::{ElementKind, Rank, Shape, Strides};

/// Where a tensor's values currently live.
///
/// A tensor starts out `Uniform`: every logical element equals the fill value
/// and no buffer is allocated. The first flat read (or a bulk replacement, or
/// a generator fill) switches it to `Materialized`.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum FillState {
    /// No buffer yet, every element equals the value
    Uniform(f64),
    /// Buffer allocated and authoritative
    Materialized(FlatBuffer),
}

/// Dense, strided, typed N-dimensional tensor over a lazily filled flat buffer.
///
/// # Layout
///
/// Elements are linearized in row-major (C) order. `strides[i]` is the
/// product of all dimensions after `i`, so the last axis has stride 1 and
/// `index(coordinates(i)) == i` for every `i` in `0..len()`.
///
/// # Bounds
///
/// [`min`](Tensor::min) and [`max`](Tensor::max) are maintained
/// incrementally and only rescanned when a whole buffer is replaced. See
/// [`set`](Tensor::set) for the known limits of the incremental rule.
///
/// Bounds describe the *stored* values: every scalar is converted to the
/// element kind before it is compared, so filling a `U8` tensor with `300.0`
/// reports `44.0` for both. NaN slots never become a bound: comparisons use
/// `f64::min`/`f64::max`, which prefer the non-NaN operand, so a `F64` buffer
/// `[NaN, 1.0]` reports `(1.0, 1.0)`. A buffer of NaN only reports NaN.
///
/// # Examples
///
/// ```
/// use tenflat_core::{ElementKind, Tensor};
///
/// let tensor = Tensor::new(ElementKind::U8, &[5, 4, 3]).unwrap();
/// assert_eq!(tensor.shape(), &[5, 4, 3]);
/// assert_eq!(tensor.strides(), &[12, 3, 1]);
/// assert_eq!(tensor.len(), 60);
/// assert_eq!(tensor.rank(), 3);
/// assert!(!tensor.filled());
/// ```
#[derive(Clone, Debug)]
pub struct Tensor {
    pub(crate) kind: ElementKind,
    pub(crate) shape: Shape,
    pub(crate) strides: Strides,
    pub(crate) len: usize,
    pub(crate) state: FillState,
    pub(crate) min: f64,
    pub(crate) max: f64,
}

impl Tensor {
    /// Create a tensor of `kind` with the given shape.
    ///
    /// The tensor starts unmaterialized with a uniform fill of 0, and both
    /// bounds are 0.
    ///
    /// # Errors
    ///
    /// [`TensorError::InvalidShape`] if `shape` is empty or contains a zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use tenflat_core::{ElementKind, Tensor};
    ///
    /// assert!(Tensor::new(ElementKind::U8, &[1, 20, 30]).is_ok());
    /// assert!(Tensor::new(ElementKind::U8, &[]).is_err());
    /// assert!(Tensor::new(ElementKind::U8, &[0]).is_err());
    /// ```
    pub fn new(kind: ElementKind, shape: &[usize]) -> TensorResult<Self> {
        if shape.is_empty() {
            return Err(TensorError::invalid_shape(
                &[],
                "cannot create zero dimensions tensors",
            ));
        }
        if shape.contains(&0) {
            let numeric: Vec<f64> = shape.iter().map(|&d| d as f64).collect();
            return Err(TensorError::invalid_shape(
                &numeric,
                "shape must consist of natural integers",
            ));
        }
        if shape
            .iter()
            .try_fold(1usize, |acc, &d| acc.checked_mul(d))
            .is_none()
        {
            let numeric: Vec<f64> = shape.iter().map(|&d| d as f64).collect();
            return Err(TensorError::invalid_shape(
                &numeric,
                "element count overflows usize",
            ));
        }
        Ok(Self::with_valid_shape(kind, shape))
    }

    /// Create a tensor from dimensions given as plain numbers.
    ///
    /// This is the entry point for shapes coming from untyped sources: every
    /// entry must be finite, integral, at least 1 and representable as a
    /// `usize`. Entries are never clamped.
    ///
    /// # Errors
    ///
    /// [`TensorError::InvalidShape`] for an empty shape, any entry that is
    /// not a natural integer, any entry too large for `usize`, or a product
    /// that overflows `usize`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tenflat_core::{ElementKind, Tensor};
    ///
    /// let tensor = Tensor::from_numeric_shape(ElementKind::F32, &[2.0, 3.0]).unwrap();
    /// assert_eq!(tensor.shape(), &[2, 3]);
    ///
    /// assert!(Tensor::from_numeric_shape(ElementKind::F32, &[-1.0]).is_err());
    /// assert!(Tensor::from_numeric_shape(ElementKind::F32, &[1.05]).is_err());
    /// ```
    pub fn from_numeric_shape(kind: ElementKind, shape: &[f64]) -> TensorResult<Self> {
        if shape.is_empty() {
            return Err(TensorError::invalid_shape(
                shape,
                "cannot create zero dimensions tensors",
            ));
        }
        let natural = |d: f64| d.is_finite() && d >= 1.0 && d.fract() == 0.0;
        if !shape.iter().all(|&d| natural(d)) {
            return Err(TensorError::invalid_shape(
                shape,
                "shape must consist of natural integers",
            ));
        }
        // integral f64 values below 2^64 convert to usize exactly
        if shape.iter().any(|&d| d >= usize::MAX as f64) {
            return Err(TensorError::invalid_shape(
                shape,
                "dimension does not fit in usize",
            ));
        }
        let dims: Vec<usize> = shape.iter().map(|&d| d as usize).collect();
        Self::new(kind, &dims)
    }

    /// Alias of [`new`](Tensor::new); the default fill is already zero
    pub fn zeros(kind: ElementKind, shape: &[usize]) -> TensorResult<Self> {
        Self::new(kind, shape)
    }

    /// Create an already materialized tensor holding a copy of `buffer`.
    ///
    /// The element kind is taken from the buffer and the bounds are scanned
    /// from its contents.
    ///
    /// # Errors
    ///
    /// [`TensorError::InvalidShape`] for an invalid shape,
    /// [`TensorError::LengthMismatch`] if the buffer length differs from the
    /// product of `shape`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tenflat_core::{FlatBuffer, Tensor};
    ///
    /// let buffer = FlatBuffer::from(vec![1i32, 2, 3, 4, 5, 6]);
    /// let mut tensor = Tensor::from_buffer(&buffer, &[2, 3]).unwrap();
    /// assert_eq!(tensor.get(&[1, 0]).unwrap(), 4.0);
    /// assert_eq!((tensor.min(), tensor.max()), (1.0, 6.0));
    /// ```
    pub fn from_buffer(buffer: &FlatBuffer, shape: &[usize]) -> TensorResult<Self> {
        let mut tensor = Self::new(buffer.kind(), shape)?;
        tensor.set_flat(buffer)?;
        Ok(tensor)
    }

    /// Derive strides and length for a shape already known to be valid
    pub(crate) fn with_valid_shape(kind: ElementKind, shape: &[usize]) -> Self {
        Self {
            kind,
            shape: Shape::from_slice(shape),
            strides: row_major_strides(shape),
            len: shape.iter().product(),
            state: FillState::Uniform(0.0),
            min: 0.0,
            max: 0.0,
        }
    }

    /// Element kind of the backing buffer
    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    /// Per-axis depths
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Row-major strides, one per axis
    ///
    /// # Examples
    ///
    /// ```
    /// use tenflat_core::{ElementKind, Tensor};
    ///
    /// let tensor = Tensor::new(ElementKind::U8, &[25, 24, 1]).unwrap();
    /// assert_eq!(tensor.strides(), &[24, 1, 1]);
    /// ```
    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    /// Number of logical elements (product of the shape)
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always `false`: zero-length tensors cannot be constructed
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of axes
    pub fn rank(&self) -> Rank {
        self.shape.len()
    }

    /// Largest logical value seen so far
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Smallest logical value seen so far
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Whether the flat buffer has been materialized
    pub fn filled(&self) -> bool {
        matches!(self.state, FillState::Materialized(_))
    }

    /// Uniform fill value, `None` once the buffer is materialized
    pub fn filling(&self) -> Option<f64> {
        match self.state {
            FillState::Uniform(value) => Some(value),
            FillState::Materialized(_) => None,
        }
    }

    /// Logical value at a flat index without materializing
    pub(crate) fn value_at(&self, index: usize) -> f64 {
        match &self.state {
            FillState::Uniform(value) => *value,
            FillState::Materialized(buffer) => buffer.get(index),
        }
    }
}

/// Row-major strides: walk the axes backwards, the next stride defaulting to 1.
pub(crate) fn row_major_strides(shape: &[usize]) -> Strides {
    let mut strides = Strides::from_elem(1, shape.len());
    for i in (0..shape.len().saturating_sub(1)).rev() {
        strides[i] = shape[i + 1] * strides[i + 1];
    }
    strides
}
