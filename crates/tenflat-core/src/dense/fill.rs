//! Lazy materialization and fill strategies
//!
//! A tensor defers allocating its buffer until something needs the flat view.
//! Until then it is described by a single uniform fill value.

use super::types::{FillState, Tensor};
use crate::buffer::FlatBuffer;
use crate::error::{TensorError, TensorResult};

impl Tensor {
    /// Flat row-major view of the tensor, materializing it on first use.
    ///
    /// An unmaterialized tensor allocates `len()` slots of its element kind
    /// and writes the uniform fill value into each. Later calls return the
    /// same buffer until the next [`fill`](Tensor::fill).
    ///
    /// # Examples
    ///
    /// ```
    /// use tenflat_core::{ElementKind, FlatBuffer, Tensor};
    ///
    /// let mut tensor = Tensor::new(ElementKind::U8, &[2]).unwrap();
    /// assert!(!tensor.filled());
    /// assert_eq!(tensor.flat(), &FlatBuffer::from(vec![0u8, 0]));
    /// assert!(tensor.filled());
    /// ```
    pub fn flat(&mut self) -> &FlatBuffer {
        self.materialize()
    }

    /// Replace the whole buffer with a copy of `buffer`.
    ///
    /// The bounds are recomputed by scanning the new contents.
    ///
    /// # Errors
    ///
    /// - [`TensorError::TypeMismatch`] if the buffer's kind differs from the tensor's
    /// - [`TensorError::LengthMismatch`] if the buffer's length differs from `len()`
    ///
    /// # Examples
    ///
    /// ```
    /// use tenflat_core::{ElementKind, FlatBuffer, Tensor, TensorError};
    ///
    /// let mut tensor = Tensor::new(ElementKind::U8, &[3]).unwrap();
    /// tensor.set_flat(&FlatBuffer::from(vec![4u8, 9, 2])).unwrap();
    /// assert_eq!((tensor.min(), tensor.max()), (2.0, 9.0));
    ///
    /// let err = tensor.set_flat(&FlatBuffer::from(vec![1u16, 2, 3])).unwrap_err();
    /// assert!(matches!(err, TensorError::TypeMismatch { .. }));
    /// ```
    pub fn set_flat(&mut self, buffer: &FlatBuffer) -> TensorResult<&mut Self> {
        if buffer.kind() != self.kind {
            return Err(TensorError::TypeMismatch {
                expected: self.kind,
                actual: buffer.kind(),
            });
        }
        if buffer.len() != self.len {
            return Err(TensorError::LengthMismatch {
                expected: self.len,
                actual: buffer.len(),
            });
        }
        self.replace_buffer(buffer.clone());
        Ok(self)
    }

    /// Consume the tensor and return its materialized buffer
    pub fn into_flat(mut self) -> FlatBuffer {
        self.materialize();
        match self.state {
            FillState::Materialized(buffer) => buffer,
            FillState::Uniform(value) => FlatBuffer::from_elem(self.kind, self.len, value),
        }
    }

    /// Reset the tensor to a uniform value.
    ///
    /// Any materialized buffer is dropped; the next flat read allocates a new
    /// one. Both bounds become the stored value.
    ///
    /// This never fails. The value is converted to the element kind first
    /// (integers truncate and wrap, `F32` rounds) and both bounds become the
    /// converted value, so filling a `U8` tensor with `300.0` stores and
    /// reports `44.0` rather than `300.0`. In-range integral values are
    /// stored unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use tenflat_core::{ElementKind, FlatBuffer, Tensor};
    ///
    /// let mut tensor = Tensor::new(ElementKind::U8, &[2]).unwrap();
    /// tensor.fill(1.0);
    /// assert_eq!(tensor.filling(), Some(1.0));
    /// assert_eq!(tensor.flat(), &FlatBuffer::from(vec![1u8, 1]));
    /// ```
    pub fn fill(&mut self, value: f64) -> &mut Self {
        let value = self.kind.coerce(value);
        self.state = FillState::Uniform(value);
        self.min = value;
        self.max = value;
        self
    }

    /// Eagerly materialize the tensor from a generator.
    ///
    /// `generator` is called exactly `len()` times, in increasing flat-index
    /// order, and each result is stored at the next slot. The first stored
    /// (converted) value seeds both bounds and later ones extend them; NaN
    /// results do not displace a non-NaN bound.
    ///
    /// # Examples
    ///
    /// ```
    /// use tenflat_core::{ElementKind, Tensor};
    ///
    /// let mut tensor = Tensor::new(ElementKind::U8, &[5, 4, 3]).unwrap();
    /// let mut next = 0.0;
    /// tensor.fill_with(|| {
    ///     next += 1.0;
    ///     next
    /// });
    /// assert_eq!(tensor.min(), 1.0);
    /// assert_eq!(tensor.max(), 60.0);
    /// assert_eq!(tensor.get(&[1, 0, 0]).unwrap(), 13.0);
    /// ```
    pub fn fill_with<F>(&mut self, mut generator: F) -> &mut Self
    where
        F: FnMut() -> f64,
    {
        let mut buffer = FlatBuffer::new(self.kind, self.len);
        let mut bounds: Option<(f64, f64)> = None;
        for index in 0..self.len {
            buffer.set(index, generator());
            let stored = buffer.get(index);
            bounds = Some(match bounds {
                None => (stored, stored),
                Some((lo, hi)) => (lo.min(stored), hi.max(stored)),
            });
        }
        if let Some((lo, hi)) = bounds {
            self.min = lo;
            self.max = hi;
        }
        tracing::trace!(kind = %self.kind, len = self.len, "tensor filled from generator");
        self.state = FillState::Materialized(buffer);
        self
    }

    /// Switch to the materialized state if needed and return the buffer
    pub(crate) fn materialize(&mut self) -> &mut FlatBuffer {
        if let FillState::Uniform(value) = self.state {
            tracing::trace!(kind = %self.kind, len = self.len, value, "materializing flat buffer");
            self.state = FillState::Materialized(FlatBuffer::from_elem(self.kind, self.len, value));
        }
        match &mut self.state {
            FillState::Materialized(buffer) => buffer,
            FillState::Uniform(_) => unreachable!("state was materialized above"),
        }
    }

    /// Install an owned buffer already validated for kind and length
    pub(crate) fn replace_buffer(&mut self, buffer: FlatBuffer) {
        if let Some((lo, hi)) = buffer.min_max() {
            self.min = lo;
            self.max = hi;
        }
        tracing::debug!(kind = %self.kind, len = self.len, "flat buffer replaced");
        self.state = FillState::Materialized(buffer);
    }
}

#[cfg(test)]
mod tests {
    use crate::{ElementKind, FlatBuffer, Tensor, TensorError};

    #[test]
    fn test_default_fill_is_zero() {
        let mut tensor = Tensor::new(ElementKind::U8, &[2]).unwrap();
        assert_eq!(tensor.get(&[0]).unwrap(), 0.0);
        assert_eq!(tensor.flat(), &FlatBuffer::from(vec![0u8, 0]));
    }

    #[test]
    fn test_scalar_fill() {
        let mut tensor = Tensor::new(ElementKind::U8, &[2]).unwrap();
        tensor.fill(1.0);
        assert_eq!(tensor.get(&[0]).unwrap(), 1.0);
        assert_eq!(tensor.flat(), &FlatBuffer::from(vec![1u8, 1]));
    }

    #[test]
    fn test_scalar_tensor() {
        let mut tensor = Tensor::new(ElementKind::U8, &[1]).unwrap();
        tensor.fill(1.0);
        assert_eq!(tensor.get(&[0]).unwrap(), 1.0);
        assert_eq!(tensor.flat(), &FlatBuffer::from(vec![1u8]));
        assert_eq!(tensor.rank(), 1);
        assert_eq!(tensor.len(), 1);
        assert_eq!(tensor.shape(), &[1]);
    }

    #[test]
    fn test_generator_fill_call_count() {
        let mut tensor = Tensor::new(ElementKind::U8, &[2]).unwrap();
        let mut calls = 0;
        tensor.fill_with(|| {
            calls += 1;
            1.0
        });
        assert_eq!(calls, 2);
        assert_eq!(tensor.get(&[0]).unwrap(), 1.0);
        assert_eq!(tensor.flat(), &FlatBuffer::from(vec![1u8, 1]));
    }

    #[test]
    fn test_generator_fill_order() {
        let mut tensor = Tensor::new(ElementKind::I32, &[2, 3]).unwrap();
        let mut next = 0.0;
        tensor.fill_with(|| {
            next += 1.0;
            next
        });
        assert_eq!(tensor.flat(), &FlatBuffer::from(vec![1i32, 2, 3, 4, 5, 6]));
        assert_eq!(tensor.filling(), None);
    }

    #[test]
    fn test_generator_fill_reseeds_bounds() {
        let mut tensor = Tensor::new(ElementKind::F64, &[3]).unwrap();
        tensor.fill(-100.0);
        tensor.fill_with(|| 5.0);
        assert_eq!((tensor.min(), tensor.max()), (5.0, 5.0));
    }

    #[test]
    fn test_fill_discards_buffer() {
        let mut tensor = Tensor::new(ElementKind::F32, &[4]).unwrap();
        tensor.fill_with(|| 2.5);
        assert!(tensor.filled());
        tensor.fill(7.0);
        assert!(!tensor.filled());
        assert_eq!(tensor.filling(), Some(7.0));
        assert_eq!((tensor.min(), tensor.max()), (7.0, 7.0));
        assert_eq!(tensor.flat().to_f64_vec(), vec![7.0; 4]);
    }

    #[test]
    fn test_fill_stores_converted_value() {
        let mut tensor = Tensor::new(ElementKind::U8, &[2]).unwrap();
        tensor.fill(300.0);
        assert_eq!(tensor.max(), 44.0);
        assert_eq!(tensor.flat(), &FlatBuffer::from(vec![44u8, 44]));
    }

    #[test]
    fn test_fill_bounds_follow_each_kind() {
        let cases = [
            (ElementKind::U8, 300.0, 44.0),
            (ElementKind::I8, 200.0, -56.0),
            (ElementKind::U16, -1.0, 65535.0),
            (ElementKind::I32, 2.9, 2.0),
            (ElementKind::F64, 300.0, 300.0),
        ];
        for (kind, value, stored) in cases {
            let mut tensor = Tensor::new(kind, &[3]).unwrap();
            tensor.fill(value);
            assert_eq!(tensor.filling(), Some(stored), "{}", kind);
            assert_eq!((tensor.min(), tensor.max()), (stored, stored), "{}", kind);
            assert_eq!(tensor.get(&[2]).unwrap(), stored, "{}", kind);
        }
    }

    #[test]
    fn test_nan_never_becomes_a_bound() {
        let mut tensor = Tensor::new(ElementKind::F64, &[2]).unwrap();
        tensor.set_flat(&FlatBuffer::from(vec![f64::NAN, 1.0])).unwrap();
        assert_eq!((tensor.min(), tensor.max()), (1.0, 1.0));

        let mut values = [2.0, f64::NAN, -3.0].into_iter();
        tensor.fill_with(|| values.next().unwrap_or(0.0));
        assert_eq!((tensor.min(), tensor.max()), (2.0, 2.0));

        let mut only_nan = Tensor::new(ElementKind::F32, &[2]).unwrap();
        only_nan.fill_with(|| f64::NAN);
        assert!(only_nan.min().is_nan() && only_nan.max().is_nan());
    }

    #[test]
    fn test_flat_is_idempotent() {
        let mut tensor = Tensor::new(ElementKind::I16, &[3]).unwrap();
        tensor.set(-5.0, &[1]).unwrap();
        let first = tensor.flat().clone();
        assert_eq!(tensor.flat(), &first);
        assert_eq!(first, FlatBuffer::from(vec![0i16, -5, 0]));
    }

    #[test]
    fn test_set_flat_copies() {
        let mut tensor = Tensor::new(ElementKind::U8, &[10]).unwrap();
        let mut source = FlatBuffer::from_elem(ElementKind::U8, 10, 1.0);
        tensor.set_flat(&source).unwrap();
        source.set(0, 9.0);
        assert_eq!(tensor.get(&[0]).unwrap(), 1.0);
        assert!(tensor.filled());
    }

    #[test]
    fn test_set_flat_rejects_kind() {
        let mut tensor = Tensor::new(ElementKind::U8, &[10]).unwrap();
        let err = tensor
            .set_flat(&FlatBuffer::from_elem(ElementKind::U16, 10, 1.0))
            .unwrap_err();
        assert_eq!(
            err,
            TensorError::TypeMismatch {
                expected: ElementKind::U8,
                actual: ElementKind::U16
            }
        );
        assert!(!tensor.filled());
    }

    #[test]
    fn test_set_flat_rejects_length() {
        let mut tensor = Tensor::new(ElementKind::U8, &[10]).unwrap();
        for len in [5, 15] {
            let err = tensor
                .set_flat(&FlatBuffer::from_elem(ElementKind::U8, len, 1.0))
                .unwrap_err();
            assert_eq!(
                err,
                TensorError::LengthMismatch {
                    expected: 10,
                    actual: len
                }
            );
        }
    }

    #[test]
    fn test_kind_checked_before_length() {
        let mut tensor = Tensor::new(ElementKind::U8, &[10]).unwrap();
        let err = tensor
            .set_flat(&FlatBuffer::from_elem(ElementKind::F64, 3, 1.0))
            .unwrap_err();
        assert!(matches!(err, TensorError::TypeMismatch { .. }));
    }

    #[test]
    fn test_flat_kind_matches_tensor() {
        for kind in ElementKind::ALL {
            let mut tensor = Tensor::new(kind, &[5, 4, 3]).unwrap();
            assert_eq!(tensor.flat().kind(), kind);
        }
    }

    #[test]
    fn test_into_flat() {
        let mut tensor = Tensor::new(ElementKind::I8, &[3]).unwrap();
        tensor.fill(-2.0);
        assert_eq!(tensor.into_flat(), FlatBuffer::from(vec![-2i8, -2, -2]));
    }
}
