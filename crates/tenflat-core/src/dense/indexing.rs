//! Coordinate ↔ flat index conversion and element access
//!
//! Conversions are unchecked: coordinates are not compared against the shape
//! and flat indices are not compared against the length. Out-of-range input
//! produces whatever the stride arithmetic yields, and reading or writing a
//! slot past the end of the buffer panics like any slice access.

use super::types::Tensor;
use crate::error::{TensorError, TensorResult};

impl Tensor {
    /// Flat index of a coordinate tuple.
    ///
    /// A single coordinate is taken to be a flat index already and is returned
    /// unchanged, whatever the rank. This lets [`get`](Tensor::get) and
    /// [`set`](Tensor::set) address any tensor by flat position.
    ///
    /// # Errors
    ///
    /// [`TensorError::CoordinateArityMismatch`] when more than one coordinate
    /// is given and the count differs from the rank.
    ///
    /// # Examples
    ///
    /// ```
    /// use tenflat_core::{ElementKind, Tensor};
    ///
    /// let tensor = Tensor::new(ElementKind::U8, &[5, 4, 3]).unwrap();
    /// assert_eq!(tensor.index(&[1, 2, 1]).unwrap(), 12 + 6 + 1);
    /// assert_eq!(tensor.index(&[42]).unwrap(), 42);
    /// assert!(tensor.index(&[1, 2]).is_err());
    /// ```
    pub fn index(&self, coordinates: &[usize]) -> TensorResult<usize> {
        if coordinates.len() == 1 {
            return Ok(coordinates[0]);
        }
        if coordinates.len() != self.rank() {
            return Err(TensorError::CoordinateArityMismatch {
                expected: self.rank(),
                actual: coordinates.len(),
            });
        }
        Ok(coordinates
            .iter()
            .zip(self.strides.iter())
            .map(|(c, s)| c * s)
            .sum())
    }

    /// Coordinates of a flat index, one per axis.
    ///
    /// Inverse of [`index`](Tensor::index) for every index in `0..len()`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tenflat_core::{ElementKind, Tensor};
    ///
    /// let tensor = Tensor::new(ElementKind::U8, &[5, 4, 3]).unwrap();
    /// assert_eq!(tensor.coordinates(19), vec![1, 2, 1]);
    /// ```
    pub fn coordinates(&self, index: usize) -> Vec<usize> {
        let mut rest = index;
        self.strides
            .iter()
            .map(|&stride| {
                let div = rest / stride;
                rest -= div * stride;
                div
            })
            .collect()
    }

    /// Read the element at `coordinates`, materializing the buffer if needed.
    ///
    /// One coordinate addresses the flat buffer directly (see
    /// [`index`](Tensor::index)).
    ///
    /// # Errors
    ///
    /// [`TensorError::CoordinateArityMismatch`] for a bad coordinate count.
    ///
    /// # Panics
    ///
    /// Panics if the resolved flat index is not below `len()`.
    pub fn get(&mut self, coordinates: &[usize]) -> TensorResult<f64> {
        let index = self.index(coordinates)?;
        Ok(self.materialize().get(index))
    }

    /// Write `value` at `coordinates`, materializing the buffer if needed.
    ///
    /// The bounds are updated incrementally from the replaced value: `max`
    /// rises only when the old value was the current maximum and the new one
    /// is larger, and `min` falls only when the old value was the current
    /// minimum and the new one is smaller. Overwriting the only extreme
    /// element with a less extreme value leaves that bound stale. This rule is
    /// kept on purpose; call [`set_flat`](Tensor::set_flat) with the current
    /// buffer to force a rescan.
    ///
    /// Both the comparison and the new bound use the converted value, so
    /// writing `258.0` into a `U8` tensor stores and reports `2.0`.
    ///
    /// # Errors
    ///
    /// [`TensorError::CoordinateArityMismatch`] for a bad coordinate count.
    ///
    /// # Panics
    ///
    /// Panics if the resolved flat index is not below `len()`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tenflat_core::{ElementKind, Tensor};
    ///
    /// let mut tensor = Tensor::new(ElementKind::I32, &[2, 2]).unwrap();
    /// tensor.set(5.0, &[0, 1]).unwrap().set(-3.0, &[1, 1]).unwrap();
    /// assert_eq!(tensor.get(&[0, 1]).unwrap(), 5.0);
    /// assert_eq!(tensor.get(&[3]).unwrap(), -3.0);
    /// assert_eq!((tensor.min(), tensor.max()), (-3.0, 5.0));
    /// ```
    pub fn set(&mut self, value: f64, coordinates: &[usize]) -> TensorResult<&mut Self> {
        let index = self.index(coordinates)?;
        let buffer = self.materialize();
        let old = buffer.get(index);
        buffer.set(index, value);
        let stored = buffer.get(index);
        if old == self.max && stored > old {
            self.max = stored;
        }
        if old == self.min && stored < old {
            self.min = stored;
        }
        Ok(self)
    }
}
