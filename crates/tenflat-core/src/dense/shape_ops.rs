//! Axis permutation (transpose)

use super::types::Tensor;
use crate::buffer::FlatBuffer;
use crate::error::{TensorError, TensorResult};

impl Tensor {
    /// Permute the axes into a new tensor.
    ///
    /// `axes[i]` names the source axis that becomes axis `i` of the result,
    /// so `shape()[axes[i]]` is the new depth of axis `i` and the element at
    /// source coordinates `c` lands at `[c[axes[0]], c[axes[1]], ..]`.
    /// `None` reverses all axes. The receiver is left untouched (it is not
    /// even materialized) and the result owns a fresh buffer whose bounds are
    /// rescanned.
    ///
    /// # Errors
    ///
    /// [`TensorError::InvalidPermutation`] if `axes` is not a permutation of
    /// `0..rank()`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tenflat_core::{ElementKind, Tensor};
    ///
    /// let mut tensor = Tensor::new(ElementKind::U8, &[2, 3, 4]).unwrap();
    /// tensor.set(7.0, &[1, 2, 3]).unwrap();
    ///
    /// let mut permuted = tensor.transpose(Some(&[2, 0, 1][..])).unwrap();
    /// assert_eq!(permuted.shape(), &[4, 2, 3]);
    /// assert_eq!(permuted.get(&[3, 1, 2]).unwrap(), 7.0);
    ///
    /// let reversed = tensor.transpose(None).unwrap();
    /// assert_eq!(reversed.shape(), &[4, 3, 2]);
    /// ```
    pub fn transpose(&self, axes: Option<&[usize]>) -> TensorResult<Tensor> {
        match axes {
            Some(axes) => {
                validate_permutation(axes, self.rank())?;
                Ok(self.permuted(axes))
            }
            None => Ok(self.t()),
        }
    }

    /// Transpose with all axes reversed.
    ///
    /// # Examples
    ///
    /// ```
    /// use tenflat_core::{ElementKind, Tensor};
    ///
    /// let tensor = Tensor::new(ElementKind::F64, &[5, 4, 3]).unwrap();
    /// assert_eq!(tensor.t().shape(), &[3, 4, 5]);
    /// assert_eq!(tensor.t().t().shape(), tensor.shape());
    /// ```
    pub fn t(&self) -> Tensor {
        let axes: Vec<usize> = (0..self.rank()).rev().collect();
        self.permuted(&axes)
    }

    /// Gather into a new tensor; `axes` must already be a valid permutation
    fn permuted(&self, axes: &[usize]) -> Tensor {
        let new_shape: Vec<usize> = axes.iter().map(|&axis| self.shape[axis]).collect();
        let mut tensor = Tensor::with_valid_shape(self.kind, &new_shape);
        let mut flat = FlatBuffer::new(self.kind, self.len);
        let mut ordered = vec![0usize; axes.len()];
        for i in 0..self.len {
            let source = self.coordinates(i);
            for (slot, &axis) in ordered.iter_mut().zip(axes) {
                *slot = source[axis];
            }
            let target: usize = ordered
                .iter()
                .zip(tensor.strides.iter())
                .map(|(c, s)| c * s)
                .sum();
            flat.set(target, self.value_at(i));
        }
        tracing::debug!(
            from = ?self.shape(),
            to = ?new_shape,
            axes = ?axes,
            "tensor transposed"
        );
        tensor.replace_buffer(flat);
        tensor
    }
}

fn validate_permutation(axes: &[usize], rank: usize) -> TensorResult<()> {
    let mut seen = vec![false; rank];
    let valid = axes.len() == rank
        && axes.iter().all(|&axis| {
            axis < rank && !std::mem::replace(&mut seen[axis], true)
        });
    if valid {
        Ok(())
    } else {
        Err(TensorError::InvalidPermutation {
            axes: axes.to_vec(),
            rank,
        })
    }
}
