//! Whole-tensor copies
//!
//! Copies never alias: a materialized source buffer is cloned, so the two
//! tensors evolve independently afterwards.

use super::types::Tensor;

impl Tensor {
    /// Overwrite this tensor with the complete state of `other`.
    ///
    /// Kind, shape, strides, length, fill state (buffer included) and bounds
    /// are all taken from `other`, whatever this tensor held before. Returns
    /// the receiver for chaining.
    ///
    /// # Examples
    ///
    /// ```
    /// use tenflat_core::{ElementKind, Tensor};
    ///
    /// let mut target = Tensor::new(ElementKind::U8, &[5, 4, 3]).unwrap();
    /// let mut source = Tensor::new(ElementKind::F32, &[6, 10]).unwrap();
    /// source.fill_with(|| 0.5);
    ///
    /// target.copy_from(&source);
    /// assert_eq!(target.kind(), ElementKind::F32);
    /// assert_eq!(target.shape(), &[6, 10]);
    /// assert_eq!(target.array(), source.array());
    /// ```
    pub fn copy_from(&mut self, other: &Tensor) -> &mut Self {
        self.kind = other.kind;
        self.shape = other.shape.clone();
        self.strides = other.strides.clone();
        self.len = other.len;
        self.state = other.state.clone();
        self.min = other.min;
        self.max = other.max;
        self
    }

    /// Build a new, independent tensor with the complete state of `other`.
    ///
    /// Equivalent to creating a tensor of `other`'s kind and shape and then
    /// calling [`copy_from`](Tensor::copy_from), and to `other.clone()`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tenflat_core::{ElementKind, Tensor};
    ///
    /// let mut source = Tensor::new(ElementKind::I32, &[2, 2]).unwrap();
    /// source.fill(3.0);
    ///
    /// let mut copy = Tensor::instantiate_copy(&source);
    /// copy.set(9.0, &[0, 0]).unwrap();
    /// assert_eq!(source.get(&[0, 0]).unwrap(), 3.0);
    /// ```
    pub fn instantiate_copy(other: &Tensor) -> Tensor {
        let mut tensor = Tensor::with_valid_shape(other.kind, &other.shape);
        tensor.copy_from(other);
        tensor
    }
}
