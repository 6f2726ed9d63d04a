//! Read-only N-dimensional projections
//!
//! [`Tensor::array`] builds nested lists mirroring the shape, mainly for
//! inspection and tests. [`Tensor::to_ndarray`] produces the dynamic-rank
//! ndarray used elsewhere in the scirs2 ecosystem. Neither materializes the
//! tensor.

use super::types::Tensor;
use scirs2_core::ndarray_ext::{Array, IxDyn};
use std::fmt;

/// Nested-list view of a tensor.
///
/// Every axis contributes one level of [`Nested::List`]; the innermost
/// entries are [`Nested::Value`]s.
///
/// Construction, traversal, comparison, cloning and dropping all use an
/// explicit work stack, so a view of a tensor with a very large rank does not
/// grow the call stack.
///
/// # Examples
///
/// ```
/// use tenflat_core::{ElementKind, Nested, Tensor};
///
/// let mut tensor = Tensor::new(ElementKind::U8, &[2, 2]).unwrap();
/// tensor.set(3.0, &[1, 0]).unwrap();
///
/// let expected = Nested::List(vec![
///     Nested::List(vec![Nested::Value(0.0), Nested::Value(0.0)]),
///     Nested::List(vec![Nested::Value(3.0), Nested::Value(0.0)]),
/// ]);
/// assert_eq!(tensor.array(), expected);
/// assert_eq!(tensor.array().to_string(), "[[0, 0], [3, 0]]");
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Nested {
    /// A single element
    Value(f64),
    /// One level of the shape
    List(Vec<Nested>),
}

/// Pending step of an iterative clone
enum CloneStep<'a> {
    Visit(&'a Nested),
    Collect(usize),
}

impl Nested {
    /// Number of list levels above the leaves, following first children
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut node = self;
        while let Nested::List(items) = node {
            depth += 1;
            match items.first() {
                Some(first) => node = first,
                None => break,
            }
        }
        depth
    }

    /// Leaves in row-major order
    pub fn flatten(&self) -> Vec<f64> {
        let mut out = Vec::new();
        let mut stack = vec![std::slice::from_ref(self).iter()];
        while let Some(top) = stack.last_mut() {
            match top.next() {
                Some(Nested::Value(value)) => out.push(*value),
                Some(Nested::List(items)) => stack.push(items.iter()),
                None => {
                    stack.pop();
                }
            }
        }
        out
    }
}

impl Clone for Nested {
    fn clone(&self) -> Self {
        let mut built: Vec<Nested> = Vec::new();
        let mut steps = vec![CloneStep::Visit(self)];
        while let Some(step) = steps.pop() {
            match step {
                CloneStep::Visit(Nested::Value(value)) => built.push(Nested::Value(*value)),
                CloneStep::Visit(Nested::List(items)) => {
                    steps.push(CloneStep::Collect(items.len()));
                    steps.extend(items.iter().rev().map(CloneStep::Visit));
                }
                CloneStep::Collect(count) => {
                    let children = built.split_off(built.len() - count);
                    built.push(Nested::List(children));
                }
            }
        }
        built
            .pop()
            .unwrap_or_else(|| unreachable!("the root is always rebuilt"))
    }
}

impl PartialEq for Nested {
    fn eq(&self, other: &Self) -> bool {
        let mut stack = vec![(self, other)];
        while let Some(pair) = stack.pop() {
            match pair {
                (Nested::Value(a), Nested::Value(b)) => {
                    if a != b {
                        return false;
                    }
                }
                (Nested::List(a), Nested::List(b)) => {
                    if a.len() != b.len() {
                        return false;
                    }
                    stack.extend(a.iter().zip(b.iter()));
                }
                _ => return false,
            }
        }
        true
    }
}

impl Drop for Nested {
    fn drop(&mut self) {
        if let Nested::List(items) = self {
            let mut pending = std::mem::take(items);
            while let Some(mut node) = pending.pop() {
                if let Nested::List(children) = &mut node {
                    pending.append(children);
                }
            }
        }
    }
}

impl fmt::Display for Nested {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let items = match self {
            Nested::Value(value) => return write!(f, "{}", value),
            Nested::List(items) => items,
        };
        f.write_str("[")?;
        // (remaining children, nothing written yet at this level)
        let mut stack = vec![(items.iter(), true)];
        while let Some((iter, first)) = stack.last_mut() {
            match iter.next() {
                Some(item) => {
                    if !*first {
                        f.write_str(", ")?;
                    }
                    *first = false;
                    match item {
                        Nested::Value(value) => write!(f, "{}", value)?,
                        Nested::List(children) => {
                            f.write_str("[")?;
                            stack.push((children.iter(), true));
                        }
                    }
                }
                None => {
                    f.write_str("]")?;
                    stack.pop();
                }
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Nested {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl Tensor {
    /// Nested-list projection of the logical values
    ///
    /// Built bottom-up: the leaves are read in flat order, then grouped one
    /// axis at a time from the last axis to the first.
    pub fn array(&self) -> Nested {
        let mut level: Vec<Nested> = (0..self.len)
            .map(|i| Nested::Value(self.value_at(i)))
            .collect();
        for &depth in self.shape[1..].iter().rev() {
            let mut items = level.into_iter();
            let groups = items.len() / depth;
            level = (0..groups)
                .map(|_| Nested::List(items.by_ref().take(depth).collect()))
                .collect();
        }
        Nested::List(level)
    }

    /// Copy the logical values into a dynamic-rank ndarray
    ///
    /// # Examples
    ///
    /// ```
    /// use tenflat_core::{ElementKind, Tensor};
    ///
    /// let mut tensor = Tensor::new(ElementKind::I16, &[2, 3]).unwrap();
    /// tensor.set(-1.0, &[1, 2]).unwrap();
    /// let array = tensor.to_ndarray();
    /// assert_eq!(array.shape(), &[2, 3]);
    /// assert_eq!(array[&[1usize, 2][..]], -1.0);
    /// ```
    pub fn to_ndarray(&self) -> Array<f64, IxDyn> {
        let values: Vec<f64> = (0..self.len).map(|i| self.value_at(i)).collect();
        Array::from_shape_vec(IxDyn(&self.shape), values)
            .unwrap_or_else(|_| unreachable!("length always equals the shape product"))
    }
}
