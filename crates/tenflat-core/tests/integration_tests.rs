//! Integration tests for tenflat-core
//!
//! These tests exercise the public API end to end: construction, lazy fill,
//! addressing, transpose and copy working together.

use tenflat_core::{ElementKind, FlatBuffer, Nested, Tensor, TensorError};

fn counting(kind: ElementKind, shape: &[usize]) -> Tensor {
    let mut tensor = Tensor::new(kind, shape).unwrap();
    let mut next = 0.0;
    tensor.fill_with(|| {
        next += 1.0;
        next
    });
    tensor
}

const SHAPES: [&[usize]; 5] = [
    &[1, 20, 30],
    &[25, 24, 1],
    &[1, 1, 1, 1],
    &[25, 25, 25, 25],
    &[1],
];

#[test]
fn test_length_is_product_of_depths() {
    for shape in SHAPES {
        let tensor = Tensor::new(ElementKind::U8, shape).unwrap();
        assert_eq!(tensor.len(), shape.iter().product::<usize>());
    }
}

#[test]
fn test_rank_is_shape_length() {
    for shape in SHAPES {
        let tensor = Tensor::new(ElementKind::U8, shape).unwrap();
        assert_eq!(tensor.rank(), shape.len());
    }
}

#[test]
fn test_shape_is_supplied_shape() {
    for shape in SHAPES {
        let tensor = Tensor::new(ElementKind::U8, shape).unwrap();
        assert_eq!(tensor.shape(), shape);
    }
}

#[test]
fn test_thirteen_axis_shape() {
    let shape = [25usize; 13];
    let tensor = Tensor::new(ElementKind::U8, &shape).unwrap();
    assert_eq!(tensor.rank(), 13);
    assert_eq!(tensor.len(), 25usize.pow(13));
    assert_eq!(tensor.strides()[12], 1);
    assert_eq!(tensor.strides()[11], 25);
    // nothing is allocated for an unmaterialized tensor
    assert!(!tensor.filled());
}

#[test]
fn test_million_unit_dimensions() {
    let shape = vec![1usize; 1_000_000];
    let tensor = Tensor::new(ElementKind::U8, &shape).unwrap();
    assert_eq!(tensor.rank(), 1_000_000);
    assert_eq!(tensor.len(), 1);

    let array = tensor.array();
    assert_eq!(array.depth(), 1_000_000);
    assert_eq!(array.flatten(), vec![0.0]);
    assert!(array == tensor.t().array());
}

#[test]
fn test_strides() {
    let cases: [(&[usize], &[usize]); 3] = [
        (&[1, 20, 30], &[600, 30, 1]),
        (&[25, 24, 1], &[24, 1, 1]),
        (&[1, 1, 1, 1], &[1, 1, 1, 1]),
    ];
    for (shape, strides) in cases {
        let tensor = Tensor::new(ElementKind::U8, shape).unwrap();
        assert_eq!(tensor.strides(), strides);
    }
}

#[test]
fn test_typed_buffers_for_every_kind() {
    for kind in ElementKind::ALL {
        let mut tensor = Tensor::new(kind, &[5, 4, 3]).unwrap();
        let flat = tensor.flat();
        assert_eq!(flat.kind(), kind);
        assert_eq!(flat.len(), 60);
    }
    let mut tensor = Tensor::new(ElementKind::F32, &[2]).unwrap();
    assert_eq!(tensor.flat().as_slice::<f32>(), Some(&[0.0f32, 0.0][..]));
    assert!(tensor.flat().as_slice::<f64>().is_none());
}

#[test]
fn test_construction_rejections() {
    let rejected: [&[f64]; 4] = [&[], &[0.0], &[-1.0], &[1.05]];
    for shape in rejected {
        assert!(matches!(
            Tensor::from_numeric_shape(ElementKind::U8, shape),
            Err(TensorError::InvalidShape { .. })
        ));
    }
    assert!(Tensor::new(ElementKind::U8, &[]).is_err());
    assert!(Tensor::new(ElementKind::U8, &[0]).is_err());
}

#[test]
fn test_bulk_replace_validation() {
    let mut tensor = Tensor::new(ElementKind::U8, &[10]).unwrap();
    tensor
        .set_flat(&FlatBuffer::from_elem(ElementKind::U8, 10, 1.0))
        .unwrap();
    assert_eq!(tensor.flat().to_f64_vec(), vec![1.0; 10]);

    assert!(matches!(
        tensor.set_flat(&FlatBuffer::from_elem(ElementKind::U16, 10, 1.0)),
        Err(TensorError::TypeMismatch { .. })
    ));
    for len in [5, 15] {
        assert!(matches!(
            tensor.set_flat(&FlatBuffer::from_elem(ElementKind::U8, len, 1.0)),
            Err(TensorError::LengthMismatch { .. })
        ));
    }
}

#[test]
fn test_transpose_of_transpose() {
    let tensor = counting(ElementKind::U8, &[5, 4, 3]);
    let back = tensor.t().t();
    assert_eq!(back.array(), tensor.array());
    assert_eq!(back.max(), tensor.max());
    assert_eq!(back.min(), tensor.min());
}

#[test]
fn test_not_equal_to_its_transpose() {
    let tensor = counting(ElementKind::U8, &[5, 4, 3]);
    let transposed = tensor.t();
    assert_eq!(transposed.max(), tensor.max());
    assert_eq!(transposed.min(), tensor.min());
    assert_ne!(transposed.array(), tensor.array());
}

#[test]
fn test_counting_bounds() {
    let tensor = counting(ElementKind::U8, &[5, 4, 3]);
    assert_eq!(tensor.max(), tensor.len() as f64);
    assert_eq!(tensor.min(), 1.0);
}

#[test]
fn test_copy_without_new_tensor() {
    let mut tensor1 = Tensor::new(ElementKind::U8, &[5, 4, 3]).unwrap();
    let mut tensor2 = Tensor::new(ElementKind::U8, &[6, 10]).unwrap();
    tensor2.fill_with(|| 0.0);
    let expected = tensor2.array();
    let returned: *const Tensor = tensor1.copy_from(&tensor2);
    assert!(std::ptr::eq(returned, &tensor1));
    assert_eq!(tensor1.copy_from(&tensor2).array(), expected);
}

#[test]
fn test_copy_into_new_tensor() {
    let tensor1 = Tensor::new(ElementKind::U8, &[5, 4, 3]).unwrap();
    let tensor2 = Tensor::new(ElementKind::U8, &[6, 10]).unwrap();
    let copy = Tensor::instantiate_copy(&tensor2);
    assert!(!std::ptr::eq(&copy, &tensor1));
    assert_eq!(copy.array(), tensor2.array());
}

#[test]
fn test_bounds_before_any_fill_are_zero() {
    let tensor = Tensor::new(ElementKind::I32, &[3, 3]).unwrap();
    assert_eq!((tensor.min(), tensor.max()), (0.0, 0.0));
}

#[test]
fn test_flat_index_mode_on_high_rank() {
    let mut tensor = counting(ElementKind::U16, &[2, 3, 4]);
    assert_eq!(tensor.get(&[23]).unwrap(), 24.0);
    tensor.set(100.0, &[23]).unwrap();
    assert_eq!(tensor.get(&[1, 2, 3]).unwrap(), 100.0);
    assert_eq!(tensor.max(), 100.0);
}

#[test]
fn test_nested_view_of_matrix() {
    let tensor = counting(ElementKind::I8, &[2, 2]);
    let expected = Nested::List(vec![
        Nested::List(vec![Nested::Value(1.0), Nested::Value(2.0)]),
        Nested::List(vec![Nested::Value(3.0), Nested::Value(4.0)]),
    ]);
    assert_eq!(tensor.array(), expected);
}

#[test]
fn test_from_buffer_then_transpose() {
    let buffer = FlatBuffer::from(vec![1.5f64, -2.0, 3.25, 0.0, 8.0, -9.5]);
    let tensor = Tensor::from_buffer(&buffer, &[2, 3]).unwrap();
    let mut transposed = tensor.transpose(Some(&[1, 0][..])).unwrap();
    assert_eq!(transposed.shape(), &[3, 2]);
    assert_eq!(transposed.get(&[2, 1]).unwrap(), -9.5);
    assert_eq!((transposed.min(), transposed.max()), (-9.5, 8.0));
    assert_eq!(
        transposed.into_flat(),
        FlatBuffer::from(vec![1.5f64, 0.0, -2.0, 8.0, 3.25, -9.5])
    );
}
