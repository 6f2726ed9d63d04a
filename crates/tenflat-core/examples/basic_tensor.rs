//! Basic tensor creation and manipulation examples.
//!
//! This example demonstrates the core functionality of tenflat-core:
//! - Creating tensors of different element kinds
//! - Lazy scalar fills and generator fills
//! - Converting between coordinates and flat indices
//! - Transposing and copying tensors
//!
//! Run with:
//! ```bash
//! cargo run --example basic_tensor
//! ```

use tenflat_core::{ElementKind, FlatBuffer, Tensor, TensorError};

fn main() -> anyhow::Result<()> {
    println!("=== tenflat Core: Basic Tensor Examples ===\n");

    // Example 1: Creating tensors
    example_creation()?;

    // Example 2: Lazy and eager fills
    example_fill()?;

    // Example 3: Addressing
    example_indexing()?;

    // Example 4: Transpose and copy
    example_transpose_copy()?;

    // Example 5: Error handling
    example_errors();

    println!("\n=== All examples completed successfully! ===");
    Ok(())
}

fn example_creation() -> anyhow::Result<()> {
    println!("--- Example 1: Tensor Creation ---");

    for kind in ElementKind::ALL {
        let tensor = Tensor::new(kind, &[5, 4, 3])?;
        println!(
            "  {:>3}: shape {:?}, strides {:?}, {} elements",
            kind,
            tensor.shape(),
            tensor.strides(),
            tensor.len()
        );
    }

    let buffer = FlatBuffer::from(vec![1.5f32, -2.0, 3.25, 0.0]);
    let tensor = Tensor::from_buffer(&buffer, &[2, 2])?;
    println!("\nFrom a typed buffer: {}", tensor);
    println!();
    Ok(())
}

fn example_fill() -> anyhow::Result<()> {
    println!("--- Example 2: Fills ---");

    let mut tensor = Tensor::new(ElementKind::U8, &[2, 3])?;
    tensor.fill(300.0);
    println!("Uniform fill of 300 into u8 stores {:?}", tensor.filling());
    println!("  Materialized: {}", tensor.filled());

    let mut next = 0.0;
    tensor.fill_with(|| {
        next += 1.0;
        next
    });
    println!("Generator fill: {}", tensor.array());
    println!("  Bounds: [{}, {}]", tensor.min(), tensor.max());
    println!("  Materialized: {}", tensor.filled());
    println!();
    Ok(())
}

fn example_indexing() -> anyhow::Result<()> {
    println!("--- Example 3: Addressing ---");

    let mut tensor = Tensor::new(ElementKind::I16, &[5, 4, 3])?;
    let index = tensor.index(&[2, 1, 2])?;
    println!("Coordinates [2, 1, 2] -> flat index {}", index);
    println!("Flat index {} -> coordinates {:?}", index, tensor.coordinates(index));

    tensor.set(-12.0, &[2, 1, 2])?.set(40.0, &[0])?;
    println!("After two writes:");
    println!("  value at [2, 1, 2]: {}", tensor.get(&[2, 1, 2])?);
    println!("  value at flat 0: {}", tensor.get(&[0])?);
    println!("  Bounds: [{}, {}]", tensor.min(), tensor.max());
    println!();
    Ok(())
}

fn example_transpose_copy() -> anyhow::Result<()> {
    println!("--- Example 4: Transpose and Copy ---");

    let mut tensor = Tensor::new(ElementKind::F64, &[2, 3])?;
    let mut next = 0.0;
    tensor.fill_with(|| {
        next += 1.0;
        next
    });
    println!("Original:   {}", tensor.array());
    println!("Transposed: {}", tensor.t().array());

    let cycled = Tensor::new(ElementKind::U8, &[2, 3, 4])?.transpose(Some(&[2, 0, 1][..]))?;
    println!("Shape [2, 3, 4] under axes [2, 0, 1]: {:?}", cycled.shape());

    let mut target = Tensor::new(ElementKind::U8, &[1])?;
    target.copy_from(&tensor);
    println!("Copied into target: {}", target);

    let copy = Tensor::instantiate_copy(&tensor);
    println!("Fresh copy equals source: {}", copy.array() == tensor.array());
    println!();
    Ok(())
}

fn example_errors() {
    println!("--- Example 5: Errors ---");

    match Tensor::from_numeric_shape(ElementKind::U8, &[2.0, 1.05]) {
        Err(TensorError::InvalidShape { reason, .. }) => println!("Rejected shape: {}", reason),
        other => println!("Unexpected: {:?}", other),
    }

    if let Ok(tensor) = Tensor::new(ElementKind::U8, &[2, 2]) {
        if let Err(err) = tensor.index(&[0, 0, 0]) {
            println!("Arity error: {}", err);
        }
    }
}
