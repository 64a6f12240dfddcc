use posedata_base::{Tensor, TensorError};

#[test]
fn test_tensor_new_valid() {
    let tensor = Tensor::new(vec![2, 3], vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
    assert_eq!(tensor.shape, vec![2, 3]);
    assert_eq!(tensor.data, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
}

#[test]
fn test_tensor_new_shape_mismatch() {
    let result = Tensor::new(vec![2, 3], vec![1.0, 2.0, 3.0]);
    assert!(matches!(
        result,
        Err(TensorError::ShapeMismatch { expected: 6, got: 3 })
    ));
}

#[test]
fn test_tensor_new_overflow() {
    let result = Tensor::<f32>::new(vec![usize::MAX, 2], vec![]);
    assert!(matches!(result, Err(TensorError::ShapeOverflow)));
}

#[test]
fn test_tensor_hwc() {
    let tensor = Tensor::new(vec![4, 5, 3], vec![0u8; 60]).unwrap();
    assert_eq!(tensor.hwc().unwrap(), (4, 5, 3));
    assert_eq!(tensor.ndim(), 3);
    assert_eq!(tensor.len(), 60);
}

#[test]
fn test_tensor_hwc_rejects_wrong_rank() {
    let tensor = Tensor::new(vec![4, 5], vec![0u8; 20]).unwrap();
    assert_eq!(
        tensor.hwc(),
        Err(TensorError::RankMismatch { expected: 3, got: 2 })
    );
}

#[test]
fn test_tensor_map_keeps_shape() {
    let tensor = Tensor::new(vec![1, 2, 1], vec![10u8, 255]).unwrap();
    let floats = tensor.map(|&v| v as f32 / 255.0);
    assert_eq!(floats.shape, vec![1, 2, 1]);
    assert_eq!(floats.data, vec![10.0 / 255.0, 1.0]);
}

#[test]
fn test_tensor_is_empty() {
    let empty = Tensor::<f32>::new(vec![0], vec![]).unwrap();
    assert!(empty.is_empty());

    let not_empty = Tensor::new(vec![2], vec![1.0, 2.0]).unwrap();
    assert!(!not_empty.is_empty());
}

#[test]
fn test_tensor_debug_truncates_data() {
    let tensor = Tensor::new(vec![4, 4], vec![7u8; 16]).unwrap();
    let debug_str = format!("{:?}", tensor);
    assert!(debug_str.contains("shape"));
    assert!(debug_str.contains("len: 16"));
}
