use rdm_types::{DType, Error, NdArray};

// ── Construction ────────────────────────────────────────────────

#[test]
fn zeros_has_product_length() {
    let a = NdArray::zeros(DType::F32, &[4, 3]).unwrap();
    assert_eq!(a.len(), 12);
    assert_eq!(a.ndim(), 2);
    assert_eq!(a.shape(), &[4, 3]);
    assert!(a.data().iter().all(|v| *v == 0.0));
}

#[test]
fn from_vec_checks_shape() {
    let err = NdArray::from_vec(DType::F64, &[2, 2], vec![1.0, 2.0, 3.0]).unwrap_err();
    assert_eq!(
        err,
        Error::ShapeMismatch {
            shape: vec![2, 2],
            expected: 4,
            actual: 3
        }
    );
}

#[test]
fn overflowing_shapes_are_rejected() {
    let shape = [usize::MAX, 2];
    assert_eq!(
        NdArray::zeros(DType::F32, &shape).unwrap_err(),
        Error::ShapeTooLarge { shape: shape.to_vec() }
    );
    assert!(matches!(
        NdArray::from_vec(DType::F32, &shape, Vec::new()),
        Err(Error::ShapeTooLarge { .. })
    ));
}

// ── Buffers ─────────────────────────────────────────────────────

#[test]
fn clone_shares_buffer_until_write() {
    let a = NdArray::filled(DType::U32, &[2, 2], 7.0).unwrap();
    let mut b = a.clone();
    assert!(a.shares_buffer(&b));

    b.data_mut()[0] = 1.0;
    assert!(!a.shares_buffer(&b));
    assert_eq!(a.data()[0], 7.0);
    assert_eq!(b.data()[0], 1.0);
}

#[test]
fn deep_clone_owns_buffer() {
    let a = NdArray::zeros(DType::F32, &[3]).unwrap();
    let b = a.deep_clone();
    assert!(!a.shares_buffer(&b));
    assert_eq!(a, b);
}

// ── Equality & display ──────────────────────────────────────────

#[test]
fn equality_includes_dtype() {
    let a = NdArray::zeros(DType::F32, &[2]).unwrap();
    let b = NdArray::zeros(DType::F64, &[2]).unwrap();
    assert_ne!(a, b);
}

#[test]
fn display_names_dtype_and_shape() {
    let a = NdArray::zeros(DType::U16, &[4, 4]).unwrap();
    assert_eq!(a.to_string(), "<array uint16 [4, 4]>");
}
