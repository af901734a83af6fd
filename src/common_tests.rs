use super::*;

#[test]
fn test_check_size() {
    assert_eq!(check_size(1), Ok(1));
    assert_eq!(check_size(1024), Ok(1024));
    assert_eq!(check_size(0), Err(FftError::NotPowerOfTwo { len: 0 }));
    assert_eq!(check_size(10), Err(FftError::NotPowerOfTwo { len: 10 }));
}

#[test]
fn test_check_signal_rejects_mismatch_first() {
    let err = check_signal(&[0.0; 3], &[0.0; 4]).unwrap_err();
    assert_eq!(err, FftError::LengthMismatch { real: 3, imag: 4 });
    assert!(err.is_invalid_size());
}

#[test]
fn test_check_fixed() {
    assert_eq!(check_fixed(&[0.0; 8], &[0.0; 8], 8), Ok(()));
    let err = check_fixed(&[0.0; 16], &[0.0; 16], 8).unwrap_err();
    assert_eq!(
        err,
        FftError::UnsupportedSize {
            expected: 8,
            actual: 16
        }
    );
    assert!(!err.is_invalid_size());
}

#[test]
fn test_error_display() {
    assert_eq!(
        FftError::NotPowerOfTwo { len: 10 }.to_string(),
        "size must be a power of 2, got 10"
    );
    let msg = FftError::ValidationFailed {
        implementation: "unrolled-8".to_string(),
        checkpoint: Checkpoint::Stage(2),
        error: 0.5,
        tolerance: 1e-9,
    }
    .to_string();
    assert!(msg.contains("unrolled-8"), "got: {msg}");
    assert!(msg.contains("after stage 2"), "got: {msg}");
}

#[test]
fn test_checkpoint_order() {
    assert!(Checkpoint::Stage(1) < Checkpoint::Stage(2));
    assert!(Checkpoint::Stage(9) < Checkpoint::Reorder);
    assert!(Checkpoint::Reorder < Checkpoint::Final);
    assert_eq!(Checkpoint::Reorder.to_string(), "after reordering");
}
