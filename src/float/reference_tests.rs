use super::*;
use core::f64::consts::PI;
use num_complex::Complex64;

fn assert_complex_close(val: Complex64, expected: Complex64) {
    let tolerance = 1e-9;
    let diff = (val - expected).l1_norm();
    assert!(diff < tolerance, "Error. Expected: {}, Got: {}", expected, val);
}

/// O(N²) unitary DFT.
fn naive_dft(real: &[f64], imag: &[f64], forward: bool) -> Vec<Complex64> {
    let n = real.len();
    let sign = if forward { -1.0 } else { 1.0 };
    (0..n)
        .map(|k| {
            let mut sum = Complex64::new(0.0, 0.0);
            for j in 0..n {
                let angle = sign * 2.0 * PI * ((j * k) % n) as f64 / n as f64;
                sum += Complex64::new(real[j], imag[j]) * Complex64::new(angle.cos(), angle.sin());
            }
            sum / (n as f64).sqrt()
        })
        .collect()
}

#[test]
fn test_fft_roundtrip() {
    let real = [1.0, 3.0, 5.0, 7.0, -8.0, -6.0, -4.0, -2.0];
    let imag = [2.0, 4.0, 6.0, 8.0, -7.0, -5.0, -3.0, -1.0];

    // Unnormalized DFT of the signal, scaled by 1/sqrt(8) below
    let expected_fft = [
        Complex64::new(-4.0, 4.0),
        Complex64::new(30.727922061357855, -12.727922061357855),
        Complex64::new(-16.0, 0.0),
        Complex64::new(12.727922061357855, 5.272077938642145),
        Complex64::new(-8.0, -8.0),
        Complex64::new(5.272077938642145, 12.727922061357855),
        Complex64::new(0.0, -16.0),
        Complex64::new(-12.727922061357855, 30.727922061357855),
    ];
    let scale = 1.0 / 8f64.sqrt();

    let spectrum = transform(&real, &imag, true).unwrap();
    for (k, &expected) in expected_fft.iter().enumerate() {
        assert_complex_close(spectrum.bin(k), expected * scale);
    }

    let back = transform(&spectrum.real(), &spectrum.imag(), false).unwrap();
    for k in 0..8 {
        assert_complex_close(back.bin(k), Complex64::new(real[k], imag[k]));
    }
}

#[test]
fn test_matches_naive_dft() {
    for bits in 0..=7 {
        let n = 1usize << bits;
        let real: Vec<f64> = (0..n).map(|i| ((i * 7 + 3) % 11) as f64 - 5.0).collect();
        let imag: Vec<f64> = (0..n).map(|i| ((i * 5 + 1) % 13) as f64 * 0.25).collect();
        for forward in [true, false] {
            let spectrum = transform(&real, &imag, forward).unwrap();
            let expected = naive_dft(&real, &imag, forward);
            for k in 0..n {
                assert_complex_close(spectrum.bin(k), expected[k]);
            }
        }
    }
}

#[test]
fn test_size_one_is_identity() {
    let spectrum = transform(&[2.5], &[-1.0], true).unwrap();
    assert_eq!(spectrum.bins(), &[Complex64::new(2.5, -1.0)]);
}

#[test]
fn test_does_not_touch_inputs() {
    let real = vec![1.0, 2.0, 3.0, 4.0];
    let imag = vec![0.0; 4];
    let _ = ReferenceFft::new().transform(&real, &imag, true).unwrap();
    assert_eq!(real, vec![1.0, 2.0, 3.0, 4.0]);
    assert_eq!(imag, vec![0.0; 4]);
}

#[test]
fn test_rejects_bad_shapes() {
    assert_eq!(
        transform(&[0.0; 10], &[0.0; 10], true).unwrap_err(),
        FftError::NotPowerOfTwo { len: 10 }
    );
    assert_eq!(
        transform(&[0.0; 8], &[0.0; 4], true).unwrap_err(),
        FftError::LengthMismatch { real: 8, imag: 4 }
    );
    assert!(transform(&[], &[], true).is_err());
    assert_eq!(ReferenceFft.fixed_size(), None);
}

#[test]
fn test_observed_emits_every_checkpoint() {
    struct Names(Vec<Checkpoint>);
    impl StageObserver for Names {
        fn observe(&mut self, checkpoint: Checkpoint, _data: &[Complex64]) {
            self.0.push(checkpoint);
        }
    }

    let mut names = Names(Vec::new());
    ReferenceFft
        .transform_observed(&[0.0; 16], &[0.0; 16], true, &mut names)
        .unwrap();
    assert_eq!(
        names.0,
        vec![
            Checkpoint::Stage(1),
            Checkpoint::Stage(2),
            Checkpoint::Stage(3),
            Checkpoint::Stage(4),
            Checkpoint::Reorder,
            Checkpoint::Final,
        ]
    );
}
