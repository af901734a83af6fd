use super::*;
use crate::common::{FftError, Transform};
use crate::float::reference;

#[test]
fn test_passthrough_equals_reference_exactly() {
    let n = 8192;
    let fft = Passthrough::new(n).unwrap();
    let real: Vec<f64> = (0..n).map(|i| (i % 5) as f64 - 2.0).collect();
    let imag: Vec<f64> = (0..n).map(|i| (i % 3) as f64).collect();

    let got = fft.transform(&real, &imag, true).unwrap();
    let expected = reference::transform(&real, &imag, true).unwrap();
    assert_eq!(got, expected);
}

#[test]
fn test_passthrough_rejects_other_sizes() {
    let fft = Passthrough::new(8192).unwrap();
    assert_eq!(fft.size(), 8192);
    assert_eq!(
        fft.transform(&[0.0; 1024], &[0.0; 1024], false).unwrap_err(),
        FftError::UnsupportedSize {
            expected: 8192,
            actual: 1024
        }
    );
    assert!(Passthrough::new(100).is_err());
}

#[test]
fn test_every_variant_round_trips() {
    let variants: Vec<Box<dyn Transform>> = vec![
        Box::new(Unrolled2),
        Box::new(Unrolled4),
        Box::new(Unrolled8),
        Box::new(Unrolled16),
        Box::new(TableFft::new(256).unwrap()),
        Box::new(Passthrough::new(8192).unwrap()),
    ];

    for fft in &variants {
        let n = fft.fixed_size().unwrap();
        let real: Vec<f64> = (0..n).map(|i| (i as f64).sqrt()).collect();
        let imag: Vec<f64> = (0..n).map(|i| -(i as f64) * 0.5).collect();

        let spectrum = fft.transform(&real, &imag, true).unwrap();
        let back = fft.transform(&spectrum.real(), &spectrum.imag(), false).unwrap();
        for i in 0..n {
            let scale = 1.0 + real[i].abs().max(imag[i].abs());
            assert!((back.bin(i).re - real[i]).abs() < 1e-9 * scale, "n={} i={}", n, i);
            assert!((back.bin(i).im - imag[i]).abs() < 1e-9 * scale, "n={} i={}", n, i);
        }
    }
}
