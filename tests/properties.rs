//! Property-based tests over every registered implementation.
//!
//! Uses proptest to check the algebraic invariants of the unitary DFT:
//! round trip, Parseval, linearity, and agreement with the reference.

use proptest::prelude::*;
use rs_sized_fft::float::ReferenceFft;
use rs_sized_fft::registry::{self, ImplementationDescriptor};
use rs_sized_fft::{Spectrum, Transform};
use std::sync::Arc;

const TOLERANCE: f64 = 1e-9;

/// Every declaration up to 1024 points, plus the reference at the same sizes.
fn implementations() -> Vec<(ImplementationDescriptor, Arc<dyn Transform>)> {
    let mut all: Vec<_> = registry::global()
        .implementations()
        .into_iter()
        .filter(|(d, _)| d.size <= 1024)
        .collect();
    for log2 in 0..=10 {
        all.push((
            ImplementationDescriptor::new(1 << log2, 0, ReferenceFft::NAME),
            Arc::new(ReferenceFft),
        ));
    }
    all
}

/// Random signal of length `n` with both parts in [-1, 1].
fn signal(n: usize, values: &[f64]) -> (Vec<f64>, Vec<f64>) {
    let real = (0..n).map(|i| values[(2 * i) % values.len()]).collect();
    let imag = (0..n).map(|i| values[(2 * i + 1) % values.len()]).collect();
    (real, imag)
}

fn max_abs(values: &[f64]) -> f64 {
    values.iter().fold(1.0f64, |m, v| m.max(v.abs()))
}

fn assert_close(got: &[f64], expected: &[f64], label: &str) -> Result<(), TestCaseError> {
    let scale = max_abs(expected);
    for (i, (g, e)) in got.iter().zip(expected).enumerate() {
        prop_assert!(
            (g - e).abs() <= TOLERANCE * scale,
            "{}: index {} got {} expected {}",
            label,
            i,
            g,
            e
        );
    }
    Ok(())
}

fn run(fft: &dyn Transform, real: &[f64], imag: &[f64], forward: bool) -> Spectrum {
    fft.transform(real, imag, forward).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// inverse(forward(x)) == x for every implementation.
    #[test]
    fn round_trip(
        values in prop::collection::vec(-1.0f64..=1.0, 64),
        idx in 0usize..64,
    ) {
        let all = implementations();
        let (descriptor, fft) = &all[idx % all.len()];
        let (real, imag) = signal(descriptor.size, &values);

        let spectrum = run(&**fft, &real, &imag, true);
        let back = run(&**fft, &spectrum.real(), &spectrum.imag(), false);

        assert_close(&back.real(), &real, descriptor.name)?;
        assert_close(&back.imag(), &imag, descriptor.name)?;
    }

    /// Registered variants agree with the reference bin by bin.
    #[test]
    fn matches_reference(
        values in prop::collection::vec(-1.0f64..=1.0, 64),
        idx in 0usize..64,
        forward in any::<bool>(),
    ) {
        let all = implementations();
        let (descriptor, fft) = &all[idx % all.len()];
        let (real, imag) = signal(descriptor.size, &values);

        let got = run(&**fft, &real, &imag, forward);
        let expected = run(&ReferenceFft, &real, &imag, forward);

        assert_close(&got.real(), &expected.real(), descriptor.name)?;
        assert_close(&got.imag(), &expected.imag(), descriptor.name)?;
    }

    /// Σ|x|² == Σ|X|² under the unitary scaling.
    #[test]
    fn parseval(
        values in prop::collection::vec(-1.0f64..=1.0, 64),
        idx in 0usize..64,
    ) {
        let all = implementations();
        let (descriptor, fft) = &all[idx % all.len()];
        let (real, imag) = signal(descriptor.size, &values);

        let time_energy: f64 = real.iter().chain(&imag).map(|v| v * v).sum();
        let spectrum = run(&**fft, &real, &imag, true);

        prop_assert!(
            (spectrum.total_energy() - time_energy).abs() <= TOLERANCE * time_energy.max(1.0),
            "{}: {} vs {}",
            descriptor.name,
            spectrum.total_energy(),
            time_energy
        );
    }

    /// forward(a·x + b·y) == a·forward(x) + b·forward(y)
    #[test]
    fn linearity(
        x in prop::collection::vec(-1.0f64..=1.0, 64),
        y in prop::collection::vec(-1.0f64..=1.0, 64),
        a in -4.0f64..4.0,
        b in -4.0f64..4.0,
        idx in 0usize..64,
    ) {
        let all = implementations();
        let (descriptor, fft) = &all[idx % all.len()];
        let n = descriptor.size;
        let (xr, xi) = signal(n, &x);
        let (yr, yi) = signal(n, &y);

        let mix_r: Vec<f64> = xr.iter().zip(&yr).map(|(p, q)| a * p + b * q).collect();
        let mix_i: Vec<f64> = xi.iter().zip(&yi).map(|(p, q)| a * p + b * q).collect();

        let lhs = run(&**fft, &mix_r, &mix_i, true);
        let fx = run(&**fft, &xr, &xi, true);
        let fy = run(&**fft, &yr, &yi, true);

        let rhs_r: Vec<f64> = fx.real().iter().zip(fy.real()).map(|(p, q)| a * p + b * q).collect();
        let rhs_i: Vec<f64> = fx.imag().iter().zip(fy.imag()).map(|(p, q)| a * p + b * q).collect();

        assert_close(&lhs.real(), &rhs_r, descriptor.name)?;
        assert_close(&lhs.imag(), &rhs_i, descriptor.name)?;
    }

    /// Lengths that are not powers of two are always rejected.
    #[test]
    fn rejects_non_power_of_two(n in 0usize..5000) {
        prop_assume!(!n.is_power_of_two());
        let zeros = vec![0.0; n];
        let err = rs_sized_fft::transform(&zeros, &zeros, true).unwrap_err();
        prop_assert!(err.is_invalid_size());
        prop_assert!(rs_sized_fft::resolve(n).is_err());
    }
}
