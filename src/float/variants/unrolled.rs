// src/float/variants/unrolled.rs
//
// Straight-line transforms for the smallest sizes. Every butterfly and
// twiddle is spelled out and the reordering is an explicit swap list.
// Stage layout matches `core::dif_stages`, so each stage checkpoint lines
// up with the reference.

use core::f64::consts::FRAC_1_SQRT_2;

use num_complex::Complex64;

use crate::common::{
    Checkpoint, FftError, NoObserver, StageObserver, Transform, check_fixed,
};
use crate::float::core::{butterfly, butterfly_unit, finish, rotation};
use crate::spectrum::Spectrum;

/// cos(π/8)
const C8: f64 = 0.923_879_532_511_286_7;
/// sin(π/8)
const S8: f64 = 0.382_683_432_365_089_8;

/// Butterfly with twiddle `N/4`, i.e. a multiplication by `∓i`.
#[inline(always)]
fn butterfly_quarter(x: &mut [Complex64], lower: usize, upper: usize, forward: bool) {
    let u = x[upper];
    let t = if forward {
        Complex64::new(u.im, -u.re)
    } else {
        Complex64::new(-u.im, u.re)
    };
    x[upper] = x[lower] - t;
    x[lower] += t;
}

macro_rules! fixed_size_transform {
    ($ty:ident, $n:literal, $run:ident) => {
        impl Transform for $ty {
            fn transform(
                &self,
                real: &[f64],
                imag: &[f64],
                forward: bool,
            ) -> Result<Spectrum, FftError> {
                check_fixed(real, imag, $n)?;
                Ok($run(real, imag, forward, &mut NoObserver))
            }

            fn transform_observed(
                &self,
                real: &[f64],
                imag: &[f64],
                forward: bool,
                observer: &mut dyn StageObserver,
            ) -> Result<Spectrum, FftError> {
                check_fixed(real, imag, $n)?;
                Ok($run(real, imag, forward, observer))
            }

            fn fixed_size(&self) -> Option<usize> {
                Some($n)
            }
        }
    };
}

#[inline(always)]
fn load<const N: usize>(real: &[f64], imag: &[f64]) -> [Complex64; N] {
    core::array::from_fn(|i| Complex64::new(real[i], imag[i]))
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Unrolled2;

impl Unrolled2 {
    pub const NAME: &'static str = "unrolled-2";
}

fn run_2<O>(real: &[f64], imag: &[f64], _forward: bool, observer: &mut O) -> Spectrum
where
    O: StageObserver + ?Sized,
{
    let mut x = load::<2>(real, imag);

    butterfly_unit(&mut x, 0, 1);
    observer.observe(Checkpoint::Stage(1), &x);

    // Bit reversal over one bit is the identity.
    observer.observe(Checkpoint::Reorder, &x);

    finish(x.to_vec(), observer)
}

fixed_size_transform!(Unrolled2, 2, run_2);

#[derive(Debug, Default, Clone, Copy)]
pub struct Unrolled4;

impl Unrolled4 {
    pub const NAME: &'static str = "unrolled-4";
}

fn run_4<O>(real: &[f64], imag: &[f64], forward: bool, observer: &mut O) -> Spectrum
where
    O: StageObserver + ?Sized,
{
    let mut x = load::<4>(real, imag);

    butterfly_unit(&mut x, 0, 2);
    butterfly_unit(&mut x, 1, 3);
    observer.observe(Checkpoint::Stage(1), &x);

    butterfly_unit(&mut x, 0, 1);
    butterfly_quarter(&mut x, 2, 3, forward);
    observer.observe(Checkpoint::Stage(2), &x);

    x.swap(1, 2);
    observer.observe(Checkpoint::Reorder, &x);

    finish(x.to_vec(), observer)
}

fixed_size_transform!(Unrolled4, 4, run_4);

#[derive(Debug, Default, Clone, Copy)]
pub struct Unrolled8;

impl Unrolled8 {
    pub const NAME: &'static str = "unrolled-8";
}

fn run_8<O>(real: &[f64], imag: &[f64], forward: bool, observer: &mut O) -> Spectrum
where
    O: StageObserver + ?Sized,
{
    let w1 = rotation(FRAC_1_SQRT_2, FRAC_1_SQRT_2, forward);
    let w3 = rotation(-FRAC_1_SQRT_2, FRAC_1_SQRT_2, forward);

    let mut x = load::<8>(real, imag);

    butterfly_unit(&mut x, 0, 4);
    butterfly_unit(&mut x, 1, 5);
    butterfly_unit(&mut x, 2, 6);
    butterfly_unit(&mut x, 3, 7);
    observer.observe(Checkpoint::Stage(1), &x);

    butterfly_unit(&mut x, 0, 2);
    butterfly_unit(&mut x, 1, 3);
    butterfly_quarter(&mut x, 4, 6, forward);
    butterfly_quarter(&mut x, 5, 7, forward);
    observer.observe(Checkpoint::Stage(2), &x);

    butterfly_unit(&mut x, 0, 1);
    butterfly_quarter(&mut x, 2, 3, forward);
    butterfly(&mut x, 4, 5, w1);
    butterfly(&mut x, 6, 7, w3);
    observer.observe(Checkpoint::Stage(3), &x);

    x.swap(1, 4);
    x.swap(3, 6);
    observer.observe(Checkpoint::Reorder, &x);

    finish(x.to_vec(), observer)
}

fixed_size_transform!(Unrolled8, 8, run_8);

#[derive(Debug, Default, Clone, Copy)]
pub struct Unrolled16;

impl Unrolled16 {
    pub const NAME: &'static str = "unrolled-16";
}

fn run_16<O>(real: &[f64], imag: &[f64], forward: bool, observer: &mut O) -> Spectrum
where
    O: StageObserver + ?Sized,
{
    // w{k} = e^{∓2πik/16}; w4 is the quarter turn handled by butterfly_quarter.
    let w1 = rotation(C8, S8, forward);
    let w2 = rotation(FRAC_1_SQRT_2, FRAC_1_SQRT_2, forward);
    let w3 = rotation(S8, C8, forward);
    let w5 = rotation(-S8, C8, forward);
    let w6 = rotation(-FRAC_1_SQRT_2, FRAC_1_SQRT_2, forward);
    let w7 = rotation(-C8, S8, forward);

    let mut x = load::<16>(real, imag);

    butterfly_unit(&mut x, 0, 8);
    butterfly_unit(&mut x, 1, 9);
    butterfly_unit(&mut x, 2, 10);
    butterfly_unit(&mut x, 3, 11);
    butterfly_unit(&mut x, 4, 12);
    butterfly_unit(&mut x, 5, 13);
    butterfly_unit(&mut x, 6, 14);
    butterfly_unit(&mut x, 7, 15);
    observer.observe(Checkpoint::Stage(1), &x);

    butterfly_unit(&mut x, 0, 4);
    butterfly_unit(&mut x, 1, 5);
    butterfly_unit(&mut x, 2, 6);
    butterfly_unit(&mut x, 3, 7);
    butterfly_quarter(&mut x, 8, 12, forward);
    butterfly_quarter(&mut x, 9, 13, forward);
    butterfly_quarter(&mut x, 10, 14, forward);
    butterfly_quarter(&mut x, 11, 15, forward);
    observer.observe(Checkpoint::Stage(2), &x);

    butterfly_unit(&mut x, 0, 2);
    butterfly_unit(&mut x, 1, 3);
    butterfly_quarter(&mut x, 4, 6, forward);
    butterfly_quarter(&mut x, 5, 7, forward);
    butterfly(&mut x, 8, 10, w2);
    butterfly(&mut x, 9, 11, w2);
    butterfly(&mut x, 12, 14, w6);
    butterfly(&mut x, 13, 15, w6);
    observer.observe(Checkpoint::Stage(3), &x);

    butterfly_unit(&mut x, 0, 1);
    butterfly_quarter(&mut x, 2, 3, forward);
    butterfly(&mut x, 4, 5, w2);
    butterfly(&mut x, 6, 7, w6);
    butterfly(&mut x, 8, 9, w1);
    butterfly(&mut x, 10, 11, w5);
    butterfly(&mut x, 12, 13, w3);
    butterfly(&mut x, 14, 15, w7);
    observer.observe(Checkpoint::Stage(4), &x);

    x.swap(1, 8);
    x.swap(2, 4);
    x.swap(3, 12);
    x.swap(5, 10);
    x.swap(7, 14);
    x.swap(11, 13);
    observer.observe(Checkpoint::Reorder, &x);

    finish(x.to_vec(), observer)
}

fixed_size_transform!(Unrolled16, 16, run_16);

#[cfg(test)]
#[path = "unrolled_tests.rs"]
mod tests;
