// src/float/reference.rs

use super::core::{bit_reverse_permute, dif_stages, finish, load, rotation, sin_cos, twiddle_angle};
use crate::common::{Checkpoint, FftError, NoObserver, StageObserver, Transform, check_signal};
use crate::spectrum::Spectrum;

/// Generic iterative Cooley-Tukey transform for any power-of-two size.
///
/// Twiddles are evaluated with `sin`/`cos` at runtime and the output is
/// reordered with a per-index bit reversal. Every other implementation in
/// this crate is checked against this one.
#[derive(Debug, Default, Clone, Copy)]
pub struct ReferenceFft;

impl ReferenceFft {
    pub const NAME: &'static str = "reference";

    pub fn new() -> Self {
        Self
    }
}

impl Transform for ReferenceFft {
    fn transform(&self, real: &[f64], imag: &[f64], forward: bool) -> Result<Spectrum, FftError> {
        transform(real, imag, forward)
    }

    fn transform_observed(
        &self,
        real: &[f64],
        imag: &[f64],
        forward: bool,
        observer: &mut dyn StageObserver,
    ) -> Result<Spectrum, FftError> {
        check_signal(real, imag)?;
        Ok(compute(real, imag, forward, observer))
    }
}

/// Reference transform as a free function.
pub fn transform(real: &[f64], imag: &[f64], forward: bool) -> Result<Spectrum, FftError> {
    check_signal(real, imag)?;
    Ok(compute(real, imag, forward, &mut NoObserver))
}

/// The reference algorithm on an already validated signal.
pub(crate) fn compute<O>(real: &[f64], imag: &[f64], forward: bool, observer: &mut O) -> Spectrum
where
    O: StageObserver + ?Sized,
{
    let n = real.len();
    let mut buffer = load(real, imag);

    dif_stages(
        &mut buffer,
        |p| {
            let (s, c) = sin_cos(twiddle_angle(p, n));
            rotation(c, s, forward)
        },
        observer,
    );

    bit_reverse_permute(&mut buffer);
    observer.observe(Checkpoint::Reorder, &buffer);

    finish(buffer, observer)
}

#[cfg(test)]
#[path = "reference_tests.rs"]
mod tests;
