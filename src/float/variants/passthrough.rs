// src/float/variants/passthrough.rs

use crate::common::{
    FftError, NoObserver, StageObserver, Transform, check_fixed, check_size,
};
use crate::float::reference;
use crate::spectrum::Spectrum;

/// Fixed-size entry that hands the signal straight to the reference kernel.
///
/// Used for sizes with no specialized algorithm: the size check is the only
/// work done before the reference runs.
#[derive(Debug, Clone, Copy)]
pub struct Passthrough {
    n: usize,
}

impl Passthrough {
    pub const NAME: &'static str = "passthrough";

    pub fn new(n: usize) -> Result<Self, FftError> {
        check_size(n)?;
        Ok(Self { n })
    }

    pub fn size(&self) -> usize {
        self.n
    }
}

impl Transform for Passthrough {
    fn transform(&self, real: &[f64], imag: &[f64], forward: bool) -> Result<Spectrum, FftError> {
        check_fixed(real, imag, self.n)?;
        Ok(reference::compute(real, imag, forward, &mut NoObserver))
    }

    fn transform_observed(
        &self,
        real: &[f64],
        imag: &[f64],
        forward: bool,
        observer: &mut dyn StageObserver,
    ) -> Result<Spectrum, FftError> {
        check_fixed(real, imag, self.n)?;
        Ok(reference::compute(real, imag, forward, observer))
    }

    fn fixed_size(&self) -> Option<usize> {
        Some(self.n)
    }
}
