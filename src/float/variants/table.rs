// src/float/variants/table.rs

use std::sync::Arc;

use crate::common::{
    Checkpoint, FftError, NoObserver, StageObserver, Transform, check_fixed, check_size,
};
use crate::float::core::{apply_swaps, dif_stages, finish, load, swap_pairs};
use crate::float::twiddle::{TwiddleTable, table_for};
use crate::spectrum::Spectrum;

/// Fixed-size transform driven by precomputed tables.
///
/// Keeps the generic stage loop but reads twiddles from the shared cache
/// and reorders with a swap list built once at construction.
#[derive(Debug, Clone)]
pub struct TableFft {
    n: usize,
    twiddles: Arc<TwiddleTable>,
    swaps: Vec<(usize, usize)>,
}

impl TableFft {
    pub const NAME: &'static str = "table";

    pub fn new(n: usize) -> Result<Self, FftError> {
        check_size(n)?;
        Ok(Self {
            n,
            twiddles: table_for(n)?,
            swaps: swap_pairs(n),
        })
    }

    pub fn size(&self) -> usize {
        self.n
    }

    /// The `(i, j)` pairs swapped after the butterfly stages.
    pub fn swaps(&self) -> &[(usize, usize)] {
        &self.swaps
    }

    fn run<O>(&self, real: &[f64], imag: &[f64], forward: bool, observer: &mut O) -> Spectrum
    where
        O: StageObserver + ?Sized,
    {
        let mut buffer = load(real, imag);
        let twiddles = &*self.twiddles;

        dif_stages(&mut buffer, |p| twiddles.twiddle(p, forward), observer);

        apply_swaps(&mut buffer, &self.swaps);
        observer.observe(Checkpoint::Reorder, &buffer);

        finish(buffer, observer)
    }
}

impl Transform for TableFft {
    fn transform(&self, real: &[f64], imag: &[f64], forward: bool) -> Result<Spectrum, FftError> {
        check_fixed(real, imag, self.n)?;
        Ok(self.run(real, imag, forward, &mut NoObserver))
    }

    fn transform_observed(
        &self,
        real: &[f64],
        imag: &[f64],
        forward: bool,
        observer: &mut dyn StageObserver,
    ) -> Result<Spectrum, FftError> {
        check_fixed(real, imag, self.n)?;
        Ok(self.run(real, imag, forward, observer))
    }

    fn fixed_size(&self) -> Option<usize> {
        Some(self.n)
    }
}

#[cfg(test)]
#[path = "table_tests.rs"]
mod tests;
