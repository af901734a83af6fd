// src/spectrum.rs

use core::ops::Index;

use num_complex::Complex64;

use crate::common::FftError;

/// Immutable output of a transform: exactly N complex bins.
///
/// Every derived view (magnitude, phase, power) is recomputed from the bins
/// on demand; nothing is cached.
#[derive(Debug, Clone, PartialEq)]
pub struct Spectrum {
    bins: Vec<Complex64>,
}

impl Spectrum {
    pub(crate) fn from_bins(bins: Vec<Complex64>) -> Self {
        Self { bins }
    }

    /// Number of bins (the transform size N).
    pub fn len(&self) -> usize {
        self.bins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    pub fn bins(&self) -> &[Complex64] {
        &self.bins
    }

    /// Bin `k`. Panics if `k >= len()`, like slice indexing.
    pub fn bin(&self, k: usize) -> Complex64 {
        self.bins[k]
    }

    pub fn get(&self, k: usize) -> Option<Complex64> {
        self.bins.get(k).copied()
    }

    /// Real parts, in bin order.
    pub fn real(&self) -> Vec<f64> {
        self.bins.iter().map(|c| c.re).collect()
    }

    /// Imaginary parts, in bin order.
    pub fn imag(&self) -> Vec<f64> {
        self.bins.iter().map(|c| c.im).collect()
    }

    /// `[re0, im0, re1, im1, ...]`
    pub fn interleaved(&self) -> Vec<f64> {
        self.bins.iter().flat_map(|c| [c.re, c.im]).collect()
    }

    /// `sqrt(re² + im²)` of bin `k`.
    pub fn magnitude(&self, k: usize) -> f64 {
        self.bins[k].norm()
    }

    /// Argument of bin `k` in radians, in `(-π, π]`.
    pub fn phase(&self, k: usize) -> f64 {
        self.bins[k].arg()
    }

    /// `re² + im²` of bin `k`.
    pub fn power(&self, k: usize) -> f64 {
        self.bins[k].norm_sqr()
    }

    pub fn magnitudes(&self) -> Vec<f64> {
        self.bins.iter().map(|c| c.norm()).collect()
    }

    pub fn phases(&self) -> Vec<f64> {
        self.bins.iter().map(|c| c.arg()).collect()
    }

    pub fn power_spectrum(&self) -> Vec<f64> {
        self.bins.iter().map(|c| c.norm_sqr()).collect()
    }

    /// Sum of the power spectrum. Under the unitary normalization this
    /// equals the energy of the time-domain signal.
    pub fn total_energy(&self) -> f64 {
        self.bins.iter().map(|c| c.norm_sqr()).sum()
    }

    /// Index of the strongest bin between DC and Nyquist inclusive.
    /// Ties go to the lower bin.
    pub fn peak_bin(&self) -> usize {
        let upper = self.bins.len() / 2;
        let mut best = 0;
        let mut best_power = f64::NEG_INFINITY;
        for (k, c) in self.bins.iter().enumerate().take(upper + 1) {
            let p = c.norm_sqr();
            if p > best_power {
                best = k;
                best_power = p;
            }
        }
        best
    }

    /// Centre frequency of bin `k` for a signal sampled at `sample_rate`.
    pub fn bin_frequency(&self, k: usize, sample_rate: f64) -> f64 {
        k as f64 * sample_rate / self.bins.len() as f64
    }

    /// Runs the inverse transform over these bins.
    pub fn inverse(&self) -> Result<Spectrum, FftError> {
        crate::transform(&self.real(), &self.imag(), false)
    }
}

impl Index<usize> for Spectrum {
    type Output = Complex64;

    fn index(&self, k: usize) -> &Complex64 {
        &self.bins[k]
    }
}

#[cfg(test)]
#[path = "spectrum_tests.rs"]
mod tests;
