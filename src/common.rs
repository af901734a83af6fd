// src/common.rs

use core::fmt;

use num_complex::Complex64;
use thiserror::Error;

use crate::spectrum::Spectrum;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum FftError {
    /// Input length is not a power of two (zero included).
    #[error("size must be a power of 2, got {len}")]
    NotPowerOfTwo { len: usize },

    /// Real and imaginary buffers disagree on length.
    #[error("real and imaginary buffers differ in length ({real} vs {imag})")]
    LengthMismatch { real: usize, imag: usize },

    /// A fixed-size implementation was handed a buffer of another size.
    #[error("implementation only supports size {expected}, got {actual}")]
    UnsupportedSize { expected: usize, actual: usize },

    /// A candidate diverged from the reference during differential validation.
    #[error(
        "{implementation} diverged from the reference at '{checkpoint}': error {error:e} exceeds tolerance {tolerance:e}"
    )]
    ValidationFailed {
        implementation: String,
        checkpoint: Checkpoint,
        error: f64,
        tolerance: f64,
    },
}

impl FftError {
    /// True for the rejected-input conditions detected before any computation.
    pub fn is_invalid_size(&self) -> bool {
        matches!(
            self,
            FftError::NotPowerOfTwo { .. } | FftError::LengthMismatch { .. }
        )
    }
}

/// Checks the shape of a signal and returns its length.
pub fn check_signal(real: &[f64], imag: &[f64]) -> Result<usize, FftError> {
    if real.len() != imag.len() {
        return Err(FftError::LengthMismatch {
            real: real.len(),
            imag: imag.len(),
        });
    }
    check_size(real.len())
}

/// Rejects any size that is not a power of two.
pub fn check_size(n: usize) -> Result<usize, FftError> {
    if !n.is_power_of_two() {
        return Err(FftError::NotPowerOfTwo { len: n });
    }
    Ok(n)
}

/// Named point in a transform at which the working buffer can be observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Checkpoint {
    /// After butterfly stage `l` (1-based), before reordering and scaling.
    Stage(u32),
    /// After the bit-reversal permutation, before scaling.
    Reorder,
    /// The normalized output.
    Final,
}

impl fmt::Display for Checkpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Checkpoint::Stage(l) => write!(f, "after stage {l}"),
            Checkpoint::Reorder => write!(f, "after reordering"),
            Checkpoint::Final => write!(f, "final"),
        }
    }
}

/// Receives snapshots of the working buffer at each checkpoint.
pub trait StageObserver {
    fn observe(&mut self, checkpoint: Checkpoint, data: &[Complex64]);
}

/// Observer that discards everything. The kernels are generic over the
/// observer so this one compiles away.
pub struct NoObserver;

impl StageObserver for NoObserver {
    #[inline(always)]
    fn observe(&mut self, _checkpoint: Checkpoint, _data: &[Complex64]) {}
}

/// The call contract shared by the reference transform and every variant.
pub trait Transform: Send + Sync {
    /// Computes the unitary DFT (`forward`) or its inverse.
    fn transform(&self, real: &[f64], imag: &[f64], forward: bool) -> Result<Spectrum, FftError>;

    /// Same computation, reporting intermediate buffers to `observer`.
    fn transform_observed(
        &self,
        real: &[f64],
        imag: &[f64],
        forward: bool,
        observer: &mut dyn StageObserver,
    ) -> Result<Spectrum, FftError>;

    /// The single size this implementation accepts, or `None` if generic.
    fn fixed_size(&self) -> Option<usize> {
        None
    }
}

/// Shape check for fixed-size implementations: any length other than
/// `expected` is unsupported, even when it is a power of two.
pub fn check_fixed(real: &[f64], imag: &[f64], expected: usize) -> Result<(), FftError> {
    if real.len() != imag.len() {
        return Err(FftError::LengthMismatch {
            real: real.len(),
            imag: imag.len(),
        });
    }
    if real.len() != expected {
        return Err(FftError::UnsupportedSize {
            expected,
            actual: real.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
#[path = "common_tests.rs"]
mod tests;
