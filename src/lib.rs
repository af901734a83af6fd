//! Power-of-two FFT with a generic reference and size-specialized variants.
//!
//! [`transform`] resolves the best implementation for the signal length
//! through the process-wide [`registry`], runs it and returns an immutable
//! [`Spectrum`]. Every implementation applies the unitary `1/√N` scaling,
//! so a forward transform followed by an inverse reproduces the input.
//!
//! ```rust
//! let real = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
//! let imag = [0.0; 8];
//!
//! let spectrum = rs_sized_fft::forward(&real, &imag).unwrap();
//! assert!((spectrum.magnitude(0) - 36.0 / 8f64.sqrt()).abs() < 1e-12);
//!
//! let back = spectrum.inverse().unwrap();
//! assert!((back.bin(7).re - 8.0).abs() < 1e-9);
//! ```

pub mod common;
pub mod float;
pub mod registry;
pub mod spectrum;
pub mod validation;

pub use common::{Checkpoint, FftError, NoObserver, StageObserver, Transform};
pub use registry::{ImplementationDescriptor, Registry, RegistryBuilder, Resolved};
pub use spectrum::Spectrum;
pub use validation::{ValidationConfig, ValidationReport, Validator};

/// Transforms `(real, imag)` with the implementation registered for its length.
pub fn transform(real: &[f64], imag: &[f64], forward: bool) -> Result<Spectrum, FftError> {
    registry::global().transform(real, imag, forward)
}

/// Forward transform.
pub fn forward(real: &[f64], imag: &[f64]) -> Result<Spectrum, FftError> {
    transform(real, imag, true)
}

/// Inverse transform.
pub fn inverse(real: &[f64], imag: &[f64]) -> Result<Spectrum, FftError> {
    transform(real, imag, false)
}

/// Forward transform of a real-valued signal.
pub fn forward_real(samples: &[f64]) -> Result<Spectrum, FftError> {
    common::check_size(samples.len())?;
    let imag = vec![0.0; samples.len()];
    transform(samples, &imag, true)
}

/// Implementation the global registry picks for size `n`.
pub fn resolve(n: usize) -> Result<Resolved, FftError> {
    registry::global().resolve(n)
}
