// src/float/core.rs

use core::f64::consts::PI;

use num_complex::Complex64;

use crate::common::{Checkpoint, StageObserver};
use crate::spectrum::Spectrum;

/// Reverses the low `bits` bits of `index`, peeling one bit at a time.
pub fn bit_reverse(mut index: usize, bits: u32) -> usize {
    let mut reversed = 0;
    for _ in 0..bits {
        reversed = (reversed << 1) | (index & 1);
        index >>= 1;
    }
    reversed
}

/// Fills the bit-reversal table incrementally, without a per-index call.
pub(crate) fn precompute_bitrev(bitrev: &mut [usize], n: usize) {
    bitrev[0] = 0;
    let mut j = 0;
    for i in 1..n {
        let mut k = n >> 1;
        while j >= k {
            j -= k;
            k >>= 1;
        }
        j += k;
        bitrev[i] = j;
    }
}

/// Every `(i, j)` with `j = bitrev(i) > i`, in ascending `i`.
/// Applying each swap once turns bit-reversed order into natural order.
pub fn swap_pairs(n: usize) -> Vec<(usize, usize)> {
    if n < 2 {
        return Vec::new();
    }
    let mut bitrev = vec![0; n];
    precompute_bitrev(&mut bitrev, n);
    bitrev
        .iter()
        .enumerate()
        .filter(|&(i, &j)| j > i)
        .map(|(i, &j)| (i, j))
        .collect()
}

/// `2π·p/N`. Shared by the runtime and cached twiddles so both round identically.
#[inline]
pub(crate) fn twiddle_angle(p: usize, n: usize) -> f64 {
    2.0 * PI * (p as f64) / (n as f64)
}

#[inline]
pub(crate) fn sin_cos(angle: f64) -> (f64, f64) {
    (libm::sin(angle), libm::cos(angle))
}

/// `e^{∓i·angle}` from precomputed cosine and sine; forward takes the minus sign.
#[inline(always)]
pub(crate) fn rotation(cos: f64, sin: f64, forward: bool) -> Complex64 {
    if forward {
        Complex64::new(cos, -sin)
    } else {
        Complex64::new(cos, sin)
    }
}

/// Copies the caller's buffers into a fresh working buffer.
pub(crate) fn load(real: &[f64], imag: &[f64]) -> Vec<Complex64> {
    real.iter()
        .zip(imag)
        .map(|(&re, &im)| Complex64::new(re, im))
        .collect()
}

/// One butterfly: rotate the upper operand, then difference and sum in place.
#[inline(always)]
pub(crate) fn butterfly(buffer: &mut [Complex64], lower: usize, upper: usize, w: Complex64) {
    let t = buffer[upper] * w;
    buffer[upper] = buffer[lower] - t;
    buffer[lower] += t;
}

/// Butterfly with a unit twiddle.
#[inline(always)]
pub(crate) fn butterfly_unit(buffer: &mut [Complex64], lower: usize, upper: usize) {
    let t = buffer[upper];
    buffer[upper] = buffer[lower] - t;
    buffer[lower] += t;
}

/// All butterfly stages of the decimation-in-frequency transform.
///
/// Stage `l` splits the buffer into blocks of width `2·n2` with `n2 = N/2^l`.
/// Every pair `(k, k + n2)` in the lower half of a block is rotated by
/// twiddle `bitreverse(k >> (log2 N - l), log2 N)`; that index is the same
/// for the whole half-block, so `twiddle` is queried once per block.
/// The result is left in bit-reversed order.
pub(crate) fn dif_stages<F, O>(buffer: &mut [Complex64], twiddle: F, observer: &mut O)
where
    F: Fn(usize) -> Complex64,
    O: StageObserver + ?Sized,
{
    let n = buffer.len();
    let nu = n.trailing_zeros();
    let mut n2 = n >> 1;

    for l in 1..=nu {
        let nu1 = nu - l;
        let mut k = 0;
        while k < n {
            let w = twiddle(bit_reverse(k >> nu1, nu));
            for i in k..k + n2 {
                butterfly(buffer, i, i + n2, w);
            }
            k += n2 << 1;
        }
        observer.observe(Checkpoint::Stage(l), buffer);
        n2 >>= 1;
    }
}

/// Bit-reversal permutation computed index by index.
pub(crate) fn bit_reverse_permute(buffer: &mut [Complex64]) {
    let n = buffer.len();
    let bits = n.trailing_zeros();
    for i in 0..n {
        let r = bit_reverse(i, bits);
        if r > i {
            buffer.swap(i, r);
        }
    }
}

/// Bit-reversal permutation from a precomputed swap list.
#[inline]
pub(crate) fn apply_swaps(buffer: &mut [Complex64], swaps: &[(usize, usize)]) {
    for &(i, j) in swaps {
        buffer.swap(i, j);
    }
}

/// Applies the 1/√N normalization and wraps the buffer.
pub(crate) fn finish<O>(mut buffer: Vec<Complex64>, observer: &mut O) -> Spectrum
where
    O: StageObserver + ?Sized,
{
    let scale = 1.0 / (buffer.len() as f64).sqrt();
    for sample in buffer.iter_mut() {
        *sample = sample.scale(scale);
    }
    observer.observe(Checkpoint::Final, &buffer);
    Spectrum::from_bins(buffer)
}

#[cfg(test)]
#[path = "core_tests.rs"]
mod tests;
