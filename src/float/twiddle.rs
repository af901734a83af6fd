// src/float/twiddle.rs

use std::collections::HashMap;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use num_complex::Complex64;

use super::core::{rotation, sin_cos, twiddle_angle};
use crate::common::{FftError, check_size};

/// Cosine and sine of `2π·i/N` for `i` in `[0, N/2)`.
#[derive(Debug, Clone, PartialEq)]
pub struct TwiddleTable {
    n: usize,
    cos: Vec<f64>,
    sin: Vec<f64>,
}

impl TwiddleTable {
    fn compute(n: usize) -> Self {
        let half = n / 2;
        let mut cos = Vec::with_capacity(half);
        let mut sin = Vec::with_capacity(half);
        for i in 0..half {
            let (s, c) = sin_cos(twiddle_angle(i, n));
            cos.push(c);
            sin.push(s);
        }
        Self { n, cos, sin }
    }

    /// Transform size this table was built for.
    pub fn size(&self) -> usize {
        self.n
    }

    pub fn cos(&self) -> &[f64] {
        &self.cos
    }

    pub fn sin(&self) -> &[f64] {
        &self.sin
    }

    /// Twiddle `p` for the given direction. `p` must be below `N/2`.
    #[inline(always)]
    pub fn twiddle(&self, p: usize, forward: bool) -> Complex64 {
        rotation(self.cos[p], self.sin[p], forward)
    }
}

type Cache = RwLock<HashMap<usize, Arc<TwiddleTable>>>;

static CACHE: OnceLock<Cache> = OnceLock::new();

fn cache() -> &'static Cache {
    CACHE.get_or_init(|| RwLock::new(HashMap::new()))
}

/// Shared twiddle table for size `n`, computed on first use.
///
/// Racing first callers may each compute the table; the first insert wins
/// and every caller gets that one. Stored tables are never modified, so a
/// poisoned lock still guards consistent data.
pub fn table_for(n: usize) -> Result<Arc<TwiddleTable>, FftError> {
    check_size(n)?;

    if let Some(table) = cache()
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(&n)
    {
        return Ok(Arc::clone(table));
    }

    let computed = Arc::new(TwiddleTable::compute(n));
    let mut tables = cache().write().unwrap_or_else(PoisonError::into_inner);
    let stored = tables.entry(n).or_insert_with(|| Arc::clone(&computed));

    #[cfg(feature = "tracing")]
    tracing::debug!(
        size = n,
        inserted = Arc::ptr_eq(stored, &computed),
        "twiddle table populated"
    );

    Ok(Arc::clone(stored))
}

#[cfg(test)]
#[path = "twiddle_tests.rs"]
mod tests;
