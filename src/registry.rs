//! Implementation registry.
//!
//! Maps a transform size to the implementation that should run it. Every
//! implementation is declared up front with the size it claims and a
//! priority; [`Registry::resolve`] returns the highest priority declaration
//! for a size (earliest declaration on ties) and falls back to
//! [`ReferenceFft`] when nothing is declared.
//!
//! # Example
//!
//! ```rust
//! use rs_sized_fft::registry::{self, ImplementationDescriptor, RegistryBuilder};
//! use rs_sized_fft::float::{ReferenceFft, Unrolled8};
//!
//! // Built-in table
//! let resolved = registry::global().resolve(8).unwrap();
//! assert_eq!(resolved.descriptor().name, Unrolled8::NAME);
//!
//! // Custom table
//! let custom = RegistryBuilder::new()
//!     .register(ImplementationDescriptor::new(8, 10, "slow"), ReferenceFft)
//!     .unwrap()
//!     .register(ImplementationDescriptor::new(8, 50, "fast"), Unrolled8)
//!     .unwrap()
//!     .build();
//! assert_eq!(custom.resolve(8).unwrap().descriptor().name, "fast");
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, OnceLock};

use crate::common::{FftError, Transform, check_signal, check_size};
use crate::float::{Passthrough, ReferenceFft, TableFft, Unrolled2, Unrolled4, Unrolled8, Unrolled16};
use crate::spectrum::Spectrum;

/// Priority of the straight-line variants.
pub const PRIORITY_UNROLLED: i32 = 100;
/// Priority of the table-driven variant.
pub const PRIORITY_TABLE: i32 = 50;
/// Priority of sizes that delegate to the reference.
pub const PRIORITY_PASSTHROUGH: i32 = 10;
/// Priority reported for the reference fallback.
pub const PRIORITY_REFERENCE: i32 = 0;

/// Sizes served by `TableFft` in the built-in table, as powers of two.
pub const TABLE_LOG2_SIZES: core::ops::RangeInclusive<u32> = 5..=12;
/// Sizes served by `Passthrough` in the built-in table, as powers of two.
pub const PASSTHROUGH_LOG2_SIZES: core::ops::RangeInclusive<u32> = 13..=14;

/// Binds an implementation to the size it claims.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImplementationDescriptor {
    /// The one size this declaration covers.
    pub size: usize,
    /// Higher wins.
    pub priority: i32,
    /// Identity, used in logs and validation reports.
    pub name: &'static str,
}

impl ImplementationDescriptor {
    pub const fn new(size: usize, priority: i32, name: &'static str) -> Self {
        Self {
            size,
            priority,
            name,
        }
    }
}

impl fmt::Display for ImplementationDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (n={}, priority={})", self.name, self.size, self.priority)
    }
}

#[derive(Clone)]
struct Registration {
    descriptor: ImplementationDescriptor,
    implementation: Arc<dyn Transform>,
}

/// Result of a lookup: the chosen declaration and a handle to run it.
#[derive(Clone)]
pub struct Resolved {
    descriptor: ImplementationDescriptor,
    implementation: Arc<dyn Transform>,
    reference: bool,
}

impl Resolved {
    pub fn descriptor(&self) -> &ImplementationDescriptor {
        &self.descriptor
    }

    pub fn implementation(&self) -> &dyn Transform {
        &*self.implementation
    }

    /// Shared handle to the implementation.
    pub fn handle(&self) -> Arc<dyn Transform> {
        Arc::clone(&self.implementation)
    }

    /// True when no declaration matched and the reference was chosen.
    pub fn is_reference(&self) -> bool {
        self.reference
    }

    pub fn transform(&self, real: &[f64], imag: &[f64], forward: bool) -> Result<Spectrum, FftError> {
        self.implementation.transform(real, imag, forward)
    }
}

impl fmt::Debug for Resolved {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolved")
            .field("descriptor", &self.descriptor)
            .field("reference", &self.reference)
            .finish()
    }
}

/// Collects declarations in order, then freezes them into a [`Registry`].
#[derive(Default)]
pub struct RegistryBuilder {
    entries: Vec<Registration>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares `implementation` for `descriptor.size`.
    ///
    /// Rejects sizes that are not powers of two and fixed-size
    /// implementations whose size disagrees with the descriptor.
    pub fn register<T>(mut self, descriptor: ImplementationDescriptor, implementation: T) -> Result<Self, FftError>
    where
        T: Transform + 'static,
    {
        check_size(descriptor.size)?;
        if let Some(fixed) = implementation.fixed_size() {
            if fixed != descriptor.size {
                return Err(FftError::UnsupportedSize {
                    expected: fixed,
                    actual: descriptor.size,
                });
            }
        }
        self.entries.push(Registration {
            descriptor,
            implementation: Arc::new(implementation),
        });
        Ok(self)
    }

    /// Declares the built-in variants on top of whatever is already declared.
    pub fn with_builtin(mut self) -> Self {
        self.declare(2, PRIORITY_UNROLLED, Unrolled2::NAME, Arc::new(Unrolled2));
        self.declare(4, PRIORITY_UNROLLED, Unrolled4::NAME, Arc::new(Unrolled4));
        self.declare(8, PRIORITY_UNROLLED, Unrolled8::NAME, Arc::new(Unrolled8));
        self.declare(16, PRIORITY_UNROLLED, Unrolled16::NAME, Arc::new(Unrolled16));

        for log2 in TABLE_LOG2_SIZES {
            let n = 1usize << log2;
            if let Ok(table) = TableFft::new(n) {
                self.declare(n, PRIORITY_TABLE, TableFft::NAME, Arc::new(table));
            }
        }
        for log2 in PASSTHROUGH_LOG2_SIZES {
            let n = 1usize << log2;
            if let Ok(passthrough) = Passthrough::new(n) {
                self.declare(n, PRIORITY_PASSTHROUGH, Passthrough::NAME, Arc::new(passthrough));
            }
        }
        self
    }

    fn declare(&mut self, size: usize, priority: i32, name: &'static str, implementation: Arc<dyn Transform>) {
        self.entries.push(Registration {
            descriptor: ImplementationDescriptor::new(size, priority, name),
            implementation,
        });
    }

    pub fn build(self) -> Registry {
        let mut by_size: BTreeMap<usize, Vec<Registration>> = BTreeMap::new();
        for entry in self.entries {
            #[cfg(feature = "tracing")]
            tracing::debug!(
                size = entry.descriptor.size,
                priority = entry.descriptor.priority,
                name = entry.descriptor.name,
                "implementation registered"
            );
            by_size.entry(entry.descriptor.size).or_default().push(entry);
        }
        // Stable sort keeps declaration order among equal priorities.
        for candidates in by_size.values_mut() {
            candidates.sort_by(|a, b| b.descriptor.priority.cmp(&a.descriptor.priority));
        }
        Registry {
            by_size,
            reference: Arc::new(ReferenceFft),
        }
    }
}

/// Frozen size → implementation table.
pub struct Registry {
    by_size: BTreeMap<usize, Vec<Registration>>,
    reference: Arc<dyn Transform>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::with_builtin()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.descriptors()).finish()
    }
}

impl Registry {
    /// Registry holding only the built-in variants.
    pub fn with_builtin() -> Self {
        RegistryBuilder::new().with_builtin().build()
    }

    /// Registry with no declarations; every size resolves to the reference.
    pub fn empty() -> Self {
        RegistryBuilder::new().build()
    }

    /// Picks the implementation for size `n`.
    pub fn resolve(&self, n: usize) -> Result<Resolved, FftError> {
        check_size(n)?;
        match self.by_size.get(&n).and_then(|c| c.first()) {
            Some(entry) => Ok(Resolved {
                descriptor: entry.descriptor.clone(),
                implementation: Arc::clone(&entry.implementation),
                reference: false,
            }),
            None => {
                #[cfg(feature = "tracing")]
                tracing::debug!(size = n, "no declaration, using reference");
                Ok(Resolved {
                    descriptor: ImplementationDescriptor::new(n, PRIORITY_REFERENCE, ReferenceFft::NAME),
                    implementation: Arc::clone(&self.reference),
                    reference: true,
                })
            }
        }
    }

    /// Every declaration for `n`, in resolution order.
    pub fn candidates(&self, n: usize) -> Result<Vec<ImplementationDescriptor>, FftError> {
        check_size(n)?;
        Ok(self
            .by_size
            .get(&n)
            .map(|c| c.iter().map(|e| e.descriptor.clone()).collect())
            .unwrap_or_default())
    }

    /// Sizes with at least one declaration, ascending.
    pub fn sizes(&self) -> Vec<usize> {
        self.by_size.keys().copied().collect()
    }

    /// All declarations, by size then resolution order.
    pub fn descriptors(&self) -> Vec<ImplementationDescriptor> {
        self.by_size
            .values()
            .flatten()
            .map(|e| e.descriptor.clone())
            .collect()
    }

    /// Every declaration paired with its implementation, by size then
    /// resolution order.
    pub fn implementations(&self) -> Vec<(ImplementationDescriptor, Arc<dyn Transform>)> {
        self.by_size
            .values()
            .flatten()
            .map(|e| (e.descriptor.clone(), Arc::clone(&e.implementation)))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.by_size.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_size.is_empty()
    }

    /// Resolves by input length and runs the chosen implementation.
    pub fn transform(&self, real: &[f64], imag: &[f64], forward: bool) -> Result<Spectrum, FftError> {
        let n = check_signal(real, imag)?;
        self.resolve(n)?.transform(real, imag, forward)
    }
}

static GLOBAL: OnceLock<Registry> = OnceLock::new();

/// Process-wide registry of the built-in variants, built on first use.
pub fn global() -> &'static Registry {
    GLOBAL.get_or_init(Registry::with_builtin)
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
