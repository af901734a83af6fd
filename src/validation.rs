//! Differential validation of an implementation against the reference.
//!
//! Both sides run over the same signal while their working buffers are
//! captured at each [`Checkpoint`]. Checkpoints are compared in order and
//! the run stops at the first one whose error exceeds the tolerance, so a
//! sign or index slip is reported at the stage that introduced it even
//! when later stages partly cancel it out. The harness only diagnoses; it
//! never repairs output.

use core::f64::consts::PI;

use num_complex::Complex64;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::common::{Checkpoint, FftError, StageObserver, Transform, check_size};
use crate::float::ReferenceFft;
use crate::registry::Registry;

/// Which transform directions a suite exercises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Directions {
    #[default]
    Both,
    Forward,
    Inverse,
}

impl Directions {
    fn flags(self) -> &'static [bool] {
        match self {
            Directions::Both => &[true, false],
            Directions::Forward => &[true],
            Directions::Inverse => &[false],
        }
    }
}

/// Tolerance settings for a validation run.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValidationConfig {
    /// Largest acceptable error at any checkpoint.
    pub tolerance: f64,
    /// Scale errors by `max(1, largest reference component)` at each checkpoint.
    pub relative: bool,
    pub directions: Directions,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-9,
            relative: true,
            directions: Directions::Both,
        }
    }
}

impl ValidationConfig {
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Compare raw differences instead of scaled ones.
    pub fn absolute(mut self) -> Self {
        self.relative = false;
        self
    }

    pub fn forward_only(mut self) -> Self {
        self.directions = Directions::Forward;
        self
    }

    pub fn with_directions(mut self, directions: Directions) -> Self {
        self.directions = directions;
        self
    }
}

/// Progress of a [`Validator`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValidationState {
    NotStarted,
    Running(Checkpoint),
    Passed,
    Failed { checkpoint: Checkpoint, error: f64 },
}

impl ValidationState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ValidationState::Passed | ValidationState::Failed { .. })
    }
}

/// Error observed at one checkpoint. `max_error` is `None` when the
/// candidate did not expose that checkpoint.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CheckpointResult {
    pub checkpoint: Checkpoint,
    pub max_error: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ValidationOutcome {
    Passed,
    Failed { checkpoint: Checkpoint, error: f64 },
}

/// Record of one validation run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValidationReport {
    pub implementation: String,
    pub size: usize,
    pub forward: bool,
    pub tolerance: f64,
    /// Compared checkpoints in order, up to and including a failing one.
    pub checkpoints: Vec<CheckpointResult>,
    pub outcome: ValidationOutcome,
}

impl ValidationReport {
    pub fn passed(&self) -> bool {
        self.outcome == ValidationOutcome::Passed
    }

    /// The failing checkpoint and its error, if any.
    pub fn failure(&self) -> Option<(Checkpoint, f64)> {
        match self.outcome {
            ValidationOutcome::Passed => None,
            ValidationOutcome::Failed { checkpoint, error } => Some((checkpoint, error)),
        }
    }

    /// Error recorded for `checkpoint`, if it was compared.
    pub fn error_at(&self, checkpoint: Checkpoint) -> Option<f64> {
        self.checkpoints
            .iter()
            .find(|c| c.checkpoint == checkpoint)
            .and_then(|c| c.max_error)
    }

    /// Turns a failed report into [`FftError::ValidationFailed`].
    pub fn into_result(self) -> Result<Self, FftError> {
        match self.outcome {
            ValidationOutcome::Passed => Ok(self),
            ValidationOutcome::Failed { checkpoint, error } => Err(FftError::ValidationFailed {
                implementation: self.implementation,
                checkpoint,
                error,
                tolerance: self.tolerance,
            }),
        }
    }
}

/// Captures a copy of the buffer at every checkpoint.
#[derive(Default)]
struct Recorder {
    snapshots: Vec<(Checkpoint, Vec<Complex64>)>,
}

impl StageObserver for Recorder {
    fn observe(&mut self, checkpoint: Checkpoint, data: &[Complex64]) {
        self.snapshots.push((checkpoint, data.to_vec()));
    }
}

impl Recorder {
    fn get(&self, checkpoint: Checkpoint) -> Option<&[Complex64]> {
        self.snapshots
            .iter()
            .find(|(c, _)| *c == checkpoint)
            .map(|(_, data)| data.as_slice())
    }
}

/// Largest componentwise difference, optionally scaled by the reference.
/// NaN and length mismatches count as infinite error.
fn max_error(reference: &[Complex64], candidate: &[Complex64], relative: bool) -> f64 {
    if reference.len() != candidate.len() {
        return f64::INFINITY;
    }
    let mut worst: f64 = 0.0;
    let mut scale: f64 = 1.0;
    for (r, c) in reference.iter().zip(candidate) {
        let d = (r.re - c.re).abs().max((r.im - c.im).abs());
        if d.is_nan() || c.re.is_nan() || c.im.is_nan() {
            return f64::INFINITY;
        }
        worst = worst.max(d);
        scale = scale.max(r.re.abs()).max(r.im.abs());
    }
    if relative { worst / scale } else { worst }
}

/// Runs one differential comparison at a time and tracks its state.
#[derive(Debug, Clone)]
pub struct Validator {
    config: ValidationConfig,
    state: ValidationState,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(ValidationConfig::default())
    }
}

impl Validator {
    pub fn new(config: ValidationConfig) -> Self {
        Self {
            config,
            state: ValidationState::NotStarted,
        }
    }

    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// State of the most recent run.
    pub fn state(&self) -> ValidationState {
        self.state
    }

    /// Compares `candidate` against `reference` on one signal and direction.
    ///
    /// Rejected input (from either side) is returned as an error, not as a
    /// failed report.
    pub fn run(
        &mut self,
        reference: &dyn Transform,
        candidate: &dyn Transform,
        name: &str,
        real: &[f64],
        imag: &[f64],
        forward: bool,
    ) -> Result<ValidationReport, FftError> {
        self.state = ValidationState::NotStarted;

        let mut expected = Recorder::default();
        let expected_spectrum = reference.transform_observed(real, imag, forward, &mut expected)?;
        let mut observed = Recorder::default();
        let observed_spectrum = candidate.transform_observed(real, imag, forward, &mut observed)?;

        let staged = expected
            .snapshots
            .iter()
            .filter(|(c, _)| *c != Checkpoint::Final)
            .map(|(c, data)| (*c, data.as_slice(), observed.get(*c)));
        let last = core::iter::once((
            Checkpoint::Final,
            expected_spectrum.bins(),
            Some(observed_spectrum.bins()),
        ));

        let mut checkpoints = Vec::new();
        let mut outcome = ValidationOutcome::Passed;

        for (checkpoint, want, got) in staged.chain(last) {
            self.state = ValidationState::Running(checkpoint);
            let Some(got) = got else {
                checkpoints.push(CheckpointResult {
                    checkpoint,
                    max_error: None,
                });
                continue;
            };

            let error = max_error(want, got, self.config.relative);
            checkpoints.push(CheckpointResult {
                checkpoint,
                max_error: Some(error),
            });

            #[cfg(feature = "tracing")]
            tracing::debug!(
                implementation = name,
                size = real.len(),
                forward,
                %checkpoint,
                error,
                "checkpoint compared"
            );

            if error > self.config.tolerance {
                outcome = ValidationOutcome::Failed { checkpoint, error };
                break;
            }
        }

        self.state = match outcome {
            ValidationOutcome::Passed => ValidationState::Passed,
            ValidationOutcome::Failed { checkpoint, error } => {
                #[cfg(feature = "tracing")]
                tracing::warn!(
                    implementation = name,
                    size = real.len(),
                    forward,
                    %checkpoint,
                    error,
                    tolerance = self.config.tolerance,
                    "validation failed"
                );
                ValidationState::Failed { checkpoint, error }
            }
        };

        Ok(ValidationReport {
            implementation: name.to_string(),
            size: real.len(),
            forward,
            tolerance: self.config.tolerance,
            checkpoints,
            outcome,
        })
    }
}

/// One-shot comparison of `candidate` against [`ReferenceFft`].
pub fn validate(
    candidate: &dyn Transform,
    name: &str,
    real: &[f64],
    imag: &[f64],
    forward: bool,
    config: ValidationConfig,
) -> Result<ValidationReport, FftError> {
    Validator::new(config).run(&ReferenceFft, candidate, name, real, imag, forward)
}

/// Runs the standard signal suite for size `n` in every configured
/// direction, stopping after the first failing report.
pub fn validate_suite(
    candidate: &dyn Transform,
    name: &str,
    n: usize,
    config: ValidationConfig,
) -> Result<Vec<ValidationReport>, FftError> {
    check_size(n)?;
    let mut validator = Validator::new(config);
    let mut reports = Vec::new();
    for signal in TestSignal::standard_suite(n) {
        let (real, imag) = signal.generate(n);
        for &forward in config.directions.flags() {
            let report = validator.run(&ReferenceFft, candidate, name, &real, &imag, forward)?;
            let failed = !report.passed();
            reports.push(report);
            if failed {
                return Ok(reports);
            }
        }
    }
    Ok(reports)
}

/// Runs [`validate_suite`] for every declaration in `registry`.
pub fn validate_registry(
    registry: &Registry,
    config: ValidationConfig,
) -> Result<Vec<ValidationReport>, FftError> {
    let mut reports = Vec::new();
    for (descriptor, implementation) in registry.implementations() {
        reports.extend(validate_suite(
            &*implementation,
            descriptor.name,
            descriptor.size,
            config,
        )?);
    }
    Ok(reports)
}

/// Input fixtures for differential runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TestSignal {
    Zeros,
    Ones,
    /// Unit impulse at the given index (wrapped to the signal length).
    Impulse(usize),
    /// `cos(2π·cycles·i/N)` on the real part, zero imaginary part.
    Sinusoid { cycles: usize },
    /// Uniform values in `[-1, 1)` on both parts.
    Random { seed: u64 },
}

impl TestSignal {
    /// Returns `(real, imag)` of length `n`.
    pub fn generate(&self, n: usize) -> (Vec<f64>, Vec<f64>) {
        match *self {
            TestSignal::Zeros => (vec![0.0; n], vec![0.0; n]),
            TestSignal::Ones => (vec![1.0; n], vec![0.0; n]),
            TestSignal::Impulse(pos) => {
                let mut real = vec![0.0; n];
                if n > 0 {
                    real[pos % n] = 1.0;
                }
                (real, vec![0.0; n])
            }
            TestSignal::Sinusoid { cycles } => {
                let real: Vec<f64> = (0..n)
                    .map(|i| libm::cos(2.0 * PI * (cycles * i % n.max(1)) as f64 / n as f64))
                    .collect();
                (real, vec![0.0; n])
            }
            TestSignal::Random { seed } => {
                let mut rng = StdRng::seed_from_u64(seed);
                let real: Vec<f64> = (0..n).map(|_| rng.random_range(-1.0..1.0)).collect();
                let imag: Vec<f64> = (0..n).map(|_| rng.random_range(-1.0..1.0)).collect();
                (real, imag)
            }
        }
    }

    /// Zeros, ones, impulses at both ends, three sinusoids and two random signals.
    pub fn standard_suite(n: usize) -> Vec<TestSignal> {
        vec![
            TestSignal::Zeros,
            TestSignal::Ones,
            TestSignal::Impulse(0),
            TestSignal::Impulse(n.saturating_sub(1)),
            TestSignal::Sinusoid { cycles: 1 },
            TestSignal::Sinusoid { cycles: 3 },
            TestSignal::Sinusoid { cycles: n / 4 },
            TestSignal::Random { seed: 0x5EED },
            TestSignal::Random { seed: 0xF0F0_1234 },
        ]
    }
}

#[cfg(test)]
#[path = "validation_tests.rs"]
mod tests;
