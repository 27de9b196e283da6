use thiserror::Error;

use super::Estimator;

/// Configuration for the adaptive step-doubling solver.
///
/// `acc` is both the per-step acceptance tolerance and the seed of the first
/// step, `h₀ = √acc`. The remaining fields are safety limits that keep the
/// loop finite on badly behaved systems.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    acc: f64,
    max_iters: usize,
    max_rejections: usize,
    min_step: f64,
    estimator: Estimator,
}

/// Errors that can occur when validating an adaptive solver config.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("acc must be finite and positive")]
    Accuracy,

    #[error("max_rejections must be at least 1")]
    MaxRejections,

    #[error("min_step must be finite and non-negative")]
    MinStep,
}

impl Default for Config {
    fn default() -> Self {
        // Known-good value, unwrap is safe
        Self::new(1e-5).unwrap()
    }
}

impl Config {
    /// Default cap on total iterations (accepted plus rejected steps).
    pub const DEFAULT_MAX_ITERS: usize = 10_000_000;

    /// Default cap on consecutive rejections at one time point.
    pub const DEFAULT_MAX_REJECTIONS: usize = 64;

    /// Creates a config with the given accuracy threshold and default limits.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Accuracy`] if `acc` is not finite and positive.
    pub fn new(acc: f64) -> Result<Self, ConfigError> {
        if !acc.is_finite() || acc <= 0.0 {
            return Err(ConfigError::Accuracy);
        }

        Ok(Self {
            acc,
            max_iters: Self::DEFAULT_MAX_ITERS,
            max_rejections: Self::DEFAULT_MAX_REJECTIONS,
            min_step: 0.0,
            estimator: Estimator::default(),
        })
    }

    /// Sets the cap on total iterations.
    ///
    /// Reaching the cap ends the run with
    /// [`Status::MaxIters`](super::Status::MaxIters).
    #[must_use]
    pub fn with_max_iters(mut self, max_iters: usize) -> Self {
        self.max_iters = max_iters;
        self
    }

    /// Sets the cap on consecutive rejections at a single time point.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MaxRejections`] if `max_rejections` is zero.
    pub fn with_max_rejections(mut self, max_rejections: usize) -> Result<Self, ConfigError> {
        if max_rejections == 0 {
            return Err(ConfigError::MaxRejections);
        }
        self.max_rejections = max_rejections;
        Ok(self)
    }

    /// Sets the smallest step the solver may attempt. Zero disables the check.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MinStep`] if `min_step` is negative or non-finite.
    pub fn with_min_step(mut self, min_step: f64) -> Result<Self, ConfigError> {
        if !min_step.is_finite() || min_step < 0.0 {
            return Err(ConfigError::MinStep);
        }
        self.min_step = min_step;
        Ok(self)
    }

    /// Sets how the half-step comparison is formed.
    #[must_use]
    pub fn with_estimator(mut self, estimator: Estimator) -> Self {
        self.estimator = estimator;
        self
    }

    /// Returns the accuracy threshold.
    #[must_use]
    pub fn acc(&self) -> f64 {
        self.acc
    }

    /// Returns the first step size, `√acc`.
    #[must_use]
    pub fn initial_step(&self) -> f64 {
        self.acc.sqrt()
    }

    /// Returns the cap on total iterations.
    #[must_use]
    pub fn max_iters(&self) -> usize {
        self.max_iters
    }

    /// Returns the cap on consecutive rejections.
    #[must_use]
    pub fn max_rejections(&self) -> usize {
        self.max_rejections
    }

    /// Returns the smallest allowed step.
    #[must_use]
    pub fn min_step(&self) -> f64 {
        self.min_step
    }

    /// Returns the error estimator.
    #[must_use]
    pub fn estimator(&self) -> Estimator {
        self.estimator
    }
}
