use std::slice;

use thiserror::Error;

use crate::{Component, ComponentError, State};

/// One accepted point of an integration run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// The time of the sample.
    pub t: f64,

    /// The state at time `t`.
    pub state: State,
}

/// The ordered samples produced by one integration run.
///
/// Storage is time-major: each row is a [`Sample`] holding both state
/// components at one time. Per-component series (the layout a plot wants) are
/// built on request by [`series`](Self::series) and [`points`](Self::points).
///
/// A trajectory is built once from a complete sample list and exposes no way
/// to modify it afterwards. Sample times are finite and strictly increasing,
/// and there is always at least one sample (the initial condition).
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    samples: Vec<Sample>,
}

/// Errors that can occur when building a [`Trajectory`].
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum TrajectoryError {
    #[error("a trajectory needs at least one sample")]
    Empty,

    #[error("sample {index} has a non-finite time")]
    NonFiniteTime { index: usize },

    #[error("sample {index} at t={t} does not come after t={previous}")]
    NotIncreasing { index: usize, previous: f64, t: f64 },
}

impl Trajectory {
    /// Builds a trajectory from samples in time order.
    ///
    /// # Errors
    ///
    /// Returns an error if `samples` is empty, if any time is non-finite, or
    /// if the times are not strictly increasing.
    pub fn new(samples: Vec<Sample>) -> Result<Self, TrajectoryError> {
        if samples.is_empty() {
            return Err(TrajectoryError::Empty);
        }

        for (index, sample) in samples.iter().enumerate() {
            if !sample.t.is_finite() {
                return Err(TrajectoryError::NonFiniteTime { index });
            }
        }

        for (index, pair) in samples.windows(2).enumerate() {
            let (previous, t) = (pair[0].t, pair[1].t);
            if t <= previous {
                return Err(TrajectoryError::NotIncreasing {
                    index: index + 1,
                    previous,
                    t,
                });
            }
        }

        Ok(Self { samples })
    }

    /// Returns all samples in time order.
    #[must_use]
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Returns the number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always `false`: a trajectory holds at least its initial sample.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Returns the first sample (the initial condition).
    #[must_use]
    pub fn first(&self) -> &Sample {
        &self.samples[0]
    }

    /// Returns the last accepted sample.
    #[must_use]
    pub fn last(&self) -> &Sample {
        &self.samples[self.samples.len() - 1]
    }

    /// Iterates over the samples in time order.
    pub fn iter(&self) -> slice::Iter<'_, Sample> {
        self.samples.iter()
    }

    /// Returns the sample times.
    #[must_use]
    pub fn times(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.t).collect()
    }

    /// Returns one state component for every sample, aligned with [`times`](Self::times).
    #[must_use]
    pub fn series(&self, component: Component) -> Vec<f64> {
        self.samples.iter().map(|s| s.state.get(component)).collect()
    }

    /// Returns the component at `index` (0 = value, 1 = derivative) for every sample.
    ///
    /// # Errors
    ///
    /// Returns [`ComponentError`] if `index` is not 0 or 1.
    pub fn component(&self, index: usize) -> Result<Vec<f64>, ComponentError> {
        Component::try_from(index).map(|component| self.series(component))
    }

    /// Returns `[t, value]` pairs for one component, ready for plotting.
    #[must_use]
    pub fn points(&self, component: Component) -> Vec<[f64; 2]> {
        self.samples
            .iter()
            .map(|s| [s.t, s.state.get(component)])
            .collect()
    }
}

impl<'a> IntoIterator for &'a Trajectory {
    type Item = &'a Sample;
    type IntoIter = slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}
