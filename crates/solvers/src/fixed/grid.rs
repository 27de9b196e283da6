use thiserror::Error;

/// The sample times a fixed-step integration reports.
///
/// Times are finite and strictly increasing. The first time is the time of
/// the initial condition.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    times: Vec<f64>,
}

/// Errors that can occur when building a [`Grid`].
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum GridError {
    #[error("a grid needs at least one time")]
    Empty,

    #[error("grid time {index} is not finite")]
    NonFinite { index: usize },

    #[error("grid time {index} ({t}) does not come after {previous}")]
    NotIncreasing { index: usize, previous: f64, t: f64 },

    #[error("end_time must be finite and positive, got {0}")]
    EndTime(f64),

    #[error("step must be finite and positive, got {0}")]
    Step(f64),

    #[error("end_time {end_time} holds no whole step of {step}")]
    TooFewPoints { end_time: f64, step: f64 },
}

impl Grid {
    /// Builds `n = floor(end_time / step)` evenly spaced times over
    /// `[0, end_time]`, endpoints included.
    ///
    /// The spacing is `end_time / (n - 1)`, which matches `step` only when
    /// `step` divides `end_time` evenly. A single point grid is `[0]`.
    ///
    /// # Errors
    ///
    /// Returns an error if either argument is not finite and positive, or if
    /// `step > end_time` so that no point fits.
    pub fn uniform(end_time: f64, step: f64) -> Result<Self, GridError> {
        if !end_time.is_finite() || end_time <= 0.0 {
            return Err(GridError::EndTime(end_time));
        }
        if !step.is_finite() || step <= 0.0 {
            return Err(GridError::Step(step));
        }

        let n = (end_time / step).floor();
        if n < 1.0 {
            return Err(GridError::TooFewPoints { end_time, step });
        }

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let n = n as usize;
        if n == 1 {
            return Ok(Self { times: vec![0.0] });
        }

        #[allow(clippy::cast_precision_loss)]
        let intervals = (n - 1) as f64;
        let times = (0..n)
            .map(|i| {
                if i == n - 1 {
                    end_time
                } else {
                    #[allow(clippy::cast_precision_loss)]
                    let i = i as f64;
                    end_time * i / intervals
                }
            })
            .collect();

        Ok(Self { times })
    }

    /// Builds a grid from caller-supplied times.
    ///
    /// # Errors
    ///
    /// Returns an error if `times` is empty, contains a non-finite value, or
    /// is not strictly increasing.
    pub fn explicit(times: Vec<f64>) -> Result<Self, GridError> {
        if times.is_empty() {
            return Err(GridError::Empty);
        }
        if let Some(index) = times.iter().position(|t| !t.is_finite()) {
            return Err(GridError::NonFinite { index });
        }
        if let Some(index) = times.windows(2).position(|w| w[1] <= w[0]) {
            return Err(GridError::NotIncreasing {
                index: index + 1,
                previous: times[index],
                t: times[index + 1],
            });
        }

        Ok(Self { times })
    }

    /// Returns the grid times.
    #[must_use]
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Returns the number of grid times.
    #[must_use]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Always `false`: a grid holds at least one time.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Returns the first grid time.
    #[must_use]
    pub fn start(&self) -> f64 {
        self.times[0]
    }

    /// Iterates over consecutive `(from, to)` intervals.
    pub(super) fn segments(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.times.windows(2).map(|w| (w[0], w[1]))
    }
}
