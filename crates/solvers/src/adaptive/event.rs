use stepwise_core::State;

/// Event emitted by the adaptive solver after every step attempt.
///
/// `step` is the size that was attempted and `next_step` the size the solver
/// will try next: twice `step` after an acceptance, half of it after a
/// rejection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    /// The step passed the error test and was appended to the trajectory.
    Accepted {
        /// Time reached by the accepted step.
        t: f64,

        /// State at `t`.
        state: State,

        /// Size of the accepted step.
        step: f64,

        /// Size of the next attempt.
        next_step: f64,

        /// Error estimate of the accepted step.
        error: f64,
    },

    /// The step failed the error test (or produced a non-finite state).
    Rejected {
        /// Time the step was attempted from.
        t: f64,

        /// Size of the rejected step.
        step: f64,

        /// Size of the next attempt.
        next_step: f64,

        /// Error estimate of the rejected step, `NaN` if it was non-finite.
        error: f64,
    },
}

impl Event {
    /// Returns the event time: the new time after an acceptance, or the
    /// unchanged time after a rejection.
    #[must_use]
    pub fn t(&self) -> f64 {
        match self {
            Self::Accepted { t, .. } | Self::Rejected { t, .. } => *t,
        }
    }

    /// Returns the attempted step size.
    #[must_use]
    pub fn step(&self) -> f64 {
        match self {
            Self::Accepted { step, .. } | Self::Rejected { step, .. } => *step,
        }
    }

    /// Returns the step size of the next attempt.
    #[must_use]
    pub fn next_step(&self) -> f64 {
        match self {
            Self::Accepted { next_step, .. } | Self::Rejected { next_step, .. } => *next_step,
        }
    }

    /// Returns the error estimate.
    #[must_use]
    pub fn error(&self) -> f64 {
        match self {
            Self::Accepted { error, .. } | Self::Rejected { error, .. } => *error,
        }
    }

    /// Returns `true` for [`Event::Accepted`].
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }
}
