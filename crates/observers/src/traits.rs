//! Capability traits for solver-agnostic observers.
//!
//! These traits abstract over solver-specific event and action types, so an
//! observer can be written once and reused with any solver whose events expose
//! the data it needs.
//!
//! # Event traits
//!
//! - [`HasTime`] — events that carry the integration time
//! - [`HasStepSize`] — events that carry the attempted and next step sizes
//! - [`HasErrorEstimate`] — events that carry a local error estimate and an
//!   accept/reject verdict
//!
//! # Action traits
//!
//! - [`CanStopEarly`] — actions that can signal early termination
//!
//! # Example
//!
//! ```rust
//! use stepwise_core::Observer;
//! use stepwise_observers::traits::{CanStopEarly, HasTime};
//!
//! /// Stops any time-stepping solver once it passes `t_stop`.
//! struct StopAfter {
//!     t_stop: f64,
//! }
//!
//! impl<E: HasTime, A: CanStopEarly> Observer<E, A> for StopAfter {
//!     fn observe(&mut self, event: &E) -> Option<A> {
//!         (event.time() > self.t_stop).then(A::stop_early)
//!     }
//! }
//! ```

use stepwise_solvers::adaptive;

/// An event that carries the integration time.
pub trait HasTime {
    /// Returns the time associated with this event.
    fn time(&self) -> f64;
}

/// An event that carries step sizes.
pub trait HasStepSize {
    /// Returns the step size that was attempted.
    fn step_size(&self) -> f64;

    /// Returns the step size the solver will attempt next.
    fn next_step_size(&self) -> f64;
}

/// An event that carries a local error estimate.
pub trait HasErrorEstimate {
    /// Returns the error estimate, `f64::NAN` when none could be formed.
    fn error_estimate(&self) -> f64;

    /// Returns `true` if the step passed the error test.
    fn accepted(&self) -> bool;
}

/// An action type that can signal early termination.
pub trait CanStopEarly {
    /// Returns the action that stops the solver early.
    fn stop_early() -> Self;
}

impl HasTime for adaptive::Event {
    fn time(&self) -> f64 {
        self.t()
    }
}

impl HasStepSize for adaptive::Event {
    fn step_size(&self) -> f64 {
        self.step()
    }

    fn next_step_size(&self) -> f64 {
        self.next_step()
    }
}

impl HasErrorEstimate for adaptive::Event {
    fn error_estimate(&self) -> f64 {
        self.error()
    }

    fn accepted(&self) -> bool {
        self.is_accepted()
    }
}

impl CanStopEarly for adaptive::Action {
    fn stop_early() -> Self {
        Self::StopEarly
    }
}
