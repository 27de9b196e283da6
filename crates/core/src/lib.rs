//! Core traits and types for stepwise.
//!
//! This crate defines the shared abstractions that solvers and observers
//! build on:
//!
//! - [`State`] and [`Derivative`] — the two-component state `(y, y′)` of a
//!   first-order-reduced ODE and its time derivative
//! - [`System`] — a caller-supplied function mapping `(state, t)` to a
//!   [`Derivative`], with closure adapters [`from_fn`] and [`from_slice_fn`]
//! - [`Trajectory`] — the ordered, time-major buffer of accepted samples
//! - [`Observer`] — receives solver events and optionally returns control actions
//! - [`StepIntegrable`] — types that advance by `derivative * delta`

mod observer;
mod state;
mod step;
mod system;
mod trajectory;

pub use observer::Observer;
pub use state::{ArityError, Component, ComponentError, Derivative, State};
pub use step::{DerivativeOf, StepIntegrable};
pub use system::{FnSystem, SliceFnSystem, System, from_fn, from_slice_fn};
pub use trajectory::{Sample, Trajectory, TrajectoryError};
