//! ODE solvers for stepwise.
//!
//! # Modules
//!
//! - [`adaptive`] — self-stepping solvers that pick their own step size by
//!   step doubling, with an Euler or RK4 update rule
//! - [`fixed`] — reference integrator that samples a prescribed time grid,
//!   backed by the `ode_solvers` crate
//! - [`rk4`] — the classical Runge–Kutta 4 stage evaluator used by the
//!   adaptive RK4 rule
//!
//! All solvers integrate a [`System`](stepwise_core::System) over a
//! two-component [`State`](stepwise_core::State) and return a
//! [`Trajectory`](stepwise_core::Trajectory).

pub mod adaptive;
pub mod fixed;
pub mod rk4;
