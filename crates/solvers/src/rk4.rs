//! Classical fourth-order Runge–Kutta stage evaluation.
//!
//! For a step of size `h` from `(state, t)` the four stages are h-weighted
//! slopes, with `k` for the `y` component and `l` for the `y′` component:
//!
//! ```text
//! (k1, l1) = h · f(state, t)
//! (k2, l2) = h · f(state + (k1, l1)/2, t + h/2)
//! (k3, l3) = h · f(state + (k2, l2)/2, t + h/2)
//! (k4, l4) = h · f(state + (k3, l3),   t + h)
//!
//! next = state + (k1 + 2k2 + 2k3 + k4, l1 + 2l2 + 2l3 + l4) / 6
//! ```
//!
//! Everything here is a pure function of its arguments.

use stepwise_core::{Derivative, State, System};

/// The four h-weighted stage derivatives of one RK4 step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stages {
    /// Stage increments for `y`.
    pub k: [f64; 4],

    /// Stage increments for `y′`.
    pub l: [f64; 4],
}

impl Stages {
    /// Returns the weighted sums `(k1 + 2k2 + 2k3 + k4, l1 + 2l2 + 2l3 + l4)`.
    #[must_use]
    pub fn combined(&self) -> (f64, f64) {
        let weigh = |s: &[f64; 4]| s[0] + 2.0 * s[1] + 2.0 * s[2] + s[3];
        (weigh(&self.k), weigh(&self.l))
    }

    /// Applies the combined increment to `state`: `state + combined / 6`.
    #[must_use]
    pub fn apply(&self, state: &State) -> State {
        let (dk, dl) = self.combined();
        State::new(state.y + dk / 6.0, state.dy + dl / 6.0)
    }
}

/// Evaluates the four RK4 stages for a step of size `h` from `(state, t)`.
///
/// # Errors
///
/// Returns the system's error if any of the four evaluations fails.
pub fn stages<S: System>(system: &S, h: f64, state: &State, t: f64) -> Result<Stages, S::Error> {
    let scaled = |d: Derivative| (h * d.dy, h * d.d2y);
    let offset = |k: f64, l: f64, weight: f64| State::new(state.y + weight * k, state.dy + weight * l);

    let (k1, l1) = scaled(system.derivative(state, t)?);
    let (k2, l2) = scaled(system.derivative(&offset(k1, l1, 0.5), t + 0.5 * h)?);
    let (k3, l3) = scaled(system.derivative(&offset(k2, l2, 0.5), t + 0.5 * h)?);
    let (k4, l4) = scaled(system.derivative(&offset(k3, l3, 1.0), t + h)?);

    Ok(Stages {
        k: [k1, k2, k3, k4],
        l: [l1, l2, l3, l4],
    })
}

/// Advances `state` by one RK4 step of size `h`.
///
/// # Errors
///
/// Returns the system's error if any stage evaluation fails.
pub fn step<S: System>(system: &S, h: f64, state: &State, t: f64) -> Result<State, S::Error> {
    stages(system, h, state, t).map(|stages| stages.apply(state))
}
