//! Fixed-grid reference integrator backed by the `ode_solvers` crate.
//!
//! The integrator reports the state exactly at the times of a [`Grid`]. It
//! runs one kernel integration per grid interval, so row times match the grid
//! bit for bit whichever [`Method`] does the stepping.
//!
//! # Example
//!
//! ```
//! use stepwise_core::{Derivative, State, from_fn};
//! use stepwise_solvers::fixed::{self, Method};
//!
//! // y″ = −y, y(0) = 1, y′(0) = 0
//! let system = from_fn(|s: &State, _t| Derivative::new(s.dy, -s.y));
//! let solution = fixed::solve_uniform(&system, State::new(1.0, 0.0), 1.0, 0.1, Method::default())?;
//!
//! let last = solution.trajectory.last();
//! assert_eq!(last.t, 1.0);
//! assert!((last.state.y - 1.0_f64.cos()).abs() < 1e-6);
//! # Ok::<(), fixed::Error>(())
//! ```

mod error;
mod grid;
mod kernel;
mod method;
mod solution;

pub use error::Error;
pub use grid::{Grid, GridError};
pub use method::Method;
pub use solution::Solution;

use log::debug;
use stepwise_core::{Sample, State, System, Trajectory};

use kernel::KernelError;

/// Integrates `system` from `initial` at `grid.start()` through every grid time.
///
/// # Errors
///
/// Returns an error if `initial` is not finite, if the system fails at any
/// evaluation point, or if the kernel gives up. No partial trajectory is
/// returned.
pub fn solve<S: System>(
    system: &S,
    initial: State,
    grid: &Grid,
    method: Method,
) -> Result<Solution, Error> {
    if !initial.is_finite() {
        return Err(Error::NonFiniteInitialState);
    }

    debug!(
        "fixed {} solve: {} grid points over [{}, {}]",
        method.name(),
        grid.len(),
        grid.start(),
        grid.times()[grid.len() - 1],
    );

    let mut state = initial;
    let mut evaluations = 0;
    let mut samples = Vec::with_capacity(grid.len());
    samples.push(Sample {
        t: grid.start(),
        state,
    });

    for (from, to) in grid.segments() {
        let advance =
            kernel::advance(system, method, &state, from, to).map_err(|err| match err {
                KernelError::System(err) => Error::system(err),
                KernelError::Integration(err) => Error::Integration(err),
            })?;

        state = advance.state;
        evaluations += advance.evaluations;
        samples.push(Sample { t: to, state });
    }

    debug!("fixed solve finished: {evaluations} evaluations");

    Ok(Solution {
        trajectory: Trajectory::new(samples)?,
        evaluations,
    })
}

/// Integrates `system` over the uniform grid `Grid::uniform(end_time, step)`.
///
/// # Errors
///
/// Returns [`Error::InvalidGrid`] if the grid cannot be built, or any error
/// [`solve`] can return.
pub fn solve_uniform<S: System>(
    system: &S,
    initial: State,
    end_time: f64,
    step: f64,
    method: Method,
) -> Result<Solution, Error> {
    let grid = Grid::uniform(end_time, step)?;
    solve(system, initial, &grid, method)
}
