use std::{cell::RefCell, rc::Rc};

use ode_solvers::{
    SVector,
    dop_shared::{IntegrationError, OutputType},
};
use stepwise_core::{State, System};

use super::Method;

type Vector = SVector<f64, 2>;

// Dormand-Prince controller settings, the same ones `ode_solvers` uses in `new`.
// `new` always selects dense output, which compares `|xd| <= |x|` and stalls
// on a zero increment or on negative times, so the kernels are built with
// `from_param` and sparse output instead.
const SAFETY_FACTOR: f64 = 0.9;
const MAX_STEPS: u32 = 100_000;
const STIFFNESS_CHECK: u32 = 1000;

/// Adapts a [`System`] to the `ode_solvers` system interface.
///
/// `ode_solvers` cannot propagate errors from the right-hand side, so a failed
/// evaluation is stored in `call_error`, the derivative is filled with `NaN`,
/// and `solout` asks the kernel to stop.
struct OdeSystem<'a, S: System> {
    system: &'a S,
    call_error: Rc<RefCell<Option<S::Error>>>,
}

impl<S: System> ode_solvers::System<f64, Vector> for OdeSystem<'_, S> {
    fn system(&self, t: f64, y: &Vector, dy: &mut Vector) {
        let state = State::new(y[0], y[1]);

        match self.system.derivative(&state, t) {
            Ok(derivative) => {
                *dy = Vector::new(derivative.dy, derivative.d2y);
            }
            Err(e) => {
                // Keep the first failure; later calls may fail as a consequence.
                let mut slot = self.call_error.borrow_mut();
                if slot.is_none() {
                    *slot = Some(e);
                }
                *dy = Vector::from_element(f64::NAN);
            }
        }
    }

    fn solout(&mut self, _t: f64, _y: &Vector, _dy: &Vector) -> bool {
        self.call_error.borrow().is_some()
    }
}

/// What one kernel run over a single grid interval produced.
pub(super) struct Advance {
    pub(super) state: State,
    pub(super) evaluations: usize,
}

/// Failure of a single-interval kernel run.
pub(super) enum KernelError<E> {
    System(E),
    Integration(IntegrationError),
}

/// Advances `state` from `from` to `to` with one `ode_solvers` run.
pub(super) fn advance<S: System>(
    system: &S,
    method: Method,
    state: &State,
    from: f64,
    to: f64,
) -> Result<Advance, KernelError<S::Error>> {
    let call_error = Rc::new(RefCell::new(None));
    let ode_system = OdeSystem {
        system,
        call_error: Rc::clone(&call_error),
    };
    let y_start = Vector::new(state.y, state.dy);

    let outcome = match method {
        Method::Rk4 => {
            let mut stepper = ode_solvers::Rk4::new(ode_system, from, y_start, to, to - from);
            stepper
                .integrate()
                .map(|stats| (stats.num_eval, stepper.y_out().last().copied()))
        }
        Method::Dopri5 { abs_tol, rel_tol } => {
            let mut stepper = ode_solvers::Dopri5::from_param(
                ode_system,
                from,
                to,
                to - from,
                y_start,
                rel_tol,
                abs_tol,
                SAFETY_FACTOR,
                0.04,
                0.2,
                10.0,
                to - from,
                0.0,
                MAX_STEPS,
                STIFFNESS_CHECK,
                OutputType::Sparse,
            );
            stepper
                .integrate()
                .map(|stats| (stats.num_eval, stepper.y_out().last().copied()))
        }
        Method::Dop853 { abs_tol, rel_tol } => {
            let mut stepper = ode_solvers::Dop853::from_param(
                ode_system,
                from,
                to,
                to - from,
                y_start,
                rel_tol,
                abs_tol,
                SAFETY_FACTOR,
                0.0,
                0.333,
                6.0,
                to - from,
                0.0,
                MAX_STEPS,
                STIFFNESS_CHECK,
                OutputType::Sparse,
            );
            stepper
                .integrate()
                .map(|stats| (stats.num_eval, stepper.y_out().last().copied()))
        }
    };

    // A system failure usually also derails the kernel; report the cause.
    if let Some(err) = call_error.borrow_mut().take() {
        return Err(KernelError::System(err));
    }

    let (evaluations, y_end) = outcome.map_err(KernelError::Integration)?;
    let y_end = y_end.unwrap_or(y_start);

    Ok(Advance {
        state: State::new(y_end[0], y_end[1]),
        evaluations: evaluations as usize,
    })
}
