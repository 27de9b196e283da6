//! Adaptive step-doubling solvers for two-component ODE systems.
//!
//! # Algorithm
//!
//! Starting from `t = 0`, the initial state, and `h = √acc`, each iteration:
//!
//! 1. Computes `full`, one update of size `h` with the chosen [`Rule`].
//! 2. Computes `half`, a half-size comparison formed by the configured
//!    [`Estimator`].
//! 3. Estimates the error as `|half.y − full.y|`.
//! 4. If the error is below `acc`, accepts `full` at `t + h` and doubles `h`.
//!    Otherwise halves `h` and retries from the same point.
//!
//! The loop ends once the last accepted time reaches `end_time`. The final
//! sample may overshoot `end_time`; nothing is interpolated back.
//!
//! Step sizes only ever change by factors of two, so the step bookkeeping adds
//! no rounding of its own.
//!
//! # Safety limits
//!
//! Without limits a step-doubling loop can spin forever: a system that returns
//! `NaN`, or a tolerance far below what the rule can reach, makes every
//! attempt fail while `h` shrinks toward zero. The [`Config`] bounds this in
//! three ways:
//!
//! - `max_iters` ends the run with [`Status::MaxIters`] and returns what was
//!   accepted so far
//! - `max_rejections` turns a long run of rejections at one time point into
//!   [`Error::NonFinite`] or [`Error::RejectionLimit`]
//! - `min_step` (and the requirement that `t + h > t`) turns an exhausted step
//!   into [`Error::StepUnderflow`]
//!
//! # Observer Events
//!
//! The solver emits one [`Event`] per attempt, [`Event::Accepted`] or
//! [`Event::Rejected`]. Observers can return [`Action::StopEarly`] to end the
//! run with [`Status::StoppedByObserver`].
//!
//! # Example
//!
//! ```
//! use stepwise_core::{Derivative, State, from_fn};
//! use stepwise_solvers::adaptive;
//!
//! // y″ = −y, y(0) = 1, y′(0) = 0
//! let system = from_fn(|s: &State, _t| Derivative::new(s.dy, -s.y));
//! let solution = adaptive::rk4(&system, State::new(1.0, 0.0), 1.0, 1e-4)?;
//!
//! let last = solution.trajectory.last();
//! assert!(last.t >= 1.0);
//! assert!((last.state.y - last.t.cos()).abs() < 1e-4);
//! # Ok::<(), adaptive::Error>(())
//! ```

mod action;
mod config;
mod error;
mod event;
mod rule;
mod solution;

#[cfg(test)]
mod tests;

pub use action::Action;
pub use config::{Config, ConfigError};
pub use error::Error;
pub use event::Event;
pub use rule::{Estimator, Rule};
pub use solution::{Solution, Stats, Status};

use log::{debug, trace, warn};
use stepwise_core::{Observer, Sample, State, System, Trajectory};

use rule::Trial;

/// Integrates `system` from `t = 0` to `end_time` with step doubling.
///
/// The observer receives an [`Event`] after each step attempt and may return
/// [`Action::StopEarly`] to end the run.
///
/// # Errors
///
/// Returns an error if `end_time` or `initial` is invalid, if the system
/// fails, or if one of the [`Config`] safety limits turns into an error (see
/// the [module docs](self)).
pub fn solve<S, Obs>(
    system: &S,
    initial: State,
    end_time: f64,
    rule: Rule,
    config: &Config,
    mut observer: Obs,
) -> Result<Solution, Error>
where
    S: System,
    Obs: Observer<Event, Action>,
{
    if !end_time.is_finite() || end_time <= 0.0 {
        return Err(Error::InvalidEndTime(end_time));
    }
    if !initial.is_finite() {
        return Err(Error::NonFiniteInitialState);
    }

    let acc = config.acc();
    let mut t = 0.0;
    let mut state = initial;
    let mut h = config.initial_step();
    let mut rejections = 0;
    let mut stats = Stats::default();
    let mut samples = vec![Sample { t, state }];

    debug!(
        "adaptive {rule:?} (order {}) solve: acc={acc:e}, h0={h:e}, end_time={end_time}, \
         estimator={:?}",
        rule.order(),
        config.estimator()
    );

    let status = loop {
        if t >= end_time {
            break Status::Complete;
        }
        if stats.iters >= config.max_iters() {
            warn!(
                "adaptive solve stopped at t={t} after {} iterations (max_iters)",
                stats.iters
            );
            break Status::MaxIters;
        }
        if h < config.min_step() || t + h <= t {
            warn!("adaptive solve cannot advance from t={t} with step {h:e}");
            return Err(Error::StepUnderflow { t, step: h });
        }

        stats.iters += 1;
        let trial =
            Trial::run(system, rule, config.estimator(), &state, t, h).map_err(Error::system)?;
        stats.evaluations += trial.evaluations;

        let event = if trial.passes(acc) {
            t += h;
            state = trial.full;
            samples.push(Sample { t, state });
            stats.record_accepted(h);
            rejections = 0;

            trace!("accepted t={t}, h={h:e}, error={:e}", trial.error);
            let event = Event::Accepted {
                t,
                state,
                step: h,
                next_step: 2.0 * h,
                error: trial.error,
            };
            h *= 2.0;
            event
        } else {
            stats.rejected += 1;
            rejections += 1;

            trace!("rejected t={t}, h={h:e}, error={:e}", trial.error);
            if rejections > config.max_rejections() {
                warn!("adaptive solve gave up at t={t} after {rejections} consecutive rejections");
                return Err(if trial.is_finite() {
                    Error::RejectionLimit {
                        t,
                        step: h,
                        rejections,
                    }
                } else {
                    Error::NonFinite { t, step: h }
                });
            }

            let event = Event::Rejected {
                t,
                step: h,
                next_step: 0.5 * h,
                error: trial.error,
            };
            h *= 0.5;
            event
        };

        if let Some(Action::StopEarly) = observer.observe(&event) {
            break Status::StoppedByObserver;
        }
    };

    debug!(
        "adaptive solve finished: status={status:?}, t={t}, accepted={}, rejected={}",
        stats.accepted, stats.rejected
    );

    Ok(Solution {
        status,
        trajectory: Trajectory::new(samples)?,
        stats,
    })
}

/// Integrates `system` with step doubling without observation.
///
/// This is a convenience wrapper around [`solve`] that discards events.
///
/// # Errors
///
/// Returns an error under the same conditions as [`solve`].
pub fn solve_unobserved<S: System>(
    system: &S,
    initial: State,
    end_time: f64,
    rule: Rule,
    config: &Config,
) -> Result<Solution, Error> {
    solve(system, initial, end_time, rule, config, ())
}

/// Integrates with the Euler rule and default limits.
///
/// # Errors
///
/// Returns [`Error::InvalidConfig`] if `acc` is not finite and positive, or
/// any error [`solve`] can return.
pub fn euler<S: System>(
    system: &S,
    initial: State,
    end_time: f64,
    acc: f64,
) -> Result<Solution, Error> {
    let config = Config::new(acc)?;
    solve_unobserved(system, initial, end_time, Rule::Euler, &config)
}

/// Integrates with the RK4 rule and default limits.
///
/// # Errors
///
/// Returns [`Error::InvalidConfig`] if `acc` is not finite and positive, or
/// any error [`solve`] can return.
pub fn rk4<S: System>(
    system: &S,
    initial: State,
    end_time: f64,
    acc: f64,
) -> Result<Solution, Error> {
    let config = Config::new(acc)?;
    solve_unobserved(system, initial, end_time, Rule::Rk4, &config)
}
