use stepwise_core::{State, StepIntegrable, System};

use crate::rk4;

/// The per-step update rule plugged into the step-doubling loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    /// Forward Euler: `state + h · f(state, t)`. One evaluation per update.
    Euler,

    /// Classical Runge–Kutta 4 (see [`rk4`]). Four evaluations per update.
    Rk4,
}

/// How the solver forms the half-step result it compares against the full step.
///
/// Both estimators measure `|half.y − full.y|`, the discrepancy in the
/// function value only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Estimator {
    /// A single update of size `h/2` from the current point.
    ///
    /// This does not estimate truncation error in the Richardson sense: the
    /// difference is dominated by `h/2 · |y′|`, so it mainly bounds how far
    /// `y` moves per step.
    #[default]
    HalfStep,

    /// Two chained updates of size `h/2`, the textbook step-doubling test.
    TwoHalfSteps,
}

impl Rule {
    /// Advances `state` by one update of size `h`.
    ///
    /// # Errors
    ///
    /// Returns the system's error if an evaluation fails.
    pub fn advance<S: System>(
        self,
        system: &S,
        state: &State,
        t: f64,
        h: f64,
    ) -> Result<State, S::Error> {
        match self {
            Self::Euler => Ok(state.step(system.derivative(state, t)?, h)),
            Self::Rk4 => rk4::step(system, h, state, t),
        }
    }

    /// Returns the number of system evaluations per update.
    #[must_use]
    pub fn evaluations(self) -> usize {
        match self {
            Self::Euler => 1,
            Self::Rk4 => 4,
        }
    }

    /// Returns the order of accuracy of the update.
    ///
    /// With [`Estimator::TwoHalfSteps`] the measured discrepancy shrinks by
    /// about `2^(order + 1)` each time `h` is halved.
    #[must_use]
    pub fn order(self) -> u32 {
        match self {
            Self::Euler => 1,
            Self::Rk4 => 4,
        }
    }
}

/// One full-versus-half comparison at a fixed `(t, state, h)`.
#[derive(Debug, Clone, Copy)]
pub(super) struct Trial {
    pub(super) full: State,
    pub(super) error: f64,
    pub(super) evaluations: usize,
}

impl Trial {
    pub(super) fn run<S: System>(
        system: &S,
        rule: Rule,
        estimator: Estimator,
        state: &State,
        t: f64,
        h: f64,
    ) -> Result<Self, S::Error> {
        let half_h = 0.5 * h;
        let full = rule.advance(system, state, t, h)?;

        let (half, updates) = match estimator {
            Estimator::HalfStep => (rule.advance(system, state, t, half_h)?, 2),
            Estimator::TwoHalfSteps => {
                let mid = rule.advance(system, state, t, half_h)?;
                (rule.advance(system, &mid, t + half_h, half_h)?, 3)
            }
        };

        let error = if full.is_finite() && half.is_finite() {
            (half.y - full.y).abs()
        } else {
            f64::NAN
        };

        Ok(Self {
            full,
            error,
            evaluations: updates * rule.evaluations(),
        })
    }

    /// A trial passes when its error is finite and strictly below `acc`.
    pub(super) fn passes(&self, acc: f64) -> bool {
        self.error < acc
    }

    pub(super) fn is_finite(&self) -> bool {
        self.error.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use stepwise_core::{Derivative, from_fn};

    use super::*;

    fn oscillator() -> impl System<Error = std::convert::Infallible> {
        from_fn(|s: &State, _t| Derivative::new(s.dy, -s.y))
    }

    #[test]
    fn euler_advance_is_a_single_slope_step() {
        let next = Rule::Euler
            .advance(&oscillator(), &State::new(1.0, 0.5), 0.0, 0.1)
            .expect("infallible");
        assert_relative_eq!(next.y, 1.05);
        assert_relative_eq!(next.dy, 0.4);
    }

    #[test]
    fn rk4_advance_delegates_to_stage_evaluator() {
        let system = oscillator();
        let state = State::new(1.0, 0.0);
        let via_rule = Rule::Rk4
            .advance(&system, &state, 0.0, 0.2)
            .expect("infallible");
        let direct = rk4::step(&system, 0.2, &state, 0.0).expect("infallible");
        assert_eq!(via_rule, direct);
    }

    #[test]
    fn half_step_error_is_half_the_euler_displacement() {
        // full: y + h·y′, half: y + h/2·y′  →  error = h/2·|y′|
        let trial = Trial::run(
            &oscillator(),
            Rule::Euler,
            Estimator::HalfStep,
            &State::new(1.0, 0.5),
            0.0,
            0.1,
        )
        .expect("infallible");

        assert_relative_eq!(trial.error, 0.025, epsilon = 1e-15);
        assert_eq!(trial.evaluations, 2);
        assert!(trial.passes(0.03));
        assert!(!trial.passes(0.02));
    }

    #[test]
    fn two_half_steps_measure_curvature() {
        // From (1, 0) the Euler slope of y is zero, so chained halves differ
        // from the full step only through the change in y′: h²/4 · |y|.
        let trial = Trial::run(
            &oscillator(),
            Rule::Euler,
            Estimator::TwoHalfSteps,
            &State::new(1.0, 0.0),
            0.0,
            0.2,
        )
        .expect("infallible");

        assert_relative_eq!(trial.error, 0.01, epsilon = 1e-15);
        assert_eq!(trial.evaluations, 3);
    }

    #[test]
    fn non_finite_results_never_pass() {
        let system = from_fn(|_: &State, _t| Derivative::new(f64::NAN, 0.0));
        let trial = Trial::run(
            &system,
            Rule::Rk4,
            Estimator::HalfStep,
            &State::new(1.0, 0.0),
            0.0,
            0.1,
        )
        .expect("infallible");

        assert!(!trial.is_finite());
        assert!(!trial.passes(f64::MAX));
        assert_eq!(trial.evaluations, 8);
    }

    #[test]
    fn two_half_step_error_shrinks_with_the_rule_order() {
        // y′ = y has nonzero error terms at every order.
        let growth = from_fn(|s: &State, _t| Derivative::new(s.y, 0.0));
        let state = State::new(1.0, 0.0);

        for (rule, h) in [(Rule::Euler, 1e-3), (Rule::Rk4, 2e-2)] {
            let error = |h| {
                Trial::run(&growth, rule, Estimator::TwoHalfSteps, &state, 0.0, h)
                    .expect("infallible")
                    .error
            };

            let ratio = error(h) / error(0.5 * h);
            let expected = f64::from(2_u32.pow(rule.order() + 1));
            assert_relative_eq!(ratio, expected, max_relative = 0.02);
        }
    }
}
