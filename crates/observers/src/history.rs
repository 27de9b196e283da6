use stepwise_core::Observer;

use crate::traits::{CanStopEarly, HasErrorEstimate, HasStepSize, HasTime};

/// One recorded step attempt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepRecord {
    /// Event time: the new time after an acceptance, the unchanged time after
    /// a rejection.
    pub t: f64,

    /// Attempted step size.
    pub step: f64,

    /// Local error estimate.
    pub error: f64,

    /// Whether the step passed the error test.
    pub accepted: bool,
}

/// Records every step attempt a solver reports.
///
/// Optionally stops the solver once a number of steps have been accepted,
/// which is handy for inspecting the start-up behaviour of long runs.
#[derive(Debug, Clone, Default)]
pub struct StepHistory {
    records: Vec<StepRecord>,
    accept_limit: Option<usize>,
}

impl StepHistory {
    /// Creates an empty history with no accept limit.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests an early stop once `limit` steps have been accepted.
    #[must_use]
    pub fn with_accept_limit(mut self, limit: usize) -> Self {
        self.accept_limit = Some(limit);
        self
    }

    /// Returns all records in the order they were observed.
    #[must_use]
    pub fn records(&self) -> &[StepRecord] {
        &self.records
    }

    /// Returns the number of accepted steps.
    #[must_use]
    pub fn accepted(&self) -> usize {
        self.records.iter().filter(|r| r.accepted).count()
    }

    /// Returns the number of rejected steps.
    #[must_use]
    pub fn rejected(&self) -> usize {
        self.records.len() - self.accepted()
    }

    /// Returns `[t, step]` for accepted steps, ready for plotting.
    #[must_use]
    pub fn accepted_steps(&self) -> Vec<[f64; 2]> {
        self.step_points(true)
    }

    /// Returns `[t, step]` for rejected steps.
    #[must_use]
    pub fn rejected_steps(&self) -> Vec<[f64; 2]> {
        self.step_points(false)
    }

    fn step_points(&self, accepted: bool) -> Vec<[f64; 2]> {
        self.records
            .iter()
            .filter(|r| r.accepted == accepted)
            .map(|r| [r.t, r.step])
            .collect()
    }
}

impl<E, A> Observer<E, A> for StepHistory
where
    E: HasTime + HasStepSize + HasErrorEstimate,
    A: CanStopEarly,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        self.records.push(StepRecord {
            t: event.time(),
            step: event.step_size(),
            error: event.error_estimate(),
            accepted: event.accepted(),
        });

        match self.accept_limit {
            Some(limit) if self.accepted() >= limit => Some(A::stop_early()),
            _ => None,
        }
    }
}

/// Allows `&mut StepHistory` to be passed to solvers that take an observer by
/// value, so the history can be read after the solve completes.
impl<E, A> Observer<E, A> for &mut StepHistory
where
    E: HasTime + HasStepSize + HasErrorEstimate,
    A: CanStopEarly,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        (**self).observe(event)
    }
}

#[cfg(test)]
mod tests {
    use stepwise_core::{Derivative, State, from_fn};
    use stepwise_solvers::adaptive::{self, Config, Rule, Status};

    use super::*;

    fn oscillator_run(history: &mut StepHistory) -> adaptive::Solution {
        let system = from_fn(|s: &State, _t| Derivative::new(s.dy, -3.0 * s.y - 0.1 * s.dy));
        adaptive::solve(
            &system,
            State::new(0.1, 0.0),
            2.0,
            Rule::Euler,
            &Config::new(1e-5).expect("valid acc"),
            history,
        )
        .expect("should solve")
    }

    #[test]
    fn records_match_solver_stats() {
        let mut history = StepHistory::new();
        let solution = oscillator_run(&mut history);

        assert_eq!(history.records().len(), solution.stats.iters);
        assert_eq!(history.accepted(), solution.stats.accepted);
        assert_eq!(history.rejected(), solution.stats.rejected);

        let accepted_times: Vec<f64> = history.accepted_steps().iter().map(|p| p[0]).collect();
        assert_eq!(accepted_times, &solution.trajectory.times()[1..]);
    }

    #[test]
    fn rejected_steps_are_followed_by_smaller_attempts() {
        let mut history = StepHistory::new();
        oscillator_run(&mut history);

        assert!(!history.rejected_steps().is_empty());
        for pair in history.records().windows(2) {
            if !pair[0].accepted {
                assert!(pair[1].step < pair[0].step);
            }
        }
    }

    #[test]
    fn accept_limit_stops_the_solver() {
        let mut history = StepHistory::new().with_accept_limit(3);
        let solution = oscillator_run(&mut history);

        assert_eq!(solution.status, Status::StoppedByObserver);
        assert_eq!(history.accepted(), 3);
        assert_eq!(solution.trajectory.len(), 4);
    }
}
