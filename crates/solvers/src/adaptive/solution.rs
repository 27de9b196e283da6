use stepwise_core::Trajectory;

/// Indicates how the solver terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Reached or passed the requested end time.
    Complete,

    /// Reached the iteration limit before the end time.
    MaxIters,

    /// Stopped early due to an observer action.
    StoppedByObserver,
}

/// Counters collected over one adaptive run.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Stats {
    /// Step attempts, accepted plus rejected.
    pub iters: usize,

    /// Accepted steps.
    pub accepted: usize,

    /// Rejected steps.
    pub rejected: usize,

    /// Calls to the system function.
    pub evaluations: usize,

    /// Smallest accepted step, if any step was accepted.
    pub min_step: Option<f64>,

    /// Largest accepted step, if any step was accepted.
    pub max_step: Option<f64>,
}

impl Stats {
    pub(super) fn record_accepted(&mut self, step: f64) {
        self.accepted += 1;
        self.min_step = Some(self.min_step.map_or(step, |h| h.min(step)));
        self.max_step = Some(self.max_step.map_or(step, |h| h.max(step)));
    }
}

/// The result of an adaptive integration.
#[derive(Debug, Clone)]
pub struct Solution {
    /// How the solver terminated.
    pub status: Status,

    /// The initial condition followed by every accepted sample.
    pub trajectory: Trajectory,

    /// Step and evaluation counters.
    pub stats: Stats,
}
