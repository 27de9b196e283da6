//! An observer that forwards step events to the `log` facade.

use log::Level;
use stepwise_core::Observer;

use crate::traits::{HasErrorEstimate, HasStepSize, HasTime};

/// Logs one line per step attempt at a fixed level.
///
/// Records go to the `stepwise::steps` target so they can be filtered apart
/// from the solvers' own diagnostics. The observer never requests an action.
#[derive(Debug, Clone, Copy)]
pub struct LogObserver {
    level: Level,
}

impl LogObserver {
    /// The log target used for step records.
    pub const TARGET: &'static str = "stepwise::steps";

    /// Creates an observer that logs at `level`.
    #[must_use]
    pub fn new(level: Level) -> Self {
        Self { level }
    }

    /// Returns the level records are logged at.
    #[must_use]
    pub fn level(&self) -> Level {
        self.level
    }
}

impl Default for LogObserver {
    fn default() -> Self {
        Self::new(Level::Debug)
    }
}

impl<E, A> Observer<E, A> for LogObserver
where
    E: HasTime + HasStepSize + HasErrorEstimate,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        if log::log_enabled!(target: Self::TARGET, self.level) {
            let verdict = if event.accepted() { "accepted" } else { "rejected" };
            log::log!(
                target: Self::TARGET,
                self.level,
                "{verdict} t={} h={:e} next={:e} error={:e}",
                event.time(),
                event.step_size(),
                event.next_step_size(),
                event.error_estimate(),
            );
        }
        None
    }
}
