use std::error::Error as StdError;

use stepwise_core::TrajectoryError;
use thiserror::Error;

use super::ConfigError;

/// Errors that can occur during adaptive integration.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid config: {0}")]
    InvalidConfig(#[from] ConfigError),

    #[error("end time must be finite and positive, got {0}")]
    InvalidEndTime(f64),

    #[error("initial state must be finite")]
    NonFiniteInitialState,

    #[error("system error: {0}")]
    System(#[source] Box<dyn StdError + Send + Sync>),

    #[error("system produced a non-finite state at t={t} (last step {step:e})")]
    NonFinite { t: f64, step: f64 },

    #[error("step rejected {rejections} times in a row at t={t} (last step {step:e})")]
    RejectionLimit { t: f64, step: f64, rejections: usize },

    #[error("step {step:e} is too small to advance from t={t}")]
    StepUnderflow { t: f64, step: f64 },

    #[error(transparent)]
    Trajectory(#[from] TrajectoryError),
}

impl Error {
    pub(crate) fn system<E: StdError + Send + Sync + 'static>(err: E) -> Self {
        Self::System(Box::new(err))
    }
}
