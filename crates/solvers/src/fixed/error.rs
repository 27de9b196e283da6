use std::error::Error as StdError;

use ode_solvers::dop_shared::IntegrationError;
use stepwise_core::TrajectoryError;
use thiserror::Error;

use super::GridError;

/// Errors that can occur during a fixed-step integration.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid grid: {0}")]
    InvalidGrid(#[from] GridError),

    #[error("unsupported integration method `{0}`")]
    UnsupportedMethod(String),

    #[error("initial state must be finite")]
    NonFiniteInitialState,

    #[error("system error: {0}")]
    System(#[source] Box<dyn StdError + Send + Sync>),

    #[error(transparent)]
    Integration(#[from] IntegrationError),

    #[error(transparent)]
    Trajectory(#[from] TrajectoryError),
}

impl Error {
    pub(crate) fn system<E: StdError + Send + Sync + 'static>(err: E) -> Self {
        Self::System(Box::new(err))
    }
}
