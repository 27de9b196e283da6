//! Observers and plotting for stepwise solvers.
//!
//! This crate provides [`Observer`] implementations and capability traits that
//! work across the solvers in `stepwise-solvers`, plus figure configuration
//! for plotting trajectories ([`ShowConfig`], [`Series`]).
//!
//! # Modules
//!
//! - [`traits`] — Capability traits for cross-solver observers
//!   ([`HasTime`], [`HasStepSize`], [`HasErrorEstimate`], [`CanStopEarly`])
//!
//! # Observers
//!
//! - [`LogObserver`] — forwards every step attempt to the `log` facade
//! - [`StepHistory`] — records step sizes and verdicts, optionally stopping
//!   after a number of accepted steps
//!
//! # Features
//!
//! - `plot` — Enables `show_trajectory`, `show_series`, and `PlotObserver`
//!   for drawing results via egui. This feature adds dependencies on `eframe`
//!   and `egui_plot`.
//!
//! [`Observer`]: stepwise_core::Observer
//! [`HasTime`]: traits::HasTime
//! [`HasStepSize`]: traits::HasStepSize
//! [`HasErrorEstimate`]: traits::HasErrorEstimate
//! [`CanStopEarly`]: traits::CanStopEarly

pub mod traits;

mod history;
mod logging;
mod show;

#[cfg(feature = "plot")]
mod plot;

pub use history::{StepHistory, StepRecord};
pub use logging::LogObserver;
pub use show::{Bounds, Series, ShowConfig};

#[cfg(feature = "plot")]
pub use plot::{PlotObserver, Plottable, show_series, show_trajectory};
