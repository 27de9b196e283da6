//! Plotting through egui.
//!
//! See [`show_trajectory`], [`PlotObserver`], and [`Plottable`] for usage.

use eframe::egui;
use egui_plot::{Legend, Line, Plot, PlotBounds, PlotPoints};
use stepwise_core::{Component, Observer, Trajectory};
use stepwise_solvers::adaptive;

use crate::show::{Bounds, Series, ShowConfig};

/// Opens a blocking window plotting one trajectory component against time.
///
/// # Errors
///
/// Returns an error if the native window cannot be created.
pub fn show_trajectory(
    trajectory: &Trajectory,
    component: Component,
    config: ShowConfig,
) -> Result<(), eframe::Error> {
    let series = Series::from_trajectory(component.to_string(), trajectory, component);
    show_series(vec![series], config)
}

/// Opens a blocking window overlaying several series in one figure.
///
/// Blocks until the window is closed by the user.
///
/// # Errors
///
/// Returns an error if the native window cannot be created.
pub fn show_series(series: Vec<Series>, config: ShowConfig) -> Result<(), eframe::Error> {
    let series = config.transform(series);
    let bounds = config.bounds(&series);
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size(config.window_size()),
        ..Default::default()
    };
    let title = config.window_title().to_owned();

    eframe::run_native(
        &title,
        options,
        Box::new(move |_cc| {
            Ok(Box::new(PlotApp {
                series,
                config,
                bounds,
                bounds_applied: false,
            }))
        }),
    )
}

/// Extracts plottable data from a solver event.
///
/// Implement this on an event type to use [`PlotObserver`] directly as a
/// solver observer. Return `None` from [`x`][Plottable::x] to skip the event
/// entirely; return `None` in a trace slot to skip that trace for the event.
///
/// [`adaptive::Event`] implements `Plottable<2>`, plotting the attempted step
/// size against time as an accepted trace and a rejected trace.
pub trait Plottable<const N: usize> {
    /// The x-axis value for this event, or `None` to skip recording entirely.
    fn x(&self) -> Option<f64>;

    /// The y-axis values for each trace.
    ///
    /// `None` in a slot skips that trace for this event while leaving others
    /// unaffected.
    fn traces(&self) -> [Option<f64>; N];
}

impl Plottable<2> for adaptive::Event {
    fn x(&self) -> Option<f64> {
        Some(self.t())
    }

    fn traces(&self) -> [Option<f64>; 2] {
        if self.is_accepted() {
            [Some(self.step()), None]
        } else {
            [None, Some(self.step())]
        }
    }
}

/// An observer that collects trace data during solving and displays it via egui.
///
/// The const generic `N` is the number of traces. Create with
/// [`PlotObserver::new`], passing the trace names, then either pass
/// `&mut PlotObserver` as the observer of a solver whose events implement
/// [`Plottable<N>`][Plottable], or call [`record`][PlotObserver::record] from
/// a closure.
///
/// # Example
///
/// ```ignore
/// let mut obs = PlotObserver::<2>::new(["Accepted", "Rejected"]);
/// adaptive::solve(&system, initial, 10.0, Rule::Rk4, &config, &mut obs)?;
/// obs.show(ShowConfig::new().title("Step sizes").legend().log_y())?;
/// ```
pub struct PlotObserver<const N: usize> {
    names: [String; N],
    data: [Vec<[f64; 2]>; N],
}

impl<const N: usize> PlotObserver<N> {
    /// Creates a new `PlotObserver` with the given trace names.
    pub fn new(names: [&str; N]) -> Self {
        Self {
            names: names.map(str::to_owned),
            data: std::array::from_fn(|_| Vec::new()),
        }
    }

    /// Records a single data point across all traces.
    ///
    /// For each trace slot, `None` skips recording for that trace while
    /// leaving other traces unaffected.
    pub fn record(&mut self, x: f64, traces: [Option<f64>; N]) {
        for (i, y) in traces.into_iter().enumerate() {
            if let Some(y) = y {
                self.data[i].push([x, y]);
            }
        }
    }

    /// Converts the collected traces into named series.
    #[must_use]
    pub fn into_series(self) -> Vec<Series> {
        self.names
            .into_iter()
            .zip(self.data)
            .map(|(name, points)| Series::new(name, points))
            .collect()
    }

    /// Opens a blocking egui window displaying all collected traces.
    ///
    /// # Errors
    ///
    /// Returns an error if the native window cannot be created.
    pub fn show(self, config: ShowConfig) -> Result<(), eframe::Error> {
        show_series(self.into_series(), config)
    }
}

impl<const N: usize, E, A> Observer<E, A> for PlotObserver<N>
where
    E: Plottable<N>,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        if let Some(x) = event.x() {
            self.record(x, event.traces());
        }
        None
    }
}

/// Allows `&mut PlotObserver<N>` to be passed to solvers that take an observer
/// by value, so [`PlotObserver::show`] can be called after the solve completes.
impl<const N: usize, E, A> Observer<E, A> for &mut PlotObserver<N>
where
    E: Plottable<N>,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        (*self).observe(event)
    }
}

/// The egui [`eframe::App`] that renders a figure.
struct PlotApp {
    series: Vec<Series>,
    config: ShowConfig,
    bounds: Bounds,
    bounds_applied: bool,
}

impl eframe::App for PlotApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Axis ranges are set once so the user can still pan and zoom.
        let apply_bounds = !self.bounds_applied;
        self.bounds_applied = true;
        let bounds = self.bounds;

        egui::CentralPanel::default().show(ctx, |ui| {
            // egui_plot draws major and minor grid lines at adaptive spacing.
            let mut plot = Plot::new("stepwise_plot").show_grid(true);
            if self.config.has_legend() {
                plot = plot.legend(Legend::default());
            }
            if let Some(label) = self.config.x_label() {
                plot = plot.x_axis_label(label.to_owned());
            }
            let y_label = match (self.config.y_label(), self.config.is_log_y()) {
                (Some(label), true) => Some(format!("log₁₀ {label}")),
                (Some(label), false) => Some(label.to_owned()),
                (None, true) => Some("log₁₀".to_owned()),
                (None, false) => None,
            };
            if let Some(label) = y_label {
                plot = plot.y_axis_label(label);
            }

            plot.show(ui, |plot_ui| {
                if apply_bounds {
                    plot_ui.set_plot_bounds(PlotBounds::from_min_max(
                        [bounds.x[0], bounds.y[0]],
                        [bounds.x[1], bounds.y[1]],
                    ));
                }
                for series in &self.series {
                    let points: PlotPoints = series.points.iter().copied().collect();
                    plot_ui.line(Line::new(points).name(&series.name).width(2.0));
                }
            });
        });
    }
}

#[cfg(test)]
mod tests {
    use stepwise_core::{Observer, State};

    use super::*;

    #[derive(Clone, Copy)]
    struct Event {
        x: Option<f64>,
        a: Option<f64>,
        b: Option<f64>,
    }

    impl Plottable<2> for Event {
        fn x(&self) -> Option<f64> {
            self.x
        }

        fn traces(&self) -> [Option<f64>; 2] {
            [self.a, self.b]
        }
    }

    fn points(obs: &PlotObserver<2>, trace: usize) -> &[[f64; 2]] {
        &obs.data[trace]
    }

    // Helper to call observe without needing to specify the action type at each call site.
    fn feed<E: Plottable<2>>(obs: &mut PlotObserver<2>, event: E) {
        let _: Option<()> = obs.observe(&event);
    }

    #[test]
    fn skips_only_affected_trace_when_y_is_none() {
        let mut obs = PlotObserver::new(["a", "b"]);
        feed(
            &mut obs,
            Event {
                x: Some(1.0),
                a: None,
                b: Some(3.0),
            },
        );
        feed(
            &mut obs,
            Event {
                x: None,
                a: Some(1.0),
                b: Some(2.0),
            },
        );
        assert!(points(&obs, 0).is_empty());
        assert_eq!(points(&obs, 1), [[1.0, 3.0]]);
    }

    #[test]
    fn adaptive_events_split_into_accepted_and_rejected_traces() {
        let mut obs = PlotObserver::new(["Accepted", "Rejected"]);
        feed(
            &mut obs,
            adaptive::Event::Rejected {
                t: 0.0,
                step: 0.2,
                next_step: 0.1,
                error: 1.0,
            },
        );
        feed(
            &mut obs,
            adaptive::Event::Accepted {
                t: 0.1,
                state: State::new(1.0, 0.0),
                step: 0.1,
                next_step: 0.2,
                error: 1e-6,
            },
        );

        assert_eq!(points(&obs, 0), [[0.1, 0.1]]);
        assert_eq!(points(&obs, 1), [[0.0, 0.2]]);
    }

    #[test]
    fn into_series_keeps_names_and_points() {
        let mut obs: PlotObserver<2> = PlotObserver::new(["a", "b"]);
        obs.record(1.0, [Some(10.0), None]);
        obs.record(2.0, [None, Some(20.0)]);

        let series = obs.into_series();
        assert_eq!(series[0], Series::new("a", vec![[1.0, 10.0]]));
        assert_eq!(series[1], Series::new("b", vec![[2.0, 20.0]]));
    }
}
