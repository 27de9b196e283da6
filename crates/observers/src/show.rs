//! Figure configuration shared by the plotting front ends.
//!
//! Nothing here depends on a GUI toolkit; the `plot` feature renders a
//! [`ShowConfig`] and a set of [`Series`] with egui.

use log::warn;
use stepwise_core::{Component, Trajectory};

/// A named set of `[x, y]` points drawn as one line.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    /// Legend label.
    pub name: String,

    /// Points in drawing order.
    pub points: Vec<[f64; 2]>,
}

impl Series {
    /// Creates a series from raw points.
    pub fn new(name: impl Into<String>, points: Vec<[f64; 2]>) -> Self {
        Self {
            name: name.into(),
            points,
        }
    }

    /// Creates a series of one trajectory component against time.
    pub fn from_trajectory(
        name: impl Into<String>,
        trajectory: &Trajectory,
        component: Component,
    ) -> Self {
        Self::new(name, trajectory.points(component))
    }
}

/// Axis ranges resolved for a figure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x: [f64; 2],
    pub y: [f64; 2],
}

/// Configuration for rendering a figure.
///
/// Construct with [`ShowConfig::new`] and chain builder methods as needed.
///
/// # Example
///
/// ```
/// use stepwise_observers::ShowConfig;
///
/// let config = ShowConfig::new()
///     .title("Damped oscillator")
///     .labels("t, s", "y")
///     .x_range(0.0, 10.0)
///     .legend();
/// assert_eq!(config.x_label(), Some("t, s"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ShowConfig {
    title: Option<String>,
    labels: [Option<String>; 2],
    x_range: Option<[f64; 2]>,
    y_range: Option<[f64; 2]>,
    size: [f32; 2],
    legend: bool,
    log_y: bool,
}

impl ShowConfig {
    /// Default window size in logical points.
    pub const DEFAULT_SIZE: [f32; 2] = [960.0, 640.0];

    /// Creates a config with defaults: no title or labels, axes fitted to the
    /// data, no legend, linear scale.
    #[must_use]
    pub fn new() -> Self {
        Self {
            title: None,
            labels: [None, None],
            x_range: None,
            y_range: None,
            size: Self::DEFAULT_SIZE,
            legend: false,
            log_y: false,
        }
    }

    /// Sets the window title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the x and y axis labels.
    #[must_use]
    pub fn labels(mut self, x: impl Into<String>, y: impl Into<String>) -> Self {
        self.labels = [Some(x.into()), Some(y.into())];
        self
    }

    /// Fixes the x-axis range.
    ///
    /// A range that is not finite or has `min >= max` is ignored with a
    /// warning, leaving the axis fitted to the data.
    #[must_use]
    pub fn x_range(mut self, min: f64, max: f64) -> Self {
        self.x_range = checked_range("x", min, max);
        self
    }

    /// Fixes the y-axis range. Invalid ranges are ignored as for
    /// [`x_range`](Self::x_range).
    #[must_use]
    pub fn y_range(mut self, min: f64, max: f64) -> Self {
        self.y_range = checked_range("y", min, max);
        self
    }

    /// Sets the window size in logical points.
    #[must_use]
    pub fn size(mut self, width: f32, height: f32) -> Self {
        self.size = [width, height];
        self
    }

    /// Enables a legend labeling each series by name.
    #[must_use]
    pub fn legend(mut self) -> Self {
        self.legend = true;
        self
    }

    /// Enables a logarithmic y-axis (base 10).
    ///
    /// y values are transformed with log₁₀ before plotting. Non-positive
    /// values are skipped.
    #[must_use]
    pub fn log_y(mut self) -> Self {
        self.log_y = true;
        self
    }

    /// Returns the window title, empty when unset.
    #[must_use]
    pub fn window_title(&self) -> &str {
        self.title.as_deref().unwrap_or_default()
    }

    /// Returns the x-axis label.
    #[must_use]
    pub fn x_label(&self) -> Option<&str> {
        self.labels[0].as_deref()
    }

    /// Returns the y-axis label.
    #[must_use]
    pub fn y_label(&self) -> Option<&str> {
        self.labels[1].as_deref()
    }

    /// Returns the window size.
    #[must_use]
    pub fn window_size(&self) -> [f32; 2] {
        self.size
    }

    /// Returns `true` if a legend is drawn.
    #[must_use]
    pub fn has_legend(&self) -> bool {
        self.legend
    }

    /// Returns `true` if the y-axis is logarithmic.
    #[must_use]
    pub fn is_log_y(&self) -> bool {
        self.log_y
    }

    /// Applies the y-axis transform to `series`.
    ///
    /// With a log scale each y becomes log₁₀ y and non-positive points are
    /// dropped; otherwise the series is returned unchanged.
    #[must_use]
    pub fn transform(&self, series: Vec<Series>) -> Vec<Series> {
        if !self.log_y {
            return series;
        }
        series
            .into_iter()
            .map(|s| Series {
                name: s.name,
                points: s
                    .points
                    .into_iter()
                    .filter(|p| p[1] > 0.0)
                    .map(|p| [p[0], p[1].log10()])
                    .collect(),
            })
            .collect()
    }

    /// Resolves the axis ranges for `series`, which must already have been
    /// through [`transform`](Self::transform).
    ///
    /// An explicit range wins. Otherwise the axis spans the finite data, and
    /// an axis with no extent (one value, or no data) is widened by 0.5 on
    /// each side. On a log scale the explicit y range is given in data units
    /// and mapped through log₁₀; a range with a non-positive bound falls back
    /// to the data.
    #[must_use]
    pub fn bounds(&self, series: &[Series]) -> Bounds {
        let points = || series.iter().flat_map(|s| s.points.iter());

        let x = self
            .x_range
            .unwrap_or_else(|| extent(points().map(|p| p[0])));
        let y = self
            .scaled_y_range()
            .unwrap_or_else(|| extent(points().map(|p| p[1])));

        Bounds { x, y }
    }

    fn scaled_y_range(&self) -> Option<[f64; 2]> {
        let [min, max] = self.y_range?;
        if !self.log_y {
            return Some([min, max]);
        }
        if min > 0.0 {
            Some([min.log10(), max.log10()])
        } else {
            warn!("ignoring y range [{min}, {max}] on a log scale");
            None
        }
    }
}

impl Default for ShowConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn checked_range(axis: &str, min: f64, max: f64) -> Option<[f64; 2]> {
    if min.is_finite() && max.is_finite() && min < max {
        Some([min, max])
    } else {
        warn!("ignoring invalid {axis} range [{min}, {max}]");
        None
    }
}

fn extent(values: impl Iterator<Item = f64>) -> [f64; 2] {
    let (min, max) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });

    if min > max {
        [-0.5, 0.5]
    } else if min == max {
        [min - 0.5, max + 0.5]
    } else {
        [min, max]
    }
}
