use std::fmt;

use thiserror::Error;

use crate::StepIntegrable;

/// The state of a second-order system reduced to first order.
///
/// `y` is the function value and `dy` its first derivative. Both components
/// always travel together: solvers accept or reject a whole `State`, never a
/// single component.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct State {
    pub y: f64,
    pub dy: f64,
}

/// The time derivative of a [`State`].
///
/// For a second-order equation `y″ = g(y, y′, t)` written as a first-order
/// system, `dy` is the rate of change of `y` and `d2y` the rate of change of
/// `y′`. Any first-order system with two unknowns fits the same shape.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Derivative {
    pub dy: f64,
    pub d2y: f64,
}

/// Selects one component of a [`State`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Component {
    /// The function value `y` (index 0).
    Value,

    /// The derivative `y′` (index 1).
    Derivative,
}

/// Returned when a slice does not hold exactly one value per state component.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("expected {expected} components, found {found}")]
pub struct ArityError {
    pub expected: usize,
    pub found: usize,
}

/// Returned when a component index is neither 0 nor 1.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("component index {0} is out of range (expected 0 or 1)")]
pub struct ComponentError(pub usize);

impl State {
    /// Number of components in a state.
    pub const ARITY: usize = 2;

    /// Creates a state from a function value and its derivative.
    #[must_use]
    pub const fn new(y: f64, dy: f64) -> Self {
        Self { y, dy }
    }

    /// Returns the requested component.
    #[must_use]
    pub fn get(&self, component: Component) -> f64 {
        match component {
            Component::Value => self.y,
            Component::Derivative => self.dy,
        }
    }

    /// Returns `true` if both components are finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.y.is_finite() && self.dy.is_finite()
    }

    /// Returns the components as `[y, dy]`.
    #[must_use]
    pub fn to_array(self) -> [f64; 2] {
        [self.y, self.dy]
    }
}

impl Derivative {
    /// Creates a derivative from the rates of `y` and `y′`.
    #[must_use]
    pub const fn new(dy: f64, d2y: f64) -> Self {
        Self { dy, d2y }
    }

    /// Returns `true` if both components are finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.dy.is_finite() && self.d2y.is_finite()
    }
}

impl StepIntegrable<f64> for State {
    type Derivative = Derivative;

    fn step(&self, derivative: Derivative, dt: f64) -> Self {
        Self {
            y: self.y + derivative.dy * dt,
            dy: self.dy + derivative.d2y * dt,
        }
    }
}

impl From<(f64, f64)> for State {
    fn from((y, dy): (f64, f64)) -> Self {
        Self { y, dy }
    }
}

impl From<[f64; 2]> for State {
    fn from([y, dy]: [f64; 2]) -> Self {
        Self { y, dy }
    }
}

impl TryFrom<&[f64]> for State {
    type Error = ArityError;

    fn try_from(values: &[f64]) -> Result<Self, Self::Error> {
        match *values {
            [y, dy] => Ok(Self { y, dy }),
            _ => Err(ArityError {
                expected: Self::ARITY,
                found: values.len(),
            }),
        }
    }
}

impl TryFrom<&[f64]> for Derivative {
    type Error = ArityError;

    fn try_from(values: &[f64]) -> Result<Self, Self::Error> {
        match *values {
            [dy, d2y] => Ok(Self { dy, d2y }),
            _ => Err(ArityError {
                expected: State::ARITY,
                found: values.len(),
            }),
        }
    }
}

impl From<[f64; 2]> for Derivative {
    fn from([dy, d2y]: [f64; 2]) -> Self {
        Self { dy, d2y }
    }
}

impl Component {
    /// Returns the positional index of this component (0 or 1).
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::Value => 0,
            Self::Derivative => 1,
        }
    }
}

impl TryFrom<usize> for Component {
    type Error = ComponentError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        match index {
            0 => Ok(Self::Value),
            1 => Ok(Self::Derivative),
            _ => Err(ComponentError(index)),
        }
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value => f.write_str("y"),
            Self::Derivative => f.write_str("y′"),
        }
    }
}
