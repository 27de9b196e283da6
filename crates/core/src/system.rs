use std::convert::Infallible;

use crate::{ArityError, Derivative, State};

/// A system of two first-order ODEs: `d(state)/dt = f(state, t)`.
///
/// This is the function every solver integrates. Implementations should be
/// pure: solvers evaluate the same `(state, t)` pair more than once while
/// they probe step sizes, and expect identical answers each time.
///
/// For plain closures, use [`from_fn`] (typed) or [`from_slice_fn`]
/// (list-style callables that return a `Vec<f64>`).
pub trait System {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Evaluates the derivative of `state` at time `t`.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the derivative cannot be computed.
    fn derivative(&self, state: &State, t: f64) -> Result<Derivative, Self::Error>;
}

impl<S: System + ?Sized> System for &S {
    type Error = S::Error;

    fn derivative(&self, state: &State, t: f64) -> Result<Derivative, Self::Error> {
        (**self).derivative(state, t)
    }
}

/// A [`System`] backed by an infallible closure. Created by [`from_fn`].
#[derive(Debug, Clone, Copy)]
pub struct FnSystem<F>(F);

/// A [`System`] backed by a closure over slices. Created by [`from_slice_fn`].
#[derive(Debug, Clone, Copy)]
pub struct SliceFnSystem<F>(F);

/// Wraps a closure `(state, t) -> derivative` as a [`System`].
///
/// ```
/// use stepwise_core::{Derivative, State, System, from_fn};
///
/// // y″ = −y
/// let system = from_fn(|s: &State, _t| Derivative::new(s.dy, -s.y));
/// let d = system.derivative(&State::new(1.0, 0.0), 0.0).unwrap();
/// assert_eq!(d, Derivative::new(0.0, -1.0));
/// ```
pub fn from_fn<F>(f: F) -> FnSystem<F>
where
    F: Fn(&State, f64) -> Derivative,
{
    FnSystem(f)
}

/// Wraps a list-style closure `([y, dy], t) -> [dy/dt, d2y/dt]` as a [`System`].
///
/// The closure may return any number of values; anything other than two is
/// reported as an [`ArityError`] at the evaluation that produced it.
pub fn from_slice_fn<F>(f: F) -> SliceFnSystem<F>
where
    F: Fn(&[f64], f64) -> Vec<f64>,
{
    SliceFnSystem(f)
}

impl<F> System for FnSystem<F>
where
    F: Fn(&State, f64) -> Derivative,
{
    type Error = Infallible;

    fn derivative(&self, state: &State, t: f64) -> Result<Derivative, Infallible> {
        Ok((self.0)(state, t))
    }
}

impl<F> System for SliceFnSystem<F>
where
    F: Fn(&[f64], f64) -> Vec<f64>,
{
    type Error = ArityError;

    fn derivative(&self, state: &State, t: f64) -> Result<Derivative, ArityError> {
        let values = (self.0)(&state.to_array(), t);
        Derivative::try_from(values.as_slice())
    }
}
