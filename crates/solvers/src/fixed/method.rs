use std::str::FromStr;

use super::Error;

/// Numerical kernels available to the fixed-step integrator.
///
/// Whatever the method, output is reported exactly at the grid times. The
/// adaptive kernels may take several internal steps per grid interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Method {
    /// Classic 4th-order Runge–Kutta, one step per grid interval.
    ///
    /// Accuracy depends entirely on the grid spacing.
    Rk4,

    /// Adaptive Dormand–Prince 5(4) Runge–Kutta method.
    ///
    /// Steps between consecutive grid times while keeping the local error
    /// within `abs_tol` and `rel_tol`.
    Dopri5 { abs_tol: f64, rel_tol: f64 },

    /// Adaptive Dormand–Prince 8(5,3) Runge–Kutta method.
    ///
    /// More work per step than [`Method::Dopri5`], usually fewer steps at
    /// tight tolerances.
    Dop853 { abs_tol: f64, rel_tol: f64 },
}

impl Method {
    /// Absolute tolerance used by the adaptive kernels unless overridden.
    pub const DEFAULT_ABS_TOL: f64 = 1e-10;

    /// Relative tolerance used by the adaptive kernels unless overridden.
    pub const DEFAULT_REL_TOL: f64 = 1e-8;

    /// Returns [`Method::Dopri5`] with the default tolerances.
    #[must_use]
    pub fn dopri5() -> Self {
        Self::Dopri5 {
            abs_tol: Self::DEFAULT_ABS_TOL,
            rel_tol: Self::DEFAULT_REL_TOL,
        }
    }

    /// Returns [`Method::Dop853`] with the default tolerances.
    #[must_use]
    pub fn dop853() -> Self {
        Self::Dop853 {
            abs_tol: Self::DEFAULT_ABS_TOL,
            rel_tol: Self::DEFAULT_REL_TOL,
        }
    }

    /// Returns the lowercase name accepted by [`FromStr`].
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Rk4 => "rk4",
            Self::Dopri5 { .. } => "dopri5",
            Self::Dop853 { .. } => "dop853",
        }
    }
}

impl Default for Method {
    fn default() -> Self {
        Self::dopri5()
    }
}

/// Parses `rk4`, `dopri5`, or `dop853`, ignoring case.
///
/// The adaptive kernels get the default tolerances.
impl FromStr for Method {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.to_ascii_lowercase().as_str() {
            "rk4" => Ok(Self::Rk4),
            "dopri5" => Ok(Self::dopri5()),
            "dop853" => Ok(Self::dop853()),
            _ => Err(Error::UnsupportedMethod(name.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_names_ignoring_case() {
        assert_eq!("rk4".parse::<Method>().ok(), Some(Method::Rk4));
        assert_eq!("DOPRI5".parse::<Method>().ok(), Some(Method::dopri5()));
        assert_eq!("Dop853".parse::<Method>().ok(), Some(Method::dop853()));
    }

    #[test]
    fn rejects_unknown_names() {
        let error = "RK45".parse::<Method>().unwrap_err();
        assert!(matches!(&error, Error::UnsupportedMethod(name) if name == "RK45"));
        assert_eq!(error.to_string(), "unsupported integration method `RK45`");
    }

    #[test]
    fn default_is_dopri5_with_tight_tolerances() {
        assert_eq!(
            Method::default(),
            Method::Dopri5 {
                abs_tol: 1e-10,
                rel_tol: 1e-8
            }
        );
        assert_eq!(Method::default().name(), "dopri5");
    }
}
