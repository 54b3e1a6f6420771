#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::SplineError;

/// Behaviour of evaluation outside `[x_0, x_n]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ExtrapolationPolicy {
    /// Fail with [SplineError::OutOfDomain].
    #[default]
    Reject,
    /// Evaluate at the nearest boundary knot.
    Clamp,
    /// Continue the polynomial of the boundary interval unchanged.
    Linear,
}

/// Build and evaluation settings of a [Spline](crate::Spline).
///
/// # Example
/// ```
/// use poly_spline::{ExtrapolationPolicy, SplineConfig};
///
/// let config = SplineConfig::default()
///     .with_extrapolation(ExtrapolationPolicy::Clamp)
///     .with_tolerance(1e-6);
///
/// assert_eq!(ExtrapolationPolicy::Clamp, config.extrapolation);
/// assert_eq!(1e-6, config.tolerance);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SplineConfig {
    pub extrapolation: ExtrapolationPolicy,
    /// Relative tolerance of the periodic end value check.
    pub tolerance: f64,
    /// Smallest accepted LU pivot relative to the largest one.
    pub pivot_tolerance: f64,
    /// Largest accepted number of coefficients, `(knots - 1) * (degree + 1)`.
    /// The dense system holds the square of it.
    pub max_unknowns: usize,
}

impl Default for SplineConfig {
    fn default() -> Self {
        SplineConfig {
            extrapolation: ExtrapolationPolicy::Reject,
            tolerance: 1e-9,
            pivot_tolerance: 1e-12,
            max_unknowns: 8192,
        }
    }
}

impl SplineConfig {
    pub fn with_extrapolation(mut self, extrapolation: ExtrapolationPolicy) -> Self {
        self.extrapolation = extrapolation;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_pivot_tolerance(mut self, pivot_tolerance: f64) -> Self {
        self.pivot_tolerance = pivot_tolerance;
        self
    }

    pub fn with_max_unknowns(mut self, max_unknowns: usize) -> Self {
        self.max_unknowns = max_unknowns;
        self
    }

    pub(crate) fn validate(&self) -> Result<(), SplineError> {
        if !(self.tolerance.is_finite() && self.tolerance >= 0.0) {
            return Err(SplineError::invalid(format!(
                "tolerance must be finite and non-negative, got {}",
                self.tolerance
            )));
        }
        if !(self.pivot_tolerance.is_finite() && self.pivot_tolerance >= 0.0) {
            return Err(SplineError::invalid(format!(
                "pivot_tolerance must be finite and non-negative, got {}",
                self.pivot_tolerance
            )));
        }
        Ok(())
    }
}
