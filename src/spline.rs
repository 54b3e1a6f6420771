use tracing::trace;

use crate::{
    boundary::BoundaryCondition,
    config::{ExtrapolationPolicy, SplineConfig},
    equations,
    error::SplineError,
    hermite,
    knot::{self, Knot},
    polynomial::Polynomial,
};

/// Piecewise polynomial of a fixed degree interpolating the knots.
///
/// Built once by [Spline::new] or [Spline::with_config] and read-only afterwards, so a
/// spline can be evaluated concurrently from many threads.
#[derive(Debug, Clone)]
pub struct Spline {
    knots: Vec<Knot>,
    polynomials: Vec<Polynomial>,
    degree: usize,
    boundary: Option<BoundaryCondition>,
    config: SplineConfig,
    min_x: f64,
    max_x: f64,
    is_knot_spacing_uniform: bool,
}

impl Spline {
    /// Builds a spline of given `degree` through `knots` with default [SplineConfig].
    ///
    /// # Example
    /// ```
    /// use poly_spline::{BoundaryCondition, Knot, Spline};
    /// use assert_approx_eq::assert_approx_eq;
    ///
    /// let knots = vec![Knot::new(0.0, 0.0), Knot::new(1.0, 1.0), Knot::new(2.0, 0.0)];
    /// let spline = Spline::new(knots, 3, BoundaryCondition::Natural).unwrap();
    ///
    /// assert_approx_eq!(0.6875, spline.evaluate(0.5).unwrap(), 1e-12);
    /// assert_approx_eq!(0.0, spline.evaluate_derivative(2.0, 2).unwrap(), 1e-12);
    /// ```
    /// # Errors
    /// [SplineError::InvalidInput] for fewer than 2 knots, x values that are not strictly
    /// increasing, a boundary condition that does not fit the degree and knot count or a
    /// system larger than [SplineConfig::max_unknowns].
    /// ```
    /// use poly_spline::{BoundaryCondition, Knot, Spline, SplineError};
    ///
    /// let knots = vec![Knot::new(0.0, 0.0), Knot::new(1.0, 1.0), Knot::new(0.5, 0.0)];
    /// let spline = Spline::new(knots, 3, BoundaryCondition::Natural);
    ///
    /// assert!(matches!(spline, Err(SplineError::InvalidInput(_))));
    /// ```
    pub fn new(knots: Vec<Knot>, degree: usize, boundary: BoundaryCondition) -> Result<Self, SplineError> {
        Spline::with_config(knots, degree, boundary, SplineConfig::default())
    }

    pub fn with_config(
        knots: Vec<Knot>,
        degree: usize,
        boundary: BoundaryCondition,
        config: SplineConfig,
    ) -> Result<Self, SplineError> {
        config.validate()?;
        validate_knots(&knots, degree)?;
        validate_system_size(&knots, degree, &config)?;
        validate_boundary(&knots, degree, &boundary, &config)?;

        let polynomials = equations::calculate_polynomials(&knots, degree, &boundary, config.pivot_tolerance)?;
        Ok(Spline::from_parts(knots, polynomials, degree, Some(boundary), config))
    }

    /// Cubic Hermite spline through `knots` with the given first derivative at every knot.
    /// The result is continuous in value and slope only.
    ///
    /// # Example
    /// ```
    /// use poly_spline::{Knot, Spline};
    /// use assert_approx_eq::assert_approx_eq;
    ///
    /// let knots = vec![Knot::new(0.0, 0.0), Knot::new(1.0, 1.0), Knot::new(2.0, 8.0)];
    /// let spline = Spline::hermite(knots, &[0.0, 3.0, 12.0]).unwrap();
    ///
    /// assert_approx_eq!(3.375, spline.evaluate(1.5).unwrap(), 1e-12);
    /// assert!(spline.boundary().is_none());
    /// ```
    /// # Errors
    /// [SplineError::InvalidInput] for invalid knots or when `slopes` is not one finite
    /// value per knot.
    pub fn hermite(knots: Vec<Knot>, slopes: &[f64]) -> Result<Self, SplineError> {
        validate_knots(&knots, 3)?;
        if slopes.len() != knots.len() {
            return Err(SplineError::invalid(format!(
                "expected one slope per knot: got {} slopes for {} knots",
                slopes.len(),
                knots.len()
            )));
        }
        if let Some(index) = slopes.iter().position(|d| !d.is_finite()) {
            return Err(SplineError::invalid(format!("slope {} is not finite", index)));
        }

        let polynomials = hermite::hermite_polynomials(&knots, slopes);
        Ok(Spline::from_parts(knots, polynomials, 3, None, SplineConfig::default()))
    }

    /// Monotone cubic Hermite spline (PCHIP): no overshoot between knots, and monotone
    /// on every stretch where the knots are.
    pub fn pchip(knots: Vec<Knot>) -> Result<Self, SplineError> {
        validate_knots(&knots, 3)?;
        let slopes = hermite::pchip_slopes(&knots);
        trace!(knots = knots.len(), "pchip slopes computed");
        Spline::hermite(knots, &slopes)
    }

    fn from_parts(
        knots: Vec<Knot>,
        polynomials: Vec<Polynomial>,
        degree: usize,
        boundary: Option<BoundaryCondition>,
        config: SplineConfig,
    ) -> Self {
        let min_x = knots[0].x;
        let max_x = knots[knots.len() - 1].x;
        let is_knot_spacing_uniform = is_spacing_uniform(&knots);

        Spline {
            knots,
            polynomials,
            degree,
            boundary,
            config,
            min_x,
            max_x,
            is_knot_spacing_uniform,
        }
    }

    /// Builds a spline from separate x and y slices of equal length.
    pub fn from_xy(xs: &[f64], ys: &[f64], degree: usize, boundary: BoundaryCondition) -> Result<Self, SplineError> {
        let knots = knot::zip_knots(xs, ys).ok_or_else(|| {
            SplineError::invalid(format!(
                "xs and ys must have same length: got {} and {}",
                xs.len(),
                ys.len()
            ))
        })?;
        Spline::new(knots, degree, boundary)
    }

    /// Returns the same spline evaluated under another extrapolation policy.
    pub fn with_extrapolation(mut self, extrapolation: ExtrapolationPolicy) -> Self {
        self.config.extrapolation = extrapolation;
        self
    }

    pub fn evaluate(&self, x: f64) -> Result<f64, SplineError> {
        let (index, t) = self.locate(x, None)?;
        Ok(self.polynomials[index].evaluate(t))
    }

    /// Value of the `order`-th derivative at `x`. Orders above the degree give zero.
    ///
    /// # Errors
    /// [SplineError::InvalidInput] for `order == 0` and the domain errors of [Spline::evaluate].
    pub fn evaluate_derivative(&self, x: f64, order: usize) -> Result<f64, SplineError> {
        check_order(order)?;
        let (index, t) = self.locate(x, None)?;
        Ok(self.polynomials[index].derivative(t, order))
    }

    /// Evaluates all points, failing on the first one outside the accepted domain.
    pub fn evaluate_batch(&self, x_vector: &[f64]) -> Result<Vec<f64>, SplineError> {
        self.batch(x_vector, |polynomial, t| polynomial.evaluate(t))
    }

    pub fn evaluate_derivative_batch(&self, x_vector: &[f64], order: usize) -> Result<Vec<f64>, SplineError> {
        check_order(order)?;
        self.batch(x_vector, |polynomial, t| polynomial.derivative(t, order))
    }

    pub fn knots(&self) -> &[Knot] {
        &self.knots
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    /// `None` for Hermite splines, whose slopes come from the caller or from PCHIP.
    pub fn boundary(&self) -> Option<BoundaryCondition> {
        self.boundary
    }

    pub fn config(&self) -> &SplineConfig {
        &self.config
    }

    /// First and last knot x.
    pub fn domain(&self) -> (f64, f64) {
        (self.min_x, self.max_x)
    }

    pub fn number_of_intervals(&self) -> usize {
        self.polynomials.len()
    }

    /// Coefficients `a_0..a_n` of interval `interval` in the local variable `x - x_i`.
    pub fn coefficients(&self, interval: usize) -> Option<&[f64]> {
        self.polynomials.get(interval).map(|p| p.coefficients())
    }

    fn batch<F>(&self, x_vector: &[f64], evaluate: F) -> Result<Vec<f64>, SplineError>
    where
        F: Fn(&Polynomial, f64) -> f64,
    {
        let mut results = Vec::with_capacity(x_vector.len());
        let mut index = 0;

        for x in x_vector {
            let (found, t) = self.locate(*x, Some(index))?;
            index = found;
            results.push(evaluate(&self.polynomials[index], t));
        }
        Ok(results)
    }

    /// Interval index and local coordinate for `x` under the configured extrapolation policy.
    fn locate(&self, x: f64, index_hint: Option<usize>) -> Result<(usize, f64), SplineError> {
        if x.is_nan() {
            return Err(SplineError::invalid("query point is NaN"));
        }

        let last = self.polynomials.len() - 1;
        if !self.is_in_range(x) {
            let below = x < self.min_x;
            return match self.config.extrapolation {
                ExtrapolationPolicy::Reject => Err(SplineError::OutOfDomain {
                    x,
                    min: self.min_x,
                    max: self.max_x,
                }),
                ExtrapolationPolicy::Clamp if below => Ok((0, 0.0)),
                ExtrapolationPolicy::Clamp => Ok((last, self.max_x - self.knots[last].x)),
                ExtrapolationPolicy::Linear if below => Ok((0, x - self.min_x)),
                ExtrapolationPolicy::Linear => Ok((last, x - self.knots[last].x)),
            };
        }

        let index = match index_hint {
            Some(hint) => self.find_interval_index_with_hint(hint, x),
            None => self.find_interval_index(x),
        };
        Ok((index, x - self.knots[index].x))
    }

    fn is_in_range(&self, x: f64) -> bool {
        self.min_x <= x && x <= self.max_x
    }

    fn find_interval_index(&self, x: f64) -> usize {
        if self.is_knot_spacing_uniform {
            self.find_interval_index_uniform(x)
        } else {
            self.find_interval_index_bisect(x)
        }
    }

    fn find_interval_index_bisect(&self, x: f64) -> usize {
        let size = self.knots.len();
        let mut min = 0;
        let mut max = size - 1;

        while max - min > 1 {
            let mid = (min + max) / 2;
            if x < self.knots[mid].x {
                max = mid;
            } else {
                min = mid;
            }
        }
        min
    }

    /// Direct index for uniform spacing. Rounding may land one interval off, in which
    /// case bisection decides.
    fn find_interval_index_uniform(&self, x: f64) -> usize {
        let number_of_intervals = self.polynomials.len();
        let relative_x = (x - self.min_x) / (self.max_x - self.min_x);
        let index = ((relative_x * number_of_intervals as f64).floor() as usize).min(number_of_intervals - 1);

        if self.is_in_interval_range(index, x) {
            index
        } else {
            self.find_interval_index_bisect(x)
        }
    }

    fn find_interval_index_with_hint(&self, index_hint: usize, x: f64) -> usize {
        if index_hint < self.polynomials.len() && self.is_in_interval_range(index_hint, x) {
            return index_hint;
        }
        if index_hint + 1 < self.polynomials.len() && self.is_in_interval_range(index_hint + 1, x) {
            return index_hint + 1;
        }
        self.find_interval_index(x)
    }

    fn is_in_interval_range(&self, interval_index: usize, x: f64) -> bool {
        let upper = self.knots[interval_index + 1].x;
        let is_last = interval_index + 1 == self.knots.len() - 1;
        self.knots[interval_index].x <= x && (x < upper || (is_last && x <= upper))
    }
}

fn check_order(order: usize) -> Result<(), SplineError> {
    if order == 0 {
        return Err(SplineError::invalid("derivative order must be at least 1"));
    }
    Ok(())
}

fn validate_knots(knots: &[Knot], degree: usize) -> Result<(), SplineError> {
    if degree < 1 {
        return Err(SplineError::invalid("degree must be at least 1"));
    }
    if knots.len() < 2 {
        return Err(SplineError::invalid(format!(
            "spline must have at least 2 knots, got {}",
            knots.len()
        )));
    }
    if let Some(index) = knots.iter().position(|k| !k.is_finite()) {
        return Err(SplineError::invalid(format!("knot {} is not finite", index)));
    }
    if let Some(index) = knots.windows(2).position(|w| w[1].x <= w[0].x) {
        return Err(SplineError::invalid(format!(
            "knot x values must be strictly increasing, violated at knot {}",
            index + 1
        )));
    }
    Ok(())
}

fn validate_system_size(knots: &[Knot], degree: usize, config: &SplineConfig) -> Result<(), SplineError> {
    match equations::system_size(knots.len(), degree) {
        Some(size) if size <= config.max_unknowns => Ok(()),
        _ => Err(SplineError::invalid(format!(
            "degree {} with {} knots exceeds the limit of {} unknowns",
            degree,
            knots.len(),
            config.max_unknowns
        ))),
    }
}

fn validate_boundary(
    knots: &[Knot],
    degree: usize,
    boundary: &BoundaryCondition,
    config: &SplineConfig,
) -> Result<(), SplineError> {
    match *boundary {
        BoundaryCondition::Natural => Ok(()),
        BoundaryCondition::Clamped { left, right } => {
            if degree < 3 {
                return Err(SplineError::invalid(format!(
                    "Clamped boundary requires degree of at least 3, got {}",
                    degree
                )));
            }
            if !(left.is_finite() && right.is_finite()) {
                return Err(SplineError::invalid("Clamped boundary derivatives must be finite"));
            }
            Ok(())
        }
        BoundaryCondition::NotAKnot => {
            if degree < 3 {
                return Err(SplineError::invalid(format!(
                    "NotAKnot boundary requires degree of at least 3, got {}",
                    degree
                )));
            }
            let required = degree.saturating_add(1).max(4);
            if knots.len() < required {
                return Err(SplineError::invalid(format!(
                    "NotAKnot boundary of degree {} requires at least {} knots, got {}",
                    degree,
                    required,
                    knots.len()
                )));
            }
            Ok(())
        }
        BoundaryCondition::Periodic => {
            let y0 = knots[0].y;
            let yn = knots[knots.len() - 1].y;
            let scale = 1.0_f64.max(y0.abs()).max(yn.abs());
            if (y0 - yn).abs() > config.tolerance * scale {
                return Err(SplineError::invalid(format!(
                    "Periodic boundary requires equal end values, got {} and {}",
                    y0, yn
                )));
            }
            Ok(())
        }
    }
}

fn is_spacing_uniform(knots: &[Knot]) -> bool {
    let x_spacing_vec: Vec<f64> = knots.windows(2).map(|w| w[1].x - w[0].x).collect();
    let span = knots[knots.len() - 1].x - knots[0].x;

    x_spacing_vec
        .windows(2)
        .map(|spacing| (spacing[1] - spacing[0]).abs())
        .all(|difference| difference <= 1e-12 * span)
}
