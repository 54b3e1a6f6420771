#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Knot represents point through which spline function passes.
/// - `x` - coordinate, knots given to a build must be strictly increasing in `x`,
/// - `y` - coordinate.
///
/// # Example
/// ```
/// use poly_spline::Knot;
///
/// let knot = Knot::new(1.0, 2.5);
/// let from_tuple: Knot = (1.0, 2.5).into();
///
/// assert_eq!(knot, from_tuple);
/// assert_eq!(1.0, knot.get_x());
/// assert_eq!(2.5, knot.get_y());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Knot {
    pub(crate) x: f64,
    pub(crate) y: f64,
}

impl Knot {
    pub fn new(x: f64, y: f64) -> Self {
        Knot { x, y }
    }

    pub fn get_x(&self) -> f64 {
        self.x
    }

    pub fn get_y(&self) -> f64 {
        self.y
    }

    pub(crate) fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for Knot {
    fn from((x, y): (f64, f64)) -> Self {
        Knot::new(x, y)
    }
}

/// Builds knots from two slices of equal length.
pub(crate) fn zip_knots(xs: &[f64], ys: &[f64]) -> Option<Vec<Knot>> {
    if xs.len() != ys.len() {
        return None;
    }
    Some(xs.iter().zip(ys).map(|(x, y)| Knot::new(*x, *y)).collect())
}
