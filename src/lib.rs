//! Piecewise polynomial splines of any degree, built once and evaluated many times.
//! Suited to curve construction such as zero-rate yield curves over maturities.
//!
//! A spline of degree `n` through `m + 1` knots has `m(n+1)` coefficients. Interpolation
//! and derivative continuity up to order `n - 1` fix all but `n - 1` of them, the
//! [BoundaryCondition] supplies the rest.
//!
//! Cubic Hermite splines skip the global system: [Spline::hermite] takes the slope at every
//! knot from the caller and [Spline::pchip] picks monotonicity preserving slopes itself.
//!
//! # Example
//! ```
//! use poly_spline::{BoundaryCondition, ExtrapolationPolicy, Knot, Spline};
//! use assert_approx_eq::assert_approx_eq;
//!
//! let knots = vec![
//!     Knot::new(0.0, 3.0),
//!     Knot::new(1.0, 1.0),
//!     Knot::new(2.0, 4.0)
//! ];
//! let spline = Spline::new(knots, 3, BoundaryCondition::Clamped { left: -3.0, right: -2.0 }).unwrap();
//!
//! assert_approx_eq!(-3.0, spline.evaluate_derivative(0.0, 1).unwrap(), 1e-9);
//! assert_approx_eq!(4.0, spline.evaluate(2.0).unwrap(), 1e-9);
//! assert!(spline.evaluate(2.5).is_err());
//!
//! let spline = spline.with_extrapolation(ExtrapolationPolicy::Clamp);
//! assert_approx_eq!(4.0, spline.evaluate(2.5).unwrap(), 1e-9);
//! ```

mod boundary;
mod cache;
mod config;
mod equations;
mod error;
mod hermite;
mod knot;
mod polynomial;
mod spline;

pub use boundary::BoundaryCondition;
pub use cache::{SplineCache, SplineFingerprint};
pub use config::{ExtrapolationPolicy, SplineConfig};
pub use error::SplineError;
pub use knot::Knot;
pub use polynomial::Polynomial;
pub use spline::Spline;
