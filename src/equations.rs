//! Assembly and solution of the linear system of spline coefficients.
//!
//! Unknowns are normalised coefficients `b_j = a_j * h_i^j` of every interval, the
//! polynomial of interval `i` being `q(u) = sum b_j u^j` with `u = (x - x_i) / h_i`.
//! All matrix entries are then combinatorial constants scaled by spacing ratios,
//! independent of the magnitude of the knot spacing.

use nalgebra::{DMatrix, DVector};
use tracing::debug;

use crate::{
    boundary::{self, BoundaryCondition, End},
    error::SplineError,
    knot::Knot,
    polynomial::{falling_factorial, Polynomial},
};

pub(crate) struct SplineSystem {
    degree: usize,
    steps: Vec<f64>,
    matrix: DMatrix<f64>,
    rhs: DVector<f64>,
    equation_counter: usize,
}

/// Number of unknowns, `(knots - 1) * (degree + 1)`, or `None` when it overflows.
pub(crate) fn system_size(number_of_knots: usize, degree: usize) -> Option<usize> {
    number_of_knots.checked_sub(1)?.checked_mul(degree.checked_add(1)?)
}

impl SplineSystem {
    fn new(knots: &[Knot], degree: usize) -> Result<Self, SplineError> {
        let matrix_size = system_size(knots.len(), degree)
            .ok_or_else(|| SplineError::invalid(format!("degree {} is too large", degree)))?;
        let steps: Vec<f64> = knots.windows(2).map(|w| w[1].x - w[0].x).collect();
        Ok(SplineSystem {
            degree,
            steps,
            matrix: DMatrix::<f64>::zeros(matrix_size, matrix_size),
            rhs: DVector::<f64>::zeros(matrix_size),
            equation_counter: 0,
        })
    }

    fn number_of_intervals(&self) -> usize {
        self.steps.len()
    }

    fn index(&self, interval: usize, power: usize) -> usize {
        interval * (self.degree + 1) + power
    }

    fn function_value_equations(&mut self, interval: usize, y0: f64, y1: f64) {
        let row = self.equation_counter;
        let column = self.index(interval, 0);
        self.matrix[(row, column)] = 1.0;
        self.rhs[row] = y0;

        for power in 0..=self.degree {
            let column = self.index(interval, power);
            self.matrix[(row + 1, column)] = 1.0;
        }
        self.rhs[row + 1] = y1;
        self.equation_counter += 2;
    }

    /// Jump of the `order`-th derivative across the knot shared by `interval` and
    /// `interval + 1` is zero. Row is scaled by `h_interval^order`.
    fn continuity_equation(&mut self, interval: usize, order: usize) {
        let row = self.equation_counter;
        let ratio = (self.steps[interval] / self.steps[interval + 1]).powi(order as i32);

        for power in order..=self.degree {
            let column = self.index(interval, power);
            self.matrix[(row, column)] += falling_factorial(power, order);
        }
        let column = self.index(interval + 1, order);
        self.matrix[(row, column)] -= falling_factorial(order, order) * ratio;

        self.rhs[row] = 0.0;
        self.equation_counter += 1;
    }

    /// `order`-th derivative at the given end of the domain equals `value`.
    /// Row is scaled by the step of the boundary interval raised to `order`.
    fn end_derivative_equation(&mut self, end: End, order: usize, value: f64) {
        let row = self.equation_counter;
        let last = self.number_of_intervals() - 1;

        match end {
            End::Left => {
                let column = self.index(0, order);
                self.matrix[(row, column)] = falling_factorial(order, order);
                self.rhs[row] = value * self.steps[0].powi(order as i32);
            }
            End::Right => {
                for power in order..=self.degree {
                    let column = self.index(last, power);
                    self.matrix[(row, column)] = falling_factorial(power, order);
                }
                self.rhs[row] = value * self.steps[last].powi(order as i32);
            }
        }
        self.equation_counter += 1;
    }

    /// `order`-th derivative at the left end equals the one at the right end.
    /// With a single interval both terms land in the same columns.
    fn periodic_equation(&mut self, order: usize) {
        let row = self.equation_counter;
        let last = self.number_of_intervals() - 1;
        let ratio = (self.steps[last] / self.steps[0]).powi(order as i32);

        let column = self.index(0, order);
        self.matrix[(row, column)] += falling_factorial(order, order) * ratio;
        for power in order..=self.degree {
            let column = self.index(last, power);
            self.matrix[(row, column)] -= falling_factorial(power, order);
        }

        self.rhs[row] = 0.0;
        self.equation_counter += 1;
    }

    fn boundary_equations(&mut self, boundary: &BoundaryCondition) -> Result<(), SplineError> {
        match *boundary {
            BoundaryCondition::Natural => {
                for (end, order) in boundary::natural_orders(self.degree) {
                    self.end_derivative_equation(end, order, 0.0);
                }
            }
            BoundaryCondition::Clamped { left, right } => {
                self.end_derivative_equation(End::Left, 1, left);
                self.end_derivative_equation(End::Right, 1, right);
                for (end, order) in boundary::clamped_zero_orders(self.degree) {
                    self.end_derivative_equation(end, order, 0.0);
                }
            }
            BoundaryCondition::NotAKnot => {
                let indices = boundary::not_a_knot_indices(self.degree, self.number_of_intervals())
                    .ok_or_else(|| SplineError::invalid("not enough interior knots for NotAKnot boundary"))?;
                for knot_index in indices {
                    self.continuity_equation(knot_index - 1, self.degree);
                }
            }
            BoundaryCondition::Periodic => {
                for order in 1..self.degree {
                    self.periodic_equation(order);
                }
            }
        }
        Ok(())
    }

    fn solve(self, pivot_tolerance: f64) -> Result<Vec<Polynomial>, SplineError> {
        let size = self.rhs.len();
        if self.equation_counter != size {
            return Err(SplineError::invalid(format!(
                "boundary condition produced {} equations for {} unknowns",
                self.equation_counter, size
            )));
        }

        let lu = self.matrix.lu();
        let pivots = lu.u().diagonal();
        let max_pivot = pivots.amax();
        let min_pivot = pivots.iter().fold(f64::INFINITY, |min, p| min.min(p.abs()));
        if !(max_pivot > 0.0) || min_pivot <= pivot_tolerance * max_pivot {
            return Err(SplineError::SingularSystem(format!(
                "smallest pivot {:e} against largest {:e}",
                min_pivot, max_pivot
            )));
        }

        let solution = match lu.solve(&self.rhs) {
            Some(solution) => solution,
            None => return Err(SplineError::SingularSystem("LU solve failed".to_string())),
        };
        if solution.iter().any(|c| !c.is_finite()) {
            return Err(SplineError::SingularSystem("solution is not finite".to_string()));
        }

        let number_of_coefficients = self.degree + 1;
        let polynomials = self
            .steps
            .iter()
            .enumerate()
            .map(|(interval, step)| {
                let start = interval * number_of_coefficients;
                let coefficients = (0..number_of_coefficients)
                    .map(|power| solution[start + power] / step.powi(power as i32))
                    .collect();
                Polynomial::new(coefficients)
            })
            .collect();
        Ok(polynomials)
    }
}

/// Builds and solves the system for already validated knots.
pub(crate) fn calculate_polynomials(
    knots: &[Knot],
    degree: usize,
    boundary: &BoundaryCondition,
    pivot_tolerance: f64,
) -> Result<Vec<Polynomial>, SplineError> {
    let mut system = SplineSystem::new(knots, degree)?;
    let number_of_intervals = system.number_of_intervals();

    debug!(
        intervals = number_of_intervals,
        degree,
        unknowns = system.rhs.len(),
        boundary = ?boundary,
        "assembling spline system"
    );

    for i in 0..number_of_intervals {
        system.function_value_equations(i, knots[i].y, knots[i + 1].y);

        if i < number_of_intervals - 1 {
            for order in 1..degree {
                system.continuity_equation(i, order);
            }
        }
    }
    system.boundary_equations(boundary)?;
    system.solve(pivot_tolerance)
}
