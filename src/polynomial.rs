/// Polynomial of a single interval in its local variable `t = x - x_i`.
#[derive(Debug, Clone, PartialEq)]
pub struct Polynomial {
    coefficients: Vec<f64>,
}

impl Polynomial {

    pub fn new(coefficients: Vec<f64>) -> Self {
        Polynomial { coefficients }
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    pub fn degree(&self) -> usize {
        self.coefficients.len().saturating_sub(1)
    }

    /// Horner's scheme.
    pub fn evaluate(&self, t: f64) -> f64 {
        self.coefficients.iter().rev().fold(0.0, |result, c| result * t + c)
    }

    /// Value of the `order`-th derivative at `t`. Orders above the degree give zero.
    pub fn derivative(&self, t: f64, order: usize) -> f64 {
        if order == 0 {
            return self.evaluate(t);
        }
        if order > self.degree() {
            return 0.0;
        }
        self.coefficients
            .iter()
            .enumerate()
            .skip(order)
            .rev()
            .fold(0.0, |result, (power, c)| {
                result * t + c * falling_factorial(power, order)
            })
    }
}

/// `power * (power - 1) * ... * (power - order + 1)`, the factor the `order`-th
/// derivative brings down from `t^power`.
pub(crate) fn falling_factorial(power: usize, order: usize) -> f64 {
    if power < order {
        return 0.0;
    }
    let mut multiplier = 1.0;
    let mut coeff = power as f64;
    for _ in 0..order {
        multiplier *= coeff;
        coeff -= 1.0;
    }
    multiplier
}
