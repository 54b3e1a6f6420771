use crate::{knot::Knot, polynomial::Polynomial};

/// Cubic pieces matching value and first derivative `slopes[i]` at every knot.
///
/// In the local variable of an interval of width `h` with secant `s`:
/// `a_2 = (3s - 2d_0 - d_1) / h` and `a_3 = (d_0 + d_1 - 2s) / h^2`.
pub(crate) fn hermite_polynomials(knots: &[Knot], slopes: &[f64]) -> Vec<Polynomial> {
    knots
        .windows(2)
        .zip(slopes.windows(2))
        .map(|(k, d)| {
            let h = k[1].x - k[0].x;
            let secant = (k[1].y - k[0].y) / h;
            Polynomial::new(vec![
                k[0].y,
                d[0],
                (3.0 * secant - 2.0 * d[0] - d[1]) / h,
                (d[0] + d[1] - 2.0 * secant) / (h * h),
            ])
        })
        .collect()
}

/// Fritsch-Carlson slopes keeping the interpolant monotone wherever the data is.
///
/// Interior slopes are weighted harmonic means of the neighbouring secants, zero at
/// local extrema. End slopes come from a one-sided three point formula, limited so
/// they never point against the first secant.
pub(crate) fn pchip_slopes(knots: &[Knot]) -> Vec<f64> {
    let steps: Vec<f64> = knots.windows(2).map(|w| w[1].x - w[0].x).collect();
    let secants: Vec<f64> = knots
        .windows(2)
        .zip(&steps)
        .map(|(w, h)| (w[1].y - w[0].y) / h)
        .collect();
    let m = steps.len();

    if m == 1 {
        return vec![secants[0]; 2];
    }

    let mut slopes = vec![0.0; m + 1];
    for i in 1..m {
        let (s0, s1) = (secants[i - 1], secants[i]);
        if s0 * s1 <= 0.0 {
            continue;
        }
        let (h0, h1) = (steps[i - 1], steps[i]);
        let w1 = 2.0 * h1 + h0;
        let w2 = h1 + 2.0 * h0;
        slopes[i] = (w1 + w2) / (w1 / s0 + w2 / s1);
    }

    slopes[0] = end_slope(steps[0], steps[1], secants[0], secants[1]);
    slopes[m] = end_slope(steps[m - 1], steps[m - 2], secants[m - 1], secants[m - 2]);
    slopes
}

/// `h0`, `s0` belong to the interval at the end, `h1`, `s1` to its neighbour.
fn end_slope(h0: f64, h1: f64, s0: f64, s1: f64) -> f64 {
    let d = ((2.0 * h0 + h1) * s0 - h0 * s1) / (h0 + h1);
    if d.signum() != s0.signum() || s0 == 0.0 {
        0.0
    } else if s0.signum() != s1.signum() && d.abs() > 3.0 * s0.abs() {
        3.0 * s0
    } else {
        d
    }
}
