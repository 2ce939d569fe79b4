//! Natural cubic spline interpolation.

use crate::error::MathResult;
use crate::interpolation::{Interpolator, Knots, Location};

/// Natural cubic spline: piecewise cubics with continuous first and second
/// derivatives, and zero second derivative at both end knots.
///
/// On segment `[x_i, x_{i+1}]` with `h = x_{i+1} - x_i`, `a = (x_{i+1} - x) / h`
/// and `b = 1 - a`:
///
/// ```text
/// S(x) = a·y_i + b·y_{i+1} + ((a³ - a)·M_i + (b³ - b)·M_{i+1})·h² / 6
/// ```
///
/// where `M` are the second derivatives at the knots.
///
/// # Example
///
/// ```rust
/// use parcurve_math::interpolation::{CubicSpline, Interpolator};
///
/// let spline = CubicSpline::new(vec![0.5, 1.0, 2.0, 5.0], vec![0.010, 0.012, 0.015, 0.020]).unwrap();
/// let zero = spline.interpolate(3.0).unwrap();
/// assert!(zero > 0.015 && zero < 0.020);
/// ```
#[derive(Debug, Clone)]
pub struct CubicSpline {
    knots: Knots,
    ys: Vec<f64>,
    second_derivatives: Vec<f64>,
}

impl CubicSpline {
    /// Creates a natural cubic spline from at least three knots.
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> MathResult<Self> {
        let knots = Knots::new(xs, ys.len(), 3)?;
        let second_derivatives = solve_natural_spline(knots.xs(), &ys);

        Ok(Self {
            knots,
            ys,
            second_derivatives,
        })
    }

    /// Holds the end values constant outside the knots.
    #[must_use]
    pub fn with_flat_extrapolation(mut self) -> Self {
        self.knots.enable_flat_extrapolation();
        self
    }

    /// Second derivatives at the knots.
    #[must_use]
    pub fn second_derivatives(&self) -> &[f64] {
        &self.second_derivatives
    }

    fn segment_weights(&self, i: usize, x: f64) -> (f64, f64, f64) {
        let xs = self.knots.xs();
        let h = xs[i + 1] - xs[i];
        let a = (xs[i + 1] - x) / h;
        (h, a, 1.0 - a)
    }
}

impl Interpolator for CubicSpline {
    fn interpolate(&self, x: f64) -> MathResult<f64> {
        let i = match self.knots.locate(x)? {
            Location::Clamped(i) => return Ok(self.ys[i]),
            Location::Segment(i) => i,
        };

        let (h, a, b) = self.segment_weights(i, x);
        let m = &self.second_derivatives;

        Ok(a * self.ys[i]
            + b * self.ys[i + 1]
            + ((a * a * a - a) * m[i] + (b * b * b - b) * m[i + 1]) * h * h / 6.0)
    }

    fn derivative(&self, x: f64) -> MathResult<f64> {
        let i = match self.knots.locate(x)? {
            Location::Clamped(_) => return Ok(0.0),
            Location::Segment(i) => i,
        };

        let (h, a, b) = self.segment_weights(i, x);
        let m = &self.second_derivatives;

        Ok((self.ys[i + 1] - self.ys[i]) / h
            - (3.0 * a * a - 1.0) * h * m[i] / 6.0
            + (3.0 * b * b - 1.0) * h * m[i + 1] / 6.0)
    }

    fn allows_extrapolation(&self) -> bool {
        self.knots.flat_extrapolation()
    }

    fn min_x(&self) -> f64 {
        self.knots.min()
    }

    fn max_x(&self) -> f64 {
        self.knots.max()
    }
}

/// Solves the tridiagonal system for interior second derivatives
/// (Thomas algorithm), with `M_0 = M_{n-1} = 0`.
fn solve_natural_spline(xs: &[f64], ys: &[f64]) -> Vec<f64> {
    let n = xs.len();
    let h: Vec<f64> = xs.windows(2).map(|w| w[1] - w[0]).collect();

    let mut m = vec![0.0; n];
    let interior = n - 2;
    let mut diag = vec![0.0; interior];
    let mut rhs = vec![0.0; interior];

    for k in 0..interior {
        let i = k + 1;
        diag[k] = 2.0 * (h[i - 1] + h[i]);
        rhs[k] = 6.0 * ((ys[i + 1] - ys[i]) / h[i] - (ys[i] - ys[i - 1]) / h[i - 1]);
    }

    // Forward elimination: sub-diagonal of row k is h[k], super-diagonal is h[k + 1]
    for k in 1..interior {
        let w = h[k] / diag[k - 1];
        diag[k] -= w * h[k];
        rhs[k] -= w * rhs[k - 1];
    }

    for k in (0..interior).rev() {
        let upper = if k + 1 < interior { h[k + 1] * m[k + 2] } else { 0.0 };
        m[k + 1] = (rhs[k] - upper) / diag[k];
    }

    m
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_through_points() {
        let xs = vec![0.0, 1.0, 2.0, 3.0];
        let ys = vec![0.0, 1.0, 4.0, 9.0];
        let spline = CubicSpline::new(xs.clone(), ys.clone()).unwrap();

        for (x, y) in xs.iter().zip(ys.iter()) {
            assert_relative_eq!(spline.interpolate(*x).unwrap(), *y, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_natural_end_conditions() {
        let spline = CubicSpline::new(vec![0.0, 1.0, 2.5, 4.0], vec![0.01, 0.02, 0.018, 0.03]).unwrap();
        let m = spline.second_derivatives();

        assert_relative_eq!(m[0], 0.0);
        assert_relative_eq!(m[3], 0.0);
    }

    #[test]
    fn test_known_second_derivatives() {
        // Equal spacing, three knots: 4·M_1 = 6·(y2 - 2·y1 + y0)
        let spline = CubicSpline::new(vec![0.0, 1.0, 2.0], vec![0.0, 1.0, 0.0]).unwrap();
        assert_relative_eq!(spline.second_derivatives()[1], -3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_reproduces_straight_line() {
        let xs = vec![0.0, 0.7, 1.5, 3.0, 7.0];
        let ys: Vec<f64> = xs.iter().map(|x| 0.01 + 0.002 * x).collect();
        let spline = CubicSpline::new(xs, ys).unwrap();

        for x in [0.3, 1.1, 2.2, 5.0] {
            assert_relative_eq!(spline.interpolate(x).unwrap(), 0.01 + 0.002 * x, epsilon = 1e-12);
            assert_relative_eq!(spline.derivative(x).unwrap(), 0.002, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_first_derivative_is_continuous() {
        let xs = vec![0.0, 1.0, 2.0, 3.0, 4.0];
        let spline = CubicSpline::new(xs, vec![0.0, 1.0, 0.0, 1.0, 0.0]).unwrap();

        let eps = 1e-9;
        for knot in [1.0, 2.0, 3.0] {
            let left = spline.derivative(knot - eps).unwrap();
            let right = spline.derivative(knot + eps).unwrap();
            assert_relative_eq!(left, right, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_requires_three_points() {
        assert!(CubicSpline::new(vec![0.0, 1.0], vec![0.0, 1.0]).is_err());
    }
}
