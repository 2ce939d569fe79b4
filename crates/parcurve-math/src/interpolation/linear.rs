//! Piecewise linear interpolation.

use crate::error::MathResult;
use crate::interpolation::{Interpolator, Knots, Location};

/// Piecewise linear interpolation between knots.
///
/// # Example
///
/// ```rust
/// use parcurve_math::interpolation::{Interpolator, LinearInterpolator};
///
/// let interp = LinearInterpolator::new(vec![1.0, 2.0], vec![0.02, 0.03]).unwrap();
/// assert!((interp.interpolate(1.5).unwrap() - 0.025).abs() < 1e-15);
/// ```
#[derive(Debug, Clone)]
pub struct LinearInterpolator {
    knots: Knots,
    ys: Vec<f64>,
}

impl LinearInterpolator {
    /// Creates a linear interpolator from at least two strictly increasing knots.
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> MathResult<Self> {
        let knots = Knots::new(xs, ys.len(), 2)?;
        Ok(Self { knots, ys })
    }

    /// Holds the end values constant outside the knots.
    #[must_use]
    pub fn with_flat_extrapolation(mut self) -> Self {
        self.knots.enable_flat_extrapolation();
        self
    }

    fn slope(&self, i: usize) -> f64 {
        let xs = self.knots.xs();
        (self.ys[i + 1] - self.ys[i]) / (xs[i + 1] - xs[i])
    }
}

impl Interpolator for LinearInterpolator {
    fn interpolate(&self, x: f64) -> MathResult<f64> {
        match self.knots.locate(x)? {
            Location::Clamped(i) => Ok(self.ys[i]),
            Location::Segment(i) => {
                let x0 = self.knots.xs()[i];
                Ok(self.ys[i] + self.slope(i) * (x - x0))
            }
        }
    }

    fn derivative(&self, x: f64) -> MathResult<f64> {
        match self.knots.locate(x)? {
            Location::Clamped(_) => Ok(0.0),
            Location::Segment(i) => Ok(self.slope(i)),
        }
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
