//! Log-linear interpolation.

use crate::error::{MathError, MathResult};
use crate::interpolation::{Interpolator, Knots, Location};

/// Linear interpolation of `ln(y)`.
///
/// On discount factors this gives a constant instantaneous forward rate
/// between knots:
///
/// ```text
/// ln DF(t) = ln DF(t_i) + (t - t_i) / (t_{i+1} - t_i) · (ln DF(t_{i+1}) - ln DF(t_i))
/// ```
///
/// # Example
///
/// ```rust
/// use parcurve_math::interpolation::{Interpolator, LogLinearInterpolator};
///
/// let interp = LogLinearInterpolator::new(vec![0.0, 1.0, 2.0], vec![1.0, 0.97, 0.94]).unwrap();
/// let df = interp.interpolate(1.5).unwrap();
/// assert!(df < 0.97 && df > 0.94);
/// ```
#[derive(Debug, Clone)]
pub struct LogLinearInterpolator {
    knots: Knots,
    log_ys: Vec<f64>,
}

impl LogLinearInterpolator {
    /// Creates a log-linear interpolator.
    ///
    /// # Errors
    ///
    /// Fails on fewer than two knots, unsorted knots or any non-positive `y`.
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> MathResult<Self> {
        let knots = Knots::new(xs, ys.len(), 2)?;

        let log_ys = ys
            .iter()
            .enumerate()
            .map(|(i, &y)| {
                if y > 0.0 && y.is_finite() {
                    Ok(y.ln())
                } else {
                    Err(MathError::invalid_input(format!(
                        "y[{i}] = {y} is not positive; log-linear requires positive values"
                    )))
                }
            })
            .collect::<MathResult<Vec<f64>>>()?;

        Ok(Self { knots, log_ys })
    }

    /// Holds `ln(y)` constant outside the knots.
    #[must_use]
    pub fn with_flat_extrapolation(mut self) -> Self {
        self.knots.enable_flat_extrapolation();
        self
    }

    fn log_value(&self, x: f64) -> MathResult<(f64, f64)> {
        match self.knots.locate(x)? {
            Location::Clamped(i) => Ok((self.log_ys[i], 0.0)),
            Location::Segment(i) => {
                let xs = self.knots.xs();
                let slope = (self.log_ys[i + 1] - self.log_ys[i]) / (xs[i + 1] - xs[i]);
                Ok((self.log_ys[i] + slope * (x - xs[i]), slope))
            }
        }
    }
}

impl Interpolator for LogLinearInterpolator {
    fn interpolate(&self, x: f64) -> MathResult<f64> {
        let (log_y, _) = self.log_value(x)?;
        Ok(log_y.exp())
    }

    fn derivative(&self, x: f64) -> MathResult<f64> {
        let (log_y, slope) = self.log_value(x)?;
        Ok(log_y.exp() * slope)
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
