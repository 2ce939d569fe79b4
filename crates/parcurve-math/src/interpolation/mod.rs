//! One-dimensional interpolation on sorted knots.
//!
//! - [`LinearInterpolator`]: piecewise linear
//! - [`LogLinearInterpolator`]: linear in `ln(y)`, i.e. piecewise constant
//!   forwards when `y` is a discount factor
//! - [`CubicSpline`]: natural cubic spline, C2 smooth
//!
//! All three refuse to extrapolate unless built with
//! `with_flat_extrapolation()`, in which case queries outside the knots are
//! clamped to the nearest end knot. For the log-linear interpolator this
//! holds `ln(y)` flat, so a discount factor curve stays at its last value.

mod cubic_spline;
mod linear;
mod log_linear;

pub use cubic_spline::CubicSpline;
pub use linear::LinearInterpolator;
pub use log_linear::LogLinearInterpolator;

use crate::error::{MathError, MathResult};

/// Trait for interpolation methods.
pub trait Interpolator: Send + Sync {
    /// Returns the interpolated value at x.
    fn interpolate(&self, x: f64) -> MathResult<f64>;

    /// Returns the first derivative at x.
    fn derivative(&self, x: f64) -> MathResult<f64>;

    /// Returns true if queries outside the knots are answered.
    fn allows_extrapolation(&self) -> bool {
        false
    }

    /// Returns the minimum x value in the data.
    fn min_x(&self) -> f64;

    /// Returns the maximum x value in the data.
    fn max_x(&self) -> f64;

    /// Checks if x is within the interpolation range.
    fn in_range(&self, x: f64) -> bool {
        x >= self.min_x() && x <= self.max_x()
    }
}

/// Validated knot abscissae shared by the interpolators.
#[derive(Debug, Clone)]
pub(crate) struct Knots {
    xs: Vec<f64>,
    flat_extrapolation: bool,
}

/// Where a query point falls relative to the knots.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Location {
    /// Inside segment `[xs[i], xs[i + 1]]`.
    Segment(usize),
    /// Clamped to the knot at this index.
    Clamped(usize),
}

impl Knots {
    pub(crate) fn new(xs: Vec<f64>, ys_len: usize, required: usize) -> MathResult<Self> {
        if xs.len() < required {
            return Err(MathError::insufficient_data(required, xs.len()));
        }
        if xs.len() != ys_len {
            return Err(MathError::invalid_input(format!(
                "xs and ys must have same length: {} vs {}",
                xs.len(),
                ys_len
            )));
        }
        if xs.iter().any(|x| !x.is_finite()) {
            return Err(MathError::invalid_input("x values must be finite"));
        }
        if xs.windows(2).any(|w| w[1] <= w[0]) {
            return Err(MathError::invalid_input("x values must be strictly increasing"));
        }

        Ok(Self {
            xs,
            flat_extrapolation: false,
        })
    }

    pub(crate) fn enable_flat_extrapolation(&mut self) {
        self.flat_extrapolation = true;
    }

    pub(crate) fn xs(&self) -> &[f64] {
        &self.xs
    }

    pub(crate) fn min(&self) -> f64 {
        self.xs[0]
    }

    pub(crate) fn max(&self) -> f64 {
        self.xs[self.xs.len() - 1]
    }

    pub(crate) fn flat_extrapolation(&self) -> bool {
        self.flat_extrapolation
    }

    /// Locates `x`, clamping or rejecting points outside the knots.
    pub(crate) fn locate(&self, x: f64) -> MathResult<Location> {
        let last = self.xs.len() - 1;

        if x < self.min() || x > self.max() {
            if !self.flat_extrapolation {
                return Err(MathError::ExtrapolationNotAllowed {
                    x,
                    min: self.min(),
                    max: self.max(),
                });
            }
            return Ok(Location::Clamped(if x < self.min() { 0 } else { last }));
        }

        // partition_point gives the first knot strictly greater than x
        let upper = self.xs.partition_point(|&k| k <= x);
        Ok(Location::Segment(upper.saturating_sub(1).min(last - 1)))
    }
}
