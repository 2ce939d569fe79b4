//! Error types for the numerical layer.

use thiserror::Error;

/// A specialized Result type for numerical operations.
pub type MathResult<T> = Result<T, MathError>;

/// Errors raised by root finders and interpolators.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    /// Root finder ran out of iterations.
    #[error("Convergence failed after {iterations} iterations (residual: {residual:.2e})")]
    ConvergenceFailed {
        /// Number of iterations attempted.
        iterations: u32,
        /// Absolute function value at the last iterate.
        residual: f64,
    },

    /// Bracket endpoints do not straddle a root.
    #[error("Invalid bracket: f({a}) = {fa:.2e} and f({b}) = {fb:.2e} have same sign")]
    InvalidBracket {
        /// Lower bound of bracket.
        a: f64,
        /// Upper bound of bracket.
        b: f64,
        /// Function value at a.
        fa: f64,
        /// Function value at b.
        fb: f64,
    },

    /// Derivative vanished during a Newton step.
    #[error("Division by zero or near-zero value: {value:.2e}")]
    DivisionByZero {
        /// The near-zero value.
        value: f64,
    },

    /// The objective returned NaN or infinity.
    #[error("Non-finite function value at x = {x}")]
    NonFinite {
        /// Point at which the function was evaluated.
        x: f64,
    },

    /// Query point outside the knots of an interpolator without extrapolation.
    #[error("Extrapolation not allowed: {x} is outside [{min}, {max}]")]
    ExtrapolationNotAllowed {
        /// The query point.
        x: f64,
        /// Smallest knot.
        min: f64,
        /// Largest knot.
        max: f64,
    },

    /// Too few points to build an interpolator.
    #[error("Insufficient data: need at least {required}, got {actual}")]
    InsufficientData {
        /// Minimum required points.
        required: usize,
        /// Actual number of points.
        actual: usize,
    },

    /// Invalid input parameter.
    #[error("Invalid input: {reason}")]
    InvalidInput {
        /// Description of the invalid input.
        reason: String,
    },
}

impl MathError {
    /// Creates a convergence failed error.
    #[must_use]
    pub fn convergence_failed(iterations: u32, residual: f64) -> Self {
        Self::ConvergenceFailed {
            iterations,
            residual,
        }
    }

    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Creates an insufficient data error.
    #[must_use]
    pub fn insufficient_data(required: usize, actual: usize) -> Self {
        Self::InsufficientData { required, actual }
    }

    /// Iterations spent before the error, if the error came from an iterative method.
    #[must_use]
    pub fn iterations(&self) -> Option<u32> {
        match self {
            Self::ConvergenceFailed { iterations, .. } => Some(*iterations),
            _ => None,
        }
    }
}
