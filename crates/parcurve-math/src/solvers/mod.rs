//! Root-finding algorithms.
//!
//! - [`newton_raphson`]: quadratic convergence when a derivative is available
//! - [`brent`]: bracketing method mixing bisection, secant and inverse quadratic steps
//! - [`hybrid`]: monitored Newton with a Brent fallback
//!
//! The bootstrapper solves one scalar equation per pillar, with the unknown
//! being a discount factor. That objective is smooth and monotone in practice,
//! so Newton usually converges in a handful of steps; Brent on a wide
//! bracket picks up the cases where it does not.
//!
//! # Example
//!
//! ```rust
//! use parcurve_math::solvers::{hybrid_numerical, SolverConfig};
//!
//! // Discount factor that reprices a 1Y deposit at 5% (ACT/360, 365 days)
//! let tau = 365.0 / 360.0;
//! let f = |df: f64| (1.0 + 0.05 * tau) * df - 1.0;
//!
//! let result = hybrid_numerical(f, 1.0, Some((1e-6, 4.0)), &SolverConfig::default()).unwrap();
//! assert!((result.root - 1.0 / (1.0 + 0.05 * tau)).abs() < 1e-12);
//! ```

mod brent;
mod hybrid;
mod newton;

pub use brent::brent;
pub use hybrid::{hybrid, hybrid_numerical};
pub use newton::{newton_raphson, newton_raphson_numerical};

use serde::{Deserialize, Serialize};

/// Default absolute tolerance on the objective.
pub const DEFAULT_TOLERANCE: f64 = 1e-12;

/// Default maximum iterations.
pub const DEFAULT_MAX_ITERATIONS: u32 = 100;

/// Configuration for root-finding algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Tolerance for convergence.
    pub tolerance: f64,
    /// Maximum number of iterations.
    pub max_iterations: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl SolverConfig {
    /// Creates a new solver configuration.
    #[must_use]
    pub fn new(tolerance: f64, max_iterations: u32) -> Self {
        Self {
            tolerance,
            max_iterations,
        }
    }

    /// Sets the tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the maximum iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}

/// Result of a successful root search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverResult {
    /// The root found.
    pub root: f64,
    /// Number of iterations used.
    pub iterations: u32,
    /// Function value at the root.
    pub residual: f64,
}
