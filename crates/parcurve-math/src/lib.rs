//! # Parcurve Math
//!
//! Numerical building blocks for bootstrapping discount curves.
//!
//! - **Solvers**: Newton-Raphson, Brent, and a hybrid of the two
//! - **Interpolation**: linear, log-linear and natural cubic spline, each
//!   with optional flat extrapolation
//!
//! ## Example
//!
//! ```rust
//! use parcurve_math::prelude::*;
//!
//! let times = vec![0.0, 0.5, 1.0];
//! let dfs = vec![1.0, 0.99, 0.975];
//! let curve = LogLinearInterpolator::new(times, dfs).unwrap().with_flat_extrapolation();
//!
//! // Find the time at which the discount factor reaches 0.98
//! let f = |t: f64| curve.interpolate(t).unwrap() - 0.98;
//! let result = brent(f, 0.0, 1.0, &SolverConfig::default()).unwrap();
//! assert!(result.root > 0.5 && result.root < 1.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::similar_names)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::uninlined_format_args)]

pub mod error;
pub mod interpolation;
pub mod solvers;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{MathError, MathResult};
    pub use crate::interpolation::{
        CubicSpline, Interpolator, LinearInterpolator, LogLinearInterpolator,
    };
    pub use crate::solvers::{
        brent, hybrid, hybrid_numerical, newton_raphson, newton_raphson_numerical, SolverConfig,
        SolverResult,
    };
}

pub use error::{MathError, MathResult};
