//! Newton-Raphson with a Brent fallback.

use crate::error::{MathError, MathResult};
use crate::solvers::newton::central_difference;
use crate::solvers::{brent, SolverConfig, SolverResult};

/// Newton iterations tried before handing over to Brent.
const MAX_NEWTON_ITERATIONS: u32 = 20;

/// Consecutive residual blow-ups tolerated before Newton is abandoned.
const MAX_DIVERGENCE: u32 = 3;

/// Hybrid root finder.
///
/// # Strategy
///
/// 1. Run Newton-Raphson from `initial_guess`, watching the residual
/// 2. On divergence, a vanishing derivative, a non-finite value or running out
///    of Newton iterations, switch to Brent on `bounds`
/// 3. Without `bounds`, search outward from the initial guess for a bracket
///
/// Newton and Brent share `config.max_iterations`: Brent only gets what
/// Newton left over, and the reported iteration count includes the abandoned
/// Newton steps.
///
/// # Example
///
/// ```rust
/// use parcurve_math::solvers::{hybrid, SolverConfig};
///
/// let f = |x: f64| x * x * x - x - 2.0;
/// let df = |x: f64| 3.0 * x * x - 1.0;
///
/// let result = hybrid(f, df, 1.5, Some((1.0, 2.0)), &SolverConfig::default()).unwrap();
/// assert!(f(result.root).abs() < 1e-10);
/// ```
pub fn hybrid<F, DF>(
    f: F,
    df: DF,
    initial_guess: f64,
    bounds: Option<(f64, f64)>,
    config: &SolverConfig,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
    DF: Fn(f64) -> f64,
{
    let newton_budget = config.max_iterations.min(MAX_NEWTON_ITERATIONS);

    let (spent, residual) =
        match newton_with_monitoring(&f, &df, initial_guess, bounds, newton_budget, config) {
            Ok(result) => return Ok(result),
            Err(stalled) => stalled,
        };

    let remaining = config.max_iterations.saturating_sub(spent);
    if remaining == 0 {
        return Err(MathError::convergence_failed(spent, residual));
    }

    let (a, b) = match bounds {
        Some(bracket) => bracket,
        None => find_bracket(&f, initial_guess).ok_or_else(|| {
            MathError::invalid_input(
                "Newton-Raphson failed and could not find bracketing interval for Brent",
            )
        })?,
    };

    match brent(&f, a, b, &config.with_max_iterations(remaining)) {
        Ok(mut result) => {
            result.iterations += spent;
            Ok(result)
        }
        Err(MathError::ConvergenceFailed {
            iterations,
            residual,
        }) => Err(MathError::convergence_failed(iterations + spent, residual)),
        Err(other) => Err(other),
    }
}

/// Hybrid root finder with a central-difference derivative.
pub fn hybrid_numerical<F>(
    f: F,
    initial_guess: f64,
    bounds: Option<(f64, f64)>,
    config: &SolverConfig,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
{
    let df = |x: f64| central_difference(&f, x);
    hybrid(&f, df, initial_guess, bounds, config)
}

/// Runs Newton until convergence or trouble. On failure returns the number of
/// iterations spent and the last absolute residual seen.
fn newton_with_monitoring<F, DF>(
    f: &F,
    df: &DF,
    initial_guess: f64,
    bounds: Option<(f64, f64)>,
    max_iterations: u32,
    config: &SolverConfig,
) -> Result<SolverResult, (u32, f64)>
where
    F: Fn(f64) -> f64,
    DF: Fn(f64) -> f64,
{
    let mut x = initial_guess;
    let mut prev_residual = f64::MAX;
    let mut divergence_count = 0;

    for iteration in 0..max_iterations {
        let fx = f(x);
        if !fx.is_finite() {
            return Err((iteration, f64::INFINITY));
        }

        let residual = fx.abs();
        if residual < config.tolerance {
            return Ok(SolverResult {
                root: x,
                iterations: iteration,
                residual: fx,
            });
        }

        if residual > prev_residual * 2.0 {
            divergence_count += 1;
            if divergence_count >= MAX_DIVERGENCE {
                return Err((iteration, residual));
            }
        } else {
            divergence_count = 0;
        }
        prev_residual = residual;

        let dfx = df(x);
        if dfx.abs() < 1e-15 || !dfx.is_finite() {
            return Err((iteration, residual));
        }

        let step = fx / dfx;
        x -= step;

        // Leaving the bracket means Newton has lost the root
        if let Some((a, b)) = bounds {
            if x < a.min(b) || x > a.max(b) {
                return Err((iteration + 1, residual));
            }
        }

        if step.abs() < config.tolerance {
            // A vanishing step only counts when the residual agrees
            let fx_new = f(x);
            if fx_new.abs() < config.tolerance {
                return Ok(SolverResult {
                    root: x,
                    iterations: iteration + 1,
                    residual: fx_new,
                });
            }
            return Err((iteration + 1, fx_new.abs()));
        }
    }

    Err((max_iterations, prev_residual))
}

/// Expands outward from the initial guess until the function changes sign.
fn find_bracket<F>(f: &F, initial_guess: f64) -> Option<(f64, f64)>
where
    F: Fn(f64) -> f64,
{
    let f_init = f(initial_guess);
    let mut delta = 0.1;

    for _ in 0..50 {
        let left = initial_guess - delta;
        let right = initial_guess + delta;
        let f_left = f(left);
        let f_right = f(right);

        if f_left * f_init < 0.0 {
            return Some((left, initial_guess));
        }
        if f_right * f_init < 0.0 {
            return Some((initial_guess, right));
        }

        delta *= 2.0;
        if delta > 1e6 {
            break;
        }
    }

    None
}
