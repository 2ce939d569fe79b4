//! Error types for curve construction and queries.

use parcurve_core::{CoreError, Date};
use parcurve_math::MathError;
use thiserror::Error;

/// A specialized Result type for curve operations.
pub type CurveResult<T> = Result<T, CurveError>;

/// Why an instrument maturity was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaturityErrorKind {
    /// The maturity is on or before the valuation date.
    OnOrBeforeValuation,
    /// Another registered instrument already has this maturity.
    Duplicate,
}

impl std::fmt::Display for MaturityErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OnOrBeforeValuation => write!(f, "on or before the valuation date"),
            Self::Duplicate => write!(f, "duplicates an existing instrument maturity"),
        }
    }
}

/// Error types for curve operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CurveError {
    /// Instrument maturity cannot be used as a pillar.
    #[error("Invalid maturity {maturity} for {instrument}: {kind}")]
    InvalidMaturity {
        /// Description of the rejected instrument.
        instrument: String,
        /// The rejected maturity.
        maturity: Date,
        /// Why it was rejected.
        kind: MaturityErrorKind,
    },

    /// The solver could not find a discount factor that prices the instrument to par.
    #[error(
        "Bootstrap failed for {instrument} (maturity {maturity}) after {iterations} iterations \
         (residual: {residual:.2e}): {reason}"
    )]
    BootstrapConvergence {
        /// Description of the failing instrument.
        instrument: String,
        /// Pillar date being solved.
        maturity: Date,
        /// Iterations spent.
        iterations: u32,
        /// Last absolute pricing error.
        residual: f64,
        /// Underlying solver failure.
        reason: String,
    },

    /// A query date precedes the valuation date.
    #[error("Date {date} is before the valuation date {valuation_date}")]
    DateBeforeValuation {
        /// The query date.
        date: Date,
        /// The curve's valuation date.
        valuation_date: Date,
    },

    /// A convention key or value was not recognized.
    #[error("Unknown convention '{key}': {reason}")]
    UnknownConvention {
        /// The offending key.
        key: String,
        /// Why the key or its value was rejected.
        reason: String,
    },

    /// The curve has no instruments to bootstrap from.
    #[error("Curve has no instruments")]
    EmptyCurve,

    /// Instrument inputs are inconsistent.
    #[error("Invalid instrument: {reason}")]
    InvalidInstrument {
        /// Description of what's wrong with the instrument.
        reason: String,
    },

    /// Two curves that must share a valuation date do not.
    #[error("Reference date mismatch: expected {expected}, got {got}")]
    ReferenceDateMismatch {
        /// Expected reference date.
        expected: Date,
        /// Actual reference date.
        got: Date,
    },

    /// Date, tenor, calendar or schedule error.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Interpolation or solver error outside of a bootstrap step.
    #[error(transparent)]
    Math(#[from] MathError),
}

impl CurveError {
    /// Creates an invalid maturity error.
    #[must_use]
    pub fn invalid_maturity(
        instrument: impl Into<String>,
        maturity: Date,
        kind: MaturityErrorKind,
    ) -> Self {
        Self::InvalidMaturity {
            instrument: instrument.into(),
            maturity,
            kind,
        }
    }

    /// Creates a convergence error from the solver failure for one instrument.
    #[must_use]
    pub fn bootstrap_convergence(
        instrument: impl Into<String>,
        maturity: Date,
        source: &MathError,
    ) -> Self {
        let (iterations, residual) = match source {
            MathError::ConvergenceFailed {
                iterations,
                residual,
            } => (*iterations, *residual),
            MathError::InvalidBracket { fa, fb, .. } => (0, fa.abs().min(fb.abs())),
            _ => (0, f64::NAN),
        };

        Self::BootstrapConvergence {
            instrument: instrument.into(),
            maturity,
            iterations,
            residual,
            reason: source.to_string(),
        }
    }

    /// Creates an unknown convention error.
    #[must_use]
    pub fn unknown_convention(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::UnknownConvention {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Creates an invalid instrument error.
    #[must_use]
    pub fn invalid_instrument(reason: impl Into<String>) -> Self {
        Self::InvalidInstrument {
            reason: reason.into(),
        }
    }

    /// True for the duplicate-maturity flavor of [`CurveError::InvalidMaturity`].
    #[must_use]
    pub fn is_duplicate_maturity(&self) -> bool {
        matches!(
            self,
            Self::InvalidMaturity {
                kind: MaturityErrorKind::Duplicate,
                ..
            }
        )
    }
}
