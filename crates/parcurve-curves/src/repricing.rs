//! Repricing validation for curve bootstrap.
//!
//! Every instrument is re-evaluated at its solved discount factor, against
//! exactly the pillars that were known when it was solved. A curve that
//! cannot reprice its inputs within tolerance is wrong.
//!
//! # Usage
//!
//! ```rust
//! use parcurve_core::{Date, Tenor};
//! use parcurve_curves::prelude::*;
//!
//! let val = Date::from_ymd(2016, 3, 16).unwrap();
//! let mut curve = Curve::new(val);
//! curve
//!     .add_instrument(Deposit::new(val, Tenor::months(3), 0.005, MoneyMarketConventions::default()).unwrap())
//!     .unwrap();
//!
//! let report = curve.repricing_report().unwrap();
//! assert!(report.is_valid());
//! assert_eq!(report.total_count(), 1);
//! ```

use std::fmt;

use parcurve_core::Date;
use serde::Serialize;

use crate::instruments::InstrumentKind;

/// Repricing tolerances by instrument type, in notional units.
///
/// | Instrument Type | Tolerance |
/// |-----------------|-----------|
/// | Deposits, FRAs, futures | 1e-9 |
/// | Swaps                   | 1e-7 |
pub mod tolerances {
    use super::InstrumentKind;

    /// Single-period money market instruments.
    pub const MONEY_MARKET: f64 = 1e-9;

    /// Multi-period swaps accumulate rounding across cash flows.
    pub const SWAP: f64 = 1e-7;

    /// Get tolerance for a specific instrument type
    #[must_use]
    pub fn for_instrument(kind: InstrumentKind) -> f64 {
        match kind {
            InstrumentKind::Deposit
            | InstrumentKind::ForwardRate
            | InstrumentKind::Future
            | InstrumentKind::CompoundFuture => MONEY_MARKET,
            InstrumentKind::OvernightIndexSwap
            | InstrumentKind::TermSwap
            | InstrumentKind::BasisSwap => SWAP,
        }
    }
}

/// Result of repricing a single instrument against the curve.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RepricingCheck {
    /// Description of the instrument (e.g., "Deposit 5.0000% 2025-01-15 to 2025-04-15")
    pub instrument: String,

    /// Type of instrument
    pub kind: InstrumentKind,

    /// Pillar date
    pub maturity: Date,

    /// Solved discount factor at the pillar
    pub discount_factor: f64,

    /// Pricing error at the solved discount factor
    pub residual: f64,

    /// Tolerance for this instrument type
    pub tolerance: f64,

    /// Whether this instrument passed validation
    pub passed: bool,
}

impl RepricingCheck {
    /// Creates a check with the default tolerance for its type.
    #[must_use]
    pub fn new(
        instrument: String,
        kind: InstrumentKind,
        maturity: Date,
        discount_factor: f64,
        residual: f64,
    ) -> Self {
        Self::with_tolerance(
            instrument,
            kind,
            maturity,
            discount_factor,
            residual,
            tolerances::for_instrument(kind),
        )
    }

    /// Creates a check with a custom tolerance.
    #[must_use]
    pub fn with_tolerance(
        instrument: String,
        kind: InstrumentKind,
        maturity: Date,
        discount_factor: f64,
        residual: f64,
        tolerance: f64,
    ) -> Self {
        Self {
            instrument,
            kind,
            maturity,
            discount_factor,
            residual,
            tolerance,
            passed: residual.abs() <= tolerance,
        }
    }
}

impl fmt::Display for RepricingCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.passed { "✓" } else { "✗" };
        write!(
            f,
            "{} {} | DF: {:.10} | Error: {:.2e} (tol: {:.2e})",
            status, self.instrument, self.discount_factor, self.residual, self.tolerance
        )
    }
}

/// Complete repricing report for audit trail.
#[derive(Debug, Clone, Serialize)]
pub struct RepricingReport {
    checks: Vec<RepricingCheck>,
    max_error: f64,
    rms_error: f64,
    all_passed: bool,
    passed_count: usize,
}

impl RepricingReport {
    /// Creates a new repricing report from individual checks.
    #[must_use]
    pub fn new(checks: Vec<RepricingCheck>) -> Self {
        let max_error = checks.iter().map(|c| c.residual.abs()).fold(0.0_f64, f64::max);

        let rms_error = if checks.is_empty() {
            0.0
        } else {
            let sum_sq: f64 = checks.iter().map(|c| c.residual * c.residual).sum();
            (sum_sq / checks.len() as f64).sqrt()
        };

        let passed_count = checks.iter().filter(|c| c.passed).count();

        Self {
            all_passed: passed_count == checks.len(),
            checks,
            max_error,
            rms_error,
            passed_count,
        }
    }

    /// Returns whether all instruments passed repricing validation.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.all_passed
    }

    /// Returns the individual repricing checks.
    #[must_use]
    pub fn checks(&self) -> &[RepricingCheck] {
        &self.checks
    }

    /// Returns the maximum absolute error.
    #[must_use]
    pub fn max_error(&self) -> f64 {
        self.max_error
    }

    /// Returns the RMS error.
    #[must_use]
    pub fn rms_error(&self) -> f64 {
        self.rms_error
    }

    /// Returns the number of instruments that passed.
    #[must_use]
    pub fn passed_count(&self) -> usize {
        self.passed_count
    }

    /// Returns the number of instruments that failed.
    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.checks.len() - self.passed_count
    }

    /// Returns the total number of instruments checked.
    #[must_use]
    pub fn total_count(&self) -> usize {
        self.checks.len()
    }

    /// Returns failed instrument descriptions for error messages.
    #[must_use]
    pub fn failed_instruments(&self) -> Vec<&str> {
        self.checks
            .iter()
            .filter(|c| !c.passed)
            .map(|c| c.instrument.as_str())
            .collect()
    }
}

impl fmt::Display for RepricingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Repricing Report")?;
        writeln!(f, "================")?;
        writeln!(f, "Status: {}", if self.all_passed { "PASSED" } else { "FAILED" })?;
        writeln!(f, "Instruments: {}/{} passed", self.passed_count, self.checks.len())?;
        writeln!(f, "Max Error: {:.2e}", self.max_error)?;
        writeln!(f, "RMS Error: {:.2e}", self.rms_error)?;

        if !self.checks.is_empty() {
            writeln!(f)?;
            writeln!(f, "Details:")?;
            for check in &self.checks {
                writeln!(f, "  {check}")?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn check(residual: f64, kind: InstrumentKind) -> RepricingCheck {
        RepricingCheck::new(
            format!("{kind} test"),
            kind,
            Date::from_ymd(2017, 3, 16).unwrap(),
            0.99,
            residual,
        )
    }

    #[test]
    fn test_check_uses_type_tolerance() {
        assert!(check(5e-8, InstrumentKind::TermSwap).passed);
        assert!(!check(5e-8, InstrumentKind::Deposit).passed);
        assert!(check(-1e-10, InstrumentKind::Deposit).passed);
    }

    #[test]
    fn test_report_statistics() {
        let report = RepricingReport::new(vec![
            check(3e-10, InstrumentKind::Deposit),
            check(-4e-10, InstrumentKind::ForwardRate),
            check(1e-3, InstrumentKind::OvernightIndexSwap),
        ]);

        assert!(!report.is_valid());
        assert_eq!(report.passed_count(), 2);
        assert_eq!(report.failed_count(), 1);
        assert_relative_eq!(report.max_error(), 1e-3);
        assert_eq!(report.failed_instruments(), vec!["OIS test"]);

        let text = report.to_string();
        assert!(text.contains("Status: FAILED"));
        assert!(text.contains("2/3 passed"));
    }

    #[test]
    fn test_empty_report_is_valid() {
        let report = RepricingReport::new(Vec::new());
        assert!(report.is_valid());
        assert_eq!(report.rms_error(), 0.0);
    }
}
