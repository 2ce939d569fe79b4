//! Interest rate futures.
//!
//! Futures are quoted as `100 - rate` and treated like an FRA over the
//! contract period. No convexity adjustment is applied.

use parcurve_core::calendars::Calendar;
use parcurve_core::types::imm_date;
use parcurve_core::{Date, Tenor};

use super::{CurveInstrument, InstrumentKind, SimplePeriod};
use crate::conventions::{Maturity, MoneyMarketConventions};
use crate::error::{CurveError, CurveResult};
use crate::view::PillarView;

/// An interest rate future.
///
/// # Example
///
/// ```rust
/// use parcurve_core::{Date, Tenor};
/// use parcurve_curves::prelude::*;
///
/// let future = Future::from_imm("H19", Tenor::months(3), 97.25, MoneyMarketConventions::default())
///     .unwrap();
///
/// assert_eq!(future.start_date(), Date::from_ymd(2019, 3, 20).unwrap());
/// assert_eq!(future.maturity(), Date::from_ymd(2019, 6, 20).unwrap());
/// assert!((future.rate() - 0.0275).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Future {
    price: f64,
    period: SimplePeriod,
    conventions: MoneyMarketConventions,
}

impl Future {
    /// Creates a future over `[start, end]` from its price.
    pub fn new(
        start: Date,
        end: impl Into<Maturity>,
        price: f64,
        conventions: MoneyMarketConventions,
    ) -> CurveResult<Self> {
        if !(price.is_finite() && price > 0.0) {
            return Err(CurveError::invalid_instrument(format!(
                "future price must be positive, got {price}"
            )));
        }
        let unadjusted = end.into().resolve(start)?;
        let end = conventions
            .calendar
            .adjust(unadjusted, conventions.payment_adjustment);
        let period = SimplePeriod::new(start, end, price_to_rate(price), &conventions)?;

        Ok(Self {
            price,
            period,
            conventions,
        })
    }

    /// Creates a future starting on the IMM date of a contract code such as
    /// `"H19"` and running for `tenor`.
    pub fn from_imm(
        code: &str,
        tenor: Tenor,
        price: f64,
        conventions: MoneyMarketConventions,
    ) -> CurveResult<Self> {
        let start = imm_date(code)?;
        Self::new(start, tenor, price, conventions)
    }

    /// Returns the quoted price.
    #[must_use]
    pub fn price(&self) -> f64 {
        self.price
    }

    /// Returns the contract start date.
    #[must_use]
    pub fn start_date(&self) -> Date {
        self.period.start
    }

    /// Returns the contract end date.
    #[must_use]
    pub fn end_date(&self) -> Date {
        self.period.end
    }

    /// Returns the conventions.
    #[must_use]
    pub fn conventions(&self) -> &MoneyMarketConventions {
        &self.conventions
    }
}

/// Converts a futures price to a decimal rate.
#[must_use]
pub fn price_to_rate(price: f64) -> f64 {
    (100.0 - price) / 100.0
}

impl CurveInstrument for Future {
    fn maturity(&self) -> Date {
        self.period.end
    }

    fn rate(&self) -> f64 {
        self.period.rate
    }

    fn kind(&self) -> InstrumentKind {
        InstrumentKind::Future
    }

    fn description(&self) -> String {
        self.period.describe("Future", &format!("{:.4}", self.price))
    }

    fn error(&self, candidate: f64, view: &PillarView<'_>) -> CurveResult<f64> {
        self.period.error(candidate, view)
    }

    fn implied_discount_factor(&self, view: &PillarView<'_>) -> Option<f64> {
        self.period.implied_discount_factor(view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_price_to_rate() {
        assert_relative_eq!(price_to_rate(99.5), 0.005, epsilon = 1e-12);
        assert_relative_eq!(price_to_rate(100.25), -0.0025, epsilon = 1e-12);
    }

    #[test]
    fn test_description() {
        let future = Future::from_imm("M16", Tenor::months(3), 99.5, MoneyMarketConventions::default())
            .unwrap();
        assert_eq!(future.description(), "Future 99.5000 2016-06-15 to 2016-09-15");
        assert_eq!(future.kind(), InstrumentKind::Future);
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(Future::from_imm("X99Z", Tenor::months(3), 99.5, MoneyMarketConventions::default()).is_err());
        assert!(Future::from_imm("M16", Tenor::months(3), f64::NAN, MoneyMarketConventions::default()).is_err());
    }
}
