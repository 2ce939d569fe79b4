//! Forward Rate Agreement instrument.

use parcurve_core::calendars::Calendar;
use parcurve_core::Date;

use super::{percent, CurveInstrument, InstrumentKind, SimplePeriod};
use crate::conventions::{Maturity, MoneyMarketConventions};
use crate::error::CurveResult;
use crate::view::PillarView;

/// A Forward Rate Agreement.
///
/// Locks in a simple rate between two future dates:
/// ```text
/// DF(end) = DF(start) / (1 + rate × τ)
/// ```
/// `DF(start)` comes from the curve. When the start lies beyond the last
/// solved pillar it moves with the candidate, so the bootstrap solves it
/// iteratively instead of in closed form.
#[derive(Debug, Clone, PartialEq)]
pub struct ForwardRate {
    period: SimplePeriod,
    conventions: MoneyMarketConventions,
}

impl ForwardRate {
    /// Creates an FRA over `[start, end]`, with `end` given as a date or as a
    /// tenor from `start` and rolled by the payment adjustment.
    pub fn new(
        start: Date,
        end: impl Into<Maturity>,
        rate: f64,
        conventions: MoneyMarketConventions,
    ) -> CurveResult<Self> {
        let unadjusted = end.into().resolve(start)?;
        let end = conventions
            .calendar
            .adjust(unadjusted, conventions.payment_adjustment);
        let period = SimplePeriod::new(start, end, rate, &conventions)?;

        Ok(Self {
            period,
            conventions,
        })
    }

    /// Returns the start date.
    #[must_use]
    pub fn start_date(&self) -> Date {
        self.period.start
    }

    /// Returns the end date.
    #[must_use]
    pub fn end_date(&self) -> Date {
        self.period.end
    }

    /// Returns the accrual year fraction.
    #[must_use]
    pub fn year_fraction(&self) -> f64 {
        self.period.accrual
    }

    /// Returns the conventions.
    #[must_use]
    pub fn conventions(&self) -> &MoneyMarketConventions {
        &self.conventions
    }
}

impl CurveInstrument for ForwardRate {
    fn maturity(&self) -> Date {
        self.period.end
    }

    fn rate(&self) -> f64 {
        self.period.rate
    }

    fn kind(&self) -> InstrumentKind {
        InstrumentKind::ForwardRate
    }

    fn description(&self) -> String {
        self.period.describe("FRA", &percent(self.period.rate))
    }

    fn error(&self, candidate: f64, view: &PillarView<'_>) -> CurveResult<f64> {
        self.period.error(candidate, view)
    }

    fn implied_discount_factor(&self, view: &PillarView<'_>) -> Option<f64> {
        self.period.implied_discount_factor(view)
    }
}
