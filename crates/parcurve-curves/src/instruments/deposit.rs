//! Money market deposit instrument.
//!
//! A deposit is the simplest instrument for curve bootstrap,
//! used for the short end of the curve (O/N to 12M).

use parcurve_core::calendars::Calendar;
use parcurve_core::Date;

use super::{percent, CurveInstrument, InstrumentKind, SimplePeriod};
use crate::conventions::{Maturity, MoneyMarketConventions};
use crate::error::CurveResult;
use crate::view::PillarView;

/// A money market deposit.
///
/// # Pricing Formula
///
/// The error is zero when:
/// ```text
/// DF(end) = DF(effective) / (1 + rate × τ)
/// ```
/// where τ is the year fraction on the deposit basis and the end date is
/// `effective + tenor` rolled by the payment adjustment.
///
/// # Example
///
/// ```rust
/// use parcurve_core::{Date, Tenor};
/// use parcurve_curves::prelude::*;
///
/// let effective = Date::from_ymd(2016, 3, 16).unwrap();
/// let deposit = Deposit::new(
///     effective,
///     Tenor::days(5),
///     -0.00293,
///     MoneyMarketConventions::default(),
/// )
/// .unwrap();
///
/// assert_eq!(deposit.maturity(), Date::from_ymd(2016, 3, 21).unwrap());
/// assert_eq!(deposit.description(), "Deposit -0.2930% 2016-03-16 to 2016-03-21");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Deposit {
    period: SimplePeriod,
    conventions: MoneyMarketConventions,
}

impl Deposit {
    /// Creates a deposit starting on `effective`.
    ///
    /// # Errors
    ///
    /// Fails if the adjusted end date is not after the effective date.
    pub fn new(
        effective: Date,
        maturity: impl Into<Maturity>,
        rate: f64,
        conventions: MoneyMarketConventions,
    ) -> CurveResult<Self> {
        let unadjusted = maturity.into().resolve(effective)?;
        let end = conventions
            .calendar
            .adjust(unadjusted, conventions.payment_adjustment);
        let period = SimplePeriod::new(effective, end, rate, &conventions)?;

        Ok(Self {
            period,
            conventions,
        })
    }

    /// Returns the effective date.
    #[must_use]
    pub fn effective_date(&self) -> Date {
        self.period.start
    }

    /// Returns the adjusted end date.
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

impl CurveInstrument for Deposit {
    fn maturity(&self) -> Date {
        self.period.end
    }

    fn rate(&self) -> f64 {
        self.period.rate
    }

    fn kind(&self) -> InstrumentKind {
        InstrumentKind::Deposit
    }

    fn description(&self) -> String {
        self.period.describe("Deposit", &percent(self.period.rate))
    }

    fn error(&self, candidate: f64, view: &PillarView<'_>) -> CurveResult<f64> {
        self.period.error(candidate, view)
    }

    fn implied_discount_factor(&self, view: &PillarView<'_>) -> Option<f64> {
        self.period.implied_discount_factor(view)
    }
}
