//! Futures settling on a compounded overnight rate (e.g. 3M SOFR).

use parcurve_core::calendars::Calendar;
use parcurve_core::types::imm_date;
use parcurve_core::{Date, Tenor};

use super::future::price_to_rate;
use super::ois::compounding_dates;
use super::{CurveInstrument, InstrumentKind, SimplePeriod};
use crate::conventions::{Maturity, MoneyMarketConventions};
use crate::error::{CurveError, CurveResult};
use crate::interpolation::Discounting;
use crate::view::PillarView;

/// A future whose final settlement compounds the overnight rate daily over
/// the contract period.
///
/// # Pricing
///
/// ```text
/// error = N × DF(end) × (r × τ - (Π DF(d_j) / DF(d_j+1) - 1))
/// ```
/// where `d_j` are the business days from the IMM start to the contract end.
/// The product telescopes to `DF(start) / DF(end)`, so a known start gives
/// the discount factor at the end in closed form.
///
/// # Example
///
/// ```rust
/// use parcurve_core::{Date, Tenor};
/// use parcurve_curves::prelude::*;
///
/// let future =
///     CompoundFuture::from_imm("U19", Tenor::months(3), 98.0, MoneyMarketConventions::default())
///         .unwrap();
///
/// assert_eq!(future.start_date(), Date::from_ymd(2019, 9, 18).unwrap());
/// assert_eq!(future.description(), "Compound future 98.0000 2019-09-18 to 2019-12-18");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CompoundFuture {
    price: f64,
    period: SimplePeriod,
    compounding_dates: Vec<Date>,
    conventions: MoneyMarketConventions,
}

impl CompoundFuture {
    /// Creates a compounded future over `[start, end]` from its price.
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
        let compounding_dates =
            compounding_dates(start, end, Tenor::days(1), &conventions.calendar)?;

        Ok(Self {
            price,
            period,
            compounding_dates,
            conventions,
        })
    }

    /// Creates a compounded future starting on the IMM date of `code`.
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

    /// Business days the overnight rate compounds over, both ends included.
    #[must_use]
    pub fn compounding_dates(&self) -> &[Date] {
        &self.compounding_dates
    }

    /// Returns the conventions.
    #[must_use]
    pub fn conventions(&self) -> &MoneyMarketConventions {
        &self.conventions
    }
}

impl CurveInstrument for CompoundFuture {
    fn maturity(&self) -> Date {
        self.period.end
    }

    fn rate(&self) -> f64 {
        self.period.rate
    }

    fn kind(&self) -> InstrumentKind {
        InstrumentKind::CompoundFuture
    }

    fn description(&self) -> String {
        self.period
            .describe("Compound future", &format!("{:.4}", self.price))
    }

    fn error(&self, candidate: f64, view: &PillarView<'_>) -> CurveResult<f64> {
        let curve = view.with_trial(self.period.end, candidate)?;
        let df = curve.projection();

        let growth: f64 = self
            .compounding_dates
            .windows(2)
            .map(|w| df.discount(w[0]) / df.discount(w[1]))
            .product();

        let quoted = self.period.rate * self.period.accrual;
        Ok(self.period.notional * candidate * (quoted - (growth - 1.0)))
    }

    fn implied_discount_factor(&self, view: &PillarView<'_>) -> Option<f64> {
        self.period.implied_discount_factor(view)
    }
}
