//! Overnight Index Swap instrument.

use parcurve_core::calendars::{BusinessDayConvention, Calendar, MarketCalendar};
use parcurve_core::daycounts::DayCount;
use parcurve_core::schedule::Schedule;
use parcurve_core::types::TenorUnit;
use parcurve_core::{Date, Tenor};

use super::{percent, CurveInstrument, InstrumentKind};
use crate::conventions::{Leg, Maturity, SwapConventions};
use crate::error::{CurveError, CurveResult};
use crate::interpolation::Discounting;
use crate::view::PillarView;

/// A fixed against compounded overnight rate swap.
///
/// # Pricing
///
/// ```text
/// fixed = Σ rate × τ_i × N × DF(pay_i)
/// float = Σ N × (Π DF(d_j) / DF(d_j+1) - 1) × DF(pay_i)
/// ```
/// where `d_j` are the compounding dates of floating period `i`: every
/// business day for a `1D` rate length, every `n` business days for `nD`,
/// otherwise steps of the rate length rolled following. Both legs discount
/// on the curve being built.
#[derive(Debug, Clone)]
pub struct OvernightIndexSwap {
    effective: Date,
    termination: Date,
    rate: f64,
    conventions: SwapConventions,
    fixed: Schedule,
    float: Schedule,
    compounding_dates: Vec<Vec<Date>>,
    pillar: Date,
}

impl OvernightIndexSwap {
    /// Creates an OIS. `maturity` is the unadjusted termination date or a
    /// tenor from `effective`.
    ///
    /// # Errors
    ///
    /// Fails on an empty or inconsistent schedule, or a non-positive rate length.
    pub fn new(
        effective: Date,
        maturity: impl Into<Maturity>,
        rate: f64,
        conventions: SwapConventions,
    ) -> CurveResult<Self> {
        if !rate.is_finite() {
            return Err(CurveError::invalid_instrument(format!("rate {rate} is not finite")));
        }
        let termination = maturity.into().resolve(effective)?;
        let fixed = conventions.schedule(Leg::Fixed, effective, termination)?;
        let float = conventions.schedule(Leg::Float, effective, termination)?;

        let step = conventions.rate_length.unwrap_or(Tenor::days(1));
        if step.count() <= 0 {
            return Err(CurveError::invalid_instrument(format!(
                "OIS rate length must be positive, got {step}"
            )));
        }
        let compounding_dates = float
            .periods()
            .iter()
            .map(|p| compounding_dates(p.accrual_start, p.accrual_end, step, &conventions.calendar))
            .collect::<CurveResult<Vec<_>>>()?;

        let pillar = last_payment(&fixed, &float)?;

        Ok(Self {
            effective,
            termination,
            rate,
            conventions,
            fixed,
            float,
            compounding_dates,
            pillar,
        })
    }

    /// Returns the effective date.
    #[must_use]
    pub fn effective_date(&self) -> Date {
        self.effective
    }

    /// Returns the unadjusted termination date.
    #[must_use]
    pub fn termination_date(&self) -> Date {
        self.termination
    }

    /// Returns the fixed leg schedule.
    #[must_use]
    pub fn fixed_schedule(&self) -> &Schedule {
        &self.fixed
    }

    /// Returns the floating leg schedule.
    #[must_use]
    pub fn float_schedule(&self) -> &Schedule {
        &self.float
    }

    /// Returns the conventions.
    #[must_use]
    pub fn conventions(&self) -> &SwapConventions {
        &self.conventions
    }
}

impl CurveInstrument for OvernightIndexSwap {
    fn maturity(&self) -> Date {
        self.pillar
    }

    fn rate(&self) -> f64 {
        self.rate
    }

    fn kind(&self) -> InstrumentKind {
        InstrumentKind::OvernightIndexSwap
    }

    fn description(&self) -> String {
        format!("OIS {} {} to {}", percent(self.rate), self.effective, self.termination)
    }

    fn error(&self, candidate: f64, view: &PillarView<'_>) -> CurveResult<f64> {
        let curve = view.with_trial(self.pillar, candidate)?;
        let df = curve.projection();
        let notional = self.conventions.notional;

        let fixed_pv: f64 = self
            .fixed
            .periods()
            .iter()
            .map(|p| {
                let tau = self.conventions.fixed_basis.year_fraction_f64(p.accrual_start, p.accrual_end);
                self.rate * tau * notional * df.discount(p.payment_date)
            })
            .sum();

        let float_pv: f64 = self
            .float
            .periods()
            .iter()
            .zip(&self.compounding_dates)
            .map(|(p, dates)| {
                let growth: f64 = dates
                    .windows(2)
                    .map(|w| df.discount(w[0]) / df.discount(w[1]))
                    .product();
                notional * (growth - 1.0) * df.discount(p.payment_date)
            })
            .sum();

        Ok(fixed_pv - float_pv)
    }
}

/// Compounding dates from `start` to `end` inclusive.
pub(crate) fn compounding_dates(
    start: Date,
    end: Date,
    step: Tenor,
    calendar: &MarketCalendar,
) -> CurveResult<Vec<Date>> {
    let mut dates = vec![start];
    let mut current = start;

    loop {
        let next = match step.unit() {
            TenorUnit::Days => calendar.add_business_days(current, step.count()),
            _ => calendar.adjust(step.add_to(current)?, BusinessDayConvention::Following),
        };
        if next >= end {
            dates.push(end);
            return Ok(dates);
        }
        dates.push(next);
        current = next;
    }
}

/// Latest payment date across both legs.
pub(crate) fn last_payment(fixed: &Schedule, float: &Schedule) -> CurveResult<Date> {
    fixed
        .last_payment_date()
        .into_iter()
        .chain(float.last_payment_date())
        .max()
        .ok_or_else(|| CurveError::invalid_instrument("swap has no cash flows"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpolation::{InterpolationMethod, Pillar};
    use approx::assert_relative_eq;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_daily_compounding_skips_weekends() {
        // Friday to the following Wednesday
        let dates =
            compounding_dates(d(2016, 3, 18), d(2016, 3, 23), Tenor::days(1), &MarketCalendar::Weekends)
                .unwrap();
        assert_eq!(
            dates,
            vec![d(2016, 3, 18), d(2016, 3, 21), d(2016, 3, 22), d(2016, 3, 23)]
        );
    }

    #[test]
    fn test_monthly_compounding_rolls_following() {
        let dates = compounding_dates(
            d(2016, 1, 15),
            d(2016, 4, 15),
            Tenor::months(1),
            &MarketCalendar::Weekends,
        )
        .unwrap();
        // 2016-02-15 is a Monday, 2016-03-15 a Tuesday
        assert_eq!(dates, vec![d(2016, 1, 15), d(2016, 2, 15), d(2016, 3, 15), d(2016, 4, 15)]);
    }

    #[test]
    fn test_pillar_is_last_payment() {
        let conventions = SwapConventions::from_pairs([
            ("fixed_length", "12"),
            ("float_length", "12"),
            ("fixed_payment_lag", "2"),
            ("float_payment_lag", "2"),
        ])
        .unwrap();
        let ois = OvernightIndexSwap::new(d(2016, 3, 16), Tenor::years(1), 0.004, conventions).unwrap();

        assert_eq!(ois.termination_date(), d(2017, 3, 16));
        assert_eq!(ois.maturity(), d(2017, 3, 20));
        assert_eq!(ois.description(), "OIS 0.4000% 2016-03-16 to 2017-03-16");
    }

    #[test]
    fn test_single_period_matches_closed_form() {
        // One annual period, no lags: fixed r·τ·DF(T), float 1/DF(T) - 1 times DF(T)
        let conventions = SwapConventions::from_pairs([
            ("fixed_length", "12"),
            ("float_length", "12"),
            ("fixed_basis", "act360"),
        ])
        .unwrap();
        let val = d(2016, 3, 16);
        let ois = OvernightIndexSwap::new(val, Tenor::years(1), 0.005, conventions).unwrap();
        let pillars = [Pillar::new(val, 1.0)];
        let view = PillarView::new(val, &pillars, InterpolationMethod::LogLinear);

        let tau = 365.0 / 360.0;
        let expected = 1.0 / (1.0 + 0.005 * tau);
        assert!(ois.error(expected, &view).unwrap().abs() < 1e-10);
        assert_relative_eq!(
            ois.error(0.99, &view).unwrap(),
            100.0 * (0.005 * tau * 0.99 - (1.0 - 0.99)),
            epsilon = 1e-10
        );
    }
}
