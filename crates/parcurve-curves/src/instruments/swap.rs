//! Fixed against term rate swap instrument.

use parcurve_core::daycounts::DayCount;
use parcurve_core::schedule::Schedule;
use parcurve_core::Date;

use super::ois::last_payment;
use super::{percent, CurveInstrument, InstrumentKind};
use crate::conventions::{Leg, Maturity, SwapConventions};
use crate::error::{CurveError, CurveResult};
use crate::interpolation::Discounting;
use crate::view::PillarView;

/// Cash flow dates and accruals of one fixed period.
#[derive(Debug, Clone, Copy, PartialEq)]
struct FixedCashFlow {
    payment_date: Date,
    accrual: f64,
}

/// One floating period paying a term rate set on its fixing date.
#[derive(Debug, Clone, Copy, PartialEq)]
struct FloatingCashFlow {
    fixing_date: Date,
    rate_end: Date,
    rate_accrual: f64,
    accrual: f64,
    payment_date: Date,
}

/// A vanilla fixed against term rate (e.g. 6M LIBOR) swap.
///
/// # Pricing
///
/// ```text
/// fixed = Σ rate × τ_i × N × D(pay_i)
/// fwd_j = (P(fix_j) / P(fix_j + rate_length) - 1) / τ_rate
/// float = Σ fwd_j × τ_j × N × D(pay_j)
/// ```
/// `P` is the curve being built. `D` is the attached discount curve if the
/// curve has one, otherwise `P` itself.
///
/// # Example
///
/// ```rust
/// use parcurve_core::{Date, Tenor};
/// use parcurve_curves::prelude::*;
///
/// let conventions = SwapConventions::from_pairs([("fixed_length", "12"), ("float_length", "6")])
///     .unwrap();
/// let effective = Date::from_ymd(2016, 3, 16).unwrap();
/// let swap = TermSwap::new(effective, Tenor::years(5), 0.012, conventions).unwrap();
///
/// assert_eq!(swap.maturity(), Date::from_ymd(2021, 3, 16).unwrap());
/// assert_eq!(swap.description(), "Swap 1.2000% 2016-03-16 to 2021-03-16");
/// ```
#[derive(Debug, Clone)]
pub struct TermSwap {
    effective: Date,
    termination: Date,
    rate: f64,
    conventions: SwapConventions,
    fixed: Vec<FixedCashFlow>,
    float: Vec<FloatingCashFlow>,
    pillar: Date,
}

impl TermSwap {
    /// Creates a term swap. `maturity` is the unadjusted termination date or a
    /// tenor from `effective`.
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
        let fixed_schedule = conventions.schedule(Leg::Fixed, effective, termination)?;
        let float_schedule = conventions.schedule(Leg::Float, effective, termination)?;
        let pillar = last_payment(&fixed_schedule, &float_schedule)?;

        let fixed = fixed_cash_flows(&fixed_schedule, &conventions);
        let float = floating_cash_flows(&float_schedule, &conventions)?;

        Ok(Self {
            effective,
            termination,
            rate,
            conventions,
            fixed,
            float,
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

    /// Returns the fixing dates of the floating leg.
    #[must_use]
    pub fn fixing_dates(&self) -> Vec<Date> {
        self.float.iter().map(|cf| cf.fixing_date).collect()
    }

    /// Returns the conventions.
    #[must_use]
    pub fn conventions(&self) -> &SwapConventions {
        &self.conventions
    }
}

fn fixed_cash_flows(schedule: &Schedule, conventions: &SwapConventions) -> Vec<FixedCashFlow> {
    schedule
        .periods()
        .iter()
        .map(|p| FixedCashFlow {
            payment_date: p.payment_date,
            accrual: conventions
                .fixed_basis
                .year_fraction_f64(p.accrual_start, p.accrual_end),
        })
        .collect()
}

fn floating_cash_flows(
    schedule: &Schedule,
    conventions: &SwapConventions,
) -> CurveResult<Vec<FloatingCashFlow>> {
    let rate_length = conventions.rate_length.unwrap_or(conventions.float_length);

    schedule
        .periods()
        .iter()
        .map(|p| {
            let rate_end = rate_length.add_to(p.fixing_date)?;
            let rate_accrual = conventions.rate_basis.year_fraction_f64(p.fixing_date, rate_end);
            if rate_accrual <= 0.0 {
                return Err(CurveError::invalid_instrument(format!(
                    "term rate fixing on {} has an empty accrual period",
                    p.fixing_date
                )));
            }
            Ok(FloatingCashFlow {
                fixing_date: p.fixing_date,
                rate_end,
                rate_accrual,
                accrual: conventions
                    .float_basis
                    .year_fraction_f64(p.accrual_start, p.accrual_end),
                payment_date: p.payment_date,
            })
        })
        .collect()
}

impl CurveInstrument for TermSwap {
    fn maturity(&self) -> Date {
        self.pillar
    }

    fn rate(&self) -> f64 {
        self.rate
    }

    fn kind(&self) -> InstrumentKind {
        InstrumentKind::TermSwap
    }

    fn description(&self) -> String {
        format!("Swap {} {} to {}", percent(self.rate), self.effective, self.termination)
    }

    fn error(&self, candidate: f64, view: &PillarView<'_>) -> CurveResult<f64> {
        let curve = view.with_trial(self.pillar, candidate)?;
        let projection = curve.projection();
        let discounting = curve.discounting();
        let notional = self.conventions.notional;

        let fixed_pv: f64 = self
            .fixed
            .iter()
            .map(|cf| self.rate * cf.accrual * notional * discounting.discount(cf.payment_date))
            .sum();

        let float_pv: f64 = self
            .float
            .iter()
            .map(|cf| {
                let forward = (projection.discount(cf.fixing_date) / projection.discount(cf.rate_end)
                    - 1.0)
                    / cf.rate_accrual;
                forward * cf.accrual * notional * discounting.discount(cf.payment_date)
            })
            .sum();

        Ok(fixed_pv - float_pv)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discount::DiscountCurve;
    use crate::interpolation::{InterpolationMethod, Pillar};
    use approx::assert_relative_eq;
    use parcurve_core::Tenor;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    fn annual_conventions() -> SwapConventions {
        SwapConventions::from_pairs([
            ("fixed_length", "12"),
            ("float_length", "12"),
            ("fixed_basis", "act360"),
        ])
        .unwrap()
    }

    #[test]
    fn test_single_period_is_a_deposit() {
        let val = d(2016, 3, 16);
        let swap = TermSwap::new(val, Tenor::years(1), 0.01, annual_conventions()).unwrap();
        let pillars = [Pillar::new(val, 1.0)];
        let view = PillarView::new(val, &pillars, InterpolationMethod::LogLinear);

        let expected = 1.0 / (1.0 + 0.01 * 365.0 / 360.0);
        assert!(swap.error(expected, &view).unwrap().abs() < 1e-12);
    }

    #[test]
    fn test_rate_length_defaults_to_float_length() {
        let conventions = SwapConventions::from_pairs([("float_length", "3")]).unwrap();
        let swap = TermSwap::new(d(2016, 3, 16), Tenor::years(1), 0.01, conventions).unwrap();

        assert_eq!(swap.float.len(), 4);
        assert_eq!(swap.float[0].rate_end, d(2016, 6, 16));
        assert_eq!(swap.fixing_dates()[1], d(2016, 6, 16));
    }

    #[test]
    fn test_discounts_on_attached_curve() {
        let val = d(2016, 3, 16);
        let ois = DiscountCurve::new(
            val,
            vec![Pillar::new(val, 1.0), Pillar::new(d(2017, 3, 16), 0.998)],
            InterpolationMethod::LogLinear,
        )
        .unwrap();
        let swap = TermSwap::new(val, Tenor::years(1), 0.01, annual_conventions()).unwrap();
        let pillars = [Pillar::new(val, 1.0)];
        let view =
            PillarView::new(val, &pillars, InterpolationMethod::LogLinear).with_discount_curve(Some(&ois));

        // Forward only depends on the projection curve; discounting scales both legs
        let tau = 365.0 / 360.0;
        let candidate = 0.99;
        let forward = (1.0 / candidate - 1.0) / tau;
        let expected = 100.0 * 0.998 * tau * (0.01 - forward);
        assert_relative_eq!(swap.error(candidate, &view).unwrap(), expected, epsilon = 1e-10);

        let par = 1.0 / (1.0 + 0.01 * tau);
        assert!(swap.error(par, &view).unwrap().abs() < 1e-12);
    }
}
