//! Float against float basis swaps in a single currency.
//!
//! Leg one floats on the curve being built and leg two on the attached
//! discount curve, which also discounts both legs. The quoted spread is paid
//! on leg two:
//!
//! ```text
//! error = Σ (idx2_j + s) × τ_j × N × D(pay_j) - Σ (idx1_i + s1) × τ_i × N × D(pay_i)
//! ```
//!
//! | Style | Leg one index | Leg two index |
//! |-------|---------------|---------------|
//! | [`BasisSwapStyle::AverageIndex`]  | term rate              | average overnight rate |
//! | [`BasisSwapStyle::CompoundIndex`] | compounded overnight   | compounded overnight   |

use std::fmt;

use parcurve_core::calendars::MarketCalendar;
use parcurve_core::daycounts::DayCount;
use parcurve_core::schedule::Schedule;
use parcurve_core::{Date, Tenor};
use serde::{Deserialize, Serialize};

use super::ois::{compounding_dates, last_payment};
use super::{percent, CurveInstrument, InstrumentKind};
use crate::conventions::{BasisLeg, BasisSwapConventions, LegConventions, Maturity};
use crate::error::{CurveError, CurveResult};
use crate::interpolation::Discounting;
use crate::view::PillarView;

/// How each leg of a basis swap sets its rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BasisSwapStyle {
    /// Term rate (e.g. 3M LIBOR) against the arithmetic average of an
    /// overnight rate (e.g. Fed funds).
    AverageIndex,
    /// Compounded overnight rate against another compounded overnight rate
    /// (e.g. SOFR against Fed funds).
    CompoundIndex,
}

impl BasisSwapStyle {
    fn index(self, leg: BasisLeg) -> IndexStyle {
        match (self, leg) {
            (BasisSwapStyle::AverageIndex, BasisLeg::One) => IndexStyle::Term,
            (BasisSwapStyle::AverageIndex, BasisLeg::Two) => IndexStyle::Average,
            (BasisSwapStyle::CompoundIndex, _) => IndexStyle::Compound,
        }
    }
}

impl fmt::Display for BasisSwapStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BasisSwapStyle::AverageIndex => write!(f, "Average index basis"),
            BasisSwapStyle::CompoundIndex => write!(f, "Compound index basis"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IndexStyle {
    Term,
    Average,
    Compound,
}

/// How the index of one period is read off a curve.
#[derive(Debug, Clone, PartialEq)]
enum Fixing {
    /// Simple forward from the fixing date over the index term.
    Term { start: Date, end: Date, accrual: f64 },
    /// Daily overnight forwards, averaged weighted by their accruals.
    Average { dates: Vec<Date>, accruals: Vec<f64> },
    /// Daily overnight forwards compounded over the period.
    Compound { dates: Vec<Date>, accrual: f64 },
}

impl Fixing {
    fn rate(&self, curve: &dyn Discounting) -> f64 {
        match self {
            Fixing::Term {
                start,
                end,
                accrual,
            } => (curve.discount(*start) / curve.discount(*end) - 1.0) / accrual,
            Fixing::Average { dates, accruals } => {
                // Σ f_j·τ_j, where each daily forward is f_j = (DF_j / DF_j+1 - 1) / τ_j
                let weighted: f64 = dates
                    .windows(2)
                    .map(|w| curve.discount(w[0]) / curve.discount(w[1]) - 1.0)
                    .sum();
                weighted / accruals.iter().sum::<f64>()
            }
            Fixing::Compound { dates, accrual } => {
                let growth: f64 = dates
                    .windows(2)
                    .map(|w| curve.discount(w[0]) / curve.discount(w[1]))
                    .product();
                (growth - 1.0) / accrual
            }
        }
    }
}

/// One floating period of a basis swap leg.
#[derive(Debug, Clone, PartialEq)]
struct FloatPeriod {
    fixing: Fixing,
    accrual: f64,
    payment_date: Date,
}

fn leg_periods(
    schedule: &Schedule,
    style: IndexStyle,
    leg: &LegConventions,
    calendar: &MarketCalendar,
) -> CurveResult<Vec<FloatPeriod>> {
    schedule
        .periods()
        .iter()
        .map(|p| {
            let fixing = match style {
                IndexStyle::Term => {
                    let rate_length = leg.rate_length.unwrap_or(leg.length);
                    let end = rate_length.add_to(p.fixing_date)?;
                    let accrual = leg.rate_basis.year_fraction_f64(p.fixing_date, end);
                    if accrual <= 0.0 {
                        return Err(CurveError::invalid_instrument(format!(
                            "term rate fixing on {} has an empty accrual period",
                            p.fixing_date
                        )));
                    }
                    Fixing::Term {
                        start: p.fixing_date,
                        end,
                        accrual,
                    }
                }
                IndexStyle::Average | IndexStyle::Compound => {
                    let step = leg.rate_length.unwrap_or(Tenor::days(1));
                    let dates = compounding_dates(p.accrual_start, p.accrual_end, step, calendar)?;
                    if style == IndexStyle::Average {
                        let accruals = dates
                            .windows(2)
                            .map(|w| leg.rate_basis.year_fraction_f64(w[0], w[1]))
                            .collect();
                        Fixing::Average { dates, accruals }
                    } else {
                        let accrual = leg.rate_basis.year_fraction_f64(p.accrual_start, p.accrual_end);
                        Fixing::Compound { dates, accrual }
                    }
                }
            };
            Ok(FloatPeriod {
                fixing,
                accrual: leg.basis.year_fraction_f64(p.accrual_start, p.accrual_end),
                payment_date: p.payment_date,
            })
        })
        .collect()
}

/// A single-currency float against float swap quoted as a spread on leg two.
///
/// # Example
///
/// ```rust
/// use parcurve_core::{Date, Tenor};
/// use parcurve_curves::prelude::*;
///
/// let effective = Date::from_ymd(2016, 3, 16).unwrap();
/// let swap = BasisSwap::new(
///     BasisSwapStyle::AverageIndex,
///     effective,
///     Tenor::years(2),
///     0.0025,
///     BasisSwapConventions::default(),
/// )
/// .unwrap();
///
/// assert_eq!(swap.maturity(), Date::from_ymd(2018, 3, 16).unwrap());
/// assert_eq!(swap.description(), "Average index basis 0.2500% 2016-03-16 to 2018-03-16");
/// ```
#[derive(Debug, Clone)]
pub struct BasisSwap {
    style: BasisSwapStyle,
    effective: Date,
    termination: Date,
    spread: f64,
    conventions: BasisSwapConventions,
    leg_one: Vec<FloatPeriod>,
    leg_two: Vec<FloatPeriod>,
    pillar: Date,
}

impl BasisSwap {
    /// Creates a basis swap. `spread` is the quote paid on leg two.
    pub fn new(
        style: BasisSwapStyle,
        effective: Date,
        maturity: impl Into<Maturity>,
        spread: f64,
        conventions: BasisSwapConventions,
    ) -> CurveResult<Self> {
        if !spread.is_finite() {
            return Err(CurveError::invalid_instrument(format!("spread {spread} is not finite")));
        }
        let termination = maturity.into().resolve(effective)?;
        let one = conventions.schedule(BasisLeg::One, effective, termination)?;
        let two = conventions.schedule(BasisLeg::Two, effective, termination)?;
        let pillar = last_payment(&one, &two)?;

        let leg_one = leg_periods(
            &one,
            style.index(BasisLeg::One),
            &conventions.leg_one,
            &conventions.calendar,
        )?;
        let leg_two = leg_periods(
            &two,
            style.index(BasisLeg::Two),
            &conventions.leg_two,
            &conventions.calendar,
        )?;

        Ok(Self {
            style,
            effective,
            termination,
            spread,
            conventions,
            leg_one,
            leg_two,
            pillar,
        })
    }

    /// Returns the style.
    #[must_use]
    pub fn style(&self) -> BasisSwapStyle {
        self.style
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

    /// Returns the conventions.
    #[must_use]
    pub fn conventions(&self) -> &BasisSwapConventions {
        &self.conventions
    }

    fn leg_pv(
        &self,
        periods: &[FloatPeriod],
        spread: f64,
        projection: &dyn Discounting,
        discounting: &dyn Discounting,
    ) -> f64 {
        periods
            .iter()
            .map(|p| {
                let rate = p.fixing.rate(projection) + spread;
                rate * p.accrual * self.conventions.notional * discounting.discount(p.payment_date)
            })
            .sum()
    }
}

impl CurveInstrument for BasisSwap {
    fn maturity(&self) -> Date {
        self.pillar
    }

    fn rate(&self) -> f64 {
        self.spread
    }

    fn kind(&self) -> InstrumentKind {
        InstrumentKind::BasisSwap
    }

    fn description(&self) -> String {
        format!(
            "{} {} {} to {}",
            self.style,
            percent(self.spread),
            self.effective,
            self.termination
        )
    }

    fn error(&self, candidate: f64, view: &PillarView<'_>) -> CurveResult<f64> {
        let reference = view.discount_curve().ok_or_else(|| {
            CurveError::invalid_instrument(format!(
                "{} needs an attached discount curve for leg two",
                self.description()
            ))
        })?;
        let curve = view.with_trial(self.pillar, candidate)?;
        let discounting = curve.discounting();

        let one = self.leg_pv(
            &self.leg_one,
            self.conventions.leg_one.spread,
            curve.projection(),
            discounting,
        );
        let two = self.leg_pv(&self.leg_two, self.spread, reference, discounting);

        Ok(two - one)
    }
}
