//! Read-only discount curve snapshots.

use parcurve_core::daycounts::{DayCount, DayCountConvention};
use parcurve_core::Date;
use serde::{Deserialize, Serialize};

use crate::compounding::Compounding;
use crate::error::{CurveError, CurveResult};
use crate::interpolation::{curve_time, Discounting, InterpolationMethod, Pillar, PillarInterpolator};

/// An immutable discount curve over solved pillars.
///
/// Produced by [`Curve::snapshot`](crate::Curve::snapshot) once a bootstrap
/// has finished, or built directly from stored pillars. It can discount the
/// cash flows of another curve's term swaps.
///
/// # Example
///
/// ```rust
/// use parcurve_core::Date;
/// use parcurve_curves::prelude::*;
///
/// let val = Date::from_ymd(2016, 3, 16).unwrap();
/// let pillars = vec![
///     Pillar::new(val, 1.0),
///     Pillar::new(Date::from_ymd(2017, 3, 16).unwrap(), 0.99),
/// ];
/// let curve = DiscountCurve::new(val, pillars, InterpolationMethod::LogLinear).unwrap();
///
/// let df = curve.discount_factor(Date::from_ymd(2016, 9, 16).unwrap()).unwrap();
/// assert!(df < 1.0 && df > 0.99);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "DiscountCurveData", into = "DiscountCurveData")]
pub struct DiscountCurve {
    valuation_date: Date,
    method: InterpolationMethod,
    pillars: Vec<Pillar>,
    interpolator: PillarInterpolator,
}

/// Serialized form of a [`DiscountCurve`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscountCurveData {
    /// Valuation date.
    pub valuation_date: Date,
    /// Interpolation method.
    #[serde(default)]
    pub interpolation: InterpolationMethod,
    /// Pillars in date order.
    pub pillars: Vec<Pillar>,
}

impl DiscountCurve {
    /// Creates a snapshot from pillars sorted by date.
    pub fn new(
        valuation_date: Date,
        pillars: Vec<Pillar>,
        method: InterpolationMethod,
    ) -> CurveResult<Self> {
        let interpolator = PillarInterpolator::new(valuation_date, &pillars, method)?;
        Ok(Self {
            valuation_date,
            method,
            pillars,
            interpolator,
        })
    }

    /// Returns the valuation date.
    #[must_use]
    pub fn valuation_date(&self) -> Date {
        self.valuation_date
    }

    /// Returns the interpolation method.
    #[must_use]
    pub fn interpolation(&self) -> InterpolationMethod {
        self.method
    }

    /// Returns the pillars.
    #[must_use]
    pub fn pillars(&self) -> &[Pillar] {
        &self.pillars
    }

    /// Discount factor at `date`.
    pub fn discount_factor(&self, date: Date) -> CurveResult<f64> {
        self.check_date(date)?;
        Ok(self.interpolator.discount(date))
    }

    /// Zero rate to `date` in the given compounding, ACT/365F.
    ///
    /// At the valuation date itself this is the rate to the first pillar.
    pub fn zero_rate(&self, date: Date, compounding: Compounding) -> CurveResult<f64> {
        self.check_date(date)?;
        Ok(zero_rate_on(
            &self.interpolator,
            &self.pillars,
            self.valuation_date,
            date,
            compounding,
        ))
    }

    /// Simple forward rate between two dates on the given basis.
    pub fn forward_rate(&self, start: Date, end: Date, basis: DayCountConvention) -> CurveResult<f64> {
        self.check_date(start)?;
        let tau = basis.year_fraction_f64(start, end);
        if tau <= 0.0 {
            return Err(CurveError::invalid_instrument(format!(
                "forward period {start} to {end} is empty"
            )));
        }
        Ok((self.interpolator.discount(start) / self.interpolator.discount(end) - 1.0) / tau)
    }

    fn check_date(&self, date: Date) -> CurveResult<()> {
        if date < self.valuation_date {
            return Err(CurveError::DateBeforeValuation {
                date,
                valuation_date: self.valuation_date,
            });
        }
        Ok(())
    }
}

impl Discounting for DiscountCurve {
    fn discount(&self, date: Date) -> f64 {
        self.interpolator.discount(date)
    }
}

impl TryFrom<DiscountCurveData> for DiscountCurve {
    type Error = CurveError;

    fn try_from(data: DiscountCurveData) -> Result<Self, Self::Error> {
        Self::new(data.valuation_date, data.pillars, data.interpolation)
    }
}

impl From<DiscountCurve> for DiscountCurveData {
    fn from(curve: DiscountCurve) -> Self {
        Self {
            valuation_date: curve.valuation_date,
            interpolation: curve.method,
            pillars: curve.pillars,
        }
    }
}

/// Zero rate read off an interpolator. The valuation date borrows the rate
/// to the first pillar after it.
pub(crate) fn zero_rate_on(
    interpolator: &PillarInterpolator,
    pillars: &[Pillar],
    valuation_date: Date,
    date: Date,
    compounding: Compounding,
) -> f64 {
    let date = if date > valuation_date {
        date
    } else {
        match pillars.iter().find(|p| p.date > valuation_date) {
            Some(first) => first.date,
            None => return 0.0,
        }
    };
    let t = curve_time(valuation_date, date);
    compounding.zero_rate(interpolator.discount(date), t)
}
