//! The partially bootstrapped curve an instrument is solved against.

use parcurve_core::Date;

use crate::discount::DiscountCurve;
use crate::error::{CurveError, CurveResult};
use crate::interpolation::{Discounting, InterpolationMethod, Pillar, PillarInterpolator};

/// Solved pillars up to (but excluding) the instrument being solved.
///
/// Instruments never see pillars beyond their own maturity: the bootstrap
/// hands them a view over the prefix it has already solved.
#[derive(Debug, Clone, Copy)]
pub struct PillarView<'a> {
    valuation_date: Date,
    pillars: &'a [Pillar],
    method: InterpolationMethod,
    discount_curve: Option<&'a DiscountCurve>,
}

impl<'a> PillarView<'a> {
    /// Creates a view over solved pillars. `pillars[0]` is the valuation date.
    #[must_use]
    pub fn new(valuation_date: Date, pillars: &'a [Pillar], method: InterpolationMethod) -> Self {
        Self {
            valuation_date,
            pillars,
            method,
            discount_curve: None,
        }
    }

    /// Discounts term swap cash flows on a separate, already built curve.
    #[must_use]
    pub fn with_discount_curve(mut self, discount_curve: Option<&'a DiscountCurve>) -> Self {
        self.discount_curve = discount_curve;
        self
    }

    /// Returns the valuation date.
    #[must_use]
    pub fn valuation_date(&self) -> Date {
        self.valuation_date
    }

    /// Returns the solved pillars.
    #[must_use]
    pub fn pillars(&self) -> &'a [Pillar] {
        self.pillars
    }

    /// Returns the interpolation method.
    #[must_use]
    pub fn method(&self) -> InterpolationMethod {
        self.method
    }

    /// Returns the external discount curve, if any.
    #[must_use]
    pub fn discount_curve(&self) -> Option<&'a DiscountCurve> {
        self.discount_curve
    }

    /// Returns the latest solved pillar.
    #[must_use]
    pub fn last_pillar(&self) -> Option<&'a Pillar> {
        self.pillars.last()
    }

    /// Appends the trial pillar `(maturity, candidate)` and interpolates over
    /// the result.
    ///
    /// Every date strictly before `maturity` falls inside the knots; dates
    /// after it are extrapolated flat.
    pub fn with_trial(&self, maturity: Date, candidate: f64) -> CurveResult<TrialCurve<'a>> {
        if let Some(last) = self.last_pillar() {
            if maturity <= last.date {
                return Err(CurveError::invalid_instrument(format!(
                    "trial pillar {maturity} is not after the last solved pillar {}",
                    last.date
                )));
            }
        }

        let mut pillars = Vec::with_capacity(self.pillars.len() + 1);
        pillars.extend_from_slice(self.pillars);
        pillars.push(Pillar::new(maturity, candidate));

        Ok(TrialCurve {
            projection: PillarInterpolator::new(self.valuation_date, &pillars, self.method)?,
            discount_curve: self.discount_curve,
        })
    }

    /// Discount factor at `date` if it does not depend on the pillar being
    /// solved, or `None` otherwise.
    ///
    /// Known dates are the valuation date and earlier, solved pillar dates,
    /// and (for log-linear curves only) anything before the last solved pillar.
    pub fn known_discount_factor(&self, date: Date) -> Option<f64> {
        if date <= self.valuation_date {
            return Some(1.0);
        }
        if let Some(pillar) = self.pillars.iter().find(|p| p.date == date) {
            return Some(pillar.discount_factor);
        }

        let last = self.last_pillar()?;
        if self.method.is_global() || date > last.date {
            return None;
        }
        PillarInterpolator::new(self.valuation_date, self.pillars, self.method)
            .ok()
            .map(|interp| interp.discount(date))
    }
}

/// The curve under construction with a trial pillar appended.
#[derive(Debug, Clone)]
pub struct TrialCurve<'a> {
    projection: PillarInterpolator,
    discount_curve: Option<&'a DiscountCurve>,
}

impl TrialCurve<'_> {
    /// Discount factors of the curve being built, used to project rates.
    #[must_use]
    pub fn projection(&self) -> &PillarInterpolator {
        &self.projection
    }

    /// Discount factors used to present-value cash flows.
    ///
    /// This is the external discount curve when one is attached, otherwise
    /// the projection curve itself.
    #[must_use]
    pub fn discounting(&self) -> &dyn Discounting {
        match self.discount_curve {
            Some(curve) => curve,
            None => &self.projection,
        }
    }
}
