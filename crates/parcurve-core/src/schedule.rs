//! Swap leg schedule generation.
//!
//! Periods are rolled backward from the maturity date by a fixed tenor,
//! so any irregular period ends up at the front of the schedule:
//!
//! ```text
//! effective            maturity - 2T      maturity - T         maturity
//!     |---- short stub ----|------ T ---------|------ T -----------|
//! ```
//!
//! Each roll is computed from the maturity itself (`maturity - k·T`) rather
//! than from the previous date, so month-end maturities stay on month end.

use serde::{Deserialize, Serialize};

use crate::calendars::{BusinessDayConvention, Calendar, MarketCalendar};
use crate::error::{CoreError, CoreResult};
use crate::types::{Date, Tenor};

/// One accrual period of a leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulePeriod {
    /// Date the floating rate for the period is observed.
    pub fixing_date: Date,
    /// First day of accrual.
    pub accrual_start: Date,
    /// Last day of accrual (adjusted by the period convention).
    pub accrual_end: Date,
    /// Date the period's cash flow is paid.
    pub payment_date: Date,
}

/// An ordered list of accrual periods.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    periods: Vec<SchedulePeriod>,
}

impl Schedule {
    /// Starts building a schedule between two dates.
    #[must_use]
    pub fn builder(effective: Date, maturity: Date, tenor: Tenor) -> ScheduleBuilder {
        ScheduleBuilder::new(effective, maturity, tenor)
    }

    /// Returns the periods in date order.
    #[must_use]
    pub fn periods(&self) -> &[SchedulePeriod] {
        &self.periods
    }

    /// Number of periods.
    #[must_use]
    pub fn len(&self) -> usize {
        self.periods.len()
    }

    /// True if the schedule has no periods.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    /// Payment date of the last period.
    #[must_use]
    pub fn last_payment_date(&self) -> Option<Date> {
        self.periods.iter().map(|p| p.payment_date).max()
    }
}

/// Builder for [`Schedule`].
#[derive(Debug, Clone)]
pub struct ScheduleBuilder {
    effective: Date,
    maturity: Date,
    tenor: Tenor,
    period_adjustment: BusinessDayConvention,
    payment_adjustment: BusinessDayConvention,
    payment_lag: i32,
    fixing_lag: i32,
    stubs: Option<(Date, Date)>,
    calendar: MarketCalendar,
}

impl ScheduleBuilder {
    /// Creates a builder with unadjusted dates, no lags and a weekend calendar.
    #[must_use]
    pub fn new(effective: Date, maturity: Date, tenor: Tenor) -> Self {
        Self {
            effective,
            maturity,
            tenor,
            period_adjustment: BusinessDayConvention::Unadjusted,
            payment_adjustment: BusinessDayConvention::Unadjusted,
            payment_lag: 0,
            fixing_lag: 0,
            stubs: None,
            calendar: MarketCalendar::Weekends,
        }
    }

    /// Sets the adjustment applied to accrual period end dates.
    #[must_use]
    pub fn period_adjustment(mut self, convention: BusinessDayConvention) -> Self {
        self.period_adjustment = convention;
        self
    }

    /// Sets the adjustment applied to payment dates.
    #[must_use]
    pub fn payment_adjustment(mut self, convention: BusinessDayConvention) -> Self {
        self.payment_adjustment = convention;
        self
    }

    /// Sets the payment lag in business days after the period end.
    #[must_use]
    pub fn payment_lag(mut self, days: i32) -> Self {
        self.payment_lag = days;
        self
    }

    /// Sets the fixing lag in business days before the period start.
    #[must_use]
    pub fn fixing_lag(mut self, days: i32) -> Self {
        self.fixing_lag = days;
        self
    }

    /// Uses explicit second and penultimate roll dates (front and back stubs).
    #[must_use]
    pub fn stubs(mut self, second: Date, penultimate: Date) -> Self {
        self.stubs = Some((second, penultimate));
        self
    }

    /// Sets the calendar used for adjustments and lags.
    #[must_use]
    pub fn calendar(mut self, calendar: MarketCalendar) -> Self {
        self.calendar = calendar;
        self
    }

    /// Generates the schedule.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidSchedule` if the effective date is not before
    /// maturity, the tenor is not positive, or the stub dates are out of order.
    pub fn build(&self) -> CoreResult<Schedule> {
        if self.effective >= self.maturity {
            return Err(CoreError::invalid_schedule(format!(
                "effective date {} must be before maturity {}",
                self.effective, self.maturity
            )));
        }
        if self.tenor.count() <= 0 {
            return Err(CoreError::invalid_schedule(format!(
                "period tenor must be positive, got {}",
                self.tenor
            )));
        }

        let unadjusted_ends = match self.stubs {
            Some((second, penultimate)) => {
                if !(self.effective < second && second <= penultimate && penultimate < self.maturity) {
                    return Err(CoreError::invalid_schedule(format!(
                        "stub dates must satisfy effective < second <= penultimate < maturity \
                         (got {second}, {penultimate})"
                    )));
                }
                let mut ends = vec![second];
                ends.extend(roll_backward(second, penultimate, self.tenor)?);
                ends.push(self.maturity);
                ends.dedup();
                ends
            }
            None => roll_backward(self.effective, self.maturity, self.tenor)?,
        };

        let mut periods = Vec::with_capacity(unadjusted_ends.len());
        let mut accrual_start = self.effective;

        for end in unadjusted_ends {
            let accrual_end = self.calendar.adjust(end, self.period_adjustment);
            let fixing_date = self.calendar.adjust(
                self.calendar.add_business_days(accrual_start, -self.fixing_lag),
                BusinessDayConvention::Preceding,
            );
            let payment_date = self.calendar.add_business_days(
                self.calendar.adjust(end, self.payment_adjustment),
                self.payment_lag,
            );

            periods.push(SchedulePeriod {
                fixing_date,
                accrual_start,
                accrual_end,
                payment_date,
            });
            accrual_start = accrual_end;
        }

        Ok(Schedule { periods })
    }
}

/// Unadjusted roll dates `end - k·tenor` strictly after `start`, in ascending order.
fn roll_backward(start: Date, end: Date, tenor: Tenor) -> CoreResult<Vec<Date>> {
    let mut dates = Vec::new();
    let mut current = end;
    let mut step = 0;

    while current > start {
        dates.push(current);
        step += 1;
        current = tenor.scaled(-step).add_to(end)?;
    }

    dates.reverse();
    Ok(dates)
}
