//! 30/360 conventions.
//!
//! Both variants assume 30-day months and a 360-day year; they differ only
//! in how a day-of-month of 31 is treated.

use rust_decimal::Decimal;

use super::DayCount;
use crate::types::Date;

fn thirty_360_days(start: Date, end: Date, d1: i64, d2: i64) -> i64 {
    let years = i64::from(end.year() - start.year());
    let months = i64::from(end.month()) - i64::from(start.month());
    360 * years + 30 * months + (d2 - d1)
}

/// 30/360 bond basis.
///
/// D1 is capped at 30; D2 is capped at 30 only when D1 ended up at 30.
/// This is the swap fixed-leg default.
///
/// ```text
/// days = 360·(Y2 − Y1) + 30·(M2 − M1) + (D2 − D1)
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Thirty360;

impl DayCount for Thirty360 {
    fn name(&self) -> &'static str {
        "30/360"
    }

    fn year_fraction(&self, start: Date, end: Date) -> Decimal {
        Decimal::from(self.day_count(start, end)) / Decimal::from(360)
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        let d1 = i64::from(start.day().min(30));
        let d2 = if d1 == 30 {
            i64::from(end.day().min(30))
        } else {
            i64::from(end.day())
        };
        thirty_360_days(start, end, d1, d2)
    }
}

/// 30E/360 (Eurobond basis).
///
/// A day-of-month of 31 becomes 30 on either date, unconditionally.
/// End of February is not adjusted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Thirty360E;

impl DayCount for Thirty360E {
    fn name(&self) -> &'static str {
        "30E/360"
    }

    fn year_fraction(&self, start: Date, end: Date) -> Decimal {
        Decimal::from(self.day_count(start, end)) / Decimal::from(360)
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        let d1 = i64::from(if start.day() == 31 { 30 } else { start.day() });
        let d2 = i64::from(if end.day() == 31 { 30 } else { end.day() });
        thirty_360_days(start, end, d1, d2)
    }
}
