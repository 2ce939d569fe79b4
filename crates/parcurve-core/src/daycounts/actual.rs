//! Actual-day conventions: ACT/360 and ACT/365 Fixed.

use rust_decimal::Decimal;

use super::DayCount;
use crate::types::Date;

/// Actual/360.
///
/// Money market basis: actual days over a 360-day year. Used for deposits,
/// FRAs, futures and most floating legs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Act360;

impl DayCount for Act360 {
    fn name(&self) -> &'static str {
        "ACT/360"
    }

    fn year_fraction(&self, start: Date, end: Date) -> Decimal {
        Decimal::from(self.day_count(start, end)) / Decimal::from(360)
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        start.days_between(&end)
    }
}

/// Actual/365 Fixed.
///
/// Actual days over a fixed 365-day year, leap years included. Also the
/// time axis used for curve interpolation and zero rates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Act365Fixed;

impl DayCount for Act365Fixed {
    fn name(&self) -> &'static str {
        "ACT/365F"
    }

    fn year_fraction(&self, start: Date, end: Date) -> Decimal {
        Decimal::from(self.day_count(start, end)) / Decimal::from(365)
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        start.days_between(&end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_act360_quarter() {
        let start = Date::from_ymd(2025, 1, 1).unwrap();
        let end = Date::from_ymd(2025, 4, 1).unwrap();

        assert_eq!(Act360.day_count(start, end), 90);
        assert_eq!(Act360.year_fraction(start, end), dec!(0.25));
    }

    #[test]
    fn test_act360_five_days() {
        let start = Date::from_ymd(2016, 3, 14).unwrap();
        let end = start.add_days(5);
        assert_eq!(Act360.year_fraction(start, end), dec!(5) / dec!(360));
    }

    #[test]
    fn test_act365_leap_year() {
        let start = Date::from_ymd(2024, 1, 1).unwrap();
        let end = Date::from_ymd(2025, 1, 1).unwrap();

        assert_eq!(Act365Fixed.day_count(start, end), 366);
        assert_eq!(Act365Fixed.year_fraction(start, end), dec!(366) / dec!(365));
    }

    #[test]
    fn test_negative_period() {
        let start = Date::from_ymd(2025, 4, 1).unwrap();
        let end = Date::from_ymd(2025, 1, 1).unwrap();
        assert_eq!(Act360.year_fraction(start, end), dec!(-0.25));
    }
}
