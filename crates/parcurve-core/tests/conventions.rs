//! Cross-module checks for dates, day counts, calendars and schedules.

use approx::assert_relative_eq;
use proptest::prelude::*;

use parcurve_core::prelude::*;

fn d(y: i32, m: u32, day: u32) -> Date {
    Date::from_ymd(y, m, day).unwrap()
}

#[test]
fn money_market_year_fractions() {
    let start = d(2016, 3, 16);
    let end = Tenor::months(3).add_to(start).unwrap();

    assert_eq!(end, d(2016, 6, 16));
    assert_relative_eq!(
        DayCountConvention::Act360.year_fraction_f64(start, end),
        92.0 / 360.0,
        epsilon = 1e-15
    );
    assert_relative_eq!(
        DayCountConvention::Act365Fixed.year_fraction_f64(start, end),
        92.0 / 365.0,
        epsilon = 1e-15
    );
}

#[test]
fn fixed_leg_schedule_with_conventions() {
    let effective = d(2016, 3, 16);
    let maturity = Tenor::years(1).add_to(effective).unwrap();
    let calendar: MarketCalendar = "weekends".parse().unwrap();
    let adjustment: BusinessDayConvention = "modified following".parse().unwrap();

    let schedule = Schedule::builder(effective, maturity, Tenor::months(6))
        .period_adjustment(adjustment)
        .payment_adjustment(adjustment)
        .calendar(calendar.clone())
        .build()
        .unwrap();

    let dc: DayCountConvention = "30/360".parse().unwrap();
    let total: f64 = schedule
        .periods()
        .iter()
        .map(|p| dc.year_fraction_f64(p.accrual_start, p.accrual_end))
        .sum();

    assert_relative_eq!(total, 1.0, epsilon = 1e-12);
    for period in schedule.periods() {
        assert!(calendar.is_business_day(period.payment_date));
    }
}

#[test]
fn futures_dates_from_imm_code() {
    let start = imm_date("H19").unwrap();
    let end = Tenor::months(3).add_to(start).unwrap();

    assert_eq!(start, d(2019, 3, 20));
    assert_eq!(end, d(2019, 6, 20));
}

proptest! {
    #[test]
    fn schedule_periods_are_contiguous(
        offset in 1i64..4000,
        months in prop::sample::select(vec![1, 3, 6, 12]),
    ) {
        let effective = d(2016, 1, 4);
        let maturity = effective.add_days(offset);
        let schedule = Schedule::builder(effective, maturity, Tenor::months(months))
            .build()
            .unwrap();

        let periods = schedule.periods();
        prop_assert!(!periods.is_empty());
        prop_assert_eq!(periods[0].accrual_start, effective);
        prop_assert_eq!(periods[periods.len() - 1].accrual_end, maturity);
        for pair in periods.windows(2) {
            prop_assert_eq!(pair[0].accrual_end, pair[1].accrual_start);
            prop_assert!(pair[0].accrual_start < pair[0].accrual_end);
        }
    }

    #[test]
    fn adjusted_dates_are_business_days(offset in 0i64..3650) {
        let date = d(2016, 1, 1).add_days(offset);
        for convention in [
            BusinessDayConvention::Following,
            BusinessDayConvention::ModifiedFollowing,
            BusinessDayConvention::Preceding,
            BusinessDayConvention::ModifiedPreceding,
        ] {
            let adjusted = MarketCalendar::Weekends.adjust(date, convention);
            prop_assert!(!adjusted.is_weekend());
            prop_assert!((adjusted - date).abs() <= 3);
        }
    }

    #[test]
    fn act365_is_additive(a in 0i64..5000, b in 0i64..5000) {
        let base = d(2000, 1, 1);
        let mid = base.add_days(a.min(b));
        let end = base.add_days(a.max(b));
        let dc = DayCountConvention::Act365Fixed;

        prop_assert!(
            (dc.year_fraction_f64(base, mid) + dc.year_fraction_f64(mid, end)
                - dc.year_fraction_f64(base, end)).abs() < 1e-12
        );
    }
}
