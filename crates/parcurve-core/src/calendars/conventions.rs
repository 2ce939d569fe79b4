//! Business day adjustment conventions.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::Calendar;
use crate::error::CoreError;
use crate::types::Date;

/// How to roll a date that falls on a non-business day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BusinessDayConvention {
    /// Use the date as-is even if it is not a business day.
    #[default]
    Unadjusted,

    /// Move to the following business day.
    Following,

    /// Move to the following business day, unless that crosses into the next
    /// month, in which case move to the preceding business day.
    ModifiedFollowing,

    /// Move to the preceding business day.
    Preceding,

    /// Move to the preceding business day, unless that crosses into the
    /// previous month, in which case move to the following business day.
    ModifiedPreceding,
}

impl std::fmt::Display for BusinessDayConvention {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            BusinessDayConvention::Unadjusted => "Unadjusted",
            BusinessDayConvention::Following => "Following",
            BusinessDayConvention::ModifiedFollowing => "Modified Following",
            BusinessDayConvention::Preceding => "Preceding",
            BusinessDayConvention::ModifiedPreceding => "Modified Preceding",
        };
        write!(f, "{name}")
    }
}

impl FromStr for BusinessDayConvention {
    type Err = CoreError;

    /// Accepts "following", "Modified Following", "modified_following", "MF" and so on.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .to_ascii_lowercase()
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .collect();

        match normalized.as_str() {
            "unadjusted" | "none" | "u" => Ok(BusinessDayConvention::Unadjusted),
            "following" | "f" => Ok(BusinessDayConvention::Following),
            "modifiedfollowing" | "mf" | "modfollowing" => {
                Ok(BusinessDayConvention::ModifiedFollowing)
            }
            "preceding" | "p" => Ok(BusinessDayConvention::Preceding),
            "modifiedpreceding" | "mp" | "modpreceding" => {
                Ok(BusinessDayConvention::ModifiedPreceding)
            }
            _ => Err(CoreError::UnknownBusinessDayConvention {
                name: s.to_string(),
            }),
        }
    }
}

/// Adjusts a date according to the given business day convention.
pub fn adjust<C: Calendar + ?Sized>(
    date: Date,
    convention: BusinessDayConvention,
    calendar: &C,
) -> Date {
    if calendar.is_business_day(date) {
        return date;
    }

    match convention {
        BusinessDayConvention::Unadjusted => date,

        BusinessDayConvention::Following => following(date, calendar),

        BusinessDayConvention::ModifiedFollowing => {
            let adjusted = following(date, calendar);
            if adjusted.month() == date.month() {
                adjusted
            } else {
                preceding(date, calendar)
            }
        }

        BusinessDayConvention::Preceding => preceding(date, calendar),

        BusinessDayConvention::ModifiedPreceding => {
            let adjusted = preceding(date, calendar);
            if adjusted.month() == date.month() {
                adjusted
            } else {
                following(date, calendar)
            }
        }
    }
}

fn following<C: Calendar + ?Sized>(mut date: Date, calendar: &C) -> Date {
    while !calendar.is_business_day(date) {
        date = date.add_days(1);
    }
    date
}

fn preceding<C: Calendar + ?Sized>(mut date: Date, calendar: &C) -> Date {
    while !calendar.is_business_day(date) {
        date = date.add_days(-1);
    }
    date
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendars::WeekendCalendar;

    #[test]
    fn test_following() {
        let saturday = Date::from_ymd(2025, 1, 4).unwrap();
        let adjusted = adjust(saturday, BusinessDayConvention::Following, &WeekendCalendar);
        assert_eq!(adjusted, Date::from_ymd(2025, 1, 6).unwrap());
    }

    #[test]
    fn test_preceding() {
        let sunday = Date::from_ymd(2025, 1, 5).unwrap();
        let adjusted = adjust(sunday, BusinessDayConvention::Preceding, &WeekendCalendar);
        assert_eq!(adjusted, Date::from_ymd(2025, 1, 3).unwrap());
    }

    #[test]
    fn test_modified_following_month_end() {
        // Saturday 2025-05-31: following would be June 2, so roll back to Friday
        let saturday = Date::from_ymd(2025, 5, 31).unwrap();
        let adjusted = adjust(saturday, BusinessDayConvention::ModifiedFollowing, &WeekendCalendar);
        assert_eq!(adjusted, Date::from_ymd(2025, 5, 30).unwrap());

        let sunday = Date::from_ymd(2025, 1, 5).unwrap();
        let adjusted = adjust(sunday, BusinessDayConvention::ModifiedFollowing, &WeekendCalendar);
        assert_eq!(adjusted, Date::from_ymd(2025, 1, 6).unwrap());
    }

    #[test]
    fn test_modified_preceding_month_start() {
        // Saturday 2025-11-01: preceding would be October 31, so roll forward
        let saturday = Date::from_ymd(2025, 11, 1).unwrap();
        let adjusted = adjust(saturday, BusinessDayConvention::ModifiedPreceding, &WeekendCalendar);
        assert_eq!(adjusted, Date::from_ymd(2025, 11, 3).unwrap());
    }

    #[test]
    fn test_unadjusted_and_business_day() {
        let saturday = Date::from_ymd(2025, 1, 4).unwrap();
        assert_eq!(adjust(saturday, BusinessDayConvention::Unadjusted, &WeekendCalendar), saturday);

        let monday = Date::from_ymd(2025, 1, 6).unwrap();
        assert_eq!(adjust(monday, BusinessDayConvention::Following, &WeekendCalendar), monday);
    }

    #[test]
    fn test_parse() {
        assert_eq!(
            "modified following".parse::<BusinessDayConvention>().unwrap(),
            BusinessDayConvention::ModifiedFollowing
        );
        assert_eq!(
            "Modified_Following".parse::<BusinessDayConvention>().unwrap(),
            BusinessDayConvention::ModifiedFollowing
        );
        assert_eq!("MF".parse::<BusinessDayConvention>().unwrap(), BusinessDayConvention::ModifiedFollowing);
        assert_eq!("unadjusted".parse::<BusinessDayConvention>().unwrap(), BusinessDayConvention::Unadjusted);
        assert!("sideways".parse::<BusinessDayConvention>().is_err());
    }
}
