//! Business day calendars and conventions.
//!
//! This module provides:
//! - The [`Calendar`] trait and three small calendars
//! - [`BusinessDayConvention`] rolling rules
//! - [`MarketCalendar`], a cloneable selector used by instrument conventions

use std::collections::BTreeSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

mod conventions;

pub use conventions::{adjust, BusinessDayConvention};

use crate::error::CoreError;
use crate::types::Date;

/// Trait for business day calendars.
pub trait Calendar: Send + Sync {
    /// Returns the name of the calendar.
    fn name(&self) -> &str;

    /// Returns true if the date is a business day.
    fn is_business_day(&self, date: Date) -> bool;

    /// Adjusts a date according to the given business day convention.
    fn adjust(&self, date: Date, convention: BusinessDayConvention) -> Date {
        conventions::adjust(date, convention, self)
    }

    /// Advances a date by a number of business days.
    ///
    /// Zero leaves the date untouched, even if it is a holiday.
    fn add_business_days(&self, date: Date, days: i32) -> Date {
        let mut result = date;
        let mut remaining = days.abs();
        let direction: i64 = if days >= 0 { 1 } else { -1 };

        while remaining > 0 {
            result = result.add_days(direction);
            if self.is_business_day(result) {
                remaining -= 1;
            }
        }

        result
    }

    /// Returns the next business day strictly after the given date.
    fn next_business_day(&self, date: Date) -> Date {
        self.add_business_days(date, 1)
    }
}

/// Saturdays and Sundays are holidays; nothing else is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WeekendCalendar;

impl Calendar for WeekendCalendar {
    fn name(&self) -> &str {
        "Weekends"
    }

    fn is_business_day(&self, date: Date) -> bool {
        !date.is_weekend()
    }
}

/// Every day is a business day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NullCalendar;

impl Calendar for NullCalendar {
    fn name(&self) -> &str {
        "Null"
    }

    fn is_business_day(&self, _date: Date) -> bool {
        true
    }
}

/// Weekends plus an explicit list of holidays.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayCalendar {
    name: String,
    holidays: BTreeSet<Date>,
}

impl HolidayCalendar {
    /// Creates a calendar from a name and a set of holidays.
    pub fn new(name: impl Into<String>, holidays: impl IntoIterator<Item = Date>) -> Self {
        Self {
            name: name.into(),
            holidays: holidays.into_iter().collect(),
        }
    }

    /// Adds a holiday.
    #[must_use]
    pub fn with_holiday(mut self, date: Date) -> Self {
        self.holidays.insert(date);
        self
    }
}

impl Calendar for HolidayCalendar {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_business_day(&self, date: Date) -> bool {
        !date.is_weekend() && !self.holidays.contains(&date)
    }
}

/// Calendar selected by name in instrument conventions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarketCalendar {
    /// [`WeekendCalendar`]
    #[default]
    Weekends,
    /// [`NullCalendar`]
    Null,
    /// A [`HolidayCalendar`] supplied programmatically.
    Holidays(HolidayCalendar),
}

impl Calendar for MarketCalendar {
    fn name(&self) -> &str {
        match self {
            MarketCalendar::Weekends => WeekendCalendar.name(),
            MarketCalendar::Null => NullCalendar.name(),
            MarketCalendar::Holidays(cal) => cal.name(),
        }
    }

    fn is_business_day(&self, date: Date) -> bool {
        match self {
            MarketCalendar::Weekends => WeekendCalendar.is_business_day(date),
            MarketCalendar::Null => NullCalendar.is_business_day(date),
            MarketCalendar::Holidays(cal) => cal.is_business_day(date),
        }
    }
}

impl FromStr for MarketCalendar {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "weekends" | "weekend" | "weekends only" => Ok(MarketCalendar::Weekends),
            "null" | "none" | "all days" => Ok(MarketCalendar::Null),
            _ => Err(CoreError::UnknownCalendar {
                name: s.to_string(),
            }),
        }
    }
}
