//! Day count conventions.
//!
//! A day count turns a pair of dates into a year fraction. The curve layer
//! only needs the four bases quoted by money market and swap instruments:
//!
//! - [`Act360`]: deposits, FRAs, futures, floating legs
//! - [`Act365Fixed`]: sterling legs and the curve time axis
//! - [`Thirty360`]: fixed legs (bond basis)
//! - [`Thirty360E`]: fixed legs (Eurobond basis)
//!
//! # Usage
//!
//! ```rust
//! use parcurve_core::daycounts::{DayCount, DayCountConvention};
//! use parcurve_core::types::Date;
//!
//! let dc: DayCountConvention = "30360".parse().unwrap();
//! let start = Date::from_ymd(2025, 1, 15).unwrap();
//! let end = Date::from_ymd(2025, 7, 15).unwrap();
//!
//! assert_eq!(dc.year_fraction_f64(start, end), 0.5);
//! ```

mod actual;
mod thirty360;

pub use actual::{Act360, Act365Fixed};
pub use thirty360::{Thirty360, Thirty360E};

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::Date;

/// Trait for day count conventions.
///
/// Year fractions are returned as exact decimals; callers working in
/// floating point convert at the boundary.
pub trait DayCount: Send + Sync {
    /// Returns the market name of the convention (e.g. "ACT/360").
    fn name(&self) -> &'static str;

    /// Year fraction between two dates. Negative if `end < start`.
    fn year_fraction(&self, start: Date, end: Date) -> Decimal;

    /// Day count between two dates according to the convention.
    fn day_count(&self, start: Date, end: Date) -> i64;

    /// Year fraction as `f64`.
    fn year_fraction_f64(&self, start: Date, end: Date) -> f64 {
        self.year_fraction(start, end).to_f64().unwrap_or(0.0)
    }
}

/// Runtime-selectable day count convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DayCountConvention {
    /// Actual/360
    #[default]
    Act360,
    /// Actual/365 Fixed
    Act365Fixed,
    /// 30/360 bond basis
    Thirty360,
    /// 30E/360 Eurobond basis
    Thirty360E,
}

impl DayCountConvention {
    /// Returns all supported conventions.
    #[must_use]
    pub fn all() -> &'static [DayCountConvention] {
        &[
            DayCountConvention::Act360,
            DayCountConvention::Act365Fixed,
            DayCountConvention::Thirty360,
            DayCountConvention::Thirty360E,
        ]
    }

    fn as_day_count(&self) -> &'static dyn DayCount {
        match self {
            DayCountConvention::Act360 => &Act360,
            DayCountConvention::Act365Fixed => &Act365Fixed,
            DayCountConvention::Thirty360 => &Thirty360,
            DayCountConvention::Thirty360E => &Thirty360E,
        }
    }
}

impl DayCount for DayCountConvention {
    fn name(&self) -> &'static str {
        self.as_day_count().name()
    }

    fn year_fraction(&self, start: Date, end: Date) -> Decimal {
        self.as_day_count().year_fraction(start, end)
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        self.as_day_count().day_count(start, end)
    }
}

impl std::fmt::Display for DayCountConvention {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for DayCountConvention {
    type Err = CoreError;

    /// Accepts market names ("ACT/360", "30E/360") and compact forms
    /// ("act360", "30360", "30e360"), case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .to_ascii_uppercase()
            .chars()
            .filter(|c| !matches!(c, '/' | ' ' | '_' | '-'))
            .collect();

        match normalized.as_str() {
            "ACT360" | "ACTUAL360" | "A360" => Ok(DayCountConvention::Act360),
            "ACT365" | "ACT365F" | "ACT365FIXED" | "ACTUAL365" | "ACTUAL365FIXED" | "A365F" => {
                Ok(DayCountConvention::Act365Fixed)
            }
            "30360" | "30U360" | "30360US" | "BOND" | "BONDBASIS" | "THIRTY360" => {
                Ok(DayCountConvention::Thirty360)
            }
            "30E360" | "EUROBOND" | "THIRTY360E" => Ok(DayCountConvention::Thirty360E),
            _ => Err(CoreError::UnknownDayCount {
                name: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_aliases() {
        let cases = [
            ("act360", DayCountConvention::Act360),
            ("ACT/360", DayCountConvention::Act360),
            ("Act365", DayCountConvention::Act365Fixed),
            ("ACT/365F", DayCountConvention::Act365Fixed),
            ("30360", DayCountConvention::Thirty360),
            ("30/360", DayCountConvention::Thirty360),
            ("30E360", DayCountConvention::Thirty360E),
            ("30e/360", DayCountConvention::Thirty360E),
        ];
        for (input, expected) in cases {
            assert_eq!(input.parse::<DayCountConvention>().unwrap(), expected, "{input}");
        }
    }

    #[test]
    fn test_parse_unknown() {
        let err = "act999".parse::<DayCountConvention>().unwrap_err();
        assert!(matches!(err, CoreError::UnknownDayCount { .. }));
    }

    #[test]
    fn test_display_matches_name() {
        for convention in DayCountConvention::all() {
            assert_eq!(convention.to_string(), convention.name());
            let parsed: DayCountConvention = convention.name().parse().unwrap();
            assert_eq!(parsed, *convention);
        }
    }

    #[test]
    fn test_enum_dispatch() {
        let start = Date::from_ymd(2025, 1, 1).unwrap();
        let end = Date::from_ymd(2025, 7, 1).unwrap();

        assert_eq!(DayCountConvention::Act360.day_count(start, end), 181);
        assert_eq!(DayCountConvention::Thirty360.day_count(start, end), 180);
        assert_eq!(DayCountConvention::Thirty360.year_fraction_f64(start, end), 0.5);
    }
}
