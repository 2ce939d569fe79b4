//! Relative time spans such as `5D`, `3M` or `10Y`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::Date;
use crate::error::{CoreError, CoreResult};

/// Unit of a [`Tenor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TenorUnit {
    /// Calendar days.
    Days,
    /// Calendar weeks.
    Weeks,
    /// Calendar months (end-of-month clamped).
    Months,
    /// Calendar years.
    Years,
}

impl TenorUnit {
    /// Single-letter code used when formatting.
    #[must_use]
    pub fn code(&self) -> char {
        match self {
            TenorUnit::Days => 'D',
            TenorUnit::Weeks => 'W',
            TenorUnit::Months => 'M',
            TenorUnit::Years => 'Y',
        }
    }

    fn parse(unit: &str) -> Option<Self> {
        match unit.to_ascii_lowercase().as_str() {
            "d" | "day" | "days" => Some(TenorUnit::Days),
            "w" | "wk" | "week" | "weeks" => Some(TenorUnit::Weeks),
            "m" | "mo" | "month" | "months" => Some(TenorUnit::Months),
            "y" | "yr" | "year" | "years" => Some(TenorUnit::Years),
            _ => None,
        }
    }
}

/// A relative time span: a signed count of days, weeks, months or years.
///
/// # Example
///
/// ```rust
/// use parcurve_core::types::{Date, Tenor};
///
/// let tenor: Tenor = "6M".parse().unwrap();
/// let start = Date::from_ymd(2016, 1, 15).unwrap();
/// assert_eq!(tenor.add_to(start).unwrap(), Date::from_ymd(2016, 7, 15).unwrap());
///
/// let spelled: Tenor = "6 months".parse().unwrap();
/// assert_eq!(tenor, spelled);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Tenor {
    count: i32,
    unit: TenorUnit,
}

impl Tenor {
    /// Creates a tenor from a count and unit.
    #[must_use]
    pub const fn new(count: i32, unit: TenorUnit) -> Self {
        Self { count, unit }
    }

    /// A tenor of `n` days.
    #[must_use]
    pub const fn days(n: i32) -> Self {
        Self::new(n, TenorUnit::Days)
    }

    /// A tenor of `n` weeks.
    #[must_use]
    pub const fn weeks(n: i32) -> Self {
        Self::new(n, TenorUnit::Weeks)
    }

    /// A tenor of `n` months.
    #[must_use]
    pub const fn months(n: i32) -> Self {
        Self::new(n, TenorUnit::Months)
    }

    /// A tenor of `n` years.
    #[must_use]
    pub const fn years(n: i32) -> Self {
        Self::new(n, TenorUnit::Years)
    }

    /// Returns the signed count.
    #[must_use]
    pub fn count(&self) -> i32 {
        self.count
    }

    /// Returns the unit.
    #[must_use]
    pub fn unit(&self) -> TenorUnit {
        self.unit
    }

    /// Returns this tenor multiplied by `factor`.
    #[must_use]
    pub fn scaled(&self, factor: i32) -> Self {
        Self::new(self.count.saturating_mul(factor), self.unit)
    }

    /// True if the tenor spans no time.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.count == 0
    }

    /// Moves `date` forward (or backward, for negative counts) by this tenor.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidDate` if the result is out of range.
    pub fn add_to(&self, date: Date) -> CoreResult<Date> {
        match self.unit {
            TenorUnit::Days => date.checked_add_days(i64::from(self.count)),
            TenorUnit::Weeks => date.checked_add_days(7 * i64::from(self.count)),
            TenorUnit::Months => date.add_months(self.count),
            TenorUnit::Years => date.add_years(self.count),
        }
    }
}

impl fmt::Display for Tenor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.count, self.unit.code())
    }
}

impl FromStr for Tenor {
    type Err = CoreError;

    /// Accepts compact (`"3M"`, `"-2D"`) and spelled (`"3 months"`) forms.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let split = trimmed
            .char_indices()
            .find(|(i, c)| !(c.is_ascii_digit() || (*i == 0 && (*c == '-' || *c == '+'))))
            .map(|(i, _)| i)
            .ok_or_else(|| CoreError::invalid_tenor(s, "missing unit"))?;

        let (number, unit) = trimmed.split_at(split);
        let count: i32 = number
            .parse()
            .map_err(|_| CoreError::invalid_tenor(s, "missing or invalid count"))?;
        let unit = TenorUnit::parse(unit.trim())
            .ok_or_else(|| CoreError::invalid_tenor(s, format!("unknown unit '{}'", unit.trim())))?;

        Ok(Self::new(count, unit))
    }
}

impl TryFrom<String> for Tenor {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Tenor> for String {
    fn from(tenor: Tenor) -> Self {
        tenor.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_compact() {
        assert_eq!("5D".parse::<Tenor>().unwrap(), Tenor::days(5));
        assert_eq!("2w".parse::<Tenor>().unwrap(), Tenor::weeks(2));
        assert_eq!("18M".parse::<Tenor>().unwrap(), Tenor::months(18));
        assert_eq!("30Y".parse::<Tenor>().unwrap(), Tenor::years(30));
        assert_eq!("-2D".parse::<Tenor>().unwrap(), Tenor::days(-2));
    }

    #[test]
    fn test_parse_spelled() {
        assert_eq!("6 months".parse::<Tenor>().unwrap(), Tenor::months(6));
        assert_eq!("1 day".parse::<Tenor>().unwrap(), Tenor::days(1));
        assert_eq!(" 3 weeks ".parse::<Tenor>().unwrap(), Tenor::weeks(3));
    }

    #[test]
    fn test_parse_errors() {
        assert!("".parse::<Tenor>().is_err());
        assert!("M".parse::<Tenor>().is_err());
        assert!("12".parse::<Tenor>().is_err());
        assert!("5Q".parse::<Tenor>().is_err());
    }

    #[test]
    fn test_add_to() {
        let start = Date::from_ymd(2016, 8, 31).unwrap();
        assert_eq!(
            Tenor::months(6).add_to(start).unwrap(),
            Date::from_ymd(2017, 2, 28).unwrap()
        );
        assert_eq!(
            Tenor::weeks(1).add_to(start).unwrap(),
            Date::from_ymd(2016, 9, 7).unwrap()
        );
        assert_eq!(
            Tenor::months(6).scaled(-2).add_to(start).unwrap(),
            Date::from_ymd(2015, 8, 31).unwrap()
        );
    }

    #[test]
    fn test_add_to_out_of_range() {
        let start = Date::from_ymd(2016, 3, 16).unwrap();
        for text in ["99999999D", "99999999W", "2000000000M", "200000000Y", "-99999999D"] {
            let tenor: Tenor = text.parse().unwrap();
            assert!(tenor.add_to(start).is_err(), "{text}");
        }
    }

    #[test]
    fn test_display_roundtrip_through_serde() {
        let tenor = Tenor::months(3);
        assert_eq!(tenor.to_string(), "3M");
        let json = serde_json::to_string(&tenor).unwrap();
        assert_eq!(json, "\"3M\"");
        assert_eq!(serde_json::from_str::<Tenor>(&json).unwrap(), tenor);
    }
}
